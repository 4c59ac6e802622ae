//! SVG charts of commit frequency.
//!
//! Geometry is computed here; the markup lives in handlebars templates under
//! `templates/`.

use crate::analysis::weekday_name;
use crate::analysis::frequency::WEEKDAYS;
use crate::config::{ensure_directory, VisualizationConfig};
use crate::error::Result;
use crate::model::{Bucket, FrequencyAnalysis};
use chrono::NaiveDate;
use handlebars::Handlebars;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

const MARGIN_LEFT: f64 = 56.0;
const MARGIN_RIGHT: f64 = 24.0;
const MARGIN_TOP: f64 = 44.0;
const MARGIN_BOTTOM: f64 = 56.0;
const Y_TICKS: u64 = 4;

const HOUR_COLOR: &str = "#87ceeb";
const PEAK_COLOR: &str = "orange";
const WEEKDAY_COLORS: [&str; 7] = [
    "#ff9999", "#66b3ff", "#99ff99", "#ffcc99", "#ff99cc", "#c2c2f0", "#ffb3e6",
];
const LINE_COLOR: &str = "#1f77b4";

#[derive(Debug, Clone, PartialEq)]
pub struct RenderedChart {
    /// File stem, e.g. `hourly_distribution`.
    pub name: &'static str,
    pub title: &'static str,
    pub svg: String,
}

#[derive(Serialize)]
struct Frame {
    width: u32,
    height: u32,
    left: f64,
    right: f64,
    top: f64,
    bottom: f64,
    center_x: f64,
    middle_y: f64,
}

#[derive(Serialize)]
struct Tick {
    x: f64,
    y: f64,
    label: String,
}

#[derive(Serialize)]
struct Bar {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    color: &'static str,
    label: String,
    value: u64,
}

#[derive(Serialize)]
struct Marker {
    x: f64,
    y: f64,
    label: String,
    value: u64,
}

#[derive(Serialize)]
struct BarChartView<'a> {
    title: &'a str,
    x_label: &'a str,
    y_label: &'a str,
    frame: Frame,
    y_ticks: Vec<Tick>,
    x_ticks: Vec<Tick>,
    bars: Vec<Bar>,
}

#[derive(Serialize)]
struct LineChartView<'a> {
    title: &'a str,
    x_label: &'a str,
    y_label: &'a str,
    frame: Frame,
    y_ticks: Vec<Tick>,
    x_ticks: Vec<Tick>,
    points: String,
    color: &'static str,
    markers: Vec<Marker>,
}

pub struct ChartRenderer {
    engine: Handlebars<'static>,
    width: u32,
    height: u32,
}

impl ChartRenderer {
    pub fn new(options: &VisualizationConfig) -> Result<Self> {
        let mut engine = Handlebars::new();
        engine.set_strict_mode(true);
        engine.register_template_string("bar_chart", include_str!("../../templates/bar_chart.svg.hbs"))?;
        engine.register_template_string("line_chart", include_str!("../../templates/line_chart.svg.hbs"))?;
        Ok(Self {
            engine,
            width: options.chart_width,
            height: options.chart_height,
        })
    }

    fn frame(&self) -> Frame {
        let width = self.width as f64;
        let height = self.height as f64;
        Frame {
            width: self.width,
            height: self.height,
            left: MARGIN_LEFT,
            right: width - MARGIN_RIGHT,
            top: MARGIN_TOP,
            bottom: height - MARGIN_BOTTOM,
            center_x: px(MARGIN_LEFT + (width - MARGIN_LEFT - MARGIN_RIGHT) / 2.0),
            middle_y: px(MARGIN_TOP + (height - MARGIN_TOP - MARGIN_BOTTOM) / 2.0),
        }
    }

    /// Bar chart of the 24 hours, with the busiest hour highlighted.
    pub fn hourly(&self, freq: &FrequencyAnalysis) -> Result<RenderedChart> {
        let peak = freq.summary.peak_hour as usize;
        let colors: Vec<&'static str> = (0..freq.hourly.len())
            .map(|i| if i == peak { PEAK_COLOR } else { HOUR_COLOR })
            .collect();
        let title = "Commit Distribution by Hour";
        let svg = self.bar_chart(
            title,
            "Hour of Day",
            &freq.hourly,
            &colors,
            |i, b| (i % 2 == 0).then(|| b.key.clone()),
        )?;
        Ok(RenderedChart {
            name: "hourly_distribution",
            title,
            svg,
        })
    }

    pub fn weekday(&self, freq: &FrequencyAnalysis) -> Result<RenderedChart> {
        let title = "Commit Distribution by Weekday";
        let svg = self.bar_chart(
            title,
            "Day of Week",
            &freq.weekday,
            &WEEKDAY_COLORS,
            |i, _| Some(weekday_name(WEEKDAYS[i % 7]).chars().take(3).collect()),
        )?;
        Ok(RenderedChart {
            name: "weekday_distribution",
            title,
            svg,
        })
    }

    /// Line chart of commits per active day. `None` without daily data.
    pub fn timeline(&self, freq: &FrequencyAnalysis) -> Result<Option<RenderedChart>> {
        let days: Vec<(NaiveDate, &Bucket)> = freq
            .daily
            .iter()
            .filter_map(|b| {
                NaiveDate::parse_from_str(&b.key, "%Y-%m-%d")
                    .ok()
                    .map(|d| (d, b))
            })
            .collect();
        let (Some(first), Some(last)) = (days.first(), days.last()) else {
            return Ok(None);
        };

        let frame = self.frame();
        let max = days.iter().map(|(_, b)| b.count).max().unwrap_or(0);
        let scale = axis_max(max);
        let span = (last.0 - first.0).num_days();
        let plot_w = frame.right - frame.left;

        let x_for = |day: NaiveDate| -> f64 {
            if span == 0 {
                frame.left + plot_w / 2.0
            } else {
                frame.left + (day - first.0).num_days() as f64 / span as f64 * plot_w
            }
        };

        let markers: Vec<Marker> = days
            .iter()
            .map(|(day, bucket)| Marker {
                x: px(x_for(*day)),
                y: px(y_for(&frame, bucket.count, scale)),
                label: bucket.key.clone(),
                value: bucket.count,
            })
            .collect();
        let points = markers
            .iter()
            .map(|m| format!("{},{}", m.x, m.y))
            .collect::<Vec<_>>()
            .join(" ");

        let mut x_ticks = vec![Tick {
            x: px(x_for(first.0)),
            y: frame.bottom + 18.0,
            label: first.1.key.clone(),
        }];
        if span > 0 {
            let mid = first.0 + chrono::Duration::days(span / 2);
            x_ticks.push(Tick {
                x: px(x_for(mid)),
                y: frame.bottom + 18.0,
                label: mid.format("%Y-%m-%d").to_string(),
            });
            x_ticks.push(Tick {
                x: px(x_for(last.0)),
                y: frame.bottom + 18.0,
                label: last.1.key.clone(),
            });
        }

        let title = "Commit Activity Timeline";
        let view = LineChartView {
            title,
            x_label: "Date",
            y_label: "Number of Commits",
            y_ticks: y_ticks(&frame, scale),
            x_ticks,
            points,
            color: LINE_COLOR,
            markers,
            frame,
        };
        let svg = self.engine.render("line_chart", &view)?;
        Ok(Some(RenderedChart {
            name: "commit_timeline",
            title,
            svg,
        }))
    }

    pub fn render_all(&self, freq: &FrequencyAnalysis) -> Result<Vec<RenderedChart>> {
        let mut charts = vec![self.hourly(freq)?, self.weekday(freq)?];
        if let Some(timeline) = self.timeline(freq)? {
            charts.push(timeline);
        }
        Ok(charts)
    }

    fn bar_chart<F>(
        &self,
        title: &str,
        x_label: &str,
        buckets: &[Bucket],
        colors: &[&'static str],
        tick_label: F,
    ) -> Result<String>
    where
        F: Fn(usize, &Bucket) -> Option<String>,
    {
        let frame = self.frame();
        let max = buckets.iter().map(|b| b.count).max().unwrap_or(0);
        let scale = axis_max(max);
        let slot = (frame.right - frame.left) / buckets.len().max(1) as f64;

        let mut bars = Vec::with_capacity(buckets.len());
        let mut x_ticks = Vec::new();
        for (i, bucket) in buckets.iter().enumerate() {
            let x = frame.left + i as f64 * slot;
            let top = y_for(&frame, bucket.count, scale);
            bars.push(Bar {
                x: px(x + slot * 0.1),
                y: px(top),
                width: px(slot * 0.8),
                height: px(frame.bottom - top),
                color: colors[i % colors.len()],
                label: bucket.key.clone(),
                value: bucket.count,
            });
            if let Some(label) = tick_label(i, bucket) {
                x_ticks.push(Tick {
                    x: px(x + slot / 2.0),
                    y: frame.bottom + 18.0,
                    label,
                });
            }
        }

        let view = BarChartView {
            title,
            x_label,
            y_label: "Number of Commits",
            y_ticks: y_ticks(&frame, scale),
            x_ticks,
            bars,
            frame,
        };
        Ok(self.engine.render("bar_chart", &view)?)
    }
}

/// Smallest multiple of `Y_TICKS` at or above `max`, so tick labels are whole numbers.
fn axis_max(max: u64) -> u64 {
    max.max(1).div_ceil(Y_TICKS) * Y_TICKS
}

fn y_for(frame: &Frame, count: u64, scale: u64) -> f64 {
    frame.bottom - (count as f64 / scale as f64) * (frame.bottom - frame.top)
}

fn y_ticks(frame: &Frame, scale: u64) -> Vec<Tick> {
    (0..=Y_TICKS)
        .map(|i| {
            let value = scale / Y_TICKS * i;
            Tick {
                x: frame.left - 8.0,
                y: px(y_for(frame, value, scale)),
                label: value.to_string(),
            }
        })
        .collect()
}

fn px(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Write each chart as `<name>.svg` under `dir`.
pub fn write_charts(dir: &Path, charts: &[RenderedChart]) -> Result<Vec<PathBuf>> {
    ensure_directory(dir)?;
    let mut paths = Vec::with_capacity(charts.len());
    for chart in charts {
        let path = dir.join(format!("{}.svg", chart.name));
        fs::write(&path, &chart.svg)?;
        paths.push(path);
    }
    info!(event = "render.chart.written", dir = %dir.display(), charts = paths.len());
    Ok(paths)
}
