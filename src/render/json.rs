use crate::error::Result;
use crate::model::{FilterSummary, StatsOutput, StatsReport, SCHEMA_VERSION};

pub fn envelope(repository_path: &str, filters: FilterSummary, stats: StatsReport) -> StatsOutput {
    StatsOutput {
        version: SCHEMA_VERSION,
        repository_path: repository_path.to_string(),
        filters,
        stats,
    }
}

/// Pretty JSON. Contains no wall-clock data, so unchanged history renders
/// byte-identical output.
pub fn to_json(output: &StatsOutput) -> Result<String> {
    Ok(serde_json::to_string_pretty(output)?)
}
