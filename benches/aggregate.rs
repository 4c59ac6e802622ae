use chrono::{Duration, FixedOffset, TimeZone};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use gitstat::analysis::aggregate;
use gitstat::model::CommitRecord;

const AUTHORS: [&str; 6] = ["alice", "bob", "carol", "dave", "erin", "frank"];

fn synthetic_history(len: usize) -> Vec<CommitRecord> {
    let offset = FixedOffset::east_opt(3600).unwrap();
    let start = offset.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
    (0..len)
        .map(|i| {
            let author = AUTHORS[i % AUTHORS.len()];
            CommitRecord {
                id: format!("{i:040x}"),
                short_id: format!("{i:07x}"),
                author_name: author.to_string(),
                author_email: format!("{author}@example.com"),
                timestamp: start + Duration::minutes(i as i64 * 97),
                summary: format!("change {i}"),
                message: format!("change {i}\n"),
                parent_count: if i % 25 == 0 { 2 } else { 1 },
                files_changed: (i % 7) as u32 + 1,
                insertions: (i % 50) as u64,
                deletions: (i % 13) as u64,
            }
        })
        .collect()
}

fn bench_aggregate(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregate");

    for size in [1_000usize, 10_000, 100_000] {
        let commits = synthetic_history(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("authors_only", size), &commits, |b, commits| {
            b.iter(|| black_box(aggregate(commits, false)));
        });
        group.bench_with_input(BenchmarkId::new("with_frequency", size), &commits, |b, commits| {
            b.iter(|| black_box(aggregate(commits, true)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_aggregate);
criterion_main!(benches);
