//! Criterion benchmarks for the aggregation pipeline

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use pltrack::services::extractor::ColumnRules;
use pltrack::services::Aggregator;
use pltrack::types::SourceBatch;
use std::collections::HashMap;
use std::hint::black_box;

const SOURCES: [&str; 8] = [
    "S1x",
    "S2x",
    "S3PM",
    "S3IR",
    "follow",
    "Tennis",
    "MLB",
    "American Football",
];

/// `days` rows per source, several rows per date, across ~3 years of dates
fn make_batches(days: usize) -> HashMap<String, SourceBatch> {
    SOURCES
        .iter()
        .enumerate()
        .map(|(s, source)| {
            let mut rows = vec![vec!["Date".to_string()]];
            for i in 0..days {
                let day = (i / 3) % 1000;
                let date = chrono::NaiveDate::from_ymd_opt(2022, 1, 1).unwrap()
                    + chrono::Duration::days(day as i64);
                let mut row = vec![String::new(); 11];
                row[0] = date.format("%d/%m/%Y").to_string();
                row[4] = format!("{}", 100 + i);
                row[5] = format!("{},{:03}", 1 + s, i % 1000);
                row[8] = format!("{}.25", i as i64 % 200 - 100);
                row[10] = format!("-{}.5", i % 50);
                rows.push(row);
            }
            (source.to_string(), SourceBatch::Rows(rows))
        })
        .collect()
}

fn bench_daily(c: &mut Criterion) {
    let sources: Vec<String> = SOURCES.iter().map(|s| s.to_string()).collect();
    let subset: Vec<String> = sources[4..].to_vec();
    let rules = ColumnRules::default();

    let mut group = c.benchmark_group("daily_with_subset");
    for rows in [1_000usize, 10_000] {
        let batches = make_batches(rows);
        group.throughput(Throughput::Elements((rows * SOURCES.len()) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(rows), &batches, |b, batches| {
            b.iter(|| {
                Aggregator::daily_with_subset(
                    black_box(batches),
                    black_box(&sources),
                    black_box(&subset),
                    &rules,
                )
            })
        });
    }
    group.finish();
}

fn bench_rollups(c: &mut Criterion) {
    let sources: Vec<String> = SOURCES.iter().map(|s| s.to_string()).collect();
    let daily = Aggregator::daily(&make_batches(10_000), &sources, &ColumnRules::default());

    c.bench_function("weekly", |b| {
        b.iter(|| Aggregator::weekly(black_box(daily.summaries.values()), &sources).unwrap())
    });

    c.bench_function("all_time", |b| {
        b.iter(|| Aggregator::all_time(black_box(daily.summaries.values()), &sources))
    });
}

criterion_group!(benches, bench_daily, bench_rollups);
criterion_main!(benches);
