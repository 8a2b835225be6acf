//! Pattern discovery and full pipeline benchmarks.
//!
//! Benchmarks: the discovery engine alone over prebuilt signatures, and the
//! end-to-end pipeline over growing event sets.
//! Run with: cargo bench -p stakeout-analysis --bench discovery_bench

use chrono::{Duration, TimeZone, Utc};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use stakeout_analysis::baseline::GlobalBaseline;
use stakeout_analysis::grid::GridIndexer;
use stakeout_analysis::patterns::PatternEngine;
use stakeout_analysis::pipeline::AnalysisPipeline;
use stakeout_analysis::signatures::SignatureBuilder;
use stakeout_core::config::PatternConfig;
use stakeout_core::types::{EventSet, StopEvent};

const METHODS: [&str; 4] = ["radar", "laser", "vascar", "other"];

fn synthetic_events(cells: usize, per_cell: usize) -> EventSet {
    let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let mut events = Vec::with_capacity(cells * per_cell);
    for c in 0..cells {
        let lat = 38.0 + (c % 100) as f64 * 0.002;
        let lng = -77.0 - (c / 100) as f64 * 0.002;
        for i in 0..per_cell {
            let hour = [7, 8, 8, 9, 17, 17, 18, 23][(c + i) % 8];
            let ts = base + Duration::days(((c + i * 7) % 180) as i64) + Duration::hours(hour);
            events.push(
                StopEvent::new(lat, lng, ts, METHODS[(c + i) % METHODS.len()])
                    .unwrap()
                    .with_speed_over(5.0 + (i % 20) as f64),
            );
        }
    }
    EventSet::from_events(events).unwrap()
}

fn pattern_discovery(c: &mut Criterion) {
    let mut group = c.benchmark_group("pattern_discovery");
    group.sample_size(10);

    for cells in [100, 500, 1000] {
        let events = synthetic_events(cells, 20);
        let indexer = GridIndexer::new(0.001);
        let partition = indexer.partition(&events);
        let baseline = GlobalBaseline::compute(&events);
        let signatures = SignatureBuilder::new(10).build_all(&events, &partition, &baseline);

        group.bench_with_input(BenchmarkId::new("discover", cells), &cells, |b, _| {
            b.iter(|| {
                PatternEngine::new(PatternConfig::default()).discover(
                    &events,
                    &signatures,
                    &indexer,
                )
            });
        });
    }
    group.finish();
}

fn full_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_pipeline");
    group.sample_size(10);

    for cells in [100, 500] {
        let events = synthetic_events(cells, 20);
        let pipeline = AnalysisPipeline::default();

        group.bench_with_input(BenchmarkId::new("run", cells), &cells, |b, _| {
            b.iter(|| pipeline.run(&events));
        });
    }
    group.finish();
}

criterion_group!(benches, pattern_discovery, full_pipeline);
criterion_main!(benches);
