//! Performance benchmarks for the Timesheet Engine.
//!
//! This benchmark suite covers:
//! - Single session breakdowns
//! - Period aggregation over growing interval counts
//! - The `/hours` and `/summary` endpoints end to end
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use std::sync::Arc;

use chrono::{Duration, TimeZone, Utc};
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use mockable::DefaultClock;

use timesheet_engine::api::{AppState, create_router};
use timesheet_engine::calculation::{
    PeriodBoundary, aggregate_period, compute_hours_breakdown, compute_hours_breakdown_from_str,
};
use timesheet_engine::config::ConfigLoader;
use timesheet_engine::models::TimeInterval;
use timesheet_engine::store::MemoryStore;

use axum::{body::Body, http::Request};
use tower::ServiceExt;

/// Creates a test state with loaded configuration and an empty store.
fn create_test_state() -> AppState {
    let config = ConfigLoader::load("./config").expect("Failed to load config");
    AppState::new(config, Arc::new(MemoryStore::new()), Arc::new(DefaultClock))
}

/// Creates one closed 9.5 hour session per day starting 2023-05-28.
fn create_intervals(count: usize) -> Vec<TimeInterval> {
    let first = Utc.with_ymd_and_hms(2023, 5, 28, 8, 30, 0).unwrap();
    (0..count)
        .map(|i| {
            let clock_in = first + Duration::days(i as i64);
            TimeInterval::closed(clock_in, clock_in + Duration::minutes(570), 30)
        })
        .collect()
}

/// Benchmark: Single session breakdown.
fn bench_single_breakdown(c: &mut Criterion) {
    let clock_in = Utc.with_ymd_and_hms(2023, 6, 1, 8, 30, 0).unwrap();
    let clock_out = Utc.with_ymd_and_hms(2023, 6, 1, 18, 45, 0).unwrap();

    c.bench_function("single_breakdown", |b| {
        b.iter(|| {
            compute_hours_breakdown(
                black_box(Some(clock_in)),
                black_box(Some(clock_out)),
                black_box(45),
            )
        })
    });

    c.bench_function("single_breakdown_from_str", |b| {
        b.iter(|| {
            compute_hours_breakdown_from_str(
                black_box("2023-06-01T08:30:00.000Z"),
                black_box(Some("2023-06-01T18:45:00.000Z")),
                black_box(45),
            )
        })
    });
}

/// Benchmark: Aggregation at various interval counts to understand scaling.
fn bench_aggregation_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregation");

    for count in [7, 31, 365, 3650].iter() {
        let intervals = create_intervals(*count);
        let boundary = PeriodBoundary::Range {
            start: intervals[0].work_date(),
            end: intervals[count - 1].work_date(),
        };

        group.throughput(Throughput::Elements(*count as u64));
        group.bench_with_input(BenchmarkId::new("intervals", count), count, |b, _| {
            b.iter(|| aggregate_period(black_box(&intervals), |i| boundary.contains(i)))
        });
    }

    group.finish();
}

/// Benchmark: POST /hours through the router.
fn bench_hours_endpoint(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let router = create_router(create_test_state());
    let body = serde_json::json!({
        "clock_in": "2023-06-01T08:30:00Z",
        "clock_out": "2023-06-01T18:45:00Z",
        "break_minutes": 45
    })
    .to_string();

    c.bench_function("hours_endpoint", |b| {
        b.to_async(&rt).iter(|| async {
            let router = router.clone();
            let response = router
                .oneshot(
                    Request::builder()
                        .method("POST")
                        .uri("/hours")
                        .header("Content-Type", "application/json")
                        .body(Body::from(body.clone()))
                        .unwrap(),
                )
                .await
                .unwrap();
            black_box(response)
        })
    });
}

/// Benchmark: POST /summary for a month of sessions.
fn bench_summary_endpoint(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let router = create_router(create_test_state());
    let intervals: Vec<serde_json::Value> = create_intervals(31)
        .iter()
        .map(|interval| {
            serde_json::json!({
                "clock_in": interval.clock_in.to_rfc3339(),
                "clock_out": interval.clock_out.map(|t| t.to_rfc3339()),
                "break_minutes": interval.break_minutes
            })
        })
        .collect();
    let body = serde_json::json!({
        "boundary": { "type": "range", "start": "2023-05-28", "end": "2023-06-27" },
        "intervals": intervals
    })
    .to_string();

    let mut group = c.benchmark_group("summary_endpoint");
    group.throughput(Throughput::Elements(31));

    group.bench_function("month", |b| {
        b.to_async(&rt).iter(|| async {
            let router = router.clone();
            let response = router
                .oneshot(
                    Request::builder()
                        .method("POST")
                        .uri("/summary")
                        .header("Content-Type", "application/json")
                        .body(Body::from(body.clone()))
                        .unwrap(),
                )
                .await
                .unwrap();
            black_box(response)
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_single_breakdown,
    bench_aggregation_scaling,
    bench_hours_endpoint,
    bench_summary_endpoint,
);
criterion_main!(benches);
