//! Criterion benchmarks for the boundary hot paths.
//!
//! Benchmarks:
//! 1. Periodic second/minute alignment
//! 2. Exchange engine dispatch per interval unit
//! 3. Trading-day roll-forward across a holiday run

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use bartime_core::calendar::{roll_forward, HolidayCalendar};
use bartime_core::domain::{IntervalSpec, ProductCategory, SessionSchedule};
use bartime_core::periodic::{next_minute_boundary, next_second_boundary};
use bartime_core::ExchangeBoundaryEngine;
use chrono::{Duration, NaiveDate, NaiveDateTime};

// ── Helpers ──────────────────────────────────────────────────────────

fn make_ticks(n: usize) -> Vec<NaiveDateTime> {
    let base = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap().and_hms_opt(9, 0, 0).unwrap();
    (0..n)
        .map(|i| base + Duration::microseconds(i as i64 * 137_911))
        .collect()
}

fn night_schedule() -> SessionSchedule {
    SessionSchedule::from_offsets(&[
        (32_400, 36_900),
        (37_800, 41_400),
        (48_600, 54_000),
        (75_600, 9_000),
    ])
}

// ── 1. Periodic ──────────────────────────────────────────────────────

fn bench_periodic(c: &mut Criterion) {
    let ticks = make_ticks(10_000);
    c.bench_function("periodic_second_15", |b| {
        b.iter(|| {
            for t in &ticks {
                black_box(next_second_boundary(black_box(*t), 15));
            }
        })
    });
    c.bench_function("periodic_minute_5", |b| {
        b.iter(|| {
            for t in &ticks {
                black_box(next_minute_boundary(black_box(*t), 5));
            }
        })
    });
}

// ── 2. Engine dispatch ───────────────────────────────────────────────

fn bench_engine(c: &mut Criterion) {
    let engine = ExchangeBoundaryEngine::builder()
        .calendar(HolidayCalendar::new())
        .build()
        .unwrap();
    let schedule = night_schedule();
    let ticks = make_ticks(10_000);
    let mut group = c.benchmark_group("exchange_next_bar");

    for interval in ["1m", "30m", "1H", "4H", "1D", "1W"] {
        let spec: IntervalSpec = interval.parse().unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(interval), &spec, |b, spec| {
            b.iter(|| {
                for t in &ticks {
                    let _ = black_box(engine.next_bar(*t, *spec, ProductCategory::Commodity, &schedule));
                }
            })
        });
    }
    group.finish();
}

// ── 3. Roll-forward ──────────────────────────────────────────────────

fn bench_roll_forward(c: &mut Criterion) {
    let start = NaiveDate::from_ymd_opt(2024, 10, 1).unwrap();
    let calendar = HolidayCalendar::with_holidays((0..7).map(|i| start + Duration::days(i)));
    c.bench_function("roll_forward_golden_week", |b| {
        b.iter(|| black_box(roll_forward(&calendar, black_box(start))))
    });
}

criterion_group!(benches, bench_periodic, bench_engine, bench_roll_forward);
criterion_main!(benches);
