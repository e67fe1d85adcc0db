use calendar_engine::{
    assign_rows, expand, AxisSpan, CalendarGrid, EngineConfig, EventDraft, RepeatRule, RepeatType,
};
use chrono::NaiveDate;
use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

fn bench_grid(c: &mut Criterion) {
    c.bench_function("grid_build_year", |b| {
        b.iter(|| CalendarGrid::build(black_box(2024)))
    });
}

fn bench_expand(c: &mut Criterion) {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1)
        .and_then(|d| d.and_hms_opt(9, 0, 0))
        .expect("valid date");
    let seed = EventDraft::new(start)
        .with_repeat(RepeatRule::new(RepeatType::Daily))
        .commit()
        .expect("valid draft");
    let config = EngineConfig::default();

    c.bench_function("expand_daily_one_year", |b| {
        b.iter(|| expand(black_box(&seed), &config))
    });
}

fn bench_rows(c: &mut Criterion) {
    // A month view: 42 cells, 200 overlapping events.
    let spans: Vec<AxisSpan> = (0..200)
        .map(|i| AxisSpan::new((i * 7) % 42, 1 + i % 5))
        .collect();

    c.bench_function("assign_rows_month_200", |b| {
        b.iter(|| assign_rows(black_box(&spans), 42))
    });
}

criterion_group!(benches, bench_grid, bench_expand, bench_rows);
criterion_main!(benches);
