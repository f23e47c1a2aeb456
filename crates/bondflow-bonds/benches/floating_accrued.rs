//! Benchmarks for the daily compounded floating accrual loop and full
//! instrument valuation.
//!
//! Run with: cargo bench -p bondflow-bonds

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use bondflow_bonds::accrued::floating_accrued_interest;
use bondflow_bonds::instruments::{FixedRateBond, FloatingRateNote};
use bondflow_core::{Date, DayCountConvention, Frequency};
use bondflow_curves::{ZeroCurve, ZeroCurveBuilder};

fn curve(reference: Date) -> ZeroCurve {
    let pillars = [
        (3, 0.030),
        (6, 0.032),
        (12, 0.035),
        (24, 0.038),
        (36, 0.040),
        (60, 0.045),
        (120, 0.050),
        (360, 0.055),
    ];
    ZeroCurveBuilder::new(reference)
        .add_rates(
            pillars
                .iter()
                .map(|&(m, r)| (reference.add_months(m).unwrap(), r)),
        )
        .build()
        .unwrap()
}

fn bench_floating_accrued(c: &mut Criterion) {
    let reference = Date::from_ymd(2024, 1, 2).unwrap();
    let curve = curve(reference);
    let mut group = c.benchmark_group("floating_accrued");

    for stub_days in [30_i64, 90, 182, 365] {
        let start = reference.add_days(10);
        let valuation = start.add_days(stub_days);
        group.throughput(Throughput::Elements(stub_days as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(stub_days),
            &valuation,
            |b, &valuation| {
                b.iter(|| {
                    floating_accrued_interest(
                        black_box(start),
                        black_box(valuation),
                        1_000_000.0,
                        &curve,
                        DayCountConvention::ActActIsda,
                    )
                    .unwrap()
                });
            },
        );
    }
    group.finish();
}

fn bench_valuation(c: &mut Criterion) {
    let reference = Date::from_ymd(2024, 1, 2).unwrap();
    let curve = curve(reference);
    let issue = Date::from_ymd(2024, 1, 15).unwrap();
    let maturity = Date::from_ymd(2034, 1, 15).unwrap();
    let valuation = Some(Date::from_ymd(2026, 5, 20).unwrap());

    let fixed = FixedRateBond::builder()
        .issue_date(issue)
        .maturity_date(maturity)
        .face_value(1_000_000.0)
        .coupon_rate(0.045)
        .frequency(Frequency::SemiAnnual)
        .build()
        .unwrap();
    let floating = FloatingRateNote::builder()
        .issue_date(issue)
        .maturity_date(maturity)
        .face_value(1_000_000.0)
        .frequency(Frequency::Quarterly)
        .build()
        .unwrap();

    c.bench_function("fixed_value_10y", |b| {
        b.iter(|| fixed.value(&curve, black_box(valuation)).unwrap());
    });
    c.bench_function("floating_value_10y", |b| {
        b.iter(|| floating.value(&curve, &curve, black_box(valuation)).unwrap());
    });
}

criterion_group!(benches, bench_floating_accrued, bench_valuation);
criterion_main!(benches);
