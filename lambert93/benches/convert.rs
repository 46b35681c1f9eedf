//! Benchmarks pour la conversion Lambert 93 → WGS84

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use lambert93::{GeodeticConverter, PlanarPoint};

/// Grille régulière couvrant la métropole
fn france_grid(step: usize) -> Vec<PlanarPoint> {
    let mut points = Vec::new();
    for x in (100_000..=1_250_000).step_by(step) {
        for y in (6_050_000..=7_150_000).step_by(step) {
            points.push(PlanarPoint::new(x as f64, y as f64));
        }
    }
    points
}

fn bench_convert_single(c: &mut Criterion) {
    let converter = GeodeticConverter::lambert93();
    let point = PlanarPoint::new(652709.401, 6862421.769);

    c.bench_function("convert_single", |b| {
        b.iter(|| converter.convert(black_box(point)).unwrap())
    });
}

fn bench_convert_grid(c: &mut Criterion) {
    let converter = GeodeticConverter::lambert93();

    let mut group = c.benchmark_group("convert_grid");
    for step in [50_000, 10_000] {
        let points = france_grid(step);
        group.throughput(Throughput::Elements(points.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(step), &points, |b, points| {
            b.iter(|| {
                let converted: Vec<_> = points
                    .iter()
                    .map(|p| converter.convert(black_box(*p)))
                    .collect();
                black_box(converted)
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_convert_single, bench_convert_grid);
criterion_main!(benches);
