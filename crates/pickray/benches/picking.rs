#![allow(missing_docs)]
use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use pickray::{nearest_aabb, nearest_polygon, Aabb3, HitMode, Polygon, Ray};
use pickray_math::Point3;

/// A `side x side` grid of unit quads in the XY plane.
fn quad_grid(side: usize) -> Vec<Polygon> {
    let mut quads = Vec::with_capacity(side * side);
    for i in 0..side {
        for j in 0..side {
            let (x, y) = (i as f64, j as f64);
            quads.push(Polygon::Quad([
                Point3::new(x, y, 0.0),
                Point3::new(x + 1.0, y, 0.0),
                Point3::new(x + 1.0, y + 1.0, 0.0),
                Point3::new(x, y + 1.0, 0.0),
            ]));
        }
    }
    quads
}

fn bench_triangle(c: &mut Criterion) {
    let a = Point3::new(0.0, 0.0, 0.0);
    let b = Point3::new(1.0, 0.0, 0.0);
    let tri_c = Point3::new(0.0, 1.0, 0.0);
    let hit = Ray::from_to(Point3::new(0.25, 0.25, 5.0), Point3::new(0.25, 0.25, 0.0));
    let miss = Ray::from_to(Point3::new(2.0, 2.0, 5.0), Point3::new(2.0, 2.0, 0.0));

    let mut group = c.benchmark_group("triangle");
    group.bench_function("hits_triangle", |bench| {
        bench.iter(|| black_box(&hit).hits_triangle(&a, &b, &tri_c))
    });
    group.bench_function("intersects_triangle_world", |bench| {
        bench.iter(|| black_box(&hit).intersects_triangle(&a, &b, &tri_c, HitMode::World))
    });
    group.bench_function("miss", |bench| {
        bench.iter(|| black_box(&miss).hits_triangle(&a, &b, &tri_c))
    });
    group.finish();
}

fn bench_nearest(c: &mut Criterion) {
    let mut group = c.benchmark_group("nearest_polygon");
    for &side in &[4usize, 16, 64] {
        let quads = quad_grid(side);
        let mid = side as f64 / 2.0 + 0.5;
        let ray = Ray::from_to(Point3::new(mid, mid, 10.0), Point3::new(mid, mid, 0.0));
        group.throughput(Throughput::Elements(quads.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(quads.len()), &quads, |bench, quads| {
            bench.iter(|| nearest_polygon(black_box(&ray), quads))
        });
    }
    group.finish();
}

fn bench_boxes(c: &mut Criterion) {
    let boxes: Vec<Aabb3> = (0..1_000)
        .map(|i| {
            let x = i as f64 * 2.0;
            Aabb3::new(Point3::new(x, -1.0, -1.0), Point3::new(x + 1.0, 1.0, 1.0))
        })
        .collect();
    let ray = Ray::from_to(Point3::new(-5.0, 0.0, 0.0), Point3::new(0.0, 0.0, 0.0));

    let mut group = c.benchmark_group("aabb");
    group.throughput(Throughput::Elements(boxes.len() as u64));
    group.bench_function("nearest_aabb_1000", |bench| {
        bench.iter(|| nearest_aabb(black_box(&ray), &boxes))
    });
    group.finish();
}

criterion_group!(benches, bench_triangle, bench_nearest, bench_boxes);
criterion_main!(benches);
