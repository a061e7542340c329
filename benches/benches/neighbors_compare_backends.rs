// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use understory_neighbors::{Bounds, GridConfig, GridIndex, LinearIndex, Query, SearchIndex};

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
}

/// Uniform points in `[-side/2, side/2]^2`, so the grid has to shift.
fn gen_uniform_points(count: usize, side: f64) -> Vec<[f64; 2]> {
    let mut rng = Rng::new(0xCAFE_F00D_DEAD_BEEF);
    (0..count)
        .map(|_| {
            [
                (rng.next_f64() - 0.5) * side,
                (rng.next_f64() - 0.5) * side,
            ]
        })
        .collect()
}

fn gen_clustered_points(n_clusters: usize, per_cluster: usize, spread: f64) -> Vec<[f64; 2]> {
    let mut rng = Rng::new(0xC1A5_7E55_9999_ABCD);
    let mut out = Vec::with_capacity(n_clusters * per_cluster);
    for _ in 0..n_clusters {
        let (cx, cy) = (rng.next_f64() * 2000.0, rng.next_f64() * 2000.0);
        for _ in 0..per_cluster {
            out.push([
                cx + (rng.next_f64() - 0.5) * spread,
                cy + (rng.next_f64() - 0.5) * spread,
            ]);
        }
    }
    out
}

fn bench_linear(c: &mut Criterion) {
    let mut group = c.benchmark_group("linear");
    for &n in &[256usize, 1024] {
        let pts = gen_uniform_points(n, 1000.0);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("all_near_r25_n{}", n), |b| {
            let idx = LinearIndex::new(&pts);
            b.iter(|| {
                let hits: usize = pts.iter().map(|p| idx.near(p, 25.0).len()).sum();
                black_box(hits);
            })
        });
        group.bench_function(format!("all_k_near_k8_n{}", n), |b| {
            let idx = LinearIndex::new(&pts);
            b.iter(|| {
                let hits: usize = pts.iter().map(|p| idx.k_near(p, 8).len()).sum();
                black_box(hits);
            })
        });
    }
    group.finish();
}

fn bench_grid(c: &mut Criterion) {
    let mut group = c.benchmark_group("grid");
    for &n in &[256usize, 1024, 4096] {
        let pts = gen_uniform_points(n, 1000.0);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("build_cell25_n{}", n), |b| {
            b.iter_batched(
                || GridIndex::new(&pts, 25.0).unwrap(),
                |mut idx| {
                    idx.build(None).unwrap();
                    black_box(idx.grid().map(|g| g.len()));
                },
                BatchSize::SmallInput,
            )
        });
        group.bench_function(format!("all_near_r25_n{}", n), |b| {
            let mut idx = GridIndex::new(&pts, 25.0).unwrap();
            idx.build(None).unwrap();
            b.iter(|| {
                let hits: usize = pts.iter().map(|p| idx.near(p, 25.0).len()).sum();
                black_box(hits);
            })
        });
        group.bench_function(format!("all_k_near_k8_n{}", n), |b| {
            let mut idx = GridIndex::new(&pts, 25.0).unwrap();
            idx.build(None).unwrap();
            b.iter(|| {
                let hits: usize = pts.iter().map(|p| idx.k_near(p, 8).len()).sum();
                black_box(hits);
            })
        });
    }
    group.finish();
}

/// A full simulation step: rebuild, then one radius query per point.
fn bench_grid_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("grid_frame");
    let pts = gen_uniform_points(2048, 1000.0);
    let bounds = Bounds::new([[-600.0, 600.0], [-600.0, 600.0]]).unwrap();
    for &cell in &[12.5, 25.0, 100.0] {
        group.bench_function(format!("build_all_pairs_cell{}", cell), |b| {
            let config = GridConfig::new(cell).with_bounds(bounds.clone());
            b.iter_batched(
                || {
                    GridIndex::with_extractor(&pts, |p: &[f64; 2]| *p, config.clone()).unwrap()
                },
                |mut idx| {
                    idx.build(None).unwrap();
                    black_box(idx.all_pairs(Query::Radius(25.0)).len());
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_grid_clustered(c: &mut Criterion) {
    let mut group = c.benchmark_group("grid_clustered");
    let pts = gen_clustered_points(16, 256, 50.0);
    group.throughput(Throughput::Elements(pts.len() as u64));
    group.bench_function("all_k_near_k8", |b| {
        let mut idx = GridIndex::new(&pts, 25.0).unwrap();
        idx.build(None).unwrap();
        b.iter(|| {
            let hits: usize = pts.iter().map(|p| idx.k_near(p, 8).len()).sum();
            black_box(hits);
        })
    });
    group.bench_function("all_k_near_k8_linear", |b| {
        let idx = LinearIndex::new(&pts);
        b.iter(|| {
            let hits: usize = pts.iter().map(|p| idx.k_near(p, 8).len()).sum();
            black_box(hits);
        })
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_linear,
    bench_grid,
    bench_grid_frame,
    bench_grid_clustered,
);
criterion_main!(benches);
