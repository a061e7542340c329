// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

#![cfg(feature = "compare_rstar")]

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use understory_neighbors::{GridIndex, SearchIndex};

use rstar::RTree;

fn gen_lattice_points(n: usize, pitch: f64) -> Vec<[f64; 2]> {
    let mut out = Vec::with_capacity(n * n);
    for y in 0..n {
        for x in 0..n {
            out.push([x as f64 * pitch, y as f64 * pitch]);
        }
    }
    out
}

fn bench_rtree_external_compare(c: &mut Criterion) {
    let mut group = c.benchmark_group("rtree_external_compare");
    for &n in &[32usize, 64] {
        let pts = gen_lattice_points(n, 10.0);
        let radius = 25.0;
        group.throughput(Throughput::Elements((n * n) as u64));

        group.bench_function(format!("understory_build_all_near_n{}", n), |b| {
            b.iter_batched(
                || GridIndex::new(&pts, radius).unwrap(),
                |mut idx| {
                    idx.build(None).unwrap();
                    let hits: usize = pts.iter().map(|p| idx.near(p, radius).len()).sum();
                    black_box(hits);
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_function(format!("rstar_build_all_near_n{}", n), |b| {
            b.iter_batched(
                || pts.clone(),
                |points| {
                    let tree = RTree::bulk_load(points);
                    // rstar includes the query point itself.
                    let hits: usize = pts
                        .iter()
                        .map(|p| tree.locate_within_distance(*p, radius * radius).count() - 1)
                        .sum();
                    black_box(hits);
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_function(format!("understory_all_k_near_k8_n{}", n), |b| {
            let mut idx = GridIndex::new(&pts, radius).unwrap();
            idx.build(None).unwrap();
            b.iter(|| {
                let hits: usize = pts.iter().map(|p| idx.k_near(p, 8).len()).sum();
                black_box(hits);
            })
        });

        group.bench_function(format!("rstar_all_k_near_k8_n{}", n), |b| {
            let tree = RTree::bulk_load(pts.clone());
            b.iter(|| {
                let hits: usize = pts
                    .iter()
                    .map(|p| tree.nearest_neighbor_iter(p).skip(1).take(8).count())
                    .sum();
                black_box(hits);
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_rtree_external_compare);
criterion_main!(benches);
