// Copyright 2025 the Dotplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Compares the pruned kd-tree region visit against a linear scan.
//!
//! Brush queries fire on every pointer-move during a drag, so the per-query
//! cost over clustered point sets is what matters, not the one-off build.

use criterion::{
    BatchSize, BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main,
};
use dotplot_index::{ClusterPoint, KdTree, SimRegion};

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

/// Clustered points over the simulation domain, mimicking what the offline
/// aggregation emits: a few hundred dense blobs rather than uniform noise.
fn gen_clustered_points(n_clusters: usize, per_cluster: usize, spread: f64) -> Vec<ClusterPoint> {
    let mut out = Vec::with_capacity(n_clusters * per_cluster);
    let mut rng = Rng::new(0xD07B_107C_1057_E12D);
    let mut centers = Vec::with_capacity(n_clusters);
    for _ in 0..n_clusters {
        centers.push((
            rng.next_f64() * 2000.0 - 1000.0,
            rng.next_f64() * 2000.0 - 1000.0,
        ));
    }
    let mut id = 0_u32;
    for (cx, cy) in centers {
        for _ in 0..per_cluster {
            let dx = (rng.next_f64() - 0.5) * spread;
            let dy = (rng.next_f64() - 0.5) * spread;
            out.push(ClusterPoint::new(cx + dx, cy + dy, 2.0, [id]));
            id += 1;
        }
    }
    out
}

/// Query regions of three shapes a brush actually produces: a small rect, a
/// 1D horizontal band, and the full domain.
fn query_regions() -> Vec<(&'static str, SimRegion)> {
    vec![
        ("small_rect", SimRegion::rect((-50.0, 50.0), (-50.0, 50.0))),
        ("x_band", SimRegion::x_band((100.0, 600.0))),
        ("full_domain", SimRegion::everything()),
    ]
}

fn bench_visit_region(c: &mut Criterion) {
    let mut group = c.benchmark_group("visit_region");
    for &(n_clusters, per_cluster) in &[(64_usize, 8_usize), (256, 16), (512, 32)] {
        let points = gen_clustered_points(n_clusters, per_cluster, 40.0);
        let tree = KdTree::build(&points);
        group.throughput(Throughput::Elements(points.len() as u64));

        for (shape, region) in query_regions() {
            let id = format!("{shape}/{}", points.len());
            group.bench_function(BenchmarkId::new("KdTree", &id), |b| {
                b.iter(|| {
                    let mut hits = 0_usize;
                    tree.visit(&points, black_box(region), |_, point| {
                        hits += point.members.len();
                    });
                    black_box(hits)
                });
            });
            group.bench_function(BenchmarkId::new("LinearScan", &id), |b| {
                b.iter(|| {
                    let mut hits = 0_usize;
                    for point in black_box(&points) {
                        if region.contains(point.x, point.y) {
                            hits += point.members.len();
                        }
                    }
                    black_box(hits)
                });
            });
        }
    }
    group.finish();
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("kdtree_build");
    for &(n_clusters, per_cluster) in &[(64_usize, 8_usize), (256, 16), (512, 32)] {
        let points = gen_clustered_points(n_clusters, per_cluster, 40.0);
        group.throughput(Throughput::Elements(points.len() as u64));
        group.bench_function(BenchmarkId::from_parameter(points.len()), |b| {
            b.iter_batched(
                || points.clone(),
                |points| black_box(KdTree::build(&points)),
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_visit_region, bench_build);
criterion_main!(benches);
