//! Benchmarks for mesh-raycast operations.
//!
//! Run with: cargo bench -p mesh-raycast
//!
//! To compare against baseline:
//! 1. First run: cargo bench -p mesh-raycast -- --save-baseline main
//! 2. After changes: cargo bench -p mesh-raycast -- --baseline main

#![allow(
    missing_docs,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss
)]

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use mesh_raycast::{Bvh, Ray, ResampleParams, resample};
use mesh_types::{IndexedMesh, Point3, Vertex};

// =============================================================================
// Test Mesh Generation
// =============================================================================

/// Create an `n` by `n` wavy height-field mesh on the unit square.
fn create_wavy_grid(n: usize) -> (IndexedMesh, Vec<f64>) {
    let axis: Vec<f64> = (0..n).map(|i| i as f64 / (n - 1) as f64).collect();
    let mut mesh = IndexedMesh::with_capacity(n * n, 2 * (n - 1) * (n - 1));

    for &x in &axis {
        for &y in &axis {
            let z = 0.1 * (8.0 * x).sin() * (6.0 * y).cos();
            mesh.vertices.push(Vertex::from_coords(x, y, z));
        }
    }

    let k = |i: usize, j: usize| (i * n + j) as u32;
    for i in 0..n - 1 {
        for j in 0..n - 1 {
            mesh.faces.push([k(i, j), k(i + 1, j), k(i, j + 1)]);
            mesh.faces.push([k(i + 1, j), k(i + 1, j + 1), k(i, j + 1)]);
        }
    }

    (mesh, axis)
}

// =============================================================================
// BVH Benchmarks
// =============================================================================

fn bench_bvh_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("BvhBuild");

    for n in [32, 128] {
        let (mesh, _) = create_wavy_grid(n);
        group.throughput(Throughput::Elements(mesh.faces.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &mesh, |b, mesh| {
            b.iter(|| Bvh::build(black_box(mesh), 1e-9));
        });
    }

    group.finish();
}

fn bench_single_ray(c: &mut Criterion) {
    let (mesh, _) = create_wavy_grid(128);
    let bvh = Bvh::build(&mesh, 1e-9);
    let ray = Ray::down(Point3::new(0.37, 0.61, 2.0));

    c.bench_function("BvhCast/128", |b| {
        b.iter(|| bvh.cast(black_box(&ray), f64::INFINITY));
    });
}

// =============================================================================
// Resample Benchmarks
// =============================================================================

fn bench_resample(c: &mut Criterion) {
    let mut group = c.benchmark_group("Resample");
    group.sample_size(20);

    for n in [32, 128] {
        let (mesh, axis) = create_wavy_grid(n);
        group.throughput(Throughput::Elements(mesh.vertices.len() as u64));

        for (label, params) in [
            ("serial", ResampleParams::serial()),
            ("parallel", ResampleParams::default()),
        ] {
            group.bench_with_input(BenchmarkId::new(label, n), &mesh, |b, mesh| {
                b.iter(|| {
                    resample(
                        black_box(mesh),
                        black_box(mesh),
                        &axis,
                        &axis,
                        (n, n),
                        &params,
                    )
                });
            });
        }
    }

    group.finish();
}

// =============================================================================
// Criterion Setup
// =============================================================================

criterion_group!(benches, bench_bvh_build, bench_single_ray, bench_resample);
criterion_main!(benches);
