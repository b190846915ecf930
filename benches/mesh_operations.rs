//! Benchmarks for mesh mutation and point location.

use criterion::{Criterion, criterion_group, criterion_main};
use hemesh::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::hint::black_box;

type Tri = Triangulation<RobustKernel<f64>, (), (), ()>;

/// Copies the halfedge record stored under `h`.
fn he(tri: &Tri, h: HalfedgeKey) -> Halfedge {
    *tri.hds().halfedge(h).unwrap()
}

fn seed_triangle() -> (Tri, FaceKey) {
    let mut tri = Tri::new();
    let n0 = tri.add_node(Point::new(0.0, 0.0));
    let n1 = tri.add_node(Point::new(8.0, 0.0));
    let n2 = tri.add_node(Point::new(0.0, 8.0));
    let h01 = tri.add_edge(n0, n1).unwrap();
    let h12 = tri.add_edge(n1, n2).unwrap();
    let h20 = tri.add_edge(n2, n0).unwrap();
    let f = tri.add_face(h01, h12, h20).unwrap();
    (tri, f)
}

fn face_centroid(tri: &Tri, f: FaceKey) -> Point<f64> {
    let h = tri.hds().face(f).unwrap().halfedge();
    let ns = [
        he(&tri, h).origin(),
        he(&tri, he(&tri, h).next()).origin(),
        he(&tri, he(&tri, h).prev()).origin(),
    ];
    let mut x = 0.0;
    let mut y = 0.0;
    for n in ns {
        let p = tri.hds().node(n).unwrap().position();
        x += p.x();
        y += p.y();
    }
    Point::new(x / 3.0, y / 3.0)
}

/// Refines the seed triangle by splitting an arbitrary face `count` times.
fn refined_mesh(count: usize) -> Tri {
    let (mut tri, _) = seed_triangle();
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..count {
        let faces: Vec<FaceKey> = tri.faces().map(|(f, _)| f).collect();
        let f = faces[rng.random_range(0..faces.len())];
        let p = face_centroid(&tri, f);
        tri.split_face(f, p);
    }
    tri
}

fn bench_split_churn(c: &mut Criterion) {
    c.bench_function("split_face_churn_64", |b| {
        b.iter(|| black_box(refined_mesh(64)));
    });
}

fn bench_locate(c: &mut Criterion) {
    let tri = refined_mesh(256);
    let mut rng = StdRng::seed_from_u64(13);
    let queries: Vec<Point<f64>> = (0..1024)
        .map(|_| Point::new(rng.random_range(0.0..8.0), rng.random_range(0.0..8.0)))
        .collect();

    c.bench_function("locate_1024_queries", |b| {
        let mut i = 0;
        b.iter(|| {
            let q = &queries[i % queries.len()];
            i += 1;
            black_box(tri.locate(q, None))
        });
    });
}

criterion_group!(benches, bench_split_churn, bench_locate);
criterion_main!(benches);
