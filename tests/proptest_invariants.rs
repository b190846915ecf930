//! Property-based tests: random edit sequences preserve every structural
//! invariant.
//!
//! Starting from a valid single-triangle mesh, a random sequence of split
//! and removal operations is applied through the public API. After every
//! operation the mesh must pass full validation; split-only sequences must
//! also preserve the Euler relation `V - E + F = 1`.

use hemesh::prelude::*;
use proptest::prelude::*;

type Tri = Triangulation<RobustKernel<f64>, (), (), ()>;

/// Copies the halfedge record stored under `h`.
fn he(tri: &Tri, h: HalfedgeKey) -> Halfedge {
    *tri.hds().halfedge(h).unwrap()
}

fn seed_triangle() -> Tri {
    let mut tri = Tri::new();
    let n0 = tri.add_node(Point::new(0.0, 0.0));
    let n1 = tri.add_node(Point::new(8.0, 0.0));
    let n2 = tri.add_node(Point::new(0.0, 8.0));
    let h01 = tri.add_edge(n0, n1).unwrap();
    let h12 = tri.add_edge(n1, n2).unwrap();
    let h20 = tri.add_edge(n2, n0).unwrap();
    tri.add_face(h01, h12, h20).unwrap();
    tri
}

fn edge_midpoint(tri: &Tri, e: EdgeKey) -> Point<f64> {
    let (he1, he2) = tri.hds().edge(e).unwrap().halfedges();
    let a = tri
        .hds()
        .node(he(&tri, he1).origin())
        .unwrap()
        .position();
    let b = tri
        .hds()
        .node(he(&tri, he2).origin())
        .unwrap()
        .position();
    Point::new((a.x() + b.x()) / 2.0, (a.y() + b.y()) / 2.0)
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

/// One randomized mutation; returns whether it was a removal.
fn apply_op(tri: &mut Tri, op: u8, selector: u16) -> bool {
    match op {
        0 => {
            let faces: Vec<FaceKey> = tri.faces().map(|(f, _)| f).collect();
            if let Some(&f) = faces.get(usize::from(selector) % faces.len().max(1)) {
                let p = face_centroid(tri, f);
                tri.split_face(f, p);
            }
            false
        }
        1 => {
            let edges: Vec<EdgeKey> = tri.edges().map(|(e, _)| e).collect();
            if let Some(&e) = edges.get(usize::from(selector) % edges.len().max(1)) {
                let p = edge_midpoint(tri, e);
                tri.split_edge(e, p);
            }
            false
        }
        2 => {
            let edges: Vec<EdgeKey> = tri.edges().map(|(e, _)| e).collect();
            if let Some(&e) = edges.get(usize::from(selector) % edges.len().max(1)) {
                tri.remove_edge(e);
                return true;
            }
            false
        }
        _ => {
            let nodes: Vec<NodeKey> = tri.nodes().map(|(n, _)| n).collect();
            if let Some(&n) = nodes.get(usize::from(selector) % nodes.len().max(1)) {
                tri.remove_node(n);
                return true;
            }
            false
        }
    }
}

proptest! {
    #[test]
    fn prop_random_edits_preserve_invariants(
        ops in prop::collection::vec((0u8..4, any::<u16>()), 0..12)
    ) {
        let mut tri = seed_triangle();
        let mut any_removals = false;

        for (op, selector) in ops {
            any_removals |= apply_op(&mut tri, op, selector);

            prop_assert!(
                tri.hds().is_valid().is_ok(),
                "invariants broken after op {op}: {:?}",
                tri.hds().validation_report().violations
            );
            prop_assert_eq!(tri.number_of_halfedges(), 2 * tri.number_of_edges());

            if !any_removals {
                // Splits preserve the Euler relation of the seed disc.
                prop_assert_eq!(tri.euler_characteristic(), 1);
            }
        }
    }

    #[test]
    fn prop_split_face_counts(
        splits in prop::collection::vec(any::<u16>(), 1..8)
    ) {
        let mut tri = seed_triangle();

        for selector in splits {
            let faces: Vec<FaceKey> = tri.faces().map(|(f, _)| f).collect();
            let f = faces[usize::from(selector) % faces.len()];
            let nodes_before = tri.number_of_nodes();
            let edges_before = tri.number_of_edges();
            let faces_before = tri.number_of_faces();

            let center = tri.split_face(f, face_centroid(&tri, f));

            prop_assert_eq!(tri.number_of_nodes(), nodes_before + 1);
            prop_assert_eq!(tri.number_of_edges(), edges_before + 3);
            prop_assert_eq!(tri.number_of_faces(), faces_before + 2);
            prop_assert_eq!(tri.degree(center), 3);
        }
        prop_assert!(tri.hds().is_valid().is_ok());
    }

    #[test]
    fn prop_split_edge_face_growth(
        splits in prop::collection::vec(any::<u16>(), 1..8)
    ) {
        let mut tri = seed_triangle();

        for selector in splits {
            let edges: Vec<EdgeKey> = tri.edges().map(|(e, _)| e).collect();
            let e = edges[usize::from(selector) % edges.len()];
            let (he1, he2) = tri.hds().edge(e).unwrap().halfedges();
            let incident_faces = usize::from(he(&tri, he1).face().is_some())
                + usize::from(he(&tri, he2).face().is_some());
            let faces_before = tri.number_of_faces();

            tri.split_edge(e, edge_midpoint(&tri, e));

            // Each incident face is replaced by two.
            prop_assert_eq!(tri.number_of_faces(), faces_before + incident_faces);
        }
        prop_assert!(tri.hds().is_valid().is_ok());
    }

    #[test]
    fn prop_remove_node_leaves_no_incident_entities(
        splits in prop::collection::vec(any::<u16>(), 0..4),
        victim in any::<u16>(),
    ) {
        let mut tri = seed_triangle();
        for selector in splits {
            let faces: Vec<FaceKey> = tri.faces().map(|(f, _)| f).collect();
            let f = faces[usize::from(selector) % faces.len()];
            tri.split_face(f, face_centroid(&tri, f));
        }

        let nodes: Vec<NodeKey> = tri.nodes().map(|(n, _)| n).collect();
        let n = nodes[usize::from(victim) % nodes.len()];
        let expected_edges = tri.number_of_edges() - tri.degree(n);

        tri.remove_node(n);

        prop_assert!(!tri.hds().contains_node(n));
        prop_assert_eq!(tri.number_of_edges(), expected_edges);
        prop_assert!(tri.hds().is_valid().is_ok());
    }

    #[test]
    fn prop_locate_terminates_on_refined_meshes(
        splits in prop::collection::vec(any::<u16>(), 0..6),
        qx in -2.0f64..10.0,
        qy in -2.0f64..10.0,
    ) {
        let mut tri = seed_triangle();
        for selector in splits {
            let faces: Vec<FaceKey> = tri.faces().map(|(f, _)| f).collect();
            let f = faces[usize::from(selector) % faces.len()];
            tri.split_face(f, face_centroid(&tri, f));
        }

        // The walk must terminate with a classification or a detected
        // cycle; it must never hang or panic.
        let _ = tri.locate(&Point::new(qx, qy), None);
    }
}
