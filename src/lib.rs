//! # hemesh
//!
//! A two-dimensional triangulation library built around a half-edge data
//! structure.
//!
//! The mesh is a planar, orientable, manifold simplicial complex: vertices
//! are points in the Euclidean plane, faces are triangles, and the unbounded
//! outer region is represented implicitly by *boundary* halfedges carrying
//! no face. The library exposes primitive topological operations that
//! preserve manifoldness — adding and removing nodes, edges, and faces,
//! splitting edges and faces — and a point-location query driven by an
//! exact orientation predicate.
//!
//! # Features
//!
//! - Half-edge connectivity with stable generational handles (use after
//!   delete is detected, not silently aliased)
//! - Manifold-preserving mutators: operations that would create a
//!   non-manifold vertex are rejected with a typed error
//! - Lawson-style visibility walk point location with exact orientation
//!   tests ([`RobustKernel`](geometry::kernel::RobustKernel))
//! - Client payloads on nodes, edges, and faces via type parameters
//! - Structural validation of every connectivity invariant
//!
//! # Basic Usage
//!
//! ```rust
//! use hemesh::prelude::*;
//!
//! let mut tri: Triangulation<RobustKernel<f64>, (), (), ()> = Triangulation::new();
//!
//! // Build one triangle.
//! let n0 = tri.add_node(Point::new(0.0, 0.0));
//! let n1 = tri.add_node(Point::new(1.0, 0.0));
//! let n2 = tri.add_node(Point::new(0.0, 1.0));
//!
//! let h01 = tri.add_edge(n0, n1).unwrap();
//! let h12 = tri.add_edge(n1, n2).unwrap();
//! let h20 = tri.add_edge(n2, n0).unwrap();
//! let face = tri.add_face(h01, h12, h20).unwrap();
//!
//! assert_eq!(tri.number_of_nodes(), 3);
//! assert_eq!(tri.number_of_edges(), 3);
//! assert_eq!(tri.number_of_faces(), 1);
//!
//! // Locate points against the mesh.
//! assert_eq!(
//!     tri.locate(&Point::new(0.25, 0.25), None),
//!     Ok(Location::InFace(face)),
//! );
//! assert!(matches!(
//!     tri.locate(&Point::new(2.0, 0.0), None),
//!     Ok(Location::OutsideMesh(_)),
//! ));
//!
//! // Refine by splitting.
//! let center = tri.split_face(face, Point::new(0.25, 0.25));
//! assert_eq!(tri.number_of_faces(), 3);
//! assert_eq!(tri.degree(center), 3);
//! assert!(tri.hds().is_valid().is_ok());
//! ```
//!
//! # Connectivity Invariants
//!
//! After every successful public mutation the mesh satisfies:
//!
//! - **Pair involution** — `pair(pair(h)) == h` and `pair(h) != h` for every
//!   halfedge `h`.
//! - **Cycle consistency** — `prev(next(h)) == h` and `next(prev(h)) == h`.
//! - **Origin coherence** — `origin(next(h)) == origin(pair(h))`.
//! - **Face coherence** — interior halfedges form cycles of length three
//!   agreeing on their face; boundary halfedges form closed cycles around
//!   the outer region(s).
//! - **Node anchoring** — a non-isolated node references one of its
//!   *outgoing* halfedges.
//! - **Manifold vertex** — the halfedges incident to a node form a single
//!   fan without branching.
//!
//! All of these are checked by [`Hds::is_valid`](core::half_edge_data_structure::Hds::is_valid)
//! and reported exhaustively by
//! [`Hds::validation_report`](core::half_edge_data_structure::Hds::validation_report).
//!
//! # Failure Behavior
//!
//! Operations that would violate manifoldness fail with
//! [`TopologyError`](core::half_edge_data_structure::TopologyError) (from
//! edge insertion) or [`FaceError`](core::triangulation::FaceError) (from
//! face creation). A failed
//! [`add_edge`](core::triangulation::Triangulation::add_edge) discards its
//! edge and leaves the mesh unchanged; a failed
//! [`add_face`](core::triangulation::Triangulation::add_face) may leave
//! boundary fans reordered but never structurally invalid. Passing equal
//! endpoints to `add_edge` is a caller bug and panics rather than returning
//! an error.
//!
//! # Concurrency
//!
//! The triangulation is a single-threaded mutable structure with no internal
//! locking. Read-only queries (`locate`, iteration, `bounding_box`) may run
//! concurrently through shared references as long as no mutation runs.

#![forbid(unsafe_code)]

/// The `core` module contains the half-edge data structure and the
/// triangulation operations built on it.
pub mod core {
    /// Algorithms operating on the triangulation.
    pub mod algorithms {
        /// Point location (visibility walk).
        pub mod locate;
    }
    pub mod boundary;
    /// Collection type aliases (storage backend, fast hashing, small buffers).
    pub mod collections;
    pub mod edge;
    pub mod face;
    pub mod half_edge_data_structure;
    pub mod halfedge;
    pub mod node;
    pub mod triangulation;
    /// Traits for payloads and boundary queries.
    pub mod traits {
        pub mod boundary_analysis;
        pub mod data_type;
        pub use boundary_analysis::*;
        pub use data_type::*;
    }
    // Re-export the `core` modules.
    pub use boundary::*;
    pub use edge::*;
    pub use face::*;
    pub use half_edge_data_structure::*;
    pub use halfedge::*;
    pub use node::*;
    pub use traits::*;
    pub use triangulation::*;
}

/// Geometric types: points, predicates, kernels, and bounding boxes.
pub mod geometry {
    pub mod bounding_box;
    /// Geometric kernel abstraction (CGAL-style).
    pub mod kernel;
    pub mod point;
    pub mod predicates;
    /// Coordinate scalar abstractions.
    pub mod traits {
        pub mod coordinate;
        pub use coordinate::*;
    }
    pub use bounding_box::*;
    pub use kernel::*;
    pub use point::*;
    pub use predicates::*;
    pub use traits::*;
}

/// A prelude module that re-exports the commonly used types.
pub mod prelude {
    pub use crate::core::{
        algorithms::locate::{LocateError, Location},
        boundary::*,
        edge::*,
        face::*,
        half_edge_data_structure::*,
        halfedge::*,
        node::*,
        traits::{boundary_analysis::*, data_type::*},
        triangulation::*,
    };

    pub use crate::geometry::{
        bounding_box::*, kernel::*, point::*, predicates::*, traits::coordinate::*,
    };
}

/// The function `is_normal` checks that structs implement `auto` traits.
/// Traits are checked at compile time, so this function is only used for
/// testing.
#[must_use]
pub const fn is_normal<T: Sized + Send + Sync + Unpin>() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use crate::{
        core::half_edge_data_structure::Hds,
        core::triangulation::Triangulation,
        geometry::kernel::{FastKernel, RobustKernel},
        geometry::point::Point,
        is_normal,
    };

    #[test]
    fn normal_types() {
        assert!(is_normal::<Point<f64>>());
        assert!(is_normal::<Point<f32>>());
        assert!(is_normal::<Hds<f64, (), (), ()>>());
        assert!(is_normal::<Triangulation<FastKernel<f64>, (), (), ()>>());
        assert!(is_normal::<Triangulation<RobustKernel<f64>, u32, u32, u32>>());
    }

    #[test]
    fn prelude_exports_cover_basic_usage() {
        use crate::prelude::*;

        let mut tri: Triangulation<FastKernel<f64>, (), (), ()> = Triangulation::new();
        let n = tri.add_node(Point::new(0.0, 0.0));
        assert!(tri.hds().node(n).unwrap().is_isolated());
        assert!(tri.bounding_box().contains(&Point::new(0.0, 0.0)));
    }
}
