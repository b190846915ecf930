//! Point location in the triangulation.
//!
//! Implements a Lawson-style visibility walk: starting from a hint face (or
//! an arbitrary one), the walk tests the query point against each edge of
//! the current face with the kernel's orientation predicate and crosses
//! toward the point until the containing face — or an on-edge, on-node, or
//! outside classification — is found. Expected cost is O(√F) on
//! near-Delaunay meshes.
//!
//! # References
//!
//! - O. Devillers, S. Pion, and M. Teillaud, "Walking in a Triangulation",
//!   International Journal of Foundations of Computer Science, 2001.

use crate::core::collections::FastHashSet;
use crate::core::half_edge_data_structure::{EdgeKey, FaceKey, Hds, NodeKey};
use crate::core::traits::data_type::DataType;
use crate::geometry::kernel::Kernel;
use crate::geometry::point::Point;
use crate::geometry::predicates::OrientedSide;
use num_traits::Float;
use thiserror::Error;

/// Result of a point location query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    /// The point lies strictly inside this face.
    InFace(FaceKey),
    /// The point lies on this edge, strictly between its endpoints.
    OnEdge(EdgeKey),
    /// The point coincides with this node.
    OnNode(NodeKey),
    /// The point lies outside the mesh; the walk left through this boundary
    /// edge.
    OutsideMesh(EdgeKey),
}

/// Error during point location.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LocateError {
    /// The mesh has no faces to walk through.
    #[error("cannot locate in a triangulation without faces")]
    EmptyTriangulation,

    /// The walk revisited a face or exhausted its step budget.
    ///
    /// On a structurally valid mesh this only happens when an inexact
    /// kernel misclassifies a near-degenerate orientation.
    #[error("walk revisited a face after {steps} steps (numerical degeneracy?)")]
    CycleDetected {
        /// Number of edge crossings before the cycle was detected.
        steps: usize,
    },
}

/// Locates `p` in the mesh with a visibility walk.
///
/// The walk starts at `start_face` when given and live (an absent or stale
/// hint falls back to an arbitrary face) and repeatedly tests `p` against
/// the current halfedge `h`:
///
/// - strictly left: advance within the face; a full cycle of left turns
///   means `p` is inside it
/// - collinear: report [`Location::OnEdge`] when `p` is strictly between
///   the endpoints and [`Location::OnNode`] when it coincides with one;
///   collinear but *outside* the edge's extent falls through to the
///   crossing case, continuing the walk along the line
/// - strictly right (or the fall-through): cross the edge toward `p`, or
///   report [`Location::OutsideMesh`] when the far side is the outer region
///
/// A visited-face set bounds the walk on meshes where an inexact kernel
/// could cycle.
///
/// # Errors
///
/// Returns [`LocateError::EmptyTriangulation`] when the mesh has no faces
/// and [`LocateError::CycleDetected`] when a face is revisited or the step
/// budget is exhausted.
///
/// # Panics
///
/// Panics if the mesh violates its structural invariants.
pub fn locate<K, U, V, W>(
    hds: &Hds<K::Scalar, U, V, W>,
    kernel: &K,
    p: &Point<K::Scalar>,
    start_face: Option<FaceKey>,
) -> Result<Location, LocateError>
where
    K: Kernel,
    U: DataType,
    V: DataType,
    W: DataType,
{
    const MAX_STEPS: usize = 10_000;

    let mut current_face = match start_face {
        Some(f) if hds.contains_face(f) => f,
        _ => hds
            .faces()
            .next()
            .map(|(f, _)| f)
            .ok_or(LocateError::EmptyTriangulation)?,
    };

    let anchor = |f: FaceKey| {
        hds.face(f)
            .expect("visibility walk entered a deleted face")
            .halfedge()
    };
    let position = |n: NodeKey| {
        hds.node(n)
            .expect("halfedge origin refers to a deleted node")
            .position()
    };

    let mut he_start = anchor(current_face);
    let mut he = he_start;

    let mut visited: FastHashSet<FaceKey> = FastHashSet::default();
    visited.insert(current_face);

    for step in 0..MAX_STEPS {
        let a = position(hds.he(he).origin());
        let b = position(hds.he(hds.he(he).pair()).origin());

        let side = kernel.oriented_side(&a, &b, p);

        if side == OrientedSide::POSITIVE {
            he = hds.he(he).next();
            if he == he_start {
                return Ok(Location::InFace(current_face));
            }
            continue;
        }

        if side == OrientedSide::BOUNDARY {
            let strictly_between_x = a.x().min(b.x()) < p.x() && p.x() < a.x().max(b.x());
            let strictly_between_y = a.y().min(b.y()) < p.y() && p.y() < a.y().max(b.y());
            if strictly_between_x || strictly_between_y {
                return Ok(Location::OnEdge(hds.he(he).edge()));
            } else if *p == a {
                return Ok(Location::OnNode(hds.he(he).origin()));
            } else if *p == b {
                return Ok(Location::OnNode(hds.he(hds.he(he).pair()).origin()));
            }
            // Collinear but outside the edge's extent: treat like the
            // negative side and cross, continuing the walk along the line.
        }

        let pair = hds.he(he).pair();
        match hds.he(pair).face() {
            None => return Ok(Location::OutsideMesh(hds.he(he).edge())),
            Some(f) => {
                if !visited.insert(f) {
                    return Err(LocateError::CycleDetected { steps: step });
                }
                current_face = f;
                he_start = pair;
                he = hds.he(pair).next();
            }
        }
    }

    Err(LocateError::CycleDetected { steps: MAX_STEPS })
}
