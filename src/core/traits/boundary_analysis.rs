//! Trait for boundary queries on the half-edge mesh.

use crate::core::boundary::BoundaryCycle;
use crate::core::half_edge_data_structure::{HalfedgeKey, NodeKey};
use crate::core::traits::data_type::DataType;
use crate::geometry::traits::coordinate::CoordinateScalar;

/// Boundary discovery and traversal.
///
/// Boundary halfedges (those facing the unbounded outer region) partition
/// into disjoint simple cycles; this trait exposes finding one, walking a
/// cycle, and testing whether a node lies on the boundary.
pub trait BoundaryAnalysis<T, U, V, W>
where
    T: CoordinateScalar,
    U: DataType,
    V: DataType,
    W: DataType,
{
    /// Returns some boundary halfedge, or `None` when every halfedge is
    /// interior (or the mesh has no edges).
    fn boundary_halfedge(&self) -> Option<HalfedgeKey>;

    /// Returns `true` if `n` has an incident boundary halfedge.
    ///
    /// Isolated nodes are not considered boundary nodes.
    fn is_boundary_node(&self, n: NodeKey) -> bool;

    /// Returns an iterator walking the boundary cycle containing `start`.
    ///
    /// `start` must be a boundary halfedge; the iterator yields it first and
    /// follows `next` links until the cycle closes.
    fn boundary_cycle(&self, start: HalfedgeKey) -> BoundaryCycle<'_, T, U, V, W>;
}
