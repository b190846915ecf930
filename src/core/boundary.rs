//! Boundary analysis for the half-edge mesh.
//!
//! Implements the [`BoundaryAnalysis`] trait for [`Hds`]: discovering a
//! boundary halfedge, walking the boundary cycle it belongs to, and testing
//! nodes for boundary incidence.

use super::half_edge_data_structure::{HalfedgeKey, Hds, NodeKey};
use super::traits::boundary_analysis::BoundaryAnalysis;
use super::traits::data_type::DataType;
use crate::geometry::traits::coordinate::CoordinateScalar;

/// Iterator over one boundary cycle, following `next` links.
#[derive(Clone, Debug)]
pub struct BoundaryCycle<'a, T, U, V, W>
where
    T: CoordinateScalar,
    U: DataType,
    V: DataType,
    W: DataType,
{
    hds: &'a Hds<T, U, V, W>,
    start: HalfedgeKey,
    current: Option<HalfedgeKey>,
}

impl<T, U, V, W> Iterator for BoundaryCycle<'_, T, U, V, W>
where
    T: CoordinateScalar,
    U: DataType,
    V: DataType,
    W: DataType,
{
    type Item = HalfedgeKey;

    fn next(&mut self) -> Option<HalfedgeKey> {
        let current = self.current?;
        let successor = self.hds.he(current).next();
        self.current = (successor != self.start).then_some(successor);
        Some(current)
    }
}

impl<T, U, V, W> BoundaryAnalysis<T, U, V, W> for Hds<T, U, V, W>
where
    T: CoordinateScalar,
    U: DataType,
    V: DataType,
    W: DataType,
{
    /// Scans the edges and returns the first boundary halfedge found.
    fn boundary_halfedge(&self) -> Option<HalfedgeKey> {
        for (_, edge) in self.edges() {
            if self.he(edge.he1()).is_boundary() {
                return Some(edge.he1());
            }
            if self.he(edge.he2()).is_boundary() {
                return Some(edge.he2());
            }
        }
        None
    }

    fn is_boundary_node(&self, n: NodeKey) -> bool {
        self.outgoing_halfedges(n)
            .any(|h| self.he(h).is_boundary() || self.he(self.he(h).pair()).is_boundary())
    }

    fn boundary_cycle(&self, start: HalfedgeKey) -> BoundaryCycle<'_, T, U, V, W> {
        debug_assert!(
            self.he(start).is_boundary(),
            "boundary_cycle must start at a boundary halfedge"
        );
        BoundaryCycle {
            hds: self,
            start,
            current: Some(start),
        }
    }
}
