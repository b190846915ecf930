//! Triangular faces.
//!
//! A [`Face`] records one halfedge on its boundary; the other two are
//! reached through `next`. All three halfedges of a face agree on their
//! `face` reference and form a cycle of length three. The unbounded outer
//! region is not stored as a face — it is represented by halfedges whose
//! face reference is `None`.

use super::half_edge_data_structure::HalfedgeKey;
use super::traits::data_type::DataType;

/// A triangle of the mesh.
#[derive(Clone, Copy, Debug)]
pub struct Face<W>
where
    W: DataType,
{
    /// One halfedge on the face boundary.
    pub(crate) halfedge: HalfedgeKey,
    /// Optional client payload.
    pub data: Option<W>,
}

impl<W> Face<W>
where
    W: DataType,
{
    /// Returns one halfedge on the face boundary.
    #[inline]
    #[must_use]
    pub const fn halfedge(&self) -> HalfedgeKey {
        self.halfedge
    }
}
