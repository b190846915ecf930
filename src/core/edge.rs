//! Undirected edges: the identity and deletion unit for a halfedge pair.
//!
//! An [`Edge`] owns exactly two halfedges, created together when the edge is
//! allocated and destroyed together when it is deleted. Client payloads that
//! logically belong to the undirected connection (constraint flags, weights)
//! attach here rather than to the individual darts.

use super::half_edge_data_structure::HalfedgeKey;
use super::traits::data_type::DataType;

/// An undirected edge owning its two oppositely oriented halfedges.
#[derive(Clone, Copy, Debug)]
pub struct Edge<V>
where
    V: DataType,
{
    /// The first halfedge of the pair.
    pub(crate) he1: HalfedgeKey,
    /// The second halfedge of the pair.
    pub(crate) he2: HalfedgeKey,
    /// Optional client payload.
    pub data: Option<V>,
}

impl<V> Edge<V>
where
    V: DataType,
{
    /// Returns the first halfedge of the pair.
    #[inline]
    #[must_use]
    pub const fn he1(&self) -> HalfedgeKey {
        self.he1
    }

    /// Returns the second halfedge of the pair.
    #[inline]
    #[must_use]
    pub const fn he2(&self) -> HalfedgeKey {
        self.he2
    }

    /// Returns both halfedges of the pair.
    #[inline]
    #[must_use]
    pub const fn halfedges(&self) -> (HalfedgeKey, HalfedgeKey) {
        (self.he1, self.he2)
    }
}
