//! Oriented halfedges, the darts of the connectivity.
//!
//! Every undirected edge of the mesh is represented by two [`Halfedge`]s
//! pointing in opposite directions. A halfedge knows its origin node, its
//! opposite (`pair`), its successor and predecessor in the face cycle it
//! belongs to, the owning edge, and its incident face — `None` when the
//! halfedge borders the unbounded outer region (a *boundary* halfedge).
//!
//! Halfedges are created and destroyed only in pairs, through edge
//! allocation and deletion; all their links are maintained by the
//! connectivity core.

use super::half_edge_data_structure::{EdgeKey, FaceKey, HalfedgeKey, NodeKey};

/// An oriented dart of an undirected edge.
#[derive(Clone, Copy, Debug)]
pub struct Halfedge {
    /// The node this halfedge leaves from. Null until the halfedge is
    /// attached to a node.
    pub(crate) origin: NodeKey,
    /// The oppositely oriented halfedge of the same edge.
    pub(crate) pair: HalfedgeKey,
    /// The next halfedge in face (or boundary cycle) traversal.
    pub(crate) next: HalfedgeKey,
    /// The previous halfedge in face (or boundary cycle) traversal.
    pub(crate) prev: HalfedgeKey,
    /// The edge owning this halfedge and its pair.
    pub(crate) edge: EdgeKey,
    /// The incident face, `None` for boundary halfedges.
    pub(crate) face: Option<FaceKey>,
}

impl Halfedge {
    /// Returns the origin node.
    #[inline]
    #[must_use]
    pub const fn origin(&self) -> NodeKey {
        self.origin
    }

    /// Returns the oppositely oriented halfedge.
    #[inline]
    #[must_use]
    pub const fn pair(&self) -> HalfedgeKey {
        self.pair
    }

    /// Returns the successor in the face or boundary cycle.
    #[inline]
    #[must_use]
    pub const fn next(&self) -> HalfedgeKey {
        self.next
    }

    /// Returns the predecessor in the face or boundary cycle.
    #[inline]
    #[must_use]
    pub const fn prev(&self) -> HalfedgeKey {
        self.prev
    }

    /// Returns the owning edge.
    #[inline]
    #[must_use]
    pub const fn edge(&self) -> EdgeKey {
        self.edge
    }

    /// Returns the incident face, or `None` for a boundary halfedge.
    #[inline]
    #[must_use]
    pub const fn face(&self) -> Option<FaceKey> {
        self.face
    }

    /// Returns `true` if this halfedge borders the unbounded outer region.
    #[inline]
    #[must_use]
    pub const fn is_boundary(&self) -> bool {
        self.face.is_none()
    }
}
