//! Mesh nodes: points of the triangulation.
//!
//! A [`Node`] carries its position in the plane, an optional outgoing
//! halfedge anchoring it into the connectivity, and an optional client
//! payload. A node with no outgoing halfedge is *isolated* — it participates
//! in no edge.
//!
//! The outgoing-halfedge reference is maintained by the connectivity core:
//! it always points at a halfedge whose origin is this node, and for nodes
//! on the mesh boundary the mutators keep it positioned so that walking the
//! local fan from it finds the boundary gap.

use super::half_edge_data_structure::HalfedgeKey;
use super::traits::data_type::DataType;
use crate::geometry::point::Point;
use crate::geometry::traits::coordinate::CoordinateScalar;

/// A triangulation vertex with position and connectivity anchor.
///
/// # Examples
///
/// ```
/// use hemesh::core::node::Node;
/// use hemesh::geometry::point::Point;
///
/// let node: Node<f64, ()> = Node::new(Point::new(1.0, 2.0));
/// assert!(node.is_isolated());
/// assert_eq!(node.position(), Point::new(1.0, 2.0));
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Node<T, U>
where
    T: CoordinateScalar,
    U: DataType,
{
    /// Position in the plane, fixed at creation.
    point: Point<T>,
    /// One outgoing halfedge, `None` iff the node is isolated.
    pub(crate) halfedge: Option<HalfedgeKey>,
    /// Optional client payload.
    pub data: Option<U>,
}

impl<T, U> Node<T, U>
where
    T: CoordinateScalar,
    U: DataType,
{
    /// Creates an isolated node at `point`.
    #[must_use]
    pub const fn new(point: Point<T>) -> Self {
        Self {
            point,
            halfedge: None,
            data: None,
        }
    }

    /// Creates an isolated node at `point` carrying `data`.
    #[must_use]
    pub const fn with_data(point: Point<T>, data: U) -> Self {
        Self {
            point,
            halfedge: None,
            data: Some(data),
        }
    }

    /// Returns the node position.
    #[inline]
    #[must_use]
    pub const fn position(&self) -> Point<T> {
        self.point
    }

    /// Returns one outgoing halfedge, or `None` for an isolated node.
    #[inline]
    #[must_use]
    pub const fn halfedge(&self) -> Option<HalfedgeKey> {
        self.halfedge
    }

    /// Returns `true` if no edge is incident to this node.
    #[inline]
    #[must_use]
    pub const fn is_isolated(&self) -> bool {
        self.halfedge.is_none()
    }
}
