//! The triangulation facade: user-level operations on the half-edge mesh.
//!
//! Following CGAL's architecture, [`Triangulation`] combines a geometric
//! [`Kernel`] for predicates with the purely combinatorial [`Hds`]. The
//! facade expresses each user-level operation — adding and removing nodes,
//! edges, and faces, splitting edges and faces, locating points — as a
//! sequence of calls on the connectivity core, which in turn guarantees the
//! half-edge invariants.
//!
//! # Failure behavior of compound operations
//!
//! [`add_face`](Triangulation::add_face) calls the fan-reordering primitive
//! up to three times. If a later call fails, the reorderings performed by
//! earlier calls are *not* reverted: the mesh is left in an altered but
//! structurally valid state (the reordering only changes the order of
//! boundary cycles, never connectivity invariants). Callers must not assume
//! the mesh is unchanged after a failed `add_face`.
//! [`add_edge`](Triangulation::add_edge) by contrast fully discards its edge
//! when either attachment fails, so a failed `add_edge` leaves the mesh as
//! it was.

use thiserror::Error;

use super::algorithms::locate::{self, LocateError, Location};
use super::edge::Edge;
use super::face::Face;
use super::half_edge_data_structure::{
    EdgeKey, FaceKey, HalfedgeKey, Hds, NodeKey, TopologyError,
};
use super::node::Node;
use super::traits::boundary_analysis::BoundaryAnalysis;
use super::traits::data_type::DataType;
use crate::geometry::bounding_box::BoundingBox;
use crate::geometry::kernel::Kernel;
use crate::geometry::point::Point;

/// Errors reported by [`Triangulation::add_face`].
///
/// Each precondition of face creation has its own variant so callers can
/// distinguish caller mistakes (wrong halfedges) from topological
/// impossibility (non-manifold result).
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum FaceError {
    /// At least one of the halfedges already has a face.
    #[error("halfedges are not free, cannot add face")]
    NotFree,
    /// The halfedges do not form a closed chain of three.
    #[error("halfedges do not form a chain, cannot add face")]
    NotChain,
    /// Closing the face would create a non-manifold vertex.
    #[error("attempting to create non-manifold mesh, cannot add face")]
    NonManifold {
        /// The underlying connectivity error.
        #[from]
        source: TopologyError,
    },
}

/// A 2D triangulation over a half-edge data structure.
///
/// # Type Parameters
///
/// - `K`: geometric kernel implementing the orientation predicate
/// - `U`: node payload (use `()` for none)
/// - `V`: edge payload
/// - `W`: face payload
///
/// # Examples
///
/// Building a single triangle:
///
/// ```
/// use hemesh::core::triangulation::Triangulation;
/// use hemesh::geometry::kernel::RobustKernel;
/// use hemesh::geometry::point::Point;
///
/// let mut tri: Triangulation<RobustKernel<f64>, (), (), ()> = Triangulation::new();
///
/// let n0 = tri.add_node(Point::new(0.0, 0.0));
/// let n1 = tri.add_node(Point::new(1.0, 0.0));
/// let n2 = tri.add_node(Point::new(0.0, 1.0));
///
/// let h01 = tri.add_edge(n0, n1).unwrap();
/// let h12 = tri.add_edge(n1, n2).unwrap();
/// let h20 = tri.add_edge(n2, n0).unwrap();
///
/// tri.add_face(h01, h12, h20).unwrap();
///
/// assert_eq!(tri.number_of_nodes(), 3);
/// assert_eq!(tri.number_of_edges(), 3);
/// assert_eq!(tri.number_of_faces(), 1);
/// ```
#[derive(Clone, Debug)]
pub struct Triangulation<K, U, V, W>
where
    K: Kernel,
    U: DataType,
    V: DataType,
    W: DataType,
{
    /// The geometric kernel for predicates.
    kernel: K,
    /// The combinatorial half-edge data structure.
    hds: Hds<K::Scalar, U, V, W>,
}

impl<K, U, V, W> Default for Triangulation<K, U, V, W>
where
    K: Kernel + Default,
    U: DataType,
    V: DataType,
    W: DataType,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, U, V, W> Triangulation<K, U, V, W>
where
    K: Kernel,
    U: DataType,
    V: DataType,
    W: DataType,
{
    /// Creates an empty triangulation with a default-constructed kernel.
    #[must_use]
    pub fn new() -> Self
    where
        K: Default,
    {
        Self::with_kernel(K::default())
    }

    /// Creates an empty triangulation with the given kernel.
    #[must_use]
    pub fn with_kernel(kernel: K) -> Self {
        Self {
            kernel,
            hds: Hds::new(),
        }
    }

    /// Returns the underlying half-edge data structure.
    #[must_use]
    pub fn hds(&self) -> &Hds<K::Scalar, U, V, W> {
        &self.hds
    }

    /// Returns the geometric kernel.
    #[must_use]
    pub fn kernel(&self) -> &K {
        &self.kernel
    }

    // -------------------------------------------------------------------------
    // Mutation
    // -------------------------------------------------------------------------

    /// Adds an isolated node at `p`.
    pub fn add_node(&mut self, p: Point<K::Scalar>) -> NodeKey {
        self.hds.allocate_node(p)
    }

    /// Removes `n` together with every incident edge (and their faces).
    ///
    /// Total work is linear in the degree of `n`.
    ///
    /// # Panics
    ///
    /// Panics if `n` is stale.
    pub fn remove_node(&mut self, n: NodeKey) {
        debug_assert!(self.hds.contains_node(n), "remove_node: stale node key");

        while let Some(he) = self.hds.node(n).and_then(Node::halfedge) {
            let e = self.hds.he(he).edge();
            self.remove_edge(e);
        }
        self.hds.delete_node(n);
    }

    /// Adds an edge between two distinct nodes.
    ///
    /// Returns the halfedge originating at `n1`; its pair originates at
    /// `n2`. On failure the allocated edge is discarded and the mesh is left
    /// as it was.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::VertexFull`] when either endpoint is
    /// completely surrounded by faces, leaving no boundary gap to splice
    /// into.
    ///
    /// # Panics
    ///
    /// Panics if `n1 == n2` (a caller bug, not a recoverable error) or if a
    /// key is stale.
    pub fn add_edge(&mut self, n1: NodeKey, n2: NodeKey) -> Result<HalfedgeKey, TopologyError> {
        assert_ne!(n1, n2, "add_edge: endpoints must be distinct nodes");
        debug_assert!(self.hds.contains_node(n1), "add_edge: stale node key n1");
        debug_assert!(self.hds.contains_node(n2), "add_edge: stale node key n2");

        let e = self.hds.allocate_edge();
        let (he1, he2) = self
            .hds
            .edge(e)
            .expect("freshly allocated edge is live")
            .halfedges();

        if let Err(err) = self.hds.attach_halfedge_to_node(he1, n1) {
            self.hds.delete_edge(e);
            return Err(err);
        }
        if let Err(err) = self.hds.attach_halfedge_to_node(he2, n2) {
            self.hds.detach_edge(he1);
            self.hds.delete_edge(e);
            return Err(err);
        }

        Ok(he1)
    }

    /// Removes `e`, tearing down its incident faces first.
    ///
    /// # Panics
    ///
    /// Panics if `e` is stale.
    pub fn remove_edge(&mut self, e: EdgeKey) {
        let (he1, he2) = self
            .hds
            .edge(e)
            .expect("remove_edge: stale edge key")
            .halfedges();

        if let Some(f) = self.hds.he(he1).face() {
            self.remove_face(f);
        }
        if let Some(f) = self.hds.he(he2).face() {
            self.remove_face(f);
        }

        self.hds.detach_edge(he1);
        self.hds.detach_edge(he2);
        self.hds.delete_edge(e);
    }

    /// Creates a face over three free halfedges forming a closed chain.
    ///
    /// The halfedges must satisfy `pair(h1).origin == h2.origin`,
    /// `pair(h2).origin == h3.origin`, and `pair(h3).origin == h1.origin`.
    /// The fans at the three shared nodes are reordered as needed so the
    /// chain becomes three consecutive halfedges, then the face is closed
    /// over them.
    ///
    /// # Errors
    ///
    /// - [`FaceError::NotFree`] if any halfedge already has a face
    /// - [`FaceError::NotChain`] if the halfedges do not close a chain
    /// - [`FaceError::NonManifold`] if a fan reordering finds no boundary
    ///   gap; reorderings already performed are not reverted (see the module
    ///   documentation)
    ///
    /// # Panics
    ///
    /// Panics if a key is stale.
    pub fn add_face(
        &mut self,
        h1: HalfedgeKey,
        h2: HalfedgeKey,
        h3: HalfedgeKey,
    ) -> Result<FaceKey, FaceError> {
        let free = self.hds.he(h1).is_boundary()
            && self.hds.he(h2).is_boundary()
            && self.hds.he(h3).is_boundary();
        if !free {
            return Err(FaceError::NotFree);
        }

        let chained = self.target(h1) == self.hds.he(h2).origin()
            && self.target(h2) == self.hds.he(h3).origin()
            && self.target(h3) == self.hds.he(h1).origin();
        if !chained {
            return Err(FaceError::NotChain);
        }

        self.hds.make_adjacent(h1, h2)?;
        self.hds.make_adjacent(h2, h3)?;
        self.hds.make_adjacent(h3, h1)?;

        let f = self.hds.allocate_face(h1);
        self.hds.set_face(h1, Some(f));
        self.hds.set_face(h2, Some(f));
        self.hds.set_face(h3, Some(f));

        Ok(f)
    }

    /// Removes `f`, leaving its three halfedges in place as boundary
    /// halfedges.
    ///
    /// The next/prev links are preserved, so the former face cycle becomes
    /// part of the outer boundary.
    ///
    /// # Panics
    ///
    /// Panics if `f` is stale.
    pub fn remove_face(&mut self, f: FaceKey) {
        let anchor = self
            .hds
            .face(f)
            .expect("remove_face: stale face key")
            .halfedge();
        let next = self.hds.he(anchor).next();
        let prev = self.hds.he(anchor).prev();

        self.hds.set_face(anchor, None);
        self.hds.set_face(next, None);
        self.hds.set_face(prev, None);
        self.hds.delete_face(f);
    }

    /// Splits `e` at `p`, rebuilding the incident faces around the new node.
    ///
    /// Works for edges with zero, one, or two incident faces: each incident
    /// face is replaced by two faces sharing the new node, so the face count
    /// grows by the number of incident faces. Returns the new node.
    ///
    /// # Panics
    ///
    /// Panics if `e` is stale.
    pub fn split_edge(&mut self, e: EdgeKey, p: Point<K::Scalar>) -> NodeKey {
        let (he1, he2) = self
            .hds
            .edge(e)
            .expect("split_edge: stale edge key")
            .halfedges();
        let n1 = self.hds.he(he1).origin();
        let n2 = self.hds.he(he2).origin();

        // Record the triangle corners before the edge (and its faces) go.
        let side1 = self.hds.he(he1).face().is_some().then(|| {
            let h5 = self.hds.he(he1).next();
            let h6 = self.hds.he(he1).prev();
            (h5, h6, self.hds.he(h6).origin())
        });
        let side2 = self.hds.he(he2).face().is_some().then(|| {
            let h7 = self.hds.he(he2).next();
            let h8 = self.hds.he(he2).prev();
            (h7, h8, self.hds.he(h8).origin())
        });

        self.remove_edge(e);
        let n_new = self.add_node(p);
        let h1 = self
            .add_edge(n_new, n1)
            .expect("split point fan has a boundary gap");
        let h2 = self
            .add_edge(n_new, n2)
            .expect("split point fan has a boundary gap");

        if let Some((h5, h6, n3)) = side1 {
            let h3 = self
                .add_edge(n_new, n3)
                .expect("opened triangle corner has a boundary gap");
            let h3_pair = self.hds.he(h3).pair();
            let h1_pair = self.hds.he(h1).pair();
            self.add_face(h2, h5, h3_pair)
                .expect("split triangle chain closes");
            self.add_face(h3, h6, h1_pair)
                .expect("split triangle chain closes");
        }

        if let Some((h7, h8, n4)) = side2 {
            let h4 = self
                .add_edge(n_new, n4)
                .expect("opened triangle corner has a boundary gap");
            let h4_pair = self.hds.he(h4).pair();
            let h2_pair = self.hds.he(h2).pair();
            self.add_face(h1, h7, h4_pair)
                .expect("split triangle chain closes");
            self.add_face(h4, h8, h2_pair)
                .expect("split triangle chain closes");
        }

        n_new
    }

    /// Splits `f` at `p` into three faces sharing a new interior node.
    ///
    /// Returns the new node; the face count grows by two.
    ///
    /// # Panics
    ///
    /// Panics if `f` is stale.
    pub fn split_face(&mut self, f: FaceKey, p: Point<K::Scalar>) -> NodeKey {
        let h1 = self
            .hds
            .face(f)
            .expect("split_face: stale face key")
            .halfedge();
        let h2 = self.hds.he(h1).next();
        let h3 = self.hds.he(h1).prev();

        let n_a = self.hds.he(h1).origin();
        let n_b = self.hds.he(h2).origin();
        let n_c = self.hds.he(h3).origin();

        self.remove_face(f);
        let n_new = self.add_node(p);

        let h4 = self
            .add_edge(n_new, n_a)
            .expect("opened face corner has a boundary gap");
        let h5 = self
            .add_edge(n_new, n_b)
            .expect("opened face corner has a boundary gap");
        let h6 = self
            .add_edge(n_new, n_c)
            .expect("opened face corner has a boundary gap");

        let h5_pair = self.hds.he(h5).pair();
        let h6_pair = self.hds.he(h6).pair();
        let h4_pair = self.hds.he(h4).pair();
        self.add_face(h4, h1, h5_pair)
            .expect("face split chain closes");
        self.add_face(h5, h2, h6_pair)
            .expect("face split chain closes");
        self.add_face(h6, h3, h4_pair)
            .expect("face split chain closes");

        n_new
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    /// Locates `p` in the mesh with a visibility walk.
    ///
    /// The walk starts at `start_face` when given (falling back to an
    /// arbitrary face for a stale hint), crosses edges guided by the
    /// kernel's orientation predicate, and classifies the query point as
    /// inside a face, on an edge, on a node, or outside the mesh.
    ///
    /// # Errors
    ///
    /// Returns [`LocateError::EmptyTriangulation`] when the mesh has no
    /// faces, and [`LocateError::CycleDetected`] if the walk revisits a face
    /// or exceeds its step budget (possible only under an inexact kernel).
    pub fn locate(
        &self,
        p: &Point<K::Scalar>,
        start_face: Option<FaceKey>,
    ) -> Result<Location, LocateError> {
        locate::locate(&self.hds, &self.kernel, p, start_face)
    }

    /// Returns the tight axis-aligned bounding box of all node positions.
    ///
    /// The box is [inverse](BoundingBox::inverse) when the mesh has no
    /// nodes.
    #[must_use]
    pub fn bounding_box(&self) -> BoundingBox<K::Scalar> {
        let mut bbox = BoundingBox::inverse();
        for (_, node) in self.hds.nodes() {
            bbox.expand(&node.position());
        }
        bbox
    }

    /// Returns some boundary halfedge, or `None` if the mesh has no
    /// boundary.
    #[must_use]
    pub fn boundary_halfedge(&self) -> Option<HalfedgeKey> {
        self.hds.boundary_halfedge()
    }

    // -------------------------------------------------------------------------
    // Delegates to the data structure
    // -------------------------------------------------------------------------

    /// Returns an iterator over all nodes.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeKey, &Node<K::Scalar, U>)> {
        self.hds.nodes()
    }

    /// Returns an iterator over all edges.
    pub fn edges(&self) -> impl Iterator<Item = (EdgeKey, &Edge<V>)> {
        self.hds.edges()
    }

    /// Returns an iterator over all faces.
    pub fn faces(&self) -> impl Iterator<Item = (FaceKey, &Face<W>)> {
        self.hds.faces()
    }

    /// Returns the number of nodes.
    #[must_use]
    pub fn number_of_nodes(&self) -> usize {
        self.hds.number_of_nodes()
    }

    /// Returns the number of edges.
    #[must_use]
    pub fn number_of_edges(&self) -> usize {
        self.hds.number_of_edges()
    }

    /// Returns the number of faces.
    #[must_use]
    pub fn number_of_faces(&self) -> usize {
        self.hds.number_of_faces()
    }

    /// Returns the number of halfedges (always twice the number of edges).
    #[must_use]
    pub fn number_of_halfedges(&self) -> usize {
        self.hds.number_of_halfedges()
    }

    /// Returns the number of edges incident to `n`.
    #[must_use]
    pub fn degree(&self, n: NodeKey) -> usize {
        self.hds.degree(n)
    }

    /// Euler characteristic `V - E + F` of the mesh.
    #[must_use]
    pub fn euler_characteristic(&self) -> isize {
        self.hds.euler_characteristic()
    }

    /// The node a halfedge points to: the origin of its pair.
    fn target(&self, h: HalfedgeKey) -> NodeKey {
        self.hds.he(self.hds.he(h).pair()).origin()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::kernel::RobustKernel;

    type TestTriangulation = Triangulation<RobustKernel<f64>, (), (), ()>;

    fn triangle() -> (TestTriangulation, [NodeKey; 3], [HalfedgeKey; 3], FaceKey) {
        let mut tri = TestTriangulation::new();
        let n0 = tri.add_node(Point::new(0.0, 0.0));
        let n1 = tri.add_node(Point::new(1.0, 0.0));
        let n2 = tri.add_node(Point::new(0.0, 1.0));
        let h01 = tri.add_edge(n0, n1).unwrap();
        let h12 = tri.add_edge(n1, n2).unwrap();
        let h20 = tri.add_edge(n2, n0).unwrap();
        let f = tri.add_face(h01, h12, h20).unwrap();
        (tri, [n0, n1, n2], [h01, h12, h20], f)
    }

    #[test]
    fn add_node_returns_isolated_node() {
        let mut tri = TestTriangulation::new();
        let n = tri.add_node(Point::new(2.0, 3.0));

        assert!(tri.hds().node(n).unwrap().is_isolated());
        assert_eq!(tri.number_of_nodes(), 1);
        assert_eq!(tri.degree(n), 0);
    }

    #[test]
    fn add_then_remove_node_round_trips() {
        let mut tri = TestTriangulation::new();
        let n = tri.add_node(Point::new(0.0, 0.0));
        tri.remove_node(n);

        assert_eq!(tri.number_of_nodes(), 0);
        assert!(!tri.hds().contains_node(n));
    }

    #[test]
    #[should_panic(expected = "endpoints must be distinct")]
    fn add_edge_rejects_self_loop() {
        let mut tri = TestTriangulation::new();
        let n = tri.add_node(Point::new(0.0, 0.0));
        let _ = tri.add_edge(n, n);
    }

    #[test]
    fn add_then_remove_edge_round_trips() {
        let mut tri = TestTriangulation::new();
        let n1 = tri.add_node(Point::new(0.0, 0.0));
        let n2 = tri.add_node(Point::new(1.0, 0.0));

        let he = tri.add_edge(n1, n2).unwrap();
        assert_eq!(tri.hds().he(he).origin(), n1);
        assert_eq!(tri.number_of_edges(), 1);

        tri.remove_edge(tri.hds().he(he).edge());
        assert_eq!(tri.number_of_edges(), 0);
        assert!(tri.hds().node(n1).unwrap().is_isolated());
        assert!(tri.hds().node(n2).unwrap().is_isolated());
        assert!(tri.hds().is_valid().is_ok());
    }

    #[test]
    fn single_triangle_has_expected_counts() {
        let (tri, _, halfedges, f) = triangle();

        assert_eq!(tri.number_of_nodes(), 3);
        assert_eq!(tri.number_of_edges(), 3);
        assert_eq!(tri.number_of_faces(), 1);
        assert_eq!(tri.euler_characteristic(), 1);
        assert!(tri.hds().is_valid().is_ok());

        for h in halfedges {
            assert_eq!(tri.hds().he(h).face(), Some(f));
            assert!(tri.hds().he(tri.hds().he(h).pair()).is_boundary());
        }
    }

    #[test]
    fn add_face_rejects_non_chain() {
        let mut tri = TestTriangulation::new();
        let n0 = tri.add_node(Point::new(0.0, 0.0));
        let n1 = tri.add_node(Point::new(1.0, 0.0));
        let n2 = tri.add_node(Point::new(0.0, 1.0));
        let h01 = tri.add_edge(n0, n1).unwrap();
        let h12 = tri.add_edge(n1, n2).unwrap();
        let h20 = tri.add_edge(n2, n0).unwrap();

        // Backwards third halfedge: chain does not close.
        let h02 = tri.hds().he(h20).pair();
        assert_eq!(tri.add_face(h01, h12, h02), Err(FaceError::NotChain));
        assert_eq!(tri.number_of_faces(), 0);
        assert!(tri.hds().is_valid().is_ok());
    }

    #[test]
    fn add_face_rejects_occupied_halfedges() {
        let (mut tri, _, [h01, h12, h20], _) = triangle();
        assert_eq!(tri.add_face(h01, h12, h20), Err(FaceError::NotFree));
    }

    #[test]
    fn remove_face_leaves_boundary_halfedges() {
        let (mut tri, _, halfedges, f) = triangle();
        tri.remove_face(f);

        assert_eq!(tri.number_of_faces(), 0);
        for h in halfedges {
            assert!(tri.hds().he(h).is_boundary());
        }
        assert!(tri.hds().is_valid().is_ok());
    }

    #[test]
    fn add_edge_fails_on_saturated_vertex() {
        let (mut tri, [n0, _, _], _, f) = triangle();

        // Surround the interior node completely, then try to reach it.
        let center = tri.split_face(f, Point::new(0.25, 0.25));
        assert_eq!(tri.degree(center), 3);

        let result = tri.add_edge(center, n0);
        assert!(matches!(result, Err(TopologyError::VertexFull { .. })));
        // The failed edge left no trace.
        assert_eq!(tri.number_of_edges(), 6);
        assert!(tri.hds().is_valid().is_ok());
    }

    #[test]
    fn add_edge_rolls_back_when_second_attachment_fails() {
        let (mut tri, _, _, f) = triangle();
        let center = tri.split_face(f, Point::new(0.25, 0.25));
        let outsider = tri.add_node(Point::new(5.0, 5.0));

        // The first attachment (at the isolated node) succeeds; the second
        // finds the saturated vertex and fails. The edge must be discarded
        // and the first attachment undone.
        let result = tri.add_edge(outsider, center);
        assert!(matches!(result, Err(TopologyError::VertexFull { .. })));
        assert!(tri.hds().node(outsider).unwrap().is_isolated());
        assert_eq!(tri.number_of_edges(), 6);
        assert!(tri.hds().is_valid().is_ok());
    }

    #[test]
    fn split_face_creates_three_faces() {
        let (mut tri, _, _, f) = triangle();
        let center = tri.split_face(f, Point::new(0.25, 0.25));

        assert_eq!(tri.number_of_nodes(), 4);
        assert_eq!(tri.number_of_edges(), 6);
        assert_eq!(tri.number_of_faces(), 3);
        assert_eq!(tri.degree(center), 3);
        assert_eq!(tri.euler_characteristic(), 1);
        assert!(tri.hds().is_valid().is_ok());
    }

    #[test]
    fn remove_node_removes_star() {
        let (mut tri, _, _, f) = triangle();
        let center = tri.split_face(f, Point::new(0.25, 0.25));

        tri.remove_node(center);

        assert_eq!(tri.number_of_nodes(), 3);
        assert_eq!(tri.number_of_edges(), 3);
        assert_eq!(tri.number_of_faces(), 0);
        assert!(tri.hds().is_valid().is_ok());
    }

    #[test]
    fn bounding_box_covers_all_nodes() {
        let (tri, _, _, _) = triangle();
        let bbox = tri.bounding_box();

        assert_eq!(bbox.min(), Point::new(0.0, 0.0));
        assert_eq!(bbox.max(), Point::new(1.0, 1.0));
    }

    #[test]
    fn empty_mesh_bounding_box_is_inverse() {
        let tri = TestTriangulation::new();
        assert!(tri.bounding_box().is_empty());
    }
}
