//! The half-edge data structure: entity store and connectivity core.
//!
//! This module provides the [`Hds`] struct, a planar, orientable, manifold
//! simplicial complex stored as a half-edge mesh. Nodes, halfedges, edges,
//! and faces live in slot maps and reference each other through stable
//! generational keys.
//!
//! # Key Features
//!
//! - **Stable handles**: keys survive unrelated allocations and
//!   deallocations; a deleted entity's key goes stale instead of silently
//!   aliasing a recycled slot
//! - **O(1) entity allocation and deallocation** through the slot map
//!   backend
//! - **Manifold-preserving mutators**: the splicing primitives reject
//!   operations that would create a non-manifold vertex
//! - **Validation support**: every structural invariant can be checked via
//!   [`Hds::is_valid`] or collected exhaustively via
//!   [`Hds::validation_report`]
//!
//! # Connectivity Invariants
//!
//! After every successful public mutation the following hold:
//!
//! | Invariant | Meaning |
//! |---|---|
//! | Pair involution | `pair(pair(h)) == h` and `pair(h) != h` |
//! | Cycle consistency | `prev(next(h)) == h` and `next(prev(h)) == h` |
//! | Origin coherence | `origin(next(h)) == origin(pair(h))` |
//! | Face coherence | interior halfedges form length-3 cycles sharing one face |
//! | Boundary closure | boundary halfedges form closed cycles around the outer region |
//! | Node anchoring | a non-isolated node references an *outgoing* halfedge |
//! | Manifold vertex | the fan around a node is a single cycle without branching |
//!
//! The umbrella type for the user-facing operations built on this structure
//! is [`Triangulation`](crate::core::triangulation::Triangulation); the
//! methods here are the storage and splicing layer underneath it.

use slotmap::new_key_type;
use thiserror::Error;

use super::collections::StorageMap;
use super::edge::Edge;
use super::face::Face;
use super::halfedge::Halfedge;
use super::node::Node;
use super::traits::data_type::DataType;
use crate::geometry::point::Point;
use crate::geometry::traits::coordinate::CoordinateScalar;

// =============================================================================
// KEY TYPES
// =============================================================================

new_key_type! {
    /// Key type for accessing nodes in the storage map.
    pub struct NodeKey;
}

new_key_type! {
    /// Key type for accessing halfedges in the storage map.
    pub struct HalfedgeKey;
}

new_key_type! {
    /// Key type for accessing edges in the storage map.
    pub struct EdgeKey;
}

new_key_type! {
    /// Key type for accessing faces in the storage map.
    pub struct FaceKey;
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Error raised when a splicing operation would break the manifold property.
///
/// Splicing a new halfedge into the fan around a node requires a *free
/// incident halfedge* there: a boundary halfedge pointing into the node, the
/// "gap" in the local fan. When the fan is completely surrounded by faces no
/// such gap exists, and the operation is rejected rather than producing a
/// non-manifold vertex.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum TopologyError {
    /// The node is completely surrounded by faces; no boundary halfedge
    /// points into it.
    #[error("node {node:?} has no free incident halfedge (vertex is completely surrounded by faces)")]
    VertexFull {
        /// The saturated node.
        node: NodeKey,
    },
    /// No boundary halfedge exists in the walked section of the fan.
    #[error(
        "no free incident halfedge between {start:?} and {end:?} (reordering here would create a non-manifold vertex)"
    )]
    NoFreeGap {
        /// The halfedge the search started from.
        start: HalfedgeKey,
        /// The halfedge that bounded the search.
        end: HalfedgeKey,
    },
}

/// Classifies the kind of structural invariant that failed during validation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum InvariantKind {
    /// `pair(pair(h)) == h` and `pair(h) != h`.
    PairInvolution,
    /// `prev(next(h)) == h` and `next(prev(h)) == h`.
    CycleConsistency,
    /// `origin(next(h)) == origin(pair(h))`.
    OriginCoherence,
    /// Interior halfedges form length-3 cycles sharing one face.
    FaceCoherence,
    /// Non-isolated nodes reference an outgoing halfedge.
    NodeAnchoring,
    /// An edge's halfedges are mutual pairs.
    EdgePairing,
    /// A face's anchor halfedge references the face back.
    FaceAnchoring,
    /// Every stored key refers to a live entity.
    ReferenceIntegrity,
}

/// Errors reported by the validation API.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum HdsValidationError {
    /// A halfedge's pair link is not an involution.
    #[error("halfedge {halfedge:?} violates pair involution")]
    PairInvolution {
        /// The offending halfedge.
        halfedge: HalfedgeKey,
    },
    /// A halfedge's next/prev links do not invert each other.
    #[error("halfedge {halfedge:?} has inconsistent cycle links: {message}")]
    CycleInconsistency {
        /// The offending halfedge.
        halfedge: HalfedgeKey,
        /// Which link failed and how.
        message: String,
    },
    /// A halfedge and its successor disagree about the shared node.
    #[error("halfedge {halfedge:?}: successor origin differs from pair origin")]
    OriginIncoherence {
        /// The offending halfedge.
        halfedge: HalfedgeKey,
    },
    /// An interior halfedge is not part of a length-3 cycle over one face.
    #[error("halfedge {halfedge:?}: interior cycle is not a triangle over a single face")]
    FaceIncoherence {
        /// The offending halfedge.
        halfedge: HalfedgeKey,
    },
    /// A node references a halfedge that does not originate at it.
    #[error("node {node:?} references halfedge {halfedge:?} which does not originate there")]
    NodeAnchorMismatch {
        /// The offending node.
        node: NodeKey,
        /// The referenced halfedge.
        halfedge: HalfedgeKey,
    },
    /// An edge's halfedges are not mutual pairs.
    #[error("edge {edge:?}: halfedges are not mutual pairs")]
    EdgePairing {
        /// The offending edge.
        edge: EdgeKey,
    },
    /// A face's anchor halfedge does not reference it back.
    #[error("face {face:?}: anchor halfedge does not reference the face back")]
    FaceAnchorMismatch {
        /// The offending face.
        face: FaceKey,
    },
    /// A stored key refers to a deleted or foreign entity.
    #[error("dangling {entity} reference: {message}")]
    DanglingReference {
        /// The referencing entity kind.
        entity: &'static str,
        /// Which reference dangles.
        message: String,
    },
}

/// A single invariant violation recorded during validation diagnostics.
#[derive(Clone, Debug)]
pub struct InvariantViolation {
    /// The kind of invariant that failed.
    pub kind: InvariantKind,
    /// The detailed validation error explaining the failure.
    pub error: HdsValidationError,
}

/// Aggregate report of all validation failures.
///
/// Returned by [`Hds::validation_report`] to surface every failed invariant
/// at once for debugging and test diagnostics.
#[derive(Clone, Debug, Default)]
pub struct HdsValidationReport {
    /// The ordered list of invariant violations that occurred.
    pub violations: Vec<InvariantViolation>,
}

impl HdsValidationReport {
    /// Returns `true` if no violations were recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }
}

// =============================================================================
// DATA STRUCTURE
// =============================================================================

/// The half-edge data structure.
///
/// Owns every entity of the mesh in four slot maps and maintains the
/// connectivity invariants through its splicing primitives. `Hds` is purely
/// combinatorial: it stores node positions but never inspects them. All
/// geometric decisions live in the
/// [`Kernel`](crate::geometry::kernel::Kernel).
///
/// # Type Parameters
///
/// - `T`: coordinate scalar type
/// - `U`: node payload (use `()` for none)
/// - `V`: edge payload
/// - `W`: face payload
#[derive(Clone, Debug)]
pub struct Hds<T, U, V, W>
where
    T: CoordinateScalar,
    U: DataType,
    V: DataType,
    W: DataType,
{
    /// Storage map for nodes.
    nodes: StorageMap<NodeKey, Node<T, U>>,
    /// Storage map for halfedges.
    halfedges: StorageMap<HalfedgeKey, Halfedge>,
    /// Storage map for edges.
    edges: StorageMap<EdgeKey, Edge<V>>,
    /// Storage map for faces.
    faces: StorageMap<FaceKey, Face<W>>,
}

impl<T, U, V, W> Default for Hds<T, U, V, W>
where
    T: CoordinateScalar,
    U: DataType,
    V: DataType,
    W: DataType,
{
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// STORE: ALLOCATION, DELETION, ACCESS, ITERATION
// =============================================================================

impl<T, U, V, W> Hds<T, U, V, W>
where
    T: CoordinateScalar,
    U: DataType,
    V: DataType,
    W: DataType,
{
    /// Creates an empty mesh.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: StorageMap::with_key(),
            halfedges: StorageMap::with_key(),
            edges: StorageMap::with_key(),
            faces: StorageMap::with_key(),
        }
    }

    /// Allocates an isolated node at `point`.
    pub fn allocate_node(&mut self, point: Point<T>) -> NodeKey {
        self.nodes.insert(Node::new(point))
    }

    /// Allocates an edge with both halfedges pre-linked as a detached stub.
    ///
    /// The two halfedges are mutual pairs, and each one's `next` and `prev`
    /// point at the other, forming the one-edge cycle a detached edge is.
    /// Origins stay null until the connectivity core splices the halfedges
    /// into node fans; both halfedges start out boundary.
    pub fn allocate_edge(&mut self) -> EdgeKey {
        let stub = Halfedge {
            origin: NodeKey::default(),
            pair: HalfedgeKey::default(),
            next: HalfedgeKey::default(),
            prev: HalfedgeKey::default(),
            edge: EdgeKey::default(),
            face: None,
        };
        let he1 = self.halfedges.insert(stub);
        let he2 = self.halfedges.insert(stub);
        let edge = self.edges.insert(Edge {
            he1,
            he2,
            data: None,
        });

        let first = &mut self.halfedges[he1];
        first.pair = he2;
        first.next = he2;
        first.prev = he2;
        first.edge = edge;

        let second = &mut self.halfedges[he2];
        second.pair = he1;
        second.next = he1;
        second.prev = he1;
        second.edge = edge;

        edge
    }

    /// Allocates a face anchored at `halfedge`.
    ///
    /// The caller is responsible for setting the face reference on the three
    /// halfedges of the cycle.
    pub fn allocate_face(&mut self, halfedge: HalfedgeKey) -> FaceKey {
        self.faces.insert(Face {
            halfedge,
            data: None,
        })
    }

    /// Deletes a node. The node must be isolated.
    pub fn delete_node(&mut self, n: NodeKey) {
        debug_assert!(
            self.nodes.get(n).is_some_and(Node::is_isolated),
            "delete_node requires an isolated node"
        );
        self.nodes.remove(n);
    }

    /// Deletes an edge together with its two halfedges.
    ///
    /// The halfedges must already be detached from their node fans.
    pub fn delete_edge(&mut self, e: EdgeKey) {
        if let Some(edge) = self.edges.remove(e) {
            self.halfedges.remove(edge.he1);
            self.halfedges.remove(edge.he2);
        }
    }

    /// Deletes a face. The halfedge face references must already be cleared.
    pub fn delete_face(&mut self, f: FaceKey) {
        self.faces.remove(f);
    }

    /// Returns the node stored under `n`, or `None` for a stale key.
    #[must_use]
    pub fn node(&self, n: NodeKey) -> Option<&Node<T, U>> {
        self.nodes.get(n)
    }

    /// Returns a mutable reference to the node stored under `n`.
    #[must_use]
    pub fn node_mut(&mut self, n: NodeKey) -> Option<&mut Node<T, U>> {
        self.nodes.get_mut(n)
    }

    /// Returns the halfedge stored under `h`, or `None` for a stale key.
    #[must_use]
    pub fn halfedge(&self, h: HalfedgeKey) -> Option<&Halfedge> {
        self.halfedges.get(h)
    }

    /// Returns the edge stored under `e`, or `None` for a stale key.
    #[must_use]
    pub fn edge(&self, e: EdgeKey) -> Option<&Edge<V>> {
        self.edges.get(e)
    }

    /// Returns a mutable reference to the edge stored under `e`.
    #[must_use]
    pub fn edge_mut(&mut self, e: EdgeKey) -> Option<&mut Edge<V>> {
        self.edges.get_mut(e)
    }

    /// Returns the face stored under `f`, or `None` for a stale key.
    #[must_use]
    pub fn face(&self, f: FaceKey) -> Option<&Face<W>> {
        self.faces.get(f)
    }

    /// Returns a mutable reference to the face stored under `f`.
    #[must_use]
    pub fn face_mut(&mut self, f: FaceKey) -> Option<&mut Face<W>> {
        self.faces.get_mut(f)
    }

    /// Returns `true` if `n` refers to a live node.
    #[must_use]
    pub fn contains_node(&self, n: NodeKey) -> bool {
        self.nodes.contains_key(n)
    }

    /// Returns `true` if `h` refers to a live halfedge.
    #[must_use]
    pub fn contains_halfedge(&self, h: HalfedgeKey) -> bool {
        self.halfedges.contains_key(h)
    }

    /// Returns `true` if `e` refers to a live edge.
    #[must_use]
    pub fn contains_edge(&self, e: EdgeKey) -> bool {
        self.edges.contains_key(e)
    }

    /// Returns `true` if `f` refers to a live face.
    #[must_use]
    pub fn contains_face(&self, f: FaceKey) -> bool {
        self.faces.contains_key(f)
    }

    /// Returns an iterator over all nodes.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeKey, &Node<T, U>)> {
        self.nodes.iter()
    }

    /// Returns an iterator over all halfedges.
    pub fn halfedges(&self) -> impl Iterator<Item = (HalfedgeKey, &Halfedge)> {
        self.halfedges.iter()
    }

    /// Returns an iterator over all edges.
    pub fn edges(&self) -> impl Iterator<Item = (EdgeKey, &Edge<V>)> {
        self.edges.iter()
    }

    /// Returns an iterator over all faces.
    pub fn faces(&self) -> impl Iterator<Item = (FaceKey, &Face<W>)> {
        self.faces.iter()
    }

    /// Returns the number of nodes.
    #[must_use]
    pub fn number_of_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the number of halfedges.
    #[must_use]
    pub fn number_of_halfedges(&self) -> usize {
        self.halfedges.len()
    }

    /// Returns the number of edges.
    #[must_use]
    pub fn number_of_edges(&self) -> usize {
        self.edges.len()
    }

    /// Returns the number of faces.
    #[must_use]
    pub fn number_of_faces(&self) -> usize {
        self.faces.len()
    }

    /// Euler characteristic `V - E + F` of the stored complex.
    ///
    /// For a connected planar triangulation with one outer boundary this
    /// is 1 (interior faces only; the outer region is not stored).
    #[must_use]
    pub fn euler_characteristic(&self) -> isize {
        self.nodes.len() as isize - self.edges.len() as isize + self.faces.len() as isize
    }
}

// =============================================================================
// CONNECTIVITY CORE
// =============================================================================

impl<T, U, V, W> Hds<T, U, V, W>
where
    T: CoordinateScalar,
    U: DataType,
    V: DataType,
    W: DataType,
{
    #[inline]
    pub(crate) fn he(&self, h: HalfedgeKey) -> &Halfedge {
        &self.halfedges[h]
    }

    /// Sets the incident face of `h`. `None` makes the halfedge boundary.
    #[inline]
    pub(crate) fn set_face(&mut self, h: HalfedgeKey, face: Option<FaceKey>) {
        self.halfedges[h].face = face;
    }

    /// Sets `he`'s origin to `n` and splices `he` into the fan at `n`.
    ///
    /// If `n` is isolated the halfedge pair becomes the node's one-edge stub
    /// cycle. Otherwise `he` is spliced into the boundary gap found by
    /// [`find_free_incident_halfedge`](Self::find_free_incident_halfedge).
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::VertexFull`] when `n` is completely
    /// surrounded by faces; `he`'s origin has been set but no links were
    /// changed. The caller decides whether to discard the edge.
    pub(crate) fn attach_halfedge_to_node(
        &mut self,
        he: HalfedgeKey,
        n: NodeKey,
    ) -> Result<(), TopologyError> {
        self.halfedges[he].origin = n;

        if self.nodes[n].is_isolated() {
            let pair = self.he(he).pair;
            self.nodes[n].halfedge = Some(he);
            self.halfedges[he].prev = pair;
            self.halfedges[pair].next = he;
        } else {
            let free_in = self.find_free_incident_halfedge(n)?;
            let free_out = self.he(free_in).next;
            let pair = self.he(he).pair;

            self.halfedges[free_in].next = he;
            self.halfedges[he].prev = free_in;
            self.halfedges[pair].next = free_out;
            self.halfedges[free_out].prev = pair;
        }

        Ok(())
    }

    /// Finds a boundary halfedge pointing into `n`.
    ///
    /// Walks the fan around `n` starting at `pair(n.halfedge)`, advancing by
    /// `pair(next(..))`, and returns the first boundary halfedge found.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::VertexFull`] when a full turn around the fan
    /// finds no boundary halfedge.
    ///
    /// # Panics
    ///
    /// Panics if `n` is isolated; callers handle that case before searching
    /// for a gap.
    pub(crate) fn find_free_incident_halfedge(
        &self,
        n: NodeKey,
    ) -> Result<HalfedgeKey, TopologyError> {
        let outgoing = self.nodes[n]
            .halfedge
            .expect("find_free_incident_halfedge requires a non-isolated node");

        let start = self.he(outgoing).pair;
        let mut current = start;
        loop {
            if self.he(current).is_boundary() {
                return Ok(current);
            }
            current = self.he(self.he(current).next).pair;
            if current == start {
                return Err(TopologyError::VertexFull { node: n });
            }
        }
    }

    /// Finds a boundary halfedge in the fan section from `h1` up to `h2`.
    ///
    /// Both halfedges must point into the same node. Walks by
    /// `pair(next(..))` starting at `h1` (inclusive) and stops when `h2` is
    /// reached.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::NoFreeGap`] when the walked section contains
    /// no boundary halfedge.
    pub(crate) fn find_free_incident_halfedge_before(
        &self,
        h1: HalfedgeKey,
        h2: HalfedgeKey,
    ) -> Result<HalfedgeKey, TopologyError> {
        debug_assert_eq!(
            self.he(self.he(h1).pair).origin,
            self.he(self.he(h2).pair).origin,
            "bounded gap search requires halfedges into the same node"
        );

        let mut current = h1;
        loop {
            if self.he(current).is_boundary() {
                return Ok(current);
            }
            current = self.he(self.he(current).next).pair;
            if current == h2 {
                return Err(TopologyError::NoFreeGap { start: h1, end: h2 });
            }
        }
    }

    /// Reorders the fan at `hout`'s origin so that `next(hin) == hout`.
    ///
    /// This is the precondition for closing a triangular face over `hin` and
    /// `hout`. If the halfedges are already adjacent nothing changes.
    /// Otherwise the cycle section hanging off `hout` is relocated into a
    /// boundary gap elsewhere in the fan and `hin -> hout` is spliced into
    /// its place.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::NoFreeGap`] when the fan has no boundary gap
    /// to relocate into — completing the face would create a non-manifold
    /// vertex. No links have been changed in that case.
    pub(crate) fn make_adjacent(
        &mut self,
        hin: HalfedgeKey,
        hout: HalfedgeKey,
    ) -> Result<(), TopologyError> {
        if self.he(hin).next == hout {
            return Ok(());
        }

        let b = self.he(hin).next;
        let d = self.he(hout).prev;

        let g = self.find_free_incident_halfedge_before(self.he(hout).pair, hin)?;
        let h = self.he(g).next;

        self.halfedges[hin].next = hout;
        self.halfedges[hout].prev = hin;
        self.halfedges[g].next = b;
        self.halfedges[b].prev = g;
        self.halfedges[d].next = h;
        self.halfedges[h].prev = d;

        Ok(())
    }

    /// Splices `he` out of the fan at its origin.
    ///
    /// Repairs the node's outgoing-halfedge anchor: if it pointed at `he` it
    /// is promoted to the next outgoing halfedge, or cleared when `he` was
    /// the last incident halfedge (the node becomes isolated). The symmetric
    /// call on `pair(he)` handles the other endpoint.
    pub(crate) fn detach_edge(&mut self, he: HalfedgeKey) {
        let n = self.he(he).origin;
        let pair = self.he(he).pair;
        let pair_next = self.he(pair).next;

        if self.nodes[n].halfedge == Some(he) {
            self.nodes[n].halfedge = if pair_next == he { None } else { Some(pair_next) };
        }

        let prev = self.he(he).prev;
        self.halfedges[prev].next = pair_next;
        self.halfedges[pair_next].prev = prev;
    }
}

// =============================================================================
// STAR TRAVERSAL
// =============================================================================

/// Iterator over the outgoing halfedges of a node, in fan order.
///
/// Yields each incident halfedge exactly once for a manifold vertex.
#[derive(Clone, Debug)]
pub struct OutgoingHalfedges<'a, T, U, V, W>
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

impl<T, U, V, W> Iterator for OutgoingHalfedges<'_, T, U, V, W>
where
    T: CoordinateScalar,
    U: DataType,
    V: DataType,
    W: DataType,
{
    type Item = HalfedgeKey;

    fn next(&mut self) -> Option<HalfedgeKey> {
        let current = self.current?;
        let pair = self.hds.he(current).pair;
        let successor = self.hds.he(pair).next;
        self.current = (successor != self.start).then_some(successor);
        Some(current)
    }
}

impl<T, U, V, W> Hds<T, U, V, W>
where
    T: CoordinateScalar,
    U: DataType,
    V: DataType,
    W: DataType,
{
    /// Returns an iterator over the outgoing halfedges of `n` in fan order.
    ///
    /// Empty for an isolated node.
    pub fn outgoing_halfedges(&self, n: NodeKey) -> OutgoingHalfedges<'_, T, U, V, W> {
        let anchor = self.nodes[n].halfedge;
        OutgoingHalfedges {
            hds: self,
            start: anchor.unwrap_or_default(),
            current: anchor,
        }
    }

    /// Returns the number of edges incident to `n`.
    #[must_use]
    pub fn degree(&self, n: NodeKey) -> usize {
        self.outgoing_halfedges(n).count()
    }
}

// =============================================================================
// VALIDATION
// =============================================================================

impl<T, U, V, W> Hds<T, U, V, W>
where
    T: CoordinateScalar,
    U: DataType,
    V: DataType,
    W: DataType,
{
    /// Checks every structural invariant and returns the first failure.
    ///
    /// # Errors
    ///
    /// Returns the first [`HdsValidationError`] found; see
    /// [`validation_report`](Self::validation_report) for exhaustive
    /// diagnostics.
    pub fn is_valid(&self) -> Result<(), HdsValidationError> {
        match self.validation_report().violations.into_iter().next() {
            None => Ok(()),
            Some(violation) => Err(violation.error),
        }
    }

    /// Checks every structural invariant and collects all failures.
    #[must_use]
    pub fn validation_report(&self) -> HdsValidationReport {
        let mut report = HdsValidationReport::default();

        self.validate_halfedges(&mut report);
        self.validate_nodes(&mut report);
        self.validate_edges(&mut report);
        self.validate_faces(&mut report);

        report
    }

    fn validate_halfedges(&self, report: &mut HdsValidationReport) {
        for (key, he) in &self.halfedges {
            let mut dangling = false;
            for (link, name) in [(he.pair, "pair"), (he.next, "next"), (he.prev, "prev")] {
                if !self.halfedges.contains_key(link) {
                    dangling = true;
                    report.violations.push(InvariantViolation {
                        kind: InvariantKind::ReferenceIntegrity,
                        error: HdsValidationError::DanglingReference {
                            entity: "halfedge",
                            message: format!("{key:?} {name} -> {link:?}"),
                        },
                    });
                }
            }
            if !self.nodes.contains_key(he.origin) {
                dangling = true;
                report.violations.push(InvariantViolation {
                    kind: InvariantKind::ReferenceIntegrity,
                    error: HdsValidationError::DanglingReference {
                        entity: "halfedge",
                        message: format!("{key:?} origin -> {:?}", he.origin),
                    },
                });
            }
            if !self.edges.contains_key(he.edge) {
                dangling = true;
                report.violations.push(InvariantViolation {
                    kind: InvariantKind::ReferenceIntegrity,
                    error: HdsValidationError::DanglingReference {
                        entity: "halfedge",
                        message: format!("{key:?} edge -> {:?}", he.edge),
                    },
                });
            }
            if let Some(face) = he.face {
                if !self.faces.contains_key(face) {
                    dangling = true;
                    report.violations.push(InvariantViolation {
                        kind: InvariantKind::ReferenceIntegrity,
                        error: HdsValidationError::DanglingReference {
                            entity: "halfedge",
                            message: format!("{key:?} face -> {face:?}"),
                        },
                    });
                }
            }
            if dangling {
                // The remaining checks chase links; skip them for this
                // halfedge rather than panicking on stale keys.
                continue;
            }

            if he.pair == key || self.he(he.pair).pair != key {
                report.violations.push(InvariantViolation {
                    kind: InvariantKind::PairInvolution,
                    error: HdsValidationError::PairInvolution { halfedge: key },
                });
            }

            if self.he(he.next).prev != key {
                report.violations.push(InvariantViolation {
                    kind: InvariantKind::CycleConsistency,
                    error: HdsValidationError::CycleInconsistency {
                        halfedge: key,
                        message: "prev(next(h)) != h".to_string(),
                    },
                });
            }
            if self.he(he.prev).next != key {
                report.violations.push(InvariantViolation {
                    kind: InvariantKind::CycleConsistency,
                    error: HdsValidationError::CycleInconsistency {
                        halfedge: key,
                        message: "next(prev(h)) != h".to_string(),
                    },
                });
            }

            if self.he(he.next).origin != self.he(he.pair).origin {
                report.violations.push(InvariantViolation {
                    kind: InvariantKind::OriginCoherence,
                    error: HdsValidationError::OriginIncoherence { halfedge: key },
                });
            }

            if let Some(face) = he.face {
                let second = he.next;
                let third = self.he(second).next;
                let triangle_closes = self.he(third).next == key;
                let faces_agree =
                    self.he(second).face == Some(face) && self.he(third).face == Some(face);
                if !triangle_closes || !faces_agree {
                    report.violations.push(InvariantViolation {
                        kind: InvariantKind::FaceCoherence,
                        error: HdsValidationError::FaceIncoherence { halfedge: key },
                    });
                }
            }
        }
    }

    fn validate_nodes(&self, report: &mut HdsValidationReport) {
        for (key, node) in &self.nodes {
            let Some(anchor) = node.halfedge else {
                continue;
            };
            if !self.halfedges.contains_key(anchor) {
                report.violations.push(InvariantViolation {
                    kind: InvariantKind::ReferenceIntegrity,
                    error: HdsValidationError::DanglingReference {
                        entity: "node",
                        message: format!("{key:?} halfedge -> {anchor:?}"),
                    },
                });
            } else if self.he(anchor).origin != key {
                report.violations.push(InvariantViolation {
                    kind: InvariantKind::NodeAnchoring,
                    error: HdsValidationError::NodeAnchorMismatch {
                        node: key,
                        halfedge: anchor,
                    },
                });
            }
        }
    }

    fn validate_edges(&self, report: &mut HdsValidationReport) {
        for (key, edge) in &self.edges {
            if !self.halfedges.contains_key(edge.he1) || !self.halfedges.contains_key(edge.he2) {
                report.violations.push(InvariantViolation {
                    kind: InvariantKind::ReferenceIntegrity,
                    error: HdsValidationError::DanglingReference {
                        entity: "edge",
                        message: format!("{key:?} halfedges -> {:?}, {:?}", edge.he1, edge.he2),
                    },
                });
                continue;
            }
            let pairs_mutual =
                self.he(edge.he1).pair == edge.he2 && self.he(edge.he2).pair == edge.he1;
            let owner_recorded =
                self.he(edge.he1).edge == key && self.he(edge.he2).edge == key;
            if !pairs_mutual || !owner_recorded {
                report.violations.push(InvariantViolation {
                    kind: InvariantKind::EdgePairing,
                    error: HdsValidationError::EdgePairing { edge: key },
                });
            }
        }
    }

    fn validate_faces(&self, report: &mut HdsValidationReport) {
        for (key, face) in &self.faces {
            if !self.halfedges.contains_key(face.halfedge) {
                report.violations.push(InvariantViolation {
                    kind: InvariantKind::ReferenceIntegrity,
                    error: HdsValidationError::DanglingReference {
                        entity: "face",
                        message: format!("{key:?} halfedge -> {:?}", face.halfedge),
                    },
                });
            } else if self.he(face.halfedge).face != Some(key) {
                report.violations.push(InvariantViolation {
                    kind: InvariantKind::FaceAnchoring,
                    error: HdsValidationError::FaceAnchorMismatch { face: key },
                });
            }
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
