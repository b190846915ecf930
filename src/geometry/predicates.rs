//! Orientation predicates for 2D geometry.
//!
//! The fundamental query of the crate: on which side of the directed line
//! `a -> b` does a point `p` lie? Two implementations are provided:
//!
//! - [`oriented_side`]: the plain floating-point determinant. Fast, but may
//!   misclassify nearly-collinear inputs.
//! - [`robust_oriented_side`]: adaptive-precision arithmetic via the
//!   [`robust`] crate (Shewchuk's predicates). Collinearity is decided
//!   exactly, which the point-location walk depends on.

use crate::geometry::point::Point;
use crate::geometry::traits::coordinate::CoordinateScalar;
use robust::{Coord, orient2d};

/// Position of a point relative to a directed line.
///
/// The sign convention follows the counterclockwise determinant: a point to
/// the left of `a -> b` is on the positive side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrientedSide {
    /// The point lies strictly to the right of the directed line.
    NEGATIVE,
    /// The point lies exactly on the line.
    BOUNDARY,
    /// The point lies strictly to the left of the directed line.
    POSITIVE,
}

impl std::fmt::Display for OrientedSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NEGATIVE => write!(f, "NEGATIVE"),
            Self::BOUNDARY => write!(f, "BOUNDARY"),
            Self::POSITIVE => write!(f, "POSITIVE"),
        }
    }
}

/// Classifies `p` against the directed line `a -> b` using the naive
/// floating-point determinant `(b - a) × (p - a)`.
///
/// # Examples
///
/// ```
/// use hemesh::geometry::point::Point;
/// use hemesh::geometry::predicates::{oriented_side, OrientedSide};
///
/// let a = Point::new(0.0, 0.0);
/// let b = Point::new(1.0, 0.0);
///
/// assert_eq!(oriented_side(&a, &b, &Point::new(0.5, 1.0)), OrientedSide::POSITIVE);
/// assert_eq!(oriented_side(&a, &b, &Point::new(0.5, -1.0)), OrientedSide::NEGATIVE);
/// assert_eq!(oriented_side(&a, &b, &Point::new(2.0, 0.0)), OrientedSide::BOUNDARY);
/// ```
#[must_use]
pub fn oriented_side<T>(a: &Point<T>, b: &Point<T>, p: &Point<T>) -> OrientedSide
where
    T: CoordinateScalar,
{
    let det = (b.x() - a.x()) * (p.y() - a.y()) - (b.y() - a.y()) * (p.x() - a.x());
    if det > T::zero() {
        OrientedSide::POSITIVE
    } else if det < T::zero() {
        OrientedSide::NEGATIVE
    } else {
        OrientedSide::BOUNDARY
    }
}

/// Classifies `p` against the directed line `a -> b` with adaptive-precision
/// arithmetic.
///
/// The result is exact: `OrientedSide::BOUNDARY` is returned iff the three
/// points are truly collinear, regardless of how close to degenerate the
/// input is. Coordinates are widened losslessly to `f64` before evaluation.
///
/// # Examples
///
/// ```
/// use hemesh::geometry::point::Point;
/// use hemesh::geometry::predicates::{robust_oriented_side, OrientedSide};
///
/// let a = Point::new(0.0, 0.0);
/// let b = Point::new(1.0, 1.0);
///
/// assert_eq!(
///     robust_oriented_side(&a, &b, &Point::new(0.5, 0.5)),
///     OrientedSide::BOUNDARY,
/// );
/// ```
#[must_use]
pub fn robust_oriented_side<T>(a: &Point<T>, b: &Point<T>, p: &Point<T>) -> OrientedSide
where
    T: CoordinateScalar,
{
    let det = orient2d(
        Coord {
            x: a.x().as_f64(),
            y: a.y().as_f64(),
        },
        Coord {
            x: b.x().as_f64(),
            y: b.y().as_f64(),
        },
        Coord {
            x: p.x().as_f64(),
            y: p.y().as_f64(),
        },
    );
    if det > 0.0 {
        OrientedSide::POSITIVE
    } else if det < 0.0 {
        OrientedSide::NEGATIVE
    } else {
        OrientedSide::BOUNDARY
    }
}
