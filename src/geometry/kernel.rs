//! Geometric kernel abstraction following CGAL's design.
//!
//! The [`Kernel`] trait defines the orientation predicate used by the
//! point-location walk. This separation keeps the half-edge data structure
//! purely combinatorial and allows swapping between a fast floating-point
//! implementation and an exact adaptive-precision one.

use core::marker::PhantomData;

use crate::geometry::point::Point;
use crate::geometry::predicates::{OrientedSide, oriented_side, robust_oriented_side};
use crate::geometry::traits::coordinate::CoordinateScalar;

/// Geometric kernel trait defining the predicates for triangulation queries.
///
/// Following CGAL's architecture, the kernel encapsulates all geometric
/// decisions, so the triangulation itself never inspects coordinates beyond
/// storing them.
///
/// # Examples
///
/// ```
/// use hemesh::geometry::kernel::{Kernel, RobustKernel};
/// use hemesh::geometry::point::Point;
/// use hemesh::geometry::predicates::OrientedSide;
///
/// let kernel = RobustKernel::<f64>::new();
/// let side = kernel.oriented_side(
///     &Point::new(0.0, 0.0),
///     &Point::new(1.0, 0.0),
///     &Point::new(0.5, 1.0),
/// );
/// assert_eq!(side, OrientedSide::POSITIVE);
/// ```
pub trait Kernel: Clone {
    /// The scalar type used for coordinates.
    type Scalar: CoordinateScalar;

    /// Classifies `p` relative to the directed line `a -> b`.
    ///
    /// Returns [`OrientedSide::POSITIVE`] when `p` lies strictly to the left,
    /// [`OrientedSide::NEGATIVE`] strictly to the right, and
    /// [`OrientedSide::BOUNDARY`] when the three points are collinear.
    fn oriented_side(
        &self,
        a: &Point<Self::Scalar>,
        b: &Point<Self::Scalar>,
        p: &Point<Self::Scalar>,
    ) -> OrientedSide;
}

/// Fast floating-point kernel.
///
/// Uses the plain determinant for maximum performance. May misclassify
/// nearly-collinear configurations; for guaranteed correctness use
/// [`RobustKernel`], which the triangulation defaults to.
#[derive(Clone, Copy, Default, Debug)]
pub struct FastKernel<T: CoordinateScalar> {
    _phantom: PhantomData<T>,
}

impl<T: CoordinateScalar> FastKernel<T> {
    /// Create a new fast kernel.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _phantom: PhantomData,
        }
    }
}

impl<T: CoordinateScalar> Kernel for FastKernel<T> {
    type Scalar = T;

    #[inline]
    fn oriented_side(&self, a: &Point<T>, b: &Point<T>, p: &Point<T>) -> OrientedSide {
        oriented_side(a, b, p)
    }
}

/// Exact adaptive-precision kernel.
///
/// Evaluates the orientation determinant with Shewchuk's adaptive predicates,
/// so collinearity is decided exactly. A floating-point filter handles the
/// common well-conditioned case at essentially [`FastKernel`] speed and only
/// falls back to extended precision near degeneracy.
#[derive(Clone, Copy, Default, Debug)]
pub struct RobustKernel<T: CoordinateScalar> {
    _phantom: PhantomData<T>,
}

impl<T: CoordinateScalar> RobustKernel<T> {
    /// Create a new robust kernel.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _phantom: PhantomData,
        }
    }
}

impl<T: CoordinateScalar> Kernel for RobustKernel<T> {
    type Scalar = T;

    #[inline]
    fn oriented_side(&self, a: &Point<T>, b: &Point<T>, p: &Point<T>) -> OrientedSide {
        robust_oriented_side(a, b, p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fast_kernel_orientation() {
        let kernel = FastKernel::<f64>::new();
        let a = Point::new(0.0, 0.0);
        let b = Point::new(1.0, 0.0);

        assert_eq!(
            kernel.oriented_side(&a, &b, &Point::new(0.5, 1.0)),
            OrientedSide::POSITIVE
        );
        assert_eq!(
            kernel.oriented_side(&a, &b, &Point::new(0.5, -1.0)),
            OrientedSide::NEGATIVE
        );
        assert_eq!(
            kernel.oriented_side(&a, &b, &Point::new(0.5, 0.0)),
            OrientedSide::BOUNDARY
        );
    }

    #[test]
    fn kernel_consistency_fast_vs_robust() {
        let fast = FastKernel::<f64>::new();
        let exact = RobustKernel::<f64>::new();

        let a = Point::new(0.0, 0.0);
        let b = Point::new(2.0, 1.0);
        let queries = [
            Point::new(1.0, 1.0),
            Point::new(1.0, 0.0),
            Point::new(4.0, 2.0),
            Point::new(-2.0, -1.0),
        ];

        for q in &queries {
            assert_eq!(
                fast.oriented_side(&a, &b, q),
                exact.oriented_side(&a, &b, q),
            );
        }
    }

    #[test]
    fn robust_kernel_exact_collinearity() {
        let kernel = RobustKernel::<f64>::new();

        assert_eq!(
            kernel.oriented_side(
                &Point::new(0.1, 0.1),
                &Point::new(0.3, 0.3),
                &Point::new(0.7, 0.7),
            ),
            OrientedSide::BOUNDARY
        );
    }
}
