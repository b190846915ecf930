//! Axis-aligned bounding boxes.
//!
//! [`BoundingBox`] is a reduction target: it starts out *inverse* (min at
//! positive infinity, max at negative infinity) so that expanding it with a
//! sequence of points yields their tight axis-aligned hull without a special
//! first-point case. An inverse box that was never expanded reports itself
//! as empty.

use crate::geometry::point::Point;
use crate::geometry::traits::coordinate::CoordinateScalar;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle in the plane.
///
/// # Examples
///
/// ```
/// use hemesh::geometry::bounding_box::BoundingBox;
/// use hemesh::geometry::point::Point;
///
/// let mut bbox = BoundingBox::inverse();
/// bbox.expand(&Point::new(0.0, 1.0));
/// bbox.expand(&Point::new(2.0, -1.0));
///
/// assert_eq!(bbox.min(), Point::new(0.0, -1.0));
/// assert_eq!(bbox.max(), Point::new(2.0, 1.0));
/// assert_eq!(bbox.width(), 2.0);
/// assert_eq!(bbox.height(), 2.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct BoundingBox<T>
where
    T: CoordinateScalar,
{
    min: Point<T>,
    max: Point<T>,
}

impl<T> BoundingBox<T>
where
    T: CoordinateScalar,
{
    /// Creates the inverse box, the identity element of [`expand`](Self::expand).
    #[must_use]
    pub fn inverse() -> Self {
        Self {
            min: Point::new(T::infinity(), T::infinity()),
            max: Point::new(T::neg_infinity(), T::neg_infinity()),
        }
    }

    /// Creates a box from explicit corners.
    #[must_use]
    pub const fn new(min: Point<T>, max: Point<T>) -> Self {
        Self { min, max }
    }

    /// Returns the minimal corner.
    #[must_use]
    pub const fn min(&self) -> Point<T> {
        self.min
    }

    /// Returns the maximal corner.
    #[must_use]
    pub const fn max(&self) -> Point<T> {
        self.max
    }

    /// Returns `true` if the box contains no points (never expanded).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.min.x() > self.max.x() || self.min.y() > self.max.y()
    }

    /// Grows the box to cover `p`.
    pub fn expand(&mut self, p: &Point<T>) {
        self.min = Point::new(self.min.x().min(p.x()), self.min.y().min(p.y()));
        self.max = Point::new(self.max.x().max(p.x()), self.max.y().max(p.y()));
    }

    /// Returns the extent along the x axis.
    #[must_use]
    pub fn width(&self) -> T {
        self.max.x() - self.min.x()
    }

    /// Returns the extent along the y axis.
    #[must_use]
    pub fn height(&self) -> T {
        self.max.y() - self.min.y()
    }

    /// Returns `true` if `p` lies inside the box or on its border.
    #[must_use]
    pub fn contains(&self, p: &Point<T>) -> bool {
        self.min.x() <= p.x() && p.x() <= self.max.x() && self.min.y() <= p.y() && p.y() <= self.max.y()
    }
}

impl<T> Default for BoundingBox<T>
where
    T: CoordinateScalar,
{
    fn default() -> Self {
        Self::inverse()
    }
}
