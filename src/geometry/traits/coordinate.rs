//! Coordinate scalar abstractions for 2D geometry.
//!
//! This module defines the [`CoordinateScalar`] trait that unifies the
//! floating-point operations the triangulation needs, along with supporting
//! traits for finiteness validation ([`FiniteCheck`]), NaN-aware equality
//! ([`OrderedEq`]), and hashing ([`HashCoordinate`]) of coordinate values.
//!
//! Floating-point types do not implement `Eq` or `Hash`, so points cannot be
//! used in hash-based collections directly. The traits here close that gap by
//! routing comparisons and hashing through `ordered-float`, which treats NaN
//! as equal to itself and hashes consistently.

use num_traits::Float;
use ordered_float::OrderedFloat;
use serde::{Serialize, de::DeserializeOwned};
use std::fmt::Debug;
use std::hash::Hash;
use std::hash::Hasher;

/// Finiteness check that works across floating-point scalar types.
///
/// # Examples
///
/// ```
/// use hemesh::geometry::traits::coordinate::FiniteCheck;
///
/// assert!(1.0f64.is_finite_generic());
/// assert!(!f64::NAN.is_finite_generic());
/// assert!(!f32::INFINITY.is_finite_generic());
/// ```
pub trait FiniteCheck {
    /// Returns `true` if the value is neither NaN nor infinite.
    fn is_finite_generic(&self) -> bool;
}

/// Equality comparison with ordered semantics: NaN compares equal to NaN.
///
/// The default floating-point `==` has `NaN != NaN`, which breaks the
/// reflexivity that point comparison and hashing rely on.
///
/// # Examples
///
/// ```
/// use hemesh::geometry::traits::coordinate::OrderedEq;
///
/// assert!(1.0f64.ordered_eq(&1.0f64));
/// assert!(f64::NAN.ordered_eq(&f64::NAN));
/// assert!(!1.0f64.ordered_eq(&2.0f64));
/// ```
pub trait OrderedEq {
    /// Compares two values, treating NaN as equal to itself.
    fn ordered_eq(&self, other: &Self) -> bool;
}

/// Hashing for a single coordinate value.
///
/// Uses `OrderedFloat` internally so that equal values (under
/// [`OrderedEq`]) hash identically, NaN included.
pub trait HashCoordinate {
    /// Feeds this coordinate into the given hasher.
    fn hash_scalar<H: Hasher>(&self, state: &mut H);
}

/// The scalar type used for coordinates throughout the crate.
///
/// Bundles the floating-point arithmetic from [`num_traits::Float`] with the
/// validation, comparison, and hashing support the geometric types need.
/// Implemented for `f32` and `f64`.
///
/// # Examples
///
/// ```
/// use hemesh::geometry::traits::coordinate::CoordinateScalar;
///
/// fn midpoint<T: CoordinateScalar>(a: T, b: T) -> T {
///     (a + b) / (T::one() + T::one())
/// }
///
/// assert_eq!(midpoint(0.0f64, 1.0f64), 0.5);
/// ```
pub trait CoordinateScalar:
    Float + OrderedEq + HashCoordinate + FiniteCheck + Default + Debug + Serialize + DeserializeOwned
{
    /// Returns the default tolerance used for approximate comparisons of
    /// this scalar type: `1e-6` for `f32`, `1e-15` for `f64`.
    fn default_tolerance() -> Self;

    /// Widens this coordinate to `f64` without loss.
    ///
    /// The exact-arithmetic predicate operates on `f64` inputs; this is the
    /// lossless path into it for both supported scalar types.
    fn as_f64(self) -> f64;
}

macro_rules! impl_coordinate_scalar {
    ($t:ty, $tolerance:expr) => {
        impl FiniteCheck for $t {
            #[inline]
            fn is_finite_generic(&self) -> bool {
                self.is_finite()
            }
        }

        impl OrderedEq for $t {
            #[inline]
            fn ordered_eq(&self, other: &Self) -> bool {
                OrderedFloat(*self) == OrderedFloat(*other)
            }
        }

        impl HashCoordinate for $t {
            #[inline]
            fn hash_scalar<H: Hasher>(&self, state: &mut H) {
                OrderedFloat(*self).hash(state);
            }
        }

        impl CoordinateScalar for $t {
            #[inline]
            fn default_tolerance() -> Self {
                $tolerance
            }

            #[inline]
            fn as_f64(self) -> f64 {
                f64::from(self)
            }
        }
    };
}

impl_coordinate_scalar!(f32, 1e-6);
impl_coordinate_scalar!(f64, 1e-15);
