//! Payload traits for mesh entities.
//!
//! Clients can attach data to nodes, edges, and faces. The connectivity core
//! is oblivious to payload semantics; it only needs the payload to be
//! cheaply copyable and well-behaved in collections.

use serde::{Serialize, de::DeserializeOwned};
use std::{fmt::Debug, hash::Hash};

/// Trait alias for data types that can be attached to nodes, edges, and faces.
///
/// Payloads must implement `Copy` so entities can be moved and duplicated
/// without ownership complications. Use `()` for entities that carry no data.
///
/// # Usage
///
/// ```
/// use hemesh::core::traits::data_type::DataType;
///
/// fn accepts_payload<T: DataType>(_data: T) {}
///
/// accepts_payload(42_u32);
/// accepts_payload(());
/// ```
///
/// `String` does not qualify (not `Copy`); use numeric ids with an external
/// lookup table, `char` codes, or custom `Copy` enums instead.
pub trait DataType:
    Copy + Eq + Hash + Ord + PartialEq + PartialOrd + Debug + Serialize + DeserializeOwned
{
}

// Blanket implementation for all types that satisfy the bounds
impl<T> DataType for T where
    T: Copy + Eq + Hash + Ord + PartialEq + PartialOrd + Debug + Serialize + DeserializeOwned
{
}
