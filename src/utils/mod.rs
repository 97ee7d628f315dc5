//! Various unsorted geometrical and logical operators.

pub use self::hashable_partial_eq::HashablePartialEq;
pub use self::sorted_pair::SortedPair;

mod hashable_partial_eq;
pub mod hashmap;
mod sorted_pair;
