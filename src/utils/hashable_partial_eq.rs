use crate::math::{Point, Real};
use core::hash::{Hash, Hasher};

/// A structure that implements `Eq` and is hashable even if the wrapped data
/// only implements `PartialEq`.
///
/// Two wrapped values are considered equal if their `PartialEq` says so. The
/// hash of a point hashes the bit patterns of its coordinates, after mapping
/// `-0.0` to `0.0` so that values equal under `PartialEq` hash identically.
#[derive(PartialEq, Clone, Debug)]
pub struct HashablePartialEq<T> {
    value: T,
}

impl<T> HashablePartialEq<T> {
    /// Creates a new `HashablePartialEq`. Please make sure that you really
    /// want to transform the wrapped object's partial equality to an equivalence relation.
    pub fn new(value: T) -> HashablePartialEq<T> {
        HashablePartialEq { value }
    }

    /// Gets the wrapped value.
    pub fn unwrap(self) -> T {
        self.value
    }
}

impl<T: PartialEq> Eq for HashablePartialEq<T> {}

impl Hash for HashablePartialEq<Point<Real>> {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        for coord in self.value.coords.iter() {
            // `0.0 == -0.0` must hash the same.
            let coord = if *coord == 0.0 { 0.0 } else { *coord };
            coord.to_bits().hash(state);
        }
    }
}
