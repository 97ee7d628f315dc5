use core::cmp::PartialOrd;

/// A pair of elements sorted in increasing order.
///
/// Mesh edges are keyed by a `SortedPair` of vertex indices so that the
/// edge `(a, b)` and its twin `(b, a)` seen from the adjacent triangle
/// resolve to the same entry.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct SortedPair<T: PartialOrd>([T; 2]);

impl<T: PartialOrd> SortedPair<T> {
    /// Sorts two elements in increasing order into a new pair.
    pub fn new(element1: T, element2: T) -> Self {
        if element1 > element2 {
            SortedPair([element2, element1])
        } else {
            SortedPair([element1, element2])
        }
    }
}

impl<T: PartialOrd + Copy> SortedPair<T> {
    /// The two elements of this pair, smallest first.
    #[inline]
    pub fn into_array(self) -> [T; 2] {
        self.0
    }
}

#[cfg(test)]
mod test {
    use super::SortedPair;

    #[test]
    fn twin_edges_are_equal() {
        assert_eq!(SortedPair::new(7u32, 2), SortedPair::new(2u32, 7));
        assert_eq!(SortedPair::new(7u32, 2).into_array(), [2, 7]);
        assert!(SortedPair::new(9u32, 1) < SortedPair::new(4u32, 2));
    }
}
