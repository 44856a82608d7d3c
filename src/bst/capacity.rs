use super::Bst;
use crate::compare::Natural;
use crate::raw::RawBst;

impl<T> Bst<T> {
    /// Creates an empty tree with room for at least `capacity` elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::Bst;
    ///
    /// let tree: Bst<i32> = Bst::with_capacity(16);
    /// assert!(tree.is_empty());
    /// assert!(tree.capacity() >= 16);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(capacity) for memory allocation.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Bst::with_capacity_and_comparator(capacity, Natural)
    }
}

impl<T, C> Bst<T, C> {
    /// Creates an empty tree ordered by `compare`, with room for at least `capacity` elements.
    #[must_use]
    pub fn with_capacity_and_comparator(capacity: usize, compare: C) -> Self {
        Bst {
            raw: RawBst::with_capacity(capacity, compare),
        }
    }

    /// Returns how many elements the tree can hold before its node storage grows.
    ///
    /// Erased elements leave their node slot behind for reuse, so the capacity never shrinks.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn erased_slots_are_reused() {
        let mut tree = Bst::with_capacity(4);
        tree.extend([2, 1, 3, 4]);
        let capacity = tree.capacity();

        tree.remove(&1);
        tree.remove(&4);
        tree.extend([0, 5]);
        assert_eq!(tree.capacity(), capacity);
        assert_eq!(tree.len(), 4);
        tree.raw.check_invariants();
    }
}
