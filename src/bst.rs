use core::fmt;
use core::iter::FusedIterator;

use tracing::debug;

use crate::compare::{Compare, Natural};
use crate::error::Error;
use crate::raw::{Arena, Handle, Node, RawBst, predecessor, successor};

mod capacity;
mod cursor;

pub use cursor::{Cursor, Position};

/// An ordered set based on an unbalanced binary search tree with parent links.
///
/// Elements are kept in the order given by the ordering rule `C` (by default [`Natural`], the
/// element's [`Ord`]). Elements that are equivalent under that rule are duplicates: inserting
/// one leaves the tree unchanged.
///
/// The tree is not rebalanced, so operations cost O(height), which is O(log n) for random
/// insertion orders and O(n) when values arrive sorted.
///
/// Besides the usual Rust iterators, a tree hands out [`Cursor`]s, bidirectional positions that
/// walk the tree through parent links. A cursor borrows the tree, so to erase the element under
/// a cursor, take its [`Position`] and pass it to [`Bst::erase`].
///
/// It is a logic error for an element to be modified in such a way that its ordering relative
/// to any other element changes while it is in the tree. The behavior resulting from such a
/// logic error is not specified, but will be encapsulated to the `Bst` that observed it.
///
/// # Examples
///
/// ```
/// use linked_bst::Bst;
///
/// let mut tree = Bst::new();
/// for value in [5, 3, 8, 1, 4, 7, 9] {
///     tree.insert(value);
/// }
/// assert_eq!(tree.iter().copied().collect::<Vec<_>>(), [1, 3, 4, 5, 7, 8, 9]);
///
/// // Erase through a position.
/// let five = tree.find(&5).position();
/// assert_eq!(tree.erase(five), Ok(5));
/// assert_eq!(tree.iter().copied().collect::<Vec<_>>(), [1, 3, 4, 7, 8, 9]);
///
/// // Walk backwards from the end.
/// let mut cursor = tree.end();
/// cursor.move_prev().unwrap();
/// assert_eq!(cursor.current(), Some(&9));
/// ```
pub struct Bst<T, C = Natural> {
    raw: RawBst<T, C>,
}

/// An iterator over the elements of a `Bst`, in order.
///
/// This `struct` is created by the [`iter`] method on [`Bst`].
///
/// # Examples
///
/// ```
/// use linked_bst::Bst;
///
/// let tree = Bst::from([3, 1, 2]);
/// let mut iter = tree.iter();
/// assert_eq!(iter.next(), Some(&1));
/// assert_eq!(iter.next_back(), Some(&3));
/// assert_eq!(iter.next(), Some(&2));
/// assert_eq!(iter.next(), None);
/// ```
///
/// [`iter`]: Bst::iter
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, T: 'a> {
    nodes: Option<&'a Arena<Node<T>>>,
    front: Option<Handle>,
    back: Option<Handle>,
    remaining: usize,
}

/// An owning iterator over the elements of a `Bst`, in order.
///
/// This `struct` is created by the [`into_iter`] method on [`Bst`] (provided by the
/// [`IntoIterator`] trait).
///
/// [`into_iter`]: Bst#method.into_iter
pub struct IntoIter<T, C = Natural> {
    tree: Bst<T, C>,
}

impl<T> Bst<T> {
    /// Makes a new, empty `Bst` ordered by [`Ord`].
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::Bst;
    ///
    /// let mut tree = Bst::new();
    /// tree.insert(1);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn new() -> Self {
        Bst {
            raw: RawBst::new(Natural),
        }
    }
}

impl<T, C> Bst<T, C> {
    /// Makes a new, empty `Bst` ordered by `compare`.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::Bst;
    ///
    /// let mut tree = Bst::with_comparator(|a: &i32, b: &i32| a > b);
    /// tree.extend([1, 3, 2]);
    /// assert_eq!(tree.iter().copied().collect::<Vec<_>>(), [3, 2, 1]);
    /// ```
    #[must_use]
    pub fn with_comparator(compare: C) -> Self {
        Bst {
            raw: RawBst::new(compare),
        }
    }

    /// Returns the ordering rule.
    pub fn comparator(&self) -> &C {
        self.raw.compare()
    }

    /// Returns the number of elements in the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::Bst;
    ///
    /// let mut tree = Bst::new();
    /// assert_eq!(tree.len(), 0);
    /// tree.insert(1);
    /// tree.insert(1);
    /// assert_eq!(tree.len(), 1);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub const fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the tree contains no elements.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.raw.len() == 0
    }

    /// Returns a cursor at the smallest element, or the end cursor if the tree is empty.
    ///
    /// # Complexity
    ///
    /// O(height)
    pub fn begin(&self) -> Cursor<'_, T, C> {
        Cursor::new(self, self.raw.first())
    }

    /// Returns the end cursor, one past the largest element.
    ///
    /// # Complexity
    ///
    /// O(1)
    pub fn end(&self) -> Cursor<'_, T, C> {
        Cursor::new(self, None)
    }

    /// Turns a position back into a cursor.
    ///
    /// # Errors
    ///
    /// [`Error::ForeignPosition`] if the position was taken from another tree, or from this
    /// tree before it was cleared; [`Error::StalePosition`] if its element has been erased.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::Bst;
    ///
    /// let mut tree = Bst::from([1, 2, 3]);
    /// let two = tree.find(&2).position();
    /// tree.insert(4);
    /// assert_eq!(tree.cursor(two).unwrap().current(), Some(&2));
    /// ```
    pub fn cursor(&self, position: Position) -> Result<Cursor<'_, T, C>, Error> {
        let node = self.resolve(position)?;
        Ok(Cursor::new(self, node))
    }

    /// Returns the smallest element.
    pub fn first(&self) -> Option<&T> {
        self.raw.first().map(|handle| self.raw.value(handle))
    }

    /// Returns the largest element.
    pub fn last(&self) -> Option<&T> {
        self.raw.last().map(|handle| self.raw.value(handle))
    }

    /// Gets an iterator that visits the elements in order.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::Bst;
    ///
    /// let tree = Bst::from([3, 1, 2]);
    /// assert_eq!(tree.iter().rev().copied().collect::<Vec<_>>(), [3, 2, 1]);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(height) to create the iterator; O(1) amortized per step.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            nodes: Some(self.raw.nodes()),
            front: self.raw.first(),
            back: self.raw.last(),
            remaining: self.raw.len(),
        }
    }

    /// Removes the element at `position` and returns it.
    ///
    /// When the element has two children its node is reused for the in-order successor's
    /// value. Positions taken at the erased element and at the successor both become stale; all
    /// other positions stay valid.
    ///
    /// # Errors
    ///
    /// [`Error::PastTheEnd`] for the end position, [`Error::ForeignPosition`] for a position
    /// from another tree and [`Error::StalePosition`] for one whose element is already gone. The
    /// tree is unchanged on error.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::{Bst, Error};
    ///
    /// let mut tree = Bst::from([1, 2, 3]);
    /// let two = tree.find(&2).position();
    /// assert_eq!(tree.erase(two), Ok(2));
    /// assert_eq!(tree.erase(two), Err(Error::StalePosition));
    /// assert_eq!(tree.len(), 2);
    ///
    /// // 5 has two children: 7 moves into its node, but the old position does not follow.
    /// let mut tree = Bst::from([5, 3, 8, 7, 9]);
    /// let five = tree.find(&5).position();
    /// assert_eq!(tree.erase(five), Ok(5));
    /// assert_eq!(tree.erase(five), Err(Error::StalePosition));
    /// assert!(tree.contains(&7));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(height)
    pub fn erase(&mut self, position: Position) -> Result<T, Error> {
        match self.resolve(position)? {
            Some(handle) => Ok(self.raw.erase(handle)),
            None => {
                debug!("rejected erase of the end position");
                Err(Error::PastTheEnd)
            }
        }
    }

    /// Removes and returns the smallest element.
    pub fn pop_first(&mut self) -> Option<T> {
        let first = self.raw.first()?;
        Some(self.raw.erase(first))
    }

    /// Removes and returns the largest element.
    pub fn pop_last(&mut self) -> Option<T> {
        let last = self.raw.last()?;
        Some(self.raw.erase(last))
    }

    /// Removes every element. Positions taken before the call no longer belong to this tree.
    ///
    /// # Complexity
    ///
    /// O(n), without recursion.
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Exchanges the contents, ordering rules and identities of two trees without allocating.
    ///
    /// Positions follow their elements to the other tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::Bst;
    ///
    /// let mut a = Bst::from([1, 2]);
    /// let mut b = Bst::from([3]);
    /// let one = a.find(&1).position();
    /// a.swap(&mut b);
    /// assert_eq!(a.len(), 1);
    /// assert_eq!(b.cursor(one).unwrap().current(), Some(&1));
    /// ```
    pub fn swap(&mut self, other: &mut Self) {
        core::mem::swap(&mut self.raw, &mut other.raw);
    }

    /// Returns a cursor at the first element, in order, that is `==` to `value`, or the end
    /// cursor.
    ///
    /// Unlike [`find`](Bst::find) this ignores the ordering rule and compares every element, so
    /// it also works when `==` is finer than the ordering's equivalence.
    ///
    /// # Complexity
    ///
    /// O(n)
    pub fn find_linear(&self, value: &T) -> Cursor<'_, T, C>
    where
        T: PartialEq,
    {
        Cursor::new(self, self.raw.find_linear(value))
    }

    fn resolve(&self, position: Position) -> Result<Option<Handle>, Error> {
        if position.tree != self.raw.id() {
            debug!("rejected position from another tree");
            return Err(Error::ForeignPosition);
        }
        match position.node {
            Some((handle, generation)) if !self.raw.is_live(handle, generation) => {
                debug!(node = handle.to_index(), "rejected stale position");
                Err(Error::StalePosition)
            }
            node => Ok(node.map(|(handle, _)| handle)),
        }
    }
}

impl<T, C: Compare<T>> Bst<T, C> {
    /// Adds a value to the tree.
    ///
    /// Returns whether the value was newly inserted. If an equivalent value is already present
    /// the tree is left untouched and `value` is dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::Bst;
    ///
    /// let mut tree = Bst::new();
    /// assert!(tree.insert(2));
    /// assert!(!tree.insert(2));
    /// assert_eq!(tree.len(), 1);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(height)
    pub fn insert(&mut self, value: T) -> bool {
        self.raw.insert(value).is_some()
    }

    /// Like [`insert`](Bst::insert), but reports a failed allocation instead of aborting.
    ///
    /// # Errors
    ///
    /// [`Error::CapacityExceeded`] if the tree already holds as many nodes as it can address,
    /// [`Error::AllocationFailed`] if the node storage could not grow. The tree is unchanged.
    pub fn try_insert(&mut self, value: T) -> Result<bool, Error> {
        Ok(self.raw.try_insert(value)?.is_some())
    }

    /// Builds an element from `args` and adds it to the tree.
    ///
    /// Duplicates are handled exactly as by [`insert`](Bst::insert): the built element is
    /// dropped and the length does not change.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::Bst;
    ///
    /// #[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
    /// struct Point(i32, i32);
    ///
    /// impl From<(i32, i32)> for Point {
    ///     fn from((x, y): (i32, i32)) -> Self {
    ///         Point(x, y)
    ///     }
    /// }
    ///
    /// let mut tree: Bst<Point> = Bst::new();
    /// assert!(tree.emplace((1, 2)));
    /// assert!(!tree.emplace((1, 2)));
    /// assert_eq!(tree.first(), Some(&Point(1, 2)));
    /// ```
    pub fn emplace<A>(&mut self, args: A) -> bool
    where
        T: From<A>,
    {
        self.insert(T::from(args))
    }

    /// Returns a cursor at the element equivalent to `value`, or the end cursor if there is
    /// none.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::Bst;
    ///
    /// let tree = Bst::from([1, 2, 3]);
    /// assert_eq!(tree.find(&2).current(), Some(&2));
    /// assert_eq!(tree.find(&4), tree.end());
    /// ```
    ///
    /// # Complexity
    ///
    /// O(height)
    pub fn find(&self, value: &T) -> Cursor<'_, T, C> {
        Cursor::new(self, self.raw.find(value))
    }

    /// Returns `true` if the tree contains a value equivalent to `value`.
    pub fn contains(&self, value: &T) -> bool {
        self.raw.find(value).is_some()
    }

    /// Returns a reference to the stored value equivalent to `value`, if any.
    pub fn get(&self, value: &T) -> Option<&T> {
        self.raw.find(value).map(|handle| self.raw.value(handle))
    }

    /// Removes the value equivalent to `value` and returns it.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::Bst;
    ///
    /// let mut tree = Bst::from([1, 2]);
    /// assert_eq!(tree.remove(&2), Some(2));
    /// assert_eq!(tree.remove(&2), None);
    /// ```
    pub fn remove(&mut self, value: &T) -> Option<T> {
        let handle = self.raw.find(value)?;
        Some(self.raw.erase(handle))
    }
}

impl<T, C: Default> Default for Bst<T, C> {
    /// Creates an empty tree. This is also the state `core::mem::take` leaves behind.
    fn default() -> Self {
        Bst::with_comparator(C::default())
    }
}

impl<T: Clone, C: Compare<T> + Clone> Clone for Bst<T, C> {
    /// Deep-copies the tree. The copy has the same shape, its own identity, and shares nothing
    /// with the original.
    fn clone(&self) -> Self {
        Bst { raw: self.raw.clone() }
    }
}

impl<T: fmt::Debug, C> fmt::Debug for Bst<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T: PartialEq, C> PartialEq for Bst<T, C> {
    fn eq(&self, other: &Bst<T, C>) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Eq, C> Eq for Bst<T, C> {}

impl<T, C: Compare<T> + Default> FromIterator<T> for Bst<T, C> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Bst::default();
        tree.extend(iter);
        tree
    }
}

impl<T, C: Compare<T>> Extend<T> for Bst<T, C> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<'a, T: 'a + Copy, C: Compare<T>> Extend<&'a T> for Bst<T, C> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

impl<T: Ord, const N: usize> From<[T; N]> for Bst<T> {
    /// Inserts the array's values left to right, so the first value becomes the root.
    fn from(values: [T; N]) -> Self {
        let mut tree = Bst::with_capacity(N);
        tree.extend(values);
        tree
    }
}

impl<T, C> IntoIterator for Bst<T, C> {
    type Item = T;
    type IntoIter = IntoIter<T, C>;

    fn into_iter(self) -> IntoIter<T, C> {
        IntoIter { tree: self }
    }
}

impl<'a, T, C> IntoIterator for &'a Bst<T, C> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        let nodes = self.nodes?;
        let handle = self.front?;
        self.remaining -= 1;
        self.front = successor(nodes, handle);
        Some(&nodes.get(handle).value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }

    fn last(mut self) -> Option<&'a T> {
        self.next_back()
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        let nodes = self.nodes?;
        let handle = self.back?;
        self.remaining -= 1;
        self.back = predecessor(nodes, handle);
        Some(&nodes.get(handle).value)
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Iter {
            nodes: self.nodes,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<T> Default for Iter<'_, T> {
    /// Creates an empty `bst::Iter`.
    ///
    /// ```
    /// # use linked_bst::bst;
    /// let iter: bst::Iter<'_, u8> = Default::default();
    /// assert_eq!(iter.len(), 0);
    /// ```
    fn default() -> Self {
        Iter {
            nodes: None,
            front: None,
            back: None,
            remaining: 0,
        }
    }
}

impl<T, C> Iterator for IntoIter<T, C> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.tree.pop_first()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.tree.len(), Some(self.tree.len()))
    }
}

impl<T, C> DoubleEndedIterator for IntoIter<T, C> {
    fn next_back(&mut self) -> Option<T> {
        self.tree.pop_last()
    }
}

impl<T, C> ExactSizeIterator for IntoIter<T, C> {
    fn len(&self) -> usize {
        self.tree.len()
    }
}

impl<T, C> FusedIterator for IntoIter<T, C> {}

impl<T: fmt::Debug, C> fmt::Debug for IntoIter<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.tree).finish()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn iter_meets_in_the_middle() {
        let tree = Bst::from([4, 2, 6, 1, 3, 5, 7]);
        let mut iter = tree.iter();
        assert_eq!(iter.len(), 7);
        assert_eq!(iter.next(), Some(&1));
        assert_eq!(iter.next_back(), Some(&7));
        assert_eq!(iter.next_back(), Some(&6));
        assert_eq!(iter.len(), 4);
        let rest: Vec<_> = iter.by_ref().copied().collect();
        assert_eq!(rest, [2, 3, 4, 5]);
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next_back(), None);
    }

    #[test]
    fn into_iter_drains_from_both_ends() {
        let tree = Bst::from([2, 1, 3]);
        let mut iter = tree.into_iter();
        assert_eq!(iter.len(), 3);
        assert_eq!(iter.next_back(), Some(3));
        assert_eq!(iter.next(), Some(1));
        assert_eq!(iter.next(), Some(2));
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn clone_checks_out() {
        let tree = Bst::from([5u8, 3, 8, 1, 4, 7, 9]);
        let copy = tree.clone();
        copy.raw.check_invariants();
        assert_eq!(copy, tree);
    }

    #[test]
    fn take_leaves_empty_tree() {
        let mut tree = Bst::from([1, 2, 3]);
        let moved = core::mem::take(&mut tree);
        assert!(tree.is_empty());
        assert_eq!(tree.begin(), tree.end());
        assert_eq!(moved.len(), 3);
        tree.raw.check_invariants();
    }

    #[test]
    fn resolve_distinguishes_failures() {
        let mut tree = Bst::from([1, 2, 3]);
        let other = Bst::from([1, 2, 3]);

        let end = tree.end().position();
        assert_eq!(tree.resolve(end), Ok(None));
        assert_eq!(other.resolve(end), Err(Error::ForeignPosition));

        let two = tree.find(&2).position();
        tree.remove(&2);
        assert_eq!(tree.resolve(two), Err(Error::StalePosition));

        // The freed slot is reused, but the old position still does not match it.
        tree.insert(10);
        assert_eq!(tree.resolve(two), Err(Error::StalePosition));
        tree.raw.check_invariants();
    }
}
