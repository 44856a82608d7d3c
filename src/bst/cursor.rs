use core::fmt;

use super::Bst;
use crate::compare::Natural;
use crate::error::Error;
use crate::raw::{Handle, TreeId, predecessor, successor};

/// A bidirectional cursor over the elements of a [`Bst`], in order.
///
/// A cursor points either at an element or at the end of the tree, one past the largest
/// element. It moves by following parent and child links, so moving needs no extra storage.
///
/// Cursors borrow their tree. Two cursors are equal when they point at the same element of the
/// same tree instance; cursors into two different trees are never equal, even if the trees hold
/// the same values.
///
/// This `struct` is created by [`Bst::begin`], [`Bst::end`], [`Bst::find`] and [`Bst::cursor`].
///
/// # Examples
///
/// ```
/// use linked_bst::{Bst, Error};
///
/// let tree = Bst::from([2, 1, 3]);
/// let mut cursor = tree.begin();
/// assert_eq!(cursor.current(), Some(&1));
///
/// cursor.move_next().unwrap();
/// cursor.move_next().unwrap();
/// assert_eq!(cursor.get(), Ok(&3));
///
/// cursor.move_next().unwrap();
/// assert_eq!(cursor, tree.end());
/// assert_eq!(cursor.move_next(), Err(Error::PastTheEnd));
///
/// cursor.move_prev().unwrap();
/// assert_eq!(cursor.current(), Some(&3));
/// ```
pub struct Cursor<'a, T, C = Natural> {
    tree: &'a Bst<T, C>,
    current: Option<Handle>,
}

/// A cursor's place in its tree, detached from the borrow.
///
/// Positions are how elements are erased: take one from a cursor, release the cursor, then pass
/// the position to [`Bst::erase`]. A position remembers which tree it came from and which
/// element it named, so using it on another tree or after its element is gone fails with an
/// [`Error`] instead of touching the wrong element.
///
/// # Examples
///
/// ```
/// use linked_bst::{Bst, Error};
///
/// let mut tree = Bst::from([1, 2, 3]);
/// let other = Bst::from([1, 2, 3]);
///
/// let two = tree.find(&2).position();
/// assert_eq!(other.cursor(two).unwrap_err(), Error::ForeignPosition);
/// assert_eq!(tree.erase(two), Ok(2));
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Position {
    pub(super) tree: TreeId,
    pub(super) node: Option<(Handle, u32)>,
}

impl<'a, T, C> Cursor<'a, T, C> {
    pub(super) fn new(tree: &'a Bst<T, C>, current: Option<Handle>) -> Self {
        Cursor { tree, current }
    }

    /// Returns the element under the cursor, or `None` at the end.
    #[must_use]
    pub fn current(&self) -> Option<&'a T> {
        self.current.map(|handle| self.tree.raw.value(handle))
    }

    /// Returns the element under the cursor.
    ///
    /// # Errors
    ///
    /// [`Error::PastTheEnd`] if the cursor is at the end.
    pub fn get(&self) -> Result<&'a T, Error> {
        self.current().ok_or(Error::PastTheEnd)
    }

    /// Returns `true` if the cursor is at the end of the tree.
    #[must_use]
    pub fn is_end(&self) -> bool {
        self.current.is_none()
    }

    /// Moves to the next element in order, or to the end after the largest element.
    ///
    /// # Errors
    ///
    /// [`Error::PastTheEnd`] if the cursor is already at the end. The cursor does not move.
    ///
    /// # Complexity
    ///
    /// O(height) worst case, O(1) amortized over a full walk.
    pub fn move_next(&mut self) -> Result<(), Error> {
        let handle = self.current.ok_or(Error::PastTheEnd)?;
        self.current = successor(self.tree.raw.nodes(), handle);
        Ok(())
    }

    /// Moves to the previous element in order. From the end this is the largest element.
    ///
    /// # Errors
    ///
    /// [`Error::BeforeTheBeginning`] if the cursor is at the smallest element, or at the end of
    /// an empty tree. The cursor does not move.
    ///
    /// # Complexity
    ///
    /// O(height) worst case, O(1) amortized over a full walk.
    pub fn move_prev(&mut self) -> Result<(), Error> {
        let previous = match self.current {
            Some(handle) => predecessor(self.tree.raw.nodes(), handle),
            None => self.tree.raw.last(),
        };
        self.current = Some(previous.ok_or(Error::BeforeTheBeginning)?);
        Ok(())
    }

    /// Returns the cursor's position, which can outlive the borrow of the tree.
    #[must_use]
    pub fn position(&self) -> Position {
        Position {
            tree: self.tree.raw.id(),
            node: self.current.map(|handle| (handle, self.tree.raw.generation(handle))),
        }
    }
}

impl Position {
    /// Returns `true` if this is an end position.
    #[must_use]
    pub fn is_end(&self) -> bool {
        self.node.is_none()
    }
}

impl<T, C> Clone for Cursor<'_, T, C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, C> Copy for Cursor<'_, T, C> {}

impl<T, C> PartialEq for Cursor<'_, T, C> {
    fn eq(&self, other: &Self) -> bool {
        self.tree.raw.id() == other.tree.raw.id() && self.current == other.current
    }
}

impl<T, C> Eq for Cursor<'_, T, C> {}

impl<T: fmt::Debug, C> fmt::Debug for Cursor<'_, T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor").field("current", &self.current()).finish()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn walk_forward<T: Copy, C>(tree: &Bst<T, C>) -> Vec<T> {
        let mut values = Vec::new();
        let mut cursor = tree.begin();
        while let Some(value) = cursor.current() {
            values.push(*value);
            cursor.move_next().unwrap();
        }
        values
    }

    fn walk_backward<T: Copy, C>(tree: &Bst<T, C>) -> Vec<T> {
        let mut values = Vec::new();
        let mut cursor = tree.end();
        while cursor.move_prev().is_ok() {
            values.push(*cursor.current().unwrap());
        }
        values
    }

    #[test]
    fn walks_agree_with_iter() {
        let tree = Bst::from([5, 3, 8, 1, 4, 7, 9, 2, 6]);
        let forward = walk_forward(&tree);
        assert_eq!(forward, tree.iter().copied().collect::<Vec<_>>());

        let mut backward = walk_backward(&tree);
        backward.reverse();
        assert_eq!(backward, forward);
    }

    #[test]
    fn failed_moves_leave_cursor_in_place() {
        let tree = Bst::from([2, 1, 3]);

        let mut begin = tree.begin();
        assert_eq!(begin.move_prev(), Err(Error::BeforeTheBeginning));
        assert_eq!(begin, tree.begin());

        let mut end = tree.end();
        assert_eq!(end.move_next(), Err(Error::PastTheEnd));
        assert!(end.is_end());
        assert_eq!(end.get(), Err(Error::PastTheEnd));
    }

    #[test]
    fn empty_tree_begin_is_end() {
        let tree: Bst<i32> = Bst::new();
        let mut cursor = tree.begin();
        assert_eq!(cursor, tree.end());
        assert_eq!(cursor.move_prev(), Err(Error::BeforeTheBeginning));
        assert_eq!(cursor.move_next(), Err(Error::PastTheEnd));
    }

    #[test]
    fn cursors_of_equal_trees_differ() {
        let a = Bst::from([1, 2]);
        let b = a.clone();
        assert_eq!(a, b);
        assert_ne!(a.begin(), b.begin());
        assert_ne!(a.end(), b.end());
        assert_eq!(a.begin(), a.find(&1));
    }

    #[test]
    fn position_round_trip() {
        let tree = Bst::from([2, 1, 3]);
        let cursor = tree.find(&3);
        let position = cursor.position();
        assert!(!position.is_end());
        assert_eq!(tree.cursor(position), Ok(cursor));
        assert!(tree.end().position().is_end());
    }
}
