/// An ordering rule for the elements of a [`Bst`](crate::Bst).
///
/// `less(a, b)` must be a strict weak ordering: irreflexive, transitive, and consistent, so that
/// two elements are *equivalent* when neither is less than the other. The tree treats
/// equivalent elements as duplicates.
///
/// Closures `Fn(&T, &T) -> bool` are ordering rules too.
///
/// # Examples
///
/// ```
/// use linked_bst::Bst;
///
/// // Order strings by length only; "bb" and "cc" are then equivalent.
/// let mut tree = Bst::with_comparator(|a: &&str, b: &&str| a.len() < b.len());
/// assert!(tree.insert("bb"));
/// assert!(tree.insert("a"));
/// assert!(!tree.insert("cc"));
/// assert_eq!(tree.iter().copied().collect::<Vec<_>>(), ["a", "bb"]);
/// ```
pub trait Compare<T: ?Sized> {
    /// Returns `true` if `a` orders strictly before `b`.
    fn less(&self, a: &T, b: &T) -> bool;
}

/// The natural ascending order given by [`Ord`]. This is the default ordering rule.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct Natural;

/// The reverse of the natural order, so trees iterate from largest to smallest.
///
/// # Examples
///
/// ```
/// use linked_bst::{Bst, Reverse};
///
/// let tree: Bst<i32, Reverse> = [1, 3, 2].into_iter().collect();
/// assert_eq!(tree.iter().copied().collect::<Vec<_>>(), [3, 2, 1]);
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct Reverse;

impl<T: Ord + ?Sized> Compare<T> for Natural {
    #[inline]
    fn less(&self, a: &T, b: &T) -> bool {
        a < b
    }
}

impl<T: Ord + ?Sized> Compare<T> for Reverse {
    #[inline]
    fn less(&self, a: &T, b: &T) -> bool {
        b < a
    }
}

impl<T: ?Sized, F> Compare<T> for F
where
    F: Fn(&T, &T) -> bool,
{
    #[inline]
    fn less(&self, a: &T, b: &T) -> bool {
        self(a, b)
    }
}
