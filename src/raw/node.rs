use super::arena::Arena;
use super::handle::Handle;

/// Which child slot of a parent a node hangs from.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Side {
    Left,
    Right,
}

/// A tree node. The arena owns every node; the links below only name other slots.
pub(crate) struct Node<T> {
    pub(crate) value: T,
    pub(crate) left: Option<Handle>,
    pub(crate) right: Option<Handle>,
    pub(crate) parent: Option<Handle>,
}

impl<T> Node<T> {
    /// Creates a detached leaf hanging from `parent`.
    pub(crate) fn new(value: T, parent: Option<Handle>) -> Self {
        Self {
            value,
            left: None,
            right: None,
            parent,
        }
    }

    #[inline]
    pub(crate) fn child(&self, side: Side) -> Option<Handle> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    #[inline]
    pub(crate) fn set_child(&mut self, side: Side, child: Option<Handle>) {
        match side {
            Side::Left => self.left = child,
            Side::Right => self.right = child,
        }
    }

    /// Returns the only child of a node that has at most one, or `None` for a leaf.
    ///
    /// # Panics
    ///
    /// Panics if both children are present.
    pub(crate) fn sole_child(&self) -> Option<Handle> {
        match (self.left, self.right) {
            (Some(_), Some(_)) => panic!("`Node::sole_child()` - node has two children!"),
            (left, None) => left,
            (None, right) => right,
        }
    }
}

/// Follows left links from `handle` down to the minimum of its subtree.
pub(crate) fn leftmost<T>(nodes: &Arena<Node<T>>, mut handle: Handle) -> Handle {
    while let Some(left) = nodes.get(handle).left {
        handle = left;
    }
    handle
}

/// Follows right links from `handle` down to the maximum of its subtree.
pub(crate) fn rightmost<T>(nodes: &Arena<Node<T>>, mut handle: Handle) -> Handle {
    while let Some(right) = nodes.get(handle).right {
        handle = right;
    }
    handle
}

/// Returns the side of its parent that `handle` hangs from, or `None` for the root.
pub(crate) fn side_of<T>(nodes: &Arena<Node<T>>, handle: Handle) -> Option<(Handle, Side)> {
    let parent = nodes.get(handle).parent?;
    let side = if nodes.get(parent).left == Some(handle) { Side::Left } else { Side::Right };
    Some((parent, side))
}

/// In-order successor of `handle`, or `None` if it holds the maximum.
pub(crate) fn successor<T>(nodes: &Arena<Node<T>>, handle: Handle) -> Option<Handle> {
    if let Some(right) = nodes.get(handle).right {
        return Some(leftmost(nodes, right));
    }
    // Climb while we are a right child; the first ancestor reached from the left is next.
    let mut current = handle;
    loop {
        match side_of(nodes, current)? {
            (parent, Side::Left) => return Some(parent),
            (parent, Side::Right) => current = parent,
        }
    }
}

/// In-order predecessor of `handle`, or `None` if it holds the minimum.
pub(crate) fn predecessor<T>(nodes: &Arena<Node<T>>, handle: Handle) -> Option<Handle> {
    if let Some(left) = nodes.get(handle).left {
        return Some(rightmost(nodes, left));
    }
    let mut current = handle;
    loop {
        match side_of(nodes, current)? {
            (parent, Side::Right) => return Some(parent),
            (parent, Side::Left) => current = parent,
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    /// Builds
    /// ```text
    ///        5
    ///      /   \
    ///     3     8
    ///    / \   / \
    ///   1   4 7   9
    /// ```
    /// by hand and returns the arena with handles in in-order position.
    fn sample() -> (Arena<Node<i32>>, [Handle; 7]) {
        let mut nodes = Arena::new();
        let five = nodes.alloc(Node::new(5, None));
        let three = nodes.alloc(Node::new(3, Some(five)));
        let eight = nodes.alloc(Node::new(8, Some(five)));
        let one = nodes.alloc(Node::new(1, Some(three)));
        let four = nodes.alloc(Node::new(4, Some(three)));
        let seven = nodes.alloc(Node::new(7, Some(eight)));
        let nine = nodes.alloc(Node::new(9, Some(eight)));

        nodes.get_mut(five).set_child(Side::Left, Some(three));
        nodes.get_mut(five).set_child(Side::Right, Some(eight));
        nodes.get_mut(three).set_child(Side::Left, Some(one));
        nodes.get_mut(three).set_child(Side::Right, Some(four));
        nodes.get_mut(eight).set_child(Side::Left, Some(seven));
        nodes.get_mut(eight).set_child(Side::Right, Some(nine));

        (nodes, [one, three, four, five, seven, eight, nine])
    }

    #[test]
    fn extremes() {
        let (nodes, order) = sample();
        assert_eq!(leftmost(&nodes, order[3]), order[0]);
        assert_eq!(rightmost(&nodes, order[3]), order[6]);
        assert_eq!(leftmost(&nodes, order[5]), order[4]);
        assert_eq!(rightmost(&nodes, order[0]), order[0]);
    }

    #[test]
    fn successor_walks_in_order() {
        let (nodes, order) = sample();
        for pair in order.windows(2) {
            assert_eq!(successor(&nodes, pair[0]), Some(pair[1]));
        }
        assert_eq!(successor(&nodes, order[6]), None);
    }

    #[test]
    fn predecessor_walks_in_reverse_order() {
        let (nodes, order) = sample();
        for pair in order.windows(2) {
            assert_eq!(predecessor(&nodes, pair[1]), Some(pair[0]));
        }
        assert_eq!(predecessor(&nodes, order[0]), None);
    }

    #[test]
    fn side_of_reports_parent_slot() {
        let (nodes, order) = sample();
        assert_eq!(side_of(&nodes, order[3]), None);
        assert_eq!(side_of(&nodes, order[1]), Some((order[3], Side::Left)));
        assert_eq!(side_of(&nodes, order[6]), Some((order[5], Side::Right)));
        assert_eq!(nodes.get(order[5]).child(Side::Left), Some(order[4]));
    }

    #[test]
    fn sole_child() {
        let (mut nodes, order) = sample();
        assert_eq!(nodes.get(order[0]).sole_child(), None);
        nodes.get_mut(order[5]).set_child(Side::Left, None);
        assert_eq!(nodes.get(order[5]).sole_child(), Some(order[6]));
    }

    #[test]
    #[should_panic(expected = "`Node::sole_child()` - node has two children!")]
    fn sole_child_of_full_node_panics() {
        let (nodes, order) = sample();
        let _ = nodes.get(order[3]).sole_child();
    }
}
