use smallvec::SmallVec;
use tracing::trace;

use super::arena::Arena;
use super::handle::Handle;
use super::node::{self, Node, Side};
use super::tree_id::TreeId;
use crate::compare::Compare;
use crate::error::Error;

/// The unbalanced binary search tree backing `Bst`.
pub(crate) struct RawBst<T, C> {
    /// Arena owning every node; links between nodes are handles into it.
    nodes: Arena<Node<T>>,
    /// Handle to the root node, if the tree is non-empty.
    root: Option<Handle>,
    /// Number of nodes reachable from `root`.
    len: usize,
    /// The ordering rule.
    compare: C,
    /// Identity handed out to positions into this tree.
    id: TreeId,
}

/// Result of descending the tree for a value.
pub(crate) enum SearchResult {
    /// An equivalent value lives at this node.
    Found(Handle),
    /// No equivalent value; a new node would hang from this parent slot (`None` for an empty
    /// tree).
    Vacant(Option<(Handle, Side)>),
}

/// Explicit stack for whole-tree walks, so deep (degenerate) trees cannot exhaust the call stack.
type WorkList = SmallVec<[Handle; 32]>;

impl<T, C> RawBst<T, C> {
    /// Creates a new, empty tree ordered by `compare`.
    pub(crate) fn new(compare: C) -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
            len: 0,
            compare,
            id: TreeId::next(),
        }
    }

    /// Creates a new, empty tree with room for `capacity` nodes.
    pub(crate) fn with_capacity(capacity: usize, compare: C) -> Self {
        Self {
            nodes: Arena::with_capacity(capacity),
            root: None,
            len: 0,
            compare,
            id: TreeId::next(),
        }
    }

    /// Returns the number of elements in the tree.
    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    /// Returns the number of nodes the tree can hold without reallocating.
    pub(crate) fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    pub(crate) const fn compare(&self) -> &C {
        &self.compare
    }

    pub(crate) const fn id(&self) -> TreeId {
        self.id
    }

    pub(crate) fn nodes(&self) -> &Arena<Node<T>> {
        &self.nodes
    }

    /// Returns the value stored at `handle`.
    pub(crate) fn value(&self, handle: Handle) -> &T {
        &self.nodes.get(handle).value
    }

    pub(crate) fn generation(&self, handle: Handle) -> u32 {
        self.nodes.generation(handle)
    }

    /// Returns `true` if `handle` still holds the node it held at `generation`.
    pub(crate) fn is_live(&self, handle: Handle, generation: u32) -> bool {
        self.nodes.is_live(handle, generation)
    }

    /// Handle of the minimum element.
    pub(crate) fn first(&self) -> Option<Handle> {
        self.root.map(|root| node::leftmost(&self.nodes, root))
    }

    /// Handle of the maximum element.
    pub(crate) fn last(&self) -> Option<Handle> {
        self.root.map(|root| node::rightmost(&self.nodes, root))
    }

    /// Drops every node. Positions taken before the call no longer match this tree.
    pub(crate) fn clear(&mut self) {
        trace!(len = self.len, "clearing tree");
        // The arena is a flat vector, so this drops nodes iteratively however deep the tree is.
        self.nodes.clear();
        self.root = None;
        self.len = 0;
        self.id = TreeId::next();
    }

    /// Removes the node at `handle` and returns its value.
    ///
    /// A node with two children keeps its slot: it takes over the value of its in-order
    /// successor, whose own slot is freed instead.
    pub(crate) fn erase(&mut self, handle: Handle) -> T {
        let node = self.nodes.get(handle);
        let value = match (node.left, node.right) {
            (Some(_), Some(right)) => {
                let successor = node::leftmost(&self.nodes, right);
                trace!(
                    node = handle.to_index(),
                    successor = successor.to_index(),
                    "replacing with in-order successor"
                );
                self.splice(successor);
                let successor = self.nodes.take(successor);
                // The element named by positions at `handle` is gone even though the slot stays.
                self.nodes.renew(handle);
                core::mem::replace(&mut self.nodes.get_mut(handle).value, successor.value)
            }
            _ => {
                let replacement = self.splice(handle);
                trace!(node = handle.to_index(), ?replacement, "spliced out");
                self.nodes.take(handle).value
            }
        };
        self.len -= 1;
        debug_assert_eq!(self.nodes.len(), self.len);
        debug_assert_eq!(self.nodes.is_empty(), self.root.is_none());
        value
    }

    /// Detaches `handle`, which has at most one child, and hangs that child from the detached
    /// node's former parent (or makes it the root). The detached node stays allocated.
    fn splice(&mut self, handle: Handle) -> Option<Handle> {
        let replacement = self.nodes.get(handle).sole_child();
        let position = node::side_of(&self.nodes, handle);

        if let Some(child) = replacement {
            self.nodes.get_mut(child).parent = position.map(|(parent, _)| parent);
        }
        match position {
            Some((parent, side)) => self.nodes.get_mut(parent).set_child(side, replacement),
            None => self.root = replacement,
        }

        let detached = self.nodes.get_mut(handle);
        detached.parent = None;
        detached.set_child(Side::Left, None);
        detached.set_child(Side::Right, None);
        replacement
    }

    /// Finds the first node, in order, whose value equals `value`.
    ///
    /// This ignores the ordering and visits every node, so it is O(n).
    pub(crate) fn find_linear(&self, value: &T) -> Option<Handle>
    where
        T: PartialEq,
    {
        let mut current = self.first();
        while let Some(handle) = current {
            if self.nodes.get(handle).value == *value {
                return Some(handle);
            }
            current = node::successor(&self.nodes, handle);
        }
        None
    }
}

impl<T, C: Compare<T>> RawBst<T, C> {
    /// Descends from the root the way insertion does.
    pub(crate) fn search(&self, value: &T) -> SearchResult {
        let Some(mut current) = self.root else {
            return SearchResult::Vacant(None);
        };

        loop {
            let node = self.nodes.get(current);
            let side = if self.compare.less(&node.value, value) {
                Side::Right
            } else if self.compare.less(value, &node.value) {
                Side::Left
            } else {
                return SearchResult::Found(current);
            };

            match node.child(side) {
                Some(child) => current = child,
                None => return SearchResult::Vacant(Some((current, side))),
            }
        }
    }

    /// Returns the node holding a value equivalent to `value`.
    pub(crate) fn find(&self, value: &T) -> Option<Handle> {
        match self.search(value) {
            SearchResult::Found(handle) => Some(handle),
            SearchResult::Vacant(_) => None,
        }
    }

    /// Inserts `value` unless an equivalent value is present, in which case `value` is dropped
    /// and the tree is untouched. Returns the new node.
    pub(crate) fn insert(&mut self, value: T) -> Option<Handle> {
        match self.search(&value) {
            SearchResult::Found(existing) => {
                trace!(existing = existing.to_index(), "duplicate rejected");
                None
            }
            SearchResult::Vacant(slot) => Some(self.link(value, slot)),
        }
    }

    /// Like [`insert`](Self::insert), but reports a full arena or a failed allocation instead
    /// of panicking. The tree is untouched when an error is returned.
    pub(crate) fn try_insert(&mut self, value: T) -> Result<Option<Handle>, Error> {
        match self.search(&value) {
            SearchResult::Found(existing) => {
                trace!(existing = existing.to_index(), "duplicate rejected");
                Ok(None)
            }
            SearchResult::Vacant(slot) => {
                self.nodes.try_reserve_one()?;
                Ok(Some(self.link(value, slot)))
            }
        }
    }

    /// Allocates a leaf for `value` and hangs it from `slot`.
    fn link(&mut self, value: T, slot: Option<(Handle, Side)>) -> Handle {
        let handle = self.nodes.alloc(Node::new(value, slot.map(|(parent, _)| parent)));
        match slot {
            Some((parent, side)) => self.nodes.get_mut(parent).set_child(side, Some(handle)),
            None => {
                debug_assert!(self.root.is_none());
                trace!(root = handle.to_index(), "tree was empty, new root");
                self.root = Some(handle);
            }
        }
        self.len += 1;
        debug_assert_eq!(self.nodes.len(), self.len);
        handle
    }
}

impl<T: Clone, C: Compare<T> + Clone> Clone for RawBst<T, C> {
    /// Copies the tree by inserting its values in pre-order, which rebuilds the same shape.
    fn clone(&self) -> Self {
        let mut tree = Self::with_capacity(self.len, self.compare.clone());
        let mut pending: WorkList = self.root.into_iter().collect();

        while let Some(handle) = pending.pop() {
            let node = self.nodes.get(handle);
            tree.insert(node.value.clone());
            // Right goes on the stack first so the left subtree is copied first.
            pending.extend(node.right);
            pending.extend(node.left);
        }

        debug_assert_eq!(tree.len, self.len);
        tree
    }
}

#[cfg(test)]
impl<T, C: Compare<T>> RawBst<T, C> {
    /// Walks the whole tree, panicking on a broken link, ordering or count. Returns the height.
    pub(crate) fn check_invariants(&self) -> usize {
        use alloc::vec::Vec;

        if let Some(root) = self.root {
            assert_eq!(self.nodes.get(root).parent, None, "root has a parent");
        }

        let mut count = 0;
        let mut height = 0;
        let mut pending: Vec<(Handle, usize)> = self.root.map(|root| (root, 1)).into_iter().collect();
        while let Some((handle, depth)) = pending.pop() {
            count += 1;
            height = height.max(depth);
            let node = self.nodes.get(handle);
            for child in [node.left, node.right].into_iter().flatten() {
                assert_eq!(self.nodes.get(child).parent, Some(handle), "child does not point back to parent");
                pending.push((child, depth + 1));
            }
        }
        assert_eq!(count, self.len, "len does not match reachable nodes");
        assert_eq!(self.nodes.len(), self.len, "arena holds unreachable nodes");

        let mut previous = None;
        let mut current = self.first();
        while let Some(handle) = current {
            if let Some(previous) = previous {
                assert!(
                    self.compare.less(self.value(previous), self.value(handle)),
                    "in-order walk is not strictly ascending"
                );
            }
            previous = current;
            current = node::successor(&self.nodes, handle);
        }

        height
    }

    fn shape(&self) -> alloc::vec::Vec<(usize, Option<usize>, Option<usize>)>
    where
        T: Copy + Into<usize>,
    {
        let mut shape = alloc::vec::Vec::new();
        let mut current = self.first();
        while let Some(handle) = current {
            let node = self.nodes.get(handle);
            shape.push((
                node.value.into(),
                node.left.map(|h| self.nodes.get(h).value.into()),
                node.right.map(|h| self.nodes.get(h).value.into()),
            ));
            current = node::successor(&self.nodes, handle);
        }
        shape
    }
}
