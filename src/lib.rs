//! An unbalanced binary search tree with parent-linked, bidirectional cursors.
//!
//! This crate provides [`Bst`], an ordered set that keeps every element in its own tree node.
//! Each node links to its children and to its parent, so the tree can be walked in either
//! direction from any element without a stack:
//!
//! - [`begin`](Bst::begin) / [`end`](Bst::end) - cursors at the smallest element and one past
//!   the largest
//! - [`Cursor::move_next`] / [`Cursor::move_prev`] - step to the in-order successor or
//!   predecessor
//! - [`Bst::erase`] - remove the element at a cursor's [`Position`]
//!
//! # Example
//!
//! ```
//! use linked_bst::Bst;
//!
//! let mut tree = Bst::new();
//! for value in [5, 3, 8, 1, 4, 7, 9] {
//!     tree.insert(value);
//! }
//!
//! // Duplicates are rejected.
//! assert!(!tree.insert(4));
//! assert_eq!(tree.len(), 7);
//!
//! // In-order traversal is sorted.
//! assert_eq!(tree.iter().copied().collect::<Vec<_>>(), [1, 3, 4, 5, 7, 8, 9]);
//!
//! // Erasing a node with two children keeps the order intact.
//! let root = tree.find(&5).position();
//! tree.erase(root).unwrap();
//! assert_eq!(tree.iter().copied().collect::<Vec<_>>(), [1, 3, 4, 7, 8, 9]);
//! ```
//!
//! # Ordering
//!
//! Elements are ordered by a [`Compare`] rule, [`Natural`] by default. Any strict weak ordering
//! works, including closures; elements equivalent under the rule are duplicates.
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`
//! - **No unsafe code** - Nodes live in an arena and link to each other by index
//! - **Checked positions** - Erasing through a position from another tree, or one whose element
//!   is already gone, is reported as an [`Error`] and changes nothing
//!
//! # Implementation
//!
//! The tree is not rebalanced: each operation costs O(height). Removing an element with two
//! children moves its in-order successor's value into its node and unlinks the successor's node
//! instead. Structural changes are reported as `tracing` events at the `TRACE` level.

#![no_std]
// These forbid rules and lint groups are meant to be very restrictive.
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;

mod compare;
mod error;
mod raw;

pub mod bst;

pub use bst::{Bst, Cursor, Position};
pub use compare::{Compare, Natural, Reverse};
pub use error::Error;
