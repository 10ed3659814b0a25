//! This crate exposes a Binary Search Tree (BST) ordered by a pluggable comparator.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored records. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` will typically store
//! some sort of value (the value that was inserted, for example) and will
//! sometimes have child `Node`s. The most important invariants of a BST are:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have a
//!    value less than its own value.
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have a
//!    value greater than its own value.
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! "Less" and "greater" here are decided by the tree's [comparator][compare::Compare]. By default
//! that is the element's [`Ord`] implementation ([`compare::Natural`]) but any total order works,
//! e.g. ordering records by one field or reversing the natural order. Closures of the form
//! `Fn(&T, &T) -> Ordering` are comparators too. Two elements that compare equal are the same
//! element as far as the tree is concerned, so inserting the second replaces the first.
//!
//! Searching for values in the tree takes `O(height)` (where `height` is defined as the longest
//! path from the root `Node` to a leaf `Node`). This tree doesn't rebalance so the height is
//! whatever the insertion order makes it. BSTs also naturally support sorted iteration by visiting
//! the left subtree, then the subtree root, then the right subtree. See [`Tree::in_order`] along
//! with [`Tree::pre_order`] and [`Tree::post_order`].
//!
//! ## Nodes
//!
//! Individual nodes can be named with a [`NodeHandle`] (returned by [`Tree::insert`] and
//! [`Tree::find`]) and inspected with [`Tree::node`] or removed with [`Tree::remove_node`]. A
//! handle belongs to the tree that produced it; other trees reject it.
//!
//! # Examples
//!
//! ```
//! use collection_bst::compare::{natural, Compare};
//! use collection_bst::Tree;
//!
//! let items = [9, 8, 7, 6, 11, 12, 13, 2];
//!
//! let tree: Tree<_> = items.into_iter().collect();
//! assert!(tree.pre_order().copied().eq([9, 8, 7, 6, 2, 11, 12, 13]));
//! assert!(tree.in_order().copied().eq([2, 6, 7, 8, 9, 11, 12, 13]));
//! assert!(tree.post_order().copied().eq([2, 6, 7, 8, 13, 12, 11, 9]));
//!
//! let reversed = Tree::from_iter_with(items, natural().rev());
//! assert!(reversed.in_order().copied().eq([13, 12, 11, 9, 8, 7, 6, 2]));
//! ```
//!
//! ## Logging
//!
//! Mutating operations emit [`tracing`] spans and events at `trace`/`debug` level. The crate
//! never installs a subscriber.

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

pub mod error;
pub mod iter;
pub mod node;
pub mod tree;
mod util;

#[cfg(test)]
mod test;

pub use compare;
pub use error::{TreeError, TreeResult};
pub use node::{NodeHandle, NodeRef};
pub use tree::Tree;
