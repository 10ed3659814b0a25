//! A mutable BST ordered by a comparator. Nodes live in a generational arena owned by the tree;
//! links between nodes are arena indices so parents and children can point at each other without
//! reference counting.
//!
//! # Examples
//!
//! ```
//! use collection_bst::Tree;
//!
//! let mut tree: Tree<_> = [9, 8, 7, 6, 11, 12, 13, 2].into_iter().collect();
//! assert_eq!(tree.len(), 8);
//!
//! // Sorted iteration.
//! assert!(tree.in_order().copied().eq([2, 6, 7, 8, 9, 11, 12, 13]));
//!
//! // Removing a missing value is not an error.
//! assert!(!tree.remove(&1));
//! assert!(tree.remove(&7));
//! assert!(!tree.contains(&7));
//! assert_eq!(tree.len(), 7);
//! ```

use std::fmt;

use generational_arena::{Arena, Index};
use tracing::{debug, instrument, trace};

use compare::{natural, Compare, Natural};
use crate::error::{TreeError, TreeResult};
use crate::iter::{InOrder, PostOrder, PreOrder};
use crate::node::{Node, NodeHandle, NodeRef, TreeId};
use crate::util::Removal;

/// A Binary Search Tree holding unique elements ordered by the comparator `C`.
///
/// Elements that compare equal are considered the same element: inserting one replaces the
/// stored value in place. The tree does not rebalance itself so its height depends on insertion
/// order.
///
/// The comparator must be a total order. This isn't checked; an inconsistent comparator makes
/// lookups and traversal order unspecified.
pub struct Tree<T, C = Natural<T>> {
    pub(crate) nodes: Arena<Node<T>>,
    pub(crate) root: Option<Index>,
    pub(crate) count: usize,
    id: TreeId,
    comparator: C,
}

impl<T: Ord> Default for Tree<T, Natural<T>> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord> Tree<T, Natural<T>> {
    /// Generate a new, empty `Tree` ordered by `T`'s [`Ord`] implementation.
    pub fn new() -> Self {
        Self::with_comparator(natural())
    }
}

impl<T: Ord> FromIterator<T> for Tree<T, Natural<T>> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_iter_with(iter, natural())
    }
}

impl<T, C> Extend<T> for Tree<T, C>
where
    C: Compare<T>,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<T, C> Clone for Tree<T, C>
where
    T: Clone,
    C: Clone,
{
    /// Deep copies the tree. The copy is a different tree, so handles into `self` are not owned
    /// by it.
    fn clone(&self) -> Self {
        let id = TreeId::next();
        let mut nodes = self.nodes.clone();
        for (_, node) in nodes.iter_mut() {
            node.owner = Some(id);
        }
        Self {
            nodes,
            root: self.root,
            count: self.count,
            id,
            comparator: self.comparator.clone(),
        }
    }
}

impl<T: fmt::Debug, C> fmt::Debug for Tree<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.in_order()).finish()
    }
}

impl<T, C> Tree<T, C> {
    /// Generate a new, empty `Tree` ordered by `comparator`.
    ///
    /// # Examples
    ///
    /// ```
    /// use collection_bst::Tree;
    ///
    /// let mut tree = Tree::with_comparator(|a: &&str, b: &&str| a.len().cmp(&b.len()));
    /// tree.insert("ccc");
    /// tree.insert("a");
    ///
    /// // Same length means same element.
    /// tree.insert("bb");
    /// tree.insert("zz");
    ///
    /// assert_eq!(tree.len(), 3);
    /// assert_eq!(tree.get(&"xx"), Some(&"zz"));
    /// ```
    pub fn with_comparator(comparator: C) -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
            count: 0,
            id: TreeId::next(),
            comparator,
        }
    }

    /// Builds a tree ordered by `comparator` out of `iter`. Later elements replace earlier ones
    /// that compare equal.
    pub fn from_iter_with<I>(iter: I, comparator: C) -> Self
    where
        I: IntoIterator<Item = T>,
        C: Compare<T>,
    {
        let mut tree = Self::with_comparator(comparator);
        tree.extend(iter);
        tree
    }

    /// The number of elements in the tree.
    pub fn len(&self) -> usize {
        self.count
    }

    /// Whether the tree has no elements.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// The comparator ordering this tree.
    pub fn comparator(&self) -> &C {
        &self.comparator
    }

    /// A handle to the root node, if the tree isn't empty.
    pub fn root(&self) -> Option<NodeHandle> {
        self.root.map(|index| self.handle(index))
    }

    /// Returns a view of the node named by `handle`.
    ///
    /// # Errors
    ///
    /// [`TreeError::OwnershipMismatch`] if the handle came from another tree and
    /// [`TreeError::Detached`] if its node has been removed.
    pub fn node(&self, handle: NodeHandle) -> TreeResult<NodeRef<'_, T>> {
        self.check_owned(handle)?;
        NodeRef::new(handle, &self.nodes).ok_or(TreeError::Detached(handle))
    }

    /// The smallest element, according to the comparator.
    pub fn min(&self) -> Option<&T> {
        self.root.map(|root| &self.nodes[self.leftmost(root)].value)
    }

    /// The largest element, according to the comparator.
    pub fn max(&self) -> Option<&T> {
        self.root.map(|root| &self.nodes[self.rightmost(root)].value)
    }

    /// Iterates the elements visiting each node before its left and then right subtrees.
    pub fn pre_order(&self) -> PreOrder<'_, T, C> {
        PreOrder::new(self)
    }

    /// Iterates the elements in ascending order.
    pub fn in_order(&self) -> InOrder<'_, T, C> {
        InOrder::new(self)
    }

    /// Iterates the elements visiting each node after its left and then right subtrees.
    pub fn post_order(&self) -> PostOrder<'_, T, C> {
        PostOrder::new(self)
    }

    /// Removes every element at once. Handles to the removed nodes become stale.
    #[instrument(level = "trace", skip_all)]
    pub fn clear(&mut self) {
        debug!(count = self.count, "clearing tree");
        self.nodes.clear();
        self.root = None;
        self.count = 0;
    }

    /// Removes every element one node at a time, leaves first. The end state is the same as
    /// [`Tree::clear`] but every element goes through the same path as [`Tree::remove_node`].
    #[instrument(level = "trace", skip_all)]
    pub fn memberwise_clear(&mut self) {
        let mut walk = PostOrder::new(self);
        let mut order = Vec::with_capacity(self.count);
        while let Some(index) = walk.next_index() {
            order.push(index);
        }

        debug!(count = order.len(), "removing each node");
        for index in order {
            self.detach(index);
        }
        debug_assert!(self.root.is_none());
        debug_assert_eq!(self.count, 0);
    }

    /// Removes the node named by `handle`, returning `false` (and changing nothing) if the handle
    /// isn't owned by this tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use collection_bst::Tree;
    ///
    /// let mut tree: Tree<_> = [2, 1, 3].into_iter().collect();
    /// let mut other: Tree<_> = [2, 1, 3].into_iter().collect();
    ///
    /// let handle = tree.find(&1).unwrap();
    /// assert!(!other.remove_node(handle));
    /// assert_eq!(other.len(), 3);
    ///
    /// assert!(tree.remove_node(handle));
    /// assert!(!tree.remove_node(handle));
    /// assert_eq!(tree.len(), 2);
    /// ```
    pub fn remove_node(&mut self, handle: NodeHandle) -> bool {
        self.take_node(handle).is_ok()
    }

    /// Removes the node named by `handle` and returns its element.
    ///
    /// If the node has two children it stays in the tree holding its in-order predecessor's
    /// element, and the predecessor's node is the one detached. `handle` then still names a live
    /// node and the predecessor's handle becomes stale.
    ///
    /// # Errors
    ///
    /// The same as [`Tree::node`]. Nothing is modified on error.
    #[instrument(level = "trace", skip_all)]
    pub fn take_node(&mut self, handle: NodeHandle) -> TreeResult<T> {
        if let Err(err) = self.check_owned(handle) {
            debug!(%err, "rejecting node handle");
            return Err(err);
        }
        Ok(self.detach(handle.index))
    }

    fn handle(&self, index: Index) -> NodeHandle {
        NodeHandle {
            tree: self.id,
            index,
        }
    }

    fn check_owned(&self, handle: NodeHandle) -> TreeResult<()> {
        if handle.tree != self.id {
            return Err(TreeError::OwnershipMismatch(handle));
        }
        match self.nodes.get(handle.index) {
            Some(node) if node.owner == Some(self.id) => Ok(()),
            Some(_) => Err(TreeError::OwnershipMismatch(handle)),
            None => Err(TreeError::Detached(handle)),
        }
    }

    fn leftmost(&self, mut index: Index) -> Index {
        while let Some(left) = self.nodes[index].left {
            index = left;
        }
        index
    }

    fn rightmost(&self, mut index: Index) -> Index {
        while let Some(right) = self.nodes[index].right {
            index = right;
        }
        index
    }

    /// Takes the node at `index` out of the tree, returning the element it held.
    fn detach(&mut self, index: Index) -> T {
        let node = &self.nodes[index];
        let removal = match (node.left, node.right) {
            (None, None) => Removal::Leaf,
            (Some(_), None) | (None, Some(_)) => Removal::Splice,
            (Some(left), Some(_)) => Removal::Predecessor(self.rightmost(left)),
        };
        trace!(case = removal.name(), "detaching node");

        match removal {
            Removal::Leaf | Removal::Splice => self.splice_out(index),
            Removal::Predecessor(predecessor) => {
                // The predecessor has no right child, so it's at most a single-child splice.
                let value = self.splice_out(predecessor);
                std::mem::replace(&mut self.nodes[index].value, value)
            }
        }
    }

    /// Removes a node with at most one child, moving the child (if any) into its position.
    fn splice_out(&mut self, index: Index) -> T {
        let node = self
            .nodes
            .remove(index)
            .expect("splicing out a node that isn't in the arena");
        debug_assert!(node.child_count() <= 1, "splicing out a node with two children");

        let child = node.left.or(node.right);
        if let Some(child) = child {
            self.nodes[child].parent = node.parent;
        }
        match node.parent {
            Some(parent) => self.nodes[parent].replace_child(index, child),
            None => self.root = child,
        }
        self.count -= 1;

        node.value
    }
}

impl<T, C> Tree<T, C>
where
    C: Compare<T>,
{
    /// Inserts `value`. If an element comparing equal is already present its value is replaced
    /// in place and the size doesn't change. Returns the handle of the node holding `value`.
    ///
    /// # Examples
    ///
    /// ```
    /// use collection_bst::Tree;
    ///
    /// let mut tree = Tree::with_comparator(|a: &(u8, char), b: &(u8, char)| a.0.cmp(&b.0));
    ///
    /// let first = tree.insert((1, 'a'));
    /// let second = tree.insert((1, 'b'));
    ///
    /// assert_eq!(first, second);
    /// assert_eq!(tree.len(), 1);
    /// assert_eq!(tree.get(&(1, '?')), Some(&(1, 'b')));
    /// ```
    #[instrument(level = "trace", skip_all)]
    pub fn insert(&mut self, value: T) -> NodeHandle {
        let Some(mut cursor) = self.root else {
            let index = self.nodes.insert(Node::new(value, None, self.id));
            self.root = Some(index);
            self.count = 1;
            return self.handle(index);
        };

        loop {
            let node = &mut self.nodes[cursor];
            let ordering = self.comparator.compare(&value, &node.value);
            let next = match ordering {
                std::cmp::Ordering::Less => node.left,
                std::cmp::Ordering::Equal => {
                    node.value = value;
                    return self.handle(cursor);
                }
                std::cmp::Ordering::Greater => node.right,
            };

            match next {
                Some(child) => cursor = child,
                None => return self.attach(cursor, value, ordering.is_lt()),
            }
        }
    }

    /// Hangs a new leaf holding `value` under `parent`. The chosen side must be empty.
    fn attach(&mut self, parent: Index, value: T, goes_left: bool) -> NodeHandle {
        let index = self.nodes.insert(Node::new(value, Some(parent), self.id));
        let parent_node = &mut self.nodes[parent];
        if goes_left {
            debug_assert!(parent_node.left.is_none());
            parent_node.left = Some(index);
        } else {
            debug_assert!(parent_node.right.is_none());
            parent_node.right = Some(index);
        }
        self.count += 1;

        if cfg!(debug_assertions) {
            let parent_node = &self.nodes[parent];
            if let Some(left) = parent_node.left {
                assert!(self
                    .comparator
                    .compare(&self.nodes[left].value, &parent_node.value)
                    .is_lt());
            }
            if let Some(right) = parent_node.right {
                assert!(self
                    .comparator
                    .compare(&self.nodes[right].value, &parent_node.value)
                    .is_gt());
            }
        }

        self.handle(index)
    }

    fn find_index(&self, value: &T) -> Option<Index> {
        let mut cursor = self.root;
        while let Some(index) = cursor {
            let node = &self.nodes[index];
            cursor = match self.comparator.compare(value, &node.value) {
                std::cmp::Ordering::Less => node.left,
                std::cmp::Ordering::Equal => return Some(index),
                std::cmp::Ordering::Greater => node.right,
            };
        }
        None
    }

    /// Potentially finds the node holding an element equal to `value`. If no node matches,
    /// `None` is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use collection_bst::Tree;
    ///
    /// let tree: Tree<_> = [2, 1, 3].into_iter().collect();
    /// let handle = tree.find(&3).unwrap();
    ///
    /// assert_eq!(tree.node(handle).unwrap().value(), &3);
    /// assert_eq!(tree.find(&42), None);
    /// ```
    pub fn find(&self, value: &T) -> Option<NodeHandle> {
        self.find_index(value).map(|index| self.handle(index))
    }

    /// Returns the stored element equal to `value`, if any.
    pub fn get(&self, value: &T) -> Option<&T> {
        self.find_index(value).map(|index| &self.nodes[index].value)
    }

    /// Whether an element equal to `value` is in the tree.
    pub fn contains(&self, value: &T) -> bool {
        self.find_index(value).is_some()
    }

    /// Removes the element equal to `value`, returning whether there was one.
    pub fn remove(&mut self, value: &T) -> bool {
        self.take(value).is_some()
    }

    /// Removes the element equal to `value` and returns it. If the tree does not contain a
    /// matching element, nothing happens.
    ///
    /// # Examples
    ///
    /// ```
    /// use collection_bst::Tree;
    ///
    /// let mut tree: Tree<_> = ["b", "a", "c"].into_iter().collect();
    ///
    /// assert_eq!(tree.take(&"b"), Some("b"));
    /// assert_eq!(tree.take(&"b"), None);
    /// assert!(tree.in_order().eq(&["a", "c"]));
    /// ```
    #[instrument(level = "trace", skip_all)]
    pub fn take(&mut self, value: &T) -> Option<T> {
        let index = self.find_index(value)?;
        Some(self.detach(index))
    }
}

#[cfg(test)]
impl<T, C> Tree<T, C>
where
    C: Compare<T>,
{
    /// Walks the whole tree asserting that links, ownership, ordering and the count agree.
    pub(crate) fn assert_invariants(&self) {
        let mut reachable = 0;
        let mut stack: Vec<Index> = self.root.into_iter().collect();
        if let Some(root) = self.root {
            assert_eq!(self.nodes[root].parent, None, "root has a parent");
        }

        while let Some(index) = stack.pop() {
            reachable += 1;
            let node = &self.nodes[index];
            assert_eq!(node.owner, Some(self.id));
            for (child, expected) in [
                (node.left, std::cmp::Ordering::Less),
                (node.right, std::cmp::Ordering::Greater),
            ] {
                if let Some(child) = child {
                    let child_node = &self.nodes[child];
                    assert_eq!(child_node.parent, Some(index), "child's parent link is wrong");
                    assert_eq!(
                        self.comparator.compare(&child_node.value, &node.value),
                        expected
                    );
                    stack.push(child);
                }
            }
        }

        assert_eq!(reachable, self.count);
        assert_eq!(self.nodes.len(), self.count);

        let sorted: Vec<_> = self.in_order().collect();
        assert!(sorted
            .windows(2)
            .all(|pair| self.comparator.compare(pair[0], pair[1]).is_lt()));
    }
}
