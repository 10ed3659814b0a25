//! The depth-first traversals of a [`Tree`].
//!
//! Each iterator is a lazy walk over the live tree using an explicit stack, so deep (unbalanced)
//! trees don't recurse. Iterators borrow the tree which means it can't be modified until they're
//! dropped. Calling the traversal method again starts a fresh walk.

use std::iter::FusedIterator;

use generational_arena::Index;

use crate::Tree;

/// Visits each node, then its left subtree, then its right subtree. See
/// [`Tree::pre_order`].
pub struct PreOrder<'a, T, C> {
    tree: &'a Tree<T, C>,
    stack: Vec<Index>,
    remaining: usize,
}

impl<'a, T, C> PreOrder<'a, T, C> {
    pub(crate) fn new(tree: &'a Tree<T, C>) -> Self {
        Self {
            tree,
            stack: tree.root.into_iter().collect(),
            remaining: tree.count,
        }
    }
}

impl<'a, T, C> Iterator for PreOrder<'a, T, C> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.tree.nodes.get(self.stack.pop()?)?;
        // Right first so the left subtree is popped first.
        self.stack.extend(node.right);
        self.stack.extend(node.left);
        self.remaining -= 1;
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

/// Visits each node's left subtree, then the node, then its right subtree. This yields elements in
/// ascending order. See [`Tree::in_order`].
pub struct InOrder<'a, T, C> {
    tree: &'a Tree<T, C>,
    /// The left spine of the subtree currently being walked. The top of the stack is the next node
    /// to yield.
    stack: Vec<Index>,
    remaining: usize,
}

impl<'a, T, C> InOrder<'a, T, C> {
    pub(crate) fn new(tree: &'a Tree<T, C>) -> Self {
        let mut iter = Self {
            tree,
            stack: Vec::new(),
            remaining: tree.count,
        };
        iter.push_left_spine(tree.root);
        iter
    }

    fn push_left_spine(&mut self, mut cursor: Option<Index>) {
        while let Some(index) = cursor {
            self.stack.push(index);
            cursor = self.tree.nodes.get(index).and_then(|node| node.left);
        }
    }
}

impl<'a, T, C> Iterator for InOrder<'a, T, C> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.tree.nodes.get(self.stack.pop()?)?;
        self.push_left_spine(node.right);
        self.remaining -= 1;
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

/// Visits each node's left subtree, then its right subtree, then the node. See
/// [`Tree::post_order`].
pub struct PostOrder<'a, T, C> {
    tree: &'a Tree<T, C>,
    /// Nodes paired with whether their children have already been pushed.
    stack: Vec<(Index, bool)>,
    remaining: usize,
}

impl<'a, T, C> PostOrder<'a, T, C> {
    pub(crate) fn new(tree: &'a Tree<T, C>) -> Self {
        Self {
            tree,
            stack: tree.root.map(|root| (root, false)).into_iter().collect(),
            remaining: tree.count,
        }
    }

    /// Like `next` but yields the arena index of the node.
    pub(crate) fn next_index(&mut self) -> Option<Index> {
        while let Some((index, expanded)) = self.stack.pop() {
            if expanded {
                self.remaining -= 1;
                return Some(index);
            }
            let node = self.tree.nodes.get(index)?;
            self.stack.push((index, true));
            self.stack.extend(node.right.map(|right| (right, false)));
            self.stack.extend(node.left.map(|left| (left, false)));
        }
        None
    }
}

impl<'a, T, C> Iterator for PostOrder<'a, T, C> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.next_index()?;
        self.tree.nodes.get(index).map(|node| &node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T, C> ExactSizeIterator for PreOrder<'_, T, C> {}
impl<T, C> ExactSizeIterator for InOrder<'_, T, C> {}
impl<T, C> ExactSizeIterator for PostOrder<'_, T, C> {}

impl<T, C> FusedIterator for PreOrder<'_, T, C> {}
impl<T, C> FusedIterator for InOrder<'_, T, C> {}
impl<T, C> FusedIterator for PostOrder<'_, T, C> {}

impl<'a, T, C> IntoIterator for &'a Tree<T, C> {
    type Item = &'a T;
    type IntoIter = InOrder<'a, T, C>;

    fn into_iter(self) -> Self::IntoIter {
        self.in_order()
    }
}
