//! Nodes and the handles that name them.
//!
//! Nodes live in their tree's arena. Children are reached through arena indices owned by the
//! parent, and the back-references (`parent`, `owner`) are plain indices/identifiers, so nothing
//! here is reference counted and there are no cycles to leak.

use std::sync::atomic::{AtomicU64, Ordering};

use generational_arena::{Arena, Index};

/// Identifies one [`Tree`][crate::Tree] instance for the lifetime of the process.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) struct TreeId(u64);

impl TreeId {
    pub(crate) fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(0);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// A reference to a node inside a particular [`Tree`][crate::Tree].
///
/// Handles are `Copy` and never keep the node alive. A handle only resolves in the tree that
/// created it and only while its node is still in that tree; removing the node (or clearing the
/// tree) leaves the handle stale.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct NodeHandle {
    pub(crate) tree: TreeId,
    pub(crate) index: Index,
}

#[derive(Clone)]
pub(crate) struct Node<T> {
    pub(crate) value: T,
    pub(crate) left: Option<Index>,
    pub(crate) right: Option<Index>,
    pub(crate) parent: Option<Index>,
    /// Always `Some` while the node is in an arena. Removing a node consumes it, so a detached
    /// node is never observable.
    pub(crate) owner: Option<TreeId>,
}

impl<T> Node<T> {
    pub(crate) fn new(value: T, parent: Option<Index>, owner: TreeId) -> Self {
        Self {
            value,
            left: None,
            right: None,
            parent,
            owner: Some(owner),
        }
    }

    pub(crate) fn child_count(&self) -> usize {
        usize::from(self.left.is_some()) + usize::from(self.right.is_some())
    }

    /// Replaces the link to `old` with `new`. `old` must be one of this node's children.
    pub(crate) fn replace_child(&mut self, old: Index, new: Option<Index>) {
        if self.left == Some(old) {
            self.left = new;
        } else {
            debug_assert_eq!(self.right, Some(old), "replacing a node that isn't a child");
            self.right = new;
        }
    }
}

/// A read-only view of a node, see [`Tree::node`][crate::Tree::node].
///
/// The view borrows the tree so the structure can't change while it is held.
///
/// # Examples
///
/// ```
/// use collection_bst::Tree;
///
/// let tree: Tree<_> = [5, 3, 8].into_iter().collect();
/// let root = tree.node(tree.root().unwrap()).unwrap();
///
/// assert_eq!(root.value(), &5);
/// assert!(root.is_root());
/// assert_eq!(root.child_count(), 2);
///
/// let left = tree.node(root.left().unwrap()).unwrap();
/// assert_eq!(left.value(), &3);
/// assert!(left.is_leaf());
/// assert!(left.is_left_child());
/// assert_eq!(left.parent(), Some(root.handle()));
/// ```
pub struct NodeRef<'a, T> {
    handle: NodeHandle,
    node: &'a Node<T>,
    nodes: &'a Arena<Node<T>>,
}

impl<T> Clone for NodeRef<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<T> Copy for NodeRef<'_, T> {}

impl<'a, T> NodeRef<'a, T> {
    pub(crate) fn new(handle: NodeHandle, nodes: &'a Arena<Node<T>>) -> Option<Self> {
        let node = nodes.get(handle.index)?;
        Some(Self {
            handle,
            node,
            nodes,
        })
    }

    fn sibling_handle(&self, index: Option<Index>) -> Option<NodeHandle> {
        index.map(|index| NodeHandle {
            tree: self.handle.tree,
            index,
        })
    }

    /// The element stored in this node.
    pub fn value(&self) -> &'a T {
        &self.node.value
    }

    /// The handle naming this node.
    pub fn handle(&self) -> NodeHandle {
        self.handle
    }

    /// The structural parent, `None` for the root.
    pub fn parent(&self) -> Option<NodeHandle> {
        self.sibling_handle(self.node.parent)
    }

    /// The left child, if any.
    pub fn left(&self) -> Option<NodeHandle> {
        self.sibling_handle(self.node.left)
    }

    /// The right child, if any.
    pub fn right(&self) -> Option<NodeHandle> {
        self.sibling_handle(self.node.right)
    }

    /// Number of children, between 0 and 2.
    pub fn child_count(&self) -> usize {
        self.node.child_count()
    }

    /// Whether the node has no children.
    pub fn is_leaf(&self) -> bool {
        self.child_count() == 0
    }

    /// Whether the node has at least one child.
    pub fn is_internal(&self) -> bool {
        self.child_count() > 0
    }

    /// Whether the node is the root of its tree.
    pub fn is_root(&self) -> bool {
        self.node.parent.is_none()
    }

    /// Whether the node has a left child.
    pub fn has_left_child(&self) -> bool {
        self.node.left.is_some()
    }

    /// Whether the node has a right child.
    pub fn has_right_child(&self) -> bool {
        self.node.right.is_some()
    }

    /// Whether the node is its parent's left child.
    pub fn is_left_child(&self) -> bool {
        self.node
            .parent
            .and_then(|parent| self.nodes.get(parent))
            .map_or(false, |parent| parent.left == Some(self.handle.index))
    }

    /// Whether the node is its parent's right child.
    pub fn is_right_child(&self) -> bool {
        self.node
            .parent
            .and_then(|parent| self.nodes.get(parent))
            .map_or(false, |parent| parent.right == Some(self.handle.index))
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for NodeRef<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeRef")
            .field("value", &self.node.value)
            .field("parent", &self.parent())
            .field("left", &self.left())
            .field("right", &self.right())
            .finish()
    }
}
