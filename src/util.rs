use generational_arena::Index;

/// How a node is taken out of the tree, chosen by how many children it has.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Removal {
    /// No children. The parent's link (or the root) is cleared.
    Leaf,
    /// Exactly one child, which takes the node's place under its parent.
    Splice,
    /// Two children. The node keeps its place and takes the value of its in-order
    /// predecessor, which is spliced out instead.
    Predecessor(Index),
}

impl Removal {
    pub(crate) fn name(&self) -> &'static str {
        match self {
            Self::Leaf => "leaf",
            Self::Splice => "splice",
            Self::Predecessor(_) => "predecessor",
        }
    }
}
