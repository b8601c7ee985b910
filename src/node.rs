use crate::arena::{Arena, NodeId};
use crate::branch::Branch;
use std::fmt;
use std::ops::Deref;

/// The shape shared by the nodes of every tree in this crate: a totally ordered key and two child
/// slots.
pub trait BinaryNode {
    type Key: Ord;

    fn key(&self) -> &Self::Key;

    fn key_mut(&mut self) -> &mut Self::Key;

    fn child(&self, branch: Branch) -> Option<NodeId>;

    fn child_mut(&mut self, branch: Branch) -> &mut Option<NodeId>;
}

/// A read-only cursor at a node of a tree.
///
/// A `NodeRef` borrows the whole tree immutably, so the tree cannot change while any cursor into
/// it is alive. It dereferences to the engine's node type, which exposes the per-engine metadata
/// such as the balance factor or the color.
pub struct NodeRef<'a, N> {
    arena: &'a Arena<N>,
    id: NodeId,
}

impl<'a, N> NodeRef<'a, N>
where
    N: BinaryNode,
{
    pub(crate) fn new(arena: &'a Arena<N>, id: NodeId) -> Self {
        NodeRef { arena, id }
    }

    /// Returns the handle of the node.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Returns the node itself, borrowed for as long as the tree is.
    pub fn node(&self) -> &'a N {
        &self.arena[self.id]
    }

    pub fn key(&self) -> &'a N::Key {
        self.node().key()
    }

    /// Returns a cursor at the child on the given side, if any.
    pub fn child(&self, branch: Branch) -> Option<NodeRef<'a, N>> {
        let arena = self.arena;
        self.node().child(branch).map(|id| NodeRef::new(arena, id))
    }

    pub fn left(&self) -> Option<NodeRef<'a, N>> {
        self.child(Branch::Left)
    }

    pub fn right(&self) -> Option<NodeRef<'a, N>> {
        self.child(Branch::Right)
    }
}

impl<'a, N> Clone for NodeRef<'a, N> {
    fn clone(&self) -> Self {
        NodeRef {
            arena: self.arena,
            id: self.id,
        }
    }
}

impl<'a, N> Copy for NodeRef<'a, N> {}

impl<'a, N> Deref for NodeRef<'a, N> {
    type Target = N;

    fn deref(&self) -> &N {
        &self.arena[self.id]
    }
}

impl<'a, N> fmt::Debug for NodeRef<'a, N>
where
    N: BinaryNode,
    N::Key: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.id)
            .field("key", self.key())
            .finish()
    }
}
