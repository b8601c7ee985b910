//! Iterators over the keys of a tree.

use crate::arena::{Arena, NodeId};
use crate::branch::Branch;
use crate::node::BinaryNode;
use std::collections::VecDeque;

/// An iterator over the keys of a tree in ascending order.
pub struct InOrder<'a, N> {
    arena: &'a Arena<N>,
    stack: Vec<NodeId>,
}

impl<'a, N> InOrder<'a, N>
where
    N: BinaryNode,
{
    pub(crate) fn new(arena: &'a Arena<N>, root: Option<NodeId>) -> Self {
        let mut iter = InOrder {
            arena,
            stack: Vec::new(),
        };
        iter.push_left_edge(root);
        iter
    }

    fn push_left_edge(&mut self, mut curr: Option<NodeId>) {
        while let Some(id) = curr {
            self.stack.push(id);
            curr = self.arena[id].child(Branch::Left);
        }
    }
}

impl<'a, N> Iterator for InOrder<'a, N>
where
    N: 'a + BinaryNode,
{
    type Item = &'a N::Key;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        let arena = self.arena;
        let node = &arena[id];
        self.push_left_edge(node.child(Branch::Right));
        Some(node.key())
    }
}

/// An iterator over the keys of a tree in pre-order.
pub struct PreOrder<'a, N> {
    arena: &'a Arena<N>,
    stack: Vec<NodeId>,
}

impl<'a, N> PreOrder<'a, N> {
    pub(crate) fn new(arena: &'a Arena<N>, root: Option<NodeId>) -> Self {
        PreOrder {
            arena,
            stack: root.into_iter().collect(),
        }
    }
}

impl<'a, N> Iterator for PreOrder<'a, N>
where
    N: 'a + BinaryNode,
{
    type Item = &'a N::Key;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        let arena = self.arena;
        let node = &arena[id];
        self.stack.extend(node.child(Branch::Right));
        self.stack.extend(node.child(Branch::Left));
        Some(node.key())
    }
}

/// An iterator over the keys of a tree in post-order.
pub struct PostOrder<'a, N> {
    arena: &'a Arena<N>,
    // each node is pushed once unexpanded and once more after its children are queued
    stack: Vec<(NodeId, bool)>,
}

impl<'a, N> PostOrder<'a, N> {
    pub(crate) fn new(arena: &'a Arena<N>, root: Option<NodeId>) -> Self {
        PostOrder {
            arena,
            stack: root.into_iter().map(|id| (id, false)).collect(),
        }
    }
}

impl<'a, N> Iterator for PostOrder<'a, N>
where
    N: 'a + BinaryNode,
{
    type Item = &'a N::Key;

    fn next(&mut self) -> Option<Self::Item> {
        let arena = self.arena;
        while let Some((id, expanded)) = self.stack.pop() {
            let node = &arena[id];
            if expanded {
                return Some(node.key());
            }
            self.stack.push((id, true));
            self.stack
                .extend(node.child(Branch::Right).map(|id| (id, false)));
            self.stack
                .extend(node.child(Branch::Left).map(|id| (id, false)));
        }
        None
    }
}

/// An iterator over the keys of a tree level by level, each level from left to right.
pub struct BreadthFirst<'a, N> {
    arena: &'a Arena<N>,
    queue: VecDeque<NodeId>,
}

impl<'a, N> BreadthFirst<'a, N> {
    pub(crate) fn new(arena: &'a Arena<N>, root: Option<NodeId>) -> Self {
        BreadthFirst {
            arena,
            queue: root.into_iter().collect(),
        }
    }
}

impl<'a, N> Iterator for BreadthFirst<'a, N>
where
    N: 'a + BinaryNode,
{
    type Item = &'a N::Key;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.queue.pop_front()?;
        let arena = self.arena;
        let node = &arena[id];
        self.queue.extend(node.child(Branch::Left));
        self.queue.extend(node.child(Branch::Right));
        Some(node.key())
    }
}
