use crate::arena::NodeId;
use crate::avl_tree::tree;
use crate::branch::Branch;
use crate::error::Result;
use crate::node::BinaryNode;
use crate::tree::{Rebalance, Tree};

/// A struct representing an internal node of an avl tree.
pub struct Node<T> {
    pub(crate) key: T,
    pub(crate) balance: i8,
    pub(crate) left: Option<NodeId>,
    pub(crate) right: Option<NodeId>,
}

impl<T> Node<T> {
    pub fn new(key: T) -> Self {
        Node {
            key,
            balance: 0,
            left: None,
            right: None,
        }
    }

    /// Returns the height of the right subtree minus the height of the left subtree.
    pub fn balance(&self) -> i8 {
        self.balance
    }
}

impl<T> BinaryNode for Node<T>
where
    T: Ord,
{
    type Key = T;

    fn key(&self) -> &T {
        &self.key
    }

    fn key_mut(&mut self) -> &mut T {
        &mut self.key
    }

    fn child(&self, branch: Branch) -> Option<NodeId> {
        match branch {
            Branch::Left => self.left,
            Branch::Right => self.right,
        }
    }

    fn child_mut(&mut self, branch: Branch) -> &mut Option<NodeId> {
        match branch {
            Branch::Left => &mut self.left,
            Branch::Right => &mut self.right,
        }
    }
}

impl<T> Rebalance for Node<T>
where
    T: Ord,
{
    fn insert(tree: &mut Tree<Self>, key: T) -> Result<NodeId> {
        tree::insert(tree, key)
    }

    fn delete(tree: &mut Tree<Self>, key: &T) -> Result<()> {
        tree::delete(tree, key)
    }

    fn assert_invariants(tree: &Tree<Self>) {
        tree::assert_balanced(tree, tree.root);
    }
}
