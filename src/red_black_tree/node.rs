use crate::arena::NodeId;
use crate::branch::Branch;
use crate::error::Result;
use crate::node::BinaryNode;
use crate::red_black_tree::tree;
use crate::tree::{Rebalance, Tree};

/// An enum representing the color of a node in a red black tree.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum Color {
    Red,
    Black,
}

impl Color {
    pub fn flip(self) -> Color {
        match self {
            Color::Red => Color::Black,
            Color::Black => Color::Red,
        }
    }
}

/// A struct representing an internal node of a red black tree.
pub struct Node<T> {
    pub(crate) key: T,
    pub(crate) color: Color,
    pub(crate) left: Option<NodeId>,
    pub(crate) right: Option<NodeId>,
}

impl<T> Node<T> {
    pub fn new(key: T) -> Self {
        Node {
            key,
            color: Color::Red,
            left: None,
            right: None,
        }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn is_red(&self) -> bool {
        self.color == Color::Red
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
        tree::assert_colored(tree);
    }
}
