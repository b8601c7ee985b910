//! Self-balancing binary search tree that uses a color bit to ensure that the tree remains
//! approximately balanced during insertions and deletions.
//!
//! Every node is either red or black. The root is black, no red node has a red child, and every
//! path from a node down to a missing child passes through the same number of black nodes. The
//! longest root-to-leaf path is therefore at most twice as long as the shortest one.

mod node;
mod tree;

pub use self::node::{Color, Node};

use crate::tree::Tree;

/// A red black tree.
///
/// # Examples
///
/// ```
/// use balanced_trees::red_black_tree::Color;
/// use balanced_trees::RedBlackTree;
///
/// let mut tree = RedBlackTree::new();
/// tree.bulk_insert(vec![1, 2, 3]).unwrap();
///
/// let root = tree.root().unwrap();
/// assert_eq!(*root.key(), 2);
/// assert_eq!(root.color(), Color::Black);
/// assert_eq!(root.left().map(|node| node.color()), Some(Color::Red));
///
/// tree.delete(&2).unwrap();
/// assert_eq!(tree.iter().collect::<Vec<&u32>>(), vec![&1, &3]);
/// ```
pub type RedBlackTree<T> = Tree<Node<T>>;
