//! Self-balancing binary search tree where the heights of the two child subtrees of any node
//! differ by at most one.
//!
//! Each node records its balance factor, the height of its right subtree minus the height of its
//! left subtree. Insertion and deletion walk the lineage of the touched node bottom-up, adjusting
//! balance factors until a subtree's height stops changing, and rotate wherever a factor reaches
//! two in magnitude. The balance factors produced by a rotation are derived from the pivot's
//! prior factor, without recomputing heights.

mod node;
mod tree;

pub use self::node::Node;

use crate::tree::Tree;

/// An AVL tree.
///
/// # Examples
///
/// ```
/// use balanced_trees::AvlTree;
///
/// let mut tree = AvlTree::new();
/// tree.bulk_insert(vec![5, 4, 3, 2, 1]).unwrap();
///
/// assert_eq!(tree.pre_order().collect::<Vec<&u32>>(), vec![&4, &2, &1, &3, &5]);
/// assert_eq!(tree.root().map(|node| node.balance()), Some(-1));
/// ```
pub type AvlTree<T> = Tree<Node<T>>;
