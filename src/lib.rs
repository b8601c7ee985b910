//! Self-balancing binary search trees with an instrumentation hook.
//!
//! Two balancing strategies share a single tree facade: `AvlTree`, which keeps the heights of
//! sibling subtrees within one of each other, and `RedBlackTree`, which colors nodes to bound the
//! longest path at twice the shortest. Both store unique, totally ordered keys in an arena and
//! report every structural step (insertions, deletions, rotations, recolorings) to an optional
//! `Sink`.
//!
//! # Examples
//!
//! ```
//! use balanced_trees::event::LogSink;
//! use balanced_trees::{AvlTree, Error, RedBlackTree};
//!
//! let mut avl = AvlTree::new().with_sink(LogSink);
//! let mut red_black = RedBlackTree::new();
//!
//! for key in 0..100 {
//!     avl.insert(key).unwrap();
//!     red_black.insert(key).unwrap();
//! }
//!
//! assert_eq!(avl.height(), 7);
//! assert!(red_black.height() <= 2 * 7);
//! assert_eq!(red_black.delete(&100), Err(Error::KeyNotFound));
//! ```

#[macro_use]
extern crate log;
extern crate serde;
#[macro_use]
extern crate serde_derive;

pub mod arena;
pub mod avl_tree;
mod branch;
mod error;
pub mod event;
pub mod node;
pub mod red_black_tree;
pub mod traversal;
mod tree;

pub use self::avl_tree::AvlTree;
pub use self::branch::Branch;
pub use self::error::{Error, Result};
pub use self::node::{BinaryNode, NodeRef};
pub use self::red_black_tree::RedBlackTree;
pub use self::tree::{Rebalance, Tree};
