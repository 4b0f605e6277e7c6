//! A link-based, unbalanced Binary Search Tree, written mostly for educational purposes and for
//! comparing tree lookups with a plain linear search.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! add, find, and remove stored values. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` stores one value
//! and may have a left and a right child `Node`. The invariants kept here are:
//!
//! 1. For every `Node` in the tree, all the `Node`s in its left subtree have a
//!    value less than its own value.
//! 2. For every `Node` in the tree, all the `Node`s in its right subtree have a
//!    value greater than or equal to its own value. Equal values are allowed and
//!    always go right.
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! Searching for a value takes `O(height)` (where `height` is the longest path from the
//! root `Node` to a leaf `Node`). Nothing here keeps the height down automatically: adding
//! values in sorted order produces a chain with `height == len - 1`. Calling
//! [`Tree::rebalance`] rebuilds the tree with the minimal `O(lg N)` height. Visiting the left
//! subtree, then the subtree root, then the right subtree yields the values in sorted order.
//!
//! ```
//! use linked_bst::Tree;
//!
//! let mut tree: Tree<_> = ["ant", "bee", "cat", "dog"].into_iter().collect();
//! assert_eq!(tree.height(), 3);
//!
//! tree.rebalance();
//! assert_eq!(tree.height(), 2);
//! assert_eq!(tree.find(&"cat"), Some(&"cat"));
//! ```

#![deny(missing_docs)]

pub mod error;
pub mod iter;
mod stack;
pub mod tree;

pub use error::{Error, Result};
pub use tree::Tree;
