//! Self-balancing binary search tree that uses a color bit to ensure that the tree remains
//! approximately balanced during insertions and deletions.
//!
//! Nodes live in a typed arena and hold the handle of their parent, which lets the fixup
//! procedures walk from a mutated node back towards the root without recursion.

mod node;
mod set;
mod tree;

pub use self::set::{RedBlackSet, RedBlackSetIntoIter, RedBlackSetIter};
