//! Self-balancing binary search tree where the heights of the two child subtrees of any node
//! differ by at most one.
//!
//! Each node caches which of its subtrees is taller instead of storing its height, and insertions
//! and removals report upwards whether the height of the mutated subtree changed. Rebalancing
//! stops at the first ancestor whose height is unaffected.

mod node;
mod set;
mod tree;

pub use self::set::{AvlSet, AvlSetIntoIter, AvlSetIter};
