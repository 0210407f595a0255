//! Ordered sets backed by self-balancing binary search trees.
//!
//! Both [`AvlSet`](avl_tree::AvlSet) and [`RedBlackSet`](red_black_tree::RedBlackSet) store unique,
//! totally ordered keys and guarantee logarithmic height, each through its own rebalancing
//! discipline. They share the [`OrderedSet`] contract.

mod arena;
mod error;
mod ordered_set;
mod traversal;
pub mod avl_tree;
pub mod red_black_tree;

pub use crate::arena::DEFAULT_CHUNK_SIZE;
pub use crate::error::{Error, Result};
pub use crate::ordered_set::OrderedSet;
pub use crate::traversal::Order;
