use crate::avl_tree::tree;

/// Which child subtree of a node is taller, if either.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Balance {
    LeftHigher,
    Equal,
    RightHigher,
}

/// A side of a node, used to report where a subtree changed height.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Side {
    Left,
    Right,
}

/// A struct representing an internal node of an avl tree.
#[derive(Clone)]
pub struct Node<T> {
    pub key: T,
    pub balance: Balance,
    pub left: tree::Tree<T>,
    pub right: tree::Tree<T>,
}

impl<T> Node<T> {
    pub fn new(key: T) -> Self {
        Node {
            key,
            balance: Balance::Equal,
            left: None,
            right: None,
        }
    }
}
