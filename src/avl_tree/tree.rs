use crate::avl_tree::node::{Balance, Node, Side};
use crate::traversal::Order;
use log::trace;
use std::cmp::{self, Ordering};

pub type Tree<T> = Option<Box<Node<T>>>;

pub fn height<T>(tree: &Tree<T>) -> usize {
    match tree {
        None => 0,
        Some(ref node) => cmp::max(height(&node.left), height(&node.right)) + 1,
    }
}

fn rotate_left<T>(mut node: Box<Node<T>>) -> Box<Node<T>> {
    let mut child = match node.right.take() {
        Some(child) => child,
        None => unreachable!(),
    };
    node.right = child.left.take();
    child.left = Some(node);
    child
}

fn rotate_right<T>(mut node: Box<Node<T>>) -> Box<Node<T>> {
    let mut child = match node.left.take() {
        Some(child) => child,
        None => unreachable!(),
    };
    node.left = child.right.take();
    child.right = Some(node);
    child
}

// Restores a node whose left subtree is two levels taller than its right subtree. Returns `true`
// if the resulting subtree is one level shorter than the unbalanced one.
fn rebalance_left<T>(tree: &mut Tree<T>) -> bool {
    let mut node = tree.take().expect("Expected a non-empty tree.");
    let mut child = node
        .left
        .take()
        .expect("Expected left child node to be `Some`.");

    let shrank = match child.balance {
        Balance::LeftHigher => {
            trace!("avl: single right rotation");
            node.balance = Balance::Equal;
            child.balance = Balance::Equal;
            true
        },
        // only reachable after a removal
        Balance::Equal => {
            trace!("avl: single right rotation, height unchanged");
            node.balance = Balance::LeftHigher;
            child.balance = Balance::RightHigher;
            false
        },
        Balance::RightHigher => {
            trace!("avl: left-right double rotation");
            let grandchild = child
                .right
                .as_mut()
                .expect("Expected right grandchild node to be `Some`.");
            let (node_balance, child_balance) = match grandchild.balance {
                Balance::LeftHigher => (Balance::RightHigher, Balance::Equal),
                Balance::Equal => (Balance::Equal, Balance::Equal),
                Balance::RightHigher => (Balance::Equal, Balance::LeftHigher),
            };
            grandchild.balance = Balance::Equal;
            node.balance = node_balance;
            child.balance = child_balance;
            child = rotate_left(child);
            true
        },
    };

    node.left = Some(child);
    *tree = Some(rotate_right(node));
    shrank
}

// Mirror of `rebalance_left`.
fn rebalance_right<T>(tree: &mut Tree<T>) -> bool {
    let mut node = tree.take().expect("Expected a non-empty tree.");
    let mut child = node
        .right
        .take()
        .expect("Expected right child node to be `Some`.");

    let shrank = match child.balance {
        Balance::RightHigher => {
            trace!("avl: single left rotation");
            node.balance = Balance::Equal;
            child.balance = Balance::Equal;
            true
        },
        Balance::Equal => {
            trace!("avl: single left rotation, height unchanged");
            node.balance = Balance::RightHigher;
            child.balance = Balance::LeftHigher;
            false
        },
        Balance::LeftHigher => {
            trace!("avl: right-left double rotation");
            let grandchild = child
                .left
                .as_mut()
                .expect("Expected left grandchild node to be `Some`.");
            let (node_balance, child_balance) = match grandchild.balance {
                Balance::RightHigher => (Balance::LeftHigher, Balance::Equal),
                Balance::Equal => (Balance::Equal, Balance::Equal),
                Balance::LeftHigher => (Balance::Equal, Balance::RightHigher),
            };
            grandchild.balance = Balance::Equal;
            node.balance = node_balance;
            child.balance = child_balance;
            child = rotate_right(child);
            true
        },
    };

    node.right = Some(child);
    *tree = Some(rotate_left(node));
    shrank
}

// Absorbs a one level height increase of the child subtree on `side`. Returns `true` if the
// height of `tree` increased as well.
fn grow<T>(tree: &mut Tree<T>, side: Side) -> bool {
    let node = tree.as_mut().expect("Expected a non-empty tree.");
    match (node.balance, side) {
        (Balance::Equal, Side::Left) => {
            node.balance = Balance::LeftHigher;
            true
        },
        (Balance::Equal, Side::Right) => {
            node.balance = Balance::RightHigher;
            true
        },
        (Balance::RightHigher, Side::Left) | (Balance::LeftHigher, Side::Right) => {
            node.balance = Balance::Equal;
            false
        },
        (Balance::LeftHigher, Side::Left) => {
            rebalance_left(tree);
            false
        },
        (Balance::RightHigher, Side::Right) => {
            rebalance_right(tree);
            false
        },
    }
}

// Absorbs a one level height decrease of the child subtree on `side`. Returns `true` if the
// height of `tree` decreased as well.
fn shrink<T>(tree: &mut Tree<T>, side: Side) -> bool {
    let node = tree.as_mut().expect("Expected a non-empty tree.");
    match (node.balance, side) {
        (Balance::Equal, Side::Left) => {
            node.balance = Balance::RightHigher;
            false
        },
        (Balance::Equal, Side::Right) => {
            node.balance = Balance::LeftHigher;
            false
        },
        (Balance::LeftHigher, Side::Left) | (Balance::RightHigher, Side::Right) => {
            node.balance = Balance::Equal;
            true
        },
        (Balance::RightHigher, Side::Left) => rebalance_right(tree),
        (Balance::LeftHigher, Side::Right) => rebalance_left(tree),
    }
}

/// Inserts `key` into the tree. Returns `None` if an equal key is already present, otherwise
/// whether the height of the tree increased.
pub fn insert<T>(tree: &mut Tree<T>, key: T) -> Option<bool>
where
    T: Ord,
{
    let (side, height_increased) = match tree {
        Some(ref mut node) => match key.cmp(&node.key) {
            Ordering::Less => (Side::Left, insert(&mut node.left, key)?),
            Ordering::Greater => (Side::Right, insert(&mut node.right, key)?),
            Ordering::Equal => return None,
        },
        None => {
            *tree = Some(Box::new(Node::new(key)));
            return Some(true);
        },
    };

    if height_increased {
        Some(grow(tree, side))
    } else {
        Some(false)
    }
}

// Splices out the maximum node of a non-empty tree and returns its key together with whether the
// height of the tree decreased.
fn remove_max<T>(tree: &mut Tree<T>) -> (T, bool) {
    let mut node = tree.take().expect("Expected a non-empty tree.");
    if node.right.is_some() {
        let (key, height_decreased) = remove_max(&mut node.right);
        *tree = Some(node);
        (key, height_decreased && shrink(tree, Side::Right))
    } else {
        let Node { key, left, .. } = *node;
        *tree = left;
        (key, true)
    }
}

/// Removes `key` from the tree. Returns `None` if no equal key is present, otherwise whether the
/// height of the tree decreased.
///
/// A node with two children is not unlinked. Its key is overwritten with the key of its in-order
/// predecessor, and the predecessor, which has at most one child, is spliced out instead.
pub fn remove<T>(tree: &mut Tree<T>, key: &T) -> Option<bool>
where
    T: Ord,
{
    let mut node = tree.take()?;
    let (side, height_decreased) = match key.cmp(&node.key) {
        Ordering::Less => {
            let ret = remove(&mut node.left, key);
            *tree = Some(node);
            (Side::Left, ret?)
        },
        Ordering::Greater => {
            let ret = remove(&mut node.right, key);
            *tree = Some(node);
            (Side::Right, ret?)
        },
        Ordering::Equal => match (node.left.take(), node.right.take()) {
            (None, right) => {
                *tree = right;
                return Some(true);
            },
            (left, None) => {
                *tree = left;
                return Some(true);
            },
            (left, right) => {
                node.left = left;
                node.right = right;
                let (predecessor, height_decreased) = remove_max(&mut node.left);
                node.key = predecessor;
                *tree = Some(node);
                (Side::Left, height_decreased)
            },
        },
    };

    if height_decreased {
        Some(shrink(tree, side))
    } else {
        Some(false)
    }
}

pub fn get<'a, T>(tree: &'a Tree<T>, key: &T) -> Option<&'a T>
where
    T: Ord,
{
    let mut curr = tree;
    while let Some(ref node) = curr {
        match key.cmp(&node.key) {
            Ordering::Less => curr = &node.left,
            Ordering::Greater => curr = &node.right,
            Ordering::Equal => return Some(&node.key),
        }
    }
    None
}

pub fn min<T>(tree: &Tree<T>) -> Option<&T> {
    tree.as_ref().map(|node| {
        let mut curr = node;
        while let Some(ref left_node) = curr.left {
            curr = left_node;
        }
        &curr.key
    })
}

pub fn max<T>(tree: &Tree<T>) -> Option<&T> {
    tree.as_ref().map(|node| {
        let mut curr = node;
        while let Some(ref right_node) = curr.right {
            curr = right_node;
        }
        &curr.key
    })
}

pub fn traverse<T, F>(tree: &Tree<T>, order: Order, visitor: &mut F)
where
    F: FnMut(&T),
{
    if let Some(ref node) = tree {
        if order == Order::Pre {
            visitor(&node.key);
        }
        traverse(&node.left, order, visitor);
        if order == Order::In {
            visitor(&node.key);
        }
        traverse(&node.right, order, visitor);
        if order == Order::Post {
            visitor(&node.key);
        }
    }
}

#[cfg(test)]
pub mod tests {
    use super::{insert, remove, Tree};
    use crate::avl_tree::node::Balance;
    use std::cmp;

    // Returns the height of the tree after asserting that every cached balance factor matches the
    // actual heights of the child subtrees and that keys are in ascending order.
    pub fn check<T>(tree: &Tree<T>) -> usize
    where
        T: Ord,
    {
        match tree {
            None => 0,
            Some(ref node) => {
                if let Some(ref left) = node.left {
                    assert!(left.key < node.key);
                }
                if let Some(ref right) = node.right {
                    assert!(right.key > node.key);
                }
                let left_height = check(&node.left);
                let right_height = check(&node.right);
                let expected = match left_height as isize - right_height as isize {
                    1 => Balance::LeftHigher,
                    0 => Balance::Equal,
                    -1 => Balance::RightHigher,
                    diff => panic!("Height difference of {} at a node.", diff),
                };
                assert_eq!(node.balance, expected);
                cmp::max(left_height, right_height) + 1
            },
        }
    }

    #[test]
    fn test_insert_reports_growth() {
        let mut tree = None;
        assert_eq!(insert(&mut tree, 2), Some(true));
        assert_eq!(insert(&mut tree, 1), Some(true));
        assert_eq!(insert(&mut tree, 3), Some(false));
        assert_eq!(insert(&mut tree, 3), None);
        assert_eq!(check(&tree), 2);
    }

    #[test]
    fn test_left_right_rotation() {
        let mut tree = None;
        insert(&mut tree, 3);
        insert(&mut tree, 1);
        insert(&mut tree, 2);
        assert_eq!(check(&tree), 2);
        assert_eq!(tree.as_ref().map(|node| node.key), Some(2));
    }

    #[test]
    fn test_right_left_rotation() {
        let mut tree = None;
        insert(&mut tree, 1);
        insert(&mut tree, 3);
        insert(&mut tree, 2);
        assert_eq!(check(&tree), 2);
        assert_eq!(tree.as_ref().map(|node| node.key), Some(2));
    }

    #[test]
    fn test_remove_rotation_with_balanced_child() {
        let mut tree = None;
        for key in &[4, 2, 6, 1, 3] {
            insert(&mut tree, *key);
        }
        // removing 6 leaves the node 4 doubly left heavy with a balanced left child
        assert_eq!(remove(&mut tree, &6), Some(false));
        assert_eq!(check(&tree), 3);
        assert_eq!(tree.as_ref().map(|node| node.key), Some(2));
    }

    #[test]
    fn test_remove_propagates_shrink_after_rotation() {
        let mut tree: Tree<u32> = None;
        for key in &[5, 2, 8, 1, 4, 7, 10, 3, 6, 9, 11, 12] {
            insert(&mut tree, *key);
        }
        check(&tree);
        for key in &[1, 3, 6, 9, 2] {
            assert!(remove(&mut tree, key).is_some());
            check(&tree);
        }
    }

    #[test]
    fn test_remove_two_children_uses_predecessor() {
        let mut tree = None;
        for key in &[2, 1, 3] {
            insert(&mut tree, *key);
        }
        assert_eq!(remove(&mut tree, &2), Some(false));
        assert_eq!(tree.as_ref().map(|node| node.key), Some(1));
        check(&tree);
    }

    #[test]
    fn test_remove_missing() {
        let mut tree = None;
        insert(&mut tree, 1);
        assert_eq!(remove(&mut tree, &0), None);
        assert_eq!(remove(&mut tree, &2), None);
        check(&tree);
    }
}
