use crate::arena::{Handle, TypedArena};
use crate::red_black_tree::node::{Color, Node, Side};
use crate::traversal::Order;
use log::trace;
use std::cmp::{self, Ordering};

/// The node graph of a red black tree.
///
/// Every node is owned by `arena`. Child links are handles into the arena and each node stores the
/// handle of its parent, which is only used to walk upwards during fixup and iteration.
#[derive(Clone)]
pub struct Tree<T> {
    arena: TypedArena<Node<T>>,
    root: Option<Handle>,
}

impl<T> Tree<T> {
    pub fn new(chunk_size: usize) -> Self {
        Tree {
            arena: TypedArena::new(chunk_size),
            root: None,
        }
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn chunk_size(&self) -> usize {
        self.arena.chunk_size()
    }

    pub fn clear(&mut self) {
        self.arena.clear();
        self.root = None;
    }

    pub fn key(&self, node: Handle) -> &T {
        &self.arena[node].key
    }

    fn is_red(&self, node: Option<Handle>) -> bool {
        match node {
            None => false,
            Some(node) => self.arena[node].color == Color::Red,
        }
    }

    // precondition: `node` is a child of `parent`
    fn side_of(&self, node: Handle, parent: Handle) -> Side {
        if self.arena[parent].left == Some(node) {
            Side::Left
        } else {
            Side::Right
        }
    }

    // Points the link that referred to `old` at `new`. `parent` is the parent of `old`, or `None`
    // if `old` is the root.
    fn replace_child(&mut self, parent: Option<Handle>, old: Handle, new: Option<Handle>) {
        match parent {
            None => self.root = new,
            Some(parent) => {
                let side = self.side_of(old, parent);
                *self.arena[parent].child_mut(side) = new;
            },
        }
    }

    // Puts the subtree rooted at `new` in place of the one rooted at `old`.
    fn transplant(&mut self, old: Handle, new: Option<Handle>) {
        let parent = self.arena[old].parent;
        self.replace_child(parent, old, new);
        if let Some(new) = new {
            self.arena[new].parent = parent;
        }
    }

    // Moves `node` down onto `side`, lifting its child on the opposite side into its place.
    fn rotate(&mut self, node: Handle, side: Side) {
        let riser = self.arena[node]
            .child(side.opposite())
            .expect("Expected child node to be `Some`.");
        let inner = self.arena[riser].child(side);

        *self.arena[node].child_mut(side.opposite()) = inner;
        if let Some(inner) = inner {
            self.arena[inner].parent = Some(node);
        }

        let parent = self.arena[node].parent;
        self.replace_child(parent, node, Some(riser));
        self.arena[riser].parent = parent;

        *self.arena[riser].child_mut(side) = Some(node);
        self.arena[node].parent = Some(riser);
    }

    fn outermost(&self, mut node: Handle, side: Side) -> Handle {
        while let Some(child) = self.arena[node].child(side) {
            node = child;
        }
        node
    }

    pub fn first(&self) -> Option<Handle> {
        self.root.map(|root| self.outermost(root, Side::Left))
    }

    pub fn last(&self) -> Option<Handle> {
        self.root.map(|root| self.outermost(root, Side::Right))
    }

    /// Returns the node that follows `node` in key order.
    pub fn successor(&self, node: Handle) -> Option<Handle> {
        if let Some(right) = self.arena[node].right {
            return Some(self.outermost(right, Side::Left));
        }
        let mut curr = node;
        while let Some(parent) = self.arena[curr].parent {
            if self.arena[parent].left == Some(curr) {
                return Some(parent);
            }
            curr = parent;
        }
        None
    }

    fn find(&self, key: &T) -> Option<Handle>
    where
        T: Ord,
    {
        let mut curr = self.root;
        while let Some(node) = curr {
            match key.cmp(&self.arena[node].key) {
                Ordering::Less => curr = self.arena[node].left,
                Ordering::Greater => curr = self.arena[node].right,
                Ordering::Equal => return Some(node),
            }
        }
        None
    }

    pub fn get(&self, key: &T) -> Option<&T>
    where
        T: Ord,
    {
        self.find(key).map(|node| self.key(node))
    }

    /// Inserts `key` as a red leaf and restores the invariants. Returns `false` without touching
    /// the tree if an equal key is already present.
    pub fn insert(&mut self, key: T) -> bool
    where
        T: Ord,
    {
        let mut parent = None;
        let mut side = Side::Left;
        let mut curr = self.root;
        while let Some(node) = curr {
            parent = Some(node);
            side = match key.cmp(&self.arena[node].key) {
                Ordering::Less => Side::Left,
                Ordering::Greater => Side::Right,
                Ordering::Equal => return false,
            };
            curr = self.arena[node].child(side);
        }

        let node = self.arena.allocate(Node::new(key, parent));
        match parent {
            None => self.root = Some(node),
            Some(parent) => *self.arena[parent].child_mut(side) = Some(node),
        }
        self.insert_fixup(node);
        true
    }

    fn insert_fixup(&mut self, mut node: Handle) {
        while let Some(parent) = self.arena[node].parent {
            if self.arena[parent].color == Color::Black {
                break;
            }
            // a red parent without a parent is the root, which is recolored below
            let grandparent = match self.arena[parent].parent {
                Some(grandparent) => grandparent,
                None => break,
            };

            let side = self.side_of(parent, grandparent);
            let uncle = self.arena[grandparent].child(side.opposite());
            if self.is_red(uncle) {
                trace!("red black: insert recolor");
                self.arena[parent].color = Color::Black;
                if let Some(uncle) = uncle {
                    self.arena[uncle].color = Color::Black;
                }
                self.arena[grandparent].color = Color::Red;
                node = grandparent;
                continue;
            }

            let mut parent = parent;
            if self.arena[parent].child(side.opposite()) == Some(node) {
                trace!("red black: insert inner rotation");
                self.rotate(parent, side);
                node = parent;
                parent = self.arena[node]
                    .parent
                    .expect("Expected parent node to be `Some`.");
            }

            trace!("red black: insert outer rotation");
            self.arena[parent].color = Color::Black;
            self.arena[grandparent].color = Color::Red;
            self.rotate(grandparent, side.opposite());
        }

        if let Some(root) = self.root {
            self.arena[root].color = Color::Black;
        }
    }

    /// Removes the node holding `key` and returns the key, or `None` if no equal key is present.
    ///
    /// A node with two children is replaced by its in-order successor: the successor is unlinked
    /// from its position and relinked in place of the removed node, taking over its color.
    pub fn remove(&mut self, key: &T) -> Option<T>
    where
        T: Ord,
    {
        let target = self.find(key)?;
        let left = self.arena[target].left;
        let right = self.arena[target].right;

        // `child` is the subtree that moved up into the vacated position and `parent` its new
        // parent. These anchor the fixup if a black node left that position.
        let (child, parent, removed_color) = match (left, right) {
            (Some(left), Some(right)) => {
                let successor = self.outermost(right, Side::Left);
                let successor_color = self.arena[successor].color;
                let child = self.arena[successor].right;

                let parent = if self.arena[successor].parent == Some(target) {
                    Some(successor)
                } else {
                    let parent = self.arena[successor].parent;
                    self.transplant(successor, child);
                    self.arena[successor].right = Some(right);
                    self.arena[right].parent = Some(successor);
                    parent
                };

                self.transplant(target, Some(successor));
                self.arena[successor].left = Some(left);
                self.arena[left].parent = Some(successor);
                let target_color = self.arena[target].color;
                self.arena[successor].color = target_color;

                (child, parent, successor_color)
            },
            (child, None) | (None, child) => {
                let parent = self.arena[target].parent;
                self.transplant(target, child);
                (child, parent, self.arena[target].color)
            },
        };

        let Node { key, .. } = self.arena.free(target);
        if removed_color == Color::Black {
            self.remove_fixup(child, parent);
        }
        Some(key)
    }

    // Resolves a missing black node on the path through `node`, a possibly absent child of
    // `parent`.
    fn remove_fixup(&mut self, mut node: Option<Handle>, mut parent: Option<Handle>) {
        while node != self.root && !self.is_red(node) {
            let current = match parent {
                Some(current) => current,
                None => break,
            };
            let side = if self.arena[current].left == node {
                Side::Left
            } else {
                Side::Right
            };
            let far = side.opposite();

            let mut sibling = self.arena[current]
                .child(far)
                .expect("Expected sibling node to be `Some`.");
            if self.arena[sibling].color == Color::Red {
                trace!("red black: remove red sibling rotation");
                self.arena[sibling].color = Color::Black;
                self.arena[current].color = Color::Red;
                self.rotate(current, side);
                sibling = self.arena[current]
                    .child(far)
                    .expect("Expected sibling node to be `Some`.");
            }

            let near_nephew = self.arena[sibling].child(side);
            let far_nephew = self.arena[sibling].child(far);
            if !self.is_red(near_nephew) && !self.is_red(far_nephew) {
                trace!("red black: remove recolor sibling");
                self.arena[sibling].color = Color::Red;
                node = Some(current);
                parent = self.arena[current].parent;
                continue;
            }

            if !self.is_red(far_nephew) {
                trace!("red black: remove inner nephew rotation");
                let near_nephew = near_nephew.expect("Expected red nephew node to be `Some`.");
                self.arena[near_nephew].color = Color::Black;
                self.arena[sibling].color = Color::Red;
                self.rotate(sibling, far);
                sibling = self.arena[current]
                    .child(far)
                    .expect("Expected sibling node to be `Some`.");
            }

            trace!("red black: remove outer nephew rotation");
            let parent_color = self.arena[current].color;
            self.arena[sibling].color = parent_color;
            self.arena[current].color = Color::Black;
            if let Some(far_nephew) = self.arena[sibling].child(far) {
                self.arena[far_nephew].color = Color::Black;
            }
            self.rotate(current, side);
            node = self.root;
            break;
        }

        if let Some(node) = node {
            self.arena[node].color = Color::Black;
        }
    }

    fn walk<F>(&self, node: Option<Handle>, order: Order, visitor: &mut F)
    where
        F: FnMut(&T),
    {
        if let Some(node) = node {
            let Node {
                ref key,
                left,
                right,
                ..
            } = self.arena[node];
            if order == Order::Pre {
                visitor(key);
            }
            self.walk(left, order, visitor);
            if order == Order::In {
                visitor(key);
            }
            self.walk(right, order, visitor);
            if order == Order::Post {
                visitor(key);
            }
        }
    }

    pub fn traverse<F>(&self, order: Order, visitor: &mut F)
    where
        F: FnMut(&T),
    {
        self.walk(self.root, order, visitor);
    }

    fn subtree_height(&self, node: Option<Handle>) -> usize {
        match node {
            None => 0,
            Some(node) => {
                let Node { left, right, .. } = self.arena[node];
                cmp::max(self.subtree_height(left), self.subtree_height(right)) + 1
            },
        }
    }

    pub fn height(&self) -> usize {
        self.subtree_height(self.root)
    }

    /// Frees every node and returns the keys in ascending order.
    pub fn into_sorted_keys(mut self) -> Vec<T> {
        let mut handles = Vec::with_capacity(self.len());
        let mut curr = self.first();
        while let Some(node) = curr {
            handles.push(node);
            curr = self.successor(node);
        }
        handles
            .into_iter()
            .map(|node| self.arena.free(node).key)
            .collect()
    }
}

#[cfg(test)]
pub mod tests {
    use super::Tree;
    use crate::arena::{Handle, DEFAULT_CHUNK_SIZE};
    use crate::red_black_tree::node::Color;

    fn check_subtree<T>(tree: &Tree<T>, node: Option<Handle>, parent: Option<Handle>) -> usize
    where
        T: Ord,
    {
        match node {
            None => 1,
            Some(node) => {
                let current = &tree.arena[node];
                assert_eq!(current.parent, parent);
                if current.color == Color::Red {
                    assert!(!tree.is_red(current.left), "Red node with a red left child.");
                    assert!(!tree.is_red(current.right), "Red node with a red right child.");
                }
                if let Some(left) = current.left {
                    assert!(tree.arena[left].key < current.key);
                }
                if let Some(right) = current.right {
                    assert!(tree.arena[right].key > current.key);
                }
                let left_height = check_subtree(tree, current.left, Some(node));
                let right_height = check_subtree(tree, current.right, Some(node));
                assert_eq!(left_height, right_height, "Unequal black heights.");
                match current.color {
                    Color::Black => left_height + 1,
                    Color::Red => left_height,
                }
            },
        }
    }

    // Returns the black height of the tree after asserting that the root is black, that no red
    // node has a red child, that every path has the same number of black nodes, and that parent
    // links agree with child links.
    pub fn check<T>(tree: &Tree<T>) -> usize
    where
        T: Ord,
    {
        assert!(!tree.is_red(tree.root), "Red root.");
        check_subtree(tree, tree.root, None)
    }

    fn color_of(tree: &Tree<u32>, key: u32) -> Color {
        let node = tree.find(&key).expect("Expected key to be present.");
        tree.arena[node].color
    }

    fn preorder(tree: &Tree<u32>) -> Vec<u32> {
        let mut keys = Vec::new();
        tree.traverse(crate::traversal::Order::Pre, &mut |key: &u32| keys.push(*key));
        keys
    }

    #[test]
    fn test_insert_rotation_then_recolor() {
        let mut tree = Tree::new(DEFAULT_CHUNK_SIZE);
        tree.insert(10);
        tree.insert(20);

        // the uncle of 30 is absent, so the fixup rotates at 10
        tree.insert(30);
        assert_eq!(preorder(&tree), vec![20, 10, 30]);
        assert_eq!(color_of(&tree, 10), Color::Red);
        assert_eq!(color_of(&tree, 30), Color::Red);
        check(&tree);

        // the uncle of 40 is red, so the fixup only recolors
        tree.insert(40);
        assert_eq!(preorder(&tree), vec![20, 10, 30, 40]);
        assert_eq!(color_of(&tree, 20), Color::Black);
        assert_eq!(color_of(&tree, 10), Color::Black);
        assert_eq!(color_of(&tree, 30), Color::Black);
        assert_eq!(color_of(&tree, 40), Color::Red);
        assert_eq!(check(&tree), 3);
    }

    #[test]
    fn test_insert_inner_rotation() {
        let mut tree = Tree::new(DEFAULT_CHUNK_SIZE);
        tree.insert(30);
        tree.insert(10);
        tree.insert(20);
        assert_eq!(preorder(&tree), vec![20, 10, 30]);
        check(&tree);
    }

    #[test]
    fn test_insert_duplicate() {
        let mut tree = Tree::new(DEFAULT_CHUNK_SIZE);
        assert!(tree.insert(1));
        assert!(!tree.insert(1));
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn test_remove_two_children_uses_successor() {
        let mut tree = Tree::new(DEFAULT_CHUNK_SIZE);
        for key in &[20, 10, 30, 5, 15, 25, 35] {
            tree.insert(*key);
        }
        check(&tree);

        assert_eq!(tree.remove(&20), Some(20));
        assert_eq!(preorder(&tree), vec![25, 10, 5, 15, 30, 35]);
        assert_eq!(color_of(&tree, 25), Color::Black);
        check(&tree);
    }

    #[test]
    fn test_remove_sequence_keeps_invariants() {
        let mut tree = Tree::new(DEFAULT_CHUNK_SIZE);
        for key in 1..=10 {
            tree.insert(key);
            check(&tree);
        }
        for key in &[1, 2, 3, 9, 10, 4] {
            assert_eq!(tree.remove(key), Some(*key));
            check(&tree);
        }
        assert_eq!(tree.len(), 4);
    }

    #[test]
    fn test_remove_missing() {
        let mut tree = Tree::new(DEFAULT_CHUNK_SIZE);
        tree.insert(1);
        assert_eq!(tree.remove(&2), None);
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn test_remove_root_until_empty() {
        let mut tree = Tree::new(4);
        for key in 0..32 {
            tree.insert(key);
        }
        while let Some(root) = tree.root {
            let key = *tree.key(root);
            assert_eq!(tree.remove(&key), Some(key));
            check(&tree);
        }
        assert_eq!(tree.len(), 0);
        assert_eq!(tree.first(), None);
    }

    #[test]
    fn test_successor_walk() {
        let mut tree = Tree::new(DEFAULT_CHUNK_SIZE);
        for key in &[5, 3, 8, 1, 4, 7, 9] {
            tree.insert(*key);
        }
        let mut keys = Vec::new();
        let mut curr = tree.first();
        while let Some(node) = curr {
            keys.push(*tree.key(node));
            curr = tree.successor(node);
        }
        assert_eq!(keys, vec![1, 3, 4, 5, 7, 8, 9]);
        assert_eq!(tree.last().map(|node| *tree.key(node)), Some(9));
    }

    #[test]
    fn test_into_sorted_keys() {
        let mut tree = Tree::new(2);
        for key in &[5, 3, 8, 1, 4] {
            tree.insert(*key);
        }
        assert_eq!(tree.into_sorted_keys(), vec![1, 3, 4, 5, 8]);
    }
}
