use crate::avl_tree::node::Node;
use crate::avl_tree::tree;
use crate::error::{Error, Result};
use crate::ordered_set::OrderedSet;
use crate::traversal::Order;
use log::debug;
use std::fmt;
use std::iter::FromIterator;

/// An ordered set implemented using an avl tree.
///
/// An avl tree is a self-balancing binary search tree that maintains the invariant that the
/// heights of two child subtrees of any node differ by at most one.
///
/// # Examples
///
/// ```
/// use balanced_collections::avl_tree::AvlSet;
///
/// let mut set = AvlSet::new();
/// set.insert(0);
/// set.insert(3);
///
/// assert_eq!(set.len(), 2);
/// assert_eq!(set.min(), Ok(&0));
///
/// assert!(set.remove(&0));
/// assert!(!set.remove(&1));
/// ```
#[derive(Clone)]
pub struct AvlSet<T> {
    tree: tree::Tree<T>,
    len: usize,
}

impl<T> AvlSet<T> {
    /// Constructs a new, empty `AvlSet<T>`.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::avl_tree::AvlSet;
    ///
    /// let set: AvlSet<u32> = AvlSet::new();
    /// assert!(set.is_empty());
    /// ```
    pub fn new() -> Self {
        AvlSet { tree: None, len: 0 }
    }

    /// Inserts a key into the set. Returns `false` if the key already exists, in which case the
    /// set is left unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// assert!(set.insert(1));
    /// assert!(!set.insert(1));
    /// assert_eq!(set.len(), 1);
    /// ```
    pub fn insert(&mut self, key: T) -> bool
    where
        T: Ord,
    {
        let inserted = tree::insert(&mut self.tree, key).is_some();
        if inserted {
            self.len += 1;
        }
        inserted
    }

    /// Removes a key from the set. Returns `false` if the key does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// set.insert(1);
    /// assert!(set.remove(&1));
    /// assert!(!set.remove(&1));
    /// ```
    pub fn remove(&mut self, key: &T) -> bool
    where
        T: Ord,
    {
        let removed = tree::remove(&mut self.tree, key).is_some();
        if removed {
            self.len -= 1;
        }
        removed
    }

    /// Checks if a key exists in the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// set.insert(1);
    /// assert!(!set.contains(&0));
    /// assert!(set.contains(&1));
    /// ```
    pub fn contains(&self, key: &T) -> bool
    where
        T: Ord,
    {
        self.get(key).is_some()
    }

    /// Returns a reference to the stored key equal to `key`, if any.
    pub fn get(&self, key: &T) -> Option<&T>
    where
        T: Ord,
    {
        tree::get(&self.tree, key)
    }

    /// Returns the number of keys in the set.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of nodes on the longest path from the root to a leaf, or 0 if the set
    /// is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::avl_tree::AvlSet;
    ///
    /// let set: AvlSet<u32> = (1..=7).collect();
    /// assert_eq!(set.height(), 3);
    /// ```
    pub fn height(&self) -> usize {
        tree::height(&self.tree)
    }

    /// Clears the set, removing all keys.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// set.insert(1);
    /// set.insert(2);
    /// set.clear();
    /// assert!(set.is_empty());
    /// ```
    pub fn clear(&mut self) {
        debug!("avl: clearing {} keys", self.len);
        self.tree = None;
        self.len = 0;
    }

    /// Returns the minimum key of the set, or `Error::EmptyTree` if the set is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::avl_tree::AvlSet;
    /// use balanced_collections::Error;
    ///
    /// let mut set = AvlSet::new();
    /// assert_eq!(set.min(), Err(Error::EmptyTree));
    /// set.insert(1);
    /// set.insert(3);
    /// assert_eq!(set.min(), Ok(&1));
    /// ```
    pub fn min(&self) -> Result<&T> {
        tree::min(&self.tree).ok_or(Error::EmptyTree)
    }

    /// Returns the maximum key of the set, or `Error::EmptyTree` if the set is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// set.insert(1);
    /// set.insert(3);
    /// assert_eq!(set.max(), Ok(&3));
    /// ```
    pub fn max(&self) -> Result<&T> {
        tree::max(&self.tree).ok_or(Error::EmptyTree)
    }

    /// Calls `visitor` once for every key of the set in the given depth-first order.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::avl_tree::AvlSet;
    /// use balanced_collections::Order;
    ///
    /// let set: AvlSet<u32> = vec![2, 1, 3].into_iter().collect();
    /// let mut keys = Vec::new();
    /// set.traverse(Order::Pre, |key| keys.push(*key));
    /// assert_eq!(keys, vec![2, 1, 3]);
    /// ```
    pub fn traverse<F>(&self, order: Order, mut visitor: F)
    where
        F: FnMut(&T),
    {
        tree::traverse(&self.tree, order, &mut visitor);
    }

    pub fn preorder<F>(&self, visitor: F)
    where
        F: FnMut(&T),
    {
        self.traverse(Order::Pre, visitor);
    }

    pub fn inorder<F>(&self, visitor: F)
    where
        F: FnMut(&T),
    {
        self.traverse(Order::In, visitor);
    }

    pub fn postorder<F>(&self, visitor: F)
    where
        F: FnMut(&T),
    {
        self.traverse(Order::Post, visitor);
    }

    /// Returns an iterator over the set. The iterator will yield keys using in-order traversal.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// set.insert(1);
    /// set.insert(3);
    ///
    /// let mut iterator = set.iter();
    /// assert_eq!(iterator.next(), Some(&1));
    /// assert_eq!(iterator.next(), Some(&3));
    /// assert_eq!(iterator.next(), None);
    /// ```
    pub fn iter(&self) -> AvlSetIter<'_, T> {
        AvlSetIter {
            current: &self.tree,
            stack: Vec::new(),
        }
    }
}

impl<T> OrderedSet<T> for AvlSet<T>
where
    T: Ord,
{
    fn insert(&mut self, key: T) -> bool {
        AvlSet::insert(self, key)
    }

    fn remove(&mut self, key: &T) -> bool {
        AvlSet::remove(self, key)
    }

    fn contains(&self, key: &T) -> bool {
        AvlSet::contains(self, key)
    }

    fn len(&self) -> usize {
        self.len
    }

    fn clear(&mut self) {
        AvlSet::clear(self);
    }

    fn min(&self) -> Result<&T> {
        AvlSet::min(self)
    }

    fn max(&self) -> Result<&T> {
        AvlSet::max(self)
    }

    fn traverse<F>(&self, order: Order, visitor: F)
    where
        F: FnMut(&T),
    {
        AvlSet::traverse(self, order, visitor);
    }
}

impl<T> IntoIterator for AvlSet<T> {
    type IntoIter = AvlSetIntoIter<T>;
    type Item = T;

    fn into_iter(self) -> Self::IntoIter {
        Self::IntoIter {
            current: self.tree,
            stack: Vec::new(),
        }
    }
}

impl<'a, T> IntoIterator for &'a AvlSet<T>
where
    T: 'a,
{
    type IntoIter = AvlSetIter<'a, T>;
    type Item = &'a T;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An owning iterator for `AvlSet<T>`.
///
/// This iterator traverses the elements of the set in-order and yields owned keys.
pub struct AvlSetIntoIter<T> {
    current: tree::Tree<T>,
    stack: Vec<Node<T>>,
}

impl<T> Iterator for AvlSetIntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(mut node) = self.current.take() {
            self.current = node.left.take();
            self.stack.push(*node);
        }
        self.stack.pop().map(|node| {
            let Node { key, right, .. } = node;
            self.current = right;
            key
        })
    }
}

/// An iterator for `AvlSet<T>`.
///
/// This iterator traverses the elements of the set in-order and yields immutable references.
pub struct AvlSetIter<'a, T> {
    current: &'a tree::Tree<T>,
    stack: Vec<&'a Node<T>>,
}

impl<'a, T> Iterator for AvlSetIter<'a, T>
where
    T: 'a,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(ref node) = self.current {
            self.current = &node.left;
            self.stack.push(node);
        }
        self.stack.pop().map(|node| {
            let Node {
                ref key, ref right, ..
            } = node;
            self.current = right;
            key
        })
    }
}

impl<T> Default for AvlSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<T> for AvlSet<T>
where
    T: Ord,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut set = AvlSet::new();
        set.extend(iter);
        set
    }
}

impl<T> Extend<T> for AvlSet<T>
where
    T: Ord,
{
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = T>,
    {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<T> PartialEq for AvlSet<T>
where
    T: PartialEq,
{
    fn eq(&self, other: &AvlSet<T>) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T> Eq for AvlSet<T> where T: Eq {}

impl<T> fmt::Debug for AvlSet<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
