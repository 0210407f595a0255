use crate::arena::{Handle, DEFAULT_CHUNK_SIZE};
use crate::error::{Error, Result};
use crate::ordered_set::OrderedSet;
use crate::red_black_tree::tree::Tree;
use crate::traversal::Order;
use log::debug;
use std::fmt;
use std::iter::FromIterator;
use std::vec;

/// An ordered set implemented using a red black tree.
///
/// A red black tree is a self-balancing binary search tree where every node is colored red or
/// black, no red node has a red child, and every path from a node to an absent child passes
/// through the same number of black nodes. Together these keep the longest path at most twice
/// as long as the shortest.
///
/// # Examples
///
/// ```
/// use balanced_collections::red_black_tree::RedBlackSet;
///
/// let mut set = RedBlackSet::new();
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
pub struct RedBlackSet<T> {
    tree: Tree<T>,
}

impl<T> RedBlackSet<T> {
    /// Constructs a new, empty `RedBlackSet<T>`.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::red_black_tree::RedBlackSet;
    ///
    /// let set: RedBlackSet<u32> = RedBlackSet::new();
    /// assert!(set.is_empty());
    /// ```
    pub fn new() -> Self {
        Self::with_chunk_size(DEFAULT_CHUNK_SIZE)
    }

    /// Constructs a new, empty `RedBlackSet<T>` whose node storage grows by `chunk_size` nodes at
    /// a time. A chunk size of zero is treated as one.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::red_black_tree::RedBlackSet;
    ///
    /// let set: RedBlackSet<u32> = RedBlackSet::with_chunk_size(64);
    /// assert_eq!(set.chunk_size(), 64);
    /// ```
    pub fn with_chunk_size(chunk_size: usize) -> Self {
        RedBlackSet {
            tree: Tree::new(chunk_size),
        }
    }

    pub fn chunk_size(&self) -> usize {
        self.tree.chunk_size()
    }

    /// Inserts a key into the set. Returns `false` if the key already exists, in which case the
    /// set is left unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// assert!(set.insert(1));
    /// assert!(!set.insert(1));
    /// assert_eq!(set.len(), 1);
    /// ```
    pub fn insert(&mut self, key: T) -> bool
    where
        T: Ord,
    {
        self.tree.insert(key)
    }

    /// Removes a key from the set. Returns `false` if the key does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(1);
    /// assert!(set.remove(&1));
    /// assert!(!set.remove(&1));
    /// ```
    pub fn remove(&mut self, key: &T) -> bool
    where
        T: Ord,
    {
        self.tree.remove(key).is_some()
    }

    /// Removes a key from the set and returns the stored key, or `None` if it does not exist.
    pub fn take(&mut self, key: &T) -> Option<T>
    where
        T: Ord,
    {
        self.tree.remove(key)
    }

    /// Checks if a key exists in the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
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
        self.tree.get(key)
    }

    /// Returns the number of keys in the set.
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns `true` if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the number of nodes on the longest path from the root to a leaf, or 0 if the set
    /// is empty.
    pub fn height(&self) -> usize {
        self.tree.height()
    }

    /// Clears the set, removing all keys and releasing the node storage.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(1);
    /// set.insert(2);
    /// set.clear();
    /// assert!(set.is_empty());
    /// ```
    pub fn clear(&mut self) {
        debug!("red black: clearing {} keys", self.len());
        self.tree.clear();
    }

    /// Returns the minimum key of the set, or `Error::EmptyTree` if the set is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::red_black_tree::RedBlackSet;
    /// use balanced_collections::Error;
    ///
    /// let mut set = RedBlackSet::new();
    /// assert_eq!(set.min(), Err(Error::EmptyTree));
    /// set.insert(1);
    /// set.insert(3);
    /// assert_eq!(set.min(), Ok(&1));
    /// ```
    pub fn min(&self) -> Result<&T> {
        self.tree
            .first()
            .map(|node| self.tree.key(node))
            .ok_or(Error::EmptyTree)
    }

    /// Returns the maximum key of the set, or `Error::EmptyTree` if the set is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(1);
    /// set.insert(3);
    /// assert_eq!(set.max(), Ok(&3));
    /// ```
    pub fn max(&self) -> Result<&T> {
        self.tree
            .last()
            .map(|node| self.tree.key(node))
            .ok_or(Error::EmptyTree)
    }

    /// Calls `visitor` once for every key of the set in the given depth-first order.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::red_black_tree::RedBlackSet;
    /// use balanced_collections::Order;
    ///
    /// let set: RedBlackSet<u32> = vec![1, 2, 3].into_iter().collect();
    /// let mut keys = Vec::new();
    /// set.traverse(Order::Post, |key| keys.push(*key));
    /// assert_eq!(keys, vec![1, 3, 2]);
    /// ```
    pub fn traverse<F>(&self, order: Order, mut visitor: F)
    where
        F: FnMut(&T),
    {
        self.tree.traverse(order, &mut visitor);
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
    /// use balanced_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(1);
    /// set.insert(3);
    ///
    /// let mut iterator = set.iter();
    /// assert_eq!(iterator.next(), Some(&1));
    /// assert_eq!(iterator.next(), Some(&3));
    /// assert_eq!(iterator.next(), None);
    /// ```
    pub fn iter(&self) -> RedBlackSetIter<'_, T> {
        RedBlackSetIter {
            tree: &self.tree,
            next: self.tree.first(),
            remaining: self.len(),
        }
    }
}

impl<T> OrderedSet<T> for RedBlackSet<T>
where
    T: Ord,
{
    fn insert(&mut self, key: T) -> bool {
        RedBlackSet::insert(self, key)
    }

    fn remove(&mut self, key: &T) -> bool {
        RedBlackSet::remove(self, key)
    }

    fn contains(&self, key: &T) -> bool {
        RedBlackSet::contains(self, key)
    }

    fn len(&self) -> usize {
        self.tree.len()
    }

    fn clear(&mut self) {
        RedBlackSet::clear(self);
    }

    fn min(&self) -> Result<&T> {
        RedBlackSet::min(self)
    }

    fn max(&self) -> Result<&T> {
        RedBlackSet::max(self)
    }

    fn traverse<F>(&self, order: Order, visitor: F)
    where
        F: FnMut(&T),
    {
        RedBlackSet::traverse(self, order, visitor);
    }
}

impl<T> IntoIterator for RedBlackSet<T> {
    type IntoIter = RedBlackSetIntoIter<T>;
    type Item = T;

    fn into_iter(self) -> Self::IntoIter {
        Self::IntoIter {
            keys: self.tree.into_sorted_keys().into_iter(),
        }
    }
}

impl<'a, T> IntoIterator for &'a RedBlackSet<T>
where
    T: 'a,
{
    type IntoIter = RedBlackSetIter<'a, T>;
    type Item = &'a T;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An owning iterator for `RedBlackSet<T>`.
///
/// This iterator traverses the elements of the set in-order and yields owned keys.
pub struct RedBlackSetIntoIter<T> {
    keys: vec::IntoIter<T>,
}

impl<T> Iterator for RedBlackSetIntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.keys.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.keys.size_hint()
    }
}

/// An iterator for `RedBlackSet<T>`.
///
/// This iterator follows parent links from each node to its in-order successor and yields
/// immutable references.
pub struct RedBlackSetIter<'a, T> {
    tree: &'a Tree<T>,
    next: Option<Handle>,
    remaining: usize,
}

impl<'a, T> Iterator for RedBlackSetIter<'a, T>
where
    T: 'a,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.next?;
        self.next = self.tree.successor(node);
        self.remaining -= 1;
        Some(self.tree.key(node))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> Default for RedBlackSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<T> for RedBlackSet<T>
where
    T: Ord,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut set = RedBlackSet::new();
        set.extend(iter);
        set
    }
}

impl<T> Extend<T> for RedBlackSet<T>
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

impl<T> PartialEq for RedBlackSet<T>
where
    T: PartialEq,
{
    fn eq(&self, other: &RedBlackSet<T>) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T> Eq for RedBlackSet<T> where T: Eq {}

impl<T> fmt::Debug for RedBlackSet<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::RedBlackSet;
    use crate::error::Error;
    use crate::red_black_tree::tree::tests::check;
    use crate::traversal::Order;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::collections::BTreeSet;
    use std::mem;

    #[test]
    fn test_len_empty() {
        let set: RedBlackSet<u32> = RedBlackSet::new();
        assert_eq!(set.len(), 0);
    }

    #[test]
    fn test_is_empty() {
        let set: RedBlackSet<u32> = RedBlackSet::new();
        assert!(set.is_empty());
    }

    #[test]
    fn test_min_max_empty() {
        let set: RedBlackSet<u32> = RedBlackSet::new();
        assert_eq!(set.min(), Err(Error::EmptyTree));
        assert_eq!(set.max(), Err(Error::EmptyTree));
    }

    #[test]
    fn test_insert() {
        let mut set = RedBlackSet::new();
        assert!(set.insert(1));
        assert!(set.contains(&1));
        assert_eq!(set.get(&1), Some(&1));
    }

    #[test]
    fn test_insert_duplicate() {
        let mut set = RedBlackSet::new();
        assert!(set.insert(1));
        assert!(!set.insert(1));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_remove() {
        let mut set = RedBlackSet::new();
        set.insert(1);
        assert!(set.remove(&1));
        assert!(!set.contains(&1));
        assert!(!set.remove(&1));
        assert_eq!(set.len(), 0);
    }

    #[test]
    fn test_take() {
        let mut set = RedBlackSet::new();
        set.insert(String::from("a"));
        assert_eq!(set.take(&String::from("a")), Some(String::from("a")));
        assert_eq!(set.take(&String::from("a")), None);
    }

    #[test]
    fn test_min_max() {
        let mut set = RedBlackSet::new();
        set.insert(1);
        set.insert(3);
        set.insert(5);

        assert_eq!(set.min(), Ok(&1));
        assert_eq!(set.max(), Ok(&5));
    }

    #[test]
    fn test_clear() {
        let mut set: RedBlackSet<u32> = (0..10).collect();
        set.clear();
        assert!(set.is_empty());
        assert_eq!(set.height(), 0);
        assert_eq!(set.max(), Err(Error::EmptyTree));
        assert!(set.insert(4));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_remove_two_children_replaces_with_successor() {
        let mut set: RedBlackSet<u32> = vec![20, 10, 30, 5, 15, 25, 35].into_iter().collect();
        assert!(set.remove(&20));
        check(&set.tree);

        let mut keys = Vec::new();
        set.preorder(|key| keys.push(*key));
        assert_eq!(keys[0], 25);
        assert_eq!(
            set.iter().cloned().collect::<Vec<u32>>(),
            vec![5, 10, 15, 25, 30, 35]
        );
    }

    #[test]
    fn test_traverse_visits_once() {
        let set: RedBlackSet<u32> = (0..100).collect();
        for order in &[Order::Pre, Order::In, Order::Post] {
            let mut count = 0;
            set.traverse(*order, |_| count += 1);
            assert_eq!(count, 100);
        }

        let mut keys = Vec::new();
        set.inorder(|key| keys.push(*key));
        assert_eq!(keys, (0..100).collect::<Vec<u32>>());
    }

    #[test]
    fn test_ascending_inserts_height() {
        let set: RedBlackSet<u32> = (0..1024).collect();
        check(&set.tree);
        // 2 * log2(n + 1)
        assert!(set.height() <= 20);
    }

    #[test]
    fn test_clone_is_independent() {
        let mut set: RedBlackSet<u32> = (0..20).collect();
        let copy = set.clone();
        check(&copy.tree);
        set.remove(&5);
        set.insert(100);

        assert!(copy.contains(&5));
        assert!(!copy.contains(&100));
        assert_eq!(copy.len(), 20);
        assert_eq!(copy.iter().cloned().collect::<Vec<u32>>(), (0..20).collect::<Vec<u32>>());
    }

    #[test]
    fn test_take_leaves_source_empty() {
        let mut set: RedBlackSet<u32> = (0..5).collect();
        let moved = mem::take(&mut set);
        assert!(set.is_empty());
        assert_eq!(moved.len(), 5);
    }

    #[test]
    fn test_into_iter() {
        let mut set = RedBlackSet::new();
        set.insert(1);
        set.insert(5);
        set.insert(3);

        assert_eq!(set.into_iter().collect::<Vec<u32>>(), vec![1, 3, 5]);
    }

    #[test]
    fn test_iter() {
        let mut set = RedBlackSet::new();
        set.insert(1);
        set.insert(5);
        set.insert(3);

        let iter = set.iter();
        assert_eq!(iter.size_hint(), (3, Some(3)));
        assert_eq!(iter.collect::<Vec<&u32>>(), vec![&1, &3, &5]);
    }

    #[test]
    fn test_debug() {
        let set: RedBlackSet<u32> = vec![3, 1, 2].into_iter().collect();
        assert_eq!(format!("{:?}", set), "{1, 2, 3}");
    }

    #[test]
    fn test_random_operations_keep_invariants() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut set = RedBlackSet::with_chunk_size(16);
        let mut expected = BTreeSet::new();

        for _ in 0..5_000 {
            let key = rng.gen_range(0..500u32);
            if rng.gen_bool(0.6) {
                assert_eq!(set.insert(key), expected.insert(key));
            } else {
                assert_eq!(set.remove(&key), expected.remove(&key));
            }
            check(&set.tree);
            assert_eq!(set.len(), expected.len());
        }

        assert!(set.iter().eq(expected.iter()));
    }
}
