use crate::error::Result;
use crate::traversal::Order;

/// The contract shared by every balanced set in this crate.
///
/// Keys are unique and totally ordered. Behaviour is unspecified if the ordering of stored keys
/// changes while they are in the set.
pub trait OrderedSet<T>
where
    T: Ord,
{
    /// Inserts a key. Returns `false` and leaves the set untouched if the key is already present.
    fn insert(&mut self, key: T) -> bool;

    /// Removes a key. Returns `false` and leaves the set untouched if the key is absent.
    fn remove(&mut self, key: &T) -> bool;

    /// Returns `true` if the set contains the key.
    fn contains(&self, key: &T) -> bool;

    /// Returns the number of keys in the set.
    fn len(&self) -> usize;

    /// Returns `true` if the set holds no keys.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes every key from the set.
    fn clear(&mut self);

    /// Returns the smallest key, or `Error::EmptyTree` if the set is empty.
    fn min(&self) -> Result<&T>;

    /// Returns the largest key, or `Error::EmptyTree` if the set is empty.
    fn max(&self) -> Result<&T>;

    /// Calls `visitor` exactly once for every key, in the given depth-first order.
    fn traverse<F>(&self, order: Order, visitor: F)
    where
        F: FnMut(&T);
}
