use alloc::string::String;
use core::borrow::Borrow;
use core::fmt::{self, Debug};
use core::iter::FusedIterator;

use crate::audit::AuditLog;
use crate::error::{Error, Result};
use crate::raw::{Handle, RawRedBlackTree, SearchResult};

mod cursor;
mod render;

pub use cursor::Cursor;

/// An ordered dictionary of unique elements, backed by a red-black tree.
///
/// Membership tests, insertion, deletion, and predecessor/successor queries take O(log n);
/// [`min`](RedBlackTree::min) and [`max`](RedBlackTree::max) are O(1) reads of cached endpoints.
///
/// Every dictionary operation is audited: the tree counts the key comparisons the call performs
/// and appends a line to an internal log, which [`log_string`](RedBlackTree::log_string) returns
/// and clears. Each line has the form
/// `Operation <name>(<arguments>) completed using <n> comparison(s).` Calls that return an error
/// are not recorded. The structural helpers ([`len`](RedBlackTree::len),
/// [`iter`](RedBlackTree::iter), formatting) are neither counted nor recorded.
///
/// It is a logic error for an element to be modified in such a way that its ordering relative
/// to any other element, as determined by the [`Ord`] trait, changes while it is in the tree.
///
/// # Examples
///
/// ```
/// use rbdict::RedBlackTree;
///
/// let mut tree = RedBlackTree::new();
/// for key in [10, 20, 30, 15, 25, 5] {
///     tree.add(key);
/// }
///
/// assert_eq!(tree.iter().copied().collect::<Vec<_>>(), [5, 10, 15, 20, 25, 30]);
/// assert_eq!(tree.predecessor(&20), Ok(&15));
/// assert_eq!(tree.successor(&20), Ok(&25));
/// assert!(!tree.has_predecessor(&5));
///
/// assert!(tree.delete(&30));
/// assert_eq!(tree.max(), Ok(&25));
///
/// let log = tree.log_string();
/// assert!(log.ends_with("Operation max() completed using 0 comparison(s).\n"));
/// assert_eq!(tree.log_string(), "");
/// ```
#[derive(Clone)]
pub struct RedBlackTree<T> {
    raw: RawRedBlackTree<T>,
    log: AuditLog,
}

/// An iterator over the elements of a `RedBlackTree`, in ascending order.
///
/// This `struct` is created by the [`iter`] method on [`RedBlackTree`]. Unlike a [`Cursor`] it
/// only borrows the tree, performs no comparisons, and is not recorded in the log.
///
/// # Examples
///
/// ```
/// use rbdict::RedBlackTree;
///
/// let tree = RedBlackTree::from([3, 1, 2]);
/// let mut iter = tree.iter();
/// assert_eq!(iter.next(), Some(&1));
/// assert_eq!(iter.next_back(), Some(&3));
/// assert_eq!(iter.next(), Some(&2));
/// assert_eq!(iter.next(), None);
/// ```
///
/// [`iter`]: RedBlackTree::iter
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, T: 'a> {
    raw: &'a RawRedBlackTree<T>,
    front: Option<Handle>,
    back: Option<Handle>,
    remaining: usize,
}

impl<T> RedBlackTree<T> {
    /// Makes a new, empty `RedBlackTree`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbdict::RedBlackTree;
    ///
    /// let mut tree: RedBlackTree<i32> = RedBlackTree::new();
    /// assert!(tree.is_empty());
    /// ```
    #[must_use]
    pub const fn new() -> Self {
        RedBlackTree {
            raw: RawRedBlackTree::new(),
            log: AuditLog::new(),
        }
    }

    /// Returns `true` if the tree contains no elements.
    ///
    /// # Complexity
    ///
    /// O(1)
    pub fn is_empty(&self) -> bool {
        self.raw.reset_comparisons();
        let empty = self.raw.is_empty();
        self.record(format_args!("is_empty()"));
        empty
    }

    /// Returns the number of elements in the tree. Not recorded in the log.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbdict::RedBlackTree;
    ///
    /// let tree = RedBlackTree::from([1, 2, 2, 3]);
    /// assert_eq!(tree.len(), 3);
    /// ```
    #[must_use]
    pub const fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns the number of key comparisons made by the most recent recorded operation.
    #[must_use]
    pub fn comparisons(&self) -> usize {
        self.raw.comparisons()
    }

    /// Returns every log line recorded since the tree was created or since the previous call,
    /// oldest first, and clears the log.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbdict::RedBlackTree;
    ///
    /// let mut tree = RedBlackTree::new();
    /// tree.add(1);
    /// assert_eq!(tree.log_string(), "Operation add(1) completed using 0 comparison(s).\n");
    /// assert_eq!(tree.log_string(), "");
    /// ```
    #[must_use]
    pub fn log_string(&self) -> String {
        self.log.take()
    }

    /// Returns the least element.
    ///
    /// # Errors
    ///
    /// [`Error::Empty`] if the tree has no elements.
    ///
    /// # Complexity
    ///
    /// O(1) - reads the cached leftmost node.
    pub fn min(&self) -> Result<&T> {
        self.raw.reset_comparisons();
        match self.raw.first() {
            Some(handle) => {
                self.record(format_args!("min()"));
                Ok(self.raw.key(handle))
            }
            None => fail(format_args!("min()"), Error::Empty),
        }
    }

    /// Returns the greatest element.
    ///
    /// # Errors
    ///
    /// [`Error::Empty`] if the tree has no elements.
    ///
    /// # Complexity
    ///
    /// O(1) - reads the cached rightmost node.
    pub fn max(&self) -> Result<&T> {
        self.raw.reset_comparisons();
        match self.raw.last() {
            Some(handle) => {
                self.record(format_args!("max()"));
                Ok(self.raw.key(handle))
            }
            None => fail(format_args!("max()"), Error::Empty),
        }
    }

    /// Gets an iterator that visits the elements in ascending order.
    ///
    /// # Complexity
    ///
    /// O(1) to create the iterator; amortized O(1) per step.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            raw: &self.raw,
            front: self.raw.first(),
            back: self.raw.last(),
            remaining: self.raw.len(),
        }
    }

    fn record(&self, operation: fmt::Arguments<'_>) {
        self.log.record(operation, self.raw.comparisons());
    }
}

impl<T: Ord + Debug> RedBlackTree<T> {
    /// Returns `true` if the tree contains an element equal to `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbdict::RedBlackTree;
    ///
    /// let tree = RedBlackTree::from([1, 2, 3]);
    /// assert!(tree.contains(&1));
    /// assert!(!tree.contains(&4));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n); one comparison per node on the search path.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord + Debug,
    {
        self.raw.reset_comparisons();
        let found = self.raw.locate(key).is_some();
        self.record(format_args!("contains({key:?})"));
        found
    }

    /// Returns `true` if some element is strictly less than `key`. `key` need not be present.
    ///
    /// # Complexity
    ///
    /// O(1); one comparison against the cached minimum.
    pub fn has_predecessor<Q>(&self, key: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord + Debug,
    {
        self.raw.reset_comparisons();
        let exists = self.raw.has_predecessor(key);
        self.record(format_args!("has_predecessor({key:?})"));
        exists
    }

    /// Returns `true` if some element is strictly greater than `key`. `key` need not be present.
    ///
    /// # Complexity
    ///
    /// O(1); one comparison against the cached maximum.
    pub fn has_successor<Q>(&self, key: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord + Debug,
    {
        self.raw.reset_comparisons();
        let exists = self.raw.has_successor(key);
        self.record(format_args!("has_successor({key:?})"));
        exists
    }

    /// Returns the greatest element strictly less than `key`.
    ///
    /// # Errors
    ///
    /// [`Error::NoPredecessor`] if [`has_predecessor`](RedBlackTree::has_predecessor) is false.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbdict::{Error, RedBlackTree};
    ///
    /// let tree = RedBlackTree::from([10, 20, 30]);
    /// assert_eq!(tree.predecessor(&20), Ok(&10));
    /// assert_eq!(tree.predecessor(&25), Ok(&20));
    /// assert_eq!(tree.predecessor(&10), Err(Error::NoPredecessor));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn predecessor<Q>(&self, key: &Q) -> Result<&T>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord + Debug,
    {
        self.raw.reset_comparisons();
        let found = if self.raw.has_predecessor(key) { self.raw.predecessor(key) } else { None };
        match found {
            Some(handle) => {
                self.record(format_args!("predecessor({key:?})"));
                Ok(self.raw.key(handle))
            }
            None => fail(format_args!("predecessor({key:?})"), Error::NoPredecessor),
        }
    }

    /// Returns the least element strictly greater than `key`.
    ///
    /// # Errors
    ///
    /// [`Error::NoSuccessor`] if [`has_successor`](RedBlackTree::has_successor) is false.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbdict::{Error, RedBlackTree};
    ///
    /// let tree = RedBlackTree::from([10, 20, 30]);
    /// assert_eq!(tree.successor(&20), Ok(&30));
    /// assert_eq!(tree.successor(&0), Ok(&10));
    /// assert_eq!(tree.successor(&30), Err(Error::NoSuccessor));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn successor<Q>(&self, key: &Q) -> Result<&T>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord + Debug,
    {
        self.raw.reset_comparisons();
        let found = if self.raw.has_successor(key) { self.raw.successor(key) } else { None };
        match found {
            Some(handle) => {
                self.record(format_args!("successor({key:?})"));
                Ok(self.raw.key(handle))
            }
            None => fail(format_args!("successor({key:?})"), Error::NoSuccessor),
        }
    }

    /// Adds an element to the tree.
    ///
    /// Returns whether the element was newly inserted. If an equal element is already present,
    /// `false` is returned and the tree is left unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbdict::RedBlackTree;
    ///
    /// let mut tree = RedBlackTree::new();
    /// assert!(tree.add(2));
    /// assert!(!tree.add(2));
    /// assert_eq!(tree.len(), 1);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn add(&mut self, key: T) -> bool {
        self.raw.reset_comparisons();
        match self.raw.insert(key) {
            Ok(handle) => {
                self.record(format_args!("add({:?})", self.raw.key(handle)));
                true
            }
            Err(key) => {
                self.record(format_args!("add({key:?})"));
                false
            }
        }
    }

    /// Removes the element equal to `key`. Returns whether such an element was present.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbdict::RedBlackTree;
    ///
    /// let mut tree = RedBlackTree::from([2]);
    /// assert!(tree.delete(&2));
    /// assert!(!tree.delete(&2));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn delete<Q>(&mut self, key: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord + Debug,
    {
        self.raw.reset_comparisons();
        let removed = self.raw.delete(key).is_some();
        self.record(format_args!("delete({key:?})"));
        removed
    }

    /// Returns a cursor positioned on the least element.
    ///
    /// The cursor borrows the tree mutably, so the tree can only change through
    /// [`Cursor::remove`] while it is alive.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbdict::RedBlackTree;
    ///
    /// let mut tree = RedBlackTree::from([1, 2, 3, 4]);
    /// let mut cursor = tree.cursor();
    /// while cursor.has_next() {
    ///     if cursor.next()? % 2 == 0 {
    ///         cursor.remove()?;
    ///     }
    /// }
    /// assert_eq!(tree.iter().copied().collect::<Vec<_>>(), [1, 3]);
    /// # Ok::<(), rbdict::Error>(())
    /// ```
    pub fn cursor(&mut self) -> Cursor<'_, T> {
        self.raw.reset_comparisons();
        let next = self.raw.first();
        self.record(format_args!("cursor()"));
        Cursor::new(self, next)
    }

    /// Returns a cursor positioned on the least element greater than or equal to `start`.
    ///
    /// The cursor is already exhausted when every element is less than `start`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbdict::RedBlackTree;
    ///
    /// let mut tree = RedBlackTree::from([10, 20, 30]);
    /// let mut cursor = tree.cursor_from(&15);
    /// assert_eq!(cursor.next(), Ok(&20));
    /// assert_eq!(cursor.next(), Ok(&30));
    /// assert!(!cursor.has_next());
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn cursor_from<Q>(&mut self, start: &Q) -> Cursor<'_, T>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord + Debug,
    {
        self.raw.reset_comparisons();
        let next = self.raw.locate_min_greater_than(start).map(SearchResult::handle);
        self.record(format_args!("cursor_from({start:?})"));
        Cursor::new(self, next)
    }
}

/// Logs a failed operation and returns its error.
fn fail<V>(operation: fmt::Arguments<'_>, error: Error) -> Result<V> {
    log::debug!("{operation} failed: {error}");
    Err(error)
}

impl<T: Debug> Debug for RedBlackTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T> Default for RedBlackTree<T> {
    fn default() -> Self {
        RedBlackTree::new()
    }
}

impl<T: Ord + Debug> FromIterator<T> for RedBlackTree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = RedBlackTree::new();
        tree.extend(iter);
        tree
    }
}

impl<T: Ord + Debug> Extend<T> for RedBlackTree<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for key in iter {
            self.add(key);
        }
    }
}

impl<T: Ord + Debug, const N: usize> From<[T; N]> for RedBlackTree<T> {
    fn from(arr: [T; N]) -> Self {
        arr.into_iter().collect()
    }
}

impl<'a, T> IntoIterator for &'a RedBlackTree<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        let handle = self.front?;
        self.remaining -= 1;
        self.front = self.raw.successor_of(handle);
        Some(self.raw.key(handle))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }

    fn last(mut self) -> Option<&'a T> {
        self.next_back()
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        let handle = self.back?;
        self.remaining -= 1;
        self.back = self.raw.predecessor_of(handle);
        Some(self.raw.key(handle))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Iter { ..*self }
    }
}

impl<T: Debug> Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn iter_meets_in_the_middle() {
        let tree = RedBlackTree::from([1, 2, 3, 4, 5]);
        let mut iter = tree.iter();
        assert_eq!(iter.len(), 5);
        assert_eq!(iter.next(), Some(&1));
        assert_eq!(iter.next_back(), Some(&5));
        assert_eq!(iter.next_back(), Some(&4));
        assert_eq!(iter.next(), Some(&2));
        assert_eq!(iter.next(), Some(&3));
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next_back(), None);
    }

    #[test]
    fn helpers_are_not_recorded() {
        let tree = RedBlackTree::from([3, 1, 2]);
        let _ = tree.log_string();
        let collected: Vec<_> = tree.iter().copied().collect();
        assert_eq!(collected, [1, 2, 3]);
        assert_eq!(tree.len(), 3);
        assert_eq!(tree.log_string(), "");
    }

    #[test]
    fn failed_calls_are_not_recorded() {
        let tree: RedBlackTree<i32> = RedBlackTree::new();
        assert_eq!(tree.min(), Err(Error::Empty));
        assert_eq!(tree.max(), Err(Error::Empty));
        assert_eq!(tree.predecessor(&1), Err(Error::NoPredecessor));
        assert_eq!(tree.successor(&1), Err(Error::NoSuccessor));
        assert_eq!(tree.log_string(), "");
    }
}
