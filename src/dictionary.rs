use alloc::string::String;
use core::fmt::Debug;

use crate::error::Result;
use crate::red_black_tree::{Cursor, RedBlackTree};

/// An ordered collection of unique elements with an operation audit log.
///
/// Implementations count the key comparisons each operation makes and record one log line per
/// completed operation, retrievable (and cleared) through [`log_string`](Dictionary::log_string).
///
/// # Examples
///
/// ```
/// use rbdict::{Dictionary, DictionaryCursor, RedBlackTree};
///
/// fn drain_evens<D: Dictionary<i32>>(dictionary: &mut D) {
///     let mut cursor = dictionary.cursor();
///     while cursor.has_next() {
///         if cursor.next().is_ok_and(|key| key % 2 == 0) {
///             let _ = cursor.remove();
///         }
///     }
/// }
///
/// let mut tree = RedBlackTree::from([1, 2, 3, 4]);
/// drain_evens(&mut tree);
/// assert!(Dictionary::contains(&tree, &3));
/// assert!(!Dictionary::contains(&tree, &4));
/// ```
pub trait Dictionary<T> {
    /// The cursor returned by [`cursor`](Dictionary::cursor) and
    /// [`cursor_from`](Dictionary::cursor_from).
    type Cursor<'a>: DictionaryCursor<T>
    where
        Self: 'a;

    /// Returns `true` if the dictionary holds no elements.
    fn is_empty(&self) -> bool;

    /// Returns `true` if the dictionary holds an element equal to `item`.
    fn contains(&self, item: &T) -> bool;

    /// Returns `true` if some element is strictly less than `item`.
    fn has_predecessor(&self, item: &T) -> bool;

    /// Returns `true` if some element is strictly greater than `item`.
    fn has_successor(&self, item: &T) -> bool;

    /// Returns the greatest element strictly less than `item`.
    ///
    /// # Errors
    ///
    /// A `NotFound` error if there is no such element.
    fn predecessor(&self, item: &T) -> Result<&T>;

    /// Returns the least element strictly greater than `item`.
    ///
    /// # Errors
    ///
    /// A `NotFound` error if there is no such element.
    fn successor(&self, item: &T) -> Result<&T>;

    /// Returns the least element.
    ///
    /// # Errors
    ///
    /// A `NotFound` error if the dictionary is empty.
    fn min(&self) -> Result<&T>;

    /// Returns the greatest element.
    ///
    /// # Errors
    ///
    /// A `NotFound` error if the dictionary is empty.
    fn max(&self) -> Result<&T>;

    /// Adds `item`; returns `false` without change if an equal element is present.
    fn add(&mut self, item: T) -> bool;

    /// Removes the element equal to `item`; returns whether one was present.
    fn delete(&mut self, item: &T) -> bool;

    /// Returns a cursor over every element in ascending order.
    fn cursor(&mut self) -> Self::Cursor<'_>;

    /// Returns a cursor starting at the least element greater than or equal to `start`.
    fn cursor_from(&mut self, start: &T) -> Self::Cursor<'_>;

    /// Returns the accumulated log and clears it.
    fn log_string(&self) -> String;
}

/// An ascending cursor that can remove the element it last returned.
pub trait DictionaryCursor<T> {
    /// Returns `true` if another element remains.
    fn has_next(&self) -> bool;

    /// Returns the next element and advances.
    ///
    /// # Errors
    ///
    /// A `NotFound` error once the cursor is exhausted.
    fn next(&mut self) -> Result<&T>;

    /// Removes the element last returned by [`next`](DictionaryCursor::next).
    ///
    /// # Errors
    ///
    /// An `IllegalState` error if there is no unconsumed `next`.
    fn remove(&mut self) -> Result<T>;
}

impl<T: Ord + Debug> Dictionary<T> for RedBlackTree<T> {
    type Cursor<'a>
        = Cursor<'a, T>
    where
        Self: 'a;

    fn is_empty(&self) -> bool {
        RedBlackTree::is_empty(self)
    }

    fn contains(&self, item: &T) -> bool {
        RedBlackTree::contains(self, item)
    }

    fn has_predecessor(&self, item: &T) -> bool {
        RedBlackTree::has_predecessor(self, item)
    }

    fn has_successor(&self, item: &T) -> bool {
        RedBlackTree::has_successor(self, item)
    }

    fn predecessor(&self, item: &T) -> Result<&T> {
        RedBlackTree::predecessor(self, item)
    }

    fn successor(&self, item: &T) -> Result<&T> {
        RedBlackTree::successor(self, item)
    }

    fn min(&self) -> Result<&T> {
        RedBlackTree::min(self)
    }

    fn max(&self) -> Result<&T> {
        RedBlackTree::max(self)
    }

    fn add(&mut self, item: T) -> bool {
        RedBlackTree::add(self, item)
    }

    fn delete(&mut self, item: &T) -> bool {
        RedBlackTree::delete(self, item)
    }

    fn cursor(&mut self) -> Cursor<'_, T> {
        RedBlackTree::cursor(self)
    }

    fn cursor_from(&mut self, start: &T) -> Cursor<'_, T> {
        RedBlackTree::cursor_from(self, start)
    }

    fn log_string(&self) -> String {
        RedBlackTree::log_string(self)
    }
}

impl<T: Debug> DictionaryCursor<T> for Cursor<'_, T> {
    fn has_next(&self) -> bool {
        Cursor::has_next(self)
    }

    fn next(&mut self) -> Result<&T> {
        Cursor::next(self)
    }

    fn remove(&mut self) -> Result<T> {
        Cursor::remove(self)
    }
}
