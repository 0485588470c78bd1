use core::fmt::{self, Debug};

use super::{RedBlackTree, fail};
use crate::error::{Error, Result};
use crate::raw::Handle;

/// A cursor over the elements of a [`RedBlackTree`] in ascending order, which can remove the
/// element it last returned.
///
/// This `struct` is created by the [`cursor`] and [`cursor_from`] methods on [`RedBlackTree`].
/// The cursor holds the tree's only mutable borrow, so the tree cannot be modified behind its
/// back.
///
/// # Examples
///
/// ```
/// use rbdict::{Error, RedBlackTree};
///
/// let mut tree = RedBlackTree::from([1, 2, 3]);
/// let mut cursor = tree.cursor();
/// assert_eq!(cursor.remove(), Err(Error::NothingToRemove));
/// assert_eq!(cursor.next(), Ok(&1));
/// assert_eq!(cursor.remove(), Ok(1));
/// assert_eq!(cursor.next(), Ok(&2));
/// assert_eq!(cursor.next(), Ok(&3));
/// assert_eq!(cursor.next(), Err(Error::Exhausted));
/// assert_eq!(tree.len(), 2);
/// ```
///
/// [`cursor`]: RedBlackTree::cursor
/// [`cursor_from`]: RedBlackTree::cursor_from
pub struct Cursor<'a, T> {
    tree: &'a mut RedBlackTree<T>,
    /// The node the next call to `next` returns.
    next: Option<Handle>,
    /// The node returned by the last `next`, until it is removed.
    last: Option<Handle>,
}

impl<'a, T> Cursor<'a, T> {
    pub(super) fn new(tree: &'a mut RedBlackTree<T>, next: Option<Handle>) -> Self {
        Cursor { tree, next, last: None }
    }

    /// Returns `true` if [`next`](Cursor::next) has another element to return.
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }

    /// Returns the next element and advances the cursor.
    ///
    /// The position after it is computed before returning, so removing the returned element
    /// does not disturb the iteration.
    ///
    /// # Errors
    ///
    /// [`Error::Exhausted`] once every element has been returned.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Result<&T> {
        let Some(current) = self.next else {
            return fail(format_args!("next()"), Error::Exhausted);
        };
        self.last = Some(current);
        self.next = self.tree.raw.successor_of(current);
        Ok(self.tree.raw.key(current))
    }
}

impl<T: Debug> Cursor<'_, T> {
    /// Removes the element returned by the last call to [`next`](Cursor::next) from the tree
    /// and returns it.
    ///
    /// # Errors
    ///
    /// [`Error::NothingToRemove`] if `next` has not been called since the cursor was created or
    /// since the previous `remove`.
    ///
    /// # Complexity
    ///
    /// O(log n); no key comparisons.
    pub fn remove(&mut self) -> Result<T> {
        let Some(last) = self.last.take() else {
            return fail(format_args!("remove()"), Error::NothingToRemove);
        };
        self.tree.raw.reset_comparisons();
        let key = self.tree.raw.remove(last);
        self.tree.record(format_args!("remove({key:?})"));
        Ok(key)
    }
}

impl<T: Debug> Debug for Cursor<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("next", &self.next.map(|handle| self.tree.raw.key(handle)))
            .field("last", &self.last.map(|handle| self.tree.raw.key(handle)))
            .finish()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn remove_twice_is_rejected() {
        let mut tree = RedBlackTree::from([1, 2]);
        let mut cursor = tree.cursor();
        assert_eq!(cursor.next(), Ok(&1));
        assert_eq!(cursor.remove(), Ok(1));
        assert_eq!(cursor.remove(), Err(Error::NothingToRemove));
        assert_eq!(cursor.next(), Ok(&2));
    }

    #[test]
    fn drain_through_cursor() {
        let mut tree: RedBlackTree<i32> = (0..64).rev().collect();
        let mut seen = Vec::new();
        let mut cursor = tree.cursor();
        while cursor.has_next() {
            seen.push(*cursor.next().unwrap());
            cursor.remove().unwrap();
        }
        assert_eq!(seen, (0..64).collect::<Vec<_>>());
        tree.raw.validate_invariants();
        assert_eq!(tree.len(), 0);
        assert_eq!(tree.min(), Err(Error::Empty));
    }

    #[test]
    fn removal_from_the_middle_keeps_order() {
        let mut tree: RedBlackTree<i32> = (0..100).collect();
        let mut cursor = tree.cursor_from(&40);
        for expected in 40..60 {
            assert_eq!(cursor.next(), Ok(&expected));
            if expected % 3 != 0 {
                assert_eq!(cursor.remove(), Ok(expected));
            }
        }
        tree.raw.validate_invariants();
        let kept: Vec<i32> = tree.iter().copied().collect();
        let expected: Vec<i32> = (0..100).filter(|k| !(40..60).contains(k) || k % 3 == 0).collect();
        assert_eq!(kept, expected);
    }
}
