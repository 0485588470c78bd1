use core::fmt;

/// The broad class of an [`Error`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ErrorKind {
    /// The requested element does not exist.
    NotFound,
    /// The operation is not valid in the current state.
    IllegalState,
}

/// Errors returned by [`RedBlackTree`](crate::RedBlackTree) and its [`Cursor`](crate::Cursor).
///
/// # Examples
///
/// ```
/// use rbdict::{Error, ErrorKind, RedBlackTree};
///
/// let tree: RedBlackTree<i32> = RedBlackTree::new();
/// assert_eq!(tree.min(), Err(Error::Empty));
/// assert_eq!(Error::Empty.kind(), ErrorKind::NotFound);
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Error {
    /// `min` or `max` was called on an empty dictionary.
    Empty,
    /// No element is strictly less than the given key.
    NoPredecessor,
    /// No element is strictly greater than the given key.
    NoSuccessor,
    /// The cursor has already returned every element.
    Exhausted,
    /// `remove` was called without an unconsumed `next`.
    NothingToRemove,
}

impl Error {
    /// Returns the class of this error.
    #[must_use]
    pub const fn kind(self) -> ErrorKind {
        match self {
            Error::Empty | Error::NoPredecessor | Error::NoSuccessor | Error::Exhausted => ErrorKind::NotFound,
            Error::NothingToRemove => ErrorKind::IllegalState,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            Error::Empty => "dictionary is empty",
            Error::NoPredecessor => "argument does not have a predecessor",
            Error::NoSuccessor => "argument does not have a successor",
            Error::Exhausted => "no further elements",
            Error::NothingToRemove => "`next` has not been called since construction or the last `remove`",
        };
        f.write_str(message)
    }
}

impl core::error::Error for Error {}

/// Shorthand for results carrying an [`Error`].
pub type Result<T> = core::result::Result<T, Error>;

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn kinds() {
        assert_eq!(Error::Empty.kind(), ErrorKind::NotFound);
        assert_eq!(Error::NoPredecessor.kind(), ErrorKind::NotFound);
        assert_eq!(Error::NoSuccessor.kind(), ErrorKind::NotFound);
        assert_eq!(Error::Exhausted.kind(), ErrorKind::NotFound);
        assert_eq!(Error::NothingToRemove.kind(), ErrorKind::IllegalState);
    }

    #[test]
    fn display() {
        assert_eq!(Error::Empty.to_string(), "dictionary is empty");
        assert_eq!(Error::Exhausted.to_string(), "no further elements");
    }
}
