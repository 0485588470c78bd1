//! An instrumented ordered dictionary for Rust, backed by a red-black tree.
//!
//! This crate provides [`RedBlackTree`], a set of unique, totally ordered elements with:
//!
//! - O(log n) [`contains`](RedBlackTree::contains), [`add`](RedBlackTree::add) and
//!   [`delete`](RedBlackTree::delete)
//! - O(log n) [`predecessor`](RedBlackTree::predecessor) and
//!   [`successor`](RedBlackTree::successor) of any key, present or not
//! - O(1) [`min`](RedBlackTree::min) and [`max`](RedBlackTree::max)
//! - A [`Cursor`] that walks the elements in order and can remove the one it just returned
//! - A per-operation audit: the number of key comparisons each call made, and a textual log
//!   of completed operations
//!
//! # Example
//!
//! ```
//! use rbdict::{Error, RedBlackTree};
//!
//! let mut tree = RedBlackTree::new();
//! for key in [10, 20, 30, 15, 25, 5] {
//!     assert!(tree.add(key));
//! }
//!
//! assert_eq!(tree.predecessor(&20), Ok(&15));
//! assert_eq!(tree.successor(&20), Ok(&25));
//! assert_eq!(tree.min(), Ok(&5));
//!
//! // Remove every element through a cursor.
//! let mut cursor = tree.cursor();
//! while cursor.has_next() {
//!     cursor.next()?;
//!     cursor.remove()?;
//! }
//! assert!(tree.is_empty());
//! assert_eq!(tree.max(), Err(Error::Empty));
//!
//! // One line per completed operation.
//! let log = tree.log_string();
//! assert!(log.starts_with("Operation add(10) completed using 0 comparison(s).\n"));
//! assert!(log.contains("Operation remove(5) completed using 0 comparison(s).\n"));
//! # Ok::<(), Error>(())
//! ```
//!
//! # Implementation
//!
//! Nodes live in an arena and refer to each other by index, so the parent/child cycles of the
//! tree need no reference counting. A single reserved index stands for every empty leaf and for
//! the parent of the root; it is always black, which lets the rebalancing code treat a missing
//! uncle or sibling like any other black node.

#![no_std]
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;

mod audit;
mod raw;

pub mod dictionary;
pub mod error;
pub mod red_black_tree;

pub use dictionary::{Dictionary, DictionaryCursor};
pub use error::{Error, ErrorKind, Result};
pub use red_black_tree::{Cursor, RedBlackTree};
