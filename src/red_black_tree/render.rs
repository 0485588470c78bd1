use core::fmt;

use smallvec::{SmallVec, smallvec};

use super::RedBlackTree;
use crate::raw::Handle;

/// Draws the tree structure, one element per line, left subtree before right.
///
/// # Examples
///
/// ```
/// use rbdict::RedBlackTree;
///
/// let tree = RedBlackTree::from([2, 1, 3]);
/// assert_eq!(tree.to_string(), "└── 2\n    ├── 1\n    └── 3\n");
/// ```
impl<T: fmt::Display> fmt::Display for RedBlackTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(root) = self.raw.root() else {
            return f.write_str("└── \n");
        };

        // (node, depth, whether it is the last child drawn under its parent)
        let mut stack: SmallVec<[(Handle, usize, bool); 32]> = smallvec![(root, 0, true)];
        // `rails[d]` holds whether the open ancestor at depth `d` was a last child.
        let mut rails: SmallVec<[bool; 32]> = SmallVec::new();

        while let Some((node, depth, tail)) = stack.pop() {
            rails.truncate(depth);
            for &closed in &rails {
                f.write_str(if closed { "    " } else { "│   " })?;
            }
            f.write_str(if tail { "└── " } else { "├── " })?;
            writeln!(f, "{}", self.raw.key(node))?;
            rails.push(tail);

            let left = self.raw.left(node);
            let right = self.raw.right(node);
            if !right.is_sentinel() {
                stack.push((right, depth + 1, true));
            }
            if !left.is_sentinel() {
                stack.push((left, depth + 1, right.is_sentinel()));
            }
        }
        Ok(())
    }
}
