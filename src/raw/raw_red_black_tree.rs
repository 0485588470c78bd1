use core::borrow::Borrow;
use core::cell::Cell;
use core::cmp::Ordering::{self, Equal, Greater, Less};

use super::arena::Arena;
use super::handle::Handle;
use super::node::{Color, Links, Node, Side};

const NIL: Handle = Handle::SENTINEL;

/// The red-black tree engine backing `RedBlackTree`.
///
/// Every absent child, and the parent of the root, is the sentinel handle. Reads and writes
/// through the sentinel land on `sentinel`, which stays black; its parent link is scratch space
/// that deletion uses to climb out of an empty slot.
#[derive(Clone)]
pub(crate) struct RawRedBlackTree<T> {
    /// Arena storing every linked node.
    nodes: Arena<Node<T>>,
    /// Links of the shared empty leaf.
    sentinel: Links,
    root: Handle,
    /// Leftmost node, or the sentinel when empty.
    min: Handle,
    /// Rightmost node, or the sentinel when empty.
    max: Handle,
    /// Key comparisons since the last `reset_comparisons`.
    comparisons: Cell<usize>,
}

/// Result of a bounded descent.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum SearchResult {
    /// A node holding a key equal to the probe.
    Found(Handle),
    /// No equal key; the closest node on the requested side of the probe.
    NotFound(Handle),
}

impl SearchResult {
    pub(crate) const fn handle(self) -> Handle {
        match self {
            SearchResult::Found(handle) | SearchResult::NotFound(handle) => handle,
        }
    }
}

impl<T> RawRedBlackTree<T> {
    /// Creates a new, empty tree.
    pub(crate) const fn new() -> Self {
        Self {
            nodes: Arena::new(),
            sentinel: Links::detached(),
            root: NIL,
            min: NIL,
            max: NIL,
            comparisons: Cell::new(0),
        }
    }

    /// Returns the number of elements in the tree.
    pub(crate) const fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the tree contains no elements.
    pub(crate) fn is_empty(&self) -> bool {
        self.root.is_sentinel()
    }

    pub(crate) fn root(&self) -> Option<Handle> {
        some_node(self.root)
    }

    /// Returns the cached leftmost node.
    pub(crate) fn first(&self) -> Option<Handle> {
        some_node(self.min)
    }

    /// Returns the cached rightmost node.
    pub(crate) fn last(&self) -> Option<Handle> {
        some_node(self.max)
    }

    /// Returns the key held by a linked node. The sentinel holds no key.
    #[inline]
    pub(crate) fn key(&self, handle: Handle) -> &T {
        debug_assert!(!handle.is_sentinel(), "`RawRedBlackTree::key()` - the sentinel has no key!");
        self.nodes.get(handle).key()
    }

    pub(crate) fn comparisons(&self) -> usize {
        self.comparisons.get()
    }

    pub(crate) fn reset_comparisons(&self) {
        self.comparisons.set(0);
    }

    // ─── Links ──────────────────────────────────────────────────────────────

    #[inline]
    fn links(&self, handle: Handle) -> &Links {
        if handle.is_sentinel() { &self.sentinel } else { &self.nodes.get(handle).links }
    }

    #[inline]
    fn links_mut(&mut self, handle: Handle) -> &mut Links {
        if handle.is_sentinel() { &mut self.sentinel } else { &mut self.nodes.get_mut(handle).links }
    }

    #[inline]
    pub(crate) fn child(&self, handle: Handle, side: Side) -> Handle {
        self.links(handle).child(side)
    }

    #[inline]
    pub(crate) fn left(&self, handle: Handle) -> Handle {
        self.links(handle).left
    }

    #[inline]
    pub(crate) fn right(&self, handle: Handle) -> Handle {
        self.links(handle).right
    }

    #[inline]
    fn parent(&self, handle: Handle) -> Handle {
        self.links(handle).parent
    }

    #[inline]
    fn color(&self, handle: Handle) -> Color {
        self.links(handle).color
    }

    #[inline]
    fn is_red(&self, handle: Handle) -> bool {
        self.color(handle) == Color::Red
    }

    #[inline]
    fn set_child(&mut self, handle: Handle, side: Side, child: Handle) {
        self.links_mut(handle).set_child(side, child);
    }

    #[inline]
    fn set_parent(&mut self, handle: Handle, parent: Handle) {
        self.links_mut(handle).parent = parent;
    }

    #[inline]
    fn set_color(&mut self, handle: Handle, color: Color) {
        debug_assert!(
            color == Color::Black || !handle.is_sentinel(),
            "`RawRedBlackTree::set_color()` - the sentinel must stay black!"
        );
        self.links_mut(handle).color = color;
    }

    /// Returns which child slot of its parent `handle` occupies.
    #[inline]
    fn side_of(&self, handle: Handle) -> Side {
        if self.left(self.parent(handle)) == handle { Side::Left } else { Side::Right }
    }

    // ─── Traversal ──────────────────────────────────────────────────────────

    /// Follows left links from `handle` to the leftmost node of its subtree.
    pub(crate) fn minimum(&self, mut handle: Handle) -> Handle {
        while !self.left(handle).is_sentinel() {
            handle = self.left(handle);
        }
        handle
    }

    /// Follows right links from `handle` to the rightmost node of its subtree.
    pub(crate) fn maximum(&self, mut handle: Handle) -> Handle {
        while !self.right(handle).is_sentinel() {
            handle = self.right(handle);
        }
        handle
    }

    /// Returns the in-order successor of a linked node, or `None` for the maximum.
    pub(crate) fn successor_of(&self, handle: Handle) -> Option<Handle> {
        self.neighbor_of(handle, Side::Right)
    }

    /// Returns the in-order predecessor of a linked node, or `None` for the minimum.
    pub(crate) fn predecessor_of(&self, handle: Handle) -> Option<Handle> {
        self.neighbor_of(handle, Side::Left)
    }

    fn neighbor_of(&self, mut handle: Handle, side: Side) -> Option<Handle> {
        let child = self.child(handle, side);
        if !child.is_sentinel() {
            return Some(match side {
                Side::Left => self.maximum(child),
                Side::Right => self.minimum(child),
            });
        }

        let mut parent = self.parent(handle);
        while !parent.is_sentinel() && self.child(parent, side) == handle {
            handle = parent;
            parent = self.parent(parent);
        }
        some_node(parent)
    }

    // ─── Rotation and transplant ────────────────────────────────────────────

    /// Rotates the subtree at `handle` towards `direction`.
    ///
    /// `Side::Left` is a left rotation: the right child takes `handle`'s place and `handle`
    /// becomes its left child, adopting the child's former left subtree.
    fn rotate(&mut self, handle: Handle, direction: Side) {
        let up = direction.opposite();
        let pivot = self.child(handle, up);
        debug_assert!(!pivot.is_sentinel(), "`RawRedBlackTree::rotate()` - nothing to rotate!");

        let inner = self.child(pivot, direction);
        self.set_child(handle, up, inner);
        if !inner.is_sentinel() {
            self.set_parent(inner, handle);
        }

        let parent = self.parent(handle);
        self.set_parent(pivot, parent);
        self.replace_child(parent, handle, pivot);

        self.set_child(pivot, direction, handle);
        self.set_parent(handle, pivot);
    }

    /// Puts `v` in `u`'s place under `u`'s parent. `v`'s own children are untouched.
    fn transplant(&mut self, u: Handle, v: Handle) {
        let parent = self.parent(u);
        self.replace_child(parent, u, v);
        self.set_parent(v, parent);
    }

    /// Swaps `new` in for the child `old` of `parent`; a sentinel parent means `old` was root.
    fn replace_child(&mut self, parent: Handle, old: Handle, new: Handle) {
        if parent.is_sentinel() {
            self.root = new;
        } else if self.left(parent) == old {
            self.set_child(parent, Side::Left, new);
        } else {
            self.set_child(parent, Side::Right, new);
        }
    }

    // ─── Rebalancing ────────────────────────────────────────────────────────

    fn insert_fixup(&mut self, mut node: Handle) {
        while self.is_red(self.parent(node)) {
            let parent = self.parent(node);
            // A red parent is never the root, so the grandparent is a real node.
            let grandparent = self.parent(parent);
            let side = self.side_of(parent);
            let uncle = self.child(grandparent, side.opposite());

            if self.is_red(uncle) {
                self.set_color(parent, Color::Black);
                self.set_color(uncle, Color::Black);
                self.set_color(grandparent, Color::Red);
                node = grandparent;
                continue;
            }

            if node == self.child(parent, side.opposite()) {
                node = parent;
                self.rotate(node, side);
            }

            let parent = self.parent(node);
            let grandparent = self.parent(parent);
            self.set_color(parent, Color::Black);
            self.set_color(grandparent, Color::Red);
            self.rotate(grandparent, side.opposite());
        }
        self.set_color(self.root, Color::Black);
    }

    /// Unlinks a node from the tree and returns its key.
    ///
    /// When the node has two children its in-order successor is moved, node and all, into its
    /// slot. Handles to every other node stay valid, which keeps a cursor parked on the
    /// successor usable.
    pub(crate) fn remove(&mut self, node: Handle) -> T {
        let mut removed_color = self.color(node);
        let replacement;

        if self.left(node).is_sentinel() {
            replacement = self.right(node);
            self.transplant(node, replacement);
        } else if self.right(node).is_sentinel() {
            replacement = self.left(node);
            self.transplant(node, replacement);
        } else {
            let successor = self.minimum(self.right(node));
            removed_color = self.color(successor);
            replacement = self.right(successor);

            if self.parent(successor) == node {
                // Also covers a sentinel replacement, so the fixup can climb from it.
                self.set_parent(replacement, successor);
            } else {
                self.transplant(successor, replacement);
                let right = self.right(node);
                self.set_child(successor, Side::Right, right);
                self.set_parent(right, successor);
            }

            self.transplant(node, successor);
            let left = self.left(node);
            self.set_child(successor, Side::Left, left);
            self.set_parent(left, successor);
            self.set_color(successor, self.color(node));
        }

        if removed_color == Color::Black {
            self.delete_fixup(replacement);
        }

        if self.root.is_sentinel() {
            self.min = NIL;
            self.max = NIL;
        } else {
            if node == self.min {
                self.min = self.minimum(self.root);
            }
            if node == self.max {
                self.max = self.maximum(self.root);
            }
        }

        self.nodes.take(node).into_key()
    }

    fn delete_fixup(&mut self, mut node: Handle) {
        while node != self.root && !self.is_red(node) {
            let parent = self.parent(node);
            let side = if node == self.left(parent) { Side::Left } else { Side::Right };
            let far_side = side.opposite();
            // `node` carries an extra black, so its sibling is a real node.
            let mut sibling = self.child(parent, far_side);

            if self.is_red(sibling) {
                self.set_color(sibling, Color::Black);
                self.set_color(parent, Color::Red);
                self.rotate(parent, side);
                sibling = self.child(parent, far_side);
            }

            if !self.is_red(self.child(sibling, side)) && !self.is_red(self.child(sibling, far_side)) {
                self.set_color(sibling, Color::Red);
                node = parent;
                continue;
            }

            if !self.is_red(self.child(sibling, far_side)) {
                self.set_color(self.child(sibling, side), Color::Black);
                self.set_color(sibling, Color::Red);
                self.rotate(sibling, far_side);
                sibling = self.child(parent, far_side);
            }

            self.set_color(sibling, self.color(parent));
            self.set_color(parent, Color::Black);
            self.set_color(self.child(sibling, far_side), Color::Black);
            self.rotate(parent, side);
            node = self.root;
        }
        self.set_color(node, Color::Black);
    }
}

impl<T: Ord> RawRedBlackTree<T> {
    #[inline]
    fn count_comparison(&self) {
        self.comparisons.set(self.comparisons.get() + 1);
    }

    /// Compares a probe with the key of a linked node, counting one comparison.
    #[inline]
    fn compare<Q>(&self, key: &Q, handle: Handle) -> Ordering
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.count_comparison();
        key.cmp(self.key(handle).borrow())
    }

    /// Compares the keys of two linked nodes, counting one comparison.
    #[inline]
    fn compare_nodes(&self, a: Handle, b: Handle) -> Ordering {
        self.count_comparison();
        self.key(a).cmp(self.key(b))
    }

    /// Finds the node holding a key equal to `key`.
    pub(crate) fn locate<Q>(&self, key: &Q) -> Option<Handle>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut current = self.root;
        while !current.is_sentinel() {
            current = match self.compare(key, current) {
                Less => self.left(current),
                Greater => self.right(current),
                Equal => return Some(current),
            };
        }
        None
    }

    /// Descends towards `key`, tracking the least node greater than it.
    ///
    /// Stops early on an equal key. Returns `None` when every key is less than `key`.
    pub(crate) fn locate_min_greater_than<Q>(&self, key: &Q) -> Option<SearchResult>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut current = self.root;
        let mut best = self.max;
        let mut bounded = false;
        while !current.is_sentinel() {
            current = match self.compare(key, current) {
                Less => {
                    if self.compare_nodes(current, best) == Less {
                        best = current;
                    }
                    bounded = true;
                    self.left(current)
                }
                Greater => self.right(current),
                Equal => return Some(SearchResult::Found(current)),
            };
        }
        bounded.then_some(SearchResult::NotFound(best))
    }

    /// Descends towards `key`, tracking the greatest node less than it.
    ///
    /// Stops early on an equal key. Returns `None` when every key is greater than `key`.
    pub(crate) fn locate_max_less_than<Q>(&self, key: &Q) -> Option<SearchResult>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut current = self.root;
        let mut best = self.min;
        let mut bounded = false;
        while !current.is_sentinel() {
            current = match self.compare(key, current) {
                Less => self.left(current),
                Greater => {
                    if self.compare_nodes(current, best) == Greater {
                        best = current;
                    }
                    bounded = true;
                    self.right(current)
                }
                Equal => return Some(SearchResult::Found(current)),
            };
        }
        bounded.then_some(SearchResult::NotFound(best))
    }

    /// Returns true if some element is strictly less than `key`.
    pub(crate) fn has_predecessor<Q>(&self, key: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        !self.is_empty() && self.compare(key, self.min) == Greater
    }

    /// Returns true if some element is strictly greater than `key`.
    pub(crate) fn has_successor<Q>(&self, key: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        !self.is_empty() && self.compare(key, self.max) == Less
    }

    /// Returns the greatest node strictly less than `key`.
    pub(crate) fn predecessor<Q>(&self, key: &Q) -> Option<Handle>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        match self.locate_max_less_than(key)? {
            SearchResult::Found(handle) => self.predecessor_of(handle),
            SearchResult::NotFound(handle) => Some(handle),
        }
    }

    /// Returns the least node strictly greater than `key`.
    pub(crate) fn successor<Q>(&self, key: &Q) -> Option<Handle>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        match self.locate_min_greater_than(key)? {
            SearchResult::Found(handle) => self.successor_of(handle),
            SearchResult::NotFound(handle) => Some(handle),
        }
    }

    /// Inserts `key` and rebalances.
    ///
    /// Returns the new node, or hands `key` back untouched if an equal key is present.
    pub(crate) fn insert(&mut self, key: T) -> Result<Handle, T> {
        if self.is_empty() {
            let node = self.nodes.alloc(Node::new(key));
            self.root = node;
            self.min = node;
            self.max = node;
            return Ok(node);
        }

        let mut parent = self.root;
        let side = loop {
            let side = match self.compare(&key, parent) {
                Less => Side::Left,
                Greater => Side::Right,
                Equal => return Err(key),
            };
            let child = self.child(parent, side);
            if child.is_sentinel() {
                break side;
            }
            parent = child;
        };

        let node = self.nodes.alloc(Node::new(key));
        self.set_color(node, Color::Red);
        self.set_parent(node, parent);
        self.set_child(parent, side, node);
        self.insert_fixup(node);

        if self.compare_nodes(node, self.min) == Less {
            self.min = node;
        } else if self.compare_nodes(node, self.max) == Greater {
            self.max = node;
        }
        Ok(node)
    }

    /// Removes the element equal to `key`, if any.
    pub(crate) fn delete<Q>(&mut self, key: &Q) -> Option<T>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let node = self.locate(key)?;
        Some(self.remove(node))
    }
}

/// Maps the sentinel to `None`.
#[inline]
fn some_node(handle: Handle) -> Option<Handle> {
    (!handle.is_sentinel()).then_some(handle)
}
