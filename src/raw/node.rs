use super::handle::Handle;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Color {
    Red,
    Black,
}

/// Which child slot of a parent a node occupies.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Side {
    Left,
    Right,
}

impl Side {
    #[inline]
    pub(crate) const fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// The structural half of a node: color and the three links.
///
/// The sentinel owns a `Links` too, so every link read or write goes through the same path
/// whether or not it targets the sentinel.
#[derive(Clone, Debug)]
pub(crate) struct Links {
    pub(crate) color: Color,
    pub(crate) left: Handle,
    pub(crate) right: Handle,
    pub(crate) parent: Handle,
}

impl Links {
    /// Black, with every link pointing at the sentinel.
    pub(crate) const fn detached() -> Self {
        Self {
            color: Color::Black,
            left: Handle::SENTINEL,
            right: Handle::SENTINEL,
            parent: Handle::SENTINEL,
        }
    }

    #[inline]
    pub(crate) const fn child(&self, side: Side) -> Handle {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    #[inline]
    pub(crate) fn set_child(&mut self, side: Side, child: Handle) {
        match side {
            Side::Left => self.left = child,
            Side::Right => self.right = child,
        }
    }
}

#[derive(Clone, Debug)]
pub(crate) struct Node<T> {
    key: T,
    pub(crate) links: Links,
}

impl<T> Node<T> {
    /// Creates a new black node that is not yet linked into a tree.
    pub(crate) const fn new(key: T) -> Self {
        Self {
            key,
            links: Links::detached(),
        }
    }

    #[inline]
    pub(crate) const fn key(&self) -> &T {
        &self.key
    }

    pub(crate) fn into_key(self) -> T {
        self.key
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn new_node_is_black_and_detached() {
        let node = Node::new(7);
        assert_eq!(*node.key(), 7);
        assert_eq!(node.links.color, Color::Black);
        assert!(node.links.left.is_sentinel());
        assert!(node.links.right.is_sentinel());
        assert!(node.links.parent.is_sentinel());
    }

    #[test]
    fn child_slots_follow_side() {
        let mut links = Links::detached();
        let a = Handle::from_index(0);
        let b = Handle::from_index(1);
        links.set_child(Side::Left, a);
        links.set_child(Side::Right.opposite().opposite(), b);
        assert_eq!(links.child(Side::Left), a);
        assert_eq!(links.child(Side::Right), b);
        assert_eq!(links.left, a);
        assert_eq!(links.right, b);
    }
}
