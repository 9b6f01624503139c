use alloc::boxed::Box;

/// An owned, possibly empty subtree.
pub(crate) type Link<K> = Option<Box<Node<K>>>;

// Treap: BST by `key`, min-heap by `priority`.
pub(crate) struct Node<K> {
    pub(super) key: K,
    // Drawn once at creation; only decides shape.
    pub(super) priority: u64,
    // The number of occurrences in the subtree rooted at this node.
    pub(super) size: usize,
    // Occurrences of `key`; never 0 while the node is in a tree.
    pub(super) multiplicity: usize,
    pub(super) left: Link<K>,
    pub(super) right: Link<K>,
}

/// Returns the size of a possibly empty subtree.
#[inline]
pub(crate) fn link_size<K>(link: &Link<K>) -> usize {
    link.as_ref().map_or(0, |node| node.size())
}

/// Returns the number of nodes on the longest path down from `link`.
pub(crate) fn link_height<K>(link: &Link<K>) -> usize {
    link.as_ref()
        .map_or(0, |node| 1 + link_height(&node.left).max(link_height(&node.right)))
}

impl<K> Node<K> {
    /// Creates a new leaf holding a single occurrence of `key`.
    pub(crate) fn new(key: K, priority: u64) -> Self {
        Self {
            key,
            priority,
            size: 1,
            multiplicity: 1,
            left: None,
            right: None,
        }
    }

    #[inline]
    pub(crate) fn key(&self) -> &K {
        &self.key
    }

    #[inline]
    pub(crate) fn priority(&self) -> u64 {
        self.priority
    }

    #[inline]
    pub(crate) fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub(crate) fn multiplicity(&self) -> usize {
        self.multiplicity
    }

    #[inline]
    pub(crate) fn left(&self) -> Option<&Node<K>> {
        self.left.as_deref()
    }

    #[inline]
    pub(crate) fn right(&self) -> Option<&Node<K>> {
        self.right.as_deref()
    }

    #[inline]
    pub(crate) fn left_size(&self) -> usize {
        link_size(&self.left)
    }

    #[inline]
    pub(crate) fn right_size(&self) -> usize {
        link_size(&self.right)
    }

    /// Recomputes `size` from the children, which must already be correct.
    #[inline]
    pub(crate) fn update_size(&mut self) {
        self.size = self.left_size() + self.right_size() + self.multiplicity;
    }

    /// Promotes the right child and returns it as the new subtree root.
    ///
    /// ```text
    ///     n              r
    ///    / \            / \
    ///   a   r    =>    n   c
    ///      / \        / \
    ///     b   c      a   b
    /// ```
    pub(crate) fn rotate_left(mut self: Box<Self>) -> Box<Self> {
        let mut pivot = self.right.take().expect("`Node::rotate_left()` - node has no right child!");
        self.right = pivot.left.take();
        self.update_size();
        pivot.left = Some(self);
        pivot.update_size();
        pivot
    }

    /// Promotes the left child and returns it as the new subtree root.
    ///
    /// ```text
    ///       n          l
    ///      / \        / \
    ///     l   c  =>  a   n
    ///    / \            / \
    ///   a   b          b   c
    /// ```
    pub(crate) fn rotate_right(mut self: Box<Self>) -> Box<Self> {
        let mut pivot = self.left.take().expect("`Node::rotate_right()` - node has no left child!");
        self.left = pivot.right.take();
        self.update_size();
        pivot.right = Some(self);
        pivot.update_size();
        pivot
    }
}

impl<K: Clone> Clone for Node<K> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            priority: self.priority,
            size: self.size,
            multiplicity: self.multiplicity,
            left: self.left.clone(),
            right: self.right.clone(),
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use static_assertions::assert_eq_size;

    // An empty link costs nothing over the box itself.
    assert_eq_size!(Link<u64>, Box<Node<u64>>);

    fn leaf(key: i32, priority: u64) -> Box<Node<i32>> {
        Box::new(Node::new(key, priority))
    }

    fn with_children(key: i32, priority: u64, left: Link<i32>, right: Link<i32>) -> Box<Node<i32>> {
        let mut node = leaf(key, priority);
        node.left = left;
        node.right = right;
        node.update_size();
        node
    }

    fn in_order(link: &Link<i32>, out: &mut alloc::vec::Vec<i32>) {
        if let Some(node) = link {
            in_order(&node.left, out);
            out.push(node.key);
            in_order(&node.right, out);
        }
    }

    #[test]
    fn new_node_is_a_single_occurrence() {
        let node = Node::new(7, 42);
        assert_eq!(*node.key(), 7);
        assert_eq!(node.priority(), 42);
        assert_eq!(node.size(), 1);
        assert_eq!(node.multiplicity(), 1);
        assert!(node.left().is_none());
        assert!(node.right().is_none());
    }

    #[test]
    fn rotate_left_preserves_order_and_sizes() {
        // n=2 with a=1 and r=4 (b=3, c=5).
        let right = with_children(4, 1, Some(leaf(3, 9)), Some(leaf(5, 9)));
        let root = with_children(2, 5, Some(leaf(1, 9)), Some(right));
        assert_eq!(root.size(), 5);

        let root = root.rotate_left();
        assert_eq!(*root.key(), 4);
        assert_eq!(root.size(), 5);
        assert_eq!(*root.left().unwrap().key(), 2);
        assert_eq!(root.left().unwrap().size(), 3);
        assert_eq!(*root.left().unwrap().right().unwrap().key(), 3);

        let mut keys = alloc::vec::Vec::new();
        in_order(&Some(root), &mut keys);
        assert_eq!(keys, [1, 2, 3, 4, 5]);
    }

    #[test]
    fn rotate_right_preserves_order_and_sizes() {
        let left = with_children(2, 1, Some(leaf(1, 9)), Some(leaf(3, 9)));
        let root = with_children(4, 5, Some(left), Some(leaf(5, 9)));

        let root = root.rotate_right();
        assert_eq!(*root.key(), 2);
        assert_eq!(root.size(), 5);
        assert_eq!(*root.right().unwrap().key(), 4);
        assert_eq!(root.right().unwrap().size(), 3);
        assert_eq!(*root.right().unwrap().left().unwrap().key(), 3);

        let mut keys = alloc::vec::Vec::new();
        in_order(&Some(root), &mut keys);
        assert_eq!(keys, [1, 2, 3, 4, 5]);
    }

    #[test]
    fn rotations_are_inverse() {
        let root = with_children(2, 5, Some(leaf(1, 9)), Some(leaf(3, 1)));
        let root = root.rotate_left().rotate_right();
        assert_eq!(*root.key(), 2);
        assert_eq!(*root.left().unwrap().key(), 1);
        assert_eq!(*root.right().unwrap().key(), 3);
        assert_eq!(root.size(), 3);
    }

    #[test]
    #[should_panic(expected = "`Node::rotate_left()` - node has no right child!")]
    fn rotate_left_without_right_child() {
        let _ = leaf(1, 1).rotate_left();
    }

    #[test]
    #[should_panic(expected = "`Node::rotate_right()` - node has no left child!")]
    fn rotate_right_without_left_child() {
        let _ = leaf(1, 1).rotate_right();
    }

    #[test]
    fn height_counts_nodes_on_longest_path() {
        assert_eq!(link_height::<i32>(&None), 0);
        let chain = with_children(3, 1, Some(with_children(2, 2, Some(leaf(1, 3)), None)), None);
        assert_eq!(link_height(&Some(chain)), 3);
    }
}
