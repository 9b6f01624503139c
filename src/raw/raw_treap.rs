use core::borrow::Borrow;
use core::cmp::Ordering::{Equal, Greater, Less};

use alloc::boxed::Box;

use super::node::{Link, Node, link_height, link_size};

/// The core treap backing `Treap`.
///
/// Priorities are supplied by the caller; nothing here draws randomness.
pub(crate) struct RawTreap<K> {
    /// The root of the tree, if the tree is non-empty.
    root: Link<K>,
}

impl<K> RawTreap<K> {
    /// Creates a new, empty tree.
    pub(crate) const fn new() -> Self {
        Self { root: None }
    }

    /// Returns the number of occurrences stored in the tree.
    #[inline]
    pub(crate) fn len(&self) -> usize {
        link_size(&self.root)
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub(crate) fn clear(&mut self) {
        self.root = None;
    }

    pub(crate) fn root(&self) -> Option<&Node<K>> {
        self.root.as_deref()
    }

    pub(crate) fn height(&self) -> usize {
        link_height(&self.root)
    }

    /// Gets the occurrence at `rank` (1-indexed position in sorted order).
    pub(crate) fn find_kth(&self, rank: usize) -> Option<&K> {
        if rank == 0 || rank > self.len() {
            return None;
        }

        let mut node = self.root.as_deref()?;
        let mut remaining = rank;
        loop {
            let left_size = node.left_size();
            if remaining <= left_size {
                node = node.left()?;
            } else if remaining > left_size + node.multiplicity() {
                remaining -= left_size + node.multiplicity();
                node = node.right()?;
            } else {
                return Some(node.key());
            }
        }
    }
}

impl<K: Ord> RawTreap<K> {
    /// Inserts one occurrence of `key` with the given heap `priority`.
    ///
    /// The priority is only used when `key` is new to the tree.
    pub(crate) fn insert(&mut self, key: K, priority: u64) {
        self.root = Some(insert_at(self.root.take(), key, priority));
    }

    /// Returns the stored key equal to `key`, if any.
    pub(crate) fn find<Q>(&self, key: &Q) -> Option<&K>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.find_node(key).map(Node::key)
    }

    /// Removes a single occurrence of `key`. Returns whether one was present.
    ///
    /// The tree is left untouched when `key` is absent.
    pub(crate) fn remove<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        if self.find(key).is_none() {
            return false;
        }

        let (root, removed) = remove_at(self.root.take(), key);
        self.root = root;
        removed
    }

    /// Returns the 1-indexed rank of the first occurrence of `key`.
    pub(crate) fn rank_of<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let (less, found) = self.count_below(key);
        found.then_some(less + 1)
    }

    /// Returns the number of occurrences of `key`.
    pub(crate) fn count<Q>(&self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.find_node(key).map_or(0, Node::multiplicity)
    }

    fn find_node<Q>(&self, key: &Q) -> Option<&Node<K>>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            match key.cmp(node.key().borrow()) {
                Less => current = node.left(),
                Greater => current = node.right(),
                Equal => return Some(node),
            }
        }
        None
    }

    /// Counts the occurrences strictly less than `key`, and reports whether
    /// `key` itself is present.
    fn count_below<Q>(&self, key: &Q) -> (usize, bool)
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut less = 0;
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            match key.cmp(node.key().borrow()) {
                Less => current = node.left(),
                Greater => {
                    less += node.left_size() + node.multiplicity();
                    current = node.right();
                }
                Equal => return (less + node.left_size(), true),
            }
        }
        (less, false)
    }
}

/// Inserts into the subtree at `link` and returns its new root.
///
/// A key equal to an existing node's only bumps that node's multiplicity, so
/// every key appears in exactly one node and duplicates never lengthen a path.
fn insert_at<K: Ord>(link: Link<K>, key: K, priority: u64) -> Box<Node<K>> {
    let Some(mut node) = link else {
        return Box::new(Node::new(key, priority));
    };

    node.size += 1;
    match key.cmp(&node.key) {
        Equal => {
            node.multiplicity += 1;
            node
        }
        Less => {
            let child = insert_at(node.left.take(), key, priority);
            let rotate = child.priority() < node.priority();
            node.left = Some(child);
            if rotate { node.rotate_right() } else { node }
        }
        Greater => {
            let child = insert_at(node.right.take(), key, priority);
            let rotate = child.priority() < node.priority();
            node.right = Some(child);
            if rotate { node.rotate_left() } else { node }
        }
    }
}

/// Removes one occurrence of `key` from the subtree at `link`.
///
/// Returns the new subtree root and whether an occurrence was removed. A node
/// only leaves the tree once its last occurrence goes.
fn remove_at<K, Q>(link: Link<K>, key: &Q) -> (Link<K>, bool)
where
    K: Borrow<Q>,
    Q: ?Sized + Ord,
{
    let Some(mut node) = link else {
        return (None, false);
    };

    let removed = match key.cmp(node.key.borrow()) {
        Less => {
            let (left, removed) = remove_at(node.left.take(), key);
            node.left = left;
            removed
        }
        Greater => {
            let (right, removed) = remove_at(node.right.take(), key);
            node.right = right;
            removed
        }
        Equal if node.multiplicity > 1 => {
            node.multiplicity -= 1;
            true
        }
        Equal => match (node.left.take(), node.right.take()) {
            (None, None) => return (None, true),
            (Some(child), None) | (None, Some(child)) => return (Some(child), true),
            (Some(left), Some(right)) => {
                // Rotate the target down toward the child that must rise.
                let promote_left = left.priority() < right.priority();
                node.left = Some(left);
                node.right = Some(right);
                if promote_left {
                    node = node.rotate_right();
                    let (right, removed) = remove_at(node.right.take(), key);
                    node.right = right;
                    removed
                } else {
                    node = node.rotate_left();
                    let (left, removed) = remove_at(node.left.take(), key);
                    node.left = left;
                    removed
                }
            }
        },
    };

    node.update_size();
    (Some(node), removed)
}

impl<K: Clone> Clone for RawTreap<K> {
    fn clone(&self) -> Self {
        Self { root: self.root.clone() }
    }
}
