use core::fmt;
use core::iter::FusedIterator;

use smallvec::SmallVec;

use crate::raw::Node;

/// Nodes kept inline before the stack spills to the heap. Trees of a few
/// million distinct keys stay well under this depth in expectation.
const INLINE_DEPTH: usize = 64;

/// An iterator over the occurrences of a `Treap` in ascending order.
///
/// This `struct` is created by the [`iter`] method on [`Treap`].
/// See its documentation for more.
///
/// # Examples
///
/// ```
/// use rank_treap::Treap;
///
/// let treap = Treap::from([3, 1, 2]);
/// let mut iter = treap.iter();
/// assert_eq!(iter.len(), 3);
/// assert_eq!(iter.next(), Some(&1));
/// assert_eq!(iter.next(), Some(&2));
/// assert_eq!(iter.next(), Some(&3));
/// assert_eq!(iter.next(), None);
/// ```
///
/// [`iter`]: super::Treap::iter
/// [`Treap`]: super::Treap
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, K: 'a> {
    // Ancestors whose key has not been yielded yet; the top is the next one.
    stack: SmallVec<[&'a Node<K>; INLINE_DEPTH]>,
    // Occurrences of the top node already yielded.
    yielded: usize,
    remaining: usize,
}

impl<'a, K> Iter<'a, K> {
    pub(crate) fn new(root: Option<&'a Node<K>>, len: usize) -> Self {
        let mut iter = Iter {
            stack: SmallVec::new(),
            yielded: 0,
            remaining: len,
        };
        iter.descend_left(root);
        iter
    }

    fn descend_left(&mut self, mut node: Option<&'a Node<K>>) {
        while let Some(current) = node {
            self.stack.push(current);
            node = current.left();
        }
    }
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        let node = *self.stack.last()?;
        self.yielded += 1;
        if self.yielded == node.multiplicity() {
            self.stack.pop();
            self.yielded = 0;
            self.descend_left(node.right());
        }
        self.remaining -= 1;
        Some(node.key())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K> ExactSizeIterator for Iter<'_, K> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<K> FusedIterator for Iter<'_, K> {}

impl<K> Clone for Iter<'_, K> {
    fn clone(&self) -> Self {
        Iter {
            stack: self.stack.clone(),
            yielded: self.yielded,
            remaining: self.remaining,
        }
    }
}

impl<K: fmt::Debug> fmt::Debug for Iter<'_, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<K> Default for Iter<'_, K> {
    /// Creates an empty `treap::Iter`.
    ///
    /// ```
    /// # use rank_treap::treap;
    /// let iter: treap::Iter<'_, u8> = Default::default();
    /// assert_eq!(iter.len(), 0);
    /// ```
    fn default() -> Self {
        Iter::new(None, 0)
    }
}
