use core::borrow::Borrow;
use core::fmt;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, trace};

use crate::raw::RawTreap;

mod iter;
mod order_statistic;

pub use iter::Iter;

/// An ordered multiset based on a randomized treap.
///
/// Every key is stored in a binary search tree whose shape is decided by a
/// random priority drawn when the key is inserted. Priorities obey a min-heap
/// order, which keeps the expected height logarithmic no matter the order in
/// which keys arrive. Each node also tracks the size of its subtree, which
/// answers rank queries such as [`find_kth`](Treap::find_kth) and
/// [`median`](Treap::median) without a full traversal.
///
/// Duplicate keys are counted: every insertion adds one occurrence, and every
/// successful [`delete`](Treap::delete) removes exactly one. Equal keys share
/// a single node, so the height depends only on the number of distinct keys.
///
/// The source of priorities is the type parameter `R`. [`Treap::with_seed`]
/// gives a reproducible tree, [`Treap::with_rng`] accepts any [`Rng`], and
/// (with the default `std` feature) [`Treap::new`] seeds from the operating
/// system.
///
/// It is a logic error for a key to be modified in such a way that its ordering relative to any
/// other key, as determined by the [`Ord`] trait, changes while it is in the treap.
///
/// # Examples
///
/// ```
/// use rank_treap::{Median, Treap};
///
/// let mut scores = Treap::with_seed(7);
/// scores.insert(85);
/// scores.insert(100);
/// scores.insert(92);
/// scores.insert(85);
///
/// assert_eq!(scores.len(), 4);
/// assert_eq!(scores.find_kth(1), Some(&85));
/// assert_eq!(scores.find_kth(4), Some(&100));
/// assert_eq!(scores.median(), Median::Fractional(88.5));
///
/// assert!(scores.delete(&85));
/// assert!(scores.contains(&85));
/// assert!(!scores.delete(&60));
/// ```
pub struct Treap<K, R = SmallRng> {
    raw: RawTreap<K>,
    rng: R,
}

impl<K> Treap<K> {
    /// Makes a new, empty `Treap` seeded from the operating system.
    ///
    /// # Examples
    ///
    /// ```
    /// use rank_treap::Treap;
    ///
    /// let mut treap = Treap::new();
    /// treap.insert("b");
    /// treap.insert("a");
    /// assert_eq!(treap.find_kth(1), Some(&"a"));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[cfg(feature = "std")]
    #[must_use]
    pub fn new() -> Self {
        Self::with_rng(SmallRng::from_os_rng())
    }

    /// Makes a new, empty `Treap` whose priorities come from a generator
    /// seeded with `seed`.
    ///
    /// Two treaps built with the same seed and the same sequence of
    /// operations have the same shape.
    ///
    /// # Examples
    ///
    /// ```
    /// use rank_treap::Treap;
    ///
    /// let mut a = Treap::with_seed(42);
    /// let mut b = Treap::with_seed(42);
    /// for key in 0..100 {
    ///     a.insert(key);
    ///     b.insert(key);
    /// }
    /// assert_eq!(a.height(), b.height());
    /// ```
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        debug!(seed, "seeding treap priorities");
        Self::with_rng(SmallRng::seed_from_u64(seed))
    }
}

impl<K, R> Treap<K, R> {
    /// Makes a new, empty `Treap` drawing priorities from `rng`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rand::SeedableRng;
    /// use rand::rngs::StdRng;
    /// use rank_treap::Treap;
    ///
    /// let mut treap = Treap::with_rng(StdRng::seed_from_u64(1));
    /// treap.insert(3);
    /// assert_eq!(treap.len(), 1);
    /// ```
    #[must_use]
    pub const fn with_rng(rng: R) -> Self {
        Treap {
            raw: RawTreap::new(),
            rng,
        }
    }

    /// Returns the number of occurrences in the treap.
    ///
    /// # Examples
    ///
    /// ```
    /// use rank_treap::Treap;
    ///
    /// let mut treap = Treap::with_seed(0);
    /// assert_eq!(treap.len(), 0);
    /// treap.insert(1);
    /// treap.insert(1);
    /// assert_eq!(treap.len(), 2);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the treap contains no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Removes every key, keeping the random source.
    ///
    /// # Complexity
    ///
    /// O(n)
    pub fn clear(&mut self) {
        trace!(len = self.len(), "clearing treap");
        self.raw.clear();
    }

    /// Returns the number of nodes on the longest path from the root to a
    /// leaf, or 0 for an empty treap.
    ///
    /// The expected height is O(log n); this is mainly useful for observing
    /// balance.
    ///
    /// # Complexity
    ///
    /// O(n)
    #[must_use]
    pub fn height(&self) -> usize {
        self.raw.height()
    }

    /// Gets an iterator that visits every occurrence in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use rank_treap::Treap;
    ///
    /// let treap = Treap::from([3, 1, 2, 1]);
    /// let keys: Vec<_> = treap.iter().copied().collect();
    /// assert_eq!(keys, [1, 1, 2, 3]);
    /// ```
    pub fn iter(&self) -> Iter<'_, K> {
        Iter::new(self.raw.root(), self.len())
    }
}

impl<K: Ord, R: Rng> Treap<K, R> {
    /// Adds one occurrence of `key` to the treap.
    ///
    /// Insertion always succeeds. A key equal to one already present raises
    /// that key's count; the stored key is kept and `key` is dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// use rank_treap::Treap;
    ///
    /// let mut treap = Treap::with_seed(3);
    /// treap.insert(5);
    /// treap.insert(5);
    /// assert_eq!(treap.count(&5), 2);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n) expected
    pub fn insert(&mut self, key: K) {
        let priority = self.rng.random::<u64>();
        self.raw.insert(key, priority);
        trace!(priority, len = self.len(), "inserted key");
    }
}

impl<K: Ord, R> Treap<K, R> {
    /// Returns a reference to a stored key equal to `key`, or `None` if there
    /// is none.
    ///
    /// # Examples
    ///
    /// ```
    /// use rank_treap::Treap;
    ///
    /// let treap = Treap::from([5, 3, 8]);
    /// assert_eq!(treap.find(&3), Some(&3));
    /// assert_eq!(treap.find(&4), None);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n) expected
    pub fn find<Q>(&self, key: &Q) -> Option<&K>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.find(key)
    }

    /// Returns `true` if the treap holds at least one occurrence of `key`.
    ///
    /// # Complexity
    ///
    /// O(log n) expected
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.find(key).is_some()
    }

    /// Removes one occurrence of `key`. Returns whether an occurrence was
    /// present.
    ///
    /// When `key` is absent the treap is left unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use rank_treap::Treap;
    ///
    /// let mut treap = Treap::from([1, 2, 2]);
    /// assert!(treap.delete(&2));
    /// assert!(treap.contains(&2));
    /// assert!(treap.delete(&2));
    /// assert!(!treap.contains(&2));
    /// assert!(!treap.delete(&2));
    /// assert_eq!(treap.len(), 1);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n) expected
    pub fn delete<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let removed = self.raw.remove(key);
        if removed {
            trace!(len = self.len(), "deleted key");
        } else {
            trace!("delete skipped, key not present");
        }
        removed
    }

    /// Returns the number of occurrences of `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rank_treap::Treap;
    ///
    /// let treap = Treap::from([4, 1, 4, 4]);
    /// assert_eq!(treap.count(&4), 3);
    /// assert_eq!(treap.count(&2), 0);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n) expected
    pub fn count<Q>(&self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.count(key)
    }
}

impl<K: Clone, R: Clone> Clone for Treap<K, R> {
    fn clone(&self) -> Self {
        Treap {
            raw: self.raw.clone(),
            rng: self.rng.clone(),
        }
    }
}

impl<K: fmt::Debug, R> fmt::Debug for Treap<K, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

#[cfg(feature = "std")]
impl<K> Default for Treap<K> {
    fn default() -> Self {
        Treap::new()
    }
}

#[cfg(feature = "std")]
impl<K: Ord> FromIterator<K> for Treap<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut treap = Treap::new();
        treap.extend(iter);
        treap
    }
}

#[cfg(feature = "std")]
impl<K: Ord, const N: usize> From<[K; N]> for Treap<K> {
    fn from(arr: [K; N]) -> Self {
        arr.into_iter().collect()
    }
}

impl<K: Ord, R: Rng> Extend<K> for Treap<K, R> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<'a, K: 'a + Ord + Copy, R: Rng> Extend<&'a K> for Treap<K, R> {
    fn extend<I: IntoIterator<Item = &'a K>>(&mut self, iter: I) {
        for &key in iter {
            self.insert(key);
        }
    }
}

impl<'a, K, R> IntoIterator for &'a Treap<K, R> {
    type Item = &'a K;
    type IntoIter = Iter<'a, K>;

    fn into_iter(self) -> Iter<'a, K> {
        self.iter()
    }
}
