use core::borrow::Borrow;
use core::ops::Index;

use super::Treap;
use crate::{Median, MedianKey, Rank};

impl<K, R> Treap<K, R> {
    /// Returns the occurrence at position `k` in ascending order.
    ///
    /// The position is one-based: `find_kth(1)` is the smallest occurrence
    /// and `find_kth(len)` the largest. Returns `None` when `k` is 0 or
    /// greater than [`len`](Treap::len).
    ///
    /// # Complexity
    ///
    /// O(log n) expected
    ///
    /// # Examples
    ///
    /// ```
    /// use rank_treap::Treap;
    ///
    /// let treap = Treap::from([5, 3, 8, 1, 4]);
    /// assert_eq!(treap.find_kth(1), Some(&1));
    /// assert_eq!(treap.find_kth(3), Some(&4));
    /// assert_eq!(treap.find_kth(5), Some(&8));
    /// assert!(treap.find_kth(0).is_none());
    /// assert!(treap.find_kth(6).is_none());
    /// ```
    #[must_use]
    pub fn find_kth(&self, k: usize) -> Option<&K> {
        self.raw.find_kth(k)
    }

    /// Returns the smallest occurrence, or `None` if the treap is empty.
    #[must_use]
    pub fn first(&self) -> Option<&K> {
        self.find_kth(1)
    }

    /// Returns the largest occurrence, or `None` if the treap is empty.
    #[must_use]
    pub fn last(&self) -> Option<&K> {
        self.find_kth(self.len())
    }

    /// Returns the lower and upper median occurrences.
    ///
    /// For an odd number of occurrences both are the middle one. Returns
    /// `None` if the treap is empty. Unlike [`median`](Treap::median) this
    /// works for any key type.
    ///
    /// # Examples
    ///
    /// ```
    /// use rank_treap::Treap;
    ///
    /// let treap = Treap::from(["d", "a", "c", "b"]);
    /// assert_eq!(treap.median_keys(), Some((&"b", &"c")));
    /// ```
    #[must_use]
    pub fn median_keys(&self) -> Option<(&K, &K)> {
        let len = self.len();
        if len % 2 == 1 {
            let middle = self.find_kth(len / 2 + 1)?;
            Some((middle, middle))
        } else {
            Some((self.find_kth(len / 2)?, self.find_kth(len / 2 + 1)?))
        }
    }

    /// Returns the median of the keys.
    ///
    /// With an odd number of occurrences this is the middle key. With an even
    /// number it is the mean of the two middle keys, which is a
    /// [`Median::Fractional`] when it falls halfway between two integers.
    /// An empty treap reports [`Median::ZERO`].
    ///
    /// # Complexity
    ///
    /// O(log n) expected
    ///
    /// # Examples
    ///
    /// ```
    /// use rank_treap::{Median, Treap};
    ///
    /// let mut treap = Treap::from([1, 2, 3, 4]);
    /// assert_eq!(treap.median(), Median::Fractional(2.5));
    ///
    /// treap.insert(10);
    /// assert_eq!(treap.median(), Median::Integer(3));
    /// ```
    #[must_use]
    pub fn median(&self) -> Median
    where
        K: MedianKey,
    {
        match self.median_keys() {
            None => Median::ZERO,
            Some((lower, upper)) => Median::mean(lower.widen(), upper.widen()),
        }
    }
}

impl<K: Ord, R> Treap<K, R> {
    /// Returns the one-based rank of the first occurrence of `key`, or `None`
    /// if the key is not present.
    ///
    /// For any present key, `find_kth(rank_of(key))` yields that key.
    ///
    /// # Complexity
    ///
    /// O(log n) expected
    ///
    /// # Examples
    ///
    /// ```
    /// use rank_treap::Treap;
    ///
    /// let treap = Treap::from([10, 20, 20, 30]);
    /// assert_eq!(treap.rank_of(&10), Some(1));
    /// assert_eq!(treap.rank_of(&20), Some(2));
    /// assert_eq!(treap.rank_of(&30), Some(4));
    /// assert_eq!(treap.rank_of(&15), None);
    /// ```
    #[must_use]
    pub fn rank_of<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.rank_of(key)
    }
}

/// Indexes into the treap by rank.
///
/// # Panics
///
/// Panics if `rank` is 0 or greater than the number of occurrences.
///
/// # Examples
///
/// ```
/// use rank_treap::{Rank, Treap};
///
/// let treap = Treap::from([10, 20, 30]);
/// assert_eq!(treap[Rank(2)], 20);
/// ```
impl<K, R> Index<Rank> for Treap<K, R> {
    type Output = K;

    fn index(&self, rank: Rank) -> &Self::Output {
        self.find_kth(rank.0).expect("index out of bounds")
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use crate::{Median, Rank, Treap};
    use pretty_assertions::assert_eq;

    #[test]
    fn single_key_median() {
        let mut treap: Treap<u8> = Treap::with_seed(0);
        treap.insert(200);
        assert_eq!(treap.median(), Median::Integer(200));
        assert_eq!(treap.median_keys(), Some((&200, &200)));
    }

    #[test]
    fn median_of_negative_keys() {
        let mut treap: Treap<i64> = Treap::with_seed(12);
        treap.extend([-7, -2]);
        assert_eq!(treap.median(), Median::Fractional(-4.5));

        treap.insert(-1);
        assert_eq!(treap.median(), Median::Integer(-2));
    }

    #[test]
    fn median_with_duplicates() {
        let mut treap: Treap<u32> = Treap::with_seed(3);
        treap.extend([7, 7, 7, 1]);
        assert_eq!(treap.median(), Median::Integer(7));
    }

    #[test]
    fn median_near_type_limits() {
        let mut treap: Treap<u64> = Treap::with_seed(9);
        treap.extend([u64::MAX, u64::MAX - 1]);
        assert_eq!(treap.median_keys(), Some((&(u64::MAX - 1), &u64::MAX)));
        assert!(matches!(treap.median(), Median::Fractional(_)));
    }

    #[test]
    fn first_and_last() {
        let mut treap: Treap<i32> = Treap::with_seed(17);
        assert_eq!(treap.first(), None);
        assert_eq!(treap.last(), None);
        assert_eq!(treap.median_keys(), None);

        treap.extend([4, 9, -3, 9]);
        assert_eq!(treap.first(), Some(&-3));
        assert_eq!(treap.last(), Some(&9));
    }

    #[test]
    #[should_panic(expected = "index out of bounds")]
    fn index_rank_zero() {
        let mut treap: Treap<i32> = Treap::with_seed(1);
        treap.insert(1);
        let _ = treap[Rank(0)];
    }

    #[test]
    #[should_panic(expected = "index out of bounds")]
    fn index_past_end() {
        let mut treap: Treap<i32> = Treap::with_seed(1);
        treap.insert(1);
        let _ = treap[Rank(2)];
    }
}
