use core::fmt;

/// A one-based rank into the sorted order of a treap.
///
/// `Rank(1)` is the smallest occurrence and `Rank(treap.len())` the largest.
///
/// # Examples
///
/// ```
/// use rank_treap::{Rank, Treap};
///
/// let treap = Treap::from([30, 10, 20]);
///
/// assert_eq!(treap[Rank(1)], 10);
/// assert_eq!(treap[Rank(3)], 30);
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Rank(pub usize);

/// The median of a treap's keys.
///
/// An odd number of occurrences, or an even number whose two middle keys
/// average to a whole number, gives [`Median::Integer`]. Otherwise the mean
/// lies halfway between two integers and is reported as
/// [`Median::Fractional`]. An empty treap reports [`Median::ZERO`].
///
/// [`Median::Integer`] is always exact. [`Median::Fractional`] is the nearest
/// `f64`, so once the two middle keys sum past 2^53 it can lose the half.
///
/// # Examples
///
/// ```
/// use rank_treap::{Median, Treap};
///
/// assert_eq!(Treap::from([1, 2, 3, 4]).median(), Median::Fractional(2.5));
/// assert_eq!(Treap::from([5, 3, 8, 1, 4]).median(), Median::Integer(4));
/// assert_eq!(Treap::<i32>::with_seed(0).median(), Median::ZERO);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Median {
    /// A median with no fractional part.
    Integer(i128),
    /// A median halfway between two integers, rounded to the nearest `f64`.
    Fractional(f64),
}

impl Median {
    /// The median reported for an empty treap.
    pub const ZERO: Self = Self::Integer(0);

    /// Returns the mean of two keys. Only the fractional case is rounded.
    #[allow(clippy::cast_precision_loss)]
    pub(crate) fn mean(lower: i128, upper: i128) -> Self {
        let sum = lower + upper;
        if sum % 2 == 0 {
            Self::Integer(sum / 2)
        } else {
            Self::Fractional(sum as f64 / 2.0)
        }
    }

    /// Returns the median as a float, rounding very large integers.
    ///
    /// ```
    /// use rank_treap::Median;
    ///
    /// assert_eq!(Median::Integer(4).to_f64(), 4.0);
    /// assert_eq!(Median::Fractional(2.5).to_f64(), 2.5);
    /// ```
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn to_f64(self) -> f64 {
        match self {
            Self::Integer(value) => value as f64,
            Self::Fractional(value) => value,
        }
    }
}

impl PartialEq<f64> for Median {
    fn eq(&self, other: &f64) -> bool {
        self.to_f64() == *other
    }
}

impl fmt::Display for Median {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(value) => write!(f, "{value}"),
            Self::Fractional(value) => write!(f, "{value}"),
        }
    }
}

/// Keys whose median can be computed arithmetically.
///
/// Implemented for every primitive integer type of at most 64 bits. The
/// conversion to `i128` is lossless, so averaging two keys never overflows.
pub trait MedianKey: Ord + Copy {
    /// Widens the key for averaging.
    fn widen(self) -> i128;
}

macro_rules! impl_median_key {
    ($($ty:ty),* $(,)?) => {
        $(
            impl MedianKey for $ty {
                #[inline]
                fn widen(self) -> i128 {
                    i128::from(self)
                }
            }
        )*
    };
}

impl_median_key!(i8, i16, i32, i64, u8, u16, u32, u64);

impl MedianKey for isize {
    #[inline]
    #[allow(clippy::cast_lossless)]
    fn widen(self) -> i128 {
        // `isize` is at most 64 bits on every supported target.
        self as i128
    }
}

impl MedianKey for usize {
    #[inline]
    #[allow(clippy::cast_possible_wrap)]
    fn widen(self) -> i128 {
        self as i128
    }
}
