//! Randomized order-statistic treap for Rust.
//!
//! This crate provides [`Treap`], a sorted multiset that keeps duplicate keys and answers
//! order-statistic queries in expected O(log n):
//!
//! - [`find_kth`](Treap::find_kth) - Get the occurrence at a given one-based sorted position
//! - [`median`](Treap::median) - Get the median of integer keys
//! - [`rank_of`](Treap::rank_of) - Get the sorted position of a key
//! - Indexing by [`Rank`] - e.g., `treap[Rank(1)]` for the smallest occurrence
//!
//! # Example
//!
//! ```
//! use rank_treap::{Median, Rank, Treap};
//!
//! let mut latencies = Treap::with_seed(2024);
//! for ms in [12, 7, 30, 7, 18] {
//!     latencies.insert(ms);
//! }
//!
//! // Sorted: 7, 7, 12, 18, 30
//! assert_eq!(latencies.find_kth(2), Some(&7));
//! assert_eq!(latencies[Rank(5)], 30);
//! assert_eq!(latencies.median(), Median::Integer(12));
//!
//! // Deleting removes a single occurrence.
//! assert!(latencies.delete(&7));
//! assert_eq!(latencies.rank_of(&7), Some(1));
//! assert_eq!(latencies.median(), Median::Integer(15));
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`; the default `std` feature adds
//!   OS-seeded construction ([`Treap::new`], [`Default`], [`FromIterator`])
//! - **Reproducible** - Priorities come from an owned random source, so [`Treap::with_seed`]
//!   builds the same shape every time
//! - **Multiset semantics** - Every insertion is counted as an occurrence; equal keys share one node
//!
//! # Implementation
//!
//! Each node holds a distinct key, its occurrence count, a random priority drawn when the key
//! first arrives, and the size of its subtree.
//! Keys obey binary search tree order and priorities obey min-heap order, which is restored
//! after every change by rotations. Because priorities are independent and uniform, the
//! expected height is logarithmic whatever the insertion order.

#![no_std]
// These forbid rules and lint groups are meant to be very restrictive.
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

mod order_statistic;
mod raw;

pub mod treap;

pub use order_statistic::{Median, MedianKey, Rank};
pub use treap::Treap;
