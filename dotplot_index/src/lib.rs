// Copyright 2025 the Dotplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dotplot Index: a multi-resolution spatial index over precomputed cluster points.
//!
//! An offline aggregation pass collapses thousands of raw items into cluster
//! points, once per zoom resolution *level* and per displayable axis pair.
//! This crate owns that data at runtime:
//!
//! - [`ClusterPoint`] / [`AxisPair`] / [`AxisPairKey`]: the data model. Level
//!   `0` is the finest aggregation (one member per cluster).
//! - [`AggregationSet`]: the immutable loaded dataset, with
//!   [`AggregationSet::resolve`] handling the "only one attribute ordering
//!   exists per unordered pair" convention in a single place, and
//!   [`AggregationSet::validate`] checking the dataset invariants at load
//!   time.
//! - [`KdTree`]: a static, bbox-pruned spatial tree over one key's cluster
//!   points, keyed by simulation coordinates.
//! - [`ClusterIndexCache`]: lazily builds one tree per key on first use and
//!   memoizes it for the lifetime of the dataset. Brush queries fire on every
//!   pointer move during a drag; the cache plus tree turn each one into an
//!   `O(log n + k)` walk instead of a linear scan.
//!
//! ## Example
//!
//! ```rust
//! use dotplot_index::{
//!     AggregationSet, AxisPair, ClusterIndexCache, ClusterPoint, SimRegion,
//! };
//!
//! let pair = AxisPair::new("released", "budget");
//! let mut agg = AggregationSet::new(1, (-1000.0, 1000.0), (-1000.0, 1000.0));
//! agg.insert(0, pair.clone(), vec![
//!     ClusterPoint::new(0.0, 0.0, 1.0, [1]),
//!     ClusterPoint::new(500.0, 0.0, 1.0, [3]),
//! ]);
//!
//! let resolved = agg.resolve(0, "released", "budget").unwrap();
//! let mut cache = ClusterIndexCache::new();
//! let mut hits = Vec::new();
//! cache.visit_region(
//!     &agg,
//!     &resolved.key,
//!     SimRegion::rect((-10.0, 10.0), (-10.0, 10.0)),
//!     |id, point| hits.push((id, point.members[0])),
//! );
//! assert_eq!(hits, [(0, 1)]);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod aggregation;
mod cache;
mod kdtree;
mod types;

pub use aggregation::{AggregationError, AggregationSet, ResolvedPair};
pub use cache::ClusterIndexCache;
pub use kdtree::KdTree;
pub use types::{Attr, AxisPair, AxisPairKey, ClusterPoint, SimRegion};
