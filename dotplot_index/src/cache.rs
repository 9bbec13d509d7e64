// Copyright 2025 the Dotplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lazily built, memoized per-key index cache.

use hashbrown::HashMap;

use crate::aggregation::AggregationSet;
use crate::kdtree::KdTree;
use crate::types::{AxisPairKey, ClusterPoint, SimRegion};

/// Builds one [`KdTree`] per axis-pair key on first use and caches it for the
/// lifetime of the loaded dataset.
///
/// The aggregation is immutable once loaded, so entries are never
/// invalidated, only added. A cache instance must only ever be used with the
/// dataset its trees were built from; the engine replaces the whole cache
/// when a new dataset is bound.
pub struct ClusterIndexCache {
    trees: HashMap<AxisPairKey, KdTree>,
    build_count: u64,
}

impl ClusterIndexCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self {
            trees: HashMap::new(),
            build_count: 0,
        }
    }

    /// Returns how many tree builds have happened so far.
    ///
    /// Repeated queries against the same key must not increase this; it
    /// exists so memoization is observable.
    #[must_use]
    pub fn build_count(&self) -> u64 {
        self.build_count
    }

    /// Returns `true` if an index for `key` has already been built.
    #[must_use]
    pub fn is_built(&self, key: &AxisPairKey) -> bool {
        self.trees.contains_key(key)
    }

    /// Visits every cluster of `key`'s list that lies inside `region`.
    ///
    /// Builds and memoizes the index on first use. Returns `false` if the key
    /// has no cluster list in `agg` (the non-fatal "no data for this view"
    /// case); the visitor is not called.
    pub fn visit_region<F: FnMut(u32, &ClusterPoint)>(
        &mut self,
        agg: &AggregationSet,
        key: &AxisPairKey,
        region: SimRegion,
        visitor: F,
    ) -> bool {
        let Some(points) = agg.points(key) else {
            return false;
        };
        if !self.trees.contains_key(key) {
            self.build_count += 1;
            self.trees.insert(key.clone(), KdTree::build(points));
        }
        self.trees[key].visit(points, region, visitor);
        true
    }
}

impl Default for ClusterIndexCache {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for ClusterIndexCache {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ClusterIndexCache")
            .field("built_keys", &self.trees.len())
            .field("build_count", &self.build_count)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;
    use alloc::vec::Vec;

    use super::ClusterIndexCache;
    use crate::aggregation::AggregationSet;
    use crate::types::{AxisPair, ClusterPoint, SimRegion};

    fn sample() -> AggregationSet {
        let mut agg = AggregationSet::new(2, (-1000.0, 1000.0), (-1000.0, 1000.0));
        agg.insert(
            0,
            AxisPair::new("released", "budget"),
            vec![
                ClusterPoint::new(0.0, 0.0, 1.0, [1]),
                ClusterPoint::new(500.0, 0.0, 1.0, [3]),
            ],
        );
        agg
    }

    #[test]
    fn builds_once_per_key() {
        let agg = sample();
        let key = agg.resolve(0, "released", "budget").unwrap().key;
        let mut cache = ClusterIndexCache::new();
        assert_eq!(cache.build_count(), 0);
        assert!(!cache.is_built(&key));

        for _ in 0..3 {
            let mut n = 0;
            assert!(cache.visit_region(&agg, &key, SimRegion::everything(), |_, _| n += 1));
            assert_eq!(n, 2);
        }
        assert!(cache.is_built(&key));
        assert_eq!(cache.build_count(), 1);
    }

    #[test]
    fn missing_key_is_no_data_not_a_build() {
        let agg = sample();
        let mut cache = ClusterIndexCache::new();
        let bogus = crate::AxisPairKey {
            level: 1,
            pair: AxisPair::new("released", "budget"),
        };
        let mut visited = Vec::new();
        assert!(!cache.visit_region(&agg, &bogus, SimRegion::everything(), |id, _| {
            visited.push(id);
        }));
        assert!(visited.is_empty());
        assert_eq!(cache.build_count(), 0);
    }
}
