// Copyright 2025 the Dotplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The immutable loaded aggregation dataset and its load-time validation.

use alloc::vec::Vec;

use hashbrown::HashMap;

use crate::types::{Attr, AxisPair, AxisPairKey, ClusterPoint};

/// The offline-produced aggregation: one cluster list per level and axis pair.
///
/// The set is populated once at load time and never mutated afterwards; the
/// per-key spatial indexes built over it (see [`crate::ClusterIndexCache`])
/// stay valid for its whole lifetime.
///
/// Level `0` is the finest aggregation level; `level_count - 1` the coarsest.
#[derive(Clone, Debug)]
pub struct AggregationSet {
    levels: Vec<HashMap<AxisPair, Vec<ClusterPoint>>>,
    sim_x: (f64, f64),
    sim_y: (f64, f64),
}

/// The outcome of resolving an axis pair against the loaded data.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ResolvedPair {
    /// The key the data is actually stored under.
    pub key: AxisPairKey,
    /// `true` if the stored ordering is the swap of the requested one.
    ///
    /// When set, query regions must be [`crate::SimRegion::transposed`] and
    /// visited point coordinates read with x/y exchanged.
    pub swapped: bool,
}

impl AggregationSet {
    /// Creates an empty set with the given number of levels and the
    /// producer-declared simulation domains per axis.
    #[must_use]
    pub fn new(level_count: u8, sim_x: (f64, f64), sim_y: (f64, f64)) -> Self {
        let mut levels = Vec::new();
        levels.resize_with(usize::from(level_count), HashMap::new);
        Self {
            levels,
            sim_x,
            sim_y,
        }
    }

    /// Returns the number of levels.
    #[must_use]
    pub fn level_count(&self) -> u8 {
        // Construction bounds the level count to `u8`.
        u8::try_from(self.levels.len()).unwrap_or(u8::MAX)
    }

    /// Returns the coarsest level number.
    #[must_use]
    pub fn max_level(&self) -> u8 {
        self.level_count().saturating_sub(1)
    }

    /// Returns the simulation domain the producer declared for the x axis.
    #[must_use]
    pub fn sim_domain_x(&self) -> (f64, f64) {
        self.sim_x
    }

    /// Returns the simulation domain the producer declared for the y axis.
    #[must_use]
    pub fn sim_domain_y(&self) -> (f64, f64) {
        self.sim_y
    }

    /// Inserts the cluster list for one level and ordered pair.
    ///
    /// # Panics
    ///
    /// Panics if `level` is out of range for this set.
    pub fn insert(&mut self, level: u8, pair: AxisPair, points: Vec<ClusterPoint>) {
        self.levels[usize::from(level)].insert(pair, points);
    }

    /// Returns the cluster list stored under `key`, if any.
    #[must_use]
    pub fn points(&self, key: &AxisPairKey) -> Option<&[ClusterPoint]> {
        self.levels
            .get(usize::from(key.level))
            .and_then(|m| m.get(&key.pair))
            .map(Vec::as_slice)
    }

    /// Resolves a requested axis ordering against the stored data.
    ///
    /// Only one ordering per unordered pair is guaranteed to exist; this is
    /// the one place that falls back to the swapped ordering on a miss. `None`
    /// means the pair is absent at this level in either ordering — a
    /// non-fatal "no data for this view" condition, not an error.
    #[must_use]
    pub fn resolve(
        &self,
        level: u8,
        x: impl Into<Attr>,
        y: impl Into<Attr>,
    ) -> Option<ResolvedPair> {
        let pair = AxisPair::new(x, y);
        let stored = self.levels.get(usize::from(level))?;
        if stored.contains_key(&pair) {
            return Some(ResolvedPair {
                key: AxisPairKey { level, pair },
                swapped: false,
            });
        }
        let swapped = pair.swapped();
        stored.contains_key(&swapped).then(|| ResolvedPair {
            key: AxisPairKey {
                level,
                pair: swapped,
            },
            swapped: true,
        })
    }

    /// Checks the dataset invariants.
    ///
    /// - Every cluster has at least one member.
    /// - At level `0` every cluster has exactly one member.
    /// - Within one cluster list, radius is monotone in member count: a
    ///   cluster with strictly more members never has a smaller radius than
    ///   the largest cluster with fewer members.
    pub fn validate(&self) -> Result<(), AggregationError> {
        for (level_idx, stored) in self.levels.iter().enumerate() {
            let level = u8::try_from(level_idx).unwrap_or(u8::MAX);
            for (pair, points) in stored {
                let mut by_count: Vec<(usize, f64)> =
                    points.iter().map(|p| (p.members.len(), p.r)).collect();
                for (cluster, point) in points.iter().enumerate() {
                    let cluster = u32::try_from(cluster).unwrap_or(u32::MAX);
                    if point.members.is_empty() {
                        return Err(AggregationError::MemberlessCluster {
                            level,
                            pair: pair.clone(),
                            cluster,
                        });
                    }
                    if level == 0 && point.members.len() != 1 {
                        return Err(AggregationError::FinestLevelMultiMember {
                            pair: pair.clone(),
                            cluster,
                            members: point.members.len(),
                        });
                    }
                }

                by_count.sort_unstable_by(|a, b| {
                    a.0.cmp(&b.0).then(a.1.partial_cmp(&b.1).unwrap_or(core::cmp::Ordering::Equal))
                });
                let mut prev_count = 0;
                let mut max_r_smaller = f64::NEG_INFINITY;
                let mut max_r_current = f64::NEG_INFINITY;
                for (count, r) in by_count {
                    if count != prev_count {
                        max_r_smaller = max_r_smaller.max(max_r_current);
                        max_r_current = f64::NEG_INFINITY;
                        prev_count = count;
                    }
                    if r < max_r_smaller {
                        return Err(AggregationError::RadiusNotMonotone {
                            level,
                            pair: pair.clone(),
                        });
                    }
                    max_r_current = max_r_current.max(r);
                }
            }
        }
        Ok(())
    }
}

/// A dataset invariant violation detected by [`AggregationSet::validate`].
#[derive(Clone, Debug, PartialEq)]
pub enum AggregationError {
    /// A cluster carries no member ids.
    MemberlessCluster {
        /// The level the cluster was found at.
        level: u8,
        /// The pair the cluster belongs to.
        pair: AxisPair,
        /// Index of the cluster within its list.
        cluster: u32,
    },
    /// A finest-level cluster aggregates more than one item.
    FinestLevelMultiMember {
        /// The pair the cluster belongs to.
        pair: AxisPair,
        /// Index of the cluster within its list.
        cluster: u32,
        /// The offending member count.
        members: usize,
    },
    /// Radius does not grow monotonically with member count in one list.
    RadiusNotMonotone {
        /// The level of the offending list.
        level: u8,
        /// The pair of the offending list.
        pair: AxisPair,
    },
}

impl core::fmt::Display for AggregationError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::MemberlessCluster {
                level,
                pair,
                cluster,
            } => write!(
                f,
                "cluster {cluster} of ({}, {}) at level {level} has no members",
                pair.x, pair.y
            ),
            Self::FinestLevelMultiMember {
                pair,
                cluster,
                members,
            } => write!(
                f,
                "finest-level cluster {cluster} of ({}, {}) has {members} members, expected 1",
                pair.x, pair.y
            ),
            Self::RadiusNotMonotone { level, pair } => write!(
                f,
                "radius not monotone in member count for ({}, {}) at level {level}",
                pair.x, pair.y
            ),
        }
    }
}

impl core::error::Error for AggregationError {}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::{AggregationError, AggregationSet};
    use crate::types::{AxisPair, ClusterPoint};

    fn pair() -> AxisPair {
        AxisPair::new("released", "score")
    }

    #[test]
    fn resolve_prefers_requested_ordering_then_swaps() {
        let mut agg = AggregationSet::new(2, (-1000.0, 1000.0), (-1000.0, 1000.0));
        agg.insert(1, pair(), vec![ClusterPoint::new(0.0, 0.0, 2.0, [1, 2])]);

        let direct = agg.resolve(1, "released", "score").unwrap();
        assert!(!direct.swapped);
        assert_eq!(direct.key.pair, pair());

        let swapped = agg.resolve(1, "score", "released").unwrap();
        assert!(swapped.swapped);
        assert_eq!(swapped.key.pair, pair());

        // Absent in both orderings: no data, not an error.
        assert!(agg.resolve(1, "budget", "score").is_none());
        // Absent level.
        assert!(agg.resolve(5, "released", "score").is_none());
    }

    #[test]
    fn validate_accepts_a_well_formed_set() {
        let mut agg = AggregationSet::new(2, (-1000.0, 1000.0), (-1000.0, 1000.0));
        agg.insert(
            0,
            pair(),
            vec![
                ClusterPoint::new(0.0, 0.0, 1.0, [1]),
                ClusterPoint::new(5.0, 5.0, 1.0, [2]),
            ],
        );
        agg.insert(
            1,
            pair(),
            vec![
                ClusterPoint::new(2.0, 2.0, 3.0, [1, 2]),
                ClusterPoint::new(9.0, 9.0, 1.0, [3]),
            ],
        );
        assert_eq!(agg.validate(), Ok(()));
    }

    #[test]
    fn validate_rejects_multi_member_finest_level() {
        let mut agg = AggregationSet::new(1, (-1000.0, 1000.0), (-1000.0, 1000.0));
        agg.insert(0, pair(), vec![ClusterPoint::new(0.0, 0.0, 2.0, [1, 2])]);
        assert!(matches!(
            agg.validate(),
            Err(AggregationError::FinestLevelMultiMember { members: 2, .. })
        ));
    }

    #[test]
    fn validate_rejects_non_monotone_radius() {
        let mut agg = AggregationSet::new(2, (-1000.0, 1000.0), (-1000.0, 1000.0));
        agg.insert(
            1,
            pair(),
            vec![
                // Three members but smaller than the single-member cluster.
                ClusterPoint::new(0.0, 0.0, 0.5, [1, 2, 3]),
                ClusterPoint::new(5.0, 5.0, 2.0, [4]),
            ],
        );
        assert!(matches!(
            agg.validate(),
            Err(AggregationError::RadiusNotMonotone { level: 1, .. })
        ));
    }

    #[test]
    fn validate_allows_equal_radius_across_counts() {
        let mut agg = AggregationSet::new(2, (-1000.0, 1000.0), (-1000.0, 1000.0));
        agg.insert(
            1,
            pair(),
            vec![
                ClusterPoint::new(0.0, 0.0, 1.0, [1]),
                ClusterPoint::new(5.0, 5.0, 1.0, [2, 3]),
            ],
        );
        assert_eq!(agg.validate(), Ok(()));
    }
}
