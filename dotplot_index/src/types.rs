// Copyright 2025 the Dotplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public data-model types: attributes, keys, cluster points, and query regions.

use alloc::sync::Arc;
use smallvec::SmallVec;

/// An attribute name, cheap to clone and hashable by content.
///
/// Attributes name the displayable columns of the source dataset (for example
/// `"released"` or `"budget"`). They are interned behind an `Arc<str>` so
/// that keys and registries can hold them without repeated allocation.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Attr(Arc<str>);

impl Attr {
    /// Returns the attribute name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Attr {
    fn from(s: &str) -> Self {
        Self(Arc::from(s))
    }
}

impl From<alloc::string::String> for Attr {
    fn from(s: alloc::string::String) -> Self {
        Self(Arc::from(s.as_str()))
    }
}

impl core::fmt::Display for Attr {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// An ordered x/y attribute pair.
///
/// The offline producer emits cluster lists for exactly one ordering of each
/// unordered attribute pair; [`crate::AggregationSet::resolve`] is the single
/// place that falls back to the swapped ordering.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct AxisPair {
    /// The x attribute.
    pub x: Attr,
    /// The y attribute.
    pub y: Attr,
}

impl AxisPair {
    /// Creates a pair from two attribute names.
    #[must_use]
    pub fn new(x: impl Into<Attr>, y: impl Into<Attr>) -> Self {
        Self {
            x: x.into(),
            y: y.into(),
        }
    }

    /// Returns the pair with x and y exchanged.
    #[must_use]
    pub fn swapped(&self) -> Self {
        Self {
            x: self.y.clone(),
            y: self.x.clone(),
        }
    }
}

/// Names one precomputed cluster list: a resolution level plus an axis pair.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct AxisPairKey {
    /// The resolution level; `0` is the finest aggregation.
    pub level: u8,
    /// The attribute ordering the producer emitted data for.
    pub pair: AxisPair,
}

/// One aggregated point in simulation space.
///
/// A cluster stands in for one or more original items. Its radius grows with
/// the member count; at level `0` every cluster has exactly one member.
#[derive(Clone, Debug, PartialEq)]
pub struct ClusterPoint {
    /// Simulation-space x coordinate.
    pub x: f64,
    /// Simulation-space y coordinate.
    pub y: f64,
    /// Radius, in simulation units.
    pub r: f64,
    /// Ordered ids of the original items collapsed into this cluster.
    pub members: SmallVec<[u32; 4]>,
}

impl ClusterPoint {
    /// Creates a cluster point.
    #[must_use]
    pub fn new(x: f64, y: f64, r: f64, members: impl IntoIterator<Item = u32>) -> Self {
        Self {
            x,
            y,
            r,
            members: members.into_iter().collect(),
        }
    }
}

/// An axis-aligned query region in simulation space.
///
/// Bounds are inclusive; either axis may be unbounded (`±∞`), which turns a
/// rectangle query into a 1D band query along the other axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimRegion {
    /// Minimum x bound.
    pub x0: f64,
    /// Maximum x bound.
    pub x1: f64,
    /// Minimum y bound.
    pub y0: f64,
    /// Maximum y bound.
    pub y1: f64,
}

impl SimRegion {
    /// A rectangle from two intervals. Endpoints may be given in either order.
    #[must_use]
    pub fn rect(x: (f64, f64), y: (f64, f64)) -> Self {
        Self {
            x0: x.0.min(x.1),
            x1: x.0.max(x.1),
            y0: y.0.min(y.1),
            y1: y.0.max(y.1),
        }
    }

    /// A vertical band: bounded in x, unbounded in y.
    #[must_use]
    pub fn x_band(x: (f64, f64)) -> Self {
        Self::rect(x, (f64::NEG_INFINITY, f64::INFINITY))
    }

    /// A horizontal band: bounded in y, unbounded in x.
    #[must_use]
    pub fn y_band(y: (f64, f64)) -> Self {
        Self::rect((f64::NEG_INFINITY, f64::INFINITY), y)
    }

    /// The unbounded region covering all of simulation space.
    #[must_use]
    pub fn everything() -> Self {
        Self::rect(
            (f64::NEG_INFINITY, f64::INFINITY),
            (f64::NEG_INFINITY, f64::INFINITY),
        )
    }

    /// Returns the region with the x and y intervals exchanged.
    ///
    /// Used when a query targets the swapped ordering of an axis pair: the
    /// stored points carry the other orientation, so the query must follow.
    #[must_use]
    pub fn transposed(&self) -> Self {
        Self {
            x0: self.y0,
            x1: self.y1,
            y0: self.x0,
            y1: self.x1,
        }
    }

    /// Returns `true` if the point lies inside the region.
    #[must_use]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x0 && x <= self.x1 && y >= self.y0 && y <= self.y1
    }

    /// Returns `true` if the region intersects the given bounding box.
    #[must_use]
    pub fn intersects_box(&self, min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> bool {
        self.x0 <= max_x && self.x1 >= min_x && self.y0 <= max_y && self.y1 >= min_y
    }

    /// Returns `true` if the region fully contains the given bounding box.
    #[must_use]
    pub fn contains_box(&self, min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> bool {
        self.x0 <= min_x && self.x1 >= max_x && self.y0 <= min_y && self.y1 >= max_y
    }
}
