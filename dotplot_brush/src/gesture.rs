// Copyright 2025 the Dotplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use dotplot_index::{AggregationSet, ClusterIndexCache, ResolvedPair, SimRegion};
use dotplot_scale::AxisRole;
use hashbrown::HashSet;

use crate::snapshot::FrameSnapshot;

/// Which kind of region the active view lets the user draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BrushMode {
    /// A 1D interval along one axis; the other axis is unconstrained.
    Range(AxisRole),
    /// A 2D rectangle constraining both axes.
    Rect,
}

/// The screen-pixel region of one gesture step.
///
/// Endpoints may arrive in either order (a drag can move up/left); inversion
/// reorders them.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BrushRegion {
    /// A pixel interval along the mode's axis.
    Interval(f64, f64),
    /// Pixel intervals along both axes.
    Rect {
        /// The horizontal pixel interval.
        x: (f64, f64),
        /// The vertical pixel interval, screen-down-positive.
        y: (f64, f64),
    },
}

impl BrushRegion {
    /// Returns `true` if the region has zero extent along a constrained axis.
    #[must_use]
    fn is_degenerate(&self) -> bool {
        match *self {
            Self::Interval(a, b) => a == b,
            Self::Rect { x, y } => x.0 == x.1 || y.0 == y.1,
        }
    }
}

/// The resolved selection of one gesture step.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BrushOutcome {
    /// Ids of the visited cluster points (indices into the active list).
    pub cluster_ids: HashSet<u32>,
    /// Union of the visited clusters' member item ids.
    pub item_ids: HashSet<u32>,
    /// Raw-value bounds along the brushed axis, for range mode.
    pub raw_range: Option<(f64, f64)>,
}

impl BrushOutcome {
    /// The cleared outcome: empty sets, no range.
    #[must_use]
    pub fn cleared() -> Self {
        Self::default()
    }

    /// Returns `true` if this outcome clears the selection.
    #[must_use]
    pub fn is_cleared(&self) -> bool {
        self.cluster_ids.is_empty() && self.item_ids.is_empty() && self.raw_range.is_none()
    }
}

/// The brush gesture lifecycle.
///
/// `begin` → any number of `update` steps → `end`. Updates outside an active
/// gesture, or with a region that does not match the mode, are ignored. The
/// owner calls [`BrushGesture::invalidate`] when the discrete level or axis
/// pair changes mid-gesture.
#[derive(Debug, Default)]
pub struct BrushGesture {
    mode: Option<BrushMode>,
    quantizer: Option<fn(f64) -> f64>,
}

impl BrushGesture {
    /// Creates an idle gesture.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a quantizer applied to published raw bounds.
    ///
    /// The published `raw_range` is conventionally coarsened to a public unit
    /// (calendar years for a time axis). That conversion is presentation
    /// policy, so it is injected rather than baked in; the default publishes
    /// raw bounds unchanged.
    #[must_use]
    pub fn with_quantizer(mut self, quantizer: fn(f64) -> f64) -> Self {
        self.quantizer = Some(quantizer);
        self
    }

    /// Returns `true` while a gesture is active.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.mode.is_some()
    }

    /// Returns the active mode, if any.
    #[must_use]
    pub fn mode(&self) -> Option<BrushMode> {
        self.mode
    }

    /// Starts a gesture. A gesture already in progress is restarted.
    pub fn begin(&mut self, mode: BrushMode) {
        self.mode = Some(mode);
    }

    /// Ends the gesture, leaving the last published selection in place.
    pub fn end(&mut self) {
        self.mode = None;
    }

    /// Abandons the gesture because its pixel geometry went stale.
    ///
    /// The owner clears the published selection alongside; this only stops
    /// further updates from being interpreted against the new geometry.
    pub fn invalidate(&mut self) {
        self.mode = None;
    }

    /// Resolves one gesture step into cluster membership.
    ///
    /// Returns `None` when there is no active gesture or the region does not
    /// match the mode. A degenerate region returns
    /// [`BrushOutcome::cleared`] — the caller publishes the empty filter
    /// rather than an empty selection.
    ///
    /// All inversions go through `snapshot`; `resolved` names the cluster
    /// list actually stored (possibly with swapped axis ordering, which is
    /// accounted for here).
    pub fn update(
        &self,
        region: BrushRegion,
        snapshot: &FrameSnapshot,
        cache: &mut ClusterIndexCache,
        agg: &AggregationSet,
        resolved: &ResolvedPair,
    ) -> Option<BrushOutcome> {
        let mode = self.mode?;
        let matches_mode = matches!(
            (mode, region),
            (BrushMode::Range(_), BrushRegion::Interval(..)) | (BrushMode::Rect, BrushRegion::Rect { .. })
        );
        if !matches_mode {
            // Region shape does not match the mode: ignore the event.
            return None;
        }
        if region.is_degenerate() {
            return Some(BrushOutcome::cleared());
        }

        let (sim_region, raw_range) = match (mode, region) {
            (BrushMode::Range(role), BrushRegion::Interval(a, b)) => {
                let sim = snapshot.sim_interval(role, (a, b));
                let region = match role {
                    AxisRole::X => SimRegion::x_band(sim),
                    AxisRole::Y => SimRegion::y_band(sim),
                };
                let (lo, hi) = snapshot.raw_interval(role, (a, b));
                let quantize = self.quantizer.unwrap_or(|v| v);
                (region, Some((quantize(lo), quantize(hi))))
            }
            (BrushMode::Rect, BrushRegion::Rect { x, y }) => {
                let sim_x = snapshot.sim_interval(AxisRole::X, x);
                let sim_y = snapshot.sim_interval(AxisRole::Y, y);
                (SimRegion::rect(sim_x, sim_y), None)
            }
            _ => unreachable!("shape checked against the mode above"),
        };

        let sim_region = if resolved.swapped {
            sim_region.transposed()
        } else {
            sim_region
        };

        let mut outcome = BrushOutcome {
            raw_range,
            ..BrushOutcome::default()
        };
        cache.visit_region(agg, &resolved.key, sim_region, |id, point| {
            outcome.cluster_ids.insert(id);
            outcome.item_ids.extend(point.members.iter().copied());
        });
        Some(outcome)
    }
}
