// Copyright 2025 the Dotplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

use dotplot_brush::{BrushGesture, BrushMode, BrushOutcome, BrushRegion, FrameSnapshot};
use dotplot_filter::{FilterState, FilterStore, SubscriptionId};
use dotplot_index::{
    AggregationError, AggregationSet, Attr, AxisPair, ClusterIndexCache, ResolvedPair,
};
use dotplot_scale::{
    AxisRole, AxisScales, Scale, ScaleSet, SimDomainMismatch, SimScale, ticks,
};
use dotplot_zoom::{
    LevelMapping, SettleOutcome, ZoomConstraints, ZoomController, ZoomDebugInfo, ZoomTransform,
};
use hashbrown::{HashMap, HashSet};
use kurbo::Rect;

use crate::config::EngineConfig;

/// A dataset rejected by [`Engine::load`].
#[derive(Clone, Debug, PartialEq)]
pub enum LoadError {
    /// The dataset violates a structural invariant.
    Aggregation(AggregationError),
    /// The dataset's declared simulation domain disagrees with the engine
    /// configuration.
    SimDomain(SimDomainMismatch),
    /// The dataset carries a different number of resolution levels than the
    /// configured mapping.
    LevelCount {
        /// Levels the configuration calls for.
        expected: u8,
        /// Levels the dataset carries.
        actual: u8,
    },
}

impl From<AggregationError> for LoadError {
    fn from(err: AggregationError) -> Self {
        Self::Aggregation(err)
    }
}

impl core::fmt::Display for LoadError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Aggregation(err) => write!(f, "invalid aggregation: {err}"),
            Self::SimDomain(err) => write!(f, "{err}"),
            Self::LevelCount { expected, actual } => write!(
                f,
                "dataset has {actual} resolution levels, configuration expects {expected}"
            ),
        }
    }
}

impl core::error::Error for LoadError {}

/// A failed [`Engine::set_axes`] request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AxesError {
    /// No presentation scale has been registered for the attribute on the
    /// requested axis.
    UnknownAttribute {
        /// The axis the attribute was requested for.
        role: AxisRole,
        /// The unknown attribute.
        attr: Attr,
    },
}

impl core::fmt::Display for AxesError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::UnknownAttribute { role, attr } => {
                write!(f, "no {role:?}-axis scale registered for attribute {attr}")
            }
        }
    }
}

impl core::error::Error for AxesError {}

/// The interaction engine: an explicit context object tying the coordinate
/// chain, index cache, zoom controller, brush, and filter store together.
///
/// One engine drives one plot. Hosts construct it with a configuration and a
/// view rect, register presentation scales per attribute, then [`load`] a
/// dataset and [`set_axes`]. Every event-facing method takes or implies a
/// caller-supplied millisecond timestamp; the engine owns no timer and no
/// global state.
///
/// Until both a dataset and an axis pair are bound, query methods are
/// readiness-guarded no-ops: they return `None` or `false` rather than
/// panicking, matching the transient not-yet-loaded window a host inevitably
/// has.
///
/// [`load`]: Engine::load
/// [`set_axes`]: Engine::set_axes
#[derive(Debug)]
pub struct Engine {
    config: EngineConfig,
    view: Rect,
    x_registry: HashMap<Attr, Scale>,
    y_registry: HashMap<Attr, Scale>,
    scales: Option<ScaleSet>,
    pair: Option<AxisPair>,
    agg: Option<AggregationSet>,
    cache: ClusterIndexCache,
    zoom: ZoomController,
    brush: BrushGesture,
    filters: FilterStore,
    resolved: Option<ResolvedPair>,
}

impl Engine {
    /// Creates an engine over the given view rect.
    #[must_use]
    pub fn new(config: EngineConfig, view: Rect) -> Self {
        let constraints = ZoomConstraints::new(config.k_min, config.k_max, config.pan_extent);
        let mapping = LevelMapping::new(config.max_level);
        let brush = match config.brush_quantizer {
            Some(quantizer) => BrushGesture::new().with_quantizer(quantizer),
            None => BrushGesture::new(),
        };
        Self {
            config,
            view,
            x_registry: HashMap::new(),
            y_registry: HashMap::new(),
            scales: None,
            pair: None,
            agg: None,
            cache: ClusterIndexCache::new(),
            zoom: ZoomController::new(constraints, mapping, view, config.quiet_ms),
            brush,
            filters: FilterStore::new(),
            resolved: None,
        }
    }

    /// Returns `true` once a dataset and an axis pair are both bound.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.agg.is_some() && self.scales.is_some()
    }

    /// Registers the presentation scale used when `attr` is shown on `role`.
    ///
    /// The scale's pixel range is overridden with the view's when the
    /// attribute becomes active, so registration order and view resizes do
    /// not interact.
    pub fn register_scale(&mut self, role: AxisRole, attr: impl Into<Attr>, scale: Scale) {
        self.registry_mut(role).insert(attr.into(), scale);
    }

    /// Resizes the plot area, updating the pan clamp and both pixel ranges.
    pub fn set_view(&mut self, view: Rect) {
        self.view = view;
        self.zoom.set_view(view);
        let (x_range, y_range) = self.pixel_ranges();
        if let Some(scales) = &mut self.scales {
            scales.set_pixel_ranges(x_range, y_range);
        }
    }

    /// Binds a dataset, replacing any previous one.
    ///
    /// Validates the structural invariants and the producer contracts (the
    /// simulation domains and the level count) before binding. On success
    /// the index cache is reset, any in-progress brush is abandoned, and the
    /// brush filter is cleared.
    pub fn load(&mut self, agg: AggregationSet) -> Result<(), LoadError> {
        agg.validate()?;
        let expected = self.config.max_level.saturating_add(1);
        if agg.level_count() != expected {
            return Err(LoadError::LevelCount {
                expected,
                actual: agg.level_count(),
            });
        }
        if agg.sim_domain_x() != self.config.sim_x {
            return Err(LoadError::SimDomain(SimDomainMismatch {
                axis: AxisRole::X,
                expected: self.config.sim_x,
                actual: agg.sim_domain_x(),
            }));
        }
        if agg.sim_domain_y() != self.config.sim_y {
            return Err(LoadError::SimDomain(SimDomainMismatch {
                axis: AxisRole::Y,
                expected: self.config.sim_y,
                actual: agg.sim_domain_y(),
            }));
        }
        self.agg = Some(agg);
        self.cache = ClusterIndexCache::new();
        self.brush.invalidate();
        self.resolve_active();
        self.filters.clear_brush();
        Ok(())
    }

    /// Switches the plot to a new attribute pair.
    ///
    /// Both attributes must have a registered scale for their axis. The
    /// active cluster list is re-resolved and the brush filter cleared (the
    /// old selection is meaningless under new axes) before subscribers are
    /// notified.
    pub fn set_axes(&mut self, x: impl Into<Attr>, y: impl Into<Attr>) -> Result<(), AxesError> {
        let x = x.into();
        let y = y.into();
        let Some(x_scale) = self.x_registry.get(&x).copied() else {
            return Err(AxesError::UnknownAttribute {
                role: AxisRole::X,
                attr: x,
            });
        };
        let Some(y_scale) = self.y_registry.get(&y).copied() else {
            return Err(AxesError::UnknownAttribute {
                role: AxisRole::Y,
                attr: y,
            });
        };

        let (x_range, y_range) = self.pixel_ranges();
        let x_axis = Self::axis_scales(x_scale, self.config.sim_x, x_range);
        let y_axis = Self::axis_scales(y_scale, self.config.sim_y, y_range);
        match &mut self.scales {
            Some(scales) => {
                scales.set_axis(AxisRole::X, x_axis);
                scales.set_axis(AxisRole::Y, y_axis);
            }
            None => self.scales = Some(ScaleSet::new(x_axis, y_axis)),
        }

        self.pair = Some(AxisPair::new(x, y));
        self.brush.invalidate();
        self.resolve_active();
        self.filters.clear_brush();
        Ok(())
    }

    /// Applies a pan/zoom update at time `now`, returning the clamped
    /// transform for immediate reprojection.
    ///
    /// The discrete level is not recomputed here; it settles through
    /// [`poll`] once the gesture has been quiet for the configured period.
    ///
    /// [`poll`]: Engine::poll
    pub fn set_zoom_transform(&mut self, t: ZoomTransform, now: u64) -> ZoomTransform {
        self.zoom.on_transform(t, now)
    }

    /// Advances the debounce clock, firing at most one settle.
    ///
    /// On a settle that changes the discrete level, the active cluster list
    /// is rebound and any in-progress brush abandoned and its filter cleared
    /// before filter subscribers are notified, so no subscriber observes a
    /// selection resolved against the old level.
    pub fn poll(&mut self, now: u64) -> Option<SettleOutcome> {
        let outcome = self.zoom.poll(now)?;
        if outcome.level_changed {
            self.brush.invalidate();
            self.resolve_active();
            self.filters.clear_brush();
        }
        Some(outcome)
    }

    /// Returns the armed settle deadline, if any, for hosts that schedule
    /// wakeups instead of polling every frame.
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        self.zoom.next_deadline()
    }

    /// Returns the live pan/zoom transform.
    #[must_use]
    pub fn transform(&self) -> ZoomTransform {
        self.zoom.transform()
    }

    /// Returns the currently settled resolution level.
    #[must_use]
    pub fn level(&self) -> u8 {
        self.zoom.level()
    }

    /// Returns the settled point-size compensation, `1 / k`.
    #[must_use]
    pub fn point_scale(&self) -> f64 {
        self.zoom.point_scale()
    }

    /// Starts a brush gesture. Returns `false` (and stays idle) when the
    /// engine is not ready.
    pub fn begin_brush(&mut self, mode: BrushMode) -> bool {
        if !self.is_ready() || self.resolved.is_none() {
            return false;
        }
        self.brush.begin(mode);
        true
    }

    /// Resolves one brush step and publishes the result to the filter store.
    ///
    /// All inversions for the step run against one snapshot of the transform
    /// and scales taken here. A degenerate region clears the brush filter;
    /// any other region replaces it with the resolved member set. Returns
    /// `None` when no gesture is active or the engine is not ready.
    pub fn update_brush(&mut self, region: BrushRegion) -> Option<BrushOutcome> {
        let scales = self.scales.as_ref()?;
        let agg = self.agg.as_ref()?;
        let resolved = self.resolved.as_ref()?;
        let snapshot = FrameSnapshot::new(
            self.zoom.transform(),
            scales.x().clone(),
            scales.y().clone(),
        );
        let outcome = self
            .brush
            .update(region, &snapshot, &mut self.cache, agg, resolved)?;
        if outcome.is_cleared() {
            self.filters.clear_brush();
        } else {
            self.filters
                .set_brush(outcome.item_ids.clone(), outcome.raw_range);
        }
        Some(outcome)
    }

    /// Ends the brush gesture, leaving the published selection in place.
    pub fn end_brush(&mut self) {
        self.brush.end();
    }

    /// Replaces the search filter id set.
    pub fn set_search(&mut self, ids: HashSet<u32>) {
        self.filters.set_search(ids);
    }

    /// Returns the current linked filter state.
    #[must_use]
    pub fn filter_state(&self) -> &FilterState {
        self.filters.get()
    }

    /// Returns `true` if the item passes every non-empty filter.
    #[must_use]
    pub fn is_included(&self, id: u32) -> bool {
        self.filters.get().is_included(id)
    }

    /// Subscribes to filter changes.
    pub fn subscribe(&mut self, callback: impl FnMut(&FilterState) + 'static) -> SubscriptionId {
        self.filters.subscribe(callback)
    }

    /// Drops a filter subscription.
    pub fn unsubscribe(&mut self, id: SubscriptionId) {
        self.filters.unsubscribe(id);
    }

    /// Computes tick positions over the currently visible raw window of one
    /// axis.
    ///
    /// The visible window is the axis's pixel range inverted through the
    /// live transform, so ticks follow the view under pan and zoom. Returns
    /// `None` until axes are bound.
    #[must_use]
    pub fn axis_ticks(&self, role: AxisRole, target: usize) -> Option<Vec<f64>> {
        let scales = self.scales.as_ref()?;
        let axis = scales.axis(role);
        let t = self.zoom.transform();
        let range = axis.presentation().range();
        let invert = |px: f64| match role {
            AxisRole::X => t.invert_x(px),
            AxisRole::Y => t.invert_y(px),
        };
        let visible = (
            axis.pixel_to_raw(invert(range.0)),
            axis.pixel_to_raw(invert(range.1)),
        );
        let scale = Scale::new(axis.presentation().kind(), visible, range);
        Some(ticks(&scale, target))
    }

    /// Snapshot of the engine state for debugging and inspection.
    #[must_use]
    pub fn debug_info(&self) -> EngineDebugInfo {
        EngineDebugInfo {
            ready: self.is_ready(),
            pair: self.pair.clone(),
            resolved: self.resolved.clone(),
            zoom: self.zoom.debug_info(),
            index_builds: self.cache.build_count(),
            filter_revision: self.filters.revision(),
            scale_version: self.scales.as_ref().map(ScaleSet::version),
        }
    }

    fn registry_mut(&mut self, role: AxisRole) -> &mut HashMap<Attr, Scale> {
        match role {
            AxisRole::X => &mut self.x_registry,
            AxisRole::Y => &mut self.y_registry,
        }
    }

    fn pixel_ranges(&self) -> ((f64, f64), (f64, f64)) {
        // Vertical pixels grow downward on screen, so the y range descends.
        (
            (self.view.x0, self.view.x1),
            (self.view.y1, self.view.y0),
        )
    }

    fn axis_scales(mut presentation: Scale, sim_domain: (f64, f64), range: (f64, f64)) -> AxisScales {
        presentation.set_range(range);
        AxisScales::new(presentation, SimScale::new(sim_domain, range))
    }

    /// Rebinds `resolved` to the cluster list for the active pair at the
    /// settled level, if both exist.
    fn resolve_active(&mut self) {
        self.resolved = match (self.agg.as_ref(), self.pair.as_ref()) {
            (Some(agg), Some(pair)) => {
                agg.resolve(self.zoom.level(), pair.x.clone(), pair.y.clone())
            }
            _ => None,
        };
    }
}

/// Debug snapshot of an [`Engine`].
#[derive(Clone, Debug)]
pub struct EngineDebugInfo {
    /// Whether a dataset and axes are bound.
    pub ready: bool,
    /// The active attribute pair as requested.
    pub pair: Option<AxisPair>,
    /// The resolved storage key for the active pair and level.
    pub resolved: Option<ResolvedPair>,
    /// Zoom controller state.
    pub zoom: ZoomDebugInfo,
    /// How many spatial indexes have been built so far.
    pub index_builds: u64,
    /// The filter store revision.
    pub filter_revision: u64,
    /// The scale set version, once axes are bound.
    pub scale_version: Option<u64>,
}
