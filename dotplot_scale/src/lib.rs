// Copyright 2025 the Dotplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dotplot Scale: headless coordinate-space primitives for aggregated scatterplots.
//!
//! A plotted value passes through several coordinate spaces on its way to the
//! screen: the raw attribute domain (dates, money, ratings), a per-axis
//! presentation scale mapping raw values to plot pixels, and — for
//! pre-aggregated cluster points — a fixed *simulation space* in which an
//! offline layout pass placed the clusters. This crate models those spaces and
//! the conversions between them:
//!
//! - [`Scale`]: a presentation scale ([`ScaleKind::Linear`],
//!   [`ScaleKind::Log10`], [`ScaleKind::Time`]) mapping raw value ↔ pixel.
//! - [`SimScale`]: the linear map between the producer's fixed simulation
//!   domain and the same pixel range.
//! - [`AxisScales`] / [`ScaleSet`]: one axis (or an x/y pair) carrying both
//!   maps, with a version counter that bumps only when a domain or range
//!   genuinely changes, so derived tick sets and indexes can be memoized by
//!   version instead of recomputed unconditionally.
//! - [`ticks`]: "nice" tick positions for the immediate axis redraw path.
//!
//! The simulation domain is a contract shared with the offline aggregation
//! producer; a silent mismatch misplaces every cluster point, so
//! [`ScaleSet::validate_sim_domains`] exposes an explicit equality check for
//! load time.
//!
//! ## Example
//!
//! ```rust
//! use dotplot_scale::{AxisScales, Scale, ScaleKind, SimScale};
//!
//! // Score axis: raw 0..10, drawn on a screen-down pixel range.
//! let presentation = Scale::new(ScaleKind::Linear, (0.0, 10.0), (600.0, 0.0));
//! let sim = SimScale::new((-1000.0, 1000.0), (600.0, 0.0));
//! let axis = AxisScales::new(presentation, sim);
//!
//! let px = axis.raw_to_pixel(5.0);
//! assert!((px - 300.0).abs() < 1e-9);
//! assert!((axis.pixel_to_raw(px) - 5.0).abs() < 1e-9);
//!
//! // Simulation origin lands at the same pixel as the domain midpoint.
//! assert!((axis.sim_to_pixel(0.0) - 300.0).abs() < 1e-9);
//! ```
//!
//! Pixel ranges may be descending (`range.0 > range.1`) to express
//! screen-down-positive vertical axes; every conversion works in both
//! orientations.
//!
//! This crate is `no_std`.

#![no_std]

extern crate alloc;

mod scale;
mod set;
mod sim;
mod ticks;

pub use scale::{Scale, ScaleKind};
pub use set::{AxisRole, ScaleSet, SimDomainMismatch};
pub use sim::SimScale;
pub use ticks::ticks;

/// Paired presentation and simulation scales for one axis.
///
/// Both scales share the same pixel range; the presentation scale carries the
/// raw attribute domain while the simulation scale carries the fixed layout
/// domain agreed with the offline producer.
#[derive(Clone, Debug, PartialEq)]
pub struct AxisScales {
    presentation: Scale,
    sim: SimScale,
}

impl AxisScales {
    /// Creates a new axis from a presentation scale and a simulation scale.
    ///
    /// The two scales are expected to share a pixel range; in debug builds a
    /// mismatch is asserted.
    #[must_use]
    pub fn new(presentation: Scale, sim: SimScale) -> Self {
        debug_assert!(
            presentation.range() == sim.range(),
            "presentation and simulation scales must share a pixel range"
        );
        Self { presentation, sim }
    }

    /// Returns the presentation scale.
    #[must_use]
    pub fn presentation(&self) -> &Scale {
        &self.presentation
    }

    /// Returns the simulation scale.
    #[must_use]
    pub fn sim(&self) -> &SimScale {
        &self.sim
    }

    /// Maps a raw attribute value to a plot pixel.
    #[must_use]
    pub fn raw_to_pixel(&self, raw: f64) -> f64 {
        self.presentation.to_pixel(raw)
    }

    /// Maps a plot pixel back to a raw attribute value.
    #[must_use]
    pub fn pixel_to_raw(&self, px: f64) -> f64 {
        self.presentation.from_pixel(px)
    }

    /// Maps a simulation-space coordinate to a plot pixel.
    #[must_use]
    pub fn sim_to_pixel(&self, sim: f64) -> f64 {
        self.sim.to_pixel(sim)
    }

    /// Maps a plot pixel back to a simulation-space coordinate.
    #[must_use]
    pub fn pixel_to_sim(&self, px: f64) -> f64 {
        self.sim.from_pixel(px)
    }

    /// Sets the shared pixel range on both scales.
    ///
    /// Returns `true` if the range actually changed.
    pub fn set_range(&mut self, range: (f64, f64)) -> bool {
        let changed = self.presentation.set_range(range);
        let changed = self.sim.set_range(range) || changed;
        changed
    }
}
