// Copyright 2025 the Dotplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use dotplot_scale::{AxisRole, AxisScales};
use dotplot_zoom::ZoomTransform;

/// One consistent capture of the live transform and axis scales.
///
/// Taken at event time, before any inversion, so that every conversion within
/// one gesture step observes the same coordinate chain. A snapshot is cheap
/// (a handful of `f64`s) and is discarded after the step.
#[derive(Clone, Debug)]
pub struct FrameSnapshot {
    transform: ZoomTransform,
    x: AxisScales,
    y: AxisScales,
}

impl FrameSnapshot {
    /// Captures a snapshot from the current transform and scales.
    #[must_use]
    pub fn new(transform: ZoomTransform, x: AxisScales, y: AxisScales) -> Self {
        Self { transform, x, y }
    }

    /// Returns the captured transform.
    #[must_use]
    pub fn transform(&self) -> ZoomTransform {
        self.transform
    }

    /// Returns the captured scales for one axis.
    #[must_use]
    pub fn axis(&self, role: AxisRole) -> &AxisScales {
        match role {
            AxisRole::X => &self.x,
            AxisRole::Y => &self.y,
        }
    }

    /// Inverts a screen-pixel interval into simulation bounds along one axis.
    ///
    /// The result is ordered `(min, max)` regardless of the endpoint order or
    /// the axis orientation — the vertical pixel axis is screen-down-positive,
    /// so its endpoints come out reversed and are swapped here.
    #[must_use]
    pub fn sim_interval(&self, role: AxisRole, px: (f64, f64)) -> (f64, f64) {
        let (a, b) = self.invert_pair(role, px, |axis, plot_px| axis.pixel_to_sim(plot_px));
        if a <= b { (a, b) } else { (b, a) }
    }

    /// Inverts a screen-pixel interval into raw attribute bounds along one
    /// axis, ordered `(min, max)`.
    #[must_use]
    pub fn raw_interval(&self, role: AxisRole, px: (f64, f64)) -> (f64, f64) {
        let (a, b) = self.invert_pair(role, px, |axis, plot_px| axis.pixel_to_raw(plot_px));
        if a <= b { (a, b) } else { (b, a) }
    }

    fn invert_pair(
        &self,
        role: AxisRole,
        px: (f64, f64),
        convert: impl Fn(&AxisScales, f64) -> f64,
    ) -> (f64, f64) {
        let axis = self.axis(role);
        let invert = |screen_px: f64| match role {
            AxisRole::X => self.transform.invert_x(screen_px),
            AxisRole::Y => self.transform.invert_y(screen_px),
        };
        (convert(axis, invert(px.0)), convert(axis, invert(px.1)))
    }
}
