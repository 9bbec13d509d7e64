// Copyright 2025 the Dotplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Rect;

/// Static engine configuration, fixed for the lifetime of an [`Engine`].
///
/// The simulation domains and level count are contracts with the offline
/// aggregation producer; [`Engine::load`] rejects a dataset that disagrees
/// with them. The remaining fields tune interaction behavior.
///
/// [`Engine`]: crate::Engine
/// [`Engine::load`]: crate::Engine::load
#[derive(Clone, Copy, Debug)]
pub struct EngineConfig {
    /// Expected simulation domain of the horizontal axis.
    pub sim_x: (f64, f64),
    /// Expected simulation domain of the vertical axis.
    pub sim_y: (f64, f64),
    /// Coarsest resolution level; the producer emits `max_level + 1` levels.
    pub max_level: u8,
    /// Quiet period before a zoom burst settles into a level recomputation,
    /// in milliseconds.
    pub quiet_ms: u64,
    /// Minimum zoom factor.
    pub k_min: f64,
    /// Maximum zoom factor.
    pub k_max: f64,
    /// Pannable region in plot pixels, if panning is to be clamped.
    pub pan_extent: Option<Rect>,
    /// Quantizer applied to published brush raw bounds.
    ///
    /// Coarsening raw bounds to a public unit (calendar years on a time
    /// axis, say) is presentation policy, so it is injected here rather than
    /// built in. `None` publishes raw bounds unchanged.
    pub brush_quantizer: Option<fn(f64) -> f64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sim_x: dotplot_scale::SimScale::DEFAULT_DOMAIN,
            sim_y: dotplot_scale::SimScale::DEFAULT_DOMAIN,
            max_level: 4,
            quiet_ms: 150,
            k_min: 0.9,
            k_max: 10.0,
            pan_extent: None,
            brush_quantizer: None,
        }
    }
}
