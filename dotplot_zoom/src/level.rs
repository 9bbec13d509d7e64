// Copyright 2025 the Dotplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// The fixed mapping from a continuous zoom factor to a discrete resolution
/// level.
///
/// Level `0` is the finest aggregation; `max_level` the coarsest. The mapping
/// is `clamp(max_level + ceil(log2(1/k)), 0, max_level)`: each halving of `k`
/// steps one level coarser, each doubling one level finer. It is a
/// non-increasing step function of `k` — more zoomed in means a smaller level
/// number.
///
/// The producer and consumer must agree on `max_level`; keeping the mapping
/// on one shared type (instead of duplicating the formula at call sites) is
/// what makes that agreement checkable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LevelMapping {
    max_level: u8,
}

impl LevelMapping {
    /// Creates a mapping with the given coarsest level.
    #[must_use]
    pub const fn new(max_level: u8) -> Self {
        Self { max_level }
    }

    /// Returns the coarsest level.
    #[must_use]
    pub const fn max_level(&self) -> u8 {
        self.max_level
    }

    /// Returns the discrete level for a zoom factor.
    #[must_use]
    pub fn level_for_zoom(&self, k: f64) -> u8 {
        if !(k > 0.0) {
            return self.max_level;
        }
        let raw = f64::from(self.max_level) + libm::ceil(libm::log2(1.0 / k));
        #[expect(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            reason = "clamped into 0..=max_level before the cast"
        )]
        {
            raw.clamp(0.0, f64::from(self.max_level)) as u8
        }
    }
}
