// Copyright 2025 the Dotplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// The fixed simulation-space map for one axis.
///
/// The offline aggregation pass lays cluster points out in a fixed coordinate
/// domain (conventionally `(-1000, 1000)` per axis) that is independent of any
/// presentation scale. `SimScale` is the linear map between that domain and
/// the axis pixel range, and the inverse used when a screen-space selection is
/// converted into simulation bounds for an index query.
///
/// The domain is a contract constant shared with the producer; use
/// [`SimScale::matches`] (or [`crate::ScaleSet::validate_sim_domains`]) to
/// check it explicitly at load time rather than discover a mismatch visually.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl SimScale {
    /// Creates a simulation scale over the given domain and pixel range.
    #[must_use]
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        debug_assert!(
            domain.0 != domain.1,
            "simulation domain must not be degenerate"
        );
        Self { domain, range }
    }

    /// The conventional producer domain, `(-1000, 1000)`.
    pub const DEFAULT_DOMAIN: (f64, f64) = (-1000.0, 1000.0);

    /// Returns the simulation domain `(min, max)`.
    #[must_use]
    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    /// Returns the pixel range `(start, end)`.
    #[must_use]
    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    /// Returns `true` if this scale's domain is exactly the expected contract
    /// domain.
    #[must_use]
    pub fn matches(&self, expected_domain: (f64, f64)) -> bool {
        self.domain == expected_domain
    }

    /// Sets the pixel range. Returns `true` if it actually changed.
    pub fn set_range(&mut self, range: (f64, f64)) -> bool {
        if self.range == range {
            return false;
        }
        self.range = range;
        true
    }

    /// Maps a simulation coordinate to a pixel position.
    #[must_use]
    pub fn to_pixel(&self, sim: f64) -> f64 {
        let t = (sim - self.domain.0) / (self.domain.1 - self.domain.0);
        self.range.0 + t * (self.range.1 - self.range.0)
    }

    /// Maps a pixel position back to a simulation coordinate.
    #[must_use]
    pub fn from_pixel(&self, px: f64) -> f64 {
        let span = self.range.1 - self.range.0;
        let t = if span == 0.0 {
            0.0
        } else {
            (px - self.range.0) / span
        };
        self.domain.0 + t * (self.domain.1 - self.domain.0)
    }
}

#[cfg(test)]
mod tests {
    use super::SimScale;

    #[test]
    fn maps_domain_endpoints_to_range_endpoints() {
        let s = SimScale::new((-1000.0, 1000.0), (0.0, 760.0));
        assert!((s.to_pixel(-1000.0) - 0.0).abs() < 1e-12);
        assert!((s.to_pixel(1000.0) - 760.0).abs() < 1e-12);
        assert!((s.to_pixel(0.0) - 380.0).abs() < 1e-12);
    }

    #[test]
    fn roundtrip_with_descending_range() {
        let s = SimScale::new((-1000.0, 1000.0), (760.0, 0.0));
        for sim in [-1000.0, -333.3, 0.0, 512.0, 1000.0] {
            let back = s.from_pixel(s.to_pixel(sim));
            assert!((back - sim).abs() < 1e-9, "roundtrip failed for {sim}");
        }
    }

    #[test]
    fn matches_is_exact() {
        let s = SimScale::new(SimScale::DEFAULT_DOMAIN, (0.0, 100.0));
        assert!(s.matches((-1000.0, 1000.0)));
        assert!(!s.matches((-1000.0, 1000.5)));
    }
}
