// Copyright 2025 the Dotplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// The shape of a presentation scale.
///
/// This covers the axis families the aggregation producer emits data for:
/// plain linear axes (ratings, counts), logarithmic money axes (budget,
/// revenue), and time axes over epoch milliseconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScaleKind {
    /// Linear interpolation over the raw domain.
    Linear,
    /// Base-10 logarithmic interpolation; the domain must be strictly positive.
    Log10,
    /// Linear interpolation over epoch milliseconds.
    ///
    /// Time values are carried as `f64` milliseconds so that the same forward
    /// and inverse chain applies to every axis; calendar formatting is the
    /// caller's concern.
    Time,
}

/// A per-axis presentation scale mapping raw attribute values to plot pixels.
///
/// The domain is expressed in raw attribute units and is expected to ascend;
/// the pixel range may ascend or descend (descending ranges express
/// screen-down-positive vertical axes). Conversions are exact inverses of one
/// another up to floating error.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Scale {
    kind: ScaleKind,
    domain: (f64, f64),
    range: (f64, f64),
}

impl Scale {
    /// Creates a new scale over the given raw domain and pixel range.
    ///
    /// For [`ScaleKind::Log10`] the domain must be strictly positive; in debug
    /// builds this is asserted.
    #[must_use]
    pub fn new(kind: ScaleKind, domain: (f64, f64), range: (f64, f64)) -> Self {
        debug_assert!(
            kind != ScaleKind::Log10 || (domain.0 > 0.0 && domain.1 > 0.0),
            "log scales require a strictly positive domain"
        );
        Self {
            kind,
            domain,
            range,
        }
    }

    /// Returns the scale kind.
    #[must_use]
    pub fn kind(&self) -> ScaleKind {
        self.kind
    }

    /// Returns the raw domain `(min, max)`.
    #[must_use]
    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    /// Returns the pixel range `(start, end)`.
    #[must_use]
    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    /// Sets the raw domain. Returns `true` if it actually changed.
    pub fn set_domain(&mut self, domain: (f64, f64)) -> bool {
        if self.domain == domain {
            return false;
        }
        debug_assert!(
            self.kind != ScaleKind::Log10 || (domain.0 > 0.0 && domain.1 > 0.0),
            "log scales require a strictly positive domain"
        );
        self.domain = domain;
        true
    }

    /// Sets the pixel range. Returns `true` if it actually changed.
    pub fn set_range(&mut self, range: (f64, f64)) -> bool {
        if self.range == range {
            return false;
        }
        self.range = range;
        true
    }

    /// Maps a raw value to a pixel position.
    #[must_use]
    pub fn to_pixel(&self, raw: f64) -> f64 {
        let t = self.normalize(raw);
        self.range.0 + t * (self.range.1 - self.range.0)
    }

    /// Maps a pixel position back to a raw value.
    #[must_use]
    pub fn from_pixel(&self, px: f64) -> f64 {
        let span = self.range.1 - self.range.0;
        let t = if span == 0.0 {
            0.0
        } else {
            (px - self.range.0) / span
        };
        self.denormalize(t)
    }

    /// Maps a raw value to the unit interval according to the scale kind.
    fn normalize(&self, raw: f64) -> f64 {
        let (d0, d1) = self.transformed_domain();
        let extent = d1 - d0;
        if extent == 0.0 {
            return 0.0;
        }
        (self.transform(raw) - d0) / extent
    }

    /// Maps a unit-interval position back to a raw value.
    fn denormalize(&self, t: f64) -> f64 {
        let (d0, d1) = self.transformed_domain();
        self.untransform(d0 + t * (d1 - d0))
    }

    fn transformed_domain(&self) -> (f64, f64) {
        (self.transform(self.domain.0), self.transform(self.domain.1))
    }

    fn transform(&self, v: f64) -> f64 {
        match self.kind {
            ScaleKind::Linear | ScaleKind::Time => v,
            ScaleKind::Log10 => libm::log10(v),
        }
    }

    fn untransform(&self, v: f64) -> f64 {
        match self.kind {
            ScaleKind::Linear | ScaleKind::Time => v,
            ScaleKind::Log10 => libm::pow(10.0, v),
        }
    }
}
