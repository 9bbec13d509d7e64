// Copyright 2025 the Dotplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Affine, Point, Rect, Vec2};

/// The live pan/zoom transform: uniform scale `k` plus a translation.
///
/// Maps plot-pixel coordinates to screen-pixel coordinates as
/// `screen = plot * k + (tx, ty)`. The inverse is the first step of every
/// brush inversion chain.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomTransform {
    /// Uniform scale factor.
    pub k: f64,
    /// X translation, in screen pixels.
    pub tx: f64,
    /// Y translation, in screen pixels.
    pub ty: f64,
}

impl ZoomTransform {
    /// The identity transform.
    pub const IDENTITY: Self = Self {
        k: 1.0,
        tx: 0.0,
        ty: 0.0,
    };

    /// Creates a transform from a scale and translation.
    #[must_use]
    pub const fn new(k: f64, tx: f64, ty: f64) -> Self {
        Self { k, tx, ty }
    }

    /// Maps a plot-pixel point to screen pixels.
    #[must_use]
    pub fn apply(&self, pt: Point) -> Point {
        Point::new(self.apply_x(pt.x), self.apply_y(pt.y))
    }

    /// Maps a screen-pixel point back to plot pixels.
    #[must_use]
    pub fn invert(&self, pt: Point) -> Point {
        Point::new(self.invert_x(pt.x), self.invert_y(pt.y))
    }

    /// Maps a plot-pixel x coordinate to screen pixels.
    #[must_use]
    pub fn apply_x(&self, x: f64) -> f64 {
        x * self.k + self.tx
    }

    /// Maps a plot-pixel y coordinate to screen pixels.
    #[must_use]
    pub fn apply_y(&self, y: f64) -> f64 {
        y * self.k + self.ty
    }

    /// Maps a screen-pixel x coordinate back to plot pixels.
    #[must_use]
    pub fn invert_x(&self, x: f64) -> f64 {
        (x - self.tx) / self.k
    }

    /// Maps a screen-pixel y coordinate back to plot pixels.
    #[must_use]
    pub fn invert_y(&self, y: f64) -> f64 {
        (y - self.ty) / self.k
    }

    /// Returns the equivalent kurbo affine.
    #[must_use]
    pub fn to_affine(&self) -> Affine {
        Affine::translate(Vec2::new(self.tx, self.ty)) * Affine::scale(self.k)
    }

    /// Extracts a transform from an affine, if it is a uniform scale plus a
    /// translation.
    ///
    /// Returns `None` for affines with rotation, shear, or non-uniform
    /// scaling; those cannot arise from supported pan/zoom gestures.
    #[must_use]
    pub fn from_affine(affine: Affine) -> Option<Self> {
        let [a, b, c, d, e, f] = affine.as_coeffs();
        (b == 0.0 && c == 0.0 && a == d).then(|| Self::new(a, e, f))
    }
}

impl Default for ZoomTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Configured limits for the live transform.
///
/// `k` is clamped into `[k_min, k_max]`; the translation is clamped so the
/// transformed pan extent keeps covering the view rect where feasible. The
/// pan extent is expressed in plot pixels, conventionally the plot area
/// padded by a margin so a gesture can overshoot slightly.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomConstraints {
    /// Minimum scale factor.
    pub k_min: f64,
    /// Maximum scale factor.
    pub k_max: f64,
    /// Pannable region in plot pixels, if any.
    pub pan_extent: Option<Rect>,
}

impl ZoomConstraints {
    /// Creates constraints from a zoom range and an optional pan extent.
    ///
    /// The zoom range is normalized so that `k_min <= k_max`.
    #[must_use]
    pub fn new(k_min: f64, k_max: f64, pan_extent: Option<Rect>) -> Self {
        let (k_min, k_max) = if k_min <= k_max {
            (k_min, k_max)
        } else {
            (k_max, k_min)
        };
        Self {
            k_min,
            k_max,
            pan_extent,
        }
    }

    /// Clamps a transform against these constraints and a view rect.
    ///
    /// When the scaled pan extent can cover the view along an axis, the
    /// translation is clamped so that it does; when it cannot (zoomed out
    /// further than the extent), the extent is centered instead.
    #[must_use]
    pub fn clamp(&self, t: ZoomTransform, view: Rect) -> ZoomTransform {
        let k = t.k.clamp(self.k_min, self.k_max);
        let Some(extent) = self.pan_extent else {
            return ZoomTransform::new(k, t.tx, t.ty);
        };
        let tx = clamp_translation(t.tx, k, (extent.x0, extent.x1), (view.x0, view.x1));
        let ty = clamp_translation(t.ty, k, (extent.y0, extent.y1), (view.y0, view.y1));
        ZoomTransform::new(k, tx, ty)
    }
}

impl Default for ZoomConstraints {
    /// The interaction defaults: `k` in `[0.9, 10.0]`, no pan extent.
    fn default() -> Self {
        Self::new(0.9, 10.0, None)
    }
}

/// Clamps one axis of the translation so `k * extent + t` covers `view`, or
/// centers the extent when it cannot.
fn clamp_translation(t: f64, k: f64, extent: (f64, f64), view: (f64, f64)) -> f64 {
    // Cover condition: k*extent.0 + t <= view.0 and k*extent.1 + t >= view.1.
    let hi = view.0 - k * extent.0;
    let lo = view.1 - k * extent.1;
    if lo <= hi {
        t.clamp(lo, hi)
    } else {
        (lo + hi) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Rect};

    use super::{ZoomConstraints, ZoomTransform};

    #[test]
    fn apply_invert_roundtrip() {
        let t = ZoomTransform::new(2.5, -120.0, 60.0);
        for pt in [
            Point::new(0.0, 0.0),
            Point::new(400.0, 300.0),
            Point::new(-17.5, 912.25),
        ] {
            let back = t.invert(t.apply(pt));
            assert!((back.x - pt.x).abs() < 1e-9);
            assert!((back.y - pt.y).abs() < 1e-9);
        }
    }

    #[test]
    fn matches_affine() {
        let t = ZoomTransform::new(3.0, 10.0, -20.0);
        let pt = Point::new(7.0, 9.0);
        let via_affine = t.to_affine() * pt;
        let direct = t.apply(pt);
        assert!((via_affine.x - direct.x).abs() < 1e-12);
        assert!((via_affine.y - direct.y).abs() < 1e-12);
    }

    #[test]
    fn from_affine_rejects_non_pan_zoom_shapes() {
        let t = ZoomTransform::new(2.0, 30.0, -40.0);
        assert_eq!(ZoomTransform::from_affine(t.to_affine()), Some(t));
        assert!(ZoomTransform::from_affine(kurbo::Affine::rotate(0.3)).is_none());
        assert!(ZoomTransform::from_affine(kurbo::Affine::scale_non_uniform(1.0, 2.0)).is_none());
    }

    #[test]
    fn clamp_limits_scale() {
        let c = ZoomConstraints::default();
        let view = Rect::new(0.0, 0.0, 800.0, 600.0);
        assert_eq!(c.clamp(ZoomTransform::new(50.0, 0.0, 0.0), view).k, 10.0);
        assert_eq!(c.clamp(ZoomTransform::new(0.1, 0.0, 0.0), view).k, 0.9);
    }

    #[test]
    fn clamp_keeps_extent_covering_view() {
        let view = Rect::new(0.0, 0.0, 800.0, 600.0);
        let extent = Rect::new(-100.0, -100.0, 900.0, 700.0);
        let c = ZoomConstraints::new(0.9, 10.0, Some(extent));

        // Panned far right at k=2: the extent's left edge would detach from
        // the view; clamping pulls it back so coverage holds.
        let t = c.clamp(ZoomTransform::new(2.0, 5000.0, 0.0), view);
        assert!(t.apply_x(extent.x0) <= view.x0 + 1e-9);
        assert!(t.apply_x(extent.x1) >= view.x1 - 1e-9);
    }

    #[test]
    fn clamp_centers_when_extent_cannot_cover() {
        let view = Rect::new(0.0, 0.0, 800.0, 600.0);
        let extent = Rect::new(0.0, 0.0, 100.0, 100.0);
        let c = ZoomConstraints::new(0.1, 10.0, Some(extent));

        let t = c.clamp(ZoomTransform::new(1.0, 1e6, -1e6), view);
        // Extent midpoint lands on the view midpoint along each axis.
        let mid_x = t.apply_x(50.0);
        let mid_y = t.apply_y(50.0);
        assert!((mid_x - 400.0).abs() < 1e-9);
        assert!((mid_y - 300.0).abs() < 1e-9);
    }
}
