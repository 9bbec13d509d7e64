// Copyright 2025 the Dotplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

use crate::{Scale, ScaleKind};

/// Returns "nice" tick positions (in raw units) for a scale.
///
/// Linear and time scales use a 1-2-5 step ladder sized so that roughly
/// `target` ticks cover the domain; log scales return decade boundaries. The
/// result is ascending and every tick lies inside the domain.
///
/// This feeds the immediate axis-redraw path: on every transform update the
/// caller computes the visible raw window, asks for ticks over it, and
/// reprojects them, without touching the (debounced) level machinery.
#[must_use]
pub fn ticks(scale: &Scale, target: usize) -> Vec<f64> {
    let (d0, d1) = scale.domain();
    if target == 0 || !(d1 > d0) {
        return Vec::new();
    }
    match scale.kind() {
        ScaleKind::Linear | ScaleKind::Time => linear_ticks(d0, d1, target),
        ScaleKind::Log10 => decade_ticks(d0, d1),
    }
}

fn linear_ticks(d0: f64, d1: f64, target: usize) -> Vec<f64> {
    let step = nice_step((d1 - d0) / target as f64);
    let mut out = Vec::new();
    let mut v = libm::ceil(d0 / step) * step;
    while v <= d1 + step * 1e-9 {
        out.push(v);
        v += step;
    }
    out
}

/// Rounds a raw step up to the nearest 1-2-5 ladder value.
fn nice_step(raw: f64) -> f64 {
    let raw = raw.abs().max(f64::MIN_POSITIVE);
    let mag = libm::pow(10.0, libm::floor(libm::log10(raw)));
    for m in [1.0, 2.0, 5.0, 10.0] {
        let step = m * mag;
        if step >= raw {
            return step;
        }
    }
    10.0 * mag
}

fn decade_ticks(d0: f64, d1: f64) -> Vec<f64> {
    let mut out = Vec::new();
    let mut e = libm::ceil(libm::log10(d0.max(f64::MIN_POSITIVE)));
    loop {
        let v = libm::pow(10.0, e);
        if v > d1 * (1.0 + 1e-9) {
            break;
        }
        if v >= d0 * (1.0 - 1e-9) {
            out.push(v);
        }
        e += 1.0;
    }
    out
}
