// Copyright 2025 the Dotplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dotplot Brush: screen-space selection regions resolved into cluster membership.
//!
//! A brush is a pointer-drag defining a 1D interval or a 2D rectangle in
//! screen pixels. Turning it into a set of selected items means running the
//! full coordinate chain in reverse — screen pixel → live zoom transform →
//! plot pixel → simulation coordinate — and querying the active cluster
//! index with the resulting bounds.
//!
//! Two rules keep this correct under interaction pressure:
//!
//! - **One snapshot per step.** Every inversion for one gesture step goes
//!   through a single [`FrameSnapshot`] captured at event time. Mixing a
//!   fresh transform with stale scales (or vice versa) is the dominant defect
//!   class here; the snapshot makes it unrepresentable.
//! - **Empty clears.** A zero-width or degenerate region clears the filter —
//!   an empty brush means "no constraint", never "select nothing".
//!
//! A discrete-level or axis-pair change mid-gesture makes the in-progress
//! pixel geometry meaningless; the owner invalidates the gesture
//! ([`BrushGesture::invalidate`]) and clears the published selection.
//!
//! ## Example
//!
//! ```rust
//! use dotplot_brush::{BrushGesture, BrushMode, BrushRegion, FrameSnapshot};
//! use dotplot_index::{AggregationSet, AxisPair, ClusterIndexCache, ClusterPoint};
//! use dotplot_scale::{AxisRole, AxisScales, Scale, ScaleKind, SimScale};
//! use dotplot_zoom::ZoomTransform;
//!
//! let mut agg = AggregationSet::new(1, (-1000.0, 1000.0), (-1000.0, 1000.0));
//! agg.insert(0, AxisPair::new("released", "budget"), vec![
//!     ClusterPoint::new(0.0, 0.0, 1.0, [7]),
//! ]);
//! let resolved = agg.resolve(0, "released", "budget").unwrap();
//! let mut cache = ClusterIndexCache::new();
//!
//! // Identity transform; sim domain spans the 0..800 x pixels, 600..0 y pixels.
//! let snap = FrameSnapshot::new(
//!     ZoomTransform::IDENTITY,
//!     AxisScales::new(
//!         Scale::new(ScaleKind::Linear, (1980.0, 2020.0), (0.0, 800.0)),
//!         SimScale::new((-1000.0, 1000.0), (0.0, 800.0)),
//!     ),
//!     AxisScales::new(
//!         Scale::new(ScaleKind::Linear, (0.0, 10.0), (600.0, 0.0)),
//!         SimScale::new((-1000.0, 1000.0), (600.0, 0.0)),
//!     ),
//! );
//!
//! let mut brush = BrushGesture::new();
//! brush.begin(BrushMode::Range(AxisRole::X));
//! let outcome = brush
//!     .update(
//!         BrushRegion::Interval(300.0, 500.0),
//!         &snap,
//!         &mut cache,
//!         &agg,
//!         &resolved,
//!     )
//!     .unwrap();
//! assert!(outcome.item_ids.contains(&7));
//! brush.end();
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod gesture;
mod snapshot;

pub use gesture::{BrushGesture, BrushMode, BrushOutcome, BrushRegion};
pub use snapshot::FrameSnapshot;
