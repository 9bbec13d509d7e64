// Copyright 2025 the Dotplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dotplot: a spatial aggregation and interaction engine for large linked
//! scatterplots.
//!
//! An offline producer clusters hundreds of thousands of records into a
//! handful of resolution levels per attribute pair; this crate family owns
//! everything that happens after that data is loaded — the coordinate
//! transform chain, zoom-to-level mapping, memoized spatial indexing,
//! brush-to-selection resolution, and the linked filter state sibling views
//! subscribe to.
//!
//! This crate is the coordinator. [`Engine`] is an explicit context object
//! wiring the sibling crates together: callers construct one, hand it a view
//! rect, register presentation scales, load a dataset, and drive it with
//! pointer events and a millisecond clock. There is no global state and no
//! internal timer; hosts poll with their own clock, which keeps the engine
//! portable across event loops and trivially testable.
//!
//! ## Example
//!
//! ```rust
//! use dotplot::{Engine, EngineConfig};
//! use dotplot_brush::{BrushMode, BrushRegion};
//! use dotplot_index::{AggregationSet, AxisPair, ClusterPoint};
//! use dotplot_scale::{AxisRole, Scale, ScaleKind};
//! use dotplot_zoom::ZoomTransform;
//! use kurbo::Rect;
//!
//! let mut engine = Engine::new(EngineConfig::default(), Rect::new(0.0, 0.0, 800.0, 600.0));
//! engine.register_scale(AxisRole::X, "released", Scale::new(
//!     ScaleKind::Linear, (1980.0, 2020.0), (0.0, 800.0),
//! ));
//! engine.register_scale(AxisRole::Y, "budget", Scale::new(
//!     ScaleKind::Log10, (1e3, 1e9), (600.0, 0.0),
//! ));
//!
//! let mut agg = AggregationSet::new(5, (-1000.0, 1000.0), (-1000.0, 1000.0));
//! agg.insert(4, AxisPair::new("released", "budget"), vec![
//!     ClusterPoint::new(0.0, 0.0, 4.0, [1, 2, 3]),
//! ]);
//! engine.load(agg).unwrap();
//! engine.set_axes("released", "budget").unwrap();
//!
//! // A zoom gesture: the transform applies immediately, the discrete level
//! // settles once the gesture has been quiet for the configured period.
//! engine.set_zoom_transform(ZoomTransform::new(1.0, 0.0, 0.0), 0);
//! assert!(engine.poll(100).is_none());
//! let settled = engine.poll(150).unwrap();
//! assert_eq!(settled.level, 4);
//!
//! // A brush drag across the middle of the plot selects the cluster there.
//! engine.begin_brush(BrushMode::Range(AxisRole::X));
//! let outcome = engine
//!     .update_brush(BrushRegion::Interval(300.0, 500.0))
//!     .unwrap();
//! assert!(outcome.item_ids.contains(&2));
//! engine.end_brush();
//! assert!(engine.is_included(2));
//! assert!(!engine.is_included(9));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod config;
mod engine;

pub use config::EngineConfig;
pub use engine::{AxesError, Engine, EngineDebugInfo, LoadError};
