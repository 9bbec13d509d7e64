// Copyright 2025 the Dotplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dotplot Zoom: the live pan/zoom transform and its debounced level machinery.
//!
//! Every pointer gesture updates a continuous affine transform over the plot.
//! Two very different consumers hang off that update:
//!
//! - The **immediate** path: reprojecting the currently visible cluster
//!   points and axis ticks must happen synchronously, on every update.
//! - The **deferred** path: the discrete resolution level (which precomputed
//!   cluster list is active) and the point-size compensation are expensive to
//!   act on — a level change swaps the whole dataset and index — so they are
//!   recomputed only after the gesture goes quiet.
//!
//! [`ZoomController`] separates the two with an explicit
//! `Settled | Pending(transform, deadline)` state machine instead of ad hoc
//! timer flags. It never touches a wall clock: callers pass millisecond
//! timestamps into [`ZoomController::on_transform`] and poll for the
//! trailing-edge settle with [`ZoomController::poll`], so the behavior is
//! testable without real delays. Any update while pending restarts the quiet
//! period; a pending recomputation is superseded, not run, by a newer update.
//!
//! ## Example
//!
//! ```rust
//! use kurbo::Rect;
//! use dotplot_zoom::{LevelMapping, ZoomConstraints, ZoomController, ZoomTransform};
//!
//! let view = Rect::new(0.0, 0.0, 800.0, 600.0);
//! let mut ctl = ZoomController::new(
//!     ZoomConstraints::default(),
//!     LevelMapping::new(4),
//!     view,
//!     150,
//! );
//!
//! // A burst of gesture updates; only the last one settles.
//! for ms in [0, 40, 80] {
//!     ctl.on_transform(ZoomTransform::new(2.0, -100.0, -50.0), ms);
//!     assert!(ctl.poll(ms).is_none());
//! }
//! let settled = ctl.poll(80 + 150).unwrap();
//! assert_eq!(settled.level, 3);
//! assert!((settled.point_scale - 0.5).abs() < 1e-12);
//! ```
//!
//! This crate is `no_std`.

#![no_std]

mod controller;
mod level;
mod transform;

pub use controller::{DebounceState, SettleOutcome, ZoomController, ZoomDebugInfo};
pub use level::LevelMapping;
pub use transform::{ZoomConstraints, ZoomTransform};
