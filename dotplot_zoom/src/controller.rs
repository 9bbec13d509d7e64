// Copyright 2025 the Dotplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Rect;

use crate::level::LevelMapping;
use crate::transform::{ZoomConstraints, ZoomTransform};

/// Debounce state of the deferred (level) path.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DebounceState {
    /// No recomputation is armed.
    Settled,
    /// A recomputation is armed for `deadline` using `transform`.
    ///
    /// Any newer transform update supersedes this state entirely; the pending
    /// recomputation never runs with a stale transform.
    Pending {
        /// The transform the settle will use.
        transform: ZoomTransform,
        /// Millisecond timestamp at which the quiet period ends.
        deadline: u64,
    },
}

/// The result of a trailing-edge settle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SettleOutcome {
    /// The transform the settle was computed from (the last one in the burst).
    pub transform: ZoomTransform,
    /// The discrete resolution level derived from `transform.k`.
    pub level: u8,
    /// `true` if `level` differs from the previously settled level.
    ///
    /// A level change is the trigger for rebinding the active cluster list
    /// and clearing any in-progress selection.
    pub level_changed: bool,
    /// Point-size compensation, `1 / k`, so dot strokes keep their on-screen
    /// width under zoom.
    pub point_scale: f64,
}

/// Owns the live pan/zoom transform and debounces level transitions.
///
/// Transform updates have two effects: the immediate one (the clamped
/// transform is returned synchronously for reprojection) and the deferred one
/// (level and point-size compensation, recomputed only once the gesture has
/// been quiet for the configured period). See the crate docs for the state
/// machine.
///
/// The controller is clock-agnostic: `now` is a caller-supplied millisecond
/// timestamp. Dropping the controller, or calling
/// [`ZoomController::cancel`], disarms any pending deadline — there is no
/// timer resource to leak.
#[derive(Clone, Debug)]
pub struct ZoomController {
    constraints: ZoomConstraints,
    mapping: LevelMapping,
    view: Rect,
    quiet_ms: u64,
    transform: ZoomTransform,
    level: u8,
    point_scale: f64,
    state: DebounceState,
}

impl ZoomController {
    /// Creates a controller.
    ///
    /// The initial level is the one the identity transform maps to (the
    /// coarsest), and the initial point scale is `1.0`.
    #[must_use]
    pub fn new(
        constraints: ZoomConstraints,
        mapping: LevelMapping,
        view: Rect,
        quiet_ms: u64,
    ) -> Self {
        Self {
            constraints,
            mapping,
            view,
            quiet_ms,
            transform: ZoomTransform::IDENTITY,
            level: mapping.level_for_zoom(1.0),
            point_scale: 1.0,
            state: DebounceState::Settled,
        }
    }

    /// Returns the live transform.
    #[must_use]
    pub fn transform(&self) -> ZoomTransform {
        self.transform
    }

    /// Returns the currently settled discrete level.
    #[must_use]
    pub fn level(&self) -> u8 {
        self.level
    }

    /// Returns the level mapping.
    #[must_use]
    pub fn mapping(&self) -> LevelMapping {
        self.mapping
    }

    /// Returns the currently settled point-size compensation.
    #[must_use]
    pub fn point_scale(&self) -> f64 {
        self.point_scale
    }

    /// Returns `true` while a settle is armed.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        matches!(self.state, DebounceState::Pending { .. })
    }

    /// Returns the armed deadline, if any, for hosts that schedule wakeups.
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        match self.state {
            DebounceState::Settled => None,
            DebounceState::Pending { deadline, .. } => Some(deadline),
        }
    }

    /// Sets the view rect the pan clamp works against.
    pub fn set_view(&mut self, view: Rect) {
        self.view = view;
    }

    /// Applies a transform update at time `now`.
    ///
    /// The clamped transform is stored as the live transform and returned for
    /// the caller's immediate reprojection. The deferred settle is (re)armed
    /// for `now + quiet_ms`; an earlier pending settle is superseded.
    pub fn on_transform(&mut self, t: ZoomTransform, now: u64) -> ZoomTransform {
        let clamped = self.constraints.clamp(t, self.view);
        self.transform = clamped;
        self.state = DebounceState::Pending {
            transform: clamped,
            deadline: now + self.quiet_ms,
        };
        clamped
    }

    /// Fires the trailing-edge settle if the quiet period has elapsed.
    ///
    /// Returns `None` while settled or still pending. At most one settle is
    /// produced per burst, computed from the burst's final transform.
    pub fn poll(&mut self, now: u64) -> Option<SettleOutcome> {
        let DebounceState::Pending {
            transform,
            deadline,
        } = self.state
        else {
            return None;
        };
        if now < deadline {
            return None;
        }
        self.state = DebounceState::Settled;
        let level = self.mapping.level_for_zoom(transform.k);
        let level_changed = level != self.level;
        self.level = level;
        self.point_scale = 1.0 / transform.k;
        Some(SettleOutcome {
            transform,
            level,
            level_changed,
            point_scale: self.point_scale,
        })
    }

    /// Disarms any pending settle without running it.
    pub fn cancel(&mut self) {
        self.state = DebounceState::Settled;
    }

    /// Snapshot of the controller state for debugging and inspection.
    #[must_use]
    pub fn debug_info(&self) -> ZoomDebugInfo {
        ZoomDebugInfo {
            transform: self.transform,
            level: self.level,
            point_scale: self.point_scale,
            state: self.state,
            view: self.view,
        }
    }
}

/// Debug snapshot of a [`ZoomController`].
#[derive(Clone, Copy, Debug)]
pub struct ZoomDebugInfo {
    /// The live transform.
    pub transform: ZoomTransform,
    /// The settled discrete level.
    pub level: u8,
    /// The settled point-size compensation.
    pub point_scale: f64,
    /// The debounce state.
    pub state: DebounceState,
    /// The view rect used for pan clamping.
    pub view: Rect,
}

#[cfg(test)]
mod tests {
    use kurbo::Rect;

    use super::{DebounceState, ZoomController};
    use crate::{LevelMapping, ZoomConstraints, ZoomTransform};

    fn controller() -> ZoomController {
        ZoomController::new(
            ZoomConstraints::default(),
            LevelMapping::new(4),
            Rect::new(0.0, 0.0, 800.0, 600.0),
            150,
        )
    }

    #[test]
    fn burst_of_updates_settles_once_with_the_final_transform() {
        let mut ctl = controller();
        let mut settles = 0;

        // 10 updates inside one 150ms window.
        for i in 0..10_u64 {
            let now = i * 15;
            let k = 1.0 + 0.5 * (i + 1) as f64;
            ctl.on_transform(ZoomTransform::new(k, 0.0, 0.0), now);
            if ctl.poll(now).is_some() {
                settles += 1;
            }
        }
        assert_eq!(settles, 0);

        // Quiet period elapses after the last update at t=135.
        assert!(ctl.poll(284).is_none());
        let outcome = ctl.poll(285).unwrap();
        settles += 1;
        assert_eq!(settles, 1);
        assert_eq!(outcome.transform.k, 6.0);
        assert_eq!(outcome.level, 2);
        assert!(outcome.level_changed);

        // No double fire.
        assert!(ctl.poll(10_000).is_none());
        assert_eq!(ctl.level(), 2);
    }

    #[test]
    fn settle_reports_unchanged_level() {
        let mut ctl = controller();
        ctl.on_transform(ZoomTransform::new(1.0, 10.0, 10.0), 0);
        let outcome = ctl.poll(150).unwrap();
        assert_eq!(outcome.level, 4);
        assert!(!outcome.level_changed);
        assert!((outcome.point_scale - 1.0).abs() < 1e-12);
    }

    #[test]
    fn cancel_disarms_a_pending_settle() {
        let mut ctl = controller();
        ctl.on_transform(ZoomTransform::new(4.0, 0.0, 0.0), 0);
        assert!(ctl.is_pending());
        assert_eq!(ctl.next_deadline(), Some(150));

        ctl.cancel();
        assert_eq!(ctl.debug_info().state, DebounceState::Settled);
        assert!(ctl.poll(1_000).is_none());
        // The settled level is untouched by the cancelled pending update.
        assert_eq!(ctl.level(), 4);
    }

    #[test]
    fn immediate_path_returns_the_clamped_transform() {
        let mut ctl = controller();
        let clamped = ctl.on_transform(ZoomTransform::new(100.0, 0.0, 0.0), 0);
        assert_eq!(clamped.k, 10.0);
        assert_eq!(ctl.transform(), clamped);
        // The deferred path has not run yet: level is still the old one.
        assert_eq!(ctl.level(), 4);
    }

    #[test]
    fn point_scale_compensates_for_zoom() {
        let mut ctl = controller();
        ctl.on_transform(ZoomTransform::new(5.0, 0.0, 0.0), 0);
        let outcome = ctl.poll(150).unwrap();
        assert!((outcome.point_scale - 0.2).abs() < 1e-12);
        assert!((ctl.point_scale() - 0.2).abs() < 1e-12);
    }
}
