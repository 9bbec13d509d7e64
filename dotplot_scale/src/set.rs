// Copyright 2025 the Dotplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::AxisScales;

/// Which plot axis a value or interval refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AxisRole {
    /// The horizontal axis.
    X,
    /// The vertical axis. Pixel coordinates grow downward on screen.
    Y,
}

/// The x/y scale pair for the active axis combination, with a change version.
///
/// The version is a monotonically increasing counter bumped only when a domain
/// or range genuinely changes. Derived data (tick sets, reprojection caches)
/// can be memoized against it instead of being recomputed on every render
/// pass.
#[derive(Clone, Debug)]
pub struct ScaleSet {
    x: AxisScales,
    y: AxisScales,
    version: u64,
}

impl ScaleSet {
    /// Creates a scale set from an x and a y axis.
    #[must_use]
    pub fn new(x: AxisScales, y: AxisScales) -> Self {
        Self { x, y, version: 0 }
    }

    /// Returns the scales for the requested axis.
    #[must_use]
    pub fn axis(&self, role: AxisRole) -> &AxisScales {
        match role {
            AxisRole::X => &self.x,
            AxisRole::Y => &self.y,
        }
    }

    /// Returns the x-axis scales.
    #[must_use]
    pub fn x(&self) -> &AxisScales {
        &self.x
    }

    /// Returns the y-axis scales.
    #[must_use]
    pub fn y(&self) -> &AxisScales {
        &self.y
    }

    /// Returns the current version counter.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Replaces the scales for one axis, bumping the version on change.
    pub fn set_axis(&mut self, role: AxisRole, scales: AxisScales) {
        let slot = match role {
            AxisRole::X => &mut self.x,
            AxisRole::Y => &mut self.y,
        };
        if *slot != scales {
            *slot = scales;
            self.version += 1;
        }
    }

    /// Sets the pixel ranges for both axes, bumping the version on change.
    ///
    /// The y range is conventionally descending (screen-down-positive).
    pub fn set_pixel_ranges(&mut self, x_range: (f64, f64), y_range: (f64, f64)) {
        let changed = self.x.set_range(x_range);
        let changed = self.y.set_range(y_range) || changed;
        if changed {
            self.version += 1;
        }
    }

    /// Checks both simulation domains against the producer contract.
    ///
    /// The offline aggregation and this engine must agree on the simulation
    /// domain per axis; a mismatch silently misplaces every cluster point, so
    /// callers are expected to run this check when a dataset is bound.
    pub fn validate_sim_domains(
        &self,
        expected_x: (f64, f64),
        expected_y: (f64, f64),
    ) -> Result<(), SimDomainMismatch> {
        if !self.x.sim().matches(expected_x) {
            return Err(SimDomainMismatch {
                axis: AxisRole::X,
                expected: expected_x,
                actual: self.x.sim().domain(),
            });
        }
        if !self.y.sim().matches(expected_y) {
            return Err(SimDomainMismatch {
                axis: AxisRole::Y,
                expected: expected_y,
                actual: self.y.sim().domain(),
            });
        }
        Ok(())
    }
}

/// A simulation-domain contract violation detected at load time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimDomainMismatch {
    /// The axis whose domain disagrees.
    pub axis: AxisRole,
    /// The domain the engine was configured to expect.
    pub expected: (f64, f64),
    /// The domain actually carried by the scales.
    pub actual: (f64, f64),
}

impl core::fmt::Display for SimDomainMismatch {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "simulation domain mismatch on {:?} axis: expected ({}, {}), got ({}, {})",
            self.axis, self.expected.0, self.expected.1, self.actual.0, self.actual.1
        )
    }
}

impl core::error::Error for SimDomainMismatch {}

#[cfg(test)]
mod tests {
    use super::{AxisRole, ScaleSet};
    use crate::{AxisScales, Scale, ScaleKind, SimScale};

    fn axis(domain: (f64, f64), range: (f64, f64)) -> AxisScales {
        AxisScales::new(
            Scale::new(ScaleKind::Linear, domain, range),
            SimScale::new(SimScale::DEFAULT_DOMAIN, range),
        )
    }

    #[test]
    fn version_bumps_only_on_genuine_change() {
        let mut set = ScaleSet::new(
            axis((0.0, 10.0), (0.0, 800.0)),
            axis((0.0, 100.0), (600.0, 0.0)),
        );
        assert_eq!(set.version(), 0);

        // Same ranges: no bump.
        set.set_pixel_ranges((0.0, 800.0), (600.0, 0.0));
        assert_eq!(set.version(), 0);

        // Resize: one bump for the whole update.
        set.set_pixel_ranges((0.0, 1024.0), (768.0, 0.0));
        assert_eq!(set.version(), 1);

        // Replacing an axis with an identical one: no bump.
        let same = set.axis(AxisRole::X).clone();
        set.set_axis(AxisRole::X, same);
        assert_eq!(set.version(), 1);
    }

    #[test]
    fn validate_sim_domains_names_the_failing_axis() {
        let set = ScaleSet::new(
            axis((0.0, 10.0), (0.0, 800.0)),
            AxisScales::new(
                Scale::new(ScaleKind::Linear, (0.0, 100.0), (600.0, 0.0)),
                SimScale::new((-500.0, 500.0), (600.0, 0.0)),
            ),
        );

        assert!(
            set.validate_sim_domains((-1000.0, 1000.0), (-1000.0, 1000.0))
                .is_err()
        );
        let err = set
            .validate_sim_domains((-1000.0, 1000.0), (-1000.0, 1000.0))
            .unwrap_err();
        assert_eq!(err.axis, AxisRole::Y);
        assert_eq!(err.actual, (-500.0, 500.0));

        assert!(
            set.validate_sim_domains((-1000.0, 1000.0), (-500.0, 500.0))
                .is_ok()
        );
    }
}
