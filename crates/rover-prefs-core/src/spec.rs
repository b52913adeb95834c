// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Static value specifications for the numeric preferences.

use crate::key::PrefKey;

/// Range description for one numeric preference.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueSpec {
    /// Value used when the stored one is absent or invalid.
    pub default: f64,
    /// Inclusive lower bound.
    pub min: f64,
    /// Inclusive upper bound.
    pub max: f64,
    /// Step applied by increase/decrease.
    pub step: f64,
}

/// MaxAngle ceiling while the Pod technology is selected.
pub const POD_MAX_ANGLE: f64 = 180.0;

/// MaxAngle ceiling for every other technology.
pub const FULL_MAX_ANGLE: f64 = 360.0;

/// Registry of numeric value specs.
///
/// The MaxAngle `max` is the only mutable cell (written by the constraint
/// propagator); everything else is fixed for the life of a session.
#[derive(Debug, Clone)]
pub struct SpecRegistry {
    max_distance: ValueSpec,
    max_angle: ValueSpec,
    go_home_timeout: ValueSpec,
}

impl Default for SpecRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl SpecRegistry {
    /// Registry with the stock ranges.
    pub fn new() -> Self {
        Self {
            max_distance: ValueSpec {
                default: 3.0,
                min: 0.5,
                max: 3.0,
                step: 0.5,
            },
            max_angle: ValueSpec {
                default: 180.0,
                min: 60.0,
                max: FULL_MAX_ANGLE,
                step: 10.0,
            },
            go_home_timeout: ValueSpec {
                default: 10.0,
                min: 0.5,
                max: 100_000.0,
                step: 1.0,
            },
        }
    }

    /// Spec for a numeric key; `None` for the boolean/technology keys.
    pub fn numeric(&self, key: PrefKey) -> Option<&ValueSpec> {
        match key {
            PrefKey::MaxDistance => Some(&self.max_distance),
            PrefKey::MaxAngle => Some(&self.max_angle),
            PrefKey::GoHomeTimeout => Some(&self.go_home_timeout),
            PrefKey::IsActive | PrefKey::Technology => None,
        }
    }

    /// Current MaxAngle ceiling.
    pub fn max_angle_limit(&self) -> f64 {
        self.max_angle.max
    }

    pub(crate) fn set_max_angle_limit(&mut self, limit: f64) {
        self.max_angle.max = limit;
    }
}
