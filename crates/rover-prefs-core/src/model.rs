// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! In-memory model of the five synchronized preferences.

use serde::{Deserialize, Serialize};

use crate::format::PrefValue;
use crate::key::{PrefKey, Technology};

/// Current typed values for every registered preference.
///
/// Created once per session from store data and mutated only through the
/// session's write path. After normalization every numeric value satisfies
/// its spec's current range and the boolean/technology slots hold proper
/// typed values (string-encoded only at the storage boundary).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrefModel {
    /// Whether autonomous navigation is enabled.
    pub is_active: bool,
    /// Selected localization technology.
    pub technology: Technology,
    /// Maximum roam distance from the dock (meters).
    pub max_distance: f64,
    /// Maximum rotation while scanning for the dock (degrees).
    pub max_angle: f64,
    /// Idle time before heading home (seconds).
    pub go_home_timeout: f64,
}

impl Default for PrefModel {
    fn default() -> Self {
        Self {
            is_active: false,
            technology: Technology::Slam,
            max_distance: 3.0,
            max_angle: 180.0,
            go_home_timeout: 10.0,
        }
    }
}

impl PrefModel {
    /// Typed value for `key`.
    pub fn get(&self, key: PrefKey) -> PrefValue {
        match key {
            PrefKey::IsActive => PrefValue::Bool(self.is_active),
            PrefKey::Technology => PrefValue::Technology(self.technology),
            PrefKey::MaxDistance => PrefValue::Number(self.max_distance),
            PrefKey::MaxAngle => PrefValue::Number(self.max_angle),
            PrefKey::GoHomeTimeout => PrefValue::Number(self.go_home_timeout),
        }
    }

    /// Numeric value for `key`, when the key is numeric.
    pub fn number(&self, key: PrefKey) -> Option<f64> {
        match self.get(key) {
            PrefValue::Number(value) => Some(value),
            PrefValue::Bool(_) | PrefValue::Technology(_) => None,
        }
    }

    /// Overwrite the slot for `key`.
    ///
    /// A value of the wrong kind for the key is ignored; the write path only
    /// produces matching kinds.
    pub fn set(&mut self, key: PrefKey, value: PrefValue) {
        match (key, value) {
            (PrefKey::IsActive, PrefValue::Bool(v)) => self.is_active = v,
            (PrefKey::Technology, PrefValue::Technology(v)) => self.technology = v,
            (PrefKey::MaxDistance, PrefValue::Number(v)) => self.max_distance = v,
            (PrefKey::MaxAngle, PrefValue::Number(v)) => self.max_angle = v,
            (PrefKey::GoHomeTimeout, PrefValue::Number(v)) => self.go_home_timeout = v,
            _ => {}
        }
    }
}
