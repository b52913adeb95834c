// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Preference keys and the fixed technology entry set.

use serde::{Deserialize, Serialize};

/// Preference namespace scoping all Rover navigation keys in the store.
pub const PREF_DOMAIN: &str = "dev.flyingrobots.rover.nav";

/// Identifier for one synchronized navigation preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrefKey {
    /// Whether autonomous navigation is enabled at all.
    IsActive,
    /// Localization technology used to find the dock.
    Technology,
    /// Maximum roam distance from the dock (meters).
    MaxDistance,
    /// Maximum rotation while scanning for the dock (degrees).
    MaxAngle,
    /// Idle time before heading home (seconds).
    GoHomeTimeout,
}

impl PrefKey {
    /// Every registered key, in load order.
    pub const ALL: [PrefKey; 5] = [
        PrefKey::IsActive,
        PrefKey::Technology,
        PrefKey::MaxDistance,
        PrefKey::MaxAngle,
        PrefKey::GoHomeTimeout,
    ];

    /// Stable name used in the preference store.
    pub fn name(self) -> &'static str {
        match self {
            PrefKey::IsActive => "IsActive",
            PrefKey::Technology => "Technology",
            PrefKey::MaxDistance => "MaxDistance",
            PrefKey::MaxAngle => "MaxAngle",
            PrefKey::GoHomeTimeout => "GoHomeTimeout",
        }
    }

    /// Reverse lookup from a stable store name.
    pub fn from_name(name: &str) -> Option<Self> {
        PrefKey::ALL.into_iter().find(|key| key.name() == name)
    }
}

/// Localization technology used to navigate back to the dock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Technology {
    /// Laser-based SLAM localization.
    #[default]
    Slam,
    /// Fiducial-marker (ArUco) localization.
    Aruco,
    /// Charging-pod beacon localization.
    Pod,
}

impl Technology {
    /// Selectable entries, in display order.
    pub const ALL: [Technology; 3] = [Technology::Slam, Technology::Aruco, Technology::Pod];

    /// Canonical label, as stored and displayed.
    pub fn label(self) -> &'static str {
        match self {
            Technology::Slam => "Slam",
            Technology::Aruco => "Aruco",
            Technology::Pod => "Pod",
        }
    }
}
