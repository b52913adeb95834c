// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Boundary parsing between stored strings and typed values.
//!
//! The store only speaks strings, and stored data may be absent, stale, or
//! written by an older format version. Every parser here is total: malformed
//! input resolves to the documented default, never an error.

use std::fmt;

use crate::key::Technology;

/// Typed value of one preference, with its storage encoding as `Display`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PrefValue {
    /// Activation flag; stored as `"On"` / `"Off"`.
    Bool(bool),
    /// Technology selection; stored as its label.
    Technology(Technology),
    /// Numeric limit; stored as its decimal rendering.
    Number(f64),
}

impl fmt::Display for PrefValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrefValue::Bool(true) => f.write_str("On"),
            PrefValue::Bool(false) => f.write_str("Off"),
            PrefValue::Technology(technology) => f.write_str(technology.label()),
            PrefValue::Number(number) => write!(f, "{number}"),
        }
    }
}

/// Parse a stored activation flag.
///
/// `1|true|on|yes` (any case) is true, `0|false|off|no` is false, and
/// anything else (absent values included) falls back to off.
pub fn parse_bool(raw: Option<&str>) -> bool {
    match raw {
        Some(raw) => match raw.to_ascii_lowercase().as_str() {
            "1" | "true" | "on" | "yes" => true,
            "0" | "false" | "off" | "no" => false,
            // Unrecognized: same fallback as absent.
            _ => false,
        },
        None => false,
    }
}

/// Parse a stored technology label.
///
/// The raw value is normalized (first letter upper, rest lower) before
/// matching; unknown labels fall back to the default technology.
pub fn parse_technology(raw: Option<&str>) -> Technology {
    let Some(raw) = raw else {
        return Technology::default();
    };
    let normalized = capitalize(raw);
    Technology::ALL
        .into_iter()
        .find(|technology| technology.label() == normalized)
        .unwrap_or_default()
}

/// Parse a stored numeric value.
///
/// Absent or malformed input yields NaN, which the range validator resolves
/// to the key's default; resolution is deliberately not done here.
pub fn parse_number(raw: Option<&str>) -> f64 {
    raw.and_then(|raw| raw.trim().parse::<f64>().ok())
        .unwrap_or(f64::NAN)
}

fn capitalize(raw: &str) -> String {
    let mut chars = raw.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}
