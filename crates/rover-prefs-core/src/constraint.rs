// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Cross-field constraint: the selected technology bounds MaxAngle.

use crate::key::Technology;
use crate::model::PrefModel;
use crate::spec::{SpecRegistry, FULL_MAX_ANGLE, POD_MAX_ANGLE};

/// Re-derive the MaxAngle ceiling from the model's current technology.
///
/// Pod localization cannot turn past 180 degrees, so selecting it lowers the
/// ceiling and forces an out-of-range current value down onto it. The force
/// touches the model only; the stored value re-normalizes on the next load.
/// Any other
/// technology restores the full ceiling without touching the current value.
///
/// Must run once at load (seeded from the loaded technology, before range
/// validation) and again on every technology change.
pub fn apply_technology_constraint(specs: &mut SpecRegistry, model: &mut PrefModel) {
    if model.technology == Technology::Pod {
        specs.set_max_angle_limit(POD_MAX_ANGLE);
        if model.max_angle > POD_MAX_ANGLE {
            model.max_angle = POD_MAX_ANGLE;
        }
    } else {
        specs.set_max_angle_limit(FULL_MAX_ANGLE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pod_lowers_the_ceiling_and_the_current_value() {
        let mut specs = SpecRegistry::new();
        let mut model = PrefModel {
            technology: Technology::Pod,
            max_angle: 270.0,
            ..PrefModel::default()
        };
        apply_technology_constraint(&mut specs, &mut model);
        assert_eq!(specs.max_angle_limit(), POD_MAX_ANGLE);
        assert_eq!(model.max_angle, POD_MAX_ANGLE);
    }

    #[test]
    fn leaving_pod_restores_the_ceiling_but_not_the_value() {
        let mut specs = SpecRegistry::new();
        let mut model = PrefModel {
            technology: Technology::Pod,
            max_angle: 270.0,
            ..PrefModel::default()
        };
        apply_technology_constraint(&mut specs, &mut model);

        model.technology = Technology::Slam;
        apply_technology_constraint(&mut specs, &mut model);
        assert_eq!(specs.max_angle_limit(), FULL_MAX_ANGLE);
        assert_eq!(model.max_angle, POD_MAX_ANGLE);
    }

    #[test]
    fn pod_leaves_an_in_range_value_alone() {
        let mut specs = SpecRegistry::new();
        let mut model = PrefModel {
            technology: Technology::Pod,
            max_angle: 120.0,
            ..PrefModel::default()
        };
        apply_technology_constraint(&mut specs, &mut model);
        assert_eq!(model.max_angle, 120.0);
    }
}
