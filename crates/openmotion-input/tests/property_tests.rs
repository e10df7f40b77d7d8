//! Property tests for control scaling.

use hid_sixense_protocol::{SensorReport, SensorSide};
use openmotion_input::{AxisHalf, ControlBinding, control::sensor_bindings};
use proptest::prelude::*;

fn stick(channel: usize, half: AxisHalf) -> ControlBinding {
    ControlBinding::Stick {
        label: "Stick X",
        channel,
        half,
    }
}

fn position(channel: usize, half: AxisHalf) -> ControlBinding {
    ControlBinding::Position {
        label: "X",
        channel,
        half,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn prop_stick_halves_are_exclusive(raw in any::<i16>()) {
        let sensor = SensorReport { axis: [raw, 0], ..SensorReport::default() };
        let neg = stick(0, AxisHalf::Negative).evaluate(&sensor);
        let pos = stick(0, AxisHalf::Positive).evaluate(&sensor);

        prop_assert!((0.0..=1.0).contains(&neg));
        prop_assert!((0.0..=1.0).contains(&pos));
        prop_assert!(neg.abs() < f64::EPSILON || pos.abs() < f64::EPSILON);
    }

    #[test]
    fn prop_position_scales_by_centimetres(raw in any::<i16>()) {
        let sensor = SensorReport { position: [0, 0, raw], ..SensorReport::default() };
        let neg = position(2, AxisHalf::Negative).evaluate(&sensor);
        let pos = position(2, AxisHalf::Positive).evaluate(&sensor);

        // Exactly one half carries the magnitude, the other reads zero.
        let expected = f64::from(raw).abs() / 100.0;
        prop_assert!((neg + pos - expected).abs() < 1e-9);
        prop_assert!(neg >= 0.0 && pos >= 0.0);
    }

    #[test]
    fn prop_trigger_is_normalised(raw in any::<u8>()) {
        let sensor = SensorReport { trigger: raw, ..SensorReport::default() };
        let value = ControlBinding::Trigger { label: "Trigger" }.evaluate(&sensor);

        prop_assert!((0.0..=1.0).contains(&value));
        prop_assert!((value * 255.0 - f64::from(raw)).abs() < 1e-9);
    }

    #[test]
    fn prop_buttons_are_binary(buttons in any::<u8>()) {
        let sensor = SensorReport { buttons, ..SensorReport::default() };
        for binding in sensor_bindings() {
            if let ControlBinding::Button { bitmask, .. } = binding {
                let value = binding.evaluate(&sensor);
                let expected = if buttons & bitmask != 0 { 1.0 } else { 0.0 };
                prop_assert!((value - expected).abs() < f64::EPSILON);
            }
        }
    }

    #[test]
    fn prop_display_names_are_prefixed(right in any::<bool>()) {
        let side = if right { SensorSide::Right } else { SensorSide::Left };
        for binding in sensor_bindings() {
            let name = binding.display_name(side);
            prop_assert!(name.starts_with(side.prefix()));
            prop_assert!(name.contains(binding.label()));
        }
    }
}
