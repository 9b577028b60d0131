//! Property-based tests for calibration, hat encoding, and report assembly.

use gamepad_core::calibration::{calibrate, scale_to_u8, SmoothingFilter};
use gamepad_core::{
    Axis, AxisCalibration, AxisCalibrator, Buttons, CalibrationProfile, DeadzonePolicy,
    GamepadReport, Hat,
};
use proptest::prelude::*;

fn any_axis() -> impl Strategy<Value = Axis> {
    prop::sample::select(Axis::ALL.to_vec())
}

fn any_stick() -> impl Strategy<Value = Axis> {
    prop::sample::select(vec![Axis::LeftX, Axis::LeftY, Axis::RightX, Axis::RightY])
}

fn any_trigger() -> impl Strategy<Value = Axis> {
    prop::sample::select(vec![Axis::LeftTrigger, Axis::RightTrigger])
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    // --- Deadzone: anything inside the band snaps to center ---

    #[test]
    fn deadzone_snaps_inside_band(
        axis in any_stick(),
        raw in 0u8..=255,
        dz in 0u8..=255,
        invert in any::<bool>(),
    ) {
        let cal = AxisCalibration::default().with_deadzone(dz).with_invert(invert);
        let seen = if invert { 255 - raw } else { raw };
        let out = calibrate(axis, raw, &cal, DeadzonePolicy::Centered);
        if seen.abs_diff(128) < dz {
            prop_assert_eq!(out, 128);
        } else {
            prop_assert_eq!(out, seen);
        }
    }

    #[test]
    fn sticks_only_policy_never_centers_triggers(
        axis in any_trigger(),
        raw in 0u8..=255,
        dz in 0u8..=255,
    ) {
        let cal = AxisCalibration::default().with_deadzone(dz);
        prop_assert_eq!(calibrate(axis, raw, &cal, DeadzonePolicy::SticksOnly), raw);
    }

    // --- Trigger remap: endpoints and monotonicity ---

    #[test]
    fn trigger_endpoints_map_to_full_range(
        axis in any_trigger(),
        lo in 0u8..255,
        spread in 1u8..=255,
    ) {
        let hi = lo.saturating_add(spread);
        prop_assume!(hi > lo);
        let cal = AxisCalibration::default().with_trigger_range(lo, hi);
        prop_assert_eq!(calibrate(axis, lo, &cal, DeadzonePolicy::Centered), 0);
        prop_assert_eq!(calibrate(axis, hi, &cal, DeadzonePolicy::Centered), 255);
    }

    #[test]
    fn trigger_remap_is_monotonic(
        axis in any_trigger(),
        lo in 0u8..=255,
        hi in 0u8..=255,
        a in 0u8..=255,
        b in 0u8..=255,
    ) {
        let cal = AxisCalibration::default().with_trigger_range(lo, hi);
        let (small, large) = if a <= b { (a, b) } else { (b, a) };
        let out_small = calibrate(axis, small, &cal, DeadzonePolicy::SticksOnly);
        let out_large = calibrate(axis, large, &cal, DeadzonePolicy::SticksOnly);
        prop_assert!(out_small <= out_large, "{} -> {}, {} -> {}", small, out_small, large, out_large);
    }

    // --- Invert is involutive ---

    #[test]
    fn invert_twice_is_identity(axis in any_stick(), raw in 0u8..=255) {
        let on = AxisCalibration::default().with_invert(true);
        let once = calibrate(axis, raw, &on, DeadzonePolicy::Centered);
        let twice = calibrate(axis, once, &on, DeadzonePolicy::Centered);
        prop_assert_eq!(twice, raw);
    }

    // --- Scaling stays in range and keeps order ---

    #[test]
    fn scale_is_monotonic(bits in 1u8..=16, a in any::<u16>(), b in any::<u16>()) {
        let max = if bits == 16 { u16::MAX } else { (1u16 << bits) - 1 };
        let (a, b) = (a.min(max), b.min(max));
        let (small, large) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(scale_to_u8(small, bits) <= scale_to_u8(large, bits));
    }

    #[test]
    fn scale_spans_full_range(bits in 1u8..=16) {
        let max = if bits == 16 { u16::MAX } else { (1u16 << bits) - 1 };
        prop_assert_eq!(scale_to_u8(0, bits), 0);
        prop_assert_eq!(scale_to_u8(max, bits), 255);
    }

    // --- Smoothing: a = 1 has no memory, a = 0 is not applied ---

    #[test]
    fn smoothing_one_tracks_input(values in prop::collection::vec(any::<u8>(), 1..50)) {
        let mut filter = SmoothingFilter::new();
        for v in values {
            prop_assert_eq!(filter.apply(v, 1.0), v);
        }
    }

    #[test]
    fn zero_smoothing_is_identity(
        axis in any_axis(),
        samples in prop::collection::vec(any::<u8>(), 1..50),
    ) {
        let mut calibrator = AxisCalibrator::new(CalibrationProfile::default());
        for raw in samples {
            prop_assert_eq!(calibrator.calibrate(axis, u16::from(raw), 8), raw);
        }
    }

    #[test]
    fn smoothing_stays_between_previous_and_input(
        a in 0.0f32..=1.0,
        first in any::<u8>(),
        next in any::<u8>(),
    ) {
        let mut filter = SmoothingFilter::new();
        filter.apply(first, a);
        let out = filter.apply(next, a);
        prop_assert!(out >= first.min(next) && out <= first.max(next));
    }

    // --- Report: always nine bytes, fields in place ---

    #[test]
    fn report_is_nine_bytes(
        bits in any::<u16>(),
        hat in 0u8..=8,
        axes in any::<[u8; 6]>(),
    ) {
        let report = GamepadReport::with_axes(Buttons(bits), Hat::from_u8(hat), axes);
        let bytes = report.as_bytes();
        prop_assert_eq!(bytes.len(), 9);
        prop_assert_eq!(&bytes[..2], &bits.to_le_bytes()[..]);
        prop_assert_eq!(bytes[2], hat);
        prop_assert_eq!(&bytes[3..], &axes[..]);
    }

    // --- Hat: every combination is defined ---

    #[test]
    fn hat_is_total(up in any::<bool>(), down in any::<bool>(), left in any::<bool>(), right in any::<bool>()) {
        let hat = Hat::from_dpad(up, down, left, right);
        prop_assert!(hat.as_u8() <= 8);
        if (up && down) || (left && right) {
            prop_assert_eq!(hat, Hat::Neutral);
        }
    }
}

#[test]
fn hat_reference_values() {
    assert_eq!(Hat::from_dpad(true, false, false, false).as_u8(), 0);
    assert_eq!(Hat::from_dpad(false, false, false, true).as_u8(), 2);
    assert_eq!(Hat::from_dpad(true, false, false, true).as_u8(), 1);
    assert_eq!(Hat::from_dpad(false, true, true, false).as_u8(), 5);
    assert_eq!(Hat::from_dpad(false, false, false, false).as_u8(), 8);
    assert_eq!(Hat::from_dpad(true, true, false, false).as_u8(), 8);
    assert_eq!(Hat::from_dpad(true, true, true, true).as_u8(), 8);
}

#[test]
fn slot_three_packs_into_low_byte() {
    let report = GamepadReport::with_axes(Buttons::slot(3), Hat::Neutral, [128; 6]);
    assert_eq!(report.as_bytes()[..2], [0b0000_1000, 0]);
}
