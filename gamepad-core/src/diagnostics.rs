//! Text rendering for the wiring/calibration diagnostic mode.
//!
//! Diagnostic mode does not emit reports. It samples the registry a few
//! times per second and logs what every control reads, with each axis drawn
//! as a fixed-width bar:
//!
//! ```text
//! LX 200 [|>>>>>>>>>......................]
//! LY 128 [|...............................]
//! LT  64 [########........................]
//! DPad [<^..]
//! ```

use gamepad_report::{Buttons, AXIS_CENTER};
use heapless::String;

use crate::calibration::AxisCalibrator;
use crate::input::{AnalogInput, DigitalInput};
use crate::registry::InputRegistry;
use crate::types::{Axis, DpadState, AXIS_COUNT};

/// Columns per bar.
pub const BAR_WIDTH: usize = 32;

/// Diagnostic log rate.
pub const UPDATE_HZ: u64 = 5;

pub type Bar = String<BAR_WIDTH>;

/// Bar growing from the middle: `<` left of center, `>` right of it.
#[must_use]
pub fn centered_bar(value: u8) -> Bar {
    const LO: usize = 0;
    const HI: usize = 255;
    let center = usize::from(AXIS_CENTER);
    let v = usize::from(value);

    let left = center.saturating_sub(v) * BAR_WIDTH / (2 * (center - LO + 1));
    let right = v.saturating_sub(center) * BAR_WIDTH / (2 * (HI - center + 1));

    let mut bar = Bar::new();
    fill(&mut bar, '<', left);
    fill(&mut bar, '|', 1);
    fill(&mut bar, '>', right);
    fill(&mut bar, '.', BAR_WIDTH - (left + 1 + right));
    bar
}

/// Bar filled from the left with `#`.
#[must_use]
pub fn filled_bar(value: u8) -> Bar {
    let filled = usize::from(value) * BAR_WIDTH / 256;
    let mut bar = Bar::new();
    fill(&mut bar, '#', filled);
    fill(&mut bar, '.', BAR_WIDTH - filled);
    bar
}

/// Bar for an axis: centered for sticks, filled for triggers, dashes when unwired.
#[must_use]
pub fn axis_bar(axis: Axis, value: Option<u8>) -> Bar {
    match value {
        None => {
            let mut bar = Bar::new();
            fill(&mut bar, '-', BAR_WIDTH);
            bar
        }
        Some(v) if axis.is_trigger() => filled_bar(v),
        Some(v) => centered_bar(v),
    }
}

/// `[<^v>]` style D-pad glyphs, `.` for a released direction.
#[must_use]
pub fn dpad_glyphs(dpad: &DpadState) -> String<4> {
    let mut s = String::new();
    for (pressed, glyph) in [
        (dpad.left, '<'),
        (dpad.up, '^'),
        (dpad.down, 'v'),
        (dpad.right, '>'),
    ] {
        let _ = s.push(if pressed { glyph } else { '.' });
    }
    s
}

fn fill(bar: &mut Bar, c: char, n: usize) {
    for _ in 0..n {
        if bar.push(c).is_err() {
            break;
        }
    }
}

/// One sample of every control.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Frame {
    pub buttons: Buttons,
    pub dpad: DpadState,
    /// Calibrated value per axis, `None` when unwired.
    pub axes: [Option<u8>; AXIS_COUNT],
}

impl Frame {
    pub fn sample<D: DigitalInput, A: AnalogInput>(
        registry: &mut InputRegistry<D, A>,
        calibrator: &mut AxisCalibrator,
    ) -> Self {
        let buttons = registry.read_buttons();
        let dpad = registry.read_dpad();
        let axes = Axis::ALL.map(|axis| {
            if registry.has_axis(axis) {
                Some(registry.read_axis(axis, calibrator))
            } else {
                None
            }
        });
        Self { buttons, dpad, axes }
    }
}
