//! Axis calibration: raw ADC sample to the 0-255 byte sent to the host.
//!
//! Every sample goes through the same fixed pipeline:
//!
//! 1. scale the raw reading to 8 bits ([`scale_to_u8`])
//! 2. invert (`255 - v`) if configured
//! 3. for triggers, remap `[trigger_min, trigger_max]` onto `[0, 255]`
//! 4. snap to 128 when within the deadzone
//! 5. exponential smoothing, when a factor above zero is configured
//!
//! Steps 2-4 are the pure [`calibrate`] function. Step 5 needs memory of the
//! previously emitted value, which [`AxisCalibrator`] keeps per axis.

use gamepad_report::AXIS_CENTER;
use serde::Deserialize;

use crate::config::{blank_comment_lines, ConfigError};
use crate::types::{Axis, AXIS_COUNT};

/// Where deadzone centering applies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(rename_all = "snake_case")]
pub enum DeadzonePolicy {
    /// Every axis with a deadzone snaps to 128, triggers included.
    #[default]
    Centered,
    /// Triggers ignore their deadzone setting.
    SticksOnly,
}

impl DeadzonePolicy {
    #[must_use]
    pub const fn applies_to(self, axis: Axis) -> bool {
        match self {
            DeadzonePolicy::Centered => true,
            DeadzonePolicy::SticksOnly => !axis.is_trigger(),
        }
    }
}

/// Settings for one axis.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AxisCalibration {
    pub invert: bool,
    /// Half-width of the band around 128 that snaps to 128.
    pub deadzone: u8,
    /// Smoothing factor in `0.0..=1.0`; weight of the newest sample.
    pub smoothing: f32,
    /// Raw (post-invert) value that maps to 0. Triggers only.
    pub trigger_min: u8,
    /// Raw (post-invert) value that maps to 255. Triggers only.
    pub trigger_max: u8,
}

impl Default for AxisCalibration {
    fn default() -> Self {
        Self {
            invert: false,
            deadzone: 0,
            smoothing: 0.0,
            trigger_min: 0,
            trigger_max: 255,
        }
    }
}

impl AxisCalibration {
    #[must_use]
    pub fn with_invert(mut self, invert: bool) -> Self {
        self.invert = invert;
        self
    }

    #[must_use]
    pub fn with_deadzone(mut self, deadzone: u8) -> Self {
        self.deadzone = deadzone;
        self
    }

    #[must_use]
    pub fn with_smoothing(mut self, smoothing: f32) -> Self {
        self.smoothing = smoothing;
        self
    }

    #[must_use]
    pub fn with_trigger_range(mut self, min: u8, max: u8) -> Self {
        self.trigger_min = min;
        self.trigger_max = max;
        self
    }
}

/// Calibration for all six axes plus the deadzone policy.
///
/// # Example
///
/// ```
/// use gamepad_core::{Axis, AxisCalibration, CalibrationProfile};
///
/// let profile = CalibrationProfile::default()
///     .with_axis(Axis::LeftY, AxisCalibration::default().with_invert(true));
/// assert!(profile.axis(Axis::LeftY).invert);
/// assert!(!profile.axis(Axis::LeftX).invert);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CalibrationProfile {
    axes: [AxisCalibration; AXIS_COUNT],
    pub deadzone_policy: DeadzonePolicy,
}

impl CalibrationProfile {
    #[must_use]
    pub fn axis(&self, axis: Axis) -> &AxisCalibration {
        &self.axes[axis.index()]
    }

    pub fn axis_mut(&mut self, axis: Axis) -> &mut AxisCalibration {
        &mut self.axes[axis.index()]
    }

    #[must_use]
    pub fn with_axis(mut self, axis: Axis, calibration: AxisCalibration) -> Self {
        self.axes[axis.index()] = calibration;
        self
    }

    /// Reject smoothing factors outside `0.0..=1.0` (NaN included).
    pub fn validate(&self) -> Result<(), ConfigError> {
        for axis in Axis::ALL {
            let a = self.axis(axis).smoothing;
            if !(0.0..=1.0).contains(&a) {
                return Err(ConfigError::SmoothingOutOfRange(axis.name()));
            }
        }
        Ok(())
    }

    /// Parse the calibration JSON document.
    ///
    /// ```text
    /// {
    ///   "invert":    { "LY": true, "RY": true },
    ///   "deadzone":  { "LX": 12, "LY": 12 },
    ///   "smoothing": { "LX": 0.35 },
    ///   "triggers":  { "LT_min": 20, "LT_max": 240 },
    ///   "deadzone_policy": "sticks_only"
    /// }
    /// ```
    ///
    /// Every section and entry is optional. Whole-line `//` comments are
    /// blanked in `doc` before parsing.
    pub fn from_json(doc: &mut [u8]) -> Result<Self, ConfigError> {
        blank_comment_lines(doc);
        let (parsed, _) = serde_json_core::from_slice::<CalibrationDocument>(doc)?;

        let mut profile = Self {
            deadzone_policy: parsed.deadzone_policy,
            ..Self::default()
        };

        for axis in Axis::ALL {
            let cal = profile.axis_mut(axis);
            if let Some(invert) = parsed.invert.get(axis) {
                cal.invert = invert;
            }
            if let Some(deadzone) = parsed.deadzone.get(axis) {
                cal.deadzone = deadzone;
            }
            if let Some(smoothing) = parsed.smoothing.get(axis) {
                cal.smoothing = smoothing;
            }
        }

        let triggers = parsed.triggers;
        let lt = profile.axis_mut(Axis::LeftTrigger);
        lt.trigger_min = triggers.lt_min.unwrap_or(lt.trigger_min);
        lt.trigger_max = triggers.lt_max.unwrap_or(lt.trigger_max);
        let rt = profile.axis_mut(Axis::RightTrigger);
        rt.trigger_min = triggers.rt_min.unwrap_or(rt.trigger_min);
        rt.trigger_max = triggers.rt_max.unwrap_or(rt.trigger_max);

        profile.validate()?;
        Ok(profile)
    }

    /// Like [`from_json`](Self::from_json), but an empty or unusable
    /// document yields the defaults (with a warning) instead of an error.
    pub fn from_json_or_default(doc: &mut [u8]) -> Self {
        Self::from_json(doc).unwrap_or_else(|_err| {
            #[cfg(feature = "defmt")]
            defmt::warn!("calibration unusable ({}), using defaults", _err);
            Self::default()
        })
    }
}

#[derive(Deserialize, Default)]
struct CalibrationDocument {
    #[serde(default)]
    invert: PerAxis<bool>,
    #[serde(default)]
    deadzone: PerAxis<u8>,
    #[serde(default)]
    smoothing: PerAxis<f32>,
    #[serde(default)]
    triggers: TriggerLimits,
    #[serde(default)]
    deadzone_policy: DeadzonePolicy,
}

#[derive(Deserialize, Default)]
struct PerAxis<T> {
    #[serde(rename = "LX")]
    lx: Option<T>,
    #[serde(rename = "LY")]
    ly: Option<T>,
    #[serde(rename = "RX")]
    rx: Option<T>,
    #[serde(rename = "RY")]
    ry: Option<T>,
    #[serde(rename = "LT")]
    lt: Option<T>,
    #[serde(rename = "RT")]
    rt: Option<T>,
}

impl<T: Copy> PerAxis<T> {
    fn get(&self, axis: Axis) -> Option<T> {
        match axis {
            Axis::LeftX => self.lx,
            Axis::LeftY => self.ly,
            Axis::RightX => self.rx,
            Axis::RightY => self.ry,
            Axis::LeftTrigger => self.lt,
            Axis::RightTrigger => self.rt,
        }
    }
}

#[derive(Deserialize, Default)]
struct TriggerLimits {
    #[serde(rename = "LT_min")]
    lt_min: Option<u8>,
    #[serde(rename = "LT_max")]
    lt_max: Option<u8>,
    #[serde(rename = "RT_min")]
    rt_min: Option<u8>,
    #[serde(rename = "RT_max")]
    rt_max: Option<u8>,
}

/// Scale a raw sample of `bits` resolution to 8 bits.
///
/// Wider samples are right-shifted. Narrower ones are stretched so that
/// full scale maps to 255. Values above the stated resolution saturate.
///
/// ```
/// use gamepad_core::calibration::scale_to_u8;
///
/// assert_eq!(scale_to_u8(4095, 12), 255);
/// assert_eq!(scale_to_u8(2048, 12), 128);
/// assert_eq!(scale_to_u8(0xFFFF, 16), 255);
/// ```
#[must_use]
pub fn scale_to_u8(raw: u16, bits: u8) -> u8 {
    let bits = bits.clamp(1, 16);
    let raw = u32::from(raw);
    if bits >= 8 {
        (raw >> (bits - 8)).min(255) as u8
    } else {
        let max = (1u32 << bits) - 1;
        (raw.min(max) * 255 / max) as u8
    }
}

/// Invert, trigger remap, and deadzone for an already scaled value.
///
/// This is the deterministic part of the pipeline; smoothing is applied
/// on top of it by [`AxisCalibrator`].
#[must_use]
pub fn calibrate(axis: Axis, value: u8, cal: &AxisCalibration, policy: DeadzonePolicy) -> u8 {
    let mut value = value;

    if cal.invert {
        value = 255 - value;
    }

    if axis.is_trigger() && cal.trigger_max > cal.trigger_min {
        value = remap_trigger(value, cal.trigger_min, cal.trigger_max);
    }

    if policy.applies_to(axis) && value.abs_diff(AXIS_CENTER) < cal.deadzone {
        value = AXIS_CENTER;
    }

    value
}

fn remap_trigger(value: u8, lo: u8, hi: u8) -> u8 {
    let v = u32::from(value.clamp(lo, hi) - lo);
    let span = u32::from(hi - lo);
    (v * 255 / span) as u8
}

/// Exponential moving average with memory of the last emitted value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SmoothingFilter {
    previous: Option<u8>,
}

impl SmoothingFilter {
    #[must_use]
    pub const fn new() -> Self {
        Self { previous: None }
    }

    /// `round((1 - a) * previous + a * value)`; the first sample passes through.
    pub fn apply(&mut self, value: u8, a: f32) -> u8 {
        let previous = f32::from(self.previous.unwrap_or(value));
        let blended = (1.0 - a) * previous + a * f32::from(value);
        let out = (blended + 0.5) as u8;
        self.previous = Some(out);
        out
    }
}

/// Full calibration pipeline with per-axis smoothing state.
///
/// # Example
///
/// ```
/// use gamepad_core::{Axis, AxisCalibration, AxisCalibrator, CalibrationProfile};
///
/// let profile = CalibrationProfile::default()
///     .with_axis(Axis::LeftX, AxisCalibration::default().with_deadzone(12));
/// let mut calibrator = AxisCalibrator::new(profile);
///
/// // 8-bit samples pass through scaling unchanged.
/// assert_eq!(calibrator.calibrate(Axis::LeftX, 130, 8), 128);
/// assert_eq!(calibrator.calibrate(Axis::LeftX, 200, 8), 200);
/// ```
#[derive(Clone, Debug)]
pub struct AxisCalibrator {
    profile: CalibrationProfile,
    filters: [SmoothingFilter; AXIS_COUNT],
}

impl AxisCalibrator {
    #[must_use]
    pub fn new(profile: CalibrationProfile) -> Self {
        Self {
            profile,
            filters: [SmoothingFilter::new(); AXIS_COUNT],
        }
    }

    /// Calibrate a raw sample of `bits` resolution for `axis`.
    pub fn calibrate(&mut self, axis: Axis, raw: u16, bits: u8) -> u8 {
        let cal = self.profile.axis(axis);
        let value = calibrate(axis, scale_to_u8(raw, bits), cal, self.profile.deadzone_policy);

        if cal.smoothing > 0.0 {
            self.filters[axis.index()].apply(value, cal.smoothing)
        } else {
            value
        }
    }
}
