//! Configuration documents compiled into the image.

use defmt::{info, warn};
use gamepad_core::{CalibrationProfile, ConfigError, ControlMapping};

/// Pin mapping document.
pub const PINOUT_JSON: &[u8] = include_bytes!("../config/button-pinout.json");

/// Calibration document.
pub const CALIBRATION_JSON: &[u8] = include_bytes!("../config/config.json");

/// Largest document that can be parsed.
pub const MAX_DOCUMENT_LEN: usize = 2048;

/// Parse the pin mapping. Any error here is fatal.
pub fn load_mapping() -> Result<ControlMapping, ConfigError> {
    let mut buf = [0u8; MAX_DOCUMENT_LEN];
    let doc = copy_document(PINOUT_JSON, &mut buf)?;
    let mapping = ControlMapping::from_json(doc)?;
    info!(
        "pin mapping: {} buttons, dpad {}, axes {}",
        mapping.buttons().len(),
        gamepad_core::DpadDirection::ALL
            .iter()
            .filter(|&&d| mapping.dpad(d).is_some())
            .count(),
        gamepad_core::Axis::ALL
            .iter()
            .filter(|&&a| mapping.axis(a).is_some())
            .count(),
    );
    Ok(mapping)
}

/// Parse the calibration, falling back to defaults if it is unusable.
pub fn load_calibration() -> CalibrationProfile {
    let mut buf = [0u8; MAX_DOCUMENT_LEN];
    let profile = match copy_document(CALIBRATION_JSON, &mut buf) {
        Ok(doc) => CalibrationProfile::from_json_or_default(doc),
        Err(e) => {
            warn!("calibration unusable ({}), using defaults", e);
            CalibrationProfile::default()
        }
    };
    info!("calibration deadzone policy {}", profile.deadzone_policy);
    profile
}

fn copy_document<'b>(doc: &[u8], buf: &'b mut [u8]) -> Result<&'b mut [u8], ConfigError> {
    let dst = buf.get_mut(..doc.len()).ok_or(ConfigError::TooLong)?;
    dst.copy_from_slice(doc);
    Ok(dst)
}
