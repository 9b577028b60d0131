//! Wire types for the GPIO gamepad's USB HID input report.
//!
//! This crate owns everything the host sees:
//!
//! - [`Buttons`] - 16-bit button bitfield with the fixed slot layout
//! - [`Hat`] - 8-way hat switch value plus neutral
//! - [`GamepadReport`] - the 9-byte input report
//! - [`REPORT_DESCRIPTOR`] - the HID report descriptor the report conforms to
//!
//! # Report Layout
//!
//! ```text
//! byte 0   buttons, bits 0-7
//! byte 1   buttons, bits 8-15
//! byte 2   hat (low nibble, 0-7 = N..NW clockwise, 8 = neutral), high nibble 0
//! byte 3   LX  (0-255, 128 = center)
//! byte 4   LY
//! byte 5   RX
//! byte 6   RY
//! byte 7   LT  (0-255, 0 = released)
//! byte 8   RT
//! ```
//!
//! # Example
//!
//! ```
//! use gamepad_report::{Buttons, GamepadReport, Hat};
//!
//! let report = GamepadReport {
//!     buttons: Buttons::A | Buttons::START,
//!     hat: Hat::from_dpad(true, false, false, true),
//!     ..GamepadReport::neutral()
//! };
//!
//! let bytes = report.as_bytes();
//! assert_eq!(bytes.len(), GamepadReport::SIZE);
//! assert_eq!(bytes[2], 1); // up-right
//! ```
//!
//! # Features
//!
//! - **`std`**: Enable standard library support (for host testing)
//! - **`defmt`**: Enable defmt formatting (for embedded logging)

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate std;

pub mod buttons;
pub mod descriptor;
pub mod hat;
pub mod report;

pub use buttons::{Buttons, CANONICAL_BUTTONS, MAX_BUTTONS};
pub use descriptor::REPORT_DESCRIPTOR;
pub use hat::Hat;
pub use report::{GamepadReport, ReportError, AXIS_CENTER, TRIGGER_REST};
