//! Where finished reports go.

use core::future::Future;
use gamepad_report::GamepadReport;

/// Why a report did not reach the host.
///
/// Neither kind stops the emitter: the failure is counted and the next
/// tick sends a fresh report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OutputError {
    /// The host has not configured the device, or has suspended it.
    #[error("device not ready")]
    NotReady,
    /// The transport refused this report.
    #[error("report dropped")]
    Dropped,
}

/// Destination for assembled reports, one [`GamepadReport`] at a time.
///
/// `send` hands over exactly [`GamepadReport::SIZE`] bytes. It may wait
/// for the transport to take the previous report, and must not retry on
/// its own.
pub trait ReportSink {
    fn send(&mut self, report: &GamepadReport) -> impl Future<Output = Result<(), OutputError>>;
}
