//! USB HID gamepad output implementation.

use embassy_rp::peripherals::USB;
use embassy_rp::usb::Driver;
use embassy_usb::class::hid::{HidWriter, ReportId, RequestHandler, State};
use embassy_usb::control::OutResponse;
use embassy_usb::driver::EndpointError;
use embassy_usb::Builder;
use gamepad_core::{GamepadReport, OutputError, ReportSink, REPORT_DESCRIPTOR};

/// HID writer for the 9-byte gamepad report.
pub type GamepadWriter<'d> = HidWriter<'d, Driver<'d, USB>, { GamepadReport::SIZE }>;

/// Gamepad reports over the HID interrupt IN endpoint.
pub struct UsbHidOutput<'d> {
    writer: GamepadWriter<'d>,
}

impl<'d> UsbHidOutput<'d> {
    pub fn new(writer: GamepadWriter<'d>) -> Self {
        Self { writer }
    }

    /// Wait until the host has configured the device.
    pub async fn wait_ready(&mut self) {
        self.writer.ready().await;
    }
}

impl<'d> ReportSink for UsbHidOutput<'d> {
    async fn send(&mut self, report: &GamepadReport) -> Result<(), OutputError> {
        self.writer
            .write(&report.as_bytes())
            .await
            .map_err(|err| match err {
                EndpointError::Disabled => OutputError::NotReady,
                _ => OutputError::Dropped,
            })
    }
}

/// HID request handler.
///
/// The device has no output or feature reports: SET_REPORT is accepted and
/// ignored, GET_REPORT is not supported.
pub struct GamepadRequestHandler;

impl RequestHandler for GamepadRequestHandler {
    fn get_report(&mut self, _id: ReportId, _buf: &mut [u8]) -> Option<usize> {
        None
    }

    fn set_report(&mut self, _id: ReportId, _data: &[u8]) -> OutResponse {
        OutResponse::Accepted
    }

    fn set_idle_ms(&mut self, _id: Option<ReportId>, _duration_ms: u32) {}

    fn get_idle_ms(&mut self, _id: Option<ReportId>) -> Option<u32> {
        None
    }
}

/// Configure the USB HID class in the USB builder.
///
/// Returns the HID writer for use by the application.
pub fn configure_usb_hid<'d>(
    builder: &mut Builder<'d, Driver<'d, USB>>,
    state: &'d mut State<'d>,
    handler: &'d mut GamepadRequestHandler,
) -> GamepadWriter<'d> {
    let config = embassy_usb::class::hid::Config {
        report_descriptor: REPORT_DESCRIPTOR,
        request_handler: Some(handler),
        poll_ms: 1,
        max_packet_size: 16,
        hid_subclass: embassy_usb::class::hid::HidSubclass::No,
        hid_boot_protocol: embassy_usb::class::hid::HidBootProtocol::None,
    };

    HidWriter::new(builder, state, config)
}
