//! GamepadEmitter: samples the registry and sends reports to a sink.

use core::future::Future;

use gamepad_report::{Buttons, GamepadReport, Hat};

use crate::buttons::{ButtonStrategy, ButtonUpdate};
use crate::calibration::AxisCalibrator;
use crate::input::{AnalogInput, DigitalInput};
use crate::output::ReportSink;
use crate::registry::InputRegistry;

/// Delay between emitter ticks.
///
/// The firmware paces with an `embassy-time` ticker at 10 ms.
pub trait Pacer {
    fn wait(&mut self) -> impl Future<Output = ()>;
}

/// What one [`GamepadEmitter::tick`] did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickStats {
    pub sent: u16,
    pub failed: u16,
}

/// Running totals since the emitter was created.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EmitterStats {
    pub reports_sent: u32,
    pub send_failures: u32,
    pub read_faults: u32,
}

/// Owns the inputs, calibration, button strategy, and sink, and runs the
/// report loop.
///
/// Every tick reads all buttons and the D-pad, then sends one report. With
/// an event-driven strategy a report is also sent immediately for every
/// accepted button edge and every hat change. Axes are sampled and
/// calibrated for every report sent.
///
/// # Error Handling
///
/// Send failures are logged and counted; the loop carries on with the next
/// report. Read faults are absorbed by the registry.
pub struct GamepadEmitter<D, A, S, O> {
    registry: InputRegistry<D, A>,
    calibrator: AxisCalibrator,
    strategy: S,
    sink: O,
    buttons: Buttons,
    hat: Hat,
    reports_sent: u32,
    send_failures: u32,
}

impl<D, A, S, O> GamepadEmitter<D, A, S, O>
where
    D: DigitalInput,
    A: AnalogInput,
    S: ButtonStrategy,
    O: ReportSink,
{
    pub fn new(registry: InputRegistry<D, A>, calibrator: AxisCalibrator, strategy: S, sink: O) -> Self {
        Self {
            registry,
            calibrator,
            strategy,
            sink,
            buttons: Buttons::NONE,
            hat: Hat::Neutral,
            reports_sent: 0,
            send_failures: 0,
        }
    }

    /// Send reports forever, waiting on `pacer` between ticks.
    pub async fn run<P: Pacer>(&mut self, pacer: &mut P) -> ! {
        loop {
            self.tick().await;
            pacer.wait().await;
        }
    }

    /// One loop iteration.
    pub async fn tick(&mut self) -> TickStats {
        let mut stats = TickStats::default();

        let levels = self.registry.read_buttons();
        match self.strategy.update(levels) {
            ButtonUpdate::Snapshot(buttons) => self.buttons = buttons,
            ButtonUpdate::Transitions(events) => {
                for event in events {
                    event.apply(&mut self.buttons);
                    if S::EVENT_DRIVEN {
                        self.send(&mut stats).await;
                    }
                }
            }
        }

        let hat = self.registry.read_dpad().hat();
        if hat != self.hat {
            self.hat = hat;
            if S::EVENT_DRIVEN {
                self.send(&mut stats).await;
            }
        }

        self.send(&mut stats).await;
        stats
    }

    /// Assemble a report from the current bitfield and hat and fresh axis samples.
    pub fn assemble(&mut self) -> GamepadReport {
        let axes = self.registry.read_axes(&mut self.calibrator);
        GamepadReport::with_axes(self.buttons, self.hat, axes)
    }

    async fn send(&mut self, stats: &mut TickStats) {
        let report = self.assemble();
        match self.sink.send(&report).await {
            Ok(()) => {
                stats.sent += 1;
                self.reports_sent = self.reports_sent.wrapping_add(1);
            }
            Err(_err) => {
                stats.failed += 1;
                self.send_failures = self.send_failures.wrapping_add(1);
                #[cfg(feature = "defmt")]
                defmt::warn!("report send failed: {}", _err);
            }
        }
    }

    #[must_use]
    pub fn stats(&self) -> EmitterStats {
        EmitterStats {
            reports_sent: self.reports_sent,
            send_failures: self.send_failures,
            read_faults: self.registry.read_faults(),
        }
    }

    /// Button bitfield as last reported.
    #[must_use]
    pub fn buttons(&self) -> Buttons {
        self.buttons
    }

    /// Hat value as last reported.
    #[must_use]
    pub fn hat(&self) -> Hat {
        self.hat
    }

    pub fn sink_mut(&mut self) -> &mut O {
        &mut self.sink
    }
}
