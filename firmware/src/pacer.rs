//! Fixed-rate pacing for the emitter loop.

use embassy_time::{Duration, Ticker};
use gamepad_core::Pacer;

/// [`Pacer`] backed by an `embassy-time` ticker.
///
/// Deadlines follow the previous deadline, not the end of the last tick.
pub struct TickerPacer(Ticker);

impl TickerPacer {
    pub fn every(period: Duration) -> Self {
        Self(Ticker::every(period))
    }
}

impl Pacer for TickerPacer {
    async fn wait(&mut self) {
        self.0.next().await;
    }
}
