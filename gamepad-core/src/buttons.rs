//! Button sourcing strategies.
//!
//! Two interchangeable ways to turn per-tick button levels into the report's
//! bitfield, chosen when the emitter is built:
//!
//! - [`PolledButtons`]: the bitfield is the levels, rebuilt every tick.
//! - [`EventButtons`]: each slot is debounced and only accepted edges are
//!   reported, so the emitter can send a report per press/release.

use gamepad_report::{Buttons, MAX_BUTTONS};
use heapless::Vec;

/// Consecutive agreeing samples before an edge is accepted (20 ms at 100 Hz).
pub const DEFAULT_DEBOUNCE_SAMPLES: u8 = 2;

/// A debounced press or release of the button in `slot`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonEvent {
    pub slot: u8,
    pub pressed: bool,
}

impl ButtonEvent {
    /// Apply this transition to a bitfield.
    pub fn apply(&self, buttons: &mut Buttons) {
        buttons.set_slot(usize::from(self.slot), self.pressed);
    }
}

/// Result of feeding one tick of levels to a strategy.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonUpdate {
    /// Complete bitfield for this tick.
    Snapshot(Buttons),
    /// Edges accepted this tick, in slot order. Empty when nothing changed.
    Transitions(Vec<ButtonEvent, MAX_BUTTONS>),
}

/// Turns raw levels into bitfield updates.
pub trait ButtonStrategy {
    /// The emitter sends a report for every transition as well as every tick.
    const EVENT_DRIVEN: bool;

    fn update(&mut self, levels: Buttons) -> ButtonUpdate;
}

/// Bitfield rebuilt from scratch every tick.
#[derive(Clone, Copy, Debug, Default)]
pub struct PolledButtons;

impl ButtonStrategy for PolledButtons {
    const EVENT_DRIVEN: bool = false;

    fn update(&mut self, levels: Buttons) -> ButtonUpdate {
        ButtonUpdate::Snapshot(levels)
    }
}

/// Accepts a level change after `threshold` consecutive samples agree on it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Debouncer {
    stable: bool,
    pending: u8,
    threshold: u8,
}

impl Debouncer {
    /// Starts released. A threshold of 0 is treated as 1.
    #[must_use]
    pub const fn new(threshold: u8) -> Self {
        Self {
            stable: false,
            pending: 0,
            threshold: if threshold == 0 { 1 } else { threshold },
        }
    }

    /// Feed one sample; returns the new level when an edge is accepted.
    pub fn update(&mut self, level: bool) -> Option<bool> {
        if level == self.stable {
            self.pending = 0;
            return None;
        }

        self.pending += 1;
        if self.pending >= self.threshold {
            self.stable = level;
            self.pending = 0;
            Some(level)
        } else {
            None
        }
    }
}

/// Debounced edge detection per slot.
///
/// ```
/// use gamepad_core::buttons::{ButtonEvent, ButtonStrategy, ButtonUpdate, EventButtons};
/// use gamepad_core::Buttons;
///
/// let mut buttons = EventButtons::new(2);
/// assert_eq!(buttons.update(Buttons::X), ButtonUpdate::Transitions(Default::default()));
///
/// let ButtonUpdate::Transitions(events) = buttons.update(Buttons::X) else { unreachable!() };
/// assert_eq!(events.as_slice(), &[ButtonEvent { slot: 2, pressed: true }]);
/// ```
#[derive(Clone, Debug)]
pub struct EventButtons {
    slots: [Debouncer; MAX_BUTTONS],
}

impl EventButtons {
    #[must_use]
    pub const fn new(threshold: u8) -> Self {
        Self {
            slots: [Debouncer::new(threshold); MAX_BUTTONS],
        }
    }
}

impl Default for EventButtons {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE_SAMPLES)
    }
}

impl ButtonStrategy for EventButtons {
    const EVENT_DRIVEN: bool = true;

    fn update(&mut self, levels: Buttons) -> ButtonUpdate {
        let mut events = Vec::new();
        for (slot, debouncer) in self.slots.iter_mut().enumerate() {
            if let Some(pressed) = debouncer.update(levels.is_slot_pressed(slot)) {
                // One debouncer per slot, so at most MAX_BUTTONS events.
                let _ = events.push(ButtonEvent {
                    slot: slot as u8,
                    pressed,
                });
            }
        }
        ButtonUpdate::Transitions(events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transitions(update: ButtonUpdate) -> Vec<ButtonEvent, MAX_BUTTONS> {
        match update {
            ButtonUpdate::Transitions(events) => events,
            ButtonUpdate::Snapshot(_) => panic!("expected transitions"),
        }
    }

    #[test]
    fn test_polled_returns_levels() {
        let mut polled = PolledButtons;
        let levels = Buttons::A | Buttons::R3;
        assert_eq!(polled.update(levels), ButtonUpdate::Snapshot(levels));
        assert_eq!(polled.update(Buttons::NONE), ButtonUpdate::Snapshot(Buttons::NONE));
    }

    #[test]
    fn test_debouncer_needs_consecutive_samples() {
        let mut d = Debouncer::new(2);
        assert_eq!(d.update(true), None);
        assert_eq!(d.update(false), None); // bounce resets
        assert_eq!(d.update(true), None);
        assert_eq!(d.update(true), Some(true));
        assert_eq!(d.update(true), None);
        assert_eq!(d.update(false), None);
        assert_eq!(d.update(false), Some(false));
    }

    #[test]
    fn test_debouncer_zero_threshold_is_immediate() {
        let mut d = Debouncer::new(0);
        assert_eq!(d.update(true), Some(true));
        assert_eq!(d.update(false), Some(false));
    }

    #[test]
    fn test_event_buttons_emit_ordered_edges() {
        let mut buttons = EventButtons::new(1);
        let events = transitions(buttons.update(Buttons::B | Buttons::slot(12)));
        assert_eq!(
            events.as_slice(),
            &[
                ButtonEvent { slot: 1, pressed: true },
                ButtonEvent { slot: 12, pressed: true },
            ]
        );

        let events = transitions(buttons.update(Buttons::slot(12)));
        assert_eq!(events.as_slice(), &[ButtonEvent { slot: 1, pressed: false }]);
        assert_eq!(transitions(buttons.update(Buttons::slot(12))).len(), 0);
    }

    #[test]
    fn test_event_buttons_no_change_is_empty() {
        let mut buttons = EventButtons::default();
        assert!(transitions(buttons.update(Buttons::NONE)).is_empty());
        assert!(transitions(buttons.update(Buttons::NONE)).is_empty());
    }

    #[test]
    fn test_event_apply() {
        let mut bits = Buttons::A;
        ButtonEvent { slot: 3, pressed: true }.apply(&mut bits);
        ButtonEvent { slot: 0, pressed: false }.apply(&mut bits);
        assert_eq!(bits, Buttons::Y);
        assert_eq!(bits.to_le_bytes(), [0b0000_1000, 0]);
    }
}
