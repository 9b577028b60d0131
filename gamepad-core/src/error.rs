//! Fatal startup errors.

use crate::config::ConfigError;
use crate::pins::UnknownPin;
use crate::registry::RegistryError;

/// Anything that stops the gamepad from starting.
///
/// Nothing here is recoverable at runtime: the firmware reports it and
/// halts. Per-tick faults use [`InputError`](crate::InputError) and
/// [`OutputError`](crate::OutputError) instead.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SetupError {
    #[error(transparent)]
    UnknownPin(#[from] UnknownPin),
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigError),
    /// Mapping resolves, but the pins cannot be wired as asked.
    #[error("invalid wiring: {0}")]
    Wiring(RegistryError),
    /// No HID channel to send reports on.
    #[error("HID transport unavailable")]
    TransportUnavailable,
}

impl From<RegistryError> for SetupError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::UnknownPin(e) => SetupError::UnknownPin(e),
            RegistryError::Config(e) => SetupError::Configuration(e),
            other => SetupError::Wiring(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pins::PICO;

    #[test]
    fn test_registry_errors_map_to_setup_kinds() {
        let unknown = PICO.resolve("D4").unwrap_err();
        assert_eq!(
            SetupError::from(RegistryError::UnknownPin(unknown.clone())),
            SetupError::UnknownPin(unknown)
        );
        assert_eq!(
            SetupError::from(RegistryError::Config(ConfigError::Empty)),
            SetupError::Configuration(ConfigError::Empty)
        );

        let conflict = RegistryError::PinConflict {
            label: "GP2".try_into().unwrap(),
        };
        assert_eq!(SetupError::from(conflict.clone()), SetupError::Wiring(conflict));
    }
}
