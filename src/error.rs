//! Error types for the mt7915-eeprom crate.

use crate::types::InitState;

/// The error type for EEPROM operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The backing byte store could not be created.
    #[error("EEPROM store allocation failed: {0}")]
    Allocation(String),

    /// The image signature does not identify an MT7915.
    #[error("invalid EEPROM image: signature 0x{found:04x}, expected 0x7915")]
    InvalidImage {
        /// The signature word actually read.
        found: u16,
    },

    /// Invalid argument(s) were provided.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// The operation does not apply in the device's current init state.
    #[error("operation not valid in state {0:?}")]
    InvalidState(InitState),
}

/// A specialized `Result` type for EEPROM operations.
pub type Result<T> = std::result::Result<T, Error>;
