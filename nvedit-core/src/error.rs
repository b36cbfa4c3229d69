//! Apply errors

use nvedit_hal::{SmBusError, StoreError};

/// Reasons an apply did not complete
///
/// The session stays dirty after any of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ApplyError {
    /// A setting write failed under [`crate::config::WriteFailurePolicy::Propagate`]
    Store(StoreError),
    /// An EEPROM byte could not be transferred
    ConfigMemory {
        /// Absolute EEPROM offset of the failing byte
        offset: u8,
        error: SmBusError,
    },
    /// The configured factory location does not fit in the EEPROM
    BlockOutOfRange,
}

impl ApplyError {
    /// Whether running apply again may succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            ApplyError::Store(e) => matches!(e, StoreError::Io),
            ApplyError::ConfigMemory { error, .. } => error.is_retryable(),
            ApplyError::BlockOutOfRange => false,
        }
    }
}

impl From<StoreError> for ApplyError {
    fn from(e: StoreError) -> Self {
        ApplyError::Store(e)
    }
}
