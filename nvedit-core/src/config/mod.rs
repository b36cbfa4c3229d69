//! Editor configuration
//!
//! Where the factory block lives and how device failures are treated.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// SMBus address of the configuration EEPROM
pub const EEPROM_DEVICE_ADDRESS: u8 = 0xA8;

/// Offset of the factory block inside the EEPROM
pub const EEPROM_FACTORY_OFFSET: u8 = 0x30;

/// What to do when a setting cannot be read at load time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ReadFailurePolicy {
    /// Leave the field zeroed; missing keys are normal on a fresh image
    #[default]
    UseDefault,
    /// Abort the load with the store error
    Propagate,
}

/// What to do when a setting cannot be written at apply time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum WriteFailurePolicy {
    /// Log and carry on with the next setting
    #[default]
    Ignore,
    /// Abort apply with the store error
    Propagate,
}

/// Location of the factory block on the bus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FactoryLocation {
    /// 8-bit SMBus device address
    pub device_address: u8,
    /// Offset of the first block byte
    pub base_offset: u8,
}

impl Default for FactoryLocation {
    fn default() -> Self {
        Self::EEPROM
    }
}

impl FactoryLocation {
    /// Factory section of the on-board EEPROM
    pub const EEPROM: Self = Self {
        device_address: EEPROM_DEVICE_ADDRESS,
        base_offset: EEPROM_FACTORY_OFFSET,
    };
}

/// Editor configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EditorConfig {
    pub read_failure: ReadFailurePolicy,
    pub write_failure: WriteFailurePolicy,
    pub factory: FactoryLocation,
    /// Extra attempts per EEPROM byte after a retryable bus error
    pub byte_retries: u8,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorConfig {
    /// Firmware-compatible behavior: store failures are swallowed
    pub const fn new() -> Self {
        Self {
            read_failure: ReadFailurePolicy::UseDefault,
            write_failure: WriteFailurePolicy::Ignore,
            factory: FactoryLocation::EEPROM,
            byte_retries: 2,
        }
    }

    /// Every store failure is reported
    pub const STRICT: Self = Self {
        read_failure: ReadFailurePolicy::Propagate,
        write_failure: WriteFailurePolicy::Propagate,
        factory: FactoryLocation::EEPROM,
        byte_retries: 2,
    };
}
