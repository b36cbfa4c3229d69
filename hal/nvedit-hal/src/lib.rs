//! nvedit device capabilities
//!
//! This crate defines the two device-level capabilities the settings editor
//! consumes. Platform ports implement them; the editor core only ever talks
//! to these traits.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  nvedit-core (session, codec, menu)     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  nvedit-hal (this crate - traits)       │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ kernel NV     │       │ SMBus EEPROM  │
//! │ settings API  │       │ (I2C master)  │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`settings::SettingsStore`] - Keyed non-volatile settings
//! - [`smbus::SmBus`] - Byte-addressed configuration memory

#![no_std]
#![deny(unsafe_code)]

#[cfg(feature = "mock")]
extern crate alloc;

#[cfg(feature = "mock")]
pub mod mock;
pub mod settings;
pub mod smbus;

// Re-export key traits at crate root for convenience
pub use settings::{SettingKey, SettingType, SettingValue, SettingsStore, StoreError};
pub use smbus::{I2cSmBus, SmBus, SmBusError};
