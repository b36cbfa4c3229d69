//! Non-volatile settings abstractions
//!
//! Provides the keyed settings store exposed by the platform kernel. Each
//! setting is a small blob tagged with a registry-style type.

use heapless::Vec;

/// Largest setting value the editor ever reads or writes
pub const MAX_SETTING_LEN: usize = 16;

/// Keys for the settings the editor touches
///
/// User settings live below `0x100`, factory settings start at `0x100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u32)]
pub enum SettingKey {
    /// Time zone bias in minutes (DWORD)
    TimeZoneBias = 0x00,
    /// Dashboard language index (DWORD)
    Language = 0x07,
    /// Video flags bitfield (DWORD)
    Video = 0x08,
    /// Audio flags bitfield (DWORD)
    Audio = 0x09,
    /// DVD playback region (DWORD)
    DvdRegion = 0x12,
    /// Factory Ethernet MAC address (6 bytes)
    FactoryEthernetAddr = 0x101,
    /// Factory AV region (DWORD)
    FactoryAvRegion = 0x103,
    /// Factory game region (DWORD)
    FactoryGameRegion = 0x104,
}

impl SettingKey {
    /// Get the key as its raw index
    pub fn as_u32(self) -> u32 {
        self as u32
    }

    /// Whether this key addresses the factory section
    pub fn is_factory(self) -> bool {
        self.as_u32() >= 0x100
    }
}

/// Type tag attached to a stored setting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u32)]
pub enum SettingType {
    /// Raw byte blob
    Binary = 3,
    /// 32-bit little-endian integer
    Dword = 4,
}

/// A setting as returned by [`SettingsStore::query`]
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SettingValue {
    /// Type tag reported by the store
    pub kind: SettingType,
    /// Stored bytes
    pub data: Vec<u8, MAX_SETTING_LEN>,
}

impl SettingValue {
    /// Build a value from raw bytes
    pub fn new(kind: SettingType, data: &[u8]) -> Result<Self, StoreError> {
        let mut buf = Vec::new();
        buf.extend_from_slice(data)
            .map_err(|_| StoreError::BufferTooSmall)?;
        Ok(Self { kind, data: buf })
    }

    /// Build a DWORD value
    pub fn dword(value: u32) -> Self {
        let mut data = Vec::new();
        // 4 bytes always fit
        let _ = data.extend_from_slice(&value.to_le_bytes());
        Self {
            kind: SettingType::Dword,
            data,
        }
    }

    /// Interpret the value as a DWORD
    ///
    /// Fails if the tag is not [`SettingType::Dword`] or fewer than four
    /// bytes were stored.
    pub fn as_dword(&self) -> Result<u32, StoreError> {
        if self.kind != SettingType::Dword {
            return Err(StoreError::TypeMismatch);
        }
        let bytes: [u8; 4] = self
            .data
            .get(..4)
            .and_then(|b| b.try_into().ok())
            .ok_or(StoreError::BufferTooSmall)?;
        Ok(u32::from_le_bytes(bytes))
    }
}

/// Errors from settings store operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StoreError {
    /// Key not present (common on a fresh image)
    NotFound,
    /// Stored type tag differs from the expected one
    TypeMismatch,
    /// Value shorter or longer than expected
    BufferTooSmall,
    /// The settings service reported a failure
    Io,
}

/// Keyed non-volatile settings store
///
/// Implementations wrap the platform's settings service. Calls are
/// synchronous and complete before returning.
pub trait SettingsStore {
    /// Read a setting by key
    fn query(&mut self, key: SettingKey) -> Result<SettingValue, StoreError>;

    /// Write a setting by key
    ///
    /// # Arguments
    /// * `key` - The setting to write
    /// * `kind` - Type tag stored alongside the data
    /// * `data` - Raw value bytes
    ///
    /// The factory section is read-only through the store; saving a key
    /// for which [`SettingKey::is_factory`] holds must fail.
    fn save(&mut self, key: SettingKey, kind: SettingType, data: &[u8]) -> Result<(), StoreError>;
}

impl<T: SettingsStore + ?Sized> SettingsStore for &mut T {
    fn query(&mut self, key: SettingKey) -> Result<SettingValue, StoreError> {
        (**self).query(key)
    }

    fn save(&mut self, key: SettingKey, kind: SettingType, data: &[u8]) -> Result<(), StoreError> {
        (**self).save(key, kind, data)
    }
}
