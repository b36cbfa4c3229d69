//! In-memory capability implementations for host tests
//!
//! Both mocks record every call so tests can assert on the exact device
//! traffic an operation produced.

use alloc::vec::Vec;

use crate::settings::{SettingKey, SettingType, SettingValue, SettingsStore, StoreError};
use crate::smbus::{SmBus, SmBusError};

/// A recorded settings store call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    /// `query(key)`
    Query(SettingKey),
    /// `save(key, kind, data)`
    Save(SettingKey, SettingType, Vec<u8>),
}

/// Settings store backed by a list of entries
///
/// Like the platform store, it refuses saves to factory keys; seed those
/// with [`MockSettingsStore::set`].
#[derive(Debug, Default)]
pub struct MockSettingsStore {
    entries: Vec<(SettingKey, SettingValue)>,
    /// Every call in issue order
    pub calls: Vec<StoreCall>,
    /// Make every `query` fail with this error
    pub fail_queries: Option<StoreError>,
    /// Make every `save` fail with this error
    pub fail_saves: Option<StoreError>,
}

impl MockSettingsStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an entry
    pub fn set(&mut self, key: SettingKey, value: SettingValue) {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Insert or replace a DWORD entry
    pub fn set_dword(&mut self, key: SettingKey, value: u32) {
        self.set(key, SettingValue::dword(value));
    }

    /// Look up an entry without recording a call
    pub fn get(&self, key: SettingKey) -> Option<&SettingValue> {
        self.entries.iter().find(|(k, _)| *k == key).map(|(_, v)| v)
    }

    /// Number of `save` calls recorded
    pub fn save_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, StoreCall::Save(..)))
            .count()
    }
}

impl SettingsStore for MockSettingsStore {
    fn query(&mut self, key: SettingKey) -> Result<SettingValue, StoreError> {
        self.calls.push(StoreCall::Query(key));
        if let Some(err) = self.fail_queries {
            return Err(err);
        }
        self.get(key).cloned().ok_or(StoreError::NotFound)
    }

    fn save(&mut self, key: SettingKey, kind: SettingType, data: &[u8]) -> Result<(), StoreError> {
        self.calls.push(StoreCall::Save(key, kind, data.to_vec()));
        if let Some(err) = self.fail_saves {
            return Err(err);
        }
        if key.is_factory() {
            return Err(StoreError::Io);
        }
        let value = SettingValue::new(kind, data)?;
        self.set(key, value);
        Ok(())
    }
}

/// A recorded SMBus operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusOp {
    /// `read_byte(device, offset)`
    Read { device: u8, offset: u8 },
    /// `write_byte(device, offset, value)`
    Write { device: u8, offset: u8, value: u8 },
}

/// A 256-byte EEPROM on a single SMBus address
#[derive(Debug)]
pub struct MockEeprom {
    /// Device address the EEPROM answers on
    pub device: u8,
    /// Memory contents
    pub memory: [u8; 256],
    /// Every operation in issue order, including failed attempts
    pub ops: Vec<BusOp>,
    /// Offset whose operations fail, with the error and the number of
    /// failures left (`None` = fail forever)
    pub fault: Option<(u8, SmBusError, Option<u8>)>,
}

impl MockEeprom {
    /// Create a zero-filled EEPROM answering on `device`
    pub fn new(device: u8) -> Self {
        Self {
            device,
            memory: [0; 256],
            ops: Vec::new(),
            fault: None,
        }
    }

    /// Copy `data` into memory starting at `offset`
    pub fn load(&mut self, offset: u8, data: &[u8]) {
        let start = offset as usize;
        self.memory[start..start + data.len()].copy_from_slice(data);
    }

    /// Fail operations at `offset` `times` times (`None` = always)
    pub fn fail_at(&mut self, offset: u8, error: SmBusError, times: Option<u8>) {
        self.fault = Some((offset, error, times));
    }

    /// Number of reads recorded
    pub fn read_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, BusOp::Read { .. }))
            .count()
    }

    /// Number of writes recorded
    pub fn write_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, BusOp::Write { .. }))
            .count()
    }

    fn check(&mut self, device: u8, offset: u8) -> Result<(), SmBusError> {
        if device != self.device {
            return Err(SmBusError::Nack);
        }
        if let Some((fault_offset, error, remaining)) = self.fault {
            if fault_offset == offset {
                match remaining {
                    None => return Err(error),
                    Some(0) => self.fault = None,
                    Some(n) => {
                        self.fault = Some((fault_offset, error, Some(n - 1)));
                        return Err(error);
                    }
                }
            }
        }
        Ok(())
    }
}

impl SmBus for MockEeprom {
    fn read_byte(&mut self, device: u8, offset: u8) -> Result<u8, SmBusError> {
        self.ops.push(BusOp::Read { device, offset });
        self.check(device, offset)?;
        Ok(self.memory[offset as usize])
    }

    fn write_byte(&mut self, device: u8, offset: u8, value: u8) -> Result<(), SmBusError> {
        self.ops.push(BusOp::Write {
            device,
            offset,
            value,
        });
        self.check(device, offset)?;
        self.memory[offset as usize] = value;
        Ok(())
    }
}
