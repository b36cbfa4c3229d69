//! Settings store adapter
//!
//! Loads the snapshot from the keyed settings store and writes the scalar
//! user settings back. Factory values (AV region, MAC) are read here but
//! written through [`crate::factory`], since the settings service cannot
//! write the factory section.

use nvedit_hal::{SettingKey, SettingType, SettingsStore, StoreError};

use crate::config::{ReadFailurePolicy, WriteFailurePolicy};
use crate::settings::{AudioFlags, MacAddress, SettingsSnapshot, VideoFlags};

/// Number of settings written by [`save`]
pub const SAVED_SETTING_COUNT: usize = 5;

/// Read a snapshot from the store
///
/// With [`ReadFailurePolicy::UseDefault`] a field that cannot be read keeps
/// its zero value.
pub fn load<S: SettingsStore>(
    store: &mut S,
    policy: ReadFailurePolicy,
) -> Result<SettingsSnapshot, StoreError> {
    let mut snapshot = SettingsSnapshot::default();

    if let Some(v) = read_dword(store, SettingKey::DvdRegion, policy)? {
        snapshot.dvd_region = (v & 0xFF) as u8;
    }
    if let Some(v) = read_dword(store, SettingKey::Language, policy)? {
        snapshot.language = (v & 0xFF) as u8;
    }
    if let Some(v) = read_dword(store, SettingKey::Video, policy)? {
        snapshot.video_flags = VideoFlags(v);
    }
    if let Some(v) = read_dword(store, SettingKey::Audio, policy)? {
        snapshot.audio_flags = AudioFlags(v);
    }
    if let Some(v) = read_dword(store, SettingKey::FactoryAvRegion, policy)? {
        snapshot.av_region = v;
    }
    if let Some(v) = read_dword(store, SettingKey::TimeZoneBias, policy)? {
        snapshot.time_zone_bias = v as i32;
    }
    if let Some(v) = read_dword(store, SettingKey::FactoryGameRegion, policy)? {
        snapshot.game_region = v;
    }
    if let Some(mac) = read_mac(store, policy)? {
        snapshot.mac_address = mac;
    }

    Ok(snapshot)
}

/// Write the scalar user settings
///
/// Issues exactly [`SAVED_SETTING_COUNT`] saves unless a failure aborts
/// under [`WriteFailurePolicy::Propagate`]. Returns the number of saves
/// issued.
pub fn save<S: SettingsStore>(
    store: &mut S,
    snapshot: &SettingsSnapshot,
    policy: WriteFailurePolicy,
) -> Result<usize, StoreError> {
    let values: [(SettingKey, u32); SAVED_SETTING_COUNT] = [
        (SettingKey::DvdRegion, snapshot.dvd_region as u32),
        (SettingKey::Language, snapshot.language as u32),
        (SettingKey::Video, snapshot.video_flags.bits()),
        (SettingKey::Audio, snapshot.audio_flags.bits()),
        (SettingKey::TimeZoneBias, snapshot.time_zone_bias as u32),
    ];

    let mut issued = 0;
    for (key, value) in values {
        issued += 1;
        match store.save(key, SettingType::Dword, &value.to_le_bytes()) {
            Ok(()) => {}
            Err(e) if policy == WriteFailurePolicy::Propagate => return Err(e),
            Err(_e) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("Ignoring failed save of {}: {}", key, _e);
            }
        }
    }

    Ok(issued)
}

fn read_dword<S: SettingsStore>(
    store: &mut S,
    key: SettingKey,
    policy: ReadFailurePolicy,
) -> Result<Option<u32>, StoreError> {
    let result = store.query(key).and_then(|value| value.as_dword());
    handle_read(key, result, policy)
}

fn read_mac<S: SettingsStore>(
    store: &mut S,
    policy: ReadFailurePolicy,
) -> Result<Option<MacAddress>, StoreError> {
    let key = SettingKey::FactoryEthernetAddr;
    let result = store.query(key).and_then(|value| {
        if value.kind != SettingType::Binary {
            return Err(StoreError::TypeMismatch);
        }
        let octets: [u8; 6] = value
            .data
            .as_slice()
            .try_into()
            .map_err(|_| StoreError::BufferTooSmall)?;
        Ok(MacAddress(octets))
    });
    handle_read(key, result, policy)
}

fn handle_read<T>(
    _key: SettingKey,
    result: Result<T, StoreError>,
    policy: ReadFailurePolicy,
) -> Result<Option<T>, StoreError> {
    match result {
        Ok(v) => Ok(Some(v)),
        Err(e) if policy == ReadFailurePolicy::Propagate => Err(e),
        Err(_e) => {
            #[cfg(feature = "defmt")]
            defmt::warn!("Setting {} unreadable ({}), using default", _key, _e);
            Ok(None)
        }
    }
}
