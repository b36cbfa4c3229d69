//! Settings session
//!
//! Owns the snapshot for one menu session and tracks whether it differs
//! from what was last persisted. Every mutator is in-memory only and marks
//! the session dirty; [`SettingsSession::apply`] is the only operation that
//! writes to devices.

use nvedit_hal::{SettingsStore, SmBus, StoreError};
use rand_core::RngCore;

use crate::config::EditorConfig;
use crate::error::ApplyError;
use crate::factory::{self, FACTORY_BLOCK_SIZE};
use crate::settings::{
    next_dvd_region, next_language, next_time_zone, AvRegion, GameRegion, MacAddress,
    SettingsSnapshot, VideoMode,
};
use crate::store;

/// A steppable setting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Setting {
    DvdRegion,
    Language,
    GameRegion,
    AvRegion,
    AspectRatio,
    RefreshRate,
    VideoMode(VideoMode),
    AudioChannel,
    AudioEncoding,
    MacAddress,
    TimeZone,
}

/// What a successful apply did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ApplyReport {
    /// Settings store saves issued
    pub settings_saved: usize,
    /// EEPROM bytes read
    pub bytes_read: usize,
    /// EEPROM bytes written
    pub bytes_written: usize,
    /// Checksum written to the factory block
    pub checksum: u32,
}

/// One menu session's view of the settings
#[derive(Debug, Clone)]
pub struct SettingsSession {
    snapshot: SettingsSnapshot,
    dirty: bool,
    config: EditorConfig,
}

impl SettingsSession {
    /// Start a clean session from an existing snapshot
    pub fn new(snapshot: SettingsSnapshot, config: EditorConfig) -> Self {
        Self {
            snapshot,
            dirty: false,
            config,
        }
    }

    /// Load the snapshot from the store and start a clean session
    pub fn activate<S: SettingsStore>(
        store: &mut S,
        config: EditorConfig,
    ) -> Result<Self, StoreError> {
        let snapshot = store::load(store, config.read_failure)?;

        #[cfg(feature = "defmt")]
        defmt::info!("Settings loaded: {}", snapshot);

        Ok(Self::new(snapshot, config))
    }

    pub fn snapshot(&self) -> &SettingsSnapshot {
        &self.snapshot
    }

    /// Whether any mutator ran since the last successful apply
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    fn touch(&mut self) {
        self.dirty = true;
    }

    pub fn increment_dvd_region(&mut self) {
        self.snapshot.dvd_region = next_dvd_region(self.snapshot.dvd_region);
        self.touch();
    }

    pub fn increment_language(&mut self) {
        self.snapshot.language = next_language(self.snapshot.language);
        self.touch();
    }

    pub fn increment_game_region(&mut self) {
        self.snapshot.game_region = GameRegion::successor_of(self.snapshot.game_region).as_raw();
        self.touch();
    }

    pub fn increment_av_region(&mut self) {
        self.snapshot.av_region = AvRegion::successor_of(self.snapshot.av_region).as_raw();
        self.touch();
    }

    pub fn increment_aspect_ratio(&mut self) {
        self.snapshot.video_flags.step_aspect();
        self.touch();
    }

    pub fn increment_refresh_rate(&mut self) {
        self.snapshot.video_flags.step_refresh_rate();
        self.touch();
    }

    pub fn toggle_video_mode(&mut self, mode: VideoMode) {
        self.snapshot.video_flags.toggle(mode);
        self.touch();
    }

    pub fn increment_audio_channel(&mut self) {
        self.snapshot.audio_flags.step_channel();
        self.touch();
    }

    pub fn increment_audio_encoding(&mut self) {
        self.snapshot.audio_flags.step_encoding();
        self.touch();
    }

    pub fn regenerate_mac_address<R: RngCore + ?Sized>(&mut self, rng: &mut R) {
        self.snapshot.mac_address = MacAddress::generate(rng);
        self.touch();
    }

    pub fn increment_time_zone(&mut self) {
        self.snapshot.time_zone_bias = next_time_zone(self.snapshot.time_zone_bias);
        self.touch();
    }

    /// Step one setting; `rng` is only drawn from for the MAC address
    pub fn step<R: RngCore + ?Sized>(&mut self, setting: Setting, rng: &mut R) {
        match setting {
            Setting::DvdRegion => self.increment_dvd_region(),
            Setting::Language => self.increment_language(),
            Setting::GameRegion => self.increment_game_region(),
            Setting::AvRegion => self.increment_av_region(),
            Setting::AspectRatio => self.increment_aspect_ratio(),
            Setting::RefreshRate => self.increment_refresh_rate(),
            Setting::VideoMode(mode) => self.toggle_video_mode(mode),
            Setting::AudioChannel => self.increment_audio_channel(),
            Setting::AudioEncoding => self.increment_audio_encoding(),
            Setting::MacAddress => self.regenerate_mac_address(rng),
            Setting::TimeZone => self.increment_time_zone(),
        }
    }

    /// Persist the snapshot
    ///
    /// Saves the scalar settings, then rewrites the factory block with the
    /// current AV region and MAC address. The dirty flag is cleared only if
    /// every step succeeded.
    pub fn apply<S: SettingsStore, B: SmBus>(
        &mut self,
        store: &mut S,
        bus: &mut B,
    ) -> Result<ApplyReport, ApplyError> {
        #[cfg(feature = "defmt")]
        defmt::info!("Applying settings (dirty={})", self.dirty);

        let settings_saved = store::save(store, &self.snapshot, self.config.write_failure)?;

        let location = self.config.factory;
        let retries = self.config.byte_retries;
        let block = factory::read_block(bus, location, retries)?;
        let written = factory::write_block(
            bus,
            location,
            block,
            self.snapshot.mac_address,
            self.snapshot.av_region,
            retries,
        )?;

        self.dirty = false;

        Ok(ApplyReport {
            settings_saved,
            bytes_read: FACTORY_BLOCK_SIZE,
            bytes_written: FACTORY_BLOCK_SIZE,
            checksum: written.checksum(),
        })
    }
}
