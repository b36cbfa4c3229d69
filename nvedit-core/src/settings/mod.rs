//! Settings snapshot
//!
//! The in-memory copy of every setting the editor shows. Field step rules
//! live on the field types; [`crate::session::SettingsSession`] wraps them
//! with dirty tracking.

pub mod audio;
pub mod mac;
pub mod region;
pub mod video;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub use audio::{AudioEncoding, AudioFlags, ChannelConfig};
pub use mac::MacAddress;
pub use region::{AvRegion, GameRegion};
pub use video::{AspectRatio, RefreshRate, VideoFlags, VideoMode};

/// Number of DVD regions (0 = none, 1-6)
pub const DVD_REGION_COUNT: u8 = 7;

/// Number of dashboard languages (0 = not set, 1-9)
pub const LANGUAGE_COUNT: u8 = 10;

/// Most negative time zone bias in minutes (UTC+12)
pub const TIME_ZONE_MIN: i32 = -720;

/// Most positive time zone bias in minutes (UTC-12)
pub const TIME_ZONE_MAX: i32 = 720;

/// Time zone step in minutes
pub const TIME_ZONE_STEP: i32 = 30;

/// All editable settings
///
/// A zeroed snapshot is what a fresh image with no stored keys loads as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SettingsSnapshot {
    /// DVD region index (0-6)
    pub dvd_region: u8,
    /// Language index (0-9)
    pub language: u8,
    pub video_flags: VideoFlags,
    pub audio_flags: AudioFlags,
    /// Raw factory AV region, see [`AvRegion`]
    pub av_region: u32,
    /// Raw factory game region, see [`GameRegion`]
    pub game_region: u32,
    pub mac_address: MacAddress,
    /// Minutes to add to local time to get UTC
    pub time_zone_bias: i32,
}

impl SettingsSnapshot {
    pub fn av_region(&self) -> Option<AvRegion> {
        AvRegion::from_raw(self.av_region)
    }

    pub fn game_region(&self) -> Option<GameRegion> {
        GameRegion::from_raw(self.game_region)
    }
}

/// Next DVD region index, wrapping after 6
pub fn next_dvd_region(v: u8) -> u8 {
    ((v as u16 + 1) % DVD_REGION_COUNT as u16) as u8
}

/// Next language index, wrapping after 9
pub fn next_language(v: u8) -> u8 {
    ((v as u16 + 1) % LANGUAGE_COUNT as u16) as u8
}

/// Next time zone bias: 30 minutes east, wrapping from below -720 to 720
pub fn next_time_zone(v: i32) -> i32 {
    let next = v.saturating_sub(TIME_ZONE_STEP);
    if next < TIME_ZONE_MIN {
        TIME_ZONE_MAX
    } else {
        next
    }
}
