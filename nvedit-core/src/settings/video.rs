//! Video flags bitfield

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Widescreen aspect
pub const VIDEO_WIDESCREEN: u32 = 0x0001_0000;
/// 720p output allowed
pub const VIDEO_MODE_720P: u32 = 0x0002_0000;
/// 1080i output allowed
pub const VIDEO_MODE_1080I: u32 = 0x0004_0000;
/// 480p output allowed
pub const VIDEO_MODE_480P: u32 = 0x0008_0000;
/// Letterbox aspect
pub const VIDEO_LETTERBOX: u32 = 0x0010_0000;
/// 50Hz refresh
pub const VIDEO_50HZ: u32 = 0x0040_0000;
/// 60Hz refresh
pub const VIDEO_60HZ: u32 = 0x0080_0000;

const REFRESH_SHIFT: u32 = 22;
const REFRESH_MASK: u32 = VIDEO_50HZ | VIDEO_60HZ;

/// Aspect ratio, encoded in the widescreen and letterbox bits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AspectRatio {
    Normal,
    Widescreen,
    Letterbox,
}

impl AspectRatio {
    pub const fn label(self) -> &'static str {
        match self {
            AspectRatio::Normal => "Normal",
            AspectRatio::Widescreen => "Widescreen",
            AspectRatio::Letterbox => "Letterbox",
        }
    }
}

/// Allowed refresh rates (bits 22-23)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RefreshRate {
    Unset,
    Hz50,
    Hz60,
    Hz50And60,
}

impl RefreshRate {
    fn from_index(index: u32) -> Self {
        match index & 0x03 {
            0 => RefreshRate::Unset,
            1 => RefreshRate::Hz50,
            2 => RefreshRate::Hz60,
            _ => RefreshRate::Hz50And60,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            RefreshRate::Unset => "Not set",
            RefreshRate::Hz50 => "50Hz",
            RefreshRate::Hz60 => "60Hz",
            RefreshRate::Hz50And60 => "50Hz / 60Hz",
        }
    }
}

/// Independently toggled output modes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum VideoMode {
    P480,
    P720,
    I1080,
}

impl VideoMode {
    pub const fn bit(self) -> u32 {
        match self {
            VideoMode::P480 => VIDEO_MODE_480P,
            VideoMode::P720 => VIDEO_MODE_720P,
            VideoMode::I1080 => VIDEO_MODE_1080I,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            VideoMode::P480 => "480p",
            VideoMode::P720 => "720p",
            VideoMode::I1080 => "1080i",
        }
    }
}

/// Video settings DWORD
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VideoFlags(pub u32);

impl VideoFlags {
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Current aspect ratio; widescreen wins if both bits are set
    pub fn aspect(self) -> AspectRatio {
        if self.0 & VIDEO_WIDESCREEN != 0 {
            AspectRatio::Widescreen
        } else if self.0 & VIDEO_LETTERBOX != 0 {
            AspectRatio::Letterbox
        } else {
            AspectRatio::Normal
        }
    }

    /// Widescreen -> letterbox -> normal -> widescreen
    pub fn step_aspect(&mut self) {
        match self.aspect() {
            AspectRatio::Widescreen => {
                self.0 &= !VIDEO_WIDESCREEN;
                self.0 |= VIDEO_LETTERBOX;
            }
            AspectRatio::Letterbox => self.0 &= !VIDEO_LETTERBOX,
            AspectRatio::Normal => self.0 |= VIDEO_WIDESCREEN,
        }
    }

    pub fn refresh_rate(self) -> RefreshRate {
        RefreshRate::from_index(self.refresh_index())
    }

    fn refresh_index(self) -> u32 {
        (self.0 & REFRESH_MASK) >> REFRESH_SHIFT
    }

    /// Advance the 2-bit refresh field, leaving every other bit alone
    pub fn step_refresh_rate(&mut self) {
        let index = (self.refresh_index() + 1) % 4;
        self.0 = (self.0 & !REFRESH_MASK) | (index << REFRESH_SHIFT);
    }

    pub fn is_enabled(self, mode: VideoMode) -> bool {
        self.0 & mode.bit() != 0
    }

    pub fn toggle(&mut self, mode: VideoMode) {
        self.0 ^= mode.bit();
    }
}
