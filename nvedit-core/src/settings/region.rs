//! Video (AV) and game regions
//!
//! Both are stored as raw DWORDs. Only four values of each are meaningful;
//! stepping walks a fixed order and restarts at the first entry when the
//! stored value is not one of them.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Factory AV region
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AvRegion {
    Ntsc,
    NtscJapan,
    Pal,
    /// PAL-M (Brazil)
    PalM,
}

impl AvRegion {
    /// Step order
    pub const CYCLE: [AvRegion; 4] = [
        AvRegion::Ntsc,
        AvRegion::Pal,
        AvRegion::NtscJapan,
        AvRegion::PalM,
    ];

    /// Raw DWORD value
    pub const fn as_raw(self) -> u32 {
        match self {
            AvRegion::Ntsc => 0x0040_0100,
            AvRegion::NtscJapan => 0x0040_0200,
            AvRegion::Pal => 0x0080_0300,
            AvRegion::PalM => 0x0040_0400,
        }
    }

    /// Decode a raw DWORD, `None` if it is not a known region
    pub fn from_raw(raw: u32) -> Option<Self> {
        Self::CYCLE.into_iter().find(|r| r.as_raw() == raw)
    }

    /// Region following `raw` in [`Self::CYCLE`]
    pub fn successor_of(raw: u32) -> Self {
        successor(&Self::CYCLE, raw, Self::as_raw)
    }

    /// Menu label
    pub const fn label(self) -> &'static str {
        match self {
            AvRegion::Ntsc => "NTSC",
            AvRegion::NtscJapan => "NTSC Japan",
            AvRegion::Pal => "PAL",
            AvRegion::PalM => "PAL Brazil",
        }
    }
}

/// Factory game region
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum GameRegion {
    NorthAmerica,
    Japan,
    /// Europe and Australia
    Europe,
    Manufacturing,
}

impl GameRegion {
    /// Step order
    pub const CYCLE: [GameRegion; 4] = [
        GameRegion::NorthAmerica,
        GameRegion::Japan,
        GameRegion::Europe,
        GameRegion::Manufacturing,
    ];

    /// Raw DWORD value
    pub const fn as_raw(self) -> u32 {
        match self {
            GameRegion::NorthAmerica => 0x0000_0001,
            GameRegion::Japan => 0x0000_0002,
            GameRegion::Europe => 0x0000_0004,
            GameRegion::Manufacturing => 0x8000_0000,
        }
    }

    /// Decode a raw DWORD, `None` if it is not a known region
    pub fn from_raw(raw: u32) -> Option<Self> {
        Self::CYCLE.into_iter().find(|r| r.as_raw() == raw)
    }

    /// Region following `raw` in [`Self::CYCLE`]
    pub fn successor_of(raw: u32) -> Self {
        successor(&Self::CYCLE, raw, Self::as_raw)
    }

    /// Menu label
    pub const fn label(self) -> &'static str {
        match self {
            GameRegion::NorthAmerica => "North America",
            GameRegion::Japan => "Japan",
            GameRegion::Europe => "Europe and Australia",
            GameRegion::Manufacturing => "Manufacturing",
        }
    }
}

fn successor<T: Copy>(cycle: &[T; 4], raw: u32, as_raw: fn(T) -> u32) -> T {
    let index = cycle
        .iter()
        .position(|&r| as_raw(r) == raw)
        .map_or(0, |i| (i + 1) % cycle.len());
    cycle[index]
}
