//! Audio flags bitfield

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Mono output
pub const AUDIO_CHANNEL_MONO: u32 = 0x0000_0001;
/// Surround output
pub const AUDIO_CHANNEL_SURROUND: u32 = 0x0000_0002;
/// Channel configuration field (bits 0-1)
pub const AUDIO_CHANNEL_MASK: u32 = 0x0000_0003;
/// Dolby Digital passthrough
pub const AUDIO_ENCODING_AC3: u32 = 0x0001_0000;
/// DTS passthrough
pub const AUDIO_ENCODING_DTS: u32 = 0x0002_0000;
/// Encoding field (bits 16-17)
pub const AUDIO_ENCODING_MASK: u32 = 0x0003_0000;

const ENCODING_SHIFT: u32 = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChannelConfig {
    Stereo,
    Mono,
    Surround,
}

impl ChannelConfig {
    pub const fn label(self) -> &'static str {
        match self {
            ChannelConfig::Stereo => "Stereo",
            ChannelConfig::Mono => "Mono",
            ChannelConfig::Surround => "Surround",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AudioEncoding {
    None,
    Ac3,
    Dts,
    Ac3Dts,
}

impl AudioEncoding {
    pub const fn label(self) -> &'static str {
        match self {
            AudioEncoding::None => "None",
            AudioEncoding::Ac3 => "AC3",
            AudioEncoding::Dts => "DTS",
            AudioEncoding::Ac3Dts => "AC3 / DTS",
        }
    }
}

/// Audio settings DWORD
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AudioFlags(pub u32);

impl AudioFlags {
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Channel configuration; the mono bit wins over surround
    pub fn channel(self) -> ChannelConfig {
        if self.0 & AUDIO_CHANNEL_MONO != 0 {
            ChannelConfig::Mono
        } else if self.0 & AUDIO_CHANNEL_SURROUND != 0 {
            ChannelConfig::Surround
        } else {
            ChannelConfig::Stereo
        }
    }

    /// Stereo -> mono -> surround -> stereo
    pub fn step_channel(&mut self) {
        let index = ((self.0 & AUDIO_CHANNEL_MASK) + 1) % 3;
        self.0 = (self.0 & !AUDIO_CHANNEL_MASK) | index;
    }

    pub fn encoding(self) -> AudioEncoding {
        match (self.0 & AUDIO_ENCODING_MASK) >> ENCODING_SHIFT {
            0 => AudioEncoding::None,
            1 => AudioEncoding::Ac3,
            2 => AudioEncoding::Dts,
            _ => AudioEncoding::Ac3Dts,
        }
    }

    /// None -> AC3 -> DTS -> AC3+DTS -> none
    pub fn step_encoding(&mut self) {
        let index = (((self.0 & AUDIO_ENCODING_MASK) >> ENCODING_SHIFT) + 1) % 4;
        self.0 = (self.0 & !AUDIO_ENCODING_MASK) | (index << ENCODING_SHIFT);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_cycle() {
        let mut flags = AudioFlags(AUDIO_ENCODING_DTS);
        flags.step_channel();
        assert_eq!(flags.channel(), ChannelConfig::Mono);
        flags.step_channel();
        assert_eq!(flags.channel(), ChannelConfig::Surround);
        flags.step_channel();
        assert_eq!(flags.channel(), ChannelConfig::Stereo);
        assert_eq!(flags, AudioFlags(AUDIO_ENCODING_DTS));
    }

    #[test]
    fn test_channel_out_of_range_wraps() {
        // index 3 is not reachable by stepping but may be stored
        let mut flags = AudioFlags(0x3);
        flags.step_channel();
        assert_eq!(flags.bits(), 0x1);
    }

    #[test]
    fn test_encoding_cycle() {
        let mut flags = AudioFlags(AUDIO_CHANNEL_SURROUND);
        let expected = [
            AudioEncoding::Ac3,
            AudioEncoding::Dts,
            AudioEncoding::Ac3Dts,
            AudioEncoding::None,
        ];
        for encoding in expected {
            flags.step_encoding();
            assert_eq!(flags.encoding(), encoding);
            assert_eq!(flags.channel(), ChannelConfig::Surround);
        }
    }

    #[test]
    fn test_encoding_bits() {
        let mut flags = AudioFlags::default();
        flags.step_encoding();
        assert_eq!(flags.bits(), AUDIO_ENCODING_AC3);
        flags.step_encoding();
        assert_eq!(flags.bits(), AUDIO_ENCODING_DTS);
        flags.step_encoding();
        assert_eq!(flags.bits(), AUDIO_ENCODING_AC3 | AUDIO_ENCODING_DTS);
    }
}
