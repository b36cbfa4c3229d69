//! Ethernet MAC address

use core::fmt;

use rand_core::RngCore;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Vendor bytes 1-2 seen on retail units
pub const VENDOR_PREFIXES: [[u8; 2]; 3] = [[0x50, 0xF2], [0x0D, 0x3A], [0x12, 0x5A]];

/// Six-byte MAC address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MacAddress(pub [u8; 6]);

impl MacAddress {
    /// Generate a plausible console address
    ///
    /// Byte 0 is always zero, bytes 1-2 are one of [`VENDOR_PREFIXES`] and
    /// the last three bytes are random.
    pub fn generate<R: RngCore + ?Sized>(rng: &mut R) -> Self {
        let pick = (u64::from(rng.next_u32()) * VENDOR_PREFIXES.len() as u64) >> 32;
        let prefix = VENDOR_PREFIXES[pick as usize];
        let mut tail = [0u8; 3];
        rng.fill_bytes(&mut tail);
        Self([0x00, prefix[0], prefix[1], tail[0], tail[1], tail[2]])
    }

    pub const fn octets(&self) -> &[u8; 6] {
        &self.0
    }
}

impl From<[u8; 6]> for MacAddress {
    fn from(octets: [u8; 6]) -> Self {
        Self(octets)
    }
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(f, "{a:02x}:{b:02x}:{c:02x}:{d:02x}:{e:02x}:{g:02x}")
    }
}
