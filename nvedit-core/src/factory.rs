//! Factory block codec
//!
//! The factory section of the EEPROM cannot be written through the
//! settings service, so apply edits it directly: read it one byte at a
//! time, overlay the AV region and MAC address, recompute the checksum and
//! write every byte back in the same order.
//!
//! Block layout (48 bytes, little-endian):
//!
//! | Offset | Size | Field         |
//! |--------|------|---------------|
//! | 0x00   | 4    | checksum      |
//! | 0x04   | 12   | serial number |
//! | 0x10   | 6    | MAC address   |
//! | 0x16   | 2    | padding       |
//! | 0x18   | 16   | online key    |
//! | 0x28   | 4    | AV region     |
//! | 0x2C   | 4    | padding       |
//!
//! Everything but the MAC, AV region and checksum is carried over verbatim
//! from the read.

use core::ops::Range;

use nvedit_hal::{SmBus, SmBusError};

use crate::checksum;
use crate::config::FactoryLocation;
use crate::error::ApplyError;
use crate::settings::MacAddress;

/// Size of the factory block in bytes
pub const FACTORY_BLOCK_SIZE: usize = 0x30;

const CHECKSUM: Range<usize> = 0x00..0x04;
const SERIAL_NUMBER: Range<usize> = 0x04..0x10;
const MAC_ADDRESS: Range<usize> = 0x10..0x16;
const ONLINE_KEY: Range<usize> = 0x18..0x28;
const AV_REGION: Range<usize> = 0x28..0x2C;

/// Raw factory block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FactoryBlock {
    bytes: [u8; FACTORY_BLOCK_SIZE],
}

impl Default for FactoryBlock {
    fn default() -> Self {
        Self {
            bytes: [0; FACTORY_BLOCK_SIZE],
        }
    }
}

impl FactoryBlock {
    pub const fn from_bytes(bytes: [u8; FACTORY_BLOCK_SIZE]) -> Self {
        Self { bytes }
    }

    pub const fn as_bytes(&self) -> &[u8; FACTORY_BLOCK_SIZE] {
        &self.bytes
    }

    /// Stored checksum field
    pub fn checksum(&self) -> u32 {
        self.dword(CHECKSUM)
    }

    pub fn serial_number(&self) -> &[u8] {
        &self.bytes[SERIAL_NUMBER]
    }

    pub fn online_key(&self) -> &[u8] {
        &self.bytes[ONLINE_KEY]
    }

    pub fn mac_address(&self) -> MacAddress {
        let mut octets = [0u8; 6];
        octets.copy_from_slice(&self.bytes[MAC_ADDRESS]);
        MacAddress(octets)
    }

    pub fn set_mac_address(&mut self, mac: MacAddress) {
        self.bytes[MAC_ADDRESS].copy_from_slice(mac.octets());
    }

    /// Raw AV region
    pub fn av_region(&self) -> u32 {
        self.dword(AV_REGION)
    }

    pub fn set_av_region(&mut self, raw: u32) {
        self.bytes[AV_REGION].copy_from_slice(&raw.to_le_bytes());
    }

    /// Bytes covered by the checksum (everything after the checksum field)
    pub fn payload(&self) -> &[u8] {
        &self.bytes[CHECKSUM.end..]
    }

    /// Recompute and store the checksum, returning it
    pub fn seal(&mut self) -> u32 {
        let sum = checksum::compute(self.payload());
        self.bytes[CHECKSUM].copy_from_slice(&sum.to_le_bytes());
        sum
    }

    /// Whether the stored checksum matches the payload
    pub fn is_sealed(&self) -> bool {
        checksum::verify(self.payload(), self.checksum())
    }

    fn dword(&self, range: Range<usize>) -> u32 {
        let mut word = [0u8; 4];
        word.copy_from_slice(&self.bytes[range]);
        u32::from_le_bytes(word)
    }
}

/// Read the factory block, one byte per bus call in ascending order
///
/// Each byte is retried up to `retries` extra times on a retryable bus
/// error.
pub fn read_block<B: SmBus>(
    bus: &mut B,
    location: FactoryLocation,
    retries: u8,
) -> Result<FactoryBlock, ApplyError> {
    check_location(location)?;

    let mut block = FactoryBlock::default();
    for (i, byte) in block.bytes.iter_mut().enumerate() {
        let offset = location.base_offset + i as u8;
        *byte = transfer(retries, offset, || {
            bus.read_byte(location.device_address, offset)
        })?;
    }

    #[cfg(feature = "defmt")]
    defmt::debug!(
        "Read factory block, checksum {=u32:#x} valid={}",
        block.checksum(),
        block.is_sealed()
    );

    Ok(block)
}

/// Overlay the AV region and MAC, reseal, and write the whole block back
///
/// `block` must come from [`read_block`] in the same apply cycle; serial
/// number, online key and padding are written back exactly as read.
/// Returns the block as written.
pub fn write_block<B: SmBus>(
    bus: &mut B,
    location: FactoryLocation,
    mut block: FactoryBlock,
    mac: MacAddress,
    av_region: u32,
    retries: u8,
) -> Result<FactoryBlock, ApplyError> {
    check_location(location)?;

    block.set_av_region(av_region);
    block.set_mac_address(mac);
    let _sum = block.seal();

    for (i, &byte) in block.bytes.iter().enumerate() {
        let offset = location.base_offset + i as u8;
        transfer(retries, offset, || {
            bus.write_byte(location.device_address, offset, byte)
        })?;
    }

    #[cfg(feature = "defmt")]
    defmt::info!("Wrote factory block, checksum {=u32:#x}", _sum);

    Ok(block)
}

fn check_location(location: FactoryLocation) -> Result<(), ApplyError> {
    if location.base_offset as usize + FACTORY_BLOCK_SIZE > 0x100 {
        return Err(ApplyError::BlockOutOfRange);
    }
    Ok(())
}

fn transfer<T>(
    retries: u8,
    offset: u8,
    mut op: impl FnMut() -> Result<T, SmBusError>,
) -> Result<T, ApplyError> {
    let mut attempt = 0;
    loop {
        match op() {
            Ok(v) => return Ok(v),
            Err(error) if error.is_retryable() && attempt < retries => {
                attempt += 1;
                #[cfg(feature = "defmt")]
                defmt::debug!("EEPROM {=u8:#x}: {}, retry {}", offset, error, attempt);
            }
            Err(error) => return Err(ApplyError::ConfigMemory { offset, error }),
        }
    }
}
