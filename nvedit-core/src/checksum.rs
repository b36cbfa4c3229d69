//! Factory block checksum
//!
//! A 32-bit running sum over little-endian words with the carry kept in a
//! separate high half. Stored EEPROM images carry this exact value, so the
//! two-part accumulation must stay bit-for-bit identical.

/// Compute the checksum of `data`
///
/// Bytes past the last whole 32-bit word are ignored.
///
/// # Example
/// ```
/// use nvedit_core::checksum::compute;
/// assert_eq!(compute(&[1, 0, 0, 0, 2, 0, 0, 0]), 0xFFFF_FFFC);
/// ```
pub fn compute(data: &[u8]) -> u32 {
    let mut high: u32 = 0;
    let mut low: u32 = 0;

    for chunk in data.chunks_exact(4) {
        let word = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        let sum = ((high as u64) << 32) | low as u64;

        high = ((sum + word as u64) >> 32) as u32;
        low = low.wrapping_add(word);
    }

    !high.wrapping_add(low)
}

/// Check `data` against a stored checksum
pub fn verify(data: &[u8], expected: u32) -> bool {
    compute(data) == expected
}
