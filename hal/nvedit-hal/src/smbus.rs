//! SMBus configuration memory abstractions
//!
//! The factory block lives in an EEPROM on the system management bus. The
//! device protocol is byte-addressed and stateless per call, so the trait
//! exposes exactly one byte per operation.

use embedded_hal::i2c::{Error as _, ErrorKind, I2c};

/// Error from SMBus operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SmBusError {
    /// Device did not acknowledge
    Nack,
    /// Transaction timed out
    Timeout,
    /// Arbitration lost to another master
    ArbitrationLost,
    /// Bus error (misplaced start/stop)
    Bus,
    /// Other error
    Other,
}

impl SmBusError {
    /// Whether repeating the same byte operation may succeed
    pub fn is_retryable(self) -> bool {
        matches!(
            self,
            SmBusError::Nack | SmBusError::Timeout | SmBusError::ArbitrationLost
        )
    }
}

impl From<ErrorKind> for SmBusError {
    fn from(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::Bus => SmBusError::Bus,
            ErrorKind::ArbitrationLoss => SmBusError::ArbitrationLost,
            ErrorKind::NoAcknowledge(_) => SmBusError::Nack,
            _ => SmBusError::Other,
        }
    }
}

/// Byte-addressed SMBus master
///
/// `device` is the 8-bit SMBus address (write form, e.g. `0xA8`) and
/// `offset` the byte command/offset within the device.
pub trait SmBus {
    /// Read one byte at `offset`
    fn read_byte(&mut self, device: u8, offset: u8) -> Result<u8, SmBusError>;

    /// Write one byte at `offset`
    fn write_byte(&mut self, device: u8, offset: u8, value: u8) -> Result<(), SmBusError>;
}

impl<T: SmBus + ?Sized> SmBus for &mut T {
    fn read_byte(&mut self, device: u8, offset: u8) -> Result<u8, SmBusError> {
        (**self).read_byte(device, offset)
    }

    fn write_byte(&mut self, device: u8, offset: u8, value: u8) -> Result<(), SmBusError> {
        (**self).write_byte(device, offset, value)
    }
}

/// [`SmBus`] over any embedded-hal I2C master
///
/// SMBus addresses are given in 8-bit form; the adapter shifts them to the
/// 7-bit address embedded-hal expects. A byte read is a write-read of the
/// offset, a byte write sends `[offset, value]`.
pub struct I2cSmBus<I> {
    i2c: I,
}

impl<I: I2c> I2cSmBus<I> {
    /// Wrap an I2C master
    pub fn new(i2c: I) -> Self {
        Self { i2c }
    }

    /// Release the wrapped I2C master
    pub fn release(self) -> I {
        self.i2c
    }
}

impl<I: I2c> SmBus for I2cSmBus<I> {
    fn read_byte(&mut self, device: u8, offset: u8) -> Result<u8, SmBusError> {
        let mut buf = [0u8; 1];
        self.i2c
            .write_read(device >> 1, &[offset], &mut buf)
            .map_err(|e| SmBusError::from(e.kind()))?;
        Ok(buf[0])
    }

    fn write_byte(&mut self, device: u8, offset: u8, value: u8) -> Result<(), SmBusError> {
        self.i2c
            .write(device >> 1, &[offset, value])
            .map_err(|e| SmBusError::from(e.kind()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::i2c::{ErrorType, NoAcknowledgeSource, Operation};

    #[derive(Debug)]
    struct FakeError(ErrorKind);

    impl embedded_hal::i2c::Error for FakeError {
        fn kind(&self) -> ErrorKind {
            self.0
        }
    }

    /// 256-byte device at 7-bit address 0x54
    struct FakeEeprom {
        mem: [u8; 256],
        fail: Option<ErrorKind>,
    }

    impl ErrorType for FakeEeprom {
        type Error = FakeError;
    }

    impl I2c for FakeEeprom {
        fn transaction(
            &mut self,
            address: u8,
            operations: &mut [Operation<'_>],
        ) -> Result<(), Self::Error> {
            if let Some(kind) = self.fail {
                return Err(FakeError(kind));
            }
            assert_eq!(address, 0x54);
            let mut pointer = 0usize;
            for op in operations {
                match op {
                    Operation::Write(data) => {
                        pointer = data[0] as usize;
                        for (i, b) in data[1..].iter().enumerate() {
                            self.mem[pointer + i] = *b;
                        }
                    }
                    Operation::Read(buf) => {
                        for (i, b) in buf.iter_mut().enumerate() {
                            *b = self.mem[pointer + i];
                        }
                    }
                }
            }
            Ok(())
        }
    }

    #[test]
    fn test_i2c_adapter_read_write() {
        let mut bus = I2cSmBus::new(FakeEeprom {
            mem: [0; 256],
            fail: None,
        });
        bus.write_byte(0xA8, 0x40, 0x5A).unwrap();
        assert_eq!(bus.read_byte(0xA8, 0x40).unwrap(), 0x5A);
        assert_eq!(bus.release().mem[0x40], 0x5A);
    }

    #[test]
    fn test_i2c_adapter_maps_errors() {
        let mut bus = I2cSmBus::new(FakeEeprom {
            mem: [0; 256],
            fail: Some(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address)),
        });
        assert_eq!(bus.read_byte(0xA8, 0), Err(SmBusError::Nack));
    }

    #[test]
    fn test_retryable_errors() {
        assert!(SmBusError::Nack.is_retryable());
        assert!(SmBusError::Timeout.is_retryable());
        assert!(!SmBusError::Bus.is_retryable());
        assert!(!SmBusError::Other.is_retryable());
    }
}
