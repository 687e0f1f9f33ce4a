//! Byte-addressable storage abstractions
//!
//! Models an EEPROM-like device: individually addressable bytes with a
//! limited number of write cycles per cell. Implementations are synchronous
//! and run to completion before returning.

/// Errors from byte store operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EepromError {
    /// Address lies beyond the end of the device
    OutOfBounds,
    /// The device rejected the write
    WriteFailed,
}

/// Byte-addressable non-volatile storage
pub trait ByteStore {
    /// Error type for device operations
    type Error;

    /// Device size in bytes
    fn size(&self) -> usize;

    /// Read `buffer.len()` bytes starting at `address`
    fn read(&mut self, address: usize, buffer: &mut [u8]) -> Result<(), Self::Error>;

    /// Write a single byte unconditionally
    fn write_byte(&mut self, address: usize, value: u8) -> Result<(), Self::Error>;

    /// Read a single byte
    fn read_byte(&mut self, address: usize) -> Result<u8, Self::Error> {
        let mut buf = [0u8; 1];
        self.read(address, &mut buf)?;
        Ok(buf[0])
    }

    /// Write a byte only if it differs from the stored value
    ///
    /// Returns `true` if a write cycle was spent.
    fn update_byte(&mut self, address: usize, value: u8) -> Result<bool, Self::Error> {
        if self.read_byte(address)? == value {
            return Ok(false);
        }
        self.write_byte(address, value)?;
        Ok(true)
    }

    /// Update a run of bytes starting at `address`
    ///
    /// Returns the number of bytes that were actually written.
    fn update(&mut self, address: usize, data: &[u8]) -> Result<usize, Self::Error> {
        let mut written = 0;
        for (offset, &value) in data.iter().enumerate() {
            if self.update_byte(address + offset, value)? {
                written += 1;
            }
        }
        Ok(written)
    }
}
