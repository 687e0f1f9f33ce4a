//! RAM-backed EEPROM image
//!
//! Behaves like an on-chip EEPROM of `N` bytes: erased cells read `0xFF`
//! and every physical write is counted so wear can be checked.

use fryer_hal::{ByteStore, EepromError};

/// Value of an erased EEPROM cell
pub const ERASED: u8 = 0xFF;

/// In-memory EEPROM of `N` bytes
#[derive(Debug, Clone)]
pub struct RamEeprom<const N: usize> {
    bytes: [u8; N],
    writes: usize,
}

impl<const N: usize> RamEeprom<N> {
    /// Create an erased device
    pub const fn new() -> Self {
        Self {
            bytes: [ERASED; N],
            writes: 0,
        }
    }

    /// Create a device holding an existing image
    pub const fn from_image(bytes: [u8; N]) -> Self {
        Self { bytes, writes: 0 }
    }

    /// Erase every cell
    pub fn erase(&mut self) {
        self.bytes = [ERASED; N];
    }

    /// Raw device contents
    pub fn as_bytes(&self) -> &[u8; N] {
        &self.bytes
    }

    /// Number of byte writes since creation
    pub fn write_count(&self) -> usize {
        self.writes
    }

    /// Reset the write counter
    pub fn reset_write_count(&mut self) {
        self.writes = 0;
    }
}

impl<const N: usize> Default for RamEeprom<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> ByteStore for RamEeprom<N> {
    type Error = EepromError;

    fn size(&self) -> usize {
        N
    }

    fn read(&mut self, address: usize, buffer: &mut [u8]) -> Result<(), EepromError> {
        let end = address
            .checked_add(buffer.len())
            .ok_or(EepromError::OutOfBounds)?;
        let src = self.bytes.get(address..end).ok_or(EepromError::OutOfBounds)?;
        buffer.copy_from_slice(src);
        Ok(())
    }

    fn write_byte(&mut self, address: usize, value: u8) -> Result<(), EepromError> {
        let cell = self.bytes.get_mut(address).ok_or(EepromError::OutOfBounds)?;
        *cell = value;
        self.writes += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_erased() {
        let mut eeprom = RamEeprom::<16>::new();
        assert_eq!(eeprom.size(), 16);
        assert_eq!(eeprom.read_byte(15), Ok(ERASED));
    }

    #[test]
    fn test_write_counting() {
        let mut eeprom = RamEeprom::<16>::new();
        assert_eq!(eeprom.update(4, &[1, 2, ERASED, 3]), Ok(3));
        assert_eq!(eeprom.write_count(), 3);

        let mut buf = [0u8; 4];
        eeprom.read(4, &mut buf).unwrap();
        assert_eq!(buf, [1, 2, ERASED, 3]);

        eeprom.write_byte(4, 1).unwrap();
        assert_eq!(eeprom.write_count(), 4);

        eeprom.reset_write_count();
        eeprom.erase();
        assert_eq!(eeprom.write_count(), 0);
        assert!(eeprom.as_bytes().iter().all(|&b| b == ERASED));
    }

    #[test]
    fn test_bounds() {
        let mut eeprom = RamEeprom::<16>::new();
        let mut buf = [0u8; 4];
        assert_eq!(eeprom.read(13, &mut buf), Err(EepromError::OutOfBounds));
        assert_eq!(eeprom.read(usize::MAX, &mut buf), Err(EepromError::OutOfBounds));
        assert_eq!(eeprom.write_byte(16, 0), Err(EepromError::OutOfBounds));
        assert_eq!(eeprom.write_count(), 0);
    }
}
