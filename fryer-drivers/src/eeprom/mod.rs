//! Byte store implementations

mod ram;

pub use ram::RamEeprom;
