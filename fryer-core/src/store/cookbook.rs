//! Program bank on a byte store
//!
//! The cookbook maps slot indices to fixed-width records and guards the
//! whole bank with the check token. Every byte goes through
//! [`ByteStore::update_byte`], so rewriting identical data costs no write
//! cycles.

use fryer_hal::ByteStore;

use super::codec::{decode_record, default_program, encode_record, DecodeError, RecordImage};
use super::layout::{address, capacity_for, CHECK_TOKEN, RECORD_SIZE, TOKEN_LEN};
use crate::program::CookProgram;

/// Errors from cookbook operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StoreError<E> {
    /// Slot index is not below the capacity
    SlotOutOfRange,
    /// Stored record is malformed
    Decode(DecodeError),
    /// The underlying device failed
    Device(E),
}

/// Bank of cook programs in a byte store
pub struct Cookbook<B> {
    store: B,
    /// Bytes of the device reserved for the bank
    budget: usize,
    /// Number of record slots in the budget
    capacity: usize,
}

impl<B: ByteStore> Cookbook<B> {
    /// Use the whole device for the bank
    pub fn new(store: B) -> Self {
        let budget = store.size();
        Self::with_budget(store, budget)
    }

    /// Reserve `budget` bytes from the start of the device
    ///
    /// The budget is clamped to the device size.
    pub fn with_budget(store: B, budget: usize) -> Self {
        let budget = budget.min(store.size());
        Self {
            store,
            budget,
            capacity: capacity_for(budget),
        }
    }

    /// Number of program slots
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Bytes reserved for the bank
    pub fn budget(&self) -> usize {
        self.budget
    }

    /// Byte address of a slot's record
    pub fn address(&self, slot: usize) -> usize {
        address(slot)
    }

    /// Check if the store carries the current check token
    ///
    /// False on a blank device, after an interrupted initialization, or
    /// after a format change.
    pub fn is_valid(&mut self) -> Result<bool, StoreError<B::Error>> {
        if self.budget < TOKEN_LEN {
            return Ok(false);
        }

        let mut token = [0u8; TOKEN_LEN];
        self.store.read(0, &mut token).map_err(StoreError::Device)?;
        Ok(token == CHECK_TOKEN)
    }

    /// Read the program in `slot`
    pub fn read(&mut self, slot: usize) -> Result<CookProgram, StoreError<B::Error>> {
        self.check_slot(slot)?;

        let mut bytes = [0u8; RECORD_SIZE];
        self.store
            .read(address(slot), &mut bytes)
            .map_err(StoreError::Device)?;

        decode_record(&bytes).map_err(|e| {
            warn!("slot {} unreadable: {}", slot, e);
            StoreError::Decode(e)
        })
    }

    /// Store `program` in `slot`
    ///
    /// Writes the name with its terminator, the control bytes and the used
    /// steps. Returns the number of bytes that actually changed.
    pub fn write(
        &mut self,
        slot: usize,
        program: &CookProgram,
    ) -> Result<usize, StoreError<B::Error>> {
        self.check_slot(slot)?;

        let written = self.write_image(slot, &encode_record(program))?;
        debug!("slot {} saved, {} bytes changed", slot, written);
        Ok(written)
    }

    /// Initialize every slot unless the store is already valid
    ///
    /// With `force`, reinitializes a valid store too. The check token is
    /// removed before the first slot is touched and written back only after
    /// the last one, so an interrupted run is detected on the next boot.
    /// Returns `true` if the bank was reinitialized.
    pub fn initialize_if_needed(&mut self, force: bool) -> Result<bool, StoreError<B::Error>> {
        let valid = self.is_valid()?;
        if valid && !force {
            return Ok(false);
        }

        if self.budget < TOKEN_LEN {
            return Ok(false);
        }

        info!("initializing {} program slots", self.capacity);

        if valid {
            self.store
                .update_byte(0, !CHECK_TOKEN[0])
                .map_err(StoreError::Device)?;
        }

        for slot in 0..self.capacity {
            self.write_image(slot, &encode_record(&default_program(slot)))?;
        }

        self.store
            .update(0, &CHECK_TOKEN)
            .map_err(StoreError::Device)?;

        Ok(true)
    }

    fn write_image(
        &mut self,
        slot: usize,
        image: &RecordImage,
    ) -> Result<usize, StoreError<B::Error>> {
        let base = address(slot);
        let bytes = image.as_bytes();

        let mut written = 0;
        for span in image.spans() {
            written += self
                .store
                .update(base + span.start, &bytes[span])
                .map_err(StoreError::Device)?;
        }
        Ok(written)
    }

    fn check_slot(&self, slot: usize) -> Result<(), StoreError<B::Error>> {
        if slot < self.capacity {
            Ok(())
        } else {
            Err(StoreError::SlotOutOfRange)
        }
    }

    /// Get access to the underlying store
    pub fn store(&self) -> &B {
        &self.store
    }

    /// Get mutable access to the underlying store
    pub fn store_mut(&mut self) -> &mut B {
        &mut self.store
    }

    /// Release the underlying store
    pub fn into_inner(self) -> B {
        self.store
    }
}
