//! Record encoding and decoding
//!
//! Pure functions over fixed-size byte buffers; the cookbook moves the
//! buffers to and from the device.

use core::fmt::Write;
use core::ops::Range;

use heapless::{String, Vec};

use super::layout::{
    step_offset, PREHEAT_OFFSET, RECORD_SIZE, STEPS_COUNT_OFFSET, STEPS_OFFSET, STEP_WIDTH,
};
use crate::program::{CookProgram, CookStep, MAX_NAME_LEN, MAX_STEPS, NAME_CAPACITY};

/// Prefix of the names given to freshly initialized slots
pub const DEFAULT_NAME_PREFIX: &str = "Custom ";

/// Errors from decoding a stored record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DecodeError {
    /// No NUL byte inside the name field
    MissingTerminator,
    /// Name bytes are not valid UTF-8
    InvalidName,
    /// Steps count exceeds `MAX_STEPS`
    TooManySteps,
}

/// Encode a step into its fixed-width form
pub fn encode_step(step: &CookStep) -> [u8; STEP_WIDTH] {
    let duration = step.duration_s.to_le_bytes();
    [duration[0], duration[1], step.target_c, step.beep as u8]
}

/// Decode a step from its fixed-width form
pub fn decode_step(bytes: &[u8; STEP_WIDTH]) -> CookStep {
    CookStep {
        duration_s: u16::from_le_bytes([bytes[0], bytes[1]]),
        target_c: bytes[2],
        beep: bytes[3] != 0,
    }
}

/// Encoded record plus the byte ranges a write has to touch
///
/// Only the name up to and including its terminator, the two control
/// bytes and the used steps are meaningful; the rest of the image is zero
/// and is never written, so bytes past a short name or past the last step
/// keep whatever the slot held before.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordImage {
    bytes: [u8; RECORD_SIZE],
    name_len: usize,
    steps_count: usize,
}

impl RecordImage {
    /// Full record image
    pub fn as_bytes(&self) -> &[u8; RECORD_SIZE] {
        &self.bytes
    }

    /// Name bytes including the terminator
    pub fn name_span(&self) -> Range<usize> {
        0..self.name_len + 1
    }

    /// Control bytes followed by the used steps
    pub fn body_span(&self) -> Range<usize> {
        PREHEAT_OFFSET..step_offset(self.steps_count)
    }

    /// Ranges to write, in write order
    pub fn spans(&self) -> [Range<usize>; 2] {
        [self.name_span(), self.body_span()]
    }
}

/// Encode a program into a record image
pub fn encode_record(program: &CookProgram) -> RecordImage {
    let mut bytes = [0u8; RECORD_SIZE];

    // Program names are at most NAME_CAPACITY - 1 bytes, the terminator
    // is already zero
    let name = program.name.as_bytes();
    bytes[..name.len()].copy_from_slice(name);

    bytes[PREHEAT_OFFSET] = program.preheat as u8;
    bytes[STEPS_COUNT_OFFSET] = program.steps.len() as u8;

    for (index, step) in program.steps.iter().enumerate() {
        let offset = step_offset(index);
        bytes[offset..offset + STEP_WIDTH].copy_from_slice(&encode_step(step));
    }

    RecordImage {
        bytes,
        name_len: name.len(),
        steps_count: program.steps.len(),
    }
}

/// Decode a record
///
/// Reads exactly as many steps as the stored count says; the remaining
/// step bytes are ignored.
pub fn decode_record(bytes: &[u8; RECORD_SIZE]) -> Result<CookProgram, DecodeError> {
    let name_field = &bytes[..NAME_CAPACITY];
    let name_len = name_field
        .iter()
        .position(|&b| b == 0)
        .ok_or(DecodeError::MissingTerminator)?;
    let name_str =
        core::str::from_utf8(&name_field[..name_len]).map_err(|_| DecodeError::InvalidName)?;

    let mut name: String<MAX_NAME_LEN> = String::new();
    name.push_str(name_str)
        .map_err(|_| DecodeError::InvalidName)?;

    let steps_count = bytes[STEPS_COUNT_OFFSET] as usize;
    if steps_count > MAX_STEPS {
        return Err(DecodeError::TooManySteps);
    }

    let mut steps: Vec<CookStep, MAX_STEPS> = Vec::new();
    for chunk in bytes[STEPS_OFFSET..]
        .chunks_exact(STEP_WIDTH)
        .take(steps_count)
    {
        let mut raw = [0u8; STEP_WIDTH];
        raw.copy_from_slice(chunk);
        steps
            .push(decode_step(&raw))
            .map_err(|_| DecodeError::TooManySteps)?;
    }

    Ok(CookProgram {
        name,
        preheat: bytes[PREHEAT_OFFSET] != 0,
        steps,
    })
}

/// Program written to `slot` on initialization
///
/// Named "Custom N" (1-based), preheat off, `MAX_STEPS` empty steps.
pub fn default_program(slot: usize) -> CookProgram {
    let mut name: String<MAX_NAME_LEN> = String::new();
    let _ = write!(name, "{}{}", DEFAULT_NAME_PREFIX, slot + 1);

    let mut steps: Vec<CookStep, MAX_STEPS> = Vec::new();
    let _ = steps.extend_from_slice(&[CookStep::default(); MAX_STEPS]);

    CookProgram {
        name,
        preheat: false,
        steps,
    }
}
