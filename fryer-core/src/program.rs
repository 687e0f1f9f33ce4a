//! Cook program data model
//!
//! A program is a named list of timed steps plus a preheat flag. Programs
//! are edited on the device, persisted by the [`crate::store::Cookbook`] and
//! executed by the [`crate::engine::CookEngine`].

use heapless::{String, Vec};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Maximum steps per program
///
/// Part of the storage check token: changing it invalidates every stored
/// program.
pub const MAX_STEPS: usize = 5;

/// Name field size in bytes, including the terminator slot
pub const NAME_CAPACITY: usize = 15;

/// Longest name that still leaves room for the terminator
pub const MAX_NAME_LEN: usize = NAME_CAPACITY - 1;

/// Errors from program editing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ProgramError {
    /// Name does not fit the name field
    NameTooLong,
    /// Program already holds `MAX_STEPS` steps
    TooManySteps,
    /// Name contains a NUL byte, which terminates the stored name
    InvalidName,
}

/// One timed phase of a cook program
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CookStep {
    /// Step length in seconds
    pub duration_s: u16,
    /// Target temperature in °C (0 = no heating, fan off)
    pub target_c: u8,
    /// Sound the buzzer when this step completes
    pub beep: bool,
}

impl CookStep {
    /// Create a new step
    pub const fn new(duration_s: u16, target_c: u8, beep: bool) -> Self {
        Self {
            duration_s,
            target_c,
            beep,
        }
    }

    /// Check if this step actively heats
    pub const fn is_heating(&self) -> bool {
        self.target_c > 0
    }
}

/// A user-editable cook program
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CookProgram {
    /// Display name
    pub name: String<MAX_NAME_LEN>,
    /// Hold step timing until the first target is reached
    pub preheat: bool,
    /// Steps in execution order
    pub steps: Vec<CookStep, MAX_STEPS>,
}

impl CookProgram {
    /// Create an empty program with the given name
    pub fn new(name: &str) -> Result<Self, ProgramError> {
        let mut program = Self::default();
        program.set_name(name)?;
        Ok(program)
    }

    /// Create a program from a step list
    pub fn with_steps(name: &str, preheat: bool, steps: &[CookStep]) -> Result<Self, ProgramError> {
        let mut program = Self::new(name)?;
        program.preheat = preheat;
        program
            .steps
            .extend_from_slice(steps)
            .map_err(|_| ProgramError::TooManySteps)?;
        Ok(program)
    }

    /// Replace the program name
    pub fn set_name(&mut self, name: &str) -> Result<(), ProgramError> {
        if name.len() > MAX_NAME_LEN {
            return Err(ProgramError::NameTooLong);
        }
        if name.contains('\0') {
            return Err(ProgramError::InvalidName);
        }
        self.name.clear();
        self.name
            .push_str(name)
            .map_err(|_| ProgramError::NameTooLong)
    }

    /// Append a step
    pub fn push_step(&mut self, step: CookStep) -> Result<(), ProgramError> {
        self.steps.push(step).map_err(|_| ProgramError::TooManySteps)
    }

    /// Remove and return the step at `index`, shifting later steps down
    pub fn remove_step(&mut self, index: usize) -> Option<CookStep> {
        if index < self.steps.len() {
            Some(self.steps.remove(index))
        } else {
            None
        }
    }

    /// Get a step by index
    pub fn step(&self, index: usize) -> Option<&CookStep> {
        self.steps.get(index)
    }

    /// Get a mutable step by index
    pub fn step_mut(&mut self, index: usize) -> Option<&mut CookStep> {
        self.steps.get_mut(index)
    }

    /// All steps in execution order
    pub fn steps(&self) -> &[CookStep] {
        &self.steps
    }

    /// Number of steps in the program
    pub fn steps_count(&self) -> usize {
        self.steps.len()
    }

    /// Total cook time in seconds, excluding preheat
    pub fn total_duration_s(&self) -> u32 {
        self.steps.iter().map(|s| s.duration_s as u32).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_steps() {
        let program = CookProgram::with_steps(
            "Fries",
            true,
            &[CookStep::new(600, 180, false), CookStep::new(120, 200, true)],
        )
        .unwrap();

        assert_eq!(program.name.as_str(), "Fries");
        assert!(program.preheat);
        assert_eq!(program.steps_count(), 2);
        assert_eq!(program.total_duration_s(), 720);
        assert_eq!(program.step(1), Some(&CookStep::new(120, 200, true)));
        assert_eq!(program.step(2), None);
    }

    #[test]
    fn test_name_limit() {
        // 14 bytes fits, 15 does not
        assert!(CookProgram::new("Chicken wings!").is_ok());
        assert_eq!(
            CookProgram::new("Chicken nuggets").unwrap_err(),
            ProgramError::NameTooLong
        );

        let mut program = CookProgram::new("Old").unwrap();
        assert_eq!(program.set_name("far too long a name"), Err(ProgramError::NameTooLong));
        assert_eq!(program.name.as_str(), "Old");
    }

    #[test]
    fn test_name_rejects_nul() {
        assert_eq!(CookProgram::new("a\0b").unwrap_err(), ProgramError::InvalidName);
        assert_eq!(CookProgram::new("\0").unwrap_err(), ProgramError::InvalidName);

        let mut program = CookProgram::new("Fries").unwrap();
        assert_eq!(program.set_name("Fr\0es"), Err(ProgramError::InvalidName));
        assert_eq!(program.name.as_str(), "Fries");
    }

    #[test]
    fn test_step_limit() {
        let mut program = CookProgram::new("Full").unwrap();
        for _ in 0..MAX_STEPS {
            program.push_step(CookStep::new(10, 100, false)).unwrap();
        }
        assert_eq!(
            program.push_step(CookStep::new(10, 100, false)),
            Err(ProgramError::TooManySteps)
        );

        let too_many = [CookStep::default(); MAX_STEPS + 1];
        assert_eq!(
            CookProgram::with_steps("x", false, &too_many).unwrap_err(),
            ProgramError::TooManySteps
        );
    }

    #[test]
    fn test_edit_steps() {
        let mut program = CookProgram::with_steps(
            "Edit",
            false,
            &[
                CookStep::new(10, 100, false),
                CookStep::new(20, 0, false),
                CookStep::new(30, 150, true),
            ],
        )
        .unwrap();

        if let Some(step) = program.step_mut(0) {
            step.target_c = 120;
        }
        assert_eq!(program.steps()[0].target_c, 120);

        assert_eq!(program.remove_step(1), Some(CookStep::new(20, 0, false)));
        assert_eq!(program.steps_count(), 2);
        assert_eq!(program.steps()[1].duration_s, 30);
        assert_eq!(program.remove_step(5), None);
    }

    #[test]
    fn test_heating_flag() {
        assert!(CookStep::new(10, 1, false).is_heating());
        assert!(!CookStep::new(10, 0, false).is_heating());
    }
}
