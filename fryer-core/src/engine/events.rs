//! Engine notifications

use heapless::Vec;

/// Wire code for [`CookEvent::PreheatComplete`]
pub const PREHEAT_COMPLETE_CODE: i16 = -1;

/// Wire code for [`CookEvent::EngineStopped`]
pub const ENGINE_STOPPED_CODE: i16 = -2;

/// Notifications emitted by the cook engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CookEvent {
    /// The step with this index finished
    StepComplete(u8),
    /// Preheat target reached for the first time in this run
    PreheatComplete,
    /// The run ended (finished, stopped by the user, or preheat timeout)
    EngineStopped,
}

impl CookEvent {
    /// Encode as a single integer: step index, or a negative sentinel
    pub fn code(self) -> i16 {
        match self {
            CookEvent::StepComplete(index) => index as i16,
            CookEvent::PreheatComplete => PREHEAT_COMPLETE_CODE,
            CookEvent::EngineStopped => ENGINE_STOPPED_CODE,
        }
    }

    /// Decode an integer produced by [`CookEvent::code`]
    pub fn from_code(code: i16) -> Option<Self> {
        match code {
            PREHEAT_COMPLETE_CODE => Some(CookEvent::PreheatComplete),
            ENGINE_STOPPED_CODE => Some(CookEvent::EngineStopped),
            0..=255 => Some(CookEvent::StepComplete(code as u8)),
            _ => None,
        }
    }

    /// Check if this event ends a run
    pub fn is_terminal(self) -> bool {
        self == CookEvent::EngineStopped
    }
}

/// Receiver of engine notifications
///
/// Called synchronously from inside [`crate::CookEngine::poll`] and
/// [`crate::CookEngine::stop`]. The sink is owned by the engine, so it
/// cannot call back into it.
pub trait EventSink {
    /// Handle one notification
    fn notify(&mut self, event: CookEvent);
}

impl<F: FnMut(CookEvent)> EventSink for F {
    fn notify(&mut self, event: CookEvent) {
        self(event)
    }
}

/// Collects events; anything past capacity is dropped
impl<const N: usize> EventSink for Vec<CookEvent, N> {
    fn notify(&mut self, event: CookEvent) {
        let _ = self.push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes() {
        assert_eq!(CookEvent::StepComplete(3).code(), 3);
        assert_eq!(CookEvent::PreheatComplete.code(), -1);
        assert_eq!(CookEvent::EngineStopped.code(), -2);

        assert_eq!(CookEvent::from_code(0), Some(CookEvent::StepComplete(0)));
        assert_eq!(CookEvent::from_code(-1), Some(CookEvent::PreheatComplete));
        assert_eq!(CookEvent::from_code(-2), Some(CookEvent::EngineStopped));
        assert_eq!(CookEvent::from_code(-3), None);
        assert_eq!(CookEvent::from_code(256), None);
    }

    #[test]
    fn test_terminal() {
        assert!(CookEvent::EngineStopped.is_terminal());
        assert!(!CookEvent::StepComplete(0).is_terminal());
        assert!(!CookEvent::PreheatComplete.is_terminal());
    }

    #[test]
    fn test_closure_sink() {
        let mut beeps = 0;
        {
            let mut sink = |event: CookEvent| {
                if let CookEvent::StepComplete(_) = event {
                    beeps += 1;
                }
            };
            sink.notify(CookEvent::StepComplete(0));
            sink.notify(CookEvent::EngineStopped);
        }
        assert_eq!(beeps, 1);
    }

    #[test]
    fn test_vec_sink_drops_overflow() {
        let mut sink: Vec<CookEvent, 2> = Vec::new();
        sink.notify(CookEvent::StepComplete(0));
        sink.notify(CookEvent::StepComplete(1));
        sink.notify(CookEvent::EngineStopped);
        assert_eq!(
            sink.as_slice(),
            &[CookEvent::StepComplete(0), CookEvent::StepComplete(1)]
        );
    }
}
