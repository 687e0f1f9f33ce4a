//! Monotonic time source

/// Monotonic millisecond clock
///
/// Timestamps never decrease. The epoch is arbitrary (typically boot).
pub trait Clock {
    /// Milliseconds since the clock epoch
    fn now_millis(&self) -> u64;
}
