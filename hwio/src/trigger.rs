//! Hardware trigger latch.
//!
//! The trigger switch is sampled exactly once per boot, before the loop
//! becomes latency-sensitive; the result is immutable for the rest of the
//! uptime. The pin is active low; only five consecutive low reads latch
//! the trigger, which keeps a floating or bouncing input from triggering
//! a factory reset.

/// Debounce sample count.
const TRIGGER_SAMPLES: u32 = 5;

/// Spacing between debounce samples in milliseconds.
const TRIGGER_SAMPLE_SPACING_MS: u32 = 5;

/// Logic level of an input pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinLevel {
    Low,
    High,
}

/// Boot-time access to the trigger pin and a blocking delay.
///
/// # Contract
/// - `sample` MUST return the current pin level without side effects
/// - `delay_ms` MAY busy-wait; it is only called before the run loop starts
pub trait TriggerProbe {
    /// Read the trigger pin level.
    fn sample(&mut self) -> PinLevel;

    /// Block for `ms` milliseconds.
    fn delay_ms(&mut self, ms: u32);
}

/// Latch the hardware trigger state.
///
/// Samples the pin `5` times at `5 ms` spacing. The pin is active low:
/// any single high sample ends the latch immediately as "not triggered";
/// only an all-low run latches the trigger.
pub fn latch_trigger<P: TriggerProbe>(probe: &mut P) -> bool {
    for _ in 0..TRIGGER_SAMPLES {
        if probe.sample() == PinLevel::High {
            return false;
        }
        probe.delay_ms(TRIGGER_SAMPLE_SPACING_MS);
    }
    true
}
