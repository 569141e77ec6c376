//! Board I/O layer
//!
//! Thin, board-agnostic traits over the handful of pins the run loop
//! touches, plus the two pure drivers built on them: the boot-time hardware
//! trigger latch and the status indicator (LED) driver. Pin-level register
//! programming lives in the board support code behind these traits.

#![no_std]

pub mod indicator;
pub mod trigger;

pub use indicator::{IndicatorPin, Indicators};
pub use trigger::{latch_trigger, PinLevel, TriggerProbe};
