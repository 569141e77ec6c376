//! sebridge core types
//!
//! Leaf crate shared by the run-loop orchestrator and the board/network
//! layers: device configuration, device status, cross-loop flags and the
//! diagnostic ring-buffer log. No heap, no platform code.

#![no_std]

pub mod config;
pub mod diag;
pub mod error;
pub mod status;

pub use config::{DeviceConfig, HostName, NetProfile, OperatingMode};
pub use diag::{
    debug_log, error_log, log_available, log_clear, log_count, log_pop, BootStage, DiagEntry,
    DiagLog,
};
pub use error::{BringUpError, BringUpResult};
pub use status::{DeviceStatus, DiagFlag, DiagFlags, StatusFlags};
