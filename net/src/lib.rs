//! Ethernet engine of the serial-to-Ethernet bridge.
//!
//! Wraps an Ethernet MAC driver with a smoltcp IP stack and implements the
//! run loop's network seams on top of it: DHCP lease client, single-shot
//! DNS resolver and interface configuration. All storage (socket slots,
//! DNS query slots, frame buffers) is caller-owned or inline; nothing here
//! allocates after construction.
//!
//! # Components
//!
//! - [`EthDriver`] - MAC driver interface all NICs implement
//! - [`EthAdapter`] - Bridges an `EthDriver` to smoltcp's `Device` trait
//! - [`NetStack`] - IP stack with the lease/resolve step functions

#![no_std]

pub mod adapter;
pub mod driver;
pub mod stack;

pub use adapter::EthAdapter;
pub use driver::{EthDriver, RxError, TxError};
pub use stack::{parse_ipv4, NetStack, Timeouts};
