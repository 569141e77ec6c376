//! Run-loop orchestrator
//!
//! Cooperative, non-preemptive main loop of the serial-to-Ethernet bridge:
//! the startup state machine (hardware bring-up, DHCP address acquisition,
//! DNS name resolution, device-status transitions) interleaved with the
//! management-protocol pump, followed by the steady-state loop.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │              Board entry point (out of tree)                │
//! │  Calls bring_up(), then run_steady() — never returns        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │              sebridge-runloop (this crate)                  │
//! │  orchestrator ── run_phase ── sequencers ── traits          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!         ┌────────────────────┼────────────────────┐
//!         ▼                    ▼                    ▼
//!   sebridge-net        management pump        data bridge
//!   (lease / DNS)       (collaborator)         (collaborator)
//! ```
//!
//! # Modules
//!
//! - `traits` - Collaborator seams (lease client, resolver, pumps, board)
//! - `context` - Shared run context passed to every phase step
//! - `phase` - Sequencer trait, phase scheduler and the two sequencers
//! - `orchestrator` - Bring-up sequence (`bring_up`)
//! - `steady` - Steady-state iteration building block and `run_steady`
//!
//! # Liveness
//!
//! Every sequencer suspends only by returning after one unit of protocol
//! work; the phase scheduler pumps the management protocol after every
//! unit, so a configuration client never observes the device as
//! unresponsive, even mid-acquisition.

#![no_std]

pub mod context;
pub mod orchestrator;
pub mod phase;
pub mod steady;
pub mod traits;

pub use context::RunContext;
pub use orchestrator::bring_up;
pub use phase::{
    run_phase, AddressAcquisition, NameResolution, PhaseOutcome, Sequencer, SequencerStep,
    LEASE_MAX_RETRIES, RESOLVE_MAX_RETRIES,
};
pub use steady::{run_steady, steady_iteration};
pub use traits::{
    Board, BridgePump, ConfigStore, LeaseClient, LeaseStep, ManagementPump, NameResolver,
    NetInterface, ResolveStep,
};
