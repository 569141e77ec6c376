//! Collaborator seams.
//!
//! The run loop consumes its collaborators through these narrow traits;
//! everything behind them (wire protocols, peripheral registers, flash
//! layout) is out of scope here and assumed correct. Every method of the
//! pump and step traits must return after a bounded, small amount of work —
//! the loop's latency rests on that contract.

use sebridge_core::{BringUpResult, DeviceConfig, NetProfile};
use sebridge_hwio::TriggerProbe;

/// Result of one lease-protocol step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaseStep {
    /// Address leased (assign and renew take the same action).
    Leased,
    /// No event yet; the protocol step re-sends on its own schedule.
    Pending,
    /// Step-level timeout; counts against the phase retry bound.
    Failed,
}

/// Result of one name-resolution step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveStep {
    /// Name resolved to an IPv4 address.
    Resolved([u8; 4]),
    /// Query outstanding.
    Pending,
    /// Step-level timeout or negative answer; counts against the bound.
    Failed,
}

/// DHCP lease client.
///
/// Buffer binding and assign/renew/conflict callback registration happen
/// inside the implementation; the run loop only drives steps.
pub trait LeaseClient {
    /// Arm the client for a fresh acquisition.
    fn begin(&mut self);

    /// One unit of lease-protocol work. MUST NOT block.
    fn step(&mut self) -> LeaseStep;

    /// Stop the client after retry exhaustion.
    fn stop(&mut self);
}

/// Single-shot DNS resolver.
pub trait NameResolver {
    /// One unit of query work against `server` for `host`. MUST NOT block.
    fn query_step(&mut self, server: [u8; 4], host: &str) -> ResolveStep;
}

/// Network interface configuration owned by the Ethernet engine.
pub trait NetInterface {
    /// Program the MAC address.
    fn set_mac(&mut self, mac: [u8; 6]);

    /// Apply a static profile (DHCP disabled, or lease fallback).
    fn apply_static(&mut self, net: &NetProfile);

    /// Currently applied profile (leased or static).
    fn profile(&self) -> NetProfile;

    /// Physical link state.
    fn link_up(&self) -> bool;
}

/// Management/configuration-protocol pump.
///
/// # Contract
/// - processes at most one pending configuration-client request per call
/// - MUST return immediately when nothing is pending
pub trait ManagementPump {
    fn pump(&mut self);
}

/// Serial-to-Ethernet data-bridge pump.
///
/// # Contract
/// - forwards at most the currently available bytes
/// - MUST NOT block
pub trait BridgePump {
    fn pump(&mut self);
}

/// Persisted-configuration loader. Called once at bring-up.
pub trait ConfigStore {
    fn load(&mut self) -> BringUpResult<DeviceConfig>;
}

/// Board bring-up: peripheral init plus the boot-time trigger probe.
pub trait Board: TriggerProbe {
    /// Bring up clocks, UARTs, GPIO and the Ethernet engine.
    fn init_hardware(&mut self);
}
