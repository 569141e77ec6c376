//! Device status and cross-loop flags.
//!
//! The device runs a single non-preemptive loop; the only state shared with
//! interrupt context are the `DiagFlag` cells, which are single-writer from
//! the interrupt and single-reader from the loop.

use core::sync::atomic::{AtomicBool, Ordering};

/// Coarse device state a management client can query.
///
/// `Acquiring` covers the whole of each network-identity phase (DHCP, DNS);
/// every exit path of a phase restores `Operational`, so a management
/// session always observes a terminal status once a phase ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceStatus {
    /// Busy acquiring network identity; background handlers limited.
    Acquiring,
    /// Normal operation; full protocol behavior available.
    Operational,
}

impl DeviceStatus {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Acquiring => "ACQUIRING",
            Self::Operational => "OPERATIONAL",
        }
    }
}

/// Session flags owned by the run context.
///
/// Plain bools: only the orchestrator thread touches them.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatusFlags {
    /// DHCP phase completed with a lease this session.
    pub lease_acquired: bool,
    /// DNS phase resolved the remote host this session.
    pub name_resolved: bool,
    /// Bring-up finished; steady-state loop entered.
    pub app_running: bool,
    /// Hardware trigger pin latched low at boot (immutable afterwards).
    pub trigger_latched: bool,
}

/// One-shot diagnostic flag: set by an interrupt, cleared by the loop.
///
/// Safe without a lock: the interrupt only sets, the loop only clears,
/// and the cell is a single word.
#[derive(Debug)]
pub struct DiagFlag(AtomicBool);

impl DiagFlag {
    pub const fn new() -> Self {
        Self(AtomicBool::new(false))
    }

    /// Interrupt side: mark the event. Idempotent.
    pub fn raise(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Loop side: read and clear in one step. Idempotent when clear.
    pub fn take(&self) -> bool {
        self.0.swap(false, Ordering::SeqCst)
    }

    /// Peek without clearing.
    pub fn is_raised(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

impl Default for DiagFlag {
    fn default() -> Self {
        Self::new()
    }
}

/// Diagnostic flags drained once per steady-state iteration.
#[derive(Debug, Default)]
pub struct DiagFlags {
    /// UART receive ring buffer overflowed.
    pub rx_overflow: DiagFlag,
    /// Physical link state changed.
    pub link_changed: DiagFlag,
}

impl DiagFlags {
    pub const fn new() -> Self {
        Self {
            rx_overflow: DiagFlag::new(),
            link_changed: DiagFlag::new(),
        }
    }
}
