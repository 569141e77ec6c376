//! Address acquisition sequencer (DHCP phase).

use sebridge_core::diag::{debug_log, error_log, BootStage};

use super::{PhaseOutcome, Sequencer, SequencerStep};
use crate::context::RunContext;
use crate::traits::{LeaseClient, LeaseStep};

/// Retries allowed after the first failed lease step.
pub const LEASE_MAX_RETRIES: u8 = 3;

/// DHCP address acquisition.
///
/// Arms the lease client on the first step, then maps lease-protocol steps
/// to scheduler steps. Only step-level timeouts count against the retry
/// bound; a pending step is normal protocol progress. After the bound is
/// exceeded the client is stopped exactly once and the phase fails — the
/// caller applies the static fallback.
pub struct AddressAcquisition {
    retries: u8,
    armed: bool,
}

impl AddressAcquisition {
    pub fn new() -> Self {
        Self {
            retries: 0,
            armed: false,
        }
    }

    /// Failed steps consumed so far.
    pub fn retries(&self) -> u8 {
        self.retries
    }
}

impl Default for AddressAcquisition {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: LeaseClient> Sequencer<N> for AddressAcquisition {
    fn step(&mut self, ctx: &mut RunContext, net: &mut N) -> SequencerStep {
        if !self.armed {
            net.begin();
            self.armed = true;
            debug_log(BootStage::Dhcp, "lease client armed");
        }

        match net.step() {
            LeaseStep::Leased => {
                ctx.flags.lease_acquired = true;
                debug_log(BootStage::Dhcp, "address leased");
                SequencerStep::Done(PhaseOutcome::Completed)
            }
            LeaseStep::Pending => SequencerStep::Pending,
            LeaseStep::Failed => {
                self.retries += 1;
                if self.retries > LEASE_MAX_RETRIES {
                    net.stop();
                    error_log(BootStage::Dhcp, "lease retries exhausted");
                    SequencerStep::Done(PhaseOutcome::Failed)
                } else {
                    debug_log(BootStage::Dhcp, "lease step timed out, retrying");
                    SequencerStep::Pending
                }
            }
        }
    }

    fn name(&self) -> &'static str {
        "DHCP"
    }
}
