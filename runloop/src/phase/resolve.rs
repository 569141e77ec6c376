//! Name resolution sequencer (DNS phase).

use sebridge_core::diag::{debug_log, error_log, BootStage};
use sebridge_core::HostName;

use super::{PhaseOutcome, Sequencer, SequencerStep};
use crate::context::RunContext;
use crate::traits::{LeaseClient, NameResolver, ResolveStep};

/// Retries allowed after the first failed query step.
pub const RESOLVE_MAX_RETRIES: u8 = 2;

/// DNS resolution of the remote data-channel host.
///
/// Mirrors the acquisition sequencer with a tighter bound. While the query
/// is unresolved and address acquisition is enabled for this session, every
/// step also pumps one lease-renewal step, so a long resolution cannot cost
/// the device a previously acquired lease. Exhaustion is non-fatal: the
/// remote record is left untouched and resolution stays disabled for the
/// session.
pub struct NameResolution {
    server: [u8; 4],
    host: HostName,
    retries: u8,
}

impl NameResolution {
    pub fn new(server: [u8; 4], host: &HostName) -> Self {
        Self {
            server,
            host: *host,
            retries: 0,
        }
    }

    /// Failed steps consumed so far.
    pub fn retries(&self) -> u8 {
        self.retries
    }

    fn keep_lease<N: LeaseClient>(&self, ctx: &RunContext, net: &mut N) {
        if ctx.dhcp_enabled {
            let _ = net.step();
        }
    }
}

impl<N: NameResolver + LeaseClient> Sequencer<N> for NameResolution {
    fn step(&mut self, ctx: &mut RunContext, net: &mut N) -> SequencerStep {
        match net.query_step(self.server, self.host.as_str()) {
            ResolveStep::Resolved(addr) => {
                ctx.remote_ip = addr;
                ctx.flags.name_resolved = true;
                debug_log(BootStage::Dns, "remote host resolved");
                SequencerStep::Done(PhaseOutcome::Completed)
            }
            ResolveStep::Pending => {
                self.keep_lease(ctx, net);
                SequencerStep::Pending
            }
            ResolveStep::Failed => {
                self.retries += 1;
                if self.retries > RESOLVE_MAX_RETRIES {
                    error_log(BootStage::Dns, "resolution retries exhausted");
                    SequencerStep::Done(PhaseOutcome::Failed)
                } else {
                    debug_log(BootStage::Dns, "query timed out, retrying");
                    self.keep_lease(ctx, net);
                    SequencerStep::Pending
                }
            }
        }
    }

    fn name(&self) -> &'static str {
        "DNS"
    }
}
