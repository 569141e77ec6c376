//! Phase sequencers and the phase scheduler.
//!
//! Each acquisition phase is a sequencer with an explicit step function:
//! one unit of protocol work per call, no blocking, retries bounded. The
//! outer scheduler (`run_phase`) owns the management-pump call and the
//! device-status window, which makes the interleaving a testable scheduling
//! policy instead of implicit call-order discipline.

mod lease;
mod resolve;

pub use lease::{AddressAcquisition, LEASE_MAX_RETRIES};
pub use resolve::{NameResolution, RESOLVE_MAX_RETRIES};

use crate::context::RunContext;
use crate::traits::ManagementPump;
use sebridge_core::DeviceStatus;

/// Terminal result of a phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseOutcome {
    /// Phase reached its goal (lease acquired / name resolved).
    Completed,
    /// Retry bound exhausted; caller applies its fallback policy.
    Failed,
}

/// Result of one sequencer step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequencerStep {
    /// More work to do; the scheduler will call again.
    Pending,
    /// Phase finished with the given outcome.
    Done(PhaseOutcome),
}

/// One acquisition phase driven step-by-step by the scheduler.
pub trait Sequencer<N> {
    /// Perform one unit of protocol work.
    fn step(&mut self, ctx: &mut RunContext, net: &mut N) -> SequencerStep;

    /// Phase name for diagnostics.
    fn name(&self) -> &'static str;
}

/// Drive a sequencer to completion.
///
/// Holds `DeviceStatus::Acquiring` for the whole phase and restores
/// `Operational` on every exit path. The management pump runs after every
/// sequencer step, so a configuration session is never starved during a
/// multi-second acquisition. Terminates because sequencers bound their
/// retries.
pub fn run_phase<N, S, M>(
    seq: &mut S,
    ctx: &mut RunContext,
    net: &mut N,
    mgmt: &mut M,
) -> PhaseOutcome
where
    S: Sequencer<N>,
    M: ManagementPump,
{
    ctx.status = DeviceStatus::Acquiring;

    let outcome = loop {
        let step = seq.step(ctx, net);
        mgmt.pump();
        if let SequencerStep::Done(outcome) = step {
            break outcome;
        }
    };

    ctx.status = DeviceStatus::Operational;
    outcome
}
