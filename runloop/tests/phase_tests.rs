//! Phase scheduler and sequencer tests.

mod common;

use std::collections::VecDeque;

use common::{CountingPump, ScriptedNet};
use sebridge_core::{DeviceConfig, DeviceStatus, HostName, OperatingMode};
use sebridge_runloop::{
    run_phase, AddressAcquisition, NameResolution, PhaseOutcome, RunContext, Sequencer,
    SequencerStep,
};
use sebridge_runloop::traits::{LeaseStep, ResolveStep};

fn client_ctx(dhcp: bool) -> RunContext {
    let cfg = DeviceConfig::default()
        .mode(OperatingMode::TcpClient)
        .dhcp(dhcp)
        .dns([1, 1, 1, 1], "remote.lan");
    RunContext::from_config(&cfg)
}

#[test]
fn lease_first_step_success() {
    let mut ctx = client_ctx(true);
    let mut net = ScriptedNet::new().lease_script(&[LeaseStep::Leased]);
    let mut mgmt = CountingPump::new();
    let mut seq = AddressAcquisition::new();

    let outcome = run_phase(&mut seq, &mut ctx, &mut net, &mut mgmt);

    assert_eq!(outcome, PhaseOutcome::Completed);
    assert_eq!(net.begin_calls, 1);
    assert_eq!(net.lease_steps, 1);
    assert_eq!(net.stop_calls, 0);
    assert!(ctx.flags.lease_acquired);
    assert_eq!(seq.retries(), 0);
}

#[test]
fn lease_pending_then_leased() {
    let mut ctx = client_ctx(true);
    let mut net = ScriptedNet::new().lease_script(&[
        LeaseStep::Pending,
        LeaseStep::Pending,
        LeaseStep::Leased,
    ]);
    let mut mgmt = CountingPump::new();
    let mut seq = AddressAcquisition::new();

    let outcome = run_phase(&mut seq, &mut ctx, &mut net, &mut mgmt);

    assert_eq!(outcome, PhaseOutcome::Completed);
    assert_eq!(net.lease_steps, 3);
    // Pumped once per sequencer step, no more, no less.
    assert_eq!(mgmt.pumps, 3);
    // Arming happens once, not per step.
    assert_eq!(net.begin_calls, 1);
}

#[test]
fn lease_retry_bound_is_exact() {
    let mut ctx = client_ctx(true);
    // Initial attempt plus three retries; a fifth step would panic the fake.
    let mut net = ScriptedNet::new().lease_script(&[LeaseStep::Failed; 4]);
    let mut mgmt = CountingPump::new();
    let mut seq = AddressAcquisition::new();

    let outcome = run_phase(&mut seq, &mut ctx, &mut net, &mut mgmt);

    assert_eq!(outcome, PhaseOutcome::Failed);
    assert_eq!(net.lease_steps, 4);
    assert_eq!(net.stop_calls, 1);
    assert_eq!(seq.retries(), 4);
    assert!(!ctx.flags.lease_acquired);
    assert_eq!(mgmt.pumps, 4);
}

#[test]
fn lease_recovers_within_bound() {
    let mut ctx = client_ctx(true);
    let mut net = ScriptedNet::new().lease_script(&[
        LeaseStep::Failed,
        LeaseStep::Failed,
        LeaseStep::Leased,
    ]);
    let mut mgmt = CountingPump::new();
    let mut seq = AddressAcquisition::new();

    let outcome = run_phase(&mut seq, &mut ctx, &mut net, &mut mgmt);

    assert_eq!(outcome, PhaseOutcome::Completed);
    assert_eq!(net.stop_calls, 0);
    assert_eq!(seq.retries(), 2);
}

/// Sequencer that records the device status visible at every step.
struct StatusSpy {
    script: VecDeque<SequencerStep>,
    seen: Vec<DeviceStatus>,
}

impl StatusSpy {
    fn new(script: &[SequencerStep]) -> Self {
        Self {
            script: script.iter().copied().collect(),
            seen: Vec::new(),
        }
    }
}

impl Sequencer<ScriptedNet> for StatusSpy {
    fn step(&mut self, ctx: &mut RunContext, _net: &mut ScriptedNet) -> SequencerStep {
        self.seen.push(ctx.status);
        self.script.pop_front().expect("step beyond script")
    }

    fn name(&self) -> &'static str {
        "SPY"
    }
}

#[test]
fn status_held_acquiring_for_whole_phase() {
    let mut ctx = client_ctx(true);
    ctx.status = DeviceStatus::Operational;
    let mut net = ScriptedNet::new();
    let mut mgmt = CountingPump::new();
    let mut spy = StatusSpy::new(&[
        SequencerStep::Pending,
        SequencerStep::Pending,
        SequencerStep::Done(PhaseOutcome::Completed),
    ]);

    run_phase(&mut spy, &mut ctx, &mut net, &mut mgmt);

    assert!(spy.seen.iter().all(|s| *s == DeviceStatus::Acquiring));
    assert_eq!(ctx.status, DeviceStatus::Operational);
}

#[test]
fn status_restored_on_failure_exit() {
    let mut ctx = client_ctx(true);
    let mut net = ScriptedNet::new();
    let mut mgmt = CountingPump::new();
    let mut spy = StatusSpy::new(&[SequencerStep::Done(PhaseOutcome::Failed)]);

    run_phase(&mut spy, &mut ctx, &mut net, &mut mgmt);

    assert_eq!(ctx.status, DeviceStatus::Operational);
}

#[test]
fn resolve_first_call_success() {
    let mut ctx = client_ctx(false);
    let mut net =
        ScriptedNet::new().resolve_script(&[ResolveStep::Resolved([10, 0, 0, 9])]);
    let mut mgmt = CountingPump::new();
    let mut seq = NameResolution::new([1, 1, 1, 1], &HostName::new("remote.lan"));

    let outcome = run_phase(&mut seq, &mut ctx, &mut net, &mut mgmt);

    assert_eq!(outcome, PhaseOutcome::Completed);
    assert_eq!(ctx.remote_ip, [10, 0, 0, 9]);
    assert!(ctx.flags.name_resolved);
    assert_eq!(net.query_steps, 1);
    assert_eq!(
        net.last_query,
        Some(([1, 1, 1, 1], "remote.lan".to_string()))
    );
}

#[test]
fn resolve_retry_bound_is_exact() {
    let mut ctx = client_ctx(false);
    // Initial attempt plus two retries.
    let mut net = ScriptedNet::new().resolve_script(&[ResolveStep::Failed; 3]);
    let mut mgmt = CountingPump::new();
    let mut seq = NameResolution::new([1, 1, 1, 1], &HostName::new("remote.lan"));

    let outcome = run_phase(&mut seq, &mut ctx, &mut net, &mut mgmt);

    assert_eq!(outcome, PhaseOutcome::Failed);
    assert_eq!(net.query_steps, 3);
    assert_eq!(ctx.remote_ip, [0; 4]);
    assert!(!ctx.flags.name_resolved);
}

#[test]
fn resolve_renews_lease_while_unresolved() {
    let mut ctx = client_ctx(true);
    let mut net = ScriptedNet::new()
        .resolve_script(&[
            ResolveStep::Pending,
            ResolveStep::Failed,
            ResolveStep::Resolved([10, 0, 0, 9]),
        ])
        // One renewal step for the pending query, one for the retried failure.
        .lease_script(&[LeaseStep::Pending, LeaseStep::Pending]);
    let mut mgmt = CountingPump::new();
    let mut seq = NameResolution::new([1, 1, 1, 1], &HostName::new("remote.lan"));

    let outcome = run_phase(&mut seq, &mut ctx, &mut net, &mut mgmt);

    assert_eq!(outcome, PhaseOutcome::Completed);
    assert_eq!(net.lease_steps, 2);
    assert_eq!(net.begin_calls, 0);
}

#[test]
fn resolve_skips_renewal_without_dhcp() {
    let mut ctx = client_ctx(false);
    // Empty lease script: any renewal step would panic the fake.
    let mut net = ScriptedNet::new().resolve_script(&[
        ResolveStep::Pending,
        ResolveStep::Resolved([10, 0, 0, 9]),
    ]);
    let mut mgmt = CountingPump::new();
    let mut seq = NameResolution::new([1, 1, 1, 1], &HostName::new("remote.lan"));

    run_phase(&mut seq, &mut ctx, &mut net, &mut mgmt);

    assert_eq!(net.lease_steps, 0);
}
