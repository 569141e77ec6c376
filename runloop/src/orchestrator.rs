//! Bring-up orchestrator.
//!
//! Sequences hardware bring-up, configuration load, MAC/network parameter
//! programming and the two acquisition phases, then hands the settled
//! context to the steady-state loop. Nothing in here is fatal: the only
//! reactions to failure are the pre-defined fallbacks (static profile on
//! lease failure, unresolved remote on resolution failure), reported via
//! the diagnostic log.

use sebridge_core::diag::{debug_log, error_log, BootStage};
use sebridge_core::{DeviceConfig, DeviceStatus};
use sebridge_hwio::latch_trigger;

use crate::context::RunContext;
use crate::phase::{run_phase, AddressAcquisition, NameResolution, PhaseOutcome};
use crate::traits::{Board, ConfigStore, LeaseClient, ManagementPump, NameResolver, NetInterface};

/// Run the bring-up sequence and return the settled context.
///
/// The board entry point calls this once after reset, then enters
/// [`crate::steady::run_steady`] with the returned context. With both
/// acquisition phases disabled, no sequencer is invoked and control
/// reaches steady state directly.
pub fn bring_up<B, C, N, M>(
    board: &mut B,
    store: &mut C,
    net: &mut N,
    mgmt: &mut M,
) -> RunContext
where
    B: Board,
    C: ConfigStore,
    N: LeaseClient + NameResolver + NetInterface,
    M: ManagementPump,
{
    board.init_hardware();
    debug_log(BootStage::Board, "hardware ready");

    // Latched once per boot cycle, immutable afterwards.
    let triggered = latch_trigger(board);
    if triggered {
        debug_log(BootStage::Trigger, "hardware trigger latched");
    }

    let cfg = match store.load() {
        Ok(cfg) => cfg,
        Err(e) => {
            error_log(BootStage::Config, e.description());
            DeviceConfig::default()
        }
    };

    let mut ctx = RunContext::from_config(&cfg);
    ctx.flags.trigger_latched = triggered;

    net.set_mac(cfg.mac);
    debug_log(BootStage::Mac, "MAC programmed");

    if ctx.dhcp_enabled {
        let mut acquire = AddressAcquisition::new();
        match run_phase(&mut acquire, &mut ctx, net, mgmt) {
            PhaseOutcome::Completed => {
                ctx.net = net.profile();
            }
            PhaseOutcome::Failed => {
                // Fallback policy: static profile, applied exactly once.
                net.apply_static(&cfg.static_net);
                ctx.net = cfg.static_net;
                error_log(BootStage::Dhcp, "falling back to static profile");
            }
        }
    } else {
        net.apply_static(&cfg.static_net);
        ctx.net = cfg.static_net;
    }

    if ctx.dns_enabled {
        let mut resolve = NameResolution::new(cfg.dns_server, &cfg.remote_host);
        if run_phase(&mut resolve, &mut ctx, net, mgmt) == PhaseOutcome::Failed {
            // Non-fatal: prior configuration untouched, feature off for
            // this session.
            error_log(BootStage::Dns, "remote host left unresolved");
        }
    }

    ctx.status = DeviceStatus::Operational;
    ctx.flags.app_running = true;
    debug_log(BootStage::General, "entering steady state");
    ctx
}
