//! Steady-state loop.
//!
//! Flat, repeating fan-out: management pump, data-bridge pump, optional
//! lease renewal, diagnostic-flag drain. No step blocks; each returns
//! after a bounded amount of work so both the management protocol and the
//! data bridge appear continuously responsive.

use sebridge_core::diag::{error_log, BootStage};
use sebridge_hwio::{IndicatorPin, Indicators};

use crate::context::RunContext;
use crate::traits::{BridgePump, LeaseClient, ManagementPump, NetInterface};

/// One steady-state iteration.
///
/// This is a building block - the full main loop calls this repeatedly.
/// Useful for testing and integration.
pub fn steady_iteration<N, M, D, A, B>(
    ctx: &mut RunContext,
    net: &mut N,
    mgmt: &mut M,
    bridge: &mut D,
    indicators: &mut Indicators<A, B>,
) where
    N: LeaseClient + NetInterface,
    M: ManagementPump,
    D: BridgePump,
    A: IndicatorPin,
    B: IndicatorPin,
{
    mgmt.pump();
    bridge.pump();

    if ctx.dhcp_enabled {
        // Lease renewal; assign and renew apply the same action inside
        // the client, so the result needs no handling here.
        let _ = net.step();
    }

    // Drain interrupt-raised diagnostics, once per iteration.
    if ctx.diag.link_changed.take() {
        indicators.set_link(net.link_up());
    }
    if ctx.diag.rx_overflow.take() {
        error_log(BootStage::Steady, "UART rx ring buffer overflow");
    }
}

/// Run the steady-state loop forever. The device leaves this loop only
/// through reset.
pub fn run_steady<N, M, D, A, B>(
    ctx: &mut RunContext,
    net: &mut N,
    mgmt: &mut M,
    bridge: &mut D,
    indicators: &mut Indicators<A, B>,
) -> !
where
    N: LeaseClient + NetInterface,
    M: ManagementPump,
    D: BridgePump,
    A: IndicatorPin,
    B: IndicatorPin,
{
    loop {
        steady_iteration(ctx, net, mgmt, bridge, indicators);
    }
}
