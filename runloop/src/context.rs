//! Shared run context.
//!
//! One explicit structure instead of ambient globals: every phase step and
//! every steady-state iteration receives `&mut RunContext`. The session
//! capabilities (DHCP/DNS enabled) are resolved once from the configuration
//! at bring-up and carried as plain data, so the orchestration logic has a
//! single code path regardless of target board or build.

use sebridge_core::{DeviceConfig, DeviceStatus, DiagFlags, NetProfile, StatusFlags};

/// Mutable state shared across phases and the steady-state loop.
#[derive(Debug)]
pub struct RunContext {
    /// Coarse state a management client can query.
    pub status: DeviceStatus,
    /// Session flags.
    pub flags: StatusFlags,
    /// Interrupt-raised diagnostic flags, drained by the steady loop.
    pub diag: DiagFlags,
    /// Live network-info record (leased or static, settled at bring-up).
    pub net: NetProfile,
    /// Remote data-channel address; the configured address, overwritten
    /// by the DNS phase on success.
    pub remote_ip: [u8; 4],
    /// Remote data-channel port.
    pub remote_port: u16,
    /// Address acquisition enabled for this session.
    pub dhcp_enabled: bool,
    /// Name resolution enabled for this session (mode permitting).
    pub dns_enabled: bool,
}

impl RunContext {
    /// Resolve session capabilities from the configuration.
    pub fn from_config(cfg: &DeviceConfig) -> Self {
        Self {
            // Boot default; every phase exit restores Operational.
            status: DeviceStatus::Acquiring,
            flags: StatusFlags::default(),
            diag: DiagFlags::new(),
            net: NetProfile::new([0; 4], [0; 4], [0; 4]),
            remote_ip: cfg.remote_ip,
            remote_port: cfg.remote_port,
            dhcp_enabled: cfg.dhcp_enabled,
            dns_enabled: cfg.dns_enabled && cfg.mode.uses_remote_host(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sebridge_core::OperatingMode;

    #[test]
    fn capabilities_resolved_once() {
        let cfg = DeviceConfig::default()
            .mode(OperatingMode::TcpClient)
            .dhcp(true)
            .dns([1, 1, 1, 1], "remote.lan");
        let ctx = RunContext::from_config(&cfg);
        assert!(ctx.dhcp_enabled);
        assert!(ctx.dns_enabled);
        assert_eq!(ctx.status, DeviceStatus::Acquiring);
    }

    #[test]
    fn configured_remote_seeds_context() {
        let cfg = DeviceConfig::default()
            .mode(OperatingMode::TcpClient)
            .remote_ip([10, 0, 0, 9], 6000);
        let ctx = RunContext::from_config(&cfg);
        assert_eq!(ctx.remote_ip, [10, 0, 0, 9]);
        assert_eq!(ctx.remote_port, 6000);
    }

    #[test]
    fn server_mode_disables_resolution() {
        let cfg = DeviceConfig::default()
            .mode(OperatingMode::TcpServer)
            .dns([1, 1, 1, 1], "remote.lan");
        let ctx = RunContext::from_config(&cfg);
        assert!(!ctx.dns_enabled);
    }
}
