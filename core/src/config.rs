//! Device configuration.
//!
//! Loaded once at bring-up by the persisted-configuration collaborator and
//! treated as read-only by the orchestrator. Addresses are raw octet arrays;
//! no address type from any network crate leaks into this layer.

/// Maximum remote hostname length in bytes.
pub const HOST_NAME_LEN: usize = 64;

/// Operating mode of the serial-to-Ethernet data channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatingMode {
    /// Device connects out to the configured remote host.
    TcpClient,
    /// Device waits for inbound connections; no remote host needed.
    TcpServer,
    /// Server that switches to client on serial activity.
    TcpMixed,
}

impl OperatingMode {
    /// Modes other than pure server may need the remote host resolved.
    pub fn uses_remote_host(&self) -> bool {
        !matches!(self, Self::TcpServer)
    }
}

/// IPv4 profile: address, netmask, gateway.
///
/// Doubles as the live network-info record in the run context: holds either
/// the leased or the static configuration once bring-up settles it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NetProfile {
    pub ip: [u8; 4],
    pub mask: [u8; 4],
    pub gateway: [u8; 4],
}

impl NetProfile {
    pub const fn new(ip: [u8; 4], mask: [u8; 4], gateway: [u8; 4]) -> Self {
        Self { ip, mask, gateway }
    }

    /// Check for a valid (non-zero) address.
    pub fn has_ip(&self) -> bool {
        self.ip != [0, 0, 0, 0]
    }
}

impl Default for NetProfile {
    fn default() -> Self {
        // Factory default of the board: 192.168.11.2/24 via .1
        Self::new([192, 168, 11, 2], [255, 255, 255, 0], [192, 168, 11, 1])
    }
}

/// Fixed-buffer hostname (no heap in the configuration record).
#[derive(Debug, Clone, Copy)]
pub struct HostName {
    buf: [u8; HOST_NAME_LEN],
    len: u8,
}

impl HostName {
    pub const fn empty() -> Self {
        Self {
            buf: [0u8; HOST_NAME_LEN],
            len: 0,
        }
    }

    /// Create from a string slice; over-long names are truncated.
    pub fn new(name: &str) -> Self {
        let mut host = Self::empty();
        let bytes = name.as_bytes();
        let mut copy_len = bytes.len().min(HOST_NAME_LEN);
        // Never split a multi-byte character.
        while copy_len > 0 && !name.is_char_boundary(copy_len) {
            copy_len -= 1;
        }
        host.buf[..copy_len].copy_from_slice(&bytes[..copy_len]);
        host.len = copy_len as u8;
        host
    }

    pub fn as_str(&self) -> &str {
        let len = (self.len as usize).min(HOST_NAME_LEN);
        core::str::from_utf8(&self.buf[..len]).unwrap_or("")
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl Default for HostName {
    fn default() -> Self {
        Self::empty()
    }
}

/// Device configuration record.
#[derive(Debug, Clone, Copy)]
pub struct DeviceConfig {
    /// MAC address programmed into the Ethernet engine at bring-up.
    pub mac: [u8; 6],
    /// Data channel operating mode.
    pub mode: OperatingMode,
    /// Acquire the address via DHCP instead of the static profile.
    pub dhcp_enabled: bool,
    /// Resolve the remote hostname via DNS before entering steady state.
    pub dns_enabled: bool,
    /// DNS server queried when resolution is enabled.
    pub dns_server: [u8; 4],
    /// Remote hostname to resolve (client/mixed modes).
    pub remote_host: HostName,
    /// Remote data-channel address; used directly when DNS is disabled,
    /// overwritten by resolution when it is enabled.
    pub remote_ip: [u8; 4],
    /// Remote TCP port of the data channel.
    pub remote_port: u16,
    /// Static fallback profile (also the profile used when DHCP is off).
    pub static_net: NetProfile,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            mac: [0, 0, 0, 0, 0, 0],
            mode: OperatingMode::TcpServer,
            dhcp_enabled: false,
            dns_enabled: false,
            dns_server: [8, 8, 8, 8],
            remote_host: HostName::empty(),
            remote_ip: [0, 0, 0, 0],
            remote_port: 5000,
            static_net: NetProfile::default(),
        }
    }
}

impl DeviceConfig {
    /// Set the MAC address.
    pub fn mac(mut self, mac: [u8; 6]) -> Self {
        self.mac = mac;
        self
    }

    /// Set the operating mode.
    pub fn mode(mut self, mode: OperatingMode) -> Self {
        self.mode = mode;
        self
    }

    /// Enable or disable DHCP address acquisition.
    pub fn dhcp(mut self, enabled: bool) -> Self {
        self.dhcp_enabled = enabled;
        self
    }

    /// Enable DNS resolution of `host` against `server`.
    pub fn dns(mut self, server: [u8; 4], host: &str) -> Self {
        self.dns_enabled = true;
        self.dns_server = server;
        self.remote_host = HostName::new(host);
        self
    }

    /// Set the remote data-channel endpoint.
    pub fn remote(mut self, host: &str, port: u16) -> Self {
        self.remote_host = HostName::new(host);
        self.remote_port = port;
        self
    }

    /// Set the remote data-channel address directly (no resolution).
    pub fn remote_ip(mut self, ip: [u8; 4], port: u16) -> Self {
        self.remote_ip = ip;
        self.remote_port = port;
        self
    }

    /// Set the static network profile.
    pub fn static_net(mut self, net: NetProfile) -> Self {
        self.static_net = net;
        self
    }
}
