//! IP stack with the lease and resolve step functions.
//!
//! [`NetStack`] owns the smoltcp interface and socket set and implements
//! the run loop's network seams. Each seam call performs one bounded unit
//! of work: poll the interface once, inspect socket state once, return.
//! Per-attempt timeouts are measured against the injected millisecond
//! clock; when an attempt times out the step reports `Failed` and the
//! attempt timer restarts, leaving the retry policy entirely to the
//! caller.

use sebridge_core::diag::{debug_log, error_log, BootStage};
use sebridge_core::NetProfile;
use sebridge_runloop::traits::{LeaseClient, LeaseStep, NameResolver, NetInterface, ResolveStep};

use smoltcp::iface::{Config, Interface, SocketHandle, SocketSet, SocketStorage};
use smoltcp::socket::dhcpv4::{Event as DhcpEvent, Socket as DhcpSocket};
use smoltcp::socket::dns::{
    DnsQuery, GetQueryResultError, QueryHandle, Socket as DnsSocket,
};
use smoltcp::time::Instant;
use smoltcp::wire::{
    DnsQueryType, EthernetAddress, IpAddress, IpCidr, Ipv4Address, Ipv4Cidr,
};

use crate::adapter::EthAdapter;
use crate::driver::EthDriver;

/// Socket slots the stack needs (DHCP + DNS, with slack).
pub const SOCKET_SLOTS: usize = 4;

/// Per-attempt timeouts in milliseconds.
///
/// These bound a single protocol attempt; the run loop's sequencers own
/// the retry counts on top.
#[derive(Debug, Clone, Copy)]
pub struct Timeouts {
    pub lease_attempt_ms: u64,
    pub resolve_attempt_ms: u64,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            lease_attempt_ms: 10_000,
            resolve_attempt_ms: 5_000,
        }
    }
}

/// smoltcp-backed network stack.
///
/// Socket storage and DNS query slots are caller-owned; the stack adds its
/// sockets lazily so a session with DHCP or DNS disabled generates no
/// traffic for the unused protocol.
pub struct NetStack<'a, D: EthDriver> {
    adapter: EthAdapter<D>,
    iface: Interface,
    sockets: SocketSet<'a>,
    dhcp_handle: Option<SocketHandle>,
    dhcp_active: bool,
    lease_held: bool,
    dns_handle: Option<SocketHandle>,
    dns_queries: Option<&'a mut [Option<DnsQuery>]>,
    query: Option<QueryHandle>,
    timeouts: Timeouts,
    lease_attempt_started: Option<u64>,
    resolve_attempt_started: Option<u64>,
    now_ms: fn() -> u64,
    profile: NetProfile,
}

impl<'a, D: EthDriver> NetStack<'a, D> {
    /// Create the stack over `driver`.
    ///
    /// `storage` needs at least [`SOCKET_SLOTS`] entries and `dns_queries`
    /// at least one. `now_ms` is the board's millisecond tick source.
    pub fn new(
        driver: D,
        storage: &'a mut [SocketStorage<'a>],
        dns_queries: &'a mut [Option<DnsQuery>],
        now_ms: fn() -> u64,
    ) -> Self {
        let mac = driver.mac_address();
        let mut adapter = EthAdapter::new(driver);

        let config = Config::new(EthernetAddress(mac).into());
        let iface = Interface::new(config, &mut adapter, Instant::from_millis(now_ms() as i64));
        let sockets = SocketSet::new(&mut storage[..]);

        Self {
            adapter,
            iface,
            sockets,
            dhcp_handle: None,
            dhcp_active: false,
            lease_held: false,
            dns_handle: None,
            dns_queries: Some(dns_queries),
            query: None,
            timeouts: Timeouts::default(),
            lease_attempt_started: None,
            resolve_attempt_started: None,
            now_ms,
            profile: NetProfile::new([0; 4], [0; 4], [0; 4]),
        }
    }

    /// Override the per-attempt timeouts.
    pub fn with_timeouts(mut self, timeouts: Timeouts) -> Self {
        self.timeouts = timeouts;
        self
    }

    /// Poll the interface once. Returns true on socket activity.
    pub fn poll(&mut self, now_ms: u64) -> bool {
        let now = Instant::from_millis(now_ms as i64);
        self.iface.poll(now, &mut self.adapter, &mut self.sockets)
    }

    /// Get a reference to the underlying driver.
    pub fn driver(&self) -> &D {
        self.adapter.driver()
    }
}

impl<'a, D: EthDriver> LeaseClient for NetStack<'a, D> {
    fn begin(&mut self) {
        match self.dhcp_handle {
            Some(handle) => self.sockets.get_mut::<DhcpSocket>(handle).reset(),
            None => self.dhcp_handle = Some(self.sockets.add(DhcpSocket::new())),
        }
        self.dhcp_active = true;
        self.lease_held = false;
        self.lease_attempt_started = None;
    }

    fn step(&mut self) -> LeaseStep {
        let handle = match self.dhcp_handle {
            Some(handle) if self.dhcp_active => handle,
            _ => return LeaseStep::Pending,
        };

        let now = (self.now_ms)();
        self.poll(now);

        match self.sockets.get_mut::<DhcpSocket>(handle).poll() {
            Some(DhcpEvent::Configured(config)) => {
                let cidr = config.address;
                let router = config.router;

                self.iface.update_ip_addrs(|addrs| {
                    addrs.clear();
                    let _ = addrs.push(IpCidr::Ipv4(cidr));
                });
                match router {
                    Some(router) => {
                        let _ = self.iface.routes_mut().add_default_ipv4_route(router);
                    }
                    None => {
                        self.iface.routes_mut().remove_default_ipv4_route();
                    }
                }

                self.profile = NetProfile::new(
                    cidr.address().0,
                    prefix_to_mask(cidr.prefix_len()),
                    router.map(|r| r.0).unwrap_or([0; 4]),
                );
                self.lease_held = true;
                self.lease_attempt_started = None;
                debug_log(BootStage::Dhcp, "lease configured");
                LeaseStep::Leased
            }
            Some(DhcpEvent::Deconfigured) => {
                // Lease lost; discovery restarts inside the socket and a
                // fresh attempt window opens on the next step.
                self.iface.update_ip_addrs(|addrs| addrs.clear());
                self.iface.routes_mut().remove_default_ipv4_route();
                self.profile = NetProfile::new([0; 4], [0; 4], [0; 4]);
                self.lease_held = false;
                self.lease_attempt_started = None;
                debug_log(BootStage::Dhcp, "lease lost, rediscovering");
                LeaseStep::Pending
            }
            None => {
                // The attempt timer only runs while acquiring; a healthy
                // held lease is quiet between renewals.
                if self.lease_held {
                    return LeaseStep::Pending;
                }
                let started = *self.lease_attempt_started.get_or_insert(now);
                if now.saturating_sub(started) > self.timeouts.lease_attempt_ms {
                    self.lease_attempt_started = Some(now);
                    LeaseStep::Failed
                } else {
                    LeaseStep::Pending
                }
            }
        }
    }

    fn stop(&mut self) {
        if let Some(handle) = self.dhcp_handle {
            self.sockets.get_mut::<DhcpSocket>(handle).reset();
        }
        self.dhcp_active = false;
        self.lease_held = false;
        self.lease_attempt_started = None;
    }
}

impl<'a, D: EthDriver> NameResolver for NetStack<'a, D> {
    fn query_step(&mut self, server: [u8; 4], host: &str) -> ResolveStep {
        // A literal address needs no query at all.
        if let Some(ip) = parse_ipv4(host) {
            return ResolveStep::Resolved(ip);
        }

        let now = (self.now_ms)();
        self.poll(now);

        let dns_handle = match self.dns_handle {
            Some(handle) => handle,
            None => {
                let queries = match self.dns_queries.take() {
                    Some(queries) => queries,
                    None => {
                        error_log(BootStage::Dns, "no DNS query slots");
                        return ResolveStep::Failed;
                    }
                };
                let servers = [IpAddress::Ipv4(Ipv4Address(server))];
                let handle = self.sockets.add(DnsSocket::new(&servers[..], queries));
                self.dns_handle = Some(handle);
                handle
            }
        };

        let started = *self.resolve_attempt_started.get_or_insert(now);
        let socket = self.sockets.get_mut::<DnsSocket>(dns_handle);

        let query = match self.query {
            Some(query) => query,
            None => match socket.start_query(self.iface.context(), host, DnsQueryType::A) {
                Ok(query) => {
                    self.query = Some(query);
                    debug_log(BootStage::Dns, "query sent");
                    return ResolveStep::Pending;
                }
                Err(_) => {
                    self.resolve_attempt_started = Some(now);
                    error_log(BootStage::Dns, "query start rejected");
                    return ResolveStep::Failed;
                }
            },
        };

        match socket.get_query_result(query) {
            Ok(addrs) => {
                self.query = None;
                self.resolve_attempt_started = None;
                for addr in addrs {
                    if let IpAddress::Ipv4(ip) = addr {
                        return ResolveStep::Resolved(ip.0);
                    }
                }
                error_log(BootStage::Dns, "no IPv4 in answer");
                ResolveStep::Failed
            }
            Err(GetQueryResultError::Pending) => {
                if now.saturating_sub(started) > self.timeouts.resolve_attempt_ms {
                    // No cancel API; the outstanding query keeps
                    // retransmitting and the next step reuses it.
                    self.resolve_attempt_started = Some(now);
                    ResolveStep::Failed
                } else {
                    ResolveStep::Pending
                }
            }
            Err(GetQueryResultError::Failed) => {
                self.query = None;
                self.resolve_attempt_started = Some(now);
                ResolveStep::Failed
            }
        }
    }
}

impl<'a, D: EthDriver> NetInterface for NetStack<'a, D> {
    fn set_mac(&mut self, mac: [u8; 6]) {
        self.iface.set_hardware_addr(EthernetAddress(mac).into());
    }

    fn apply_static(&mut self, net: &NetProfile) {
        let cidr = Ipv4Cidr::new(Ipv4Address(net.ip), mask_to_prefix(net.mask));
        self.iface.update_ip_addrs(|addrs| {
            addrs.clear();
            let _ = addrs.push(IpCidr::Ipv4(cidr));
        });
        if net.gateway != [0; 4] {
            let _ = self
                .iface
                .routes_mut()
                .add_default_ipv4_route(Ipv4Address(net.gateway));
        } else {
            self.iface.routes_mut().remove_default_ipv4_route();
        }
        self.profile = *net;
    }

    fn profile(&self) -> NetProfile {
        self.profile
    }

    fn link_up(&self) -> bool {
        self.adapter.driver().link_up()
    }
}

/// Parse an IPv4 address from a dotted decimal string.
pub fn parse_ipv4(s: &str) -> Option<[u8; 4]> {
    let bytes = s.as_bytes();
    let mut octets = [0u8; 4];
    let mut octet_idx = 0;
    let mut current: u16 = 0;
    let mut digit_count = 0;

    for &b in bytes {
        if b == b'.' {
            if digit_count == 0 || octet_idx >= 3 {
                return None;
            }
            octets[octet_idx] = current as u8;
            octet_idx += 1;
            current = 0;
            digit_count = 0;
        } else if b.is_ascii_digit() {
            current = current * 10 + (b - b'0') as u16;
            digit_count += 1;
            if digit_count > 3 || current > 255 {
                return None;
            }
        } else {
            return None;
        }
    }

    if digit_count == 0 || octet_idx != 3 {
        return None;
    }
    octets[3] = current as u8;

    Some(octets)
}

/// Netmask to CIDR prefix length.
pub fn mask_to_prefix(mask: [u8; 4]) -> u8 {
    u32::from_be_bytes(mask).count_ones() as u8
}

/// CIDR prefix length to netmask.
pub fn prefix_to_mask(prefix: u8) -> [u8; 4] {
    if prefix == 0 {
        return [0; 4];
    }
    let bits = u32::MAX << (32 - prefix.min(32) as u32);
    bits.to_be_bytes()
}
