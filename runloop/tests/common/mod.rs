//! Shared fakes for run-loop tests.
//!
//! Scripts are exact: a sequencer step beyond the scripted results panics,
//! which is how the retry-bound tests catch an (N+1)th protocol step.

#![allow(dead_code)]

use std::cell::Cell;
use std::collections::VecDeque;
use std::rc::Rc;

use sebridge_core::{BringUpResult, DeviceConfig, NetProfile};
use sebridge_hwio::{IndicatorPin, PinLevel, TriggerProbe};
use sebridge_runloop::traits::{
    Board, BridgePump, ConfigStore, LeaseClient, LeaseStep, ManagementPump, NameResolver,
    NetInterface, ResolveStep,
};

/// Fake network services: lease client + resolver + interface in one
/// object, driven by scripted step results.
pub struct ScriptedNet {
    pub lease_results: VecDeque<LeaseStep>,
    pub resolve_results: VecDeque<ResolveStep>,
    pub begin_calls: u32,
    pub stop_calls: u32,
    pub lease_steps: u32,
    pub query_steps: u32,
    pub last_query: Option<([u8; 4], String)>,
    pub mac: Option<[u8; 6]>,
    pub static_applied: u32,
    pub current: NetProfile,
    pub leased_profile: NetProfile,
    pub link: bool,
}

impl ScriptedNet {
    pub fn new() -> Self {
        Self {
            lease_results: VecDeque::new(),
            resolve_results: VecDeque::new(),
            begin_calls: 0,
            stop_calls: 0,
            lease_steps: 0,
            query_steps: 0,
            last_query: None,
            mac: None,
            static_applied: 0,
            current: NetProfile::new([0; 4], [0; 4], [0; 4]),
            leased_profile: NetProfile::new(
                [10, 0, 0, 50],
                [255, 255, 255, 0],
                [10, 0, 0, 1],
            ),
            link: true,
        }
    }

    pub fn lease_script(mut self, steps: &[LeaseStep]) -> Self {
        self.lease_results = steps.iter().copied().collect();
        self
    }

    pub fn resolve_script(mut self, steps: &[ResolveStep]) -> Self {
        self.resolve_results = steps.iter().copied().collect();
        self
    }
}

impl LeaseClient for ScriptedNet {
    fn begin(&mut self) {
        self.begin_calls += 1;
    }

    fn step(&mut self) -> LeaseStep {
        self.lease_steps += 1;
        let result = self
            .lease_results
            .pop_front()
            .expect("lease step beyond script");
        if result == LeaseStep::Leased {
            self.current = self.leased_profile;
        }
        result
    }

    fn stop(&mut self) {
        self.stop_calls += 1;
    }
}

impl NameResolver for ScriptedNet {
    fn query_step(&mut self, server: [u8; 4], host: &str) -> ResolveStep {
        self.query_steps += 1;
        self.last_query = Some((server, host.to_string()));
        self.resolve_results
            .pop_front()
            .expect("query step beyond script")
    }
}

impl NetInterface for ScriptedNet {
    fn set_mac(&mut self, mac: [u8; 6]) {
        self.mac = Some(mac);
    }

    fn apply_static(&mut self, net: &NetProfile) {
        self.static_applied += 1;
        self.current = *net;
    }

    fn profile(&self) -> NetProfile {
        self.current
    }

    fn link_up(&self) -> bool {
        self.link
    }
}

/// Management pump counting invocations.
pub struct CountingPump {
    pub pumps: u32,
}

impl CountingPump {
    pub fn new() -> Self {
        Self { pumps: 0 }
    }
}

impl ManagementPump for CountingPump {
    fn pump(&mut self) {
        self.pumps += 1;
    }
}

/// Data-bridge pump counting invocations.
pub struct CountingBridge {
    pub pumps: u32,
}

impl CountingBridge {
    pub fn new() -> Self {
        Self { pumps: 0 }
    }
}

impl BridgePump for CountingBridge {
    fn pump(&mut self) {
        self.pumps += 1;
    }
}

/// Board fake with a scripted trigger pin.
pub struct FakeBoard {
    pub init_calls: u32,
    pub delays: u32,
    levels: Vec<PinLevel>,
    cursor: usize,
}

impl FakeBoard {
    /// Trigger pin held high: not triggered.
    pub fn new() -> Self {
        Self {
            init_calls: 0,
            delays: 0,
            levels: vec![PinLevel::High; 8],
            cursor: 0,
        }
    }

    /// Trigger pin held low: latches the trigger.
    pub fn triggered() -> Self {
        Self {
            levels: vec![PinLevel::Low; 8],
            ..Self::new()
        }
    }
}

impl TriggerProbe for FakeBoard {
    fn sample(&mut self) -> PinLevel {
        let level = self.levels.get(self.cursor).copied().unwrap_or(PinLevel::High);
        self.cursor += 1;
        level
    }

    fn delay_ms(&mut self, _ms: u32) {
        self.delays += 1;
    }
}

impl Board for FakeBoard {
    fn init_hardware(&mut self) {
        self.init_calls += 1;
    }
}

/// Configuration store returning a fixed result.
pub struct FakeStore {
    pub result: BringUpResult<DeviceConfig>,
}

impl FakeStore {
    pub fn with(cfg: DeviceConfig) -> Self {
        Self { result: Ok(cfg) }
    }
}

impl ConfigStore for FakeStore {
    fn load(&mut self) -> BringUpResult<DeviceConfig> {
        self.result
    }
}

/// Indicator pin recording writes through shared cells.
pub struct RecordingPin {
    pub writes: Rc<Cell<u32>>,
    pub state: Rc<Cell<bool>>,
}

impl RecordingPin {
    pub fn new() -> (Self, Rc<Cell<u32>>, Rc<Cell<bool>>) {
        let writes = Rc::new(Cell::new(0));
        let state = Rc::new(Cell::new(false));
        (
            Self {
                writes: writes.clone(),
                state: state.clone(),
            },
            writes,
            state,
        )
    }
}

impl IndicatorPin for RecordingPin {
    fn set(&mut self, on: bool) {
        self.writes.set(self.writes.get() + 1);
        self.state.set(on);
    }
}
