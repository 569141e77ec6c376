//! Diagnostic ring-buffer log.
//!
//! Circular buffer that captures bring-up progress and errors for the
//! optional diagnostic text channel (debug UART). Failures in the run loop
//! are never fatal, so this log is the only place they surface.
//!
//! # Design
//!
//! - Fixed-size, no_std compatible (no heap allocation for buffer)
//! - Single producer (the run loop) / single consumer (the debug drain)
//! - Overwrites oldest entries when full
//! - Includes stage tracking for categorization

use core::cell::UnsafeCell;
use core::sync::atomic::{AtomicUsize, Ordering};

/// Maximum message length in bytes
pub const DIAG_MSG_LEN: usize = 96;

/// Number of entries in the ring buffer (power of 2 for efficient modulo)
pub const DIAG_RING_SIZE: usize = 32;

/// Bring-up stage identifiers for log categorization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum BootStage {
    /// Board/peripheral bring-up
    Board = 0,
    /// Persisted configuration load
    Config = 1,
    /// MAC/network parameter programming
    Mac = 2,
    /// DHCP address acquisition
    Dhcp = 3,
    /// DNS name resolution
    Dns = 4,
    /// Hardware trigger latch
    Trigger = 5,
    /// Steady-state loop
    Steady = 6,
    /// General/unknown stage
    General = 7,
}

impl BootStage {
    /// Get human-readable stage name
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Board => "BOARD",
            Self::Config => "CONF",
            Self::Mac => "MAC",
            Self::Dhcp => "DHCP",
            Self::Dns => "DNS",
            Self::Trigger => "TRIG",
            Self::Steady => "LOOP",
            Self::General => "INIT",
        }
    }
}

/// Single log entry in the ring buffer
#[derive(Clone)]
pub struct DiagEntry {
    /// Message content
    pub msg: [u8; DIAG_MSG_LEN],
    /// Actual message length
    pub len: u8,
    /// Bring-up stage the entry belongs to
    pub stage: BootStage,
    /// True if this is an error, false if just a debug/info log
    pub is_error: bool,
}

impl DiagEntry {
    /// Create a new empty entry
    const fn empty() -> Self {
        Self {
            msg: [0u8; DIAG_MSG_LEN],
            len: 0,
            stage: BootStage::General,
            is_error: false,
        }
    }

    /// Get message as string slice
    pub fn message(&self) -> &str {
        let len = (self.len as usize).min(DIAG_MSG_LEN);
        core::str::from_utf8(&self.msg[..len]).unwrap_or("<invalid utf8>")
    }

    /// Format entry for display: "[STAGE] message"
    pub fn format(&self, buf: &mut [u8]) -> usize {
        let prefix = if self.is_error { "ERR " } else { "" };
        let stage = self.stage.name();
        let msg = self.message();

        let mut pos = 0;

        if pos < buf.len() {
            buf[pos] = b'[';
            pos += 1;
        }
        for &b in prefix.as_bytes() {
            if pos >= buf.len() {
                break;
            }
            buf[pos] = b;
            pos += 1;
        }
        for &b in stage.as_bytes() {
            if pos >= buf.len() {
                break;
            }
            buf[pos] = b;
            pos += 1;
        }
        if pos < buf.len() {
            buf[pos] = b']';
            pos += 1;
        }
        if pos < buf.len() {
            buf[pos] = b' ';
            pos += 1;
        }

        for &b in msg.as_bytes() {
            if pos >= buf.len() {
                break;
            }
            buf[pos] = b;
            pos += 1;
        }

        pos
    }
}

impl Default for DiagEntry {
    fn default() -> Self {
        Self::empty()
    }
}

/// Diagnostic ring-buffer log instance.
///
/// The firmware uses the process-wide instance behind the free functions
/// below; tests construct their own so state is not shared.
pub struct DiagLog {
    ring: UnsafeCell<[DiagEntry; DIAG_RING_SIZE]>,
    write_pos: AtomicUsize,
    read_pos: AtomicUsize,
    total_written: AtomicUsize,
}

// SAFETY: entries are written only by the single producer and read only by
// the single consumer; positions are reserved through the atomics first.
unsafe impl Sync for DiagLog {}

impl DiagLog {
    pub const fn new() -> Self {
        const EMPTY: DiagEntry = DiagEntry::empty();
        Self {
            ring: UnsafeCell::new([EMPTY; DIAG_RING_SIZE]),
            write_pos: AtomicUsize::new(0),
            read_pos: AtomicUsize::new(0),
            total_written: AtomicUsize::new(0),
        }
    }

    /// Log an error message (truncated if too long).
    pub fn error(&self, stage: BootStage, msg: &str) {
        self.log(stage, msg, true);
    }

    /// Log a debug/info message (truncated if too long).
    pub fn debug(&self, stage: BootStage, msg: &str) {
        self.log(stage, msg, false);
    }

    fn log(&self, stage: BootStage, msg: &str, is_error: bool) {
        let write_idx = self.write_pos.fetch_add(1, Ordering::SeqCst) % DIAG_RING_SIZE;

        let mut entry = DiagEntry::empty();
        entry.stage = stage;
        entry.is_error = is_error;

        let bytes = msg.as_bytes();
        let copy_len = bytes.len().min(DIAG_MSG_LEN);
        entry.msg[..copy_len].copy_from_slice(&bytes[..copy_len]);
        entry.len = copy_len as u8;

        // SAFETY: single producer; the slot index was reserved above.
        unsafe {
            (*self.ring.get())[write_idx] = entry;
        }

        self.total_written.fetch_add(1, Ordering::SeqCst);
    }

    /// Pop the oldest unread entry, or `None` if the buffer is empty.
    pub fn pop(&self) -> Option<DiagEntry> {
        let total = self.total_written.load(Ordering::SeqCst);
        let read = self.read_pos.load(Ordering::SeqCst);

        if read >= total {
            return None;
        }

        // If we've overflowed, skip to the oldest entry still available
        let available = total.saturating_sub(read);
        if available > DIAG_RING_SIZE {
            let skip = available - DIAG_RING_SIZE;
            self.read_pos.fetch_add(skip, Ordering::SeqCst);
        }

        let read_idx = self.read_pos.fetch_add(1, Ordering::SeqCst) % DIAG_RING_SIZE;

        // SAFETY: single consumer; the slot was published before total_written
        // advanced past it.
        let entry = unsafe { (*self.ring.get())[read_idx].clone() };
        Some(entry)
    }

    /// How many entries are available to read.
    pub fn available(&self) -> usize {
        let total = self.total_written.load(Ordering::SeqCst);
        let read = self.read_pos.load(Ordering::SeqCst);
        total.saturating_sub(read).min(DIAG_RING_SIZE)
    }

    /// Total number of entries ever written (for overflow detection).
    pub fn count(&self) -> usize {
        self.total_written.load(Ordering::SeqCst)
    }

    /// Discard all unread entries.
    pub fn clear(&self) {
        let current = self.write_pos.load(Ordering::SeqCst);
        self.read_pos.store(current, Ordering::SeqCst);
    }
}

impl Default for DiagLog {
    fn default() -> Self {
        Self::new()
    }
}

/// Process-wide diagnostic log.
static DIAG: DiagLog = DiagLog::new();

/// Log an error message to the process-wide diagnostic log.
pub fn error_log(stage: BootStage, msg: &str) {
    DIAG.error(stage, msg);
}

/// Log a debug/info message to the process-wide diagnostic log.
pub fn debug_log(stage: BootStage, msg: &str) {
    DIAG.debug(stage, msg);
}

/// Pop the oldest entry from the process-wide diagnostic log.
pub fn log_pop() -> Option<DiagEntry> {
    DIAG.pop()
}

/// Unread entries in the process-wide diagnostic log.
pub fn log_available() -> usize {
    DIAG.available()
}

/// Total entries ever written to the process-wide diagnostic log.
pub fn log_count() -> usize {
    DIAG.count()
}

/// Discard all unread entries of the process-wide diagnostic log.
pub fn log_clear() {
    DIAG.clear()
}
