//! Bring-up errors.
//!
//! The run loop itself has no fatal path: sequencers absorb their own
//! retries and report plain outcomes. These errors exist only at the
//! collaborator seams (configuration load, network stack init) and are
//! always absorbed by a fallback plus a diagnostic log entry.

/// Bring-up error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BringUpError {
    /// Persisted configuration could not be read.
    ConfigLoad,
    /// Persisted configuration record failed validation.
    ConfigCorrupt,
    /// Network stack initialization failed.
    StackInit,
    /// Ethernet engine rejected the MAC/network parameters.
    MacProgram,
}

impl BringUpError {
    /// Get a human-readable description of the error.
    pub fn description(&self) -> &'static str {
        match self {
            Self::ConfigLoad => "Failed to load persisted configuration",
            Self::ConfigCorrupt => "Persisted configuration is corrupt",
            Self::StackInit => "Network stack initialization failed",
            Self::MacProgram => "Failed to program MAC/network parameters",
        }
    }
}

/// Result type for bring-up seams.
pub type BringUpResult<T> = Result<T, BringUpError>;
