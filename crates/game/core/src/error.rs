//! Common error infrastructure for tactics-core.
//!
//! Only programming errors and invalid setup surface as `Err`. Gameplay
//! conditions (a blocked cell, a target that died before its attacker's turn)
//! resolve inside the engine to a WAIT outcome and never reach callers.
//!
//! Domain-specific errors (`SpawnError`, `ScheduleError`, `ConfigError`) live
//! next to the modules that raise them and implement [`TacticsError`].

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Temporary condition; retrying later or with another action may succeed.
    Recoverable,

    /// Invalid input that should be rejected without retry.
    Validation,

    /// Unexpected state inconsistency. Indicates a bug.
    Internal,

    /// Engine state is corrupted and cannot continue.
    Fatal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all tactics-core errors.
pub trait TacticsError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;
}
