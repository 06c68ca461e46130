use thiserror::Error;

use crate::{Pid, Ticks};

/// Errors reported by the simulation engine.
///
/// Input and configuration are validated before the first tick, so a failed
/// run never leaves a partial schedule behind.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchedulerError {
    /// The process set is empty or contains a malformed process.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The policy parameters are unusable (e.g. a zero time quantum).
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The policy stopped making progress while processes were unfinished.
    #[error("Scheduler stalled at t={now}: {reason} (pid {pid:?})")]
    Stalled {
        now: Ticks,
        pid: Option<Pid>,
        reason: &'static str,
    },
}

impl SchedulerError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn invalid_configuration(msg: impl Into<String>) -> Self {
        Self::InvalidConfiguration(msg.into())
    }
}
