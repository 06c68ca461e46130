use std::fmt::{self, Display};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::SchedulerError;

/// The scheduling policies the engine knows how to simulate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Policy {
    /// First-Come-First-Served, non-preemptive
    Fcfs,
    /// Shortest Job First, non-preemptive
    Sjf,
    /// Shortest Remaining Time First, preemptive at every tick
    Srtf,
    /// Round robin with a fixed time quantum
    RoundRobin,
}

impl Policy {
    /// Every policy, in the order the runner reports them.
    pub const ALL: [Policy; 4] = [Policy::Fcfs, Policy::Sjf, Policy::Srtf, Policy::RoundRobin];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Fcfs => "fcfs",
            Self::Sjf => "sjf",
            Self::Srtf => "srtf",
            Self::RoundRobin => "round_robin",
        }
    }

    pub const fn is_preemptive(&self) -> bool {
        matches!(self, Self::Srtf | Self::RoundRobin)
    }

    pub const fn needs_quantum(&self) -> bool {
        matches!(self, Self::RoundRobin)
    }
}

impl FromStr for Policy {
    type Err = SchedulerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fcfs" | "fifo" | "first_come_first_served" => Ok(Self::Fcfs),
            "sjf" | "shortest_job_first" => Ok(Self::Sjf),
            "srtf" | "shortest_remaining_time_first" => Ok(Self::Srtf),
            "rr" | "round_robin" | "roundrobin" => Ok(Self::RoundRobin),
            _ => Err(SchedulerError::InvalidConfiguration(format!(
                "unknown policy '{s}', valid: fcfs, sjf, srtf, rr"
            ))),
        }
    }
}

impl Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fcfs => write!(f, "First Come First Serve (FCFS)"),
            Self::Sjf => write!(f, "Shortest Job First (SJF)"),
            Self::Srtf => write!(f, "Shortest Remaining Time First (SRTF)"),
            Self::RoundRobin => write!(f, "Round Robin (RR)"),
        }
    }
}
