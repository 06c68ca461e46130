use std::fmt::{self, Display};
use std::num::NonZeroU64;

use serde::{Deserialize, Serialize};

use crate::policy::Policy;
use crate::simulation::Simulation;

/// Virtual time, in whole processor ticks.
pub type Ticks = u64;

/// The identifier of a process.
///
/// Identifiers are opaque: they only need to be unique within one input set.
/// They are ordered so that policies can use them as a last tie-breaker.
#[derive(PartialEq, Eq, Copy, Clone, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Pid(usize);

impl Pid {
    pub const fn new(pid: usize) -> Pid {
        Pid(pid)
    }

    pub const fn get(self) -> usize {
        self.0
    }
}

impl PartialEq<usize> for Pid {
    fn eq(&self, other: &usize) -> bool {
        self.0 == *other
    }
}

impl Display for Pid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for Pid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A process as supplied by the caller.
///
/// The timing fields are signed so that malformed input (negative arrivals,
/// non-positive bursts) can be represented and rejected with
/// [`SchedulerError::InvalidInput`](crate::SchedulerError::InvalidInput)
/// instead of failing somewhere in a parser.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessSpec {
    pub id: Pid,
    pub arrival_time: i64,
    pub burst_time: i64,
}

impl ProcessSpec {
    pub fn new(id: usize, arrival_time: i64, burst_time: i64) -> Self {
        ProcessSpec {
            id: Pid::new(id),
            arrival_time,
            burst_time,
        }
    }
}

impl From<(usize, i64, i64)> for ProcessSpec {
    fn from((id, arrival_time, burst_time): (usize, i64, i64)) -> Self {
        ProcessSpec::new(id, arrival_time, burst_time)
    }
}

/// The state of a process.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ProcessState {
    /// The arrival time has not been reached yet.
    Unarrived,

    /// The process has arrived and waits for the processor.
    Ready,

    /// The process currently owns the processor.
    Running,

    /// The process has received all of its burst time.
    Completed,
}

impl Display for ProcessState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProcessState::Unarrived => write!(f, "UNARRIVED"),
            ProcessState::Ready => write!(f, "READY"),
            ProcessState::Running => write!(f, "RUNNING"),
            ProcessState::Completed => write!(f, "COMPLETED"),
        }
    }
}

/// The live record of a process inside one simulation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Process {
    pub pid: Pid,
    pub arrival_time: Ticks,
    pub burst_time: Ticks,
    pub remaining_time: Ticks,
    pub state: ProcessState,
    /// Set on first dispatch.
    pub response_time: Option<Ticks>,
    /// Set when `remaining_time` reaches 0.
    pub completion_time: Option<Ticks>,
}

impl Process {
    pub(crate) fn new(pid: Pid, arrival_time: Ticks, burst_time: Ticks) -> Self {
        Process {
            pid,
            arrival_time,
            burst_time,
            remaining_time: burst_time,
            state: ProcessState::Unarrived,
            response_time: None,
            completion_time: None,
        }
    }

    /// A process is available once it has arrived and until it completes.
    pub fn is_available(&self, now: Ticks) -> bool {
        self.arrival_time <= now && self.state != ProcessState::Completed
    }
}

/// A finished process with every timing field filled in.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub struct CompletedProcess {
    pub pid: Pid,
    pub arrival_time: Ticks,
    pub burst_time: Ticks,
    pub completion_time: Ticks,
    pub turnaround_time: Ticks,
    pub waiting_time: Ticks,
    pub response_time: Ticks,
}

/// One contiguous stretch of the processor timeline.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub struct Slice {
    /// The process that ran, or [`None`] if the processor was idle.
    pub pid: Option<Pid>,
    pub start: Ticks,
    pub end: Ticks,
}

impl Slice {
    pub fn duration(&self) -> Ticks {
        self.end - self.start
    }

    pub fn is_idle(&self) -> bool {
        self.pid.is_none()
    }
}

impl Display for Slice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.pid {
            Some(pid) => write!(f, "[{}-{} P{}]", self.start, self.end, pid),
            None => write!(f, "[{}-{} idle]", self.start, self.end),
        }
    }
}

/// The outcome of simulating one policy over one process set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Schedule {
    pub policy: Policy,
    /// The time quantum, for policies that use one.
    pub quantum: Option<NonZeroU64>,
    /// Finished processes, in completion order.
    pub completed: Vec<CompletedProcess>,
    /// The clock value when the last process completed.
    pub final_clock: Ticks,
    pub timeline: Vec<Slice>,
}

impl Schedule {
    /// Time the processor spent running processes.
    pub fn busy_time(&self) -> Ticks {
        self.timeline
            .iter()
            .filter(|slice| !slice.is_idle())
            .map(Slice::duration)
            .sum()
    }

    pub fn idle_time(&self) -> Ticks {
        self.timeline
            .iter()
            .filter(|slice| slice.is_idle())
            .map(Slice::duration)
            .sum()
    }

    pub fn completion_order(&self) -> Vec<Pid> {
        self.completed.iter().map(|process| process.pid).collect()
    }

    pub fn get(&self, pid: Pid) -> Option<&CompletedProcess> {
        self.completed.iter().find(|process| process.pid == pid)
    }
}

/// The action that the scheduler asks the simulation to take.
///
/// This is returned by the [`Scheduler::next`] function.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SchedulingDecision {
    /// Run the process with PID `pid` for a maximum of `timeslice` time units.
    Run { pid: Pid, timeslice: NonZeroU64 },

    /// There are no more processes to schedule.
    Done,
}

impl Display for SchedulingDecision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SchedulingDecision::Run { pid, timeslice } => {
                write!(f, "Run {} for {} ticks", pid, timeslice)
            }
            SchedulingDecision::Done => {
                write!(f, "Done, no more processes")
            }
        }
    }
}

/// The reason that a process has stopped and the simulation
/// has called the scheduler.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum StopReason {
    /// The timeslice has expired and the process still needs time.
    Expired,

    /// The process has consumed its whole burst.
    Completed,
}

impl Display for StopReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StopReason::Expired => write!(f, "Expired"),
            StopReason::Completed => write!(f, "Completed"),
        }
    }
}

/// The trait that any scheduling policy has to implement.
///
/// The [`Simulation`] owns the clock and the process records. Before every
/// call to [`Scheduler::next`] it guarantees that at least one process is
/// available, jumping the clock forward if needed.
pub trait Scheduler: Send {
    /// The policy this scheduler implements.
    fn policy(&self) -> Policy;

    /// The time quantum, if the policy uses one.
    fn quantum(&self) -> Option<NonZeroU64> {
        None
    }

    /// Returns the action that the simulation has to perform next.
    fn next(&mut self, sim: &Simulation) -> SchedulingDecision;

    /// The scheduler is informed about the stopping of a process
    /// and the reason. `sim.now()` is already the end of the slice.
    fn stop(&mut self, _sim: &Simulation, _pid: Pid, _reason: StopReason) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn decisions_and_stops_render_for_logs() {
        let run = SchedulingDecision::Run {
            pid: Pid::new(3),
            timeslice: NonZeroU64::new(2).unwrap(),
        };
        assert_eq!(run.to_string(), "Run 3 for 2 ticks");
        assert_eq!(SchedulingDecision::Done.to_string(), "Done, no more processes");
        assert_eq!(StopReason::Expired.to_string(), "Expired");
        assert_eq!(ProcessState::Ready.to_string(), "READY");
    }

    #[test]
    fn slices_render_owner_or_idle() {
        let busy = Slice {
            pid: Some(Pid::new(4)),
            start: 5,
            end: 9,
        };
        let idle = Slice {
            pid: None,
            start: 0,
            end: 5,
        };
        assert_eq!(busy.to_string(), "[5-9 P4]");
        assert_eq!(idle.to_string(), "[0-5 idle]");
        assert_eq!(busy.duration(), 4);
        assert!(idle.is_idle());
    }
}
