//! A scheduling simulation library.
//!
//! This library simulates single-processor scheduling policies over a fixed
//! set of processes and reports, for every process, when it completed and how
//! long it waited.
//!
//! ```rust
//! use scheduler::{run, Policy, ProcessSpec};
//!
//! let processes: Vec<ProcessSpec> = [(1, 0, 10), (2, 1, 6), (3, 3, 2), (4, 5, 4)]
//!     .into_iter()
//!     .map(ProcessSpec::from)
//!     .collect();
//!
//! let schedule = run(Policy::RoundRobin, &processes, Some(2)).unwrap();
//! assert_eq!(schedule.final_clock, 22);
//! ```

use std::num::NonZeroU64;

mod error;
mod policy;
mod scheduler;
mod simulation;

pub mod schedulers;

pub use crate::error::SchedulerError;
pub use crate::policy::Policy;
pub use crate::scheduler::{
    CompletedProcess, Pid, Process, ProcessSpec, ProcessState, Schedule, Scheduler,
    SchedulingDecision, Slice, StopReason, Ticks,
};
pub use crate::simulation::Simulation;

use schedulers::{Fcfs, RoundRobin, ShortestJobFirst, ShortestRemainingTimeFirst};

/// Returns a structure that implements the `Scheduler` trait with a first come first served policy
pub fn fcfs() -> impl Scheduler {
    Fcfs::new()
}

/// Returns a structure that implements the `Scheduler` trait with a non-preemptive shortest job first policy
pub fn sjf() -> impl Scheduler {
    ShortestJobFirst
}

/// Returns a structure that implements the `Scheduler` trait with a shortest remaining time first policy
pub fn srtf() -> impl Scheduler {
    ShortestRemainingTimeFirst
}

/// Returns a structure that implements the `Scheduler` trait with a round robin scheduler policy
///
/// * `timeslice` - the time quanta that a process can run before it is preempted
pub fn round_robin(timeslice: NonZeroU64) -> impl Scheduler {
    RoundRobin::new(timeslice)
}

/// Simulate `scheduler` over its own copy of `processes`.
pub fn simulate<S: Scheduler>(
    mut scheduler: S,
    processes: &[ProcessSpec],
) -> Result<Schedule, SchedulerError> {
    Simulation::new(processes)?.drive(&mut scheduler)
}

/// Simulate `policy` over `processes`.
///
/// * `quantum` - the round robin time quantum; ignored by the other policies.
///
/// The input is validated before the first tick: an empty set, a duplicate
/// id, a negative arrival or a non-positive burst fail with
/// [`SchedulerError::InvalidInput`], a missing or zero quantum for round robin
/// fails with [`SchedulerError::InvalidConfiguration`].
pub fn run(
    policy: Policy,
    processes: &[ProcessSpec],
    quantum: Option<Ticks>,
) -> Result<Schedule, SchedulerError> {
    let sim = Simulation::new(processes)?;
    let mut scheduler = build(policy, quantum)?;
    sim.drive(scheduler.as_mut())
}

/// Build the scheduler for `policy`.
pub fn build(
    policy: Policy,
    quantum: Option<Ticks>,
) -> Result<Box<dyn Scheduler>, SchedulerError> {
    Ok(match policy {
        Policy::Fcfs => Box::new(fcfs()),
        Policy::Sjf => Box::new(sjf()),
        Policy::Srtf => Box::new(srtf()),
        Policy::RoundRobin => {
            let timeslice = quantum.and_then(NonZeroU64::new).ok_or_else(|| {
                SchedulerError::invalid_configuration(format!(
                    "round robin needs a positive quantum, got {quantum:?}"
                ))
            })?;
            Box::new(round_robin(timeslice))
        }
    })
}
