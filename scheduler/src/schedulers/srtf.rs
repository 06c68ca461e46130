use std::num::NonZeroU64;

use crate::SchedulingDecision::{Done, Run};
use crate::{Policy, Scheduler, SchedulingDecision, Simulation};

const TICK: NonZeroU64 = NonZeroU64::MIN;

/// Shortest Remaining Time First.
///
/// Re-evaluated on every tick: the available process with the least
/// remaining time runs for one unit, so any arrival can preempt it.
pub struct ShortestRemainingTimeFirst;

impl Scheduler for ShortestRemainingTimeFirst {
    fn policy(&self) -> Policy {
        Policy::Srtf
    }

    fn next(&mut self, sim: &Simulation) -> SchedulingDecision {
        let candidate = sim.min_available_by_key(|process| {
            (process.remaining_time, process.arrival_time, process.pid)
        });
        match candidate {
            Some(process) => Run {
                pid: process.pid,
                timeslice: TICK,
            },
            None => Done,
        }
    }
}
