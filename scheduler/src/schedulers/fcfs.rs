use std::num::NonZeroU64;

use crate::SchedulingDecision::{Done, Run};
use crate::{Pid, Policy, Process, Scheduler, SchedulingDecision, Simulation, StopReason};

/// First-Come-First-Served.
///
/// Processes run to completion strictly in arrival order; equal arrivals
/// keep their input order.
pub struct Fcfs {
    order: Vec<Pid>,
    cursor: usize,
}

impl Fcfs {
    pub fn new() -> Self {
        Fcfs {
            order: Vec::new(),
            cursor: 0,
        }
    }

    // Built lazily, on the first decision, from the simulation's input order.
    fn order(&mut self, sim: &Simulation) -> &[Pid] {
        if self.order.is_empty() {
            let mut processes: Vec<&Process> = sim.processes().iter().collect();
            processes.sort_by_key(|process| process.arrival_time);
            self.order = processes.into_iter().map(|process| process.pid).collect();
        }
        &self.order
    }
}

impl Default for Fcfs {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler for Fcfs {
    fn policy(&self) -> Policy {
        Policy::Fcfs
    }

    fn next(&mut self, sim: &Simulation) -> SchedulingDecision {
        let cursor = self.cursor;
        let Some(&pid) = self.order(sim).get(cursor) else {
            return Done;
        };
        match sim.process(pid).and_then(|process| NonZeroU64::new(process.remaining_time)) {
            Some(timeslice) => Run { pid, timeslice },
            None => Done,
        }
    }

    fn stop(&mut self, _sim: &Simulation, _pid: Pid, reason: StopReason) {
        if reason == StopReason::Completed {
            self.cursor += 1;
        }
    }
}
