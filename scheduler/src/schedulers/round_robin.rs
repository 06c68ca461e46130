use std::collections::VecDeque;
use std::num::NonZeroU64;

use crate::SchedulingDecision::{Done, Run};
use crate::{Pid, Policy, Scheduler, SchedulingDecision, Simulation, StopReason, Ticks};

/// Round robin with a fixed time quantum.
///
/// The ready queue is FIFO. Arrivals are admitted ordered by arrival time,
/// then by pid. A process whose slice expires is requeued only after every
/// process that arrived during that slice has been admitted.
pub struct RoundRobin {
    ready_queue: VecDeque<Pid>,
    pending: Option<VecDeque<(Ticks, Pid)>>,
    timeslice: NonZeroU64,
}

impl RoundRobin {
    pub fn new(timeslice: NonZeroU64) -> Self {
        RoundRobin {
            ready_queue: VecDeque::new(),
            pending: None,
            timeslice,
        }
    }

    fn admit(&mut self, sim: &Simulation) {
        let pending = self.pending.get_or_insert_with(|| {
            let mut arrivals: Vec<(Ticks, Pid)> = sim
                .processes()
                .iter()
                .map(|process| (process.arrival_time, process.pid))
                .collect();
            arrivals.sort_unstable();
            arrivals.into()
        });

        while let Some(&(arrival, pid)) = pending.front() {
            if arrival > sim.now() {
                break;
            }
            pending.pop_front();
            self.ready_queue.push_back(pid);
        }
    }
}

impl Scheduler for RoundRobin {
    fn policy(&self) -> Policy {
        Policy::RoundRobin
    }

    fn quantum(&self) -> Option<NonZeroU64> {
        Some(self.timeslice)
    }

    fn next(&mut self, sim: &Simulation) -> SchedulingDecision {
        self.admit(sim);
        match self.ready_queue.pop_front() {
            Some(pid) => Run {
                pid,
                timeslice: self.timeslice,
            },
            None => Done,
        }
    }

    fn stop(&mut self, sim: &Simulation, pid: Pid, reason: StopReason) {
        self.admit(sim);
        if reason == StopReason::Expired {
            self.ready_queue.push_back(pid);
        }
    }
}
