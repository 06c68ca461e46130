use std::num::NonZeroU64;

use crate::SchedulingDecision::{Done, Run};
use crate::{Policy, Scheduler, SchedulingDecision, Simulation};

/// Shortest Job First.
///
/// At every decision point the available process with the smallest burst
/// runs to completion. Shorter arrivals never preempt it.
pub struct ShortestJobFirst;

impl Scheduler for ShortestJobFirst {
    fn policy(&self) -> Policy {
        Policy::Sjf
    }

    fn next(&mut self, sim: &Simulation) -> SchedulingDecision {
        let candidate = sim.min_available_by_key(|process| {
            (process.burst_time, process.arrival_time, process.pid)
        });
        match candidate {
            Some(process) => match NonZeroU64::new(process.remaining_time) {
                Some(timeslice) => Run {
                    pid: process.pid,
                    timeslice,
                },
                None => Done,
            },
            None => Done,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{simulate, Pid, ProcessSpec};
    use pretty_assertions::assert_eq;

    fn specs(list: &[(usize, i64, i64)]) -> Vec<ProcessSpec> {
        list.iter().copied().map(ProcessSpec::from).collect()
    }

    #[test]
    fn does_not_preempt_on_shorter_arrival() {
        let schedule = simulate(ShortestJobFirst, &specs(&[(1, 0, 8), (2, 1, 1)])).unwrap();
        assert_eq!(schedule.completion_order(), vec![Pid::new(1), Pid::new(2)]);
        assert_eq!(schedule.get(Pid::new(2)).unwrap().completion_time, 9);
    }

    #[test]
    fn equal_bursts_prefer_earlier_arrival_then_lower_id() {
        let schedule = simulate(
            ShortestJobFirst,
            &specs(&[(1, 0, 5), (4, 2, 3), (3, 1, 3), (2, 2, 3)]),
        )
        .unwrap();
        assert_eq!(
            schedule.completion_order(),
            vec![Pid::new(1), Pid::new(3), Pid::new(2), Pid::new(4)]
        );
    }
}
