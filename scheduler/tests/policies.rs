//! End-to-end behaviour of every policy on small, hand-checked datasets.

use pretty_assertions::assert_eq;
use scheduler::{run, Pid, Policy, ProcessSpec, Schedule, SchedulerError, Ticks};

fn demo() -> Vec<ProcessSpec> {
    [(1, 0, 10), (2, 1, 6), (3, 3, 2), (4, 5, 4)]
        .into_iter()
        .map(ProcessSpec::from)
        .collect()
}

fn pids(list: &[usize]) -> Vec<Pid> {
    list.iter().copied().map(Pid::new).collect()
}

fn completions(schedule: &Schedule) -> Vec<(usize, Ticks)> {
    schedule
        .completed
        .iter()
        .map(|process| (process.pid.get(), process.completion_time))
        .collect()
}

fn run_demo(policy: Policy) -> Schedule {
    run(policy, &demo(), Some(2)).unwrap()
}

#[test]
fn fcfs_runs_in_arrival_order() {
    let schedule = run_demo(Policy::Fcfs);
    assert_eq!(schedule.completion_order(), pids(&[1, 2, 3, 4]));
    assert_eq!(completions(&schedule), vec![(1, 10), (2, 16), (3, 18), (4, 22)]);
    assert_eq!(schedule.final_clock, 22);
}

#[test]
fn sjf_picks_shortest_burst_at_each_completion() {
    let schedule = run_demo(Policy::Sjf);
    assert_eq!(completions(&schedule), vec![(1, 10), (3, 12), (4, 16), (2, 22)]);
}

#[test]
fn srtf_preempts_on_shorter_remaining_time() {
    let schedule = run_demo(Policy::Srtf);
    assert_eq!(completions(&schedule), vec![(3, 5), (2, 9), (4, 13), (1, 22)]);

    let responses: Vec<Ticks> = [1, 2, 3, 4]
        .into_iter()
        .map(|pid| schedule.get(Pid::new(pid)).unwrap().response_time)
        .collect();
    assert_eq!(responses, vec![0, 0, 0, 4]);
}

#[test]
fn round_robin_rotates_with_quantum() {
    let schedule = run_demo(Policy::RoundRobin);
    assert_eq!(completions(&schedule), vec![(3, 8), (2, 16), (4, 18), (1, 22)]);

    let responses: Vec<Ticks> = [1, 2, 3, 4]
        .into_iter()
        .map(|pid| schedule.get(Pid::new(pid)).unwrap().response_time)
        .collect();
    assert_eq!(responses, vec![0, 1, 3, 5]);
    assert_eq!(schedule.timeline.len(), 10);
}

#[test]
fn preemptive_policies_run_each_process_for_exactly_its_burst() {
    for policy in [Policy::Srtf, Policy::RoundRobin] {
        let schedule = run_demo(policy);
        for spec in demo() {
            let ran: Ticks = schedule
                .timeline
                .iter()
                .filter(|slice| slice.pid == Some(spec.id))
                .map(|slice| slice.duration())
                .sum();
            assert_eq!(ran as i64, spec.burst_time, "{policy:?} pid {}", spec.id);

            let completed = schedule
                .completed
                .iter()
                .filter(|process| process.pid == spec.id)
                .count();
            assert_eq!(completed, 1, "{policy:?} pid {}", spec.id);
        }
    }
}

#[test]
fn rerunning_yields_identical_schedules() {
    let input = demo();
    for policy in Policy::ALL {
        let first = run(policy, &input, Some(2)).unwrap();
        let second = run(policy, &input, Some(2)).unwrap();
        assert_eq!(first, second);
    }
    assert_eq!(input, demo());
}

#[test]
fn single_process_never_waits() {
    let input = [ProcessSpec::new(42, 7, 5)];
    for policy in Policy::ALL {
        let schedule = run(policy, &input, Some(3)).unwrap();
        let process = schedule.completed[0];
        assert_eq!(process.waiting_time, 0, "{policy:?}");
        assert_eq!(process.response_time, 0, "{policy:?}");
        assert_eq!(process.completion_time, 12, "{policy:?}");
        assert_eq!(schedule.idle_time(), 7, "{policy:?}");
    }
}

#[test]
fn empty_input_is_rejected_by_every_policy() {
    for policy in Policy::ALL {
        let err = run(policy, &[], Some(2)).unwrap_err();
        assert!(matches!(err, SchedulerError::InvalidInput(_)), "{policy:?}");
    }
}

#[test]
fn round_robin_requires_a_positive_quantum() {
    for quantum in [None, Some(0)] {
        let err = run(Policy::RoundRobin, &demo(), quantum).unwrap_err();
        assert!(
            matches!(err, SchedulerError::InvalidConfiguration(_)),
            "{quantum:?}"
        );
    }
}

#[test]
fn quantum_is_ignored_by_other_policies() {
    for policy in [Policy::Fcfs, Policy::Sjf, Policy::Srtf] {
        let schedule = run(policy, &demo(), None).unwrap();
        assert_eq!(schedule.quantum, None);
        assert_eq!(schedule, run(policy, &demo(), Some(0)).unwrap());
    }
}

#[test]
fn invalid_input_wins_over_invalid_configuration() {
    let err = run(Policy::RoundRobin, &[], Some(0)).unwrap_err();
    assert!(matches!(err, SchedulerError::InvalidInput(_)));
}
