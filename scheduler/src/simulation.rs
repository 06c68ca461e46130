//! The discrete-event core shared by every policy.
//!
//! A [`Simulation`] owns an independent copy of the process set, the virtual
//! clock and the timeline. Policies never touch that state directly: they
//! observe it through `&Simulation` and answer with a
//! [`SchedulingDecision`], which the driver loop executes.

use std::collections::HashMap;
use std::num::NonZeroU64;

use tracing::{debug, info, info_span, trace};

use crate::{
    CompletedProcess, Pid, Process, ProcessSpec, ProcessState, Schedule, Scheduler,
    SchedulerError, SchedulingDecision, Slice, StopReason, Ticks,
};

#[derive(Debug)]
pub struct Simulation {
    now: Ticks,
    // Input order; policies that care about input order rely on it.
    processes: Vec<Process>,
    // Pid --> processes[index]
    index: HashMap<Pid, usize>,
    completed: Vec<CompletedProcess>,
    timeline: Vec<Slice>,
    // Upper bound on the clock: max(arrival) + sum(burst)
    horizon: Ticks,
}

impl Simulation {
    /// Validate `specs` and build a fresh simulation at `t=0`.
    ///
    /// Fails with [`SchedulerError::InvalidInput`] if the set is empty, an id
    /// is repeated, an arrival is negative or a burst is not positive.
    pub fn new(specs: &[ProcessSpec]) -> Result<Self, SchedulerError> {
        if specs.is_empty() {
            return Err(SchedulerError::invalid_input("process set is empty"));
        }

        let mut processes = Vec::with_capacity(specs.len());
        let mut index = HashMap::with_capacity(specs.len());
        let mut total_burst: Ticks = 0;
        let mut last_arrival: Ticks = 0;

        for (position, spec) in specs.iter().enumerate() {
            let arrival_time = Ticks::try_from(spec.arrival_time).map_err(|_| {
                SchedulerError::invalid_input(format!(
                    "process {} has negative arrival time {}",
                    spec.id, spec.arrival_time
                ))
            })?;
            let burst_time = match Ticks::try_from(spec.burst_time) {
                Ok(burst) if burst > 0 => burst,
                _ => {
                    return Err(SchedulerError::invalid_input(format!(
                        "process {} has non-positive burst time {}",
                        spec.id, spec.burst_time
                    )))
                }
            };
            if index.insert(spec.id, position).is_some() {
                return Err(SchedulerError::invalid_input(format!(
                    "duplicate process id {}",
                    spec.id
                )));
            }

            total_burst = total_burst.checked_add(burst_time).ok_or_else(|| {
                SchedulerError::invalid_input("total burst time overflows the clock")
            })?;
            last_arrival = last_arrival.max(arrival_time);
            processes.push(Process::new(spec.id, arrival_time, burst_time));
        }

        let horizon = last_arrival
            .checked_add(total_burst)
            .ok_or_else(|| SchedulerError::invalid_input("timeline overflows the clock"))?;

        let mut sim = Simulation {
            now: 0,
            processes,
            index,
            completed: Vec::with_capacity(specs.len()),
            timeline: Vec::new(),
            horizon,
        };
        sim.admit_arrivals();
        Ok(sim)
    }

    pub fn now(&self) -> Ticks {
        self.now
    }

    /// All processes, in input order.
    pub fn processes(&self) -> &[Process] {
        &self.processes
    }

    pub fn process(&self, pid: Pid) -> Option<&Process> {
        self.index.get(&pid).map(|&index| &self.processes[index])
    }

    /// Processes that have arrived and are not completed, in input order.
    pub fn available(&self) -> impl Iterator<Item = &Process> + '_ {
        let now = self.now;
        self.processes
            .iter()
            .filter(move |process| process.is_available(now))
    }

    /// The available process with the smallest `key`.
    ///
    /// On equal keys the earliest in input order wins, so callers that need
    /// a total order should fold the pid into the key.
    pub fn min_available_by_key<K, F>(&self, key: F) -> Option<&Process>
    where
        K: Ord,
        F: FnMut(&&Process) -> K,
    {
        self.available().min_by_key(key)
    }

    /// The earliest arrival still in the future.
    pub fn next_arrival(&self) -> Option<Ticks> {
        self.processes
            .iter()
            .filter(|process| process.state == ProcessState::Unarrived)
            .map(|process| process.arrival_time)
            .min()
    }

    pub fn completed(&self) -> &[CompletedProcess] {
        &self.completed
    }

    pub fn timeline(&self) -> &[Slice] {
        &self.timeline
    }

    pub fn is_finished(&self) -> bool {
        self.completed.len() == self.processes.len()
    }

    /// Run `scheduler` until every process has completed.
    pub fn drive<S>(mut self, scheduler: &mut S) -> Result<Schedule, SchedulerError>
    where
        S: Scheduler + ?Sized,
    {
        let policy = scheduler.policy();
        let span = info_span!("simulate", policy = policy.as_str());
        let _guard = span.enter();

        while self.wait_for_arrival() {
            let decision = scheduler.next(&self);
            trace!(t = self.now, %decision, "decision");
            match decision {
                SchedulingDecision::Run { pid, timeslice } => {
                    let reason = self.execute(pid, timeslice)?;
                    trace!(t = self.now, pid = pid.get(), %reason, "stopped");
                    scheduler.stop(&self, pid, reason);
                }
                SchedulingDecision::Done => {
                    return Err(SchedulerError::Stalled {
                        now: self.now,
                        pid: None,
                        reason: "policy finished with processes still pending",
                    });
                }
            }
        }

        info!(
            final_clock = self.now,
            processes = self.completed.len(),
            "simulation finished"
        );

        Ok(Schedule {
            policy,
            quantum: scheduler.quantum(),
            completed: self.completed,
            final_clock: self.now,
            timeline: self.timeline,
        })
    }

    /// Arrival gating.
    ///
    /// Returns `false` once every process is completed. Otherwise makes sure
    /// at least one process is available, jumping the clock straight to the
    /// next arrival when the processor would sit idle.
    fn wait_for_arrival(&mut self) -> bool {
        if self.is_finished() {
            return false;
        }
        if self.available().next().is_some() {
            return true;
        }
        match self.next_arrival() {
            Some(arrival) => {
                self.idle_until(arrival);
                true
            }
            None => false,
        }
    }

    fn idle_until(&mut self, until: Ticks) {
        debug_assert!(until > self.now, "idle jump must move the clock forward");
        trace!(from = self.now, to = until, "processor idle");

        self.record(None, self.now, until);
        self.now = until;
        self.admit_arrivals();
    }

    /// Execute `pid` for at most `timeslice` ticks.
    fn execute(&mut self, pid: Pid, timeslice: NonZeroU64) -> Result<StopReason, SchedulerError> {
        let index = match self.index.get(&pid) {
            Some(&index) if self.processes[index].is_available(self.now) => index,
            _ => {
                return Err(SchedulerError::Stalled {
                    now: self.now,
                    pid: Some(pid),
                    reason: "policy picked a process that is not available",
                })
            }
        };

        self.dispatch(index);

        let start = self.now;
        let process = &mut self.processes[index];
        let amount = timeslice.get().min(process.remaining_time);
        process.remaining_time -= amount;
        let finished = process.remaining_time == 0;

        self.now += amount;
        debug_assert!(self.now <= self.horizon, "clock ran past its bound");
        self.record(Some(pid), start, self.now);
        self.admit_arrivals();

        if finished {
            self.complete(index);
            Ok(StopReason::Completed)
        } else {
            // Preempted: back to ready until the policy picks it again.
            self.mark_ready(index);
            Ok(StopReason::Expired)
        }
    }

    fn dispatch(&mut self, index: usize) {
        let pid = self.processes[index].pid;
        self.mark_running(index);

        // A process resuming right where it stopped is not a new dispatch.
        let resumed = matches!(
            self.timeline.last(),
            Some(last) if last.pid == Some(pid) && last.end == self.now
        );
        if !resumed {
            debug!(
                t = self.now,
                pid = pid.get(),
                remaining = self.processes[index].remaining_time,
                "dispatch"
            );
        }

        let now = self.now;
        let process = &mut self.processes[index];
        if process.response_time.is_none() {
            process.response_time = Some(now - process.arrival_time);
        }
    }

    fn complete(&mut self, index: usize) {
        let now = self.now;
        let process = &mut self.processes[index];
        debug_assert_eq!(
            process.state,
            ProcessState::Running,
            "Process {} must have been running before marked complete",
            process.pid
        );

        process.state = ProcessState::Completed;
        process.completion_time = Some(now);

        let turnaround_time = now - process.arrival_time;
        let record = CompletedProcess {
            pid: process.pid,
            arrival_time: process.arrival_time,
            burst_time: process.burst_time,
            completion_time: now,
            turnaround_time,
            waiting_time: turnaround_time - process.burst_time,
            response_time: process.response_time.unwrap_or_default(),
        };
        debug!(t = now, pid = process.pid.get(), turnaround = turnaround_time, "completed");
        self.completed.push(record);
    }

    fn admit_arrivals(&mut self) {
        let now = self.now;
        for process in self.processes.iter_mut() {
            if process.state == ProcessState::Unarrived && process.arrival_time <= now {
                process.state = ProcessState::Ready;
                trace!(t = now, pid = process.pid.get(), "arrived");
            }
        }
    }

    fn mark_running(&mut self, index: usize) {
        let process = &mut self.processes[index];
        debug_assert_eq!(
            process.state,
            ProcessState::Ready,
            "Process {} must be ready to run, but is {}",
            process.pid,
            process.state
        );
        process.state = ProcessState::Running;
    }

    fn mark_ready(&mut self, index: usize) {
        let process = &mut self.processes[index];
        debug_assert_eq!(
            process.state,
            ProcessState::Running,
            "Process {} must be running to be preempted, but is {}",
            process.pid,
            process.state
        );
        process.state = ProcessState::Ready;
    }

    // Adjacent slices of the same owner are merged.
    fn record(&mut self, pid: Option<Pid>, start: Ticks, end: Ticks) {
        match self.timeline.last_mut() {
            Some(last) if last.pid == pid && last.end == start => last.end = end,
            _ => self.timeline.push(Slice { pid, start, end }),
        }
    }
}
