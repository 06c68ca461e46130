//! A processor simulation library
//!
//! This is used for running the policies from the [`scheduler`] crate side by
//! side over the same process set and for reporting their results.

use std::fmt::{self, Display, Write};
use std::num::NonZeroU64;
use std::thread;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

use scheduler::{CompletedProcess, Policy, ProcessSpec, Schedule, SchedulerError, Slice, Ticks};

/// Errors raised while running or reporting a policy.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProcessorError {
    #[error(transparent)]
    Simulation(#[from] SchedulerError),

    /// The worker simulating `policy` panicked.
    #[error("worker for {policy:?} panicked")]
    WorkerPanicked { policy: Policy },

    /// Averages are undefined over an empty set.
    #[error("no completed processes to report for {policy:?}")]
    NoCompletedProcesses { policy: Policy },

    /// Utilization is undefined when no time has passed.
    #[error("final clock is zero for {policy:?}")]
    ZeroClock { policy: Policy },
}

/// The result of one policy run.
#[derive(Debug)]
pub struct Outcome {
    pub policy: Policy,
    pub result: Result<Schedule, ProcessorError>,
}

/// The processor simulator.
pub struct Processor;

impl Processor {
    /// Simulate every policy in `policies` over `processes`.
    ///
    /// * `quantum` - the time quanta used by round robin.
    ///
    /// Each policy runs on its own worker thread with its own copy of the
    /// input. Outcomes come back in the order of `policies`.
    ///
    /// ## Example
    ///
    /// ```rust
    /// use processor::Processor;
    /// use scheduler::{Policy, ProcessSpec};
    ///
    /// let processes = [ProcessSpec::new(1, 0, 3), ProcessSpec::new(2, 1, 2)];
    /// let outcomes = Processor::run_all(&processes, &Policy::ALL, Some(2));
    ///
    /// assert_eq!(outcomes.len(), 4);
    /// assert!(outcomes.iter().all(|outcome| outcome.result.is_ok()));
    /// ```
    pub fn run_all(
        processes: &[ProcessSpec],
        policies: &[Policy],
        quantum: Option<Ticks>,
    ) -> Vec<Outcome> {
        thread::scope(|s| {
            let workers: Vec<_> = policies
                .iter()
                .map(|&policy| {
                    let input = processes.to_vec();
                    let worker = s.spawn(move || {
                        debug!(policy = policy.as_str(), "worker started");
                        scheduler::run(policy, &input, quantum)
                    });
                    (policy, worker)
                })
                .collect();

            workers
                .into_iter()
                .map(|(policy, worker)| {
                    let result = match worker.join() {
                        Ok(result) => result.map_err(ProcessorError::from),
                        Err(_) => Err(ProcessorError::WorkerPanicked { policy }),
                    };
                    if let Err(err) = &result {
                        warn!(policy = policy.as_str(), error = %err, "policy run failed");
                    }
                    Outcome { policy, result }
                })
                .collect()
        })
    }
}

/// The summary of one policy run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub title: String,
    pub policy: Policy,
    pub quantum: Option<NonZeroU64>,
    /// Finished processes, in completion order.
    pub processes: Vec<CompletedProcess>,
    pub timeline: Vec<Slice>,
    pub final_clock: Ticks,
    pub average_turnaround_time: f64,
    pub average_waiting_time: f64,
    pub average_response_time: f64,
    /// Percentage of the run the processor was busy.
    pub cpu_utilization: f64,
}

impl Report {
    pub fn new(schedule: &Schedule) -> Result<Report, ProcessorError> {
        let policy = schedule.policy;
        if schedule.completed.is_empty() {
            return Err(ProcessorError::NoCompletedProcesses { policy });
        }
        if schedule.final_clock == 0 {
            return Err(ProcessorError::ZeroClock { policy });
        }

        // Sums are widened: each time fits the clock, their total may not.
        let count = schedule.completed.len() as f64;
        let total = |field: fn(&CompletedProcess) -> Ticks| -> u128 {
            schedule.completed.iter().map(|p| u128::from(field(p))).sum()
        };
        let average = |field: fn(&CompletedProcess) -> Ticks| total(field) as f64 / count;
        let total_burst = total(|p| p.burst_time);

        Ok(Report {
            title: title(policy, schedule.quantum),
            policy,
            quantum: schedule.quantum,
            processes: schedule.completed.clone(),
            timeline: schedule.timeline.clone(),
            final_clock: schedule.final_clock,
            average_turnaround_time: average(|p| p.turnaround_time),
            average_waiting_time: average(|p| p.waiting_time),
            average_response_time: average(|p| p.response_time),
            cpu_utilization: 100.0 * total_burst as f64 / schedule.final_clock as f64,
        })
    }
}

fn title(policy: Policy, quantum: Option<NonZeroU64>) -> String {
    match quantum.filter(|_| policy.needs_quantum()) {
        Some(quantum) => format!("{policy} with Time Quantum = {quantum}"),
        None => policy.to_string(),
    }
}

impl Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "PID\tARRIVAL\tBURST\tCOMPLETE\tTURNAROUND\tWAITING\tRESPONSE")?;
        for p in &self.processes {
            writeln!(
                f,
                "{}\t{}\t{}\t{}\t{}\t{}\t{}",
                p.pid,
                p.arrival_time,
                p.burst_time,
                p.completion_time,
                p.turnaround_time,
                p.waiting_time,
                p.response_time
            )?;
        }

        write!(f, "Timeline:")?;
        for slice in &self.timeline {
            write!(f, " {slice}")?;
        }
        writeln!(f)?;

        writeln!(f, "Average Turnaround Time: {:.2}", self.average_turnaround_time)?;
        writeln!(f, "Average Waiting Time: {:.2}", self.average_waiting_time)?;
        writeln!(f, "Average Response Time: {:.2}", self.average_response_time)?;
        writeln!(f, "CPU Utilization: {:.2}%", self.cpu_utilization)
    }
}

/// Format the [`Report`]s to a [`String`].
///
/// * `reports` - the reports built from the [`Processor`]'s outcomes.
///
/// ## Example
///
/// ```rust
/// use processor::{format_reports, Processor, Report};
/// use scheduler::{Policy, ProcessSpec};
///
/// let processes = [ProcessSpec::new(1, 0, 3)];
/// let reports: Vec<Report> = Processor::run_all(&processes, &[Policy::Fcfs], None)
///     .into_iter()
///     .filter_map(|outcome| outcome.result.ok())
///     .filter_map(|schedule| Report::new(&schedule).ok())
///     .collect();
///
/// println!("{}", format_reports(&reports));
/// ```
pub fn format_reports(reports: &[Report]) -> String {
    let mut s = String::new();
    for report in reports {
        // Writing into a String cannot fail.
        let _ = writeln!(s, "===== {} =====\n{}", report.title, report);
    }
    s
}
