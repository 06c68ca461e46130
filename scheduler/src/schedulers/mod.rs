//! The scheduling policies.
//!
//! Each policy only decides *who* runs next and for how long; arrival
//! gating, the clock and all bookkeeping live in [`Simulation`](crate::Simulation).
//!
mod fcfs;
pub use fcfs::Fcfs;

mod sjf;
pub use sjf::ShortestJobFirst;

mod srtf;
pub use srtf::ShortestRemainingTimeFirst;

mod round_robin;
pub use round_robin::RoundRobin;
