//! Process sets fed to the scheduler.

use std::fs;
use std::path::Path;

use anyhow::Context;
use scheduler::ProcessSpec;

/// The reference workload: `(id, arrival, burst)`.
pub const DEMO: [(usize, i64, i64); 4] = [(1, 0, 10), (2, 1, 6), (3, 3, 2), (4, 5, 4)];

pub fn demo() -> Vec<ProcessSpec> {
    DEMO.into_iter().map(ProcessSpec::from).collect()
}

/// Parse a JSON array of `{"id", "arrival_time", "burst_time"}` objects.
pub fn parse(json: &str) -> anyhow::Result<Vec<ProcessSpec>> {
    serde_json::from_str(json).context("malformed process set")
}

pub fn load(path: &Path) -> anyhow::Result<Vec<ProcessSpec>> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read dataset {}", path.display()))?;
    parse(&json).with_context(|| format!("failed to load dataset {}", path.display()))
}
