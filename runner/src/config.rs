//! Runner configuration, read from environment variables.
//!
//! - `QUANTUM`: round robin time quantum (default: 2)
//! - `POLICIES`: comma separated policies to run (default: all)
//! - `DATASET`: path to a JSON array of `{id, arrival_time, burst_time}`
//! - `REPORT_FORMAT`: `text` or `json` (default: text)

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{bail, Context};
use scheduler::{Policy, Ticks};

pub const DEFAULT_QUANTUM: Ticks = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Text,
    Json,
}

impl FromStr for ReportFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" | "txt" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => bail!("invalid report format '{other}', valid: text, json"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub quantum: Ticks,
    pub policies: Vec<Policy>,
    pub dataset: Option<PathBuf>,
    pub format: ReportFormat,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            quantum: DEFAULT_QUANTUM,
            policies: Policy::ALL.to_vec(),
            dataset: None,
            format: ReportFormat::Text,
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(quantum) = lookup("QUANTUM") {
            config.quantum = quantum.trim().parse().with_context(|| {
                format!("QUANTUM must be a non-negative integer, got '{quantum}'")
            })?;
        }

        if let Some(policies) = lookup("POLICIES") {
            config.policies = policies
                .split(',')
                .filter(|name| !name.trim().is_empty())
                .map(|name| name.parse::<Policy>())
                .collect::<Result<Vec<_>, _>>()
                .context("invalid POLICIES")?;
            if config.policies.is_empty() {
                bail!("POLICIES must name at least one policy");
            }
        }

        config.dataset = lookup("DATASET")
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from);

        if let Some(format) = lookup("REPORT_FORMAT") {
            config.format = format.parse()?;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> anyhow::Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults() {
        assert_eq!(config(&[]).unwrap(), Config::default());
    }

    #[test]
    fn reads_every_variable() {
        let config = config(&[
            ("QUANTUM", "4"),
            ("POLICIES", "rr, fcfs"),
            ("DATASET", "jobs.json"),
            ("REPORT_FORMAT", "JSON"),
        ])
        .unwrap();

        assert_eq!(config.quantum, 4);
        assert_eq!(config.policies, vec![Policy::RoundRobin, Policy::Fcfs]);
        assert_eq!(config.dataset, Some(PathBuf::from("jobs.json")));
        assert_eq!(config.format, ReportFormat::Json);
    }

    #[test]
    fn rejects_malformed_values() {
        assert!(config(&[("QUANTUM", "two")]).is_err());
        assert!(config(&[("QUANTUM", "-1")]).is_err());
        assert!(config(&[("POLICIES", "fcfs,lottery")]).is_err());
        assert!(config(&[("POLICIES", " , ")]).is_err());
        assert!(config(&[("REPORT_FORMAT", "xml")]).is_err());
    }

    #[test]
    fn zero_quantum_is_left_to_the_scheduler() {
        // Round robin rejects it with its own error, the other policies ignore it.
        assert_eq!(config(&[("QUANTUM", "0")]).unwrap().quantum, 0);
    }
}
