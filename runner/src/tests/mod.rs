use std::env;
use std::fs;

use processor::{format_reports, Processor};
use scheduler::{Policy, ProcessSpec, Ticks};

mod gaps;

fn write_logs(folder: &str, name: &str, logs: &str) {
    let quantum = quantum();
    fs::create_dir_all(format!("../outputs/{folder}")).unwrap();
    fs::write(format!("../outputs/{folder}/{name}___{quantum}.log"), logs).unwrap();
}

fn read_logs(folder: &str, name: &str) -> String {
    let quantum = quantum();
    fs::read_to_string(format!("../outputs/{folder}/{name}___{quantum}.log")).unwrap()
}

fn run(folder: &str, name: &str, output: &str) {
    if env::var("WRITE_OUTPUT").is_ok() {
        write_logs(folder, name, output);
    } else {
        let reference = read_logs(folder, name);

        println!("\nleft = Correct Output\nright = Your Output\n");
        use pretty_assertions::assert_eq;
        assert_eq!(reference, output);
    }
}

fn quantum() -> Ticks {
    env::var("QUANTUM")
        .unwrap_or("2".to_string())
        .parse::<Ticks>()
        .unwrap()
}

/// Simulate every policy over `processes` and render the reports.
fn simulate(processes: &[(usize, i64, i64)]) -> String {
    let processes: Vec<ProcessSpec> = processes.iter().copied().map(ProcessSpec::from).collect();
    let outcomes = Processor::run_all(&processes, &Policy::ALL, Some(quantum()));
    format_reports(&crate::reports(outcomes))
}
