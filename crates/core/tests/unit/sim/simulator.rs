//! File-driven simulator tests.

use std::fs;
use std::path::Path;

use pretty_assertions::assert_eq;
use rrsim_core::common::Pid;
use rrsim_core::config::Config;
use rrsim_core::sim::trace::MemorySink;
use rrsim_core::{SimError, Simulator};
use tempfile::TempDir;

/// Lays out a creation-order file and a process directory under `root`.
fn fixture(root: &Path, orders: &str, processes: &[(&str, &str)]) -> Config {
    let procs = root.join("Procesos");
    fs::create_dir_all(&procs).unwrap();
    fs::write(root.join("Creacion_Procesos.txt"), orders).unwrap();
    for (name, tape) in processes {
        fs::write(procs.join(format!("{name}.txt")), tape).unwrap();
    }

    let mut config = Config::default();
    config.input.orders_file = root.join("Creacion_Procesos.txt");
    config.input.process_dir = procs;
    config
}

#[test]
fn test_simulator_runs_loaded_processes() {
    let dir = TempDir::new().unwrap();
    let mut config = fixture(
        dir.path(),
        "# time file\n0 init\n1 P1\n",
        &[("despachador", "I\nI\nI\n"), ("P1", "I\nES\nI\n")],
    );
    config.scheduler.burst = 2;
    config.scheduler.quantum = 3;

    let mut sim = Simulator::new(&config).unwrap();
    let mut sink = MemorySink::new();
    let stats = sim.run(&mut sink).unwrap();

    assert_eq!(
        sink.lines(),
        vec![
            "2 I Proceso_100 2 I",
            "4 ES Proceso_1 2 I",
            "5 I Proceso_100 3",
        ]
    );
    assert_eq!(stats.preemptions, 0);
    assert_eq!(sim.dispatcher().blocked_pids(), vec![Pid(1)]);
}

#[test]
fn test_non_numeric_order_line_is_skipped() {
    let dir = TempDir::new().unwrap();
    let config = fixture(
        dir.path(),
        "0 init\nabc P1\n1 P2\n",
        &[("despachador", "I\n"), ("P2", "I\n")],
    );

    let mut sim = Simulator::new(&config).unwrap();
    let mut sink = MemorySink::new();
    let _ = sim.run(&mut sink).unwrap();

    assert_eq!(sink.lines(), vec!["1 I Proceso_100 1", "2 I Proceso_1 1"]);
}

#[test]
fn test_empty_process_file_aborts_before_tracing() {
    let dir = TempDir::new().unwrap();
    let config = fixture(
        dir.path(),
        "0 init\n1 P1\n",
        &[("despachador", "I\n"), ("P1", "")],
    );

    let err = Simulator::new(&config).unwrap_err();
    assert!(matches!(err, SimError::Load { .. }));
}

#[test]
fn test_invalid_config_aborts_before_loading() {
    let mut config = Config::default();
    config.scheduler.quantum = 0;
    // The default input paths do not exist; validation must fail first.
    config.input.orders_file = "/nonexistent/orders.txt".into();

    let err = Simulator::new(&config).unwrap_err();
    assert!(matches!(err, SimError::Config(_)));
}

#[test]
fn test_seeded_runs_are_reproducible() {
    let dir = TempDir::new().unwrap();
    let mut config = fixture(
        dir.path(),
        "0 init\n1 P1\n2 P2\n",
        &[
            ("despachador", "I\nF\nI\n"),
            ("P1", "F\nI\nI\nF\n"),
            ("P2", "I\nI\nF\nI\n"),
        ],
    );
    config.scheduler.burst = 2;
    config.scheduler.quantum = 3;
    config.scheduler.finish_denominator = 3;
    config.scheduler.seed = Some(2024);
    config.scheduler.max_dispatches = Some(10_000);

    let trace = |config: &Config| {
        let mut sim = Simulator::new(config).unwrap();
        let mut sink = MemorySink::new();
        let stats = sim.run(&mut sink).unwrap();
        (sink.lines(), stats.preemptions)
    };
    assert_eq!(trace(&config), trace(&config));
}
