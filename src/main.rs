//! u-cpusched CLI
//!
//! Runs a scheduling scenario to completion and prints the trace and metrics.

use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

use u_cpusched::config::{PlaybackConfig, SimulationConfig};
use u_cpusched::models::{Algorithm, EventKind, ProcessId};
use u_cpusched::playback::Playback;
use u_cpusched::scheduler::{Engine, RunSummary, SnapshotView};
use u_cpusched::workload::WorkloadGenerator;
use u_cpusched::SimError;

#[derive(Parser, Debug)]
#[command(name = "u-cpusched", version, about = "Tick-based CPU scheduling simulator")]
struct Args {
    /// Scheduling algorithm (FCFS, SJF, SRTF, RR). Overrides the scenario file.
    #[arg(short, long)]
    algorithm: Option<String>,

    /// Round-Robin quantum. Overrides the scenario file.
    #[arg(short, long)]
    quantum: Option<u64>,

    /// JSON scenario file
    #[arg(short, long)]
    input: Option<String>,

    /// Generate this many random processes instead of reading a file
    #[arg(short, long, default_value = "5")]
    random: usize,

    /// Seed for random workloads
    #[arg(short, long, default_value = "42")]
    seed: u64,

    /// Latest arrival tick for random workloads
    #[arg(long, default_value = "10")]
    max_arrival: i64,

    /// Pace steps by the tick period (TICK_SECONDS or the scenario file)
    #[arg(long)]
    realtime: bool,

    /// Print the final snapshot and summary as JSON
    #[arg(long)]
    json: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let level = if args.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("tracing subscriber already installed");
    }

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            for detail in e.validation_errors() {
                error!("  {}", detail.message);
            }
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), SimError> {
    let config = load_config(args)?;
    let engine = config.build_engine()?;

    let snapshot = if args.realtime {
        play_realtime(engine, config.playback.clone())
    } else {
        play_fast(engine)
    };
    let summary = RunSummary::from_snapshot(&snapshot);

    if args.json {
        let report = serde_json::json!({ "snapshot": snapshot, "summary": summary });
        let text = serde_json::to_string_pretty(&report)
            .map_err(|e| SimError::config(format!("cannot encode report: {e}")))?;
        println!("{text}");
    } else {
        print_trace(&snapshot);
        print_summary(&snapshot, &summary);
    }
    Ok(())
}

fn load_config(args: &Args) -> Result<SimulationConfig, SimError> {
    let mut config = match &args.input {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .map_err(|e| SimError::config(format!("cannot read {path}: {e}")))?;
            SimulationConfig::from_json(&text)?
        }
        None => SimulationConfig::new(Algorithm::Fcfs)
            .with_playback(PlaybackConfig::from_env()?)
            .with_processes(
                WorkloadGenerator::new(args.seed, args.random)
                    .with_max_arrival(args.max_arrival)
                    .generate(),
            ),
    };

    if let Some(name) = &args.algorithm {
        config.algorithm = name.parse()?;
    }
    if let Some(quantum) = args.quantum {
        config.quantum = Some(quantum);
    }
    Ok(config)
}

fn play_fast(mut engine: Engine) -> SnapshotView {
    let steps = engine.run_until_done();
    info!(steps, algorithm = %engine.algorithm(), "run complete");
    engine.snapshot()
}

fn play_realtime(engine: Engine, config: PlaybackConfig) -> SnapshotView {
    let mut playback = Playback::new(config);
    let period = playback.tick_period();
    let mut latest = playback.start(engine);
    let mut seen = latest.history.len();
    info!("tick period: {:?}", period);

    while playback.is_running() {
        std::thread::sleep(period);
        if let Some(snapshot) = playback.on_tick() {
            let fresh = snapshot.history.tail(snapshot.history.len() - seen);
            for event in fresh.iter().filter(|e| e.kind != EventKind::Tick) {
                info!("t={} {} {}", event.time, event.kind, name_of(&snapshot, event.pid));
            }
            seen = snapshot.history.len();

            if snapshot.is_idle() {
                info!("t={} idle | ready {}", snapshot.time, snapshot.ready.len());
            } else if let Some(running) = &snapshot.running {
                info!(
                    "t={} running {} ({}/{}) | ready {}",
                    snapshot.time,
                    running.name,
                    running.executed(),
                    running.burst,
                    snapshot.ready.len()
                );
            }
            latest = snapshot;
        }
    }
    latest
}

fn name_of(snapshot: &SnapshotView, pid: Option<ProcessId>) -> &str {
    pid.and_then(|pid| snapshot.process(pid))
        .map(|p| p.name.as_str())
        .unwrap_or("-")
}

fn print_trace(snapshot: &SnapshotView) {
    let mode = if snapshot.algorithm.is_preemptive() {
        "preemptive"
    } else {
        "non-preemptive"
    };
    if snapshot.algorithm.uses_quantum() {
        println!("{} ({mode}, quantum {})", snapshot.algorithm, snapshot.quantum);
    } else {
        println!("{} ({mode})", snapshot.algorithm);
    }
    for event in &snapshot.history {
        if event.kind == EventKind::Tick {
            continue;
        }
        println!(
            "t={:<4} {:<8} {}",
            event.time,
            event.kind,
            name_of(snapshot, event.pid)
        );
    }
}

fn print_summary(snapshot: &SnapshotView, summary: &RunSummary) {
    println!();
    println!(
        "{:<6} {:<12} {:>10} {:>8} {:>9} {:>10}",
        "PID", "NAME", "TURNAROUND", "WAITING", "RESPONSE", "DISPATCHES"
    );
    for m in &summary.processes {
        let dispatches = snapshot
            .history
            .for_process(m.pid)
            .filter(|e| e.kind == EventKind::Dispatch)
            .count();
        println!(
            "{:<6} {:<12} {:>10} {:>8} {:>9} {:>10}",
            m.pid, m.name, m.turnaround, m.waiting, m.response, dispatches
        );
    }
    println!();
    println!(
        "finished {}/{} | makespan {} | avg TA {:.2} | avg W {:.2} | avg R {:.2}",
        summary.finished(),
        summary.total,
        summary.makespan,
        summary.avg_turnaround,
        summary.avg_waiting,
        summary.avg_response
    );
    println!(
        "utilization {:.1}% | dispatches {} | preemptions {} | throughput {:.3}/tick",
        summary.cpu_utilization * 100.0,
        summary.context_switches,
        summary.preemptions,
        summary.throughput
    );
}
