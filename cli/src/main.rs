use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use triage_simulator_core_rs::arrivals::{generate_patients, generate_servers, ArrivalConfig};
use triage_simulator_core_rs::reporting::{StatusReporter, StatusSnapshot, TracingReporter};
use triage_simulator_core_rs::scheduler::{Scheduler, SchedulerConfig};
use triage_simulator_core_rs::{FinalReport, RngManager};

#[derive(Parser)]
#[command(name = "triage-sim")]
#[command(about = "Triage-based patient admission simulator")]
struct Cli {
    /// Number of generated patients
    #[arg(long, default_value_t = 20)]
    patients: usize,

    /// Number of generated servers (ignored with --config)
    #[arg(long, default_value_t = 5)]
    servers: usize,

    /// Simulation length in minutes (ignored with --config)
    #[arg(long, default_value_t = 480.0)]
    duration: f64,

    /// Minutes per tick (ignored with --config)
    #[arg(long, default_value_t = 1.0)]
    step: f64,

    /// Print a status snapshot every this many minutes (ignored with --config)
    #[arg(long)]
    report_interval: Option<f64>,

    /// Patients arrive uniformly within [0, window) minutes; 0 puts everyone at the door
    #[arg(long, default_value_t = 0.0)]
    arrival_window: f64,

    /// Probability that a generated patient needs triage
    #[arg(long, default_value_t = 0.3)]
    unspecified_probability: f64,

    /// Seed for generation and triage
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Scheduler config as JSON (replaces the generated roster and timing flags)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the final report as JSON
    #[arg(long)]
    json: bool,

    /// Real milliseconds to sleep between ticks
    #[arg(long, default_value_t = 0)]
    pace_ms: u64,
}

/// Prints snapshots to stdout in a compact table
struct ConsoleReporter;

impl StatusReporter for ConsoleReporter {
    fn report(&mut self, snapshot: &StatusSnapshot) {
        println!(
            "\n--- t={:.1} (tick {}) | queued {} | completed {} ---",
            snapshot.time,
            snapshot.tick,
            snapshot.total_queued(),
            snapshot.completed
        );
        for (specialty, size) in snapshot.queue_sizes.iter().filter(|(_, n)| *n > 0) {
            println!("  {:<18} {} waiting", specialty.label(), size);
        }
        for server in &snapshot.servers {
            match &server.current_patient_name {
                Some(patient) => println!(
                    "  {} ({}): serving {}",
                    server.name, server.specialty, patient
                ),
                None => println!("  {} ({}): available", server.name, server.specialty),
            }
        }
    }
}

fn load_config(cli: &Cli, rng: &mut RngManager) -> anyhow::Result<SchedulerConfig> {
    match &cli.config {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            serde_json::from_str(&raw).with_context(|| format!("parsing config {}", path.display()))
        }
        None => Ok(SchedulerConfig {
            total_duration: cli.duration,
            step: cli.step,
            report_interval: cli.report_interval,
            rng_seed: cli.seed,
            servers: generate_servers(cli.servers, rng),
        }),
    }
}

fn print_report(report: &FinalReport) {
    let summary = &report.summary;

    println!("\n=== FINAL REPORT ===");
    println!("Patients served: {}", summary.total_completed);
    println!("Still waiting: {}", report.still_queued);
    if report.forced_completions > 0 {
        println!("Closed at end of shift: {}", report.forced_completions);
    }
    println!("Throughput: {:.3} patients/min", report.throughput);
    match &summary.wait {
        Some(wait) => println!(
            "Wait: mean {:.1} min, min {:.1}, max {:.1}",
            wait.mean, wait.min, wait.max
        ),
        None => println!("Wait: no patients served"),
    }

    println!("\nBy severity:");
    for level in &summary.by_severity {
        println!(
            "  Severity {}: {} patients (mean wait {:.1} min)",
            level.severity, level.stats.count, level.stats.mean_wait
        );
    }

    if !summary.by_specialty.is_empty() {
        println!("\nBy specialty:");
        for group in &summary.by_specialty {
            println!(
                "  {}: {} patients (mean wait {:.1} min)",
                group.specialty, group.stats.count, group.stats.mean_wait
            );
        }
    }

    println!("\nServers:");
    for server in &summary.by_server {
        println!(
            "  {} ({}): {} served (mean {:.1} min/patient)",
            server.name, server.specialty, server.completed, server.mean_service_duration
        );
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("triage_simulator_core_rs=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let mut rng = RngManager::new(cli.seed);

    let config = load_config(&cli, &mut rng)?;
    let patients = generate_patients(
        &ArrivalConfig {
            count: cli.patients,
            arrival_window: cli.arrival_window,
            unspecified_probability: cli.unspecified_probability,
        },
        &mut rng,
    );

    let mut scheduler = Scheduler::new(config)?;
    for patient in patients {
        scheduler.schedule_arrival(patient)?;
    }
    tracing::info!(
        patients = scheduler.known_patients(),
        servers = scheduler.servers().len(),
        "inputs generated"
    );

    // Keep stdout clean for JSON output
    let mut reporter: Box<dyn StatusReporter> = if cli.json {
        Box::new(TracingReporter)
    } else {
        Box::new(ConsoleReporter)
    };

    let pace = Duration::from_millis(cli.pace_ms);
    while !scheduler.is_finished() {
        scheduler.tick_reporting(reporter.as_mut())?;
        if !pace.is_zero() {
            std::thread::sleep(pace);
        }
    }
    let report = scheduler.final_report();

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    Ok(())
}
