use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use log::LevelFilter;

use freightline_sim::{Destination, MemorySink, Simulation, SimulationReport};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ReportFormat {
    /// Human-readable summary
    Console,
    /// Machine-readable report object
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "freightline", version)]
#[command(about = "Simulate cargo moving through the fixed factory/port/warehouse network")]
struct Args {
    /// Destination per container, e.g. BAAB (one character per unit, A or B)
    #[arg(long)]
    container_destinations: String,

    /// Print the per-tick dispatch trace to stderr
    #[arg(long)]
    debug: bool,

    /// Suppress the structured depart/arrive event stream
    #[arg(long)]
    no_events: bool,

    /// Output format for the final report
    #[arg(long, value_enum, default_value_t = ReportFormat::Console)]
    report: ReportFormat,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.debug);

    let destinations = Destination::parse_sequence(&args.container_destinations)
        .context("invalid --container-destinations value")?;

    let mut sink = MemorySink::default();
    let report = Simulation::new(&destinations)
        .run(&mut sink)
        .context("simulation aborted on an invariant violation")?;

    if !args.no_events {
        for event in &sink.events {
            println!("{}", serde_json::to_string(event)?);
        }
    }

    print_report(args.report, &report)?;
    Ok(())
}

fn init_logging(debug: bool) {
    let mut builder = env_logger::Builder::from_default_env();
    if debug {
        builder.filter_level(LevelFilter::Debug);
    }
    builder.init();
}

fn print_report(format: ReportFormat, report: &SimulationReport) -> Result<()> {
    match format {
        ReportFormat::Console => {
            if report.timed_out {
                println!(
                    "{} stopped at hour {} before full delivery",
                    "Timeout:".yellow().bold(),
                    report.total_hours
                );
            }
            println!("Hours: {}", report.total_hours.to_string().bold());
        }
        ReportFormat::Json => {
            let value = serde_json::json!({
                "total_hours": report.total_hours,
                "delivered": report.delivered,
                "timed_out": report.timed_out,
            });
            println!("{value}");
        }
    }
    Ok(())
}
