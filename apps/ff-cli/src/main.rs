use clap::{Parser, Subcommand};
use ff_config::ConfigError;
use ff_controls::{CompensationMode, ControlError, LeadLagCompensator};
use serde::{Deserialize, Serialize};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "ff-cli")]
#[command(about = "Lead-lag feedforward compensator tool", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a compensator config file
    Validate {
        /// Path to the config file (YAML, or JSON by extension)
        config_path: PathBuf,
    },
    /// Replay a recorded trace through the compensator
    Replay {
        /// Path to the config file (YAML, or JSON by extension)
        config_path: PathBuf,
        /// CSV with columns time,disturbance,manipulated_variable
        trace_path: PathBuf,
        /// Output CSV file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Pass the feedback command through when the compensator is misconfigured
        #[arg(long)]
        feedback_fallback: bool,
    },
}

#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Control(#[from] ControlError),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Deserialize)]
struct TraceRecord {
    time: f64,
    disturbance: f64,
    manipulated_variable: f64,
}

#[derive(Debug, Serialize)]
struct ReplayRecord {
    time: f64,
    disturbance: f64,
    manipulated_variable: f64,
    output: f64,
    mode: &'static str,
    raw: Option<f64>,
}

#[derive(Debug, Default)]
struct ReplaySummary {
    ticks: usize,
    pass_through: usize,
    corrected: usize,
    saturated: usize,
    fallback: usize,
}

fn main() -> CliResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt().with_writer(io::stderr).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { config_path } => cmd_validate(&config_path),
        Commands::Replay {
            config_path,
            trace_path,
            output,
            feedback_fallback,
        } => cmd_replay(
            &config_path,
            &trace_path,
            output.as_deref(),
            feedback_fallback,
        ),
    }
}

fn cmd_validate(config_path: &Path) -> CliResult<()> {
    println!("Validating config: {}", config_path.display());
    let config = ff_config::load(config_path)?;
    let compensator = config.build()?;

    let band = compensator.acceptable_disturbance_range();
    let limits = compensator.output_limit_range();
    let params = compensator.params();
    println!("  acceptable disturbance: ({}, {})", band.min(), band.max());
    println!("  output limits:          ({}, {})", limits.min(), limits.max());
    println!(
        "  gain={} lead={} lag={}",
        params.gain, params.lead_time_constant, params.lag_time_constant
    );
    if config.parameters.is_none() {
        println!("  (no parameters set; out-of-band samples will fail until tuned)");
    }
    println!("✓ Config is valid");
    Ok(())
}

fn cmd_replay(
    config_path: &Path,
    trace_path: &Path,
    output: Option<&Path>,
    feedback_fallback: bool,
) -> CliResult<()> {
    let config = ff_config::load(config_path)?;
    let mut compensator = config.build()?;
    info!(
        config = %config_path.display(),
        trace = %trace_path.display(),
        "replaying trace"
    );

    let mut reader = csv::Reader::from_path(trace_path)?;
    let sink: Box<dyn Write> = match output {
        Some(path) => Box::new(std::fs::File::create(path)?),
        None => Box::new(io::stdout().lock()),
    };
    let mut writer = csv::Writer::from_writer(sink);

    let mut summary = ReplaySummary::default();
    for record in reader.deserialize() {
        let record: TraceRecord = record?;
        let row = replay_tick(&mut compensator, &record, feedback_fallback, &mut summary)?;
        writer.serialize(row)?;
    }
    writer.flush()?;

    info!(
        ticks = summary.ticks,
        pass_through = summary.pass_through,
        corrected = summary.corrected,
        saturated = summary.saturated,
        fallback = summary.fallback,
        "replay finished"
    );
    if let Some(path) = output {
        println!("✓ Wrote {} ticks to {}", summary.ticks, path.display());
    }
    Ok(())
}

fn replay_tick(
    compensator: &mut LeadLagCompensator,
    record: &TraceRecord,
    feedback_fallback: bool,
    summary: &mut ReplaySummary,
) -> CliResult<ReplayRecord> {
    summary.ticks += 1;
    let result = compensator.step(
        record.manipulated_variable,
        record.disturbance,
        record.time,
    );

    let (output, mode, raw) = match result {
        Ok(c) => match c.mode {
            CompensationMode::PassThrough => {
                summary.pass_through += 1;
                (c.output, "pass_through", None)
            }
            CompensationMode::Corrected { raw, saturated } => {
                summary.corrected += 1;
                if saturated {
                    summary.saturated += 1;
                }
                (c.output, "corrected", Some(raw))
            }
        },
        Err(err @ ControlError::InvalidConfiguration { .. }) if feedback_fallback => {
            warn!(time = record.time, %err, "feedforward disabled for tick, using feedback only");
            summary.fallback += 1;
            (record.manipulated_variable, "feedback_only", None)
        }
        Err(err) => return Err(err.into()),
    };

    Ok(ReplayRecord {
        time: record.time,
        disturbance: record.disturbance,
        manipulated_variable: record.manipulated_variable,
        output,
        mode,
        raw,
    })
}
