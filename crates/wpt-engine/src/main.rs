//! wpt-sim: CLI tool for evaluating two-coil inductive power links

use anyhow::{Context, Result};
use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use wpt_engine::{report, Engine, EngineConfig, FrequencyRange, GapRange, SimulationInput};

#[derive(Parser, Debug)]
#[command(name = "wpt-sim")]
#[command(about = "Inductive power link efficiency, coupling and air-gap sweeps")]
#[command(version)]
struct Args {
    /// JSON file overriding physical constants (missing fields keep defaults)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value = "report", global = true)]
    format: Format,

    /// Write output to this file instead of stdout
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Evaluate a single operating point
    Evaluate {
        #[command(flatten)]
        input: InputArgs,
    },
    /// Sweep the air gap
    SweepGap {
        #[command(flatten)]
        input: InputArgs,

        /// Smallest gap in mm
        #[arg(long)]
        min_gap: Option<f64>,

        /// Largest gap in mm
        #[arg(long)]
        max_gap: Option<f64>,

        /// Number of samples
        #[arg(long)]
        steps: Option<usize>,
    },
    /// Sweep the drive frequency (log spaced)
    SweepFreq {
        #[command(flatten)]
        input: InputArgs,

        /// Lowest frequency in kHz
        #[arg(long)]
        min_freq: Option<f64>,

        /// Highest frequency in kHz
        #[arg(long)]
        max_freq: Option<f64>,

        /// Number of samples
        #[arg(long)]
        steps: Option<usize>,
    },
}

#[derive(ClapArgs, Debug)]
struct InputArgs {
    /// Air gap between the coils in mm
    #[arg(long, default_value = "5")]
    air_gap: f64,

    /// Drive frequency in kHz
    #[arg(long, default_value = "200")]
    frequency: f64,

    /// Power to deliver to the load in W
    #[arg(long, default_value = "10")]
    power: f64,

    /// Supply voltage in V
    #[arg(long, default_value = "24")]
    voltage: f64,

    /// Coil radius in mm
    #[arg(long, default_value = "25")]
    coil_radius: f64,

    /// Primary turns
    #[arg(long, default_value = "20")]
    primary_turns: u32,

    /// Secondary turns
    #[arg(long, default_value = "20")]
    secondary_turns: u32,

    /// Load resistance in Ohm
    #[arg(long, default_value = "10")]
    load: f64,

    /// Wire diameter in mm (engine default if omitted)
    #[arg(long)]
    wire_diameter: Option<f64>,
}

impl From<&InputArgs> for SimulationInput {
    fn from(args: &InputArgs) -> Self {
        Self {
            air_gap_mm: args.air_gap,
            frequency_khz: args.frequency,
            required_power_w: args.power,
            input_voltage_v: args.voltage,
            coil_radius_mm: args.coil_radius,
            primary_turns: args.primary_turns,
            secondary_turns: args.secondary_turns,
            load_resistance_ohm: args.load,
            wire_diameter_mm: args.wire_diameter,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Json,
    Report,
}

fn load_config(path: Option<&PathBuf>) -> Result<EngineConfig> {
    match path {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            EngineConfig::from_json(&json).with_context(|| format!("Invalid config file: {:?}", path))
        }
        None => Ok(EngineConfig::default()),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let engine = Engine::new(load_config(args.config.as_ref())?);
    let defaults = engine.config().clone();

    let text = match &args.command {
        Command::Evaluate { input } => {
            let input = SimulationInput::from(input);
            let result = engine.evaluate(&input).context("Evaluation failed")?;
            match args.format {
                Format::Json => serde_json::to_string_pretty(&serde_json::json!({
                    "params": input,
                    "results": result,
                }))?,
                Format::Report => {
                    let wire = input.wire_diameter_mm.unwrap_or(defaults.default_wire_diameter_mm);
                    report::render_result(&input, &result, wire)?
                }
            }
        }
        Command::SweepGap { input, min_gap, max_gap, steps } => {
            let range = GapRange {
                start_mm: min_gap.unwrap_or(defaults.gap_range.start_mm),
                stop_mm: max_gap.unwrap_or(defaults.gap_range.stop_mm),
            };
            let sweep = engine
                .sweep_air_gap(&SimulationInput::from(input), range, steps.unwrap_or(defaults.sweep_samples))
                .context("Air gap sweep failed")?;
            match args.format {
                Format::Json => serde_json::to_string_pretty(&sweep)?,
                Format::Report => report::render_gap_sweep(&sweep)?,
            }
        }
        Command::SweepFreq { input, min_freq, max_freq, steps } => {
            let range = FrequencyRange {
                start_khz: min_freq.unwrap_or(defaults.frequency_range.start_khz),
                stop_khz: max_freq.unwrap_or(defaults.frequency_range.stop_khz),
            };
            let sweep = engine
                .sweep_frequency(&SimulationInput::from(input), range, steps.unwrap_or(defaults.sweep_samples))
                .context("Frequency sweep failed")?;
            match args.format {
                Format::Json => serde_json::to_string_pretty(&sweep)?,
                Format::Report => report::render_frequency_sweep(&sweep)?,
            }
        }
    };

    // Output
    match &args.output {
        Some(path) => {
            fs::write(path, &text)
                .with_context(|| format!("Failed to write output file: {:?}", path))?;
            eprintln!("Wrote {:?}", path);
        }
        None => println!("{}", text),
    }

    Ok(())
}
