//! entrain: offline driver for the coupled LFO engine
//!
//! - `simulate`: run a coupled group and print its order-parameter trajectory
//! - `render`: process a WAV file through an effect, metering synchronization
//! - `effects`: list the available effects

mod render;
mod simulate;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use colored::Colorize;
use entrain_core::types::DEFAULT_POTS;
use entrain_core::{DEFAULT_SAMPLE_RATE, Effect, GroupConfig, OscillatorConfig, Pots, Waveform};
use tracing_subscriber::EnvFilter;

use crate::simulate::SimulationReport;

/// Simulate and render Kuramoto-coupled LFO groups
#[derive(Parser)]
#[command(name = "entrain")]
#[command(about = "Drive the coupled LFO engine offline")]
#[command(version)]
struct Cli {
    /// Output format
    #[arg(long, global = true, default_value = "table")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a coupled group and report how its order parameter evolves
    Simulate {
        /// Group preset JSON file (overrides --freq/--phase/--coupling)
        #[arg(short, long)]
        group: Option<PathBuf>,

        /// Natural frequency in Hz, once per oscillator
        #[arg(long = "freq", num_args = 1..)]
        frequencies: Vec<f32>,

        /// Initial phase in turns, matched to --freq by position
        #[arg(long = "phase", num_args = 1..)]
        phases: Vec<f32>,

        /// Coupling strength K
        #[arg(short = 'k', long, default_value_t = 0.3)]
        coupling: f32,

        /// Sample rate in Hz
        #[arg(short, long, default_value_t = DEFAULT_SAMPLE_RATE)]
        sample_rate: f32,

        /// Simulated duration in seconds
        #[arg(short = 't', long, default_value_t = 10.0)]
        seconds: f64,

        /// Seconds between order-parameter readings
        #[arg(short, long, default_value_t = 0.5)]
        interval: f64,

        /// Waveform read out while stepping
        #[arg(short, long, default_value = "sine")]
        waveform: Waveform,
    },

    /// Process a WAV file through an effect
    Render {
        /// Effect name (see `entrain effects`)
        effect: String,

        /// Input WAV file
        input: PathBuf,

        /// Output WAV file (32-bit float, mono)
        output: PathBuf,

        /// Up to four knob positions in [0, 1]
        #[arg(num_args = 0..=4)]
        pots: Vec<f32>,

        /// Samples per processing block
        #[arg(short, long, default_value_t = 512)]
        block: usize,

        /// Blocks between order-parameter readings
        #[arg(short, long, default_value_t = 48)]
        meter_every: usize,
    },

    /// List available effects
    Effects,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn build_config(
    group: Option<PathBuf>,
    frequencies: Vec<f32>,
    phases: Vec<f32>,
    coupling: f32,
    sample_rate: f32,
) -> Result<GroupConfig> {
    if let Some(path) = group {
        let json = fs::read_to_string(&path)
            .with_context(|| format!("failed to read group file {}", path.display()))?;
        return GroupConfig::from_json(&json)
            .with_context(|| format!("invalid group file {}", path.display()));
    }

    if frequencies.is_empty() {
        bail!("either --group or at least one --freq is required");
    }
    if phases.len() > frequencies.len() {
        bail!(
            "{} phases given for {} oscillators",
            phases.len(),
            frequencies.len()
        );
    }

    let oscillators = frequencies
        .iter()
        .enumerate()
        .map(|(i, &f)| OscillatorConfig::new(f).with_phase(phases.get(i).copied().unwrap_or(0.0)))
        .collect();
    let config = GroupConfig {
        sample_rate,
        coupling,
        oscillators,
    };
    config.validate()?;
    Ok(config)
}

fn pots_from_args(values: &[f32]) -> Pots {
    let mut pots = DEFAULT_POTS;
    for (slot, &v) in pots.iter_mut().zip(values) {
        *slot = v;
    }
    pots
}

fn colored_r(r: f32) -> colored::ColoredString {
    let text = format!("{r:.4}");
    if r > 0.95 {
        text.green()
    } else if r > 0.5 {
        text.yellow()
    } else {
        text.red()
    }
}

fn bar(r: f32) -> String {
    let width = (r.clamp(0.0, 1.0) * 40.0).round() as usize;
    format!("{:<40}", "█".repeat(width))
}

fn print_report_table(report: &SimulationReport) {
    println!(
        "Group: {} oscillators, K={}, {} Hz, waveform={}",
        report.config.oscillators.len(),
        report.config.coupling,
        report.config.sample_rate,
        report.waveform
    );
    println!("{}", "-".repeat(60));
    println!("{:>10} {:>8}  {}", "TIME", "r", "SYNC");
    for point in &report.trajectory {
        println!(
            "{:>9.2}s {:>8}  {}",
            point.seconds,
            colored_r(point.order_parameter),
            bar(point.order_parameter).dimmed()
        );
    }
    if let Some(r) = report.final_order_parameter() {
        println!("{:>10} {:>8}", "FINAL", colored_r(r));
    }
    println!("{}", "-".repeat(60));
    println!("{:>6} {:>14} {:>14} {:>10}", "OSC", "NATURAL", "EFFECTIVE", "SHIFT");
    for (i, osc) in report.oscillators.iter().enumerate() {
        let shift = if osc.natural_hz > 0.0 {
            (osc.effective_hz / osc.natural_hz as f64 - 1.0) * 100.0
        } else {
            0.0
        };
        println!(
            "{:>6} {:>11.4} Hz {:>11.4} Hz {:>9.2}%",
            i.to_string().cyan(),
            osc.natural_hz,
            osc.effective_hz,
            shift
        );
    }
}

fn cmd_simulate(
    config: GroupConfig,
    seconds: f64,
    interval: f64,
    waveform: Waveform,
    format: OutputFormat,
) -> Result<()> {
    let report = simulate::simulate(&config, seconds, interval, waveform)?;
    match format {
        OutputFormat::Table => print_report_table(&report),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }
    Ok(())
}

fn cmd_render(
    effect: &str,
    input: &Path,
    output: &Path,
    pots: &[f32],
    block: usize,
    meter_every: usize,
    format: OutputFormat,
) -> Result<()> {
    let pots = pots_from_args(pots);
    let summary = render::render(effect, &pots, input, output, block, meter_every)?;

    match format {
        OutputFormat::Table => {
            println!("Playing {}: {}", summary.effect.cyan(), summary.description);
            println!(
                "Processed {} frames at {} Hz -> {}",
                summary.frames,
                summary.sample_rate,
                output.display()
            );
            for reading in &summary.meter {
                println!(
                    "{:>9.2}s r={}  {}",
                    reading.seconds,
                    colored_r(reading.order_parameter),
                    bar(reading.order_parameter).dimmed()
                );
            }
        }
        OutputFormat::Json => {
            let meter: Vec<_> = summary
                .meter
                .iter()
                .map(|m| serde_json::json!({ "seconds": m.seconds, "orderParameter": m.order_parameter }))
                .collect();
            let obj = serde_json::json!({
                "effect": summary.effect,
                "description": summary.description,
                "sampleRate": summary.sample_rate,
                "frames": summary.frames,
                "meter": meter,
            });
            println!("{}", serde_json::to_string_pretty(&obj)?);
        }
    }
    Ok(())
}

fn cmd_effects(format: OutputFormat) -> Result<()> {
    for name in Effect::NAMES {
        let effect = Effect::new(name, &DEFAULT_POTS, DEFAULT_SAMPLE_RATE)?;
        match format {
            OutputFormat::Table => println!("  {:<12} {}", name.cyan(), effect.describe().dimmed()),
            OutputFormat::Json => println!(
                "{}",
                serde_json::json!({ "name": name, "defaults": effect.describe() })
            ),
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Simulate {
            group,
            frequencies,
            phases,
            coupling,
            sample_rate,
            seconds,
            interval,
            waveform,
        } => {
            let config = build_config(group, frequencies, phases, coupling, sample_rate)?;
            cmd_simulate(config, seconds, interval, waveform, cli.format)
        }
        Commands::Render {
            effect,
            input,
            output,
            pots,
            block,
            meter_every,
        } => cmd_render(&effect, &input, &output, &pots, block, meter_every, cli.format),
        Commands::Effects => cmd_effects(cli.format),
    }
}
