//! entrain-bench: Benchmark harness for coupled LFO groups
//!
//! Steps a group preset in a tight loop so the engine can be profiled with
//! native tools like samply, Instruments, or perf.
//!
//! Usage:
//!   entrain-bench run groups/eight_spread.json --frames 1000000
//!   entrain-bench list
//!   samply record ./target/profiling/entrain-bench run groups/chorus_trio.json

use clap::{Parser, Subcommand};
use entrain_core::{CoupledGroup, GroupConfig, MAX_COUPLED_OSCILLATORS, Waveform};
use std::fs;
use std::hint::black_box;
use std::path::{Path, PathBuf};
use std::time::Instant;

const DEFAULT_FRAMES: u64 = 48000 * 10; // 10 seconds at 48kHz

/// Benchmark harness for coupled LFO groups
#[derive(Parser)]
#[command(name = "entrain-bench")]
#[command(about = "Profile and benchmark the coupled LFO engine")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a benchmark with a group preset file
    Run {
        /// Path to the group JSON file
        group: PathBuf,

        /// Number of frames to process (every member stepped once per frame)
        #[arg(short, long, default_value_t = DEFAULT_FRAMES)]
        frames: u64,

        /// Warmup frames before measurement
        #[arg(short, long, default_value_t = 48000)]
        warmup: u64,

        /// Waveform read out while stepping
        #[arg(long, default_value = "sine")]
        waveform: Waveform,
    },

    /// List available group presets
    List,

    /// Run a quick smoke test with all presets
    Smoke {
        /// Frames per preset for smoke test
        #[arg(short, long, default_value_t = 4800)]
        frames: u64,
    },
}

fn main() {
    #[cfg(feature = "profile")]
    {
        use tracing_subscriber::prelude::*;
        let tracy_layer = tracing_tracy::TracyLayer::default();
        tracing_subscriber::registry().with(tracy_layer).init();
    }
    #[cfg(not(feature = "profile"))]
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            group,
            frames,
            warmup,
            waveform,
        } => {
            if let Err(e) = run_benchmark(&group, frames, warmup, waveform) {
                eprintln!("{e}");
                std::process::exit(1);
            }
        }
        Commands::List => {
            list_groups();
        }
        Commands::Smoke { frames } => {
            smoke_test(frames);
        }
    }
}

fn load_group(path: &Path) -> Result<(GroupConfig, CoupledGroup), String> {
    let json = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read group file {}: {}", path.display(), e))?;
    let config = GroupConfig::from_json(&json)
        .map_err(|e| format!("Failed to parse group {}: {}", path.display(), e))?;
    let group = CoupledGroup::from_config(&config)
        .map_err(|e| format!("Failed to build group {}: {}", path.display(), e))?;
    Ok((config, group))
}

/// Step every member once
#[inline(always)]
fn process_frame(group: &mut CoupledGroup, waveform: Waveform, out: &mut [f32]) {
    #[cfg(feature = "profile")]
    let _span = tracing::info_span!("process_frame").entered();

    group.step_all(waveform, out);
}

fn run_benchmark(path: &Path, frames: u64, warmup: u64, waveform: Waveform) -> Result<(), String> {
    let (config, mut group) = load_group(path)?;
    let sample_rate = config.sample_rate;
    let mut out = [0.0f32; MAX_COUPLED_OSCILLATORS];

    println!(
        "Loaded group: {} oscillators, K={}",
        group.len(),
        group.coupling()
    );
    for (i, osc) in config.oscillators.iter().enumerate() {
        println!("  - {} ({} Hz, phase {})", i, osc.frequency, osc.phase);
    }

    println!(
        "\nRunning benchmark: {} frames ({:.2}s at {}Hz)",
        frames,
        frames as f64 / sample_rate as f64,
        sample_rate
    );
    println!("  Warmup: {} frames", warmup);
    println!("  Waveform: {}", waveform);

    print!("Warming up...");
    for _ in 0..warmup {
        process_frame(&mut group, waveform, &mut out);
        black_box(out[0]);
    }
    println!(" done");

    print!("Benchmarking...");
    let start = Instant::now();

    for _ in 0..frames {
        process_frame(&mut group, waveform, &mut out);
        black_box(out[0]);
    }

    let elapsed = start.elapsed();
    println!(" done\n");

    let total_ns = elapsed.as_nanos() as f64;
    let ns_per_frame = total_ns / frames.max(1) as f64;
    let frames_per_sec = 1_000_000_000.0 / ns_per_frame;
    let realtime_budget_ns = 1_000_000_000.0 / sample_rate as f64;
    let budget_usage = (ns_per_frame / realtime_budget_ns) * 100.0;

    println!("Results:");
    println!("  Total time:     {:?}", elapsed);
    println!("  Frames:         {}", frames);
    println!("  ns/frame:       {:.2}", ns_per_frame);
    println!("  frames/sec:     {:.0}", frames_per_sec);
    println!(
        "  Real-time budget: {:.2} ns/frame @ {}Hz",
        realtime_budget_ns, sample_rate
    );
    println!("  Budget usage:   {:.4}%", budget_usage);
    println!("  Final r:        {:.4}", group.order_parameter());

    if budget_usage > 100.0 {
        println!("\n  ⚠️  WARNING: Exceeds real-time budget!");
    } else {
        println!(
            "\n  ✓ Within real-time budget ({:.1}x headroom)",
            100.0 / budget_usage
        );
    }
    Ok(())
}

fn get_groups_dir() -> PathBuf {
    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|p| p.to_path_buf()));

    let candidates = [
        // Relative to cwd
        PathBuf::from("groups"),
        PathBuf::from("crates/entrain_cli/groups"),
        // Relative to exe
        exe_dir
            .clone()
            .map(|p| p.join("groups"))
            .unwrap_or_default(),
        exe_dir
            .map(|p| p.join("../../../crates/entrain_cli/groups"))
            .unwrap_or_default(),
    ];

    for path in &candidates {
        if path.exists() && path.is_dir() {
            return path.clone();
        }
    }

    PathBuf::from("crates/entrain_cli/groups")
}

fn group_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir)
        .map(|entries| {
            entries
                .filter_map(|e| e.ok())
                .map(|e| e.path())
                .filter(|p| p.extension().map(|ext| ext == "json").unwrap_or(false))
                .collect()
        })
        .unwrap_or_default();
    files.sort();
    files
}

fn list_groups() {
    let groups_dir = get_groups_dir();
    println!("Groups directory: {:?}", groups_dir);

    if !groups_dir.exists() {
        println!("  (directory does not exist - create presets here)");
        return;
    }

    let files = group_files(&groups_dir);
    if files.is_empty() {
        println!("  (no .json presets found)");
        return;
    }

    println!("\nAvailable groups:");
    for path in files {
        let name = path.file_name().unwrap_or_default().to_string_lossy();
        match load_group(&path) {
            Ok((config, _)) => println!(
                "  {} ({} oscillators, K={})",
                name,
                config.oscillators.len(),
                config.coupling
            ),
            Err(_) => println!("  {} (invalid)", name),
        }
    }
}

fn smoke_test(frames: u64) {
    let groups_dir = get_groups_dir();
    println!("Running smoke test with {} frames per group\n", frames);

    if !groups_dir.exists() {
        println!("No groups directory found at {:?}", groups_dir);
        return;
    }

    let mut out = [0.0f32; MAX_COUPLED_OSCILLATORS];
    for path in group_files(&groups_dir) {
        let name = path.file_name().unwrap_or_default().to_string_lossy();
        print!("Testing {}... ", name);

        match load_group(&path) {
            Ok((_, mut group)) => {
                let start = Instant::now();
                for _ in 0..frames {
                    process_frame(&mut group, Waveform::Sine, &mut out);
                    black_box(out[0]);
                }
                let elapsed = start.elapsed();
                let ns_per_frame = elapsed.as_nanos() as f64 / frames.max(1) as f64;
                let finite = out.iter().all(|v| v.is_finite());
                if finite {
                    println!(
                        "OK ({:.2} ns/frame, r={:.3})",
                        ns_per_frame,
                        group.order_parameter()
                    );
                } else {
                    println!("FAILED: non-finite output");
                }
            }
            Err(e) => {
                println!("FAILED: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shipped_groups() -> Vec<PathBuf> {
        group_files(&Path::new(env!("CARGO_MANIFEST_DIR")).join("groups"))
    }

    #[test]
    fn shipped_presets_load() {
        let files = shipped_groups();
        assert!(!files.is_empty(), "no presets found");
        for path in files {
            if let Err(e) = load_group(&path) {
                panic!("{e}");
            }
        }
    }

    #[test]
    fn presets_survive_a_second_of_stepping() {
        let mut out = [0.0f32; MAX_COUPLED_OSCILLATORS];
        for path in shipped_groups() {
            let (_, mut group) = load_group(&path).unwrap();
            for _ in 0..48000 {
                process_frame(&mut group, Waveform::Sine, &mut out);
            }
            assert!(out.iter().all(|v| v.is_finite()), "{}", path.display());
            let r = group.order_parameter();
            assert!((0.0..=1.0).contains(&r), "{}: r = {r}", path.display());
        }
    }
}
