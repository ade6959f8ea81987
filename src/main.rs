//! Shared Life CLI - Run simulations from JSON configuration.

#[cfg(feature = "dhat-heap")]
#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

use std::convert::Infallible;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use serde::de::DeserializeOwned;

use shared_life::{
    compute::{Frame, FrameGate, FrameRenderer, GenerationOutcome, SimulationStats, WorkerPool},
    schema::{PatternCatalog, Seed, SimulationConfig},
};

/// Prints a stats line every `report_every` generations.
struct ProgressRenderer {
    report_every: u64,
    last_stats: Option<SimulationStats>,
}

impl FrameRenderer for ProgressRenderer {
    type Error = Infallible;

    fn render(&mut self, frame: &Frame<'_>) -> Result<(), Infallible> {
        if frame.generation % self.report_every == 0 {
            let stats = SimulationStats::from_frame(frame);
            println!("  {}", stats);
            self.last_stats = Some(stats);
        }
        Ok(())
    }
}

fn main() {
    #[cfg(feature = "dhat-heap")]
    let _profiler = dhat::Profiler::new_heap();

    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() > 1 && args[1] == "--example" {
        print_example_config();
        return;
    }

    if args.len() < 2 {
        eprintln!("Usage: {} <config.json> [generations]", args[0]);
        eprintln!();
        eprintln!("Run a multithreaded Game of Life simulation from JSON configuration.");
        eprintln!();
        eprintln!("Arguments:");
        eprintln!("  config.json   Path to simulation configuration file");
        eprintln!("  generations   Number of generations to run (default: 100)");
        eprintln!();
        eprintln!("Seed and catalog are read from <config>.seed.json and");
        eprintln!("<config>.catalog.json when present. Use --example to print samples.");
        std::process::exit(1);
    }

    let config_path = PathBuf::from(&args[1]);
    let generations: u64 = match args.get(2) {
        Some(arg) => arg.parse().unwrap_or_else(|_| {
            eprintln!("Invalid generation count: {}", arg);
            std::process::exit(1);
        }),
        None => 100,
    };

    let config: SimulationConfig = read_json(&config_path).unwrap_or_else(|| {
        eprintln!("Configuration file {} not found", config_path.display());
        std::process::exit(1);
    });
    let (seed, catalog) = load_inputs(&config_path);

    println!("Shared Life Simulation");
    println!("======================");
    println!("Board: {}x{}", config.width, config.height);
    println!("Workers: {}", config.resolved_workers());
    println!("Catalog patterns: {}", catalog.len());
    println!("Framerate: {}", config.framerate);
    println!("Generations: {}", generations);
    println!();

    let mut gate = FrameGate::new(config.framerate);
    let mut pool = WorkerPool::from_seed(config, &seed, catalog).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    println!("Initial live cells: {}", pool.current().live_count());
    println!();
    println!("Running simulation...");

    let mut renderer = ProgressRenderer {
        report_every: (generations / 10).max(1),
        last_stats: None,
    };

    let start = Instant::now();
    while pool.generation() < generations {
        let now = Instant::now();
        if !gate.admit(now) {
            std::thread::sleep(gate.remaining(now));
            continue;
        }

        let Ok(outcome) = pool.run_generation(&mut renderer);
        if outcome == GenerationOutcome::Cancelled {
            break;
        }
    }
    let elapsed = start.elapsed();

    println!();
    println!("Final state:");
    println!("  Generation: {}", pool.generation());
    println!("  Live cells: {}", pool.current().live_count());
    if let Some(stats) = &renderer.last_stats {
        println!("  Last report: {}", stats);
    }
    println!(
        "Time: {:.2}s ({:.1} generations/s)",
        elapsed.as_secs_f32(),
        pool.generation() as f32 / elapsed.as_secs_f32()
    );

    pool.shutdown();
}

/// Seed and catalog from `<config>.seed.json` / `<config>.catalog.json`,
/// falling back to the defaults for missing files.
fn load_inputs(config_path: &Path) -> (Seed, PatternCatalog) {
    let seed = read_json(&config_path.with_extension("seed.json")).unwrap_or_default();
    let catalog = read_json(&config_path.with_extension("catalog.json")).unwrap_or_default();
    (seed, catalog)
}

/// Read and parse a JSON file. Missing files yield `None`; parse errors exit.
fn read_json<T: DeserializeOwned>(path: &Path) -> Option<T> {
    if !path.exists() {
        return None;
    }
    let text = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading {}: {}", path.display(), e);
        std::process::exit(1);
    });
    let value = serde_json::from_str(&text).unwrap_or_else(|e| {
        eprintln!("Error parsing {}: {}", path.display(), e);
        std::process::exit(1);
    });
    Some(value)
}

fn print_example_config() {
    let config = SimulationConfig::default();
    let seed = Seed::default();
    let catalog = PatternCatalog::default();

    println!("Example configuration (config.json):");
    println!("{}", serde_json::to_string_pretty(&config).unwrap());
    println!();
    println!("Example seed (config.seed.json):");
    println!("{}", serde_json::to_string_pretty(&seed).unwrap());
    println!();
    println!("Example catalog (config.catalog.json):");
    println!("{}", serde_json::to_string_pretty(&catalog).unwrap());
}
