//! Game balance simulator CLI.
//!
//! Usage:
//!   cargo run --bin simulate -- [OPTIONS]
//!
//! Examples:
//!   cargo run --bin simulate                          # 200 runs of Top Hold
//!   cargo run --bin simulate -- -n 50 --variant classic
//!   cargo run --bin simulate -- --seed 42 --policy tap

use hopper::runner::Variant;
use hopper::simulator::{run_simulation, JumpPolicy, SimConfig};
use std::env;

fn main() {
    let args: Vec<String> = env::args().collect();
    let config = match parse_args(&args) {
        Ok(config) => config,
        Err(message) => {
            eprintln!("{}", message);
            eprintln!("Run 'simulate --help' for usage.");
            std::process::exit(1);
        }
    };

    println!("╔═══════════════════════════════════════════════════════════════╗");
    println!("║                HOPPER BALANCE SIMULATOR                       ║");
    println!("╚═══════════════════════════════════════════════════════════════╝");
    println!();
    println!("Configuration:");
    println!("  Runs:           {}", config.num_runs);
    println!("  Mode:           {}", config.variant.name());
    println!("  Policy:         {:?}", config.policy);
    println!("  Max Frames:     {}", config.max_frames_per_run);
    if let Some(seed) = config.seed {
        println!("  Seed:           {}", seed);
    }
    println!();
    println!("Running simulation...");
    println!();

    let report = run_simulation(&config);
    println!("{}", report.to_text());

    if args.iter().any(|a| a == "--json") {
        let filename = format!(
            "sim_report_{}.json",
            chrono::Utc::now().format("%Y%m%d_%H%M%S")
        );
        match std::fs::write(&filename, report.to_json()) {
            Ok(()) => println!("JSON report saved to: {}", filename),
            Err(e) => {
                eprintln!("Failed to write {}: {}", filename, e);
                std::process::exit(1);
            }
        }
    }
}

fn parse_args(args: &[String]) -> Result<SimConfig, String> {
    let mut config = SimConfig::default();

    let mut i = 1;
    while i < args.len() {
        let value = args.get(i + 1);
        match args[i].as_str() {
            "-n" | "--runs" => {
                config.num_runs = parse_value(&args[i], value)?;
                i += 1;
            }
            "-s" | "--seed" => {
                config.seed = Some(parse_value(&args[i], value)?);
                i += 1;
            }
            "-t" | "--frames" => {
                config.max_frames_per_run = parse_value(&args[i], value)?;
                i += 1;
            }
            "--variant" => {
                let name = value.ok_or("--variant needs a name")?;
                config.variant = Variant::from_name(name).map_err(|e| e.to_string())?;
                i += 1;
            }
            "--policy" => {
                let name = value.ok_or("--policy needs a name")?;
                config.policy = JumpPolicy::from_name(name).map_err(|e| e.to_string())?;
                i += 1;
            }
            "--quick" => {
                config = SimConfig {
                    seed: config.seed,
                    policy: config.policy,
                    ..SimConfig::quick(config.variant)
                };
            }
            "-v" | "--verbose" => config.verbosity = 2,
            "--json" => {}
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            other => return Err(format!("Unknown option: {}", other)),
        }
        i += 1;
    }

    Ok(config)
}

fn parse_value<T: std::str::FromStr>(flag: &str, value: Option<&String>) -> Result<T, String> {
    value
        .and_then(|v| v.parse().ok())
        .ok_or_else(|| format!("{} needs a number", flag))
}

fn print_help() {
    println!("Hopper Balance Simulator");
    println!();
    println!("USAGE:");
    println!("    cargo run --bin simulate -- [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -n, --runs <N>        Number of simulation runs (default: 200)");
    println!("    -s, --seed <S>        Random seed for reproducibility");
    println!("    -t, --frames <T>      Max frames per run (default: 18,750)");
    println!("    --variant <NAME>      classic, lives, longjump, tophold (default)");
    println!("    --policy <NAME>       idle, tap, hold (default)");
    println!("    --quick               Quick check (50 runs, 5,000 frames)");
    println!("    -v, --verbose         Print every run");
    println!("    --json                Save JSON report");
    println!("    -h, --help            Show this help");
}
