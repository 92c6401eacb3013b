//! SlackSim CLI: drive simulated request load through a weighted pool.

use clap::{Parser, Subcommand};
use slacksim_core::config::SimConfig;
use slacksim_core::metrics;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "slacksim",
    about = "Simulate weighted load balancing with slack-first selection",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a single simulation.
    Run {
        /// Path to TOML configuration file. Omit for the built-in
        /// three-backend demo pool.
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Override the number of simulated requests.
        #[arg(short, long)]
        requests: Option<u64>,
        /// Override the workload seed.
        #[arg(short, long)]
        seed: Option<u64>,
        /// Output the run report to a JSON file.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Run the same configuration across multiple seeds.
    Sweep {
        /// Path to TOML configuration file.
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Comma-separated list of seeds.
        #[arg(short, long, value_delimiter = ',')]
        seeds: Vec<u64>,
        /// Output all run reports to a JSON file.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config,
            requests,
            seed,
            output,
        } => {
            let mut sim_config = load_config(config.as_deref());
            if let Some(requests) = requests {
                sim_config.simulation.requests = requests;
            }
            if let Some(seed) = seed {
                sim_config.simulation.seed = seed;
            }

            let report = slacksim_core::run_simulation(sim_config).unwrap_or_else(|e| {
                eprintln!("Error running simulation: {}", e);
                std::process::exit(1);
            });
            println!("{}", metrics::format_table(&report));

            if let Some(output_path) = output {
                let json = serde_json::to_string_pretty(&report).unwrap();
                std::fs::write(&output_path, json).unwrap_or_else(|e| {
                    eprintln!("Error writing output: {}", e);
                    std::process::exit(1);
                });
                println!("Report written to {}", output_path.display());
            }
        }
        Commands::Sweep {
            config,
            seeds,
            output,
        } => {
            let sim_config = load_config(config.as_deref());
            let seeds = if seeds.is_empty() {
                eprintln!("No seeds given; sweeping 1-5.");
                vec![1, 2, 3, 4, 5]
            } else {
                seeds
            };

            let reports = slacksim_core::sweep_seeds(&sim_config, &seeds).unwrap_or_else(|e| {
                eprintln!("Error running sweep: {}", e);
                std::process::exit(1);
            });
            println!("{}", metrics::format_seed_comparison(&reports));

            if let Some(output_path) = output {
                let json = serde_json::to_string_pretty(&reports).unwrap();
                std::fs::write(&output_path, json).unwrap_or_else(|e| {
                    eprintln!("Error writing output: {}", e);
                    std::process::exit(1);
                });
                println!("Sweep reports written to {}", output_path.display());
            }
        }
    }
}

fn load_config(path: Option<&std::path::Path>) -> SimConfig {
    match path {
        Some(p) => SimConfig::from_file(p).unwrap_or_else(|e| {
            eprintln!("Error loading config: {}", e);
            std::process::exit(1);
        }),
        None => SimConfig::default(),
    }
}
