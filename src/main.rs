//! City Tour Solver - Command Line Interface
//!
//! Reads a list of cities, prints them, and searches for a short closed tour.

use clap::{Parser, Subcommand};
use city_tour_solver::benchmark::{Benchmark, BenchmarkConfig};
use city_tour_solver::input::read_cities;
use city_tour_solver::report::CityTable;
use city_tour_solver::search::{find_best_cycle, SearchConfig, DEFAULT_ITERATIONS};
use city_tour_solver::tour::{swap_cities, ScoredTour};
use city_tour_solver::validation::parse_index;
use city_tour_solver::visualization::Visualizer;
use city_tour_solver::Result;

use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "city-tour-solver")]
#[command(version = "1.0")]
#[command(about = "Rotate-and-swap search for a short closed tour through a list of cities")]
struct Cli {
    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search for the best cycle
    Solve {
        /// City file (tab-delimited, or .json)
        #[arg(short, long)]
        input: PathBuf,

        /// Rotate/swap evaluations per trajectory
        #[arg(short = 'n', long, default_value_t = DEFAULT_ITERATIONS)]
        iterations: usize,

        /// Random seed (drawn from the OS when omitted)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Independent trajectories run in parallel
        #[arg(short, long, default_value = "1")]
        trajectories: usize,

        /// Output best tour as JSON
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Render the best tour next to the input file
        #[arg(long)]
        visualize: bool,
    },

    /// Print the cities and the cost of the tour in file order
    Show {
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Preview the tour obtained by swapping two positions
    Swap {
        #[arg(short, long)]
        input: PathBuf,

        /// First position
        #[arg(allow_hyphen_values = true)]
        index1: String,

        /// Second position
        #[arg(allow_hyphen_values = true)]
        index2: String,
    },

    /// Run the search under several seeds and compare
    Compare {
        #[arg(short, long)]
        input: PathBuf,

        /// Number of runs
        #[arg(short, long, default_value = "10")]
        runs: usize,

        #[arg(short = 'n', long, default_value_t = DEFAULT_ITERATIONS)]
        iterations: usize,

        /// Seed of the first run
        #[arg(short, long, default_value = "0")]
        seed: u64,

        /// Output CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let outcome = match cli.command {
        Commands::Solve { input, iterations, seed, trajectories, output, visualize } => {
            let config = SearchConfig { iterations, seed, trajectories };
            solve(&input, &config, output, visualize)
        }

        Commands::Show { input } => show(&input),

        Commands::Swap { input, index1, index2 } => swap(&input, &index1, &index2),

        Commands::Compare { input, runs, iterations, seed, output } => {
            let config = BenchmarkConfig { num_runs: runs, iterations, base_seed: seed };
            compare(&input, config, output)
        }
    };

    if let Err(e) = outcome {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn solve(path: &Path, config: &SearchConfig, output: Option<PathBuf>, visualize: bool) -> Result<()> {
    let cities = read_cities(path)?;

    println!("{}", CityTable(&cities));

    let initial = ScoredTour::from_tour(cities.clone())?;
    println!("Initial cost: {:.2}\n", initial.cost);

    let start = Instant::now();
    let best = find_best_cycle(&cities, config)?;
    let elapsed = start.elapsed();

    println!("========== Best cycle ==========");
    println!("{}", best);
    println!("Time: {:.4}s", elapsed.as_secs_f64());

    if let Some(out_path) = output {
        let json = serde_json::to_string_pretty(&best)?;
        std::fs::write(&out_path, json)?;
        println!("\nBest tour saved to {:?}", out_path);
    }

    if visualize {
        let viz = Visualizer::new();
        let svg = viz.generate_svg(&best, "Best cycle");
        let png_path = path.with_extension("png");
        match viz.save_png(&svg, &png_path) {
            Ok(()) => println!("Visualization saved to {:?}", png_path),
            Err(e) => {
                // fallback: write SVG if PNG conversion failed
                let svg_path = path.with_extension("svg");
                viz.save_svg(&svg, &svg_path)?;
                println!("PNG conversion failed ({}). Saved SVG to {:?}", e, svg_path);
            }
        }
    }

    Ok(())
}

fn show(path: &Path) -> Result<()> {
    let cities = read_cities(path)?;
    println!("{}", CityTable(&cities));
    println!("{}", ScoredTour::from_tour(cities)?);
    Ok(())
}

fn swap(path: &Path, index1: &str, index2: &str) -> Result<()> {
    let cities = read_cities(path)?;
    let (i, j) = (parse_index(index1)?, parse_index(index2)?);

    let before = ScoredTour::from_tour(cities)?;
    let after = swap_cities(&before.tour, i, j)?;

    println!("{}\n", after);
    println!("Cost change: {:.2} -> {:.2} ({:+.2})", before.cost, after.cost, after.cost - before.cost);
    Ok(())
}

fn compare(path: &Path, config: BenchmarkConfig, output: Option<PathBuf>) -> Result<()> {
    let cities = read_cities(path)?;

    let mut benchmark = Benchmark::new(config);
    benchmark.run(&cities)?;

    println!("{}", benchmark.generate_report());

    if let Some(out_path) = output {
        benchmark.export_to_csv(&out_path)?;
        println!("Results exported to {:?}", out_path);
    }

    Ok(())
}
