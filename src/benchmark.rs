//! Repeated runs of the search under different seeds.
//!
//! Provides per-run records, aggregate statistics, CSV export and a text
//! report for comparing how much the search improves a given tour.

use crate::error::Result;
use crate::point::Point;
use crate::search::{find_best_cycle, SearchConfig, DEFAULT_ITERATIONS};
use crate::tour::{compute_total_distance, ScoredTour};

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;
use std::time::Instant;

/// Result of a single search run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunResult {
    /// Run number
    pub run: usize,
    /// Seed used by the index source
    pub seed: u64,
    /// Iterations performed
    pub iterations: usize,
    /// Cost of the input tour
    pub initial_cost: f64,
    /// Cost of the best tour found
    pub cost: f64,
    /// Relative improvement over the input, in percent
    pub improvement_pct: f64,
    /// Computation time in seconds
    pub time: f64,
}

/// Aggregated statistics over all runs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunStatistics {
    pub runs: usize,
    pub initial_cost: f64,
    pub best_cost: f64,
    pub avg_cost: f64,
    pub worst_cost: f64,
    pub std_cost: f64,
    pub avg_improvement_pct: f64,
    pub avg_time: f64,
    pub best_seed: u64,
}

/// Benchmark configuration
#[derive(Debug, Clone)]
pub struct BenchmarkConfig {
    /// Number of runs; run `r` uses seed `base_seed + r`
    pub num_runs: usize,
    /// Iterations per run
    pub iterations: usize,
    pub base_seed: u64,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        BenchmarkConfig {
            num_runs: 10,
            iterations: DEFAULT_ITERATIONS,
            base_seed: 0,
        }
    }
}

/// Benchmarking engine
pub struct Benchmark {
    config: BenchmarkConfig,
    results: Vec<RunResult>,
    best: Option<ScoredTour>,
}

impl Benchmark {
    pub fn new(config: BenchmarkConfig) -> Self {
        Benchmark {
            config,
            results: Vec::new(),
            best: None,
        }
    }

    /// Run the search once per configured seed on `tour`.
    pub fn run(&mut self, tour: &[Point]) -> Result<()> {
        let initial_cost = compute_total_distance(tour)?;
        log::info!(
            "Benchmarking {} runs of {} iterations on {} cities",
            self.config.num_runs, self.config.iterations, tour.len()
        );

        for run in 0..self.config.num_runs {
            let seed = self.config.base_seed.wrapping_add(run as u64);
            let config = SearchConfig::new()
                .with_iterations(self.config.iterations)
                .with_seed(seed);

            let start = Instant::now();
            let scored = find_best_cycle(tour, &config)?;
            let time = start.elapsed().as_secs_f64();

            let improvement_pct = if initial_cost > 0.0 {
                (initial_cost - scored.cost) / initial_cost * 100.0
            } else {
                0.0
            };

            self.results.push(RunResult {
                run,
                seed,
                iterations: self.config.iterations,
                initial_cost,
                cost: scored.cost,
                improvement_pct,
                time,
            });

            let is_better = self
                .best
                .as_ref()
                .map(|best| scored.cost < best.cost)
                .unwrap_or(true);
            if is_better {
                self.best = Some(scored);
            }
        }

        Ok(())
    }

    /// Aggregate the recorded runs; `None` before any run.
    pub fn compute_statistics(&self) -> Option<RunStatistics> {
        if self.results.is_empty() {
            return None;
        }

        let n = self.results.len() as f64;
        let costs: Vec<f64> = self.results.iter().map(|r| r.cost).collect();

        let best_run = self
            .results
            .iter()
            .min_by_key(|r| OrderedFloat(r.cost))?;
        let worst_cost = costs.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let avg_cost = costs.iter().sum::<f64>() / n;

        let variance = costs.iter()
            .map(|c| (c - avg_cost).powi(2))
            .sum::<f64>() / n;

        Some(RunStatistics {
            runs: self.results.len(),
            initial_cost: best_run.initial_cost,
            best_cost: best_run.cost,
            avg_cost,
            worst_cost,
            std_cost: variance.sqrt(),
            avg_improvement_pct: self.results.iter().map(|r| r.improvement_pct).sum::<f64>() / n,
            avg_time: self.results.iter().map(|r| r.time).sum::<f64>() / n,
            best_seed: best_run.seed,
        })
    }

    /// Export per-run results to CSV
    pub fn export_to_csv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = csv::Writer::from_writer(file);

        for result in &self.results {
            writer.serialize(result)?;
        }

        writer.flush()?;
        Ok(())
    }

    /// Generate summary report
    pub fn generate_report(&self) -> String {
        let mut report = String::new();

        report.push_str("========================================\n");
        report.push_str("       City Tour Search Report\n");
        report.push_str("========================================\n\n");

        let stats = match self.compute_statistics() {
            Some(stats) => stats,
            None => {
                report.push_str("No runs recorded.\n");
                return report;
            }
        };

        report.push_str(&format!("{:<6} {:>8} {:>12} {:>12} {:>10}\n",
            "Run", "Seed", "Cost", "Improve%", "Time"));
        report.push_str("-".repeat(52).as_str());
        report.push('\n');

        for r in &self.results {
            report.push_str(&format!("{:<6} {:>8} {:>12.2} {:>12.2} {:>10.4}\n",
                r.run, r.seed, r.cost, r.improvement_pct, r.time));
        }

        report.push_str("-".repeat(52).as_str());
        report.push('\n');

        report.push_str(&format!("Initial cost: {:.2}\n", stats.initial_cost));
        report.push_str(&format!("Best: {:.2} (seed {})\n", stats.best_cost, stats.best_seed));
        report.push_str(&format!("Average: {:.2} +/- {:.2}\n", stats.avg_cost, stats.std_cost));
        report.push_str(&format!("Worst: {:.2}\n", stats.worst_cost));
        report.push_str(&format!("Average improvement: {:.2}%\n", stats.avg_improvement_pct));
        report.push_str(&format!("Average time: {:.4}s\n", stats.avg_time));

        report
    }

    /// Get all results
    pub fn results(&self) -> &[RunResult] {
        &self.results
    }

    /// Cheapest tour over all runs
    pub fn best(&self) -> Option<&ScoredTour> {
        self.best.as_ref()
    }
}
