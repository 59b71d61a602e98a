//! Rotate-and-swap hill climbing.
//!
//! Every iteration rotates the best tour found so far, swaps two random
//! positions of the rotated tour and keeps the candidate only when its cost
//! is strictly lower. There is no annealing, no tabu memory and no early stop.

use log::{debug, info};
use ordered_float::OrderedFloat;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;

use crate::error::{Error, Result};
use crate::point::Point;
use crate::tour::{rotate, swap_cities, ScoredTour};
use crate::validation;

/// Default number of rotate/swap evaluations per trajectory.
pub const DEFAULT_ITERATIONS: usize = 10_000;

/// Source of uniformly distributed tour positions.
///
/// This is the only nondeterministic input of the search; tests substitute
/// scripted sources to drive exact trajectories.
pub trait IndexSource {
    /// Uniform integer in `[0, max]`. Fails with [`Error::InvalidBound`] when
    /// `max` is negative.
    fn random_index(&mut self, max: isize) -> Result<usize>;
}

/// [`IndexSource`] backed by a ChaCha8 generator.
pub struct SeededIndexSource {
    rng: ChaCha8Rng,
}

impl SeededIndexSource {
    /// Reproducible with `Some(seed)`, seeded from OS entropy with `None`.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        SeededIndexSource { rng }
    }
}

impl IndexSource for SeededIndexSource {
    fn random_index(&mut self, max: isize) -> Result<usize> {
        let max = validation::check_bound(max)?;
        Ok(self.rng.gen_range(0..=max))
    }
}

/// Search parameters
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Rotate/swap evaluations per trajectory
    pub iterations: usize,
    /// Random seed; `None` draws one from the OS
    pub seed: Option<u64>,
    /// Independent trajectories, run in parallel when more than one
    pub trajectories: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            iterations: DEFAULT_ITERATIONS,
            seed: None,
            trajectories: 1,
        }
    }
}

impl SearchConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_trajectories(mut self, trajectories: usize) -> Self {
        self.trajectories = trajectories;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.trajectories == 0 {
            return Err(Error::invalid_config("at least one trajectory is required"));
        }
        Ok(())
    }

    /// Seed of trajectory `k`.
    fn trajectory_seed(&self, k: usize) -> Option<u64> {
        self.seed.map(|s| s.wrapping_add(k as u64))
    }
}

/// Best cycle found by rotate/swap hill climbing from `tour`.
///
/// With `config.trajectories > 1` the independent trajectories run on the
/// rayon pool and the cheapest result is returned once all have finished.
pub fn find_best_cycle(tour: &[Point], config: &SearchConfig) -> Result<ScoredTour> {
    validation::check_tour(tour)?;
    config.validate()?;

    if config.trajectories == 1 {
        let mut source = SeededIndexSource::new(config.seed);
        return find_best_cycle_with(tour, config.iterations, &mut source);
    }

    let results = (0..config.trajectories)
        .into_par_iter()
        .map(|k| {
            let mut source = SeededIndexSource::new(config.trajectory_seed(k));
            let best = find_best_cycle_with(tour, config.iterations, &mut source)?;
            debug!("Trajectory {} finished with cost {:.4}", k, best.cost);
            Ok(best)
        })
        .collect::<Result<Vec<ScoredTour>>>()?;

    results
        .into_iter()
        .min_by_key(|scored| OrderedFloat(scored.cost))
        .ok_or_else(|| Error::invalid_config("no trajectory produced a result"))
}

/// Single trajectory driven by an explicit index source.
pub fn find_best_cycle_with<S>(tour: &[Point], iterations: usize, source: &mut S) -> Result<ScoredTour>
where
    S: IndexSource + ?Sized,
{
    let mut best = ScoredTour::from_tour(tour.to_vec())?;
    let initial_cost = best.cost;
    let max_index = best.len() as isize - 1;
    let mut current: Vec<Point>;
    let mut accepted = 0usize;

    for iteration in 0..iterations {
        current = rotate(&best.tour)?;

        let i = source.random_index(max_index)? as isize;
        let j = source.random_index(max_index)? as isize;
        let candidate = swap_cities(&current, i, j)?;

        if candidate.cost < best.cost {
            debug!(
                "Iteration {}: swap({}, {}) improved {:.4} -> {:.4}",
                iteration, i, j, best.cost, candidate.cost
            );
            best = candidate;
            accepted += 1;
        }
    }

    info!(
        "Search finished: {} iterations, {} improvements, cost {:.4} -> {:.4}",
        iterations, accepted, initial_cost, best.cost
    );

    Ok(best)
}
