//! City Tour Solver Library
//!
//! Approximates a shortest closed tour over a list of named cities with a
//! rotate-and-swap hill climber.
//!
//! # Features
//!
//! - Tab-delimited and JSON city ingestion with per-field validation
//! - Cycle cost, rotation and swap operators that never mutate their input
//! - Seeded, injectable random-index source for reproducible searches
//! - Independent parallel trajectories merged by minimum cost
//! - Text listings, SVG rendering and multi-seed comparison reports
//!
//! # Example
//!
//! ```no_run
//! use city_tour_solver::input::read_cities;
//! use city_tour_solver::search::{find_best_cycle, SearchConfig};
//!
//! let cities = read_cities("data/city-data.txt").unwrap();
//! let best = find_best_cycle(&cities, &SearchConfig::new().with_seed(42)).unwrap();
//!
//! println!("{}", best);
//! ```

pub mod error;
pub mod point;
pub mod validation;
pub mod tour;
pub mod search;
pub mod input;
pub mod report;
pub mod visualization;
pub mod benchmark;

pub use error::{Error, MalformedReason, Result};
pub use point::{euclidean_distance, Point};
pub use search::{find_best_cycle, IndexSource, SearchConfig, SeededIndexSource};
pub use tour::{compute_total_distance, rotate, swap_cities, ScoredTour};
