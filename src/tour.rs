//! Tour representation, cycle cost and the two move operators.
//!
//! A tour is a slice of [`Point`]s read as a closed cycle: the successor of
//! the last city is the first one. Move operators borrow their input and hand
//! back a freshly owned tour, so a retained best tour is never touched.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::point::{euclidean_distance, Point};
use crate::validation;

/// A tour together with its total cycle cost
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredTour {
    /// Cities in visiting order
    pub tour: Vec<Point>,
    /// Total cycle length
    pub cost: f64,
}

impl ScoredTour {
    /// Score a tour
    pub fn from_tour(tour: Vec<Point>) -> Result<Self> {
        let cost = compute_total_distance(&tour)?;
        Ok(ScoredTour { tour, cost })
    }

    pub fn len(&self) -> usize {
        self.tour.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tour.is_empty()
    }
}

/// Sum of the distances of every connection in the cycle, including the one
/// from the last city back to the first. A single city costs 0.
pub fn compute_total_distance(tour: &[Point]) -> Result<f64> {
    validation::check_tour(tour)?;

    let n = tour.len();
    let mut length = 0.0;
    for i in 0..n {
        length += euclidean_distance(&tour[i].coords(), &tour[(i + 1) % n].coords())?;
    }

    Ok(length)
}

/// Move every city one position later; the last city wraps to the front.
pub fn rotate(tour: &[Point]) -> Result<Vec<Point>> {
    validation::check_tour(tour)?;

    let n = tour.len();
    let mut rotated = Vec::with_capacity(n);
    rotated.push(tour[n - 1].clone());
    rotated.extend_from_slice(&tour[..n - 1]);
    Ok(rotated)
}

/// Exchange the cities at `index1` and `index2` and score the result.
///
/// Equal indices leave the order unchanged. Indices are signed so that a
/// negative position is reported as out of range rather than wrapped.
pub fn swap_cities(tour: &[Point], index1: isize, index2: isize) -> Result<ScoredTour> {
    validation::check_tour(tour)?;
    let i = validation::check_index(index1, tour.len())?;
    let j = validation::check_index(index2, tour.len())?;

    let mut swapped = tour.to_vec();
    swapped.swap(i, j);
    ScoredTour::from_tour(swapped)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::error::{Error, MalformedReason};
    use proptest::prelude::*;

    fn triangle() -> Vec<Point> {
        vec![
            Point::new("Test", "A", 0.0, 0.0),
            Point::new("Test", "B", 3.0, 0.0),
            Point::new("Test", "C", 3.0, 4.0),
        ]
    }

    fn road_map() -> Vec<Point> {
        vec![
            Point::new("California", "Sacramento", 38.555605, -121.468926),
            Point::new("Illinois", "Springfield", 39.78325, -89.650373),
            Point::new("Nevada", "Carson City", 39.160949, -119.753877),
        ]
    }

    fn names(tour: &[Point]) -> Vec<&str> {
        tour.iter().map(|p| p.name()).collect()
    }

    #[test]
    fn test_triangle_cost() {
        let cost = compute_total_distance(&triangle()).unwrap();
        assert!((cost - 12.0).abs() < 1e-10);
    }

    #[test]
    fn test_road_map_cost() {
        let cost = compute_total_distance(&road_map()).unwrap();
        assert!((cost - (31.842 + 30.110 + 1.819)).abs() < 0.01);
    }

    #[test]
    fn test_single_city_costs_nothing() {
        let tour = vec![Point::new("Ohio", "Columbus", 39.96, -83.0)];
        assert_eq!(compute_total_distance(&tour).unwrap(), 0.0);
    }

    #[test]
    fn test_empty_tour_is_an_error() {
        assert!(matches!(compute_total_distance(&[]), Err(Error::EmptyTour)));
        assert!(matches!(rotate(&[]), Err(Error::EmptyTour)));
        assert!(matches!(swap_cities(&[], 0, 0), Err(Error::EmptyTour)));
    }

    #[test]
    fn test_nan_coordinate_is_malformed() {
        let mut tour = triangle();
        tour.push(Point::new("Test", "D", f64::NAN, 1.0));
        assert!(matches!(
            compute_total_distance(&tour),
            Err(Error::MalformedRecord {
                index: 3,
                reason: MalformedReason::NonNumericCoordinate { field: 2 }
            })
        ));
    }

    #[test]
    fn test_swap_example() {
        let scored = swap_cities(&triangle(), 0, 2).unwrap();
        assert_eq!(names(&scored.tour), vec!["C", "B", "A"]);
        assert!((scored.cost - 12.0).abs() < 1e-10);
    }

    #[test]
    fn test_swap_leaves_input_untouched() {
        let tour = road_map();
        let swapped = swap_cities(&tour, 0, 1).unwrap();
        assert_eq!(swapped.tour[0], tour[1]);
        assert_eq!(swapped.tour[1], tour[0]);
        assert_eq!(tour, road_map());
    }

    #[test]
    fn test_swap_out_of_range() {
        assert!(matches!(
            swap_cities(&triangle(), -1, 0),
            Err(Error::IndexOutOfRange { index: -1, len: 3 })
        ));
        assert!(matches!(
            swap_cities(&triangle(), 0, 3),
            Err(Error::IndexOutOfRange { index: 3, len: 3 })
        ));
    }

    #[test]
    fn test_rotate_moves_last_to_front() {
        let rotated = rotate(&road_map()).unwrap();
        assert_eq!(names(&rotated), vec!["Carson City", "Sacramento", "Springfield"]);
    }

    pub(crate) fn arb_tour(max_len: usize) -> impl Strategy<Value = Vec<Point>> {
        prop::collection::vec((-90.0f64..90.0, -180.0f64..180.0), 1..max_len).prop_map(|coords| {
            coords
                .into_iter()
                .enumerate()
                .map(|(i, (lat, lon))| Point::new("Region", format!("City{}", i), lat, lon))
                .collect()
        })
    }

    proptest! {
        #[test]
        fn prop_distance_is_symmetric(a in (-90.0f64..90.0, -180.0f64..180.0),
                                      b in (-90.0f64..90.0, -180.0f64..180.0)) {
            let (a, b) = ([a.0, a.1], [b.0, b.1]);
            prop_assert_eq!(euclidean_distance(&a, &b).unwrap(), euclidean_distance(&b, &a).unwrap());
            prop_assert_eq!(euclidean_distance(&a, &a).unwrap(), 0.0);
        }

        #[test]
        fn prop_cost_invariant_under_rotation(tour in arb_tour(12)) {
            let before = compute_total_distance(&tour).unwrap();
            let after = compute_total_distance(&rotate(&tour).unwrap()).unwrap();
            prop_assert!((before - after).abs() < 1e-9 * before.max(1.0));
        }

        #[test]
        fn prop_rotate_len_times_is_identity(tour in arb_tour(12)) {
            let mut rotated = tour.clone();
            for _ in 0..tour.len() {
                rotated = rotate(&rotated).unwrap();
                prop_assert_eq!(rotated.len(), tour.len());
            }
            prop_assert_eq!(rotated, tour);
        }

        #[test]
        fn prop_swap_same_index_is_noop(tour in arb_tour(12), seed in 0usize..1000) {
            let i = (seed % tour.len()) as isize;
            let scored = swap_cities(&tour, i, i).unwrap();
            prop_assert_eq!(&scored.tour, &tour);
            prop_assert_eq!(scored.cost, compute_total_distance(&tour).unwrap());
        }

        #[test]
        fn prop_swap_is_an_involution(tour in arb_tour(12), a in 0usize..1000, b in 0usize..1000) {
            let (i, j) = ((a % tour.len()) as isize, (b % tour.len()) as isize);
            let once = swap_cities(&tour, i, j).unwrap();
            let twice = swap_cities(&once.tour, i, j).unwrap();
            prop_assert_eq!(twice.tour, tour);
        }
    }
}
