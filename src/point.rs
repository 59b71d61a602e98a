//! City records and the planar distance metric.
//!
//! Latitude and longitude are treated as the two axes of a flat plane: no
//! geodesic correction is applied.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A named city with its coordinates. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    region: String,
    name: String,
    latitude: f64,
    longitude: f64,
}

impl Point {
    pub fn new(
        region: impl Into<String>,
        name: impl Into<String>,
        latitude: f64,
        longitude: f64,
    ) -> Self {
        Point {
            region: region.into(),
            name: name.into(),
            latitude,
            longitude,
        }
    }

    /// Region (state) the city belongs to
    pub fn region(&self) -> &str {
        &self.region
    }

    /// City name
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Coordinate pair fed to [`euclidean_distance`].
    #[inline]
    pub fn coords(&self) -> [f64; 2] {
        [self.latitude, self.longitude]
    }

    /// Distance to another city.
    pub fn distance_to(&self, other: &Point) -> Result<f64> {
        euclidean_distance(&self.coords(), &other.coords())
    }
}

/// Euclidean distance between two coordinate pairs.
///
/// Both arguments must hold exactly two finite numbers, otherwise
/// [`Error::InvalidCoordinate`] is returned.
pub fn euclidean_distance(a: &[f64], b: &[f64]) -> Result<f64> {
    check_pair(a)?;
    check_pair(b)?;

    let dx = a[0] - b[0];
    let dy = a[1] - b[1];
    Ok(dx.hypot(dy))
}

fn check_pair(pair: &[f64]) -> Result<()> {
    if pair.len() != 2 {
        return Err(Error::invalid_coordinate(format!(
            "expected 2 components, found {}",
            pair.len()
        )));
    }
    if let Some(bad) = pair.iter().find(|c| !c.is_finite()) {
        return Err(Error::invalid_coordinate(format!(
            "component {} is not a finite number",
            bad
        )));
    }
    Ok(())
}
