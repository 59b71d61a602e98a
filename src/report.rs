//! Human-readable listings of cities and tours.

use std::fmt;

use crate::point::Point;
use crate::tour::ScoredTour;

/// City listing with coordinates rounded to two decimals.
pub struct CityTable<'a>(pub &'a [Point]);

impl fmt::Display for CityTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name_width = self.0.iter().map(|p| p.name().chars().count()).max().unwrap_or(0);
        let region_width = self.0.iter().map(|p| p.region().chars().count()).max().unwrap_or(0);

        for (i, city) in self.0.iter().enumerate() {
            writeln!(
                f,
                "{:>3}  {:<rw$}  {:<nw$}  {:>8.2} {:>8.2}",
                i,
                city.region(),
                city.name(),
                city.latitude(),
                city.longitude(),
                rw = region_width,
                nw = name_width,
            )?;
        }
        Ok(())
    }
}

/// One line per connection with its cost, then the total.
impl fmt::Display for ScoredTour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.tour.len();
        for i in 0..n {
            let from = &self.tour[i];
            let to = &self.tour[(i + 1) % n];
            // Display cannot carry our error type; a bad coordinate shows as NaN.
            let cost = from.distance_to(to).unwrap_or(f64::NAN);
            writeln!(
                f,
                "{}, {} -> {}, {}: {:.2}",
                from.name(),
                from.region(),
                to.name(),
                to.region(),
                cost
            )?;
        }
        write!(f, "Total cost: {:.2}", self.cost)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> ScoredTour {
        ScoredTour::from_tour(vec![
            Point::new("Test", "A", 0.0, 0.0),
            Point::new("Test", "B", 3.0, 0.0),
            Point::new("Test", "C", 3.0, 4.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_city_table_rounds_coordinates() {
        let cities = vec![Point::new("New York", "Albany", 42.659829, -73.781339)];
        let table = CityTable(&cities).to_string();
        assert!(table.contains("Albany"));
        assert!(table.contains("42.66"));
        assert!(table.contains("-73.78"));
        assert!(!table.contains("42.659829"));
    }

    #[test]
    fn test_city_table_aligns_non_ascii_names() {
        let cities = vec![
            Point::new("São Paulo", "São Paulo", -23.55, -46.63),
            Point::new("Peru", "Lima", -12.05, -77.04),
        ];
        let table = CityTable(&cities).to_string();
        let widths: Vec<usize> = table.lines().map(|l| l.chars().count()).collect();

        assert_eq!(widths.len(), 2);
        assert_eq!(widths[0], widths[1]);
    }

    #[test]
    fn test_map_lists_every_connection() {
        let text = triangle().to_string();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "A, Test -> B, Test: 3.00");
        assert_eq!(lines[1], "B, Test -> C, Test: 4.00");
        assert_eq!(lines[2], "C, Test -> A, Test: 5.00");
        assert_eq!(lines[3], "Total cost: 12.00");
    }
}
