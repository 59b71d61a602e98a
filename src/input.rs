//! Reading city records.
//!
//! The default format is tab-delimited text with one city per line:
//!
//! ```text
//! Alabama	Montgomery	32.361538	-86.279118
//! ```
//!
//! Files ending in `.json` hold an array of 4-element arrays instead. Both
//! formats go through [`validation::validate_records`].

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde_json::Value;

use crate::error::Result;
use crate::point::Point;
use crate::validation;

/// Read the cities stored at `path`, in file order.
pub fn read_cities<P: AsRef<Path>>(path: P) -> Result<Vec<Point>> {
    let path = path.as_ref();
    let reader = BufReader::new(File::open(path)?);

    let is_json = path
        .extension()
        .map(|e| e.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let cities = if is_json {
        from_json_reader(reader)?
    } else {
        from_tsv_reader(reader)?
    };

    log::info!("Read {} cities from {:?}", cities.len(), path);
    Ok(cities)
}

/// Parse tab-delimited records.
pub fn from_tsv_reader<R: Read>(reader: R) -> Result<Vec<Point>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        let fields = record
            .iter()
            .map(|field| Value::String(field.to_string()))
            .collect();
        records.push(Value::Array(fields));
    }

    validation::validate_records(&Value::Array(records))
}

/// Parse a JSON array of records.
pub fn from_json_reader<R: Read>(reader: R) -> Result<Vec<Point>> {
    let value: Value = serde_json::from_reader(reader)?;
    validation::validate_records(&value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, MalformedReason};

    const TEST_CITY_DATA: &str = "California\tSacramento\t38.555605\t-121.468926\n\
                                  Illinois\tSpringfield\t39.78325\t-89.650373\n\
                                  Nevada\tCarson City\t39.160949\t-119.753877\n";

    #[test]
    fn test_read_tsv() {
        let cities = from_tsv_reader(TEST_CITY_DATA.as_bytes()).unwrap();

        assert_eq!(cities.len(), 3);
        assert_eq!(cities[0], Point::new("California", "Sacramento", 38.555605, -121.468926));
        assert_eq!(cities[2].name(), "Carson City");
        assert_eq!(cities[2].longitude(), -119.753877);
    }

    #[test]
    fn test_tsv_wrong_arity() {
        let data = "Ohio\tColumbus\t39.96\t-83.0\nOhio\tColumbus\t39.96\n";
        let err = from_tsv_reader(data.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            Error::MalformedRecord { index: 1, reason: MalformedReason::WrongArity { found: 3 } }
        ));
    }

    #[test]
    fn test_tsv_non_numeric_latitude() {
        let data = "Ohio\tColumbus\tnorth\t-83.0\n";
        let err = from_tsv_reader(data.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            Error::MalformedRecord {
                index: 0,
                reason: MalformedReason::NonNumericCoordinate { field: 2 }
            }
        ));
    }

    #[test]
    fn test_tsv_keeps_quotes_in_names() {
        let data = "Hawaii\t\"Honolulu\" HI\t21.30895\t-157.826182\n\
                    Texas\tAustin \"TX\t30.27\t-97.74\n";
        let cities = from_tsv_reader(data.as_bytes()).unwrap();

        assert_eq!(cities.len(), 2);
        assert_eq!(cities[0].name(), "\"Honolulu\" HI");
        assert_eq!(cities[1].name(), "Austin \"TX");
        assert_eq!(cities[1].latitude(), 30.27);
    }

    #[test]
    fn test_tsv_empty_input() {
        assert!(matches!(from_tsv_reader("".as_bytes()), Err(Error::EmptyTour)));
    }

    #[test]
    fn test_read_json() {
        let data = r#"[["Maine", "Augusta", 44.323535, -69.765261],
                       ["Vermont", "Montpelier", "44.26639", "-72.57194"]]"#;
        let cities = from_json_reader(data.as_bytes()).unwrap();
        assert_eq!(cities.len(), 2);
        assert_eq!(cities[1].latitude(), 44.26639);
    }

    #[test]
    fn test_json_not_a_sequence() {
        let err = from_json_reader(r#"{"Maine": "Augusta"}"#.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::NotASequence { .. }));
    }

    #[test]
    fn test_json_syntax_error() {
        let err = from_json_reader("[[".as_bytes()).unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = read_cities("does-not-exist/city-data.txt").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
