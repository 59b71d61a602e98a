//! Input checks applied at every public entry point.
//!
//! Raw records (as produced by ingestion) are checked once and turned into
//! typed [`Point`]s by [`validate_records`]. Operations that take a tour call
//! [`check_tour`], which covers emptiness and coordinates that slipped past
//! construction as NaN or infinity.

use serde_json::Value;

use crate::error::{Error, MalformedReason, Result};
use crate::point::Point;

/// Number of fields in a city record: region, name, latitude, longitude.
pub const RECORD_FIELDS: usize = 4;

/// Shape and record check on a typed tour.
pub fn check_tour(tour: &[Point]) -> Result<()> {
    if tour.is_empty() {
        return Err(Error::EmptyTour);
    }

    for (index, point) in tour.iter().enumerate() {
        if !point.latitude().is_finite() {
            return Err(Error::malformed(
                index,
                MalformedReason::NonNumericCoordinate { field: 2 },
            ));
        }
        if !point.longitude().is_finite() {
            return Err(Error::malformed(
                index,
                MalformedReason::NonNumericCoordinate { field: 3 },
            ));
        }
    }

    Ok(())
}

/// Validate a raw sequence of records and build the tour.
///
/// The value must be an array of 4-element arrays: two strings followed by
/// two coordinates given either as numbers or as strings holding a number.
pub fn validate_records(value: &Value) -> Result<Vec<Point>> {
    let records = value.as_array().ok_or_else(|| Error::NotASequence {
        found: kind_of(value).to_string(),
    })?;

    if records.is_empty() {
        return Err(Error::EmptyTour);
    }

    records
        .iter()
        .enumerate()
        .map(|(index, record)| validate_record(index, record))
        .collect()
}

fn validate_record(index: usize, record: &Value) -> Result<Point> {
    // A bare scalar or object counts as a single field.
    let fields = match record.as_array() {
        Some(fields) => fields,
        None => return Err(Error::malformed(index, MalformedReason::WrongArity { found: 1 })),
    };
    if fields.len() != RECORD_FIELDS {
        return Err(Error::malformed(
            index,
            MalformedReason::WrongArity { found: fields.len() },
        ));
    }

    let region = text_field(index, fields, 0)?;
    let name = text_field(index, fields, 1)?;
    let latitude = coordinate_field(index, fields, 2)?;
    let longitude = coordinate_field(index, fields, 3)?;

    Ok(Point::new(region, name, latitude, longitude))
}

fn text_field<'a>(index: usize, fields: &'a [Value], field: usize) -> Result<&'a str> {
    fields[field]
        .as_str()
        .ok_or_else(|| Error::malformed(index, MalformedReason::NonTextName { field }))
}

fn coordinate_field(index: usize, fields: &[Value], field: usize) -> Result<f64> {
    parse_coordinate(&fields[field])
        .ok_or_else(|| Error::malformed(index, MalformedReason::NonNumericCoordinate { field }))
}

/// Read a coordinate from a number or a numeric string. `None` for anything
/// else, including NaN and infinities.
pub fn parse_coordinate(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|c| c.is_finite())
}

/// Check an inclusive upper bound for index sampling.
pub fn check_bound(max: isize) -> Result<usize> {
    usize::try_from(max).map_err(|_| Error::InvalidBound { bound: max })
}

/// Check a position against a tour length.
pub fn check_index(index: isize, len: usize) -> Result<usize> {
    match usize::try_from(index) {
        Ok(i) if i < len => Ok(i),
        _ => Err(Error::IndexOutOfRange { index, len }),
    }
}

/// Parse a textual tour position. Negative values parse fine and are left
/// to the range check of the operation that uses them.
pub fn parse_index(raw: &str) -> Result<isize> {
    raw.trim()
        .parse::<isize>()
        .map_err(|_| Error::InvalidIndexType {
            value: raw.to_string(),
        })
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
