//! Error taxonomy shared by the engine and its I/O collaborators.

use std::fmt;

use thiserror::Error;

/// Why a record failed the field check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MalformedReason {
    /// The record does not have exactly four fields.
    WrongArity { found: usize },
    /// Region or city name (field 0 or 1) is not text.
    NonTextName { field: usize },
    /// Latitude or longitude (field 2 or 3) is not a finite number.
    NonNumericCoordinate { field: usize },
}

impl fmt::Display for MalformedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MalformedReason::WrongArity { found } => {
                write!(f, "expected 4 fields, found {}", found)
            }
            MalformedReason::NonTextName { field } => {
                write!(f, "field {} must be text", field)
            }
            MalformedReason::NonNumericCoordinate { field } => {
                write!(f, "field {} must be a finite number", field)
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("tour is empty")]
    EmptyTour,
    #[error("expected a sequence of city records, found {found}")]
    NotASequence { found: String },
    #[error("record {index} is malformed: {reason}")]
    MalformedRecord { index: usize, reason: MalformedReason },
    #[error("index {index} is out of range for a tour of {len} cities")]
    IndexOutOfRange { index: isize, len: usize },
    #[error("index `{value}` is not an integer")]
    InvalidIndexType { value: String },
    #[error("invalid coordinate: {0}")]
    InvalidCoordinate(String),
    #[error("random index bound must be non-negative, got {bound}")]
    InvalidBound { bound: isize },
    #[error("invalid search configuration: {0}")]
    InvalidConfig(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn malformed(index: usize, reason: MalformedReason) -> Self {
        Error::MalformedRecord { index, reason }
    }

    pub fn invalid_coordinate(message: impl Into<String>) -> Self {
        Error::InvalidCoordinate(message.into())
    }

    pub fn invalid_config(message: impl Into<String>) -> Self {
        Error::InvalidConfig(message.into())
    }
}
