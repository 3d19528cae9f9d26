//! Error handling for KnitKit
//!
//! Provides the error types shared by every layer of the workspace:
//! - Shape errors (records that cannot describe a panel)
//! - Gauge errors (non-positive or non-finite densities)
//! - Pattern errors (garment documents and size tables)
//!
//! All error types use `thiserror` for ergonomic error handling. Instruction
//! generation itself never fails; these errors surface only at the loading
//! and validation edges.

use thiserror::Error;

/// Shape record error type
///
/// Represents a nested shape record that cannot be turned into a panel.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ShapeError {
    /// The record is null or not an object
    #[error("Shape record is empty or not an object")]
    EmptyRecord,

    /// A dimension is negative or not a number
    #[error("Invalid dimension '{field}': {value}")]
    InvalidDimension {
        /// The offending field name.
        field: String,
        /// The rejected value.
        value: f64,
    },

    /// Shaping at the chosen gauge and size leaves a side with fewer than
    /// zero stitches
    #[error("Segment '{shape}' ends with {left} stitches left and {right} right of center")]
    NegativeStitches {
        /// Summary of the offending segment.
        shape: String,
        /// Left-side stitches on the segment's last row.
        left: i64,
        /// Right-side stitches on the segment's last row.
        right: i64,
    },

    /// A dimension string could not be read as inches
    #[error("Cannot parse '{input}' as inches: {reason}")]
    UnparsableInches {
        /// The raw input text.
        input: String,
        /// Why parsing failed.
        reason: String,
    },
}

/// Pattern error type
///
/// Represents errors related to garment documents and their size tables.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PatternError {
    /// The requested size label is not in the garment's size table
    #[error("Unknown size '{label}' (available: {available})")]
    UnknownSize {
        /// The requested label.
        label: String,
        /// Comma-separated list of known labels.
        available: String,
    },

    /// The garment document has no panels
    #[error("Garment '{title}' has no panels")]
    NoPanels {
        /// The garment title.
        title: String,
    },

    /// The document is missing a required section
    #[error("Missing '{field}' in pattern document")]
    MissingField {
        /// The missing field name.
        field: String,
    },
}

/// Main error type for KnitKit
///
/// A unified error type that can represent any error from the library crates.
/// This is the primary error type used in public APIs.
#[derive(Error, Debug)]
pub enum Error {
    /// Gauge densities must be positive and finite
    #[error("Invalid gauge: {stitches} stitches / {rows} rows per 4 inches")]
    InvalidGauge {
        /// Stitches per four inches.
        stitches: f64,
        /// Rows per four inches.
        rows: f64,
    },

    /// Size multiplier must be positive and finite
    #[error("Invalid size modifier: {0}")]
    InvalidSizeModifier(f64),

    /// Shape record error
    #[error(transparent)]
    Shape(#[from] ShapeError),

    /// Pattern document error
    #[error(transparent)]
    Pattern(#[from] PatternError),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Check if this is a shape record error
    pub fn is_shape_error(&self) -> bool {
        matches!(self, Error::Shape(_))
    }

    /// Check if this is a pattern document error
    pub fn is_pattern_error(&self) -> bool {
        matches!(self, Error::Pattern(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
