//! # KnitKit Core
//!
//! Core types and utilities for KnitKit.
//! Provides the gauge model, inch parsing and stitch rounding, and the
//! error types shared across the workspace.

pub mod error;
pub mod gauge;
pub mod units;

pub use error::{Error, PatternError, Result, ShapeError};
pub use gauge::Gauge;
pub use units::{check_size_modifier, format_inches, parse_inches, round_stitches};
