//! Unit utilities
//!
//! All panel dimensions are inches. Handles decimal and fractional inch
//! parsing ("5 1/2", "3/4"), display formatting, and the rounding rule used
//! whenever a length is turned into a whole number of stitches or rows.

use crate::error::{Error, Result, ShapeError};

/// Unit label for panel dimensions
pub const INCH_LABEL: &str = "in";

/// Round a stitch or row quantity to a whole number.
///
/// Ties go to the even neighbour, so a half-stitch excess is treated the same
/// way for increases and decreases.
pub fn round_stitches(value: f64) -> i64 {
    if !value.is_finite() {
        return 0;
    }
    value.round_ties_even() as i64
}

/// Accept a size multiplier only if it is positive and finite
pub fn check_size_modifier(size_modifier: f64) -> Result<f64> {
    if size_modifier.is_finite() && size_modifier > 0.0 {
        Ok(size_modifier)
    } else {
        Err(Error::InvalidSizeModifier(size_modifier))
    }
}

/// Format an inch value for display, trimming trailing zeros
///
/// * `inches` - Value in inches
pub fn format_inches(inches: f64) -> String {
    let text = format!("{:.3}", inches);
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text.is_empty() || text == "-0" {
        "0".to_string()
    } else {
        text.to_string()
    }
}

/// Parse an inch string
///
/// Accepts decimals ("5.5") and whole-plus-fraction forms ("5 1/2", "1/4").
/// An empty string parses as zero.
///
/// * `input` - String to parse
pub fn parse_inches(input: &str) -> std::result::Result<f64, ShapeError> {
    let trimmed = input.trim().trim_end_matches(INCH_LABEL).trim_end_matches('"');
    let trimmed = trimmed.trim();
    if trimmed.is_empty() {
        return Ok(0.0);
    }

    let fail = |reason: &str| ShapeError::UnparsableInches {
        input: input.to_string(),
        reason: reason.to_string(),
    };

    if !trimmed.contains('/') {
        return trimmed
            .parse::<f64>()
            .map_err(|e| fail(&e.to_string()))
            .and_then(|v| {
                if v.is_finite() {
                    Ok(v)
                } else {
                    Err(fail("Not a finite number"))
                }
            });
    }

    let mut total_inches = 0.0;
    let mut negative = false;
    for (index, part) in trimmed.split_whitespace().enumerate() {
        let part = if index == 0 && part.starts_with('-') {
            negative = true;
            &part[1..]
        } else {
            part
        };
        if part.contains('/') {
            let frac_parts: Vec<&str> = part.split('/').collect();
            if frac_parts.len() != 2 {
                return Err(fail("Invalid fraction format"));
            }
            let num = frac_parts[0]
                .parse::<f64>()
                .map_err(|_| fail("Invalid numerator"))?;
            let den = frac_parts[1]
                .parse::<f64>()
                .map_err(|_| fail("Invalid denominator"))?;
            if den == 0.0 {
                return Err(fail("Division by zero"));
            }
            total_inches += num / den;
        } else {
            total_inches += part
                .parse::<f64>()
                .map_err(|_| fail("Invalid number part"))?;
        }
    }

    Ok(if negative {
        -total_inches
    } else {
        total_inches
    })
}
