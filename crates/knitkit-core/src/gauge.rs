//! Knitting gauge
//!
//! A gauge is the stitch and row density of knitted fabric, measured over a
//! four-inch square at a given tension.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default stitches per four inches
pub const DEFAULT_STITCHES_PER_FOUR_INCHES: f64 = 19.0;
/// Default rows per four inches
pub const DEFAULT_ROWS_PER_FOUR_INCHES: f64 = 30.0;

/// Stitch and row density of a fabric
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Gauge {
    /// Stitches counted across four inches
    #[serde(alias = "stitchesPer4Inches", alias = "stitches")]
    stitches_per_four_inches: f64,
    /// Rows counted across four inches
    #[serde(alias = "rowsPer4Inches", alias = "rows")]
    rows_per_four_inches: f64,
}

impl Gauge {
    /// Create a gauge without validation.
    ///
    /// Positive densities are the caller's responsibility; use
    /// [`Gauge::try_new`] for values that come from users or files.
    pub const fn new(stitches_per_four_inches: f64, rows_per_four_inches: f64) -> Self {
        Self {
            stitches_per_four_inches,
            rows_per_four_inches,
        }
    }

    /// Create a gauge, rejecting non-positive or non-finite densities
    pub fn try_new(stitches_per_four_inches: f64, rows_per_four_inches: f64) -> Result<Self> {
        let gauge = Self::new(stitches_per_four_inches, rows_per_four_inches);
        gauge.validate()?;
        Ok(gauge)
    }

    /// Check that both densities are positive and finite
    pub fn validate(&self) -> Result<()> {
        let ok = |v: f64| v.is_finite() && v > 0.0;
        if ok(self.stitches_per_four_inches) && ok(self.rows_per_four_inches) {
            Ok(())
        } else {
            Err(Error::InvalidGauge {
                stitches: self.stitches_per_four_inches,
                rows: self.rows_per_four_inches,
            })
        }
    }

    pub fn stitches_per_four_inches(&self) -> f64 {
        self.stitches_per_four_inches
    }

    pub fn rows_per_four_inches(&self) -> f64 {
        self.rows_per_four_inches
    }

    pub fn stitches_per_inch(&self) -> f64 {
        self.stitches_per_four_inches / 4.0
    }

    pub fn rows_per_inch(&self) -> f64 {
        self.rows_per_four_inches / 4.0
    }
}

impl Default for Gauge {
    fn default() -> Self {
        Self::new(DEFAULT_STITCHES_PER_FOUR_INCHES, DEFAULT_ROWS_PER_FOUR_INCHES)
    }
}

impl fmt::Display for Gauge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} sts x {} rows per 4in",
            self.stitches_per_four_inches, self.rows_per_four_inches
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_per_inch_rates() {
        let gauge = Gauge::new(19.0, 30.0);
        assert_eq!(gauge.stitches_per_inch(), 4.75);
        assert_eq!(gauge.rows_per_inch(), 7.5);
    }

    #[test]
    fn test_default_gauge() {
        assert_eq!(Gauge::default(), Gauge::new(19.0, 30.0));
    }

    #[test]
    fn test_try_new_rejects_bad_densities() {
        assert!(Gauge::try_new(19.0, 30.0).is_ok());
        assert!(Gauge::try_new(0.0, 30.0).is_err());
        assert!(Gauge::try_new(19.0, -1.0).is_err());
        assert!(Gauge::try_new(f64::NAN, 30.0).is_err());
    }

    #[test]
    fn test_deserialize_aliases() {
        let g: Gauge =
            serde_json::from_str(r#"{"stitchesPerFourInches": 10, "rowsPerFourInches": 12}"#)
                .unwrap();
        assert_eq!(g, Gauge::new(10.0, 12.0));

        let g: Gauge =
            serde_json::from_str(r#"{"stitchesPer4Inches": 10, "rowsPer4Inches": 12}"#).unwrap();
        assert_eq!(g, Gauge::new(10.0, 12.0));

        let g: Gauge = serde_json::from_str(r#"{"stitches": 19, "rows": 30}"#).unwrap();
        assert_eq!(g, Gauge::default());
    }

    #[test]
    fn test_serialize_camel_case() {
        let json = serde_json::to_value(Gauge::new(10.0, 12.0)).unwrap();
        assert_eq!(json["stitchesPerFourInches"], 10.0);
        assert_eq!(json["rowsPerFourInches"], 12.0);
    }

    #[test]
    fn test_display() {
        assert_eq!(Gauge::default().to_string(), "19 sts x 30 rows per 4in");
    }
}
