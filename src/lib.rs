//! # KnitKit
//!
//! A machine-knitting pattern compiler. Garment panels are described as trees
//! of trapezoids in inches; KnitKit turns them into row-numbered instructions
//! for a given gauge and size.
//!
//! ## Architecture
//!
//! KnitKit is organized as a workspace with multiple crates:
//!
//! 1. **knitkit-core** - Gauge, inch units, stitch rounding, errors
//! 2. **knitkit-shaping** - Trapezoid trees, stitch plans, panels, garments
//! 3. **knitkit-settings** - JSON/TOML configuration
//! 4. **knitkit** - Command-line binary that integrates all crates

pub mod output;

pub use knitkit_core::{Error, Gauge, PatternError, Result, ShapeError};
pub use knitkit_settings::{Config, OutputFormat};
pub use knitkit_shaping::{
    Garment, Instruction, Panel, Pattern, PlanContext, Row, StitchPlan, Trapezoid,
    DEFAULT_SIZE_MODIFIER,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging
///
/// Sets up structured logging on stderr with:
/// - `RUST_LOG` environment variable support, falling back to `level`
/// - Human-readable lines, or JSON records when `json` is set
pub fn init_logging(level: &str, json: bool) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .map_err(|e| anyhow::anyhow!("invalid log filter '{}': {}", level, e))?;

    if json {
        let fmt_layer = fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_level(true);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()?;
    } else {
        let fmt_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_level(true)
            .with_line_number(true);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()?;
    }

    Ok(())
}
