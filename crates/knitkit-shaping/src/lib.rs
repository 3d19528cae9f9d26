//! # KnitKit Shaping
//!
//! Turns trapezoidal panel descriptions into row-by-row machine knitting
//! instructions.
//!
//! ## Pipeline
//!
//! 1. A [`Trapezoid`] tree is loaded from a nested record or built in code.
//! 2. Each node expands into a [`StitchPlan`], one [`Row`] per knitted row,
//!    with edge shaping spread evenly across the rows.
//! 3. Plans compile into compact [`Instruction`] lines.
//! 4. [`Panel`] and [`Garment`] fix the gauge, size and calling convention.
//!
//! Generation is infallible and deterministic; errors only arise when
//! loading documents.

pub mod garment;
pub mod instruction;
pub mod panel;
mod record;
pub mod stitch_plan;
pub mod trapezoid;

pub use garment::{Garment, PanelInstructions, Pattern};
pub use instruction::Instruction;
pub use panel::{Panel, DEFAULT_SIZE_MODIFIER};
pub use stitch_plan::{Row, StitchPlan};
pub use trapezoid::{PlanContext, Trapezoid};
