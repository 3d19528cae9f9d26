//! Trapezoidal panel segments.
//!
//! A panel is a tree of trapezoids: each node is a tapered or rectangular
//! segment with a lower edge (`base_a`), an upper edge (`base_b`) and a
//! height, all in inches. Children are knitted after their parent, either as
//! a continuation (one successor) or as simultaneous sections split onto
//! holders (two or more successors).

use crate::instruction::Instruction;
use crate::record;
use crate::stitch_plan::{Row, StitchPlan};
use knitkit_core::error::ShapeError;
use knitkit_core::units::{format_inches, round_stitches, INCH_LABEL};
use knitkit_core::Gauge;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use tracing::{debug, warn};

/// Everything a generation pass needs besides the shape itself
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanContext {
    pub gauge: Gauge,
    /// Multiplier applied to every authored dimension
    pub size_modifier: f64,
}

impl PlanContext {
    pub fn new(gauge: Gauge, size_modifier: f64) -> Self {
        Self {
            gauge,
            size_modifier,
        }
    }
}

/// One segment of a flat-knit panel
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Trapezoid {
    pub height: f64,
    /// Lower edge width
    pub base_a: f64,
    /// Upper edge width
    pub base_b: f64,
    /// Lateral shift of the upper edge's centerline; positive moves it right
    pub base_b_horizontal_offset: f64,
    pub successors: Vec<Trapezoid>,
    pub finishing_steps: Vec<String>,
    pub label: Option<String>,
    pub is_hem: bool,
}

/// Spreads a whole-stitch delta evenly over a fixed number of rows.
///
/// The accumulator is kept in units of `1 / total_rows`, so the running
/// error stays below one stitch and the full delta lands by the last row.
struct EdgeShaper {
    delta: i64,
    total_rows: i64,
    accumulator: i64,
}

impl EdgeShaper {
    fn new(delta: i64, total_rows: i64) -> Self {
        Self {
            delta,
            total_rows,
            accumulator: 0,
        }
    }

    fn step(&mut self) -> i64 {
        self.accumulator += self.delta.abs();
        let units = self.accumulator / self.total_rows;
        self.accumulator %= self.total_rows;
        units * self.delta.signum()
    }
}

impl Trapezoid {
    pub fn new(height: f64, base_a: f64, base_b: f64) -> Self {
        Self {
            height,
            base_a,
            base_b,
            base_b_horizontal_offset: 0.0,
            successors: Vec::new(),
            finishing_steps: Vec::new(),
            label: None,
            is_hem: false,
        }
    }

    pub fn with_offset(mut self, offset: f64) -> Self {
        self.base_b_horizontal_offset = offset;
        self
    }

    pub fn with_successors(mut self, successors: Vec<Trapezoid>) -> Self {
        self.successors = successors;
        self
    }

    pub fn with_finishing_steps<I, S>(mut self, steps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.finishing_steps = steps.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Build a shape tree from a nested record.
    ///
    /// Returns `None` for null or non-object input. Children that are not
    /// objects are skipped, numeric fields may be numbers or inch strings,
    /// and missing fields take their defaults.
    pub fn from_value(value: &Value) -> Option<Self> {
        let Value::Object(obj) = value else {
            return None;
        };

        let successors = match obj.get("successors") {
            Some(Value::Array(children)) => children
                .iter()
                .enumerate()
                .filter_map(|(index, child)| {
                    let parsed = Trapezoid::from_value(child);
                    if parsed.is_none() {
                        warn!(index, "skipping malformed successor record");
                    }
                    parsed
                })
                .collect(),
            _ => Vec::new(),
        };

        Some(Self {
            height: record::inches(obj, "height"),
            base_a: record::inches(obj, "baseA"),
            base_b: record::inches(obj, "baseB"),
            base_b_horizontal_offset: record::inches(obj, "baseBHorizontalOffset"),
            successors,
            finishing_steps: record::text_list(obj, "finishingSteps"),
            label: record::label(obj, "label"),
            is_hem: record::flag(obj, "isHem"),
        })
    }

    /// Like [`Trapezoid::from_value`], but reports an empty record as an error
    pub fn try_from_value(value: &Value) -> Result<Self, ShapeError> {
        Self::from_value(value).ok_or(ShapeError::EmptyRecord)
    }

    /// Serialize back to the nested record layout
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }

    /// Check that every dimension in the tree is finite, widths and heights
    /// are not negative, and no upper edge is shifted past its own half
    /// width. Generation does not require this; loaders use it to reject
    /// obviously broken input early.
    pub fn validate(&self) -> Result<(), ShapeError> {
        let fields = [
            ("height", self.height, false),
            ("baseA", self.base_a, false),
            ("baseB", self.base_b, false),
            ("baseBHorizontalOffset", self.base_b_horizontal_offset, true),
        ];
        for (field, value, may_be_negative) in fields {
            if !value.is_finite() || (!may_be_negative && value < 0.0) {
                return Err(ShapeError::InvalidDimension {
                    field: field.to_string(),
                    value,
                });
            }
        }
        // the upper edge must still straddle the centerline
        if self.base_b_horizontal_offset.abs() > self.base_b / 2.0 {
            return Err(ShapeError::InvalidDimension {
                field: "baseBHorizontalOffset".to_string(),
                value: self.base_b_horizontal_offset,
            });
        }
        self.successors.iter().try_for_each(Trapezoid::validate)
    }

    pub fn height(&self, size_modifier: f64) -> f64 {
        self.height * size_modifier
    }

    pub fn lower_base(&self, size_modifier: f64) -> f64 {
        self.base_a * size_modifier
    }

    pub fn upper_base(&self, size_modifier: f64) -> f64 {
        self.base_b * size_modifier
    }

    pub fn offset(&self, size_modifier: f64) -> f64 {
        self.base_b_horizontal_offset * size_modifier
    }

    /// Stitches across the lower edge
    pub fn base_width_in_stitches(&self, gauge: &Gauge, size_modifier: f64) -> i64 {
        round_stitches(self.lower_base(size_modifier) * gauge.stitches_per_inch())
    }

    /// Stitches across the upper edge
    pub fn upper_base_width_in_stitches(&self, gauge: &Gauge, size_modifier: f64) -> i64 {
        round_stitches(self.upper_base(size_modifier) * gauge.stitches_per_inch())
    }

    /// Number of rows this segment knits
    pub fn total_rows(&self, ctx: &PlanContext) -> i64 {
        round_stitches(self.height(ctx.size_modifier) * ctx.gauge.rows_per_inch())
    }

    /// Whole-stitch change on the left and right edges over the segment
    pub fn edge_deltas(&self, ctx: &PlanContext) -> (i64, i64) {
        let m = ctx.size_modifier;
        let spi = ctx.gauge.stitches_per_inch();
        let half_change = (self.upper_base(m) - self.lower_base(m)) / 2.0;
        let left_share = half_change - self.offset(m);
        let right_share = half_change + self.offset(m);
        (round_stitches(left_share * spi), round_stitches(right_share * spi))
    }

    /// Row-by-row stitch counts for this segment alone, numbered from
    /// `start_row`.
    pub fn stitch_plan(&self, ctx: &PlanContext, start_row: u32) -> StitchPlan {
        let mut plan = StitchPlan::new();
        let total_rows = self.total_rows(ctx);
        if total_rows <= 0 {
            return plan;
        }

        let (mut left_stitches, mut right_stitches) = self.start_halves(ctx);
        let (left_delta, right_delta) = self.edge_deltas(ctx);
        let mut left = EdgeShaper::new(left_delta, total_rows);
        let mut right = EdgeShaper::new(right_delta, total_rows);

        for row_number in (start_row..).take(total_rows as usize) {
            let (left_shaping, right_shaping) = (left.step(), right.step());
            left_stitches += left_shaping;
            right_stitches += right_shaping;
            plan.add_row(Row {
                row_number,
                left_stitches,
                right_stitches,
                left_shaping,
                right_shaping,
            });
        }

        plan
    }

    /// Lower-edge stitches split at the centerline; an odd stitch goes right
    fn start_halves(&self, ctx: &PlanContext) -> (i64, i64) {
        let stitches = self.base_width_in_stitches(&ctx.gauge, ctx.size_modifier);
        let left = stitches.div_euclid(2);
        (left, stitches - left)
    }

    /// Check that no row-producing segment in the tree shapes either side of
    /// the centerline below zero stitches at this gauge and size.
    ///
    /// Each edge moves in one direction only, so the last row of a segment
    /// holds its smallest count when it decreases.
    pub fn check_stitch_counts(&self, ctx: &PlanContext) -> Result<(), ShapeError> {
        if self.total_rows(ctx) > 0 {
            let (start_left, start_right) = self.start_halves(ctx);
            let (left_delta, right_delta) = self.edge_deltas(ctx);
            let (left, right) = (start_left + left_delta, start_right + right_delta);
            if left < 0 || right < 0 {
                return Err(ShapeError::NegativeStitches {
                    shape: self.to_string(),
                    left,
                    right,
                });
            }
        }
        self.successors
            .iter()
            .try_for_each(|successor| successor.check_stitch_counts(ctx))
    }

    /// Instructions for this segment and everything knitted after it.
    ///
    /// Only the root (`is_root`) emits a cast-on. Successor sections each
    /// continue row numbering from this segment's last row.
    pub fn generate_instructions(
        &self,
        ctx: &PlanContext,
        start_row: u32,
        is_root: bool,
    ) -> Vec<Instruction> {
        let plan = self.stitch_plan(ctx, start_row);
        let mut instructions = Vec::new();

        if is_root {
            if let Some(first) = plan.first() {
                instructions.push(Instruction::CastOn {
                    stitches: first.total(),
                });
            }
        }

        instructions.extend(plan.compile());
        instructions.extend(
            self.finishing_steps
                .iter()
                .map(|text| Instruction::Finishing { text: text.clone() }),
        );

        let next_row = plan.last().map_or(start_row, |row| row.row_number + 1);
        let m = ctx.size_modifier;

        match self.successors.as_slice() {
            [] => {
                let stitches = plan.last().map_or_else(
                    || self.base_width_in_stitches(&ctx.gauge, m),
                    Row::total,
                );
                instructions.push(Instruction::BindOff { stitches });
            }
            [only] => {
                if only.height(m) > 0.0 {
                    instructions.extend(only.generate_instructions(ctx, next_row, false));
                } else {
                    instructions.push(Instruction::BindOff {
                        stitches: only.base_width_in_stitches(&ctx.gauge, m),
                    });
                }
            }
            many => {
                instructions.push(Instruction::Divide {
                    sections: many.len(),
                });
                for (i, successor) in many.iter().enumerate() {
                    let index = i + 1;
                    let stitches = successor.base_width_in_stitches(&ctx.gauge, m);
                    if successor.height(m) > 0.0 {
                        instructions.push(Instruction::Section { index, stitches });
                        instructions.extend(successor.generate_instructions(ctx, next_row, false));
                    } else {
                        instructions.push(Instruction::SectionBindOff { index, stitches });
                    }
                }
            }
        }

        debug!(
            shape = %self,
            start_row,
            rows = plan.len(),
            successors = self.successors.len(),
            lines = instructions.len(),
            "generated segment instructions"
        );

        instructions
    }

    /// Text form of [`Trapezoid::generate_instructions`]
    pub fn generate_knitting_instructions(
        &self,
        ctx: &PlanContext,
        start_row: u32,
        is_root: bool,
    ) -> Vec<String> {
        self.generate_instructions(ctx, start_row, is_root)
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    /// Stitch plans of this segment and every row-producing descendant, in
    /// the same order and numbering as [`Trapezoid::generate_instructions`].
    pub fn stitch_plans(&self, ctx: &PlanContext, start_row: u32) -> Vec<StitchPlan> {
        let plan = self.stitch_plan(ctx, start_row);
        let next_row = plan.last().map_or(start_row, |row| row.row_number + 1);
        let mut plans = vec![plan];
        for successor in &self.successors {
            if successor.height(ctx.size_modifier) > 0.0 {
                plans.extend(successor.stitch_plans(ctx, next_row));
            }
        }
        plans
    }

    /// Number of nodes in the tree
    pub fn node_count(&self) -> usize {
        1 + self.successors.iter().map(Trapezoid::node_count).sum::<usize>()
    }
}

impl fmt::Display for Trapezoid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inches = |v: f64| format!("{}{}", format_inches(v), INCH_LABEL);
        if let Some(label) = &self.label {
            write!(f, "{}: ", label)?;
        }
        write!(
            f,
            "{} tall, {} to {}",
            inches(self.height),
            inches(self.base_a),
            inches(self.base_b)
        )?;
        if self.base_b_horizontal_offset != 0.0 {
            write!(f, ", shifted {}", inches(self.base_b_horizontal_offset))?;
        }
        Ok(())
    }
}
