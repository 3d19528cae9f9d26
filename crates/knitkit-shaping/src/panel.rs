//! Panel: a shape tree bound to a gauge and a size.
//!
//! A panel is the unit a knitter works through from cast-on to the last
//! bind-off. It fixes the calling convention for generation (row 1, root
//! cast-on) and carries an optional visual motif reference for the
//! surrounding application.

use crate::instruction::Instruction;
use crate::record;
use crate::stitch_plan::StitchPlan;
use crate::trapezoid::{PlanContext, Trapezoid};
use knitkit_core::{Gauge, Result};
use serde_json::{json, Value};
use tracing::info;

/// Size multiplier used when a document does not specify one
pub const DEFAULT_SIZE_MODIFIER: f64 = 1.006;

#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    shape: Option<Trapezoid>,
    gauge: Gauge,
    size_modifier: f64,
    visual_motif: Option<Value>,
}

impl Panel {
    pub fn new(shape: impl Into<Option<Trapezoid>>, gauge: Gauge, size_modifier: f64) -> Self {
        Self {
            shape: shape.into(),
            gauge,
            size_modifier,
            visual_motif: None,
        }
    }

    pub fn with_gauge(mut self, gauge: Gauge) -> Self {
        self.gauge = gauge;
        self
    }

    pub fn with_size_modifier(mut self, size_modifier: f64) -> Self {
        self.size_modifier = size_modifier;
        self
    }

    /// Attach an opaque motif reference; it is stored and serialized, never
    /// interpreted here
    pub fn with_visual_motif(mut self, motif: Value) -> Self {
        self.visual_motif = (!motif.is_null()).then_some(motif);
        self
    }

    /// Load a panel document.
    ///
    /// Accepts `{ "shapes": <shape>, "gauge"?, "sizeModifier"?, "visualMotif"? }`
    /// or a bare shape record. A null `shapes` gives a panel without a shape.
    pub fn from_value(value: &Value) -> Result<Self> {
        let Value::Object(obj) = value else {
            return Ok(Self::new(None, Gauge::default(), DEFAULT_SIZE_MODIFIER));
        };

        if !obj.contains_key("shapes") {
            return Ok(Self::new(
                Trapezoid::from_value(value),
                Gauge::default(),
                DEFAULT_SIZE_MODIFIER,
            ));
        }

        let shape = obj.get("shapes").and_then(Trapezoid::from_value);
        let gauge = match obj.get("gauge") {
            Some(g) if !g.is_null() => serde_json::from_value(g.clone())?,
            _ => Gauge::default(),
        };
        let size_modifier =
            record::positive_number(obj, "sizeModifier").unwrap_or(DEFAULT_SIZE_MODIFIER);

        let mut panel = Self::new(shape, gauge, size_modifier);
        if let Some(motif) = obj.get("visualMotif") {
            panel = panel.with_visual_motif(motif.clone());
        }
        Ok(panel)
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(&value)
    }

    pub fn to_value(&self) -> Value {
        json!({
            "shapes": self.shape.as_ref().map_or(Value::Null, Trapezoid::to_value),
            "gauge": self.gauge,
            "sizeModifier": self.size_modifier,
            "visualMotif": self.visual_motif.clone().unwrap_or(Value::Null),
        })
    }

    pub fn shape(&self) -> Option<&Trapezoid> {
        self.shape.as_ref()
    }

    pub fn gauge(&self) -> Gauge {
        self.gauge
    }

    pub fn size_modifier(&self) -> f64 {
        self.size_modifier
    }

    pub fn visual_motif(&self) -> Option<&Value> {
        self.visual_motif.as_ref()
    }

    pub fn context(&self) -> PlanContext {
        PlanContext::new(self.gauge, self.size_modifier)
    }

    /// Every instruction for the panel, starting at row 1 with a cast-on
    pub fn instructions(&self) -> Vec<Instruction> {
        let Some(shape) = &self.shape else {
            return Vec::new();
        };
        let instructions = shape.generate_instructions(&self.context(), 1, true);
        info!(
            gauge = %self.gauge,
            size_modifier = self.size_modifier,
            lines = instructions.len(),
            "generated panel instructions"
        );
        instructions
    }

    /// Text form of [`Panel::instructions`]
    pub fn generate_knitting_instructions(&self) -> Vec<String> {
        self.instructions().iter().map(ToString::to_string).collect()
    }

    /// Row timelines of every segment, in generation order
    pub fn stitch_plans(&self) -> Vec<StitchPlan> {
        self.shape
            .as_ref()
            .map(|shape| shape.stitch_plans(&self.context(), 1))
            .unwrap_or_default()
    }
}
