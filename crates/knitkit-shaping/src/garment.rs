//! Garment documents
//!
//! A garment groups named panels (front, back, sleeves...) with a table of
//! named size multipliers and the seaming steps that follow knitting. Panel
//! and size order in the document is the order a knitter reads them, so both
//! are kept as ordered lists.

use crate::instruction::Instruction;
use crate::panel::Panel;
use crate::record;
use crate::trapezoid::Trapezoid;
use knitkit_core::error::PatternError;
use knitkit_core::{Gauge, Result};
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::path::Path;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq)]
pub struct Garment {
    pub permalink: String,
    pub title: String,
    pub description: String,
    /// Size label and multiplier, in document order
    pub sizes: Vec<(String, f64)>,
    /// Panel name and shape tree, in document order
    pub shapes: Vec<(String, Trapezoid)>,
    pub finishing_steps: Vec<String>,
}

/// Instructions for one named panel of a garment
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanelInstructions {
    pub name: String,
    pub instructions: Vec<Instruction>,
}

/// A fully generated garment pattern at one size
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pattern {
    pub title: String,
    pub size_modifier: f64,
    pub panels: Vec<PanelInstructions>,
    pub finishing_steps: Vec<String>,
}

impl Garment {
    pub fn from_value(value: &Value) -> Result<Self> {
        let Value::Object(obj) = value else {
            return Err(PatternError::MissingField {
                field: "shapes".to_string(),
            }
            .into());
        };

        let title = record::label(obj, "title").unwrap_or_default();

        let shapes = match obj.get("shapes") {
            Some(Value::Object(panels)) => panels
                .iter()
                .filter_map(|(name, shape)| match Trapezoid::from_value(shape) {
                    Some(shape) => Some((name.clone(), shape)),
                    None => {
                        warn!(panel = %name, "skipping panel without a shape record");
                        None
                    }
                })
                .collect::<Vec<_>>(),
            Some(_) => Vec::new(),
            None => {
                return Err(PatternError::MissingField {
                    field: "shapes".to_string(),
                }
                .into())
            }
        };
        if shapes.is_empty() {
            return Err(PatternError::NoPanels { title }.into());
        }

        let sizes = match obj.get("sizes") {
            Some(Value::Object(table)) => table
                .iter()
                .filter_map(|(label, _)| {
                    let factor = record::positive_number(table, label);
                    if factor.is_none() {
                        warn!(size = %label, "ignoring size without a positive multiplier");
                    }
                    factor.map(|f| (label.clone(), f))
                })
                .collect(),
            _ => Vec::new(),
        };

        Ok(Self {
            permalink: record::label(obj, "permalink").unwrap_or_default(),
            title,
            description: record::label(obj, "description").unwrap_or_default(),
            sizes,
            shapes,
            finishing_steps: record::text_list(obj, "finishingSteps"),
        })
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(&value)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Look up the multiplier for a size label
    pub fn size(&self, label: &str) -> Result<f64> {
        self.sizes
            .iter()
            .find(|(name, _)| name == label)
            .map(|(_, factor)| *factor)
            .ok_or_else(|| {
                PatternError::UnknownSize {
                    label: label.to_string(),
                    available: self
                        .sizes
                        .iter()
                        .map(|(name, _)| name.as_str())
                        .collect::<Vec<_>>()
                        .join(", "),
                }
                .into()
            })
    }

    pub fn panels(&self, gauge: Gauge, size_modifier: f64) -> Vec<(String, Panel)> {
        self.shapes
            .iter()
            .map(|(name, shape)| (name.clone(), Panel::new(shape.clone(), gauge, size_modifier)))
            .collect()
    }

    pub fn generate_pattern(&self, gauge: Gauge, size_modifier: f64) -> Pattern {
        let panels: Vec<PanelInstructions> = self
            .panels(gauge, size_modifier)
            .into_iter()
            .map(|(name, panel)| PanelInstructions {
                name,
                instructions: panel.instructions(),
            })
            .collect();

        info!(
            garment = %self.permalink,
            panels = panels.len(),
            size_modifier,
            "generated garment pattern"
        );

        Pattern {
            title: self.title.clone(),
            size_modifier,
            panels,
            finishing_steps: self.finishing_steps.clone(),
        }
    }
}

impl Pattern {
    /// Total instruction lines across all panels, excluding finishing steps
    pub fn line_count(&self) -> usize {
        self.panels.iter().map(|p| p.instructions.len()).sum()
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        for panel in &self.panels {
            writeln!(f)?;
            writeln!(f, "{}:", panel.name)?;
            for line in &panel.instructions {
                writeln!(f, "{}", line)?;
            }
        }
        if !self.finishing_steps.is_empty() {
            writeln!(f)?;
            writeln!(f, "Finishing:")?;
            for step in &self.finishing_steps {
                writeln!(f, "{}", step)?;
            }
        }
        Ok(())
    }
}
