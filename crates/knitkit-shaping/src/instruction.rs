//! Knitting instructions
//!
//! Typed form of every line the generator emits. `Display` renders the text
//! a knitter follows; `RC` is the machine row counter after the line is done.

use serde::Serialize;
use std::fmt;

/// One line of a knitting pattern
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Instruction {
    /// Initial stitches for the whole panel
    CastOn { stitches: i64 },
    /// A stretch of rows without shaping
    KnitRows {
        rows: u32,
        row_counter: u32,
        stitches: i64,
    },
    /// Edge shaping on `row_counter`, closing a run of `rows` rows
    Shaping {
        left: i64,
        right: i64,
        rows: u32,
        row_counter: u32,
        stitches: i64,
    },
    /// Free-text note authored on a shape
    Finishing { text: String },
    /// Split the work into simultaneous sections
    Divide { sections: usize },
    /// Header for a section that continues with its own rows
    Section { index: usize, stitches: i64 },
    /// A section that is bound off straight away
    SectionBindOff { index: usize, stitches: i64 },
    /// End of a piece
    BindOff { stitches: i64 },
}

impl Instruction {
    /// Whether this line removes the stitches of a piece from the needles
    pub fn is_bind_off(&self) -> bool {
        matches!(
            self,
            Instruction::BindOff { .. } | Instruction::SectionBindOff { .. }
        )
    }

    /// Row counter reached after this line, for row-producing lines
    pub fn row_counter(&self) -> Option<u32> {
        match self {
            Instruction::KnitRows { row_counter, .. } | Instruction::Shaping { row_counter, .. } => {
                Some(*row_counter)
            }
            _ => None,
        }
    }

    /// Number of rows covered by this line, for row-producing lines
    pub fn rows(&self) -> Option<u32> {
        match self {
            Instruction::KnitRows { rows, .. } | Instruction::Shaping { rows, .. } => Some(*rows),
            _ => None,
        }
    }
}

fn stitch_count(n: i64) -> String {
    if n.abs() == 1 {
        format!("{} stitch", n)
    } else {
        format!("{} stitches", n)
    }
}

fn shaping_clause(f: &mut fmt::Formatter<'_>, delta: i64, side: &str) -> fmt::Result {
    match delta.signum() {
        1 => write!(f, "Increase {} on the {}. ", stitch_count(delta), side),
        -1 => write!(f, "Decrease {} on the {}. ", stitch_count(-delta), side),
        _ => Ok(()),
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instruction::CastOn { stitches } => write!(f, "Cast on {}.", stitch_count(*stitches)),
            Instruction::KnitRows {
                rows,
                row_counter,
                stitches,
            } => {
                let noun = if *rows == 1 { "row" } else { "rows" };
                write!(
                    f,
                    "Knit {} {} (RC={}, {} sts in work).",
                    rows, noun, row_counter, stitches
                )
            }
            Instruction::Shaping {
                left,
                right,
                rows,
                row_counter,
                stitches,
            } => {
                shaping_clause(f, *left, "left")?;
                shaping_clause(f, *right, "right")?;
                if *rows == 1 {
                    write!(f, "Knit 1 row. ")?;
                } else {
                    write!(f, "Knit {} rows. ", rows)?;
                }
                write!(f, "(RC={}, {} sts in work)", row_counter, stitches)
            }
            Instruction::Finishing { text } => f.write_str(text),
            Instruction::Divide { sections } => write!(f, "Divide into {} sections:", sections),
            Instruction::Section { index, stitches } => {
                write!(f, "Section {}: {}", index, stitch_count(*stitches))
            }
            Instruction::SectionBindOff { index, stitches } => {
                write!(f, "Section {}: bind off {}.", index, stitch_count(*stitches))
            }
            Instruction::BindOff { stitches } => write!(f, "Bind off {}.", stitch_count(*stitches)),
        }
    }
}
