//! Per-row stitch timeline for one shape segment, and its compaction into
//! instruction lines.

use crate::instruction::Instruction;
use serde::Serialize;

/// Stitch counts on one row, split at the panel's centerline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Row {
    pub row_number: u32,
    pub left_stitches: i64,
    pub right_stitches: i64,
    /// Signed shaping applied to the left edge on this row
    pub left_shaping: i64,
    /// Signed shaping applied to the right edge on this row
    pub right_shaping: i64,
}

impl Row {
    /// A row with the given counts and no recorded shaping
    pub fn new(row_number: u32, left_stitches: i64, right_stitches: i64) -> Self {
        Self {
            row_number,
            left_stitches,
            right_stitches,
            left_shaping: 0,
            right_shaping: 0,
        }
    }

    /// The row that follows `self` after applying edge shaping
    pub fn next(&self, left_shaping: i64, right_shaping: i64) -> Self {
        Self {
            row_number: self.row_number + 1,
            left_stitches: self.left_stitches + left_shaping,
            right_stitches: self.right_stitches + right_shaping,
            left_shaping,
            right_shaping,
        }
    }

    /// Total working stitches on the row
    pub fn total(&self) -> i64 {
        self.left_stitches + self.right_stitches
    }

    fn same_counts(&self, other: &Row) -> bool {
        self.left_stitches == other.left_stitches && self.right_stitches == other.right_stitches
    }
}

/// Ordered, contiguous rows of a single shape segment
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StitchPlan {
    rows: Vec<Row>,
}

impl StitchPlan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_row(&mut self, row: Row) {
        debug_assert!(
            self.rows
                .last()
                .is_none_or(|last| last.row_number + 1 == row.row_number),
            "rows must be contiguous"
        );
        self.rows.push(row);
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn first(&self) -> Option<&Row> {
        self.rows.first()
    }

    pub fn last(&self) -> Option<&Row> {
        self.rows.last()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Sum of recorded left-edge shaping across all rows
    pub fn total_left_shaping(&self) -> i64 {
        self.rows.iter().map(|r| r.left_shaping).sum()
    }

    /// Sum of recorded right-edge shaping across all rows
    pub fn total_right_shaping(&self) -> i64 {
        self.rows.iter().map(|r| r.right_shaping).sum()
    }

    /// Compact the rows into the fewest lines that reproduce them.
    ///
    /// A plan whose first and last rows match becomes a single `KnitRows`
    /// line. Otherwise each row whose counts differ from its predecessor
    /// closes a `Shaping` line covering every row since the previous line.
    pub fn compile(&self) -> Vec<Instruction> {
        let (Some(first), Some(last)) = (self.rows.first(), self.rows.last()) else {
            return Vec::new();
        };

        if first.same_counts(last) {
            return vec![Instruction::KnitRows {
                rows: self.rows.len() as u32,
                row_counter: last.row_number,
                stitches: last.total(),
            }];
        }

        let mut instructions = Vec::new();
        let mut run: u32 = 1;
        for pair in self.rows.windows(2) {
            let (prev, row) = (&pair[0], &pair[1]);
            run += 1;
            if row.same_counts(prev) {
                continue;
            }
            instructions.push(Instruction::Shaping {
                left: row.left_stitches - prev.left_stitches,
                right: row.right_stitches - prev.right_stitches,
                rows: run,
                row_counter: row.row_number,
                stitches: row.total(),
            });
            run = 0;
        }

        if run > 0 {
            instructions.push(Instruction::KnitRows {
                rows: run,
                row_counter: last.row_number,
                stitches: last.total(),
            });
        }

        instructions
    }

    /// Text form of [`StitchPlan::compile`]
    pub fn generate_knitting_instructions(&self) -> Vec<String> {
        self.compile().iter().map(ToString::to_string).collect()
    }
}
