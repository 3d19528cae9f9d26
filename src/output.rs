//! Rendering of generated instructions for the terminal or for other tools.

use knitkit_shaping::{Instruction, Pattern, StitchPlan};

/// One instruction per line, optionally prefixed with its 1-based position
pub fn render_lines(instructions: &[Instruction], numbered: bool) -> String {
    let mut out = String::new();
    for (i, line) in instructions.iter().enumerate() {
        if numbered {
            out.push_str(&format!("{}. {}\n", i + 1, line));
        } else {
            out.push_str(&format!("{}\n", line));
        }
    }
    out
}

/// A whole garment; numbering restarts for each panel
pub fn render_pattern(pattern: &Pattern, numbered: bool) -> String {
    if !numbered {
        return pattern.to_string();
    }
    let mut out = format!("{}\n", pattern.title);
    for panel in &pattern.panels {
        out.push_str(&format!("\n{}:\n", panel.name));
        out.push_str(&render_lines(&panel.instructions, true));
    }
    if !pattern.finishing_steps.is_empty() {
        out.push_str("\nFinishing:\n");
        for (i, step) in pattern.finishing_steps.iter().enumerate() {
            out.push_str(&format!("{}. {}\n", i + 1, step));
        }
    }
    out
}

/// Per-row table of every segment
pub fn render_rows(plans: &[StitchPlan]) -> String {
    let mut out = String::new();
    for (i, plan) in plans.iter().enumerate() {
        let (Some(first), Some(last)) = (plan.first(), plan.last()) else {
            continue;
        };
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str(&format!(
            "Segment {} (rows {}-{})\n",
            i + 1,
            first.row_number,
            last.row_number
        ));
        out.push_str(&format!(
            "{:>5} {:>6} {:>6} {:>6} {:>6} {:>6}\n",
            "row", "left", "right", "total", "dl", "dr"
        ));
        for row in plan.rows() {
            out.push_str(&format!(
                "{:>5} {:>6} {:>6} {:>6} {:>+6} {:>+6}\n",
                row.row_number,
                row.left_stitches,
                row.right_stitches,
                row.total(),
                row.left_shaping,
                row.right_shaping
            ));
        }
    }
    out
}
