//! Human-readable forging steps.

use crate::pattern::ops::Operation;

/// One instruction line per operation, in input order.
pub fn format_instructions(ops: &[Operation]) -> Vec<String> {
    ops.iter().map(format_step).collect()
}

/// Plain-text export: numbered instructions, one per line, `\n`-separated.
pub fn export_text(ops: &[Operation]) -> String {
    format_instructions(ops)
        .iter()
        .enumerate()
        .map(|(i, line)| format!("{}. {line}", i + 1))
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_step(op: &Operation) -> String {
    match *op {
        Operation::AddSheets { material, count } => format!(
            "Add {count} {} of {}.",
            plural(u64::from(count), "sheet", "sheets"),
            material.name()
        ),
        Operation::Twist { turns } => {
            let degrees = (turns * 360.0).round();
            format!(
                "Twist the bar {} {} ({}°).",
                format_number(turns),
                if (turns - 1.0).abs() < 1e-9 {
                    "turn"
                } else {
                    "turns"
                },
                format_number(degrees)
            )
        }
        Operation::Ladder { spacing, depth } => format!(
            "Grind ladder grooves every {} along the bar, {} deep, then forge flat.",
            format_number(spacing),
            format_number(depth)
        ),
        Operation::Raindrops { radius, spacing } => format!(
            "Drill raindrop dimples of radius {} on a {} grid, then forge flat.",
            format_number(radius),
            format_number(spacing)
        ),
        Operation::WFolds { folds } => {
            format!("Accordion-fold the bar into {folds} W-folds and forge flat.")
        }
        Operation::Fold { times } => {
            let mult = match 1u64.checked_shl(times) {
                Some(m) => m.to_string(),
                None => format!("2^{times}"),
            };
            format!(
                "Fold ×{times}: cut, restack and weld, multiplying the layer count {mult}× (2^{times})."
            )
        }
        Operation::Stretch { factor } => {
            format!("Stretch the bar ×{} along its length.", format_number(factor))
        }
    }
}

fn plural<'a>(n: u64, one: &'a str, many: &'a str) -> &'a str {
    if n == 1 { one } else { many }
}

/// Integers print bare; everything else with at most two decimals, trailing zeros trimmed.
pub(crate) fn format_number(v: f64) -> String {
    if !v.is_finite() {
        return v.to_string();
    }
    let rounded = v.round();
    if (v - rounded).abs() < 1e-9 {
        // Avoid "-0".
        return format!("{}", rounded as i64);
    }
    let s = format!("{v:.2}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".to_string() } else { s.to_string() }
}

#[cfg(test)]
#[path = "../../tests/unit/instructions/format.rs"]
mod tests;
