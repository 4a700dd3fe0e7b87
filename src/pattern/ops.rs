use crate::catalog::material::Material;
use crate::foundation::error::{DamascusError, DamascusResult};

/// One shaping step applied to the billet.
///
/// Order matters: each operation warps the coordinates produced by the previous one.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Operation {
    /// Sheets added to the stack. Recorded for the instruction list only; the stack itself
    /// already contains them.
    AddSheets {
        /// Sheet material.
        material: Material,
        /// Number of sheets.
        count: u32,
    },
    /// Twist the bar by `turns` full revolutions.
    Twist {
        /// Revolutions, `>= 0`.
        turns: f64,
    },
    /// Grind ladder grooves across the bar and forge flat.
    Ladder {
        /// Groove period in `u` units, `> 0`.
        spacing: f64,
        /// Groove depth, `>= 0`.
        depth: f64,
    },
    /// Punch a grid of dimples and forge flat.
    Raindrops {
        /// Dimple radius, `> 0`.
        radius: f64,
        /// Grid pitch, `> 0`.
        spacing: f64,
    },
    /// Accordion (W) fold.
    WFolds {
        /// Number of folds, `>= 2`.
        folds: u32,
    },
    /// Cut and restack `times` times; each time doubles the layer count.
    Fold {
        /// Number of doublings.
        times: u32,
    },
    /// Draw the bar out along its length.
    Stretch {
        /// Length multiplier, `> 0`.
        factor: f64,
    },
}

impl Operation {
    /// Stable lowercase name of the variant (matches the serde tag).
    pub fn kind_name(&self) -> &'static str {
        match self {
            Operation::AddSheets { .. } => "addSheets",
            Operation::Twist { .. } => "twist",
            Operation::Ladder { .. } => "ladder",
            Operation::Raindrops { .. } => "raindrops",
            Operation::WFolds { .. } => "wFolds",
            Operation::Fold { .. } => "fold",
            Operation::Stretch { .. } => "stretch",
        }
    }

    /// Boundary check for externally supplied operations.
    ///
    /// The synthesizer itself never fails; this is for recipe loading and CLI input.
    pub fn validate(&self) -> DamascusResult<()> {
        fn finite(kind: &str, field: &str, v: f64) -> DamascusResult<f64> {
            if v.is_finite() {
                Ok(v)
            } else {
                Err(DamascusError::validation(format!(
                    "{kind}.{field} must be finite"
                )))
            }
        }

        let kind = self.kind_name();
        match *self {
            Operation::AddSheets { .. } => {}
            Operation::Twist { turns } => {
                if finite(kind, "turns", turns)? < 0.0 {
                    return Err(DamascusError::validation("twist.turns must be >= 0"));
                }
            }
            Operation::Ladder { spacing, depth } => {
                if finite(kind, "spacing", spacing)? <= 0.0 {
                    return Err(DamascusError::validation("ladder.spacing must be > 0"));
                }
                if finite(kind, "depth", depth)? < 0.0 {
                    return Err(DamascusError::validation("ladder.depth must be >= 0"));
                }
            }
            Operation::Raindrops { radius, spacing } => {
                if finite(kind, "radius", radius)? <= 0.0 {
                    return Err(DamascusError::validation("raindrops.radius must be > 0"));
                }
                if finite(kind, "spacing", spacing)? <= 0.0 {
                    return Err(DamascusError::validation("raindrops.spacing must be > 0"));
                }
            }
            Operation::WFolds { folds } => {
                if folds < 2 {
                    return Err(DamascusError::validation("wFolds.folds must be >= 2"));
                }
            }
            Operation::Fold { .. } => {}
            Operation::Stretch { factor } => {
                if finite(kind, "factor", factor)? <= 0.0 {
                    return Err(DamascusError::validation("stretch.factor must be > 0"));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pattern/ops.rs"]
mod tests;
