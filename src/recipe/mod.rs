//! Persisted recipe: the material stack plus the operation sequence.

pub(crate) mod share;

use std::path::Path;

use anyhow::Context as _;

use crate::catalog::material::Material;
use crate::foundation::error::{DamascusError, DamascusResult};
use crate::pattern::ops::Operation;

/// Everything needed to reproduce a pattern.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Recipe {
    /// Material stack, bottom to top.
    #[serde(default)]
    pub layers: Vec<Material>,
    /// Operations in application order.
    #[serde(default)]
    pub ops: Vec<Operation>,
}

impl Recipe {
    /// Build a recipe from its parts.
    pub fn new(layers: Vec<Material>, ops: Vec<Operation>) -> Self {
        Self { layers, ops }
    }

    /// Check every operation's parameters. Any stack is valid.
    pub fn validate(&self) -> DamascusResult<()> {
        for (i, op) in self.ops.iter().enumerate() {
            op.validate().map_err(|e| match e {
                DamascusError::Validation(msg) => {
                    DamascusError::validation(format!("ops[{i}]: {msg}"))
                }
                other => other,
            })?;
        }
        Ok(())
    }

    /// Parse and validate a JSON recipe.
    pub fn from_json_str(s: &str) -> DamascusResult<Self> {
        let recipe: Recipe =
            serde_json::from_str(s).map_err(|e| DamascusError::serde(e.to_string()))?;
        recipe.validate()?;
        Ok(recipe)
    }

    /// Compact JSON encoding.
    pub fn to_json_string(&self) -> DamascusResult<String> {
        serde_json::to_string(self).map_err(|e| DamascusError::serde(e.to_string()))
    }

    /// Indented JSON encoding, for files meant to be read by people.
    pub fn to_json_pretty(&self) -> DamascusResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| DamascusError::serde(e.to_string()))
    }

    /// Load and validate a JSON recipe file.
    pub fn from_path(path: &Path) -> DamascusResult<Self> {
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read recipe '{}'", path.display()))?;
        Self::from_json_str(&s)
    }

    /// Write the recipe as pretty JSON, creating parent directories.
    pub fn save(&self, path: &Path) -> DamascusResult<()> {
        crate::encode::ensure_parent_dir(path)?;
        let json = self.to_json_pretty()?;
        std::fs::write(path, json).with_context(|| format!("write recipe '{}'", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/recipe/recipe.rs"]
mod tests;
