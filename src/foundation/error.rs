/// Convenience result type used across Damascus.
pub type DamascusResult<T> = Result<T, DamascusError>;

/// Top-level error taxonomy used at the crate boundary.
///
/// The pattern core (`synthesize`, `format_instructions`, `material_info`) is total and never
/// returns these; they come from parsing recipes, allocating surfaces and writing frames.
#[derive(thiserror::Error, Debug)]
pub enum DamascusError {
    /// Invalid user-provided recipe or parameter data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors while allocating surfaces or drawing preview frames.
    #[error("render error: {0}")]
    Render(String),

    /// Errors when serializing or deserializing recipes and share tokens.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DamascusError {
    /// Build a [`DamascusError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`DamascusError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`DamascusError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
