/// Convenience result type used across the crate.
pub type ShaderFilterResult<T> = Result<T, ShaderFilterError>;

/// Top-level error taxonomy used by node, host and gizmo APIs.
///
/// Directive syntax problems are not errors in this sense: the parser reports them as
/// [`ParseError`](crate::ParseError) records next to a best-effort parameter list.
#[derive(thiserror::Error, Debug)]
pub enum ShaderFilterError {
    /// Invalid user-provided options or data.
    #[error("validation error: {0}")]
    Validation(String),

    /// A parameter was missing from the host or held a value of the wrong type.
    #[error("parameter error: {0}")]
    Parameter(String),

    /// A drag interaction could not be applied.
    #[error("gizmo error: {0}")]
    Gizmo(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ShaderFilterError {
    /// Build a [`ShaderFilterError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ShaderFilterError::Parameter`] value.
    pub fn parameter(msg: impl Into<String>) -> Self {
        Self::Parameter(msg.into())
    }

    /// Build a [`ShaderFilterError::Gizmo`] value.
    pub fn gizmo(msg: impl Into<String>) -> Self {
        Self::Gizmo(msg.into())
    }

    /// Build a [`ShaderFilterError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for ShaderFilterError {
    fn from(err: serde_json::Error) -> Self {
        Self::serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
