use crate::{
    directive::parser::ParserOpts,
    foundation::error::{ShaderFilterError, ShaderFilterResult},
    gizmo::sync::DEFAULT_HANDLE_SIZE_PX,
};

/// Label used when the shader declares no `shader_name`.
pub const DEFAULT_LABEL: &str = "unnamed";

/// Node configuration. Every field has a default, so partial JSON is accepted.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ShaderNodeOpts {
    /// Directive parser settings.
    pub parser: ParserOpts,
    /// Half-extent of a gizmo's hit rectangle in pixels.
    pub handle_size_px: f64,
    /// Keep dragged gizmo values inside `[0, 1]`.
    pub clamp_drag: bool,
    /// Node label when the shader has no name.
    pub default_label: String,
}

impl Default for ShaderNodeOpts {
    fn default() -> Self {
        Self {
            parser: ParserOpts::default(),
            handle_size_px: DEFAULT_HANDLE_SIZE_PX,
            clamp_drag: true,
            default_label: DEFAULT_LABEL.to_owned(),
        }
    }
}

impl ShaderNodeOpts {
    /// Reject options the node cannot work with.
    pub fn validate(&self) -> ShaderFilterResult<()> {
        if self.parser.marker.trim().is_empty() {
            return Err(ShaderFilterError::validation(
                "directive marker must not be empty",
            ));
        }
        if self.parser.marker.chars().any(char::is_whitespace) {
            return Err(ShaderFilterError::validation(format!(
                "directive marker '{}' must not contain whitespace",
                self.parser.marker
            )));
        }
        if !self.handle_size_px.is_finite() || self.handle_size_px <= 0.0 {
            return Err(ShaderFilterError::validation(format!(
                "handle_size_px must be finite and > 0, got {}",
                self.handle_size_px
            )));
        }
        if self.default_label.trim().is_empty() {
            return Err(ShaderFilterError::validation(
                "default_label must not be empty",
            ));
        }
        Ok(())
    }

    /// Parse options from JSON and validate them.
    pub fn from_json_str(json: &str) -> ShaderFilterResult<Self> {
        let opts: Self = serde_json::from_str(json)?;
        opts.validate()?;
        Ok(opts)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/node/opts.rs"]
mod tests;
