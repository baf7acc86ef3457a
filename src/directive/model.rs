use std::fmt;

use crate::{
    foundation::core::Rgba,
    params::value::{DataType, NumericRange, ParamFlags, ParamValue},
};

/// Declared type of a parameter, carrying only the fields valid for that type.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ParamType {
    /// Sampled image input.
    Texture,
    /// Scalar float.
    Float {
        /// Initial value.
        default: f64,
        /// Allowed range.
        range: NumericRange,
    },
    /// Scalar integer.
    Integer {
        /// Initial value.
        default: i64,
        /// Allowed range.
        range: NumericRange,
    },
    /// Two-component vector.
    Vec2 {
        /// Initial value.
        default: [f64; 2],
        /// Per-component range.
        range: NumericRange,
    },
    /// Three-component vector.
    Vec3 {
        /// Initial value.
        default: [f64; 3],
        /// Per-component range.
        range: NumericRange,
    },
    /// Four-component vector.
    Vec4 {
        /// Initial value.
        default: [f64; 4],
        /// Per-component range.
        range: NumericRange,
    },
    /// RGBA color.
    Color {
        /// Initial value.
        default: Rgba,
    },
    /// Boolean.
    Boolean {
        /// Initial value.
        default: bool,
    },
    /// Choice among ordered options.
    Combo {
        /// Options in declaration order. Never empty.
        options: Vec<String>,
        /// Index of the initial option.
        default: usize,
    },
    /// Free text.
    Text {
        /// Initial value.
        default: String,
    },
}

impl ParamType {
    /// Payload-free tag registered with the host.
    pub fn data_type(&self) -> DataType {
        match self {
            Self::Texture => DataType::Texture,
            Self::Float { .. } => DataType::Float,
            Self::Integer { .. } => DataType::Integer,
            Self::Vec2 { .. } => DataType::Vec2,
            Self::Vec3 { .. } => DataType::Vec3,
            Self::Vec4 { .. } => DataType::Vec4,
            Self::Color { .. } => DataType::Color,
            Self::Boolean { .. } => DataType::Boolean,
            Self::Combo { .. } => DataType::Combo,
            Self::Text { .. } => DataType::Text,
        }
    }

    /// Initial value handed to the host on registration.
    pub fn default_value(&self) -> ParamValue {
        match self {
            Self::Texture => ParamValue::Texture(None),
            Self::Float { default, .. } => ParamValue::Float(*default),
            Self::Integer { default, .. } => ParamValue::Integer(*default),
            Self::Vec2 { default, .. } => ParamValue::Vec2(*default),
            Self::Vec3 { default, .. } => ParamValue::Vec3(*default),
            Self::Vec4 { default, .. } => ParamValue::Vec4(*default),
            Self::Color { default } => ParamValue::Color(*default),
            Self::Boolean { default } => ParamValue::Boolean(*default),
            Self::Combo { default, .. } => ParamValue::Combo(*default),
            Self::Text { default } => ParamValue::Text(default.clone()),
        }
    }

    /// Declared range of numeric and vector types; `None` when unbounded or not numeric.
    pub fn range(&self) -> Option<NumericRange> {
        let range = match self {
            Self::Float { range, .. }
            | Self::Integer { range, .. }
            | Self::Vec2 { range, .. }
            | Self::Vec3 { range, .. }
            | Self::Vec4 { range, .. } => *range,
            _ => return None,
        };
        (!range.is_unbounded()).then_some(range)
    }

    /// Combo options.
    pub fn options(&self) -> Option<&[String]> {
        match self {
            Self::Combo { options, .. } => Some(options),
            _ => None,
        }
    }
}

/// One parameter declared by the shader source.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ParsedDirective {
    /// Shader variable name; unique within one parse.
    pub uniform_name: String,
    /// Display label.
    pub human_name: String,
    /// Free-form description, possibly empty.
    pub description: String,
    /// Declared flags.
    pub flags: ParamFlags,
    /// Declared type with its type-specific fields.
    pub param_type: ParamType,
    /// 1-based line of the `name` directive that opened the declaration.
    pub line: usize,
}

/// Shader-level metadata.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ShaderMetadata {
    /// Shader title. Becomes the node label.
    pub name: Option<String>,
    /// Free-form description.
    pub description: Option<String>,
    /// Version string.
    pub version: Option<String>,
}

impl ShaderMetadata {
    /// Shader name, or `fallback` when none was declared.
    pub fn label_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.name.as_deref().unwrap_or(fallback)
    }
}

/// A recoverable problem found while parsing directives.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ParseError {
    /// 1-based source line.
    pub line: usize,
    /// Human-readable message.
    pub issue: String,
}

impl ParseError {
    pub(crate) fn new(line: usize, issue: impl Into<String>) -> Self {
        Self {
            line,
            issue: issue.into(),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.issue)
    }
}

/// Everything one parse pass produces.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ParseOutput {
    /// Shader-level metadata.
    pub metadata: ShaderMetadata,
    /// Declared parameters in source order.
    pub directives: Vec<ParsedDirective>,
    /// Problems in source order.
    pub errors: Vec<ParseError>,
}
