use std::fmt;

use crate::foundation::core::Rgba;

/// Payload-free parameter type tag, as registered with the host.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DataType {
    /// Sampled image input.
    Texture,
    /// Scalar float.
    Float,
    /// Scalar integer.
    Integer,
    /// Two-component vector. Gets a point gizmo.
    Vec2,
    /// Three-component vector.
    Vec3,
    /// Four-component vector.
    Vec4,
    /// RGBA color.
    Color,
    /// Checkbox.
    Boolean,
    /// Choice among an ordered list of strings.
    Combo,
    /// Free text.
    Text,
}

impl DataType {
    /// All types in declaration order.
    pub const ALL: [DataType; 10] = [
        DataType::Texture,
        DataType::Float,
        DataType::Integer,
        DataType::Vec2,
        DataType::Vec3,
        DataType::Vec4,
        DataType::Color,
        DataType::Boolean,
        DataType::Combo,
        DataType::Text,
    ];

    /// Directive token for this type (`FLOAT`, `VEC2`, ...).
    pub fn token(self) -> &'static str {
        match self {
            Self::Texture => "TEXTURE",
            Self::Float => "FLOAT",
            Self::Integer => "INTEGER",
            Self::Vec2 => "VEC2",
            Self::Vec3 => "VEC3",
            Self::Vec4 => "VEC4",
            Self::Color => "COLOR",
            Self::Boolean => "BOOLEAN",
            Self::Combo => "COMBO",
            Self::Text => "TEXT",
        }
    }

    /// Parse a directive type token, ignoring ASCII case.
    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|ty| ty.token().eq_ignore_ascii_case(token))
    }

    /// Types that accept `min`/`max`.
    pub fn is_numeric(self) -> bool {
        matches!(
            self,
            Self::Float | Self::Integer | Self::Vec2 | Self::Vec3 | Self::Vec4
        )
    }

    /// 2-component vectors get an on-canvas handle.
    pub fn is_vec2(self) -> bool {
        self == Self::Vec2
    }

    /// Number of scalar components for numeric and color types.
    pub fn components(self) -> Option<usize> {
        match self {
            Self::Float | Self::Integer => Some(1),
            Self::Vec2 => Some(2),
            Self::Vec3 => Some(3),
            Self::Vec4 | Self::Color => Some(4),
            _ => None,
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Opaque handle to a texture produced elsewhere in the graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct TextureId(pub u64);

/// A concrete parameter value.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum ParamValue {
    /// Texture input; `None` until something is connected.
    Texture(Option<TextureId>),
    /// Scalar float.
    Float(f64),
    /// Scalar integer.
    Integer(i64),
    /// Two-component vector.
    Vec2([f64; 2]),
    /// Three-component vector.
    Vec3([f64; 3]),
    /// Four-component vector.
    Vec4([f64; 4]),
    /// RGBA color.
    Color(Rgba),
    /// Boolean.
    Boolean(bool),
    /// Index into the combo option list.
    Combo(usize),
    /// Free text.
    Text(String),
}

impl ParamValue {
    /// Type tag of this value.
    pub fn data_type(&self) -> DataType {
        match self {
            Self::Texture(_) => DataType::Texture,
            Self::Float(_) => DataType::Float,
            Self::Integer(_) => DataType::Integer,
            Self::Vec2(_) => DataType::Vec2,
            Self::Vec3(_) => DataType::Vec3,
            Self::Vec4(_) => DataType::Vec4,
            Self::Color(_) => DataType::Color,
            Self::Boolean(_) => DataType::Boolean,
            Self::Combo(_) => DataType::Combo,
            Self::Text(_) => DataType::Text,
        }
    }

    /// Zero value for a type: 0, zero vector, opaque white, false, first option, empty text.
    pub fn zero(ty: DataType) -> Self {
        match ty {
            DataType::Texture => Self::Texture(None),
            DataType::Float => Self::Float(0.0),
            DataType::Integer => Self::Integer(0),
            DataType::Vec2 => Self::Vec2([0.0; 2]),
            DataType::Vec3 => Self::Vec3([0.0; 3]),
            DataType::Vec4 => Self::Vec4([0.0; 4]),
            DataType::Color => Self::Color(Rgba::WHITE),
            DataType::Boolean => Self::Boolean(false),
            DataType::Combo => Self::Combo(0),
            DataType::Text => Self::Text(String::new()),
        }
    }

    /// The `[x, y]` pair of a `Vec2` value.
    pub fn as_vec2(&self) -> Option<[f64; 2]> {
        match self {
            Self::Vec2(v) => Some(*v),
            _ => None,
        }
    }
}

/// Behavioural flags attached to a declared parameter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ParamFlags {
    /// The value cannot be animated.
    pub not_keyframable: bool,
    /// The value cannot be driven by an upstream connection.
    pub not_connectable: bool,
    /// The parameter is not shown in the parameter panel.
    pub hidden: bool,
}

impl ParamFlags {
    /// Set the flag named by `token` (ASCII case ignored). Returns `false` if unknown.
    pub fn set_token(&mut self, token: &str) -> bool {
        let slot = match token.to_ascii_uppercase().as_str() {
            "NOT_KEYFRAMABLE" => &mut self.not_keyframable,
            "NOT_CONNECTABLE" => &mut self.not_connectable,
            "HIDDEN" => &mut self.hidden,
            _ => return false,
        };
        *slot = true;
        true
    }
}

/// Optional inclusive bounds for numeric and vector parameters, applied per component.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct NumericRange {
    /// Lower bound.
    pub min: Option<f64>,
    /// Upper bound.
    pub max: Option<f64>,
}

impl NumericRange {
    /// Return `true` when neither bound is set.
    pub fn is_unbounded(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }

    /// Clamp `v` into the declared bounds.
    pub fn clamp(&self, v: f64) -> f64 {
        let v = self.min.map_or(v, |min| v.max(min));
        self.max.map_or(v, |max| v.min(max))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/params/value.rs"]
mod tests;
