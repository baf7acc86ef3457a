use std::collections::BTreeMap;

use crate::{
    foundation::{
        core::FrameIndex,
        error::{ShaderFilterError, ShaderFilterResult},
    },
    params::{
        host::{ParameterHost, ValueEdit},
        track::{InterpMode, ValueTrack},
        value::{DataType, NumericRange, ParamFlags, ParamValue},
    },
};

/// Upstream output driving a parameter.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Connection {
    /// Identifier of the upstream output.
    pub source: String,
    /// Latest value delivered by the upstream output.
    pub value: ParamValue,
}

/// Live state of one registered parameter.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RegisteredParam {
    /// Registered type. Values written to the parameter must match it.
    pub data_type: DataType,
    /// Label shown in the parameter panel.
    pub display_name: String,
    /// Flags given at registration.
    pub flags: ParamFlags,
    /// Static value, used when there are no keys and no connection.
    pub value: ParamValue,
    /// Allowed range for numeric and vector types.
    pub range: NumericRange,
    /// Combo options, empty for other types.
    pub options: Vec<String>,
    /// Keyframes. Non-empty means the parameter is animated.
    pub track: ValueTrack,
    /// Upstream connection, if any.
    pub connection: Option<Connection>,
}

impl RegisteredParam {
    fn new(name: &str, data_type: DataType, value: ParamValue, flags: ParamFlags) -> Self {
        Self {
            data_type,
            display_name: name.to_owned(),
            flags,
            value,
            range: NumericRange::default(),
            options: Vec::new(),
            track: ValueTrack::new(InterpMode::Linear),
            connection: None,
        }
    }

    /// Return `true` when writes go to the keyframe track.
    pub fn is_animated(&self) -> bool {
        !self.flags.not_keyframable && !self.track.is_empty()
    }

    fn check_type(&self, name: &str, value: &ParamValue) -> ShaderFilterResult<()> {
        if value.data_type() != self.data_type {
            return Err(ShaderFilterError::parameter(format!(
                "'{name}' is {} but got a {} value",
                self.data_type,
                value.data_type()
            )));
        }
        Ok(())
    }

    fn constrain(&self, value: ParamValue) -> ParamValue {
        match value {
            ParamValue::Combo(i) => ParamValue::Combo(i.min(self.options.len().saturating_sub(1))),
            other => clamp_to_range(other, &self.range),
        }
    }
}

/// In-memory [`ParameterHost`]: the registered parameter set of one node.
///
/// Parameters are kept in name order. Besides the host contract it supports connections,
/// keyframes and a linear undo history so that state preservation across re-parses can be
/// observed directly.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct ParameterStore {
    params: BTreeMap<String, RegisteredParam>,
    undo: Vec<ValueEdit>,
    #[serde(skip)]
    list_changed: u64,
}

impl ParameterStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registered parameter by name.
    pub fn get(&self, name: &str) -> Option<&RegisteredParam> {
        self.params.get(name)
    }

    /// Registered parameters in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RegisteredParam)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of registered parameters.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Return `true` when nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// How many times the parameter list was announced as changed.
    pub fn list_changed_count(&self) -> u64 {
        self.list_changed
    }

    /// Committed edits, oldest first.
    pub fn undo_history(&self) -> &[ValueEdit] {
        &self.undo
    }

    /// Drive `name` from an upstream output.
    pub fn connect(
        &mut self,
        name: &str,
        source: impl Into<String>,
        value: ParamValue,
    ) -> ShaderFilterResult<()> {
        let param = self.get_mut(name)?;
        if param.flags.not_connectable {
            return Err(ShaderFilterError::parameter(format!(
                "'{name}' does not accept connections"
            )));
        }
        param.check_type(name, &value)?;
        param.connection = Some(Connection {
            source: source.into(),
            value,
        });
        Ok(())
    }

    /// Drop the upstream connection of `name`, returning it.
    pub fn disconnect(&mut self, name: &str) -> Option<Connection> {
        self.params.get_mut(name)?.connection.take()
    }

    /// Add a keyframe to `name`, turning it into an animated parameter.
    pub fn set_keyframe(
        &mut self,
        name: &str,
        frame: FrameIndex,
        value: ParamValue,
    ) -> ShaderFilterResult<()> {
        let param = self.get_mut(name)?;
        if param.flags.not_keyframable {
            return Err(ShaderFilterError::parameter(format!(
                "'{name}' cannot be keyframed"
            )));
        }
        param.check_type(name, &value)?;
        let value = param.constrain(value);
        param.track.insert(frame, value);
        Ok(())
    }

    /// Revert the most recent committed edit, returning it.
    pub fn undo(&mut self) -> ShaderFilterResult<Option<ValueEdit>> {
        let Some(edit) = self.undo.pop() else {
            return Ok(None);
        };
        self.write(&edit.name, edit.frame, edit.before.clone())?;
        Ok(Some(edit))
    }

    fn get_mut(&mut self, name: &str) -> ShaderFilterResult<&mut RegisteredParam> {
        self.params
            .get_mut(name)
            .ok_or_else(|| ShaderFilterError::parameter(format!("unknown parameter '{name}'")))
    }

    fn write(&mut self, name: &str, frame: FrameIndex, value: ParamValue) -> ShaderFilterResult<()> {
        let param = self.get_mut(name)?;
        param.check_type(name, &value)?;
        let value = param.constrain(value);
        if param.is_animated() {
            param.track.insert(frame, value);
        } else {
            param.value = value;
        }
        Ok(())
    }
}

impl ParameterHost for ParameterStore {
    fn add_parameter(&mut self, name: &str, ty: DataType, default: ParamValue, flags: ParamFlags) {
        tracing::trace!(name, %ty, "add parameter");
        self.params
            .insert(name.to_owned(), RegisteredParam::new(name, ty, default, flags));
    }

    fn remove_parameter(&mut self, name: &str) {
        tracing::trace!(name, "remove parameter");
        if self.params.remove(name).is_some() {
            self.undo.retain(|edit| edit.name != name);
        }
    }

    fn set_parameter_display_name(&mut self, name: &str, display_name: &str) {
        if let Some(param) = self.params.get_mut(name) {
            display_name.clone_into(&mut param.display_name);
        }
    }

    fn set_parameter_range(&mut self, name: &str, range: NumericRange) {
        if let Some(param) = self.params.get_mut(name) {
            param.range = range;
            param.value = clamp_to_range(param.value.clone(), &range);
        }
    }

    fn set_combo_options(&mut self, name: &str, options: &[String]) {
        if let Some(param) = self.params.get_mut(name) {
            param.options = options.to_vec();
            param.value = param.constrain(param.value.clone());
        }
    }

    fn has_parameter(&self, name: &str) -> bool {
        self.params.contains_key(name)
    }

    fn parameter_type(&self, name: &str) -> Option<DataType> {
        self.params.get(name).map(|p| p.data_type)
    }

    fn notify_parameter_list_changed(&mut self) {
        self.list_changed += 1;
    }

    fn value_at(&self, name: &str, frame: FrameIndex) -> Option<ParamValue> {
        let param = self.params.get(name)?;
        if let Some(conn) = &param.connection {
            return Some(conn.value.clone());
        }
        if param.is_animated() {
            return param.track.sample(frame);
        }
        Some(param.value.clone())
    }

    fn set_value(
        &mut self,
        name: &str,
        frame: FrameIndex,
        value: ParamValue,
    ) -> ShaderFilterResult<()> {
        self.write(name, frame, value)
    }

    fn push_undo(&mut self, edit: ValueEdit) {
        self.undo.push(edit);
    }
}

fn clamp_to_range(value: ParamValue, range: &NumericRange) -> ParamValue {
    if range.is_unbounded() {
        return value;
    }
    match value {
        ParamValue::Float(v) => ParamValue::Float(range.clamp(v)),
        ParamValue::Integer(v) => ParamValue::Integer(range.clamp(v as f64).round() as i64),
        ParamValue::Vec2(v) => ParamValue::Vec2(v.map(|c| range.clamp(c))),
        ParamValue::Vec3(v) => ParamValue::Vec3(v.map(|c| range.clamp(c))),
        ParamValue::Vec4(v) => ParamValue::Vec4(v.map(|c| range.clamp(c))),
        other => other,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/params/store.rs"]
mod tests;
