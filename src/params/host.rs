use crate::{
    foundation::{core::FrameIndex, error::ShaderFilterResult},
    params::value::{DataType, NumericRange, ParamFlags, ParamValue},
};

/// One committed value change, as recorded in undo history.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ValueEdit {
    /// Parameter that changed.
    pub name: String,
    /// Frame the edit was made at.
    pub frame: FrameIndex,
    /// Value before the edit.
    pub before: ParamValue,
    /// Value after the edit.
    pub after: ParamValue,
}

/// The node-graph runtime that owns parameter storage.
///
/// The reconciler and gizmo synchronizer only talk to the runtime through this trait, so
/// value storage, connections, keyframes and undo stay with the implementor.
/// [`ParameterStore`](crate::ParameterStore) is the in-memory implementation.
pub trait ParameterHost {
    /// Register a new parameter. Any state previously held under `name` is discarded.
    fn add_parameter(&mut self, name: &str, ty: DataType, default: ParamValue, flags: ParamFlags);

    /// Deregister a parameter and release its dependent state.
    fn remove_parameter(&mut self, name: &str);

    /// Update the label shown in the parameter panel.
    fn set_parameter_display_name(&mut self, name: &str, display_name: &str);

    /// Update the allowed value range.
    fn set_parameter_range(&mut self, name: &str, range: NumericRange);

    /// Replace the option list of a combo parameter.
    fn set_combo_options(&mut self, name: &str, options: &[String]);

    /// Return `true` when `name` is registered.
    fn has_parameter(&self, name: &str) -> bool;

    /// Registered type of `name`.
    fn parameter_type(&self, name: &str) -> Option<DataType>;

    /// Tell observers that the parameter list was rebuilt.
    fn notify_parameter_list_changed(&mut self);

    /// Effective value of `name` at `frame`, after keyframes and connections.
    fn value_at(&self, name: &str, frame: FrameIndex) -> Option<ParamValue>;

    /// Write a value at `frame`.
    fn set_value(&mut self, name: &str, frame: FrameIndex, value: ParamValue)
    -> ShaderFilterResult<()>;

    /// Append a committed edit to undo history.
    fn push_undo(&mut self, edit: ValueEdit);
}
