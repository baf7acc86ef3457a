//! Shader filter node with directive-declared parameters.
//!
//! A shader filter's inputs are declared inline in its GLSL source through structured comment
//! lines (`//OVE name: ...`, `//OVE type: VEC2`, ...). Every time the source changes the node
//! brings its parameter set and on-canvas handles back in line with those declarations.
//!
//! # Pipeline overview
//!
//! 1. **Parse**: `source -> ParseOutput` (metadata, ordered declarations, line-numbered issues)
//! 2. **Reconcile**: `ParseOutput + previous names -> ReconcileOutcome`, applied to a
//!    [`ParameterHost`]
//! 3. **Sync gizmos**: one [`GizmoHandle`] per registered `VEC2` parameter
//! 4. **Evaluate** (optional): `frame + resolution -> ShaderJob` for an external GPU engine
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic**: parsing is a pure function of the source text and options.
//! - **Best effort**: directive problems never fail a parse; they are reported next to every
//!   declaration that survived them.
//! - **State preserving**: parameters that survive an edit keep their values, keyframes and
//!   connections.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod directive;
mod foundation;
mod gizmo;
mod node;
mod params;

pub use directive::model::{
    ParamType, ParseError, ParseOutput, ParsedDirective, ShaderMetadata,
};
pub use directive::parser::{DEFAULT_MARKER, ParserOpts, RESERVED_NAMES, parse_directives};
pub use directive::report::{NO_ISSUES, issues_report};
pub use foundation::core::{FrameIndex, Point, Rect, Resolution, Rgba, Size};
pub use foundation::error::{ShaderFilterError, ShaderFilterResult};
pub use gizmo::handle::GizmoHandle;
pub use gizmo::sync::{DEFAULT_HANDLE_SIZE_PX, GizmoSynchronizer};
pub use node::job::{JobFingerprint, RESOLUTION_UNIFORM, ShaderJob};
pub use node::opts::{DEFAULT_LABEL, ShaderNodeOpts};
pub use node::shader_node::{ShaderFilterNode, TEMPLATE_SHADER};
pub use params::host::{ParameterHost, ValueEdit};
pub use params::reconcile::{ReconcileOutcome, reconcile};
pub use params::store::{Connection, ParameterStore, RegisteredParam};
pub use params::track::{InterpMode, Keyframe, Lerp, ValueTrack};
pub use params::value::{DataType, NumericRange, ParamFlags, ParamValue, TextureId};
