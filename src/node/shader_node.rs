use std::collections::BTreeMap;

use crate::{
    directive::{
        model::{ParseError, ParseOutput, ParsedDirective, ShaderMetadata},
        parser::parse_directives,
        report::issues_report,
    },
    foundation::{
        core::{FrameIndex, Point, Resolution},
        error::ShaderFilterResult,
    },
    gizmo::{handle::GizmoHandle, sync::GizmoSynchronizer},
    node::{
        job::{RESOLUTION_UNIFORM, ShaderJob},
        opts::ShaderNodeOpts,
    },
    params::{
        host::{ParameterHost, ValueEdit},
        reconcile::{ReconcileOutcome, reconcile},
        store::ParameterStore,
        value::ParamValue,
    },
};

/// Source installed in a freshly created node: one texture input passed straight through.
pub const TEMPLATE_SHADER: &str = "\
//OVE shader_name:
//OVE shader_description:

//OVE name: input
//OVE type: TEXTURE
//OVE flag: NOT_KEYFRAMABLE
//OVE description:
uniform sampler2D texture_in;

//OVE end


// pixel coordinates in range [0..1]x[0..1]
in vec2 ove_texcoord;
// output color
out vec4 frag_color;

void main(void) {
   vec4 textureColor = texture2D(texture_in, ove_texcoord);
   frag_color = textureColor;
}
";

/// A filter node whose inputs are declared by directives inside its own shader source.
///
/// Every source change re-parses the directives, reconciles the host's parameter set against
/// them and rebuilds the gizmo mapping, all before [`ShaderFilterNode::set_source`] returns.
#[derive(Debug)]
pub struct ShaderFilterNode<H: ParameterHost = ParameterStore> {
    opts: ShaderNodeOpts,
    host: H,
    source: String,
    parsed: ParseOutput,
    names: Vec<String>,
    outcome: ReconcileOutcome,
    gizmos: GizmoSynchronizer,
    label: String,
    report: String,
    code_invalidated: bool,
}

impl ShaderFilterNode<ParameterStore> {
    /// Node backed by an in-memory [`ParameterStore`].
    pub fn with_store(opts: ShaderNodeOpts) -> ShaderFilterResult<Self> {
        Self::new(ParameterStore::new(), opts)
    }
}

impl<H: ParameterHost> ShaderFilterNode<H> {
    /// Create a node around `host` and install [`TEMPLATE_SHADER`].
    pub fn new(host: H, opts: ShaderNodeOpts) -> ShaderFilterResult<Self> {
        opts.validate()?;
        let gizmos = GizmoSynchronizer::new(opts.handle_size_px, opts.clamp_drag);
        let label = opts.default_label.clone();
        let mut node = Self {
            opts,
            host,
            source: String::new(),
            parsed: ParseOutput::default(),
            names: Vec::new(),
            outcome: ReconcileOutcome::default(),
            gizmos,
            label,
            report: String::new(),
            code_invalidated: false,
        };
        node.set_source(TEMPLATE_SHADER);
        Ok(node)
    }

    /// Replace the shader source. Returns `false`, doing nothing, when the text is unchanged.
    pub fn set_source(&mut self, text: impl Into<String>) -> bool {
        let text = text.into();
        if text == self.source {
            tracing::trace!("source unchanged, skipping re-parse");
            return false;
        }
        self.source = text;
        self.reparse();
        true
    }

    #[tracing::instrument(skip_all, fields(bytes = self.source.len()))]
    fn reparse(&mut self) {
        self.parsed = parse_directives(&self.source, &self.opts.parser);
        self.label = self
            .parsed
            .metadata
            .label_or(&self.opts.default_label)
            .to_owned();
        self.report = issues_report(&self.label, &self.parsed.errors);
        if !self.parsed.errors.is_empty() {
            tracing::warn!(
                label = %self.label,
                issues = self.parsed.errors.len(),
                "shader directives have issues"
            );
        }

        self.outcome = reconcile(&mut self.host, &self.names, &self.parsed.directives);
        self.names.clone_from(&self.outcome.names);
        self.gizmos.rebuild(&self.host, &self.names);
        self.code_invalidated = true;

        tracing::debug!(
            label = %self.label,
            params = self.names.len(),
            gizmos = self.gizmos.handles().len(),
            "re-parsed shader source"
        );
    }

    /// Current shader text.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Node label: the declared shader name or the configured default.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Shader-level metadata from the last parse.
    pub fn metadata(&self) -> &ShaderMetadata {
        &self.parsed.metadata
    }

    /// Declarations from the last parse.
    pub fn directives(&self) -> &[ParsedDirective] {
        &self.parsed.directives
    }

    /// Problems from the last parse.
    pub fn errors(&self) -> &[ParseError] {
        &self.parsed.errors
    }

    /// Issues text shown on the node's `issues` output.
    pub fn issues_report(&self) -> &str {
        &self.report
    }

    /// Registered parameter names, in declaration order.
    pub fn parameter_names(&self) -> &[String] {
        &self.names
    }

    /// What the last re-parse changed in the host.
    pub fn last_reconcile(&self) -> &ReconcileOutcome {
        &self.outcome
    }

    /// Options the node was built with.
    pub fn opts(&self) -> &ShaderNodeOpts {
        &self.opts
    }

    /// Host holding parameter state.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable host access, for connections, keyframes and direct value edits.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Current gizmo handles.
    pub fn gizmos(&self) -> &[GizmoHandle] {
        self.gizmos.handles()
    }

    /// Parameter being dragged, if any.
    pub fn active_gizmo(&self) -> Option<&str> {
        self.gizmos.active()
    }

    /// Return `true` once after each source change, so the engine knows to recompile.
    pub fn take_code_invalidated(&mut self) -> bool {
        std::mem::take(&mut self.code_invalidated)
    }

    /// Evaluation payload for `frame`. `None` when there is no shader text to run.
    pub fn job(&self, frame: FrameIndex, resolution: Resolution) -> Option<ShaderJob> {
        if self.source.trim().is_empty() {
            return None;
        }
        let mut values: BTreeMap<String, ParamValue> = self
            .names
            .iter()
            .filter_map(|name| Some((name.clone(), self.host.value_at(name, frame)?)))
            .collect();
        values.insert(
            RESOLUTION_UNIFORM.to_owned(),
            ParamValue::Vec2([resolution.width, resolution.height]),
        );
        Some(ShaderJob {
            shader_id: self.label.clone(),
            source: self.source.clone(),
            values,
            resolution,
            alpha_required: true,
        })
    }

    /// Reposition gizmos from the values at `frame`.
    pub fn update_gizmo_positions(&mut self, frame: FrameIndex, resolution: Resolution) {
        self.gizmos.update_positions(&self.host, frame, resolution);
    }

    /// Start a gizmo drag at `pos`. Returns `false` when no handle is hit.
    pub fn gizmo_press(&mut self, pos: Point) -> bool {
        self.gizmos.press(pos)
    }

    /// Continue the active gizmo drag.
    pub fn gizmo_move(&mut self, pos: Point) -> ShaderFilterResult<bool> {
        self.gizmos.drag_move(&mut self.host, pos)
    }

    /// Finish the active gizmo drag, committing it to undo history if it moved.
    pub fn gizmo_release(&mut self) -> Option<ValueEdit> {
        self.gizmos.release(&mut self.host)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/node/shader_node.rs"]
mod tests;
