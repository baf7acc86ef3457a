//! Keeps on-canvas point handles in step with the node's `VEC2` parameters.
//!
//! Handles carry no identity across rebuilds: every reconciliation throws them away and
//! creates one per registered `VEC2` parameter. Positions are recomputed from parameter
//! values on every [`GizmoSynchronizer::update_positions`] call.

use crate::{
    foundation::{
        core::{FrameIndex, Point, Resolution},
        error::{ShaderFilterError, ShaderFilterResult},
    },
    gizmo::handle::GizmoHandle,
    params::{
        host::{ParameterHost, ValueEdit},
        value::ParamValue,
    },
};

/// Default half-extent of a handle's hit rectangle, in pixels.
pub const DEFAULT_HANDLE_SIZE_PX: f64 = 8.0;

#[derive(Clone, Debug)]
struct Drag {
    name: String,
    frame: FrameIndex,
    // Value before the first move. `None` until the transaction starts.
    before: Option<ParamValue>,
}

/// Handle mapping plus the in-flight drag, if any.
#[derive(Clone, Debug)]
pub struct GizmoSynchronizer {
    handles: Vec<GizmoHandle>,
    handle_size_px: f64,
    clamp: bool,
    frame: FrameIndex,
    resolution: Option<Resolution>,
    drag: Option<Drag>,
}

impl Default for GizmoSynchronizer {
    fn default() -> Self {
        Self::new(DEFAULT_HANDLE_SIZE_PX, true)
    }
}

impl GizmoSynchronizer {
    /// Synchronizer with the given hit half-extent. `clamp` keeps dragged values in `[0, 1]`.
    pub fn new(handle_size_px: f64, clamp: bool) -> Self {
        Self {
            handles: Vec::new(),
            handle_size_px,
            clamp,
            frame: FrameIndex::default(),
            resolution: None,
            drag: None,
        }
    }

    /// Current handles, in parameter order.
    pub fn handles(&self) -> &[GizmoHandle] {
        &self.handles
    }

    /// Parameter being dragged, if a press hit a handle.
    pub fn active(&self) -> Option<&str> {
        self.drag.as_ref().map(|d| d.name.as_str())
    }

    /// Half-extent of the hit rectangle in pixels.
    pub fn handle_size_px(&self) -> f64 {
        self.handle_size_px
    }

    /// Discard every handle and create one per registered `VEC2` parameter in `names`.
    ///
    /// An in-flight drag is cancelled without touching undo history.
    pub fn rebuild<H: ParameterHost + ?Sized>(&mut self, host: &H, names: &[String]) {
        if let Some(drag) = self.drag.take() {
            tracing::debug!(name = %drag.name, "drag cancelled by rebuild");
        }
        self.handles = names
            .iter()
            .filter(|name| host.parameter_type(name).is_some_and(|ty| ty.is_vec2()))
            .map(|name| GizmoHandle::new(name.as_str()))
            .collect();
        tracing::trace!(handles = self.handles.len(), "gizmos rebuilt");
    }

    /// Recompute handle positions from the values at `frame`.
    ///
    /// A degenerate resolution leaves every handle unpositioned.
    pub fn update_positions<H: ParameterHost + ?Sized>(
        &mut self,
        host: &H,
        frame: FrameIndex,
        resolution: Resolution,
    ) {
        self.frame = frame;
        self.resolution = Some(resolution);
        let usable = !resolution.is_degenerate();
        for handle in &mut self.handles {
            handle.point = if usable {
                host.value_at(&handle.name, frame)
                    .and_then(|v| v.as_vec2())
                    .map(|v| resolution.to_canvas(v))
            } else {
                None
            };
        }
    }

    /// Start dragging the handle under `pos`. Returns `false` and changes nothing on a miss.
    pub fn press(&mut self, pos: Point) -> bool {
        if !self.usable_resolution() {
            return false;
        }
        // Later handles draw over earlier ones, so search from the top.
        let Some(handle) = self
            .handles
            .iter()
            .rev()
            .find(|h| h.hit(pos, self.handle_size_px))
        else {
            return false;
        };
        tracing::trace!(name = %handle.name, x = pos.x, y = pos.y, "gizmo hit");
        self.drag = Some(Drag {
            name: handle.name.clone(),
            frame: self.frame,
            before: None,
        });
        true
    }

    /// Move the active handle to `pos`, writing the normalized value to the host.
    ///
    /// Returns `Ok(false)` when nothing is being dragged or the resolution is degenerate.
    pub fn drag_move<H: ParameterHost + ?Sized>(
        &mut self,
        host: &mut H,
        pos: Point,
    ) -> ShaderFilterResult<bool> {
        let Some(drag) = self.drag.as_mut() else {
            return Ok(false);
        };
        let Some(resolution) = self.resolution.filter(|r| !r.is_degenerate()) else {
            return Ok(false);
        };
        let Some([x, y]) = resolution.to_normalized(pos) else {
            return Ok(false);
        };
        if !(x.is_finite() && y.is_finite()) {
            return Ok(false);
        }
        let value = if self.clamp {
            [x.clamp(0.0, 1.0), y.clamp(0.0, 1.0)]
        } else {
            [x, y]
        };

        if drag.before.is_none() {
            let before = host.value_at(&drag.name, drag.frame).ok_or_else(|| {
                ShaderFilterError::gizmo(format!("'{}' is no longer registered", drag.name))
            })?;
            drag.before = Some(before);
        }
        host.set_value(&drag.name, drag.frame, ParamValue::Vec2(value))?;

        if let Some(handle) = self.handles.iter_mut().find(|h| h.name == drag.name) {
            handle.point = host
                .value_at(&drag.name, drag.frame)
                .and_then(|v| v.as_vec2())
                .map(|v| resolution.to_canvas(v));
        }
        Ok(true)
    }

    /// Finish the drag. A drag that moved commits one edit to the host's undo history.
    pub fn release<H: ParameterHost + ?Sized>(&mut self, host: &mut H) -> Option<ValueEdit> {
        let drag = self.drag.take()?;
        let before = drag.before?;
        let after = host.value_at(&drag.name, drag.frame)?;
        let edit = ValueEdit {
            name: drag.name,
            frame: drag.frame,
            before,
            after,
        };
        tracing::debug!(name = %edit.name, frame = edit.frame.0, "gizmo drag committed");
        host.push_undo(edit.clone());
        Some(edit)
    }

    fn usable_resolution(&self) -> bool {
        self.resolution.is_some_and(|r| !r.is_degenerate())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/gizmo/sync.rs"]
mod tests;
