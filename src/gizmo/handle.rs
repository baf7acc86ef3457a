use crate::foundation::core::{Point, Rect, Size};

/// Draggable on-canvas point bound to one `VEC2` parameter.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GizmoHandle {
    /// Uniform name of the bound parameter.
    pub name: String,
    /// Canvas position in pixels. `None` until positioned against a usable resolution.
    pub point: Option<Point>,
}

impl GizmoHandle {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            point: None,
        }
    }

    /// Square hit rectangle centred on the handle, `half_extent` pixels from centre to edge.
    pub fn rect(&self, half_extent: f64) -> Option<Rect> {
        let side = 2.0 * half_extent.max(0.0);
        self.point
            .map(|p| Rect::from_center_size(p, Size::new(side, side)))
    }

    /// Return `true` when `pos` falls inside the hit rectangle.
    pub fn hit(&self, pos: Point, half_extent: f64) -> bool {
        self.rect(half_extent).is_some_and(|r| {
            pos.x >= r.x0 && pos.x <= r.x1 && pos.y >= r.y0 && pos.y <= r.y1
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/gizmo/handle.rs"]
mod tests;
