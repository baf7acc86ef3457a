pub use kurbo::{Point, Rect, Size};

/// Absolute 0-based frame index in timeline space.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

/// Output frame dimensions in pixels.
///
/// Kept as floating point because it is the scale between normalized parameter space and
/// canvas space, which is where gizmo math happens.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Resolution {
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl Resolution {
    /// Create a resolution from pixel dimensions.
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Return `true` when either axis is zero, negative or not finite.
    ///
    /// Degenerate resolutions cannot be divided by, so gizmo interaction is disabled.
    pub fn is_degenerate(self) -> bool {
        !(self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0)
    }

    /// Map a normalized `[0,1]x[0,1]` coordinate into canvas pixels.
    pub fn to_canvas(self, normalized: [f64; 2]) -> Point {
        Point::new(normalized[0] * self.width, normalized[1] * self.height)
    }

    /// Map a canvas point into normalized coordinates.
    ///
    /// Returns `None` for degenerate resolutions.
    pub fn to_normalized(self, p: Point) -> Option<[f64; 2]> {
        if self.is_degenerate() {
            return None;
        }
        Some([p.x / self.width, p.y / self.height])
    }
}

/// Straight-alpha RGBA color with floating point channels in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Rgba {
    /// Red channel.
    pub r: f64,
    /// Green channel.
    pub g: f64,
    /// Blue channel.
    pub b: f64,
    /// Alpha channel.
    pub a: f64,
}

impl Rgba {
    /// Opaque white.
    pub const WHITE: Self = Self {
        r: 1.0,
        g: 1.0,
        b: 1.0,
        a: 1.0,
    };

    /// Build a color from 3 (opaque) or 4 components.
    pub fn from_components(c: &[f64]) -> Option<Self> {
        match *c {
            [r, g, b] => Some(Self { r, g, b, a: 1.0 }),
            [r, g, b, a] => Some(Self { r, g, b, a }),
            _ => None,
        }
    }

    /// Copy with every channel clamped into `[0, 1]`. NaN channels become 0.
    pub fn clamped(self) -> Self {
        let c = |v: f64| if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) };
        Self {
            r: c(self.r),
            g: c(self.g),
            b: c(self.b),
            a: c(self.a),
        }
    }

    /// Channels as `[r, g, b, a]`.
    pub fn to_array(self) -> [f64; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
