use crate::{
    foundation::core::{FrameIndex, Rgba},
    params::value::ParamValue,
};

/// Interpolation contract for keyframed values.
pub trait Lerp: Sized {
    /// Interpolate from `a` to `b` with normalized factor `t` in `[0, 1]`.
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

impl<const N: usize> Lerp for [f64; N] {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        std::array::from_fn(|i| f64::lerp(&a[i], &b[i], t))
    }
}

impl Lerp for Rgba {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        let [r, g, b_, alpha] = <[f64; 4]>::lerp(&a.to_array(), &b.to_array(), t);
        Self {
            r,
            g,
            b: b_,
            a: alpha,
        }
    }
}

impl Lerp for ParamValue {
    /// Continuous values interpolate; discrete ones (and mismatched pairs) hold `a`.
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        match (a, b) {
            (Self::Float(x), Self::Float(y)) => Self::Float(f64::lerp(x, y, t)),
            (Self::Integer(x), Self::Integer(y)) => {
                Self::Integer(f64::lerp(&(*x as f64), &(*y as f64), t).round() as i64)
            }
            (Self::Vec2(x), Self::Vec2(y)) => Self::Vec2(Lerp::lerp(x, y, t)),
            (Self::Vec3(x), Self::Vec3(y)) => Self::Vec3(Lerp::lerp(x, y, t)),
            (Self::Vec4(x), Self::Vec4(y)) => Self::Vec4(Lerp::lerp(x, y, t)),
            (Self::Color(x), Self::Color(y)) => Self::Color(Rgba::lerp(x, y, t)),
            _ => a.clone(),
        }
    }
}

/// Interpolation strategy between keyframes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum InterpMode {
    /// Hold the previous key value until the next keyframe.
    Hold,
    /// Interpolate linearly between keyframes.
    #[default]
    Linear,
}

/// One keyframe of a parameter track.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Keyframe {
    /// Timeline frame of this key.
    pub frame: FrameIndex,
    /// Value at `frame`.
    pub value: ParamValue,
}

/// Keyframed value track of a single parameter.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ValueTrack {
    keys: Vec<Keyframe>, // sorted by frame, unique frames
    /// Interpolation mode between adjacent keys.
    pub mode: InterpMode,
}

impl ValueTrack {
    /// Empty track with the given interpolation mode.
    pub fn new(mode: InterpMode) -> Self {
        Self {
            keys: Vec::new(),
            mode,
        }
    }

    /// Keys sorted by frame.
    pub fn keys(&self) -> &[Keyframe] {
        &self.keys
    }

    /// Return `true` when the track holds no keys.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Insert a key, replacing any key already at `frame`.
    pub fn insert(&mut self, frame: FrameIndex, value: ParamValue) {
        match self.keys.binary_search_by_key(&frame, |k| k.frame) {
            Ok(i) => self.keys[i].value = value,
            Err(i) => self.keys.insert(i, Keyframe { frame, value }),
        }
    }

    /// Remove the key at `frame`, returning its value.
    pub fn remove(&mut self, frame: FrameIndex) -> Option<ParamValue> {
        let i = self.keys.binary_search_by_key(&frame, |k| k.frame).ok()?;
        Some(self.keys.remove(i).value)
    }

    /// Sample the track. Returns `None` for an empty track.
    pub fn sample(&self, frame: FrameIndex) -> Option<ParamValue> {
        let first = self.keys.first()?;
        let idx = self.keys.partition_point(|k| k.frame <= frame);

        if idx == 0 {
            return Some(first.value.clone());
        }
        if idx >= self.keys.len() {
            return Some(self.keys[self.keys.len() - 1].value.clone());
        }

        let a = &self.keys[idx - 1];
        let b = &self.keys[idx];
        match self.mode {
            InterpMode::Hold => Some(a.value.clone()),
            InterpMode::Linear => {
                // keys are unique per frame, so the span is never zero
                let span = (b.frame.0 - a.frame.0) as f64;
                let t = (frame.0 - a.frame.0) as f64 / span;
                Some(ParamValue::lerp(&a.value, &b.value, t))
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/params/track.rs"]
mod tests;
