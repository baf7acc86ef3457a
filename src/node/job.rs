use std::collections::BTreeMap;

use xxhash_rust::xxh3::Xxh3;

use crate::{
    foundation::{core::Resolution, error::ShaderFilterResult},
    params::value::ParamValue,
};

const XXH3_SEED: u64 = 0x8b5ad4a0c7d8e9f1;

/// Uniform carrying the output resolution, added to every job.
pub const RESOLUTION_UNIFORM: &str = "resolution_in";

/// Payload handed to the execution engine for one evaluation.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ShaderJob {
    /// Identifies the shader program; the node label.
    pub shader_id: String,
    /// Full shader text to compile.
    pub source: String,
    /// Uniform values at the evaluated frame, keyed by uniform name.
    pub values: BTreeMap<String, ParamValue>,
    /// Output resolution.
    pub resolution: Resolution,
    /// The output keeps an alpha channel.
    pub alpha_required: bool,
}

/// 128-bit content hash of a [`ShaderJob`], stable across runs and platforms.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct JobFingerprint {
    /// High 64 bits.
    pub hi: u64,
    /// Low 64 bits.
    pub lo: u64,
}

impl ShaderJob {
    /// Content hash for render caching. Equal jobs always hash equal.
    pub fn fingerprint(&self) -> JobFingerprint {
        let mut h = StableHasher::new();
        h.write_str(&self.shader_id);
        h.write_str(&self.source);
        h.write_u64(self.values.len() as u64);
        for (name, value) in &self.values {
            h.write_str(name);
            write_value(&mut h, value);
        }
        h.write_f64(self.resolution.width);
        h.write_f64(self.resolution.height);
        h.write_bool(self.alpha_required);
        h.finish()
    }

    /// Pretty-printed JSON.
    pub fn to_json(&self) -> ShaderFilterResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

struct StableHasher {
    inner: Xxh3,
}

impl StableHasher {
    fn new() -> Self {
        Self {
            inner: Xxh3::with_seed(XXH3_SEED),
        }
    }

    fn write_bytes(&mut self, b: &[u8]) {
        self.inner.update(b);
    }

    fn write_u8(&mut self, v: u8) {
        self.write_bytes(&[v]);
    }

    fn write_bool(&mut self, v: bool) {
        self.write_u8(u8::from(v));
    }

    fn write_u64(&mut self, v: u64) {
        self.write_bytes(&v.to_le_bytes());
    }

    fn write_f64(&mut self, v: f64) {
        self.write_u64(v.to_bits());
    }

    fn write_str(&mut self, s: &str) {
        self.write_u64(s.len() as u64);
        self.write_bytes(s.as_bytes());
    }

    fn write_f64s(&mut self, vs: &[f64]) {
        for v in vs {
            self.write_f64(*v);
        }
    }

    fn finish(self) -> JobFingerprint {
        let v = self.inner.digest128();
        JobFingerprint {
            hi: (v >> 64) as u64,
            lo: v as u64,
        }
    }
}

fn write_value(h: &mut StableHasher, v: &ParamValue) {
    match v {
        ParamValue::Texture(id) => {
            h.write_u8(0);
            match id {
                Some(id) => {
                    h.write_u8(1);
                    h.write_u64(id.0);
                }
                None => h.write_u8(0),
            }
        }
        ParamValue::Float(x) => {
            h.write_u8(1);
            h.write_f64(*x);
        }
        ParamValue::Integer(x) => {
            h.write_u8(2);
            h.write_u64(*x as u64);
        }
        ParamValue::Vec2(x) => {
            h.write_u8(3);
            h.write_f64s(x);
        }
        ParamValue::Vec3(x) => {
            h.write_u8(4);
            h.write_f64s(x);
        }
        ParamValue::Vec4(x) => {
            h.write_u8(5);
            h.write_f64s(x);
        }
        ParamValue::Color(c) => {
            h.write_u8(6);
            h.write_f64s(&c.to_array());
        }
        ParamValue::Boolean(b) => {
            h.write_u8(7);
            h.write_bool(*b);
        }
        ParamValue::Combo(i) => {
            h.write_u8(8);
            h.write_u64(*i as u64);
        }
        ParamValue::Text(s) => {
            h.write_u8(9);
            h.write_str(s);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/node/job.rs"]
mod tests;
