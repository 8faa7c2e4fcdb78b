//! Curve capability and keyframe settings.
//!
//! The engine stores one curve per animated property and only ever asks it two
//! things: insert a `(time, value)` key, and evaluate at a time. [`FCurve`] is the
//! built-in implementation; hosts with their own curve math implement [`Curve`].

pub mod fcurve;
pub mod functions;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use fcurve::{FCurve, Keyframe};

/// How a segment is interpolated, taken from the segment's left key.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Interpolation {
    /// Hold the left key's value until the next key.
    Constant,
    Linear,
    #[default]
    Bezier,
}

/// Handle rule for bezier segments.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HandleType {
    /// Smooth tangents, flattened on local extremes so the curve never overshoots.
    #[default]
    AutoClamped,
    /// Smooth tangents through the neighbouring keys.
    Auto,
    /// Tangents point at the adjacent key, producing straight segments.
    Vector,
}

/// Semantic tag of a key. Does not affect evaluation.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyframeType {
    #[default]
    Keyframe,
    Breakdown,
    MovingHold,
    Extreme,
    Jitter,
}

/// Settings applied to a key on insertion.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyframeSettings {
    pub keyframe_type: KeyframeType,
    pub interpolation: Interpolation,
    pub handle: HandleType,
}

impl KeyframeSettings {
    /// Built-in settings with a different interpolation mode.
    pub fn with_interpolation(interpolation: Interpolation) -> Self {
        Self {
            interpolation,
            ..Self::default()
        }
    }
}

/// Sparse keyframe curve as consumed by strips and the evaluator.
pub trait Curve: Default + fmt::Debug {
    /// Whether the curve currently accepts new keys.
    fn is_keyframable(&self) -> bool {
        true
    }

    /// Insert a key, replacing one already at (about) the same time.
    /// Returns the key's index, or `None` when the key was rejected.
    fn insert_keyframe(&mut self, time_value: (f32, f32), settings: &KeyframeSettings)
        -> Option<usize>;

    /// Value of the curve at `time`. Must not mutate the curve.
    fn evaluate(&self, time: f32) -> f32;

    fn key_count(&self) -> usize;
}
