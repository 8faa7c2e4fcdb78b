//! Built-in sparse keyframe curve.
//!
//! Keys are kept sorted by time. Evaluation holds the first/last value outside the
//! keyed range and interpolates each segment according to its left key.

use serde::{Deserialize, Serialize};

use super::functions::{auto_tangent, bezier_segment, lerp_f32};
use super::{Curve, HandleType, Interpolation, KeyframeSettings, KeyframeType};

/// Keys closer than this many frames are treated as the same key on insertion.
const KEY_MERGE_THRESHOLD: f32 = 0.01;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    pub time: f32,
    pub value: f32,
    pub interpolation: Interpolation,
    pub handle: HandleType,
    pub keyframe_type: KeyframeType,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FCurve {
    keys: Vec<Keyframe>,
    #[serde(default)]
    locked: bool,
}

impl FCurve {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn keys(&self) -> &[Keyframe] {
        &self.keys
    }

    /// Locked curves refuse new keys but still evaluate.
    pub fn set_locked(&mut self, locked: bool) {
        self.locked = locked;
    }

    #[inline]
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// `Ok(index)` of a key within the merge threshold of `time`, otherwise
    /// `Err(index)` where a new key would be inserted.
    fn find_key(&self, time: f32) -> Result<usize, usize> {
        let pos = self.keys.partition_point(|k| k.time < time);
        if let Some(k) = self.keys.get(pos) {
            if (k.time - time).abs() < KEY_MERGE_THRESHOLD {
                return Ok(pos);
            }
        }
        if pos > 0 && (self.keys[pos - 1].time - time).abs() < KEY_MERGE_THRESHOLD {
            return Ok(pos - 1);
        }
        Err(pos)
    }

    fn point(&self, index: usize) -> Option<(f32, f32)> {
        self.keys.get(index).map(|k| (k.time, k.value))
    }

    /// Handle slope at key `index`; `toward` is the other key of the segment being
    /// evaluated, used by vector handles.
    fn tangent(&self, index: usize, toward: usize) -> f32 {
        let key = &self.keys[index];
        match key.handle {
            HandleType::Vector => {
                let other = &self.keys[toward];
                let dt = other.time - key.time;
                if dt == 0.0 {
                    0.0
                } else {
                    (other.value - key.value) / dt
                }
            }
            HandleType::Auto | HandleType::AutoClamped => {
                let prev = index.checked_sub(1).and_then(|i| self.point(i));
                auto_tangent(
                    prev,
                    (key.time, key.value),
                    self.point(index + 1),
                    key.handle == HandleType::AutoClamped,
                )
            }
        }
    }
}

impl Curve for FCurve {
    fn is_keyframable(&self) -> bool {
        !self.locked
    }

    fn insert_keyframe(
        &mut self,
        (time, value): (f32, f32),
        settings: &KeyframeSettings,
    ) -> Option<usize> {
        if !time.is_finite() || !value.is_finite() {
            return None;
        }
        let key = Keyframe {
            time,
            value,
            interpolation: settings.interpolation,
            handle: settings.handle,
            keyframe_type: settings.keyframe_type,
        };
        match self.find_key(time) {
            Ok(index) => {
                // Replace value and settings, keep the existing key's time.
                let existing = &mut self.keys[index];
                existing.value = key.value;
                existing.interpolation = key.interpolation;
                existing.handle = key.handle;
                existing.keyframe_type = key.keyframe_type;
                Some(index)
            }
            Err(index) => {
                self.keys.insert(index, key);
                Some(index)
            }
        }
    }

    fn evaluate(&self, time: f32) -> f32 {
        let (Some(first), Some(last)) = (self.keys.first(), self.keys.last()) else {
            return 0.0;
        };
        // Written so that NaN falls through to the first key.
        if !(time > first.time) {
            return first.value;
        }
        if time >= last.time {
            return last.value;
        }

        // first.time < time < last.time, so 1 <= right < len.
        let right = self.keys.partition_point(|k| k.time <= time);
        let left = right - 1;
        let (a, b) = (&self.keys[left], &self.keys[right]);
        let width = b.time - a.time;
        let frac = ((time - a.time) / width).clamp(0.0, 1.0);

        match a.interpolation {
            Interpolation::Constant => a.value,
            Interpolation::Linear => lerp_f32(a.value, b.value, frac),
            Interpolation::Bezier => bezier_segment(
                a.value,
                b.value,
                self.tangent(left, right),
                self.tangent(right, left),
                width,
                frac,
            ),
        }
    }

    #[inline]
    fn key_count(&self) -> usize {
        self.keys.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn linear() -> KeyframeSettings {
        KeyframeSettings::with_interpolation(Interpolation::Linear)
    }

    #[test]
    fn empty_curve_evaluates_to_zero() {
        assert_eq!(FCurve::new().evaluate(12.0), 0.0);
    }

    #[test]
    fn keys_stay_sorted_and_merge_on_same_frame() {
        let mut fc = FCurve::new();
        assert_eq!(fc.insert_keyframe((5.0, 47.1), &linear()), Some(0));
        assert_eq!(fc.insert_keyframe((1.0, 47.0), &linear()), Some(0));
        assert_eq!(fc.insert_keyframe((3.0, 1.0), &linear()), Some(1));
        assert_eq!(fc.key_count(), 3);
        let times: Vec<f32> = fc.keys().iter().map(|k| k.time).collect();
        assert_eq!(times, vec![1.0, 3.0, 5.0]);

        assert_eq!(fc.insert_keyframe((3.001, 2.0), &linear()), Some(1));
        assert_eq!(fc.key_count(), 3);
        assert_eq!(fc.keys()[1].value, 2.0);
        assert_eq!(fc.keys()[1].time, 3.0);
    }

    #[test]
    fn rejects_non_finite_keys() {
        let mut fc = FCurve::new();
        assert_eq!(fc.insert_keyframe((f32::NAN, 1.0), &linear()), None);
        assert_eq!(fc.insert_keyframe((1.0, f32::INFINITY), &linear()), None);
        assert_eq!(fc.key_count(), 0);
    }

    #[test]
    fn holds_values_outside_keyed_range() {
        let mut fc = FCurve::new();
        fc.insert_keyframe((1.0, 47.0), &linear());
        fc.insert_keyframe((5.0, 327.0), &linear());
        assert_eq!(fc.evaluate(-100.0), 47.0);
        assert_eq!(fc.evaluate(1.0), 47.0);
        assert_eq!(fc.evaluate(5.0), 327.0);
        assert_eq!(fc.evaluate(500.0), 327.0);
    }

    #[test]
    fn linear_and_constant_segments() {
        let mut fc = FCurve::new();
        fc.insert_keyframe((1.0, 47.0), &linear());
        fc.insert_keyframe((5.0, 327.0), &linear());
        fc.insert_keyframe(
            (10.0, 48.0),
            &KeyframeSettings::with_interpolation(Interpolation::Constant),
        );
        assert_eq!(fc.evaluate(3.0), 187.0);
        assert_abs_diff_eq!(fc.evaluate(7.5), 187.5, epsilon = 1e-4);

        let mut step = FCurve::new();
        let constant = KeyframeSettings::with_interpolation(Interpolation::Constant);
        step.insert_keyframe((0.0, 1.0), &constant);
        step.insert_keyframe((10.0, 2.0), &constant);
        assert_eq!(step.evaluate(9.99), 1.0);
        assert_eq!(step.evaluate(10.0), 2.0);
    }

    #[test]
    fn bezier_eases_between_two_keys() {
        let mut fc = FCurve::new();
        let settings = KeyframeSettings::default();
        fc.insert_keyframe((0.0, 0.0), &settings);
        fc.insert_keyframe((10.0, 1.0), &settings);
        // Flat end tangents: symmetric ease in/out.
        assert_abs_diff_eq!(fc.evaluate(5.0), 0.5, epsilon = 1e-6);
        assert!(fc.evaluate(1.0) < 0.1);
        assert!(fc.evaluate(9.0) > 0.9);
    }

    #[test]
    fn clamped_bezier_does_not_overshoot_extremes() {
        let mut fc = FCurve::new();
        let settings = KeyframeSettings::default();
        fc.insert_keyframe((0.0, 0.0), &settings);
        fc.insert_keyframe((5.0, 10.0), &settings);
        fc.insert_keyframe((10.0, 0.0), &settings);
        for i in 0..=100 {
            let v = fc.evaluate(i as f32 * 0.1);
            assert!(v <= 10.0 + 1e-4, "overshoot {v} at {}", i as f32 * 0.1);
        }
    }

    #[test]
    fn vector_handles_make_straight_segments() {
        let mut fc = FCurve::new();
        let settings = KeyframeSettings {
            handle: HandleType::Vector,
            ..KeyframeSettings::default()
        };
        fc.insert_keyframe((0.0, 0.0), &settings);
        fc.insert_keyframe((4.0, 8.0), &settings);
        assert_abs_diff_eq!(fc.evaluate(1.0), 2.0, epsilon = 1e-4);
        assert_abs_diff_eq!(fc.evaluate(3.0), 6.0, epsilon = 1e-4);
    }

    #[test]
    fn locked_curve_is_not_keyframable() {
        let mut fc = FCurve::new();
        assert!(fc.is_keyframable());
        fc.set_locked(true);
        assert!(!fc.is_keyframable());
    }
}
