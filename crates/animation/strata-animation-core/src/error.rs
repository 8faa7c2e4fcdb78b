//! Error types for structural edits and keyframe insertion.
//!
//! Ownership violations (removing a layer or strip through the wrong container) are
//! not errors: those calls report `false`. Lookups that find nothing evaluate to an
//! empty result. What remains here are caller contract violations.

/// Errors raised by strip edits and keyframe insertion.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum AnimError {
    /// Strip range with start after end, NaN bounds, or an infinity on the wrong side.
    #[error("Invalid strip range [{start}, {end}]")]
    InvalidRange { start: f32, end: f32 },

    /// Strip offset that is not a finite number.
    #[error("Invalid strip offset: {offset}")]
    InvalidOffset { offset: f32 },

    /// The curve refuses new keys (e.g. it is locked).
    #[error("Curve {rna_path}[{array_index}] doesn't allow inserting keys")]
    CurveNotKeyframable { rna_path: String, array_index: i32 },

    /// The curve rejected the key itself.
    #[error("Could not insert key at frame {time} into curve {rna_path}[{array_index}]")]
    KeyframeInsertFailed {
        rna_path: String,
        array_index: i32,
        time: f32,
    },
}

impl AnimError {
    /// Get error category for logging
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::InvalidRange { .. } | Self::InvalidOffset { .. } => "range",
            Self::CurveNotKeyframable { .. } | Self::KeyframeInsertFailed { .. } => "keyframe",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_categories() {
        let range = AnimError::InvalidRange {
            start: 10.0,
            end: 1.0,
        };
        assert_eq!(range.category(), "range");
        assert_eq!(range.to_string(), "Invalid strip range [10, 1]");

        let key = AnimError::CurveNotKeyframable {
            rna_path: "location".into(),
            array_index: 2,
        };
        assert_eq!(key.category(), "keyframe");
        assert_eq!(
            key.to_string(),
            "Curve location[2] doesn't allow inserting keys"
        );
    }
}
