use serde::{Deserialize, Serialize};
use strata_animation_core::KeyframeType;

/// One key in a frame table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawingFrame {
    /// Drawing shown from this key on; `None` is a null frame (nothing shown).
    pub drawing: Option<u32>,
    #[serde(default)]
    pub keyframe_type: KeyframeType,
}

impl DrawingFrame {
    pub fn new(drawing: u32) -> Self {
        Self {
            drawing: Some(drawing),
            keyframe_type: KeyframeType::Keyframe,
        }
    }

    /// A frame that ends the previous drawing.
    pub fn null() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        self.drawing.is_none()
    }
}
