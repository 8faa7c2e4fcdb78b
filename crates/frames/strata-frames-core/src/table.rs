//! Frame table: ordered frame → drawing map with hold semantics.
//!
//! Model:
//! - Keys are start frames. The drawing of a key is visible from its frame up to
//!   (excluding) the next key, or forever if it is the last key.
//! - Null frames show nothing; they mark where a drawing ends.
//! - Lookups are predecessor queries on the ordered map (O(log n)).

use std::collections::BTreeMap;
use std::ops::Bound::{Excluded, Unbounded};

use serde::{Deserialize, Serialize};

use crate::error::FrameError;
use crate::frame::DrawingFrame;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FrameTable {
    frames: BTreeMap<i32, DrawingFrame>,
}

impl FrameTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from `(key, frame)` pairs, later duplicates replacing earlier ones.
    pub fn from_frames(frames: impl IntoIterator<Item = (i32, DrawingFrame)>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn frame(&self, key: i32) -> Option<&DrawingFrame> {
        self.frames.get(&key)
    }

    pub fn sorted_keys(&self) -> Vec<i32> {
        self.frames.keys().copied().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (i32, &DrawingFrame)> {
        self.frames.iter().map(|(k, f)| (*k, f))
    }

    /// Key of the drawing visible at `frame_number`, `None` before the first key or
    /// inside a null frame.
    pub fn frame_key_at(&self, frame_number: i32) -> Option<i32> {
        let (key, frame) = self.frames.range(..=frame_number).next_back()?;
        (!frame.is_null()).then_some(*key)
    }

    /// Drawing visible at `frame_number`.
    pub fn drawing_index_at(&self, frame_number: i32) -> Option<u32> {
        self.frames
            .range(..=frame_number)
            .next_back()
            .and_then(|(_, frame)| frame.drawing)
    }

    /// Number of frames the drawing starting at `key` is shown for. `None` for null
    /// frames, missing keys, and a last key (which holds forever).
    pub fn duration_at(&self, key: i32) -> Option<i32> {
        if self.frames.get(&key)?.is_null() {
            return None;
        }
        let (next, _) = self.frames.range((Excluded(key), Unbounded)).next()?;
        Some(next - key)
    }

    /// Insert `frame` at `key`. A null frame at `key` is replaced; a drawing is not.
    pub fn insert_frame(&mut self, key: i32, frame: DrawingFrame) -> Result<(), FrameError> {
        match self.frames.get(&key) {
            Some(existing) if !existing.is_null() => {
                log::debug!("frame {key} already holds drawing {:?}", existing.drawing);
                Err(FrameError::Occupied { frame: key })
            }
            _ => {
                self.frames.insert(key, frame);
                Ok(())
            }
        }
    }

    /// Insert `frame` at `key`, shown for `duration` frames. Null frames inside the new
    /// range are dropped and a null frame is added at its end, unless another key
    /// already starts at or before that end (which then cuts the new drawing short).
    /// A duration of 0 holds until the next key, like [`insert_frame`](Self::insert_frame).
    pub fn insert_frame_with_duration(
        &mut self,
        key: i32,
        duration: i32,
        frame: DrawingFrame,
    ) -> Result<(), FrameError> {
        let end = match duration {
            d if d < 0 => None,
            0 => Some(key),
            d => key.checked_add(d),
        }
        .ok_or(FrameError::InvalidDuration { duration })?;

        self.insert_frame(key, frame)?;
        if end == key {
            return Ok(());
        }

        let inner_nulls: Vec<i32> = self
            .frames
            .range((Excluded(key), Excluded(end)))
            .filter(|(_, f)| f.is_null())
            .map(|(k, _)| *k)
            .collect();
        for k in inner_nulls {
            self.frames.remove(&k);
        }

        let next = self
            .frames
            .range((Excluded(key), Unbounded))
            .next()
            .map(|(k, _)| *k);
        match next {
            Some(next) if next <= end => {}
            _ => {
                self.frames.insert(end, DrawingFrame::null());
            }
        }
        Ok(())
    }

    /// Set `key` to `frame` regardless of what is there.
    pub fn overwrite_frame(&mut self, key: i32, frame: DrawingFrame) {
        self.frames.insert(key, frame);
    }

    pub fn remove_frame(&mut self, key: i32) -> bool {
        self.frames.remove(&key).is_some()
    }

    /// Drop every key showing `drawing` and shift higher drawing indices down by one,
    /// matching removal of that drawing from the owning drawing list.
    pub fn remove_drawing(&mut self, drawing: u32) {
        self.frames.retain(|_, f| f.drawing != Some(drawing));
        for frame in self.frames.values_mut() {
            if let Some(index) = frame.drawing.as_mut() {
                if *index > drawing {
                    *index -= 1;
                }
            }
        }
    }
}
