//! Strips: time-bounded containers of animation data within a layer.
//!
//! A strip covers `[frame_start, frame_end]` (either side may be infinite) and reads
//! its data at `global_time - frame_offset`. Only keyframe strips exist today; the
//! kind-specific payload lives in [`StripData`].

use serde::{Deserialize, Serialize};

use crate::channels::ChannelGroup;
use crate::curve::{Curve, FCurve, KeyframeSettings};
use crate::error::AnimError;
use crate::ids::{OutputIndex, StripId};
use crate::property::PropertyIdentifier;

/// Relative tolerance for last-frame checks, scaled by the end frame's magnitude.
/// Absorbs float drift at large frame numbers (at frame 172800 this is ~0.08 frames).
const LAST_FRAME_REL_EPSILON: f32 = 4.0 * f32::EPSILON;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StripKind {
    Keyframe,
}

/// Kind-specific strip payload.
#[derive(Debug, Clone)]
pub enum StripData<C = FCurve> {
    Keyframe(KeyframeStrip<C>),
}

impl<C: Curve> StripData<C> {
    fn new(kind: StripKind) -> Self {
        match kind {
            StripKind::Keyframe => StripData::Keyframe(KeyframeStrip::default()),
        }
    }

    pub fn kind(&self) -> StripKind {
        match self {
            StripData::Keyframe(_) => StripKind::Keyframe,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Strip<C = FCurve> {
    id: StripId,
    frame_start: f32,
    frame_end: f32,
    frame_offset: f32,
    data: StripData<C>,
}

impl<C: Curve> Strip<C> {
    /// A detached, infinite strip. Strips that belong to a layer are created through
    /// [`Layer::strip_add`](crate::Layer::strip_add).
    pub fn new(kind: StripKind) -> Self {
        Self::with_id(StripId::DETACHED, kind)
    }

    pub(crate) fn with_id(id: StripId, kind: StripKind) -> Self {
        Self {
            id,
            frame_start: f32::NEG_INFINITY,
            frame_end: f32::INFINITY,
            frame_offset: 0.0,
            data: StripData::new(kind),
        }
    }

    #[inline]
    pub fn id(&self) -> StripId {
        self.id
    }

    #[inline]
    pub fn kind(&self) -> StripKind {
        self.data.kind()
    }

    #[inline]
    pub fn frame_start(&self) -> f32 {
        self.frame_start
    }

    #[inline]
    pub fn frame_end(&self) -> f32 {
        self.frame_end
    }

    #[inline]
    pub fn frame_offset(&self) -> f32 {
        self.frame_offset
    }

    pub fn is_infinite(&self) -> bool {
        self.frame_start == f32::NEG_INFINITY && self.frame_end == f32::INFINITY
    }

    /// Set the strip's frame range. Only the start may be `-inf` and only the end
    /// may be `+inf`; `start > end` is rejected and leaves the strip unchanged.
    pub fn resize(&mut self, frame_start: f32, frame_end: f32) -> Result<(), AnimError> {
        let valid = frame_start <= frame_end
            && frame_start != f32::INFINITY
            && frame_end != f32::NEG_INFINITY;
        if !valid {
            return Err(AnimError::InvalidRange {
                start: frame_start,
                end: frame_end,
            });
        }
        self.frame_start = frame_start;
        self.frame_end = frame_end;
        Ok(())
    }

    pub fn set_frame_offset(&mut self, frame_offset: f32) -> Result<(), AnimError> {
        if !frame_offset.is_finite() {
            return Err(AnimError::InvalidOffset {
                offset: frame_offset,
            });
        }
        self.frame_offset = frame_offset;
        Ok(())
    }

    /// Whether `frame_time` lies within the strip, both ends inclusive.
    pub fn contains_frame(&self, frame_time: f32) -> bool {
        self.frame_start <= frame_time && frame_time <= self.frame_end
    }

    /// Whether `frame_time` is the strip's last frame, within a tolerance relative to
    /// the magnitude of `frame_end`.
    pub fn is_last_frame(&self, frame_time: f32) -> bool {
        if frame_time == self.frame_end {
            return true;
        }
        if !self.frame_end.is_finite() || !frame_time.is_finite() {
            return false;
        }
        let tolerance = LAST_FRAME_REL_EPSILON * self.frame_end.abs().max(1.0);
        (frame_time - self.frame_end).abs() <= tolerance
    }

    /// Time at which the strip's data is read for a global `frame_time`.
    #[inline]
    pub fn local_time(&self, frame_time: f32) -> f32 {
        frame_time - self.frame_offset
    }

    #[inline]
    pub fn data(&self) -> &StripData<C> {
        &self.data
    }

    #[inline]
    pub fn data_mut(&mut self) -> &mut StripData<C> {
        &mut self.data
    }

    pub fn as_keyframe(&self) -> Option<&KeyframeStrip<C>> {
        match &self.data {
            StripData::Keyframe(k) => Some(k),
        }
    }

    pub fn as_keyframe_mut(&mut self) -> Option<&mut KeyframeStrip<C>> {
        match &mut self.data {
            StripData::Keyframe(k) => Some(k),
        }
    }
}

/// Stable reference to one curve inside a keyframe strip.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CurveHandle {
    pub output: OutputIndex,
    pub curve: usize,
}

/// Keyframe payload: one channel group per keyed output.
#[derive(Debug, Clone)]
pub struct KeyframeStrip<C = FCurve> {
    groups: Vec<ChannelGroup<C>>,
}

impl<C> Default for KeyframeStrip<C> {
    fn default() -> Self {
        Self { groups: Vec::new() }
    }
}

impl<C: Curve> KeyframeStrip<C> {
    pub fn channel_groups(&self) -> &[ChannelGroup<C>] {
        &self.groups
    }

    pub fn channel_group(&self, index: usize) -> Option<&ChannelGroup<C>> {
        self.groups.get(index)
    }

    /// The channel group for `output`, if any key was ever inserted for it here.
    pub fn channels_for_output(&self, output: OutputIndex) -> Option<&ChannelGroup<C>> {
        self.groups
            .iter()
            .find(|g| g.output_stable_index() == output)
    }

    fn channels_for_output_mut(&mut self, output: OutputIndex) -> Option<&mut ChannelGroup<C>> {
        self.groups
            .iter_mut()
            .find(|g| g.output_stable_index() == output)
    }

    fn channels_ensure(&mut self, output: OutputIndex) -> &mut ChannelGroup<C> {
        match self.groups.iter().position(|g| g.output_stable_index() == output) {
            Some(index) => &mut self.groups[index],
            None => {
                log::debug!("creating channel group for output {output}");
                self.groups.push(ChannelGroup::new(output));
                let last = self.groups.len() - 1;
                &mut self.groups[last]
            }
        }
    }

    pub fn curve(&self, handle: CurveHandle) -> Option<&C> {
        self.channels_for_output(handle.output)?
            .curve(handle.curve)
            .map(|(_, c)| c)
    }

    pub fn curve_mut(&mut self, handle: CurveHandle) -> Option<&mut C> {
        self.channels_for_output_mut(handle.output)?
            .curve_mut(handle.curve)
            .map(|(_, c)| c)
    }

    /// Insert a key for `rna_path[array_index]` of `output`, creating the channel
    /// group and curve on first use. The same (output, path, index) triple always
    /// yields the same handle.
    pub fn keyframe_insert(
        &mut self,
        output: OutputIndex,
        rna_path: &str,
        array_index: i32,
        time_value: (f32, f32),
        settings: &KeyframeSettings,
    ) -> Result<CurveHandle, AnimError> {
        let had_group = self.channels_for_output(output).is_some();
        let group = self.channels_ensure(output);
        let curves_before = group.len();
        let (index, curve) =
            group.curve_find_or_create(PropertyIdentifier::new(rna_path, array_index));

        let inserted = if !curve.is_keyframable() {
            log::warn!(
                "curve {rna_path}[{array_index}] for output {output} doesn't allow inserting keys"
            );
            Err(AnimError::CurveNotKeyframable {
                rna_path: rna_path.to_string(),
                array_index,
            })
        } else if curve.insert_keyframe(time_value, settings).is_none() {
            log::warn!(
                "could not insert key at frame {} into curve {rna_path}[{array_index}] for output {output}",
                time_value.0
            );
            Err(AnimError::KeyframeInsertFailed {
                rna_path: rna_path.to_string(),
                array_index,
                time: time_value.0,
            })
        } else {
            Ok(CurveHandle {
                output,
                curve: index,
            })
        };

        if inserted.is_err() {
            self.discard_created(output, had_group, curves_before);
        }
        inserted
    }

    /// Drop a channel group or curves created by an insertion that then failed.
    fn discard_created(&mut self, output: OutputIndex, had_group: bool, curves_before: usize) {
        if !had_group {
            self.groups.retain(|g| g.output_stable_index() != output);
        } else if let Some(group) = self.channels_for_output_mut(output) {
            group.truncate_curves(curves_before);
        }
    }
}
