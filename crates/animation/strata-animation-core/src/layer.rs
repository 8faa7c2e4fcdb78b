//! Layers: ordered, prioritized stacks of strips.

use crate::curve::{Curve, FCurve};
use crate::ids::{IdAllocator, LayerId, StripId};
use crate::strip::{Strip, StripKind};

#[derive(Debug, Clone)]
pub struct Layer<C = FCurve> {
    id: LayerId,
    name: String,
    influence: f32,
    /// Insertion order is evaluation priority: later strips win where ranges overlap.
    strips: Vec<Strip<C>>,
    strip_ids: IdAllocator,
}

impl<C: Curve> Layer<C> {
    pub(crate) fn new(id: LayerId, name: &str, influence: f32) -> Self {
        let mut layer = Self {
            id,
            name: name.to_string(),
            influence: 1.0,
            strips: Vec::new(),
            strip_ids: IdAllocator::new(),
        };
        layer.set_influence(influence);
        layer
    }

    #[inline]
    pub fn id(&self) -> LayerId {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rename(&mut self, name: &str) {
        self.name = name.to_string();
    }

    #[inline]
    pub fn influence(&self) -> f32 {
        self.influence
    }

    /// Set the layer influence, clamped to `[0, 1]`.
    pub fn set_influence(&mut self, influence: f32) {
        self.influence = if influence.is_nan() {
            0.0
        } else {
            influence.clamp(0.0, 1.0)
        };
    }

    #[inline]
    pub fn strips(&self) -> &[Strip<C>] {
        &self.strips
    }

    pub fn strip(&self, index: usize) -> Option<&Strip<C>> {
        self.strips.get(index)
    }

    pub fn strip_mut(&mut self, index: usize) -> Option<&mut Strip<C>> {
        self.strips.get_mut(index)
    }

    pub fn strip_by_id(&self, id: StripId) -> Option<&Strip<C>> {
        self.strips.iter().find(|s| s.id() == id)
    }

    pub fn strip_by_id_mut(&mut self, id: StripId) -> Option<&mut Strip<C>> {
        self.strips.iter_mut().find(|s| s.id() == id)
    }

    /// Append an infinite strip of the given kind; it gets the highest priority.
    pub fn strip_add(&mut self, kind: StripKind) -> &mut Strip<C> {
        let id = StripId {
            layer: self.id,
            serial: self.strip_ids.alloc(),
        };
        log::debug!("layer '{}': adding {:?} strip {}", self.name, kind, id.serial);
        self.strips.push(Strip::with_id(id, kind));
        let last = self.strips.len() - 1;
        &mut self.strips[last]
    }

    /// Remove one of this layer's strips along with all of its data.
    /// Strips owned by another layer are rejected and `false` is returned.
    pub fn strip_remove(&mut self, strip: StripId) -> bool {
        if strip.layer != self.id {
            log::warn!(
                "layer '{}': refusing to remove strip {} owned by another layer",
                self.name,
                strip.serial
            );
            return false;
        }
        let Some(index) = self.strips.iter().position(|s| s.id() == strip) else {
            return false;
        };
        self.strips.remove(index);
        log::debug!("layer '{}': removed strip {}", self.name, strip.serial);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::AnimUid;

    fn layer(name: &str) -> Layer {
        let id = LayerId {
            owner: AnimUid::fresh(),
            serial: 1,
        };
        Layer::new(id, name, 1.0)
    }

    #[test]
    fn strips_keep_insertion_order() {
        let mut l = layer("Test Læür");
        let a = l.strip_add(StripKind::Keyframe).id();
        let b = l.strip_add(StripKind::Keyframe).id();
        assert_ne!(a, b);
        assert_eq!(l.strip(0).map(Strip::id), Some(a));
        assert_eq!(l.strip(1).map(Strip::id), Some(b));
        assert!(l.strip_by_id(b).is_some());
    }

    #[test]
    fn removed_strip_ids_are_not_reused() {
        let mut l = layer("L");
        let a = l.strip_add(StripKind::Keyframe).id();
        assert!(l.strip_remove(a));
        assert!(!l.strip_remove(a));
        let b = l.strip_add(StripKind::Keyframe).id();
        assert_ne!(a, b);
    }

    #[test]
    fn detached_strips_cannot_be_removed() {
        let mut l = layer("L");
        l.strip_add(StripKind::Keyframe);
        assert!(!l.strip_remove(StripId::DETACHED));
        assert_eq!(l.strips().len(), 1);
    }

    #[test]
    fn influence_is_clamped() {
        let mut l = layer("L");
        l.set_influence(1.5);
        assert_eq!(l.influence(), 1.0);
        l.set_influence(-0.5);
        assert_eq!(l.influence(), 0.0);
        l.set_influence(0.25);
        assert_eq!(l.influence(), 0.25);
    }
}
