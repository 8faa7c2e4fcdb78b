//! Animation: the root aggregate owning layers and outputs.
//!
//! Methods:
//! - layer_add / layer_remove / set_active_layer (layer stack)
//! - output_add / output_remove (stable output indices)
//! - keyframe_settings (insertion defaults from config)

use crate::config::Config;
use crate::curve::{Curve, FCurve, KeyframeSettings};
use crate::ids::{AnimUid, IdAllocator, LayerId, OutputIndex};
use crate::layer::Layer;
use crate::output::{AnimatedId, Output};

#[derive(Debug)]
pub struct Animation<C = FCurve> {
    uid: AnimUid,
    cfg: Config,
    layers: Vec<Layer<C>>,
    layer_ids: IdAllocator,
    active_layer_index: Option<usize>,
    outputs: Vec<Output>,
    last_output_stable_index: OutputIndex,
}

impl<C: Curve> Default for Animation<C> {
    fn default() -> Self {
        Self::with_config(Config::default())
    }
}

impl Animation {
    /// An empty animation using the built-in curve type and default config.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<C: Curve> Animation<C> {
    pub fn with_config(cfg: Config) -> Self {
        Self {
            uid: AnimUid::fresh(),
            cfg,
            layers: Vec::new(),
            layer_ids: IdAllocator::new(),
            active_layer_index: None,
            outputs: Vec::new(),
            last_output_stable_index: 0,
        }
    }

    #[inline]
    pub fn uid(&self) -> AnimUid {
        self.uid
    }

    #[inline]
    pub fn config(&self) -> &Config {
        &self.cfg
    }

    /// Keyframe settings configured for this animation.
    pub fn keyframe_settings(&self) -> KeyframeSettings {
        self.cfg.keyframe
    }

    /* Layers */

    #[inline]
    pub fn layers(&self) -> &[Layer<C>] {
        &self.layers
    }

    pub fn layer(&self, index: usize) -> Option<&Layer<C>> {
        self.layers.get(index)
    }

    pub fn layer_mut(&mut self, index: usize) -> Option<&mut Layer<C>> {
        self.layers.get_mut(index)
    }

    pub fn layer_by_id(&self, id: LayerId) -> Option<&Layer<C>> {
        self.layers.iter().find(|l| l.id() == id)
    }

    pub fn layer_by_id_mut(&mut self, id: LayerId) -> Option<&mut Layer<C>> {
        self.layers.iter_mut().find(|l| l.id() == id)
    }

    /// Append a new layer without strips. The first layer added to an animation
    /// without an active layer becomes the active one.
    pub fn layer_add(&mut self, name: &str) -> &mut Layer<C> {
        let id = LayerId {
            owner: self.uid,
            serial: self.layer_ids.alloc(),
        };
        let index = self.layers.len();
        self.layers
            .push(Layer::new(id, name, self.cfg.default_layer_influence));
        if self.active_layer_index.is_none() {
            self.active_layer_index = Some(index);
        }
        log::debug!("animation {}: added layer '{}' at {}", self.uid.0, name, index);
        &mut self.layers[index]
    }

    /// Remove one of this animation's layers, including its strips and their data.
    /// Layers of other animations are rejected and `false` is returned.
    pub fn layer_remove(&mut self, layer: LayerId) -> bool {
        if layer.owner != self.uid {
            log::warn!(
                "animation {}: refusing to remove layer {} owned by another animation",
                self.uid.0,
                layer.serial
            );
            return false;
        }
        let Some(index) = self.layers.iter().position(|l| l.id() == layer) else {
            return false;
        };
        let removed = self.layers.remove(index);
        log::debug!(
            "animation {}: removed layer '{}' with {} strips",
            self.uid.0,
            removed.name(),
            removed.strips().len()
        );

        self.active_layer_index = match self.active_layer_index {
            _ if self.layers.is_empty() => None,
            Some(active) if active > index => Some(active - 1),
            Some(active) => Some(active.min(self.layers.len() - 1)),
            None => None,
        };
        true
    }

    #[inline]
    pub fn active_layer_index(&self) -> Option<usize> {
        self.active_layer_index
    }

    pub fn active_layer(&self) -> Option<&Layer<C>> {
        self.active_layer_index.and_then(|i| self.layers.get(i))
    }

    pub fn active_layer_mut(&mut self) -> Option<&mut Layer<C>> {
        self.active_layer_index.and_then(|i| self.layers.get_mut(i))
    }

    /// Make `layer` the active layer. Returns `false` if it is not one of ours.
    pub fn set_active_layer(&mut self, layer: LayerId) -> bool {
        match self.layers.iter().position(|l| l.id() == layer) {
            Some(index) => {
                self.active_layer_index = Some(index);
                true
            }
            None => false,
        }
    }

    /* Outputs */

    #[inline]
    pub fn outputs(&self) -> &[Output] {
        &self.outputs
    }

    /// The most recently assigned stable index (0 before the first output).
    #[inline]
    pub fn last_output_stable_index(&self) -> OutputIndex {
        self.last_output_stable_index
    }

    /// Add an output with a fresh stable index. Indices are never reused.
    pub fn output_add(&mut self) -> &mut Output {
        self.last_output_stable_index += 1;
        let index = self.last_output_stable_index;
        log::debug!("animation {}: added output {}", self.uid.0, index);
        self.outputs.push(Output::new(index));
        let last = self.outputs.len() - 1;
        &mut self.outputs[last]
    }

    /// Remove the output with the given stable index. Strips keyed for it keep their
    /// channels; they are simply no longer reachable through a live output.
    pub fn output_remove(&mut self, stable_index: OutputIndex) -> bool {
        let Some(pos) = self
            .outputs
            .iter()
            .position(|o| o.stable_index() == stable_index)
        else {
            return false;
        };
        self.outputs.remove(pos);
        log::debug!("animation {}: removed output {}", self.uid.0, stable_index);
        true
    }

    pub fn output(&self, stable_index: OutputIndex) -> Option<&Output> {
        self.outputs
            .iter()
            .find(|o| o.stable_index() == stable_index)
    }

    pub fn output_mut(&mut self, stable_index: OutputIndex) -> Option<&mut Output> {
        self.outputs
            .iter_mut()
            .find(|o| o.stable_index() == stable_index)
    }

    /// First output that was bound to a target with the same name and can animate it.
    pub fn find_suitable_output_for(&self, target: &dyn AnimatedId) -> Option<&Output> {
        self.outputs
            .iter()
            .find(|o| o.fallback() == target.name() && o.is_suitable_for(target))
    }
}
