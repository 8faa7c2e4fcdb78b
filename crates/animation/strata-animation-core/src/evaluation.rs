//! Layer evaluation.
//!
//! Model:
//! - Within a layer, the strip with the highest index whose range contains the
//!   evaluation time is the only one evaluated. On a shared edge (one strip ends
//!   where the next begins) the later strip wins.
//! - The strip's data is read at `eval_time - frame_offset`.
//! - Every keyed curve of the output's channel group is evaluated; curves without
//!   keys and properties the target cannot resolve are skipped.
//!
//! Evaluation never writes to the target. It only produces an [`EvaluationResult`]
//! that callers can mix with other layers or apply themselves.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::animation::Animation;
use crate::curve::Curve;
use crate::ids::{LayerId, OutputIndex};
use crate::layer::Layer;
use crate::property::{PropertyHandle, PropertyIdentifier, PropertyResolver};
use crate::strip::{KeyframeStrip, Strip, StripData};

/// Evaluation parameters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EvalContext {
    /// Global (layer) time to evaluate at, in frames.
    pub eval_time: f32,
}

impl EvalContext {
    pub fn at(eval_time: f32) -> Self {
        Self { eval_time }
    }
}

/// One evaluated property value together with its resolved handle.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnimatedProperty {
    pub value: f32,
    pub handle: PropertyHandle,
}

/// Evaluated curves for one output: property → value.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EvaluationResult {
    result: HashMap<PropertyIdentifier, AnimatedProperty>,
}

impl EvaluationResult {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.result.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.result.len()
    }

    /// Store a value, replacing an earlier one for the same property.
    pub fn store(&mut self, rna_path: &str, array_index: i32, value: f32, handle: PropertyHandle) {
        self.result.insert(
            PropertyIdentifier::new(rna_path, array_index),
            AnimatedProperty { value, handle },
        );
    }

    pub fn value(&self, rna_path: &str, array_index: i32) -> Option<f32> {
        self.lookup(&PropertyIdentifier::new(rna_path, array_index))
            .map(|p| p.value)
    }

    pub fn lookup(&self, key: &PropertyIdentifier) -> Option<&AnimatedProperty> {
        self.result.get(key)
    }

    pub fn lookup_mut(&mut self, key: &PropertyIdentifier) -> Option<&mut AnimatedProperty> {
        self.result.get_mut(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PropertyIdentifier, &AnimatedProperty)> {
        self.result.iter()
    }

    /// Entries sorted by property, for deterministic output.
    pub fn sorted(&self) -> Vec<(&PropertyIdentifier, &AnimatedProperty)> {
        let mut items: Vec<_> = self.result.iter().collect();
        items.sort_by(|a, b| a.0.cmp(b.0));
        items
    }
}

/// Result of one layer within [`evaluate_animation`].
#[derive(Clone, Debug, PartialEq)]
pub struct LayerEvaluation {
    pub layer: LayerId,
    pub influence: f32,
    pub result: EvaluationResult,
}

/// The strip responsible for `frame_time`: the last one in layer order containing it.
pub fn active_strip<C: Curve>(layer: &Layer<C>, frame_time: f32) -> Option<&Strip<C>> {
    layer
        .strips()
        .iter()
        .rev()
        .find(|s| s.contains_frame(frame_time))
}

/// Evaluate one layer for one output, without looking at other layers or influence.
/// An empty result means nothing in this layer animates the output at that time.
pub fn evaluate_layer<C: Curve>(
    target: &dyn PropertyResolver,
    layer: &Layer<C>,
    output: OutputIndex,
    ctx: &EvalContext,
) -> EvaluationResult {
    let Some(strip) = active_strip(layer, ctx.eval_time) else {
        log::trace!(
            "layer '{}': no strip at frame {}",
            layer.name(),
            ctx.eval_time
        );
        return EvaluationResult::new();
    };
    evaluate_strip(target, strip, output, ctx)
}

fn evaluate_strip<C: Curve>(
    target: &dyn PropertyResolver,
    strip: &Strip<C>,
    output: OutputIndex,
    ctx: &EvalContext,
) -> EvaluationResult {
    let local_time = strip.local_time(ctx.eval_time);
    log::trace!(
        "strip {}: evaluating output {} at local frame {}",
        strip.id().serial,
        output,
        local_time
    );
    match strip.data() {
        StripData::Keyframe(keys) => evaluate_keyframe_data(target, keys, output, local_time),
    }
}

fn evaluate_keyframe_data<C: Curve>(
    target: &dyn PropertyResolver,
    keys: &KeyframeStrip<C>,
    output: OutputIndex,
    local_time: f32,
) -> EvaluationResult {
    let mut result = EvaluationResult::new();
    let Some(group) = keys.channels_for_output(output) else {
        return result;
    };
    for (prop, curve) in group.curves().filter(|(_, c)| c.key_count() > 0) {
        let Some(handle) = target.resolve(&prop.rna_path, prop.array_index) else {
            log::trace!("skipping {prop}: not a property of the target");
            continue;
        };
        let value = curve.evaluate(local_time);
        result.store(&prop.rna_path, prop.array_index, value, handle);
    }
    result
}

/// Evaluate every layer with non-zero influence, bottom to top. Layers that produce
/// nothing are left out; mixing the per-layer results is up to the caller.
pub fn evaluate_animation<C: Curve>(
    target: &dyn PropertyResolver,
    animation: &Animation<C>,
    output: OutputIndex,
    ctx: &EvalContext,
) -> Vec<LayerEvaluation> {
    animation
        .layers()
        .iter()
        .filter(|layer| layer.influence() > 0.0)
        .filter_map(|layer| {
            let result = evaluate_layer(target, layer, output, ctx);
            (!result.is_empty()).then(|| LayerEvaluation {
                layer: layer.id(),
                influence: layer.influence(),
                result,
            })
        })
        .collect()
}
