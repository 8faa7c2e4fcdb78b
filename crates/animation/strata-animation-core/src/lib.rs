//! Strata Animation Core
//!
//! Layered, strip-based keyframe animation. An [`Animation`] owns its layers and
//! outputs; each [`Layer`] holds an ordered list of [`Strip`]s covering a (possibly
//! unbounded) frame range; keyframe strips own one [`ChannelGroup`] of curves per
//! output they animate. [`evaluate_layer`] resolves, for one output and one point
//! in time, the value of every animated property without touching the target.

pub mod animation;
pub mod channels;
pub mod config;
pub mod curve;
pub mod error;
pub mod evaluation;
pub mod ids;
pub mod layer;
pub mod output;
pub mod property;
pub mod strip;

// Re-exports for consumers (hosts and adapters)
pub use animation::Animation;
pub use channels::ChannelGroup;
pub use config::Config;
pub use curve::{Curve, FCurve, HandleType, Interpolation, KeyframeSettings, KeyframeType};
pub use error::AnimError;
pub use evaluation::{
    evaluate_animation, evaluate_layer, AnimatedProperty, EvalContext, EvaluationResult,
    LayerEvaluation,
};
pub use ids::{AnimUid, LayerId, OutputIndex, StripId};
pub use layer::Layer;
pub use output::{AnimatedId, IdType, Output};
pub use property::{PropertyHandle, PropertyIdentifier, PropertyResolver};
pub use strip::{CurveHandle, KeyframeStrip, Strip, StripData, StripKind};
