//! Core configuration for strata-animation-core.

use serde::{Deserialize, Serialize};

use crate::curve::KeyframeSettings;

/// Engine defaults applied when creating layers and inserting keys.
/// Missing fields fall back to [`Config::default`] when deserializing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Influence assigned to newly added layers.
    pub default_layer_influence: f32,

    /// Keyframe settings used for user-driven insertion
    /// (see [`Animation::keyframe_settings`](crate::Animation::keyframe_settings)).
    pub keyframe: KeyframeSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_layer_influence: 1.0,
            keyframe: KeyframeSettings::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::{HandleType, Interpolation};

    #[test]
    fn partial_config_keeps_defaults() {
        let cfg: Config =
            serde_json::from_str(r#"{ "keyframe": { "interpolation": "Linear" } }"#).unwrap();
        assert_eq!(cfg.default_layer_influence, 1.0);
        assert_eq!(cfg.keyframe.interpolation, Interpolation::Linear);
        assert_eq!(cfg.keyframe.handle, HandleType::AutoClamped);

        let empty: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, Config::default());
    }
}
