use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Tunables of a [`GraphStore`](super::GraphStore).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StoreConfig {
    /// Incoming-edge cap for merge Sources. Steps take at most
    /// `min(max_inputs, 2)` and Results always take one.
    pub max_inputs: usize,
    pub layout: LayoutConfig,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            max_inputs: 2,
            layout: LayoutConfig::default(),
        }
    }
}

impl StoreConfig {
    /// Parses a JSON config. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: StoreConfig =
            serde_json::from_str(json).map_err(|e| ConfigError::Json(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_inputs == 0 {
            return Err(ConfigError::Invalid(
                "maxInputs must be at least 1".to_string(),
            ));
        }
        let layout = &self.layout;
        if [layout.offset_x, layout.offset_y, layout.overlap_radius]
            .iter()
            .any(|v| !v.is_finite() || *v < 0.0)
        {
            return Err(ConfigError::Invalid(
                "layout offsets must be finite and non-negative".to_string(),
            ));
        }
        Ok(())
    }
}

/// Auto-placement parameters for cards created without a position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutConfig {
    /// Horizontal distance from the card a new one is spawned from.
    pub offset_x: f64,
    /// Vertical shift applied when the first spot is taken.
    pub offset_y: f64,
    /// Two cards closer than this on both axes overlap.
    pub overlap_radius: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            offset_x: 300.0,
            offset_y: 150.0,
            overlap_radius: 100.0,
        }
    }
}
