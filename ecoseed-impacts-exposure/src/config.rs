use serde::{Deserialize, Serialize};

use crate::errors::{ExposureError, Result};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ExposureConfig {
    /// Lets anonymous callers ask for synthetic elementary values instead of zeros.
    pub preview_enabled: bool,
    pub preview_seed: String,
    /// Upper bound of synthetic values; must be finite and positive.
    pub preview_scale: f64,
}

impl Default for ExposureConfig {
    fn default() -> Self {
        Self {
            preview_enabled: true,
            preview_seed: "ecoseed-preview".into(),
            preview_scale: 1.0,
        }
    }
}

impl ExposureConfig {
    pub fn validate(&self) -> Result<()> {
        if !(self.preview_scale.is_finite() && self.preview_scale > 0.0) {
            return Err(ExposureError::InvalidPreviewScale(self.preview_scale));
        }
        Ok(())
    }

    /// Parses and validates; missing fields take their defaults.
    pub fn from_json_str(content: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(content).map_err(|err| ExposureError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}
