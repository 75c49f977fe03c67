use ecoseed_impacts_models::{CanonicalVector, IndicatorCode, ProcessId};

use crate::errors::{ExposureError, Result};

const PREVIEW_CONTEXT: &str = "ecoseed impacts preview v1";

/// Deterministic synthetic elementary values, in `(0, scale]`, keyed by seed,
/// process and indicator. Aggregate scores are never replaced.
#[derive(Clone)]
pub struct PreviewGenerator {
    key: [u8; 32],
    scale: f64,
}

impl PreviewGenerator {
    pub fn new(seed: &str, scale: f64) -> Result<Self> {
        if !(scale.is_finite() && scale > 0.0) {
            return Err(ExposureError::InvalidPreviewScale(scale));
        }
        Ok(Self {
            key: blake3::derive_key(PREVIEW_CONTEXT, seed.as_bytes()),
            scale,
        })
    }

    pub fn value_for(&self, process: &ProcessId, code: &IndicatorCode) -> f64 {
        let mut hasher = blake3::Hasher::new_keyed(&self.key);
        hasher.update(process.0.as_bytes());
        hasher.update(&[0]);
        hasher.update(code.as_str().as_bytes());
        let hash = hasher.finalize();
        let mut head = [0u8; 8];
        head.copy_from_slice(&hash.as_bytes()[..8]);
        // top 53 bits give a uniform value in [0, 1)
        let unit = (u64::from_le_bytes(head) >> 11) as f64 / (1u64 << 53) as f64;
        (1.0 - unit) * self.scale
    }

    pub fn fake(&self, process: &ProcessId, impacts: &CanonicalVector) -> CanonicalVector {
        impacts.map_values(|code, value| {
            if code.is_aggregate() {
                value
            } else {
                self.value_for(process, code)
            }
        })
    }
}
