use serde::{Deserialize, Serialize};
use std::sync::Arc;

use ecoseed_impacts_models::{compute_digest, CanonicalVector, ImpactVector, ReferenceData};

use crate::aggregation::aggregate;
use crate::correction::correct;
use crate::errors::Result;
use crate::merge::merge;

/// Canonical vector plus the reference release it was computed against.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ComputedImpacts {
    pub impacts: CanonicalVector,
    pub reference_version: String,
    pub reference_digest: String,
    pub impacts_digest: String,
}

impl ComputedImpacts {
    /// True when `reference` is a different release and the vector must be recomputed.
    pub fn is_stale(&self, reference: &ReferenceData) -> bool {
        self.reference_digest != reference.digest()
    }
}

#[derive(Clone)]
pub struct ImpactsEngine {
    reference: Arc<ReferenceData>,
}

impl ImpactsEngine {
    pub fn new(reference: Arc<ReferenceData>) -> Self {
        Self { reference }
    }

    pub fn reference(&self) -> &ReferenceData {
        &self.reference
    }

    /// raw → merge → correct → aggregate → canonical order.
    pub fn compute(&self, raw: ImpactVector) -> Result<ComputedImpacts> {
        let raw_len = raw.len();
        let merged = merge(raw);
        let corrected = correct(merged, &self.reference);
        let aggregated = aggregate(corrected, &self.reference);
        let impacts = self.reference.canonical_order().order(aggregated)?;
        let impacts_digest = compute_digest(&impacts)?;
        tracing::debug!(
            raw = raw_len,
            canonical = impacts.len(),
            reference = %self.reference.version(),
            "impacts computed"
        );
        Ok(ComputedImpacts {
            impacts,
            reference_version: self.reference.version().to_string(),
            reference_digest: self.reference.digest().to_string(),
            impacts_digest,
        })
    }
}
