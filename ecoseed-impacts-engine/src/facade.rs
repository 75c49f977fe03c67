use ecoseed_impacts_models::{ImpactVector, ProcessId};

use crate::errors::Result;

/// Supplies raw characterization vectors; backed by an inventory engine in production.
pub trait RawImpactsSource: Send + Sync {
    fn load_raw(&self, process: &ProcessId) -> Result<ImpactVector>;
}
