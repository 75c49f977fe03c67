use std::sync::Arc;

use ecoseed_impacts_models::{ProcessId, ReferenceData};

use crate::engine::{ComputedImpacts, ImpactsEngine};
use crate::errors::Result;
use crate::facade::RawImpactsSource;

pub struct ImpactsProvisioner<S> {
    engine: ImpactsEngine,
    source: S,
}

impl<S> ImpactsProvisioner<S>
where
    S: RawImpactsSource,
{
    pub fn new(source: S, reference: Arc<ReferenceData>) -> Self {
        Self {
            engine: ImpactsEngine::new(reference),
            source,
        }
    }

    pub fn engine(&self) -> &ImpactsEngine {
        &self.engine
    }

    pub fn recompute(&self, process: &ProcessId) -> Result<ComputedImpacts> {
        let raw = self.source.load_raw(process)?;
        self.engine.compute(raw)
    }

    /// One result per process; a failing record does not stop the batch.
    pub fn recompute_all(
        &self,
        processes: &[ProcessId],
    ) -> Vec<(ProcessId, Result<ComputedImpacts>)> {
        let results: Vec<_> = processes
            .iter()
            .map(|process| (process.clone(), self.recompute(process)))
            .collect();
        let failed = results.iter().filter(|(_, result)| result.is_err()).count();
        for (process, result) in &results {
            if let Err(err) = result {
                tracing::warn!(%process, "recompute failed: {}", err);
            }
        }
        tracing::info!(
            total = results.len(),
            failed,
            reference = %self.engine.reference().version(),
            "impacts recomputed"
        );
        results
    }
}

impl<S> From<(S, ImpactsEngine)> for ImpactsProvisioner<S>
where
    S: RawImpactsSource,
{
    fn from((source, engine): (S, ImpactsEngine)) -> Self {
        Self { engine, source }
    }
}
