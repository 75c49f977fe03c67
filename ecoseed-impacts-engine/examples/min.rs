use std::sync::Arc;

use ecoseed_impacts_engine::ImpactsEngine;
use ecoseed_impacts_models::{ImpactVector, ReferenceData};
use serde_json::json;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let reference = ReferenceData::from_json_value(json!({
        "version": "demo",
        "indicators": {
            "cch": {
                "pef": {"weighting": 1.0, "normalization": 1.0},
                "ecs": {"weighting": 1.0, "normalization": 1.0}
            },
            "etf": {
                "pef": {"weighting": 0.5, "normalization": 2.0},
                "correction": [
                    {"sub_indicator": "etfO", "weighting": 1.0},
                    {"sub_indicator": "etfI", "weighting": 1.0}
                ]
            }
        }
    }))?;

    let raw: ImpactVector = [("etfO1", 0.2), ("etfO2", 0.3), ("etfI", 0.1), ("cch", 1.0)]
        .into_iter()
        .collect();

    let engine = ImpactsEngine::new(Arc::new(reference));
    let computed = engine.compute(raw)?;
    println!("impacts: {}", serde_json::to_string(&computed.impacts)?);
    println!("digest: {}", computed.impacts_digest);
    Ok(())
}
