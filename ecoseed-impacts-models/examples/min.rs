use ecoseed_impacts_models::{CanonicalOrder, ImpactVector, ReferenceData, Scheme};
use serde_json::json;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let reference = ReferenceData::from_json_value(json!({
        "version": "demo",
        "indicators": {
            "cch": {"pef": {"weighting": 1.0, "normalization": 1.0}}
        }
    }))?;
    println!("reference {} ({})", reference.version(), reference.digest());

    let vector: ImpactVector = [("pef", 1_000_000.0), ("ecs", 0.0), ("cch", 1.0)]
        .into_iter()
        .collect();
    let canonical = CanonicalOrder::default().order(vector)?;
    println!("canonical: {}", serde_json::to_string(&canonical)?);
    println!("pef: {:?}", canonical.aggregate(Scheme::Pef));
    Ok(())
}
