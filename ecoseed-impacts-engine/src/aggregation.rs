use ecoseed_impacts_models::{ImpactVector, ReferenceData, Scheme};

/// Converts the unit-less weighted sum into micro-points (µPt).
pub const MICRO_POINTS: f64 = 1_000_000.0;

/// `MICRO_POINTS × Σ value(k) × weighting(k) / normalization(k)` over the
/// indicators present in both `vector` and `scheme`'s table.
///
/// Aggregate codes never contribute, even when the table defines them.
pub fn score(vector: &ImpactVector, reference: &ReferenceData, scheme: Scheme) -> f64 {
    let total = reference
        .definitions()
        .filter(|(code, _)| !code.is_aggregate())
        .filter_map(|(code, definition)| {
            let factors = definition.factors(scheme)?;
            let value = vector.get(code.as_str())?;
            Some(value * factors.weighting() / factors.normalization())
        })
        .fold(0.0, |acc, contribution| acc + contribution);
    total * MICRO_POINTS
}

/// Writes both aggregate scores into the vector, replacing earlier values.
pub fn aggregate(mut vector: ImpactVector, reference: &ReferenceData) -> ImpactVector {
    for scheme in Scheme::ALL {
        let value = score(&vector, reference, scheme);
        vector.insert(scheme.aggregate_code(), value);
    }
    vector
}
