use ecoseed_impacts_models::{CorrectionRule, ImpactVector, ReferenceData};

/// Recomputes every correctable indicator that is not yet present.
///
/// The target becomes the weighted sum of whichever sources are present, and
/// those sources are removed. Missing sources are skipped. When none is found
/// the target is still written, with 0. A second pass finds every target
/// present and changes nothing.
pub fn correct(vector: ImpactVector, reference: &ReferenceData) -> ImpactVector {
    reference.correction_rules().fold(vector, apply_correction_rule)
}

fn apply_correction_rule(mut vector: ImpactVector, rule: CorrectionRule<'_>) -> ImpactVector {
    if vector.contains(rule.target.as_str()) {
        tracing::debug!(indicator = %rule.target, "already present, correction skipped");
        return vector;
    }
    let mut corrected = 0.0;
    let mut consumed = 0usize;
    for term in rule.terms {
        if let Some(value) = vector.remove(term.sub_indicator.as_str()) {
            corrected += term.weighting * value;
            consumed += 1;
        }
    }
    tracing::debug!(indicator = %rule.target, consumed, value = corrected, "corrected");
    vector.insert(rule.target.clone(), corrected);
    vector
}
