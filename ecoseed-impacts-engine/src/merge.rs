use ecoseed_impacts_models::{ImpactVector, MergeRule, MERGE_RULES};

/// Sums every fixed merge pair into its parent, dropping both sources.
///
/// Pairs already merged upstream are left alone and no zero parent is
/// created. A pair with a single source present is also left untouched.
/// A parent already present next to both sources is replaced by their sum.
pub fn merge(vector: ImpactVector) -> ImpactVector {
    MERGE_RULES.iter().fold(vector, apply_merge_rule)
}

fn apply_merge_rule(mut vector: ImpactVector, rule: &MergeRule) -> ImpactVector {
    match (vector.get(rule.left), vector.get(rule.right)) {
        (Some(left), Some(right)) => {
            vector.remove(rule.left);
            vector.remove(rule.right);
            if let Some(discarded) = vector.insert(rule.parent, left + right) {
                tracing::warn!(
                    parent = rule.parent,
                    discarded,
                    "merge replaced an existing parent value"
                );
            }
        }
        (None, None) => {}
        _ => {
            tracing::warn!(
                left = rule.left,
                right = rule.right,
                parent = rule.parent,
                "partial merge pair left untouched"
            );
        }
    }
    vector
}
