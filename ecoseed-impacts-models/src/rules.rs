/// A fixed pair of sub-indicators always summed into `parent` before correction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MergeRule {
    pub left: &'static str,
    pub right: &'static str,
    pub parent: &'static str,
}

pub const MERGE_RULES: [MergeRule; 2] = [
    // organic freshwater ecotoxicity partitions
    MergeRule {
        left: "etfO1",
        right: "etfO2",
        parent: "etfO",
    },
    MergeRule {
        left: "etf1",
        right: "etf2",
        parent: "etf",
    },
];

/// Every code consumed by a merge rule.
pub fn merge_sources() -> impl Iterator<Item = &'static str> {
    MERGE_RULES
        .iter()
        .flat_map(|rule| [rule.left, rule.right])
}
