use thiserror::Error;

use crate::codes::{IndicatorCode, Scheme};

#[derive(Debug, Error, PartialEq)]
pub enum ModelError {
    #[error("normalization of {code} is zero in scheme {scheme}")]
    ZeroNormalization { code: IndicatorCode, scheme: Scheme },
    #[error("{factor} of {code} is not finite in scheme {scheme}")]
    NonFiniteFactor {
        code: IndicatorCode,
        scheme: Scheme,
        factor: &'static str,
    },
    #[error("correction of {target} uses a non-finite weighting for {sub_indicator}")]
    NonFiniteCorrection {
        target: IndicatorCode,
        sub_indicator: IndicatorCode,
    },
    #[error("indicator {0} is defined more than once")]
    DuplicateIndicator(IndicatorCode),
    #[error("correction target {0} is declared more than once")]
    DuplicateCorrectionTarget(IndicatorCode),
    #[error("correction of {target} reads {input}, which is itself a correction target")]
    ChainedCorrection {
        target: IndicatorCode,
        input: IndicatorCode,
    },
    #[error("aggregate score {0} cannot be a correction target")]
    CorrectedAggregate(IndicatorCode),
    #[error("indicator {0} has no canonical position")]
    UnorderedIndicator(IndicatorCode),
    #[error("canonical order lists {0} more than once")]
    DuplicateCanonicalCode(IndicatorCode),
    #[error("canonical order is missing aggregate score {0}")]
    MissingAggregate(IndicatorCode),
    #[error("vector holds indicators outside the canonical order: {}", join_codes(.0))]
    UnknownIndicators(Vec<IndicatorCode>),
    #[error("failed to read reference data {path}: {reason}")]
    ReadFile { path: String, reason: String },
    #[error("failed to parse reference data: {0}")]
    Parse(String),
    #[error("digest calculation failed: {0}")]
    Digest(String),
}

fn join_codes(codes: &[IndicatorCode]) -> String {
    codes
        .iter()
        .map(IndicatorCode::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

pub type Result<T> = std::result::Result<T, ModelError>;
