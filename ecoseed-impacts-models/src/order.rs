use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::codes::{IndicatorCode, Scheme};
use crate::errors::{ModelError, Result};
use crate::vector::{CanonicalVector, ImpactVector};

pub const DEFAULT_CANONICAL_ORDER: [&str; 21] = [
    "acd", "cch", "etf", "etfC", "fru", "fwe", "htc", "htcC", "htn", "htnC", "ior", "ldu", "mru",
    "ozd", "pco", "pma", "swe", "tre", "wtu", "ecs", "pef",
];

/// Fixed total order over elementary codes and the two aggregate scores.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<IndicatorCode>", into = "Vec<IndicatorCode>")]
pub struct CanonicalOrder {
    codes: Vec<IndicatorCode>,
}

impl CanonicalOrder {
    pub fn new(codes: Vec<IndicatorCode>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(codes.len());
        for code in &codes {
            if !seen.insert(code.as_str()) {
                return Err(ModelError::DuplicateCanonicalCode(code.clone()));
            }
        }
        for scheme in Scheme::ALL {
            if !seen.contains(scheme.code()) {
                return Err(ModelError::MissingAggregate(scheme.aggregate_code()));
            }
        }
        Ok(Self { codes })
    }

    pub fn codes(&self) -> &[IndicatorCode] {
        &self.codes
    }

    pub fn position(&self, code: &str) -> Option<usize> {
        self.codes.iter().position(|known| known.as_str() == code)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.position(code).is_some()
    }

    /// Lays `vector` out in canonical order.
    ///
    /// Fails with [`ModelError::UnknownIndicators`] listing every key that
    /// has no canonical position; nothing is passed through unordered.
    pub fn order(&self, mut vector: ImpactVector) -> Result<CanonicalVector> {
        let unknown: Vec<IndicatorCode> = vector
            .codes()
            .filter(|code| !self.contains(code.as_str()))
            .cloned()
            .collect();
        if !unknown.is_empty() {
            return Err(ModelError::UnknownIndicators(unknown));
        }
        let entries = self
            .codes
            .iter()
            .filter_map(|code| vector.remove(code.as_str()).map(|value| (code.clone(), value)))
            .collect();
        Ok(CanonicalVector::from_entries(entries))
    }
}

impl Default for CanonicalOrder {
    fn default() -> Self {
        Self {
            codes: DEFAULT_CANONICAL_ORDER
                .iter()
                .map(|code| IndicatorCode::from(*code))
                .collect(),
        }
    }
}

impl TryFrom<Vec<IndicatorCode>> for CanonicalOrder {
    type Error = ModelError;

    fn try_from(codes: Vec<IndicatorCode>) -> Result<Self> {
        Self::new(codes)
    }
}

impl From<CanonicalOrder> for Vec<IndicatorCode> {
    fn from(order: CanonicalOrder) -> Self {
        order.codes
    }
}
