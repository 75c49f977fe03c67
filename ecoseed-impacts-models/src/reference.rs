use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;

use crate::canon::compute_digest;
use crate::codes::{IndicatorCode, Scheme};
use crate::errors::{ModelError, Result};
use crate::order::CanonicalOrder;

/// Unvalidated `(weighting, normalization)` pair as written in a reference-data release.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct RawFactors {
    pub weighting: f64,
    pub normalization: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct RawCorrection {
    pub sub_indicator: IndicatorCode,
    pub weighting: f64,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct RawIndicator {
    #[serde(default)]
    pub pef: Option<RawFactors>,
    #[serde(default)]
    pub ecs: Option<RawFactors>,
    #[serde(default)]
    pub correction: Vec<RawCorrection>,
}

#[derive(Debug, Deserialize)]
struct ReferenceFile {
    version: String,
    #[serde(default)]
    indicators: BTreeMap<IndicatorCode, RawIndicator>,
    #[serde(default)]
    canonical_order: Option<CanonicalOrder>,
}

/// Validated factors: both finite, normalization never zero.
#[derive(Clone, Copy, Debug, Serialize, PartialEq)]
pub struct SchemeFactors {
    weighting: f64,
    normalization: f64,
}

impl SchemeFactors {
    fn validate(code: &IndicatorCode, scheme: Scheme, raw: RawFactors) -> Result<Self> {
        for (factor, value) in [
            ("weighting", raw.weighting),
            ("normalization", raw.normalization),
        ] {
            if !value.is_finite() {
                return Err(ModelError::NonFiniteFactor {
                    code: code.clone(),
                    scheme,
                    factor,
                });
            }
        }
        if raw.normalization == 0.0 {
            return Err(ModelError::ZeroNormalization {
                code: code.clone(),
                scheme,
            });
        }
        Ok(Self {
            weighting: raw.weighting,
            normalization: raw.normalization,
        })
    }

    pub fn weighting(&self) -> f64 {
        self.weighting
    }

    pub fn normalization(&self) -> f64 {
        self.normalization
    }
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct CorrectionTerm {
    pub sub_indicator: IndicatorCode,
    pub weighting: f64,
}

#[derive(Clone, Debug, Default, Serialize, PartialEq)]
pub struct IndicatorDefinition {
    #[serde(skip_serializing_if = "Option::is_none")]
    pef: Option<SchemeFactors>,
    #[serde(skip_serializing_if = "Option::is_none")]
    ecs: Option<SchemeFactors>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    correction: Vec<CorrectionTerm>,
}

impl IndicatorDefinition {
    fn validate(code: &IndicatorCode, raw: RawIndicator) -> Result<Self> {
        let pef = raw
            .pef
            .map(|factors| SchemeFactors::validate(code, Scheme::Pef, factors))
            .transpose()?;
        let ecs = raw
            .ecs
            .map(|factors| SchemeFactors::validate(code, Scheme::Ecs, factors))
            .transpose()?;
        let correction = raw
            .correction
            .into_iter()
            .map(|term| {
                if !term.weighting.is_finite() {
                    return Err(ModelError::NonFiniteCorrection {
                        target: code.clone(),
                        sub_indicator: term.sub_indicator,
                    });
                }
                Ok(CorrectionTerm {
                    sub_indicator: term.sub_indicator,
                    weighting: term.weighting,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            pef,
            ecs,
            correction,
        })
    }

    /// `None` means the indicator does not take part in `scheme`'s aggregate.
    pub fn factors(&self, scheme: Scheme) -> Option<&SchemeFactors> {
        match scheme {
            Scheme::Pef => self.pef.as_ref(),
            Scheme::Ecs => self.ecs.as_ref(),
        }
    }

    pub fn correction(&self) -> &[CorrectionTerm] {
        &self.correction
    }

    pub fn is_correctable(&self) -> bool {
        !self.correction.is_empty()
    }
}

/// Borrowed view of one correctable indicator and its weighted sources.
#[derive(Clone, Copy, Debug)]
pub struct CorrectionRule<'a> {
    pub target: &'a IndicatorCode,
    pub terms: &'a [CorrectionTerm],
}

/// One immutable release of indicator definitions, correction rules and canonical order.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct ReferenceData {
    version: String,
    indicators: BTreeMap<IndicatorCode, IndicatorDefinition>,
    canonical_order: CanonicalOrder,
    #[serde(skip)]
    digest: String,
}

impl ReferenceData {
    /// Validates a release. Nothing is re-checked during pipeline runs.
    pub fn from_parts(
        version: impl Into<String>,
        indicators: Vec<(IndicatorCode, RawIndicator)>,
        canonical_order: Option<CanonicalOrder>,
    ) -> Result<Self> {
        let canonical_order = canonical_order.unwrap_or_default();
        let mut definitions: BTreeMap<IndicatorCode, IndicatorDefinition> = BTreeMap::new();
        for (code, raw) in indicators {
            let correctable = !raw.correction.is_empty();
            if let Some(existing) = definitions.get(&code) {
                if correctable || existing.is_correctable() {
                    return Err(ModelError::DuplicateCorrectionTarget(code));
                }
                return Err(ModelError::DuplicateIndicator(code));
            }
            if !canonical_order.contains(code.as_str()) {
                return Err(ModelError::UnorderedIndicator(code));
            }
            if code.is_aggregate() {
                if correctable {
                    return Err(ModelError::CorrectedAggregate(code));
                }
                tracing::debug!(indicator = %code, "aggregate code defined as an indicator, excluded from scores");
            }
            let definition = IndicatorDefinition::validate(&code, raw)?;
            definitions.insert(code, definition);
        }

        let targets: HashSet<&IndicatorCode> = definitions
            .iter()
            .filter(|(_, definition)| definition.is_correctable())
            .map(|(code, _)| code)
            .collect();
        for (target, definition) in &definitions {
            if let Some(term) = definition
                .correction
                .iter()
                .find(|term| targets.contains(&term.sub_indicator))
            {
                return Err(ModelError::ChainedCorrection {
                    target: target.clone(),
                    input: term.sub_indicator.clone(),
                });
            }
        }

        let mut data = Self {
            version: version.into(),
            indicators: definitions,
            canonical_order,
            digest: String::new(),
        };
        data.digest = compute_digest(&data)?;
        tracing::debug!(version = %data.version, digest = %data.digest, "reference data loaded");
        Ok(data)
    }

    pub fn from_json_value(value: serde_json::Value) -> Result<Self> {
        let file: ReferenceFile =
            serde_json::from_value(value).map_err(|err| ModelError::Parse(err.to_string()))?;
        Self::from_file_contents(file)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let file: ReferenceFile =
            serde_json::from_str(content).map_err(|err| ModelError::Parse(err.to_string()))?;
        Self::from_file_contents(file)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|err| ModelError::ReadFile {
            path: path.display().to_string(),
            reason: err.to_string(),
        })?;
        Self::from_json_str(&content)
    }

    fn from_file_contents(file: ReferenceFile) -> Result<Self> {
        Self::from_parts(
            file.version,
            file.indicators.into_iter().collect(),
            file.canonical_order,
        )
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Content digest of this release; computed vectors carry it to detect staleness.
    pub fn digest(&self) -> &str {
        &self.digest
    }

    pub fn canonical_order(&self) -> &CanonicalOrder {
        &self.canonical_order
    }

    pub fn definition(&self, code: &str) -> Option<&IndicatorDefinition> {
        self.indicators.get(code)
    }

    /// Definitions in code order.
    pub fn definitions(&self) -> impl Iterator<Item = (&IndicatorCode, &IndicatorDefinition)> {
        self.indicators.iter()
    }

    pub fn correction_rules(&self) -> impl Iterator<Item = CorrectionRule<'_>> {
        self.indicators
            .iter()
            .filter(|(_, definition)| definition.is_correctable())
            .map(|(target, definition)| CorrectionRule {
                target,
                terms: &definition.correction,
            })
    }
}
