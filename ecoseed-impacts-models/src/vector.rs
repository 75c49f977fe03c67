use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt::{self, Formatter};

use crate::codes::{IndicatorCode, Scheme};

/// Unordered mapping from indicator code to value, as it flows through the pipeline.
///
/// Deserializing rejects a key that appears twice instead of keeping the last value.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ImpactVector(BTreeMap<IndicatorCode, f64>);

impl ImpactVector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, code: &str) -> Option<f64> {
        self.0.get(code).copied()
    }

    pub fn contains(&self, code: &str) -> bool {
        self.0.contains_key(code)
    }

    pub fn insert(&mut self, code: impl Into<IndicatorCode>, value: f64) -> Option<f64> {
        self.0.insert(code.into(), value)
    }

    pub fn remove(&mut self, code: &str) -> Option<f64> {
        self.0.remove(code)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn codes(&self) -> impl Iterator<Item = &IndicatorCode> {
        self.0.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&IndicatorCode, f64)> {
        self.0.iter().map(|(code, value)| (code, *value))
    }
}

impl<'de> Deserialize<'de> for ImpactVector {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct UniqueKeysVisitor;

        impl<'de> Visitor<'de> for UniqueKeysVisitor {
            type Value = ImpactVector;

            fn expecting(&self, f: &mut Formatter<'_>) -> fmt::Result {
                f.write_str("a map of indicator codes to numbers")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut values = BTreeMap::new();
                while let Some((code, value)) = access.next_entry::<IndicatorCode, f64>()? {
                    if values.contains_key(&code) {
                        return Err(de::Error::custom(format!("duplicate indicator {code}")));
                    }
                    values.insert(code, value);
                }
                Ok(ImpactVector(values))
            }
        }

        deserializer.deserialize_map(UniqueKeysVisitor)
    }
}

impl<K: Into<IndicatorCode>> FromIterator<(K, f64)> for ImpactVector {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(code, value)| (code.into(), value))
                .collect(),
        )
    }
}

impl IntoIterator for ImpactVector {
    type Item = (IndicatorCode, f64);
    type IntoIter = std::collections::btree_map::IntoIter<IndicatorCode, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Ordered `(code, value)` sequence as persisted and served.
///
/// Serializes as a JSON object whose keys keep the sequence order. Only
/// [`crate::CanonicalOrder::order`] produces one from an [`ImpactVector`];
/// deserializing keeps the order found in the document.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CanonicalVector {
    entries: Vec<(IndicatorCode, f64)>,
}

impl CanonicalVector {
    pub(crate) fn from_entries(entries: Vec<(IndicatorCode, f64)>) -> Self {
        Self { entries }
    }

    pub fn get(&self, code: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(candidate, _)| candidate.as_str() == code)
            .map(|(_, value)| *value)
    }

    pub fn aggregate(&self, scheme: Scheme) -> Option<f64> {
        self.get(scheme.code())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn codes(&self) -> impl Iterator<Item = &IndicatorCode> {
        self.entries.iter().map(|(code, _)| code)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&IndicatorCode, f64)> {
        self.entries.iter().map(|(code, value)| (code, *value))
    }

    /// Same keys in the same order, each value replaced by `f(code, value)`.
    pub fn map_values<F>(&self, mut f: F) -> CanonicalVector
    where
        F: FnMut(&IndicatorCode, f64) -> f64,
    {
        let entries = self
            .entries
            .iter()
            .map(|(code, value)| (code.clone(), f(code, *value)))
            .collect();
        CanonicalVector { entries }
    }

    pub fn into_vector(self) -> ImpactVector {
        self.entries.into_iter().collect()
    }
}

impl Serialize for CanonicalVector {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (code, value) in &self.entries {
            map.serialize_entry(code, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for CanonicalVector {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = CanonicalVector;

            fn expecting(&self, f: &mut Formatter<'_>) -> fmt::Result {
                f.write_str("a map of indicator codes to numbers")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut entries: Vec<(IndicatorCode, f64)> =
                    Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((code, value)) = access.next_entry::<IndicatorCode, f64>()? {
                    if entries.iter().any(|(seen, _)| *seen == code) {
                        return Err(de::Error::custom(format!("duplicate indicator {code}")));
                    }
                    entries.push((code, value));
                }
                Ok(CanonicalVector { entries })
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}
