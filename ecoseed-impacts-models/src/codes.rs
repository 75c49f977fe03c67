use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt::{self, Display, Formatter};

/// Short identifier of one elementary indicator, sub-indicator or aggregate score.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct IndicatorCode(String);

impl IndicatorCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True for the reserved codes holding the two aggregate scores.
    pub fn is_aggregate(&self) -> bool {
        Scheme::from_code(&self.0).is_some()
    }
}

impl Borrow<str> for IndicatorCode {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for IndicatorCode {
    fn from(code: &str) -> Self {
        Self(code.to_string())
    }
}

impl From<String> for IndicatorCode {
    fn from(code: String) -> Self {
        Self(code)
    }
}

impl Display for IndicatorCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct ProcessId(pub String);

impl ProcessId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl Display for ProcessId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// The two independent aggregation schemes.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Scheme {
    /// Regulatory footprint score.
    Pef,
    /// Internal eco-score.
    Ecs,
}

impl Scheme {
    pub const ALL: [Scheme; 2] = [Scheme::Pef, Scheme::Ecs];

    pub fn code(&self) -> &'static str {
        match self {
            Scheme::Pef => "pef",
            Scheme::Ecs => "ecs",
        }
    }

    pub fn aggregate_code(&self) -> IndicatorCode {
        IndicatorCode::from(self.code())
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|scheme| scheme.code() == code)
    }
}

impl Display for Scheme {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
