use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug, Formatter};

use ecoseed_impacts_models::CanonicalVector;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionInfo {
    pub user_id: String,
    pub authenticated: bool,
    pub expires_at_ms: i64,
}

impl SessionInfo {
    pub fn is_valid(&self, now_ms: i64) -> bool {
        self.authenticated && now_ms < self.expires_at_ms
    }
}

#[derive(Clone, Default, PartialEq, Eq)]
pub enum Credentials {
    #[default]
    None,
    Bearer(String),
    Session(SessionInfo),
}

impl Debug for Credentials {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Credentials::None => f.write_str("None"),
            Credentials::Bearer(_) => f.write_str("Bearer(<redacted>)"),
            Credentials::Session(session) => f.debug_tuple("Session").field(session).finish(),
        }
    }
}

/// Request-scoped caller identity, built by the read API for each call.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CallerContext {
    pub credentials: Credentials,
    pub preview: bool,
}

impl CallerContext {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn bearer(token: impl Into<String>) -> Self {
        Self {
            credentials: Credentials::Bearer(token.into()),
            preview: false,
        }
    }

    pub fn session(session: SessionInfo) -> Self {
        Self {
            credentials: Credentials::Session(session),
            preview: false,
        }
    }

    pub fn with_preview(mut self) -> Self {
        self.preview = true;
        self
    }
}

/// Who the caller turned out to be once credentials were checked.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum CallerKind {
    Token,
    Session,
    Anonymous,
    Preview,
}

impl CallerKind {
    pub fn disclosure(&self) -> DisclosureLevel {
        match self {
            CallerKind::Token | CallerKind::Session => DisclosureLevel::Full,
            CallerKind::Anonymous => DisclosureLevel::Redacted,
            CallerKind::Preview => DisclosureLevel::Preview,
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum DisclosureLevel {
    Full,
    Redacted,
    Preview,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Disclosure {
    pub level: DisclosureLevel,
    pub caller: CallerKind,
    pub reasoning: Vec<String>,
    pub impacts: CanonicalVector,
}
