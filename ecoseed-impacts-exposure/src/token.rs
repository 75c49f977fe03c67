use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// API token record; only the SHA-256 digest of the secret is kept.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiToken {
    pub token_id: String,
    pub owner: String,
    pub secret_sha256: String,
    pub issued_at_ms: i64,
    #[serde(default)]
    pub ttl_ms: Option<i64>,
    #[serde(default)]
    pub revoked: bool,
}

impl ApiToken {
    pub fn issue(
        token_id: impl Into<String>,
        owner: impl Into<String>,
        secret: &str,
        issued_at_ms: i64,
        ttl_ms: Option<i64>,
    ) -> Self {
        Self {
            token_id: token_id.into(),
            owner: owner.into(),
            secret_sha256: hash_secret(secret),
            issued_at_ms,
            ttl_ms,
            revoked: false,
        }
    }

    pub fn is_valid(&self, now_ms: i64) -> bool {
        if self.revoked {
            return false;
        }
        if now_ms < self.issued_at_ms {
            return false;
        }
        match self.ttl_ms {
            Some(ttl) => now_ms <= self.issued_at_ms.saturating_add(ttl),
            None => true,
        }
    }
}

pub fn hash_secret(secret: &str) -> String {
    format!("sha256:{}", hex::encode(Sha256::digest(secret.as_bytes())))
}
