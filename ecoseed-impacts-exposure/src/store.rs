use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use crate::token::ApiToken;

pub trait TokenStore: Send + Sync {
    fn token_for(&self, secret_sha256: &str) -> Option<ApiToken>;
}

#[derive(Default)]
pub struct InMemoryTokenStore {
    inner: RwLock<HashMap<String, ApiToken>>,
}

impl InMemoryTokenStore {
    pub fn insert(&self, token: ApiToken) {
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(token.secret_sha256.clone(), token);
    }

    /// Returns false when no token carries `token_id`.
    pub fn revoke(&self, token_id: &str) -> bool {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        let mut found = false;
        for token in guard.values_mut().filter(|token| token.token_id == token_id) {
            token.revoked = true;
            found = true;
        }
        found
    }
}

impl TokenStore for InMemoryTokenStore {
    fn token_for(&self, secret_sha256: &str) -> Option<ApiToken> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(secret_sha256)
            .cloned()
    }
}
