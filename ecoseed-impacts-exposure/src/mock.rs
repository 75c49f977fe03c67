use std::sync::Arc;

use time::OffsetDateTime;

use crate::{
    config::ExposureConfig,
    errors::Result,
    policy::ExposurePolicy,
    store::InMemoryTokenStore,
    token::ApiToken,
    types::SessionInfo,
};

pub struct InMemoryEnv {
    pub tokens: Arc<InMemoryTokenStore>,
    pub config: ExposureConfig,
    clock: Arc<dyn Fn() -> i64 + Send + Sync>,
}

impl Default for InMemoryEnv {
    fn default() -> Self {
        Self {
            tokens: Arc::new(InMemoryTokenStore::default()),
            config: ExposureConfig::default(),
            clock: Arc::new(|| OffsetDateTime::now_utc().unix_timestamp() * 1000),
        }
    }
}

impl InMemoryEnv {
    pub fn policy(&self) -> Result<ExposurePolicy> {
        Ok(ExposurePolicy::new(self.tokens.clone(), self.config.clone())?
            .with_clock(self.clock.clone()))
    }

    pub fn set_fixed_time(&mut self, time_ms: i64) {
        self.clock = Arc::new(move || time_ms);
    }

    pub fn now_ms(&self) -> i64 {
        (self.clock)()
    }

    /// Issues a token at the current env time and registers it.
    pub fn issue_token(&self, token_id: &str, secret: &str, ttl_ms: Option<i64>) -> ApiToken {
        let token = ApiToken::issue(token_id, "tester", secret, self.now_ms(), ttl_ms);
        self.tokens.insert(token.clone());
        token
    }

    pub fn session(&self, user_id: &str, ttl_ms: i64) -> SessionInfo {
        SessionInfo {
            user_id: user_id.into(),
            authenticated: true,
            expires_at_ms: self.now_ms().saturating_add(ttl_ms),
        }
    }
}
