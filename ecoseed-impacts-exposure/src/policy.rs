use std::sync::Arc;

use ecoseed_impacts_models::{CanonicalVector, ProcessId};

use crate::{
    config::ExposureConfig,
    errors::Result,
    preview::PreviewGenerator,
    store::TokenStore,
    token::hash_secret,
    types::{CallerContext, CallerKind, Credentials, Disclosure, DisclosureLevel},
};

/// Decides, per request, how much of a stored canonical vector a caller sees.
///
/// Stateless apart from read-only collaborators: nothing is cached between
/// calls and the stored vector is never mutated. Bad credentials never fail
/// the read; they fall back to the anonymous path.
pub struct ExposurePolicy {
    tokens: Arc<dyn TokenStore>,
    config: ExposureConfig,
    preview: PreviewGenerator,
    clock: Arc<dyn Fn() -> i64 + Send + Sync>,
}

impl ExposurePolicy {
    /// Rejects an invalid config up front so that `disclose` never fails.
    pub fn new(tokens: Arc<dyn TokenStore>, config: ExposureConfig) -> Result<Self> {
        config.validate()?;
        let preview = PreviewGenerator::new(&config.preview_seed, config.preview_scale)?;
        Ok(Self {
            tokens,
            config,
            preview,
            clock: Arc::new(|| time::OffsetDateTime::now_utc().unix_timestamp() * 1000),
        })
    }

    pub fn with_clock(mut self, clock: Arc<dyn Fn() -> i64 + Send + Sync>) -> Self {
        self.clock = clock;
        self
    }

    pub fn disclose(
        &self,
        process: &ProcessId,
        impacts: &CanonicalVector,
        caller: &CallerContext,
    ) -> Disclosure {
        let now_ms = (self.clock)();
        let mut reasoning = Vec::new();
        let kind = self.resolve(caller, now_ms, &mut reasoning);
        let level = kind.disclosure();
        let impacts = match level {
            DisclosureLevel::Full => impacts.clone(),
            DisclosureLevel::Redacted => redact(impacts),
            DisclosureLevel::Preview => self.preview.fake(process, impacts),
        };
        tracing::debug!(%process, ?kind, ?level, "impacts disclosed");
        Disclosure {
            level,
            caller: kind,
            reasoning,
            impacts,
        }
    }

    fn resolve(
        &self,
        caller: &CallerContext,
        now_ms: i64,
        reasoning: &mut Vec<String>,
    ) -> CallerKind {
        let authenticated = match &caller.credentials {
            Credentials::None => {
                reasoning.push("no_credentials".into());
                None
            }
            Credentials::Bearer(secret) => match self.tokens.token_for(&hash_secret(secret)) {
                Some(token) if token.is_valid(now_ms) => {
                    reasoning.push(format!("bearer_token_valid:{}", token.token_id));
                    Some(CallerKind::Token)
                }
                Some(token) => {
                    tracing::warn!(token_id = %token.token_id, "expired or revoked bearer token");
                    reasoning.push(format!("bearer_token_invalid:{}", token.token_id));
                    None
                }
                None => {
                    tracing::warn!("unknown bearer token");
                    reasoning.push("bearer_token_unknown".into());
                    None
                }
            },
            Credentials::Session(session) if session.is_valid(now_ms) => {
                reasoning.push(format!("session_valid:{}", session.user_id));
                Some(CallerKind::Session)
            }
            Credentials::Session(session) => {
                tracing::warn!(user_id = %session.user_id, "unauthenticated or expired session");
                reasoning.push(format!("session_invalid:{}", session.user_id));
                None
            }
        };
        if let Some(kind) = authenticated {
            return kind;
        }
        if caller.preview {
            if self.config.preview_enabled {
                reasoning.push("preview_requested".into());
                return CallerKind::Preview;
            }
            reasoning.push("preview_disabled".into());
        }
        CallerKind::Anonymous
    }
}

/// Zeroes every elementary value; aggregate scores pass through untouched.
pub fn redact(impacts: &CanonicalVector) -> CanonicalVector {
    impacts.map_values(|code, value| if code.is_aggregate() { value } else { 0.0 })
}
