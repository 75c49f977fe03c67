use std::sync::Arc;

use ecoseed_impacts_engine::ImpactsEngine;
use ecoseed_impacts_exposure::mock::InMemoryEnv;
use ecoseed_impacts_exposure::*;
use ecoseed_impacts_models::{
    CanonicalOrder, CanonicalVector, ImpactVector, ProcessId, ReferenceData, Scheme,
};
use serde_json::json;

const NOW_MS: i64 = 1_700_000_000_000;

fn env() -> InMemoryEnv {
    let mut env = InMemoryEnv::default();
    env.set_fixed_time(NOW_MS);
    env
}

fn canonical(entries: &[(&str, f64)]) -> CanonicalVector {
    let vector: ImpactVector = entries.iter().map(|(code, value)| (*code, *value)).collect();
    CanonicalOrder::default().order(vector).unwrap()
}

fn stored() -> CanonicalVector {
    canonical(&[
        ("etf", 0.6),
        ("cch", 1.0),
        ("pef", 1_150_000.0),
        ("ecs", 1_000_000.0),
    ])
}

fn process() -> ProcessId {
    ProcessId::new("cotton-fiber")
}

fn assert_redacted(disclosed: &CanonicalVector, original: &CanonicalVector) {
    assert_eq!(
        disclosed.codes().collect::<Vec<_>>(),
        original.codes().collect::<Vec<_>>()
    );
    for (code, value) in disclosed.iter() {
        if code.is_aggregate() {
            assert_eq!(value.to_bits(), original.get(code.as_str()).unwrap().to_bits());
        } else {
            assert_eq!(value, 0.0, "{code} leaked");
        }
    }
}

#[test]
fn anonymous_callers_only_see_aggregates() {
    let env = env();
    let disclosure = env
        .policy()
        .unwrap()
        .disclose(&process(), &stored(), &CallerContext::anonymous());
    assert_eq!(disclosure.level, DisclosureLevel::Redacted);
    assert_eq!(disclosure.caller, CallerKind::Anonymous);
    assert_eq!(
        disclosure.impacts,
        canonical(&[
            ("etf", 0.0),
            ("cch", 0.0),
            ("pef", 1_150_000.0),
            ("ecs", 1_000_000.0),
        ])
    );
    assert_eq!(disclosure.reasoning, vec!["no_credentials".to_string()]);
}

#[test]
fn valid_bearer_token_gets_the_full_vector() {
    let env = env();
    env.issue_token("tok-1", "s3cret", Some(60_000));
    let disclosure = env
        .policy()
        .unwrap()
        .disclose(&process(), &stored(), &CallerContext::bearer("s3cret"));
    assert_eq!(disclosure.level, DisclosureLevel::Full);
    assert_eq!(disclosure.caller, CallerKind::Token);
    assert_eq!(disclosure.impacts, stored());
    assert_eq!(disclosure.reasoning, vec!["bearer_token_valid:tok-1".to_string()]);
}

#[test]
fn authenticated_session_gets_the_full_vector() {
    let env = env();
    let session = env.session("user-7", 3_600_000);
    let disclosure = env
        .policy()
        .unwrap()
        .disclose(&process(), &stored(), &CallerContext::session(session));
    assert_eq!(disclosure.level, DisclosureLevel::Full);
    assert_eq!(disclosure.caller, CallerKind::Session);
    assert_eq!(disclosure.impacts, stored());
}

#[test]
fn expired_token_falls_back_to_redaction() {
    let mut env = env();
    env.issue_token("tok-old", "old", Some(1_000));
    env.set_fixed_time(NOW_MS + 5_000);
    let disclosure = env
        .policy()
        .unwrap()
        .disclose(&process(), &stored(), &CallerContext::bearer("old"));
    assert_eq!(disclosure.level, DisclosureLevel::Redacted);
    assert!(disclosure
        .reasoning
        .contains(&"bearer_token_invalid:tok-old".to_string()));
    assert_redacted(&disclosure.impacts, &stored());
}

#[test]
fn revoked_and_unknown_tokens_fall_back_to_redaction() {
    let env = env();
    env.issue_token("tok-2", "revoke-me", None);
    assert!(env.tokens.revoke("tok-2"));
    assert!(!env.tokens.revoke("tok-none"));
    let policy = env.policy().unwrap();

    let revoked = policy.disclose(&process(), &stored(), &CallerContext::bearer("revoke-me"));
    assert_eq!(revoked.caller, CallerKind::Anonymous);

    let unknown = policy.disclose(&process(), &stored(), &CallerContext::bearer("guess"));
    assert_eq!(unknown.caller, CallerKind::Anonymous);
    assert_eq!(unknown.reasoning, vec!["bearer_token_unknown".to_string()]);
    assert_redacted(&unknown.impacts, &stored());
}

#[test]
fn unauthenticated_or_expired_sessions_are_anonymous() {
    let env = env();
    let mut session = env.session("user-8", 1_000);
    session.authenticated = false;
    let unauthenticated = env
        .policy()
        .unwrap()
        .disclose(&process(), &stored(), &CallerContext::session(session));
    assert_eq!(unauthenticated.level, DisclosureLevel::Redacted);

    let expired = SessionInfo {
        user_id: "user-9".into(),
        authenticated: true,
        expires_at_ms: NOW_MS,
    };
    let disclosure = env
        .policy()
        .unwrap()
        .disclose(&process(), &stored(), &CallerContext::session(expired));
    assert_eq!(disclosure.level, DisclosureLevel::Redacted);
    assert!(disclosure
        .reasoning
        .contains(&"session_invalid:user-9".to_string()));
}

#[test]
fn preview_returns_synthetic_values_and_real_scores() {
    let env = env();
    let policy = env.policy().unwrap();
    let caller = CallerContext::anonymous().with_preview();
    let first = policy.disclose(&process(), &stored(), &caller);
    let second = policy.disclose(&process(), &stored(), &caller);

    assert_eq!(first.level, DisclosureLevel::Preview);
    assert_eq!(first.caller, CallerKind::Preview);
    assert_eq!(first.impacts, second.impacts);
    assert_eq!(first.impacts.aggregate(Scheme::Pef), Some(1_150_000.0));
    assert_eq!(first.impacts.aggregate(Scheme::Ecs), Some(1_000_000.0));
    for code in ["etf", "cch"] {
        let fake = first.impacts.get(code).unwrap();
        assert!(fake > 0.0 && fake <= 1.0, "{code} = {fake}");
        assert_ne!(Some(fake), stored().get(code));
    }

    let other = policy.disclose(&ProcessId::new("wool"), &stored(), &caller);
    assert_ne!(other.impacts, first.impacts);
}

#[test]
fn preview_can_be_disabled() {
    let mut env = env();
    env.config.preview_enabled = false;
    let disclosure = env.policy().unwrap().disclose(
        &process(),
        &stored(),
        &CallerContext::anonymous().with_preview(),
    );
    assert_eq!(disclosure.level, DisclosureLevel::Redacted);
    assert!(disclosure.reasoning.contains(&"preview_disabled".to_string()));
}

#[test]
fn credentials_win_over_the_preview_flag() {
    let env = env();
    env.issue_token("tok-3", "front", None);
    let disclosure = env.policy().unwrap().disclose(
        &process(),
        &stored(),
        &CallerContext::bearer("front").with_preview(),
    );
    assert_eq!(disclosure.level, DisclosureLevel::Full);
    assert_eq!(disclosure.impacts, stored());
}

#[test]
fn callers_are_resolved_independently() {
    let env = env();
    env.issue_token("tok-4", "member", None);
    let policy = env.policy().unwrap();
    let original = stored();

    let anonymous = policy.disclose(&process(), &original, &CallerContext::anonymous());
    let member = policy.disclose(&process(), &original, &CallerContext::bearer("member"));
    let anonymous_again = policy.disclose(&process(), &original, &CallerContext::anonymous());

    assert_eq!(member.impacts, original);
    assert_eq!(anonymous.impacts, anonymous_again.impacts);
    assert_redacted(&anonymous.impacts, &original);
    assert_eq!(original, stored());
}

#[test]
fn redaction_holds_for_engine_output() {
    let reference = ReferenceData::from_json_value(json!({
        "version": "2024.1",
        "indicators": {
            "acd": {"pef": {"weighting": 0.062, "normalization": 55.6}},
            "cch": {
                "pef": {"weighting": 0.2106, "normalization": 7553.0},
                "ecs": {"weighting": 0.2106, "normalization": 7553.0}
            },
            "wtu": {"ecs": {"weighting": 0.0851, "normalization": 11500.0}}
        }
    }))
    .unwrap();
    let engine = ImpactsEngine::new(Arc::new(reference));
    let raw: ImpactVector = [("acd", 0.02), ("cch", 4.2), ("wtu", 0.9)]
        .into_iter()
        .collect();
    let computed = engine.compute(raw).unwrap();

    let disclosed = redact(&computed.impacts);
    assert_redacted(&disclosed, &computed.impacts);
}

#[test]
fn disclosure_serializes_in_canonical_order() {
    let env = env();
    let disclosure = env
        .policy()
        .unwrap()
        .disclose(&process(), &stored(), &CallerContext::anonymous());
    let value = serde_json::to_string(&disclosure.impacts).unwrap();
    assert_eq!(value, r#"{"cch":0.0,"etf":0.0,"ecs":1000000.0,"pef":1150000.0}"#);
    let level = serde_json::to_value(disclosure.level).unwrap();
    assert_eq!(level, json!("redacted"));
}

#[test]
fn credentials_never_print_bearer_secrets() {
    let caller = CallerContext::bearer("top-secret");
    assert!(!format!("{caller:?}").contains("top-secret"));
    assert_eq!(
        hash_secret("top-secret"),
        ApiToken::issue("t", "o", "top-secret", 0, None).secret_sha256
    );
}

#[test]
fn invalid_preview_scale_is_rejected_before_any_disclosure() {
    for scale in [f64::NAN, -5.0, 0.0, f64::INFINITY] {
        let mut env = env();
        env.config.preview_scale = scale;
        match env.policy() {
            Err(ExposureError::InvalidPreviewScale(rejected)) => {
                assert_eq!(rejected.to_bits(), scale.to_bits());
            }
            Err(other) => panic!("unexpected error: {other}"),
            Ok(_) => panic!("scale {scale} accepted"),
        }
        assert!(PreviewGenerator::new("seed", scale).is_err());
    }
}

#[test]
fn exposure_config_is_validated_when_loaded() {
    let config = ExposureConfig::from_json_str(r#"{"preview_scale": 2.5}"#).unwrap();
    assert_eq!(config.preview_scale, 2.5);
    assert!(config.preview_enabled);

    let err = ExposureConfig::from_json_str(r#"{"preview_scale": -1.0}"#).unwrap_err();
    assert_eq!(err, ExposureError::InvalidPreviewScale(-1.0));

    let err = ExposureConfig::from_json_str(r#"{"preview_scale": "big"}"#).unwrap_err();
    assert!(matches!(err, ExposureError::Parse(_)));
}
