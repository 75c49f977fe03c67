use ecoseed_impacts_exposure::mock::InMemoryEnv;
use ecoseed_impacts_exposure::CallerContext;
use ecoseed_impacts_models::{CanonicalOrder, ImpactVector, ProcessId};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let env = InMemoryEnv::default();
    env.issue_token("demo", "demo-secret", Some(60_000));
    let policy = env.policy()?;

    let stored: ImpactVector = [
        ("cch", 1.0),
        ("etf", 0.6),
        ("pef", 1_150_000.0),
        ("ecs", 1_000_000.0),
    ]
    .into_iter()
    .collect();
    let stored = CanonicalOrder::default().order(stored)?;
    let process = ProcessId::new("demo-process");

    for caller in [
        CallerContext::anonymous(),
        CallerContext::anonymous().with_preview(),
        CallerContext::bearer("demo-secret"),
    ] {
        let disclosure = policy.disclose(&process, &stored, &caller);
        println!("{:?}: {}", disclosure.caller, serde_json::to_string(&disclosure.impacts)?);
    }
    Ok(())
}
