use std::io::Read;

use anyhow::{Context, Result};
use authorizer_service::{config, dispatcher};
use common_auth::TokenVerifier;

/// Local invocation harness: reads one gateway event as JSON from stdin and
/// prints the rendered authorizer response. A legacy denial exits non-zero
/// with the bare `Unauthorized` message, matching the wire contract.
fn main() -> Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let verifier = TokenVerifier::new(config::load_verifier_config()?);

    let mut raw = String::new();
    std::io::stdin()
        .read_to_string(&mut raw)
        .context("failed to read event from stdin")?;
    let event: serde_json::Value =
        serde_json::from_str(&raw).context("event is not valid JSON")?;

    let response = dispatcher::handle(&verifier, &event)?;
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}
