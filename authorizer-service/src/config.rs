use std::collections::HashSet;
use std::env;

use anyhow::{Context, Result};
use common_auth::VerifierConfig;

/// Builds the process-lifetime verifier configuration from the environment.
/// Called once at startup; the rest of the service only ever sees the
/// resulting immutable value.
pub fn load_verifier_config() -> Result<VerifierConfig> {
    let signing_secret =
        env::var("AUTH_SIGNING_SECRET").context("AUTH_SIGNING_SECRET must be set")?;

    let allowed_issuers = env::var("AUTH_ALLOWED_ISSUERS")
        .ok()
        .map(|raw| parse_issuers(&raw))
        .unwrap_or_default();

    let leeway_seconds = match env::var("AUTH_CLOCK_LEEWAY_SECONDS") {
        Ok(raw) => raw
            .trim()
            .parse::<u32>()
            .context("AUTH_CLOCK_LEEWAY_SECONDS must be a non-negative integer")?,
        Err(_) => 0,
    };

    Ok(VerifierConfig::new(signing_secret)
        .with_issuers(allowed_issuers)
        .with_leeway(leeway_seconds))
}

fn parse_issuers(raw: &str) -> HashSet<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|issuer| !issuer.is_empty())
        .map(str::to_owned)
        .collect()
}
