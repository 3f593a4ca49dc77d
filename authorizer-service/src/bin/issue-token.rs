use std::env;

use anyhow::Result;
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde_json::json;

// Default matches local development config; real deployments always set the
// secret explicitly.
const DEV_SECRET: &str = "your-super-secret-key-change-in-production-min-32-chars";

/// Mints a development token for exercising the authorizer locally, signed
/// with AUTH_SIGNING_SECRET (or the dev default). Prints the value ready to
/// paste into an Authorization header.
fn main() -> Result<()> {
    let secret = env::var("AUTH_SIGNING_SECRET").unwrap_or_else(|_| DEV_SECRET.to_string());
    let issuer = env::var("AUTH_TOKEN_ISSUER").unwrap_or_else(|_| "test-issuer".to_string());
    let role = env::var("AUTH_TOKEN_ROLE").unwrap_or_else(|_| "admin".to_string());
    let email = env::var("AUTH_TOKEN_EMAIL").unwrap_or_else(|_| "admin@example.com".to_string());

    let now = Utc::now();
    let claims = json!({
        "sub": "test-user-id",
        "email": &email,
        "role": &role,
        "iss": issuer,
        "iat": now.timestamp(),
        "exp": (now + Duration::hours(24)).timestamp(),
        "user": {"id": "test-user-id", "email": &email, "role": &role}
    });

    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;

    println!("Bearer {token}");
    Ok(())
}
