//! One-shot authorization flow for a single gateway event: locate the token,
//! validate it, render the decision in the envelope the caller expects.

use common_auth::{AuthError, Claims, TokenVerifier};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::warn;

use crate::extract::extract_token;
use crate::response::{stage_resource_pattern, PolicyResponse, SimpleResponse};

/// Which gateway integration sent the event. REST events are recognized by
/// their legacy-only fields; everything else is treated as HTTP v2.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Envelope {
    HttpV2,
    Rest,
}

pub fn detect_envelope(event: &Value) -> Envelope {
    if event.get("methodArn").is_some() || event.get("authorizationToken").is_some() {
        Envelope::Rest
    } else {
        Envelope::HttpV2
    }
}

/// Format-agnostic outcome of one invocation.
#[derive(Debug)]
pub enum Decision {
    Authorized(Claims),
    Denied(AuthError),
}

/// The legacy protocol has no "unauthorized" success value; denial is
/// communicated as a failed invocation, which the gateway host translates
/// into an HTTP 401/403. The internal reason is logged, never surfaced.
#[derive(Debug, Error)]
#[error("Unauthorized")]
pub struct Unauthorized;

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum AuthorizerResponse {
    Simple(SimpleResponse),
    Policy(PolicyResponse),
}

/// Runs extraction and validation for one event. Denial reasons stay
/// internal; callers render them through a response strategy.
pub fn authorize(verifier: &TokenVerifier, event: &Value) -> Decision {
    let token = match extract_token(event) {
        Some(token) => token,
        None => {
            warn!("no bearer token in event");
            return Decision::Denied(AuthError::MissingToken);
        }
    };

    match verifier.verify(&token) {
        Ok(claims) => Decision::Authorized(claims),
        Err(reason) => {
            warn!(%reason, "token validation failed");
            Decision::Denied(reason)
        }
    }
}

/// Full flow: detect the envelope, decide, render. Only the REST branch
/// translates a denial into the thrown-failure wire contract.
pub fn handle(verifier: &TokenVerifier, event: &Value) -> Result<AuthorizerResponse, Unauthorized> {
    match detect_envelope(event) {
        Envelope::HttpV2 => match authorize(verifier, event) {
            Decision::Authorized(claims) => {
                Ok(AuthorizerResponse::Simple(SimpleResponse::allow(claims.context)))
            }
            Decision::Denied(_) => Ok(AuthorizerResponse::Simple(SimpleResponse::deny())),
        },
        Envelope::Rest => match authorize(verifier, event) {
            Decision::Authorized(claims) => {
                let method_arn = event
                    .get("methodArn")
                    .and_then(Value::as_str)
                    .unwrap_or_default();
                match stage_resource_pattern(method_arn) {
                    Some(resource) => Ok(AuthorizerResponse::Policy(PolicyResponse::allow(
                        claims.context,
                        resource,
                    ))),
                    None => {
                        warn!(method_arn, "could not derive resource pattern");
                        Err(Unauthorized)
                    }
                }
            }
            Decision::Denied(_) => Err(Unauthorized),
        },
    }
}
