use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde_json::Value;
use tracing::{debug, warn};

use crate::claims::Claims;
use crate::config::VerifierConfig;
use crate::error::{AuthError, AuthResult};

/// Validates bearer tokens against a process-lifetime configuration.
/// Holds no mutable state, so a single instance is safe to share across
/// concurrent invocations.
#[derive(Clone)]
pub struct TokenVerifier {
    config: VerifierConfig,
}

impl TokenVerifier {
    pub fn new(config: VerifierConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &VerifierConfig {
        &self.config
    }

    /// Full validation: issuer pre-check, then verified decode. Claims are
    /// only trusted once the signature check in the second step succeeds.
    pub fn verify(&self, token: &str) -> AuthResult<Claims> {
        if let Some(issuer) = self.peek_issuer(token)? {
            if !issuer.is_empty() && !self.config.issuer_allowed(&issuer) {
                warn!(%issuer, "token issuer not in allowlist");
                return Err(AuthError::IssuerNotAllowed(issuer));
            }
        }

        let key = DecodingKey::from_secret(self.config.signing_secret.as_bytes());
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_required_spec_claims(&["exp"]);
        validation.validate_aud = false;
        validation.leeway = self.config.leeway_seconds.into();

        let token_data = decode::<Value>(token, &key, &validation)?;
        let claims = Claims::try_from(token_data.claims)?;
        debug!(user_id = %claims.context.user_id, "token verified");
        Ok(claims)
    }

    /// Reads `iss` without verifying the signature, so a bad issuer can be
    /// rejected and logged before any cryptography runs. Trust in the rest
    /// of the claims still requires the verified decode.
    fn peek_issuer(&self, token: &str) -> AuthResult<Option<String>> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.insecure_disable_signature_validation();
        validation.set_required_spec_claims::<&str>(&[]);
        validation.validate_exp = false;
        validation.validate_aud = false;

        let token_data = decode::<Value>(token, &DecodingKey::from_secret(&[]), &validation)
            .map_err(|err| AuthError::MalformedToken(err.to_string()))?;

        Ok(token_data
            .claims
            .get("iss")
            .and_then(Value::as_str)
            .map(str::to_owned))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use serde_json::json;

    const SECRET: &str = "unit-test-signing-secret";

    fn sign(claims: &Value, secret: &str) -> String {
        encode(
            &Header::new(Algorithm::HS256),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .expect("sign token")
    }

    fn verifier_with_issuers(issuers: &[&str]) -> TokenVerifier {
        TokenVerifier::new(VerifierConfig::new(SECRET).with_issuers(issuers.iter().copied()))
    }

    fn standard_claims() -> Value {
        let now = Utc::now().timestamp();
        json!({
            "iss": "test-issuer",
            "exp": now + 3600,
            "iat": now,
            "user": {"id": "u1", "email": "a@b.com", "role": "admin"}
        })
    }

    #[test]
    fn accepts_valid_token_and_yields_context() {
        let verifier = verifier_with_issuers(&["test-issuer"]);
        let token = sign(&standard_claims(), SECRET);

        let claims = verifier.verify(&token).expect("verification succeeds");
        assert_eq!(claims.issuer.as_deref(), Some("test-issuer"));
        assert_eq!(claims.context.user_id, "u1");
        assert_eq!(claims.context.email, "a@b.com");
        assert_eq!(claims.context.role, "admin");
    }

    #[test]
    fn verification_is_idempotent() {
        let verifier = verifier_with_issuers(&["test-issuer"]);
        let token = sign(&standard_claims(), SECRET);

        let first = verifier.verify(&token).expect("first pass");
        let second = verifier.verify(&token).expect("second pass");
        assert_eq!(first.context, second.context);
        assert_eq!(first.expires_at, second.expires_at);
    }

    #[test]
    fn rejects_wrong_secret() {
        let verifier = verifier_with_issuers(&["test-issuer"]);
        let token = sign(&standard_claims(), "a-different-secret");

        let err = verifier.verify(&token).expect_err("should reject");
        assert!(matches!(err, AuthError::SignatureInvalid), "{err:?}");
    }

    #[test]
    fn rejects_expired_token_with_valid_signature() {
        let verifier = verifier_with_issuers(&["test-issuer"]);
        let now = Utc::now().timestamp();
        let token = sign(
            &json!({"iss": "test-issuer", "exp": now - 600, "iat": now - 7200, "sub": "u1"}),
            SECRET,
        );

        let err = verifier.verify(&token).expect_err("should reject");
        assert!(matches!(err, AuthError::TokenExpired), "{err:?}");
    }

    #[test]
    fn rejects_missing_exp() {
        let verifier = verifier_with_issuers(&["test-issuer"]);
        let now = Utc::now().timestamp();
        let token = sign(&json!({"iss": "test-issuer", "iat": now, "sub": "u1"}), SECRET);

        let err = verifier.verify(&token).expect_err("should reject");
        assert!(matches!(err, AuthError::MissingRequiredClaims(_)), "{err:?}");
    }

    #[test]
    fn rejects_missing_iat_despite_valid_signature() {
        let verifier = verifier_with_issuers(&["test-issuer"]);
        let now = Utc::now().timestamp();
        let token = sign(
            &json!({"iss": "test-issuer", "exp": now + 3600, "sub": "u1"}),
            SECRET,
        );

        let err = verifier.verify(&token).expect_err("should reject");
        match err {
            AuthError::MissingRequiredClaims(claim) => assert_eq!(claim, "iat"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn disallowed_issuer_is_rejected_before_signature_check() {
        let verifier = verifier_with_issuers(&["test-issuer"]);
        let now = Utc::now().timestamp();
        // Signed with the wrong secret on purpose: the issuer pre-check must
        // fire before the signature is ever verified.
        let token = sign(
            &json!({"iss": "rogue-issuer", "exp": now + 3600, "iat": now}),
            "a-different-secret",
        );

        let err = verifier.verify(&token).expect_err("should reject");
        match err {
            AuthError::IssuerNotAllowed(issuer) => assert_eq!(issuer, "rogue-issuer"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn empty_allowlist_accepts_any_issuer() {
        let verifier = TokenVerifier::new(VerifierConfig::new(SECRET));
        let now = Utc::now().timestamp();
        let token = sign(
            &json!({"iss": "whoever", "exp": now + 3600, "iat": now, "sub": "u1"}),
            SECRET,
        );

        verifier.verify(&token).expect("verification succeeds");
    }

    #[test]
    fn absent_issuer_passes_a_non_empty_allowlist() {
        let verifier = verifier_with_issuers(&["test-issuer"]);
        let now = Utc::now().timestamp();
        let token = sign(&json!({"exp": now + 3600, "iat": now, "sub": "u1"}), SECRET);

        verifier.verify(&token).expect("verification succeeds");
    }

    #[test]
    fn garbage_token_is_malformed() {
        let verifier = verifier_with_issuers(&["test-issuer"]);

        let err = verifier
            .verify("not.a.token")
            .expect_err("should reject");
        assert!(matches!(err, AuthError::MalformedToken(_)), "{err:?}");
    }

    #[test]
    fn leeway_tolerates_small_clock_skew() {
        let verifier = TokenVerifier::new(
            VerifierConfig::new(SECRET).with_leeway(120),
        );
        let now = Utc::now().timestamp();
        let token = sign(&json!({"exp": now - 30, "iat": now - 7200, "sub": "u1"}), SECRET);

        verifier.verify(&token).expect("within leeway");
    }
}
