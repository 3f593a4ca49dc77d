use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{AuthError, AuthResult};
use crate::roles::DEFAULT_ROLE;

/// Application-focused representation of verified token claims.
#[derive(Debug, Clone, Serialize)]
pub struct Claims {
    pub issuer: Option<String>,
    pub subject: Option<String>,
    pub expires_at: DateTime<Utc>,
    pub issued_at: DateTime<Utc>,
    pub context: AuthContext,
}

/// The context handed to downstream handlers. Serialized with the exact
/// field names both gateway protocols expect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthContext {
    pub user_id: String,
    pub email: String,
    pub role: String,
}

impl AuthContext {
    pub fn is_admin(&self) -> bool {
        self.role == crate::roles::ROLE_ADMIN
    }
}

#[derive(Debug, Deserialize)]
struct ClaimsRepr {
    #[serde(default)]
    iss: Option<String>,
    #[serde(default)]
    sub: Option<String>,
    exp: i64,
    #[serde(default)]
    iat: Option<i64>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    role: Option<String>,
    #[serde(default)]
    user: Option<UserRepr>,
}

#[derive(Debug, Default, Deserialize)]
struct UserRepr {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    role: Option<String>,
}

impl TryFrom<ClaimsRepr> for Claims {
    type Error = AuthError;

    fn try_from(value: ClaimsRepr) -> AuthResult<Self> {
        // exp presence is enforced by the verifier; iat is enforced here.
        let iat = value
            .iat
            .ok_or_else(|| AuthError::MissingRequiredClaims("iat".to_string()))?;

        let expires_at = timestamp("exp", value.exp)?;
        let issued_at = timestamp("iat", iat)?;

        let user = value.user.unwrap_or_default();

        // Canonical fallback order: embedded user object first, then the
        // top-level claim, then the default.
        let user_id = user
            .id
            .or(value.sub.clone())
            .unwrap_or_else(|| "unknown".to_string());
        let email = user.email.or(value.email).unwrap_or_default();
        let role = user
            .role
            .or(value.role)
            .unwrap_or_else(|| DEFAULT_ROLE.to_string());

        Ok(Self {
            issuer: value.iss,
            subject: value.sub,
            expires_at,
            issued_at,
            context: AuthContext {
                user_id,
                email,
                role,
            },
        })
    }
}

impl TryFrom<serde_json::Value> for Claims {
    type Error = AuthError;

    fn try_from(value: serde_json::Value) -> AuthResult<Self> {
        let repr: ClaimsRepr = serde_json::from_value(value)
            .map_err(|err| AuthError::MalformedToken(err.to_string()))?;
        Claims::try_from(repr)
    }
}

fn timestamp(claim: &'static str, seconds: i64) -> AuthResult<DateTime<Utc>> {
    Utc.timestamp_opt(seconds, 0)
        .single()
        .ok_or_else(|| AuthError::MalformedToken(format!("claim '{claim}' is out of range")))
}
