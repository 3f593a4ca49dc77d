use thiserror::Error;

pub type AuthResult<T> = Result<T, AuthError>;

/// Every way an inbound request can fail authorization. The variants are
/// recorded for diagnostics only; callers collapse them into a single
/// generic denial before anything reaches the wire.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("no bearer token in request")]
    MissingToken,
    #[error("token could not be decoded: {0}")]
    MalformedToken(String),
    #[error("token issuer '{0}' is not in the allowlist")]
    IssuerNotAllowed(String),
    #[error("token signature does not match the configured secret")]
    SignatureInvalid,
    #[error("token has expired")]
    TokenExpired,
    #[error("token is missing required claim '{0}'")]
    MissingRequiredClaims(String),
}

impl From<jsonwebtoken::errors::Error> for AuthError {
    fn from(value: jsonwebtoken::errors::Error) -> Self {
        use jsonwebtoken::errors::ErrorKind;

        match value.kind() {
            ErrorKind::ExpiredSignature => Self::TokenExpired,
            ErrorKind::InvalidSignature => Self::SignatureInvalid,
            ErrorKind::MissingRequiredClaim(claim) => Self::MissingRequiredClaims(claim.clone()),
            _ => Self::MalformedToken(value.to_string()),
        }
    }
}
