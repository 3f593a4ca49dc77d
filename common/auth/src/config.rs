use std::collections::HashSet;

/// Runtime configuration for token verification. Built once at process
/// start and shared by reference; never read from the environment mid-request.
#[derive(Debug, Clone)]
pub struct VerifierConfig {
    /// Symmetric secret for HS256 signature verification.
    pub signing_secret: String,
    /// Acceptable `iss` values. Empty means no issuer restriction.
    pub allowed_issuers: HashSet<String>,
    /// Allowable clock skew in seconds when validating exp.
    pub leeway_seconds: u32,
}

impl VerifierConfig {
    pub fn new(signing_secret: impl Into<String>) -> Self {
        Self {
            signing_secret: signing_secret.into(),
            allowed_issuers: HashSet::new(),
            leeway_seconds: 0,
        }
    }

    pub fn with_issuers<I, S>(mut self, issuers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_issuers = issuers.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_leeway(mut self, seconds: u32) -> Self {
        self.leeway_seconds = seconds;
        self
    }

    /// An empty allowlist places no restriction on the issuer.
    pub fn issuer_allowed(&self, issuer: &str) -> bool {
        self.allowed_issuers.is_empty() || self.allowed_issuers.contains(issuer)
    }
}
