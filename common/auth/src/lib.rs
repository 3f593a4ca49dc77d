pub mod claims;
pub mod config;
pub mod error;
pub mod guards;
pub mod roles;
pub mod verifier;

pub use claims::{AuthContext, Claims};
pub use config::VerifierConfig;
pub use error::{AuthError, AuthResult};
pub use guards::{ensure_admin, ensure_role, GuardError};
pub use roles::{DEFAULT_ROLE, ROLE_ADMIN, ROLE_USER};
pub use verifier::TokenVerifier;
