use thiserror::Error;

use crate::claims::AuthContext;
use crate::roles::ROLE_ADMIN;

#[derive(Debug, Clone, Error)]
pub enum GuardError {
    #[error("insufficient role, required one of: {}", .required.join(", "))]
    Forbidden { required: Vec<String> },
}

/// Downstream handlers trust the context unconditionally; this is the single
/// place where the admin requirement for mutating operations is expressed.
pub fn ensure_admin(context: &AuthContext) -> Result<(), GuardError> {
    ensure_role(context, &[ROLE_ADMIN])
}

pub fn ensure_role(context: &AuthContext, allowed: &[&str]) -> Result<(), GuardError> {
    if allowed.is_empty() {
        return Ok(());
    }

    if allowed.iter().any(|required| context.role == *required) {
        Ok(())
    } else {
        Err(GuardError::Forbidden {
            required: allowed.iter().map(|value| value.to_string()).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context(role: &str) -> AuthContext {
        AuthContext {
            user_id: "u1".to_string(),
            email: "a@b.com".to_string(),
            role: role.to_string(),
        }
    }

    #[test]
    fn admin_passes_admin_guard() {
        ensure_admin(&context("admin")).expect("admin allowed");
    }

    #[test]
    fn ordinary_user_is_forbidden() {
        let err = ensure_admin(&context("user")).expect_err("should reject");
        assert!(matches!(err, GuardError::Forbidden { .. }));
    }

    #[test]
    fn unknown_role_is_ordinary_privilege() {
        assert!(ensure_admin(&context("auditor")).is_err());
    }

    #[test]
    fn empty_allowed_list_means_no_restriction() {
        ensure_role(&context("user"), &[]).expect("unrestricted");
    }
}
