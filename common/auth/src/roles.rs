pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_USER: &str = "user";

/// Role assigned when a token carries no role claim at all.
pub const DEFAULT_ROLE: &str = ROLE_USER;
