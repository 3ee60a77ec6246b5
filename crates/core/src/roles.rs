//! Well-known role name constants.
//!
//! These must match the CHECK constraint on `users.role` in
//! `20260301000001_create_users.sql` and the `role` claim issued by the
//! identity provider.

/// Superuser-equivalent role: may lock, verify, resolve disputes and bypass
/// locks.
pub const ROLE_ADMIN: &str = "admin";

/// Ordinary authenticated contributor.
pub const ROLE_EDITOR: &str = "editor";

/// All valid role names.
pub const VALID_ROLES: &[&str] = &[ROLE_ADMIN, ROLE_EDITOR];

/// Whether a role name carries the elevated (superuser-equivalent) capability.
pub fn is_elevated_role(role: &str) -> bool {
    role == ROLE_ADMIN
}
