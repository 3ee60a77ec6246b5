//! Request extractors for caller identity.
//!
//! - [`auth::AuthUser`]: bearer token required.
//! - [`auth::Actor`]: bearer token optional; anonymous otherwise.
//! - [`rbac::RequireModerator`]: bearer token with the elevated capability.

pub mod auth;
pub mod rbac;
