//! Bearer token validation.
//!
//! Folio does not issue credentials itself: an external identity provider
//! signs HS256 access tokens with the shared `JWT_SECRET`, and [`jwt`]
//! validates them. Token minting is kept for tests and local tooling.

pub mod jwt;
