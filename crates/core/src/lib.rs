//! Folio domain core.
//!
//! Pure domain logic with no I/O: identity, moderation rules, validation,
//! audit vocabulary and markdown rendering. Shared by the repository layer,
//! the HTTP API and the import tool.

pub mod actor;
pub mod audit;
pub mod entry;
pub mod error;
pub mod moderation;
pub mod render;
pub mod roles;
pub mod search;
pub mod types;
