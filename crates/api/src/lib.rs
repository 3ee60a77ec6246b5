//! Folio API server library.
//!
//! Exposes the building blocks (config, state, error handling, moderation
//! workflow, routes) so integration tests, the server binary and the import
//! CLI can all reach them.

pub mod auth;
pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod import;
pub mod middleware;
pub mod query;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
pub mod workflow;
