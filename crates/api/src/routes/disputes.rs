//! Route definitions for the dispute queue.
//!
//! Registered under `/disputes`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::disputes;
use crate::state::AppState;

/// ```text
/// GET    /                 list_disputes
/// POST   /{id}/resolve     resolve_dispute
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(disputes::list_disputes))
        .route("/{id}/resolve", post(disputes::resolve_dispute))
}
