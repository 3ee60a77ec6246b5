pub mod audit;
pub mod dashboard;
pub mod disputes;
pub mod entries;
pub mod health;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /entries                                   list, create
/// /entries/search                            search (?q=)
/// /entries/random                            random entry
/// /entries/{title}                           view, edit, delete
/// /entries/{title}/revisions                 revision history
/// /entries/{title}/rollback/{revision_id}    rollback (POST)
/// /entries/{title}/lock                      toggle lock (POST, admin)
/// /entries/{title}/verify                    verification status (POST, admin)
/// /entries/{title}/disputes                  report dispute (POST)
///
/// /disputes                                  dispute queue (admin)
/// /disputes/{id}/resolve                     resolve dispute (POST, admin)
///
/// /audit-logs                                audit log listing (admin)
/// /dashboard                                 dashboard
/// /preview                                   markdown preview (?text=)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/entries", entries::router())
        .nest("/disputes", disputes::router())
        .nest("/audit-logs", audit::router())
        .nest("/dashboard", dashboard::router())
        .route("/preview", get(handlers::preview::preview_markdown))
}
