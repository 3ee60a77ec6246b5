//! Route definitions for entries.
//!
//! Registered under `/entries`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::entries;
use crate::state::AppState;

/// Entry routes, registered as `/entries`.
///
/// ```text
/// GET    /                                  list_entries
/// POST   /                                  create_entry
/// GET    /search                            search_entries
/// GET    /random                            random_entry
/// GET    /{title}                           get_entry
/// PUT    /{title}                           update_entry
/// DELETE /{title}                           delete_entry
/// GET    /{title}/revisions                 list_revisions
/// POST   /{title}/rollback/{revision_id}    rollback_entry
/// POST   /{title}/lock                      toggle_lock
/// POST   /{title}/verify                    set_verification
/// POST   /{title}/disputes                  report_dispute
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(entries::list_entries).post(entries::create_entry))
        .route("/search", get(entries::search_entries))
        .route("/random", get(entries::random_entry))
        .route(
            "/{title}",
            get(entries::get_entry)
                .put(entries::update_entry)
                .delete(entries::delete_entry),
        )
        .route("/{title}/revisions", get(entries::list_revisions))
        .route(
            "/{title}/rollback/{revision_id}",
            post(entries::rollback_entry),
        )
        .route("/{title}/lock", post(entries::toggle_lock))
        .route("/{title}/verify", post(entries::set_verification))
        .route("/{title}/disputes", post(entries::report_dispute))
}
