//! Handlers for entries: browsing, content lifecycle and per-entry
//! moderation.
//!
//! Mutations delegate to [`crate::workflow`]; handlers only extract the
//! caller and shape the response.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use rand::seq::IndexedRandom;

use folio_core::actor::ActorContext;
use folio_core::entry::UNKNOWN_USER;
use folio_core::error::CoreError;
use folio_core::render::render_markdown;
use folio_core::types::DbId;
use folio_db::models::dispute::ReportDispute;
use folio_db::models::entry::{
    CreateEntry, EditEntry, Entry, EntryDetail, EntryIndex, EntryPermissions, SearchResponse,
    SetVerification, ToggleLock,
};
use folio_db::repositories::{DisputeRepo, EntryRepo, RevisionRepo};

use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::middleware::auth::{Actor, AuthUser};
use crate::query::SearchParams;
use crate::response::{created, data};
use crate::state::AppState;
use crate::workflow;

/* --------------------------------------------------------------------------
Helpers
-------------------------------------------------------------------------- */

/// Fetch an entry by title (ignoring case) or return 404.
async fn ensure_entry(pool: &sqlx::PgPool, title: &str) -> AppResult<Entry> {
    EntryRepo::find_by_title(pool, title)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Entry", title)))
}

/// What the caller may do with this entry.
fn permissions_for(actor: &ActorContext, entry: &Entry) -> EntryPermissions {
    EntryPermissions {
        can_edit: actor.is_authenticated && (!entry.is_locked || actor.can_bypass_lock()),
        can_delete: actor.can_manage(entry.created_by),
        can_moderate: actor.is_authenticated && actor.is_elevated,
        can_rollback: actor.can_manage(entry.created_by),
    }
}

/// Render the full entry view.
async fn entry_detail(
    pool: &sqlx::PgPool,
    actor: &ActorContext,
    entry: Entry,
) -> AppResult<EntryDetail> {
    let open_disputes_count = DisputeRepo::count_open_for(pool, entry.id).await?;
    let people = EntryRepo::people(pool, entry.id).await?;
    let html = render_markdown(&entry.content);
    let permissions = permissions_for(actor, &entry);
    let name = |username: Option<String>| username.unwrap_or_else(|| UNKNOWN_USER.to_string());

    Ok(EntryDetail {
        entry,
        html,
        owner_name: name(people.owner),
        locked_by_name: name(people.locked_by),
        verified_by_name: name(people.verified_by),
        open_disputes_count,
        permissions,
    })
}

/* --------------------------------------------------------------------------
Browsing
-------------------------------------------------------------------------- */

/// GET /entries
///
/// All titles alphabetically, plus how many entries are locked.
pub async fn list_entries(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let titles = EntryRepo::list_titles(&state.pool).await?;
    let locked_entries = EntryRepo::count_locked(&state.pool).await?;

    Ok(data(EntryIndex {
        titles,
        locked_entries,
    }))
}

/// GET /entries/search?q=
///
/// An exact title match (ignoring case) is returned separately from the
/// substring results. An empty query yields nothing.
pub async fn search_entries(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<impl IntoResponse> {
    let query = params.q.as_deref().unwrap_or_default().trim().to_string();

    let response = if query.is_empty() {
        SearchResponse {
            query,
            exact_match: None,
            results: Vec::new(),
        }
    } else {
        let exact_match = EntryRepo::find_by_title(&state.pool, &query).await?;
        let results = EntryRepo::search(&state.pool, &query).await?;
        SearchResponse {
            query,
            exact_match,
            results,
        }
    };

    Ok(data(response))
}

/// GET /entries/random
///
/// A uniformly random entry, or 404 when the wiki is empty.
pub async fn random_entry(
    Actor(actor): Actor,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let titles = EntryRepo::list_titles(&state.pool).await?;
    let title = titles
        .choose(&mut rand::rng())
        .ok_or_else(|| CoreError::NotFound {
            entity: "Entry",
            key: "random".into(),
        })?;

    let entry = ensure_entry(&state.pool, title).await?;
    let detail = entry_detail(&state.pool, &actor, entry).await?;
    Ok(data(detail))
}

/// GET /entries/{title}
///
/// The entry with rendered HTML, open dispute count and caller permissions.
pub async fn get_entry(
    Actor(actor): Actor,
    State(state): State<AppState>,
    Path(title): Path<String>,
) -> AppResult<impl IntoResponse> {
    let entry = ensure_entry(&state.pool, &title).await?;
    let detail = entry_detail(&state.pool, &actor, entry).await?;
    Ok(data(detail))
}

/// GET /entries/{title}/revisions
///
/// Prior content snapshots, newest first.
pub async fn list_revisions(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(title): Path<String>,
) -> AppResult<impl IntoResponse> {
    let entry = ensure_entry(&state.pool, &title).await?;
    let revisions = RevisionRepo::list_for(&state.pool, entry.id).await?;
    Ok(data(revisions))
}

/* --------------------------------------------------------------------------
Content lifecycle
-------------------------------------------------------------------------- */

/// POST /entries
pub async fn create_entry(
    auth: AuthUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateEntry>,
) -> AppResult<impl IntoResponse> {
    let entry = workflow::create_entry(&state.pool, &auth.actor, &input).await?;
    Ok(created(entry))
}

/// PUT /entries/{title}
pub async fn update_entry(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(title): Path<String>,
    AppJson(input): AppJson<EditEntry>,
) -> AppResult<impl IntoResponse> {
    let outcome = workflow::edit_entry(&state.pool, &auth.actor, &title, &input).await?;
    Ok(data(outcome))
}

/// DELETE /entries/{title}
pub async fn delete_entry(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(title): Path<String>,
) -> AppResult<impl IntoResponse> {
    workflow::delete_entry(&state.pool, &auth.actor, &title).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /entries/{title}/rollback/{revision_id}
pub async fn rollback_entry(
    auth: AuthUser,
    State(state): State<AppState>,
    Path((title, revision_id)): Path<(String, DbId)>,
) -> AppResult<impl IntoResponse> {
    let outcome =
        workflow::rollback_entry(&state.pool, &auth.actor, &title, revision_id).await?;
    Ok(data(outcome))
}

/* --------------------------------------------------------------------------
Moderation
-------------------------------------------------------------------------- */

/// POST /entries/{title}/lock
///
/// Toggles the lock. The reason is only used when locking; unlocking needs
/// no body.
pub async fn toggle_lock(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(title): Path<String>,
    body: Option<AppJson<ToggleLock>>,
) -> AppResult<impl IntoResponse> {
    let input = body.map(|AppJson(b)| b).unwrap_or_default();
    let outcome = workflow::toggle_lock(
        &state.pool,
        &auth.actor,
        &title,
        input.lock_reason.as_deref(),
    )
    .await?;
    Ok(data(outcome))
}

/// POST /entries/{title}/verify
pub async fn set_verification(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(title): Path<String>,
    body: Option<AppJson<SetVerification>>,
) -> AppResult<impl IntoResponse> {
    let input = body.map(|AppJson(b)| b).unwrap_or_default();
    let entry = workflow::set_verification(&state.pool, &auth.actor, &title, &input).await?;
    Ok(data(entry))
}

/// POST /entries/{title}/disputes
///
/// Anonymous callers get 403 rather than 401.
pub async fn report_dispute(
    Actor(actor): Actor,
    State(state): State<AppState>,
    Path(title): Path<String>,
    AppJson(input): AppJson<ReportDispute>,
) -> AppResult<impl IntoResponse> {
    let outcome = workflow::report_dispute(&state.pool, &actor, &title, &input).await?;
    Ok(created(outcome))
}
