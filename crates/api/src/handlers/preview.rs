use axum::extract::Query;
use axum::Json;

use folio_core::render::render_markdown;
use folio_db::models::entry::PreviewResponse;

use crate::query::PreviewParams;
use crate::response::{data, DataResponse};

/// GET /preview?text=
///
/// Render arbitrary markdown with the same pipeline as entry views.
pub async fn preview_markdown(
    Query(params): Query<PreviewParams>,
) -> Json<DataResponse<PreviewResponse>> {
    let html = render_markdown(params.text.as_deref().unwrap_or_default());
    data(PreviewResponse { html })
}
