//! Handlers for the `/tags` resource.

use axum::extract::State;
use axum::Json;
use quill_db::models::tag::TagWithCount;
use quill_db::repositories::TagRepo;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/tags
///
/// Every tag with its live post count, ordered by name. Tags that no live
/// post uses are still listed with a count of zero.
pub async fn list_tags(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<TagWithCount>>>> {
    let tags = TagRepo::list_with_counts(&state.pool).await?;
    Ok(Json(DataResponse::new(tags)))
}
