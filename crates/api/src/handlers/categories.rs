//! Handlers for the `/categories` resource.

use axum::extract::State;
use axum::Json;
use quill_db::models::category::Category;
use quill_db::repositories::CategoryRepo;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/categories
///
/// Every category ordered by name. Categories are created implicitly when a
/// post names one.
pub async fn list_categories(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Category>>>> {
    let categories = CategoryRepo::list(&state.pool).await?;
    Ok(Json(DataResponse::new(categories)))
}
