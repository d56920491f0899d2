//! Handlers for the `/memos` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use quill_core::error::CoreError;
use quill_core::pagination::PageMeta;
use quill_core::types::DbId;
use quill_db::models::memo::{CreateMemo, Memo, UpdateMemo};
use quill_db::repositories::MemoRepo;
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::extract::{ApiPath, ApiQuery, ValidatedJson};
use crate::middleware::auth::Viewer;
use crate::middleware::rbac::RequireAdmin;
use crate::query::PaginationParams;
use crate::response::{DataResponse, IdResponse};
use crate::state::AppState;

/// Request body for `POST /memos`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateMemoRequest {
    #[validate(length(min = 1))]
    pub content: String,
    #[serde(default)]
    pub is_published: bool,
}

/// Request body for `PATCH /memos/{id}`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMemoRequest {
    #[validate(length(min = 1))]
    pub content: Option<String>,
    pub is_published: Option<bool>,
}

fn memo_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Memo", id })
}

/// GET /api/v1/memos
pub async fn list_memos(
    State(state): State<AppState>,
    viewer: Viewer,
    ApiQuery(params): ApiQuery<PaginationParams>,
) -> AppResult<Json<DataResponse<Vec<Memo>>>> {
    let page = params.page();
    let only_published = viewer.only_published();

    let memos = MemoRepo::list(&state.pool, only_published, page).await?;
    let total = MemoRepo::count(&state.pool, only_published).await?;

    Ok(Json(DataResponse::paged(memos, PageMeta::new(page, total))))
}

/// GET /api/v1/memos/{id}
pub async fn get_memo(
    State(state): State<AppState>,
    viewer: Viewer,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<Json<DataResponse<Memo>>> {
    let memo = MemoRepo::find_by_id(&state.pool, id, viewer.only_published())
        .await?
        .ok_or_else(|| memo_not_found(id))?;
    Ok(Json(DataResponse::new(memo)))
}

/// POST /api/v1/memos
pub async fn create_memo(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    ValidatedJson(input): ValidatedJson<CreateMemoRequest>,
) -> AppResult<impl IntoResponse> {
    let create = CreateMemo {
        content: input.content,
        is_published: input.is_published,
        author_id: Some(admin.user_id),
    };
    let memo = MemoRepo::create(&state.pool, &create).await?;

    tracing::info!(memo_id = memo.id, user_id = admin.user_id, "Memo created");
    Ok((StatusCode::CREATED, Json(DataResponse::new(memo))))
}

/// PATCH /api/v1/memos/{id}
pub async fn update_memo(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    ApiPath(id): ApiPath<DbId>,
    ValidatedJson(input): ValidatedJson<UpdateMemoRequest>,
) -> AppResult<Json<DataResponse<Memo>>> {
    let update = UpdateMemo {
        content: input.content,
        is_published: input.is_published,
    };
    let memo = MemoRepo::update(&state.pool, id, &update)
        .await?
        .ok_or_else(|| memo_not_found(id))?;

    tracing::info!(memo_id = id, user_id = admin.user_id, "Memo updated");
    Ok(Json(DataResponse::new(memo)))
}

/// DELETE /api/v1/memos/{id}
pub async fn delete_memo(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<Json<DataResponse<IdResponse>>> {
    if !MemoRepo::soft_delete(&state.pool, id).await? {
        return Err(memo_not_found(id));
    }

    tracing::info!(memo_id = id, user_id = admin.user_id, "Memo deleted");
    Ok(Json(DataResponse::new(IdResponse { id })))
}
