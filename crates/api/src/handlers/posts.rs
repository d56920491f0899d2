//! Handlers for the `/posts` resource.
//!
//! Reads go through [`Viewer`]: drafts are visible only to admins and are
//! otherwise indistinguishable from missing posts. Writes require an admin.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use quill_core::content::ContentKind;
use quill_core::error::CoreError;
use quill_core::pagination::PageMeta;
use quill_core::rules::{
    validate_category_name, validate_slug, validate_tag_names, MAX_TITLE_LEN,
};
use quill_core::slug::generate_post_slug;
use quill_core::types::DbId;
use quill_db::models::post::{CreatePost, PostFilter, PostResponse, UpdatePost};
use quill_db::repositories::{CategoryRepo, PostRepo, TagRepo};
use serde::{Deserialize, Deserializer};
use validator::{Validate, ValidationErrors};

use crate::error::{AppError, AppResult, SLUG_CONFLICT_MESSAGE};
use crate::extract::{ApiPath, ApiQuery, ValidatedJson};
use crate::middleware::auth::Viewer;
use crate::middleware::rbac::RequireAdmin;
use crate::query::ListPostsParams;
use crate::response::{DataResponse, IdResponse};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /posts`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    #[validate(length(max = MAX_TITLE_LEN))]
    pub title: Option<String>,
    /// Only `"post"` is accepted here; memos have their own resource.
    #[serde(rename = "type")]
    pub kind: Option<ContentKind>,
    /// Derived from the title when absent.
    #[validate(custom(function = validate_slug))]
    pub slug: Option<String>,
    #[validate(length(min = 1))]
    pub content: String,
    pub description: Option<String>,
    #[validate(url)]
    pub cover: Option<String>,
    #[serde(default)]
    pub is_published: bool,
    /// Category name, created on first use.
    #[validate(custom(function = validate_category_name))]
    pub category: Option<String>,
    #[validate(custom(function = validate_tag_names))]
    pub tags: Option<Vec<String>>,
}

/// Request body for `PATCH /posts/{id}`. Absent fields are left untouched.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePostRequest {
    #[validate(length(max = MAX_TITLE_LEN))]
    pub title: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<ContentKind>,
    #[validate(custom(function = validate_slug))]
    pub slug: Option<String>,
    #[validate(length(min = 1))]
    pub content: Option<String>,
    pub description: Option<String>,
    #[validate(url)]
    pub cover: Option<String>,
    pub is_published: Option<bool>,
    /// Absent: keep. `null` or `""`: detach. A name: resolve.
    #[serde(default, deserialize_with = "deserialize_some")]
    pub category: Option<Option<String>>,
    /// `[]` clears every tag.
    #[validate(custom(function = validate_tag_names))]
    pub tags: Option<Vec<String>>,
}

/// Distinguishes an explicit `null` (`Some(None)`) from an absent key (`None`).
fn deserialize_some<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}

fn reject_memo_kind(kind: Option<ContentKind>) -> AppResult<()> {
    if kind == Some(ContentKind::Memo) {
        return Err(AppError::Core(CoreError::Validation(
            "Memos are managed through /memos".into(),
        )));
    }
    Ok(())
}

fn slug_conflict() -> AppError {
    AppError::Core(CoreError::Conflict(SLUG_CONFLICT_MESSAGE.into()))
}

// ---------------------------------------------------------------------------
// Reads
// ---------------------------------------------------------------------------

/// GET /api/v1/posts
///
/// Paginated summaries (no `content`), newest first. Unknown category slugs
/// or tag names yield an empty page rather than an error.
pub async fn list_posts(
    State(state): State<AppState>,
    viewer: Viewer,
    ApiQuery(params): ApiQuery<ListPostsParams>,
) -> AppResult<Json<DataResponse<Vec<PostResponse>>>> {
    let page = params.page();
    let empty = || Json(DataResponse::paged(Vec::new(), PageMeta::new(page, 0)));

    if params.kind == Some(ContentKind::Memo) {
        return Ok(empty());
    }

    let mut filter = PostFilter {
        only_published: viewer.only_published(),
        ..Default::default()
    };

    if let Some(slug) = params.category.as_deref() {
        match CategoryRepo::find_by_slug(&state.pool, slug).await? {
            Some(category) => filter.category_id = Some(category.id),
            None => return Ok(empty()),
        }
    }
    if let Some(name) = params.tag.as_deref() {
        match TagRepo::find_by_name(&state.pool, name).await? {
            Some(tag) => filter.tag_id = Some(tag.id),
            None => return Ok(empty()),
        }
    }

    let rows = PostRepo::list(&state.pool, &filter, page).await?;
    let total = PostRepo::count(&state.pool, &filter).await?;
    let posts = rows.into_iter().map(PostResponse::from).collect();

    Ok(Json(DataResponse::paged(posts, PageMeta::new(page, total))))
}

/// GET /api/v1/posts/{id_or_slug}
pub async fn get_post(
    State(state): State<AppState>,
    viewer: Viewer,
    ApiPath(identifier): ApiPath<String>,
) -> AppResult<Json<DataResponse<PostResponse>>> {
    let post = PostRepo::find_by_identifier(&state.pool, &identifier, viewer.only_published())
        .await?
        .ok_or(AppError::Core(CoreError::NotFoundKey {
            entity: "Post",
            key: identifier,
        }))?;

    Ok(Json(DataResponse::new(post.into())))
}

// ---------------------------------------------------------------------------
// Writes
// ---------------------------------------------------------------------------

/// POST /api/v1/posts
pub async fn create_post(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    ValidatedJson(input): ValidatedJson<CreatePostRequest>,
) -> AppResult<impl IntoResponse> {
    reject_memo_kind(input.kind)?;

    let slug = match input.slug {
        Some(slug) => slug,
        None => generate_post_slug(input.title.as_deref(), Utc::now().date_naive()),
    };
    if PostRepo::slug_exists(&state.pool, &slug, None).await? {
        return Err(slug_conflict());
    }

    let create = CreatePost {
        title: input.title,
        slug,
        content: input.content,
        description: input.description,
        cover: input.cover,
        is_published: input.is_published,
        author_id: Some(admin.user_id),
        category: input.category.map(|c| c.trim().to_string()),
        tags: input.tags,
    };
    let post = PostRepo::create(&state.pool, &create).await?;

    tracing::info!(
        post_id = post.id,
        user_id = admin.user_id,
        slug = ?post.slug,
        "Post created",
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse::new(PostResponse::from(post))),
    ))
}

/// PATCH /api/v1/posts/{id}
pub async fn update_post(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    ApiPath(id): ApiPath<DbId>,
    ValidatedJson(input): ValidatedJson<UpdatePostRequest>,
) -> AppResult<Json<DataResponse<PostResponse>>> {
    reject_memo_kind(input.kind)?;

    // `category` is nullable, so its rule runs here rather than in the derive.
    let category = input
        .category
        .map(|c| c.map(|name| name.trim().to_string()).filter(|n| !n.is_empty()));
    if let Some(Some(name)) = &category {
        if let Err(err) = validate_category_name(name) {
            let mut errors = ValidationErrors::new();
            errors.add("category", err);
            return Err(errors.into());
        }
    }

    let not_found = || {
        AppError::Core(CoreError::NotFound {
            entity: "Post",
            id,
        })
    };

    if PostRepo::find_by_id(&state.pool, id, false).await?.is_none() {
        return Err(not_found());
    }
    if let Some(slug) = input.slug.as_deref() {
        if PostRepo::slug_exists(&state.pool, slug, Some(id)).await? {
            return Err(slug_conflict());
        }
    }

    let update = UpdatePost {
        title: input.title,
        slug: input.slug,
        content: input.content,
        description: input.description,
        cover: input.cover,
        is_published: input.is_published,
        category,
        tags: input.tags,
    };
    let post = PostRepo::update(&state.pool, id, &update)
        .await?
        .ok_or_else(not_found)?;

    tracing::info!(post_id = id, user_id = admin.user_id, "Post updated");
    Ok(Json(DataResponse::new(post.into())))
}

/// DELETE /api/v1/posts/{id}
///
/// Soft delete; the slug is released for reuse.
pub async fn delete_post(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<Json<DataResponse<IdResponse>>> {
    if !PostRepo::soft_delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Post",
            id,
        }));
    }

    tracing::info!(post_id = id, user_id = admin.user_id, "Post deleted");
    Ok(Json(DataResponse::new(IdResponse { id })))
}
