//! Post read model, response shape and write DTOs.

use quill_core::content::ContentKind;
use quill_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

// ---------------------------------------------------------------------------
// Read model
// ---------------------------------------------------------------------------

/// A live post joined with its category name and tag names.
///
/// Listing queries do not select `content`; it defaults to `None` there.
#[derive(Debug, Clone, FromRow)]
pub struct PostView {
    pub id: DbId,
    pub title: Option<String>,
    pub slug: Option<String>,
    #[sqlx(default)]
    pub content: Option<String>,
    pub description: Option<String>,
    pub cover: Option<String>,
    pub is_published: bool,
    pub category_name: Option<String>,
    /// Sorted by name.
    pub tags: Vec<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Post as returned by the API.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: DbId,
    pub title: Option<String>,
    #[serde(rename = "type")]
    pub kind: ContentKind,
    pub slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    pub description: Option<String>,
    /// Zero or one category name.
    pub categories: Vec<String>,
    pub tags: Vec<String>,
    pub cover: Option<String>,
    pub is_published: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<PostView> for PostResponse {
    fn from(view: PostView) -> Self {
        Self {
            id: view.id,
            title: view.title,
            kind: ContentKind::Post,
            slug: view.slug,
            content: view.content,
            description: view.description,
            categories: view.category_name.into_iter().collect(),
            tags: view.tags,
            cover: view.cover,
            is_published: view.is_published,
            created_at: view.created_at,
            updated_at: view.updated_at,
        }
    }
}

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

/// Everything needed to insert a post. The slug is already final.
#[derive(Debug, Clone)]
pub struct CreatePost {
    pub title: Option<String>,
    pub slug: String,
    pub content: String,
    pub description: Option<String>,
    pub cover: Option<String>,
    pub is_published: bool,
    pub author_id: Option<DbId>,
    /// Category name, resolved (and created if needed) inside the write.
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
}

/// Partial update. `None` leaves a field untouched.
#[derive(Debug, Clone, Default)]
pub struct UpdatePost {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub content: Option<String>,
    pub description: Option<String>,
    pub cover: Option<String>,
    pub is_published: Option<bool>,
    /// `Some(None)` detaches the category, `Some(Some(name))` resolves `name`.
    pub category: Option<Option<String>>,
    /// `Some(vec![])` clears every tag.
    pub tags: Option<Vec<String>>,
}

/// Filters for listing posts. Unset filters match everything.
#[derive(Debug, Clone, Default)]
pub struct PostFilter {
    pub category_id: Option<DbId>,
    pub tag_id: Option<DbId>,
    pub only_published: bool,
}
