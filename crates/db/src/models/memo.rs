//! Memo model and DTOs.

use quill_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A live row from the `memos` table, serialized as the API shape.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Memo {
    pub id: DbId,
    pub content: String,
    pub is_published: bool,
    #[serde(skip)]
    pub author_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone)]
pub struct CreateMemo {
    pub content: String,
    pub is_published: bool,
    pub author_id: Option<DbId>,
}

/// Partial update. `None` leaves a field untouched.
#[derive(Debug, Clone, Default)]
pub struct UpdateMemo {
    pub content: Option<String>,
    pub is_published: Option<bool>,
}
