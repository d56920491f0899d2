//! Shared response envelope types for API handlers.
//!
//! Successful responses use `{ "success": true, "data": ..., "meta": ... }`.
//! Use [`DataResponse`] instead of ad-hoc `serde_json::json!` bodies.

use quill_core::pagination::PageMeta;
use quill_core::types::DbId;
use serde::Serialize;

/// Standard success envelope. `meta` is only present on paginated lists.
///
/// ```ignore
/// Ok(Json(DataResponse::new(items)))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub success: bool,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<PageMeta>,
}

impl<T: Serialize> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
            meta: None,
        }
    }

    pub fn paged(data: T, meta: PageMeta) -> Self {
        Self {
            success: true,
            data,
            meta: Some(meta),
        }
    }
}

/// `{ "message": ... }` payload for actions with nothing else to return.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// `{ "id": ... }` payload returned by deletes.
#[derive(Debug, Serialize)]
pub struct IdResponse {
    pub id: DbId,
}
