//! Route definitions for the `/memos` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::memos;
use crate::state::AppState;

/// Routes mounted at `/memos`.
///
/// ```text
/// GET    /       -> list_memos
/// POST   /       -> create_memo (admin)
/// GET    /{id}   -> get_memo
/// PATCH  /{id}   -> update_memo (admin)
/// DELETE /{id}   -> delete_memo (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(memos::list_memos).post(memos::create_memo))
        .route(
            "/{id}",
            get(memos::get_memo)
                .patch(memos::update_memo)
                .delete(memos::delete_memo),
        )
}
