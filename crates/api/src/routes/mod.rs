pub mod auth;
pub mod categories;
pub mod health;
pub mod memos;
pub mod posts;
pub mod tags;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                    login (public, rate limited)
/// /auth/register                 first-user registration (public)
/// /auth/change-password          change own password (requires auth)
///
/// /posts                         list (optional auth), create (admin)
/// /posts/{id}                    get by id or slug (optional auth),
///                                update, delete (admin)
///
/// /memos                         list (optional auth), create (admin)
/// /memos/{id}                    get (optional auth), update, delete (admin)
///
/// /categories                    list (public)
/// /tags                          list with post counts (public)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/posts", posts::router())
        .nest("/memos", memos::router())
        .nest("/categories", categories::router())
        .nest("/tags", tags::router())
}
