#![allow(dead_code)]

use quill_core::types::DbId;
use quill_db::models::category::Category;
use sqlx::PgPool;

/// Load a category row by exact name.
pub async fn category_by_name(pool: &PgPool, name: &str) -> Option<Category> {
    sqlx::query_as::<_, Category>(
        "SELECT id, name, slug, created_at, updated_at FROM categories WHERE name = $1",
    )
    .bind(name)
    .fetch_optional(pool)
    .await
    .unwrap()
}

/// Names of the tags linked to a post, sorted.
pub async fn tag_names_for_post(pool: &PgPool, post_id: DbId) -> Vec<String> {
    sqlx::query_scalar(
        "SELECT t.name FROM tags t
         JOIN posts_to_tags pt ON pt.tag_id = t.id
         WHERE pt.post_id = $1
         ORDER BY t.name",
    )
    .bind(post_id)
    .fetch_all(pool)
    .await
    .unwrap()
}
