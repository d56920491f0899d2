//! Repository for the `memos` table.

use quill_core::pagination::Page;
use quill_core::types::DbId;
use sqlx::PgPool;

use crate::models::memo::{CreateMemo, Memo, UpdateMemo};

const COLUMNS: &str = "id, content, is_published, author_id, created_at, updated_at";

pub struct MemoRepo;

impl MemoRepo {
    pub async fn create(pool: &PgPool, input: &CreateMemo) -> Result<Memo, sqlx::Error> {
        let query = format!(
            "INSERT INTO memos (content, is_published, author_id)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Memo>(&query)
            .bind(&input.content)
            .bind(input.is_published)
            .bind(input.author_id)
            .fetch_one(pool)
            .await
    }

    /// Find a live memo. With `only_published`, drafts are not found.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
        only_published: bool,
    ) -> Result<Option<Memo>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM memos
             WHERE id = $1 AND deleted_at IS NULL
               AND ($2::BOOLEAN = FALSE OR is_published)"
        );
        sqlx::query_as::<_, Memo>(&query)
            .bind(id)
            .bind(only_published)
            .fetch_optional(pool)
            .await
    }

    /// One page of live memos, newest first.
    pub async fn list(
        pool: &PgPool,
        only_published: bool,
        page: Page,
    ) -> Result<Vec<Memo>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM memos
             WHERE deleted_at IS NULL AND ($1::BOOLEAN = FALSE OR is_published)
             ORDER BY created_at DESC, id DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Memo>(&query)
            .bind(only_published)
            .bind(page.limit)
            .bind(page.offset())
            .fetch_all(pool)
            .await
    }

    pub async fn count(pool: &PgPool, only_published: bool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM memos
             WHERE deleted_at IS NULL AND ($1::BOOLEAN = FALSE OR is_published)",
        )
        .bind(only_published)
        .fetch_one(pool)
        .await
    }

    /// Update a live memo. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if the memo is absent or soft-deleted.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateMemo,
    ) -> Result<Option<Memo>, sqlx::Error> {
        let query = format!(
            "UPDATE memos SET
                content = COALESCE($2, content),
                is_published = COALESCE($3, is_published)
             WHERE id = $1 AND deleted_at IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Memo>(&query)
            .bind(id)
            .bind(&input.content)
            .bind(input.is_published)
            .fetch_optional(pool)
            .await
    }

    /// Soft-delete a memo by setting `deleted_at`.
    ///
    /// Returns `true` if a row was deleted, `false` if absent or already deleted.
    pub async fn soft_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE memos SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
