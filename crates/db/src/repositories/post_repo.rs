//! Repository for the `posts` table.
//!
//! Reads return [`PostView`], a post joined with its category name and
//! sorted tag names. Writes run the category resolve, tag sync and row write
//! in one transaction.

use quill_core::pagination::Page;
use quill_core::slug::deleted_slug_suffix;
use quill_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::post::{CreatePost, PostFilter, PostView, UpdatePost};
use crate::repositories::{CategoryRepo, TagRepo};

/// Columns for list rows, without `content`.
const SUMMARY_COLUMNS: &str = "\
    p.id, p.title, p.slug, p.description, p.cover, p.is_published, \
    c.name AS category_name, \
    ARRAY(SELECT t.name FROM posts_to_tags pt JOIN tags t ON t.id = pt.tag_id \
          WHERE pt.post_id = p.id ORDER BY t.name) AS tags, \
    p.created_at, p.updated_at";

const FROM_POSTS: &str = "FROM posts p LEFT JOIN categories c ON c.id = p.category_id";

/// Shared WHERE clause for listing and counting.
///
/// `$1` only published, `$2` category id, `$3` tag id.
const LIST_FILTER: &str = "\
    WHERE p.deleted_at IS NULL \
      AND ($1::BOOLEAN = FALSE OR p.is_published) \
      AND ($2::BIGINT IS NULL OR p.category_id = $2) \
      AND ($3::BIGINT IS NULL OR EXISTS ( \
            SELECT 1 FROM posts_to_tags f WHERE f.post_id = p.id AND f.tag_id = $3))";

pub struct PostRepo;

impl PostRepo {
    // -----------------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------------

    /// Find a live post by id. With `only_published`, drafts are not found.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
        only_published: bool,
    ) -> Result<Option<PostView>, sqlx::Error> {
        let query = format!(
            "SELECT {SUMMARY_COLUMNS}, p.content {FROM_POSTS}
             WHERE p.id = $1 AND p.deleted_at IS NULL
               AND ($2::BOOLEAN = FALSE OR p.is_published)"
        );
        sqlx::query_as::<_, PostView>(&query)
            .bind(id)
            .bind(only_published)
            .fetch_optional(pool)
            .await
    }

    /// Find a live post by slug. With `only_published`, drafts are not found.
    pub async fn find_by_slug(
        pool: &PgPool,
        slug: &str,
        only_published: bool,
    ) -> Result<Option<PostView>, sqlx::Error> {
        let query = format!(
            "SELECT {SUMMARY_COLUMNS}, p.content {FROM_POSTS}
             WHERE p.slug = $1 AND p.deleted_at IS NULL
               AND ($2::BOOLEAN = FALSE OR p.is_published)"
        );
        sqlx::query_as::<_, PostView>(&query)
            .bind(slug)
            .bind(only_published)
            .fetch_optional(pool)
            .await
    }

    /// Look a post up by id when `identifier` is numeric, falling back to a
    /// slug lookup; non-numeric identifiers are slugs.
    pub async fn find_by_identifier(
        pool: &PgPool,
        identifier: &str,
        only_published: bool,
    ) -> Result<Option<PostView>, sqlx::Error> {
        if let Ok(id) = identifier.parse::<DbId>() {
            if let Some(post) = Self::find_by_id(pool, id, only_published).await? {
                return Ok(Some(post));
            }
        }
        Self::find_by_slug(pool, identifier, only_published).await
    }

    /// Whether a live post other than `exclude_id` already uses `slug`.
    pub async fn slug_exists(
        pool: &PgPool,
        slug: &str,
        exclude_id: Option<DbId>,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT EXISTS (
                SELECT 1 FROM posts
                WHERE slug = $1 AND deleted_at IS NULL
                  AND ($2::BIGINT IS NULL OR id <> $2)
             )",
        )
        .bind(slug)
        .bind(exclude_id)
        .fetch_one(pool)
        .await
    }

    /// One page of post summaries, newest first.
    pub async fn list(
        pool: &PgPool,
        filter: &PostFilter,
        page: Page,
    ) -> Result<Vec<PostView>, sqlx::Error> {
        let query = format!(
            "SELECT {SUMMARY_COLUMNS} {FROM_POSTS} {LIST_FILTER}
             ORDER BY p.created_at DESC, p.id DESC
             LIMIT $4 OFFSET $5"
        );
        sqlx::query_as::<_, PostView>(&query)
            .bind(filter.only_published)
            .bind(filter.category_id)
            .bind(filter.tag_id)
            .bind(page.limit)
            .bind(page.offset())
            .fetch_all(pool)
            .await
    }

    /// Number of posts matching `filter`, ignoring pagination.
    pub async fn count(pool: &PgPool, filter: &PostFilter) -> Result<i64, sqlx::Error> {
        let query = format!("SELECT COUNT(*) FROM posts p {LIST_FILTER}");
        sqlx::query_scalar(&query)
            .bind(filter.only_published)
            .bind(filter.category_id)
            .bind(filter.tag_id)
            .fetch_one(pool)
            .await
    }

    // -----------------------------------------------------------------------
    // Writes
    // -----------------------------------------------------------------------

    /// Insert a post together with its category and tags.
    pub async fn create(pool: &PgPool, input: &CreatePost) -> Result<PostView, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let category_id = match input.category.as_deref() {
            Some(name) => Some(CategoryRepo::resolve(&mut tx, name).await?),
            None => None,
        };

        let id: DbId = sqlx::query_scalar(
            "INSERT INTO posts
                (title, slug, content, description, cover, is_published, category_id, author_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING id",
        )
        .bind(&input.title)
        .bind(&input.slug)
        .bind(&input.content)
        .bind(&input.description)
        .bind(&input.cover)
        .bind(input.is_published)
        .bind(category_id)
        .bind(input.author_id)
        .fetch_one(&mut *tx)
        .await?;

        if let Some(tags) = &input.tags {
            TagRepo::sync(&mut tx, id, tags).await?;
        }

        let post = Self::fetch_view(&mut tx, id).await?;
        tx.commit().await?;
        Ok(post)
    }

    /// Apply a partial update. Returns `None` if the post is absent or
    /// soft-deleted; nothing is written in that case.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdatePost,
    ) -> Result<Option<PostView>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let live: Option<DbId> = sqlx::query_scalar(
            "SELECT id FROM posts WHERE id = $1 AND deleted_at IS NULL FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;
        if live.is_none() {
            return Ok(None);
        }

        let (set_category, category_id) = match &input.category {
            None => (false, None),
            Some(None) => (true, None),
            Some(Some(name)) => (true, Some(CategoryRepo::resolve(&mut tx, name).await?)),
        };

        sqlx::query(
            "UPDATE posts SET
                title = COALESCE($2, title),
                slug = COALESCE($3, slug),
                content = COALESCE($4, content),
                description = COALESCE($5, description),
                cover = COALESCE($6, cover),
                is_published = COALESCE($7, is_published),
                category_id = CASE WHEN $8 THEN $9 ELSE category_id END
             WHERE id = $1",
        )
        .bind(id)
        .bind(&input.title)
        .bind(&input.slug)
        .bind(&input.content)
        .bind(&input.description)
        .bind(&input.cover)
        .bind(input.is_published)
        .bind(set_category)
        .bind(category_id)
        .execute(&mut *tx)
        .await?;

        if let Some(tags) = &input.tags {
            TagRepo::sync(&mut tx, id, tags).await?;
        }

        let post = Self::fetch_view(&mut tx, id).await?;
        tx.commit().await?;
        Ok(Some(post))
    }

    /// Soft-delete a live post and rename its slug out of the way.
    ///
    /// Returns `true` if a row was deleted, `false` if absent or already deleted.
    pub async fn soft_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE posts SET deleted_at = NOW(), slug = slug || $2
             WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .bind(deleted_slug_suffix())
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn fetch_view(conn: &mut PgConnection, id: DbId) -> Result<PostView, sqlx::Error> {
        let query = format!("SELECT {SUMMARY_COLUMNS}, p.content {FROM_POSTS} WHERE p.id = $1");
        sqlx::query_as::<_, PostView>(&query)
            .bind(id)
            .fetch_one(&mut *conn)
            .await
    }
}
