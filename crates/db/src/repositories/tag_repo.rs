//! Repository for the `tags` table and the `posts_to_tags` junction.

use quill_core::rules::normalize_tag_names;
use quill_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::tag::{Tag, TagWithCount};

const COLUMNS: &str = "id, name, created_at, updated_at";

pub struct TagRepo;

impl TagRepo {
    /// Make the post's tags exactly the given names.
    ///
    /// Names are trimmed and de-duplicated first; missing tags are created.
    /// Every step is a single batched statement. The links are replaced
    /// wholesale, so callers should pass a transaction connection to make
    /// the delete and re-insert atomic.
    pub async fn sync(
        conn: &mut PgConnection,
        post_id: DbId,
        names: &[String],
    ) -> Result<(), sqlx::Error> {
        let names = normalize_tag_names(names);

        if names.is_empty() {
            sqlx::query("DELETE FROM posts_to_tags WHERE post_id = $1")
                .bind(post_id)
                .execute(&mut *conn)
                .await?;
            return Ok(());
        }

        sqlx::query(
            "INSERT INTO tags (name)
             SELECT UNNEST($1::text[])
             ON CONFLICT (name) DO NOTHING",
        )
        .bind(&names)
        .execute(&mut *conn)
        .await?;

        let tag_ids: Vec<DbId> = sqlx::query_scalar("SELECT id FROM tags WHERE name = ANY($1)")
            .bind(&names)
            .fetch_all(&mut *conn)
            .await?;

        sqlx::query("DELETE FROM posts_to_tags WHERE post_id = $1")
            .bind(post_id)
            .execute(&mut *conn)
            .await?;

        sqlx::query(
            "INSERT INTO posts_to_tags (post_id, tag_id)
             SELECT $1, UNNEST($2::bigint[])",
        )
        .bind(post_id)
        .bind(&tag_ids)
        .execute(&mut *conn)
        .await?;

        Ok(())
    }

    /// Find a tag by exact name.
    pub async fn find_by_name(pool: &PgPool, name: &str) -> Result<Option<Tag>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tags WHERE name = $1");
        sqlx::query_as::<_, Tag>(&query)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// Every tag with the number of live posts linked to it, ordered by name.
    /// Tags with no live posts are included with a count of zero.
    pub async fn list_with_counts(pool: &PgPool) -> Result<Vec<TagWithCount>, sqlx::Error> {
        sqlx::query_as::<_, TagWithCount>(
            "SELECT t.id, t.name, COUNT(p.id) AS post_count
             FROM tags t
             LEFT JOIN posts_to_tags pt ON pt.tag_id = t.id
             LEFT JOIN posts p ON p.id = pt.post_id AND p.deleted_at IS NULL
             GROUP BY t.id, t.name
             ORDER BY t.name",
        )
        .fetch_all(pool)
        .await
    }
}
