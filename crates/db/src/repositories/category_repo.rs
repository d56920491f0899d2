//! Repository for the `categories` table.
//!
//! Categories are get-or-create: writers refer to them by name and
//! [`CategoryRepo::resolve`] maps the name to an id, inserting a row with a
//! transliterated slug the first time a name is seen.

use quill_core::slug::{random_suffix, slugify};
use quill_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::category::Category;

const COLUMNS: &str = "id, name, slug, created_at, updated_at";

/// Length of the random part of fallback and de-duplicated slugs.
const SLUG_SUFFIX_LEN: usize = 6;

/// Insert attempts that tolerate a slug collision before the last, strict one.
const RESOLVE_ATTEMPTS: usize = 3;

pub struct CategoryRepo;

impl CategoryRepo {
    /// Return the id of the category called `name`, creating it if needed.
    ///
    /// Safe under concurrency: when another writer inserts the same name
    /// first, the insert is skipped and the winner's row is re-read. When the
    /// derived slug belongs to a different name, the slug gets a random
    /// suffix. The final attempt is a plain insert, so a persistent collision
    /// surfaces as a unique violation instead of looping.
    pub async fn resolve(conn: &mut PgConnection, name: &str) -> Result<DbId, sqlx::Error> {
        if let Some(id) = Self::find_id_by_name(conn, name).await? {
            return Ok(id);
        }

        let base = match slugify(name) {
            s if s.is_empty() => format!("category-{}", random_suffix(SLUG_SUFFIX_LEN)),
            s => s,
        };

        let mut slug = base.clone();
        for _ in 0..RESOLVE_ATTEMPTS {
            let inserted: Option<DbId> = sqlx::query_scalar(
                "INSERT INTO categories (name, slug) VALUES ($1, $2)
                 ON CONFLICT DO NOTHING
                 RETURNING id",
            )
            .bind(name)
            .bind(&slug)
            .fetch_optional(&mut *conn)
            .await?;
            if let Some(id) = inserted {
                tracing::debug!(category_id = id, name, slug = %slug, "Category created");
                return Ok(id);
            }

            if let Some(id) = Self::find_id_by_name(conn, name).await? {
                return Ok(id);
            }

            slug = format!("{base}-{}", random_suffix(SLUG_SUFFIX_LEN));
        }

        sqlx::query_scalar("INSERT INTO categories (name, slug) VALUES ($1, $2) RETURNING id")
            .bind(name)
            .bind(&slug)
            .fetch_one(&mut *conn)
            .await
    }

    async fn find_id_by_name(
        conn: &mut PgConnection,
        name: &str,
    ) -> Result<Option<DbId>, sqlx::Error> {
        sqlx::query_scalar("SELECT id FROM categories WHERE name = $1")
            .bind(name)
            .fetch_optional(&mut *conn)
            .await
    }

    /// Find a category by slug.
    pub async fn find_by_slug(pool: &PgPool, slug: &str) -> Result<Option<Category>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM categories WHERE slug = $1");
        sqlx::query_as::<_, Category>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// All categories ordered by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<Category>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM categories ORDER BY name");
        sqlx::query_as::<_, Category>(&query).fetch_all(pool).await
    }
}
