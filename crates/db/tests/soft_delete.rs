//! Integration tests for soft delete of posts and memos.
//!
//! Verifies that deleted rows disappear from every read path, that a second
//! delete reports `false`, and that a deleted post gives its slug back.

use quill_core::pagination::Page;
use quill_db::models::memo::{CreateMemo, UpdateMemo};
use quill_db::models::post::{CreatePost, PostFilter, UpdatePost};
use quill_db::repositories::{MemoRepo, PostRepo};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_post(slug: &str) -> CreatePost {
    CreatePost {
        title: Some("Soft delete".to_string()),
        slug: slug.to_string(),
        content: "soft delete test".to_string(),
        description: None,
        cover: None,
        is_published: true,
        author_id: None,
        category: None,
        tags: None,
    }
}

fn new_memo(content: &str) -> CreateMemo {
    CreateMemo {
        content: content.to_string(),
        is_published: true,
        author_id: None,
    }
}

// ---------------------------------------------------------------------------
// Posts
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_deleted_post_is_hidden(pool: PgPool) {
    let post = PostRepo::create(&pool, &new_post("hidden")).await.unwrap();

    assert!(PostRepo::soft_delete(&pool, post.id).await.unwrap());

    assert!(PostRepo::find_by_id(&pool, post.id, false).await.unwrap().is_none());
    assert!(PostRepo::find_by_slug(&pool, "hidden", false).await.unwrap().is_none());
    let filter = PostFilter::default();
    assert!(PostRepo::list(&pool, &filter, Page::default()).await.unwrap().is_empty());
    assert_eq!(PostRepo::count(&pool, &filter).await.unwrap(), 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_second_delete_returns_false(pool: PgPool) {
    let post = PostRepo::create(&pool, &new_post("twice")).await.unwrap();

    assert!(PostRepo::soft_delete(&pool, post.id).await.unwrap());
    assert!(!PostRepo::soft_delete(&pool, post.id).await.unwrap());
    assert!(!PostRepo::soft_delete(&pool, 999_999).await.unwrap());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_deleted_slug_is_mangled_and_reusable(pool: PgPool) {
    let old = PostRepo::create(&pool, &new_post("reuse-me")).await.unwrap();
    PostRepo::soft_delete(&pool, old.id).await.unwrap();

    let stored: String = sqlx::query_scalar("SELECT slug FROM posts WHERE id = $1")
        .bind(old.id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert!(stored.starts_with("reuse-me_del_"), "got {stored}");
    assert!(!PostRepo::slug_exists(&pool, "reuse-me", None).await.unwrap());

    let new = PostRepo::create(&pool, &new_post("reuse-me")).await.unwrap();
    assert_ne!(new.id, old.id);
    assert_eq!(new.slug.as_deref(), Some("reuse-me"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_active_slug_is_unique(pool: PgPool) {
    PostRepo::create(&pool, &new_post("taken")).await.unwrap();

    let err = PostRepo::create(&pool, &new_post("taken")).await.unwrap_err();
    let db_err = err.as_database_error().expect("database error");
    assert_eq!(db_err.code().as_deref(), Some("23505"));
    assert_eq!(db_err.constraint(), Some("uq_posts_slug_active"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_of_deleted_post_is_none(pool: PgPool) {
    let post = PostRepo::create(&pool, &new_post("no-update")).await.unwrap();
    PostRepo::soft_delete(&pool, post.id).await.unwrap();

    let update = UpdatePost {
        title: Some("changed".to_string()),
        ..Default::default()
    };
    assert!(PostRepo::update(&pool, post.id, &update).await.unwrap().is_none());
}

// ---------------------------------------------------------------------------
// Memos
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_deleted_memo_is_hidden(pool: PgPool) {
    let memo = MemoRepo::create(&pool, &new_memo("short note")).await.unwrap();

    assert!(MemoRepo::soft_delete(&pool, memo.id).await.unwrap());
    assert!(!MemoRepo::soft_delete(&pool, memo.id).await.unwrap());

    assert!(MemoRepo::find_by_id(&pool, memo.id, false).await.unwrap().is_none());
    assert_eq!(MemoRepo::count(&pool, false).await.unwrap(), 0);

    let update = UpdateMemo {
        content: Some("edited".to_string()),
        is_published: None,
    };
    assert!(MemoRepo::update(&pool, memo.id, &update).await.unwrap().is_none());
}
