//! First-user bootstrap: exactly one admin can be created, and only while
//! the users table is empty.

use quill_core::roles::{ROLE_ADMIN, ROLE_USER};
use quill_db::models::user::CreateUser;
use quill_db::repositories::UserRepo;
use sqlx::PgPool;

fn new_user(username: &str) -> CreateUser {
    CreateUser {
        username: username.to_string(),
        email: format!("{username}@example.com"),
        password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".to_string(),
        role: ROLE_USER.to_string(),
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_first_user_becomes_admin(pool: PgPool) {
    let user = UserRepo::create_first_admin(&pool, &new_user("owner"))
        .await
        .unwrap()
        .expect("first user should be created");

    assert_eq!(user.role, ROLE_ADMIN);
    assert_eq!(UserRepo::count(&pool).await.unwrap(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_second_bootstrap_is_noop(pool: PgPool) {
    UserRepo::create_first_admin(&pool, &new_user("owner")).await.unwrap();

    let second = UserRepo::create_first_admin(&pool, &new_user("intruder"))
        .await
        .unwrap();

    assert!(second.is_none());
    assert_eq!(UserRepo::count(&pool).await.unwrap(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_concurrent_bootstrap_creates_one(pool: PgPool) {
    let (alpha, beta) = (new_user("alpha"), new_user("beta"));
    let (a, b) = tokio::join!(
        UserRepo::create_first_admin(&pool, &alpha),
        UserRepo::create_first_admin(&pool, &beta),
    );

    let created = [a.unwrap(), b.unwrap()].into_iter().flatten().count();
    assert_eq!(created, 1);
    assert_eq!(UserRepo::count(&pool).await.unwrap(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_find_by_username_or_email(pool: PgPool) {
    let user = UserRepo::create_first_admin(&pool, &new_user("owner"))
        .await
        .unwrap()
        .unwrap();

    let by_name = UserRepo::find_by_identifier(&pool, "owner").await.unwrap();
    let by_email = UserRepo::find_by_identifier(&pool, "owner@example.com").await.unwrap();

    assert_eq!(by_name.map(|u| u.id), Some(user.id));
    assert_eq!(by_email.map(|u| u.id), Some(user.id));
    assert!(UserRepo::find_by_identifier(&pool, "nobody").await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_role_check_constraint(pool: PgPool) {
    let mut input = new_user("owner");
    input.role = "superuser".to_string();

    assert!(UserRepo::create(&pool, &input).await.is_err());
}
