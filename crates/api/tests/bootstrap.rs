//! Startup admin creation.

use quill_api::auth::password::verify_password;
use quill_api::bootstrap::ensure_admin;
use quill_api::config::BootstrapAdmin;
use quill_db::repositories::UserRepo;
use sqlx::PgPool;

fn admin() -> BootstrapAdmin {
    BootstrapAdmin {
        username: "admin".into(),
        email: "admin@localhost".into(),
        password: "changeme123".into(),
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn creates_admin_on_empty_database(pool: PgPool) {
    let user = ensure_admin(&pool, &admin())
        .await
        .unwrap()
        .expect("admin should be created");

    assert_eq!(user.role, "admin");
    assert_eq!(user.username, "admin");
    assert!(verify_password("changeme123", &user.password_hash));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn is_noop_once_a_user_exists(pool: PgPool) {
    ensure_admin(&pool, &admin()).await.unwrap();

    let again = BootstrapAdmin {
        username: "other".into(),
        ..admin()
    };
    assert!(ensure_admin(&pool, &again).await.unwrap().is_none());
    assert_eq!(UserRepo::count(&pool).await.unwrap(), 1);
}
