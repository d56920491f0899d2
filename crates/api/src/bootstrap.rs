//! Startup creation of the first admin account.

use quill_core::roles::ROLE_ADMIN;
use quill_db::models::user::{CreateUser, User};
use quill_db::repositories::UserRepo;

use crate::auth::password::hash_password;
use crate::config::BootstrapAdmin;
use crate::error::{AppError, AppResult};

/// Create the configured admin if no user exists yet.
///
/// Shares the first-user-only insert with registration, so this is a no-op
/// (returning `None`) once any account exists.
pub async fn ensure_admin(
    pool: &quill_db::DbPool,
    admin: &BootstrapAdmin,
) -> AppResult<Option<User>> {
    if UserRepo::count(pool).await? > 0 {
        return Ok(None);
    }

    let password_hash = hash_password(&admin.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;
    let input = CreateUser {
        username: admin.username.clone(),
        email: admin.email.clone(),
        password_hash,
        role: ROLE_ADMIN.to_string(),
    };

    let created = UserRepo::create_first_admin(pool, &input).await?;
    if let Some(user) = &created {
        tracing::info!(user_id = user.id, username = %user.username, "Bootstrap admin created");
    }
    Ok(created)
}
