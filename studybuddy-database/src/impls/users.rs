use studybuddy_core::normalize_avatar;

use crate::impls::xp::now_unix_secs;
use crate::{database::Database, model::user::UserProfile};

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    username: String,
    avatar: String,
    xp: i64,
    created_at: i64,
}

/// Insert a new user with zero XP and return the assigned id.
///
/// The avatar is resolved against the allowed set; username validation is
/// the caller's responsibility. A duplicate username surfaces as the
/// underlying unique-constraint error.
pub async fn create_user(db: &Database, username: &str, avatar: &str) -> anyhow::Result<i64> {
    let result =
        sqlx::query("INSERT INTO users (username, avatar, xp, created_at) VALUES (?, ?, 0, ?)")
            .bind(username.trim())
            .bind(normalize_avatar(avatar))
            .bind(now_unix_secs())
            .execute(db.pool())
            .await?;

    Ok(result.last_insert_rowid())
}

pub async fn get_user(db: &Database, user_id: i64) -> anyhow::Result<Option<UserProfile>> {
    let row: Option<UserRow> = sqlx::query_as(
        "SELECT id, username, avatar, xp, created_at FROM users WHERE id = ?",
    )
    .bind(user_id)
    .fetch_optional(db.pool())
    .await?;

    Ok(row.map(|row| UserProfile {
        id: row.id,
        username: row.username,
        avatar: row.avatar,
        xp: row.xp,
        created_at: row.created_at,
    }))
}
