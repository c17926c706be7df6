use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Context as _;
use tracing::debug;

use crate::{database::Database, model::xp::XpEvent};

/// Award points to a user and append the matching ledger event.
///
/// Negative awards clamp to zero. The increment and the event insert run in
/// one transaction, and the increment is a per-row SQL expression, so
/// concurrent awards for the same user cannot lose updates. Returns the
/// user's resulting total.
pub async fn award_xp(
    db: &Database,
    user_id: i64,
    points: i64,
    action: &str,
) -> anyhow::Result<i64> {
    let safe_points = points.max(0);
    let created_at = now_unix_secs();

    let mut tx = db
        .pool()
        .begin()
        .await
        .context("failed to open xp transaction")?;

    let updated = sqlx::query("UPDATE users SET xp = xp + ? WHERE id = ?")
        .bind(safe_points)
        .bind(user_id)
        .execute(&mut *tx)
        .await?;
    if updated.rows_affected() != 1 {
        anyhow::bail!("cannot award xp to unknown user {user_id}");
    }

    sqlx::query("INSERT INTO xp_events (user_id, action, points, created_at) VALUES (?, ?, ?, ?)")
        .bind(user_id)
        .bind(action)
        .bind(safe_points)
        .bind(created_at)
        .execute(&mut *tx)
        .await?;

    let (total,): (i64,) = sqlx::query_as("SELECT xp FROM users WHERE id = ?")
        .bind(user_id)
        .fetch_one(&mut *tx)
        .await?;

    tx.commit()
        .await
        .context("failed to commit xp transaction")?;

    debug!(user_id, points = safe_points, action, total, "xp awarded");
    Ok(total)
}

/// Most recent ledger events for a user, newest first.
pub async fn list_recent_xp_events(
    db: &Database,
    user_id: i64,
    limit: u32,
) -> anyhow::Result<Vec<XpEvent>> {
    let limit_i64 = i64::from(limit.clamp(1, 100));

    #[derive(sqlx::FromRow)]
    struct XpEventRow {
        action: String,
        points: i64,
        created_at: i64,
    }

    let rows: Vec<XpEventRow> = sqlx::query_as(
        "SELECT action, points, created_at
         FROM xp_events
         WHERE user_id = ?
         ORDER BY id DESC
         LIMIT ?",
    )
    .bind(user_id)
    .bind(limit_i64)
    .fetch_all(db.pool())
    .await?;

    Ok(rows
        .into_iter()
        .map(|row| XpEvent {
            action: row.action,
            points: row.points,
            created_at: row.created_at,
        })
        .collect())
}

pub(crate) fn now_unix_secs() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |duration| duration.as_secs() as i64)
}
