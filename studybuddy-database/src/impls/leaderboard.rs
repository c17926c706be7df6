use studybuddy_core::{LeaderboardEntry, Standing, rank_standings};

use crate::database::Database;

#[derive(sqlx::FromRow)]
struct StandingRow {
    username: String,
    avatar: String,
    xp: i64,
}

/// Current standings ranked with tie handling, truncated to `limit`.
///
/// The query orders by (xp desc, id asc) so equal totals resolve by
/// creation order, and the ranker preserves that order.
pub async fn leaderboard(db: &Database, limit: u32) -> anyhow::Result<Vec<LeaderboardEntry>> {
    let limit = limit.clamp(1, 100);

    let rows: Vec<StandingRow> = sqlx::query_as(
        "SELECT username, avatar, xp FROM users ORDER BY xp DESC, id ASC LIMIT ?",
    )
    .bind(i64::from(limit))
    .fetch_all(db.pool())
    .await?;

    let standings = rows
        .into_iter()
        .map(|row| Standing {
            username: row.username,
            avatar: row.avatar,
            xp: row.xp,
        })
        .collect();

    Ok(rank_standings(standings, limit as usize))
}
