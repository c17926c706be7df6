use crate::impls::xp::now_unix_secs;
use crate::{
    database::Database,
    model::quiz::{QuizScore, QuizStats},
};

/// A quiz attempt ready to be recorded.
pub struct NewQuizScore<'a> {
    pub user_id: i64,
    pub topic: &'a str,
    pub score: i64,
    pub total: i64,
    pub difficulty: &'a str,
    pub provider: Option<&'a str>,
}

pub async fn insert_quiz_score(db: &Database, score: NewQuizScore<'_>) -> anyhow::Result<()> {
    sqlx::query(
        "INSERT INTO quiz_scores (user_id, topic, score, total, difficulty, provider, created_at)
         VALUES (?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(score.user_id)
    .bind(score.topic)
    .bind(score.score)
    .bind(score.total)
    .bind(score.difficulty)
    .bind(score.provider)
    .bind(now_unix_secs())
    .execute(db.pool())
    .await?;

    Ok(())
}

#[derive(sqlx::FromRow)]
struct QuizScoreRow {
    topic: String,
    score: i64,
    total: i64,
    difficulty: String,
    provider: Option<String>,
    created_at: i64,
}

/// A user's saved attempts, newest first, optionally filtered by topic substring.
pub async fn list_quiz_scores(
    db: &Database,
    user_id: i64,
    topic_filter: Option<&str>,
    limit: u32,
) -> anyhow::Result<Vec<QuizScore>> {
    let limit_i64 = i64::from(limit.clamp(1, 100));

    let rows: Vec<QuizScoreRow> = match topic_filter.map(str::trim).filter(|q| !q.is_empty()) {
        Some(q) => {
            sqlx::query_as(
                "SELECT topic, score, total, difficulty, provider, created_at
                 FROM quiz_scores
                 WHERE user_id = ? AND topic LIKE ?
                 ORDER BY id DESC
                 LIMIT ?",
            )
            .bind(user_id)
            .bind(format!("%{q}%"))
            .bind(limit_i64)
            .fetch_all(db.pool())
            .await?
        }
        None => {
            sqlx::query_as(
                "SELECT topic, score, total, difficulty, provider, created_at
                 FROM quiz_scores
                 WHERE user_id = ?
                 ORDER BY id DESC
                 LIMIT ?",
            )
            .bind(user_id)
            .bind(limit_i64)
            .fetch_all(db.pool())
            .await?
        }
    };

    Ok(rows
        .into_iter()
        .map(|row| QuizScore {
            topic: row.topic,
            score: row.score,
            total: row.total,
            difficulty: row.difficulty,
            provider: row.provider,
            created_at: row.created_at,
        })
        .collect())
}

/// Aggregate a user's attempts into dashboard stats.
pub async fn quiz_stats(db: &Database, user_id: i64) -> anyhow::Result<QuizStats> {
    #[derive(sqlx::FromRow)]
    struct StatsRow {
        attempts: i64,
        total_score: i64,
        total_questions: i64,
        avg_percent: f64,
    }

    let row: StatsRow = sqlx::query_as(
        "SELECT
            COUNT(*) AS attempts,
            COALESCE(SUM(score), 0) AS total_score,
            COALESCE(SUM(total), 0) AS total_questions,
            COALESCE(AVG(CASE WHEN total > 0 THEN score * 100.0 / total END), 0.0) AS avg_percent
         FROM quiz_scores
         WHERE user_id = ?",
    )
    .bind(user_id)
    .fetch_one(db.pool())
    .await?;

    Ok(QuizStats {
        attempts: row.attempts,
        total_score: row.total_score,
        total_questions: row.total_questions,
        average_percent: (row.avg_percent * 100.0).round() / 100.0,
    })
}
