use serde::Serialize;

/// A saved quiz attempt.
#[derive(Clone, Debug, Serialize)]
pub struct QuizScore {
    pub topic: String,
    pub score: i64,
    pub total: i64,
    pub difficulty: String,
    pub provider: Option<String>,
    pub created_at: i64,
}

/// Aggregates over a user's quiz attempts.
#[derive(Clone, Debug, Serialize)]
pub struct QuizStats {
    pub attempts: i64,
    pub total_score: i64,
    pub total_questions: i64,
    pub average_percent: f64,
}
