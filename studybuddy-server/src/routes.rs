use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{error, info};

use studybuddy_ai::GatewayError;
use studybuddy_core::{
    Difficulty, MAX_TOPIC_LENGTH, Mode, Provider, assistant, level_for, xp as xp_rules,
};
use studybuddy_database::impls::{leaderboard, quiz_scores, users, xp};
use studybuddy_database::model::user::UserProfile;
use studybuddy_utils::clip_chars;

use crate::error::ApiError;
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/api/users", post(create_user))
        .route("/api/generate", post(generate))
        .route("/api/scores", post(save_score))
        .route("/api/history", get(history))
        .route("/api/stats", get(stats))
        .route("/api/leaderboard", get(get_leaderboard))
        .route("/api/xp/events", get(xp_events))
        .route("/api/assistant", post(assistant_reply))
        .with_state(state)
}

/// Resolve the caller from the identity header the upstream session layer
/// injects after authentication.
async fn current_user(state: &AppState, headers: &HeaderMap) -> Result<UserProfile, ApiError> {
    let user_id = headers
        .get("x-user-id")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse::<i64>().ok())
        .ok_or(ApiError::Unauthenticated)?;

    users::get_user(&state.db, user_id)
        .await
        .map_err(ApiError::Internal)?
        .ok_or(ApiError::Unauthenticated)
}

fn client_key(headers: &HeaderMap) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .map(|value| value.split(',').next().unwrap_or(value).trim().to_owned())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| "local".to_owned())
}

async fn healthz(State(state): State<AppState>) -> Json<Value> {
    let database = match sqlx::query("SELECT 1").execute(state.db.pool()).await {
        Ok(_) => "ok",
        Err(err) => {
            error!(error = ?err, "database health check failed");
            "error"
        }
    };

    Json(json!({
        "status": if database == "ok" { "ok" } else { "degraded" },
        "database": database,
        "gemini_configured": state.gateway.is_configured(Provider::Gemini),
        "openrouter_configured": state.gateway.is_configured(Provider::OpenRouter),
    }))
}

#[derive(Deserialize)]
struct CreateUserRequest {
    username: String,
    #[serde(default)]
    avatar: String,
}

async fn create_user(
    State(state): State<AppState>,
    Json(payload): Json<CreateUserRequest>,
) -> Result<Json<Value>, ApiError> {
    let username = payload.username.trim().to_owned();
    if username.chars().count() < 3 {
        return Err(ApiError::Validation(
            "Username must be at least 3 characters.".to_owned(),
        ));
    }

    match users::create_user(&state.db, &username, &payload.avatar).await {
        Ok(user_id) => Ok(Json(json!({ "id": user_id, "username": username }))),
        Err(err) => {
            let duplicate = err
                .downcast_ref::<sqlx::Error>()
                .and_then(|e| e.as_database_error())
                .is_some_and(|e| e.is_unique_violation());
            if duplicate {
                Err(ApiError::Validation(
                    "Username already exists. Try another one.".to_owned(),
                ))
            } else {
                Err(ApiError::Internal(err))
            }
        }
    }
}

#[derive(Deserialize)]
struct GenerateRequest {
    topic: String,
    #[serde(default)]
    mode: String,
    #[serde(default)]
    difficulty: String,
    #[serde(default)]
    provider: String,
}

async fn generate(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<GenerateRequest>,
) -> Result<Json<Value>, ApiError> {
    let user = current_user(&state, &headers).await?;
    if !state.limiter.allow(&client_key(&headers)) {
        return Err(ApiError::RateLimited);
    }

    let topic = clip_chars(payload.topic.trim(), MAX_TOPIC_LENGTH);
    if topic.is_empty() {
        return Err(ApiError::Validation(
            "Please enter prompt text to study.".to_owned(),
        ));
    }

    let mode = Mode::parse_or_default(&payload.mode);
    let difficulty = Difficulty::parse_or_default(&payload.difficulty);
    let preferred = Provider::parse_or_default(&payload.provider);

    let outcome = match state.gateway.generate(topic, mode, difficulty, preferred).await {
        Ok(outcome) => outcome,
        Err(GatewayError::ProvidersExhausted) => {
            error!(
                mode = mode.as_str(),
                difficulty = difficulty.as_str(),
                "AI generation failed on every backend"
            );
            return Err(ApiError::ProvidersUnavailable);
        }
    };

    let earned = xp_rules::xp_for_mode(mode);
    let total_xp = xp::award_xp(
        &state.db,
        user.id,
        earned,
        &format!("chat_{}", mode.as_str()),
    )
    .await
    .map_err(ApiError::Internal)?;

    info!(
        user_id = user.id,
        mode = mode.as_str(),
        provider = outcome.provider.as_str(),
        earned,
        "generation served"
    );

    Ok(Json(json!({
        "response": outcome.output_text,
        "raw_response": outcome.raw_text,
        "provider": outcome.provider,
        "warning": outcome.warning,
        "xp_earned": earned,
        "total_xp": total_xp,
        "level": level_for(total_xp),
    })))
}

#[derive(Deserialize)]
struct SaveScoreRequest {
    #[serde(default)]
    topic: String,
    score: i64,
    total: i64,
    #[serde(default)]
    difficulty: String,
    #[serde(default)]
    provider: String,
}

async fn save_score(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<SaveScoreRequest>,
) -> Result<Json<Value>, ApiError> {
    let user = current_user(&state, &headers).await?;
    if !state.limiter.allow(&client_key(&headers)) {
        return Err(ApiError::RateLimited);
    }

    let difficulty = payload.difficulty.trim();
    if !matches!(difficulty, "Easy" | "Medium" | "Hard") {
        return Err(ApiError::Validation("Invalid difficulty".to_owned()));
    }
    if payload.total <= 0 || payload.score < 0 || payload.score > payload.total {
        return Err(ApiError::Validation("Invalid score range".to_owned()));
    }

    let topic = clip_chars(payload.topic.trim(), 300);
    let topic = if topic.is_empty() { "Untitled topic" } else { topic };
    let provider = payload.provider.trim();
    let provider = (!provider.is_empty()).then_some(provider);

    quiz_scores::insert_quiz_score(
        &state.db,
        quiz_scores::NewQuizScore {
            user_id: user.id,
            topic,
            score: payload.score,
            total: payload.total,
            difficulty,
            provider,
        },
    )
    .await
    .map_err(ApiError::Internal)?;

    let gained = xp_rules::xp_for_quiz_submit(payload.score);
    let total_xp = xp::award_xp(&state.db, user.id, gained, "quiz_submit")
        .await
        .map_err(ApiError::Internal)?;

    Ok(Json(json!({
        "status": "saved",
        "xp_gained": gained,
        "total_xp": total_xp,
    })))
}

#[derive(Deserialize)]
struct HistoryQuery {
    limit: Option<u32>,
    q: Option<String>,
}

async fn history(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<Value>, ApiError> {
    let user = current_user(&state, &headers).await?;

    let rows = quiz_scores::list_quiz_scores(
        &state.db,
        user.id,
        query.q.as_deref(),
        query.limit.unwrap_or(10),
    )
    .await
    .map_err(ApiError::Internal)?;

    Ok(Json(json!(rows)))
}

async fn stats(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Value>, ApiError> {
    let user = current_user(&state, &headers).await?;

    let stats = quiz_scores::quiz_stats(&state.db, user.id)
        .await
        .map_err(ApiError::Internal)?;

    Ok(Json(json!({
        "attempts": stats.attempts,
        "total_score": stats.total_score,
        "total_questions": stats.total_questions,
        "average_percent": stats.average_percent,
        "xp": user.xp,
    })))
}

#[derive(Deserialize)]
struct LeaderboardQuery {
    limit: Option<u32>,
}

async fn get_leaderboard(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<LeaderboardQuery>,
) -> Result<Json<Value>, ApiError> {
    current_user(&state, &headers).await?;

    let entries = leaderboard::leaderboard(&state.db, query.limit.unwrap_or(20))
        .await
        .map_err(ApiError::Internal)?;

    Ok(Json(json!(entries)))
}

#[derive(Deserialize)]
struct XpEventsQuery {
    limit: Option<u32>,
}

async fn xp_events(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<XpEventsQuery>,
) -> Result<Json<Value>, ApiError> {
    let user = current_user(&state, &headers).await?;

    let events = xp::list_recent_xp_events(&state.db, user.id, query.limit.unwrap_or(25))
        .await
        .map_err(ApiError::Internal)?;

    Ok(Json(json!({
        "xp": user.xp,
        "level": level_for(user.xp),
        "events": events,
        "rules": {
            "explain": xp_rules::xp_for_mode(Mode::Explain),
            "summarize": xp_rules::xp_for_mode(Mode::Summarize),
            "flashcards": xp_rules::xp_for_mode(Mode::Flashcards),
            "quiz": xp_rules::xp_for_mode(Mode::Quiz),
            "quiz_submit_base": xp_rules::QUIZ_SUBMIT_BASE_XP,
            "per_correct_answer": xp_rules::PER_CORRECT_ANSWER_XP,
        },
    })))
}

#[derive(Deserialize)]
struct AssistantRequest {
    message: String,
}

async fn assistant_reply(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<AssistantRequest>,
) -> Result<Json<Value>, ApiError> {
    let user = current_user(&state, &headers).await?;

    let message = clip_chars(payload.message.trim(), 1200);
    if message.is_empty() {
        return Err(ApiError::Validation("Message is required".to_owned()));
    }

    Ok(Json(json!({
        "reply": assistant::canned_reply(message, &user.username),
        "provider": "local-faq",
        "warning": null,
        "quote": assistant::motivation_quote(),
    })))
}
