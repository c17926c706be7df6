use sqlx::sqlite::SqlitePoolOptions;
use studybuddy_database::impls::{leaderboard, quiz_scores, users, xp};
use studybuddy_database::{Database, MIGRATOR};

async fn test_db() -> Database {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory sqlite pool");
    MIGRATOR.run(&pool).await.expect("migrations apply");
    Database::new(pool)
}

#[tokio::test]
async fn awards_accumulate_and_negative_points_clamp() {
    let db = test_db().await;
    let user_id = users::create_user(&db, "ada", "🧠").await.unwrap();

    let total = xp::award_xp(&db, user_id, 20, "quiz_submit").await.unwrap();
    assert_eq!(total, 20);

    let total = xp::award_xp(&db, user_id, -5, "correction").await.unwrap();
    assert_eq!(total, 20);

    let events = xp::list_recent_xp_events(&db, user_id, 10).await.unwrap();
    assert_eq!(events.len(), 2);
    // Newest first.
    assert_eq!(events[0].action, "correction");
    assert_eq!(events[0].points, 0);
    assert_eq!(events[1].action, "quiz_submit");
    assert_eq!(events[1].points, 20);
}

#[tokio::test]
async fn concurrent_awards_do_not_lose_updates() {
    let db = test_db().await;
    let user_id = users::create_user(&db, "ada", "🧠").await.unwrap();

    let (a, b, c) = tokio::join!(
        xp::award_xp(&db, user_id, 10, "chat_explain"),
        xp::award_xp(&db, user_id, 15, "chat_quiz"),
        xp::award_xp(&db, user_id, 5, "chat_summarize"),
    );
    a.unwrap();
    b.unwrap();
    c.unwrap();

    let user = users::get_user(&db, user_id).await.unwrap().unwrap();
    assert_eq!(user.xp, 30);

    let events = xp::list_recent_xp_events(&db, user_id, 10).await.unwrap();
    assert_eq!(events.len(), 3);
    assert_eq!(events.iter().map(|event| event.points).sum::<i64>(), 30);
}

#[tokio::test]
async fn awarding_an_unknown_user_fails_without_an_event() {
    let db = test_db().await;

    assert!(xp::award_xp(&db, 999, 10, "chat_explain").await.is_err());

    let events = xp::list_recent_xp_events(&db, 999, 10).await.unwrap();
    assert!(events.is_empty());
}

#[tokio::test]
async fn duplicate_usernames_are_rejected() {
    let db = test_db().await;
    users::create_user(&db, "ada", "🧠").await.unwrap();

    let error = users::create_user(&db, "ada", "🦊")
        .await
        .expect_err("username is unique");
    let is_unique_violation = error
        .downcast_ref::<sqlx::Error>()
        .and_then(|e| e.as_database_error())
        .is_some_and(|e| e.is_unique_violation());
    assert!(is_unique_violation);
}

#[tokio::test]
async fn unknown_avatars_fall_back_to_the_default() {
    let db = test_db().await;
    let user_id = users::create_user(&db, "ada", "🍕").await.unwrap();

    let user = users::get_user(&db, user_id).await.unwrap().unwrap();
    assert_eq!(user.avatar, "🧙");
}

#[tokio::test]
async fn leaderboard_ranks_ties_without_compression() {
    let db = test_db().await;
    for (name, points) in [("a", 100), ("b", 100), ("c", 100), ("d", 40)] {
        let user_id = users::create_user(&db, name, "🧠").await.unwrap();
        xp::award_xp(&db, user_id, points, "seed").await.unwrap();
    }

    let entries = leaderboard::leaderboard(&db, 20).await.unwrap();
    let ranks: Vec<(usize, String)> = entries
        .iter()
        .map(|entry| (entry.rank, entry.username.clone()))
        .collect();

    assert_eq!(
        ranks,
        vec![
            (1, "a".to_owned()),
            (1, "b".to_owned()),
            (1, "c".to_owned()),
            (4, "d".to_owned()),
        ]
    );
    assert_eq!(entries[0].level.name, "Bronze");
}

#[tokio::test]
async fn quiz_history_filters_and_stats_aggregate() {
    let db = test_db().await;
    let user_id = users::create_user(&db, "ada", "🧠").await.unwrap();

    quiz_scores::insert_quiz_score(
        &db,
        quiz_scores::NewQuizScore {
            user_id,
            topic: "Geometry",
            score: 4,
            total: 5,
            difficulty: "Medium",
            provider: Some("gemini"),
        },
    )
    .await
    .unwrap();
    quiz_scores::insert_quiz_score(
        &db,
        quiz_scores::NewQuizScore {
            user_id,
            topic: "Algebra",
            score: 2,
            total: 4,
            difficulty: "Easy",
            provider: None,
        },
    )
    .await
    .unwrap();

    let all = quiz_scores::list_quiz_scores(&db, user_id, None, 10)
        .await
        .unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].topic, "Algebra");

    let filtered = quiz_scores::list_quiz_scores(&db, user_id, Some("Geo"), 10)
        .await
        .unwrap();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].topic, "Geometry");

    let stats = quiz_scores::quiz_stats(&db, user_id).await.unwrap();
    assert_eq!(stats.attempts, 2);
    assert_eq!(stats.total_score, 6);
    assert_eq!(stats.total_questions, 9);
    // (80% + 50%) / 2
    assert_eq!(stats.average_percent, 65.0);
}

#[tokio::test]
async fn stats_for_a_user_without_attempts_are_zeroed() {
    let db = test_db().await;
    let user_id = users::create_user(&db, "ada", "🧠").await.unwrap();

    let stats = quiz_scores::quiz_stats(&db, user_id).await.unwrap();
    assert_eq!(stats.attempts, 0);
    assert_eq!(stats.total_score, 0);
    assert_eq!(stats.total_questions, 0);
    assert_eq!(stats.average_percent, 0.0);
}
