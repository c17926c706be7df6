pub mod leaderboard;
pub mod quiz_scores;
pub mod users;
pub mod xp;
