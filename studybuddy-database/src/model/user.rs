use serde::Serialize;

/// A user's public profile with the current XP total.
#[derive(Clone, Debug, Serialize)]
pub struct UserProfile {
    pub id: i64,
    pub username: String,
    pub avatar: String,
    pub xp: i64,
    pub created_at: i64,
}
