use serde::Serialize;

/// One point-earning event from the append-only ledger.
#[derive(Clone, Debug, Serialize)]
pub struct XpEvent {
    pub action: String,
    pub points: i64,
    pub created_at: i64,
}
