use std::sync::Arc;

use studybuddy_ai::ProviderGateway;
use studybuddy_database::Database;

use crate::rate_limit::RateLimiter;

/// Shared service handles, constructed once in `main` and injected everywhere.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub gateway: Arc<ProviderGateway>,
    pub limiter: Arc<RateLimiter>,
}
