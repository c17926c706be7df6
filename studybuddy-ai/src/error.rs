use std::time::Duration;

/// A single backend call's failure, classified for the retry policy.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("provider returned status {status}")]
    Api { status: u16, message: String },

    #[error("provider returned an empty response")]
    Empty,

    #[error("call exceeded the {0:?} budget")]
    Timeout(Duration),

    #[error("provider credential is not configured")]
    NotConfigured,

    #[error("could not parse provider response: {0}")]
    InvalidResponse(String),
}

impl ProviderError {
    /// Whether the retry/fallback machinery should try again.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::NotConfigured => false,
            Self::Api { status, .. } => *status == 429 || *status >= 500,
            Self::Http(_) | Self::Empty | Self::Timeout(_) | Self::InvalidResponse(_) => true,
        }
    }
}

/// The only gateway failure that crosses the component boundary.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("all AI providers are unavailable")]
    ProvidersExhausted,
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::ProviderError;

    #[test]
    fn classification_matches_the_retry_policy() {
        assert!(ProviderError::Empty.is_transient());
        assert!(ProviderError::Timeout(Duration::from_secs(1)).is_transient());
        assert!(
            ProviderError::Api {
                status: 429,
                message: String::new()
            }
            .is_transient()
        );
        assert!(
            ProviderError::Api {
                status: 503,
                message: String::new()
            }
            .is_transient()
        );

        assert!(!ProviderError::NotConfigured.is_transient());
        assert!(
            !ProviderError::Api {
                status: 400,
                message: String::new()
            }
            .is_transient()
        );
    }
}
