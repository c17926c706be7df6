use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use studybuddy_core::{Difficulty, Mode, Provider};
use tracing::{info, warn};

use crate::backend::{GeminiBackend, OpenRouterBackend, TextBackend};
use crate::error::{GatewayError, ProviderError};
use crate::prompt::build_prompt;

/// Presentation cleanup applied to non-quiz output before display.
///
/// Quiz output bypasses this so its strict format stays machine-parsable.
pub trait Sanitizer: Send + Sync {
    fn sanitize(&self, raw: &str) -> String;
}

/// Sanitizer that returns the text untouched.
#[derive(Clone, Copy, Debug, Default)]
pub struct PassthroughSanitizer;

impl Sanitizer for PassthroughSanitizer {
    fn sanitize(&self, raw: &str) -> String {
        raw.to_owned()
    }
}

/// Retry and timeout policy for a single backend.
#[derive(Clone, Copy, Debug)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub backoff_start: Duration,
    pub backoff_cap: Duration,
    pub call_timeout: Duration,
}

impl RetryPolicy {
    pub fn with_timeout(call_timeout: Duration) -> Self {
        Self {
            call_timeout,
            ..Self::default()
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff_start: Duration::from_secs(1),
            backoff_cap: Duration::from_secs(4),
            call_timeout: Duration::from_secs(25),
        }
    }
}

/// A successful generation and the provider that actually served it.
#[derive(Clone, Debug, Serialize)]
pub struct GenerateOutcome {
    pub output_text: String,
    pub provider: Provider,
    pub warning: Option<String>,
    pub raw_text: String,
}

/// Issues generation requests against an ordered list of backends.
///
/// The preferred backend is tried first under the retry policy; each
/// remaining configured backend then gets one pass through the same policy.
pub struct ProviderGateway {
    backends: Vec<Arc<dyn TextBackend>>,
    sanitizer: Arc<dyn Sanitizer>,
    policy: RetryPolicy,
}

impl ProviderGateway {
    pub fn new(
        backends: Vec<Arc<dyn TextBackend>>,
        sanitizer: Arc<dyn Sanitizer>,
        policy: RetryPolicy,
    ) -> Self {
        Self {
            backends,
            sanitizer,
            policy,
        }
    }

    /// Build the default Gemini + OpenRouter pair from environment credentials.
    pub fn from_env(sanitizer: Arc<dyn Sanitizer>, policy: RetryPolicy) -> Self {
        let http = reqwest::Client::new();
        Self::new(
            vec![
                Arc::new(GeminiBackend::from_env(http.clone())),
                Arc::new(OpenRouterBackend::from_env(http)),
            ],
            sanitizer,
            policy,
        )
    }

    /// Whether the named provider has credentials available.
    pub fn is_configured(&self, provider: Provider) -> bool {
        self.backends
            .iter()
            .any(|backend| backend.provider() == provider && backend.is_configured())
    }

    pub async fn generate(
        &self,
        topic: &str,
        mode: Mode,
        difficulty: Difficulty,
        preferred: Provider,
    ) -> Result<GenerateOutcome, GatewayError> {
        let prompt = build_prompt(topic, mode, difficulty);

        for backend in self.in_preference_order(preferred) {
            let provider = backend.provider();
            if !backend.is_configured() {
                info!(
                    provider = provider.as_str(),
                    "skipping unconfigured provider"
                );
                continue;
            }

            match self.call_with_retry(backend.as_ref(), &prompt).await {
                Ok(raw_text) => {
                    let warning = (provider != preferred).then(|| {
                        format!(
                            "⚠️ {} unavailable. Switched to {} backup.",
                            preferred.display_name(),
                            provider.display_name()
                        )
                    });
                    let output_text = match mode {
                        Mode::Quiz => raw_text.clone(),
                        _ => self.sanitizer.sanitize(&raw_text),
                    };
                    return Ok(GenerateOutcome {
                        output_text,
                        provider,
                        warning,
                        raw_text,
                    });
                }
                Err(error) => {
                    warn!(
                        provider = provider.as_str(),
                        mode = mode.as_str(),
                        difficulty = difficulty.as_str(),
                        %error,
                        "provider exhausted, moving to next backend"
                    );
                }
            }
        }

        Err(GatewayError::ProvidersExhausted)
    }

    fn in_preference_order(&self, preferred: Provider) -> Vec<Arc<dyn TextBackend>> {
        let mut ordered = self.backends.clone();
        // Stable sort: the preferred backend moves to the front, everything
        // else keeps its declared order.
        ordered.sort_by_key(|backend| backend.provider() != preferred);
        ordered
    }

    async fn call_with_retry(
        &self,
        backend: &dyn TextBackend,
        prompt: &str,
    ) -> Result<String, ProviderError> {
        let max_attempts = self.policy.max_attempts.max(1);
        let mut delay = self.policy.backoff_start;
        let mut last_error = ProviderError::Empty;

        for attempt in 1..=max_attempts {
            let outcome =
                tokio::time::timeout(self.policy.call_timeout, backend.generate(prompt)).await;

            let error = match outcome {
                Ok(Ok(text)) => {
                    let trimmed = text.trim();
                    if trimmed.is_empty() {
                        ProviderError::Empty
                    } else {
                        return Ok(trimmed.to_owned());
                    }
                }
                Ok(Err(error)) => error,
                Err(_) => ProviderError::Timeout(self.policy.call_timeout),
            };

            warn!(
                provider = backend.provider().as_str(),
                attempt,
                max_attempts,
                %error,
                "provider call failed"
            );

            if !error.is_transient() {
                return Err(error);
            }

            last_error = error;
            if attempt < max_attempts {
                tokio::time::sleep(delay).await;
                delay = (delay * 2).min(self.policy.backoff_cap);
            }
        }

        Err(last_error)
    }
}
