pub mod backend;
pub mod error;
pub mod gateway;
pub mod prompt;

pub use backend::{GeminiBackend, OpenRouterBackend, TextBackend};
pub use error::{GatewayError, ProviderError};
pub use gateway::{GenerateOutcome, PassthroughSanitizer, ProviderGateway, RetryPolicy, Sanitizer};
