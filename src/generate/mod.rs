// Melody generation pipeline - provider catalog, request/response model,
// rate limiting, and the retry orchestration over an injected backend

pub mod model;
pub mod provider;
pub mod rate_limit;
pub mod service;

pub use model::{GenerationMetadata, MelodyRequest, MelodyResponse};
pub use provider::{Provider, ProviderInfo, provider_catalog};
pub use rate_limit::RateLimiter;
pub use service::{GenerationService, MelodyGenerator, generate_validated};

/// Generation error types
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error("Rate limit exceeded, retry in {retry_after_secs}s")]
    RateLimitExceeded { retry_after_secs: u64 },

    /// User-initiated; callers treat this as a non-error outcome
    #[error("Generation cancelled")]
    Cancelled,

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Provider error: {0}")]
    Provider(String),
}
