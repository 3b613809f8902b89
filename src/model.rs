//! # Language Model Module
//!
//! This module provides the text-sampling capability the scene generator
//! depends on, plus a client that backs it with a rate-limited LLM service.
//!
//! ## Key Components
//!
//! - `LanguageModel`: the capability trait (`sample_text`)
//! - `SampleOptions`: character/token caps and sampling knobs for one call
//! - `CompletionSampler`: adapts any `rig` completion model to `LanguageModel`
//! - `RateLimitedCompletionModel`: a wrapper that adds rate limiting to any completion model
//! - `Client`: holds a completion model and hands out samplers
//!
//! ## Features
//!
//! - Configurable rate limiting with different quotas (standard and free tiers)
//! - Environment variable configuration for API keys
//! - Instrumentation with tracing spans for monitoring
//! - Mock models for tests (`mock_model`)

use std::future::Future;
use std::num::NonZeroU32;

use governor::{Quota, RateLimiter};
use rig::{completion::CompletionModel, providers::gemini};

use crate::error::{Error, Result};

pub mod mock_model;
pub mod ratelimited_completion;
pub mod sampler;

pub use ratelimited_completion::RateLimitedCompletionModel;
pub use sampler::CompletionSampler;

/// Default cap on the length of sampled text, in characters
pub const DEFAULT_MAX_CHARACTERS: usize = 3500;

/// Default cap on the length of sampled text, in tokens
pub const DEFAULT_MAX_TOKENS: u64 = 3500;

/// Limits and sampling parameters for a single `sample_text` call
#[derive(Debug, Clone, PartialEq)]
pub struct SampleOptions {
    /// Maximum number of characters returned
    pub max_characters: usize,

    /// Maximum number of tokens the model may generate
    pub max_tokens: u64,

    /// Sampling temperature, provider default when unset
    pub temperature: Option<f64>,

    /// Text is cut at the first occurrence of any of these
    pub terminators: Vec<String>,
}

impl Default for SampleOptions {
    fn default() -> Self {
        Self {
            max_characters: DEFAULT_MAX_CHARACTERS,
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: None,
            terminators: Vec::new(),
        }
    }
}

/// A generative text model.
///
/// Implementations decide how the text is produced (provider, retries,
/// timeouts). Failures are reported through the associated `Error` type so
/// callers can surface them unchanged.
pub trait LanguageModel: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Sample text continuing `prompt`.
    fn sample_text(
        &self,
        prompt: &str,
        options: &SampleOptions,
    ) -> impl Future<Output = std::result::Result<String, Self::Error>> + Send;
}

#[derive(Debug, Clone)]
pub struct Client<C>
where
    C: CompletionModel,
{
    completion_model: C,
}

pub struct RateLimitResponse<T> {
    response: T,
}

impl<T> RateLimitResponse<T> {
    /// The provider's raw response
    pub fn into_inner(self) -> T {
        self.response
    }
}

impl Client<RateLimitedCompletionModel<gemini::completion::CompletionModel>> {
    pub fn new_gemini_from_env() -> Result<Self> {
        let gemini_api_key = std::env::var("GEMINI_API_KEY")
            .map_err(|_| Error::Auth("GEMINI_API_KEY environment variable must be set".into()))?;
        let gemini_client = gemini::Client::new(&gemini_api_key);
        Ok(Self::new_gemini(gemini_client))
    }

    pub fn new_gemini_free_from_env() -> Result<Self> {
        let gemini_api_key = std::env::var("GEMINI_FREE_API_KEY").map_err(|_| {
            Error::Auth("GEMINI_FREE_API_KEY environment variable must be set".into())
        })?;
        let gemini_client = gemini::Client::new(&gemini_api_key);
        Ok(Self::new_gemini_free(gemini_client))
    }

    pub fn new_gemini(gemini_client: gemini::Client) -> Self {
        let completion_limiter = RateLimiter::direct(Quota::per_minute(
            NonZeroU32::new(2000).expect("must create rate limit"),
        ));
        let completion_model = RateLimitedCompletionModel::new(
            gemini_client.completion_model("gemini-2.0-flash"),
            completion_limiter,
        );
        Self::new(completion_model)
    }

    pub fn new_gemini_free(gemini_client: gemini::Client) -> Self {
        let completion_limiter = RateLimiter::direct(Quota::per_minute(
            NonZeroU32::new(30).expect("must create rate limit"),
        ));
        let completion_model = RateLimitedCompletionModel::new(
            gemini_client.completion_model("gemini-2.0-flash-lite"),
            completion_limiter,
        );
        Self::new(completion_model)
    }
}

impl<C> Client<C>
where
    C: CompletionModel,
{
    pub fn new(completion_model: C) -> Self {
        Self { completion_model }
    }

    pub fn completion(&self) -> &C {
        &self.completion_model
    }

    /// A `LanguageModel` backed by this client's completion model
    pub fn language_model(&self) -> CompletionSampler<C> {
        CompletionSampler::new(self.completion_model.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mock_model::MockCompletionModel;

    #[test]
    fn test_sample_options_default() {
        let options = SampleOptions::default();

        assert_eq!(options.max_characters, 3500);
        assert_eq!(options.max_tokens, 3500);
        assert!(options.temperature.is_none());
        assert!(options.terminators.is_empty());
    }

    #[tokio::test]
    async fn test_client_language_model_uses_completion_model() {
        let mock = MockCompletionModel::new();
        mock.set_text_response("hello").await;
        let client = Client::new(mock.clone());

        let text = client
            .language_model()
            .sample_text("say hello", &SampleOptions::default())
            .await
            .unwrap();

        assert_eq!(text, "hello");
        assert_eq!(mock.requests().await.len(), 1);
    }
}
