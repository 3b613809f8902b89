//! # Mock Models for Testing
//!
//! Provides two test doubles that never make API calls:
//!
//! - `MockCompletionModel` implements `rig`'s `CompletionModel` and returns a
//!   predefined response or error, recording the requests it receives.
//! - `MockLanguageModel` implements `LanguageModel` directly and returns a
//!   fixed text or failure, recording every prompt and its options.

use rig::{
    completion::{
        AssistantContent, CompletionError, CompletionModel, CompletionRequest, CompletionResponse,
    },
    one_or_many::OneOrMany,
};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;

use super::{LanguageModel, SampleOptions};

/// Parameters of a completion request seen by `MockCompletionModel`
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub max_tokens: Option<u64>,
    pub temperature: Option<f64>,
}

/// A mock completion model for testing purposes.
/// It returns a predefined response or error when `completion` is called.
#[derive(Debug, Clone)]
pub struct MockCompletionModel {
    /// The predefined response to return. Arc<Mutex<>> allows modification after creation if needed.
    response: Arc<Mutex<Option<OneOrMany<AssistantContent>>>>,
    error: Arc<Mutex<Option<String>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockCompletionModel {
    /// Creates a new mock model that will return a default empty success response.
    pub fn new() -> Self {
        Self {
            response: Arc::new(Mutex::new(None)),
            error: Arc::new(Mutex::new(None)),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Sets the response that the mock model should return.
    pub async fn set_response(&self, response: OneOrMany<AssistantContent>) {
        let mut guard = self.response.lock().await;
        *guard = Some(response);
    }

    /// Helper to create a simple text response.
    pub async fn set_text_response(&self, text: &str) {
        let response = OneOrMany::one(AssistantContent::text(text));
        self.set_response(response).await;
    }

    /// Makes every following call fail with a provider error.
    pub async fn set_error(&self, message: &str) {
        let mut guard = self.error.lock().await;
        *guard = Some(message.to_string());
    }

    /// Requests received so far, oldest first.
    pub async fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().await.clone()
    }
}

impl Default for MockCompletionModel {
    fn default() -> Self {
        Self::new()
    }
}

impl CompletionModel for MockCompletionModel {
    type Response = String;

    async fn completion(
        &self,
        completion_request: CompletionRequest,
    ) -> Result<CompletionResponse<Self::Response>, CompletionError> {
        self.requests.lock().await.push(RecordedRequest {
            max_tokens: completion_request.max_tokens,
            temperature: completion_request.temperature,
        });

        if let Some(message) = self.error.lock().await.clone() {
            return Err(CompletionError::ProviderError(message));
        }

        let response = {
            let guard = self.response.lock().await;
            guard.clone()
        };
        match response {
            Some(result) => Ok(CompletionResponse {
                choice: result,
                raw_response: "".to_string(),
            }),
            None => Ok(CompletionResponse {
                choice: OneOrMany::one(AssistantContent::text("")),
                raw_response: "".to_string(),
            }),
        }
    }
}

/// Failure produced by `MockLanguageModel`
#[derive(Debug, Clone, PartialEq, Error)]
#[error("mock model failure: {0}")]
pub struct MockModelError(pub String);

/// One `sample_text` call seen by `MockLanguageModel`
#[derive(Debug, Clone, PartialEq)]
pub struct SampleCall {
    pub prompt: String,
    pub options: SampleOptions,
}

/// A `LanguageModel` returning a fixed text (or failure) for any prompt.
#[derive(Debug, Clone, Default)]
pub struct MockLanguageModel {
    response: String,
    failure: Option<String>,
    calls: Arc<Mutex<Vec<SampleCall>>>,
}

impl MockLanguageModel {
    /// A model that answers every prompt with `response`
    pub fn with_response(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
            ..Self::default()
        }
    }

    /// A model that fails every call with `message`
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            ..Self::default()
        }
    }

    /// Calls received so far, oldest first.
    pub async fn calls(&self) -> Vec<SampleCall> {
        self.calls.lock().await.clone()
    }
}

impl LanguageModel for MockLanguageModel {
    type Error = MockModelError;

    async fn sample_text(
        &self,
        prompt: &str,
        options: &SampleOptions,
    ) -> Result<String, Self::Error> {
        self.calls.lock().await.push(SampleCall {
            prompt: prompt.to_string(),
            options: options.clone(),
        });

        match &self.failure {
            Some(message) => Err(MockModelError(message.clone())),
            None => Ok(self.response.clone()),
        }
    }
}
