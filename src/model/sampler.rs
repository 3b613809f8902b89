//! `LanguageModel` implementation over `rig` completion models

use rig::{
    completion::{AssistantContent, CompletionModel},
    message::Message,
};
use tracing::{debug, instrument, trace, warn};

use super::{LanguageModel, SampleOptions};
use crate::error::{Error, Result};

/// Samples text from a `rig` completion model.
///
/// Each call sends a single completion request. Text parts of the response
/// are joined, cut at the first terminator and truncated to
/// `max_characters` characters.
#[derive(Debug, Clone)]
pub struct CompletionSampler<M: CompletionModel> {
    model: M,
}

impl<M: CompletionModel> CompletionSampler<M> {
    pub fn new(model: M) -> Self {
        Self { model }
    }

    pub fn model(&self) -> &M {
        &self.model
    }
}

impl<M: CompletionModel> LanguageModel for CompletionSampler<M> {
    type Error = Error;

    #[instrument(skip_all, fields(prompt_len = prompt.len(), max_tokens = options.max_tokens))]
    async fn sample_text(&self, prompt: &str, options: &SampleOptions) -> Result<String> {
        let mut request = self
            .model
            .completion_request(Message::user(prompt))
            .max_tokens(options.max_tokens);
        if let Some(temperature) = options.temperature {
            request = request.temperature(temperature);
        }

        debug!("Sending completion request");
        let response = request.send().await?;

        let text = response
            .choice
            .iter()
            .filter_map(|c| match c {
                AssistantContent::Text(text) => Some(text.text.as_str()),
                _ => {
                    warn!(content = ?c, "Ignoring non-text content in completion");
                    None
                }
            })
            .collect::<String>();

        let text = clip_text(text, options);
        trace!("Sampled text of length {}", text.len());
        Ok(text)
    }
}

/// Cut `text` at the earliest terminator, then keep at most
/// `max_characters` characters.
pub(crate) fn clip_text(mut text: String, options: &SampleOptions) -> String {
    let cut = options
        .terminators
        .iter()
        .filter(|terminator| !terminator.is_empty())
        .filter_map(|terminator| text.find(terminator.as_str()))
        .min();
    if let Some(cut) = cut {
        text.truncate(cut);
    }

    if let Some((byte_index, _)) = text.char_indices().nth(options.max_characters) {
        text.truncate(byte_index);
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::mock_model::MockCompletionModel;
    use rig::completion::CompletionError;

    fn options(max_characters: usize, terminators: &[&str]) -> SampleOptions {
        SampleOptions {
            max_characters,
            terminators: terminators.iter().map(|t| t.to_string()).collect(),
            ..SampleOptions::default()
        }
    }

    #[test]
    fn test_clip_text_truncates_on_char_boundary() {
        let clipped = clip_text("héllo wörld".to_string(), &options(4, &[]));
        assert_eq!(clipped, "héll");
    }

    #[test]
    fn test_clip_text_keeps_short_text() {
        let clipped = clip_text("short".to_string(), &options(3500, &[]));
        assert_eq!(clipped, "short");
    }

    #[test]
    fn test_clip_text_cuts_at_earliest_terminator() {
        let clipped = clip_text("one\ntwo END three".to_string(), &options(3500, &["END", "\n"]));
        assert_eq!(clipped, "one");
    }

    #[test]
    fn test_clip_text_ignores_empty_terminator() {
        let clipped = clip_text("keep all".to_string(), &options(3500, &[""]));
        assert_eq!(clipped, "keep all");
    }

    #[tokio::test]
    async fn test_sample_text_sends_token_cap_and_temperature() {
        let mock = MockCompletionModel::new();
        mock.set_text_response("A busy market at noon.").await;
        let sampler = CompletionSampler::new(mock.clone());
        let options = SampleOptions {
            max_tokens: 128,
            temperature: Some(0.5),
            ..SampleOptions::default()
        };

        let text = sampler.sample_text("describe a market", &options).await.unwrap();

        assert_eq!(text, "A busy market at noon.");
        let requests = mock.requests().await;
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].max_tokens, Some(128));
        assert_eq!(requests[0].temperature, Some(0.5));
    }

    #[tokio::test]
    async fn test_sample_text_returns_empty_string_as_is() {
        let sampler = CompletionSampler::new(MockCompletionModel::new());

        let text = sampler
            .sample_text("anything", &SampleOptions::default())
            .await
            .unwrap();

        assert_eq!(text, "");
    }

    #[tokio::test]
    async fn test_sample_text_surfaces_completion_errors() {
        let mock = MockCompletionModel::new();
        mock.set_error("model overloaded").await;
        let sampler = CompletionSampler::new(mock);

        let result = sampler.sample_text("anything", &SampleOptions::default()).await;

        assert!(matches!(
            result,
            Err(Error::Completion(CompletionError::ProviderError(msg))) if msg == "model overloaded"
        ));
    }
}
