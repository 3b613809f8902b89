//! # Generator Configuration Module
//!
//! Configuration for `SceneGenerator`: the caps and sampling parameters used
//! for the premise request. Defaults reproduce the stock behaviour of
//! 3500 characters and 3500 tokens with the provider's default temperature.

use crate::model::SampleOptions;

/// Configuration for the scene generator
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeneratorConfig {
    /// Options passed with the premise request
    pub sample: SampleOptions,
}

/// Builder for GeneratorConfig
#[derive(Debug, Default)]
pub struct GeneratorConfigBuilder {
    config: GeneratorConfig,
}

impl GeneratorConfigBuilder {
    /// Create a new builder with default configuration
    pub fn new() -> Self {
        Self {
            config: GeneratorConfig::default(),
        }
    }

    /// Set the maximum premise length in characters
    pub fn max_characters(mut self, max_characters: usize) -> Self {
        self.config.sample.max_characters = max_characters;
        self
    }

    /// Set the maximum premise length in tokens
    pub fn max_tokens(mut self, max_tokens: u64) -> Self {
        self.config.sample.max_tokens = max_tokens;
        self
    }

    /// Set the sampling temperature
    pub fn temperature(mut self, temperature: f64) -> Self {
        self.config.sample.temperature = Some(temperature);
        self
    }

    /// Set the strings at which the premise is cut
    pub fn terminators(mut self, terminators: Vec<String>) -> Self {
        self.config.sample.terminators = terminators;
        self
    }

    /// Build the configuration
    pub fn build(self) -> GeneratorConfig {
        self.config
    }
}

impl GeneratorConfig {
    /// Create a new builder
    pub fn builder() -> GeneratorConfigBuilder {
        GeneratorConfigBuilder::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_matches_sample_defaults() {
        let config = GeneratorConfig::default();

        assert_eq!(config.sample.max_characters, 3500);
        assert_eq!(config.sample.max_tokens, 3500);
        assert!(config.sample.temperature.is_none());
    }

    #[test]
    fn test_generator_config_builder() {
        let config = GeneratorConfig::builder()
            .max_characters(800)
            .max_tokens(256)
            .temperature(0.7)
            .terminators(vec!["THE END".to_string()])
            .build();

        assert_eq!(config.sample.max_characters, 800);
        assert_eq!(config.sample.max_tokens, 256);
        assert_eq!(config.sample.temperature, Some(0.7));
        assert_eq!(config.sample.terminators, vec!["THE END"]);
    }
}
