//! Scene premise generation
//!
//! Asks a language model for a scene premise and packages it, together with
//! the caller's timing, participants and round count, into a `SceneSpec`.

use chrono::NaiveDateTime;
use tracing::{debug, instrument, trace};

use crate::config::GeneratorConfig;
use crate::model::LanguageModel;
use crate::scene::{Participant, PremiseMap, SceneSpec, SceneTypeSpec};

/// Situation used when the caller supplies none
pub const DEFAULT_SITUATION: &str = "a random situation that a human might encounter in daily life";

/// Build the premise prompt.
///
/// `situation` falls back to [`DEFAULT_SITUATION`] when absent or empty.
/// It is otherwise embedded verbatim, as is `length`.
pub fn premise_prompt(situation: Option<&str>, length: usize) -> String {
    let situation = match situation {
        Some(situation) if !situation.is_empty() => situation,
        _ => DEFAULT_SITUATION,
    };

    format!(
        "Generate a scene where {situation} is the basis of the scene. The scene \
         should be {length} words long. Include details about objects, challenges, \
         opportunities, and characters in the scene, written in the present tense. \
         Write in a way that the characters in an agent based model can respond to \
         the situation. Do not include instructions or a title in the output."
    )
}

/// Generates scene specifications from a language model
#[derive(Debug, Clone, Default)]
pub struct SceneGenerator {
    config: GeneratorConfig,
}

impl SceneGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generate a complete scene specification with the default configuration.
    ///
    /// # Arguments
    ///
    /// * `model` - The language model that writes the premise
    /// * `scene_type_name` - The name given to the scene type
    /// * `situation` - The basis of the premise, defaulted when absent or empty
    /// * `length` - Desired premise length in words (a request, not enforced)
    /// * `start_time` - When the scene starts
    /// * `participant_configs` - Participants of the scene
    /// * `num_rounds` - Number of rounds the scene lasts
    ///
    /// # Returns
    ///
    /// A `SceneSpec` where every participant receives the same generated
    /// premise, or the model's error unchanged.
    pub async fn generate_scene_spec<M, P>(
        model: &M,
        scene_type_name: impl Into<String>,
        situation: Option<&str>,
        length: usize,
        start_time: NaiveDateTime,
        participant_configs: Vec<P>,
        num_rounds: usize,
    ) -> Result<SceneSpec<P>, M::Error>
    where
        M: LanguageModel,
        P: Participant,
    {
        Self::default()
            .generate(
                model,
                scene_type_name,
                situation,
                length,
                start_time,
                participant_configs,
                num_rounds,
            )
            .await
    }

    /// Generate a complete scene specification using this generator's
    /// sampling configuration. See [`SceneGenerator::generate_scene_spec`].
    #[allow(clippy::too_many_arguments)]
    #[instrument(skip_all, fields(scene_type = tracing::field::Empty, participants = participant_configs.len(), length = length))]
    pub async fn generate<M, P>(
        &self,
        model: &M,
        scene_type_name: impl Into<String>,
        situation: Option<&str>,
        length: usize,
        start_time: NaiveDateTime,
        participant_configs: Vec<P>,
        num_rounds: usize,
    ) -> Result<SceneSpec<P>, M::Error>
    where
        M: LanguageModel,
        P: Participant,
    {
        let scene_type_name = scene_type_name.into();
        tracing::Span::current().record("scene_type", scene_type_name.as_str());

        let prompt = premise_prompt(situation, length);
        debug!("Requesting scene premise");
        let generated_premise = model.sample_text(&prompt, &self.config.sample).await?;
        trace!("Generated premise of length {}", generated_premise.len());

        let premise: PremiseMap = participant_configs
            .iter()
            .map(|participant| (participant.name().to_string(), vec![generated_premise.clone()]))
            .collect();

        Ok(SceneSpec {
            scene_type: SceneTypeSpec::new(scene_type_name, premise),
            start_time,
            participant_configs,
            num_rounds,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::mock_model::MockLanguageModel;
    use crate::model::SampleOptions;
    use crate::scene::AgentConfig;
    use chrono::NaiveDate;

    fn start_time() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 14)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap()
    }

    fn agents(names: &[&str]) -> Vec<AgentConfig> {
        names.iter().map(|name| AgentConfig::new(*name)).collect()
    }

    #[test]
    fn test_prompt_embeds_situation_and_length() {
        let prompt = premise_prompt(Some("a fire breaks out in a crowded market"), 50);

        assert!(prompt.contains("a fire breaks out in a crowded market"));
        assert!(prompt.contains("50 words"));
        assert!(prompt.contains("present tense"));
        assert!(prompt.contains("agent based model"));
        assert!(!prompt.contains(DEFAULT_SITUATION));
    }

    #[test]
    fn test_prompt_defaults_missing_situation() {
        for situation in [None, Some("")] {
            let prompt = premise_prompt(situation, 120);

            assert!(prompt.contains(DEFAULT_SITUATION));
            assert!(prompt.contains("120"));
            assert!(!prompt.contains("where  is the basis"));
        }
    }

    #[test]
    fn test_prompt_keeps_whitespace_situation_verbatim() {
        let prompt = premise_prompt(Some("  "), 10);

        assert!(prompt.contains("where    is the basis"));
        assert!(!prompt.contains(DEFAULT_SITUATION));
    }

    #[tokio::test]
    async fn test_generate_scene_spec_fire_scenario() {
        let model = MockLanguageModel::with_response("FIRE");
        let participants = agents(&["Ana", "Bo", "Cy"]);

        let scene = SceneGenerator::generate_scene_spec(
            &model,
            "intro",
            Some("a fire breaks out in a crowded market"),
            50,
            start_time(),
            participants.clone(),
            3,
        )
        .await
        .unwrap();

        let mut expected = PremiseMap::new();
        for name in ["Ana", "Bo", "Cy"] {
            expected.insert(name.to_string(), vec!["FIRE".to_string()]);
        }
        assert_eq!(scene.scene_type.name, "intro");
        assert_eq!(scene.scene_type.premise, expected);
        assert!(scene.scene_type.conclusion.is_none());
        assert!(scene.scene_type.action_spec.is_none());
        assert!(scene.scene_type.override_game_master.is_none());
        assert_eq!(scene.start_time, start_time());
        assert_eq!(scene.participant_configs, participants);
        assert_eq!(scene.num_rounds, 3);
    }

    #[tokio::test]
    async fn test_generate_scene_spec_makes_one_call_with_default_caps() {
        let model = MockLanguageModel::with_response("premise");

        SceneGenerator::generate_scene_spec(&model, "intro", None, 80, start_time(), agents(&["Ana"]), 1)
            .await
            .unwrap();

        let calls = model.calls().await;
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].prompt, premise_prompt(None, 80));
        assert_eq!(calls[0].options, SampleOptions::default());
        assert_eq!(calls[0].options.max_characters, 3500);
        assert_eq!(calls[0].options.max_tokens, 3500);
    }

    #[tokio::test]
    async fn test_generate_with_custom_config_passes_caps() {
        let model = MockLanguageModel::with_response("premise");
        let config = GeneratorConfig::builder()
            .max_characters(200)
            .max_tokens(64)
            .temperature(0.2)
            .build();

        SceneGenerator::new(config.clone())
            .generate(&model, "intro", Some("a quiet library"), 30, start_time(), agents(&["Ana"]), 1)
            .await
            .unwrap();

        assert_eq!(model.calls().await[0].options, config.sample);
    }

    #[tokio::test]
    async fn test_no_participants_gives_empty_premise() {
        let model = MockLanguageModel::with_response("premise");

        let scene = SceneGenerator::generate_scene_spec(
            &model,
            "empty",
            Some("an empty room"),
            20,
            start_time(),
            Vec::<AgentConfig>::new(),
            0,
        )
        .await
        .unwrap();

        assert!(scene.scene_type.premise.is_empty());
        assert!(scene.participant_configs.is_empty());
        assert_eq!(model.calls().await.len(), 1);
    }

    #[tokio::test]
    async fn test_empty_model_output_is_used_as_is() {
        let model = MockLanguageModel::with_response("");

        let scene = SceneGenerator::generate_scene_spec(
            &model,
            "blank",
            None,
            20,
            start_time(),
            agents(&["Ana", "Bo"]),
            2,
        )
        .await
        .unwrap();

        assert_eq!(scene.scene_type.premise["Ana"], vec![String::new()]);
        assert_eq!(scene.scene_type.premise["Bo"], vec![String::new()]);
    }

    #[tokio::test]
    async fn test_duplicate_names_share_one_key() {
        let model = MockLanguageModel::with_response("same");

        let scene = SceneGenerator::generate_scene_spec(
            &model,
            "twins",
            None,
            20,
            start_time(),
            agents(&["Ana", "Ana"]),
            1,
        )
        .await
        .unwrap();

        assert_eq!(scene.scene_type.premise.len(), 1);
        assert_eq!(scene.participant_configs.len(), 2);
    }

    #[tokio::test]
    async fn test_model_failure_propagates_unchanged() {
        let model = MockLanguageModel::failing("quota exhausted");

        let result = SceneGenerator::generate_scene_spec(
            &model,
            "intro",
            Some("a storm"),
            50,
            start_time(),
            agents(&["Ana"]),
            3,
        )
        .await;

        assert_eq!(
            result.unwrap_err(),
            crate::model::mock_model::MockModelError("quota exhausted".to_string())
        );
    }
}
