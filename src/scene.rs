//! # Scene Data Model
//!
//! Plain records describing a scene in an agent-based simulation.
//!
//! ## Key Components
//!
//! - `Participant`: anything that can take part in a scene (exposes a display name)
//! - `AgentConfig`: the default participant record
//! - `SceneTypeSpec`: the reusable definition of a kind of scene
//! - `SceneSpec`: a ready-to-run scene (scene type, start time, participants, rounds)
//! - `ActionSpec`: how participants are asked to act during a scene
//!
//! None of these types carry behaviour beyond construction helpers. They are
//! serializable so generated scenes can be stored or handed to other tools.

use std::collections::BTreeMap;

use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Premise (or conclusion) text keyed by participant name
pub type PremiseMap = BTreeMap<String, Vec<String>>;

/// A participant that can be placed in a scene.
pub trait Participant {
    /// Unique display name of the participant
    fn name(&self) -> &str;
}

/// Configuration of one agent that may appear in a scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Display name, used as the premise key
    pub name: String,

    #[serde(default)]
    pub gender: String,

    #[serde(default)]
    pub date_of_birth: Option<NaiveDateTime>,

    /// What the agent is trying to achieve
    #[serde(default)]
    pub goal: String,

    /// Background the agent starts with
    #[serde(default)]
    pub context: String,

    #[serde(default)]
    pub traits: String,

    #[serde(default)]
    pub specific_memories: String,

    /// Ages at which formative memories are generated
    #[serde(default)]
    pub formative_ages: Vec<u32>,

    /// Anything else the simulation attaches to the agent
    #[serde(default)]
    pub extras: serde_json::Map<String, serde_json::Value>,
}

impl AgentConfig {
    /// Create a config with only a name set
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            gender: String::new(),
            date_of_birth: None,
            goal: String::new(),
            context: String::new(),
            traits: String::new(),
            specific_memories: String::new(),
            formative_ages: Vec::new(),
            extras: serde_json::Map::new(),
        }
    }

    pub fn with_gender(mut self, gender: impl Into<String>) -> Self {
        self.gender = gender.into();
        self
    }

    pub fn with_date_of_birth(mut self, date_of_birth: NaiveDateTime) -> Self {
        self.date_of_birth = Some(date_of_birth);
        self
    }

    pub fn with_goal(mut self, goal: impl Into<String>) -> Self {
        self.goal = goal.into();
        self
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = context.into();
        self
    }

    pub fn with_traits(mut self, traits: impl Into<String>) -> Self {
        self.traits = traits.into();
        self
    }

    pub fn with_specific_memories(mut self, memories: impl Into<String>) -> Self {
        self.specific_memories = memories.into();
        self
    }

    pub fn with_formative_ages(mut self, ages: Vec<u32>) -> Self {
        self.formative_ages = ages;
        self
    }

    /// Attach an extra key/value pair
    pub fn with_extra(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.extras.insert(key.into(), value);
        self
    }
}

impl Participant for AgentConfig {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Kind of answer expected from a participant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputType {
    Free,
    Choice,
    Float,
}

/// Describes how participants are prompted to act
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionSpec {
    /// The question put to the participant
    pub call_to_action: String,

    pub output_type: OutputType,

    /// Valid answers when `output_type` is `Choice`
    #[serde(default)]
    pub options: Vec<String>,

    /// Label recorded alongside the action
    #[serde(default)]
    pub tag: Option<String>,
}

impl ActionSpec {
    /// Free-text action
    pub fn free(call_to_action: impl Into<String>) -> Self {
        Self {
            call_to_action: call_to_action.into(),
            output_type: OutputType::Free,
            options: Vec::new(),
            tag: None,
        }
    }

    /// Multiple-choice action
    pub fn choice<I, S>(call_to_action: impl Into<String>, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            call_to_action: call_to_action.into(),
            output_type: OutputType::Choice,
            options: options.into_iter().map(Into::into).collect(),
            tag: None,
        }
    }

    /// Numeric action
    pub fn float(call_to_action: impl Into<String>) -> Self {
        Self {
            call_to_action: call_to_action.into(),
            output_type: OutputType::Float,
            options: Vec::new(),
            tag: None,
        }
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }
}

/// The reusable definition of a kind of scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneTypeSpec {
    /// Identifier chosen by the caller
    pub name: String,

    /// Premise text per participant
    pub premise: PremiseMap,

    /// Conclusion text per participant
    #[serde(default)]
    pub conclusion: Option<PremiseMap>,

    #[serde(default)]
    pub action_spec: Option<ActionSpec>,

    /// Name of a game master that runs this scene instead of the default one
    #[serde(default)]
    pub override_game_master: Option<String>,
}

impl SceneTypeSpec {
    /// Create a scene type with the optional hooks left unset
    pub fn new(name: impl Into<String>, premise: PremiseMap) -> Self {
        Self {
            name: name.into(),
            premise,
            conclusion: None,
            action_spec: None,
            override_game_master: None,
        }
    }

    pub fn with_conclusion(mut self, conclusion: PremiseMap) -> Self {
        self.conclusion = Some(conclusion);
        self
    }

    pub fn with_action_spec(mut self, action_spec: ActionSpec) -> Self {
        self.action_spec = Some(action_spec);
        self
    }

    pub fn with_override_game_master(mut self, game_master: impl Into<String>) -> Self {
        self.override_game_master = Some(game_master.into());
        self
    }
}

/// A fully parameterized, ready-to-run scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneSpec<P = AgentConfig> {
    pub scene_type: SceneTypeSpec,

    /// When the scene starts in simulation time
    pub start_time: NaiveDateTime,

    /// Participants, in the order they were supplied
    pub participant_configs: Vec<P>,

    pub num_rounds: usize,
}

impl<P: Participant> SceneSpec<P> {
    /// Names of the participants, in order
    pub fn participant_names(&self) -> impl Iterator<Item = &str> {
        self.participant_configs.iter().map(Participant::name)
    }
}

/// Parse a scene start time.
///
/// Accepts RFC 3339 timestamps (converted to UTC) as well as naive
/// `YYYY-MM-DDTHH:MM[:SS]` and `YYYY-MM-DD HH:MM[:SS]` forms.
pub fn parse_start_time(input: &str) -> Result<NaiveDateTime> {
    if let Ok(time) = chrono::DateTime::parse_from_rfc3339(input) {
        return Ok(time.with_timezone(&Utc).naive_utc());
    }

    const FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
    ];
    FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(input, format).ok())
        .ok_or_else(|| Error::InvalidRequest(format!("Unrecognized start time: {}", input)))
}
