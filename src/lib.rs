//! # scenegen - LLM-written scenes for agent-based simulations
//!
//! This crate builds scene specifications for agent-based simulations. A
//! language model writes the scene premise; the crate packages it with the
//! scene's start time, participants and round count.
//!
//! ## Features
//!
//! - `SceneGenerator`: one model call per scene, shared premise for every participant
//! - A `LanguageModel` capability trait, with an adapter for any `rig` completion model
//! - Rate-limited Gemini client with standard and free tiers
//! - Serializable scene records (`SceneSpec`, `SceneTypeSpec`, `AgentConfig`)
//! - Mock models for tests
//!
//! ## Example
//!
//! ```rust,no_run
//! use chrono::Utc;
//! use scenegen::model::Client;
//! use scenegen::participants::participants_from_names;
//! use scenegen::SceneGenerator;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Client::new_gemini_from_env()?;
//!     let model = client.language_model();
//!
//!     let scene = SceneGenerator::generate_scene_spec(
//!         &model,
//!         "intro",
//!         Some("a fire breaks out in a crowded market"),
//!         50,
//!         Utc::now().naive_utc(),
//!         participants_from_names(["Ana", "Bo", "Cy"]),
//!         3,
//!     )
//!     .await?;
//!
//!     println!("{}", serde_json::to_string_pretty(&scene)?);
//!     Ok(())
//! }
//! ```

mod error;

pub mod config;
pub mod generator;
pub mod model;
pub mod participants;
pub mod scene;

pub use config::GeneratorConfig;
pub use error::Error;
pub use generator::{DEFAULT_SITUATION, SceneGenerator, premise_prompt};
pub use model::{LanguageModel, SampleOptions};
pub use scene::{ActionSpec, AgentConfig, OutputType, Participant, SceneSpec, SceneTypeSpec};

/// Re-export of types module for public use
pub mod prelude {
    pub use crate::error::Error;
    pub use crate::error::Result;
    pub use crate::generator::SceneGenerator;
    pub use crate::model::{LanguageModel, SampleOptions};
    pub use crate::scene::{AgentConfig, Participant, SceneSpec, SceneTypeSpec};
}
