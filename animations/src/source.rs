//! Where animation tables come from.
//!
//! The cache doesn't care whether tables arrive over HTTP or off disk, so
//! the lookup is behind a small trait. Production uses [`HttpAnimationSource`]
//! pointed at the asset CDN; tests and offline builds can point
//! [`DirAnimationSource`] at an extracted asset directory instead.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use ureq::{Agent, AgentBuilder};

use shell_integrations::Log;
use slippi_melee::ExternalCharacter;

use crate::errors::AnimationError;
use crate::CharacterAnimations;

/// A blocking lookup of the animation table for one character. Runs on the
/// cache's fetch thread, never on a render path.
pub trait AnimationSource: std::fmt::Debug + Send + Sync + 'static {
    fn fetch(&self, character: ExternalCharacter) -> Result<CharacterAnimations, AnimationError>;
}

/// Fetches animation tables from a static asset host, one JSON document per
/// character.
#[derive(Clone, Debug)]
pub struct HttpAnimationSource {
    agent: Agent,
    base_url: String,
}

impl HttpAnimationSource {
    /// Creates a new source rooted at `base_url` (no trailing slash).
    pub fn new(base_url: impl Into<String>) -> Self {
        // `max_idle_connections` stays low since we only ever talk to the
        // one asset host, and a game involves at most a few characters.
        let agent = AgentBuilder::new()
            .max_idle_connections(2)
            .timeout(Duration::from_millis(5000))
            .user_agent(&format!("SlippiSpectator/{} (Rust)", env!("CARGO_PKG_VERSION")))
            .build();

        Self {
            agent,
            base_url: base_url.into(),
        }
    }
}

impl AnimationSource for HttpAnimationSource {
    fn fetch(&self, character: ExternalCharacter) -> Result<CharacterAnimations, AnimationError> {
        let url = format!("{}/{}.json", self.base_url, character.asset_name());

        tracing::info!(target: Log::Animations, ?url, "Fetching animation table");

        let animations: CharacterAnimations = self
            .agent
            .get(&url)
            .call()
            .map_err(AnimationError::Client)?
            .into_json()
            .map_err(AnimationError::IO)?;

        Ok(animations)
    }
}

/// Reads animation tables out of a local directory of per-character JSON
/// documents.
#[derive(Clone, Debug)]
pub struct DirAnimationSource {
    base: PathBuf,
}

impl DirAnimationSource {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }
}

impl AnimationSource for DirAnimationSource {
    fn fetch(&self, character: ExternalCharacter) -> Result<CharacterAnimations, AnimationError> {
        let path = self.base.join(format!("{}.json", character.asset_name()));
        let contents = fs::read_to_string(&path).map_err(AnimationError::IO)?;

        serde_json::from_str(&contents).map_err(AnimationError::Parse)
    }
}
