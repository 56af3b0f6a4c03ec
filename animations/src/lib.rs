//! Per-character animation pose tables and the process-lifetime cache that
//! owns them.
//!
//! A character's table maps clip names to ordered pose lists. Tables are
//! fetched once per character on a background thread and then live for the
//! rest of the process; the render path only ever does lock-and-clone reads
//! against the cache.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::thread;

use shell_integrations::Log;
use slippi_melee::ExternalCharacter;

mod errors;
pub use errors::AnimationError;

mod source;
pub use source::{AnimationSource, DirAnimationSource, HttpAnimationSource};

/// One named clip: the ordered poses for a single action's animation.
///
/// Asset tables de-duplicate repeated poses by storing a `frameN` token that
/// refers back to index `N` of the same clip. Observed data only ever uses a
/// single level of indirection, but [`AnimationClip::pose_at`] iterates with
/// a cycle guard rather than trusting that.
#[derive(Clone, Debug, Default, serde::Deserialize)]
#[serde(transparent)]
pub struct AnimationClip {
    poses: Vec<String>,
}

impl AnimationClip {
    pub fn len(&self) -> usize {
        self.poses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.poses.is_empty()
    }

    /// Returns the pose at `index`, following `frameN` back-references until
    /// a real pose turns up. Returns `None` for out-of-range lookups and for
    /// reference cycles.
    pub fn pose_at(&self, index: usize) -> Option<&str> {
        let mut index = index;

        // An acyclic chain can't be longer than the clip itself; anything
        // still unresolved after that many hops is a cycle.
        for _ in 0..self.poses.len() {
            let pose = self.poses.get(index)?.as_str();

            match pose.strip_prefix("frame").and_then(|rest| rest.parse::<usize>().ok()) {
                Some(target) => index = target,
                None => return Some(pose),
            }
        }

        tracing::warn!(
            target: Log::Animations,
            index,
            "Animation clip contains a back-reference cycle"
        );

        None
    }
}

/// Every clip we have for one character, keyed by clip name.
#[derive(Clone, Debug, Default, serde::Deserialize)]
#[serde(transparent)]
pub struct CharacterAnimations {
    clips: HashMap<String, AnimationClip>,
}

impl CharacterAnimations {
    pub fn clip(&self, name: &str) -> Option<&AnimationClip> {
        self.clips.get(name)
    }
}

impl From<HashMap<String, Vec<String>>> for CharacterAnimations {
    fn from(table: HashMap<String, Vec<String>>) -> Self {
        Self {
            clips: table
                .into_iter()
                .map(|(name, poses)| (name, AnimationClip { poses }))
                .collect(),
        }
    }
}

#[derive(Clone, Debug)]
enum CacheSlot {
    Fetching,
    Ready(Arc<CharacterAnimations>),
    Failed,
}

/// Append-only cache of animation tables, shared across sessions.
///
/// A character's slot is written at most once per fetch attempt: `Fetching`
/// while a lookup is in flight (coalescing any further requests), then
/// `Ready` forever, or `Failed` until something requests it again.
#[derive(Clone, Debug)]
pub struct AnimationCache {
    source: Arc<dyn AnimationSource>,
    slots: Arc<Mutex<HashMap<ExternalCharacter, CacheSlot>>>,
}

impl AnimationCache {
    pub fn new(source: impl AnimationSource) -> Self {
        Self {
            source: Arc::new(source),
            slots: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Kicks off a background fetch for `character` unless one already
    /// completed or is in flight. Safe to call every frame.
    pub fn request(&self, character: ExternalCharacter) {
        {
            let mut slots = self.slots.lock().expect("Unable to acquire animation cache lock");

            match slots.get(&character) {
                Some(CacheSlot::Ready(_)) | Some(CacheSlot::Fetching) => return,
                Some(CacheSlot::Failed) | None => {
                    slots.insert(character, CacheSlot::Fetching);
                },
            }
        }

        let source = self.source.clone();
        let slots = self.slots.clone();

        let spawn_result = thread::Builder::new()
            .name("SlippiAnimationFetchThread".to_string())
            .spawn(move || {
                let slot = match source.fetch(character) {
                    Ok(animations) => {
                        tracing::info!(
                            target: Log::Animations,
                            character = %character,
                            "Animation table ready"
                        );

                        CacheSlot::Ready(Arc::new(animations))
                    },

                    Err(error) => {
                        tracing::error!(
                            target: Log::Animations,
                            %error,
                            character = %character,
                            "Failed to fetch animation table"
                        );

                        CacheSlot::Failed
                    },
                };

                let mut slots = slots.lock().expect("Unable to acquire animation cache lock");
                slots.insert(character, slot);
            });

        if let Err(e) = spawn_result {
            tracing::error!(
                target: Log::Animations,
                error = ?e,
                "Failed to spawn animation fetch thread"
            );

            let mut slots = self.slots.lock().expect("Unable to acquire animation cache lock");
            slots.insert(character, CacheSlot::Failed);
        }
    }

    /// The character's table, if a fetch has completed. Cheap to call from a
    /// render path.
    pub fn get(&self, character: ExternalCharacter) -> Option<Arc<CharacterAnimations>> {
        let slots = self.slots.lock().expect("Unable to acquire animation cache lock");

        match slots.get(&character) {
            Some(CacheSlot::Ready(animations)) => Some(animations.clone()),
            _ => None,
        }
    }

    /// Whether a fetch for `character` is currently in flight.
    pub fn is_fetching(&self, character: ExternalCharacter) -> bool {
        let slots = self.slots.lock().expect("Unable to acquire animation cache lock");

        matches!(slots.get(&character), Some(CacheSlot::Fetching))
    }
}
