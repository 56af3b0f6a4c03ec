//! Static Melee data that the spectator stack leans on: character id tables,
//! stage ids, the shared action state name table, player palettes, and the
//! per-character clip metadata used when resolving poses.
//!
//! Everything in here is plain data with no I/O, so it sits at the bottom of
//! the workspace and everyone else can depend on it freely.

pub mod action;
pub mod character;
pub mod clips;
pub mod palette;
pub mod stage;

pub use action::action_name;
pub use character::{ExternalCharacter, InternalCharacter};
pub use clips::{clips_for, CharacterClips};
pub use palette::{PaletteGroup, PlayerPalette};
pub use stage::Stage;
