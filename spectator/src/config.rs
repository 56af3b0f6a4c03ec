use serde::{Deserialize, Serialize};

use crate::events::FrameNumber;

/// Tuning knobs for the playback scheduler.
///
/// Shells can deserialize this out of their config files; any field left out
/// falls back to the defaults below.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackTuning {
    /// Scheduler tick rate at normal speed, in ticks per second.
    pub target_fps: u32,

    /// Scheduler tick rate in slow motion.
    pub slow_fps: u32,

    /// How many frames each tick advances while fast-forwarding.
    pub fast_frames_per_tick: FrameNumber,
}

impl Default for PlaybackTuning {
    fn default() -> Self {
        Self {
            target_fps: 60,
            slow_fps: 30,
            fast_frames_per_tick: 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_files_fall_back_to_defaults() {
        let tuning: PlaybackTuning = serde_json::from_str(r#"{ "target_fps": 120 }"#).unwrap();

        assert_eq!(tuning.target_fps, 120);
        assert_eq!(tuning.slow_fps, 30);
        assert_eq!(tuning.fast_frames_per_tick, 2);
    }
}
