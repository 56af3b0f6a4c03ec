use thiserror::Error;

use crate::events::FrameNumber;
use crate::timeline::PLAYER_SLOTS;

/// Ways an individual event can fail to land in the timeline.
///
/// These never abort a batch; the session logs the offender and keeps going
/// with the rest of the events.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EventIngestError {
    #[error("Event targets frame {0}, which is negative")]
    NegativeFrameNumber(FrameNumber),

    #[error("Item update targets frame {0}, which has no materialized frame")]
    UnmaterializedFrame(FrameNumber),

    #[error("Player index {index} on frame {frame} is outside the {PLAYER_SLOTS} seats")]
    PlayerIndexOutOfRange { frame: FrameNumber, index: usize },
}

/// Errors surfaced when standing up a session.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Failed to spawn driver thread: {0}")]
    ThreadSpawn(#[from] std::io::Error),
}
