//! Walking an entity's action backwards through time.
//!
//! Clip frame indices are derived from the in-state frame counter, but a few
//! pose decisions (rush angles, launch facing, L-cancel tinting) need to know
//! what was true when the action *began*, which means walking back through
//! stored frames until the action changes underneath us.

use crate::events::{FrameNumber, PlayerState};
use crate::timeline::Timeline;

/// Finds the frame an entity's current action started on.
///
/// Walks backwards while the previous frame holds the same entity in the same
/// action state with a frame counter that isn't higher than the one after it.
/// The counter check is what separates back-to-back runs of the same action:
/// landing a jab into an identical jab resets the counter, and that reset is
/// the boundary.
///
/// Stops at gaps. A frame with no stored state for the entity ends the walk,
/// so sparse stretches of the timeline resolve to the earliest frame that is
/// actually continuous with the current one.
pub fn start_of_action(timeline: &Timeline, state: &PlayerState) -> FrameNumber {
    let mut earliest = state;

    loop {
        let previous = timeline.player_state_on_frame(
            state.player_index,
            earliest.frame_number - 1,
            state.is_nana,
        );

        match previous {
            Some(candidate)
                if candidate.action_state_id == earliest.action_state_id
                    && candidate.action_state_frame_counter
                        <= earliest.action_state_frame_counter =>
            {
                earliest = candidate;
            }
            _ => return earliest.frame_number,
        }
    }
}
