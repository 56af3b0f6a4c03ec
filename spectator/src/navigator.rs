//! Cursor targeting for explicit navigation: jumps, percent seeks, live
//! seeks, and relative adjustments.
//!
//! Everything here is a pure computation over the timeline. Each function
//! returns the clamped frame the cursor should land on, or `None` when no
//! per-frame data has arrived yet, in which case navigation is a no-op.

use crate::events::FrameNumber;
use crate::timeline::Timeline;

/// How many frames shy of the end of the timeline navigation will land.
///
/// The renderer reads motion out of neighboring frames, so the cursor always
/// keeps a small buffer of assembled frames ahead of it.
pub const BUFFER_FRAME_COUNT: FrameNumber = 2;

/// Clamps a requested frame into the navigable window.
///
/// The window's low end is the first known frame and its high end is the
/// known frame count minus the buffer (not below 0). If data starts late
/// enough that the ends cross, the high end wins.
pub(crate) fn clamp_to_navigable(timeline: &Timeline, requested: FrameNumber) -> Option<FrameNumber> {
    let first = timeline.first_known_frame()?;
    let last = (timeline.known_frame_count() as FrameNumber - BUFFER_FRAME_COUNT).max(0);

    Some(requested.max(first).min(last))
}

/// Target for an absolute jump.
pub(crate) fn jump_target(timeline: &Timeline, requested: FrameNumber) -> Option<FrameNumber> {
    clamp_to_navigable(timeline, requested)
}

/// Target for a proportional seek. `fraction` is 0.0 at the first known
/// frame and 1.0 at the live edge.
pub(crate) fn percent_target(timeline: &Timeline, fraction: f64) -> Option<FrameNumber> {
    let first = timeline.first_known_frame()?;
    let span = timeline.known_frame_count() as FrameNumber - first;
    let offset = (f64::from(span) * fraction).round() as FrameNumber;

    clamp_to_navigable(timeline, first + offset)
}

/// Target for snapping to the live edge.
pub(crate) fn live_target(timeline: &Timeline) -> Option<FrameNumber> {
    clamp_to_navigable(timeline, timeline.known_frame_count() as FrameNumber)
}

/// Target for a relative adjustment from the current cursor.
pub(crate) fn adjusted_target(
    timeline: &Timeline,
    cursor: FrameNumber,
    delta: FrameNumber,
) -> Option<FrameNumber> {
    clamp_to_navigable(timeline, cursor.saturating_add(delta))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::PlayerState;

    /// Builds a timeline whose first fragment landed on `first` and which
    /// spans `count` frames total.
    fn timeline(first: FrameNumber, count: FrameNumber) -> Timeline {
        let mut timeline = Timeline::default();

        for frame_number in first..count {
            timeline
                .apply_state(PlayerState {
                    frame_number,
                    ..Default::default()
                })
                .unwrap();
        }

        timeline
    }

    #[test]
    fn jumps_clamp_to_the_navigable_window() {
        let timeline = timeline(5, 100);

        assert_eq!(jump_target(&timeline, 200), Some(98));
        assert_eq!(jump_target(&timeline, 0), Some(5));
        assert_eq!(jump_target(&timeline, 50), Some(50));
    }

    #[test]
    fn navigation_is_a_no_op_before_any_frames() {
        let timeline = Timeline::default();

        assert_eq!(jump_target(&timeline, 10), None);
        assert_eq!(percent_target(&timeline, 0.5), None);
        assert_eq!(live_target(&timeline), None);
        assert_eq!(adjusted_target(&timeline, 0, -10), None);
    }

    #[test]
    fn percent_seeks_span_first_known_to_live() {
        let timeline = timeline(5, 100);

        // round((100 - 5) * 0.5) + 5
        assert_eq!(percent_target(&timeline, 0.5), Some(53));
        assert_eq!(percent_target(&timeline, 0.0), Some(5));
        assert_eq!(percent_target(&timeline, 1.0), Some(98));
    }

    #[test]
    fn live_seeks_respect_the_buffer() {
        let timeline = timeline(0, 6);
        assert_eq!(live_target(&timeline), Some(4));
    }

    #[test]
    fn adjustments_saturate_at_both_ends() {
        let timeline = timeline(5, 100);

        assert_eq!(adjusted_target(&timeline, 50, -1000), Some(5));
        assert_eq!(adjusted_target(&timeline, 50, 1000), Some(98));
        assert_eq!(adjusted_target(&timeline, 50, FrameNumber::MAX), Some(98));
        assert_eq!(adjusted_target(&timeline, 50, -120), Some(5));
    }

    #[test]
    fn crossed_window_ends_resolve_to_the_high_end() {
        // The only fragment landed on frame 5, which spans the timeline to 6
        // frames. The buffered high end (4) then sits below the low end (5),
        // and the high end wins.
        let mut timeline = Timeline::default();
        timeline
            .apply_state(PlayerState {
                frame_number: 5,
                ..Default::default()
            })
            .unwrap();

        assert_eq!(jump_target(&timeline, 0), Some(4));
        assert_eq!(jump_target(&timeline, 300), Some(4));
    }
}
