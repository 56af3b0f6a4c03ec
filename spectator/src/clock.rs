//! The playback clock: tracks whether the session is running, how fast ticks
//! fire, and how far each tick is allowed to move the cursor.

use std::time::Duration;

use crate::config::PlaybackTuning;
use crate::events::FrameNumber;

#[derive(Debug)]
pub struct PlaybackClock {
    running: bool,
    fps: u32,
    frames_per_tick: FrameNumber,
}

impl PlaybackClock {
    pub fn new(tuning: &PlaybackTuning) -> Self {
        Self {
            running: false,
            fps: tuning.target_fps,
            frames_per_tick: 1,
        }
    }

    pub fn start(&mut self) {
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Normal speed resets both the tick rate and the stride.
    pub fn speed_normal(&mut self, tuning: &PlaybackTuning) {
        self.fps = tuning.target_fps;
        self.frames_per_tick = 1;
    }

    /// Fast forward widens the stride but leaves the tick rate alone, so a
    /// slowed-down session fast-forwards at its slowed rate.
    pub fn speed_fast(&mut self, tuning: &PlaybackTuning) {
        self.frames_per_tick = tuning.fast_frames_per_tick;
    }

    /// Slow motion halves the tick rate but leaves the stride alone.
    pub fn speed_slow(&mut self, tuning: &PlaybackTuning) {
        self.fps = tuning.slow_fps;
    }

    /// How long the driver should wait between ticks at the current rate.
    pub fn tick_period(&self) -> Duration {
        // A zero rate in a hand-edited config shouldn't hang the driver.
        Duration::from_secs_f64(1.0 / f64::from(self.fps.max(1)))
    }

    /// Where the cursor would land if this tick advances, or `None` when the
    /// clock is stopped or the stride would cross the finalization frontier.
    /// An unknown frontier counts as 0, so playback holds until the stream
    /// has finalized something.
    pub fn try_advance(
        &self,
        cursor: FrameNumber,
        latest_finalized: Option<FrameNumber>,
    ) -> Option<FrameNumber> {
        if !self.running {
            return None;
        }

        let candidate = cursor + self.frames_per_tick;
        (candidate < latest_finalized.unwrap_or(0)).then_some(candidate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clock() -> PlaybackClock {
        let mut clock = PlaybackClock::new(&PlaybackTuning::default());
        clock.start();
        clock
    }

    #[test]
    fn holds_until_the_stream_finalizes_something() {
        let clock = clock();
        assert_eq!(clock.try_advance(0, None), None);
        assert_eq!(clock.try_advance(0, Some(0)), None);
        assert_eq!(clock.try_advance(0, Some(2)), Some(1));
    }

    #[test]
    fn never_advances_while_stopped() {
        let mut clock = clock();
        clock.stop();
        assert_eq!(clock.try_advance(0, Some(100)), None);
    }

    #[test]
    fn stalls_at_the_frontier_and_resumes_past_it() {
        let clock = clock();

        // One frame shy of the frontier: candidate == frontier, so hold.
        assert_eq!(clock.try_advance(4, Some(5)), None);
        // Frontier moves, same cursor advances again.
        assert_eq!(clock.try_advance(4, Some(6)), Some(5));
    }

    #[test]
    fn fast_forward_widens_the_stride_only() {
        let tuning = PlaybackTuning::default();
        let mut clock = clock();

        clock.speed_fast(&tuning);
        assert_eq!(clock.try_advance(0, Some(10)), Some(2));
        assert_eq!(clock.tick_period(), Duration::from_secs_f64(1.0 / 60.0));

        // A wide stride that would land past the frontier holds entirely
        // rather than partially advancing.
        assert_eq!(clock.try_advance(8, Some(10)), None);
    }

    #[test]
    fn slow_motion_halves_the_rate_only() {
        let tuning = PlaybackTuning::default();
        let mut clock = clock();

        clock.speed_slow(&tuning);
        assert_eq!(clock.tick_period(), Duration::from_secs_f64(1.0 / 30.0));
        assert_eq!(clock.try_advance(0, Some(10)), Some(1));

        clock.speed_normal(&tuning);
        assert_eq!(clock.tick_period(), Duration::from_secs_f64(1.0 / 60.0));
    }
}
