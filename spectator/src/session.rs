//! The assembled state of one spectate session and the event/command logic
//! that mutates it.
//!
//! `SessionCore` is plain state behind a lock; the [`crate::SpectateSession`]
//! handle owns the locking and the driver thread that ticks the clock.

use shell_integrations::Log;
use slippi_melee::Stage;

use crate::clock::PlaybackClock;
use crate::config::PlaybackTuning;
use crate::errors::EventIngestError;
use crate::events::{FrameBookend, FrameNumber, GameEnding, GameEvent, GameSettings};
use crate::navigator;
use crate::timeline::{Frame, Timeline};

/// Everything a spectate session knows, minus the thread driving it.
#[derive(Debug)]
pub struct SessionCore {
    timeline: Timeline,
    clock: PlaybackClock,
    tuning: PlaybackTuning,
    cursor: FrameNumber,
    settings: Option<GameSettings>,
    ending: Option<GameEnding>,
    game_end_frame: Option<FrameNumber>,
}

impl SessionCore {
    pub fn new(tuning: PlaybackTuning) -> Self {
        Self {
            timeline: Timeline::default(),
            clock: PlaybackClock::new(&tuning),
            tuning,
            cursor: 0,
            settings: None,
            ending: None,
            game_end_frame: None,
        }
    }

    /// Applies a transport batch in order. The whole batch runs under one
    /// borrow of the core, so readers never observe a half-applied batch.
    /// Events that can't be placed are logged and skipped; the rest of the
    /// batch still applies.
    pub fn ingest_batch(&mut self, events: Vec<GameEvent>) {
        for event in events {
            if let Err(error) = self.apply_event(event) {
                tracing::warn!(
                    target: Log::Spectator,
                    %error,
                    "Skipping event the frame assembler can't place"
                );
            }
        }
    }

    fn apply_event(&mut self, event: GameEvent) -> Result<(), EventIngestError> {
        match event {
            GameEvent::EventPayloads => {
                self.reset_for_new_game();
                Ok(())
            },

            GameEvent::GameStart(settings) => {
                let stage = Stage::try_from(settings.stage_id)
                    .map(|stage| stage.to_string())
                    .unwrap_or_else(|_| format!("unknown stage {}", settings.stage_id));

                tracing::info!(
                    target: Log::Spectator,
                    %stage,
                    "Game starting on stream"
                );

                self.settings = Some(settings);
                self.ending = None;
                self.game_end_frame = None;
                self.clock.start();
                Ok(())
            },

            GameEvent::FrameStart(start) => self.timeline.start_frame(start),
            GameEvent::PreFrameUpdate(inputs) => self.timeline.apply_inputs(inputs),
            GameEvent::PostFrameUpdate(state) => self.timeline.apply_state(state),
            GameEvent::ItemUpdate(item) => self.timeline.append_item(item),

            GameEvent::FrameBookend(bookend) => {
                self.apply_bookend(bookend);
                Ok(())
            },

            GameEvent::FodPlatforms(platforms) => {
                self.timeline.apply_platform(platforms);
                Ok(())
            },

            GameEvent::GameEnd(ending) => {
                self.finish_game(ending);
                Ok(())
            },
        }
    }

    /// A new game is starting over the same stream; drop everything built up
    /// for the old one in one go. The clock stops (the next `game_start`
    /// restarts it) but keeps its speed settings.
    fn reset_for_new_game(&mut self) {
        tracing::info!(target: Log::Spectator, "Resetting session for a new game");

        self.clock.stop();
        self.timeline.reset();
        self.cursor = 0;
        self.settings = None;
        self.ending = None;
        self.game_end_frame = None;
    }

    fn apply_bookend(&mut self, bookend: FrameBookend) {
        let previous = self.timeline.latest_finalized_frame();
        let effective = self.timeline.finalize_through(bookend.latest_finalized_frame);

        match previous {
            // The first bookend of a game starts playback at the live edge
            // rather than letting it crawl up from frame 0.
            None => self.cursor = effective,
            Some(previous) if bookend.latest_finalized_frame < previous => {
                tracing::warn!(
                    target: Log::Spectator,
                    reported = bookend.latest_finalized_frame,
                    frontier = previous,
                    "Ignoring bookend that would move the finalization frontier backwards"
                );
            },
            Some(_) => {},
        }
    }

    fn finish_game(&mut self, ending: GameEnding) {
        match ending.game_end_method {
            Some(method) => {
                tracing::info!(target: Log::Spectator, "Game ended: {method}")
            },
            None => tracing::info!(target: Log::Spectator, "Game ended"),
        }

        self.game_end_frame = Some(self.timeline.known_frame_count() as FrameNumber - 1);
        self.ending = Some(ending);
    }

    /// One scheduler tick: advance the cursor by the clock's stride unless
    /// that would cross the finalization frontier.
    pub fn tick(&mut self) {
        let advanced = self
            .clock
            .try_advance(self.cursor, self.timeline.latest_finalized_frame());

        if let Some(frame) = advanced {
            self.cursor = frame;
        }
    }

    pub fn toggle_pause(&mut self) {
        if self.clock.is_running() {
            self.clock.stop();
        } else {
            self.clock.start();
        }
    }

    pub fn speed_normal(&mut self) {
        self.clock.speed_normal(&self.tuning);
    }

    pub fn speed_fast(&mut self) {
        self.clock.speed_fast(&self.tuning);
    }

    pub fn speed_slow(&mut self) {
        self.clock.speed_slow(&self.tuning);
    }

    pub fn jump(&mut self, requested: FrameNumber) {
        if let Some(frame) = navigator::jump_target(&self.timeline, requested) {
            self.cursor = frame;
        }
    }

    pub fn jump_percent(&mut self, fraction: f64) {
        if let Some(frame) = navigator::percent_target(&self.timeline, fraction) {
            self.cursor = frame;
        }
    }

    pub fn jump_to_live(&mut self) {
        if let Some(frame) = navigator::live_target(&self.timeline) {
            self.cursor = frame;
        }
    }

    pub fn adjust(&mut self, delta: FrameNumber) {
        if let Some(frame) = navigator::adjusted_target(&self.timeline, self.cursor, delta) {
            self.cursor = frame;
        }
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn cursor(&self) -> FrameNumber {
        self.cursor
    }

    /// The frame the cursor currently points at, if it's been assembled.
    pub fn current_frame(&self) -> Option<&Frame> {
        self.timeline.frame(self.cursor)
    }

    pub fn settings(&self) -> Option<&GameSettings> {
        self.settings.as_ref()
    }

    pub fn ending(&self) -> Option<&GameEnding> {
        self.ending.as_ref()
    }

    /// The last frame of an ended game, for end-of-game HUD treatments.
    pub fn game_end_frame(&self) -> Option<FrameNumber> {
        self.game_end_frame
    }

    pub fn is_running(&self) -> bool {
        self.clock.is_running()
    }

    pub fn tick_period(&self) -> std::time::Duration {
        self.clock.tick_period()
    }

    /// Whether the cursor sits at the live edge of the stream.
    pub fn is_watching_live(&self) -> bool {
        navigator::live_target(&self.timeline)
            .map(|edge| self.cursor == edge)
            .unwrap_or(false)
    }
}
