//! Storage for the assembled view of the game on stream.
//!
//! The timeline is a dense, frame-number-indexed store that per-frame event
//! fragments merge into. Fragments only ever add to it: a frame is created
//! the first time anything references it, player entries fill in as their
//! pre/post fragments arrive, and re-delivered fragments just overwrite the
//! same slot. Nothing here is speed- or cursor-aware; that's the session's
//! business.

use crate::errors::EventIngestError;
use crate::events::{
    FodPlatforms, FrameNumber, FrameStart, ItemUpdate, PlatformSide, PlayerInputs, PlayerState,
};

/// Number of player seats in a game. Seat indices off the wire must be below
/// this.
pub const PLAYER_SLOTS: usize = 4;

/// Stage state tracked per frame. Only Fountain of Dreams actually moves, so
/// this is its two side platform heights; on every other stage the seeded
/// values just ride along unchanged.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StageState {
    pub fod_left_platform_height: f32,
    pub fod_right_platform_height: f32,
}

/// Platform heights observed before their frame existed. Used to seed the
/// first materialized frame, since platform events can beat frame fragments
/// to the session.
#[derive(Debug, Clone, Copy, Default)]
struct PendingStageState {
    left: Option<f32>,
    right: Option<f32>,
}

/// Everything known about one player seat on one frame.
///
/// Ice Climbers put two entities in one seat, so Nana has her own pair of
/// slots next to the leader's.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerUpdate {
    pub frame_number: FrameNumber,
    pub player_index: usize,
    pub inputs: Option<PlayerInputs>,
    pub state: Option<PlayerState>,
    pub nana_inputs: Option<PlayerInputs>,
    pub nana_state: Option<PlayerState>,
}

impl PlayerUpdate {
    fn new(frame_number: FrameNumber, player_index: usize) -> Self {
        Self {
            frame_number,
            player_index,
            inputs: None,
            state: None,
            nana_inputs: None,
            nana_state: None,
        }
    }

    /// The post-frame state for the leader or Nana.
    pub fn state_for(&self, is_nana: bool) -> Option<&PlayerState> {
        if is_nana {
            self.nana_state.as_ref()
        } else {
            self.state.as_ref()
        }
    }

    /// The pre-frame inputs for the leader or Nana.
    pub fn inputs_for(&self, is_nana: bool) -> Option<&PlayerInputs> {
        if is_nana {
            self.nana_inputs.as_ref()
        } else {
            self.inputs.as_ref()
        }
    }

    /// Whether this entity has both halves of its frame and can be drawn.
    pub fn is_renderable(&self, is_nana: bool) -> bool {
        self.inputs_for(is_nana).is_some() && self.state_for(is_nana).is_some()
    }
}

/// One assembled frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub frame_number: FrameNumber,
    pub random_seed: Option<u32>,
    pub players: [Option<PlayerUpdate>; PLAYER_SLOTS],
    pub items: Vec<ItemUpdate>,
    pub stage: StageState,
}

impl Frame {
    fn new(frame_number: FrameNumber, stage: StageState) -> Self {
        Self {
            frame_number,
            random_seed: None,
            players: Default::default(),
            items: Vec::new(),
            stage,
        }
    }

    fn player_entry(&mut self, player_index: usize) -> Result<&mut PlayerUpdate, EventIngestError> {
        if player_index >= PLAYER_SLOTS {
            return Err(EventIngestError::PlayerIndexOutOfRange {
                frame: self.frame_number,
                index: player_index,
            });
        }

        let frame_number = self.frame_number;
        Ok(self.players[player_index]
            .get_or_insert_with(|| PlayerUpdate::new(frame_number, player_index)))
    }
}

/// The assembled timeline for the current game.
#[derive(Debug, Default)]
pub struct Timeline {
    // Indexed by frame number. Holes are frames nothing has referenced yet.
    frames: Vec<Option<Frame>>,
    first_known_frame: Option<FrameNumber>,
    latest_finalized_frame: Option<FrameNumber>,
    pending_stage: PendingStageState,
}

impl Timeline {
    /// How many frames the timeline spans, counting unreferenced holes.
    pub fn known_frame_count(&self) -> usize {
        self.frames.len()
    }

    /// The frame number of the first fragment this game, or `None` before
    /// any per-frame data has arrived.
    pub fn first_known_frame(&self) -> Option<FrameNumber> {
        self.first_known_frame
    }

    /// The highest finalization frontier any bookend has reported.
    pub fn latest_finalized_frame(&self) -> Option<FrameNumber> {
        self.latest_finalized_frame
    }

    pub fn frame(&self, frame_number: FrameNumber) -> Option<&Frame> {
        if frame_number < 0 {
            return None;
        }

        self.frames.get(frame_number as usize)?.as_ref()
    }

    pub fn player_on_frame(
        &self,
        player_index: usize,
        frame_number: FrameNumber,
    ) -> Option<&PlayerUpdate> {
        self.frame(frame_number)?.players.get(player_index)?.as_ref()
    }

    pub fn player_state_on_frame(
        &self,
        player_index: usize,
        frame_number: FrameNumber,
        is_nana: bool,
    ) -> Option<&PlayerState> {
        self.player_on_frame(player_index, frame_number)?.state_for(is_nana)
    }

    pub fn player_inputs_on_frame(
        &self,
        player_index: usize,
        frame_number: FrameNumber,
        is_nana: bool,
    ) -> Option<&PlayerInputs> {
        self.player_on_frame(player_index, frame_number)?.inputs_for(is_nana)
    }

    /// Records the random seed from a frame start fragment, creating the
    /// frame if this is the first fragment to reference it.
    pub fn start_frame(&mut self, start: FrameStart) -> Result<(), EventIngestError> {
        let frame = self.materialize(start.frame_number)?;
        frame.random_seed = Some(start.random_seed);
        Ok(())
    }

    /// Merges a pre-frame fragment into its frame and seat.
    pub fn apply_inputs(&mut self, inputs: PlayerInputs) -> Result<(), EventIngestError> {
        let is_nana = inputs.is_nana;
        let player_index = inputs.player_index;

        let frame = self.materialize(inputs.frame_number)?;
        let player = frame.player_entry(player_index)?;

        if is_nana {
            player.nana_inputs = Some(inputs);
        } else {
            player.inputs = Some(inputs);
        }

        Ok(())
    }

    /// Merges a post-frame fragment into its frame and seat.
    pub fn apply_state(&mut self, state: PlayerState) -> Result<(), EventIngestError> {
        let is_nana = state.is_nana;
        let player_index = state.player_index;

        let frame = self.materialize(state.frame_number)?;
        let player = frame.player_entry(player_index)?;

        if is_nana {
            player.nana_state = Some(state);
        } else {
            player.state = Some(state);
        }

        Ok(())
    }

    /// Appends an item to its frame. Items never materialize frames; an item
    /// referencing a frame nothing else has touched is a stream anomaly.
    pub fn append_item(&mut self, item: ItemUpdate) -> Result<(), EventIngestError> {
        if item.frame_number < 0 {
            return Err(EventIngestError::NegativeFrameNumber(item.frame_number));
        }

        match self.stored_frame_mut(item.frame_number) {
            Some(frame) => {
                frame.items.push(item);
                Ok(())
            }
            None => Err(EventIngestError::UnmaterializedFrame(item.frame_number)),
        }
    }

    /// Applies a Fountain of Dreams platform height. If the target frame
    /// exists its stage state is updated in place; otherwise the height is
    /// parked session-wide and seeds the next frame that materializes.
    pub fn apply_platform(&mut self, event: FodPlatforms) {
        match self.stored_frame_mut(event.frame_number) {
            Some(frame) => match event.side {
                PlatformSide::Left => frame.stage.fod_left_platform_height = event.height,
                PlatformSide::Right => frame.stage.fod_right_platform_height = event.height,
            },
            None => match event.side {
                PlatformSide::Left => self.pending_stage.left = Some(event.height),
                PlatformSide::Right => self.pending_stage.right = Some(event.height),
            },
        }
    }

    /// Raises the finalization frontier. The frontier never moves backwards:
    /// a bookend reporting less than an earlier one is ignored and the
    /// effective (highest) value is returned.
    pub fn finalize_through(&mut self, latest: FrameNumber) -> FrameNumber {
        let effective = match self.latest_finalized_frame {
            Some(current) if current > latest => current,
            _ => latest,
        };

        self.latest_finalized_frame = Some(effective);
        effective
    }

    /// Drops everything accumulated for the current game, including the
    /// pending platform heights and the first-frame marker.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Fetches the frame a number refers to, creating it (and any holes
    /// before it) on first reference.
    fn materialize(&mut self, frame_number: FrameNumber) -> Result<&mut Frame, EventIngestError> {
        if frame_number < 0 {
            return Err(EventIngestError::NegativeFrameNumber(frame_number));
        }

        let index = frame_number as usize;
        if index >= self.frames.len() {
            self.frames.resize_with(index + 1, || None);
        }

        if self.frames[index].is_none() && self.first_known_frame.is_none() {
            self.first_known_frame = Some(frame_number);
        }

        let stage = self.seed_stage_state(frame_number);
        Ok(self.frames[index].get_or_insert_with(|| Frame::new(frame_number, stage)))
    }

    /// Stage state for a newly materialized frame: carried over from the
    /// previous frame when it exists, otherwise seeded from pending platform
    /// heights with each side falling back to its resting height.
    fn seed_stage_state(&self, frame_number: FrameNumber) -> StageState {
        if let Some(previous) = self.frame(frame_number - 1) {
            return previous.stage;
        }

        StageState {
            fod_left_platform_height: self
                .pending_stage
                .left
                .unwrap_or(slippi_melee::stage::FOD_LEFT_PLATFORM_START_HEIGHT),
            fod_right_platform_height: self
                .pending_stage
                .right
                .unwrap_or(slippi_melee::stage::FOD_RIGHT_PLATFORM_START_HEIGHT),
        }
    }

    fn stored_frame_mut(&mut self, frame_number: FrameNumber) -> Option<&mut Frame> {
        if frame_number < 0 {
            return None;
        }

        self.frames.get_mut(frame_number as usize)?.as_mut()
    }
}
