//! The decoded event stream that a spectator session is fed with.
//!
//! Relays hand these over already parsed out of the wire format, as JSON
//! objects tagged with a `type` field and camelCase keys. The types here
//! conform to that shape; nothing in this crate ever touches raw replay
//! bytes.

use serde::Deserialize;
use serde_repr::Deserialize_repr;

/// Frame numbers as the stream reports them.
///
/// Live relays rebase the stream so the first frame is 0; anything negative
/// coming off the wire is treated as corruption by the frame assembler.
pub type FrameNumber = i32;

/// One decoded event from the stream.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    /// The stream's preamble. A second one mid-session means the relay moved
    /// on to a new game.
    EventPayloads,
    GameStart(GameSettings),
    FrameStart(FrameStart),
    PreFrameUpdate(PlayerInputs),
    PostFrameUpdate(PlayerState),
    ItemUpdate(ItemUpdate),
    FrameBookend(FrameBookend),
    FodPlatforms(FodPlatforms),
    GameEnd(GameEnding),
}

/// Which way a player is facing. The wire carries this as a float (1 or -1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    Left,
    #[default]
    Right,
}

impl Direction {
    /// The X multiplier to apply when mirroring a pose to match facing.
    pub fn scale_x(&self) -> f32 {
        match self {
            Self::Left => -1.0,
            Self::Right => 1.0,
        }
    }
}

impl<'de> Deserialize<'de> for Direction {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = f32::deserialize(deserializer)?;
        Ok(if raw < 0.0 { Self::Left } else { Self::Right })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize_repr)]
#[repr(u8)]
pub enum PlayerType {
    Human = 0,
    Cpu = 1,
    Demo = 2,
    Empty = 3,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LCancelStatus {
    Successful,
    Missed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HurtboxState {
    #[default]
    Vulnerable,
    Invulnerable,
    Intangible,
}

/// Settings for the game currently on stream, taken from its start block.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GameSettings {
    #[serde(alias = "replayFormatVersion")]
    pub replay_format_version: String,

    #[serde(alias = "startTimestamp")]
    pub start_timestamp: String,

    #[serde(alias = "isTeams")]
    pub is_teams: bool,

    #[serde(alias = "isPal", default)]
    pub is_pal: bool,

    #[serde(alias = "stageId")]
    pub stage_id: u16,

    #[serde(alias = "timerStart")]
    pub timer_start: u32,

    /// Indexed by player seat. Empty seats stay `None`; never assume the
    /// occupied seats are contiguous.
    #[serde(alias = "playerSettings")]
    pub player_settings: [Option<PlayerSettings>; 4],
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PlayerSettings {
    #[serde(alias = "playerIndex")]
    pub player_index: usize,

    pub port: u8,

    #[serde(alias = "externalCharacterId")]
    pub external_character_id: u8,

    #[serde(alias = "playerType")]
    pub player_type: PlayerType,

    #[serde(alias = "startStocks")]
    pub start_stocks: u8,

    #[serde(alias = "costumeIndex")]
    pub costume_index: u8,

    #[serde(alias = "teamId")]
    pub team_id: u8,

    #[serde(alias = "teamShade")]
    pub team_shade: u8,

    #[serde(alias = "cpuLevel", default)]
    pub cpu_level: u8,

    #[serde(alias = "displayName", default)]
    pub display_name: String,

    #[serde(alias = "connectCode", default)]
    pub connect_code: String,

    #[serde(default)]
    pub nametag: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct FrameStart {
    #[serde(alias = "frameNumber")]
    pub frame_number: FrameNumber,

    #[serde(alias = "randomSeed")]
    pub random_seed: u32,
}

/// The button and stick readings for one player on one frame.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
pub struct PlayerInputs {
    #[serde(alias = "frameNumber")]
    pub frame_number: FrameNumber,

    #[serde(alias = "playerIndex")]
    pub player_index: usize,

    #[serde(alias = "isNana", default)]
    pub is_nana: bool,

    pub physical: PhysicalButtons,
    pub processed: ProcessedInputs,
}

/// Raw controller state before the game's own input processing.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
pub struct PhysicalButtons {
    pub a: bool,
    pub b: bool,
    pub x: bool,
    pub y: bool,
    pub z: bool,
    pub start: bool,

    #[serde(alias = "dPadLeft")]
    pub d_pad_left: bool,
    #[serde(alias = "dPadRight")]
    pub d_pad_right: bool,
    #[serde(alias = "dPadDown")]
    pub d_pad_down: bool,
    #[serde(alias = "dPadUp")]
    pub d_pad_up: bool,

    #[serde(alias = "rTriggerAnalog")]
    pub r_trigger_analog: f32,
    #[serde(alias = "rTriggerDigital")]
    pub r_trigger_digital: bool,
    #[serde(alias = "lTriggerAnalog")]
    pub l_trigger_analog: f32,
    #[serde(alias = "lTriggerDigital")]
    pub l_trigger_digital: bool,
}

/// Controller state after dead zones and modifiers have been applied.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
pub struct ProcessedInputs {
    pub a: bool,
    pub b: bool,
    pub x: bool,
    pub y: bool,
    pub z: bool,
    pub start: bool,

    #[serde(alias = "dPadLeft")]
    pub d_pad_left: bool,
    #[serde(alias = "dPadRight")]
    pub d_pad_right: bool,
    #[serde(alias = "dPadDown")]
    pub d_pad_down: bool,
    #[serde(alias = "dPadUp")]
    pub d_pad_up: bool,

    #[serde(alias = "rTriggerDigital")]
    pub r_trigger_digital: bool,
    #[serde(alias = "lTriggerDigital")]
    pub l_trigger_digital: bool,

    #[serde(alias = "joystickX")]
    pub joystick_x: f32,
    #[serde(alias = "joystickY")]
    pub joystick_y: f32,

    #[serde(alias = "cStickX")]
    pub c_stick_x: f32,
    #[serde(alias = "cStickY")]
    pub c_stick_y: f32,

    #[serde(alias = "anyTrigger")]
    pub any_trigger: f32,
}

/// The simulation's view of one player after a frame has run.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
pub struct PlayerState {
    #[serde(alias = "frameNumber")]
    pub frame_number: FrameNumber,

    #[serde(alias = "playerIndex")]
    pub player_index: usize,

    #[serde(alias = "isNana", default)]
    pub is_nana: bool,

    #[serde(alias = "internalCharacterId")]
    pub internal_character_id: u8,

    #[serde(alias = "actionStateId")]
    pub action_state_id: u16,

    #[serde(alias = "xPosition")]
    pub x_position: f32,

    #[serde(alias = "yPosition")]
    pub y_position: f32,

    #[serde(alias = "facingDirection")]
    pub facing_direction: Direction,

    pub percent: f32,

    #[serde(alias = "shieldSize")]
    pub shield_size: f32,

    #[serde(alias = "lastHittingAttackId")]
    pub last_hitting_attack_id: u8,

    #[serde(alias = "currentComboCount")]
    pub current_combo_count: u8,

    #[serde(alias = "lastHitBy")]
    pub last_hit_by: u8,

    #[serde(alias = "stocksRemaining")]
    pub stocks_remaining: u8,

    /// How long the current action has been running. Fractional because some
    /// actions (shield stun, lightshield) tick at sub-frame rates.
    #[serde(alias = "actionStateFrameCounter")]
    pub action_state_frame_counter: f32,

    #[serde(alias = "hitstunRemaining")]
    pub hitstun_remaining: f32,

    #[serde(alias = "isGrounded")]
    pub is_grounded: bool,

    #[serde(alias = "lastGroundId")]
    pub last_ground_id: u16,

    #[serde(alias = "jumpsRemaining")]
    pub jumps_remaining: u8,

    #[serde(alias = "lCancelStatus", default)]
    pub l_cancel_status: Option<LCancelStatus>,

    #[serde(alias = "hurtboxCollisionState", default)]
    pub hurtbox_collision_state: HurtboxState,

    #[serde(alias = "selfInducedAirXSpeed")]
    pub self_induced_air_x_speed: f32,

    #[serde(alias = "selfInducedAirYSpeed")]
    pub self_induced_air_y_speed: f32,

    #[serde(alias = "attackBasedXSpeed")]
    pub attack_based_x_speed: f32,

    #[serde(alias = "attackBasedYSpeed")]
    pub attack_based_y_speed: f32,

    #[serde(alias = "selfInducedGroundXSpeed")]
    pub self_induced_ground_x_speed: f32,

    #[serde(alias = "hitlagRemaining")]
    pub hitlag_remaining: f32,

    #[serde(alias = "isReflectActive", default)]
    pub is_reflect_active: bool,

    #[serde(alias = "isFastfalling", default)]
    pub is_fastfalling: bool,

    #[serde(alias = "isShieldActive", default)]
    pub is_shield_active: bool,

    #[serde(alias = "isInHitstun", default)]
    pub is_in_hitstun: bool,

    #[serde(alias = "isHittingShield", default)]
    pub is_hitting_shield: bool,

    #[serde(alias = "isPowershieldActive", default)]
    pub is_powershield_active: bool,

    #[serde(alias = "isDead", default)]
    pub is_dead: bool,

    #[serde(alias = "isOffscreen", default)]
    pub is_offscreen: bool,
}

/// One item on one frame. Projectiles, turnips, and the like.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ItemUpdate {
    #[serde(alias = "frameNumber")]
    pub frame_number: FrameNumber,

    #[serde(alias = "typeId")]
    pub type_id: u16,

    pub state: u8,

    /// Items can face neither way (0), so this stays a raw float.
    #[serde(alias = "facingDirection")]
    pub facing_direction: f32,

    #[serde(alias = "xVelocity")]
    pub x_velocity: f32,

    #[serde(alias = "yVelocity")]
    pub y_velocity: f32,

    #[serde(alias = "xPosition")]
    pub x_position: f32,

    #[serde(alias = "yPosition")]
    pub y_position: f32,

    #[serde(alias = "damageTaken")]
    pub damage_taken: u16,

    #[serde(alias = "expirationTimer")]
    pub expiration_timer: f32,

    #[serde(alias = "spawnId")]
    pub spawn_id: u32,

    #[serde(alias = "samusMissileType", default)]
    pub samus_missile_type: u8,

    #[serde(alias = "peachTurnipFace", default)]
    pub peach_turnip_face: u8,

    #[serde(alias = "isChargeShotLaunched", default)]
    pub is_charge_shot_launched: bool,

    #[serde(alias = "chargeShotChargeLevel", default)]
    pub charge_shot_charge_level: u8,

    /// Owning player seat, or -1 for unowned items.
    pub owner: i8,
}

/// Marks every frame up to `latest_finalized_frame` as safe to render.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct FrameBookend {
    #[serde(alias = "frameNumber")]
    pub frame_number: FrameNumber,

    #[serde(alias = "latestFinalizedFrame")]
    pub latest_finalized_frame: FrameNumber,
}

/// Which Fountain of Dreams side platform an event targets. The wire value
/// is 0 for the right platform and 1 for the left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize_repr)]
#[repr(u8)]
pub enum PlatformSide {
    Right = 0,
    Left = 1,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct FodPlatforms {
    #[serde(alias = "frameNumber")]
    pub frame_number: FrameNumber,

    #[serde(alias = "platform")]
    pub side: PlatformSide,

    pub height: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize_repr)]
#[repr(u8)]
pub enum GameEndMethod {
    Time = 1,
    Game = 2,
    NoContest = 7,
}

impl std::fmt::Display for GameEndMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {
            Self::Time => write!(f, "TIME!"),
            Self::Game => write!(f, "GAME!"),
            Self::NoContest => write!(f, "No Contest"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct GameEnding {
    #[serde(alias = "gameEndMethod", default)]
    pub game_end_method: Option<GameEndMethod>,

    /// Seat of the player who initiated a quit-out, or -1.
    #[serde(alias = "quitInitiator")]
    pub quit_initiator: i8,
}
