//! The spectator viewer device that embedding shells drive. The shell owns
//! the actual stream transport and the screen; this crate owns everything in
//! between: session lifecycle, animation table loading, viewport state, and
//! turning the current playback frame into flat render descriptors.
//!
//! The expected wiring is one [`SpectatorViewer`] per viewer surface. The
//! shell calls [`SpectatorViewer::connect`] when the user picks a stream,
//! funnels every transport callback through
//! [`SpectatorViewer::handle_transport`] tagged with the binding token
//! `connect` returned, and polls [`SpectatorViewer::resolve_frame`] from its
//! draw loop.

use shell_integrations::{Color, Duration, Log, Shell};
use slippi_animations::{AnimationCache, AnimationSource, HttpAnimationSource};
use slippi_melee::{ExternalCharacter, InternalCharacter};
use slippi_spectator::events::PlayerSettings;
use slippi_spectator::{Frame, FrameNumber, GameEvent, SessionCore, SpectateSession};

pub mod config;
pub use config::{AssetPathsConfig, Config};

mod render;
pub use render::{OutlineColor, RenderData};

/// Why a stream stopped delivering events.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DisconnectReason {
    /// The stream ended normally; the broadcaster is done.
    Closed,
    /// The connection dropped out from under us and the shell intends to
    /// re-establish it.
    Error,
}

/// What a shell's transport layer reports into the viewer.
#[derive(Clone, Debug, PartialEq)]
pub enum TransportNotification {
    Connected,
    Data(Vec<GameEvent>),
    Disconnected(DisconnectReason),
}

/// Per-connection camera and overlay state.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Viewport {
    pub zoom: f64,
    pub is_debug: bool,
    pub is_fullscreen: bool,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            is_debug: false,
            is_fullscreen: false,
        }
    }
}

/// Zoom factor applied per scroll step.
const ZOOM_STEP: f64 = 1.01;

/// A snapshot of session state for the shell's chrome (loading spinners,
/// disconnect banners, the "LIVE" tag, end-of-game overlays).
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct SessionStatus {
    /// Whether any character in the game is still waiting on its animation
    /// table.
    pub is_loading: bool,
    pub is_disconnected: bool,
    pub is_watching_live: bool,
    /// Set once the game on stream has ended, to the final frame.
    pub game_end_frame: Option<FrameNumber>,
}

/// The viewer itself.
///
/// Stream bindings are identified by a token that bumps on every connect and
/// disconnect. Transport callbacks race teardown (a socket can deliver a
/// batch after the user has already switched streams), so every notification
/// carries the token it was registered under and stale ones get dropped at
/// the door.
#[derive(Debug)]
pub struct SpectatorViewer {
    config: Config,
    animations: AnimationCache,
    session: Option<SpectateSession>,
    connection: u64,
    is_disconnected: bool,
    viewport: Viewport,
}

impl SpectatorViewer {
    /// Builds a viewer that loads animation tables from the asset host in
    /// `config`.
    pub fn new(config: Config) -> Self {
        let source = HttpAnimationSource::new(config.assets.animations_base_url.clone());

        Self::with_animation_source(config, source)
    }

    /// Builds a viewer around a custom animation source. Offline shells use
    /// this to read tables from disk instead of the asset host.
    pub fn with_animation_source(config: Config, source: impl AnimationSource) -> Self {
        tracing::info!(target: Log::Viewer, "Starting SpectatorViewer");

        Self {
            config,
            animations: AnimationCache::new(source),
            session: None,
            connection: 0,
            is_disconnected: false,
            viewport: Viewport::default(),
        }
    }

    /// Binds the viewer to a new stream, tearing down whatever it was
    /// watching before. Returns the binding token the shell must tag this
    /// stream's transport notifications with.
    ///
    /// The animation cache is deliberately not part of the teardown; tables
    /// are immutable and as valid for the next stream as the last one.
    pub fn connect(&mut self, stream_address: &str) -> u64 {
        // Dropping the previous session joins its driver thread before the
        // replacement spawns.
        self.session = None;
        self.connection = self.connection.wrapping_add(1);
        self.is_disconnected = false;
        self.viewport = Viewport::default();

        match SpectateSession::new(self.config.playback.clone()) {
            Ok(session) => {
                tracing::info!(
                    target: Log::Viewer,
                    address = stream_address,
                    connection = self.connection,
                    "Bound viewer to stream"
                );

                self.session = Some(session);
            },

            Err(e) => {
                tracing::error!(target: Log::Viewer, error = ?e, "Failed to start spectate session");
                Shell::add_status_notice(Color::Red, Duration::Normal, "Unable to start the spectator session");
            },
        }

        self.connection
    }

    /// Detaches from the current stream and drops everything assembled from
    /// it. The token bumps here too, so callbacks from the old transport
    /// can't touch a later binding.
    pub fn disconnect(&mut self) {
        if self.session.take().is_some() {
            tracing::info!(target: Log::Viewer, connection = self.connection, "Detached viewer from stream");
        }

        self.connection = self.connection.wrapping_add(1);
        self.is_disconnected = false;
        self.viewport = Viewport::default();
    }

    /// Applies one transport notification, if it belongs to the current
    /// binding.
    pub fn handle_transport(&mut self, connection: u64, notification: TransportNotification) {
        if connection != self.connection {
            tracing::warn!(
                target: Log::Viewer,
                received = connection,
                current = self.connection,
                "Dropping notification from a stale stream binding"
            );

            return;
        }

        match notification {
            TransportNotification::Connected => {
                self.is_disconnected = false;
                Shell::add_status_notice(Color::Green, Duration::Short, "Connected to stream");
            },

            TransportNotification::Data(events) => {
                if let Some(session) = self.session.as_ref() {
                    session.ingest(events);
                }
            },

            TransportNotification::Disconnected(DisconnectReason::Closed) => {
                self.is_disconnected = true;
                tracing::info!(target: Log::Viewer, "Stream ended");
                Shell::add_status_notice(Color::Yellow, Duration::Normal, "Stream ended");
            },

            TransportNotification::Disconnected(DisconnectReason::Error) => {
                // The session and the game it assembled stay put, so a
                // reconnect on the same binding resumes without data loss.
                self.is_disconnected = true;
                tracing::warn!(target: Log::Viewer, "Stream connection lost");
                Shell::add_status_notice(Color::Red, Duration::Normal, "Stream connection lost");
            },
        }
    }

    pub fn toggle_pause(&self) {
        if let Some(session) = self.session.as_ref() {
            session.toggle_pause();
        }
    }

    pub fn speed_normal(&self) {
        if let Some(session) = self.session.as_ref() {
            session.speed_normal();
        }
    }

    pub fn speed_fast(&self) {
        if let Some(session) = self.session.as_ref() {
            session.speed_fast();
        }
    }

    pub fn speed_slow(&self) {
        if let Some(session) = self.session.as_ref() {
            session.speed_slow();
        }
    }

    pub fn jump(&self, frame: FrameNumber) {
        if let Some(session) = self.session.as_ref() {
            session.jump(frame);
        }
    }

    pub fn jump_percent(&self, fraction: f64) {
        if let Some(session) = self.session.as_ref() {
            session.jump_percent(fraction);
        }
    }

    pub fn jump_to_live(&self) {
        if let Some(session) = self.session.as_ref() {
            session.jump_to_live();
        }
    }

    pub fn adjust(&self, delta: FrameNumber) {
        if let Some(session) = self.session.as_ref() {
            session.adjust(delta);
        }
    }

    pub fn zoom_in(&mut self) {
        self.viewport.zoom *= ZOOM_STEP;
    }

    pub fn zoom_out(&mut self) {
        self.viewport.zoom /= ZOOM_STEP;
    }

    pub fn toggle_debug(&mut self) {
        self.viewport.is_debug = !self.viewport.is_debug;
    }

    pub fn toggle_fullscreen(&mut self) {
        self.viewport.is_fullscreen = !self.viewport.is_fullscreen;
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Snapshot of session state for the shell's chrome.
    pub fn status(&self) -> SessionStatus {
        match self.session.as_ref() {
            Some(session) => session.read(|core| SessionStatus {
                is_loading: self.has_pending_animations(core),
                is_disconnected: self.is_disconnected,
                is_watching_live: core.is_watching_live(),
                game_end_frame: core.game_end_frame(),
            }),

            None => SessionStatus {
                is_disconnected: self.is_disconnected,
                ..Default::default()
            },
        }
    }

    /// A copy of the frame under the playback cursor. Item entities and the
    /// debug overlay draw straight off this; player poses go through
    /// [`Self::resolve_frame`] instead.
    pub fn current_frame(&self) -> Option<Frame> {
        self.session
            .as_ref()
            .and_then(|session| session.read(|core| core.current_frame().cloned()))
    }

    /// Resolves the frame under the playback cursor into render descriptors,
    /// one per drawable entity, requesting animation tables along the way.
    ///
    /// Entities whose table hasn't loaded yet are skipped rather than drawn
    /// as placeholders; they pop in when their fetch lands.
    pub fn resolve_frame(&self) -> Vec<RenderData> {
        let session = match self.session.as_ref() {
            Some(session) => session,
            None => return Vec::new(),
        };

        session.read(|core| {
            let settings = match core.settings() {
                Some(settings) => settings,
                None => return Vec::new(),
            };

            let frame = match core.current_frame() {
                Some(frame) => frame,
                None => return Vec::new(),
            };

            let mut entities = Vec::new();

            for player in settings.player_settings.iter().flatten() {
                let update = frame
                    .players
                    .get(player.player_index)
                    .and_then(|slot| slot.as_ref());

                let update = match update {
                    Some(update) => update,
                    None => continue,
                };

                let character = match desired_character(core, player) {
                    Some(character) => character,
                    None => continue,
                };

                // Kicks the fetch for whatever table this seat needs right
                // now. Transform moves swap the desired table mid-game, and
                // a failed fetch gets retried here on the next frame.
                self.animations.request(character);

                let animations = match self.animations.get(character) {
                    Some(animations) => animations,
                    None => continue,
                };

                for is_nana in [false, true] {
                    let entity = render::resolve(core.timeline(), settings, player, update, &animations, is_nana);

                    if let Some(entity) = entity {
                        entities.push(entity);
                    }
                }
            }

            entities
        })
    }

    fn has_pending_animations(&self, core: &SessionCore) -> bool {
        let settings = match core.settings() {
            Some(settings) => settings,
            None => return false,
        };

        settings
            .player_settings
            .iter()
            .flatten()
            .filter_map(|player| desired_character(core, player))
            .any(|character| self.animations.get(character).is_none())
    }
}

/// The character whose animation table a seat needs right now.
///
/// Sheik starts as a Zelda pick and transforms both ways mid-game, so the
/// character on the current frame wins over the one from the game settings.
/// Before any frame exists (or for a character id off the known range) the
/// settings pick is the fallback.
fn desired_character(core: &SessionCore, player: &PlayerSettings) -> Option<ExternalCharacter> {
    let current = core
        .current_frame()
        .and_then(|frame| frame.players.get(player.player_index)?.as_ref())
        .and_then(|update| update.state_for(false))
        .and_then(|state| InternalCharacter::try_from(state.internal_character_id).ok())
        .and_then(|internal| internal.to_external());

    current.or_else(|| ExternalCharacter::try_from(player.external_character_id).ok())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::thread;
    use std::time::{Duration as StdDuration, Instant};

    use slippi_animations::{AnimationError, CharacterAnimations};
    use slippi_spectator::events::{
        FrameBookend, FrameStart, GameSettings, ItemUpdate, PlayerInputs, PlayerState, PlayerType,
    };

    use super::*;

    const MARTH_EXTERNAL: u8 = 0x09;
    const MARTH_INTERNAL: u8 = 18;
    const WAIT: u16 = 14;

    /// Serves every character the same one-clip table, without any network.
    #[derive(Debug)]
    struct StaticAnimations;

    impl AnimationSource for StaticAnimations {
        fn fetch(&self, _character: ExternalCharacter) -> Result<CharacterAnimations, AnimationError> {
            let mut table = HashMap::new();
            table.insert("Wait1".to_string(), vec!["pose-wait".to_string()]);

            Ok(CharacterAnimations::from(table))
        }
    }

    fn test_config() -> Config {
        Config {
            assets: AssetPathsConfig {
                animations_base_url: "http://localhost:0/animations".to_string(),
            },
            playback: Default::default(),
        }
    }

    fn viewer() -> SpectatorViewer {
        SpectatorViewer::with_animation_source(test_config(), StaticAnimations)
    }

    fn game_start() -> GameEvent {
        let mut player_settings: [Option<PlayerSettings>; 4] = Default::default();
        player_settings[0] = Some(PlayerSettings {
            player_index: 0,
            port: 1,
            external_character_id: MARTH_EXTERNAL,
            player_type: PlayerType::Human,
            start_stocks: 4,
            costume_index: 0,
            team_id: 0,
            team_shade: 0,
            cpu_level: 0,
            display_name: "mang0".to_string(),
            connect_code: "MANG#0".to_string(),
            nametag: String::new(),
        });

        GameEvent::GameStart(GameSettings {
            replay_format_version: "3.14.0".to_string(),
            start_timestamp: "2024-06-01T19:00:00Z".to_string(),
            is_teams: false,
            is_pal: false,
            stage_id: 31,
            timer_start: 480,
            player_settings,
        })
    }

    fn full_frame(frame_number: FrameNumber) -> Vec<GameEvent> {
        vec![
            GameEvent::FrameStart(FrameStart {
                frame_number,
                random_seed: 0xBEEF,
            }),
            GameEvent::PreFrameUpdate(PlayerInputs {
                frame_number,
                player_index: 0,
                ..Default::default()
            }),
            GameEvent::PostFrameUpdate(PlayerState {
                frame_number,
                player_index: 0,
                internal_character_id: MARTH_INTERNAL,
                action_state_id: WAIT,
                action_state_frame_counter: frame_number as f32,
                ..Default::default()
            }),
        ]
    }

    fn bookend(frame_number: FrameNumber, latest: FrameNumber) -> GameEvent {
        GameEvent::FrameBookend(FrameBookend {
            frame_number,
            latest_finalized_frame: latest,
        })
    }

    fn item(frame_number: FrameNumber) -> GameEvent {
        GameEvent::ItemUpdate(ItemUpdate {
            frame_number,
            type_id: 0x30,
            state: 0,
            facing_direction: 1.0,
            x_velocity: 0.0,
            y_velocity: 0.0,
            x_position: 12.0,
            y_position: 3.0,
            damage_taken: 0,
            expiration_timer: 0.0,
            spawn_id: 1,
            samus_missile_type: 0,
            peach_turnip_face: 0,
            is_charge_shot_launched: false,
            charge_shot_charge_level: 0,
            owner: 0,
        })
    }

    /// Ten frames with the frontier at 8; the first bookend parks the cursor
    /// at 8, which is also the live edge.
    fn ingest_live_game(viewer: &mut SpectatorViewer, connection: u64) {
        let mut events = vec![game_start()];
        for frame in 0..10 {
            events.extend(full_frame(frame));
        }
        events.push(bookend(9, 8));

        viewer.handle_transport(connection, TransportNotification::Data(events));
    }

    /// Polls until the fetch thread has delivered the table and entities
    /// resolve.
    fn wait_for_entities(viewer: &SpectatorViewer) -> Vec<RenderData> {
        let deadline = Instant::now() + StdDuration::from_secs(5);

        loop {
            let entities = viewer.resolve_frame();
            if !entities.is_empty() {
                return entities;
            }

            if Instant::now() >= deadline {
                panic!("Animation table never became ready");
            }

            thread::sleep(StdDuration::from_millis(10));
        }
    }

    #[test]
    fn test_resolve_frame_renders_once_tables_load() {
        let mut viewer = viewer();
        let connection = viewer.connect("ws://relay.example:49809");

        viewer.handle_transport(connection, TransportNotification::Connected);
        ingest_live_game(&mut viewer, connection);

        let entities = wait_for_entities(&viewer);
        assert_eq!(entities.len(), 1);

        let marth = &entities[0];
        assert_eq!(marth.player_index, 0);
        assert_eq!(marth.animation_name, "Wait1");
        assert_eq!(marth.pose_path.as_deref(), Some("pose-wait"));

        let status = viewer.status();
        assert!(!status.is_loading);
        assert!(!status.is_disconnected);
        assert!(status.is_watching_live);
        assert_eq!(status.game_end_frame, None);
    }

    #[test]
    fn test_current_frame_snapshots_items_for_the_shell() {
        let mut viewer = viewer();
        assert!(viewer.current_frame().is_none());

        let connection = viewer.connect("ws://relay.example:49809");
        ingest_live_game(&mut viewer, connection);
        viewer.handle_transport(connection, TransportNotification::Data(vec![item(8)]));

        let frame = viewer.current_frame().unwrap();
        assert_eq!(frame.frame_number, 8);
        assert_eq!(frame.random_seed, Some(0xBEEF));
        assert_eq!(frame.items.len(), 1);
        assert_eq!(frame.items[0].type_id, 0x30);
        assert_eq!(frame.items[0].x_position, 12.0);
    }

    #[test]
    fn test_stale_transport_notifications_are_dropped() {
        let mut viewer = viewer();

        let stale = viewer.connect("ws://relay.example:49809");
        let current = viewer.connect("ws://relay.example:49810");
        assert_ne!(stale, current);

        let mut events = vec![game_start()];
        events.extend(full_frame(0));

        viewer.handle_transport(stale, TransportNotification::Data(events.clone()));
        // Nothing landed, so there's no game to be loading tables for.
        assert!(!viewer.status().is_loading);

        viewer.handle_transport(current, TransportNotification::Data(events));
        assert!(viewer.status().is_loading);
    }

    #[test]
    fn test_disconnect_tears_the_binding_down() {
        let mut viewer = viewer();
        let connection = viewer.connect("ws://relay.example:49809");

        ingest_live_game(&mut viewer, connection);
        viewer.zoom_in();

        viewer.disconnect();

        assert!(viewer.resolve_frame().is_empty());
        assert_eq!(viewer.status(), SessionStatus::default());
        assert_eq!(viewer.viewport(), Viewport::default());

        // The old binding's transport can still fire during teardown.
        viewer.handle_transport(connection, TransportNotification::Data(vec![game_start()]));
        assert_eq!(viewer.status(), SessionStatus::default());
    }

    #[test]
    fn test_transport_errors_keep_the_assembled_game() {
        let mut viewer = viewer();
        let connection = viewer.connect("ws://relay.example:49809");

        ingest_live_game(&mut viewer, connection);
        let before = wait_for_entities(&viewer);

        viewer.handle_transport(connection, TransportNotification::Disconnected(DisconnectReason::Error));

        assert!(viewer.status().is_disconnected);
        assert_eq!(viewer.resolve_frame().len(), before.len());

        // The shell re-established the same binding.
        viewer.handle_transport(connection, TransportNotification::Connected);
        assert!(!viewer.status().is_disconnected);
    }

    #[test]
    fn test_playback_commands_reach_the_session() {
        let mut viewer = viewer();
        let connection = viewer.connect("ws://relay.example:49809");

        ingest_live_game(&mut viewer, connection);
        assert!(viewer.status().is_watching_live);

        viewer.toggle_pause();
        viewer.jump(2);
        assert!(!viewer.status().is_watching_live);

        viewer.jump_to_live();
        assert!(viewer.status().is_watching_live);
    }

    #[test]
    fn test_commands_without_a_session_are_ignored() {
        let viewer = viewer();

        viewer.toggle_pause();
        viewer.speed_fast();
        viewer.jump(10);
        viewer.jump_percent(0.5);
        viewer.jump_to_live();
        viewer.adjust(-60);

        assert!(viewer.resolve_frame().is_empty());
        assert_eq!(viewer.status(), SessionStatus::default());
    }

    #[test]
    fn test_viewport_adjustments_accumulate_until_reconnect() {
        let mut viewer = viewer();

        viewer.zoom_in();
        viewer.zoom_in();
        assert!((viewer.viewport().zoom - ZOOM_STEP * ZOOM_STEP).abs() < 1e-9);

        viewer.zoom_out();
        assert!((viewer.viewport().zoom - ZOOM_STEP).abs() < 1e-9);

        viewer.toggle_debug();
        viewer.toggle_fullscreen();
        assert!(viewer.viewport().is_debug);
        assert!(viewer.viewport().is_fullscreen);

        // A fresh binding starts the camera over.
        viewer.connect("ws://relay.example:49809");
        assert_eq!(viewer.viewport(), Viewport::default());
    }
}
