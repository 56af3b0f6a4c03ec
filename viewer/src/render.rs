//! Resolves one entity's assembled frame state into the descriptor a
//! renderer draws from: which clip, which pose in it, how it's rotated,
//! mirrored, and colored.
//!
//! Everything here is a pure read of the timeline and the character's
//! animation table. Faults degrade instead of propagating: an unknown action
//! or a clip the asset table is missing still yields a descriptor, just with
//! no pose path to draw.

use std::f32::consts::FRAC_PI_2;

use slippi_animations::CharacterAnimations;
use slippi_melee::action::{FOX_FALCO_SPECIAL_AIR_HI, FOX_FALCO_SPECIAL_HI};
use slippi_melee::{action_name, clips_for, InternalCharacter, PlayerPalette};
use slippi_spectator::events::{Direction, GameSettings, HurtboxState, LCancelStatus, PlayerSettings, PlayerState};
use slippi_spectator::{history, PlayerUpdate, Timeline};

/// Outline treatment for an entity, most urgent first.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OutlineColor {
    /// A cancel window was missed at the start of this action.
    Red,
    /// The entity is in a non-vulnerable hurtbox state.
    Blue,
    Black,
}

/// Everything a renderer needs to draw one entity on one frame.
#[derive(Clone, Debug)]
pub struct RenderData {
    pub player_index: usize,
    pub is_nana: bool,

    /// The resolved clip name. Kept even when the asset table has no such
    /// clip, so debug overlays can show what was asked for.
    pub animation_name: String,
    pub clip_frame_index: usize,

    /// The pose to draw, or `None` when the table has no usable entry and a
    /// placeholder should be shown instead.
    pub pose_path: Option<String>,

    pub position: (f32, f32),
    pub rotation_degrees: f32,

    /// Horizontal mirroring for the pose art.
    pub facing: Direction,

    /// Art scale for this character's rig.
    pub render_scale: f32,

    pub inner_color: PlayerPalette,
    pub outer_color: OutlineColor,
}

/// Builds the render descriptor for one entity of `update`, or `None` when
/// that entity has no post-frame state on this frame.
pub(crate) fn resolve(
    timeline: &Timeline,
    settings: &GameSettings,
    player: &PlayerSettings,
    update: &PlayerUpdate,
    animations: &CharacterAnimations,
    is_nana: bool,
) -> Option<RenderData> {
    let state = update.state_for(is_nana)?;

    let start_frame = history::start_of_action(timeline, state);
    let start_state = timeline.player_state_on_frame(state.player_index, start_frame, is_nana);

    let animation_name = animation_name_for(state);

    let clip = animations.clip(&animation_name);

    // Flooring handles the fractional and negative counters some states
    // report; the modulo wraps looping clips like Wait and Guard. A missing
    // or empty clip pins the index to 0.
    let clip_frame_index = match clip.map(|clip| clip.len()) {
        Some(length) if length > 0 => (state.action_state_frame_counter.max(0.0).floor() as usize) % length,
        _ => 0,
    };

    let pose_path = clip
        .and_then(|clip| clip.pose_at(clip_frame_index))
        .map(|pose| pose.to_string());

    let rotation_degrees = if animation_name == "DamageFlyRoll" {
        damage_fly_roll_rotation(timeline, state)
    } else if is_spacie_up_b(state) {
        spacie_up_b_rotation(timeline, state)
    } else {
        0.0
    };

    // Facing updates partway through actions that visually turn the player
    // around, which would mirror the art before the clip catches up. Pin
    // facing to the start of the action except for the jump family and up
    // specials, which legitimately flip mid-action.
    let facing = if follows_current_facing(&animation_name) {
        state.facing_direction
    } else {
        start_state
            .map(|start| start.facing_direction)
            .unwrap_or(state.facing_direction)
    };

    let missed_l_cancel = start_state.map_or(false, |start| start.l_cancel_status == Some(LCancelStatus::Missed));

    let outer_color = if missed_l_cancel {
        OutlineColor::Red
    } else if state.hurtbox_collision_state != HurtboxState::Vulnerable {
        OutlineColor::Blue
    } else {
        OutlineColor::Black
    };

    let inner_color = if settings.is_teams {
        PlayerPalette::for_team(player.team_id, player.team_shade, is_nana)
    } else {
        PlayerPalette::for_port(player.player_index, is_nana)
    };

    let render_scale = InternalCharacter::try_from(state.internal_character_id)
        .map(|internal| clips_for(internal).scale)
        .unwrap_or(1.0);

    Some(RenderData {
        player_index: state.player_index,
        is_nana,
        animation_name,
        clip_frame_index,
        pose_path,
        position: (state.x_position, state.y_position),
        rotation_degrees,
        facing,
        render_scale,
        inner_color,
        outer_color,
    })
}

/// Maps an entity's action to the clip name its character's table uses:
/// name-based renames first, then id-based special overrides, then the
/// canonical action name itself.
fn animation_name_for(state: &PlayerState) -> String {
    let canonical = action_name(state.action_state_id);
    let clips = InternalCharacter::try_from(state.internal_character_id)
        .map(clips_for)
        .ok();

    if let Some(clips) = clips {
        if let Some(renamed) = canonical.and_then(|name| clips.renamed_clip(name)) {
            return renamed.to_string();
        }

        if let Some(special) = clips.special_clip(state.action_state_id) {
            return special.to_string();
        }
    }

    match canonical {
        Some(name) => name.to_string(),
        None => format!("UnknownAction{}", state.action_state_id),
    }
}

/// Jumps and up specials either need the live facing value or never flip
/// mid-action, so the current frame is always safe for them.
fn follows_current_facing(animation_name: &str) -> bool {
    animation_name.contains("Jump") || matches!(animation_name, "SpecialHi" | "SpecialAirHi")
}

fn is_spacie_up_b(state: &PlayerState) -> bool {
    let is_spacie = matches!(
        InternalCharacter::try_from(state.internal_character_id),
        Ok(InternalCharacter::Fox) | Ok(InternalCharacter::Falco)
    );

    is_spacie
        && (state.action_state_id == FOX_FALCO_SPECIAL_HI || state.action_state_id == FOX_FALCO_SPECIAL_AIR_HI)
}

/// The tumble clip's neutral pose points along (0,1) but the travel angle is
/// measured from (1,0), so the result shifts by -90. Mirroring needs no
/// special casing since the flip of (0,1) is still (0,1).
fn damage_fly_roll_rotation(timeline: &Timeline, state: &PlayerState) -> f32 {
    let previous = timeline.player_state_on_frame(state.player_index, state.frame_number - 1, state.is_nana);

    match previous {
        Some(previous) => {
            let delta_x = state.x_position - previous.x_position;
            let delta_y = state.y_position - previous.y_position;

            delta_y.atan2(delta_x).to_degrees() - 90.0
        },

        None => 0.0,
    }
}

/// Firefox and Phantasm lean the rig toward whatever direction was held at
/// blastoff. The clip's neutral pose points along (1,0), so a left-facing
/// start needs a further 180 degree flip.
fn spacie_up_b_rotation(timeline: &Timeline, state: &PlayerState) -> f32 {
    let start_frame = history::start_of_action(timeline, state);

    let joystick = timeline
        .player_inputs_on_frame(state.player_index, start_frame, state.is_nana)
        .map(|inputs| (inputs.processed.joystick_x, inputs.processed.joystick_y));

    let (joystick_x, joystick_y) = match joystick {
        Some(joystick) => joystick,
        None => return 0.0,
    };

    let radians = if joystick_x == 0.0 && joystick_y == 0.0 {
        // Neutral input fires straight up.
        FRAC_PI_2
    } else {
        joystick_y.atan2(joystick_x)
    };

    let started_facing_left = timeline
        .player_state_on_frame(state.player_index, start_frame, state.is_nana)
        .map_or(false, |start| start.facing_direction == Direction::Left);

    radians.to_degrees() - if started_facing_left { 180.0 } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use slippi_melee::action::DAMAGE_FLY_ROLL;
    use slippi_melee::PaletteGroup;
    use slippi_spectator::events::{FrameStart, PlayerInputs, PlayerType, ProcessedInputs};

    use super::*;

    const MARTH: u8 = 18;
    const FOX: u8 = 1;
    const POPO: u8 = 10;
    const NANA: u8 = 11;

    const WAIT: u16 = 14;
    const JUMP_F: u16 = 25;
    const LANDING_AIR_N: u16 = 70;

    fn settings(is_teams: bool) -> GameSettings {
        GameSettings {
            replay_format_version: "3.14.0".to_string(),
            start_timestamp: "2024-06-01T19:00:00Z".to_string(),
            is_teams,
            is_pal: false,
            stage_id: 31,
            timer_start: 480,
            player_settings: Default::default(),
        }
    }

    fn player_settings(player_index: usize) -> PlayerSettings {
        PlayerSettings {
            player_index,
            port: player_index as u8 + 1,
            external_character_id: 0,
            player_type: PlayerType::Human,
            start_stocks: 4,
            costume_index: 0,
            team_id: 0,
            team_shade: 0,
            cpu_level: 0,
            display_name: String::new(),
            connect_code: String::new(),
            nametag: String::new(),
        }
    }

    struct StateSpec {
        frame_number: i32,
        internal_character_id: u8,
        action_state_id: u16,
        counter: f32,
        position: (f32, f32),
        facing: Direction,
        is_nana: bool,
    }

    fn push_state(timeline: &mut Timeline, spec: StateSpec) {
        timeline
            .start_frame(FrameStart {
                frame_number: spec.frame_number,
                random_seed: 0,
            })
            .unwrap();

        timeline
            .apply_inputs(PlayerInputs {
                frame_number: spec.frame_number,
                player_index: 0,
                is_nana: spec.is_nana,
                ..Default::default()
            })
            .unwrap();

        timeline
            .apply_state(PlayerState {
                frame_number: spec.frame_number,
                player_index: 0,
                is_nana: spec.is_nana,
                internal_character_id: spec.internal_character_id,
                action_state_id: spec.action_state_id,
                action_state_frame_counter: spec.counter,
                x_position: spec.position.0,
                y_position: spec.position.1,
                facing_direction: spec.facing,
                ..Default::default()
            })
            .unwrap();
    }

    fn wait_spec(frame_number: i32, counter: f32) -> StateSpec {
        StateSpec {
            frame_number,
            internal_character_id: MARTH,
            action_state_id: WAIT,
            counter,
            position: (0.0, 0.0),
            facing: Direction::Right,
            is_nana: false,
        }
    }

    fn marth_animations() -> CharacterAnimations {
        let mut table = HashMap::new();
        table.insert(
            "Wait1".to_string(),
            vec!["pose-wait-a".to_string(), "frame0".to_string(), "pose-wait-c".to_string()],
        );

        CharacterAnimations::from(table)
    }

    fn resolve_main(timeline: &Timeline, animations: &CharacterAnimations, frame: i32) -> RenderData {
        let update = timeline.player_on_frame(0, frame).unwrap();

        resolve(
            timeline,
            &settings(false),
            &player_settings(0),
            update,
            animations,
            false,
        )
        .unwrap()
    }

    #[test]
    fn resolves_renamed_clip_with_wrapped_index_and_back_reference() {
        let mut timeline = Timeline::default();
        push_state(&mut timeline, wait_spec(0, 4.0));

        let animations = marth_animations();
        let render_data = resolve_main(&timeline, &animations, 0);

        // Marth renames Wait to Wait1; counter 4 wraps the 3-pose clip to
        // index 1, whose stored value refers back to index 0.
        assert_eq!(render_data.animation_name, "Wait1");
        assert_eq!(render_data.clip_frame_index, 1);
        assert_eq!(render_data.pose_path.as_deref(), Some("pose-wait-a"));
        assert_eq!(render_data.rotation_degrees, 0.0);
    }

    #[test]
    fn negative_and_fractional_counters_pin_to_the_clip() {
        let mut timeline = Timeline::default();
        push_state(&mut timeline, wait_spec(0, -1.0));

        let animations = marth_animations();
        assert_eq!(resolve_main(&timeline, &animations, 0).clip_frame_index, 0);

        let mut timeline = Timeline::default();
        push_state(&mut timeline, wait_spec(0, 2.9));
        assert_eq!(resolve_main(&timeline, &animations, 0).clip_frame_index, 2);
    }

    #[test]
    fn missing_clips_degrade_to_the_canonical_name() {
        let mut timeline = Timeline::default();
        push_state(&mut timeline, wait_spec(0, 10.0));

        // Table has no Wait1 at all.
        let animations = CharacterAnimations::from(HashMap::new());
        let render_data = resolve_main(&timeline, &animations, 0);

        assert_eq!(render_data.animation_name, "Wait1");
        assert_eq!(render_data.clip_frame_index, 0);
        assert_eq!(render_data.pose_path, None);
    }

    #[test]
    fn unknown_action_ids_get_a_placeholder_name() {
        let mut timeline = Timeline::default();

        let mut spec = wait_spec(0, 0.0);
        spec.action_state_id = 0x500;
        push_state(&mut timeline, spec);

        let render_data = resolve_main(&timeline, &marth_animations(), 0);
        assert_eq!(render_data.animation_name, "UnknownAction1280");
        assert_eq!(render_data.pose_path, None);
    }

    #[test]
    fn facing_pins_to_the_start_of_the_action() {
        let mut timeline = Timeline::default();
        for (frame, counter) in [(0, 1.0), (1, 2.0), (2, 3.0)] {
            let mut spec = wait_spec(frame, counter);
            // The flag flips mid-action.
            spec.facing = if frame == 2 { Direction::Left } else { Direction::Right };
            push_state(&mut timeline, spec);
        }

        let render_data = resolve_main(&timeline, &marth_animations(), 2);
        assert_eq!(render_data.facing, Direction::Right);
    }

    #[test]
    fn jump_clips_follow_the_current_facing() {
        let mut timeline = Timeline::default();

        for (frame, counter) in [(0, 1.0), (1, 2.0)] {
            let mut spec = wait_spec(frame, counter);
            spec.action_state_id = JUMP_F;
            spec.facing = if frame == 1 { Direction::Left } else { Direction::Right };
            push_state(&mut timeline, spec);
        }

        let render_data = resolve_main(&timeline, &marth_animations(), 1);
        assert_eq!(render_data.animation_name, "JumpF");
        assert_eq!(render_data.facing, Direction::Left);
    }

    #[test]
    fn tumble_rotation_follows_the_travel_direction() {
        let mut timeline = Timeline::default();

        let mut first = wait_spec(0, 1.0);
        first.action_state_id = DAMAGE_FLY_ROLL;
        first.position = (0.0, 0.0);
        push_state(&mut timeline, first);

        let mut second = wait_spec(1, 2.0);
        second.action_state_id = DAMAGE_FLY_ROLL;
        second.position = (3.0, 3.0);
        push_state(&mut timeline, second);

        let render_data = resolve_main(&timeline, &marth_animations(), 1);
        assert_eq!(render_data.animation_name, "DamageFlyRoll");
        assert!((render_data.rotation_degrees - (-45.0)).abs() < 0.001);

        // No preceding frame to measure travel against.
        let render_data = resolve_main(&timeline, &marth_animations(), 0);
        assert_eq!(render_data.rotation_degrees, 0.0);
    }

    fn spacie_spec(frame_number: i32, counter: f32, facing: Direction) -> StateSpec {
        StateSpec {
            frame_number,
            internal_character_id: FOX,
            action_state_id: FOX_FALCO_SPECIAL_AIR_HI,
            counter,
            position: (0.0, 0.0),
            facing,
            is_nana: false,
        }
    }

    fn push_spacie_start(timeline: &mut Timeline, joystick: (f32, f32), facing: Direction) {
        timeline
            .start_frame(FrameStart {
                frame_number: 0,
                random_seed: 0,
            })
            .unwrap();

        timeline
            .apply_inputs(PlayerInputs {
                frame_number: 0,
                player_index: 0,
                processed: ProcessedInputs {
                    joystick_x: joystick.0,
                    joystick_y: joystick.1,
                    ..Default::default()
                },
                ..Default::default()
            })
            .unwrap();

        timeline
            .apply_state(PlayerState {
                frame_number: 0,
                player_index: 0,
                internal_character_id: FOX,
                action_state_id: FOX_FALCO_SPECIAL_AIR_HI,
                action_state_frame_counter: 1.0,
                facing_direction: facing,
                ..Default::default()
            })
            .unwrap();
    }

    #[test]
    fn firefox_rotation_follows_the_held_direction_at_blastoff() {
        let mut timeline = Timeline::default();
        push_spacie_start(&mut timeline, (1.0, 1.0), Direction::Right);
        push_state(&mut timeline, spacie_spec(1, 2.0, Direction::Right));

        let render_data = resolve_main(&timeline, &marth_animations(), 1);
        assert_eq!(render_data.animation_name, "SpecialAirHi");
        assert!((render_data.rotation_degrees - 45.0).abs() < 0.001);
        assert_eq!(render_data.render_scale, 0.96);
    }

    #[test]
    fn firefox_rotation_flips_when_the_start_faced_left() {
        let mut timeline = Timeline::default();
        push_spacie_start(&mut timeline, (1.0, 1.0), Direction::Left);
        push_state(&mut timeline, spacie_spec(1, 2.0, Direction::Left));

        let render_data = resolve_main(&timeline, &marth_animations(), 1);
        assert!((render_data.rotation_degrees - (45.0 - 180.0)).abs() < 0.001);
    }

    #[test]
    fn neutral_firefox_aims_straight_up() {
        let mut timeline = Timeline::default();
        push_spacie_start(&mut timeline, (0.0, 0.0), Direction::Right);
        push_state(&mut timeline, spacie_spec(1, 2.0, Direction::Right));

        let render_data = resolve_main(&timeline, &marth_animations(), 1);
        assert!((render_data.rotation_degrees - 90.0).abs() < 0.001);
    }

    #[test]
    fn missed_l_cancel_at_action_start_outlines_red() {
        let mut timeline = Timeline::default();

        // The miss flag only exists on the landing frame itself. Later
        // frames of the landing action still outline red because the check
        // reads the start of the action.
        timeline
            .apply_state(PlayerState {
                frame_number: 0,
                player_index: 0,
                internal_character_id: MARTH,
                action_state_id: LANDING_AIR_N,
                action_state_frame_counter: 1.0,
                l_cancel_status: Some(LCancelStatus::Missed),
                ..Default::default()
            })
            .unwrap();

        let mut second = wait_spec(1, 2.0);
        second.action_state_id = LANDING_AIR_N;
        push_state(&mut timeline, second);

        let render_data = resolve_main(&timeline, &marth_animations(), 1);
        assert_eq!(render_data.animation_name, "LandingAirN");
        assert_eq!(render_data.outer_color, OutlineColor::Red);
    }

    #[test]
    fn non_vulnerable_hurtboxes_outline_blue() {
        let mut timeline = Timeline::default();

        timeline
            .apply_state(PlayerState {
                frame_number: 0,
                player_index: 0,
                internal_character_id: MARTH,
                action_state_id: WAIT,
                action_state_frame_counter: 1.0,
                hurtbox_collision_state: HurtboxState::Intangible,
                ..Default::default()
            })
            .unwrap();

        let render_data = resolve_main(&timeline, &marth_animations(), 0);
        assert_eq!(render_data.outer_color, OutlineColor::Blue);
    }

    #[test]
    fn port_palettes_apply_outside_of_teams() {
        let mut timeline = Timeline::default();
        push_state(&mut timeline, wait_spec(0, 1.0));

        let render_data = resolve_main(&timeline, &marth_animations(), 0);
        assert_eq!(render_data.inner_color.group, PaletteGroup::Red);
        assert_eq!(render_data.inner_color.shade, 0);
        assert_eq!(render_data.outer_color, OutlineColor::Black);
        assert_eq!(render_data.render_scale, 1.08);
    }

    #[test]
    fn team_palettes_apply_in_teams_games() {
        let mut timeline = Timeline::default();
        push_state(&mut timeline, wait_spec(0, 1.0));

        let update = timeline.player_on_frame(0, 0).unwrap();

        let mut player = player_settings(0);
        player.team_id = 1;
        player.team_shade = 2;

        let render_data = resolve(
            &timeline,
            &settings(true),
            &player,
            update,
            &marth_animations(),
            false,
        )
        .unwrap();

        assert_eq!(
            render_data.inner_color,
            PlayerPalette {
                group: PaletteGroup::Blue,
                shade: 2
            }
        );
    }

    #[test]
    fn nana_resolves_from_her_own_lane() {
        let mut timeline = Timeline::default();

        let mut popo = wait_spec(0, 1.0);
        popo.internal_character_id = POPO;
        push_state(&mut timeline, popo);

        let mut nana = wait_spec(0, 5.0);
        nana.internal_character_id = NANA;
        nana.is_nana = true;
        push_state(&mut timeline, nana);

        // Ice Climbers use the shared Wait clip name as-is.
        let mut table = HashMap::new();
        table.insert(
            "Wait".to_string(),
            vec!["pose-ics-a".to_string(), "pose-ics-b".to_string(), "pose-ics-c".to_string()],
        );
        let animations = CharacterAnimations::from(table);

        let update = timeline.player_on_frame(0, 0).unwrap();

        let nana_render = resolve(
            &timeline,
            &settings(false),
            &player_settings(0),
            update,
            &animations,
            true,
        )
        .unwrap();

        assert!(nana_render.is_nana);
        assert_eq!(nana_render.animation_name, "Wait");
        assert_eq!(nana_render.clip_frame_index, 2);
        assert_eq!(nana_render.pose_path.as_deref(), Some("pose-ics-c"));
        // Nana always takes the alternate shade of the seat's palette.
        assert_eq!(nana_render.inner_color.shade, 1);
    }

    #[test]
    fn entities_without_state_resolve_to_nothing() {
        let mut timeline = Timeline::default();
        push_state(&mut timeline, wait_spec(0, 1.0));

        let update = timeline.player_on_frame(0, 0).unwrap();

        assert!(resolve(
            &timeline,
            &settings(false),
            &player_settings(0),
            update,
            &marth_animations(),
            true,
        )
        .is_none());
    }
}
