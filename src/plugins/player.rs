use crate::components::{Player, PlayerIntent, PlayerState, Velocity};
use crate::enums::FacingDirection;
use crate::plugins::physics::{GRAVITY, TickSet};
use bevy::app::AppExit;
use bevy::prelude::*;

/// Movement constants
pub const PLAYER_VEL: i32 = 5; // pixels per tick
pub const MAX_JUMPS: u8 = 3;
pub const JUMP_LAUNCH_VELOCITY: f32 = -8.0 * GRAVITY; // negative = up

impl PlayerState {
    /// Launches a jump. Callers must check `jump_count < MAX_JUMPS`;
    /// the cap is their contract, not re-checked here.
    pub fn jump(&mut self, velocity: &mut Velocity) {
        velocity.y = JUMP_LAUNCH_VELOCITY;
        self.animation_phase = 0;
        self.jump_count += 1;
        // Drop accumulated gravity so the mid-air relaunch gets full
        // height. The third jump keeps its timer (source behavior).
        if self.jump_count == 1 || self.jump_count == 2 {
            self.fall_timer = 0;
        }
    }

    /// (0, 0) is the top left, so left is negative x.
    pub fn move_left(&mut self, velocity: &mut Velocity, speed: i32) {
        velocity.x = -speed;
        if self.facing != FacingDirection::Left {
            self.facing = FacingDirection::Left;
            self.animation_phase = 0;
        }
    }

    pub fn move_right(&mut self, velocity: &mut Velocity, speed: i32) {
        velocity.x = speed;
        if self.facing != FacingDirection::Right {
            self.facing = FacingDirection::Right;
            self.animation_phase = 0;
        }
    }

    /// Downward vertical collision: the actor came to rest on a block.
    pub fn landed(&mut self, velocity: &mut Velocity) {
        velocity.y = 0.0;
        self.fall_timer = 0;
        self.jump_count = 0;
    }

    /// Upward vertical collision: bounce back down off the ceiling.
    pub fn hit_head(&mut self, velocity: &mut Velocity) {
        self.fall_timer = 0;
        velocity.y = -velocity.y;
    }
}

/// Plugin for input polling and jump handling
pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, poll_input_system);
        app.add_systems(FixedUpdate, apply_jump_system.in_set(TickSet::Jump));
    }
}

/// Capture keyboard state into PlayerIntent. Runs every frame; the jump
/// edge is latched so a press between fixed ticks is not lost.
fn poll_input_system(
    keyboard: Res<Input<KeyCode>>,
    mut exit: EventWriter<AppExit>,
    mut query: Query<&mut PlayerIntent, With<Player>>,
) {
    if keyboard.just_pressed(KeyCode::Escape) {
        exit.send(AppExit);
    }

    for mut intent in query.iter_mut() {
        intent.move_left = keyboard.pressed(KeyCode::Left) || keyboard.pressed(KeyCode::A);
        intent.move_right = keyboard.pressed(KeyCode::Right) || keyboard.pressed(KeyCode::D);
        if keyboard.just_pressed(KeyCode::Space) {
            intent.jump_pressed = true;
        }
    }
}

/// Consume a latched jump edge; the jump-count cap lives here.
fn apply_jump_system(
    mut query: Query<(&mut PlayerIntent, &mut Velocity, &mut PlayerState), With<Player>>,
) {
    for (mut intent, mut velocity, mut state) in query.iter_mut() {
        if intent.jump_pressed {
            intent.jump_pressed = false;
            if state.jump_count < MAX_JUMPS {
                state.jump(&mut velocity);
            }
        }
    }
}
