use crate::components::{BoundingBox, CollisionShape, Player, PlayerState, Velocity};
use crate::enums::{AnimationKind, FacingDirection};
use crate::plugins::camera::ScrollOffset;
use crate::plugins::physics::TickSet;
use crate::sprites::{AnimationSet, AssetError};
use bevy::prelude::*;

/// Ticks per animation frame
pub const ANIMATION_DELAY: u32 = 10;

/// The player's loaded animation set, injected at level setup.
#[derive(Resource, Clone, Debug)]
pub struct PlayerAnimations(pub AnimationSet);

/// Plugin for the animation state machine and render-side transforms
pub struct AnimationPlugin;

impl Plugin for AnimationPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            FixedUpdate,
            (
                animate_player_system.in_set(TickSet::Animate),
                sync_transforms_system.in_set(TickSet::Sync),
            ),
        );
    }
}

/// Base animation from motion state: rising wins, then walking, then
/// standing.
pub fn select_animation(velocity: &Velocity) -> AnimationKind {
    if velocity.y < 0.0 {
        AnimationKind::Jump
    } else if velocity.x != 0 {
        AnimationKind::Walk
    } else {
        AnimationKind::Stand
    }
}

/// Sprite-sheet key for a motion state, e.g. "Walk_right".
pub fn animation_key(kind: AnimationKind, facing: FacingDirection) -> String {
    format!("{}_{}", kind.name(), facing.suffix())
}

/// Looping frame index; the phase counter is unbounded and wraps
/// implicitly through the modulo.
pub fn frame_index(phase: u32, frame_count: usize) -> usize {
    (phase / ANIMATION_DELAY) as usize % frame_count
}

/// One animation step: pick the animation for the current motion state,
/// swap the collision shape to the chosen frame, advance the phase.
pub fn advance_animation(
    shape: &mut CollisionShape,
    velocity: &Velocity,
    state: &mut PlayerState,
    animations: &AnimationSet,
) -> Result<(), AssetError> {
    let key = animation_key(select_animation(velocity), state.facing);
    let frames = animations.frames(&key)?;
    let frame = &frames[frame_index(state.animation_phase, frames.len())];

    // The shape is replaced wholesale; frames differ in size.
    *shape = CollisionShape::new(
        BoundingBox::new(shape.rect.x, shape.rect.y, frame.width(), frame.height()),
        frame.mask().clone(),
    );
    state.animation_phase = state.animation_phase.wrapping_add(1);
    Ok(())
}

fn animate_player_system(
    animations: Res<PlayerAnimations>,
    mut query: Query<(&mut CollisionShape, &Velocity, &mut PlayerState), With<Player>>,
) {
    for (mut shape, velocity, mut state) in query.iter_mut() {
        if let Err(e) = advance_animation(&mut shape, velocity, &mut state, &animations.0) {
            // Broken asset-provider contract; the shape keeps its
            // previous frame.
            error!("animation selection failed: {}", e);
        }
    }
}

/// Render request: place every shape at its world position minus the
/// scroll offset. Bevy's y axis points up, world pixels point down.
fn sync_transforms_system(
    offset: Res<ScrollOffset>,
    mut query: Query<(&CollisionShape, &mut Transform)>,
) {
    for (shape, mut transform) in query.iter_mut() {
        transform.translation.x =
            (shape.rect.x - offset.0) as f32 + shape.rect.width as f32 / 2.0;
        transform.translation.y = -(shape.rect.y as f32 + shape.rect.height as f32 / 2.0);
    }
}
