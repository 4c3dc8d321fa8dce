use crate::components::{BoundingBox, CollisionShape, Player, Velocity};
use crate::plugins::physics::TickSet;
use bevy::prelude::*;

/// Viewport dimensions in world pixels
pub const VIEWPORT_WIDTH: i32 = 1024;
pub const VIEWPORT_HEIGHT: i32 = 600;

/// Margin at each viewport edge where the camera starts scrolling
pub const SCROLL_AREA_WIDTH: i32 = 200;

/// Horizontal camera offset in world pixels. Obstacles and the actor
/// are drawn at `world position - offset`.
#[derive(Resource, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScrollOffset(pub i32);

/// Camera marker component
#[derive(Component)]
pub struct GameCamera;

/// Plugin for the dead-zone scrolling viewport
pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ScrollOffset>()
            .add_systems(Startup, setup_camera)
            .add_systems(FixedUpdate, update_scroll_system.in_set(TickSet::Scroll));
    }
}

/// The camera sits still over the viewport; scrolling happens by
/// shifting world transforms with the offset.
fn setup_camera(mut commands: Commands) {
    commands.spawn((
        Camera2dBundle {
            transform: Transform::from_xyz(
                VIEWPORT_WIDTH as f32 / 2.0,
                -(VIEWPORT_HEIGHT as f32) / 2.0,
                999.9,
            ),
            ..Default::default()
        },
        GameCamera,
    ));
}

/// Dead-zone rule: the offset moves by the actor's horizontal velocity
/// only while the actor pushes into the margin in that direction.
/// Releasing the keys freezes the camera immediately.
pub fn scroll_delta(
    actor: &BoundingBox,
    x_vel: i32,
    offset: i32,
    viewport_width: i32,
    dead_zone: i32,
) -> i32 {
    let crossing_right = actor.right() - offset >= viewport_width - dead_zone && x_vel > 0;
    let crossing_left = actor.left() - offset <= dead_zone && x_vel < 0;

    if crossing_right || crossing_left {
        x_vel
    } else {
        0
    }
}

fn update_scroll_system(
    mut offset: ResMut<ScrollOffset>,
    query: Query<(&CollisionShape, &Velocity), With<Player>>,
) {
    for (shape, velocity) in query.iter() {
        offset.0 += scroll_delta(
            &shape.rect,
            velocity.x,
            offset.0,
            VIEWPORT_WIDTH,
            SCROLL_AREA_WIDTH,
        );
    }
}
