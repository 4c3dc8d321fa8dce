use bevy::prelude::*;
use pixel_platformer::plugins::camera::{VIEWPORT_HEIGHT, VIEWPORT_WIDTH};
use pixel_platformer::plugins::{
    AnimationPlugin, CameraPlugin, CollisionPlugin, LevelPlugin, PhysicsPlugin, PlayerPlugin,
};

fn main() {
    App::new()
        .insert_resource(ClearColor(Color::rgb(0.36, 0.58, 0.82)))
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Pixel Platformer".to_string(),
                resolution: (VIEWPORT_WIDTH as f32, VIEWPORT_HEIGHT as f32).into(),
                ..Default::default()
            }),
            ..Default::default()
        }))
        .add_plugins(PhysicsPlugin)
        .add_plugins(PlayerPlugin)
        .add_plugins(CollisionPlugin)
        .add_plugins(AnimationPlugin)
        .add_plugins(CameraPlugin)
        .add_plugins(LevelPlugin)
        .run();
}
