pub mod animation;
pub mod camera;
pub mod collision;
pub mod level;
pub mod physics;
pub mod player;

pub use animation::AnimationPlugin;
pub use camera::CameraPlugin;
pub use collision::CollisionPlugin;
pub use level::LevelPlugin;
pub use physics::PhysicsPlugin;
pub use player::PlayerPlugin;
