use crate::components::{CollisionShape, Player, PlayerState, Velocity};
use bevy::prelude::*;

/// Physics constants
pub const GRAVITY: f32 = 1.0;
pub const TICKS_PER_SECOND: f32 = 60.0;

/// Stages of one simulation tick. The order is load-bearing: horizontal
/// probing must run before vertical resolution so a blocked direction
/// zeroes its velocity before gravity is resolved.
#[derive(SystemSet, Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum TickSet {
    Jump,
    Advance,
    Animate,
    Resolve,
    Scroll,
    Sync,
}

/// Plugin for gravity and per-tick position advancement
pub struct PhysicsPlugin;

impl Plugin for PhysicsPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(Time::<Fixed>::from_seconds(1.0 / TICKS_PER_SECOND as f64));
        app.configure_sets(
            FixedUpdate,
            (
                TickSet::Jump,
                TickSet::Advance,
                TickSet::Animate,
                TickSet::Resolve,
                TickSet::Scroll,
                TickSet::Sync,
            )
                .chain(),
        );
        app.add_systems(FixedUpdate, advance_tick_system.in_set(TickSet::Advance));
    }
}

/// Per-tick gravity increment: approaches 1 unit/tick as the fall
/// timer grows, giving a capped-acceleration fall.
pub fn gravity_increment(fall_timer: u32, ticks_per_second: f32) -> f32 {
    ((fall_timer as f32 / ticks_per_second) * GRAVITY).min(1.0)
}

/// One physics step: apply velocity to position, accumulate gravity,
/// advance the fall timer. Animation selection follows in TickSet::Animate.
pub fn advance_actor(shape: &mut CollisionShape, velocity: &mut Velocity, state: &mut PlayerState) {
    shape.rect.x += velocity.x;
    shape.rect.y += velocity.y as i32;

    velocity.y += gravity_increment(state.fall_timer, TICKS_PER_SECOND);
    state.fall_timer += 1;
}

fn advance_tick_system(
    mut query: Query<(&mut CollisionShape, &mut Velocity, &mut PlayerState), With<Player>>,
) {
    for (mut shape, mut velocity, mut state) in query.iter_mut() {
        advance_actor(&mut shape, &mut velocity, &mut state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_gravity_increment_starts_at_zero() {
        assert_eq!(gravity_increment(0, TICKS_PER_SECOND), 0.0);
    }

    #[test]
    fn test_gravity_increment_caps_at_one() {
        // After one full second of falling, the increment saturates.
        assert_eq!(gravity_increment(60, TICKS_PER_SECOND), 1.0);
        assert_eq!(gravity_increment(600, TICKS_PER_SECOND), 1.0);
    }

    #[test]
    fn test_gravity_increment_ramps_linearly_before_cap() {
        assert_eq!(gravity_increment(30, TICKS_PER_SECOND), 0.5);
    }

    #[test]
    fn test_advance_applies_velocity_to_position() {
        let mut shape = CollisionShape::solid(100, 100, 50, 50);
        let mut velocity = Velocity::new(5, -8.0);
        let mut state = PlayerState::default();

        advance_actor(&mut shape, &mut velocity, &mut state);

        assert_eq!(shape.rect.x, 105);
        assert_eq!(shape.rect.y, 92);
        assert_eq!(state.fall_timer, 1);
    }

    #[test]
    fn test_falling_velocity_monotonic_and_capped_per_tick() {
        let mut shape = CollisionShape::solid(0, 0, 50, 50);
        let mut velocity = Velocity::new(0, 0.0);
        let mut state = PlayerState::default();

        for _ in 0..200 {
            let before = velocity.y;
            advance_actor(&mut shape, &mut velocity, &mut state);
            assert!(velocity.y >= before);
            assert!(velocity.y <= before + 1.0);
        }
    }

    #[test]
    fn test_advance_is_deterministic() {
        let run = || {
            let mut shape = CollisionShape::solid(100, 100, 50, 50);
            let mut velocity = Velocity::new(5, -8.0);
            let mut state = PlayerState::default();
            for _ in 0..120 {
                advance_actor(&mut shape, &mut velocity, &mut state);
            }
            (shape.rect, velocity)
        };

        assert_eq!(run(), run());
    }

    proptest! {
        #[test]
        fn prop_gravity_increment_bounded(fall_timer in 0u32..100_000) {
            let inc = gravity_increment(fall_timer, TICKS_PER_SECOND);
            prop_assert!(inc >= 0.0);
            prop_assert!(inc <= 1.0);
        }

        #[test]
        fn prop_descending_velocity_never_decreases(vy in 0.0f32..1000.0, fall_timer in 0u32..10_000) {
            let mut shape = CollisionShape::solid(0, 0, 10, 10);
            let mut velocity = Velocity::new(0, vy);
            let mut state = PlayerState { fall_timer, ..PlayerState::default() };

            advance_actor(&mut shape, &mut velocity, &mut state);

            prop_assert!(velocity.y >= vy);
            prop_assert!(velocity.y <= vy + 1.0);
        }
    }
}
