use crate::components::{CollisionShape, Obstacle, Player, PlayerIntent, PlayerState, Velocity};
use crate::plugins::physics::TickSet;
use crate::plugins::player::PLAYER_VEL;
use bevy::prelude::*;

/// Transparent pixels at the top of every player frame; the head snap
/// tucks the rect under the ceiling by this much.
pub const HEAD_CLEARANCE: i32 = 28;

/// Plugin for axis-separated collision resolution
pub struct CollisionPlugin;

impl Plugin for CollisionPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(FixedUpdate, resolve_movement_system.in_set(TickSet::Resolve));
    }
}

/// Pixel-accurate overlap: bounding rectangles must intersect AND at
/// least one pixel in the intersection is opaque in both masks. Keeps
/// transparent sprite padding from registering as a hit.
pub fn pixel_overlap(a: &CollisionShape, b: &CollisionShape) -> bool {
    let Some(region) = a.rect.intersection(&b.rect) else {
        return false;
    };

    for y in region.top()..region.bottom() {
        for x in region.left()..region.right() {
            if a.mask.is_opaque((x - a.rect.x) as u32, (y - a.rect.y) as u32)
                && b.mask.is_opaque((x - b.rect.x) as u32, (y - b.rect.y) as u32)
            {
                return true;
            }
        }
    }
    false
}

/// Speculative probe: shift the actor by `dx`, test the obstacles in
/// order, then shift back unconditionally. Pure query; the actor's
/// position is restored exactly.
pub fn probe_horizontal(actor: &mut CollisionShape, obstacles: &[CollisionShape], dx: i32) -> bool {
    actor.rect.x += dx;
    let hit = obstacles.iter().any(|obstacle| pixel_overlap(actor, obstacle));
    actor.rect.x -= dx;
    hit
}

/// Vertical resolution against every obstacle, in collection order and
/// without early exit (last overlap wins - fine for a handful of
/// non-overlapping blocks). Falling snaps the bottom edge to the
/// obstacle top; rising snaps the top edge under the obstacle bottom.
pub fn resolve_vertical(
    actor: &mut CollisionShape,
    velocity: &mut Velocity,
    state: &mut PlayerState,
    obstacles: &[CollisionShape],
) {
    let dy = velocity.y;
    for obstacle in obstacles {
        if pixel_overlap(actor, obstacle) {
            if dy > 0.0 {
                actor.rect.set_bottom(obstacle.rect.top());
                state.landed(velocity);
            } else if dy < 0.0 {
                actor.rect.set_top(obstacle.rect.bottom() - HEAD_CLEARANCE);
                state.hit_head(velocity);
            }
        }
    }
}

/// Movement handler for one tick: probe both horizontal directions,
/// apply real velocity only where the probe came back clear, then
/// resolve vertically. Probes use double the movement speed as
/// lookahead margin, since animation frames differ in width.
fn resolve_movement_system(
    mut player_query: Query<
        (
            &mut CollisionShape,
            &mut Velocity,
            &mut PlayerState,
            &PlayerIntent,
        ),
        With<Player>,
    >,
    obstacle_query: Query<&CollisionShape, (With<Obstacle>, Without<Player>)>,
) {
    // One snapshot of the static geometry per tick.
    let obstacles: Vec<CollisionShape> = obstacle_query.iter().cloned().collect();

    for (mut shape, mut velocity, mut state, intent) in player_query.iter_mut() {
        // Moves only while a key is held.
        velocity.x = 0;

        let blocked_left = probe_horizontal(&mut shape, &obstacles, -PLAYER_VEL * 2);
        let blocked_right = probe_horizontal(&mut shape, &obstacles, PLAYER_VEL * 2);

        if intent.move_left && !blocked_left {
            state.move_left(&mut velocity, PLAYER_VEL);
        }
        if intent.move_right && !blocked_right {
            state.move_right(&mut velocity, PLAYER_VEL);
        }

        resolve_vertical(&mut shape, &mut velocity, &mut state, &obstacles);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{BoundingBox, OpacityMask};
    use crate::plugins::physics::advance_actor;
    use proptest::prelude::*;

    fn checker_shape(x: i32, y: i32) -> CollisionShape {
        // 2x2 shape opaque only in the top-left pixel.
        CollisionShape::new(
            BoundingBox::new(x, y, 2, 2),
            OpacityMask::from_bits(2, 2, vec![true, false, false, false]),
        )
    }

    #[test]
    fn test_overlap_requires_rect_intersection() {
        let a = CollisionShape::solid(0, 0, 10, 10);
        let b = CollisionShape::solid(100, 100, 10, 10);
        assert!(!pixel_overlap(&a, &b));
    }

    #[test]
    fn test_intersecting_rects_with_disjoint_masks_do_not_collide() {
        // Rects overlap on the full 2x2 area, but a is opaque only at
        // (0,0) and b only at (1,1).
        let a = checker_shape(0, 0);
        let b = CollisionShape::new(
            BoundingBox::new(0, 0, 2, 2),
            OpacityMask::from_bits(2, 2, vec![false, false, false, true]),
        );
        assert!(!pixel_overlap(&a, &b));
    }

    #[test]
    fn test_coincident_opaque_pixels_collide() {
        let a = checker_shape(0, 0);
        let b = checker_shape(0, 0);
        assert!(pixel_overlap(&a, &b));
    }

    #[test]
    fn test_overlap_respects_offset_between_shapes() {
        // b shifted so its opaque pixel lands on a's opaque pixel.
        let a = checker_shape(0, 0);
        let mut b = CollisionShape::new(
            BoundingBox::new(0, 0, 2, 2),
            OpacityMask::from_bits(2, 2, vec![false, false, false, true]),
        );
        b.rect.x = -1;
        b.rect.y = -1;
        assert!(pixel_overlap(&a, &b));
    }

    #[test]
    fn test_probe_restores_position_on_hit_and_miss() {
        let obstacles = vec![CollisionShape::solid(55, 0, 64, 64)];
        let mut actor = CollisionShape::solid(0, 0, 50, 50);

        assert!(probe_horizontal(&mut actor, &obstacles, PLAYER_VEL * 2));
        assert_eq!(actor.rect, BoundingBox::new(0, 0, 50, 50));

        assert!(!probe_horizontal(&mut actor, &obstacles, -PLAYER_VEL * 2));
        assert_eq!(actor.rect, BoundingBox::new(0, 0, 50, 50));
    }

    #[test]
    fn test_probe_with_no_obstacles_is_clear() {
        let mut actor = CollisionShape::solid(0, 0, 50, 50);
        assert!(!probe_horizontal(&mut actor, &[], 10));
        assert_eq!(actor.rect.x, 0);
    }

    #[test]
    fn test_falling_lands_on_obstacle_top() {
        let floor = CollisionShape::solid(0, 536, 64, 64);
        let mut actor = CollisionShape::solid(0, 490, 50, 50);
        let mut velocity = Velocity::new(0, 6.0);
        let mut state = PlayerState {
            fall_timer: 40,
            jump_count: 2,
            ..PlayerState::default()
        };

        resolve_vertical(&mut actor, &mut velocity, &mut state, &[floor.clone()]);

        assert_eq!(actor.rect.bottom(), floor.rect.top());
        assert_eq!(velocity.y, 0.0);
        assert_eq!(state.fall_timer, 0);
        assert_eq!(state.jump_count, 0);
    }

    #[test]
    fn test_rising_snaps_under_ceiling_and_bounces() {
        let ceiling = CollisionShape::solid(0, 100, 64, 64);
        let mut actor = CollisionShape::solid(0, 150, 50, 50);
        let mut velocity = Velocity::new(0, -8.0);
        let mut state = PlayerState::default();

        resolve_vertical(&mut actor, &mut velocity, &mut state, &[ceiling.clone()]);

        assert_eq!(actor.rect.top(), ceiling.rect.bottom() - HEAD_CLEARANCE);
        assert_eq!(velocity.y, 8.0);
        assert_eq!(state.fall_timer, 0);
    }

    #[test]
    fn test_zero_vertical_velocity_resolves_nothing() {
        let floor = CollisionShape::solid(0, 40, 64, 64);
        let mut actor = CollisionShape::solid(0, 30, 50, 50);
        let original = actor.rect;
        let mut velocity = Velocity::new(0, 0.0);
        let mut state = PlayerState::default();

        resolve_vertical(&mut actor, &mut velocity, &mut state, &[floor]);

        assert_eq!(actor.rect, original);
        assert_eq!(velocity.y, 0.0);
    }

    #[test]
    fn test_last_overlapping_obstacle_wins() {
        let first = CollisionShape::solid(0, 70, 64, 64);
        let second = CollisionShape::solid(0, 60, 64, 64);
        let mut actor = CollisionShape::solid(0, 20, 50, 60);
        let mut velocity = Velocity::new(0, 5.0);
        let mut state = PlayerState::default();

        resolve_vertical(
            &mut actor,
            &mut velocity,
            &mut state,
            &[first, second.clone()],
        );

        // Snapping onto `first` leaves the actor inside `second`; the
        // later snap is the one that sticks.
        assert_eq!(actor.rect.bottom(), second.rect.top());
    }

    #[test]
    fn test_rest_on_floor_stays_pinned_across_a_tick() {
        // Actor at rest, bottom exactly on the obstacle top. Gravity
        // adds a small positive velocity; vertical resolution re-pins.
        let floor = CollisionShape::solid(0, 536, 64, 64);
        let mut actor = CollisionShape::solid(0, 536 - 50, 50, 50);
        let mut velocity = Velocity::new(0, 0.0);
        let mut state = PlayerState {
            fall_timer: 60,
            ..PlayerState::default()
        };

        advance_actor(&mut actor, &mut velocity, &mut state);
        assert!(velocity.y > 0.0);

        // Next tick's movement carries the actor into the floor.
        advance_actor(&mut actor, &mut velocity, &mut state);
        resolve_vertical(&mut actor, &mut velocity, &mut state, &[floor.clone()]);

        assert_eq!(actor.rect.bottom(), floor.rect.top());
        assert_eq!(velocity.y, 0.0);
        assert_eq!(state.fall_timer, 0);
    }

    proptest! {
        #[test]
        fn prop_probe_is_side_effect_free(
            actor_x in -2000i32..2000,
            actor_y in -2000i32..2000,
            obstacle_x in -2000i32..2000,
            obstacle_y in -2000i32..2000,
            dx in -50i32..50,
        ) {
            let obstacles = vec![CollisionShape::solid(obstacle_x, obstacle_y, 64, 64)];
            let mut actor = CollisionShape::solid(actor_x, actor_y, 50, 50);
            let original = actor.rect;

            probe_horizontal(&mut actor, &obstacles, dx);

            prop_assert_eq!(actor.rect, original);
        }

        #[test]
        fn prop_pixel_overlap_is_symmetric(
            ax in -100i32..100,
            ay in -100i32..100,
            bx in -100i32..100,
            by in -100i32..100,
        ) {
            let a = CollisionShape::solid(ax, ay, 30, 30);
            let b = CollisionShape::solid(bx, by, 30, 30);
            prop_assert_eq!(pixel_overlap(&a, &b), pixel_overlap(&b, &a));
        }
    }
}
