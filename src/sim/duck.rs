//! Duck kinematics and the edge-bounce policy
//!
//! Ducks move one velocity step per frame, ease their rotation toward the
//! current heading, and pick a new inward heading whenever their body circle
//! pokes past a canvas edge.

use glam::Vec2;
use rand::Rng;
use std::f32::consts::TAU;

use super::state::{DuckColor, HatStyle, MotionState};
use crate::consts::ROTATION_EASE;
use crate::{heading_to_velocity, lerp, velocity_to_heading};

/// A duck crossed one or more canvas edges during an update
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundaryHit {
    /// Inward normal of the violated edges (both axes set at a corner,
    /// zero on an axis where both edges were crossed)
    pub normal: Vec2,
}

/// A single duck
#[derive(Debug, Clone, PartialEq)]
pub struct Duck {
    /// Center, canvas space (y down)
    pub pos: Vec2,
    pub vel: Vec2,
    /// Magnitude used whenever a new heading is picked
    pub speed: f32,
    /// Current visual angle (radians)
    pub rotation: f32,
    /// Angle the visual rotation eases toward
    pub target_rotation: f32,
    /// Body diameter, fixed at creation
    pub size: f32,
    pub hat: HatStyle,
    pub color: DuckColor,
}

impl Duck {
    /// A resting duck at `pos`
    pub fn new(pos: Vec2, size: f32, speed: f32, hat: HatStyle, color: DuckColor) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            speed,
            rotation: 0.0,
            target_rotation: 0.0,
            size,
            hat,
            color,
        }
    }

    /// Place a resting duck at a random spot with its whole body on the canvas
    pub fn spawn<R: Rng + ?Sized>(
        rng: &mut R,
        canvas: Vec2,
        size: f32,
        speed: f32,
        hat: HatStyle,
        color: DuckColor,
    ) -> Self {
        let pos = Vec2::new(
            spawn_coord(rng, size, canvas.x),
            spawn_coord(rng, size, canvas.y),
        );
        Self::new(pos, size, speed, hat, color)
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.size / 2.0
    }

    /// Strict point-in-body test
    pub fn contains(&self, point: Vec2) -> bool {
        self.pos.distance(point) < self.radius()
    }

    /// Pick a uniformly random heading at the duck's speed
    pub fn set_random_heading<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let angle = rng.random_range(0.0..TAU);
        self.vel = heading_to_velocity(angle, self.speed);
        self.target_rotation = angle;
    }

    /// Advance one frame. Returns the boundary hit, if any.
    ///
    /// The position is always clamped back onto the canvas before returning,
    /// so a duck resting against an edge does not report the edge again.
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        canvas: Vec2,
        motion: MotionState,
    ) -> Option<BoundaryHit> {
        if motion == MotionState::Stopped {
            return None;
        }

        self.pos += self.vel;
        self.rotation = lerp(self.rotation, self.target_rotation, ROTATION_EASE);

        let hit = self.boundary_hit(canvas);
        if let Some(hit) = hit {
            self.bounce(rng, hit.normal);
        }
        self.clamp_to(canvas);

        hit
    }

    /// Edge violation check against the current position
    pub fn boundary_hit(&self, canvas: Vec2) -> Option<BoundaryHit> {
        let r = self.radius();
        // An axis narrower than the body is pinned to the center, not bounced
        let (fits_x, fits_y) = (canvas.x >= 2.0 * r, canvas.y >= 2.0 * r);
        let left = fits_x && self.pos.x - r < 0.0;
        let right = fits_x && self.pos.x + r > canvas.x;
        let top = fits_y && self.pos.y - r < 0.0;
        let bottom = fits_y && self.pos.y + r > canvas.y;

        if !(left || right || top || bottom) {
            return None;
        }

        Some(BoundaryHit {
            normal: Vec2::new(inward(left, right), inward(top, bottom)),
        })
    }

    /// Random heading, mirrored on every violated axis so it points back in
    fn bounce<R: Rng + ?Sized>(&mut self, rng: &mut R, normal: Vec2) {
        let angle = rng.random_range(0.0..TAU);
        let mut vel = heading_to_velocity(angle, self.speed);
        if vel.x * normal.x < 0.0 {
            vel.x = -vel.x;
        }
        if vel.y * normal.y < 0.0 {
            vel.y = -vel.y;
        }

        self.vel = vel;
        self.target_rotation = if vel == Vec2::ZERO {
            angle
        } else {
            velocity_to_heading(vel).rem_euclid(TAU)
        };
    }

    /// Keep the whole body on the canvas
    pub fn clamp_to(&mut self, canvas: Vec2) {
        let r = self.radius();
        self.pos.x = clamp_axis(self.pos.x, r, canvas.x);
        self.pos.y = clamp_axis(self.pos.y, r, canvas.y);
    }
}

/// +1 when only the low edge was crossed, -1 for only the high edge
fn inward(low: bool, high: bool) -> f32 {
    match (low, high) {
        (true, false) => 1.0,
        (false, true) => -1.0,
        _ => 0.0,
    }
}

/// Clamp into [r, extent - r]; centered when the extent is narrower than the body
fn clamp_axis(value: f32, r: f32, extent: f32) -> f32 {
    if extent < 2.0 * r {
        extent / 2.0
    } else {
        value.clamp(r, extent - r)
    }
}

fn spawn_coord<R: Rng + ?Sized>(rng: &mut R, margin: f32, extent: f32) -> f32 {
    if extent - margin > margin {
        rng.random_range(margin..extent - margin)
    } else {
        extent / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const CANVAS: Vec2 = Vec2::new(800.0, 600.0);

    fn duck_at(x: f32, y: f32, vel: Vec2) -> Duck {
        let mut duck = Duck::new(
            Vec2::new(x, y),
            100.0,
            2.0,
            HatStyle::Party,
            DuckColor::WhiteGoose,
        );
        duck.vel = vel;
        duck
    }

    fn in_bounds(duck: &Duck, canvas: Vec2) -> bool {
        let r = duck.radius();
        duck.pos.x >= r && duck.pos.x <= canvas.x - r && duck.pos.y >= r && duck.pos.y <= canvas.y - r
    }

    #[test]
    fn test_free_step_moves_without_hit() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut duck = duck_at(400.0, 300.0, Vec2::new(0.0, -10.0));

        let hit = duck.update(&mut rng, CANVAS, MotionState::Moving);

        assert!(hit.is_none());
        assert_eq!(duck.pos, Vec2::new(400.0, 290.0));
        assert_eq!(duck.vel, Vec2::new(0.0, -10.0));
    }

    #[test]
    fn test_top_edge_hit_clamps_and_turns_inward() {
        let mut rng = Pcg32::seed_from_u64(2);
        let mut duck = duck_at(400.0, 24.0, Vec2::new(0.0, -10.0));

        let hit = duck.update(&mut rng, CANVAS, MotionState::Moving);

        let hit = hit.expect("top edge should be hit");
        assert_eq!(hit.normal, Vec2::new(0.0, 1.0));
        assert_eq!(duck.pos.y, 50.0);
        assert!(duck.vel.y >= 0.0, "new heading must point back down");
        assert!((duck.vel.length() - duck.speed).abs() < 1e-4);
    }

    #[test]
    fn test_stopped_duck_does_not_move() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut duck = duck_at(400.0, 24.0, Vec2::new(0.0, -10.0));

        let hit = duck.update(&mut rng, CANVAS, MotionState::Stopped);

        assert!(hit.is_none());
        assert_eq!(duck.pos, Vec2::new(400.0, 24.0));
    }

    #[test]
    fn test_resting_duck_at_edge_reports_nothing() {
        let mut rng = Pcg32::seed_from_u64(4);
        let mut duck = duck_at(50.0, 300.0, Vec2::ZERO);

        for _ in 0..100 {
            assert!(duck.update(&mut rng, CANVAS, MotionState::Moving).is_none());
        }
        assert_eq!(duck.pos, Vec2::new(50.0, 300.0));
    }

    #[test]
    fn test_one_event_per_crossing() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut duck = duck_at(50.0, 300.0, Vec2::new(-2.0, 0.0));

        let hits = (0..20)
            .filter(|_| duck.update(&mut rng, CANVAS, MotionState::Moving).is_some())
            .count();

        assert_eq!(hits, 1);
        assert!(duck.vel.x >= 0.0);
    }

    #[test]
    fn test_zero_speed_never_moves() {
        let mut rng = Pcg32::seed_from_u64(6);
        let mut duck = duck_at(400.0, 300.0, Vec2::ZERO);
        duck.speed = 0.0;
        duck.set_random_heading(&mut rng);

        for _ in 0..10 {
            duck.update(&mut rng, CANVAS, MotionState::Moving);
        }
        assert_eq!(duck.pos, Vec2::new(400.0, 300.0));
    }

    #[test]
    fn test_corner_hit_mirrors_both_axes() {
        for seed in 0..50 {
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut duck = duck_at(795.0, 595.0, Vec2::new(2.0, 2.0));

            let hit = duck.update(&mut rng, CANVAS, MotionState::Moving).expect("corner hit");

            assert_eq!(hit.normal, Vec2::new(-1.0, -1.0));
            assert!(duck.vel.x <= 0.0 && duck.vel.y <= 0.0);
            assert_eq!(duck.pos, Vec2::new(750.0, 550.0));
        }
    }

    #[test]
    fn test_rotation_eases_toward_target() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut duck = duck_at(400.0, 300.0, Vec2::ZERO);
        duck.target_rotation = 1.0;

        duck.update(&mut rng, CANVAS, MotionState::Moving);
        assert!((duck.rotation - 0.05).abs() < 1e-6);

        for _ in 0..200 {
            duck.update(&mut rng, CANVAS, MotionState::Moving);
            assert!(duck.rotation < 1.0, "smoothing must never overshoot");
        }
    }

    #[test]
    fn test_spawn_keeps_body_on_canvas() {
        let mut rng = Pcg32::seed_from_u64(8);
        for _ in 0..200 {
            let duck = Duck::spawn(&mut rng, CANVAS, 100.0, 2.0, HatStyle::TopHat, DuckColor::Mallard);
            assert!(duck.pos.x >= 100.0 && duck.pos.x <= 700.0);
            assert!(duck.pos.y >= 100.0 && duck.pos.y <= 500.0);
            assert_eq!(duck.vel, Vec2::ZERO);
            assert_eq!(duck.rotation, 0.0);
        }
    }

    #[test]
    fn test_spawn_on_tiny_canvas_centers() {
        let mut rng = Pcg32::seed_from_u64(9);
        let duck = Duck::spawn(
            &mut rng,
            Vec2::new(150.0, 600.0),
            100.0,
            2.0,
            HatStyle::Party,
            DuckColor::Yellow,
        );
        assert_eq!(duck.pos.x, 75.0);
    }

    #[test]
    fn test_axis_narrower_than_duck_never_hits() {
        let mut rng = Pcg32::seed_from_u64(10);
        let canvas = Vec2::new(800.0, 60.0);
        let mut duck = duck_at(400.0, 30.0, Vec2::new(1.0, 1.5));

        for _ in 0..100 {
            assert!(duck.update(&mut rng, canvas, MotionState::Moving).is_none());
            assert_eq!(duck.pos.y, 30.0);
        }
        assert!(duck.pos.x > 400.0);
    }

    #[test]
    fn test_narrow_axis_still_bounces_on_the_other() {
        let mut rng = Pcg32::seed_from_u64(11);
        let canvas = Vec2::new(800.0, 60.0);
        let mut duck = duck_at(49.0, 30.0, Vec2::new(-2.0, 0.0));

        let hit = duck.update(&mut rng, canvas, MotionState::Moving).expect("left edge hit");
        assert_eq!(hit.normal, Vec2::new(1.0, 0.0));
        assert_eq!(duck.pos, Vec2::new(50.0, 30.0));
    }

    #[test]
    fn test_contains_is_strict() {
        let duck = duck_at(100.0, 100.0, Vec2::ZERO);
        assert!(duck.contains(Vec2::new(120.0, 100.0)));
        assert!(!duck.contains(Vec2::new(150.0, 100.0)));
    }

    proptest! {
        #[test]
        fn prop_update_keeps_duck_on_canvas(
            x in -200.0f32..1000.0,
            y in -200.0f32..800.0,
            vx in -20.0f32..20.0,
            vy in -20.0f32..20.0,
            seed in any::<u64>(),
        ) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut duck = duck_at(x, y, Vec2::new(vx, vy));

            for _ in 0..5 {
                duck.update(&mut rng, CANVAS, MotionState::Moving);
                prop_assert!(in_bounds(&duck, CANVAS));
            }
        }
    }
}
