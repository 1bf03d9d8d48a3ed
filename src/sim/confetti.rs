//! Confetti particles
//!
//! Plain data plus free functions over a `Vec<Confetti>`. Spawn order is
//! preserved through every tick and prune.

use glam::Vec2;
use rand::Rng;
use std::f32::consts::TAU;

use crate::consts::{CONFETTI_DECAY, CONFETTI_GRAVITY, CONFETTI_LIFE};

/// Red, orange, yellow, green, blue, indigo, violet, pink
pub const CONFETTI_PALETTE: [[u8; 3]; 8] = [
    [255, 0, 0],
    [255, 127, 0],
    [255, 255, 0],
    [0, 255, 0],
    [0, 0, 255],
    [75, 0, 130],
    [148, 0, 211],
    [255, 192, 203],
];

/// A single confetti piece
#[derive(Debug, Clone, PartialEq)]
pub struct Confetti {
    pub pos: Vec2,
    pub vel: Vec2,
    pub width: f32,
    pub height: f32,
    pub rotation: f32,
    pub rotation_speed: f32,
    /// Index into [`CONFETTI_PALETTE`]
    pub color: usize,
    /// Counts down from 255; dead at zero or below
    pub life: i32,
}

impl Confetti {
    /// Random piece at `origin`
    pub fn new<R: Rng + ?Sized>(rng: &mut R, origin: Vec2) -> Self {
        Self {
            pos: origin,
            vel: Vec2::new(rng.random_range(-3.0..3.0), rng.random_range(-4.0..0.0)),
            width: rng.random_range(10.0..20.0),
            height: rng.random_range(10.0..20.0),
            rotation: rng.random_range(0.0..TAU),
            rotation_speed: rng.random_range(-0.1..0.1),
            color: rng.random_range(0..CONFETTI_PALETTE.len()),
            life: CONFETTI_LIFE,
        }
    }

    /// One frame of motion: gravity after the position step
    pub fn step(&mut self) {
        self.pos += self.vel;
        self.vel.y += CONFETTI_GRAVITY;
        self.rotation += self.rotation_speed;
        self.life -= CONFETTI_DECAY;
    }

    /// Out of life or fallen past the bottom of the canvas
    pub fn is_dead(&self, canvas_height: f32) -> bool {
        self.life <= 0 || self.pos.y > canvas_height
    }

    pub fn rgb(&self) -> [u8; 3] {
        CONFETTI_PALETTE[self.color]
    }

    /// Opacity tracking remaining life (0-1)
    pub fn alpha(&self) -> f32 {
        (self.life as f32 / CONFETTI_LIFE as f32).clamp(0.0, 1.0)
    }
}

/// Append `count` new pieces at `origin`
pub fn spawn_burst<R: Rng + ?Sized>(
    confetti: &mut Vec<Confetti>,
    rng: &mut R,
    origin: Vec2,
    count: usize,
) {
    confetti.reserve(count);
    for _ in 0..count {
        confetti.push(Confetti::new(rng, origin));
    }
}

/// Advance every piece one frame
pub fn tick(confetti: &mut [Confetti]) {
    for piece in confetti.iter_mut() {
        piece.step();
    }
}

/// Drop dead pieces, keeping the survivors in order
pub fn prune(confetti: &mut Vec<Confetti>, canvas_height: f32) {
    confetti.retain(|piece| !piece.is_dead(canvas_height));
}
