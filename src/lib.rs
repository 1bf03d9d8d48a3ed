//! Duck Party - a flock of party ducks on a canvas
//!
//! Core modules:
//! - `sim`: Deterministic scene simulation (duck kinematics, confetti, input commands)
//! - `renderer`: Draw list, tessellation and the WebGPU pipeline
//! - `platform`: Key mapping and legend text for the browser glue
//! - `audio`: Best-effort tone playback
//! - `settings`: User preferences persisted as JSON

pub mod audio;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::Settings;

use glam::Vec2;

/// Scene tuning constants
pub mod consts {
    /// Default duck speed (pixels per frame)
    pub const DUCK_SPEED: f32 = 2.0;
    /// Duck diameter as a fraction of the canvas width at scene creation
    pub const DUCK_SIZE_RATIO: f32 = 1.0 / 8.0;
    /// Exponential smoothing factor for duck rotation
    pub const ROTATION_EASE: f32 = 0.05;
    /// Largest number of ducks one numeric key may add
    pub const MAX_DUCKS_PER_KEY: u8 = 9;

    /// Confetti pieces spawned per party
    pub const CONFETTI_PER_BURST: usize = 30;
    /// Downward acceleration applied to confetti each frame
    pub const CONFETTI_GRAVITY: f32 = 0.1;
    /// Starting life of a confetti piece
    pub const CONFETTI_LIFE: i32 = 255;
    /// Life lost per frame
    pub const CONFETTI_DECAY: i32 = 4;

    /// Party tone
    pub const PARTY_TONE_HZ: f32 = 800.0;
    pub const PARTY_TONE_SECS: f32 = 0.1;
    pub const PARTY_TONE_AMPLITUDE: f32 = 0.1;

    /// Quack tone (base frequency is jittered by up to +/- QUACK_JITTER_HZ)
    pub const QUACK_BASE_HZ: f32 = 300.0;
    pub const QUACK_JITTER_HZ: f32 = 50.0;
    pub const QUACK_SECS: f32 = 0.15;
    pub const QUACK_AMPLITUDE: f32 = 0.15;
}

/// Linear interpolation between `a` and `b`
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Velocity of the given magnitude along `angle` (canvas space, y down)
#[inline]
pub fn heading_to_velocity(angle: f32, speed: f32) -> Vec2 {
    Vec2::new(angle.cos() * speed, angle.sin() * speed)
}

/// Heading angle of a velocity, in radians
#[inline]
pub fn velocity_to_heading(vel: Vec2) -> f32 {
    vel.y.atan2(vel.x)
}
