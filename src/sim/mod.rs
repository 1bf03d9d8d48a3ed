//! Deterministic scene simulation
//!
//! All duck and confetti logic lives here. This module must stay pure:
//! - One fixed step per frame, no wall-clock reads
//! - Seeded RNG only
//! - Stable iteration order (list order)
//! - No rendering or platform dependencies

pub mod confetti;
pub mod duck;
pub mod state;
pub mod tick;

pub use confetti::{CONFETTI_PALETTE, Confetti, prune, spawn_burst};
pub use duck::{BoundaryHit, Duck};
pub use state::{
    Command, DuckColor, DuckPalette, HatStyle, MotionState, Scene, SceneEvent, SceneParams,
    Terrain, ToneRequest,
};
pub use tick::tick;
