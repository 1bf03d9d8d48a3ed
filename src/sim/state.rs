//! Scene state and core simulation types
//!
//! One `Scene` owns every duck, every confetti piece, the shared cosmetic
//! choices and the seeded RNG. Input is applied through [`Command`]s and
//! anything the platform layer should react to is queued as a [`SceneEvent`].

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::confetti::{self, Confetti};
use super::duck::Duck;
use crate::consts::*;

/// Whether ducks are walking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MotionState {
    #[default]
    Stopped,
    Moving,
}

/// Hat worn by every duck
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HatStyle {
    #[default]
    Party,
    TopHat,
    Baseball,
    Winter,
}

impl HatStyle {
    pub const ALL: [HatStyle; 4] = [
        HatStyle::Party,
        HatStyle::TopHat,
        HatStyle::Baseball,
        HatStyle::Winter,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Next hat, wrapping around
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }
}

/// Body/head/beak colors of a duck breed (eyes are always black)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DuckPalette {
    pub body: [u8; 3],
    pub head: [u8; 3],
    pub beak: [u8; 3],
}

/// Duck breed (color scheme)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DuckColor {
    #[default]
    WhiteGoose,
    CanadianGoose,
    Yellow,
    Mallard,
}

impl DuckColor {
    pub const ALL: [DuckColor; 4] = [
        DuckColor::WhiteGoose,
        DuckColor::CanadianGoose,
        DuckColor::Yellow,
        DuckColor::Mallard,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn palette(self) -> DuckPalette {
        match self {
            DuckColor::WhiteGoose => DuckPalette {
                body: [240, 245, 250],
                head: [240, 245, 250],
                beak: [255, 140, 0],
            },
            DuckColor::CanadianGoose => DuckPalette {
                body: [40, 40, 40],
                head: [40, 40, 40],
                beak: [255, 100, 0],
            },
            DuckColor::Yellow => DuckPalette {
                body: [255, 220, 0],
                head: [255, 220, 0],
                beak: [255, 100, 0],
            },
            DuckColor::Mallard => DuckPalette {
                body: [100, 140, 80],
                head: [20, 80, 60],
                beak: [255, 140, 0],
            },
        }
    }
}

/// Background decoration (display only)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Terrain {
    #[default]
    Bare,
    Plain,
    Flowers,
    MuddyPuddle,
    Pond,
}

impl Terrain {
    pub const ALL: [Terrain; 5] = [
        Terrain::Bare,
        Terrain::Plain,
        Terrain::Flowers,
        Terrain::MuddyPuddle,
        Terrain::Pond,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// Every terrain except `Bare` has a grass strip
    pub fn has_grass(self) -> bool {
        self != Terrain::Bare
    }
}

/// A single user action, applied between frames
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Start or stop every duck
    ToggleMotion,
    /// Back to a single resting duck
    Reset,
    /// Add 1-9 ducks; anything else is ignored
    AddDucks(u8),
    CycleHat,
    CycleColor,
    CycleTerrain,
    /// Confetti burst at the canvas center
    Party,
    /// Pointer press at a canvas-space point
    Click(Vec2),
}

/// Short sine tone for the audio collaborator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneRequest {
    pub frequency: f32,
    pub duration_secs: f32,
    /// Peak gain before master volume (0-1)
    pub amplitude: f32,
}

impl ToneRequest {
    pub const PARTY: ToneRequest = ToneRequest {
        frequency: PARTY_TONE_HZ,
        duration_secs: PARTY_TONE_SECS,
        amplitude: PARTY_TONE_AMPLITUDE,
    };

    pub fn quack(frequency: f32) -> Self {
        Self {
            frequency,
            duration_secs: QUACK_SECS,
            amplitude: QUACK_AMPLITUDE,
        }
    }
}

/// Something the platform layer may want to react to
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SceneEvent {
    /// Duck at this list index crossed a canvas edge
    BoundaryHit { duck: usize },
    /// Confetti burst spawned at `origin`
    Party { origin: Vec2 },
    /// Duck at this list index was clicked
    Quack { duck: usize, frequency: f32 },
}

impl SceneEvent {
    /// Tone to play for this event, if any
    pub fn tone(&self) -> Option<ToneRequest> {
        match *self {
            SceneEvent::BoundaryHit { .. } => None,
            SceneEvent::Party { .. } => Some(ToneRequest::PARTY),
            SceneEvent::Quack { frequency, .. } => Some(ToneRequest::quack(frequency)),
        }
    }
}

/// Tunables fixed for the lifetime of a scene
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneParams {
    pub duck_speed: f32,
    /// Duck diameter as a fraction of the canvas width at creation
    pub duck_size_ratio: f32,
    pub confetti_per_burst: usize,
}

impl Default for SceneParams {
    fn default() -> Self {
        Self {
            duck_speed: DUCK_SPEED,
            duck_size_ratio: DUCK_SIZE_RATIO,
            confetti_per_burst: CONFETTI_PER_BURST,
        }
    }
}

/// Complete scene state
#[derive(Debug, Clone)]
pub struct Scene {
    /// Seed the RNG was created from (also seeds stable terrain decoration)
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub params: SceneParams,
    /// Canvas size in pixels
    pub canvas: Vec2,
    /// Diameter given to every new duck
    pub duck_size: f32,
    pub motion: MotionState,
    pub hat: HatStyle,
    pub color: DuckColor,
    pub terrain: Terrain,
    /// Ducks in insertion order
    pub ducks: Vec<Duck>,
    /// Live confetti in spawn order
    pub confetti: Vec<Confetti>,
    /// Frames simulated so far
    pub frame: u64,
    events: Vec<SceneEvent>,
}

impl Scene {
    /// Create a scene with a single resting duck
    pub fn new(seed: u64, canvas: Vec2, params: SceneParams) -> Self {
        let mut scene = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            params,
            canvas,
            duck_size: canvas.x * params.duck_size_ratio,
            motion: MotionState::Stopped,
            hat: HatStyle::default(),
            color: DuckColor::default(),
            terrain: Terrain::default(),
            ducks: Vec::new(),
            confetti: Vec::new(),
            frame: 0,
            events: Vec::new(),
        };

        scene.spawn_duck();
        scene
    }

    /// Add one resting duck wearing the current hat and colors
    pub fn spawn_duck(&mut self) {
        let duck = Duck::spawn(
            &mut self.rng,
            self.canvas,
            self.duck_size,
            self.params.duck_speed,
            self.hat,
            self.color,
        );
        self.ducks.push(duck);
    }

    /// Apply a user command immediately
    pub fn apply(&mut self, command: Command) {
        match command {
            Command::ToggleMotion => self.toggle_motion(),
            Command::Reset => self.reset(),
            Command::AddDucks(n) => self.add_ducks(n),
            Command::CycleHat => self.cycle_hat(),
            Command::CycleColor => self.cycle_color(),
            Command::CycleTerrain => self.cycle_terrain(),
            Command::Party => self.party(),
            Command::Click(point) => {
                self.click(point);
            }
        }
    }

    /// Stopped -> Moving gives every duck a fresh heading
    pub fn toggle_motion(&mut self) {
        self.motion = match self.motion {
            MotionState::Stopped => {
                for duck in &mut self.ducks {
                    duck.set_random_heading(&mut self.rng);
                }
                MotionState::Moving
            }
            MotionState::Moving => MotionState::Stopped,
        };
        log::info!("Motion {:?} ({} ducks)", self.motion, self.ducks.len());
    }

    /// Clear the flock down to one resting duck
    pub fn reset(&mut self) {
        self.ducks.clear();
        self.spawn_duck();
        self.motion = MotionState::Stopped;
        log::info!("Scene reset");
    }

    /// Add `n` ducks (1-9), keeping motion state
    ///
    /// New ducks start at rest even while the others are moving; they get a
    /// heading on the next stop/start.
    pub fn add_ducks(&mut self, n: u8) {
        if !(1..=MAX_DUCKS_PER_KEY).contains(&n) {
            log::debug!("Ignoring request to add {} ducks", n);
            return;
        }
        for _ in 0..n {
            self.spawn_duck();
        }
        log::info!("Added {} ducks ({} total)", n, self.ducks.len());
    }

    pub fn cycle_hat(&mut self) {
        self.hat = self.hat.next();
        for duck in &mut self.ducks {
            duck.hat = self.hat;
        }
        log::debug!("Hat: {:?}", self.hat);
    }

    pub fn cycle_color(&mut self) {
        self.color = self.color.next();
        for duck in &mut self.ducks {
            duck.color = self.color;
        }
        log::debug!("Duck color: {:?}", self.color);
    }

    pub fn cycle_terrain(&mut self) {
        self.terrain = self.terrain.next();
        log::debug!("Terrain: {:?}", self.terrain);
    }

    /// Confetti burst at the canvas center plus a party tone
    pub fn party(&mut self) {
        let origin = self.canvas / 2.0;
        confetti::spawn_burst(
            &mut self.confetti,
            &mut self.rng,
            origin,
            self.params.confetti_per_burst,
        );
        self.events.push(SceneEvent::Party { origin });
    }

    /// Hit-test ducks in list order; the first one under `point` quacks
    pub fn click(&mut self, point: Vec2) -> Option<usize> {
        let index = self.ducks.iter().position(|duck| duck.contains(point))?;
        let frequency =
            QUACK_BASE_HZ + self.rng.random_range(-QUACK_JITTER_HZ..QUACK_JITTER_HZ);
        self.events.push(SceneEvent::Quack {
            duck: index,
            frequency,
        });
        Some(index)
    }

    /// Canvas resized; existing ducks keep their size and are pulled back on screen
    pub fn resize(&mut self, canvas: Vec2) {
        self.canvas = canvas;
        for duck in &mut self.ducks {
            duck.clamp_to(canvas);
        }
        log::info!("Canvas resized to {}x{}", canvas.x, canvas.y);
    }

    pub(crate) fn push_event(&mut self, event: SceneEvent) {
        self.events.push(event);
    }

    /// Events queued since the last drain
    pub fn events(&self) -> &[SceneEvent] {
        &self.events
    }

    /// Take every queued event
    pub fn drain_events(&mut self) -> Vec<SceneEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CANVAS: Vec2 = Vec2::new(800.0, 600.0);

    fn scene() -> Scene {
        Scene::new(12345, CANVAS, SceneParams::default())
    }

    #[test]
    fn test_new_scene_has_one_resting_duck() {
        let scene = scene();
        assert_eq!(scene.ducks.len(), 1);
        assert_eq!(scene.motion, MotionState::Stopped);
        assert_eq!(scene.duck_size, 100.0);
        assert_eq!(scene.ducks[0].size, 100.0);
    }

    #[test]
    fn test_reset_yields_one_stopped_duck() {
        let mut scene = scene();
        scene.apply(Command::AddDucks(9));
        scene.apply(Command::AddDucks(4));
        scene.apply(Command::ToggleMotion);
        assert_eq!(scene.ducks.len(), 14);

        scene.apply(Command::Reset);
        assert_eq!(scene.ducks.len(), 1);
        assert_eq!(scene.motion, MotionState::Stopped);

        scene.apply(Command::Reset);
        assert_eq!(scene.ducks.len(), 1);
    }

    #[test]
    fn test_add_ducks_keeps_existing_and_motion() {
        let mut scene = scene();
        scene.apply(Command::ToggleMotion);
        let first = scene.ducks[0].clone();

        scene.apply(Command::AddDucks(3));

        assert_eq!(scene.ducks.len(), 4);
        assert_eq!(scene.ducks[0], first);
        assert_eq!(scene.motion, MotionState::Moving);
    }

    #[test]
    fn test_add_ducks_out_of_range_ignored() {
        let mut scene = scene();
        scene.apply(Command::AddDucks(0));
        scene.apply(Command::AddDucks(10));
        assert_eq!(scene.ducks.len(), 1);
    }

    #[test]
    fn test_toggle_rerandomizes_heading_on_start() {
        let mut scene = scene();
        scene.apply(Command::AddDucks(2));

        scene.apply(Command::ToggleMotion);
        assert_eq!(scene.motion, MotionState::Moving);
        let first_run: Vec<Vec2> = scene.ducks.iter().map(|d| d.vel).collect();
        for duck in &scene.ducks {
            assert!((duck.vel.length() - DUCK_SPEED).abs() < 1e-4);
        }

        scene.apply(Command::ToggleMotion);
        assert_eq!(scene.motion, MotionState::Stopped);
        scene.apply(Command::ToggleMotion);
        let second_run: Vec<Vec2> = scene.ducks.iter().map(|d| d.vel).collect();
        assert_ne!(first_run, second_run);
    }

    #[test]
    fn test_cosmetic_cycles_wrap() {
        let mut scene = scene();
        let (hat, color, terrain) = (scene.hat, scene.color, scene.terrain);

        for _ in 0..4 {
            scene.apply(Command::CycleHat);
            scene.apply(Command::CycleColor);
        }
        for _ in 0..5 {
            scene.apply(Command::CycleTerrain);
        }

        assert_eq!(scene.hat, hat);
        assert_eq!(scene.color, color);
        assert_eq!(scene.terrain, terrain);
    }

    #[test]
    fn test_cosmetics_apply_to_existing_ducks() {
        let mut scene = scene();
        scene.apply(Command::AddDucks(2));
        scene.apply(Command::CycleHat);
        scene.apply(Command::CycleColor);
        scene.apply(Command::CycleColor);

        assert!(scene.ducks.iter().all(|d| d.hat == HatStyle::TopHat));
        assert!(scene.ducks.iter().all(|d| d.color == DuckColor::Yellow));

        scene.apply(Command::AddDucks(1));
        assert_eq!(scene.ducks[3].hat, HatStyle::TopHat);
        assert_eq!(scene.ducks[3].color, DuckColor::Yellow);
    }

    #[test]
    fn test_terrain_does_not_touch_ducks() {
        let mut scene = scene();
        let before = scene.ducks.clone();
        scene.apply(Command::CycleTerrain);
        assert_eq!(scene.terrain, Terrain::Plain);
        assert_eq!(scene.ducks, before);
    }

    #[test]
    fn test_party_spawns_burst_and_event() {
        let mut scene = scene();
        scene.apply(Command::Party);

        assert_eq!(scene.confetti.len(), CONFETTI_PER_BURST);
        assert!(scene.confetti.iter().all(|c| c.pos == Vec2::new(400.0, 300.0)));
        let events = scene.drain_events();
        assert_eq!(events, vec![SceneEvent::Party { origin: Vec2::new(400.0, 300.0) }]);
        assert_eq!(events[0].tone(), Some(ToneRequest::PARTY));
        assert!(scene.events().is_empty());
    }

    #[test]
    fn test_click_first_match_wins() {
        let mut scene = scene();
        scene.apply(Command::AddDucks(1));
        let target = Vec2::new(300.0, 300.0);
        scene.ducks[0].pos = target;
        scene.ducks[1].pos = target;

        assert_eq!(scene.click(target), Some(0));

        let events = scene.drain_events();
        assert_eq!(events.len(), 1);
        match events[0] {
            SceneEvent::Quack { duck, frequency } => {
                assert_eq!(duck, 0);
                assert!((250.0..350.0).contains(&frequency));
            }
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[test]
    fn test_click_miss_is_silent() {
        let mut scene = scene();
        scene.ducks[0].pos = Vec2::new(100.0, 100.0);
        scene.apply(Command::Click(Vec2::new(700.0, 500.0)));
        assert!(scene.events().is_empty());
    }

    #[test]
    fn test_resize_pulls_ducks_back_on_canvas() {
        let mut scene = scene();
        scene.ducks[0].pos = Vec2::new(700.0, 500.0);
        scene.resize(Vec2::new(400.0, 300.0));
        assert_eq!(scene.ducks[0].pos, Vec2::new(350.0, 250.0));
        assert_eq!(scene.ducks[0].size, 100.0);
    }

    #[test]
    fn test_same_seed_same_flock() {
        let a = Scene::new(7, CANVAS, SceneParams::default());
        let b = Scene::new(7, CANVAS, SceneParams::default());
        assert_eq!(a.ducks, b.ducks);
    }
}
