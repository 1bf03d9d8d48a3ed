//! User settings and preferences
//!
//! Persisted in LocalStorage on the web. Scene state itself is never saved.

use serde::{Deserialize, Serialize};

use crate::consts::{CONFETTI_PER_BURST, DUCK_SIZE_RATIO, DUCK_SPEED};
use crate::sim::SceneParams;

/// Duck Party settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Scene ===
    /// Duck speed in pixels per frame
    pub duck_speed: f32,
    /// Duck diameter as a fraction of the canvas width
    pub duck_size_ratio: f32,
    /// Confetti pieces per party
    pub confetti_per_burst: usize,
    /// Fixed RNG seed (random per session when unset)
    pub seed: Option<u64>,

    // === HUD ===
    /// Show the key legend overlay
    pub show_legend: bool,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            duck_speed: DUCK_SPEED,
            duck_size_ratio: DUCK_SIZE_RATIO,
            confetti_per_burst: CONFETTI_PER_BURST,
            seed: None,

            show_legend: true,

            master_volume: 0.8,
            muted: false,
        }
    }
}

impl Settings {
    /// Scene tunables, with out-of-range values pulled back to something drawable
    pub fn scene_params(&self) -> SceneParams {
        SceneParams {
            duck_speed: self.duck_speed.max(0.0),
            duck_size_ratio: self.duck_size_ratio.clamp(0.01, 0.5),
            confetti_per_burst: self.confetti_per_burst,
        }
    }

    /// Parse settings; missing fields fall back to defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// LocalStorage key
    pub const STORAGE_KEY: &'static str = "duck_party_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring unreadable settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = self.to_json() {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
