//! Audio tones using the Web Audio API
//!
//! Every sound is a short procedurally generated sine tone. Playback is
//! best-effort: if the browser refuses an audio context or any node call
//! fails, the tone is dropped without reporting an error.

#[cfg(target_arch = "wasm32")]
use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use crate::settings::Settings;
use crate::sim::{SceneEvent, ToneRequest};

/// Anything that can play a tone request
pub trait ToneSink {
    fn play_tone(&self, tone: &ToneRequest);

    /// Play the tone attached to a scene event, if it has one
    fn play_event(&self, event: &SceneEvent) {
        if let Some(tone) = event.tone() {
            self.play_tone(&tone);
        }
    }
}

/// Audio manager for the scene
pub struct AudioManager {
    #[cfg(target_arch = "wasm32")]
    ctx: Option<AudioContext>,
    master_volume: f32,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    #[cfg(target_arch = "wasm32")]
    pub fn new() -> Self {
        // Try to create audio context (may fail if not in secure context)
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            master_volume: 0.8,
            muted: false,
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn new() -> Self {
        Self {
            master_volume: 0.8,
            muted: false,
        }
    }

    /// Manager with volume and mute taken from settings
    pub fn from_settings(settings: &Settings) -> Self {
        let mut audio = Self::new();
        audio.set_master_volume(settings.master_volume);
        audio.set_muted(settings.muted);
        audio
    }

    /// Resume audio context (required after user gesture)
    #[cfg(target_arch = "wasm32")]
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn resume(&self) {}

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Peak gain for a tone after master volume and mute
    pub fn tone_gain(&self, tone: &ToneRequest) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * tone.amplitude.clamp(0.0, 1.0)
        }
    }

    /// Create an oscillator wired through a gain node to the speakers
    #[cfg(target_arch = "wasm32")]
    fn create_osc(
        &self,
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }
}

#[cfg(target_arch = "wasm32")]
impl ToneSink for AudioManager {
    fn play_tone(&self, tone: &ToneRequest) {
        let vol = self.tone_gain(tone);
        if vol <= 0.0 {
            return;
        }

        let Some(ctx) = &self.ctx else { return };

        // Resume context if suspended (browsers require user gesture)
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        let Some((osc, gain)) = self.create_osc(ctx, tone.frequency, OscillatorType::Sine) else {
            log::debug!("Dropped {} Hz tone", tone.frequency);
            return;
        };
        let t = ctx.current_time();
        let end = t + tone.duration_secs as f64;

        gain.gain().set_value_at_time(vol, t).ok();
        osc.start().ok();
        osc.stop_with_when(end).ok();
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl ToneSink for AudioManager {
    fn play_tone(&self, tone: &ToneRequest) {
        if self.tone_gain(tone) > 0.0 {
            log::debug!(
                "Tone {:.0} Hz for {:.2}s (no audio output on native)",
                tone.frequency,
                tone.duration_secs
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use std::cell::RefCell;

    #[derive(Default)]
    struct Recorder {
        tones: RefCell<Vec<ToneRequest>>,
    }

    impl ToneSink for Recorder {
        fn play_tone(&self, tone: &ToneRequest) {
            self.tones.borrow_mut().push(*tone);
        }
    }

    #[test]
    fn test_only_party_and_quack_make_noise() {
        let recorder = Recorder::default();
        recorder.play_event(&SceneEvent::BoundaryHit { duck: 0 });
        recorder.play_event(&SceneEvent::Party { origin: Vec2::ZERO });
        recorder.play_event(&SceneEvent::Quack {
            duck: 0,
            frequency: 320.0,
        });

        let tones = recorder.tones.borrow();
        assert_eq!(tones.len(), 2);
        assert_eq!(tones[0].frequency, 800.0);
        assert_eq!(tones[0].duration_secs, 0.1);
        assert_eq!(tones[1].frequency, 320.0);
        assert_eq!(tones[1].duration_secs, 0.15);
    }

    #[test]
    fn test_tone_gain_respects_volume_and_mute() {
        let mut audio = AudioManager::new();
        audio.set_master_volume(0.5);
        assert!((audio.tone_gain(&ToneRequest::PARTY) - 0.05).abs() < 1e-6);

        audio.set_muted(true);
        assert_eq!(audio.tone_gain(&ToneRequest::PARTY), 0.0);
    }

    #[test]
    fn test_native_playback_never_fails() {
        let audio = AudioManager::from_settings(&Settings::default());
        audio.resume();
        audio.play_tone(&ToneRequest::quack(300.0));
    }
}
