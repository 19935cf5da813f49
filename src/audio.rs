//! Sound cues
//!
//! The simulation emits [`GameEvent`]s; this module maps them to cues and, on
//! the web, synthesizes them with the Web Audio API (no asset files).

use crate::sim::{Element, GameEvent};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// A body left the ground
    Jump,
    /// Item picked up
    Collect,
    /// Lost a life (or died outright)
    Death,
    /// Moved on to the next level
    LevelComplete,
    /// Finished the last level
    Win,
    /// A body is out of lives
    GameOver,
    /// Level clock ran out
    TimeUp,
}

impl SoundEffect {
    /// Cue for a simulation event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::Jumped { .. } => Some(SoundEffect::Jump),
            GameEvent::ItemCollected { .. } => Some(SoundEffect::Collect),
            GameEvent::Died { .. } => Some(SoundEffect::Death),
            GameEvent::LevelCompleted { .. } => Some(SoundEffect::LevelComplete),
            GameEvent::Won { .. } => Some(SoundEffect::Win),
            GameEvent::Lost { .. } => Some(SoundEffect::GameOver),
            GameEvent::TimedOut => Some(SoundEffect::TimeUp),
        }
    }

    /// Base pitch; fire sounds a fifth above water so the players can tell them apart
    pub fn base_freq(&self, element: Option<Element>) -> f32 {
        let base = match self {
            SoundEffect::Jump => 330.0,
            SoundEffect::Collect => 880.0,
            SoundEffect::Death => 220.0,
            SoundEffect::LevelComplete => 523.25,
            SoundEffect::Win => 523.25,
            SoundEffect::GameOver => 196.0,
            SoundEffect::TimeUp => 440.0,
        };
        match element {
            Some(Element::Fire) => base * 1.5,
            _ => base,
        }
    }
}

/// Element an event belongs to, for per-player pitch
pub fn event_element(event: &GameEvent) -> Option<Element> {
    match event {
        GameEvent::Jumped { element, .. }
        | GameEvent::ItemCollected { element, .. }
        | GameEvent::Died { element, .. }
        | GameEvent::Lost { element } => Some(*element),
        _ => None,
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::{SoundEffect, event_element};
    use crate::sim::GameEvent;

    /// Audio manager for the game
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        volume: f32,
    }

    impl Default for AudioManager {
        fn default() -> Self {
            Self::new()
        }
    }

    impl AudioManager {
        pub fn new() -> Self {
            // Try to create audio context (may fail if not in secure context)
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self { ctx, volume: 0.8 }
        }

        /// Set effective volume (0.0 - 1.0)
        pub fn set_volume(&mut self, vol: f32) {
            self.volume = vol.clamp(0.0, 1.0);
        }

        /// Play the cue for an event, if it has one
        pub fn play_event(&self, event: &GameEvent) {
            if let Some(effect) = SoundEffect::for_event(event) {
                self.play(effect, effect.base_freq(event_element(event)));
            }
        }

        /// Play a sound effect at `freq`
        pub fn play(&self, effect: SoundEffect, freq: f32) {
            let vol = self.volume;
            if vol <= 0.0 {
                return;
            }

            let Some(ctx) = &self.ctx else { return };

            // Resume context if suspended (browsers require user gesture)
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            match effect {
                SoundEffect::Jump => self.play_sweep(ctx, vol * 0.3, freq, freq * 2.0, 0.12),
                SoundEffect::Collect => {
                    let vol = vol * 0.25;
                    self.play_tone(ctx, vol, freq, 0.0, 0.08, OscillatorType::Triangle);
                    self.play_tone(ctx, vol, freq * 1.5, 0.06, 0.12, OscillatorType::Triangle);
                }
                SoundEffect::Death => self.play_sweep(ctx, vol * 0.5, freq, freq * 0.25, 0.4),
                SoundEffect::LevelComplete => {
                    self.play_arpeggio(ctx, vol * 0.3, freq, &[1.0, 1.25, 1.5])
                }
                SoundEffect::Win => {
                    self.play_arpeggio(ctx, vol * 0.35, freq, &[1.0, 1.25, 1.5, 2.0, 2.5, 3.0])
                }
                SoundEffect::GameOver => {
                    self.play_arpeggio(ctx, vol * 0.4, freq, &[1.0, 0.84, 0.71, 0.5])
                }
                SoundEffect::TimeUp => {
                    self.play_tone(ctx, vol * 0.3, freq, 0.0, 0.15, OscillatorType::Square);
                    self.play_tone(ctx, vol * 0.3, freq, 0.25, 0.15, OscillatorType::Square);
                }
            }
        }

        // === Sound generators ===

        /// Create an oscillator with gain envelope
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

        /// Single decaying tone starting `delay` seconds from now
        fn play_tone(
            &self,
            ctx: &AudioContext,
            vol: f32,
            freq: f32,
            delay: f64,
            length: f64,
            osc_type: OscillatorType,
        ) {
            let Some((osc, gain)) = self.create_osc(ctx, freq, osc_type) else {
                return;
            };
            let t = ctx.current_time() + delay;

            gain.gain().set_value_at_time(0.0, ctx.current_time()).ok();
            gain.gain().set_value_at_time(vol, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + length)
                .ok();

            osc.start_with_when(t).ok();
            osc.stop_with_when(t + length + 0.02).ok();
        }

        /// Pitch glide from `from` to `to`
        fn play_sweep(&self, ctx: &AudioContext, vol: f32, from: f32, to: f32, length: f64) {
            let Some((osc, gain)) = self.create_osc(ctx, from, OscillatorType::Sine) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + length)
                .ok();
            osc.frequency().set_value_at_time(from, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(to, t + length)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + length + 0.05).ok();
        }

        /// Notes at `ratios` of `base`, 0.1s apart
        fn play_arpeggio(&self, ctx: &AudioContext, vol: f32, base: f32, ratios: &[f32]) {
            for (i, ratio) in ratios.iter().enumerate() {
                self.play_tone(
                    ctx,
                    vol,
                    base * ratio,
                    i as f64 * 0.1,
                    0.18,
                    OscillatorType::Triangle,
                );
            }
        }
    }
}
