//! Game settings and preferences
//!
//! Persisted as JSON in LocalStorage on the web; native builds use defaults.

use serde::{Deserialize, Serialize};

use crate::sim::{Rules, RulesPreset};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Which rule set new runs use
    #[serde(default)]
    pub rules: RulesPreset,

    // === Visual Effects ===
    /// Jump particle bursts
    pub particles: bool,
    /// Smooth camera follow (off snaps straight to the target)
    pub smooth_camera: bool,

    // === HUD ===
    /// Show lives/score/level overlay
    pub show_hud: bool,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,
    /// Pause when the window loses focus
    pub pause_on_blur: bool,

    // === Accessibility ===
    /// Reduced motion (no particles, no camera easing)
    pub reduced_motion: bool,
}

/// A setting the player can flip from the keyboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    Mute,
    Hud,
    Particles,
    ReducedMotion,
    PauseOnBlur,
    /// Switch rule preset (takes effect on a new run)
    Rules,
}

impl Toggle {
    /// Keyboard shortcut for each toggle
    pub fn for_key(key: &str) -> Option<Self> {
        match key {
            "m" | "M" => Some(Toggle::Mute),
            "h" | "H" => Some(Toggle::Hud),
            "f" | "F" => Some(Toggle::Particles),
            "v" | "V" => Some(Toggle::ReducedMotion),
            "b" | "B" => Some(Toggle::PauseOnBlur),
            "c" | "C" => Some(Toggle::Rules),
            _ => None,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            rules: RulesPreset::Classic,

            particles: true,
            smooth_camera: true,

            show_hud: true,

            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            pause_on_blur: true,

            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Create settings for a rule preset
    pub fn from_preset(preset: RulesPreset) -> Self {
        Self {
            rules: preset,
            ..Self::default()
        }
    }

    /// Gameplay rules for new runs
    pub fn game_rules(&self) -> Rules {
        self.rules.rules()
    }

    /// Effective particles (respects reduced_motion)
    pub fn effective_particles(&self) -> bool {
        self.particles && !self.reduced_motion
    }

    /// Effective camera smoothing (respects reduced_motion)
    pub fn effective_smooth_camera(&self) -> bool {
        self.smooth_camera && !self.reduced_motion
    }

    /// Volume actually applied to sound effects
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            (self.master_volume * self.sfx_volume).clamp(0.0, 1.0)
        }
    }

    /// Flip one setting
    pub fn toggle(&mut self, toggle: Toggle) {
        match toggle {
            Toggle::Mute => self.muted = !self.muted,
            Toggle::Hud => self.show_hud = !self.show_hud,
            Toggle::Particles => self.particles = !self.particles,
            Toggle::ReducedMotion => self.reduced_motion = !self.reduced_motion,
            Toggle::PauseOnBlur => self.pause_on_blur = !self.pause_on_blur,
            Toggle::Rules => {
                self.rules = match self.rules {
                    RulesPreset::Classic => RulesPreset::Keyed,
                    RulesPreset::Keyed => RulesPreset::Classic,
                }
            }
        }
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "fire_and_water_settings";

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
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
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
