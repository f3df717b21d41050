//! Game settings and preferences
//!
//! Read once at boot from the canvas element's `data-settings` attribute
//! (a JSON object). Nothing is persisted.

use serde::{Deserialize, Serialize};

/// Hard cap on particles the renderer can upload
pub const PARTICLE_CAP: usize = 128;

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Background music volume (0.0 - 1.0)
    pub music_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Mute everything
    pub muted: bool,

    // === Visual Effects ===
    /// Explosion debris
    pub particles: bool,
    /// Upper bound on particles drawn
    pub max_particles: usize,
    /// Flickering starfield
    pub twinkle_stars: bool,

    // === HUD ===
    /// Show FPS counter
    pub show_fps: bool,

    // === Accessibility ===
    /// Reduced motion (no star flicker, steady flames)
    pub reduced_motion: bool,

    /// Fixed RNG seed (defaults to wall-clock time)
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            music_volume: 0.3,
            sfx_volume: 1.0,
            muted: false,

            particles: true,
            max_particles: PARTICLE_CAP,
            twinkle_stars: true,

            show_fps: false,

            reduced_motion: false,

            seed: None,
        }
    }
}

impl Settings {
    /// Parse settings from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Parse settings, falling back to defaults on bad input
    pub fn from_json_or_default(json: Option<&str>) -> Self {
        match json.map(str::trim).filter(|s| !s.is_empty()) {
            None => {
                log::info!("Using default settings");
                Self::default()
            }
            Some(json) => match Self::from_json(json) {
                Ok(settings) => {
                    log::info!("Loaded settings: {:?}", settings);
                    settings
                }
                Err(e) => {
                    log::warn!("Invalid settings ({}), using defaults", e);
                    Self::default()
                }
            },
        }
    }

    /// Effective star flicker (respects reduced_motion)
    pub fn effective_twinkle(&self) -> bool {
        self.twinkle_stars && !self.reduced_motion
    }

    /// Effective flame wobble (respects reduced_motion)
    pub fn effective_flame_wobble(&self) -> bool {
        !self.reduced_motion
    }

    /// Effective particle count cap
    pub fn max_particles(&self) -> usize {
        if !self.particles {
            0
        } else {
            self.max_particles.min(PARTICLE_CAP)
        }
    }

    /// Load settings from the canvas `data-settings` attribute (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load(canvas: &web_sys::Element) -> Self {
        Self::from_json_or_default(canvas.get_attribute("data-settings").as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = Settings::from_json(r#"{"muted": true, "seed": 42}"#).unwrap();
        assert!(settings.muted);
        assert_eq!(settings.seed, Some(42));
        assert_eq!(settings.music_volume, 0.3);
        assert!(settings.particles);
    }

    #[test]
    fn test_bad_json_falls_back() {
        let settings = Settings::from_json_or_default(Some("{not json"));
        assert!(!settings.muted);
        assert_eq!(settings.max_particles, PARTICLE_CAP);

        let settings = Settings::from_json_or_default(Some("   "));
        assert!(settings.seed.is_none());
    }

    #[test]
    fn test_particle_cap() {
        let mut settings = Settings::from_json(r#"{"max_particles": 5000}"#).unwrap();
        assert_eq!(settings.max_particles(), PARTICLE_CAP);
        settings.particles = false;
        assert_eq!(settings.max_particles(), 0);
    }

    #[test]
    fn test_reduced_motion() {
        let settings = Settings::from_json(r#"{"reduced_motion": true}"#).unwrap();
        assert!(!settings.effective_twinkle());
        assert!(!settings.effective_flame_wobble());
    }
}
