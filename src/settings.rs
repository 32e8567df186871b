//! Game settings and preferences
//!
//! Persisted separately from high scores in LocalStorage.

use serde::{Deserialize, Serialize};

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// One-shot sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Ambient engine loop volume (0.0 - 1.0)
    pub engine_volume: f32,
    /// Mute when window loses focus
    pub mute_on_blur: bool,

    // === HUD ===
    /// Show FPS counter
    pub show_fps: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            engine_volume: 0.15,
            mute_on_blur: true,
            show_fps: true,
        }
    }
}

impl Settings {
    /// Engine loop volume after the master fader
    pub fn effective_engine_volume(&self) -> f32 {
        (self.master_volume * self.engine_volume).clamp(0.0, 1.0)
    }

    /// LocalStorage key
    const STORAGE_KEY: &'static str = "lane_rush_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(settings) = serde_json::from_str(&json) {
                    log::info!("Loaded settings from LocalStorage");
                    return settings;
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
            if let Ok(json) = serde_json::to_string(self) {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_volumes_are_in_range() {
        let settings = Settings::default();
        for vol in [
            settings.master_volume,
            settings.sfx_volume,
            settings.engine_volume,
        ] {
            assert!((0.0..=1.0).contains(&vol));
        }
    }

    #[test]
    fn effective_engine_volume_follows_the_master_fader() {
        let mut settings = Settings::default();
        settings.master_volume = 0.5;
        settings.engine_volume = 0.2;
        assert!((settings.effective_engine_volume() - 0.1).abs() < 1e-6);
    }

    #[test]
    fn settings_round_trip_through_json() {
        let settings = Settings::default();
        let json = serde_json::to_string(&settings).unwrap();
        let back: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(back.master_volume, settings.master_volume);
        assert_eq!(back.mute_on_blur, settings.mute_on_blur);
    }
}
