//! Player preferences
//!
//! Persisted in LocalStorage. Scores are never stored.

use serde::{Deserialize, Serialize};

/// Player preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// `KeyboardEvent.code` values that trigger a jump
    pub jump_keys: Vec<String>,
    /// Touch-start anywhere jumps
    pub touch_jump: bool,
    /// Draw collision boxes over the play area
    pub debug_collisions: bool,
    /// Key code that flips `debug_collisions`
    pub debug_toggle_key: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            jump_keys: vec!["Space".to_string()],
            touch_jump: true,
            debug_collisions: false,
            debug_toggle_key: "Backquote".to_string(),
        }
    }
}

impl Settings {
    /// Does this key code request a jump?
    pub fn is_jump_key(&self, code: &str) -> bool {
        self.jump_keys.iter().any(|k| k == code)
    }

    /// Flip the collision overlay, returning the new value
    pub fn toggle_debug(&mut self) -> bool {
        self.debug_collisions = !self.debug_collisions;
        self.debug_collisions
    }

    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "rock_runner_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match serde_json::from_str(&json) {
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
