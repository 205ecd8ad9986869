//! Session configuration
//!
//! Persisted in LocalStorage on the web so a custom place list survives reloads.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Geometry and palette of the playfield
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Clear color (0xRRGGBB)
    pub background: u32,
    /// Elevation a missed jumper falls to
    pub ground: f32,

    // === Platforms ===
    pub cube_color: u32,
    pub cube_width: f32,
    pub cube_height: f32,
    pub cube_deep: f32,

    // === Jumper ===
    pub jumper_color: u32,
    pub jumper_width: f32,
    pub jumper_height: f32,
    pub jumper_deep: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            background: 0x282828,
            ground: -1.0,

            cube_color: 0xbebebe,
            cube_width: 4.0,
            cube_height: 2.0,
            cube_deep: 4.0,

            jumper_color: 0x232323,
            jumper_width: 1.0,
            jumper_height: 2.0,
            jumper_deep: 1.0,
        }
    }
}

impl GameConfig {
    /// Reject degenerate dimensions
    pub fn validate(&self) -> Result<(), ConfigError> {
        let dims = [
            ("cube_width", self.cube_width),
            ("cube_height", self.cube_height),
            ("cube_deep", self.cube_deep),
            ("jumper_width", self.jumper_width),
            ("jumper_height", self.jumper_height),
            ("jumper_deep", self.jumper_deep),
        ];
        for (field, value) in dims {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::InvalidGeometry { field, value });
            }
        }
        if !self.ground.is_finite() {
            return Err(ConfigError::InvalidGeometry {
                field: "ground",
                value: self.ground,
            });
        }
        Ok(())
    }
}

/// Configuration supplied when a session starts; read-only to the simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Labels shown on platforms, in progression order
    pub place_names: Vec<String>,
    /// Score divisor used to advance through `place_names`
    pub difficulty: u32,
    #[serde(default)]
    pub game: GameConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            place_names: vec!["Start".to_string()],
            difficulty: 1,
            game: GameConfig::default(),
        }
    }
}

impl SessionConfig {
    pub fn new(place_names: Vec<String>, difficulty: u32) -> Self {
        Self {
            place_names,
            difficulty,
            game: GameConfig::default(),
        }
    }

    /// Parse from JSON without validating
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.place_names.is_empty() {
            return Err(ConfigError::EmptyPlaceNames);
        }
        if self.difficulty == 0 {
            return Err(ConfigError::ZeroDifficulty);
        }
        self.game.validate()
    }

    /// Index into `place_names` for a platform placed at `score`.
    ///
    /// `ceil(score / difficulty)`, clamped to the last name.
    pub fn label_index(&self, score: u32) -> usize {
        let difficulty = self.difficulty.max(1);
        let index = score.div_ceil(difficulty) as usize;
        index.min(self.place_names.len().saturating_sub(1))
    }

    /// Label for a platform placed at `score`
    pub fn label_for(&self, score: u32) -> &str {
        self.place_names
            .get(self.label_index(score))
            .map(String::as_str)
            .unwrap_or_default()
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "gap_jump_config";

    /// Load configuration from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json).and_then(|c| c.validate().map(|_| c)) {
                    Ok(config) => {
                        log::info!("Loaded config from LocalStorage");
                        return config;
                    }
                    Err(e) => log::warn!("Ignoring stored config: {}", e),
                }
            }
        }

        log::info!("Using default config");
        Self::default()
    }

    /// Save configuration to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Config saved");
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

    fn names(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("place-{}", i)).collect()
    }

    #[test]
    fn test_label_index_uses_ceiling_division() {
        let config = SessionConfig::new(names(10), 3);
        assert_eq!(config.label_index(0), 0);
        assert_eq!(config.label_index(1), 1);
        assert_eq!(config.label_index(3), 1);
        assert_eq!(config.label_index(4), 2);
        assert_eq!(config.label_index(6), 2);
        assert_eq!(config.label_index(7), 3);
    }

    #[test]
    fn test_label_index_clamps_to_last_name() {
        let config = SessionConfig::new(names(3), 1);
        assert_eq!(config.label_index(2), 2);
        assert_eq!(config.label_index(50), 2);
        assert_eq!(config.label_for(50), "place-2");
    }

    #[test]
    fn test_validate_rejects_bad_config() {
        assert!(matches!(
            SessionConfig::new(Vec::new(), 1).validate(),
            Err(ConfigError::EmptyPlaceNames)
        ));
        assert!(matches!(
            SessionConfig::new(names(2), 0).validate(),
            Err(ConfigError::ZeroDifficulty)
        ));

        let mut config = SessionConfig::new(names(2), 2);
        config.game.cube_width = 0.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidGeometry {
                field: "cube_width",
                ..
            })
        ));
    }

    #[test]
    fn test_from_json_defaults_geometry() {
        let config =
            SessionConfig::from_json(r#"{"place_names":["a","b"],"difficulty":2}"#).unwrap();
        assert_eq!(config.place_names, vec!["a", "b"]);
        assert_eq!(config.difficulty, 2);
        assert_eq!(config.game, GameConfig::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(matches!(
            SessionConfig::from_json("{not json"),
            Err(ConfigError::Parse(_))
        ));
    }
}
