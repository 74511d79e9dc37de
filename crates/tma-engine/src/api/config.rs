use serde::{Deserialize, Serialize};

/// Configuration errors.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// The JSON could not be parsed into a config.
    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The config parsed but holds values the engine cannot run with.
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// How the Telegram service behaves inside the Mini-App host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    /// Call `WebApp.expand()` right after `ready()` (default: true).
    pub expand_on_init: bool,
    /// Forward haptic requests to the host (default: true).
    pub haptics_enabled: bool,
    /// Mirror theme params and viewport into CSS custom properties (default: true).
    pub mirror_css: bool,
    /// Prefix for the mirrored CSS variables (default: "--tg").
    pub css_prefix: String,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            expand_on_init: true,
            haptics_enabled: true,
            mirror_css: true,
            css_prefix: "--tg".to_string(),
        }
    }
}

/// Configuration for the engine, provided by the game.
///
/// Every field has a default, so a JSON override only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Fixed timestep in seconds (default: 1/60).
    pub fixed_dt: f32,
    /// World width in game units.
    pub world_width: f32,
    /// World height in game units.
    pub world_height: f32,
    /// Maximum number of render instances (default: 512).
    pub max_instances: usize,
    /// Maximum number of game events per frame (default: 32).
    pub max_events: usize,
    /// Cap on fixed steps run in a single frame (default: 10).
    pub max_steps_per_frame: u32,
    /// Console log level: "error", "warn", "info", "debug" or "trace".
    pub log_level: String,
    /// Mini-App host behaviour.
    pub host: HostConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            world_width: 400.0,
            world_height: 700.0,
            max_instances: 512,
            max_events: 32,
            max_steps_per_frame: 10,
            log_level: "info".to_string(),
            host: HostConfig::default(),
        }
    }
}

impl GameConfig {
    /// Parse and validate a config from JSON. Missing keys keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply a partial JSON override on top of this config.
    pub fn merge_json(&self, json: &str) -> Result<Self, ConfigError> {
        let mut base = serde_json::to_value(self)?;
        let patch: serde_json::Value = serde_json::from_str(json)?;
        merge_values(&mut base, patch);
        let config: GameConfig = serde_json::from_value(base)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the engine loop cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.fixed_dt > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "fixed_dt must be positive, got {}",
                self.fixed_dt
            )));
        }
        if !(self.world_width > 0.0 && self.world_height > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "world size must be positive, got {}x{}",
                self.world_width, self.world_height
            )));
        }
        if self.max_instances == 0 || self.max_events == 0 {
            return Err(ConfigError::Invalid("capacities must be non-zero".into()));
        }
        if self.max_steps_per_frame == 0 {
            return Err(ConfigError::Invalid("max_steps_per_frame must be non-zero".into()));
        }
        if self.log_level().is_none() {
            return Err(ConfigError::Invalid(format!("unknown log level '{}'", self.log_level)));
        }
        Ok(())
    }

    /// The configured level as a `log::Level`, if recognised.
    pub fn log_level(&self) -> Option<log::Level> {
        self.log_level.parse().ok()
    }
}

fn merge_values(base: &mut serde_json::Value, patch: serde_json::Value) {
    match (base, patch) {
        (serde_json::Value::Object(base), serde_json::Value::Object(patch)) => {
            for (key, value) in patch {
                merge_values(base.entry(key).or_insert(serde_json::Value::Null), value);
            }
        }
        (slot, value) => *slot = value,
    }
}
