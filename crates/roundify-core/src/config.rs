use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::log::LogConfig;
use crate::registry::{OverlayRegistry, default_ignored_classes};

/// Corner radius used when neither the command line nor the config file
/// supplies a usable one.
pub const DEFAULT_RADIUS: f64 = 16.0;

/// Top-level configuration for Roundify.
///
/// Loaded from `~/.config/roundify/config.toml`. The file is only ever
/// read; missing sections fall back to defaults thanks to `#[serde(default)]`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Overlay appearance and the reinforcement ignore list.
    pub overlay: OverlayConfig,
    /// File logging.
    pub logging: LogConfig,
}

/// Overlay settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    /// Radius used when `--radius` is absent or unparsable.
    pub radius: f64,
    /// Window classes whose arrival in the foreground never triggers
    /// reinforcement. A closed list: nothing else is ever ignored.
    pub ignored_classes: Vec<String>,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            radius: DEFAULT_RADIUS,
            ignored_classes: default_ignored_classes(),
        }
    }
}

impl Config {
    /// Repairs values that would break the overlays or the logger.
    pub fn validate(&mut self) {
        if !self.overlay.radius.is_finite() {
            self.overlay.radius = DEFAULT_RADIUS;
        }

        let mut seen = Vec::with_capacity(self.overlay.ignored_classes.len());
        for class in self.overlay.ignored_classes.drain(..) {
            let class = class.trim().to_string();
            if !class.is_empty() && !seen.contains(&class) {
                seen.push(class);
            }
        }
        self.overlay.ignored_classes = seen;

        self.logging.max_file_mb = self.logging.max_file_mb.clamp(1, 100);
    }

    /// Builds the overlay registry with this config's ignore list.
    pub fn registry(&self) -> OverlayRegistry {
        OverlayRegistry::new(self.overlay.ignored_classes.iter().cloned())
    }
}

/// Returns the config directory: `~/.config/roundify/`.
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".config").join("roundify"))
}

/// Returns the config file path: `~/.config/roundify/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Parses and validates config file contents.
pub fn parse(content: &str) -> Result<Config, String> {
    let mut config: Config = toml::from_str(content).map_err(|e| e.to_string())?;
    config.validate();
    Ok(config)
}

/// Reads and parses the config file at `path`.
pub fn try_load_from(path: &Path) -> Result<Config, String> {
    let content = std::fs::read_to_string(path).map_err(|e| format!("{}: {e}", path.display()))?;
    parse(&content).map_err(|e| format!("{}: {e}", path.display()))
}

/// Loads the configuration from disk, falling back to defaults.
///
/// A missing file silently yields defaults; an unreadable or invalid one
/// prints a warning first.
pub fn load() -> Config {
    let Some(path) = config_path().filter(|p| p.exists()) else {
        return Config::default();
    };
    match try_load_from(&path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Warning: {e}");
            Config::default()
        }
    }
}
