/// Config file loading and creation for the pickwise CLI.
///
/// Config lives at ~/.config/pickwise/config.toml.
/// All fields are optional — CLI args override config values.
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::bail;

/// Itinerary service used when neither the CLI nor the config names one.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:5000";

#[derive(Deserialize, Default, Debug)]
pub struct PickwiseConfig {
    pub data_dir: Option<String>,
    pub endpoint: Option<String>,
}

const DEFAULT_CONFIG_TEMPLATE: &str = "\
# pickwise configuration
# All values here can be overridden by CLI flags.

# Directory holding ratings, candidates, constraints and the last itinerary
# data_dir = \"/home/me/.local/share/pickwise\"

# Itinerary service base URL
# endpoint = \"http://127.0.0.1:5000\"
";

fn home_dir() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| bail("HOME environment variable not set"));
    PathBuf::from(home)
}

/// Returns the default config path: ~/.config/pickwise/config.toml
pub fn config_path() -> PathBuf {
    home_dir().join(".config").join("pickwise").join("config.toml")
}

/// Returns the default data directory: ~/.local/share/pickwise
pub fn default_data_dir() -> PathBuf {
    home_dir().join(".local").join("share").join("pickwise")
}

/// Load config from a file path. Returns default (all None) if file doesn't exist.
pub fn load_config(path: &Path) -> PickwiseConfig {
    match std::fs::read_to_string(path) {
        Ok(content) => parse_config(&content)
            .unwrap_or_else(|e| bail(format!("Failed to parse config at {}: {e}", path.display()))),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => PickwiseConfig::default(),
        Err(e) => bail(format!("Failed to read config at {}: {e}", path.display())),
    }
}

fn parse_config(content: &str) -> Result<PickwiseConfig, toml::de::Error> {
    toml::from_str(content)
}

/// Create the default config file at `path`. Errors if it already exists.
pub fn create_default_config(path: &Path) {
    if path.exists() {
        bail(format!("Config file already exists at {}", path.display()));
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .unwrap_or_else(|e| bail(format!("Failed to create directory {}: {e}", parent.display())));
    }

    std::fs::write(path, DEFAULT_CONFIG_TEMPLATE)
        .unwrap_or_else(|e| bail(format!("Failed to write config to {}: {e}", path.display())));
}
