//! Persistent configuration for flicker.
//!
//! Stores user settings in `~/.flicker/config.json`: which `adb` binary to
//! run and which device serial to target when several are attached.
//!
//! # Example
//!
//! ```no_run
//! use flicker_core::config::FlickerConfig;
//!
//! // Load (returns defaults if file doesn't exist)
//! let config = FlickerConfig::load();
//!
//! if let Some(serial) = &config.serial {
//!     println!("Target device: {}", serial);
//! }
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

const CONFIG_FILENAME: &str = "config.json";

/// Returns the flicker state directory (`~/.flicker`), creating it if needed.
pub fn flicker_dir() -> PathBuf {
    let dir = dirs::home_dir()
        .expect("Could not determine home directory")
        .join(".flicker");
    std::fs::create_dir_all(&dir).ok();
    dir
}

/// Persistent flicker configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct FlickerConfig {
    /// Path to the `adb` executable. `adb` on `PATH` when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adb_path: Option<PathBuf>,

    /// Serial of the device to drive (as listed by `adb devices`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serial: Option<String>,
}

impl FlickerConfig {
    /// Load config from `~/.flicker/config.json`.
    ///
    /// Returns [`Default`] if the file does not exist or cannot be parsed.
    pub fn load() -> Self {
        Self::load_from(&flicker_dir().join(CONFIG_FILENAME))
    }

    /// Load config from a specific file, falling back to [`Default`].
    pub fn load_from(path: &Path) -> Self {
        std::fs::read_to_string(path)
            .ok()
            .and_then(|s| serde_json::from_str(&s).ok())
            .unwrap_or_default()
    }

    /// Save config to `~/.flicker/config.json`.
    pub fn save(&self) -> std::io::Result<()> {
        self.save_to(&flicker_dir().join(CONFIG_FILENAME))
    }

    /// Save config to a specific file.
    pub fn save_to(&self, path: &Path) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
        std::fs::write(path, json)
    }

    /// Returns a copy with any `Some` override applied on top.
    pub fn with_overrides(mut self, adb_path: Option<PathBuf>, serial: Option<String>) -> Self {
        if adb_path.is_some() {
            self.adb_path = adb_path;
        }
        if serial.is_some() {
            self.serial = serial;
        }
        self
    }
}
