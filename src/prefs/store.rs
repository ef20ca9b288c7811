//! Preference store persisting settings to disk
//!
//! Stores each preference as its own JSON file in an XDG-compliant config
//! directory (`~/.config/skycast/` on Linux). Values are read once at
//! startup; every in-memory change is written straight through. Unreadable
//! or missing files fall back to defaults rather than erroring.

use directories::ProjectDirs;
use serde::{de::DeserializeOwned, Serialize};
use std::fs;
use std::path::PathBuf;

use super::{FavoriteLocation, Preferences, TemperatureUnit, Theme};

/// File key for the theme preference
const THEME_KEY: &str = "theme";
/// File key for the temperature unit preference
const UNIT_KEY: &str = "unit";
/// File key for the favorites list
const FAVORITES_KEY: &str = "favorites";

/// Reads and writes preference files
#[derive(Debug, Clone)]
pub struct PrefStore {
    /// Directory where preference files are stored
    config_dir: PathBuf,
}

impl PrefStore {
    /// Creates a new PrefStore using the XDG-compliant config directory
    ///
    /// Returns `None` if the config directory cannot be determined (e.g., no
    /// home directory).
    pub fn new() -> Option<Self> {
        let project_dirs = ProjectDirs::from("", "", "skycast")?;
        let config_dir = project_dirs.config_dir().to_path_buf();
        Some(Self { config_dir })
    }

    /// Creates a new PrefStore with a custom directory
    ///
    /// Useful for testing or when a specific location is needed.
    pub fn with_dir(config_dir: PathBuf) -> Self {
        Self { config_dir }
    }

    /// Returns the path to a preference file for the given key
    fn pref_path(&self, key: &str) -> PathBuf {
        self.config_dir.join(format!("{}.json", key))
    }

    /// Ensures the config directory exists
    fn ensure_dir(&self) -> std::io::Result<()> {
        fs::create_dir_all(&self.config_dir)
    }

    /// Reads one preference value
    ///
    /// Returns `None` if the file doesn't exist or cannot be parsed; the
    /// caller substitutes the default.
    pub fn read<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let content = fs::read_to_string(self.pref_path(key)).ok()?;
        serde_json::from_str(&content).ok()
    }

    /// Writes one preference value
    pub fn write<T: Serialize>(&self, key: &str, value: &T) -> std::io::Result<()> {
        self.ensure_dir()?;
        let json = serde_json::to_string_pretty(value)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        fs::write(self.pref_path(key), json)
    }

    /// Loads the full preference set, with defaults for anything missing
    pub fn load(&self) -> Preferences {
        Preferences {
            theme: self.read(THEME_KEY).unwrap_or_default(),
            unit: self.read(UNIT_KEY).unwrap_or_default(),
            favorites: self.read(FAVORITES_KEY).unwrap_or_default(),
        }
    }

    /// Persists the theme preference
    pub fn save_theme(&self, theme: Theme) -> std::io::Result<()> {
        self.write(THEME_KEY, &theme)
    }

    /// Persists the temperature unit preference
    pub fn save_unit(&self, unit: TemperatureUnit) -> std::io::Result<()> {
        self.write(UNIT_KEY, &unit)
    }

    /// Persists the favorites list
    pub fn save_favorites(&self, favorites: &[FavoriteLocation]) -> std::io::Result<()> {
        self.write(FAVORITES_KEY, &favorites)
    }
}
