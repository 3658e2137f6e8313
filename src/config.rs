//! Application configuration: where the emulators and their preferences live

use crate::emulator::Emulator;
use crate::launcher::Launch;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to encode configuration: {0}")]
    Encode(#[from] toml::ser::Error),
}

/// Paths configured for one emulator
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmulatorPaths {
    /// Emulator executable (or `.app` bundle)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub executable: Option<PathBuf>,

    /// Preferences file; the home directory default is used when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefs: Option<PathBuf>,
}

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub basilisk: EmulatorPaths,

    #[serde(default)]
    pub sheepshaver: EmulatorPaths,
}

/// Treat blank paths as unset
fn non_empty(path: &Option<PathBuf>) -> Option<&PathBuf> {
    path.as_ref().filter(|p| !p.as_os_str().is_empty())
}

impl Config {
    /// Get the configuration directory, creating it if needed
    pub fn config_dir() -> PathBuf {
        if let Some(config_dir) = dirs::config_dir() {
            let dir = config_dir.join("emuprefs");
            fs::create_dir_all(&dir).ok();
            dir
        } else {
            PathBuf::from(".")
        }
    }

    /// Get the configuration file path
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// Load configuration from the default location
    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from a file, falling back to defaults
    pub fn load_from(path: &Path) -> Self {
        if path.exists() {
            match fs::read_to_string(path) {
                Ok(contents) => match toml::from_str(&contents) {
                    Ok(config) => {
                        log::info!("Loaded configuration from: {}", path.display());
                        return config;
                    }
                    Err(e) => {
                        log::error!("Failed to parse config file: {}", e);
                    }
                },
                Err(e) => {
                    log::error!("Failed to read config file: {}", e);
                }
            }
        }

        log::info!("Using default configuration");
        Self::default()
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;
        log::info!("Saved configuration to: {}", path.display());
        Ok(())
    }

    pub fn paths(&self, emulator: Emulator) -> &EmulatorPaths {
        match emulator {
            Emulator::BasiliskII => &self.basilisk,
            Emulator::SheepShaver => &self.sheepshaver,
        }
    }

    pub fn paths_mut(&mut self, emulator: Emulator) -> &mut EmulatorPaths {
        match emulator {
            Emulator::BasiliskII => &mut self.basilisk,
            Emulator::SheepShaver => &mut self.sheepshaver,
        }
    }

    pub fn executable(&self, emulator: Emulator) -> Option<&PathBuf> {
        non_empty(&self.paths(emulator).executable)
    }

    /// Effective preferences path: the configured one, else the home default
    pub fn prefs_path(&self, emulator: Emulator) -> Option<PathBuf> {
        self.prefs_path_in(emulator, dirs::home_dir().as_deref())
    }

    fn prefs_path_in(&self, emulator: Emulator, home: Option<&Path>) -> Option<PathBuf> {
        non_empty(&self.paths(emulator).prefs)
            .cloned()
            .or_else(|| home.map(|h| emulator.default_prefs_path(h)))
    }

    /// Launch description for an emulator
    pub fn launch(&self, emulator: Emulator) -> Launch {
        Launch::new(
            emulator,
            self.executable(emulator).cloned(),
            self.prefs_path(emulator),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn round_trips_through_toml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.basilisk.executable = Some(PathBuf::from("/opt/BasiliskII"));
        config.sheepshaver.prefs = Some(PathBuf::from("/tmp/sheep_prefs"));
        config.save_to(&path).unwrap();

        assert_eq!(Config::load_from(&path), config);
    }

    #[test]
    fn broken_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "basilisk = 3").unwrap();
        assert_eq!(Config::load_from(&path), Config::default());
        assert_eq!(Config::load_from(&dir.path().join("missing.toml")), Config::default());
    }

    #[test]
    fn prefs_path_falls_back_to_home() {
        let mut config = Config::default();
        let home = Path::new("/home/mac");
        assert_eq!(
            config.prefs_path_in(Emulator::SheepShaver, Some(home)),
            Some(home.join(".sheepshaver_prefs"))
        );
        config.sheepshaver.prefs = Some(PathBuf::new());
        assert_eq!(
            config.prefs_path_in(Emulator::SheepShaver, Some(home)),
            Some(home.join(".sheepshaver_prefs"))
        );
        config.sheepshaver.prefs = Some(PathBuf::from("/srv/sheep"));
        assert_eq!(
            config.prefs_path_in(Emulator::SheepShaver, None),
            Some(PathBuf::from("/srv/sheep"))
        );
    }
}
