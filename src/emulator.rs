//! The two emulator variants whose preferences this crate edits.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// A supported emulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Emulator {
    /// Basilisk II, the 68k Macintosh emulator
    BasiliskII,
    /// SheepShaver, the PowerPC Macintosh emulator
    SheepShaver,
}

impl Emulator {
    pub const ALL: [Emulator; 2] = [Emulator::BasiliskII, Emulator::SheepShaver];

    /// Stable identifier used on the command line and in the app config
    pub fn id(self) -> &'static str {
        match self {
            Emulator::BasiliskII => "basilisk",
            Emulator::SheepShaver => "sheepshaver",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Emulator::BasiliskII => "Basilisk II",
            Emulator::SheepShaver => "SheepShaver",
        }
    }

    /// File name of the per-user preferences file in the home directory
    pub fn prefs_file_name(self) -> &'static str {
        match self {
            Emulator::BasiliskII => ".basilisk_ii_prefs",
            Emulator::SheepShaver => ".sheepshaver_prefs",
        }
    }

    /// Default preferences path for a given home directory
    pub fn default_prefs_path(self, home: &Path) -> PathBuf {
        home.join(self.prefs_file_name())
    }

    pub fn is_basilisk(self) -> bool {
        self == Emulator::BasiliskII
    }

    pub fn is_sheepshaver(self) -> bool {
        self == Emulator::SheepShaver
    }
}

impl fmt::Display for Emulator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown emulator '{0}' (expected 'basilisk' or 'sheepshaver')")]
pub struct UnknownEmulator(pub String);

impl FromStr for Emulator {
    type Err = UnknownEmulator;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "basilisk" | "basiliskii" | "basilisk2" | "basilisk_ii" => Ok(Emulator::BasiliskII),
            "sheepshaver" | "sheep" => Ok(Emulator::SheepShaver),
            _ => Err(UnknownEmulator(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_ids_and_aliases() {
        assert_eq!("basilisk".parse::<Emulator>(), Ok(Emulator::BasiliskII));
        assert_eq!("BasiliskII".parse::<Emulator>(), Ok(Emulator::BasiliskII));
        assert_eq!("SheepShaver".parse::<Emulator>(), Ok(Emulator::SheepShaver));
        assert!("vice".parse::<Emulator>().is_err());
    }

    #[test]
    fn default_paths_live_in_home() {
        let home = Path::new("/home/mac");
        assert_eq!(
            Emulator::BasiliskII.default_prefs_path(home),
            PathBuf::from("/home/mac/.basilisk_ii_prefs")
        );
        assert_eq!(
            Emulator::SheepShaver.default_prefs_path(home),
            PathBuf::from("/home/mac/.sheepshaver_prefs")
        );
    }
}
