//! EmulatorPrefs - preferences editor for the Basilisk II and SheepShaver
//! classic Macintosh emulators.
//!
//! The core (preferences codec, typed setting groups, launcher) has no
//! dependencies beyond `log` and `thiserror`. The desktop UI, command line
//! front-end and persisted app settings live behind the `desktop` feature.

pub mod emulator;
pub mod launcher;
pub mod prefs;
pub mod sections;

#[cfg(feature = "desktop")]
pub mod config;
#[cfg(feature = "desktop")]
pub mod ui;

pub use emulator::Emulator;
pub use launcher::{Launch, LaunchError};
pub use prefs::{Prefs, PrefsError, Value};
pub use sections::{EmulatorSettings, Section, SectionKind};
