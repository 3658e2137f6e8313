//! EmulatorPrefs UI - egui-based preferences editor
//!
//! One top-level tab per emulator plus a Settings tab for executable and
//! preferences file locations. Each emulator tab is split into the setting
//! groups from [`crate::sections`].

mod app;
mod panels;
mod settings;

pub use app::PrefsApp;
pub use settings::{MainTab, Theme, UiSettings};
