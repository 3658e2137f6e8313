//! UI state persistence: theme and the tabs that were open last time

use crate::config::Config;
use crate::sections::SectionKind;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Top-level window tab
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum MainTab {
    #[default]
    Basilisk,
    SheepShaver,
    Settings,
}

/// UI Theme
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

/// Editor tab, mirrored from [`SectionKind`] so it can be persisted
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum SavedSection {
    #[default]
    Drives,
    Graphics,
    Sound,
    Network,
    CpuMemory,
    Input,
    Serial,
    Misc,
}

impl From<SectionKind> for SavedSection {
    fn from(kind: SectionKind) -> Self {
        match kind {
            SectionKind::Drives => SavedSection::Drives,
            SectionKind::Graphics => SavedSection::Graphics,
            SectionKind::Sound => SavedSection::Sound,
            SectionKind::Network => SavedSection::Network,
            SectionKind::CpuMemory => SavedSection::CpuMemory,
            SectionKind::Input => SavedSection::Input,
            SectionKind::Serial => SavedSection::Serial,
            SectionKind::Misc => SavedSection::Misc,
        }
    }
}

impl From<SavedSection> for SectionKind {
    fn from(saved: SavedSection) -> Self {
        match saved {
            SavedSection::Drives => SectionKind::Drives,
            SavedSection::Graphics => SectionKind::Graphics,
            SavedSection::Sound => SectionKind::Sound,
            SavedSection::Network => SectionKind::Network,
            SavedSection::CpuMemory => SectionKind::CpuMemory,
            SavedSection::Input => SectionKind::Input,
            SavedSection::Serial => SectionKind::Serial,
            SavedSection::Misc => SectionKind::Misc,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct UiSettings {
    #[serde(default)]
    pub theme: Theme,
    #[serde(default)]
    pub last_tab: MainTab,
    #[serde(default)]
    pub last_section: SavedSection,
}

impl UiSettings {
    /// Get the settings file path
    pub fn settings_path() -> PathBuf {
        Config::config_dir().join("ui.json")
    }

    /// Load settings from disk, or return defaults
    pub fn load() -> Self {
        std::fs::read_to_string(Self::settings_path())
            .ok()
            .and_then(|json| serde_json::from_str(&json).ok())
            .unwrap_or_default()
    }

    /// Save settings to disk. Failures are only logged.
    pub fn save(&self) {
        let path = Self::settings_path();
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(e) = std::fs::write(&path, json) {
                    log::warn!("Failed to save UI settings to {}: {}", path.display(), e);
                }
            }
            Err(e) => log::warn!("Failed to encode UI settings: {}", e),
        }
    }

    /// Apply the current theme to egui
    pub fn apply_theme(&self, ctx: &egui::Context) {
        match self.theme {
            Theme::Dark => ctx.set_visuals(Self::dark_theme()),
            Theme::Light => ctx.set_visuals(Self::light_theme()),
        }
    }

    fn dark_theme() -> egui::Visuals {
        let mut visuals = egui::Visuals::dark();

        visuals.panel_fill = egui::Color32::from_rgb(28, 28, 34);
        visuals.window_fill = egui::Color32::from_rgb(34, 34, 42);
        visuals.extreme_bg_color = egui::Color32::from_rgb(18, 18, 22);

        // Platinum accents
        visuals.selection.bg_fill = egui::Color32::from_rgb(92, 112, 170);
        visuals.hyperlink_color = egui::Color32::from_rgb(140, 170, 230);

        visuals.widgets.noninteractive.corner_radius = egui::CornerRadius::same(6);
        visuals.widgets.inactive.corner_radius = egui::CornerRadius::same(4);
        visuals.widgets.hovered.corner_radius = egui::CornerRadius::same(4);
        visuals.widgets.active.corner_radius = egui::CornerRadius::same(4);

        visuals
    }

    fn light_theme() -> egui::Visuals {
        let mut visuals = egui::Visuals::light();

        visuals.panel_fill = egui::Color32::from_rgb(236, 236, 236);
        visuals.window_fill = egui::Color32::from_rgb(246, 246, 246);
        visuals.extreme_bg_color = egui::Color32::from_rgb(255, 255, 255);

        visuals.selection.bg_fill = egui::Color32::from_rgb(120, 150, 210);
        visuals.hyperlink_color = egui::Color32::from_rgb(40, 80, 170);

        visuals.widgets.noninteractive.corner_radius = egui::CornerRadius::same(6);
        visuals.widgets.inactive.corner_radius = egui::CornerRadius::same(4);
        visuals.widgets.hovered.corner_radius = egui::CornerRadius::same(4);
        visuals.widgets.active.corner_radius = egui::CornerRadius::same(4);

        visuals
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn section_mapping_round_trips() {
        for kind in SectionKind::ALL {
            assert_eq!(SectionKind::from(SavedSection::from(kind)), kind);
        }
    }

    #[test]
    fn missing_fields_use_defaults() {
        let settings: UiSettings = serde_json::from_str(r#"{"theme":"Light"}"#).unwrap();
        assert_eq!(settings.theme, Theme::Light);
        assert_eq!(settings.last_tab, MainTab::Basilisk);
        assert_eq!(settings.last_section, SavedSection::Drives);
    }
}
