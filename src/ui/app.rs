//! Main EmulatorPrefs window
//!
//! This module provides the primary UI, including:
//! - Toolbar (Save All, Reload, Launch, About)
//! - One tab per emulator with a sub-tab for every setting group
//! - Settings tab for executable and preferences file paths
//! - Status bar and message dialogs

use super::panels::{self, DISK_EXTENSIONS};
use super::settings::{MainTab, Theme, UiSettings};
use crate::config::Config;
use crate::emulator::Emulator;
use crate::prefs::Prefs;
use crate::sections::{EmulatorSettings, SectionKind};
use egui::{Color32, RichText};
use std::path::PathBuf;
use std::process::Child;

/// Editor state for one emulator
struct EmulatorEditor {
    settings: EmulatorSettings,
    /// Settings as last loaded or saved, to detect edits
    saved: EmulatorSettings,
    /// File contents the settings are applied on top of
    base: Prefs,
    section: SectionKind,
    selected_disk: Option<usize>,
}

impl EmulatorEditor {
    fn new(emulator: Emulator, section: SectionKind) -> Self {
        let settings = EmulatorSettings::defaults(emulator);
        Self {
            saved: settings.clone(),
            settings,
            base: Prefs::new(),
            section,
            selected_disk: None,
        }
    }

    fn load(&mut self, prefs: Prefs) {
        self.settings = EmulatorSettings::from_prefs(self.settings.emulator, &prefs);
        self.saved = self.settings.clone();
        self.base = prefs;
        self.selected_disk = None;
    }

    fn current_prefs(&self) -> Prefs {
        self.settings.to_prefs(&self.base)
    }

    fn mark_saved(&mut self, prefs: Prefs) {
        self.base = prefs;
        self.saved = self.settings.clone();
    }

    fn is_dirty(&self) -> bool {
        self.settings != self.saved
    }

    /// Follow a change of preferences file. Unsaved edits are kept and will
    /// be written to the new file; otherwise the new file is read.
    fn switch_file(&mut self, prefs: Prefs) -> bool {
        if self.is_dirty() {
            self.base = prefs;
            false
        } else {
            self.load(prefs);
            true
        }
    }
}

/// Paths being edited on the Settings tab
#[derive(Default)]
struct PathsForm {
    executable: String,
    prefs: String,
}

impl PathsForm {
    fn from_config(config: &Config, emulator: Emulator) -> Self {
        let paths = config.paths(emulator);
        let show = |p: &Option<PathBuf>| p.as_ref().map(|p| p.display().to_string()).unwrap_or_default();
        Self {
            executable: show(&paths.executable),
            prefs: show(&paths.prefs),
        }
    }
}

fn optional_path(text: &str) -> Option<PathBuf> {
    let text = text.trim();
    (!text.is_empty()).then(|| PathBuf::from(text))
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum MessageKind {
    Info,
    Warning,
    Error,
}

struct Message {
    kind: MessageKind,
    title: String,
    body: String,
}

/// UI dialog state
#[derive(Default)]
struct DialogState {
    show_about: bool,
    message: Option<Message>,
}

/// Main application state
pub struct PrefsApp {
    config: Config,
    ui_settings: UiSettings,
    basilisk: EmulatorEditor,
    sheepshaver: EmulatorEditor,
    basilisk_form: PathsForm,
    sheepshaver_form: PathsForm,
    tab: MainTab,
    dialogs: DialogState,
    theme_applied: bool,
    title: String,
    /// Launched emulators not yet reaped
    children: Vec<(Emulator, Child)>,
}

/// Collect emulators that have exited so they do not linger as zombies
fn reap_children(children: &mut Vec<(Emulator, Child)>) {
    children.retain_mut(|(emulator, child)| match child.try_wait() {
        Ok(Some(status)) => {
            log::info!("{} exited with {}", emulator, status);
            false
        }
        Ok(None) => true,
        Err(e) => {
            log::warn!("Could not query {} process {}: {}", emulator, child.id(), e);
            false
        }
    });
}

impl PrefsApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let config = Config::load();
        let ui_settings = UiSettings::load();
        let section = SectionKind::from(ui_settings.last_section);

        let mut app = Self {
            basilisk: EmulatorEditor::new(Emulator::BasiliskII, section),
            sheepshaver: EmulatorEditor::new(Emulator::SheepShaver, section),
            basilisk_form: PathsForm::from_config(&config, Emulator::BasiliskII),
            sheepshaver_form: PathsForm::from_config(&config, Emulator::SheepShaver),
            tab: ui_settings.last_tab,
            config,
            ui_settings,
            dialogs: DialogState::default(),
            theme_applied: false,
            title: String::new(),
            children: Vec::new(),
        };
        app.load_configs();
        app
    }

    fn editor(&self, emulator: Emulator) -> &EmulatorEditor {
        match emulator {
            Emulator::BasiliskII => &self.basilisk,
            Emulator::SheepShaver => &self.sheepshaver,
        }
    }

    fn editor_mut(&mut self, emulator: Emulator) -> &mut EmulatorEditor {
        match emulator {
            Emulator::BasiliskII => &mut self.basilisk,
            Emulator::SheepShaver => &mut self.sheepshaver,
        }
    }

    fn show_message(&mut self, kind: MessageKind, title: &str, body: impl Into<String>) {
        let body = body.into();
        match kind {
            MessageKind::Info => log::info!("{}: {}", title, body),
            MessageKind::Warning => log::warn!("{}: {}", title, body),
            MessageKind::Error => log::error!("{}: {}", title, body),
        }
        self.dialogs.message = Some(Message {
            kind,
            title: title.to_string(),
            body,
        });
    }

    /// Re-read both preferences files
    fn load_configs(&mut self) {
        let mut errors = Vec::new();
        for emulator in Emulator::ALL {
            let Some(path) = self.config.prefs_path(emulator) else {
                log::warn!("No preferences path for {}", emulator);
                continue;
            };
            match Prefs::load(&path) {
                Ok(prefs) => self.editor_mut(emulator).load(prefs),
                Err(e) => errors.push(e.to_string()),
            }
        }
        if !errors.is_empty() {
            self.show_message(MessageKind::Error, "Reload", errors.join("\n"));
        }
    }

    fn save_all_configs(&mut self) {
        let mut saved = Vec::new();
        let mut errors = Vec::new();
        for emulator in Emulator::ALL {
            let Some(path) = self.config.prefs_path(emulator) else {
                continue;
            };
            let prefs = self.editor(emulator).current_prefs();
            match prefs.save(&path) {
                Ok(()) => {
                    self.editor_mut(emulator).mark_saved(prefs);
                    saved.push(path.display().to_string());
                }
                Err(e) => errors.push(e.to_string()),
            }
        }

        if !errors.is_empty() {
            self.show_message(
                MessageKind::Error,
                "Error",
                format!("Failed to save configurations:\n{}", errors.join("\n")),
            );
        } else if saved.is_empty() {
            self.show_message(MessageKind::Warning, "Save", "No preferences file is configured.");
        } else {
            self.show_message(MessageKind::Info, "Save", "Configurations saved successfully!");
        }
    }

    fn launch_emulator(&mut self, emulator: Emulator) {
        let launch = self.config.launch(emulator);
        let prefs = self.editor(emulator).current_prefs();
        match launch.run(&prefs) {
            Ok(child) => {
                self.children.push((emulator, child));
                if launch.prefs_path.is_some() {
                    self.editor_mut(emulator).mark_saved(prefs);
                }
            }
            Err(e) => self.show_message(MessageKind::Warning, "Launch", e.to_string()),
        }
    }

    fn save_settings(&mut self) {
        let before = Emulator::ALL.map(|emulator| self.config.prefs_path(emulator));
        for (emulator, form) in [
            (Emulator::BasiliskII, &self.basilisk_form),
            (Emulator::SheepShaver, &self.sheepshaver_form),
        ] {
            let paths = self.config.paths_mut(emulator);
            paths.executable = optional_path(&form.executable);
            paths.prefs = optional_path(&form.prefs);
        }
        if let Err(e) = self.config.save() {
            self.show_message(
                MessageKind::Error,
                "Settings",
                format!("Failed to save settings: {}", e),
            );
            return;
        }

        let mut notes = vec!["Settings saved successfully!".to_string()];
        for (emulator, old) in Emulator::ALL.into_iter().zip(before) {
            let new = self.config.prefs_path(emulator);
            if new == old {
                continue;
            }
            let Some(path) = new else {
                continue;
            };
            match Prefs::load(&path) {
                Ok(prefs) => {
                    if !self.editor_mut(emulator).switch_file(prefs) {
                        notes.push(format!(
                            "Unsaved {} changes were kept and will be saved to {}.",
                            emulator,
                            path.display()
                        ));
                    }
                }
                Err(e) => notes.push(e.to_string()),
            }
        }
        self.show_message(MessageKind::Info, "Settings", notes.join("\n"));
    }

    fn set_tab(&mut self, tab: MainTab) {
        if self.tab != tab {
            self.tab = tab;
            self.ui_settings.last_tab = tab;
            self.ui_settings.save();
        }
    }

    fn render_toolbar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                if ui.button("💾 Save All").clicked() {
                    self.save_all_configs();
                }
                ui.separator();
                if ui.button("🔄 Reload").clicked() {
                    self.load_configs();
                }
                ui.separator();
                for emulator in Emulator::ALL {
                    if ui.button(format!("▶ Launch {}", emulator)).clicked() {
                        self.launch_emulator(emulator);
                    }
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("ℹ About").clicked() {
                        self.dialogs.show_about = true;
                    }
                    let (next, label) = match self.ui_settings.theme {
                        Theme::Dark => (Theme::Light, "☀"),
                        Theme::Light => (Theme::Dark, "🌙"),
                    };
                    if ui.button(label).on_hover_text("Toggle theme").clicked() {
                        self.ui_settings.theme = next;
                        self.ui_settings.apply_theme(ctx);
                        self.ui_settings.save();
                    }
                });
            });
            ui.add_space(4.0);

            ui.horizontal(|ui| {
                let tabs = [
                    (MainTab::Basilisk, Emulator::BasiliskII.display_name()),
                    (MainTab::SheepShaver, Emulator::SheepShaver.display_name()),
                    (MainTab::Settings, "⚙ Settings"),
                ];
                for (tab, label) in tabs {
                    if ui.selectable_label(self.tab == tab, label).clicked() {
                        self.set_tab(tab);
                    }
                }
            });
            ui.add_space(2.0);
        });
    }

    fn render_status_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(24.0)
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    for emulator in Emulator::ALL {
                        let path = self
                            .config
                            .prefs_path(emulator)
                            .map(|p| p.display().to_string())
                            .unwrap_or_else(|| "no preferences file".to_string());
                        ui.label(format!("{}: {}", emulator, path));
                        if self.editor(emulator).is_dirty() {
                            ui.colored_label(Color32::from_rgb(255, 180, 0), "● modified");
                        }
                        ui.separator();
                    }
                });
            });
    }

    fn render_central_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| match self.tab {
            MainTab::Basilisk => self.render_emulator_tab(ui, Emulator::BasiliskII),
            MainTab::SheepShaver => self.render_emulator_tab(ui, Emulator::SheepShaver),
            MainTab::Settings => self.render_settings_tab(ui),
        });
    }

    fn render_emulator_tab(&mut self, ui: &mut egui::Ui, emulator: Emulator) {
        let mut changed_section = None;
        {
            let editor = self.editor_mut(emulator);
            ui.horizontal_wrapped(|ui| {
                for kind in SectionKind::ALL {
                    if ui.selectable_label(editor.section == kind, kind.title()).clicked()
                        && editor.section != kind
                    {
                        editor.section = kind;
                        changed_section = Some(kind);
                    }
                }
            });
            ui.separator();

            egui::ScrollArea::vertical()
                .id_salt((emulator.id(), "panel"))
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    panels::show(ui, editor.section, &mut editor.settings, &mut editor.selected_disk);
                });
        }

        if let Some(kind) = changed_section {
            self.ui_settings.last_section = kind.into();
            self.ui_settings.save();
        }
    }

    fn render_settings_tab(&mut self, ui: &mut egui::Ui) {
        let mut save = false;
        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                for (emulator, form) in [
                    (Emulator::BasiliskII, &mut self.basilisk_form),
                    (Emulator::SheepShaver, &mut self.sheepshaver_form),
                ] {
                    ui.group(|ui| {
                        ui.set_width(ui.available_width());
                        ui.strong(emulator.display_name());
                        ui.add_space(4.0);
                        egui::Grid::new((emulator.id(), "paths"))
                            .num_columns(2)
                            .spacing([20.0, 8.0])
                            .show(ui, |ui| {
                                panels::path_row(ui, "Executable:", &mut form.executable, || {
                                    rfd::FileDialog::new().set_title("Select Executable").pick_file()
                                });
                                panels::path_row(ui, "Config File:", &mut form.prefs, || {
                                    panels::pick_file("Select Config File", "", &[])
                                });
                            });
                        if form.prefs.trim().is_empty() {
                            ui.weak(format!("Default: ~/{}", emulator.prefs_file_name()));
                        }
                    });
                    ui.add_space(8.0);
                }

                if ui.button("Save Settings").clicked() {
                    save = true;
                }
            });

        if save {
            self.save_settings();
        }
    }

    fn render_dialogs(&mut self, ctx: &egui::Context) {
        // About dialog
        if self.dialogs.show_about {
            egui::Window::new("About")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.heading(RichText::new("EmulatorPrefs").size(22.0).strong());
                        ui.label("Sheepshaver & Basilisk II\nPreferences Editor");
                        ui.add_space(8.0);
                        ui.label(format!("Version {}", env!("CARGO_PKG_VERSION")));
                        ui.add_space(16.0);
                        if ui.button("Close").clicked() {
                            self.dialogs.show_about = false;
                        }
                    });
                });
        }

        let mut dismiss = false;
        if let Some(message) = &self.dialogs.message {
            let color = match message.kind {
                MessageKind::Info => Color32::from_rgb(100, 200, 100),
                MessageKind::Warning => Color32::from_rgb(255, 180, 0),
                MessageKind::Error => Color32::from_rgb(230, 80, 70),
            };
            egui::Window::new(message.title.as_str())
                .id(egui::Id::new("message_dialog"))
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.colored_label(color, message.body.as_str());
                    ui.add_space(12.0);
                    if ui.button("OK").clicked() {
                        dismiss = true;
                    }
                });
        }
        if dismiss {
            self.dialogs.message = None;
        }
    }

    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        let save = egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::S);
        if ctx.input_mut(|i| i.consume_shortcut(&save)) {
            self.save_all_configs();
        }
    }

    /// Dropped disk images are added to the emulator tab that is open
    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped: Vec<PathBuf> = ctx.input(|i| {
            i.raw
                .dropped_files
                .iter()
                .filter_map(|f| f.path.clone())
                .collect()
        });
        if dropped.is_empty() {
            return;
        }

        let emulator = match self.tab {
            MainTab::Basilisk => Emulator::BasiliskII,
            MainTab::SheepShaver => Emulator::SheepShaver,
            MainTab::Settings => {
                log::warn!("Ignoring {} dropped file(s) on the Settings tab", dropped.len());
                return;
            }
        };

        let editor = self.editor_mut(emulator);
        for path in dropped {
            let is_disk = path
                .extension()
                .and_then(|e| e.to_str())
                .map(|e| DISK_EXTENSIONS.iter().any(|d| e.eq_ignore_ascii_case(d)))
                .unwrap_or(false);
            if is_disk {
                log::info!("Adding dropped disk image: {}", path.display());
                editor.settings.drives.add_disk(path.display().to_string());
                editor.section = SectionKind::Drives;
            } else {
                log::warn!("Dropped file is not a disk image: {}", path.display());
            }
        }
    }

    fn update_title(&mut self, ctx: &egui::Context) {
        let dirty = self.basilisk.is_dirty() || self.sheepshaver.is_dirty();
        let title = if dirty { "EmulatorPrefs *" } else { "EmulatorPrefs" };
        if self.title != title {
            self.title = title.to_string();
            ctx.send_viewport_cmd(egui::ViewportCommand::Title(self.title.clone()));
        }
    }
}

impl eframe::App for PrefsApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Apply theme on first run
        if !self.theme_applied {
            self.ui_settings.apply_theme(ctx);
            self.theme_applied = true;
        }

        reap_children(&mut self.children);
        self.handle_shortcuts(ctx);
        self.handle_dropped_files(ctx);

        self.render_toolbar(ctx);
        self.render_status_bar(ctx);
        self.render_central_panel(ctx);
        self.render_dialogs(ctx);
        self.update_title(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sections::ScreenMode;

    #[test]
    fn switching_file_keeps_unsaved_edits() {
        let mut editor = EmulatorEditor::new(Emulator::BasiliskII, SectionKind::Graphics);
        editor.settings.graphics.width = 1024;
        assert!(editor.is_dirty());

        let other = Prefs::parse("screen full/640/480\nmystery 1\n");
        assert!(!editor.switch_file(other));
        assert_eq!(editor.settings.graphics.width, 1024);
        assert!(editor.is_dirty());
        assert_eq!(editor.current_prefs().raw("mystery"), Some("1"));
    }

    #[test]
    fn switching_file_reloads_a_clean_editor() {
        let mut editor = EmulatorEditor::new(Emulator::SheepShaver, SectionKind::Drives);
        assert!(editor.switch_file(Prefs::parse("screen full/640/480\n")));
        assert_eq!(editor.settings.graphics.mode, ScreenMode::Fullscreen);
        assert!(!editor.is_dirty());
    }

    #[cfg(unix)]
    #[test]
    fn exited_emulators_are_reaped() {
        let child = std::process::Command::new("true").spawn().unwrap();
        let mut children = vec![(Emulator::BasiliskII, child)];
        for _ in 0..100 {
            reap_children(&mut children);
            if children.is_empty() {
                break;
            }
            std::thread::sleep(std::time::Duration::from_millis(20));
        }
        assert!(children.is_empty());
    }
}
