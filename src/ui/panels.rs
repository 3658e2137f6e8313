//! Editor panels, one per setting group

use crate::emulator::Emulator;
use crate::sections::{
    CpuMemory, CpuType, Drives, EmulatorSettings, Graphics, Input, Misc, Network, ScreenMode,
    SdlRenderer, SectionKind, Serial, Sound, COLOR_DEPTHS, ETHER_SUGGESTIONS, RAM_PRESETS,
};
use std::path::PathBuf;

/// Extensions accepted as disk images, in the file picker and on drop
pub const DISK_EXTENSIONS: [&str; 5] = ["img", "dmg", "iso", "hfv", "dsk"];

/// Draw the panel for one group
pub fn show(
    ui: &mut egui::Ui,
    kind: SectionKind,
    settings: &mut EmulatorSettings,
    selected_disk: &mut Option<usize>,
) {
    let emulator = settings.emulator;
    match kind {
        SectionKind::Drives => drives(ui, emulator, &mut settings.drives, selected_disk),
        SectionKind::Graphics => graphics(ui, emulator, &mut settings.graphics),
        SectionKind::Sound => sound(ui, emulator, &mut settings.sound),
        SectionKind::Network => network(ui, emulator, &mut settings.network),
        SectionKind::CpuMemory => cpu_memory(ui, emulator, &mut settings.cpu),
        SectionKind::Input => input(ui, emulator, &mut settings.input),
        SectionKind::Serial => serial(ui, emulator, &mut settings.serial),
        SectionKind::Misc => misc(ui, emulator, &mut settings.misc),
    }
}

fn group(ui: &mut egui::Ui, title: &str, add_contents: impl FnOnce(&mut egui::Ui)) {
    ui.group(|ui| {
        ui.set_width(ui.available_width());
        ui.strong(title);
        ui.add_space(4.0);
        add_contents(ui);
    });
    ui.add_space(8.0);
}

fn form(ui: &mut egui::Ui, id: impl std::hash::Hash, add_contents: impl FnOnce(&mut egui::Ui)) {
    egui::Grid::new(id)
        .num_columns(2)
        .spacing([20.0, 8.0])
        .show(ui, add_contents);
}

/// A labelled text field with a Browse button
pub fn path_row(
    ui: &mut egui::Ui,
    label: &str,
    value: &mut String,
    pick: impl FnOnce() -> Option<PathBuf>,
) {
    ui.label(label);
    ui.horizontal(|ui| {
        ui.add(egui::TextEdit::singleline(value).desired_width(360.0));
        if ui.button("Browse").clicked() {
            if let Some(path) = pick() {
                *value = path.display().to_string();
            }
        }
    });
    ui.end_row();
}

fn text_row(ui: &mut egui::Ui, label: &str, value: &mut String, hint: &str) {
    ui.label(label);
    ui.add(
        egui::TextEdit::singleline(value)
            .hint_text(hint)
            .desired_width(240.0),
    );
    ui.end_row();
}

fn number_row<N: egui::emath::Numeric>(
    ui: &mut egui::Ui,
    label: &str,
    value: &mut N,
    range: std::ops::RangeInclusive<N>,
) {
    ui.label(label);
    ui.add(egui::DragValue::new(value).range(range));
    ui.end_row();
}

fn check_row(ui: &mut egui::Ui, value: &mut bool, text: &str) {
    ui.label("");
    ui.checkbox(value, text);
    ui.end_row();
}

pub fn pick_disk_image() -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_title("Select Disk Image")
        .add_filter("Disk Images", &DISK_EXTENSIONS)
        .add_filter("All Files", &["*"])
        .pick_file()
}

pub fn pick_file(title: &str, filter_name: &str, extensions: &[&str]) -> Option<PathBuf> {
    let mut dialog = rfd::FileDialog::new().set_title(title);
    if !extensions.is_empty() {
        dialog = dialog.add_filter(filter_name, extensions);
    }
    dialog.add_filter("All Files", &["*"]).pick_file()
}

fn drives(ui: &mut egui::Ui, emulator: Emulator, drives: &mut Drives, selected: &mut Option<usize>) {
    group(ui, "Disk Images", |ui| {
        egui::ScrollArea::vertical()
            .id_salt((emulator.id(), "disks"))
            .max_height(180.0)
            .auto_shrink([false, true])
            .show(ui, |ui| {
                if drives.disks.is_empty() {
                    ui.weak("No disk images");
                }
                for (i, disk) in drives.disks.iter().enumerate() {
                    if ui.selectable_label(*selected == Some(i), disk.as_str()).clicked() {
                        *selected = Some(i);
                    }
                }
            });

        ui.horizontal(|ui| {
            if ui.button("Add").clicked() {
                if let Some(path) = pick_disk_image() {
                    drives.add_disk(path.display().to_string());
                    *selected = Some(drives.disks.len() - 1);
                }
            }
            let has_selection = selected.is_some();
            if ui.add_enabled(has_selection, egui::Button::new("Remove")).clicked() {
                if let Some(i) = selected.take() {
                    drives.remove_disk(i);
                }
            }
            if ui.add_enabled(has_selection, egui::Button::new("▲ Up")).clicked() {
                if let Some(i) = *selected {
                    if let Some(moved) = drives.move_disk_up(i) {
                        *selected = Some(moved);
                    }
                }
            }
            if ui.add_enabled(has_selection, egui::Button::new("▼ Down")).clicked() {
                if let Some(i) = *selected {
                    if let Some(moved) = drives.move_disk_down(i) {
                        *selected = Some(moved);
                    }
                }
            }
        });
    });

    group(ui, "Storage Options", |ui| {
        form(ui, (emulator.id(), "storage"), |ui| {
            path_row(ui, "ExtFS Path:", &mut drives.extfs, || {
                rfd::FileDialog::new().set_title("Select Directory").pick_folder()
            });
            path_row(ui, "ROM File:", &mut drives.rom, || {
                pick_file("Select ROM", "ROM Files", &["rom"])
            });
            number_row(ui, "Boot Drive:", &mut drives.boot_drive, 0..=255);
            number_row(ui, "Boot Driver:", &mut drives.boot_driver, 0..=255);
            check_row(ui, &mut drives.no_cdrom, "Disable CD-ROM");
        });
    });
}

fn graphics(ui: &mut egui::Ui, emulator: Emulator, graphics: &mut Graphics) {
    group(ui, "Display", |ui| {
        form(ui, (emulator.id(), "display"), |ui| {
            ui.label("Screen Mode:");
            egui::ComboBox::from_id_salt((emulator.id(), "screen_mode"))
                .selected_text(graphics.mode.as_str())
                .show_ui(ui, |ui| {
                    for mode in ScreenMode::ALL {
                        ui.selectable_value(&mut graphics.mode, mode, mode.as_str());
                    }
                });
            ui.end_row();

            number_row(ui, "Width:", &mut graphics.width, 320..=3840);
            number_row(ui, "Height:", &mut graphics.height, 240..=2160);

            ui.label("Color Depth:");
            let depth_label = |d: u8| {
                if d == 0 {
                    "0 (Default)".to_string()
                } else {
                    d.to_string()
                }
            };
            egui::ComboBox::from_id_salt((emulator.id(), "color_depth"))
                .selected_text(depth_label(graphics.color_depth))
                .show_ui(ui, |ui| {
                    for depth in COLOR_DEPTHS {
                        ui.selectable_value(&mut graphics.color_depth, depth, depth_label(depth));
                    }
                });
            ui.end_row();
        });
    });

    group(ui, "Performance", |ui| {
        form(ui, (emulator.id(), "performance"), |ui| {
            number_row(ui, "Frame Skip:", &mut graphics.frame_skip, 0..=60);
            if emulator.is_sheepshaver() {
                ui.label("GFX Acceleration:");
                ui.checkbox(&mut graphics.gfx_accel, "Enable");
                ui.end_row();
            }
        });
    });

    group(ui, "Scaling", |ui| {
        form(ui, (emulator.id(), "scaling"), |ui| {
            check_row(ui, &mut graphics.scale_nearest, "Nearest Neighbor");
            check_row(ui, &mut graphics.scale_integer, "Integer Scaling");
            ui.label("Magnification:");
            ui.add(
                egui::DragValue::new(&mut graphics.mag_rate)
                    .range(0.0..=4.0)
                    .speed(0.1)
                    .fixed_decimals(2),
            );
            ui.end_row();
        });
    });

    group(ui, "Renderer", |ui| {
        form(ui, (emulator.id(), "renderer"), |ui| {
            ui.label("SDL Render:");
            egui::ComboBox::from_id_salt((emulator.id(), "sdlrender"))
                .selected_text(graphics.renderer.as_str())
                .show_ui(ui, |ui| {
                    for renderer in SdlRenderer::ALL {
                        ui.selectable_value(&mut graphics.renderer, renderer, renderer.as_str());
                    }
                });
            ui.end_row();
        });
    });
}

fn sound(ui: &mut egui::Ui, emulator: Emulator, sound: &mut Sound) {
    group(ui, "Sound Settings", |ui| {
        form(ui, (emulator.id(), "sound"), |ui| {
            check_row(ui, &mut sound.no_sound, "Disable Sound");
            number_row(ui, "Buffer Size:", &mut sound.buffer, 0..=65536);
            text_row(ui, "DSP Device:", &mut sound.dsp, "/dev/dsp");
            text_row(ui, "Mixer Device:", &mut sound.mixer, "/dev/mixer");
        });
    });
}

fn network(ui: &mut egui::Ui, emulator: Emulator, network: &mut Network) {
    group(ui, "Network Settings", |ui| {
        form(ui, (emulator.id(), "network"), |ui| {
            ui.label("Ethernet:");
            ui.horizontal(|ui| {
                ui.add(egui::TextEdit::singleline(&mut network.ether).desired_width(160.0));
                egui::ComboBox::from_id_salt((emulator.id(), "ether"))
                    .selected_text("Presets")
                    .show_ui(ui, |ui| {
                        for preset in ETHER_SUGGESTIONS {
                            if ui.selectable_label(network.ether == preset, preset).clicked() {
                                network.ether = preset.to_string();
                            }
                        }
                    });
            });
            ui.end_row();

            if emulator.is_basilisk() {
                ui.label("UDP Tunnel:");
                ui.checkbox(&mut network.udp_tunnel, "Enable");
                ui.end_row();
                number_row(ui, "UDP Port:", &mut network.udp_port, 1..=65535);
            } else {
                check_row(ui, &mut network.no_net, "Disable Network");
            }
        });
    });
}

fn cpu_memory(ui: &mut egui::Ui, emulator: Emulator, cpu: &mut CpuMemory) {
    group(ui, "Memory", |ui| {
        form(ui, (emulator.id(), "memory"), |ui| {
            ui.label("RAM Size:");
            let selected = cpu
                .ram_label()
                .map(str::to_string)
                .unwrap_or_else(|| format!("Custom ({} bytes)", cpu.ram_size));
            egui::ComboBox::from_id_salt((emulator.id(), "ramsize"))
                .selected_text(selected)
                .show_ui(ui, |ui| {
                    for (label, size) in RAM_PRESETS {
                        ui.selectable_value(&mut cpu.ram_size, size, label);
                    }
                });
            ui.end_row();
        });
    });

    group(ui, "CPU", |ui| {
        form(ui, (emulator.id(), "cpu"), |ui| {
            if emulator.is_basilisk() {
                ui.label("CPU Type:");
                egui::ComboBox::from_id_salt((emulator.id(), "cpu_type"))
                    .selected_text(cpu.cpu.label())
                    .show_ui(ui, |ui| {
                        for cpu_type in CpuType::ALL {
                            ui.selectable_value(&mut cpu.cpu, cpu_type, cpu_type.label());
                        }
                    });
                ui.end_row();
                number_row(ui, "Model ID:", &mut cpu.model_id, 0..=255);
                check_row(ui, &mut cpu.fpu, "Enable FPU");
            } else {
                number_row(ui, "CPU Clock (0=auto):", &mut cpu.cpu_clock, 0..=10000);
            }
        });
    });

    group(ui, "JIT Compiler", |ui| {
        form(ui, (emulator.id(), "jit"), |ui| {
            check_row(ui, &mut cpu.jit, "Enable JIT");
            if emulator.is_basilisk() {
                check_row(ui, &mut cpu.jit_fpu, "JIT FPU");
                number_row(ui, "Cache Size (KB):", &mut cpu.jit_cache_size, 0..=65536);
                check_row(ui, &mut cpu.jit_lazy_flush, "Lazy Flush");
                check_row(ui, &mut cpu.jit_inline, "Inline");
                check_row(ui, &mut cpu.jit_debug, "Debug");
            } else {
                check_row(ui, &mut cpu.jit_68k, "JIT 68K");
            }
        });
    });
}

fn input(ui: &mut egui::Ui, emulator: Emulator, input: &mut Input) {
    group(ui, "Keyboard", |ui| {
        form(ui, (emulator.id(), "keyboard"), |ui| {
            number_row(ui, "Keyboard Type:", &mut input.keyboard_type, 0..=255);
            check_row(ui, &mut input.keycodes, "Use Keycodes");
            path_row(ui, "Keycode File:", &mut input.keycode_file, || {
                pick_file("Select Keycode File", "", &[])
            });
            number_row(ui, "Hotkey:", &mut input.hotkey, 0..=255);
            check_row(ui, &mut input.swap_opt_cmd, "Swap Option/Command");
        });
    });

    group(ui, "Mouse", |ui| {
        form(ui, (emulator.id(), "mouse"), |ui| {
            number_row(ui, "Wheel Mode:", &mut input.mouse_wheel_mode, 0..=3);
            number_row(ui, "Wheel Lines:", &mut input.mouse_wheel_lines, 1..=20);
            check_row(ui, &mut input.init_grab, "Initial Grab");
            if emulator.is_sheepshaver() {
                check_row(ui, &mut input.hard_cursor, "Hardware Cursor");
            }
        });
    });
}

fn serial(ui: &mut egui::Ui, emulator: Emulator, serial: &mut Serial) {
    group(ui, "Serial Ports", |ui| {
        form(ui, (emulator.id(), "serial"), |ui| {
            text_row(ui, "Serial A:", &mut serial.serial_a, "/dev/ttyS0");
            text_row(ui, "Serial B:", &mut serial.serial_b, "/dev/ttyS1");
        });
    });
}

fn misc(ui: &mut egui::Ui, emulator: Emulator, misc: &mut Misc) {
    group(ui, "Miscellaneous", |ui| {
        form(ui, (emulator.id(), "misc"), |ui| {
            check_row(ui, &mut misc.no_gui, "No GUI");
            check_row(ui, &mut misc.no_clip_conversion, "No Clipboard Conversion");
            check_row(ui, &mut misc.ignore_segv, "Ignore SEGV");
            if emulator.is_sheepshaver() {
                check_row(ui, &mut misc.ignore_illegal, "Ignore Illegal Instructions");
            }
            check_row(ui, &mut misc.idle_wait, "Idle Wait");
        });
    });

    group(ui, "Time Offset", |ui| {
        form(ui, (emulator.id(), "time"), |ui| {
            number_row(ui, "Year Offset:", &mut misc.year_offset, -100..=100);
            number_row(ui, "Day Offset:", &mut misc.day_offset, -365..=365);
        });
    });

    group(ui, "Encoding", |ui| {
        form(ui, (emulator.id(), "encoding"), |ui| {
            number_row(ui, "Name Encoding:", &mut misc.name_encoding, 0..=10);
        });
    });

    if emulator.is_basilisk() {
        group(ui, "Performance", |ui| {
            form(ui, (emulator.id(), "delay"), |ui| {
                number_row(ui, "Delay:", &mut misc.delay, 0..=1000);
            });
        });
    }
}
