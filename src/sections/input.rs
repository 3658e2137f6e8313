use super::{read_flag, read_ranged, read_text, Section};
use crate::emulator::Emulator;
use crate::prefs::Prefs;

/// Keyboard and mouse settings
#[derive(Debug, Clone, PartialEq)]
pub struct Input {
    pub keyboard_type: u8,
    pub keycodes: bool,
    pub keycode_file: String,
    pub hotkey: u8,
    pub swap_opt_cmd: bool,
    pub mouse_wheel_mode: u8,
    pub mouse_wheel_lines: u8,
    pub init_grab: bool,
    /// SheepShaver only
    pub hard_cursor: bool,
}

impl Section for Input {
    const TITLE: &'static str = "Input";

    fn load(prefs: &Prefs, emulator: Emulator) -> Self {
        Self {
            keyboard_type: read_ranged(prefs, "keyboardtype", 0..=255, 5),
            keycodes: read_flag(prefs, "keycodes", true),
            keycode_file: read_text(prefs, "keycodefile", ""),
            hotkey: read_ranged(prefs, "hotkey", 0..=255, 0),
            swap_opt_cmd: read_flag(prefs, "swap_opt_cmd", true),
            mouse_wheel_mode: read_ranged(prefs, "mousewheelmode", 0..=3, 1),
            mouse_wheel_lines: read_ranged(prefs, "mousewheellines", 1..=20, 3),
            init_grab: read_flag(prefs, "init_grab", false),
            hard_cursor: emulator.is_sheepshaver() && read_flag(prefs, "hardcursor", false),
        }
    }

    fn store(&self, prefs: &mut Prefs, emulator: Emulator) {
        prefs.set_int("keyboardtype", self.keyboard_type.into());
        prefs.set_flag("keycodes", self.keycodes);
        prefs.set_text("keycodefile", &self.keycode_file);
        prefs.set_int("hotkey", self.hotkey.into());
        prefs.set_flag("swap_opt_cmd", self.swap_opt_cmd);
        prefs.set_int("mousewheelmode", self.mouse_wheel_mode.into());
        prefs.set_int("mousewheellines", self.mouse_wheel_lines.into());
        prefs.set_flag("init_grab", self.init_grab);
        if emulator.is_sheepshaver() {
            prefs.set_flag("hardcursor", self.hard_cursor);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wheel_settings_clamp() {
        let prefs = Prefs::parse("mousewheelmode 9\nmousewheellines 0\n");
        let i = Input::load(&prefs, Emulator::BasiliskII);
        assert_eq!(i.mouse_wheel_mode, 3);
        assert_eq!(i.mouse_wheel_lines, 1);
        assert_eq!(i.keyboard_type, 5);
        assert!(i.keycodes && i.swap_opt_cmd);
    }
}
