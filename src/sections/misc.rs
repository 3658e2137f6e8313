use super::{read_flag, read_ranged, Section};
use crate::emulator::Emulator;
use crate::prefs::Prefs;

#[derive(Debug, Clone, PartialEq)]
pub struct Misc {
    pub no_gui: bool,
    pub no_clip_conversion: bool,
    pub ignore_segv: bool,
    /// SheepShaver only
    pub ignore_illegal: bool,
    pub idle_wait: bool,
    pub year_offset: i32,
    pub day_offset: i32,
    pub name_encoding: u8,
    /// Basilisk II only
    pub delay: u32,
}

impl Section for Misc {
    const TITLE: &'static str = "Misc";

    fn load(prefs: &Prefs, emulator: Emulator) -> Self {
        Self {
            no_gui: read_flag(prefs, "nogui", true),
            no_clip_conversion: read_flag(prefs, "noclipconversion", false),
            ignore_segv: read_flag(prefs, "ignoresegv", false),
            ignore_illegal: emulator.is_sheepshaver() && read_flag(prefs, "ignoreillegal", false),
            idle_wait: read_flag(prefs, "idlewait", true),
            year_offset: read_ranged(prefs, "yearofs", -100..=100, 0),
            day_offset: read_ranged(prefs, "dayofs", -365..=365, 0),
            name_encoding: read_ranged(prefs, "name_encoding", 0..=10, 3),
            delay: if emulator.is_basilisk() {
                read_ranged(prefs, "delay", 0..=1000, 0)
            } else {
                0
            },
        }
    }

    fn store(&self, prefs: &mut Prefs, emulator: Emulator) {
        prefs.set_flag("nogui", self.no_gui);
        prefs.set_flag("noclipconversion", self.no_clip_conversion);
        prefs.set_flag("ignoresegv", self.ignore_segv);
        if emulator.is_sheepshaver() {
            prefs.set_flag("ignoreillegal", self.ignore_illegal);
        }
        prefs.set_flag("idlewait", self.idle_wait);
        prefs.set_int("yearofs", self.year_offset.into());
        prefs.set_int("dayofs", self.day_offset.into());
        prefs.set_int("name_encoding", self.name_encoding.into());
        if emulator.is_basilisk() {
            prefs.set_int("delay", self.delay.into());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_float_written_offsets() {
        // older saves wrote negative offsets as floats
        let prefs = Prefs::parse("yearofs -5.0\ndayofs -400\n");
        let m = Misc::load(&prefs, Emulator::BasiliskII);
        assert_eq!(m.year_offset, -5);
        assert_eq!(m.day_offset, -365);

        let mut out = Prefs::new();
        m.store(&mut out, Emulator::BasiliskII);
        assert_eq!(out.raw("yearofs"), Some("-5"));
    }
}
