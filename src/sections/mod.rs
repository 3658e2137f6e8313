//! Typed setting groups
//!
//! Each group covers one editor tab. Loading never fails: missing or
//! malformed values fall back to the emulator's defaults and numbers are
//! clamped to the ranges the editor allows. Storing only touches the keys the
//! group owns, so unrelated settings in the file survive a save.

mod cpu;
mod drives;
mod graphics;
mod input;
mod misc;
mod network;
mod serial;
mod sound;

pub use cpu::{CpuMemory, CpuType, RAM_PRESETS};
pub use drives::Drives;
pub use graphics::{Graphics, ScreenMode, SdlRenderer, COLOR_DEPTHS};
pub use input::Input;
pub use misc::Misc;
pub use network::{Network, ETHER_SUGGESTIONS};
pub use serial::Serial;
pub use sound::Sound;

use crate::emulator::Emulator;
use crate::prefs::Prefs;
use std::ops::RangeInclusive;

/// One group of related settings
pub trait Section: Sized {
    const TITLE: &'static str;

    /// Build the group from a preferences file
    fn load(prefs: &Prefs, emulator: Emulator) -> Self;

    /// Write the group's keys back into a preferences file
    fn store(&self, prefs: &mut Prefs, emulator: Emulator);

    /// The values a fresh preferences file would get
    fn defaults(emulator: Emulator) -> Self {
        Self::load(&Prefs::new(), emulator)
    }
}

/// Editor tabs, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKind {
    Drives,
    Graphics,
    Sound,
    Network,
    CpuMemory,
    Input,
    Serial,
    Misc,
}

impl SectionKind {
    pub const ALL: [SectionKind; 8] = [
        SectionKind::Drives,
        SectionKind::Graphics,
        SectionKind::Sound,
        SectionKind::Network,
        SectionKind::CpuMemory,
        SectionKind::Input,
        SectionKind::Serial,
        SectionKind::Misc,
    ];

    pub fn title(self) -> &'static str {
        match self {
            SectionKind::Drives => Drives::TITLE,
            SectionKind::Graphics => Graphics::TITLE,
            SectionKind::Sound => Sound::TITLE,
            SectionKind::Network => Network::TITLE,
            SectionKind::CpuMemory => CpuMemory::TITLE,
            SectionKind::Input => Input::TITLE,
            SectionKind::Serial => Serial::TITLE,
            SectionKind::Misc => Misc::TITLE,
        }
    }
}

/// All settings of one emulator
#[derive(Debug, Clone, PartialEq)]
pub struct EmulatorSettings {
    pub emulator: Emulator,
    pub drives: Drives,
    pub graphics: Graphics,
    pub sound: Sound,
    pub network: Network,
    pub cpu: CpuMemory,
    pub input: Input,
    pub serial: Serial,
    pub misc: Misc,
}

impl EmulatorSettings {
    pub fn from_prefs(emulator: Emulator, prefs: &Prefs) -> Self {
        Self {
            emulator,
            drives: Drives::load(prefs, emulator),
            graphics: Graphics::load(prefs, emulator),
            sound: Sound::load(prefs, emulator),
            network: Network::load(prefs, emulator),
            cpu: CpuMemory::load(prefs, emulator),
            input: Input::load(prefs, emulator),
            serial: Serial::load(prefs, emulator),
            misc: Misc::load(prefs, emulator),
        }
    }

    pub fn defaults(emulator: Emulator) -> Self {
        Self::from_prefs(emulator, &Prefs::new())
    }

    /// Write every group into `prefs`, keeping keys the editor does not own
    pub fn apply(&self, prefs: &mut Prefs) {
        let emulator = self.emulator;
        self.drives.store(prefs, emulator);
        self.graphics.store(prefs, emulator);
        self.sound.store(prefs, emulator);
        self.network.store(prefs, emulator);
        self.cpu.store(prefs, emulator);
        self.input.store(prefs, emulator);
        self.serial.store(prefs, emulator);
        self.misc.store(prefs, emulator);
    }

    /// A copy of `base` with these settings applied
    pub fn to_prefs(&self, base: &Prefs) -> Prefs {
        let mut prefs = base.clone();
        self.apply(&mut prefs);
        prefs
    }
}

pub(crate) fn read_flag(prefs: &Prefs, key: &str, default: bool) -> bool {
    prefs.flag(key).unwrap_or(default)
}

pub(crate) fn read_text(prefs: &Prefs, key: &str, default: &str) -> String {
    prefs
        .raw(key)
        .map(str::to_string)
        .unwrap_or_else(|| default.to_string())
}

/// Read an integer clamped into `range`
pub(crate) fn read_ranged<T>(prefs: &Prefs, key: &str, range: RangeInclusive<T>, default: T) -> T
where
    T: Copy + Into<i64> + TryFrom<i64>,
{
    let (lo, hi): (i64, i64) = ((*range.start()).into(), (*range.end()).into());
    prefs
        .int(key)
        .map(|n| n.clamp(lo, hi))
        .and_then(|n| T::try_from(n).ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_file_gets_groups_in_tab_order() {
        let settings = EmulatorSettings::defaults(Emulator::BasiliskII);
        let prefs = settings.to_prefs(&Prefs::new());
        let keys: Vec<&str> = prefs.keys().collect();
        assert_eq!(keys.first(), Some(&"extfs"));
        let pos = |k: &str| keys.iter().position(|x| *x == k).unwrap();
        assert!(pos("screen") < pos("nosound"));
        assert!(pos("nosound") < pos("ether"));
        assert!(pos("ramsize") < pos("keyboardtype"));
        assert!(pos("seriala") < pos("nogui"));
    }

    #[test]
    fn existing_order_and_foreign_keys_survive() {
        let base = Prefs::parse("seriala /dev/cu.modem\nfloppy /a.img\nrom /b.rom\n");
        let settings = EmulatorSettings::from_prefs(Emulator::BasiliskII, &base);
        let prefs = settings.to_prefs(&base);
        let keys: Vec<&str> = prefs.keys().take(3).collect();
        assert_eq!(keys, ["seriala", "floppy", "rom"]);
        assert_eq!(prefs.raw("seriala"), Some("/dev/cu.modem"));
        assert_eq!(prefs.raw("floppy"), Some("/a.img"));
    }

    #[test]
    fn variant_keys_stay_with_their_variant() {
        let basilisk = EmulatorSettings::defaults(Emulator::BasiliskII).to_prefs(&Prefs::new());
        let sheep = EmulatorSettings::defaults(Emulator::SheepShaver).to_prefs(&Prefs::new());

        for key in ["udptunnel", "udpport", "cpu", "modelid", "fpu", "jitfpu", "delay"] {
            assert!(basilisk.contains(key), "basilisk missing {}", key);
            assert!(!sheep.contains(key), "sheepshaver has {}", key);
        }
        for key in ["gfxaccel", "nonet", "cpuclock", "jit68k", "hardcursor", "ignoreillegal"] {
            assert!(sheep.contains(key), "sheepshaver missing {}", key);
            assert!(!basilisk.contains(key), "basilisk has {}", key);
        }
    }

    #[test]
    fn load_apply_is_stable() {
        let text = EmulatorSettings::defaults(Emulator::SheepShaver)
            .to_prefs(&Prefs::new())
            .to_string();
        let again = EmulatorSettings::from_prefs(Emulator::SheepShaver, &Prefs::parse(&text))
            .to_prefs(&Prefs::parse(&text))
            .to_string();
        assert_eq!(text, again);
    }

    #[test]
    fn ranged_reads_clamp() {
        let prefs = Prefs::parse("a 300\nb -4\nc junk\n");
        assert_eq!(read_ranged::<u8>(&prefs, "a", 0..=255, 7), 255);
        assert_eq!(read_ranged::<i32>(&prefs, "b", -2..=2, 0), -2);
        assert_eq!(read_ranged::<u8>(&prefs, "c", 0..=255, 7), 7);
        assert_eq!(read_ranged::<u8>(&prefs, "missing", 0..=255, 7), 7);
    }
}
