use super::{read_flag, read_ranged, Section};
use crate::emulator::Emulator;
use crate::prefs::Prefs;

const MIB: u64 = 1024 * 1024;

const DEFAULT_RAM: u64 = 128 * MIB;

/// RAM sizes offered by the editor, with labels
pub const RAM_PRESETS: [(&str, u64); 8] = [
    ("8 MB", 8 * MIB),
    ("16 MB", 16 * MIB),
    ("32 MB", 32 * MIB),
    ("64 MB", 64 * MIB),
    ("128 MB", 128 * MIB),
    ("256 MB", 256 * MIB),
    ("512 MB", 512 * MIB),
    ("1 GB", 1024 * MIB),
];

/// Emulated 68k CPU (Basilisk II)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CpuType {
    M68020,
    #[default]
    M68030,
    M68040,
}

impl CpuType {
    pub const ALL: [CpuType; 3] = [CpuType::M68020, CpuType::M68030, CpuType::M68040];

    /// Value stored in the `cpu` key
    pub fn code(self) -> i64 {
        match self {
            CpuType::M68020 => 2,
            CpuType::M68030 => 3,
            CpuType::M68040 => 4,
        }
    }

    pub fn from_code(code: i64) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.code() == code)
    }

    pub fn label(self) -> &'static str {
        match self {
            CpuType::M68020 => "68020",
            CpuType::M68030 => "68030",
            CpuType::M68040 => "68040",
        }
    }
}

/// CPU, memory and JIT settings
#[derive(Debug, Clone, PartialEq)]
pub struct CpuMemory {
    /// RAM size in bytes
    pub ram_size: u64,
    pub jit: bool,
    // Basilisk II
    pub cpu: CpuType,
    pub model_id: u8,
    pub fpu: bool,
    pub jit_fpu: bool,
    /// KiB
    pub jit_cache_size: u32,
    pub jit_lazy_flush: bool,
    pub jit_inline: bool,
    pub jit_debug: bool,
    // SheepShaver
    /// MHz, 0 means automatic
    pub cpu_clock: u32,
    pub jit_68k: bool,
}

impl CpuMemory {
    /// Label of the RAM preset matching the current size, if any
    pub fn ram_label(&self) -> Option<&'static str> {
        RAM_PRESETS
            .iter()
            .find(|(_, size)| *size == self.ram_size)
            .map(|(label, _)| *label)
    }
}

impl Section for CpuMemory {
    const TITLE: &'static str = "CPU/Memory";

    fn load(prefs: &Prefs, emulator: Emulator) -> Self {
        let basilisk = emulator.is_basilisk();
        let sheep = emulator.is_sheepshaver();
        Self {
            ram_size: prefs
                .int("ramsize")
                .filter(|n| *n > 0)
                .map(|n| n as u64)
                .unwrap_or(DEFAULT_RAM),
            jit: read_flag(prefs, "jit", true),
            cpu: prefs
                .int("cpu")
                .filter(|_| basilisk)
                .and_then(CpuType::from_code)
                .unwrap_or_default(),
            model_id: if basilisk { read_ranged(prefs, "modelid", 0..=255, 5) } else { 5 },
            fpu: !basilisk || read_flag(prefs, "fpu", true),
            jit_fpu: !basilisk || read_flag(prefs, "jitfpu", true),
            jit_cache_size: if basilisk {
                read_ranged(prefs, "jitcachesize", 0..=65536, 8192)
            } else {
                8192
            },
            jit_lazy_flush: !basilisk || read_flag(prefs, "jitlazyflush", true),
            jit_inline: !basilisk || read_flag(prefs, "jitinline", true),
            jit_debug: basilisk && read_flag(prefs, "jitdebug", false),
            cpu_clock: if sheep { read_ranged(prefs, "cpuclock", 0..=10000, 0) } else { 0 },
            jit_68k: sheep && read_flag(prefs, "jit68k", false),
        }
    }

    fn store(&self, prefs: &mut Prefs, emulator: Emulator) {
        prefs.set_int("ramsize", self.ram_size as i64);
        if emulator.is_basilisk() {
            prefs.set_int("cpu", self.cpu.code());
            prefs.set_int("modelid", self.model_id.into());
            prefs.set_flag("fpu", self.fpu);
            prefs.set_flag("jitfpu", self.jit_fpu);
            prefs.set_int("jitcachesize", self.jit_cache_size.into());
            prefs.set_flag("jitlazyflush", self.jit_lazy_flush);
            prefs.set_flag("jitinline", self.jit_inline);
            prefs.set_flag("jitdebug", self.jit_debug);
        } else {
            prefs.set_int("cpuclock", self.cpu_clock.into());
            prefs.set_flag("jit68k", self.jit_68k);
        }
        prefs.set_flag("jit", self.jit);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basilisk_defaults() {
        let c = CpuMemory::defaults(Emulator::BasiliskII);
        assert_eq!(c.ram_size, 128 * MIB);
        assert_eq!(c.ram_label(), Some("128 MB"));
        assert_eq!(c.cpu, CpuType::M68030);
        assert_eq!(c.model_id, 5);
        assert!(c.fpu && c.jit && c.jit_fpu && c.jit_inline && c.jit_lazy_flush);
        assert!(!c.jit_debug);
        assert_eq!(c.jit_cache_size, 8192);
    }

    #[test]
    fn unknown_cpu_code_falls_back_to_68030() {
        let prefs = Prefs::parse("cpu 7\n");
        assert_eq!(CpuMemory::load(&prefs, Emulator::BasiliskII).cpu, CpuType::M68030);
        let prefs = Prefs::parse("cpu 4\n");
        assert_eq!(CpuMemory::load(&prefs, Emulator::BasiliskII).cpu, CpuType::M68040);
    }

    #[test]
    fn keeps_non_preset_ram_size() {
        let prefs = Prefs::parse("ramsize 100000000\n");
        let c = CpuMemory::load(&prefs, Emulator::SheepShaver);
        assert_eq!(c.ram_size, 100_000_000);
        assert_eq!(c.ram_label(), None);
    }

    #[test]
    fn sheepshaver_clock() {
        let prefs = Prefs::parse("cpuclock 20000\njit68k true\njit false\n");
        let c = CpuMemory::load(&prefs, Emulator::SheepShaver);
        assert_eq!(c.cpu_clock, 10000);
        assert!(c.jit_68k);
        assert!(!c.jit);
    }
}
