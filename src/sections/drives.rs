use super::{read_flag, read_ranged, read_text, Section};
use crate::emulator::Emulator;
use crate::prefs::Prefs;

/// Disk images and storage options
#[derive(Debug, Clone, PartialEq)]
pub struct Drives {
    /// Mounted disk images, in boot search order
    pub disks: Vec<String>,
    /// Host directory shared with the guest
    pub extfs: String,
    pub rom: String,
    pub boot_drive: u8,
    pub boot_driver: u8,
    pub no_cdrom: bool,
}

impl Drives {
    pub fn add_disk(&mut self, path: impl Into<String>) {
        self.disks.push(path.into());
    }

    pub fn remove_disk(&mut self, index: usize) -> Option<String> {
        (index < self.disks.len()).then(|| self.disks.remove(index))
    }

    /// Move a disk one slot earlier. Returns its new index.
    pub fn move_disk_up(&mut self, index: usize) -> Option<usize> {
        if index == 0 || index >= self.disks.len() {
            return None;
        }
        self.disks.swap(index, index - 1);
        Some(index - 1)
    }

    /// Move a disk one slot later. Returns its new index.
    pub fn move_disk_down(&mut self, index: usize) -> Option<usize> {
        if index + 1 >= self.disks.len() {
            return None;
        }
        self.disks.swap(index, index + 1);
        Some(index + 1)
    }
}

impl Section for Drives {
    const TITLE: &'static str = "Drives";

    fn load(prefs: &Prefs, _emulator: Emulator) -> Self {
        Self {
            disks: prefs.disks().to_vec(),
            extfs: read_text(prefs, "extfs", ""),
            rom: read_text(prefs, "rom", ""),
            boot_drive: read_ranged(prefs, "bootdrive", 0..=255, 0),
            boot_driver: read_ranged(prefs, "bootdriver", 0..=255, 0),
            no_cdrom: read_flag(prefs, "nocdrom", false),
        }
    }

    fn store(&self, prefs: &mut Prefs, _emulator: Emulator) {
        prefs.set_disks(self.disks.clone());
        prefs.set_text("extfs", &self.extfs);
        prefs.set_text("rom", &self.rom);
        prefs.set_int("bootdrive", self.boot_drive.into());
        prefs.set_int("bootdriver", self.boot_driver.into());
        prefs.set_flag("nocdrom", self.no_cdrom);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drives(disks: &[&str]) -> Drives {
        let mut d = Drives::defaults(Emulator::BasiliskII);
        d.disks = disks.iter().map(|s| s.to_string()).collect();
        d
    }

    #[test]
    fn reorders_disks() {
        let mut d = drives(&["a", "b", "c"]);
        assert_eq!(d.move_disk_up(2), Some(1));
        assert_eq!(d.disks, ["a", "c", "b"]);
        assert_eq!(d.move_disk_down(0), Some(1));
        assert_eq!(d.disks, ["c", "a", "b"]);
    }

    #[test]
    fn ignores_out_of_range_moves() {
        let mut d = drives(&["a", "b"]);
        assert_eq!(d.move_disk_up(0), None);
        assert_eq!(d.move_disk_down(1), None);
        assert_eq!(d.move_disk_up(5), None);
        assert_eq!(d.remove_disk(2), None);
        assert_eq!(d.disks, ["a", "b"]);
        assert_eq!(d.remove_disk(0).as_deref(), Some("a"));
        assert_eq!(d.disks, ["b"]);
    }

    #[test]
    fn round_trips_storage_options() {
        let prefs = Prefs::parse("disk /x.dsk\nrom /q.rom\nbootdriver 999\nnocdrom true\n");
        let d = Drives::load(&prefs, Emulator::BasiliskII);
        assert_eq!(d.disks, ["/x.dsk"]);
        assert_eq!(d.rom, "/q.rom");
        assert_eq!(d.boot_driver, 255);
        assert!(d.no_cdrom);

        let mut out = Prefs::new();
        d.store(&mut out, Emulator::BasiliskII);
        assert_eq!(out.disks(), ["/x.dsk"]);
        assert_eq!(out.raw("bootdriver"), Some("255"));
        assert_eq!(out.raw("extfs"), Some(""));
    }
}
