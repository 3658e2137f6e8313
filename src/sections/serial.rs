use super::{read_text, Section};
use crate::emulator::Emulator;
use crate::prefs::Prefs;

/// Host devices behind the modem and printer ports
#[derive(Debug, Clone, PartialEq)]
pub struct Serial {
    pub serial_a: String,
    pub serial_b: String,
}

impl Section for Serial {
    const TITLE: &'static str = "Serial";

    fn load(prefs: &Prefs, _emulator: Emulator) -> Self {
        Self {
            serial_a: read_text(prefs, "seriala", "/dev/ttyS0"),
            serial_b: read_text(prefs, "serialb", "/dev/ttyS1"),
        }
    }

    fn store(&self, prefs: &mut Prefs, _emulator: Emulator) {
        prefs.set_text("seriala", &self.serial_a);
        prefs.set_text("serialb", &self.serial_b);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let serial = Serial::defaults(Emulator::SheepShaver);
        assert_eq!(serial.serial_a, "/dev/ttyS0");
        assert_eq!(serial.serial_b, "/dev/ttyS1");
    }

    #[test]
    fn keeps_device_paths_with_spaces() {
        let prefs = Prefs::parse("seriala /dev/cu.Bluetooth Modem\nserialb /dev/null\n");
        let serial = Serial::load(&prefs, Emulator::BasiliskII);
        assert_eq!(serial.serial_a, "/dev/cu.Bluetooth Modem");

        let mut out = Prefs::new();
        serial.store(&mut out, Emulator::BasiliskII);
        assert_eq!(out.to_string(), "seriala /dev/cu.Bluetooth Modem\nserialb /dev/null\n");
    }
}
