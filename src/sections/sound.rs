use super::{read_flag, read_ranged, read_text, Section};
use crate::emulator::Emulator;
use crate::prefs::Prefs;

#[derive(Debug, Clone, PartialEq)]
pub struct Sound {
    pub no_sound: bool,
    pub buffer: u32,
    pub dsp: String,
    pub mixer: String,
}

impl Section for Sound {
    const TITLE: &'static str = "Sound";

    fn load(prefs: &Prefs, _emulator: Emulator) -> Self {
        Self {
            no_sound: read_flag(prefs, "nosound", false),
            buffer: read_ranged(prefs, "sound_buffer", 0..=65536, 0),
            dsp: read_text(prefs, "dsp", "/dev/dsp"),
            mixer: read_text(prefs, "mixer", "/dev/mixer"),
        }
    }

    fn store(&self, prefs: &mut Prefs, _emulator: Emulator) {
        prefs.set_flag("nosound", self.no_sound);
        prefs.set_int("sound_buffer", self.buffer.into());
        prefs.set_text("dsp", &self.dsp);
        prefs.set_text("mixer", &self.mixer);
    }
}
