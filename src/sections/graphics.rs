use super::{read_flag, read_ranged, Section};
use crate::emulator::Emulator;
use crate::prefs::Prefs;

pub const COLOR_DEPTHS: [u8; 5] = [0, 8, 16, 24, 32];

const WIDTH_RANGE: std::ops::RangeInclusive<u32> = 320..=3840;
const HEIGHT_RANGE: std::ops::RangeInclusive<u32> = 240..=2160;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScreenMode {
    #[default]
    Window,
    Dga,
    Fullscreen,
}

impl ScreenMode {
    pub const ALL: [ScreenMode; 3] = [ScreenMode::Window, ScreenMode::Dga, ScreenMode::Fullscreen];

    pub fn as_str(self) -> &'static str {
        match self {
            ScreenMode::Window => "win",
            ScreenMode::Dga => "dga",
            ScreenMode::Fullscreen => "full",
        }
    }

    pub fn from_pref(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.as_str() == s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SdlRenderer {
    #[default]
    Software,
    OpenGl,
    OpenGlEs,
    OpenGlEs2,
    Metal,
}

impl SdlRenderer {
    pub const ALL: [SdlRenderer; 5] = [
        SdlRenderer::Software,
        SdlRenderer::OpenGl,
        SdlRenderer::OpenGlEs,
        SdlRenderer::OpenGlEs2,
        SdlRenderer::Metal,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SdlRenderer::Software => "software",
            SdlRenderer::OpenGl => "opengl",
            SdlRenderer::OpenGlEs => "opengles",
            SdlRenderer::OpenGlEs2 => "opengles2",
            SdlRenderer::Metal => "metal",
        }
    }

    pub fn from_pref(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.as_str() == s)
    }
}

/// Display, scaling and renderer options
#[derive(Debug, Clone, PartialEq)]
pub struct Graphics {
    pub mode: ScreenMode,
    pub width: u32,
    pub height: u32,
    /// Bits per pixel, 0 lets the emulator choose
    pub color_depth: u8,
    pub frame_skip: u8,
    /// SheepShaver only
    pub gfx_accel: bool,
    pub scale_nearest: bool,
    pub scale_integer: bool,
    pub mag_rate: f64,
    pub renderer: SdlRenderer,
}

impl Graphics {
    /// The `screen` value, e.g. `win/800/600`
    pub fn screen_spec(&self) -> String {
        format!("{}/{}/{}", self.mode.as_str(), self.width, self.height)
    }

    /// Apply a `screen` value. Anything that is not `mode/width/height`
    /// leaves the current values alone.
    fn apply_screen_spec(&mut self, spec: &str) {
        let parts: Vec<&str> = spec.split('/').collect();
        if parts.len() < 3 {
            return;
        }
        let (Ok(width), Ok(height)) = (parts[1].trim().parse::<u32>(), parts[2].trim().parse::<u32>())
        else {
            return;
        };
        if let Some(mode) = ScreenMode::from_pref(parts[0]) {
            self.mode = mode;
        }
        self.width = width.clamp(*WIDTH_RANGE.start(), *WIDTH_RANGE.end());
        self.height = height.clamp(*HEIGHT_RANGE.start(), *HEIGHT_RANGE.end());
    }
}

fn round_mag_rate(rate: f64) -> f64 {
    (rate.clamp(0.0, 4.0) * 100.0).round() / 100.0
}

impl Section for Graphics {
    const TITLE: &'static str = "Graphics";

    fn load(prefs: &Prefs, emulator: Emulator) -> Self {
        let mut graphics = Self {
            mode: ScreenMode::Window,
            width: 800,
            height: 600,
            color_depth: 0,
            frame_skip: read_ranged(prefs, "frameskip", 0..=60, 0),
            gfx_accel: emulator.is_sheepshaver() && read_flag(prefs, "gfxaccel", false),
            scale_nearest: read_flag(prefs, "scale_nearest", false),
            scale_integer: read_flag(prefs, "scale_integer", false),
            mag_rate: prefs
                .float("mag_rate")
                .filter(|r| r.is_finite())
                .map(round_mag_rate)
                .unwrap_or(1.0),
            renderer: prefs
                .raw("sdlrender")
                .and_then(SdlRenderer::from_pref)
                .unwrap_or_default(),
        };
        if let Some(spec) = prefs.raw("screen") {
            graphics.apply_screen_spec(spec);
        }
        if let Some(depth) = prefs.int("displaycolordepth") {
            if let Some(depth) = COLOR_DEPTHS.into_iter().find(|d| i64::from(*d) == depth) {
                graphics.color_depth = depth;
            }
        }
        graphics
    }

    fn store(&self, prefs: &mut Prefs, emulator: Emulator) {
        prefs.set_text("screen", &self.screen_spec());
        prefs.set_int("displaycolordepth", self.color_depth.into());
        prefs.set_int("frameskip", self.frame_skip.into());
        if emulator.is_sheepshaver() {
            prefs.set_flag("gfxaccel", self.gfx_accel);
        }
        prefs.set_flag("scale_nearest", self.scale_nearest);
        prefs.set_flag("scale_integer", self.scale_integer);
        prefs.set_float("mag_rate", round_mag_rate(self.mag_rate));
        prefs.set_text("sdlrender", self.renderer.as_str());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let g = Graphics::defaults(Emulator::BasiliskII);
        assert_eq!(g.screen_spec(), "win/800/600");
        assert_eq!(g.color_depth, 0);
        assert_eq!(g.mag_rate, 1.0);
        assert_eq!(g.renderer, SdlRenderer::Software);
    }

    #[test]
    fn parses_screen_and_clamps() {
        let prefs = Prefs::parse("screen full/8000/100\ndisplaycolordepth 16\nmag_rate 9.5\n");
        let g = Graphics::load(&prefs, Emulator::SheepShaver);
        assert_eq!(g.mode, ScreenMode::Fullscreen);
        assert_eq!((g.width, g.height), (3840, 240));
        assert_eq!(g.color_depth, 16);
        assert_eq!(g.mag_rate, 4.0);
    }

    #[test]
    fn malformed_values_keep_defaults() {
        let prefs = Prefs::parse("screen win/wide/600\ndisplaycolordepth 15\nsdlrender vulkan\n");
        let g = Graphics::load(&prefs, Emulator::BasiliskII);
        assert_eq!(g.screen_spec(), "win/800/600");
        assert_eq!(g.color_depth, 0);
        assert_eq!(g.renderer, SdlRenderer::Software);
    }

    #[test]
    fn tolerates_misspelt_flags() {
        let prefs = Prefs::parse("scale_nearest ture\nscale_integer TRUE\n");
        let g = Graphics::load(&prefs, Emulator::BasiliskII);
        assert!(g.scale_nearest);
        assert!(g.scale_integer);

        let mut out = Prefs::new();
        g.store(&mut out, Emulator::BasiliskII);
        assert_eq!(out.raw("scale_nearest"), Some("true"));
    }

    #[test]
    fn gfx_accel_is_sheepshaver_only() {
        let prefs = Prefs::parse("gfxaccel true\n");
        assert!(!Graphics::load(&prefs, Emulator::BasiliskII).gfx_accel);
        assert!(Graphics::load(&prefs, Emulator::SheepShaver).gfx_accel);
    }
}
