use super::{read_flag, read_ranged, read_text, Section};
use crate::emulator::Emulator;
use crate::prefs::Prefs;

/// Common `ether` values offered by the editor. Any other text is accepted.
pub const ETHER_SUGGESTIONS: [&str; 4] = ["slirp", "none", "tap", "sheep_net"];

#[derive(Debug, Clone, PartialEq)]
pub struct Network {
    pub ether: String,
    /// Basilisk II only
    pub udp_tunnel: bool,
    /// Basilisk II only
    pub udp_port: u16,
    /// SheepShaver only
    pub no_net: bool,
}

impl Section for Network {
    const TITLE: &'static str = "Network";

    fn load(prefs: &Prefs, emulator: Emulator) -> Self {
        let mut network = Self {
            ether: read_text(prefs, "ether", "slirp"),
            udp_tunnel: false,
            udp_port: 6066,
            no_net: false,
        };
        if emulator.is_basilisk() {
            network.udp_tunnel = read_flag(prefs, "udptunnel", false);
            network.udp_port = read_ranged(prefs, "udpport", 1..=65535, 6066);
        } else {
            network.no_net = read_flag(prefs, "nonet", false);
        }
        network
    }

    fn store(&self, prefs: &mut Prefs, emulator: Emulator) {
        prefs.set_text("ether", &self.ether);
        if emulator.is_basilisk() {
            prefs.set_flag("udptunnel", self.udp_tunnel);
            prefs.set_int("udpport", self.udp_port.into());
        } else {
            prefs.set_flag("nonet", self.no_net);
        }
    }
}
