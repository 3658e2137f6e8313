//! Reading and writing emulator preferences files.
//!
//! Both emulators store their settings as plain text, one `key value` pair per
//! line. The `disk` key may appear several times (one line per mounted disk
//! image); every other key holds a single value. Keys this crate does not know
//! about are kept as-is so that saving never drops settings.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Key of the multi-valued disk image entries
pub const DISK_KEY: &str = "disk";

#[derive(Error, Debug)]
pub enum PrefsError {
    #[error("Failed to read preferences file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to write preferences file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Invalid preference key {0:?}: keys are a single word")]
    InvalidKey(String),
    #[error("Value for {key} must fit on one line")]
    MultiLineValue { key: String },
}

/// A loosely typed preference value, classified from its raw text
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl Value {
    /// Classify raw text: booleans first, then plain digit strings, then
    /// anything float-like, else text.
    pub fn classify(raw: &str) -> Value {
        if raw.eq_ignore_ascii_case("true") {
            return Value::Bool(true);
        }
        if raw.eq_ignore_ascii_case("false") {
            return Value::Bool(false);
        }
        if !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(n) = raw.parse::<i64>() {
                return Value::Int(n);
            }
        }
        match raw.parse::<f64>() {
            Ok(f) => Value::Float(f),
            Err(_) => Value::Text(raw.to_string()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => f.write_str(if *b { "true" } else { "false" }),
            Value::Int(n) => write!(f, "{}", n),
            Value::Float(x) => f.write_str(&format_float(*x)),
            Value::Text(s) => f.write_str(s),
        }
    }
}

/// Read a flag leniently. Accepts the `ture` misspelling that some hand
/// edited files carry, and non-zero integers.
pub fn parse_flag(raw: &str) -> Option<bool> {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("true") || raw.eq_ignore_ascii_case("ture") {
        Some(true)
    } else if raw.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        parse_int(raw).map(|n| n != 0)
    }
}

/// Read an integer, also accepting integral floats such as `-5.0`.
pub fn parse_int(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if let Ok(n) = raw.parse::<i64>() {
        return Some(n);
    }
    match raw.parse::<f64>() {
        Ok(f) if f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64 => Some(f as i64),
        _ => None,
    }
}

/// Check that `key value` can be written as one line and read back as the
/// same pair.
pub fn check_entry(key: &str, value: &str) -> Result<(), PrefsError> {
    if key.is_empty() || key.chars().any(char::is_whitespace) {
        return Err(PrefsError::InvalidKey(key.to_string()));
    }
    if value.contains(['\n', '\r']) {
        return Err(PrefsError::MultiLineValue { key: key.to_string() });
    }
    Ok(())
}

/// Fold a value onto a single line without surrounding whitespace, which is
/// the only form that survives a save and reload.
fn clean_value(value: String) -> String {
    if value.contains(['\n', '\r']) {
        return value
            .split(['\n', '\r'])
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
    }
    if value.trim().len() == value.len() {
        value
    } else {
        value.trim().to_string()
    }
}

fn format_float(x: f64) -> String {
    if x.is_finite() && x.fract() == 0.0 {
        format!("{:.1}", x)
    } else {
        format!("{}", x)
    }
}

/// The contents of one preferences file, in file order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Prefs {
    disks: Vec<String>,
    entries: Vec<(String, String)>,
}

impl Prefs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse preferences text. Never fails: malformed lines simply become
    /// keys with odd values.
    pub fn parse(text: &str) -> Self {
        let mut prefs = Self::new();
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let (key, value) = match line.split_once(' ') {
                Some((key, value)) => (key, value),
                None => (line, ""),
            };
            prefs.set_raw(key, value);
        }
        prefs
    }

    /// Load a preferences file. A file that does not exist yet is treated as
    /// empty.
    pub fn load(path: &Path) -> Result<Self, PrefsError> {
        match fs::read_to_string(path) {
            Ok(text) => {
                let prefs = Self::parse(&text);
                log::info!(
                    "Loaded {} settings and {} disks from {}",
                    prefs.entries.len(),
                    prefs.disks.len(),
                    path.display()
                );
                Ok(prefs)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::info!("Preferences file {} does not exist yet", path.display());
                Ok(Self::new())
            }
            Err(source) => Err(PrefsError::Read {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Write the preferences file, creating parent directories as needed
    pub fn save(&self, path: &Path) -> Result<(), PrefsError> {
        let write_err = |source| PrefsError::Write {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(write_err)?;
            }
        }
        fs::write(path, self.to_string()).map_err(write_err)?;
        log::info!("Saved preferences to {}", path.display());
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.disks.is_empty() && self.entries.is_empty()
    }

    /// Keys of the single-valued entries, in file order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn contains(&self, key: &str) -> bool {
        if key == DISK_KEY {
            return !self.disks.is_empty();
        }
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// Raw text of a single-valued key. Disks are only reachable through
    /// [`Prefs::disks`].
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn value(&self, key: &str) -> Option<Value> {
        self.raw(key).map(Value::classify)
    }

    pub fn flag(&self, key: &str) -> Option<bool> {
        self.raw(key).and_then(parse_flag)
    }

    pub fn int(&self, key: &str) -> Option<i64> {
        self.raw(key).and_then(parse_int)
    }

    pub fn float(&self, key: &str) -> Option<f64> {
        self.raw(key).and_then(|raw| raw.trim().parse::<f64>().ok())
    }

    /// Set a raw value. Setting `disk` appends a disk image, mirroring how the
    /// file itself is read. Line breaks in `value` are folded into spaces.
    pub fn set_raw(&mut self, key: &str, value: impl Into<String>) {
        let value = clean_value(value.into());
        if key == DISK_KEY {
            self.disks.push(value);
            return;
        }
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some((_, v)) => *v = value,
            None => self.entries.push((key.to_string(), value)),
        }
    }

    /// Like [`Prefs::set_raw`], but rejects input that would not read back
    /// as the same entry. Used for keys and values typed by the user.
    pub fn try_set(&mut self, key: &str, value: &str) -> Result<(), PrefsError> {
        check_entry(key, value)?;
        self.set_raw(key, value);
        Ok(())
    }

    pub fn set_value(&mut self, key: &str, value: &Value) {
        self.set_raw(key, value.to_string());
    }

    pub fn set_text(&mut self, key: &str, value: &str) {
        self.set_raw(key, value);
    }

    pub fn set_flag(&mut self, key: &str, value: bool) {
        self.set_value(key, &Value::Bool(value));
    }

    pub fn set_int(&mut self, key: &str, value: i64) {
        self.set_value(key, &Value::Int(value));
    }

    pub fn set_float(&mut self, key: &str, value: f64) {
        self.set_value(key, &Value::Float(value));
    }

    /// Remove a key. Removing `disk` clears the disk list.
    pub fn remove(&mut self, key: &str) -> bool {
        if key == DISK_KEY {
            let had = !self.disks.is_empty();
            self.disks.clear();
            return had;
        }
        let before = self.entries.len();
        self.entries.retain(|(k, _)| k != key);
        self.entries.len() != before
    }

    pub fn disks(&self) -> &[String] {
        &self.disks
    }

    pub fn set_disks(&mut self, disks: Vec<String>) {
        self.disks = disks.into_iter().map(clean_value).collect();
    }
}

impl fmt::Display for Prefs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for disk in &self.disks {
            writeln!(f, "{} {}", DISK_KEY, disk)?;
        }
        for (key, value) in &self.entries {
            writeln!(f, "{} {}", key, value)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
rom /mac/Quadra.ROM
disk /mac/System7.dsk

disk /mac/Apps.hfv
screen win/800/600
  ramsize 67108864
nocdrom false
scale_nearest ture
mag_rate 1.5
yearofs -5
extfs
sdlrender opengl
";

    #[test]
    fn collects_disks_in_order() {
        let prefs = Prefs::parse(SAMPLE);
        assert_eq!(prefs.disks(), ["/mac/System7.dsk", "/mac/Apps.hfv"]);
        assert!(!prefs.keys().any(|k| k == DISK_KEY));
    }

    #[test]
    fn classifies_values() {
        let prefs = Prefs::parse(SAMPLE);
        assert_eq!(prefs.value("ramsize"), Some(Value::Int(67108864)));
        assert_eq!(prefs.value("nocdrom"), Some(Value::Bool(false)));
        assert_eq!(prefs.value("mag_rate"), Some(Value::Float(1.5)));
        assert_eq!(prefs.value("yearofs"), Some(Value::Float(-5.0)));
        assert_eq!(prefs.value("screen"), Some(Value::Text("win/800/600".into())));
        assert_eq!(prefs.raw("extfs"), Some(""));
    }

    #[test]
    fn lenient_flags_and_ints() {
        let prefs = Prefs::parse(SAMPLE);
        assert_eq!(prefs.flag("scale_nearest"), Some(true));
        assert_eq!(prefs.flag("screen"), None);
        assert_eq!(prefs.int("yearofs"), Some(-5));
        assert_eq!(parse_int("-5.0"), Some(-5));
        assert_eq!(parse_int("1.5"), None);
        assert_eq!(parse_flag("1"), Some(true));
        assert_eq!(parse_flag("0"), Some(false));
    }

    #[test]
    fn last_duplicate_wins_at_first_position() {
        let prefs = Prefs::parse("a 1\nb 2\na 3\n");
        assert_eq!(prefs.raw("a"), Some("3"));
        assert_eq!(prefs.keys().collect::<Vec<_>>(), ["a", "b"]);
    }

    #[test]
    fn writes_disks_first_and_keeps_unknown_keys() {
        let mut prefs = Prefs::parse("frobnicate 42\ndisk /a.img\nnogui true\n");
        prefs.set_flag("nocdrom", true);
        prefs.set_text("extfs", "");
        assert_eq!(
            prefs.to_string(),
            "disk /a.img\nfrobnicate 42\nnogui true\nnocdrom true\nextfs \n"
        );
    }

    #[test]
    fn floats_keep_a_decimal() {
        let mut prefs = Prefs::new();
        prefs.set_float("mag_rate", 2.0);
        prefs.set_float("other", 1.25);
        assert_eq!(prefs.raw("mag_rate"), Some("2.0"));
        assert_eq!(prefs.raw("other"), Some("1.25"));
    }

    #[test]
    fn stored_values_read_back_unchanged() {
        let mut prefs = Prefs::new();
        prefs.set_text("rom", "/a.rom\nnogui false");
        prefs.set_text("extfs", "  /shared  ");
        prefs.set_disks(vec!["/b.dsk\r\n".to_string()]);
        assert_eq!(prefs.raw("rom"), Some("/a.rom nogui false"));
        assert_eq!(prefs.raw("extfs"), Some("/shared"));

        let reloaded = Prefs::parse(&prefs.to_string());
        assert_eq!(reloaded, prefs);
        assert!(!reloaded.contains("nogui"));
    }

    #[test]
    fn rejects_entries_that_break_the_format() {
        let mut prefs = Prefs::new();
        assert!(matches!(prefs.try_set("bad key", "v"), Err(PrefsError::InvalidKey(_))));
        assert!(matches!(prefs.try_set("", "v"), Err(PrefsError::InvalidKey(_))));
        assert!(matches!(
            prefs.try_set("rom", "/a.rom\nnogui false"),
            Err(PrefsError::MultiLineValue { .. })
        ));
        assert!(prefs.is_empty());

        prefs.try_set("rom", "/Users/mac/Quadra 650.rom").unwrap();
        assert_eq!(Prefs::parse(&prefs.to_string()).raw("rom"), Some("/Users/mac/Quadra 650.rom"));
    }

    #[test]
    fn remove_keys_and_disks() {
        let mut prefs = Prefs::parse(SAMPLE);
        assert!(prefs.remove("rom"));
        assert!(!prefs.remove("rom"));
        assert!(prefs.remove(DISK_KEY));
        assert!(prefs.disks().is_empty());
        assert!(!prefs.contains("rom"));
    }
}
