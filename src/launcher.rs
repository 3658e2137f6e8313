//! Starting the emulators
//!
//! The current settings are written to the preferences file first, then the
//! emulator is started detached with `--config <prefs>` so that it outlives
//! the editor.

use crate::emulator::Emulator;
use crate::prefs::{Prefs, PrefsError};
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Child, Command};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LaunchError {
    #[error("Please set the {0} executable path in Settings")]
    ExecutableNotSet(Emulator),
    #[error("Executable not found: {}", .0.display())]
    ExecutableNotFound(PathBuf),
    #[error("Could not save settings before launch: {0}")]
    Save(#[from] PrefsError),
    #[error("Failed to start {}: {source}", .path.display())]
    Spawn {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Everything needed to start one emulator
#[derive(Debug, Clone)]
pub struct Launch {
    pub emulator: Emulator,
    pub executable: Option<PathBuf>,
    pub prefs_path: Option<PathBuf>,
}

impl Launch {
    pub fn new(emulator: Emulator, executable: Option<PathBuf>, prefs_path: Option<PathBuf>) -> Self {
        Self {
            emulator,
            executable,
            prefs_path,
        }
    }

    /// Check the executable and return the path of the binary to run
    pub fn resolve_executable(&self) -> Result<PathBuf, LaunchError> {
        let exe = self
            .executable
            .as_ref()
            .filter(|p| !p.as_os_str().is_empty())
            .ok_or(LaunchError::ExecutableNotSet(self.emulator))?;
        if !exe.exists() {
            return Err(LaunchError::ExecutableNotFound(exe.clone()));
        }
        Ok(bundle_binary(exe).unwrap_or_else(|| exe.clone()))
    }

    /// Build the command line without running it
    pub fn command(&self) -> Result<Command, LaunchError> {
        let exe = self.resolve_executable()?;
        // Runs in our working directory so relative prefs paths name the saved file
        let mut cmd = Command::new(&exe);
        if let Some(prefs) = &self.prefs_path {
            cmd.arg("--config").arg(prefs);
        }
        detach(&mut cmd);
        Ok(cmd)
    }

    /// Save `prefs` (when a preferences path is set) and start the emulator
    pub fn run(&self, prefs: &Prefs) -> Result<Child, LaunchError> {
        let exe = self.resolve_executable()?;
        if let Some(path) = &self.prefs_path {
            prefs.save(path)?;
        }
        let mut cmd = self.command()?;
        log::info!("Launching {}: {:?}", self.emulator, cmd);
        let child = cmd.spawn().map_err(|source| LaunchError::Spawn { path: exe, source })?;
        log::info!("{} started with pid {}", self.emulator, child.id());
        Ok(child)
    }
}

/// For a macOS `.app` bundle, the binary inside `Contents/MacOS`
fn bundle_binary(path: &Path) -> Option<PathBuf> {
    if !path.is_dir() || path.extension().map_or(true, |ext| ext != "app") {
        return None;
    }
    let macos = path.join("Contents").join("MacOS");
    if let Some(stem) = path.file_stem() {
        let named = macos.join(stem);
        if named.is_file() {
            return Some(named);
        }
    }
    let mut entries: Vec<PathBuf> = std::fs::read_dir(&macos)
        .ok()?
        .filter_map(|e| e.ok().map(|e| e.path()))
        .filter(|p| p.is_file())
        .collect();
    entries.sort();
    entries.into_iter().next()
}

#[cfg(unix)]
fn detach(cmd: &mut Command) {
    use std::os::unix::process::CommandExt;
    cmd.process_group(0);
}

#[cfg(windows)]
fn detach(cmd: &mut Command) {
    use std::os::windows::process::CommandExt;
    const DETACHED_PROCESS: u32 = 0x0000_0008;
    const CREATE_NEW_PROCESS_GROUP: u32 = 0x0000_0200;
    cmd.creation_flags(DETACHED_PROCESS | CREATE_NEW_PROCESS_GROUP);
}

#[cfg(not(any(unix, windows)))]
fn detach(_cmd: &mut Command) {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsStr;
    use tempfile::TempDir;

    #[test]
    fn unset_executable_is_reported() {
        let launch = Launch::new(Emulator::SheepShaver, None, None);
        assert!(matches!(
            launch.resolve_executable(),
            Err(LaunchError::ExecutableNotSet(Emulator::SheepShaver))
        ));
        let launch = Launch::new(Emulator::SheepShaver, Some(PathBuf::new()), None);
        assert!(matches!(
            launch.resolve_executable(),
            Err(LaunchError::ExecutableNotSet(_))
        ));
    }

    #[test]
    fn missing_executable_does_not_touch_prefs() {
        let dir = TempDir::new().unwrap();
        let prefs_path = dir.path().join("prefs");
        let launch = Launch::new(
            Emulator::BasiliskII,
            Some(dir.path().join("nope")),
            Some(prefs_path.clone()),
        );
        let err = launch.run(&Prefs::parse("rom x\n")).unwrap_err();
        assert!(matches!(err, LaunchError::ExecutableNotFound(_)));
        assert!(!prefs_path.exists());
    }

    #[test]
    fn passes_config_argument() {
        let dir = TempDir::new().unwrap();
        let exe = dir.path().join("BasiliskII");
        std::fs::write(&exe, b"").unwrap();
        let prefs_path = dir.path().join(".basilisk_ii_prefs");

        let launch = Launch::new(Emulator::BasiliskII, Some(exe.clone()), Some(prefs_path.clone()));
        let cmd = launch.command().unwrap();
        assert_eq!(cmd.get_program(), exe.as_os_str());
        let args: Vec<&OsStr> = cmd.get_args().collect();
        assert_eq!(args, [OsStr::new("--config"), prefs_path.as_os_str()]);

        // Relative paths must resolve the same way for the editor and the child
        assert_eq!(cmd.get_current_dir(), None);

        let bare = Launch::new(Emulator::BasiliskII, Some(exe), None);
        assert_eq!(bare.command().unwrap().get_args().count(), 0);
    }

    #[test]
    fn resolves_app_bundles() {
        let dir = TempDir::new().unwrap();
        let bundle = dir.path().join("SheepShaver.app");
        let macos = bundle.join("Contents").join("MacOS");
        std::fs::create_dir_all(&macos).unwrap();
        std::fs::write(macos.join("SheepShaver"), b"").unwrap();

        let launch = Launch::new(Emulator::SheepShaver, Some(bundle), None);
        assert_eq!(launch.resolve_executable().unwrap(), macos.join("SheepShaver"));
    }
}
