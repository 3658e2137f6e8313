//! Launching with relative paths. Kept in its own test binary because it
//! changes the process working directory.
#![cfg(unix)]

use emuprefs::{Emulator, EmulatorSettings, Launch, Prefs};
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
fn relative_paths_reach_the_emulator() {
    let dir = TempDir::new().unwrap();
    std::env::set_current_dir(dir.path()).unwrap();

    // The fake emulator copies whatever file --config names
    let seen = dir.path().join("seen.txt");
    fs::create_dir("bin").unwrap();
    fs::write(
        "bin/BasiliskII",
        format!("#!/bin/sh\ncat \"$2\" > '{}'\n", seen.display()),
    )
    .unwrap();
    fs::set_permissions("bin/BasiliskII", fs::Permissions::from_mode(0o755)).unwrap();

    let mut settings = EmulatorSettings::defaults(Emulator::BasiliskII);
    settings.drives.add_disk("/disks/boot.dsk");
    let prefs = settings.to_prefs(&Prefs::new());

    let launch = Launch::new(
        Emulator::BasiliskII,
        Some(PathBuf::from("bin/BasiliskII")),
        Some(PathBuf::from("prefs.txt")),
    );
    let mut child = launch.run(&prefs).unwrap();
    assert!(child.wait().unwrap().success());

    let saved = fs::read_to_string(dir.path().join("prefs.txt")).unwrap();
    assert_eq!(saved, prefs.to_string());
    assert_eq!(fs::read_to_string(&seen).unwrap(), saved);
}
