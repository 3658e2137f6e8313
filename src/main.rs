use clap::{Parser, Subcommand};
use emuprefs::config::Config;
use emuprefs::sections::Section;
use emuprefs::ui::PrefsApp;
use emuprefs::{Emulator, EmulatorSettings, Prefs};
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "emuprefs")]
#[command(about = "Preferences editor for the Basilisk II and SheepShaver emulators")]
struct Args {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    /// Also write the log to emuprefs.log in the config directory
    #[arg(long, global = true)]
    log_file: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Open the preferences editor window (default)
    Gui,
    /// Print the effective settings of an emulator
    Show {
        emulator: Emulator,
        /// Print the raw preferences as JSON instead
        #[arg(long)]
        json: bool,
        #[arg(long)]
        prefs: Option<PathBuf>,
    },
    /// Print the raw value of one key
    Get {
        emulator: Emulator,
        key: String,
        #[arg(long)]
        prefs: Option<PathBuf>,
    },
    /// Set one key and save
    Set {
        emulator: Emulator,
        key: String,
        value: String,
        #[arg(long)]
        prefs: Option<PathBuf>,
    },
    /// Remove one key and save
    Unset {
        emulator: Emulator,
        key: String,
        #[arg(long)]
        prefs: Option<PathBuf>,
    },
    /// Manage the disk image list
    Disk {
        emulator: Emulator,
        #[command(subcommand)]
        action: DiskAction,
        #[arg(long)]
        prefs: Option<PathBuf>,
    },
    /// Save the current settings and start the emulator
    Launch { emulator: Emulator },
    /// Show the configured executable and preferences paths
    Paths,
    /// Change the executable or preferences path of an emulator
    Configure {
        emulator: Emulator,
        #[arg(long)]
        exe: Option<PathBuf>,
        #[arg(long)]
        prefs: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum DiskAction {
    List,
    Add { path: String },
    Remove { index: usize },
    Up { index: usize },
    Down { index: usize },
}

type CliResult = Result<(), Box<dyn std::error::Error>>;

/// A writer that writes to both stderr and a file
struct DualWriter {
    file: File,
}

impl DualWriter {
    fn new(file: File) -> Self {
        Self { file }
    }
}

impl Write for DualWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        io::stderr().write_all(buf)?;
        self.file.write_all(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stderr().flush()?;
        self.file.flush()
    }
}

/// Logger with the `--debug` level, overridden by `RUST_LOG` filters
fn log_builder(debug: bool, rust_log: Option<&str>) -> env_logger::Builder {
    let log_level = if debug {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    let mut builder = env_logger::Builder::new();
    builder.filter_level(log_level);
    if let Some(filters) = rust_log {
        builder.parse_filters(filters);
    }
    builder
}

fn init_logging(args: &Args) {
    let rust_log = std::env::var("RUST_LOG").ok();
    let mut builder = log_builder(args.debug, rust_log.as_deref());

    if args.log_file {
        let log_path = Config::config_dir().join("emuprefs.log");
        match File::create(&log_path) {
            Ok(file) => {
                builder.target(env_logger::Target::Pipe(Box::new(DualWriter::new(file))));
            }
            Err(e) => eprintln!("Warning: Could not create log file {}: {}", log_path.display(), e),
        }
    }

    builder.init();
}

/// Preferences path from `--prefs`, else the configured/default one
fn prefs_path(config: &Config, emulator: Emulator, override_path: Option<PathBuf>) -> Result<PathBuf, String> {
    override_path
        .or_else(|| config.prefs_path(emulator))
        .ok_or_else(|| format!("No preferences path for {}; pass --prefs", emulator))
}

fn show(emulator: Emulator, path: PathBuf, json: bool) -> CliResult {
    let prefs = Prefs::load(&path)?;
    if json {
        let map: serde_json::Map<String, serde_json::Value> = std::iter::once((
            "disk".to_string(),
            serde_json::Value::from(prefs.disks().to_vec()),
        ))
        .chain(prefs.keys().map(|k| {
            let value = match prefs.value(k) {
                Some(emuprefs::Value::Bool(b)) => serde_json::Value::from(b),
                Some(emuprefs::Value::Int(n)) => serde_json::Value::from(n),
                Some(emuprefs::Value::Float(f)) => serde_json::Value::from(f),
                Some(emuprefs::Value::Text(s)) => serde_json::Value::from(s),
                None => serde_json::Value::Null,
            };
            (k.to_string(), value)
        }))
        .collect();
        println!("{}", serde_json::to_string_pretty(&map)?);
        return Ok(());
    }

    let settings = EmulatorSettings::from_prefs(emulator, &prefs);
    println!("# {} ({})", emulator, path.display());
    println!("[{}]", emuprefs::sections::Drives::TITLE);
    for (i, disk) in settings.drives.disks.iter().enumerate() {
        println!("  disk {}: {}", i, disk);
    }
    // Print each group in tab order through the file representation
    let effective = settings.to_prefs(&Prefs::new());
    for key in effective.keys() {
        println!("  {} = {}", key, effective.raw(key).unwrap_or_default());
    }
    Ok(())
}

fn edit(path: PathBuf, f: impl FnOnce(&mut Prefs) -> Result<(), String>) -> CliResult {
    let mut prefs = Prefs::load(&path)?;
    f(&mut prefs)?;
    prefs.save(&path)?;
    Ok(())
}

fn disk(emulator: Emulator, path: PathBuf, action: DiskAction) -> CliResult {
    let prefs = Prefs::load(&path)?;
    let mut settings = EmulatorSettings::from_prefs(emulator, &prefs);
    let drives = &mut settings.drives;
    match action {
        DiskAction::List => {
            for (i, disk) in drives.disks.iter().enumerate() {
                println!("{}: {}", i, disk);
            }
            return Ok(());
        }
        DiskAction::Add { path } => {
            emuprefs::prefs::check_entry(emuprefs::prefs::DISK_KEY, &path)?;
            drives.add_disk(path);
        }
        DiskAction::Remove { index } => {
            drives
                .remove_disk(index)
                .ok_or_else(|| format!("No disk at index {}", index))?;
        }
        DiskAction::Up { index } => {
            drives
                .move_disk_up(index)
                .ok_or_else(|| format!("Cannot move disk {} up", index))?;
        }
        DiskAction::Down { index } => {
            drives
                .move_disk_down(index)
                .ok_or_else(|| format!("Cannot move disk {} down", index))?;
        }
    }
    let mut updated = prefs;
    updated.set_disks(settings.drives.disks);
    updated.save(&path)?;
    Ok(())
}

fn run_gui() -> CliResult {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("EmulatorPrefs")
            .with_inner_size([900.0, 680.0])
            .with_min_inner_size([800.0, 600.0])
            .with_drag_and_drop(true),
        ..Default::default()
    };
    eframe::run_native(
        "EmulatorPrefs",
        options,
        Box::new(|cc| Ok(Box::new(PrefsApp::new(cc)))),
    )?;
    Ok(())
}

fn run(args: Args) -> CliResult {
    let mut config = Config::load();
    match args.command.unwrap_or(Command::Gui) {
        Command::Gui => run_gui(),
        Command::Show { emulator, json, prefs } => {
            show(emulator, prefs_path(&config, emulator, prefs)?, json)
        }
        Command::Get { emulator, key, prefs } => {
            let prefs = Prefs::load(&prefs_path(&config, emulator, prefs)?)?;
            if key == emuprefs::prefs::DISK_KEY {
                for disk in prefs.disks() {
                    println!("{}", disk);
                }
                return Ok(());
            }
            let value = prefs.raw(&key).ok_or_else(|| format!("{} is not set", key))?;
            println!("{}", value);
            Ok(())
        }
        Command::Set { emulator, key, value, prefs } => {
            edit(prefs_path(&config, emulator, prefs)?, |p| {
                if key == emuprefs::prefs::DISK_KEY {
                    return Err("Use `emuprefs disk` to manage disk images".to_string());
                }
                p.try_set(&key, &value).map_err(|e| e.to_string())
            })
        }
        Command::Unset { emulator, key, prefs } => {
            edit(prefs_path(&config, emulator, prefs)?, |p| {
                if p.remove(&key) {
                    Ok(())
                } else {
                    Err(format!("{} is not set", key))
                }
            })
        }
        Command::Disk { emulator, action, prefs } => {
            disk(emulator, prefs_path(&config, emulator, prefs)?, action)
        }
        Command::Launch { emulator } => {
            let launch = config.launch(emulator);
            let prefs = match &launch.prefs_path {
                Some(path) => Prefs::load(path)?,
                None => Prefs::new(),
            };
            // Normalise the file through the editor's view before launching
            let prefs = EmulatorSettings::from_prefs(emulator, &prefs).to_prefs(&prefs);
            launch.run(&prefs)?;
            Ok(())
        }
        Command::Paths => {
            println!("config: {}", Config::config_path().display());
            for emulator in Emulator::ALL {
                let exe = config
                    .executable(emulator)
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "(not set)".to_string());
                let prefs = config
                    .prefs_path(emulator)
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "(not set)".to_string());
                println!("{}:\n  executable: {}\n  prefs: {}", emulator, exe, prefs);
            }
            Ok(())
        }
        Command::Configure { emulator, exe, prefs } => {
            let paths = config.paths_mut(emulator);
            if let Some(exe) = exe {
                paths.executable = Some(exe).filter(|p| !p.as_os_str().is_empty());
            }
            if let Some(prefs) = prefs {
                paths.prefs = Some(prefs).filter(|p| !p.as_os_str().is_empty());
            }
            config.save()?;
            Ok(())
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(&args);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
