//! Plain-text diagnostics for one run of the program.
//!
//! [`init`] opens `SprayPaint/spraypaint.log` under the user's data folder
//! (`%APPDATA%` on Windows, `~/Library/Application Support` on macOS,
//! `$XDG_DATA_HOME` or `~/.local/share` elsewhere) and empties it, so a
//! report attached to a bug is always the last run only.
//!
//! Code writes through `log_info!`, `log_warn!` and `log_err!`. Until a sink
//! is open those macros drop their message, which keeps unit tests quiet.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock};
use std::time::{SystemTime, UNIX_EPOCH};

static SINK: OnceLock<Mutex<File>> = OnceLock::new();

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    Info,
    Warn,
    Error,
    Panic,
}

impl Level {
    fn tag(self) -> &'static str {
        match self {
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
            Level::Panic => "PANIC",
        }
    }
}

#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        $crate::logger::record($crate::logger::Level::Info, &format!($($arg)*));
    };
}

#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        $crate::logger::record($crate::logger::Level::Warn, &format!($($arg)*));
    };
}

#[macro_export]
macro_rules! log_err {
    ($($arg:tt)*) => {
        $crate::logger::record($crate::logger::Level::Error, &format!($($arg)*));
    };
}

/// Append `msg` with the wall-clock time and `level`.
pub fn record(level: Level, msg: &str) {
    append(&entry(&clock_of(unix_secs()), level, msg));
}

fn append(text: &str) {
    let Some(sink) = SINK.get() else {
        return;
    };
    if let Ok(mut file) = sink.lock() {
        let _ = writeln!(file, "{}", text);
    }
}

fn entry(clock: &str, level: Level, msg: &str) -> String {
    format!("[{}] [{}] {}", clock, level.tag(), msg)
}

/// Start logging to the per-user location.
pub fn init() {
    init_at(&data_dir().join("SprayPaint").join("spraypaint.log"));
}

/// Start logging to `path`, emptying it first.
///
/// Later calls are ignored once a sink is open. If the file can't be
/// created the program runs without a log.
pub fn init_at(path: &Path) {
    if SINK.get().is_some() {
        return;
    }
    if let Some(dir) = path.parent() {
        let _ = fs::create_dir_all(dir);
    }
    let opened = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(path);
    let file = match opened {
        Ok(file) => file,
        Err(e) => {
            eprintln!("spraypaint: no log at {}: {}", path.display(), e);
            return;
        }
    };
    let _ = SINK.set(Mutex::new(file));

    append(&format!("--- SprayPaint run, unix time {} ---", unix_secs()));
    append(&format!("writing to {}", path.display()));

    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        record(Level::Panic, &info.to_string());
        default_hook(info);
    }));
}

fn data_dir() -> PathBuf {
    let env_dir = |key: &str| std::env::var_os(key).map(PathBuf::from);

    #[cfg(target_os = "windows")]
    {
        if let Some(dir) = env_dir("APPDATA") {
            return dir;
        }
    }
    #[cfg(target_os = "macos")]
    {
        if let Some(home) = env_dir("HOME") {
            return home.join("Library/Application Support");
        }
    }

    env_dir("XDG_DATA_HOME")
        .or_else(|| env_dir("HOME").map(|home| home.join(".local/share")))
        .unwrap_or_else(|| PathBuf::from("."))
}

fn unix_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_secs())
}

/// `HH:MM:SS` in UTC.
fn clock_of(secs: u64) -> String {
    let day = secs % 86_400;
    format!("{:02}:{:02}:{:02}", day / 3600, day % 3600 / 60, day % 60)
}
