use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock};
use std::time::{SystemTime, UNIX_EPOCH};

const LOG_FILE_NAME: &str = "quicklaunch.log";
const ARCHIVE_PREFIX: &str = "quicklaunch-";
const MAX_LOG_BYTES: u64 = 1_000_000;
const MAX_ARCHIVES: usize = 5;

static LOGGER: OnceLock<Mutex<File>> = OnceLock::new();
static PANIC_HOOK_INSTALLED: OnceLock<()> = OnceLock::new();

pub fn logs_dir() -> PathBuf {
    crate::config::stable_data_dir().join("logs")
}

/// Best-effort: callers before (or without) `init` log into the void.
pub fn init() -> Result<(), std::io::Error> {
    let log_dir = logs_dir();
    fs::create_dir_all(&log_dir)?;

    let log_path = log_dir.join(LOG_FILE_NAME);
    if log_is_full(&log_path) {
        archive_current_log(&log_path, &log_dir)?;
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;
    let _ = LOGGER.set(Mutex::new(file));

    install_panic_hook();
    Ok(())
}

pub fn info(message: &str) {
    write_line("INFO", message);
}

pub fn warn(message: &str) {
    write_line("WARN", message);
}

pub fn error(message: &str) {
    write_line("ERROR", message);
}

fn write_line(level: &str, message: &str) {
    let Some(logger) = LOGGER.get() else {
        return;
    };
    let Ok(mut file) = logger.lock() else {
        return;
    };

    let _ = writeln!(file, "[{}] [{level}] {message}", unix_secs());
    let _ = file.flush();
}

fn unix_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

fn log_is_full(log_path: &Path) -> bool {
    fs::metadata(log_path)
        .map(|meta| meta.len() >= MAX_LOG_BYTES)
        .unwrap_or(false)
}

fn archive_current_log(log_path: &Path, log_dir: &Path) -> Result<(), std::io::Error> {
    let archived = log_dir.join(format!("{ARCHIVE_PREFIX}{}.log", unix_secs()));
    fs::rename(log_path, archived)?;

    let mut archives: Vec<PathBuf> = fs::read_dir(log_dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| is_archive(path))
        .collect();
    archives.sort();

    // oldest first; keep only the newest MAX_ARCHIVES
    if archives.len() > MAX_ARCHIVES {
        for stale in archives.drain(..archives.len() - MAX_ARCHIVES) {
            let _ = fs::remove_file(stale);
        }
    }

    Ok(())
}

fn is_archive(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(|name| name.starts_with(ARCHIVE_PREFIX) && name.ends_with(".log"))
        .unwrap_or(false)
}

fn install_panic_hook() {
    let _ = PANIC_HOOK_INSTALLED.get_or_init(|| {
        let prior = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            let location = panic_info
                .location()
                .map(|l| format!("{}:{}", l.file(), l.line()))
                .unwrap_or_else(|| "unknown".to_string());
            error(&format!("panic at {location}: {panic_info}"));
            prior(panic_info);
        }));
    });
}
