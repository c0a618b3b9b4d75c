use chrono::Local;
use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

/// Maximum size per log file before rotation (~5 MB)
const MAX_LOG_FILE_SIZE: u64 = 5 * 1024 * 1024;
/// Number of rotated log files to keep
const MAX_LOG_FILES: usize = 5;
/// In-memory log buffer cap
const MAX_MEMORY_LOGS: usize = 2000;

pub const DEBUG_ENV: &str = "GENPLAYLIST_DEBUG";
pub const LOG_DIR_ENV: &str = "GENPLAYLIST_LOG_DIR";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Error,
    Warn,
    Info,
    Debug,
}

impl Level {
    pub fn as_str(self) -> &'static str {
        match self {
            Level::Error => "ERROR",
            Level::Warn => "WARN",
            Level::Info => "INFO",
            Level::Debug => "DEBUG",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub timestamp: String,
    pub level: Level,
    pub message: String,
}

impl LogEntry {
    fn now(level: Level, message: &str) -> Self {
        Self {
            timestamp: Local::now().format("%Y-%m-%d %H:%M:%S%.3f").to_string(),
            level,
            message: message.to_string(),
        }
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] [{}] {}", self.timestamp, self.level, self.message)
    }
}

/// Run-wide log sink: console, in-memory buffer and an optional rotated file.
pub struct LogState {
    logs: Mutex<Vec<LogEntry>>,
    log_dir: Mutex<Option<PathBuf>>,
    debug_mode: AtomicBool,
    echo: bool,
}

impl LogState {
    pub fn new() -> Self {
        Self {
            logs: Mutex::new(Vec::new()),
            log_dir: Mutex::new(None),
            debug_mode: AtomicBool::new(false),
            echo: true,
        }
    }

    /// Buffer-only logger; nothing reaches the console.
    pub fn quiet() -> Self {
        Self {
            echo: false,
            ..Self::new()
        }
    }

    /// Console logger configured from `GENPLAYLIST_DEBUG` and `GENPLAYLIST_LOG_DIR`.
    pub fn from_env() -> Self {
        let state = Self::new();
        if let Ok(value) = std::env::var(DEBUG_ENV) {
            state.set_debug(parse_boolish(&value).unwrap_or(false));
        }
        if let Some(dir) = std::env::var_os(LOG_DIR_ENV) {
            state.init_log_dir(PathBuf::from(dir));
        }
        state
    }

    /// Initialise the persistent log directory.
    pub fn init_log_dir(&self, log_dir: PathBuf) {
        if let Err(e) = fs::create_dir_all(&log_dir) {
            eprintln!("[LogState] Failed to create log directory {:?}: {}", log_dir, e);
            return;
        }

        if let Ok(mut dir) = self.log_dir.lock() {
            *dir = Some(log_dir);
        }

        // Write a startup marker
        self.write_to_file(&LogEntry::now(
            Level::Info,
            &format!(
                "=== genplaylist session started at {} ===",
                Local::now().format("%Y-%m-%d %H:%M:%S %Z")
            ),
        ));
    }

    /// The current (active) log file path.
    fn current_log_path(&self) -> Option<PathBuf> {
        self.log_dir
            .lock()
            .ok()?
            .as_ref()
            .map(|d| d.join("genplaylist.log"))
    }

    pub fn get_log_dir(&self) -> Option<PathBuf> {
        self.log_dir.lock().ok()?.clone()
    }

    /// Rotate log files: genplaylist.log → genplaylist.1.log → genplaylist.2.log → …
    fn rotate_if_needed(&self) {
        let Some(current) = self.current_log_path() else { return };
        let file_size = fs::metadata(&current).map(|m| m.len()).unwrap_or(0);
        if file_size < MAX_LOG_FILE_SIZE {
            return;
        }

        let Some(dir) = self.get_log_dir() else { return };

        // Shift existing rotated files
        for i in (1..MAX_LOG_FILES).rev() {
            let from = dir.join(format!("genplaylist.{}.log", i));
            let to = dir.join(format!("genplaylist.{}.log", i + 1));
            let _ = fs::rename(&from, &to);
        }
        let _ = fs::rename(&current, dir.join("genplaylist.1.log"));
    }

    /// Append a formatted line to the persistent log file.
    fn write_to_file(&self, entry: &LogEntry) {
        self.rotate_if_needed();
        let Some(path) = self.current_log_path() else { return };

        let line = format!("{}\n", entry);

        if let Ok(mut file) = OpenOptions::new().create(true).append(true).open(&path) {
            let _ = file.write_all(line.as_bytes());
        }
    }

    /// Core logging method — writes to memory, file, and the console.
    pub fn add_log(&self, level: Level, message: &str) {
        if level == Level::Debug && !self.is_debug() {
            return;
        }

        let entry = LogEntry::now(level, message);

        if self.echo {
            match level {
                Level::Error | Level::Warn => eprintln!("{}", entry),
                Level::Info | Level::Debug => println!("{}", entry),
            }
        }

        self.write_to_file(&entry);

        if let Ok(mut logs) = self.logs.lock() {
            logs.push(entry);
            if logs.len() > MAX_MEMORY_LOGS {
                let drain_count = MAX_MEMORY_LOGS / 5;
                logs.drain(..drain_count);
            }
        }
    }

    pub fn error(&self, message: &str) {
        self.add_log(Level::Error, message);
    }

    pub fn warn(&self, message: &str) {
        self.add_log(Level::Warn, message);
    }

    pub fn info(&self, message: &str) {
        self.add_log(Level::Info, message);
    }

    pub fn debug(&self, message: &str) {
        self.add_log(Level::Debug, message);
    }

    pub fn get_logs(&self) -> Vec<LogEntry> {
        self.logs.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Messages logged at `level`, oldest first.
    pub fn messages(&self, level: Level) -> Vec<String> {
        self.get_logs()
            .into_iter()
            .filter(|entry| entry.level == level)
            .map(|entry| entry.message)
            .collect()
    }

    pub fn is_debug(&self) -> bool {
        self.debug_mode.load(Ordering::Relaxed)
    }

    pub fn set_debug(&self, enabled: bool) {
        self.debug_mode.store(enabled, Ordering::Relaxed);
    }
}

impl Default for LogState {
    fn default() -> Self {
        Self::new()
    }
}

/// Accepts: "1", "0", "true", "false", "yes", "no", "y", "n"
fn parse_boolish(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" => Some(true),
        "0" | "false" | "no" | "n" => Some(false),
        _ => None,
    }
}
