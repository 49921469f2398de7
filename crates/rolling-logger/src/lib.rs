//! Rolling Logger
//!
//! File logging for desktop apps. Output goes to `{app}_{timestamp}_{seq}.log`
//! files in one directory; a file is closed once it reaches the size limit
//! and only the newest `max_files` files are kept (circular buffer).
//!
//! `init_logger` installs a `tracing` fmt subscriber, which also captures
//! records emitted through the `log` facade.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock};

use thiserror::Error;
use tracing::Level;

pub const DEFAULT_MAX_FILE_BYTES: u64 = 1024 * 1024;
pub const DEFAULT_MAX_FILES: usize = 5;

static LOGGER: OnceLock<RollingFileWriter> = OnceLock::new();

#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("log directory error: {0}")]
    Io(#[from] io::Error),
    #[error("logger already initialized")]
    AlreadyInitialized,
    #[error("logger not initialized")]
    NotInitialized,
    #[error("failed to install subscriber: {0}")]
    Subscriber(String),
}

#[derive(Debug, Clone)]
pub struct LoggerOptions {
    pub log_dir: PathBuf,
    /// File name prefix
    pub app_name: String,
    pub max_file_bytes: u64,
    pub max_files: usize,
    pub level: Level,
}

impl LoggerOptions {
    pub fn new(log_dir: impl Into<PathBuf>, app_name: &str) -> Self {
        Self {
            log_dir: log_dir.into(),
            app_name: app_name.to_string(),
            max_file_bytes: DEFAULT_MAX_FILE_BYTES,
            max_files: DEFAULT_MAX_FILES,
            level: Level::INFO,
        }
    }
}

struct WriterState {
    dir: PathBuf,
    prefix: String,
    max_bytes: u64,
    max_files: usize,
    file: Option<File>,
    written: u64,
    seq: u32,
}

impl WriterState {
    fn rotate(&mut self) -> io::Result<()> {
        let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
        let path = self.dir.join(format!("{}_{}_{:04}.log", self.prefix, stamp, self.seq));
        self.seq = self.seq.wrapping_add(1);

        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        self.written = file.metadata()?.len();
        self.file = Some(file);
        self.prune()
    }

    /// Delete the oldest files beyond `max_files`
    fn prune(&self) -> io::Result<()> {
        let mut files = log_files(&self.dir, &self.prefix)?;
        if files.len() <= self.max_files {
            return Ok(());
        }
        let excess = files.len() - self.max_files;
        for path in files.drain(..excess) {
            fs::remove_file(path)?;
        }
        Ok(())
    }

    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let full = self.written > 0 && self.written + buf.len() as u64 > self.max_bytes;
        if self.file.is_none() || full {
            self.rotate()?;
        }
        let file = self
            .file
            .as_mut()
            .ok_or_else(|| io::Error::other("log file not open"))?;
        file.write_all(buf)?;
        self.written += buf.len() as u64;
        Ok(buf.len())
    }
}

/// Log files of `prefix` in `dir`, oldest first
pub fn log_files(dir: &Path, prefix: &str) -> io::Result<Vec<PathBuf>> {
    let head = format!("{}_", prefix);
    let mut files: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.starts_with(&head) && name.ends_with(".log"))
        })
        .collect();
    files.sort();
    Ok(files)
}

/// Size-rotating writer; clones share the same file
#[derive(Clone)]
pub struct RollingFileWriter {
    state: Arc<Mutex<WriterState>>,
}

impl RollingFileWriter {
    pub fn open(options: &LoggerOptions) -> Result<Self, LoggerError> {
        fs::create_dir_all(&options.log_dir)?;
        let mut state = WriterState {
            dir: options.log_dir.clone(),
            prefix: options.app_name.clone(),
            max_bytes: options.max_file_bytes.max(1),
            max_files: options.max_files.max(1),
            file: None,
            written: 0,
            seq: 0,
        };
        state.rotate()?;
        Ok(Self { state: Arc::new(Mutex::new(state)) })
    }
}

impl Write for RollingFileWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut state = self
            .state
            .lock()
            .map_err(|_| io::Error::other("log writer poisoned"))?;
        state.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut state = self
            .state
            .lock()
            .map_err(|_| io::Error::other("log writer poisoned"))?;
        match state.file.as_mut() {
            Some(file) => file.flush(),
            None => Ok(()),
        }
    }
}

/// Initialize the global logger with default limits
pub fn init_logger(log_dir: impl Into<PathBuf>, app_name: &str) -> Result<(), LoggerError> {
    init_logger_with(LoggerOptions::new(log_dir, app_name))
}

pub fn init_logger_with(options: LoggerOptions) -> Result<(), LoggerError> {
    let writer = RollingFileWriter::open(&options)?;
    LOGGER
        .set(writer.clone())
        .map_err(|_| LoggerError::AlreadyInitialized)?;

    tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(options.level)
        .try_init()
        .map_err(|e| LoggerError::Subscriber(e.to_string()))?;

    tracing::info!(app = %options.app_name, dir = %options.log_dir.display(), "logger started");
    Ok(())
}

fn ensure_initialized() -> Result<(), LoggerError> {
    LOGGER.get().map(|_| ()).ok_or(LoggerError::NotInitialized)
}

pub fn info(message: &str) -> Result<(), LoggerError> {
    ensure_initialized()?;
    log::info!("{}", message);
    Ok(())
}

pub fn error(message: &str) -> Result<(), LoggerError> {
    ensure_initialized()?;
    log::error!("{}", message);
    Ok(())
}
