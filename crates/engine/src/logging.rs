//! Logging sink and process-wide log file setup.
//!
//! [`LogSink`] is handed to the calculator explicitly. By default it emits
//! into whatever subscriber is current; [`LogSink::with_dispatch`] pins it to
//! a specific subscriber instead, which is how tests capture its output.
//!
//! [`init_file_logging`] installs the global subscriber exactly once per
//! process. Later calls are no-ops, so repeated setup never duplicates
//! output. The log file rotates by size: once it would pass
//! [`LOG_MAX_BYTES`] it is renamed to `<name>.1`, older backups shift up,
//! and at most [`LOG_BACKUPS`] are kept.

use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use once_cell::sync::OnceCell;
use tally_core::Calculation;
use tracing::{info, Dispatch};
use tracing_subscriber::EnvFilter;

static FILE_LOGGING: OnceCell<()> = OnceCell::new();

/// Size at which the log file is rotated.
pub const LOG_MAX_BYTES: u64 = 512 * 1024;

/// Rotated log files kept alongside the live one.
pub const LOG_BACKUPS: u32 = 3;

/// Destination for calculation log records.
#[derive(Debug, Clone, Default)]
pub struct LogSink {
    dispatch: Option<Dispatch>,
}

impl LogSink {
    /// Sink that logs through the current default subscriber.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sink that always logs through `dispatch`.
    pub fn with_dispatch(dispatch: Dispatch) -> Self {
        Self {
            dispatch: Some(dispatch),
        }
    }

    /// Log one calculation.
    pub fn record(&self, calc: &Calculation) {
        let emit = || {
            info!(
                target: "tally::calculation",
                operation = calc.operation(),
                a = calc.a(),
                b = calc.b(),
                result = calc.result(),
                "calculation"
            );
        };
        match &self.dispatch {
            Some(dispatch) => tracing::dispatcher::with_default(dispatch, emit),
            None => emit(),
        }
    }
}

/// Send all tracing output to `path` (appending, no ANSI colours), rotating
/// by size.
///
/// The filter comes from `RUST_LOG`, defaulting to `info`. Only the first
/// call in a process installs anything; the rest return `Ok(())`.
pub fn init_file_logging(path: &Path) -> io::Result<()> {
    FILE_LOGGING
        .get_or_try_init(|| {
            let file = RotatingFile::open(path, LOG_MAX_BYTES, LOG_BACKUPS)?;
            let filter =
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
            let subscriber = tracing_subscriber::fmt()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_env_filter(filter)
                .finish();
            tracing::subscriber::set_global_default(subscriber)
                .map_err(|e| io::Error::new(io::ErrorKind::Other, e))
        })
        .map(|_| ())
}

/// Append-only log file that rotates once it would exceed `max_bytes`.
#[derive(Debug)]
pub struct RotatingFile {
    path: PathBuf,
    file: File,
    written: u64,
    max_bytes: u64,
    backups: u32,
}

impl RotatingFile {
    /// Open (or create) `path` for appending. Parent directories are created.
    pub fn open(path: &Path, max_bytes: u64, backups: u32) -> io::Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        let written = file.metadata()?.len();
        Ok(Self {
            path: path.to_path_buf(),
            file,
            written,
            max_bytes,
            backups,
        })
    }

    fn backup(&self, n: u32) -> PathBuf {
        let mut name = OsString::from(self.path.as_os_str());
        name.push(format!(".{}", n));
        PathBuf::from(name)
    }

    fn rotate(&mut self) -> io::Result<()> {
        self.file.flush()?;
        if self.backups == 0 {
            self.file = File::create(&self.path)?;
        } else {
            for n in (1..self.backups).rev() {
                let from = self.backup(n);
                if from.exists() {
                    fs::rename(&from, self.backup(n + 1))?;
                }
            }
            fs::rename(&self.path, self.backup(1))?;
            self.file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&self.path)?;
        }
        self.written = 0;
        Ok(())
    }
}

impl Write for RotatingFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.written > 0 && self.written + buf.len() as u64 > self.max_bytes {
            self.rotate()?;
        }
        let n = self.file.write(buf)?;
        self.written += n as u64;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}
