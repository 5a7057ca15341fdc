//! History file on disk.

use std::fs;
use std::io;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use encoding_rs::{Encoding, UTF_8};
use tally_core::{Calculation, Result, ValidationError};
use tally_storage::History;
use tracing::{debug, info};

use crate::codec::{decode_csv, deserialize, encode_csv, HistoryRow};

/// A CSV history file and the text encoding it is stored in.
#[derive(Debug, Clone)]
pub struct HistoryFile {
    path: PathBuf,
    encoding: &'static Encoding,
}

impl HistoryFile {
    /// Open a history file stored in the encoding named by `label`
    /// (any WHATWG label, e.g. `utf-8`, `latin1`, `windows-1252`).
    ///
    /// # Errors
    ///
    /// `Validation(UnsupportedEncoding)` if the label is not recognised.
    pub fn new(path: impl Into<PathBuf>, label: &str) -> Result<Self> {
        let encoding = Encoding::for_label(label.trim().as_bytes()).ok_or_else(|| {
            ValidationError::UnsupportedEncoding {
                label: label.to_string(),
            }
        })?;
        Ok(Self {
            path: path.into(),
            encoding,
        })
    }

    /// Open a UTF-8 history file.
    pub fn utf8(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            encoding: UTF_8,
        }
    }

    /// File location.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Canonical name of the file encoding.
    pub fn encoding_name(&self) -> &'static str {
        self.encoding.name()
    }

    /// Check if the file exists.
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Write `items` to the file, replacing its contents.
    ///
    /// Parent directories are created as needed.
    pub fn save(&self, items: &[Calculation]) -> Result<()> {
        let rows: Vec<HistoryRow> = items.iter().map(HistoryRow::from_calculation).collect();
        let text = encode_csv(&rows)?;

        let (bytes, _, unmappable) = self.encoding.encode(&text);
        if unmappable {
            return Err(ValidationError::Encoding {
                label: self.encoding.name().to_string(),
            }
            .into());
        }

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, &bytes)?;
        debug!(path = %self.path.display(), rows = rows.len(), "history saved");
        Ok(())
    }

    /// Read the file into a fresh history holding at most `max_size` records.
    ///
    /// # Errors
    ///
    /// - `Validation(NotFound)` if the file does not exist
    /// - `Validation(Encoding)` if the bytes are invalid in the file encoding
    /// - `Validation(MalformedRow | MissingColumn)` for bad content
    pub fn load(&self, max_size: NonZeroUsize) -> Result<History> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(ValidationError::NotFound {
                    path: self.path.clone(),
                }
                .into())
            }
            Err(e) => return Err(e.into()),
        };

        let (text, _, had_errors) = self.encoding.decode(&bytes);
        if had_errors {
            return Err(ValidationError::Encoding {
                label: self.encoding.name().to_string(),
            }
            .into());
        }

        let rows = decode_csv(&text)?;
        let history = deserialize(&rows, max_size)?;
        info!(path = %self.path.display(), records = history.len(), "history loaded");
        Ok(history)
    }
}
