//! Log directory bootstrap.
//!
//! # Responsibilities
//! - Create `{base}/{extension}/` and the dated `{YYYY-MM-DD}.csv` file
//! - Write the header row when the file is new
//!
//! # Design Decisions
//! - Fail fast: any failure here aborts Logger construction
//! - Extension names are sanitized before they touch the filesystem

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::error::{LoggerError, LoggerResult};
use crate::sinks::csv_file::header_row;

/// Directory used when a name sanitizes to nothing.
pub const FALLBACK_DIR: &str = "General";

const STRIPPED: &[char] = &[
    '/', '\\', '=', '?', '[', ']', '<', '>', ':', ';', ',', '\'', '&', '$', '#', '*', '(', ')',
    '|', '~', '`', '!', '{', '}',
];

/// Make an extension name safe to use as a directory name.
///
/// Drops reserved characters, collapses whitespace/hyphen runs to a single
/// `-`, and trims `.`, `-`, `_` from both ends.
pub fn sanitize_dir_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut in_run = false;
    for c in name.chars().filter(|c| !STRIPPED.contains(c)) {
        if c.is_whitespace() || c == '-' {
            if !in_run {
                out.push('-');
                in_run = true;
            }
        } else {
            out.push(c);
            in_run = false;
        }
    }
    let trimmed = out.trim_matches(|c| c == '.' || c == '-' || c == '_');
    if trimmed.is_empty() {
        FALLBACK_DIR.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Resolved locations for one extension's log file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogPaths {
    pub base_dir: PathBuf,
    pub extension_dir: PathBuf,
    pub file: PathBuf,
}

impl LogPaths {
    pub fn new(base_dir: &Path, extension_name: &str, date: NaiveDate) -> Self {
        let extension_dir = base_dir.join(sanitize_dir_name(extension_name));
        let file = extension_dir.join(format!("{}.csv", date.format("%Y-%m-%d")));
        Self {
            base_dir: base_dir.to_path_buf(),
            extension_dir,
            file,
        }
    }
}

/// Create directories and the dated file, writing the header row if the
/// file is new.
pub fn bootstrap_log_file(
    base_dir: &Path,
    extension_name: &str,
    date: NaiveDate,
) -> LoggerResult<LogPaths> {
    let paths = LogPaths::new(base_dir, extension_name, date);

    ensure_dir(&paths.base_dir)?;
    ensure_dir(&paths.extension_dir)?;

    if !paths.file.exists() {
        let mut file = OpenOptions::new()
            .create_new(true)
            .write(true)
            .open(&paths.file)
            .map_err(|source| bootstrap_error(&paths.file, source))?;
        file.write_all(header_row().as_bytes())
            .map_err(|source| bootstrap_error(&paths.file, source))?;
        tracing::info!(path = %paths.file.display(), "Log file created");
    }

    Ok(paths)
}

fn ensure_dir(dir: &Path) -> LoggerResult<()> {
    fs::create_dir_all(dir).map_err(|source| bootstrap_error(dir, source))?;
    if !dir.is_dir() {
        return Err(bootstrap_error(
            dir,
            std::io::Error::other("path exists but is not a directory"),
        ));
    }
    Ok(())
}

fn bootstrap_error(path: &Path, source: std::io::Error) -> LoggerError {
    LoggerError::Bootstrap {
        path: path.to_path_buf(),
        source,
    }
}
