//! Plain-text session transcript.
//!
//! One file per run, opened before any action and closed at the end of the
//! run. The layout mirrors a shell transcript: a banner with start time,
//! user and machine, the captured console lines, and a closing banner.

use crate::error::{Result, WinupError};
use crate::project_identity;
use chrono::{DateTime, Local};
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

const BANNER: &str = "**********************";

pub struct Transcript {
    path: PathBuf,
    writer: BufWriter<File>,
}

impl Transcript {
    /// Create (or append to) the transcript at `path` and write the start banner.
    pub fn start(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| WinupError::TranscriptError {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| WinupError::TranscriptError {
                path: path.to_path_buf(),
                source: e,
            })?;

        let mut transcript = Self {
            path: path.to_path_buf(),
            writer: BufWriter::new(file),
        };

        for line in start_banner(Local::now()) {
            transcript.write_line(&line)?;
        }

        Ok(transcript)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn write_line(&mut self, line: &str) -> Result<()> {
        writeln!(self.writer, "{}", line)
            .and_then(|_| self.writer.flush())
            .map_err(|e| WinupError::TranscriptError {
                path: self.path.clone(),
                source: e,
            })
    }

    /// Write the end banner and flush.
    pub fn finish(mut self) -> Result<()> {
        for line in end_banner(Local::now()) {
            self.write_line(&line)?;
        }
        Ok(())
    }
}

/// Handle returned by [`crate::ui::start_transcript`]; closes the
/// transcript when dropped so every exit path leaves a complete file.
pub struct TranscriptSession {
    path: PathBuf,
}

impl TranscriptSession {
    pub(crate) fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TranscriptSession {
    fn drop(&mut self) {
        let _ = crate::ui::stop_transcript();
    }
}

fn start_banner(now: DateTime<Local>) -> Vec<String> {
    let machine = hostname::get()
        .map(|h| h.to_string_lossy().into_owned())
        .unwrap_or_else(|_| "unknown".to_string());

    vec![
        BANNER.to_string(),
        format!("{} transcript start", project_identity::DISPLAY_NAME),
        format!("Start time: {}", now.format("%Y%m%d%H%M%S")),
        format!("Username: {}", current_user()),
        format!("Machine: {} ({})", machine, std::env::consts::OS),
        format!("Version: {}", env!("CARGO_PKG_VERSION")),
        BANNER.to_string(),
    ]
}

fn end_banner(now: DateTime<Local>) -> Vec<String> {
    vec![
        BANNER.to_string(),
        format!("{} transcript end", project_identity::DISPLAY_NAME),
        format!("End time: {}", now.format("%Y%m%d%H%M%S")),
        BANNER.to_string(),
    ]
}

fn current_user() -> String {
    std::env::var("USERNAME")
        .or_else(|_| std::env::var("USER"))
        .unwrap_or_else(|_| "unknown".to_string())
}
