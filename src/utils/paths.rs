use crate::error::{Result, WinupError};
use crate::project_identity;
use chrono::{DateTime, Local};
use directories::UserDirs;
use std::path::{Path, PathBuf};

pub fn home_dir() -> Result<PathBuf> {
    let user_dirs = UserDirs::new()
        .ok_or_else(|| WinupError::PathError("Could not determine user home directory".to_string()))?;
    Ok(user_dirs.home_dir().to_path_buf())
}

/// Default transcript directory: `<home>/winup-logs`
pub fn default_log_dir() -> Result<PathBuf> {
    Ok(home_dir()?.join(project_identity::LOG_DIR_NAME))
}

/// File-system-safe timestamp (no colons), sortable by name.
pub fn transcript_timestamp(now: DateTime<Local>) -> String {
    now.format("%Y-%m-%d_%H-%M-%S").to_string()
}

pub fn transcript_file(log_dir: &Path, now: DateTime<Local>) -> PathBuf {
    log_dir.join(format!(
        "{}_{}.log",
        project_identity::TRANSCRIPT_PREFIX,
        transcript_timestamp(now)
    ))
}

/// Transcript path for this run, honouring an explicit log directory.
pub fn resolve_transcript_path(log_dir: Option<&Path>, now: DateTime<Local>) -> Result<PathBuf> {
    let dir = match log_dir {
        Some(dir) => dir.to_path_buf(),
        None => default_log_dir()?,
    };
    Ok(transcript_file(&dir, now))
}
