use colored::Colorize;
use std::path::Path;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::Result;

pub mod transcript;

pub use transcript::{Transcript, TranscriptSession};

static QUIET: AtomicBool = AtomicBool::new(false);
static VERBOSE: AtomicBool = AtomicBool::new(false);
static INTERRUPTED: AtomicBool = AtomicBool::new(false);

/// Active session transcript; every message is mirrored here without colour.
static TRANSCRIPT: Mutex<Option<Transcript>> = Mutex::new(None);

/// Disable colours when stdout is not a terminal or NO_COLOR is set.
pub fn init_colors() {
    if std::env::var_os("NO_COLOR").is_some() || !atty::is(atty::Stream::Stdout) {
        colored::control::set_override(false);
    }
}

pub fn set_quiet(quiet: bool) {
    QUIET.store(quiet, Ordering::Relaxed);
}

pub fn is_quiet() -> bool {
    QUIET.load(Ordering::Relaxed)
}

pub fn set_verbose(verbose: bool) {
    VERBOSE.store(verbose, Ordering::Relaxed);
}

pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::Relaxed)
}

pub fn mark_interrupted() {
    INTERRUPTED.store(true, Ordering::SeqCst);
}

pub fn is_interrupted() -> bool {
    INTERRUPTED.load(Ordering::SeqCst)
}

pub fn header(title: &str) {
    record(&format!("== {} ==", title));
    if !is_quiet() {
        println!("\n{}", title.bold().underline());
    }
}

pub fn success(msg: &str) {
    record(&format!("[OK] {}", msg));
    if !is_quiet() {
        println!("{} {}", "✓".green().bold(), msg);
    }
}

pub fn info(msg: &str) {
    record(&format!("[INFO] {}", msg));
    if !is_quiet() {
        println!("{} {}", "ℹ".blue().bold(), msg);
    }
}

pub fn warning(msg: &str) {
    record(&format!("[WARN] {}", msg));
    if !is_quiet() {
        eprintln!("{} {}", "⚠".yellow().bold(), msg);
    }
}

/// Errors reach the console even in quiet mode.
pub fn error(msg: &str) {
    record(&format!("[ERROR] {}", msg));
    eprintln!("{} {}", "✗".red().bold(), msg);
}

pub fn separator() {
    record(&"-".repeat(60));
    if !is_quiet() {
        println!("{}", "─".repeat(60).bright_black());
    }
}

pub fn keyval(key: &str, val: &str) {
    record(&format!("{}: {}", key, val));
    if !is_quiet() {
        println!("{}: {}", key.bold(), val);
    }
}

pub fn indent(msg: &str, level: usize) {
    let spaces = " ".repeat(level * 2);
    record(&format!("{}{}", spaces, msg));
    if !is_quiet() {
        println!("{}{}", spaces, msg);
    }
}

/// Console only with --verbose; always lands in the transcript.
pub fn verbose(msg: &str) {
    record(msg);
    if is_verbose() && !is_quiet() {
        println!("{}", msg.dimmed());
    }
}

/// Write a line to the transcript only.
pub fn record(line: &str) {
    if let Ok(mut guard) = TRANSCRIPT.lock()
        && let Some(transcript) = guard.as_mut()
    {
        // A failing log write never aborts an update run.
        let _ = transcript.write_line(line);
    }
}

/// Open the session transcript. The returned guard closes it on drop.
pub fn start_transcript(path: &Path) -> Result<TranscriptSession> {
    let transcript = Transcript::start(path)?;
    let session = TranscriptSession::new(transcript.path().to_path_buf());

    let mut guard = TRANSCRIPT
        .lock()
        .map_err(|_| crate::error::WinupError::Other("Transcript lock poisoned".to_string()))?;
    if let Some(previous) = guard.replace(transcript) {
        previous.finish()?;
    }

    Ok(session)
}

/// Close the session transcript if one is open.
pub fn stop_transcript() -> Result<()> {
    let previous = match TRANSCRIPT.lock() {
        Ok(mut guard) => guard.take(),
        Err(_) => None,
    };

    match previous {
        Some(transcript) => transcript.finish(),
        None => Ok(()),
    }
}
