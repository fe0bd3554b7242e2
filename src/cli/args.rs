use crate::utils::machine_output::OutputFormat;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "winup",
    about = "Update every WinGet-managed application, reinstalling on failure",
    long_about = "Checks for pending WinGet updates and applies them one by one. \
                  A failed update falls back to uninstall + reinstall. \
                  Every run is captured in a timestamped transcript.",
    version,
    next_line_help = false,
    term_width = 80
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalFlags,

    #[command(flatten)]
    pub run: RunArgs,
}

#[derive(Parser, Debug)]
pub struct GlobalFlags {
    /// Verbose output (echo package manager output)
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Quiet mode (transcript is still written)
    #[arg(short = 'q', long)]
    pub quiet: bool,

    /// Check for updates without applying them
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Emit a machine-readable report on stdout
    #[arg(long, value_enum, value_name = "FORMAT")]
    pub output: Option<OutputFormat>,
}

#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Directory for run transcripts [default: ~/winup-logs]
    #[arg(long, value_name = "DIR", env = "WINUP_LOG_DIR", help_heading = "Advanced")]
    pub log_dir: Option<PathBuf>,

    /// PowerShell host to drive WinGet with [default: pwsh, then powershell]
    #[arg(long, value_name = "PATH", env = "WINUP_POWERSHELL", help_heading = "Advanced")]
    pub powershell: Option<PathBuf>,

    /// Give up on a single package manager call after this many seconds
    #[arg(long, value_name = "SECS", env = "WINUP_TIMEOUT", help_heading = "Advanced")]
    pub timeout: Option<u64>,
}
