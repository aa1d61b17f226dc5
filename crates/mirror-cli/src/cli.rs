//! CLI argument parsing using clap derive

use std::num::NonZeroUsize;
use std::path::PathBuf;

use clap::Parser;
use mirror_core::ConfigLayer;

/// dirmirror - Periodically mirror a folder into an output folder
///
/// Every cycle the output folder is emptied and the source folder's entries
/// are copied into it again.
///
/// Examples:
///   dirmirror -s photos                       # mirror into photos_copy every 40s
///   dirmirror -s photos -o backup -l sync.log # custom output and log file
///   dirmirror -s photos -i 60                 # sync every minute
///   dirmirror -s photos --once --json         # one cycle, report on stdout
#[derive(Parser, Debug)]
#[command(name = "dirmirror")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Source folder
    #[arg(short, long)]
    pub source: Option<PathBuf>,

    /// Output folder [default: <source>_copy]
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Synchronization interval in seconds [default: 40]
    #[arg(short, long)]
    pub interval: Option<u64>,

    /// Log file path [default: <source>.log]
    #[arg(short = 'l', long = "log-file", visible_alias = "loggingfile")]
    pub log_file: Option<PathBuf>,

    /// Configuration file (.toml, .json, .yaml); flags override its values
    #[arg(short, long, env = "DIRMIRROR_CONFIG")]
    pub config: Option<PathBuf>,

    /// Maximum number of copies running at once [default: unbounded]
    #[arg(long)]
    pub max_parallel: Option<NonZeroUsize>,

    /// Run a single cycle and exit
    #[arg(long)]
    pub once: bool,

    /// Print the cycle report as JSON on stdout
    #[arg(long, requires = "once")]
    pub json: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// The configuration values given on the command line.
    pub fn layer(&self) -> ConfigLayer {
        ConfigLayer {
            source: self.source.clone(),
            output: self.output.clone(),
            interval: self.interval,
            log_file: self.log_file.clone(),
            max_parallel: self.max_parallel,
        }
    }
}
