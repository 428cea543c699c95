use std::path::PathBuf;

use clap::Parser;

/// Convert device diagnostic exports (HTML event logs, syslog text, JSON-line
/// link and equipment feeds) into normalized tables.
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "diagx", version, about)]
pub struct Args {
    /// Files or directories to process. Directories are read one level deep.
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Where to write the JSON report.
    #[arg(short, long, default_value = "report.json")]
    pub output: PathBuf,

    /// RON configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Candidate text encoding, tried in the order given. Repeatable.
    #[arg(short, long = "encoding")]
    pub encodings: Vec<String>,

    /// Maximum rows per equipment table before spilling into another.
    #[arg(long)]
    pub max_rows: Option<usize>,

    /// Log level: error, warn, info, debug or trace.
    #[arg(long)]
    pub log_level: Option<String>,

    /// Also write the log to this file.
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}
