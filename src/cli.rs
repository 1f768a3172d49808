use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "outcomemap")]
#[command(about = "Course outcomes assessment plan parser and validator", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file (defaults to the nearest .outcomemap.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase verbosity level (can be repeated: -v, -vv, -vvv)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbosity: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate a COAEP export and print the report
    Validate {
        /// CSV export of the plan
        path: PathBuf,

        /// Output format
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Convert a COAEP export to its record or canonical table
    Convert {
        /// CSV export of the plan
        path: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "json")]
        format: ConvertFormat,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Validate a COAEP export and upload it when it passes
    Upload {
        /// CSV export of the plan
        path: PathBuf,

        #[arg(long)]
        course_id: String,

        #[arg(long)]
        curr_id: String,

        #[arg(long)]
        period_id: String,

        /// Server base URL (overrides upload.base_url)
        #[arg(long)]
        url: Option<String>,

        /// Bearer token (overrides upload.token)
        #[arg(long, env = "OUTCOMEMAP_TOKEN", hide_env_values = true)]
        token: Option<String>,

        /// Send the canonical table as CSV instead of the record as JSON
        #[arg(long)]
        as_csv: bool,
    },

    /// Initialize configuration file
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum OutputFormat {
    Json,
    Markdown,
    Terminal,
}

impl From<OutputFormat> for crate::io::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Json => crate::io::OutputFormat::Json,
            OutputFormat::Markdown => crate::io::OutputFormat::Markdown,
            OutputFormat::Terminal => crate::io::OutputFormat::Terminal,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ConvertFormat {
    /// The assembled record
    Json,
    /// The canonical table
    Csv,
}

/// Log filter for a `-v` count; `RUST_LOG` still takes precedence.
pub fn log_level(verbosity: u8) -> log::LevelFilter {
    match verbosity {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    }
}
