use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Extract repair line items from positioned-token estimate dumps.
#[derive(Debug, Parser)]
#[command(name = "estgrid", about, version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the full pipeline: labor/paint items, totals, header lines
    Extract {
        /// Path to the token dump ('-' for stdin)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Show grouped rows with their page and vertical position
    Rows {
        /// Path to the token dump ('-' for stdin)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Vertical tolerance for row grouping (default: 6.0)
        #[arg(long, default_value_t = estgrid::estgrid_core::DEFAULT_Y_THRESHOLD)]
        y_threshold: f64,
    },

    /// Show detected table bounds and column anchors
    Columns {
        /// Path to the token dump ('-' for stdin)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

/// Output format for all subcommands.
#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Plain text (tab-separated)
    Text,
    /// JSON output
    Json,
}
