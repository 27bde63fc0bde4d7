mod cli;
mod columns_cmd;
mod extract_cmd;
mod rows_cmd;
mod shared;

use clap::Parser;
use cli::Cli;

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        cli::Commands::Extract { ref file, ref format } => extract_cmd::run(file, format),
        cli::Commands::Rows {
            ref file,
            ref format,
            y_threshold,
        } => rows_cmd::run(file, format, y_threshold),
        cli::Commands::Columns { ref file, ref format } => columns_cmd::run(file, format),
    };

    if let Err(code) = result {
        std::process::exit(code);
    }
}
