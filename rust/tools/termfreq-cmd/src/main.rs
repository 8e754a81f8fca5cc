use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod utils;

#[derive(Parser)]
#[command(name = "termfreq-cmd")]
#[command(about = "Command-line utility for inspecting term statistics of an index")]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the terms with the highest document frequency
    Top(commands::top::TopArgs),

    /// List the fields of an index with their dictionary sizes
    Fields {
        /// Output format
        #[arg(long, value_enum, default_value_t = commands::OutputFormat::Text)]
        format: commands::OutputFormat,

        /// Index snapshot (JSON) to read
        index_path: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    utils::init_logging(cli.verbose)?;

    match cli.command {
        Commands::Top(args) => commands::top::run(args),
        Commands::Fields { format, index_path } => commands::fields::run(format, index_path),
    }
}
