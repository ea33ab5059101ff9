mod generate;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sql-obfuscator")]
#[command(version)]
#[command(about = "Generate SQL scripts that anonymize database contents", long_about = None)]
pub struct Cli {
    /// Log progress (info level); RUST_LOG overrides
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate an obfuscation script from a table/column mapping
    Generate {
        /// YAML mapping of table -> column -> {type, source}
        #[arg(short, long)]
        config: PathBuf,

        /// Output SQL file (required unless --dry-run)
        #[arg(short, long, required_unless_present = "dry_run")]
        output: Option<PathBuf>,

        /// SQL dialect: postgresql
        #[arg(short, long, default_value = "postgresql")]
        dialect: String,

        /// Extra seed data YAML (kind -> list of values), appended after the
        /// built-in seeds. May be repeated.
        #[arg(long)]
        custom: Vec<PathBuf>,

        /// Overwrite the output file without asking
        #[arg(short, long)]
        force: bool,

        /// Print the script to stdout instead of writing it
        #[arg(long)]
        dry_run: bool,

        /// Print a JSON summary instead of human-readable output
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

pub fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Generate {
            config,
            output,
            dialect,
            custom,
            force,
            dry_run,
            json,
        } => generate::run(config, output, dialect, custom, force, dry_run, json),
        Commands::Completions { shell } => {
            generate(
                shell,
                &mut Cli::command(),
                "sql-obfuscator",
                &mut io::stdout(),
            );
            Ok(())
        }
    }
}
