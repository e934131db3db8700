mod generate;
mod import;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use mstk::DEFAULT_CONFIG_FILE;
use tracing_subscriber::EnvFilter;

use crate::generate::{GenerateOptions, run_generate_command};
use crate::import::run_import_command;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Print progress details (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    commands: Commands,
}

/// Supported subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate platform resource files from a translation spreadsheet.
    Generate {
        /// Path to the project root directory
        #[arg(short = 'r', long)]
        project_root: String,
        /// Configuration file, relative to the project root
        #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
        config: String,
        /// Load translations from a CSV or TSV export
        #[arg(short = 'C', long, visible_alias = "csv-loader", value_name = "FILE")]
        csv: String,
        /// Encoding of a spreadsheet without BOM (e.g. windows-1252)
        #[arg(long)]
        encoding: Option<String>,
        /// Render every language but do not write any file
        #[arg(long)]
        dry_run: bool,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Import existing Android strings.xml files into a spreadsheet.
    Import {
        /// Path to the project root directory
        #[arg(short = 'r', long)]
        project_root: String,
        /// Configuration file, relative to the project root
        #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
        config: String,
        /// The CSV file to write
        #[arg(short, long)]
        output: String,
    },

    /// Generate shell completion script.
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    match args.commands {
        Commands::Generate {
            project_root,
            config,
            csv,
            encoding,
            dry_run,
            json,
        } => run_generate_command(GenerateOptions {
            project_root,
            config,
            csv,
            encoding,
            dry_run,
            json,
            verbose: args.verbose,
        }),
        Commands::Import {
            project_root,
            config,
            output,
        } => run_import_command(project_root, config, output),
        Commands::Completions { shell } => {
            let mut command = Args::command();
            clap_complete::generate(shell, &mut command, "mstk", &mut std::io::stdout());
        }
    }
}
