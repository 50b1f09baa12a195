mod config_file;
mod generate;
mod inspect;
mod schema;

pub use config_file::{ConfigFile, Overrides};

use clap::{Parser, Subcommand};
use doxtree_core::logging::init_logging;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "doxtree",
    version,
    about = "Rebuilds symbol hierarchies from indexer output and writes API documents",
    long_about = "Doxtree reads the flat compound records of a Doxygen XML run, reconstructs the \
                  namespace/type and directory/file hierarchies, and writes one document per \
                  symbol plus hierarchy views, a full listing and a root document."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate the documentation tree
    Generate {
        /// JSON settings file
        #[arg(short, long, value_name = "FILE")]
        config: PathBuf,
        /// Read compound records from a JSON array instead of index.xml
        #[arg(long, value_name = "FILE")]
        records: Option<PathBuf>,
        /// Render hierarchy views as collapsible HTML trees
        #[arg(long)]
        tree_view: bool,
        /// Output directory, overriding the settings file
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,
        /// Toctree depth used by the full listing
        #[arg(long, value_name = "N")]
        max_depth: Option<usize>,
    },
    /// Print the reconstructed hierarchy without writing documents
    Inspect {
        #[arg(short, long, value_name = "FILE")]
        config: PathBuf,
        #[arg(long, value_name = "FILE")]
        records: Option<PathBuf>,
    },
    /// Print the JSON schema of the settings file
    Schema,
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let _guard = init_logging("cli", true);

    match cli.command {
        Commands::Generate {
            config,
            records,
            tree_view,
            output,
            max_depth,
        } => generate::run(
            &config,
            records,
            Overrides {
                tree_view,
                output,
                max_depth,
            },
        ),
        Commands::Inspect { config, records } => inspect::run(&config, records),
        Commands::Schema => schema::run(),
    }
}
