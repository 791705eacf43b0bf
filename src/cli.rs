use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "listctl")]
#[command(author = "Alberto Cavalcante")]
#[command(version)]
#[command(about = "Declarative management of named lists", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// State file (default: <state dir>/state.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub state: Option<PathBuf>,

    /// Root directory of the list backend
    #[arg(long, global = true, value_name = "DIR")]
    pub backend_dir: Option<PathBuf>,

    /// Owner used when a manifest does not name one
    #[arg(long, global = true, env = "LISTCTL_OWNER_ID")]
    pub owner_id: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show what apply would change
    Plan(ManifestArgs),

    /// Converge a list to its manifest
    Apply(ApplyArgs),

    /// Re-read tracked lists and update the state file
    Refresh {
        /// Only refresh this address
        address: Option<String>,
    },

    /// Delete a tracked list
    Destroy {
        /// Address of the list
        address: String,

        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Start tracking an existing list
    Import {
        /// Address to store the list under
        address: String,

        /// List to import, as ownerID/listID
        id: String,
    },

    /// Show tracked lists
    Show {
        /// Only show this address
        address: Option<String>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser)]
pub struct ManifestArgs {
    /// List manifest (TOML or JSON)
    pub manifest: PathBuf,

    /// State address (default: manifest file name without extension)
    #[arg(short, long)]
    pub address: Option<String>,
}

#[derive(Parser)]
pub struct ApplyArgs {
    #[command(flatten)]
    pub target: ManifestArgs,

    /// Show what would be done without making changes
    #[arg(long)]
    pub dry_run: bool,

    /// Skip confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}
