mod cli;
mod commands;
mod config;
mod engine;
mod paths;
mod state;
mod store;
mod ui;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::generate;
use cli::{Cli, Command};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use state::ListState;
use store::FileStore;

/// Global context for the application
pub struct Context {
    pub verbose: u8,
    pub quiet: bool,
    pub state_path: Option<PathBuf>,
    pub backend_dir: Option<PathBuf>,
    pub owner_id: Option<String>,
}

impl Context {
    /// Resolved state file path
    pub fn state_path(&self) -> Result<PathBuf> {
        match &self.state_path {
            Some(path) => Ok(path.clone()),
            None => ListState::default_path(),
        }
    }

    /// List backend for this invocation
    pub fn store(&self) -> Result<FileStore> {
        let root = match &self.backend_dir {
            Some(dir) => dir.clone(),
            None => paths::backend_dir()?,
        };
        log::debug!("Using list backend at {}", root.display());
        Ok(FileStore::new(root))
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    let log_level = match cli.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    env_logger::Builder::new()
        .filter_level(if cli.quiet {
            log::LevelFilter::Error
        } else {
            log_level
        })
        .format_timestamp(None)
        .init();

    let ctx = Context {
        verbose: cli.verbose,
        quiet: cli.quiet,
        state_path: cli.state,
        backend_dir: cli.backend_dir,
        owner_id: cli.owner_id,
    };

    match run(&ctx, cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report(&err);
            ExitCode::FAILURE
        }
    }
}

fn run(ctx: &Context, command: Command) -> Result<()> {
    match command {
        Command::Plan(args) => commands::plan::run(ctx, &args),
        Command::Apply(args) => commands::apply::run(ctx, &args),
        Command::Refresh { address } => commands::refresh::run(ctx, address.as_deref()),
        Command::Destroy { address, yes } => commands::destroy::run(ctx, &address, yes),
        Command::Import { address, id } => commands::import::run(ctx, &address, &id),
        Command::Show { address } => commands::show::run(ctx, address.as_deref()),
        Command::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "listctl", &mut io::stdout());
            Ok(())
        }
    }
}

/// Print an error chain with advice for known list errors
fn report(err: &anyhow::Error) {
    ui::error(&format!("{err:#}"));

    let category = err
        .chain()
        .find_map(|cause| cause.downcast_ref::<listkit::Error>())
        .map(listkit::Error::category);

    if let Some(category) = category {
        ui::dim(&format!("{}: {}", category.description(), category.advice()));
    }
}
