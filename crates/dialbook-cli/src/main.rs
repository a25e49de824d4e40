mod commands;
mod error;
mod util;

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tracing::debug;

use crate::commands::{completions, contacts, history, Context};
use crate::error::{exit_code_for, report_error};
use dialbook_config as config;
use dialbook_sources::HttpContactApi;
use dialbook_store::{paths, Store};

#[derive(Debug, Parser)]
#[command(name = "dialbook", version, about = "dialbook CLI")]
struct Cli {
    #[arg(long, global = true)]
    db_path: Option<PathBuf>,
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[arg(long, global = true)]
    json: bool,
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate shell completions
    Completions(completions::CompletionsArgs),
    /// List contacts, optionally filtered and marked against the device
    List(contacts::ListArgs),
    Show(contacts::ShowArgs),
    #[command(name = "add")]
    Add(contacts::AddContactArgs),
    #[command(name = "edit")]
    Edit(contacts::EditContactArgs),
    Delete(contacts::DeleteArgs),
    /// Saved search queries
    #[command(subcommand)]
    History(history::HistoryCommand),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let verbose = cli.verbose;
    init_logging(verbose);
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_error(&err, verbose);
            exit_code_for(&err)
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let Cli {
        db_path,
        config: config_path,
        json,
        verbose,
        command,
    } = cli;

    match command {
        Command::Completions(args) => completions::emit(args),
        command => run_with_store(db_path, config_path, json, verbose, command),
    }
}

fn run_with_store(
    db_path: Option<PathBuf>,
    config_path: Option<PathBuf>,
    json: bool,
    verbose: bool,
    command: Command,
) -> Result<()> {
    let app_config = config::load(config_path.clone()).with_context(|| "load config")?;
    if verbose {
        match config::resolve_config_path(config_path) {
            Ok(path) => {
                if path.exists() {
                    debug!(path = %path.display(), "config resolved");
                } else {
                    debug!(path = %path.display(), "config missing, using defaults");
                }
            }
            Err(err) => {
                debug!(error = %err, "config unavailable");
            }
        }
    }

    let db_path = paths::resolve_db_path(db_path).with_context(|| "resolve database path")?;
    debug!(path = %db_path.display(), "database path resolved");

    let store =
        Store::open(&db_path).with_context(|| format!("open database {}", db_path.display()))?;
    store.migrate().with_context(|| "run migrations")?;

    let api = HttpContactApi::new(
        &app_config.api.base_url,
        app_config.api.api_key.clone(),
        Duration::from_secs(app_config.api.timeout_secs),
    )
    .with_context(|| "configure contact api")?;
    debug!(base_url = %app_config.api.base_url, "contact api configured");

    let ctx = Context {
        store: &store,
        api: &api,
        json,
        config: &app_config,
    };

    match command {
        Command::List(args) => contacts::list_contacts(&ctx, args),
        Command::Show(args) => contacts::show_contact(&ctx, args),
        Command::Add(args) => contacts::add_contact(&ctx, args),
        Command::Edit(args) => contacts::edit_contact(&ctx, args),
        Command::Delete(args) => contacts::delete_contact(&ctx, args),
        Command::History(cmd) => match cmd {
            history::HistoryCommand::Ls => history::list_history(&ctx),
            history::HistoryCommand::Add(args) => history::add_history(&ctx, args),
            history::HistoryCommand::Rm(args) => history::remove_history(&ctx, args),
            history::HistoryCommand::Clear => history::clear_history(&ctx),
        },
        Command::Completions(_) => {
            unreachable!("completions command handled before store initialization")
        }
    }
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .try_init();
}
