//! Command line manga reader built on the `komik` library.
//!
//! The binary plays the part of the reader's pages: it browses MangaDex, shows series and
//! chapters, and keeps a local reading list per user.
//!
//! # Usage
//!
//! ```bash
//! # Write a config (JSON user store by default)
//! komik init --store sqlite
//!
//! # Find something to read
//! komik search "frieren"
//! komik series https://mangadex.org/title/<uuid>
//! komik chapters <uuid>
//! komik read <chapter-uuid> --series <uuid> --quality high
//!
//! # Keep a reading list
//! komik register alice
//! komik login alice
//! komik bookmark add <uuid>
//! komik bookmark list
//! ```
//!
//! Use `-v` (repeatable) for more logging, or set `RUST_LOG`.

#![warn(missing_docs)]

use std::path::{Path, PathBuf};

use clap::{builder::ArgAction, Args, Parser, Subcommand};
use console::style;
use komik::{
  config::{ReadingDirection, ReadingMode, StoreBackend},
  mangadex::{extract_id, MangaDex, SeriesFilter, SeriesOrder},
  models::{
    ChapterLink, ChapterListing, ChapterNavigation, ChapterPages, Genre, LatestUpdate, Quality,
    Series, SeriesStatus, SeriesSummary,
  },
  prelude::*,
  store::{Accounts, Entry, Session},
  Config,
};
use tracing::{debug, trace};
use tracing_subscriber::EnvFilter;

pub mod app;
pub mod commands;
pub mod error;
pub mod interaction;

use crate::{app::*, commands::*, error::*, interaction::*};

/// Command line interface configuration and argument parsing
#[derive(Parser)]
#[command(author, version, about = "Browse and read manga from MangaDex")]
pub struct Cli {
  /// Verbose mode (-v, -vv, -vvv) for different levels of logging detail
  #[arg(
        short,
        long,
        action = ArgAction::Count,
        global = true,
        help = "Increase logging verbosity"
    )]
  verbose: u8,

  /// Path to the configuration file. If not specified, uses the platform config directory.
  #[arg(long, short, global = true)]
  config: Option<PathBuf>,

  /// The subcommand to execute
  #[command(subcommand)]
  command: Commands,

  /// Skip all prompts and accept defaults (mostly for testing)
  #[arg(long, hide = true, global = true)]
  accept_defaults: bool,
}

impl Cli {
  /// The configuration file this invocation works against.
  fn config_path(&self) -> PathBuf { self.config.clone().unwrap_or_else(Config::default_path) }
}

/// Configures the logging system based on the verbosity level
///
/// The verbosity levels are:
/// - 0: error (default)
/// - 1: warn
/// - 2: info
/// - 3: debug
/// - 4+: trace
fn setup_logging(verbosity: u8) {
  let filter = match verbosity {
    0 => "error",
    1 => "warn",
    2 => "info",
    3 => "debug",
    _ => "trace",
  };

  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_file(true)
    .with_line_number(true)
    .with_thread_ids(true)
    .with_target(true)
    .init();
}

#[tokio::main]
async fn main() {
  let cli = Cli::parse();
  setup_logging(cli.verbose);

  if let Err(e) = run(&cli).await {
    eprintln!("{} {e}", style(ERROR_PREFIX).red());
    std::process::exit(1);
  }
}

/// Dispatches the parsed command.
async fn run(cli: &Cli) -> Result<()> {
  let config_path = cli.config_path();
  trace!("Using config at {}", config_path.display());

  // `init` must work even when the existing config cannot be read
  match cli.command.clone() {
    Commands::Init(options) => init(cli, &config_path, options),
    Commands::App(command) => dispatch(cli, &mut App::open(config_path)?, command).await,
  }
}

/// Runs a command that works against an opened [`App`].
async fn dispatch(cli: &Cli, app: &mut App, command: AppCommands) -> Result<()> {
  match command {
    AppCommands::Search { query, limit } => search(cli, app, &query, limit).await,
    AppCommands::Popular(page) => popular(cli, app, page).await,
    AppCommands::Browse(options) => browse(cli, app, options).await,
    AppCommands::Genres => genres(cli, app).await,
    AppCommands::Genre { id, page } => genre(cli, app, &id, page).await,
    AppCommands::Latest { limit } => latest(cli, app, limit).await,
    AppCommands::Series { id } => series(cli, app, &id).await,
    AppCommands::Chapters { id } => chapters(cli, app, &id).await,
    AppCommands::Read(options) => read(cli, app, options).await,
    AppCommands::Register { username, password } => register(cli, app, &username, password),
    AppCommands::Login { username, password } => login(cli, app, &username, password),
    AppCommands::Logout => logout(cli, app),
    AppCommands::Unregister { username } => unregister(cli, app, &username),
    AppCommands::Whoami => whoami(cli, app),
    AppCommands::History => history(cli, app),
    AppCommands::Bookmark { cmd } => bookmark(cli, app, cmd).await,
    AppCommands::Settings { cmd } => settings(cli, app, cmd),
  }
}
