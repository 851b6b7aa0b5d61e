use super::*;

pub mod account;
pub mod bookmark;
pub mod browse;
pub mod init;
pub mod read;
pub mod settings;

pub use account::{history, login, logout, register, unregister, whoami};
pub use bookmark::{bookmark, BookmarkCommands};
pub use browse::{browse, genre, genres, latest, popular, search, BrowseOptions, PageOptions};
pub use init::{init, InitOptions};
pub use read::{chapters, read, series, ReadOptions};
pub use settings::{settings, SettingsCommands};

/// Available commands for the CLI
#[derive(Subcommand, Clone)]
pub enum Commands {
  /// Write a new configuration file
  Init(InitOptions),

  /// Commands that need the configuration loaded
  #[command(flatten)]
  App(AppCommands),
}

/// Commands that run against an opened [`App`]
#[derive(Subcommand, Clone)]
pub enum AppCommands {
  /// Search manga by title
  Search {
    /// Title text to look for
    query: String,

    /// Maximum number of results
    #[arg(long, default_value_t = 20)]
    limit: u32,
  },

  /// List the most followed manga
  Popular(PageOptions),

  /// List manga matching a title, status, and tag filter
  Browse(BrowseOptions),

  /// List the genre tags that can be browsed
  Genres,

  /// List manga carrying a genre tag
  Genre {
    /// Genre tag id (see `komik genres`)
    id: String,

    #[command(flatten)]
    page: PageOptions,
  },

  /// Show the most recently published chapters
  Latest {
    /// Maximum number of chapters
    #[arg(long, default_value_t = 20)]
    limit: u32,
  },

  /// Show a series' details
  ///
  /// Recorded in the reading history when logged in.
  Series {
    /// Series UUID or MangaDex URL
    id: String,
  },

  /// List a series' chapters, newest first
  Chapters {
    /// Series UUID or MangaDex URL
    id: String,
  },

  /// List a chapter's page images
  Read(ReadOptions),

  /// Create a local account
  Register {
    /// Name to register
    username: String,

    /// Password; prompted for when omitted
    #[arg(long)]
    password: Option<String>,
  },

  /// Log in to a local account
  Login {
    /// Registered name
    username: String,

    /// Password; prompted for when omitted
    #[arg(long)]
    password: Option<String>,
  },

  /// Log out of the current account
  Logout,

  /// Delete a local account with its bookmarks and history
  Unregister {
    /// Name to remove
    username: String,
  },

  /// Show the logged-in user
  Whoami,

  /// Show the series viewed most recently
  History,

  /// Manage bookmarks of the logged-in user
  Bookmark {
    #[command(subcommand)]
    cmd: BookmarkCommands,
  },

  /// Show or change reader settings
  Settings {
    #[command(subcommand)]
    cmd: SettingsCommands,
  },
}
