//! MangaDex browsing and local reading-list management.
//!
//! `komik` is the core of a small manga reader, providing:
//!
//! - A resilient HTTP client that retries transient failures and honors rate limits
//! - A MangaDex service that normalizes upstream JSON into flat view models
//! - A local user store holding accounts, bookmarks, and reading history
//! - Configuration persisted as TOML in the platform config directory
//!
//! # Getting Started
//!
//! ```no_run
//! use komik::{
//!   mangadex::MangaDex,
//!   models::Quality,
//!   prelude::*,
//!   store::{Accounts, MemoryStore, Session},
//!   Config,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!   let config = Config::default();
//!   let mangadex = MangaDex::new(&config)?;
//!
//!   // Find something to read
//!   let results = mangadex.search("frieren", 5).await?;
//!   let series = mangadex.series(&results[0].id).await?;
//!   println!("{} ({})", series.title, series.status);
//!
//!   // Keep track of it locally
//!   let mut accounts = Accounts::new(MemoryStore::new());
//!   let mut session = Session::new();
//!   accounts.register("alice", "hunter2")?;
//!   accounts.login(&mut session, "alice", "hunter2")?;
//!   accounts.add_bookmark(&session, &series.id, &series.title)?;
//!
//!   // Read the newest chapter
//!   let chapters = mangadex.chapters(&series.id).await?;
//!   let pages = mangadex.chapter_pages(&chapters[0].id, Quality::Low).await?;
//!   println!("{} pages", pages.pages.len());
//!   Ok(())
//! }
//! ```
//!
//! # Module Organization
//!
//! - [`client`]: Retrying JSON client and the [`client::Transport`] seam
//! - [`mangadex`]: MangaDex endpoints and response normalization
//! - [`models`]: View models handed to callers
//! - [`store`]: Keyed user store, sessions, and account operations
//! - [`config`]: Persistent configuration and reader settings
//! - [`error`]: The crate error type

#![warn(missing_docs)]

use std::{
  collections::{BTreeMap, BTreeSet},
  fmt::Display,
  path::{Path, PathBuf},
  str::FromStr,
  time::Duration,
};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use reqwest::Url;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::{debug, trace, warn};
#[cfg(test)]
use {tempfile::tempdir, tracing_test::traced_test};

pub mod client;
pub mod config;
pub mod error;
pub mod mangadex;
pub mod models;
pub mod store;

pub use crate::config::Config;
use crate::{client::*, error::*, models::*};

/// Common traits and types for ergonomic imports.
///
/// ```no_run
/// use komik::{prelude::*, store::Session};
///
/// fn example(session: &Session) -> Result<(), KomikError> {
///   if session.current().is_none() {
///     return Err(KomikError::NotLoggedIn);
///   }
///   Ok(())
/// }
/// ```
pub mod prelude {
  pub use crate::{client::Transport, error::KomikError, store::UserStore};
}
