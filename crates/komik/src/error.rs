//! Error types for the komik library.
//!
//! A single [`KomikError`] covers every failure mode of the crate:
//! - Transient network and rate-limit failures (retried by the client before surfacing)
//! - Malformed upstream responses (never retried)
//! - Domain validation failures from the local user store
//! - Local IO, SQLite and configuration errors
//!
//! Service operations wrap their failures with [`KomikError::context`] so that callers receive a
//! readable "Failed to load ..." message while the original cause stays reachable through
//! [`std::error::Error::source`].
//!
//! # Examples
//!
//! ```
//! use komik::error::KomikError;
//!
//! let err = KomikError::Status(503).context("chapters");
//! assert_eq!(err.to_string(), "Failed to load chapters: upstream returned HTTP status 503");
//! assert!(matches!(err.root_cause(), KomikError::Status(503)));
//! ```

use thiserror::Error;

/// Error type alias used for the [`komik`](crate) crate.
pub type Result<T> = core::result::Result<T, KomikError>;

/// Errors that can occur when working with the komik library.
#[derive(Error, Debug)]
pub enum KomikError {
  /// A network request failed before a response was received.
  ///
  /// This can occur when:
  /// - The network is unavailable
  /// - The server is unreachable
  /// - The request times out
  /// - TLS errors occur
  #[error(transparent)]
  Network(#[from] reqwest::Error),

  /// The upstream answered with a non-success status other than 429.
  #[error("upstream returned HTTP status {0}")]
  Status(u16),

  /// The upstream kept answering 429 after the retry budget was spent.
  #[error("rate limit exceeded after {attempts} attempts")]
  RateLimited {
    /// Number of requests issued before giving up
    attempts: u32,
  },

  /// A response arrived but did not have the expected shape.
  ///
  /// Retrying cannot fix a shape mismatch, so this is surfaced immediately.
  #[error("malformed response: {0}")]
  MalformedResponse(String),

  /// Neither the full-size nor the data-saver image manifest listed any pages.
  #[error("no image data found in the chapter")]
  NoImageData,

  /// The input is neither a MangaDex UUID nor a MangaDex URL containing one.
  #[error("invalid identifier: {0}")]
  InvalidIdentifier(String),

  /// Registration attempted with an empty name or one padded with whitespace.
  #[error("invalid username \"{0}\": it must be non-empty without leading or trailing spaces")]
  InvalidUsername(String),

  /// Registration attempted with a username that already exists.
  #[error("username \"{0}\" is already taken")]
  UsernameTaken(String),

  /// Login attempted with a username that was never registered.
  #[error("username \"{0}\" not found")]
  UsernameNotFound(String),

  /// Login attempted with a password that does not match the stored one.
  #[error("wrong password")]
  WrongPassword,

  /// A bookmark or history mutation was attempted without an active session.
  #[error("no user is logged in")]
  NotLoggedIn,

  /// The session points at a user that no longer exists in the store.
  #[error("logged in as \"{0}\", but that user no longer exists")]
  UnknownUser(String),

  /// A service operation failed; `what` names the thing being loaded.
  #[error("Failed to load {what}: {source}")]
  Context {
    /// Human readable name of the resource, e.g. "manga" or "chapters"
    what:   String,
    /// The underlying failure
    #[source]
    source: Box<KomikError>,
  },

  /// JSON (de)serialization of local data failed.
  #[error(transparent)]
  Json(#[from] serde_json::Error),

  /// A SQLite operation failed.
  #[error(transparent)]
  Sqlite(#[from] rusqlite::Error),

  /// A file system operation failed.
  #[error(transparent)]
  Path(#[from] std::io::Error),

  /// The configuration file could not be parsed.
  #[error(transparent)]
  TomlDe(#[from] toml::de::Error),

  /// The configuration could not be serialized.
  #[error(transparent)]
  TomlSer(#[from] toml::ser::Error),

  /// Invalid configuration value.
  #[error("{0}")]
  Config(String),
}

impl KomikError {
  /// Wraps this error as a failure to load `what`.
  pub fn context(self, what: impl Into<String>) -> Self {
    KomikError::Context { what: what.into(), source: Box::new(self) }
  }

  /// Follows [`KomikError::Context`] wrappers down to the original failure.
  pub fn root_cause(&self) -> &KomikError {
    match self {
      KomikError::Context { source, .. } => source.root_cause(),
      other => other,
    }
  }

  /// Whether the client should spend retry budget on this error.
  ///
  /// Status and network failures are retried; everything else is a shape or domain problem.
  pub fn is_transient(&self) -> bool {
    matches!(self, KomikError::Network(_) | KomikError::Status(_))
  }
}
