//! Local accounts, bookmarks, and reading history.
//!
//! User data is kept in a [`UserStore`]: a mapping from username to [`UserRecord`]. Three
//! implementations are provided:
//!
//! - [`MemoryStore`] keeps everything in process, for tests and throwaway sessions
//! - [`JsonFileStore`] keeps the whole mapping in one JSON document
//! - [`SqliteStore`] keeps users, bookmarks, and history in SQLite tables
//!
//! Who is logged in is tracked separately by a [`Session`], which callers pass explicitly to
//! every [`Accounts`] operation that needs it.
//!
//! # Examples
//!
//! ```
//! use komik::store::{Accounts, MemoryStore, Session};
//!
//! # fn main() -> Result<(), komik::error::KomikError> {
//! let mut accounts = Accounts::new(MemoryStore::new());
//! let mut session = Session::new();
//!
//! accounts.register("alice", "hunter2")?;
//! accounts.login(&mut session, "alice", "hunter2")?;
//! accounts.add_history(&session, "series-1", "Frieren")?;
//!
//! assert_eq!(accounts.history(&session)?[0].title, "Frieren");
//! # Ok(())
//! # }
//! ```

use std::fs;

use super::*;

mod accounts;
mod json;
mod memory;
mod session;
mod sqlite;

pub use self::{
  accounts::Accounts, json::JsonFileStore, memory::MemoryStore, session::Session,
  sqlite::SqliteStore,
};

/// Most history entries kept per user.
pub const HISTORY_LIMIT: usize = 10;

/// A series reference saved in a bookmark or history list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
  /// Series identifier
  pub id:    String,
  /// Series title at the time it was saved
  pub title: String,
}

impl Entry {
  /// Creates an entry.
  pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
    Self { id: id.into(), title: title.into() }
  }
}

/// Everything stored for one user.
///
/// Serializes as `{"password": .., "bookmarks": [{"id": .., "title": ..}], "history": [..]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
  /// Password, compared verbatim at login
  pub password:  String,
  /// Bookmarked series in insertion order, each at most once
  #[serde(default)]
  pub bookmarks: Vec<Entry>,
  /// Recently viewed series, most recent first, each at most once
  #[serde(default)]
  pub history:   Vec<Entry>,
}

impl UserRecord {
  /// A fresh record with no bookmarks or history.
  pub fn new(password: impl Into<String>) -> Self {
    Self { password: password.into(), ..Self::default() }
  }

  /// Whether `series_id` is bookmarked.
  pub fn is_bookmarked(&self, series_id: &str) -> bool {
    self.bookmarks.iter().any(|entry| entry.id == series_id)
  }

  /// Appends a bookmark unless one for the same series exists. Returns whether it was added.
  pub fn add_bookmark(&mut self, entry: Entry) -> bool {
    if self.is_bookmarked(&entry.id) {
      return false;
    }
    self.bookmarks.push(entry);
    true
  }

  /// Removes the bookmark for `series_id`. Returns whether one was removed.
  pub fn remove_bookmark(&mut self, series_id: &str) -> bool {
    let before = self.bookmarks.len();
    self.bookmarks.retain(|entry| entry.id != series_id);
    self.bookmarks.len() != before
  }

  /// Moves `entry` to the front of the history, keeping at most [`HISTORY_LIMIT`] entries.
  pub fn push_history(&mut self, entry: Entry) {
    self.history.retain(|existing| existing.id != entry.id);
    self.history.insert(0, entry);
    self.history.truncate(HISTORY_LIMIT);
  }
}

/// Keyed storage of [`UserRecord`]s.
///
/// Implementations only move whole records in and out; the rules about bookmarks and history
/// live in [`UserRecord`] and [`Accounts`].
pub trait UserStore {
  /// The record for `username`, if registered.
  fn get(&self, username: &str) -> Result<Option<UserRecord>>;

  /// Inserts or replaces the record for `username`.
  fn put(&mut self, username: &str, record: UserRecord) -> Result<()>;

  /// Deletes the record for `username`. Returns whether one existed.
  fn delete(&mut self, username: &str) -> Result<bool>;

  /// All registered usernames, sorted.
  fn usernames(&self) -> Result<Vec<String>>;

  /// Whether `username` is registered.
  fn contains(&self, username: &str) -> Result<bool> { Ok(self.get(username)?.is_some()) }
}

impl<S: UserStore + ?Sized> UserStore for Box<S> {
  fn get(&self, username: &str) -> Result<Option<UserRecord>> { (**self).get(username) }

  fn put(&mut self, username: &str, record: UserRecord) -> Result<()> {
    (**self).put(username, record)
  }

  fn delete(&mut self, username: &str) -> Result<bool> { (**self).delete(username) }

  fn usernames(&self) -> Result<Vec<String>> { (**self).usernames() }

  fn contains(&self, username: &str) -> Result<bool> { (**self).contains(username) }
}

/// Creates the parent directory of `path` if it is missing.
fn ensure_parent(path: &Path) -> Result<()> {
  if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
    fs::create_dir_all(parent)?;
  }
  Ok(())
}
