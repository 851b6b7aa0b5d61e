use rusqlite::{params, Connection, OptionalExtension, Transaction};

use super::*;

/// [`UserStore`] backed by a SQLite database.
///
/// Users live in one table; bookmarks and history are child tables ordered by position and
/// removed together with their user.
pub struct SqliteStore {
  conn: Connection,
}

impl SqliteStore {
  /// Opens an existing database or creates a new one at `path`, applying the schema.
  ///
  /// ```no_run
  /// # use komik::store::{SqliteStore, UserStore};
  /// # fn example() -> Result<(), komik::error::KomikError> {
  /// let store = SqliteStore::open("users.db")?;
  /// println!("{} users", store.usernames()?.len());
  /// # Ok(())
  /// # }
  /// ```
  pub fn open(path: impl AsRef<Path>) -> Result<Self> {
    ensure_parent(path.as_ref())?;
    Self::init(Connection::open(path.as_ref())?)
  }

  /// A private in-memory database.
  pub fn open_in_memory() -> Result<Self> { Self::init(Connection::open_in_memory()?) }

  fn init(conn: Connection) -> Result<Self> {
    conn
      .execute_batch(include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/migrations/init.sql")))?;
    Ok(Self { conn })
  }

  fn entries(&self, table: &str, username: &str) -> Result<Vec<Entry>> {
    let mut stmt = self.conn.prepare_cached(&format!(
      "SELECT series_id, title FROM {table} WHERE username = ?1 ORDER BY position"
    ))?;
    let entries = stmt
      .query_map(params![username], |row| Ok(Entry { id: row.get(0)?, title: row.get(1)? }))?
      .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(entries)
  }
}

/// Replaces every row of `table` belonging to `username` with `entries`, in order.
fn replace_entries(tx: &Transaction, table: &str, username: &str, entries: &[Entry]) -> Result<()> {
  tx.execute(&format!("DELETE FROM {table} WHERE username = ?1"), params![username])?;
  let mut stmt = tx.prepare_cached(&format!(
    "INSERT INTO {table} (username, position, series_id, title) VALUES (?1, ?2, ?3, ?4)"
  ))?;
  for (position, entry) in entries.iter().enumerate() {
    stmt.execute(params![username, position as i64, entry.id, entry.title])?;
  }
  Ok(())
}

impl UserStore for SqliteStore {
  fn get(&self, username: &str) -> Result<Option<UserRecord>> {
    let password: Option<String> = self
      .conn
      .query_row("SELECT password FROM users WHERE username = ?1", params![username], |row| row.get(0))
      .optional()?;

    let Some(password) = password else {
      return Ok(None);
    };
    Ok(Some(UserRecord {
      password,
      bookmarks: self.entries("bookmarks", username)?,
      history: self.entries("history", username)?,
    }))
  }

  fn put(&mut self, username: &str, record: UserRecord) -> Result<()> {
    let tx = self.conn.transaction()?;
    tx.execute(
      "INSERT INTO users (username, password) VALUES (?1, ?2)
       ON CONFLICT (username) DO UPDATE SET password = excluded.password",
      params![username, record.password],
    )?;
    replace_entries(&tx, "bookmarks", username, &record.bookmarks)?;
    replace_entries(&tx, "history", username, &record.history)?;
    tx.commit()?;
    Ok(())
  }

  fn delete(&mut self, username: &str) -> Result<bool> {
    let removed = self.conn.execute("DELETE FROM users WHERE username = ?1", params![username])?;
    Ok(removed > 0)
  }

  fn usernames(&self) -> Result<Vec<String>> {
    let mut stmt = self.conn.prepare_cached("SELECT username FROM users ORDER BY username")?;
    let names = stmt.query_map([], |row| row.get(0))?.collect::<rusqlite::Result<Vec<String>>>()?;
    Ok(names)
  }

  fn contains(&self, username: &str) -> Result<bool> {
    let found = self
      .conn
      .query_row("SELECT 1 FROM users WHERE username = ?1", params![username], |_| Ok(()))
      .optional()?;
    Ok(found.is_some())
  }
}
