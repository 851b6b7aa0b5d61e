use komik::store::{Accounts, Entry, JsonFileStore, MemoryStore, Session, SqliteStore, HISTORY_LIMIT};

use super::*;

mod accounts;

/// Accounts over each store, the file-backed ones inside a fresh temp directory.
fn accounts() -> (Vec<(&'static str, Accounts<Box<dyn UserStore>>)>, TempDir) {
  let dir = tempdir().unwrap();
  let stores: Vec<(&'static str, Box<dyn UserStore>)> = vec![
    ("memory", Box::new(MemoryStore::new())),
    ("json", Box::new(JsonFileStore::open(dir.path().join("users.json")).unwrap())),
    ("sqlite", Box::new(SqliteStore::open(dir.path().join("users.db")).unwrap())),
  ];
  (stores.into_iter().map(|(name, store)| (name, Accounts::new(store))).collect(), dir)
}

/// Registers and logs in `alice`.
fn logged_in(accounts: &mut Accounts<Box<dyn UserStore>>) -> Session {
  let mut session = Session::new();
  accounts.register("alice", "pw").unwrap();
  accounts.login(&mut session, "alice", "pw").unwrap();
  session
}

fn ids(entries: &[Entry]) -> Vec<&str> { entries.iter().map(|e| e.id.as_str()).collect() }
