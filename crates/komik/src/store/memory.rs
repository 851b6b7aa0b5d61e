use super::*;

/// In-process [`UserStore`]; nothing survives the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
  users: BTreeMap<String, UserRecord>,
}

impl MemoryStore {
  /// An empty store.
  pub fn new() -> Self { Self::default() }
}

impl UserStore for MemoryStore {
  fn get(&self, username: &str) -> Result<Option<UserRecord>> { Ok(self.users.get(username).cloned()) }

  fn put(&mut self, username: &str, record: UserRecord) -> Result<()> {
    self.users.insert(username.to_string(), record);
    Ok(())
  }

  fn delete(&mut self, username: &str) -> Result<bool> { Ok(self.users.remove(username).is_some()) }

  fn usernames(&self) -> Result<Vec<String>> { Ok(self.users.keys().cloned().collect()) }
}
