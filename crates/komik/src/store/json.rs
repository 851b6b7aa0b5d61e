use super::*;

/// [`UserStore`] holding every user in a single JSON document.
///
/// The file maps usernames to records:
///
/// ```json
/// {
///   "alice": {
///     "password": "hunter2",
///     "bookmarks": [{ "id": "series-1", "title": "Frieren" }],
///     "history": []
///   }
/// }
/// ```
///
/// Every mutation reads the whole mapping, changes one entry, and writes the whole mapping back.
/// Two processes writing at the same time do not merge: the last writer wins.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
  path: PathBuf,
}

impl JsonFileStore {
  /// Uses the document at `path`, which is created on first write.
  pub fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref().to_path_buf();
    if path.is_dir() {
      return Err(KomikError::Config(format!("{} is a directory", path.display())));
    }
    Ok(Self { path })
  }

  /// Location of the document.
  pub fn path(&self) -> &Path { &self.path }

  /// The whole mapping; a missing or blank file is an empty mapping.
  fn load(&self) -> Result<BTreeMap<String, UserRecord>> {
    match fs::read_to_string(&self.path) {
      Ok(contents) if contents.trim().is_empty() => Ok(BTreeMap::new()),
      Ok(contents) => Ok(serde_json::from_str(&contents)?),
      Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
      Err(e) => Err(e.into()),
    }
  }

  fn write(&self, users: &BTreeMap<String, UserRecord>) -> Result<()> {
    ensure_parent(&self.path)?;
    fs::write(&self.path, serde_json::to_string_pretty(users)?)?;
    trace!("Wrote {} users to {}", users.len(), self.path.display());
    Ok(())
  }
}

impl UserStore for JsonFileStore {
  fn get(&self, username: &str) -> Result<Option<UserRecord>> {
    Ok(self.load()?.remove(username))
  }

  fn put(&mut self, username: &str, record: UserRecord) -> Result<()> {
    let mut users = self.load()?;
    users.insert(username.to_string(), record);
    self.write(&users)
  }

  fn delete(&mut self, username: &str) -> Result<bool> {
    let mut users = self.load()?;
    let existed = users.remove(username).is_some();
    if existed {
      self.write(&users)?;
    }
    Ok(existed)
  }

  fn usernames(&self) -> Result<Vec<String>> { Ok(self.load()?.into_keys().collect()) }
}
