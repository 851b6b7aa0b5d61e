use super::*;

/// Who is currently logged in.
///
/// A session is a plain value: [`Accounts`] reads and updates it but never stores it. To keep a
/// login across runs, [`save`](Session::save) it to a file holding just the username and
/// [`load`](Session::load) it back later.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
  user: Option<String>,
}

impl Session {
  /// A session with nobody logged in.
  pub fn new() -> Self { Self::default() }

  /// A session logged in as `username`.
  pub fn for_user(username: impl Into<String>) -> Self { Self { user: Some(username.into()) } }

  /// The logged in username, if any.
  pub fn current(&self) -> Option<&str> { self.user.as_deref() }

  /// Whether somebody is logged in.
  pub fn is_logged_in(&self) -> bool { self.user.is_some() }

  pub(crate) fn set(&mut self, username: &str) { self.user = Some(username.to_string()); }

  pub(crate) fn clear(&mut self) -> Option<String> { self.user.take() }

  /// Reads a session file. A missing or blank file means nobody is logged in.
  pub fn load(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    match fs::read_to_string(path) {
      Ok(contents) => {
        let user = Some(contents.trim()).filter(|name| !name.is_empty()).map(String::from);
        debug!("Loaded session from {}: {:?}", path.display(), user);
        Ok(Self { user })
      },
      Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::new()),
      Err(e) => Err(e.into()),
    }
  }

  /// Writes the session file, or removes it when nobody is logged in.
  pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    match &self.user {
      Some(user) => {
        ensure_parent(path)?;
        fs::write(path, user)?;
      },
      None => match fs::remove_file(path) {
        Err(e) if e.kind() != std::io::ErrorKind::NotFound => return Err(e.into()),
        _ => {},
      },
    }
    Ok(())
  }
}
