use super::*;

/// Account, bookmark, and history operations over a [`UserStore`].
///
/// Reads made while logged out return empty results; mutations made while logged out fail with
/// [`KomikError::NotLoggedIn`]. A mutation for a session whose user has since been removed fails
/// with [`KomikError::UnknownUser`].
#[derive(Debug, Clone, Default)]
pub struct Accounts<S> {
  store: S,
}

impl<S: UserStore> Accounts<S> {
  /// Wraps a store.
  pub fn new(store: S) -> Self { Self { store } }

  /// The underlying store.
  pub fn store(&self) -> &S { &self.store }

  /// Unwraps the underlying store.
  pub fn into_inner(self) -> S { self.store }

  /// Creates a user with no bookmarks or history.
  ///
  /// # Errors
  ///
  /// - [`KomikError::InvalidUsername`] if the name is empty or padded with whitespace, since the
  ///   session file could not hold it
  /// - [`KomikError::UsernameTaken`] if the name is registered; the existing record is left as is
  pub fn register(&mut self, username: &str, password: &str) -> Result<()> {
    if username.is_empty() || username.trim() != username {
      return Err(KomikError::InvalidUsername(username.to_string()));
    }
    if self.store.contains(username)? {
      return Err(KomikError::UsernameTaken(username.to_string()));
    }
    self.store.put(username, UserRecord::new(password))?;
    debug!("Registered user {username}");
    Ok(())
  }

  /// Logs `username` in when `password` matches.
  ///
  /// The session is only changed on success.
  pub fn login(&self, session: &mut Session, username: &str, password: &str) -> Result<()> {
    let record =
      self.store.get(username)?.ok_or_else(|| KomikError::UsernameNotFound(username.to_string()))?;
    if record.password != password {
      return Err(KomikError::WrongPassword);
    }
    session.set(username);
    debug!("Logged in as {username}");
    Ok(())
  }

  /// Ends the session. Does nothing when nobody is logged in.
  pub fn logout(&self, session: &mut Session) {
    if let Some(user) = session.clear() {
      debug!("Logged out {user}");
    }
  }

  /// The logged in username, without checking that the user still exists.
  pub fn current_user<'a>(&self, session: &'a Session) -> Option<&'a str> { session.current() }

  /// Whether the logged in user bookmarked `series_id`; `false` when logged out.
  pub fn is_bookmarked(&self, session: &Session, series_id: &str) -> Result<bool> {
    Ok(self.record(session)?.is_some_and(|record| record.is_bookmarked(series_id)))
  }

  /// Bookmarks of the logged in user, oldest first; empty when logged out.
  pub fn bookmarks(&self, session: &Session) -> Result<Vec<Entry>> {
    Ok(self.record(session)?.map(|record| record.bookmarks).unwrap_or_default())
  }

  /// Reading history of the logged in user, most recent first; empty when logged out.
  pub fn history(&self, session: &Session) -> Result<Vec<Entry>> {
    Ok(self.record(session)?.map(|record| record.history).unwrap_or_default())
  }

  /// Bookmarks a series. Bookmarking it again changes nothing.
  pub fn add_bookmark(&mut self, session: &Session, series_id: &str, title: &str) -> Result<()> {
    self.update(session, |record| {
      record.add_bookmark(Entry::new(series_id, title));
    })
  }

  /// Removes a bookmark. Removing one that does not exist changes nothing.
  pub fn remove_bookmark(&mut self, session: &Session, series_id: &str) -> Result<()> {
    self.update(session, |record| {
      record.remove_bookmark(series_id);
    })
  }

  /// Records that a series was viewed, moving it to the front of the history.
  pub fn add_history(&mut self, session: &Session, series_id: &str, title: &str) -> Result<()> {
    self.update(session, |record| record.push_history(Entry::new(series_id, title)))
  }

  /// Deletes a user, logging the session out if it belonged to them. Returns whether the user
  /// existed.
  pub fn remove_user(&mut self, session: &mut Session, username: &str) -> Result<bool> {
    let existed = self.store.delete(username)?;
    if session.current() == Some(username) {
      session.clear();
    }
    Ok(existed)
  }

  /// Record of the logged in user, `None` when logged out or when the user is gone.
  fn record(&self, session: &Session) -> Result<Option<UserRecord>> {
    match session.current() {
      Some(user) => self.store.get(user),
      None => Ok(None),
    }
  }

  /// Loads the logged in user's record, applies `change`, and writes it back.
  fn update(&mut self, session: &Session, change: impl FnOnce(&mut UserRecord)) -> Result<()> {
    let user = session.current().ok_or(KomikError::NotLoggedIn)?;
    let mut record =
      self.store.get(user)?.ok_or_else(|| KomikError::UnknownUser(user.to_string()))?;
    change(&mut record);
    self.store.put(user, record)
  }
}
