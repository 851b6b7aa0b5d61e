use super::*;

#[traced_test]
#[test]
fn test_register_then_login() {
  let (all, _dir) = accounts();
  for (name, mut accounts) in all {
    let mut session = Session::new();
    accounts.register("fresh", "secret").unwrap();
    accounts.login(&mut session, "fresh", "secret").unwrap();
    assert_eq!(accounts.current_user(&session), Some("fresh"), "{name}");
  }
}

#[traced_test]
#[test]
fn test_duplicate_register_keeps_existing_record() {
  let (all, _dir) = accounts();
  for (name, mut accounts) in all {
    let session = logged_in(&mut accounts);
    accounts.add_bookmark(&session, "s1", "One").unwrap();

    let err = accounts.register("alice", "other").unwrap_err();
    assert!(matches!(err, KomikError::UsernameTaken(ref user) if user == "alice"), "{name}");

    // Old password still works and the bookmark survived
    let mut again = Session::new();
    accounts.login(&mut again, "alice", "pw").unwrap();
    assert_eq!(ids(&accounts.bookmarks(&again).unwrap()), ["s1"], "{name}");
  }
}

#[traced_test]
#[test]
fn test_register_rejects_names_the_session_cannot_hold() {
  let (all, _dir) = accounts();
  for (name, mut accounts) in all {
    for bad in ["", " bob", "bob ", "\tbob"] {
      let err = accounts.register(bad, "pw").unwrap_err();
      assert!(matches!(err, KomikError::InvalidUsername(ref user) if user == bad), "{name}: {bad:?}");
    }
    assert!(accounts.login(&mut Session::new(), "bob", "pw").is_err(), "{name}");
  }
}

#[traced_test]
#[test]
fn test_login_survives_session_file_roundtrip() {
  let (all, dir) = accounts();
  for (name, mut accounts) in all {
    let path = dir.path().join(format!("{name}-session"));
    let mut session = Session::new();
    accounts.register("bob smith", "pw").unwrap();
    accounts.login(&mut session, "bob smith", "pw").unwrap();
    session.save(&path).unwrap();

    let reloaded = Session::load(&path).unwrap();
    assert_eq!(accounts.current_user(&reloaded), Some("bob smith"), "{name}");
  }
}

#[traced_test]
#[test]
fn test_failed_login_leaves_session_untouched() {
  let (all, _dir) = accounts();
  for (name, mut accounts) in all {
    let mut session = logged_in(&mut accounts);
    accounts.register("bob", "bobpw").unwrap();

    let err = accounts.login(&mut session, "bob", "wrong").unwrap_err();
    assert!(matches!(err, KomikError::WrongPassword), "{name}");
    assert_eq!(session.current(), Some("alice"), "{name}");

    let err = accounts.login(&mut session, "nobody", "pw").unwrap_err();
    assert!(matches!(err, KomikError::UsernameNotFound(_)), "{name}");
    assert_eq!(session.current(), Some("alice"), "{name}");

    let mut fresh = Session::new();
    accounts.login(&mut fresh, "bob", "BOBPW").unwrap_err();
    assert_eq!(fresh, Session::new(), "{name}");
  }
}

#[traced_test]
#[test]
fn test_logout() {
  let (all, _dir) = accounts();
  for (name, mut accounts) in all {
    let mut session = logged_in(&mut accounts);
    accounts.logout(&mut session);
    assert_eq!(accounts.current_user(&session), None, "{name}");
    // No-op when already logged out
    accounts.logout(&mut session);
    assert!(!session.is_logged_in(), "{name}");
  }
}

#[traced_test]
#[test]
fn test_bookmarks_are_unique_and_removable() {
  let (all, _dir) = accounts();
  for (name, mut accounts) in all {
    let session = logged_in(&mut accounts);

    accounts.add_bookmark(&session, "s1", "One").unwrap();
    accounts.add_bookmark(&session, "s1", "One").unwrap();
    accounts.add_bookmark(&session, "s2", "Two").unwrap();
    assert_eq!(ids(&accounts.bookmarks(&session).unwrap()), ["s1", "s2"], "{name}");
    assert!(accounts.is_bookmarked(&session, "s1").unwrap(), "{name}");

    accounts.remove_bookmark(&session, "s1").unwrap();
    accounts.remove_bookmark(&session, "missing").unwrap();
    assert_eq!(ids(&accounts.bookmarks(&session).unwrap()), ["s2"], "{name}");
    assert!(!accounts.is_bookmarked(&session, "s1").unwrap(), "{name}");
  }
}

#[traced_test]
#[test]
fn test_history_moves_repeats_to_front() {
  let (all, _dir) = accounts();
  for (name, mut accounts) in all {
    let session = logged_in(&mut accounts);
    accounts.add_history(&session, "A", "Series A").unwrap();
    accounts.add_history(&session, "B", "Series B").unwrap();
    accounts.add_history(&session, "A", "Series A").unwrap();
    assert_eq!(ids(&accounts.history(&session).unwrap()), ["A", "B"], "{name}");
  }
}

#[traced_test]
#[test]
fn test_history_keeps_most_recent_ten() {
  let (all, _dir) = accounts();
  for (name, mut accounts) in all {
    let session = logged_in(&mut accounts);
    for i in 1..=11 {
      accounts.add_history(&session, &format!("s{i}"), "t").unwrap();
    }
    let history = accounts.history(&session).unwrap();
    assert_eq!(history.len(), HISTORY_LIMIT, "{name}");
    assert_eq!(history.first().unwrap().id, "s11", "{name}");
    assert_eq!(history.last().unwrap().id, "s2", "{name}");
  }
}

#[traced_test]
#[test]
fn test_logged_out_reads_and_writes() {
  let (all, _dir) = accounts();
  for (name, mut accounts) in all {
    let session = Session::new();
    assert!(!accounts.is_bookmarked(&session, "s1").unwrap(), "{name}");
    assert!(accounts.bookmarks(&session).unwrap().is_empty(), "{name}");
    assert!(accounts.history(&session).unwrap().is_empty(), "{name}");

    for result in [
      accounts.add_bookmark(&session, "s1", "One"),
      accounts.remove_bookmark(&session, "s1"),
      accounts.add_history(&session, "s1", "One"),
    ] {
      assert!(matches!(result, Err(KomikError::NotLoggedIn)), "{name}");
    }
  }
}

#[traced_test]
#[test]
fn test_removed_user() {
  let (all, _dir) = accounts();
  for (name, mut accounts) in all {
    let mut session = logged_in(&mut accounts);
    let stale = session.clone();

    assert!(accounts.remove_user(&mut session, "alice").unwrap(), "{name}");
    assert!(!session.is_logged_in(), "{name}");
    assert!(!accounts.remove_user(&mut session, "alice").unwrap(), "{name}");

    // A session saved before the removal still names the user
    assert_eq!(accounts.current_user(&stale), Some("alice"), "{name}");
    assert!(accounts.bookmarks(&stale).unwrap().is_empty(), "{name}");
    let err = accounts.add_bookmark(&stale, "s1", "One").unwrap_err();
    assert!(matches!(err, KomikError::UnknownUser(ref user) if user == "alice"), "{name}");
  }
}

#[test]
fn test_session_survives_restart() -> TestResult<()> {
  let dir = tempdir()?;
  let store_path = dir.path().join("users.json");
  let session_path = dir.path().join("session");

  {
    let mut accounts = Accounts::new(JsonFileStore::open(&store_path)?);
    let mut session = Session::load(&session_path)?;
    accounts.register("alice", "pw")?;
    accounts.login(&mut session, "alice", "pw")?;
    accounts.add_bookmark(&session, "s1", "One")?;
    session.save(&session_path)?;
  }

  let accounts = Accounts::new(JsonFileStore::open(&store_path)?);
  let session = Session::load(&session_path)?;
  assert_eq!(accounts.current_user(&session), Some("alice"));
  assert!(accounts.is_bookmarked(&session, "s1")?);
  Ok(())
}
