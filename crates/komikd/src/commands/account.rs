//! Local accounts: register, login, logout, and the reading history.

use super::*;

/// Uses `password` when given, otherwise asks for it.
fn password_or_prompt<I: UserInteraction>(interaction: &I, password: Option<String>) -> Result<String> {
  match password {
    Some(password) => Ok(password),
    None => interaction.password("Password"),
  }
}

/// Function for the [`AppCommands::Register`] in the CLI.
pub fn register<I: UserInteraction>(
  interaction: &I,
  app: &mut App,
  username: &str,
  password: Option<String>,
) -> Result<()> {
  let username = username.trim();
  let password = password_or_prompt(interaction, password)?;
  app.accounts.register(username, &password)?;
  interaction.reply(ResponseContent::Success(&format!(
    "Registered {username}. Log in with `komik login {username}`"
  )))
}

/// Function for the [`AppCommands::Login`] in the CLI.
pub fn login<I: UserInteraction>(
  interaction: &I,
  app: &mut App,
  username: &str,
  password: Option<String>,
) -> Result<()> {
  let password = password_or_prompt(interaction, password)?;
  app.accounts.login(&mut app.session, username.trim(), &password)?;
  app.save_session()?;
  interaction.reply(ResponseContent::Success(&format!("Logged in as {}", username.trim())))
}

/// Function for the [`AppCommands::Logout`] in the CLI.
pub fn logout<I: UserInteraction>(interaction: &I, app: &mut App) -> Result<()> {
  if !app.session.is_logged_in() {
    return interaction.reply(ResponseContent::Info("Nobody is logged in"));
  }
  app.accounts.logout(&mut app.session);
  app.save_session()?;
  interaction.reply(ResponseContent::Success("Logged out"))
}

/// Function for the [`AppCommands::Unregister`] in the CLI.
pub fn unregister<I: UserInteraction>(interaction: &I, app: &mut App, username: &str) -> Result<()> {
  if !interaction.confirm(&format!(
    "This removes {username} together with their bookmarks and history. Continue?"
  ))? {
    return interaction.reply(ResponseContent::Info("Nothing was removed"));
  }
  if app.accounts.remove_user(&mut app.session, username)? {
    app.save_session()?;
    interaction.reply(ResponseContent::Success(&format!("Removed {username}")))
  } else {
    interaction.reply(ResponseContent::Warning(&format!("No user named {username}")))
  }
}

/// Function for the [`AppCommands::Whoami`] in the CLI.
pub fn whoami<I: UserInteraction>(interaction: &I, app: &App) -> Result<()> {
  match app.accounts.current_user(&app.session) {
    Some(user) if app.accounts.store().contains(user)? =>
      interaction.reply(ResponseContent::Info(&format!("Logged in as {user}"))),
    Some(user) => interaction
      .reply(ResponseContent::Warning(&format!("Logged in as {user}, but that user no longer exists"))),
    None => interaction.reply(ResponseContent::Info("Not logged in")),
  }
}

/// Function for the [`AppCommands::History`] in the CLI.
pub fn history<I: UserInteraction>(interaction: &I, app: &App) -> Result<()> {
  if !app.session.is_logged_in() {
    return Err(KomikError::NotLoggedIn.into());
  }
  let history = app.accounts.history(&app.session)?;
  interaction.reply(ResponseContent::Entries { heading: "Recently viewed", entries: &history })
}
