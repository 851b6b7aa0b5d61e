//! Bookmarks of the logged-in user.

use super::*;

/// Bookmark subcommands.
#[derive(Subcommand, Clone, Debug)]
pub enum BookmarkCommands {
  /// Bookmark a series
  Add {
    /// Series UUID or MangaDex URL
    id: String,

    /// Title to store; looked up on MangaDex when omitted
    #[arg(long)]
    title: Option<String>,
  },

  /// Remove a bookmark
  Remove {
    /// Series UUID or MangaDex URL
    id: String,
  },

  /// List bookmarks, oldest first
  List,

  /// Tell whether a series is bookmarked
  Check {
    /// Series UUID or MangaDex URL
    id: String,
  },
}

/// Function for the [`AppCommands::Bookmark`] in the CLI.
pub async fn bookmark<I: UserInteraction>(interaction: &I, app: &mut App, cmd: BookmarkCommands) -> Result<()> {
  if !app.session.is_logged_in() {
    return Err(KomikError::NotLoggedIn.into());
  }

  match cmd {
    BookmarkCommands::Add { id, title } => {
      let id = extract_id(&id)?;
      if app.accounts.is_bookmarked(&app.session, &id)? {
        return interaction.reply(ResponseContent::Info("Already bookmarked"));
      }
      let title = match title {
        Some(title) => title,
        None => app.mangadex.series(&id).await?.title,
      };
      app.accounts.add_bookmark(&app.session, &id, &title)?;
      interaction.reply(ResponseContent::Success(&format!("Bookmarked {title}")))
    },
    BookmarkCommands::Remove { id } => {
      let id = extract_id(&id)?;
      if !app.accounts.is_bookmarked(&app.session, &id)? {
        return interaction.reply(ResponseContent::Info("Not bookmarked"));
      }
      app.accounts.remove_bookmark(&app.session, &id)?;
      interaction.reply(ResponseContent::Success("Bookmark removed"))
    },
    BookmarkCommands::List => {
      let bookmarks = app.accounts.bookmarks(&app.session)?;
      interaction.reply(ResponseContent::Entries { heading: "Bookmarks", entries: &bookmarks })
    },
    BookmarkCommands::Check { id } => {
      let id = extract_id(&id)?;
      let message = if app.accounts.is_bookmarked(&app.session, &id)? { "Bookmarked" } else { "Not bookmarked" };
      interaction.reply(ResponseContent::Info(message))
    },
  }
}
