//! Series details, chapter listings and chapter pages.

use super::*;

/// Options for [`AppCommands::Read`].
#[derive(Args, Clone, Debug)]
pub struct ReadOptions {
  /// Chapter UUID or MangaDex URL
  pub chapter: String,

  /// Series the chapter belongs to; enables previous/next links
  #[arg(long)]
  pub series: Option<String>,

  /// Image quality (low, medium, high); defaults to the reader settings
  #[arg(long)]
  pub quality: Option<Quality>,
}

/// Function for the [`AppCommands::Series`] in the CLI.
pub async fn series<I: UserInteraction>(interaction: &I, app: &mut App, id: &str) -> Result<()> {
  let id = extract_id(id)?;
  let series = app.mangadex.series(&id).await?;

  if app.session.is_logged_in() {
    if let Err(e) = app.accounts.add_history(&app.session, &series.id, &series.title) {
      interaction.reply(ResponseContent::Warning(&format!("Could not record history: {e}")))?;
    }
  }
  let bookmarked = app.accounts.is_bookmarked(&app.session, &series.id)?;

  interaction.reply(ResponseContent::Series { series: &series, bookmarked })
}

/// Function for the [`AppCommands::Chapters`] in the CLI.
pub async fn chapters<I: UserInteraction>(interaction: &I, app: &App, id: &str) -> Result<()> {
  let id = extract_id(id)?;
  let chapters = app.mangadex.chapters(&id).await?;
  interaction.reply(ResponseContent::Chapters(&chapters))
}

/// Function for the [`AppCommands::Read`] in the CLI.
pub async fn read<I: UserInteraction>(interaction: &I, app: &App, options: ReadOptions) -> Result<()> {
  let ReadOptions { chapter, series, quality } = options;
  let chapter_id = extract_id(&chapter)?;
  let quality = quality.unwrap_or(app.config.reader.quality);
  trace!("Reading {chapter_id} at {quality} quality");

  let pages = app.mangadex.chapter_pages(&chapter_id, quality).await?;
  let navigation = match series {
    Some(series) => Some(app.mangadex.chapter_navigation(&extract_id(&series)?, &chapter_id).await?),
    None => None,
  };

  interaction.reply(ResponseContent::Pages { pages: &pages, navigation: navigation.as_ref() })
}
