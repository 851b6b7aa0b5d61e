//! Listing commands: search, popular, browse, genres and latest updates.

use super::*;

/// Paging through a series list.
#[derive(Args, Clone, Debug)]
pub struct PageOptions {
  /// Maximum number of results
  #[arg(long, default_value_t = 20)]
  pub limit:  u32,
  /// Number of results to skip
  #[arg(long, default_value_t = 0)]
  pub offset: u32,
}

/// Filter options for [`AppCommands::Browse`].
#[derive(Args, Clone, Debug)]
pub struct BrowseOptions {
  /// Title search text
  #[arg(long)]
  pub title: Option<String>,

  /// Accepted status (ongoing, completed, hiatus, cancelled); repeatable
  #[arg(long)]
  pub status: Vec<String>,

  /// Tag id every result must carry; repeatable
  #[arg(long)]
  pub tag: Vec<String>,

  /// Sort order (popular, latest, newest, title, rating)
  #[arg(long)]
  pub order: Option<String>,

  #[command(flatten)]
  pub page: PageOptions,
}

/// Function for the [`AppCommands::Search`] in the CLI.
pub async fn search<I: UserInteraction>(interaction: &I, app: &App, query: &str, limit: u32) -> Result<()> {
  interaction.reply(ResponseContent::Info(&format!("Searching for: {query}")))?;
  let results = app.mangadex.search(query, limit).await?;
  interaction.reply(ResponseContent::SeriesList(&results))
}

/// Function for the [`AppCommands::Popular`] in the CLI.
pub async fn popular<I: UserInteraction>(interaction: &I, app: &App, page: PageOptions) -> Result<()> {
  let results = app.mangadex.popular(page.limit, page.offset).await?;
  interaction.reply(ResponseContent::SeriesList(&results))
}

/// Function for the [`AppCommands::Browse`] in the CLI.
pub async fn browse<I: UserInteraction>(interaction: &I, app: &App, options: BrowseOptions) -> Result<()> {
  let BrowseOptions { title, status, tag, order, page } = options;

  let mut filter = SeriesFilter::default();
  if let Some(title) = title {
    filter = filter.with_title(title);
  }
  for status in status {
    filter = filter.with_status(status.parse::<SeriesStatus>()?);
  }
  for tag in tag {
    filter = filter.with_tag(tag);
  }
  if let Some(order) = order {
    filter = filter.ordered_by(order.parse::<SeriesOrder>()?);
  }
  debug!("Browsing with {filter:?}");

  let results = app.mangadex.browse(&filter, page.limit, page.offset).await?;
  interaction.reply(ResponseContent::SeriesList(&results))
}

/// Function for the [`AppCommands::Genres`] in the CLI.
pub async fn genres<I: UserInteraction>(interaction: &I, app: &App) -> Result<()> {
  let genres = app.mangadex.genres().await?;
  interaction.reply(ResponseContent::Genres(&genres))
}

/// Function for the [`AppCommands::Genre`] in the CLI.
pub async fn genre<I: UserInteraction>(
  interaction: &I,
  app: &App,
  genre_id: &str,
  page: PageOptions,
) -> Result<()> {
  let results = app.mangadex.by_genre(genre_id, page.limit, page.offset).await?;
  interaction.reply(ResponseContent::SeriesList(&results))
}

/// Function for the [`AppCommands::Latest`] in the CLI.
pub async fn latest<I: UserInteraction>(interaction: &I, app: &App, limit: u32) -> Result<()> {
  let updates = app.mangadex.latest_updates(limit).await?;
  if updates.is_empty() {
    return interaction.reply(ResponseContent::Info("No recent chapters found"));
  }
  interaction.reply(ResponseContent::Updates(&updates))
}
