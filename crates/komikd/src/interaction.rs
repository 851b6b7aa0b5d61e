//! Everything the commands say to, or ask of, the person at the terminal.

use console::style;
use dialoguer::{Confirm, Password};

use super::*;

pub static INFO_PREFIX: &str = "ℹ ";
pub static SUCCESS_PREFIX: &str = "✓ ";
pub static ERROR_PREFIX: &str = "✗ ";
pub static WARNING_PREFIX: &str = "! ";
pub static ITEM_PREFIX: &str = "├─";
pub static LAST_ITEM_PREFIX: &str = "└─";
pub static CONTINUE_PREFIX: &str = "│  ";
pub static BULLET: &str = "•";
pub static ARROW: &str = "→";

/// Something a command wants to show.
#[derive(Debug)]
pub enum ResponseContent<'a> {
  Series { series: &'a Series, bookmarked: bool },
  SeriesList(&'a [SeriesSummary]),
  Chapters(&'a [ChapterListing]),
  Pages { pages: &'a ChapterPages, navigation: Option<&'a ChapterNavigation> },
  Genres(&'a [Genre]),
  Updates(&'a [LatestUpdate]),
  Entries { heading: &'a str, entries: &'a [Entry] },
  Settings(&'a Config),
  Success(&'a str),
  Info(&'a str),
  Warning(&'a str),
}

/// How commands talk to the user.
pub trait UserInteraction {
  fn confirm(&self, message: &str) -> Result<bool>;
  fn password(&self, message: &str) -> Result<String>;
  fn reply(&self, content: ResponseContent) -> Result<()>;
}

impl UserInteraction for Cli {
  fn confirm(&self, message: &str) -> Result<bool> {
    if self.accept_defaults {
      return Ok(true);
    }
    Ok(Confirm::new().with_prompt(message).default(false).interact()?)
  }

  fn password(&self, message: &str) -> Result<String> {
    if self.accept_defaults {
      return Err(KomikdError::Input(format!("{message}: pass it with --password")));
    }
    Ok(Password::new().with_prompt(message).interact()?)
  }

  fn reply(&self, content: ResponseContent) -> Result<()> {
    match content {
      ResponseContent::Series { series, bookmarked } => print_series(series, bookmarked),
      ResponseContent::SeriesList(list) => {
        if list.is_empty() {
          println!("{} No manga found", style(INFO_PREFIX).blue());
        }
        for (summary, prefix) in with_tree_prefix(list) {
          println!(
            "{} {} {}",
            style(prefix).dim(),
            style(&summary.title).bold(),
            style(format!("[{}]", summary.status)).dim()
          );
          println!("{}   {}", style(CONTINUE_PREFIX).dim(), style(&summary.id).cyan());
        }
      },
      ResponseContent::Chapters(chapters) => {
        if chapters.is_empty() {
          println!("{} No chapters available in the configured languages", style(INFO_PREFIX).blue());
        }
        for (chapter, prefix) in with_tree_prefix(chapters) {
          println!("{} {}", style(prefix).dim(), chapter_line(chapter));
          println!("{}   {}", style(CONTINUE_PREFIX).dim(), style(&chapter.id).cyan());
        }
      },
      ResponseContent::Pages { pages, navigation } => print_pages(pages, navigation),
      ResponseContent::Genres(genres) =>
        for (genre, prefix) in with_tree_prefix(genres) {
          println!("{} {} {}", style(prefix).dim(), style(&genre.name).bold(), style(&genre.id).cyan());
        },
      ResponseContent::Updates(updates) =>
        for (update, prefix) in with_tree_prefix(updates) {
          println!(
            "{} {} {} {}",
            style(prefix).dim(),
            style(&update.title).bold(),
            style(&update.chapter).yellow(),
            style(&update.relative_time).dim()
          );
          println!("{}   {}", style(CONTINUE_PREFIX).dim(), style(&update.chapter_id).cyan());
        },
      ResponseContent::Entries { heading, entries } => {
        println!("{} {}", style(INFO_PREFIX).blue(), style(heading).bold());
        if entries.is_empty() {
          println!("{} (empty)", style(LAST_ITEM_PREFIX).dim());
        }
        for (entry, prefix) in with_tree_prefix(entries) {
          println!("{} {} {}", style(prefix).dim(), entry.title, style(&entry.id).cyan());
        }
      },
      ResponseContent::Settings(config) => print_settings(config),
      ResponseContent::Success(message) => println!("{} {}", style(SUCCESS_PREFIX).green(), message),
      ResponseContent::Info(message) => println!("{} {}", style(INFO_PREFIX).blue(), message),
      ResponseContent::Warning(message) => println!("{} {}", style(WARNING_PREFIX).yellow(), message),
    }
    Ok(())
  }
}

/// Pairs each item with the tree glyph it should be printed after.
fn with_tree_prefix<T>(items: &[T]) -> impl Iterator<Item = (&T, &'static str)> {
  let last = items.len().saturating_sub(1);
  items
    .iter()
    .enumerate()
    .map(move |(i, item)| (item, if i == last { LAST_ITEM_PREFIX } else { ITEM_PREFIX }))
}

fn chapter_line(chapter: &ChapterListing) -> String {
  let number = chapter.chapter.as_deref().map_or_else(|| "Oneshot".to_string(), |n| format!("Ch. {n}"));
  let mut line = style(number).bold().to_string();
  if let Some(title) = &chapter.title {
    line.push_str(&format!(" {title}"));
  }
  line.push_str(&format!(" [{}]", chapter.language));
  if !chapter.group_names.is_empty() {
    line.push_str(&format!(" {}", style(chapter.group_names.join(", ")).magenta()));
  }
  if let Some(published) = chapter.published_at {
    line.push_str(&format!(" {}", style(published.format("%Y-%m-%d")).dim()));
  }
  line
}

fn print_series(series: &Series, bookmarked: bool) {
  let mark = if bookmarked { format!(" {}", style("★ bookmarked").yellow()) } else { String::new() };
  println!("{} {}{mark}", style(BULLET).cyan(), style(&series.title).bold());
  println!("{} Status: {}", style(ITEM_PREFIX).dim(), series.status);
  if let Some(year) = series.year {
    println!("{} Year: {year}", style(ITEM_PREFIX).dim());
  }
  if let Some(author) = &series.author {
    println!("{} Author: {author}", style(ITEM_PREFIX).dim());
  }
  if let Some(artist) = &series.artist {
    println!("{} Artist: {artist}", style(ITEM_PREFIX).dim());
  }
  if !series.tags.is_empty() {
    println!("{} Tags: {}", style(ITEM_PREFIX).dim(), series.tags.join(", "));
  }
  println!("{} Cover: {}", style(ITEM_PREFIX).dim(), style(&series.cover_url).cyan());
  println!("{} {}", style(LAST_ITEM_PREFIX).dim(), series.description);
}

fn print_pages(pages: &ChapterPages, navigation: Option<&ChapterNavigation>) {
  let number = pages.chapter.as_deref().unwrap_or("?");
  println!(
    "{} Chapter {number} {} ({} pages, {})",
    style(BULLET).cyan(),
    style(&pages.title).bold(),
    pages.pages.len(),
    pages.image_set.path_segment()
  );
  for (page, prefix) in with_tree_prefix(&pages.pages) {
    println!("{} {page}", style(prefix).dim());
  }
  if let Some(navigation) = navigation {
    let link = |link: &Option<ChapterLink>| match link {
      Some(link) => format!("{} ({})", link.chapter.as_deref().unwrap_or("?"), link.id),
      None => "none".to_string(),
    };
    println!("{} Previous: {}", style(ARROW).cyan(), link(&navigation.prev));
    println!("{} Next: {}", style(ARROW).cyan(), link(&navigation.next));
  }
}

fn print_settings(config: &Config) {
  let reader = &config.reader;
  println!("{} {}", style(INFO_PREFIX).blue(), style("Reader settings").bold());
  println!("{} mode: {}", style(ITEM_PREFIX).dim(), reader.mode);
  println!("{} direction: {}", style(ITEM_PREFIX).dim(), reader.direction);
  println!("{} quality: {}", style(ITEM_PREFIX).dim(), reader.quality);
  println!("{} languages: {}", style(ITEM_PREFIX).dim(), config.languages.join(", "));
  println!("{} preferred-language: {}", style(ITEM_PREFIX).dim(), config.preferred_language);
  println!("{} store: {} ({})", style(ITEM_PREFIX).dim(), config.store.backend, config.store.path.display());
  println!("{} session: {}", style(LAST_ITEM_PREFIX).dim(), config.session_path.display());
}
