//! View models returned by the [`mangadex`](crate::mangadex) service.
//!
//! These are flat, already-resolved shapes: titles are picked from localized maps, cover and page
//! URLs are fully built, and scanlation group ids are replaced by names. They are immutable
//! snapshots and are not cached beyond the caller's use.

use super::*;

/// Literal used when a scanlation group cannot be resolved.
pub const UNKNOWN_GROUP: &str = "Unknown Group";

/// Full details of a manga series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
  /// Opaque upstream identifier
  pub id:          String,
  /// Display title
  pub title:       String,
  /// Cover image URL, or the configured placeholder
  pub cover_url:   String,
  /// Description text
  pub description: String,
  /// Publication status
  pub status:      SeriesStatus,
  /// Year of first publication
  pub year:        Option<i32>,
  /// Tag names
  pub tags:        Vec<String>,
  /// Author name, when the lookup succeeded
  pub author:      Option<String>,
  /// Artist name, when distinct from the author and the lookup succeeded
  pub artist:      Option<String>,
}

/// Compact series entry used by list views.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesSummary {
  /// Opaque upstream identifier
  pub id:        String,
  /// Display title
  pub title:     String,
  /// Cover image URL, or the configured placeholder
  pub cover_url: String,
  /// Publication status
  pub status:    SeriesStatus,
}

/// Lifecycle of a series.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesStatus {
  /// Still being published
  Ongoing,
  /// Finished
  Completed,
  /// Paused
  Hiatus,
  /// Abandoned
  Cancelled,
  /// Missing or unrecognised upstream value
  #[default]
  Unknown,
}

/// One chapter in a series listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChapterListing {
  /// Opaque upstream identifier
  pub id:           String,
  /// Chapter number as published; not guaranteed to be numeric
  pub chapter:      Option<String>,
  /// Chapter title
  pub title:        Option<String>,
  /// Translated language code
  pub language:     String,
  /// Number of pages reported by the upstream
  pub pages:        Option<u32>,
  /// Publication timestamp
  pub published_at: Option<DateTime<Utc>>,
  /// Scanlation group ids in upstream order
  pub group_ids:    Vec<String>,
  /// Resolved group names, parallel to `group_ids`
  pub group_names:  Vec<String>,
}

/// Which image manifest a page list was built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageSet {
  /// Full resolution images
  Data,
  /// Reduced size images
  DataSaver,
}

/// Everything needed to display a chapter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChapterPages {
  /// Opaque upstream identifier
  pub id:                  String,
  /// Chapter title, empty when unknown
  pub title:               String,
  /// Chapter number, when known
  pub chapter:             Option<String>,
  /// Volume number, when known
  pub volume:              Option<String>,
  /// Translated language code
  pub translated_language: String,
  /// Content hash used in page URLs
  pub hash:                String,
  /// Manifest the page URLs were built from
  pub image_set:           ImageSet,
  /// Page image URLs in reading order; never empty
  pub pages:               Vec<String>,
}

/// A neighbouring chapter reduced to what navigation needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterLink {
  /// Opaque upstream identifier
  pub id:      String,
  /// Chapter number as published
  pub chapter: Option<String>,
}

/// Previous and next chapters around the one being read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterNavigation {
  /// Chapter before the current one
  pub prev: Option<ChapterLink>,
  /// Chapter after the current one
  pub next: Option<ChapterLink>,
}

/// A genre tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
  /// Opaque upstream identifier
  pub id:   String,
  /// Display name
  pub name: String,
}

/// Any upstream tag, genre or otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
  /// Opaque upstream identifier
  pub id:    String,
  /// Display name
  pub name:  String,
  /// Tag group, e.g. `genre`, `theme`, `format`
  pub group: String,
}

/// A recently published chapter together with its series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatestUpdate {
  /// Chapter identifier
  pub chapter_id:    String,
  /// Series identifier
  pub series_id:     String,
  /// Series title
  pub title:         String,
  /// Label such as "Chapter 12"
  pub chapter:       String,
  /// Publication timestamp
  pub published_at:  Option<DateTime<Utc>>,
  /// Human readable age, e.g. "3 hours ago"
  pub relative_time: String,
  /// Cover image URL, or the configured placeholder
  pub cover_url:     String,
}

/// Requested page image quality.
///
/// Parsing never fails: `"low"` and `"medium"` select the data-saver manifest and anything else
/// selects full size. Deserializing follows the same rule.
///
/// ```
/// use komik::models::Quality;
///
/// assert_eq!("medium".parse::<Quality>().unwrap(), Quality::Medium);
/// assert_eq!("ultra".parse::<Quality>().unwrap(), Quality::High);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Quality {
  /// Data-saver images
  #[default]
  Low,
  /// Data-saver images
  Medium,
  /// Full size images
  High,
}

impl Quality {
  /// Manifest this quality asks for first.
  pub fn preferred_set(self) -> ImageSet {
    match self {
      Quality::Low | Quality::Medium => ImageSet::DataSaver,
      Quality::High => ImageSet::Data,
    }
  }
}

impl From<&str> for Quality {
  fn from(s: &str) -> Self {
    match s.trim().to_lowercase().as_str() {
      "low" => Quality::Low,
      "medium" => Quality::Medium,
      _ => Quality::High,
    }
  }
}

impl From<String> for Quality {
  fn from(s: String) -> Self { Quality::from(s.as_str()) }
}

impl FromStr for Quality {
  type Err = std::convert::Infallible;

  fn from_str(s: &str) -> std::result::Result<Self, Self::Err> { Ok(Quality::from(s)) }
}

impl Display for Quality {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Quality::Low => write!(f, "low"),
      Quality::Medium => write!(f, "medium"),
      Quality::High => write!(f, "high"),
    }
  }
}

impl ImageSet {
  /// Path segment used by the chapter server.
  pub fn path_segment(self) -> &'static str {
    match self {
      ImageSet::Data => "data",
      ImageSet::DataSaver => "data-saver",
    }
  }

  /// The other manifest.
  pub fn other(self) -> Self {
    match self {
      ImageSet::Data => ImageSet::DataSaver,
      ImageSet::DataSaver => ImageSet::Data,
    }
  }
}

impl SeriesStatus {
  /// Maps an upstream status string; anything unrecognised is [`SeriesStatus::Unknown`].
  pub fn from_upstream(value: Option<&str>) -> Self {
    match value.map(str::to_lowercase).as_deref() {
      Some("ongoing") => SeriesStatus::Ongoing,
      Some("completed") => SeriesStatus::Completed,
      Some("hiatus") => SeriesStatus::Hiatus,
      Some("cancelled") => SeriesStatus::Cancelled,
      _ => SeriesStatus::Unknown,
    }
  }

  /// Upstream spelling, absent for [`SeriesStatus::Unknown`].
  pub fn as_upstream(self) -> Option<&'static str> {
    match self {
      SeriesStatus::Ongoing => Some("ongoing"),
      SeriesStatus::Completed => Some("completed"),
      SeriesStatus::Hiatus => Some("hiatus"),
      SeriesStatus::Cancelled => Some("cancelled"),
      SeriesStatus::Unknown => None,
    }
  }
}

impl Display for SeriesStatus {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.as_upstream().unwrap_or("unknown"))
  }
}

impl FromStr for SeriesStatus {
  type Err = KomikError;

  fn from_str(s: &str) -> Result<Self> {
    match SeriesStatus::from_upstream(Some(s)) {
      SeriesStatus::Unknown if !s.eq_ignore_ascii_case("unknown") =>
        Err(KomikError::Config(format!("Unknown series status \"{s}\""))),
      status => Ok(status),
    }
  }
}

impl ChapterNavigation {
  /// Finds the neighbours of `current` in an ascending chapter list.
  ///
  /// Both sides are absent when `current` is not in the list.
  ///
  /// ```
  /// use komik::models::{ChapterLink, ChapterNavigation};
  ///
  /// let link = |id: &str| ChapterLink { id: id.to_string(), chapter: None };
  /// let chapters = [link("a"), link("b"), link("c")];
  ///
  /// let nav = ChapterNavigation::locate(&chapters, "b");
  /// assert_eq!(nav.prev, Some(link("a")));
  /// assert_eq!(nav.next, Some(link("c")));
  /// ```
  pub fn locate(chapters: &[ChapterLink], current: &str) -> Self {
    let Some(index) = chapters.iter().position(|c| c.id == current) else {
      return Self::default();
    };
    Self {
      prev: index.checked_sub(1).and_then(|i| chapters.get(i)).cloned(),
      next: chapters.get(index + 1).cloned(),
    }
  }
}

/// Formats how long ago `published` was, relative to `now`.
///
/// Under an hour is "just now", under a day counts hours, anything older counts days.
pub fn relative_time(published: DateTime<Utc>, now: DateTime<Utc>) -> String {
  let hours = (now - published).num_hours();
  match hours {
    h if h < 1 => "just now".to_string(),
    1 => "1 hour ago".to_string(),
    h if h < 24 => format!("{h} hours ago"),
    h if h < 48 => "1 day ago".to_string(),
    h => format!("{} days ago", h / 24),
  }
}
