//! MangaDex endpoints and response normalization.
//!
//! [`MangaDex`] wraps an [`ApiClient`] with the base URLs, language filters, and display
//! preferences from [`Config`]. Each public operation issues one or more GET requests, parses the
//! raw responses through the shapes in [`wire`], and returns the flat view models from
//! [`crate::models`].
//!
//! Failures of a primary request are wrapped in [`KomikError::Context`] naming what was being
//! loaded (for example `Failed to load manga: ...`). Secondary lookups that only enrich a result,
//! such as group, author, and artist names, degrade to a fallback instead of failing the whole
//! operation.
//!
//! ```no_run
//! use komik::{mangadex::MangaDex, Config};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mangadex = MangaDex::new(&Config::default())?;
//! for genre in mangadex.genres().await? {
//!   println!("{} {}", genre.id, genre.name);
//! }
//! # Ok(())
//! # }
//! ```

use super::*;

mod chapter;
mod series;
mod updates;
pub mod wire;

pub use chapter::select_images;
pub use series::{SeriesFilter, SeriesOrder};

use self::wire::*;

/// Description used when a series has none in any language.
pub const NO_DESCRIPTION: &str = "No description available";

/// Largest page size the list endpoints accept.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Query for endpoints that take no parameters.
const NO_PARAMS: [(&str, &str); 0] = [];

lazy_static! {
  /// A bare MangaDex identifier, or a title/chapter URL that ends with one.
  static ref ID_PATTERN: Regex = Regex::new(
    r"^(?:https?://(?:www\.)?mangadex\.org/(?:title|manga|chapter)/)?([0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12})(?:[/?#].*)?$"
  )
  .expect("identifier pattern is valid");
}

/// Extracts a MangaDex identifier from a bare id or a `mangadex.org` title or chapter URL.
///
/// ```
/// use komik::mangadex::extract_id;
///
/// let id = "a96676e5-8ae2-425e-b549-7f15dd34a6d8";
/// assert_eq!(extract_id(id).unwrap(), id);
/// assert_eq!(extract_id(&format!("https://mangadex.org/title/{id}/komi-san")).unwrap(), id);
/// assert!(extract_id("komi-san").is_err());
/// ```
pub fn extract_id(input: &str) -> Result<String> {
  let input = input.trim();
  ID_PATTERN
    .captures(input)
    .and_then(|captures| captures.get(1))
    .map(|id| id.as_str().to_lowercase())
    .ok_or_else(|| KomikError::InvalidIdentifier(input.to_string()))
}

/// Client for the MangaDex API.
#[derive(Debug, Clone)]
pub struct MangaDex<T = HttpTransport> {
  /// Retrying JSON client
  client:             ApiClient<T>,
  /// API root, without a trailing slash
  api_base_url:       String,
  /// Cover image host, without a trailing slash
  uploads_base_url:   String,
  /// Cover URL used when a series has no cover art
  placeholder_cover:  String,
  /// Chapter translation languages to request
  languages:          Vec<String>,
  /// Language tried first when resolving localized text
  preferred_language: String,
  /// Page size used when walking a chapter feed
  chapter_page_size:  u32,
}

impl MangaDex<HttpTransport> {
  /// Creates a service backed by a real HTTP client.
  pub fn new(config: &Config) -> Result<Self> { Self::with_transport(config, HttpTransport::new()?) }
}

impl<T: Transport> MangaDex<T> {
  /// Creates a service over any [`Transport`].
  pub fn with_transport(config: &Config, transport: T) -> Result<Self> {
    config.validate()?;
    Ok(Self {
      client:             ApiClient::new(transport, config.retry.clone()),
      api_base_url:       config.api_base_url.trim_end_matches('/').to_string(),
      uploads_base_url:   config.uploads_base_url.trim_end_matches('/').to_string(),
      placeholder_cover:  config.placeholder_cover.clone(),
      languages:          config.languages.clone(),
      preferred_language: config.preferred_language.clone(),
      chapter_page_size:  config.chapter_page_size.clamp(1, MAX_PAGE_SIZE),
    })
  }

  /// The underlying client.
  pub fn client(&self) -> &ApiClient<T> { &self.client }

  /// Builds `{api_base_url}/{path}?{params}`.
  fn endpoint<I, K, V>(&self, path: &str, params: I) -> Result<Url>
  where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>, {
    let mut url = Url::parse(&format!("{}/{}", self.api_base_url, path))
      .map_err(|e| KomikError::Config(format!("Invalid API URL: {e}")))?;
    {
      let mut pairs = url.query_pairs_mut();
      for (key, value) in params {
        pairs.append_pair(key.as_ref(), value.as_ref());
      }
    }
    // `query_pairs_mut` leaves a dangling `?` behind when nothing was added
    if url.query() == Some("") {
      url.set_query(None);
    }
    Ok(url)
  }

  /// Fetches and parses one endpoint.
  async fn get<D, I, K, V>(&self, path: &str, params: I) -> Result<D>
  where
    D: DeserializeOwned,
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>, {
    let url = self.endpoint(path, params)?;
    self.client.fetch_json(&url).await
  }

  /// Resolves a localized map with the configured preference.
  fn text<'a>(&self, text: &'a LocalizedText) -> Option<&'a str> {
    text.resolve(&self.preferred_language)
  }

  /// Display title of a series.
  fn title(&self, manga: &MangaData) -> String {
    self.text(&manga.attributes.title).unwrap_or(&manga.id).to_string()
  }

  /// Cover URL for a series, or the placeholder when it has no cover art.
  fn cover_url(&self, manga: &MangaData) -> String {
    match manga.cover_file() {
      Some(file) => format!("{}/covers/{}/{}.256.jpg", self.uploads_base_url, manga.id, file),
      None => self.placeholder_cover.clone(),
    }
  }

  /// Reduces a manga entity to a list entry.
  fn summary(&self, manga: &MangaData) -> SeriesSummary {
    SeriesSummary {
      id:        manga.id.clone(),
      title:     self.title(manga),
      cover_url: self.cover_url(manga),
      status:    SeriesStatus::from_upstream(manga.attributes.status.as_deref()),
    }
  }

  /// Translation language filter, one pair per configured language.
  fn language_params(&self) -> impl Iterator<Item = (&'static str, String)> + '_ {
    self.languages.iter().map(|lang| ("translatedLanguage[]", lang.clone()))
  }
}
