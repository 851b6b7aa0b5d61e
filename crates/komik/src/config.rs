//! Persistent configuration for komik.
//!
//! The configuration lives in a single TOML file, by default at
//! `<config dir>/komik/config.toml`. Every field has a default, so a partial file (or no file at
//! all) yields a working setup pointed at the public MangaDex API.
//!
//! ```toml
//! api_base_url = "https://api.mangadex.org"
//! languages = ["id", "en"]
//! preferred_language = "en"
//!
//! [retry]
//! max_retries = 3
//! initial_delay_ms = 1000
//!
//! [store]
//! backend = "sqlite"
//! path = "/home/me/.local/share/komik/users.db"
//!
//! [reader]
//! mode = "vertical"
//! direction = "rtl"
//! quality = "low"
//! ```

use super::*;
use crate::{
  mangadex::MAX_PAGE_SIZE,
  store::{JsonFileStore, SqliteStore, UserStore},
};

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
  /// Base URL of the MangaDex REST API
  pub api_base_url:       String,
  /// Host serving cover images
  pub uploads_base_url:   String,
  /// Cover URL used when a series has no cover art
  pub placeholder_cover:  String,
  /// Translated languages requested for chapter listings
  pub languages:          Vec<String>,
  /// Language tried first when resolving localized titles and descriptions
  pub preferred_language: String,
  /// Page size used when walking chapter feeds
  pub chapter_page_size:  u32,
  /// File holding the name of the logged-in user
  pub session_path:       PathBuf,
  /// Retry behaviour of the HTTP client
  pub retry:              RetryPolicy,
  /// Where user accounts are kept
  pub store:              StoreConfig,
  /// Reader preferences
  pub reader:             ReaderSettings,
}

/// Retry budget and backoff for upstream requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
  /// Retries allowed after the first attempt; rate-limit retries draw from the same budget
  pub max_retries:              u32,
  /// Wait before the first backoff retry
  pub initial_delay_ms:         u64,
  /// Multiplier applied to the wait after each backoff retry
  pub backoff:                  f64,
  /// Wait used for a 429 that carries no usable `Retry-After` header
  pub default_retry_after_secs: f64,
}

/// Backing store selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
  /// Which [`UserStore`] implementation to open
  pub backend: StoreBackend,
  /// File used by the backend
  pub path:    PathBuf,
}

/// Available [`UserStore`] backends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
  /// Whole mapping serialized into one JSON file
  #[default]
  Json,
  /// Users with their bookmarks and history in a SQLite database
  Sqlite,
}

/// Reader preferences persisted between runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReaderSettings {
  /// How pages are laid out
  pub mode:      ReadingMode,
  /// Page turn direction
  pub direction: ReadingDirection,
  /// Image quality requested from the chapter server
  pub quality:   Quality,
}

/// Page layout used by the reader.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadingMode {
  /// All pages stacked in a scrolling column
  #[default]
  Vertical,
  /// Pages side by side
  Horizontal,
  /// One page at a time
  Single,
}

/// Page turn direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadingDirection {
  /// Right to left, the usual manga order
  #[default]
  Rtl,
  /// Left to right
  Ltr,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      api_base_url:       "https://api.mangadex.org".to_string(),
      uploads_base_url:   "https://uploads.mangadex.org".to_string(),
      placeholder_cover:  "/api/placeholder/200/300".to_string(),
      languages:          vec!["id".to_string(), "en".to_string()],
      preferred_language: "en".to_string(),
      chapter_page_size:  100,
      session_path:       Self::default_data_dir().join("session"),
      retry:              RetryPolicy::default(),
      store:              StoreConfig::default(),
      reader:             ReaderSettings::default(),
    }
  }
}

impl Default for RetryPolicy {
  fn default() -> Self {
    Self {
      max_retries:              3,
      initial_delay_ms:         1000,
      backoff:                  1.5,
      default_retry_after_secs: 5.0,
    }
  }
}

impl Default for StoreConfig {
  fn default() -> Self {
    Self { backend: StoreBackend::Json, path: Config::default_data_dir().join("users.json") }
  }
}

impl Default for ReaderSettings {
  fn default() -> Self {
    Self {
      mode:      ReadingMode::default(),
      direction: ReadingDirection::default(),
      quality:   Quality::Low,
    }
  }
}

impl RetryPolicy {
  /// Longest single wait between two attempts.
  pub const MAX_DELAY: Duration = Duration::from_secs(300);

  /// A policy that retries `max_retries` times without ever sleeping.
  pub fn immediate(max_retries: u32) -> Self {
    Self { max_retries, initial_delay_ms: 0, backoff: 1.5, default_retry_after_secs: 0.0 }
  }

  /// Wait before the first backoff retry.
  pub fn initial_delay(&self) -> Duration {
    Duration::from_millis(self.initial_delay_ms).min(Self::MAX_DELAY)
  }

  /// Wait used when a 429 response carries no usable `Retry-After` header.
  pub fn default_retry_after(&self) -> Duration {
    Self::bounded_secs(self.default_retry_after_secs.max(0.0)).unwrap_or(Self::MAX_DELAY)
  }

  /// Turns a number of seconds into a wait capped at [`RetryPolicy::MAX_DELAY`].
  ///
  /// Negative and NaN values yield `None`; infinity yields the cap.
  pub fn bounded_secs(secs: f64) -> Option<Duration> {
    if secs.is_nan() || secs < 0.0 {
      return None;
    }
    Some(Duration::try_from_secs_f64(secs).map_or(Self::MAX_DELAY, |wait| wait.min(Self::MAX_DELAY)))
  }
}

impl Config {
  /// Returns the default path of the configuration file.
  ///
  /// - On Unix: `~/.config/komik/config.toml`
  /// - On macOS: `~/Library/Application Support/komik/config.toml`
  /// - On Windows: `%APPDATA%\komik\config.toml`
  /// - Fallback: `./komik/config.toml`
  pub fn default_path() -> PathBuf {
    dirs::config_dir().unwrap_or_else(|| PathBuf::from(".")).join("komik").join("config.toml")
  }

  /// Directory holding the user store and session file by default.
  pub fn default_data_dir() -> PathBuf {
    dirs::data_dir().unwrap_or_else(|| PathBuf::from(".")).join("komik")
  }

  /// Reads a configuration file.
  pub fn load(path: impl AsRef<Path>) -> Result<Self> {
    let content = std::fs::read_to_string(path.as_ref())?;
    let config: Config = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
  }

  /// Reads a configuration file, falling back to defaults when it does not exist.
  pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    if path.exists() {
      Self::load(path)
    } else {
      debug!("No config at {}, using defaults", path.display());
      Ok(Self::default())
    }
  }

  /// Writes this configuration, creating parent directories as needed.
  pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, toml::to_string_pretty(self)?)?;
    Ok(())
  }

  /// Rejects values the client cannot work with.
  pub fn validate(&self) -> Result<()> {
    Url::parse(&self.api_base_url)
      .map_err(|e| KomikError::Config(format!("Invalid api_base_url: {e}")))?;
    if self.chapter_page_size == 0 || self.chapter_page_size > MAX_PAGE_SIZE {
      return Err(KomikError::Config(format!(
        "chapter_page_size must be between 1 and {MAX_PAGE_SIZE}"
      )));
    }

    let max_secs = RetryPolicy::MAX_DELAY.as_secs();
    let retry = &self.retry;
    if !retry.backoff.is_finite() || retry.backoff < 1.0 {
      return Err(KomikError::Config("retry.backoff must be at least 1.0".to_string()));
    }
    if retry.initial_delay_ms > max_secs * 1000 {
      return Err(KomikError::Config(format!(
        "retry.initial_delay_ms must be at most {}",
        max_secs * 1000
      )));
    }
    if !(0.0..=max_secs as f64).contains(&retry.default_retry_after_secs) {
      return Err(KomikError::Config(format!(
        "retry.default_retry_after_secs must be between 0 and {max_secs}"
      )));
    }
    Ok(())
  }

  /// Opens the configured user store.
  pub fn open_store(&self) -> Result<Box<dyn UserStore>> {
    Ok(match self.store.backend {
      StoreBackend::Json => Box::new(JsonFileStore::open(&self.store.path)?),
      StoreBackend::Sqlite => Box::new(SqliteStore::open(&self.store.path)?),
    })
  }

  /// Points the store at `path` with the given backend.
  pub fn with_store(mut self, backend: StoreBackend, path: impl AsRef<Path>) -> Self {
    self.store = StoreConfig { backend, path: path.as_ref().to_path_buf() };
    self
  }

  /// Sets the session file.
  pub fn with_session_path(mut self, path: impl AsRef<Path>) -> Self {
    self.session_path = path.as_ref().to_path_buf();
    self
  }

  /// Sets the API base URL.
  pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
    self.api_base_url = url.into();
    self
  }

  /// Sets the retry policy.
  pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
    self.retry = retry;
    self
  }

  /// Sets the translated languages requested for chapter listings.
  pub fn with_languages<I, S>(mut self, languages: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>, {
    self.languages = languages.into_iter().map(Into::into).collect();
    self
  }
}

impl Display for ReadingMode {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      ReadingMode::Vertical => write!(f, "vertical"),
      ReadingMode::Horizontal => write!(f, "horizontal"),
      ReadingMode::Single => write!(f, "single"),
    }
  }
}

impl FromStr for ReadingMode {
  type Err = KomikError;

  fn from_str(s: &str) -> Result<Self> {
    match s.to_lowercase().as_str() {
      "vertical" => Ok(ReadingMode::Vertical),
      "horizontal" => Ok(ReadingMode::Horizontal),
      "single" => Ok(ReadingMode::Single),
      other => Err(KomikError::Config(format!("Unknown reading mode \"{other}\""))),
    }
  }
}

impl Display for ReadingDirection {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      ReadingDirection::Rtl => write!(f, "rtl"),
      ReadingDirection::Ltr => write!(f, "ltr"),
    }
  }
}

impl FromStr for ReadingDirection {
  type Err = KomikError;

  fn from_str(s: &str) -> Result<Self> {
    match s.to_lowercase().as_str() {
      "rtl" => Ok(ReadingDirection::Rtl),
      "ltr" => Ok(ReadingDirection::Ltr),
      other => Err(KomikError::Config(format!("Unknown reading direction \"{other}\""))),
    }
  }
}

impl Display for StoreBackend {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      StoreBackend::Json => write!(f, "json"),
      StoreBackend::Sqlite => write!(f, "sqlite"),
    }
  }
}

impl FromStr for StoreBackend {
  type Err = KomikError;

  fn from_str(s: &str) -> Result<Self> {
    match s.to_lowercase().as_str() {
      "json" => Ok(StoreBackend::Json),
      "sqlite" => Ok(StoreBackend::Sqlite),
      other => Err(KomikError::Config(format!("Unknown store backend \"{other}\""))),
    }
  }
}
