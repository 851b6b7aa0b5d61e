//! State shared by every command once a configuration is in place.

use super::*;

/// The opened configuration, MangaDex service, user store and session.
pub struct App {
  /// Loaded configuration
  pub config:      Config,
  /// File the configuration was read from and is saved back to
  pub config_path: PathBuf,
  /// MangaDex service built from [`App::config`]
  pub mangadex:    MangaDex,
  /// Account operations over the configured store
  pub accounts:    Accounts<Box<dyn UserStore>>,
  /// The persisted login
  pub session:     Session,
}

impl App {
  /// Loads the configuration at `config_path` (defaults when missing) and opens what it names.
  pub fn open(config_path: PathBuf) -> Result<Self> {
    let config = Config::load_or_default(&config_path)?;
    let mangadex = MangaDex::new(&config)?;
    let accounts = Accounts::new(config.open_store()?);
    let session = Session::load(&config.session_path)?;
    debug!(
      "Opened {} store at {}, logged in as {:?}",
      config.store.backend,
      config.store.path.display(),
      session.current()
    );
    Ok(Self { config, config_path, mangadex, accounts, session })
  }

  /// Persists the session so the next invocation sees the same login.
  pub fn save_session(&self) -> Result<()> { Ok(self.session.save(&self.config.session_path)?) }

  /// Writes the configuration back to [`App::config_path`].
  pub fn save_config(&self) -> Result<()> { Ok(self.config.save(&self.config_path)?) }
}
