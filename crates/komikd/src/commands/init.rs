//! Module for writing a fresh [`komik`] configuration.

use super::*;

/// Where the new configuration points the user store and session.
#[derive(Args, Clone)]
pub struct InitOptions {
  /// User store backend (json or sqlite)
  #[arg(long)]
  pub store:        Option<String>,
  /// File used by the user store
  #[arg(long)]
  pub store_path:   Option<PathBuf>,
  /// File remembering the logged-in user
  #[arg(long)]
  pub session_path: Option<PathBuf>,
}

/// Function for the [`Commands::Init`] in the CLI.
pub fn init<I: UserInteraction>(
  interaction: &I,
  config_path: &Path,
  init_options: InitOptions,
) -> Result<()> {
  let InitOptions { store, store_path, session_path } = init_options;

  if config_path.exists()
    && !interaction.confirm(&format!(
      "A configuration already exists at {}, do you want to overwrite it?",
      config_path.display()
    ))?
  {
    interaction.reply(ResponseContent::Info(
      "Please choose a different location for the configuration using --config",
    ))?;
    return Ok(());
  }

  let backend = store.as_deref().map(str::parse::<StoreBackend>).transpose()?.unwrap_or_default();
  let store_path = store_path.unwrap_or_else(|| {
    let file = match backend {
      StoreBackend::Json => "users.json",
      StoreBackend::Sqlite => "users.db",
    };
    Config::default_data_dir().join(file)
  });

  let mut config = Config::default().with_store(backend, &store_path);
  if let Some(session_path) = session_path {
    config = config.with_session_path(session_path);
  }

  // Fail on an unusable store path before anything is written
  config.open_store()?;
  config.save(config_path)?;

  interaction.reply(ResponseContent::Success(&format!(
    "Created komik configuration with\nConfig path: {}\nUser store: {} ({})\nSession file: {}",
    config_path.display(),
    config.store.backend,
    config.store.path.display(),
    config.session_path.display(),
  )))
}
