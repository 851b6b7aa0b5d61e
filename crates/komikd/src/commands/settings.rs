//! Reader and language settings kept in the configuration file.

use super::*;

/// Settings subcommands.
#[derive(Subcommand, Clone, Debug)]
pub enum SettingsCommands {
  /// Print the current settings
  Show,

  /// Change one setting
  ///
  /// Keys: mode (vertical, horizontal, single), direction (rtl, ltr), quality (low, medium, high),
  /// languages (comma separated codes), preferred-language.
  Set {
    /// Setting to change
    key:   String,
    /// New value
    value: String,
  },
}

/// Function for the [`AppCommands::Settings`] in the CLI.
pub fn settings<I: UserInteraction>(interaction: &I, app: &mut App, cmd: SettingsCommands) -> Result<()> {
  match cmd {
    SettingsCommands::Show => interaction.reply(ResponseContent::Settings(&app.config)),
    SettingsCommands::Set { key, value } => {
      apply(&mut app.config, &key, value.trim())?;
      app.save_config()?;
      interaction.reply(ResponseContent::Success(&format!("Set {key} to {}", value.trim())))
    },
  }
}

/// Writes `value` into the setting named `key`.
fn apply(config: &mut Config, key: &str, value: &str) -> Result<()> {
  match key {
    "mode" => config.reader.mode = value.parse::<ReadingMode>()?,
    "direction" => config.reader.direction = value.parse::<ReadingDirection>()?,
    "quality" => {
      if !["low", "medium", "high"].contains(&value.to_lowercase().as_str()) {
        return Err(KomikdError::Input(format!("Unknown quality \"{value}\"")));
      }
      config.reader.quality = value.parse::<Quality>().unwrap_or_default();
    },
    "languages" => {
      let languages: Vec<String> =
        value.split(',').map(str::trim).filter(|l| !l.is_empty()).map(String::from).collect();
      if languages.is_empty() {
        return Err(KomikdError::Input("At least one language is required".to_string()));
      }
      config.languages = languages;
    },
    "preferred-language" => {
      if value.is_empty() {
        return Err(KomikdError::Input("Preferred language cannot be empty".to_string()));
      }
      config.preferred_language = value.to_string();
    },
    other => return Err(KomikdError::Input(format!("Unknown setting \"{other}\""))),
  }
  Ok(())
}
