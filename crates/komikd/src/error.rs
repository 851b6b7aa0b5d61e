//! Error type for the komik command line.

use komik::error::KomikError;
use thiserror::Error;

/// Errors that end a command.
#[derive(Error, Debug)]
pub enum KomikdError {
  /// A library operation failed.
  #[error(transparent)]
  Komik(#[from] KomikError),

  /// A terminal prompt failed.
  #[error(transparent)]
  Dialog(#[from] dialoguer::Error),

  /// A file system operation failed.
  #[error(transparent)]
  Io(#[from] std::io::Error),

  /// The user gave input the command cannot use.
  #[error("{0}")]
  Input(String),
}

/// Convenience alias for command results.
pub type Result<T> = core::result::Result<T, KomikdError>;
