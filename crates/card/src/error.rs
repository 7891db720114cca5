use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
  #[error("invalid strings.conf line {line}: `{text}`")]
  InvalidStringsLine { line: usize, text: String },
  #[error("no card database found in {0}")]
  NoCardDatabase(PathBuf),
  #[error("card database: {0}")]
  Sqlx(#[from] sqlx::Error),
  #[error("io: {0}")]
  Io(#[from] std::io::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
