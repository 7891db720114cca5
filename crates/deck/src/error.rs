use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
  #[error("invalid card id on line {line}: `{text}`")]
  InvalidCardId { line: usize, text: String },
  #[error("io: {0}")]
  Io(#[from] std::io::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
