use thiserror::Error;
use ygo_util::binary::BinDecodeError;

#[derive(Error, Debug)]
pub enum Error {
  #[error("truncated header: expected {expected} bytes, got {got}")]
  TruncatedHeader { expected: usize, got: usize },
  #[error("decompress: {0}")]
  DecompressionFailure(#[from] lzma_rs::error::Error),
  #[error("truncated body: {0}")]
  TruncatedBody(#[from] BinDecodeError),
  #[error("io: {0}")]
  IoUnavailable(#[from] std::io::Error),
  #[error("compress: {0}")]
  Compress(std::io::Error),
  #[error("response too long: {0} bytes, at most 64 allowed")]
  ResponseTooLong(usize),
  #[error("body too large: {0} bytes")]
  BodyTooLarge(usize),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
