//! Body stream reconstruction.
//!
//! A compressed body is stored as a raw LZMA stream with its 13 byte stream
//! header stripped off. The header is rebuilt from the replay header before
//! the payload is handed to the decoder.

use std::borrow::Cow;
use std::io::Read;

use lzma_rs::compress::{Options, UnpackedSize};

use crate::constants::{LZMA_PROPS_SIZE, LZMA_STREAM_HEADER_SIZE};
use crate::error::{Error, Result};
use crate::header::ReplayHeader;

/// Returns the body that follows the replay header.
///
/// `payload` is everything after the first 32 bytes of the file. It is
/// borrowed as-is when the replay is not compressed.
pub fn reconstruct_body<'a>(header: &ReplayHeader, payload: &'a [u8]) -> Result<Cow<'a, [u8]>> {
  if !header.is_compressed() {
    return Ok(Cow::Borrowed(payload));
  }

  let stream_header = header.lzma_stream_header();
  let mut input = (&stream_header[..]).chain(payload);
  let mut body = vec![];
  lzma_rs::lzma_decompress(&mut input, &mut body)?;

  tracing::debug!(
    "decompressed body: {} -> {} bytes",
    payload.len(),
    body.len()
  );

  Ok(Cow::Owned(body))
}

#[derive(Debug)]
pub struct CompressedBody {
  pub codec_properties: [u8; 8],
  pub declared_size: [u8; 4],
  pub payload: Vec<u8>,
}

/// Compresses `body` into the stored form: the stream header is split off
/// into codec properties and declared size, the rest is the payload.
pub fn compress_body(body: &[u8]) -> Result<CompressedBody> {
  let declared_size = u32::try_from(body.len()).map_err(|_| Error::BodyTooLarge(body.len()))?;

  let mut stream = vec![];
  lzma_rs::lzma_compress_with_options(
    &mut &body[..],
    &mut stream,
    &Options {
      unpacked_size: UnpackedSize::WriteToHeader(Some(body.len() as u64)),
    },
  )
  .map_err(Error::Compress)?;

  let payload = stream.split_off(LZMA_STREAM_HEADER_SIZE);
  let mut codec_properties = [0_u8; 8];
  codec_properties[..LZMA_PROPS_SIZE].copy_from_slice(&stream[..LZMA_PROPS_SIZE]);

  Ok(CompressedBody {
    codec_properties,
    declared_size: declared_size.to_le_bytes(),
    payload,
  })
}

#[cfg(test)]
fn compressed_header(compressed: &CompressedBody) -> ReplayHeader {
  ReplayHeader {
    flag: 1,
    declared_size: compressed.declared_size,
    codec_properties: compressed.codec_properties,
    ..Default::default()
  }
}

#[test]
fn test_uncompressed_passthrough() {
  let header = ReplayHeader::default();
  let payload = [1_u8, 2, 3];
  let body = reconstruct_body(&header, &payload).unwrap();
  assert!(matches!(body, Cow::Borrowed(_)));
  assert_eq!(body.as_ref(), &payload[..]);
}

#[test]
fn test_reference_plaintext() {
  let plaintext: Vec<u8> = b"the quick brown fox jumps over the lazy dog "
    .iter()
    .cycle()
    .take(4096)
    .cloned()
    .collect();

  let compressed = compress_body(&plaintext).unwrap();
  assert_eq!(compressed.declared_size, 4096_u32.to_le_bytes());
  assert_eq!(&compressed.codec_properties[LZMA_PROPS_SIZE..], &[0, 0, 0]);

  let header = compressed_header(&compressed);
  let body = reconstruct_body(&header, &compressed.payload).unwrap();
  assert_eq!(body.as_ref(), plaintext.as_slice());
}

#[test]
fn test_codec_property_padding_is_ignored() {
  let plaintext = b"padding bytes after the first five are not codec configuration";
  let compressed = compress_body(plaintext).unwrap();
  let mut header = compressed_header(&compressed);
  header.codec_properties[5..].copy_from_slice(&[0xAA, 0xBB, 0xCC]);
  let body = reconstruct_body(&header, &compressed.payload).unwrap();
  assert_eq!(body.as_ref(), &plaintext[..]);
}

#[test]
fn test_invalid_properties() {
  let header = ReplayHeader {
    flag: 1,
    declared_size: 16_u32.to_le_bytes(),
    codec_properties: [0xFF, 0, 0, 0x10, 0, 0, 0, 0],
    ..Default::default()
  };
  assert!(matches!(
    reconstruct_body(&header, &[0; 16]),
    Err(Error::DecompressionFailure(_))
  ));
}

#[test]
fn test_truncated_payload() {
  let plaintext: Vec<u8> = (0..2048_u32).map(|v| (v * 7 % 251) as u8).collect();
  let compressed = compress_body(&plaintext).unwrap();
  let header = compressed_header(&compressed);
  let cut = compressed.payload.len() / 2;
  assert!(matches!(
    reconstruct_body(&header, &compressed.payload[..cut]),
    Err(Error::DecompressionFailure(_))
  ));
}
