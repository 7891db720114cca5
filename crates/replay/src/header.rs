//! Replay Header
//!
//! offset | size/type | Description
//! -------+-----------+-----------------------------------------------------------
//! 0x0000 |  1 dword  | replay id
//! 0x0004 |  1 dword  | format version
//! 0x0008 |  1 dword  | flags
//!        |           |  0x1 body is LZMA compressed
//!        |           |  0x2 tag duel (two players per side)
//!        |           |  0x4 decided
//! 0x000C |  1 dword  | random seed
//! 0x0010 |  4 bytes  | size of the uncompressed body, kept raw
//! 0x0014 |  1 dword  | hash
//! 0x0018 |  8 bytes  | LZMA properties, only the first 5 bytes are used
//!
//! Overall header size is 0x20 bytes. The body follows immediately.

use ygo_util::binary::*;

use crate::constants::{
  ReplayFlags, HEADER_SIZE, LZMA_PROPS_SIZE, LZMA_STREAM_HEADER_SIZE,
};
use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReplayHeader {
  pub id: u32,
  pub version: u32,
  pub flag: u32,
  pub seed: u32,
  pub declared_size: [u8; 4],
  pub hash: u32,
  pub codec_properties: [u8; 8],
}

impl ReplayHeader {
  /// Decodes the first [`HEADER_SIZE`] bytes of `bytes`.
  pub fn decode_bytes(bytes: &[u8]) -> Result<Self> {
    let mut buf = bytes;
    Self::decode(&mut buf).map_err(|_| Error::TruncatedHeader {
      expected: HEADER_SIZE,
      got: bytes.len(),
    })
  }

  pub fn flags(&self) -> ReplayFlags {
    ReplayFlags::from_bits_truncate(self.flag)
  }

  pub fn is_compressed(&self) -> bool {
    self.flag & ReplayFlags::COMPRESSED.bits() != 0
  }

  pub fn is_tag(&self) -> bool {
    self.flag & ReplayFlags::TAG.bits() != 0
  }

  pub fn is_decided(&self) -> bool {
    self.flag & ReplayFlags::DECIDED.bits() != 0
  }

  pub fn set_flag(&mut self, flag: ReplayFlags, value: bool) {
    if value {
      self.flag |= flag.bits();
    } else {
      self.flag &= !flag.bits();
    }
  }

  pub fn declared_size(&self) -> u32 {
    u32::from_le_bytes(self.declared_size)
  }

  /// Header of a standalone LZMA stream for the compressed body:
  /// the 5 property bytes, then the raw declared size as the low half
  /// of a 64-bit little-endian size and 4 zero bytes as the high half.
  pub fn lzma_stream_header(&self) -> [u8; LZMA_STREAM_HEADER_SIZE] {
    let mut header = [0_u8; LZMA_STREAM_HEADER_SIZE];
    header[..LZMA_PROPS_SIZE].copy_from_slice(&self.codec_properties[..LZMA_PROPS_SIZE]);
    header[LZMA_PROPS_SIZE..LZMA_PROPS_SIZE + 4].copy_from_slice(&self.declared_size);
    header
  }
}

impl BinDecode for ReplayHeader {
  const MIN_SIZE: usize = HEADER_SIZE;
  const FIXED_SIZE: bool = true;

  fn decode<T: Buf>(buf: &mut T) -> Result<Self, BinDecodeError> {
    buf.check_size(Self::MIN_SIZE)?;
    Ok(ReplayHeader {
      id: BinDecode::decode(buf)?,
      version: BinDecode::decode(buf)?,
      flag: BinDecode::decode(buf)?,
      seed: BinDecode::decode(buf)?,
      declared_size: BinDecode::decode(buf)?,
      hash: BinDecode::decode(buf)?,
      codec_properties: BinDecode::decode(buf)?,
    })
  }
}

impl BinEncode for ReplayHeader {
  fn encode<T: BufMut>(&self, buf: &mut T) {
    self.id.encode(buf);
    self.version.encode(buf);
    self.flag.encode(buf);
    self.seed.encode(buf);
    self.declared_size.encode(buf);
    self.hash.encode(buf);
    self.codec_properties.encode(buf);
  }
}

#[cfg(test)]
fn header_bytes(flag: u32) -> Vec<u8> {
  let mut bytes = vec![];
  bytes.put_u32_le(0x31707279);
  bytes.put_u32_le(0x12d0);
  bytes.put_u32_le(flag);
  bytes.put_u32_le(0xDEADBEEF);
  bytes.put_slice(&[0x10, 0x20, 0x30, 0x40]);
  bytes.put_u32_le(7);
  bytes.put_slice(&[0x5D, 0, 0, 0x10, 0, 0xA1, 0xA2, 0xA3]);
  bytes
}

#[test]
fn test_header() {
  let bytes = header_bytes(0x3);
  let header = ReplayHeader::decode_bytes(&bytes).unwrap();
  assert_eq!(header.id, 0x31707279);
  assert_eq!(header.version, 0x12d0);
  assert_eq!(header.seed, 0xDEADBEEF);
  assert_eq!(header.declared_size, [0x10, 0x20, 0x30, 0x40]);
  assert_eq!(header.declared_size(), 0x40302010);
  assert_eq!(header.hash, 7);
  assert_eq!(header.codec_properties, [0x5D, 0, 0, 0x10, 0, 0xA1, 0xA2, 0xA3]);
  assert_eq!(header.encode_to_bytes().as_ref(), bytes.as_slice());
}

#[test]
fn test_header_flags() {
  for flag in (0_u32..16).chain([0xFFFF_FFF8, 0x8000_0001, 0xFFFF_FFFF]) {
    let header = ReplayHeader::decode_bytes(&header_bytes(flag)).unwrap();
    assert_eq!(header.is_compressed(), flag & 1 != 0, "flag = {:#x}", flag);
    assert_eq!(header.is_tag(), flag & 2 != 0, "flag = {:#x}", flag);
    assert_eq!(header.is_decided(), flag & 4 != 0, "flag = {:#x}", flag);
    assert_eq!(header.flag, flag);
  }
}

#[test]
fn test_header_ignores_trailing_bytes() {
  let mut bytes = header_bytes(0);
  bytes.extend_from_slice(&[1, 2, 3]);
  assert_eq!(
    ReplayHeader::decode_bytes(&bytes).unwrap(),
    ReplayHeader::decode_bytes(&bytes[..HEADER_SIZE]).unwrap()
  );
}

#[test]
fn test_header_truncated() {
  let bytes = header_bytes(0);
  for len in [0, 1, 16, HEADER_SIZE - 1] {
    match ReplayHeader::decode_bytes(&bytes[..len]) {
      Err(Error::TruncatedHeader { expected, got }) => {
        assert_eq!(expected, HEADER_SIZE);
        assert_eq!(got, len);
      }
      other => panic!("unexpected result: {:?}", other),
    }
  }
}

#[test]
fn test_lzma_stream_header() {
  let header = ReplayHeader::decode_bytes(&header_bytes(1)).unwrap();
  assert_eq!(
    header.lzma_stream_header(),
    [0x5D, 0, 0, 0x10, 0, 0x10, 0x20, 0x30, 0x40, 0, 0, 0, 0]
  );
}

#[test]
fn test_set_flag() {
  let mut header = ReplayHeader::default();
  header.set_flag(ReplayFlags::TAG, true);
  header.set_flag(ReplayFlags::DECIDED, true);
  assert!(header.is_tag() && header.is_decided() && !header.is_compressed());
  header.set_flag(ReplayFlags::TAG, false);
  assert_eq!(header.flags(), ReplayFlags::DECIDED);
}
