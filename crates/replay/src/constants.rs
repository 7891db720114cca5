use bitflags::bitflags;

/// Size of the fixed preamble in front of the body.
pub const HEADER_SIZE: usize = 32;

/// Width of every player name field, in UTF-16 code units.
pub const NAME_FIELD_UNITS: usize = 40;

/// Longest response blob that can appear before the end of the response list.
pub const MAX_RESPONSE_LEN: usize = 64;

/// Codec property bytes that are actually used out of the 8 stored in the header.
pub const LZMA_PROPS_SIZE: usize = 5;

/// props(5) + uncompressed size(8)
pub const LZMA_STREAM_HEADER_SIZE: usize = LZMA_PROPS_SIZE + 8;

bitflags! {
  #[derive(Default)]
  pub struct ReplayFlags: u32 {
    const COMPRESSED = 0x1;
    const TAG = 0x2;
    const DECIDED = 0x4;
  }
}
