//! Decoder for duel replay files.
//!
//! A replay is a 32 byte [`ReplayHeader`] followed by a body that is either
//! stored raw or as an LZMA stream whose stream header was dropped. The body
//! holds the player names, duel settings, the decks of every player and the
//! list of recorded [`Response`]s.

mod body;
mod constants;
mod header;
mod response;
mod stream;

pub mod error;
pub mod replay;

pub use body::{ReplayBody, TagDuel};
pub use constants::*;
pub use header::ReplayHeader;
pub use replay::{Replay, ReplayEncoder};
pub use response::Response;
pub use stream::{compress_body, reconstruct_body, CompressedBody};
pub use ygo_deck::Deck;

use error::Result;

/// Decodes a replay held in memory. See [`Replay::decode`].
pub fn decode(bytes: &[u8]) -> Result<Replay> {
  Replay::decode(bytes)
}

pub fn decode_header(bytes: &[u8]) -> Result<ReplayHeader> {
  ReplayHeader::decode_bytes(bytes)
}
