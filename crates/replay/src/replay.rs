use std::fs;
use std::io::Write;
use std::path::Path;

use ygo_deck::Deck;
use ygo_util::binary::*;

use crate::body::{ReplayBody, TagDuel};
use crate::constants::{ReplayFlags, HEADER_SIZE};
use crate::error::{Error, Result};
use crate::header::ReplayHeader;
use crate::response::Response;
use crate::stream::{compress_body, reconstruct_body};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replay {
  pub header: ReplayHeader,
  pub host_name: String,
  pub client_name: String,
  /// Present iff the header has the tag flag.
  pub tag: Option<TagDuel>,
  pub start_lp: u32,
  pub start_hand: u32,
  pub draw_count: u32,
  pub options: u32,
  pub host_deck: Deck,
  pub client_deck: Deck,
  pub responses: Vec<Response>,
}

impl Replay {
  pub fn assemble(header: ReplayHeader, body: ReplayBody) -> Self {
    Replay {
      header,
      host_name: body.host_name,
      client_name: body.client_name,
      tag: body.tag,
      start_lp: body.start_lp,
      start_hand: body.start_hand,
      draw_count: body.draw_count,
      options: body.options,
      host_deck: body.host_deck,
      client_deck: body.client_deck,
      responses: body.responses,
    }
  }

  /// Decodes a whole replay file held in memory.
  pub fn decode(bytes: &[u8]) -> Result<Self> {
    let header = ReplayHeader::decode_bytes(bytes)?;
    tracing::debug!(
      "replay header: id = {:#x}, version = {:#x}, flags = {:?}",
      header.id,
      header.version,
      header.flags()
    );

    let body = reconstruct_body(&header, &bytes[HEADER_SIZE..])?;
    let mut buf: &[u8] = &body;
    let body = ReplayBody::decode(&mut buf, header.is_tag())?;

    tracing::debug!(
      "replay body: {} responses, {} bytes unread",
      body.responses.len(),
      buf.remaining()
    );

    Ok(Self::assemble(header, body))
  }

  /// Reads the file at `path` completely, then decodes it.
  pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
    let bytes = fs::read(path)?;
    Self::decode(&bytes)
  }

  pub fn is_tag(&self) -> bool {
    self.tag.is_some()
  }

  /// Decks in seat order: host, tag host, tag client, client.
  pub fn decks(&self) -> Vec<(&str, &Deck)> {
    let mut decks = vec![(self.host_name.as_str(), &self.host_deck)];
    if let Some(ref tag) = self.tag {
      decks.push((tag.host_name.as_str(), &tag.host_deck));
      decks.push((tag.client_name.as_str(), &tag.client_deck));
    }
    decks.push((self.client_name.as_str(), &self.client_deck));
    decks
  }

  fn to_body(&self) -> ReplayBody {
    ReplayBody {
      host_name: self.host_name.clone(),
      client_name: self.client_name.clone(),
      tag: self.tag.clone(),
      start_lp: self.start_lp,
      start_hand: self.start_hand,
      draw_count: self.draw_count,
      options: self.options,
      host_deck: self.host_deck.clone(),
      client_deck: self.client_deck.clone(),
      responses: self.responses.clone(),
    }
  }
}

/// Writes replays in the same layout [`Replay::decode`] reads.
///
/// The tag flag is derived from [`Replay::tag`]. If the header has the
/// compressed flag, the body is LZMA compressed and the declared size and
/// codec properties are replaced with the values of the new stream.
pub struct ReplayEncoder<W> {
  w: W,
}

impl<W: Write> ReplayEncoder<W> {
  pub fn new(w: W) -> Self {
    Self { w }
  }

  pub fn encode(&mut self, replay: &Replay) -> Result<()> {
    let body = replay.to_body().encode_to_bytes();
    let mut header = replay.header;
    header.set_flag(ReplayFlags::TAG, replay.is_tag());

    let payload = if header.is_compressed() {
      let compressed = compress_body(&body)?;
      header.declared_size = compressed.declared_size;
      header.codec_properties = compressed.codec_properties;
      compressed.payload
    } else {
      let size = u32::try_from(body.len()).map_err(|_| Error::BodyTooLarge(body.len()))?;
      header.declared_size = size.to_le_bytes();
      body.to_vec()
    };

    self.w.write_all(&header.encode_to_bytes())?;
    self.w.write_all(&payload)?;
    self.w.flush()?;

    tracing::debug!(
      "encoded replay: flags = {:?}, body = {} bytes, payload = {} bytes",
      header.flags(),
      body.len(),
      payload.len()
    );

    Ok(())
  }

  pub fn into_inner(self) -> W {
    self.w
  }
}

pub fn encode(replay: &Replay) -> Result<Vec<u8>> {
  let mut encoder = ReplayEncoder::new(vec![]);
  encoder.encode(replay)?;
  Ok(encoder.into_inner())
}

#[cfg(test)]
fn sample_replay() -> Replay {
  Replay {
    header: ReplayHeader {
      id: 0x31707279,
      version: 0x12d0,
      seed: 42,
      ..Default::default()
    },
    host_name: "Alice".to_string(),
    client_name: "Bob".to_string(),
    tag: None,
    start_lp: 8000,
    start_hand: 5,
    draw_count: 1,
    options: 0,
    host_deck: Deck::new(vec![1, 2, 3], vec![]),
    client_deck: Deck::new(vec![4, 5], vec![]),
    responses: vec![],
  }
}

#[test]
fn test_decode_uncompressed() {
  let bytes = encode(&sample_replay()).unwrap();
  let replay = Replay::decode(&bytes).unwrap();
  assert_eq!(replay.host_name, "Alice");
  assert_eq!(replay.client_name, "Bob");
  assert_eq!(replay.start_lp, 8000);
  assert_eq!(replay.start_hand, 5);
  assert_eq!(replay.draw_count, 1);
  assert_eq!(replay.options, 0);
  assert_eq!(replay.host_deck, Deck::new(vec![1, 2, 3], vec![]));
  assert_eq!(replay.client_deck, Deck::new(vec![4, 5], vec![]));
  assert!(replay.tag.is_none());
  assert!(replay.responses.is_empty());
  assert!(!replay.header.is_compressed());
  assert_eq!(
    replay.header.declared_size() as usize,
    bytes.len() - HEADER_SIZE
  );
}

#[test]
fn test_decode_compressed() {
  let mut expected = sample_replay();
  expected.header.set_flag(ReplayFlags::COMPRESSED, true);
  expected.responses = (0..200_u8)
    .map(|i| Response::new(vec![i; (i % 65) as usize]).unwrap())
    .collect();

  let bytes = encode(&expected).unwrap();
  let replay = Replay::decode(&bytes).unwrap();
  assert!(replay.header.is_compressed());
  assert_eq!(replay.responses, expected.responses);
  assert_eq!(replay.host_deck, expected.host_deck);
  assert_eq!(
    replay.header.declared_size() as usize,
    expected.to_body().encode_to_bytes().len()
  );
}

#[test]
fn test_encode_sets_tag_flag() {
  let mut replay = sample_replay();
  replay.tag = Some(TagDuel {
    host_name: "Carol".to_string(),
    client_name: "Dave".to_string(),
    host_deck: Deck::new(vec![6], vec![60]),
    client_deck: Deck::new(vec![7], vec![70]),
  });
  let bytes = encode(&replay).unwrap();
  let decoded = Replay::decode(&bytes).unwrap();
  assert!(decoded.header.is_tag());
  assert_eq!(decoded.tag, replay.tag);
  let names: Vec<_> = decoded.decks().into_iter().map(|(name, _)| name).collect();
  assert_eq!(names, vec!["Alice", "Carol", "Dave", "Bob"]);
}

#[test]
fn test_decode_truncated_header() {
  assert!(matches!(
    Replay::decode(&[0; 31]),
    Err(Error::TruncatedHeader { got: 31, .. })
  ));
}

#[test]
fn test_decode_truncated_body() {
  let bytes = encode(&sample_replay()).unwrap();
  assert!(matches!(
    Replay::decode(&bytes[..bytes.len() - 1]),
    Err(Error::TruncatedBody(_))
  ));
}

#[test]
fn test_decode_is_deterministic() {
  let mut replay = sample_replay();
  replay.header.set_flag(ReplayFlags::COMPRESSED, true);
  let bytes = encode(&replay).unwrap();
  assert_eq!(
    Replay::decode(&bytes).unwrap(),
    Replay::decode(&bytes).unwrap()
  );
}
