//! Replay body
//!
//! size/type       | Description
//! ----------------+------------------------------------------------------
//!  40 wchars      | host name
//!  40 wchars      | tag host name (tag duel only)
//!  40 wchars      | tag client name (tag duel only)
//!  40 wchars      | client name
//!  1 dword        | starting life points
//!  1 dword        | starting hand size
//!  1 dword        | cards drawn per turn
//!  1 dword        | duel options
//!  deck           | host deck
//!  deck           | tag host deck (tag duel only)
//!  deck           | tag client deck (tag duel only)
//!  deck           | client deck
//!  response*      | recorded responses until the end of the body
//!
//! A deck is two arrays, main then extra, each a dword count followed by
//! that many dword card ids. A response is a length byte followed by at most
//! 64 bytes.

use ygo_deck::Deck;
use ygo_util::binary::*;

use crate::constants::NAME_FIELD_UNITS;
use crate::response::Response;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagDuel {
  pub host_name: String,
  pub client_name: String,
  pub host_deck: Deck,
  pub client_deck: Deck,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayBody {
  pub host_name: String,
  pub client_name: String,
  pub tag: Option<TagDuel>,
  pub start_lp: u32,
  pub start_hand: u32,
  pub draw_count: u32,
  pub options: u32,
  pub host_deck: Deck,
  pub client_deck: Deck,
  pub responses: Vec<Response>,
}

impl ReplayBody {
  /// Reads the body fields in order. The tag duel fields are read iff `tag` is set.
  pub fn decode<T: Buf>(buf: &mut T, tag: bool) -> Result<Self, BinDecodeError> {
    let host_name = decode_name(buf).context("host name")?;
    let tag_names = if tag {
      let tag_host_name = decode_name(buf).context("tag host name")?;
      let tag_client_name = decode_name(buf).context("tag client name")?;
      Some((tag_host_name, tag_client_name))
    } else {
      None
    };
    let client_name = decode_name(buf).context("client name")?;

    let start_lp = u32::decode(buf).context("start lp")?;
    let start_hand = u32::decode(buf).context("start hand")?;
    let draw_count = u32::decode(buf).context("draw count")?;
    let options = u32::decode(buf).context("options")?;

    let host_deck = decode_deck(buf).context("host deck")?;
    let tag = match tag_names {
      Some((host_name, client_name)) => Some(TagDuel {
        host_name,
        client_name,
        host_deck: decode_deck(buf).context("tag host deck")?,
        client_deck: decode_deck(buf).context("tag client deck")?,
      }),
      None => None,
    };
    let client_deck = decode_deck(buf).context("client deck")?;

    let mut responses = vec![];
    while let Some(response) = Response::decode_next(buf) {
      responses.push(response);
    }

    Ok(ReplayBody {
      host_name,
      client_name,
      tag,
      start_lp,
      start_hand,
      draw_count,
      options,
      host_deck,
      client_deck,
      responses,
    })
  }
}

impl BinEncode for ReplayBody {
  fn encode<T: BufMut>(&self, buf: &mut T) {
    buf.put_fixed_utf16(&self.host_name, NAME_FIELD_UNITS);
    if let Some(ref tag) = self.tag {
      buf.put_fixed_utf16(&tag.host_name, NAME_FIELD_UNITS);
      buf.put_fixed_utf16(&tag.client_name, NAME_FIELD_UNITS);
    }
    buf.put_fixed_utf16(&self.client_name, NAME_FIELD_UNITS);
    self.start_lp.encode(buf);
    self.start_hand.encode(buf);
    self.draw_count.encode(buf);
    self.options.encode(buf);
    encode_deck(&self.host_deck, buf);
    if let Some(ref tag) = self.tag {
      encode_deck(&tag.host_deck, buf);
      encode_deck(&tag.client_deck, buf);
    }
    encode_deck(&self.client_deck, buf);
    for response in &self.responses {
      response.encode(buf);
    }
  }
}

fn decode_name<T: Buf>(buf: &mut T) -> Result<String, BinDecodeError> {
  buf.get_fixed_utf16(NAME_FIELD_UNITS)
}

fn decode_deck<T: Buf>(buf: &mut T) -> Result<Deck, BinDecodeError> {
  let main = buf.get_length_prefixed().context("main")?;
  let extra = buf.get_length_prefixed().context("extra")?;
  Ok(Deck::new(main, extra))
}

fn encode_deck<T: BufMut>(deck: &Deck, buf: &mut T) {
  buf.put_length_prefixed(&deck.main);
  buf.put_length_prefixed(&deck.extra);
}

#[cfg(test)]
fn sample_body(tag: bool) -> ReplayBody {
  ReplayBody {
    host_name: "Alice".to_string(),
    client_name: "Bob".to_string(),
    tag: if tag {
      Some(TagDuel {
        host_name: "Carol".to_string(),
        client_name: "Dave".to_string(),
        host_deck: Deck::new(vec![7, 8], vec![9]),
        client_deck: Deck::new(vec![10], vec![]),
      })
    } else {
      None
    },
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
fn test_decode_body() {
  let bytes = sample_body(false).encode_to_bytes();
  let mut buf = &bytes[..];
  let body = ReplayBody::decode(&mut buf, false).unwrap();
  assert_eq!(body.host_name, "Alice");
  assert_eq!(body.client_name, "Bob");
  assert_eq!(body.start_lp, 8000);
  assert_eq!(body.start_hand, 5);
  assert_eq!(body.draw_count, 1);
  assert_eq!(body.options, 0);
  assert_eq!(body.host_deck.main, vec![1, 2, 3]);
  assert!(body.host_deck.extra.is_empty());
  assert_eq!(body.client_deck.main, vec![4, 5]);
  assert!(body.client_deck.extra.is_empty());
  assert!(body.tag.is_none());
  assert!(body.responses.is_empty());
  assert!(!buf.has_remaining());
}

#[test]
fn test_decode_tag_body() {
  let expected = sample_body(true);
  let bytes = expected.encode_to_bytes();
  let body = ReplayBody::decode(&mut &bytes[..], true).unwrap();
  assert_eq!(body, expected);
}

#[test]
fn test_decode_empty_decks() {
  let mut body = sample_body(false);
  body.host_deck = Deck::default();
  body.client_deck = Deck::default();
  let bytes = body.encode_to_bytes();
  let decoded = ReplayBody::decode(&mut &bytes[..], false).unwrap();
  assert!(decoded.host_deck.main.is_empty());
  assert!(decoded.host_deck.extra.is_empty());
  assert!(decoded.client_deck.main.is_empty());
  assert!(decoded.client_deck.extra.is_empty());
}

#[test]
fn test_decode_responses_until_sentinel() {
  let mut body = sample_body(false);
  body.responses = vec![
    Response::new(vec![1_u8, 0, 0, 0]).unwrap(),
    Response::new(vec![0xFF_u8; 64]).unwrap(),
  ];
  let mut bytes = body.encode_to_bytes();
  bytes.put_u8(65);
  bytes.put_slice(&[3; 65]);
  bytes.put_u8(1);
  bytes.put_u8(9);

  let decoded = ReplayBody::decode(&mut &bytes[..], false).unwrap();
  assert_eq!(decoded.responses, body.responses);
}

#[test]
fn test_decode_response_overrun_ends_list() {
  let mut body = sample_body(false);
  body.responses = vec![Response::new(vec![5_u8]).unwrap()];
  let mut bytes = body.encode_to_bytes();
  bytes.put_u8(10);
  bytes.put_slice(&[0; 4]);

  let decoded = ReplayBody::decode(&mut &bytes[..], false).unwrap();
  assert_eq!(decoded.responses.len(), 1);
  assert_eq!(decoded.responses[0].as_bytes(), &[5]);
}

#[test]
fn test_decode_tag_body_missing_deck() {
  let body = sample_body(true);
  let mut bytes = BytesMut::new();
  for name in &["Alice", "Carol", "Dave", "Bob"] {
    bytes.put_fixed_utf16(name, NAME_FIELD_UNITS);
  }
  for value in &[8000_u32, 5, 1, 0] {
    bytes.put_u32_le(*value);
  }
  encode_deck(&body.host_deck, &mut bytes);
  let tag = body.tag.as_ref().unwrap();
  encode_deck(&tag.host_deck, &mut bytes);
  encode_deck(&tag.client_deck, &mut bytes);

  // client deck is missing
  let err = ReplayBody::decode(&mut &bytes[..], true).unwrap_err();
  assert!(err.is_incomplete());
  assert!(err.to_string().starts_with("client deck: main"));

  // tag decks are missing as well
  let mut bytes = BytesMut::new();
  for name in &["Alice", "Carol", "Dave", "Bob"] {
    bytes.put_fixed_utf16(name, NAME_FIELD_UNITS);
  }
  for value in &[8000_u32, 5, 1, 0] {
    bytes.put_u32_le(*value);
  }
  encode_deck(&body.host_deck, &mut bytes);
  let err = ReplayBody::decode(&mut &bytes[..], true).unwrap_err();
  assert!(err.to_string().starts_with("tag host deck"));
}

#[test]
fn test_decode_tag_flag_on_plain_body() {
  let bytes = sample_body(false).encode_to_bytes();
  assert!(ReplayBody::decode(&mut &bytes[..], true).is_err());
}

#[test]
fn test_decode_truncated_everywhere() {
  let bytes = sample_body(true).encode_to_bytes();
  for len in 0..bytes.len() {
    let err = ReplayBody::decode(&mut &bytes[..len], true).unwrap_err();
    assert!(err.is_incomplete(), "len = {}", len);
  }
}

#[test]
fn test_decode_deck_count_overrun() {
  let mut bytes = BytesMut::new();
  bytes.put_u32_le(1000);
  bytes.put_u32_le(1);
  let err = decode_deck(&mut &bytes[..]).unwrap_err();
  assert!(err.is_incomplete());
  assert_eq!(err.to_string(), "main: not enough data");
}
