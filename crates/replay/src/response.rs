use ygo_util::binary::*;

use crate::constants::MAX_RESPONSE_LEN;
use crate::error::{Error, Result};

/// One recorded player decision. The content is not interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response(Bytes);

impl Response {
  pub fn new<T: Into<Bytes>>(data: T) -> Result<Self> {
    let data = data.into();
    if data.len() > MAX_RESPONSE_LEN {
      return Err(Error::ResponseTooLong(data.len()));
    }
    Ok(Response(data))
  }

  pub fn as_bytes(&self) -> &[u8] {
    self.0.as_ref()
  }

  pub fn into_bytes(self) -> Bytes {
    self.0
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  /// Reads the next length-prefixed response.
  ///
  /// `None` marks the end of the response list: the buffer is exhausted,
  /// the length byte is above 64, or fewer bytes than declared remain.
  /// These cases are not distinguished.
  pub fn decode_next<T: Buf>(buf: &mut T) -> Option<Self> {
    if !buf.has_remaining() {
      return None;
    }
    let len = buf.get_u8() as usize;
    if len > MAX_RESPONSE_LEN || buf.remaining() < len {
      tracing::debug!(
        "response list ends at length byte {} with {} bytes left",
        len,
        buf.remaining()
      );
      return None;
    }
    Some(Response(buf.copy_to_bytes(len)))
  }
}

impl BinEncode for Response {
  fn encode<T: BufMut>(&self, buf: &mut T) {
    buf.put_u8(self.0.len() as u8);
    buf.put_slice(self.0.as_ref());
  }
}

impl AsRef<[u8]> for Response {
  fn as_ref(&self) -> &[u8] {
    self.as_bytes()
  }
}

#[test]
fn test_decode_next() {
  let mut buf: &[u8] = &[2, 0xA, 0xB, 0, 1, 0xC];
  assert_eq!(Response::decode_next(&mut buf).unwrap().as_bytes(), &[0xA, 0xB]);
  assert!(Response::decode_next(&mut buf).unwrap().is_empty());
  assert_eq!(Response::decode_next(&mut buf).unwrap().as_bytes(), &[0xC]);
  assert!(Response::decode_next(&mut buf).is_none());
}

#[test]
fn test_decode_next_max_len() {
  let mut bytes = vec![64_u8];
  bytes.extend_from_slice(&[0x11; 64]);
  let mut buf = bytes.as_slice();
  assert_eq!(Response::decode_next(&mut buf).unwrap().len(), 64);
  assert!(!buf.has_remaining());
}

#[test]
fn test_decode_next_sentinel() {
  let mut bytes = vec![65_u8];
  bytes.extend_from_slice(&[0x11; 65]);
  assert!(Response::decode_next(&mut bytes.as_slice()).is_none());

  // declared length runs past the end of the buffer
  let mut buf: &[u8] = &[4, 1, 2];
  assert!(Response::decode_next(&mut buf).is_none());
}

#[test]
fn test_new_rejects_long_blob() {
  assert!(Response::new(vec![0_u8; 64]).is_ok());
  assert!(matches!(
    Response::new(vec![0_u8; 65]),
    Err(Error::ResponseTooLong(65))
  ));
}
