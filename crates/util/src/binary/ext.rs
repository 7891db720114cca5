use super::{BinDecode, BinDecodeError, BinEncode, Buf, BufMut};

pub trait BinBufExt {
  fn check_size(&mut self, size: usize) -> Result<(), BinDecodeError>;

  fn get_repeated<T, I: From<Vec<T>>>(&mut self, len: usize) -> Result<I, BinDecodeError>
  where
    T: BinDecode;

  /// Reads a little-endian `u32` count followed by that many items.
  ///
  /// The declared count is checked against the remaining bytes before
  /// anything is allocated.
  fn get_length_prefixed<T>(&mut self) -> Result<Vec<T>, BinDecodeError>
  where
    T: BinDecode;

  /// Reads a fixed-width field of `units` UTF-16LE code units.
  ///
  /// Text ends at the first zero unit. The cursor always advances by
  /// `units * 2` bytes; the padding after the terminator is discarded.
  fn get_fixed_utf16(&mut self, units: usize) -> Result<String, BinDecodeError>;
}

impl<T> BinBufExt for T
where
  T: Buf,
{
  #[inline]
  fn check_size(&mut self, size: usize) -> Result<(), BinDecodeError> {
    if self.remaining() < size {
      return Err(BinDecodeError::incomplete());
    }
    Ok(())
  }

  fn get_repeated<TItem, I: From<Vec<TItem>>>(&mut self, len: usize) -> Result<I, BinDecodeError>
  where
    TItem: BinDecode,
  {
    let size = TItem::MIN_SIZE
      .checked_mul(len)
      .ok_or_else(BinDecodeError::incomplete)?;
    self.check_size(size)?;

    let mut items = Vec::with_capacity(len);
    for _ in 0..len {
      items.push(TItem::decode(self)?)
    }
    Ok(From::from(items))
  }

  fn get_length_prefixed<TItem>(&mut self) -> Result<Vec<TItem>, BinDecodeError>
  where
    TItem: BinDecode,
  {
    let len = u32::decode(self).context("length")?;
    self.get_repeated(len as usize)
  }

  fn get_fixed_utf16(&mut self, units: usize) -> Result<String, BinDecodeError> {
    let size = units
      .checked_mul(2)
      .ok_or_else(BinDecodeError::incomplete)?;
    self.check_size(size)?;

    let mut code_units = Vec::with_capacity(units);
    let mut terminated = false;
    for _ in 0..units {
      let unit = self.get_u16_le();
      if unit == 0 {
        terminated = true;
      }
      if !terminated {
        code_units.push(unit);
      }
    }
    Ok(String::from_utf16_lossy(&code_units))
  }
}

pub trait BinBufMutExt {
  /// Writes `value` as a zero-padded field of exactly `units` UTF-16LE code units.
  /// Text longer than the field is cut at the last whole char that fits, so a
  /// surrogate pair is never split.
  fn put_fixed_utf16(&mut self, value: &str, units: usize);

  fn put_length_prefixed<T: BinEncode>(&mut self, items: &[T]);
}

impl<T> BinBufMutExt for T
where
  T: BufMut,
{
  fn put_fixed_utf16(&mut self, value: &str, units: usize) {
    let mut written = 0;
    let mut pair = [0; 2];
    for c in value.chars() {
      if written + c.len_utf16() > units {
        break;
      }
      for unit in c.encode_utf16(&mut pair) {
        self.put_u16_le(*unit);
        written += 1;
      }
    }
    for _ in written..units {
      self.put_u16_le(0);
    }
  }

  fn put_length_prefixed<TItem: BinEncode>(&mut self, items: &[TItem]) {
    self.put_u32_le(items.len() as u32);
    for item in items {
      item.encode(self);
    }
  }
}

pub trait BinDecodeErrorExt {
  fn context<T: std::fmt::Display>(self, ctx: T) -> Self;
}

impl<T> BinDecodeErrorExt for Result<T, BinDecodeError> {
  fn context<TContext: std::fmt::Display>(self, ctx: TContext) -> Self {
    self.map_err(|e| e.context(ctx))
  }
}

#[test]
fn test_get_fixed_utf16_padding() {
  let mut bytes: Vec<u8> = vec![];
  bytes.put_fixed_utf16("Alice", 40);
  bytes.put_u8(0xFF);
  assert_eq!(bytes.len(), 81);

  let mut buf = bytes.as_slice();
  let text = buf.get_fixed_utf16(40).unwrap();
  assert_eq!(text, "Alice");
  assert_eq!(text.chars().count(), 5);
  assert_eq!(buf.remaining(), 1);
}

#[test]
fn test_get_fixed_utf16_full_width() {
  let value = "x".repeat(45);
  let mut bytes: Vec<u8> = vec![];
  bytes.put_fixed_utf16(&value, 40);
  assert_eq!(bytes.len(), 80);
  assert_eq!(bytes.as_slice().get_fixed_utf16(40).unwrap(), "x".repeat(40));
}

#[test]
fn test_get_fixed_utf16_ignores_text_after_terminator() {
  let mut bytes: Vec<u8> = vec![];
  for unit in &[0x42_u16, 0x6F, 0x62, 0, 0x5A, 0x5A] {
    bytes.put_u16_le(*unit);
  }
  let mut buf = bytes.as_slice();
  assert_eq!(buf.get_fixed_utf16(6).unwrap(), "Bob");
  assert!(!buf.has_remaining());
}

#[test]
fn test_get_fixed_utf16_non_ascii() {
  let mut bytes: Vec<u8> = vec![];
  bytes.put_fixed_utf16("遊戯🃏", 20);
  assert_eq!(bytes.as_slice().get_fixed_utf16(20).unwrap(), "遊戯🃏");
}

#[test]
fn test_put_fixed_utf16_keeps_surrogate_pairs() {
  let value = format!("{}🃏", "a".repeat(39));
  let mut bytes: Vec<u8> = vec![];
  bytes.put_fixed_utf16(&value, 40);
  assert_eq!(bytes.len(), 80);
  assert_eq!(&bytes[78..], &[0, 0]);
  assert_eq!(bytes.as_slice().get_fixed_utf16(40).unwrap(), "a".repeat(39));

  let mut bytes: Vec<u8> = vec![];
  bytes.put_fixed_utf16("🃏🃏", 3);
  assert_eq!(bytes.as_slice().get_fixed_utf16(3).unwrap(), "🃏");
}

#[test]
fn test_get_fixed_utf16_truncated() {
  let mut buf: &[u8] = &[0x41, 0, 0x42];
  assert!(buf.get_fixed_utf16(2).unwrap_err().is_incomplete());
}

#[test]
fn test_get_length_prefixed() {
  let mut bytes: Vec<u8> = vec![];
  bytes.put_length_prefixed(&[1_u32, 2, 3]);
  bytes.put_length_prefixed::<u32>(&[]);

  let mut buf = bytes.as_slice();
  assert_eq!(buf.get_length_prefixed::<u32>().unwrap(), vec![1, 2, 3]);
  assert_eq!(buf.get_length_prefixed::<u32>().unwrap(), Vec::<u32>::new());
  assert!(!buf.has_remaining());
}

#[test]
fn test_get_length_prefixed_overrun() {
  let mut bytes: Vec<u8> = vec![];
  bytes.put_u32_le(0xFFFF_FFFF);
  bytes.put_u32_le(1);
  let err = bytes
    .as_slice()
    .get_length_prefixed::<u32>()
    .unwrap_err();
  assert!(err.is_incomplete());
}
