pub use crate::error::BinDecodeError;
pub use bytes::{Buf, BufMut, Bytes, BytesMut};
pub use std::mem::size_of;

mod ext;

pub use self::ext::*;

pub trait BinEncode {
  fn encode<T: BufMut>(&self, buf: &mut T);
  fn encode_to_bytes(&self) -> BytesMut {
    let mut bytes = BytesMut::new();
    self.encode(&mut bytes);
    bytes
  }
}

pub trait BinDecode
where
  Self: Sized,
{
  const MIN_SIZE: usize = 0;
  const FIXED_SIZE: bool = false;
  fn decode<T: Buf>(buf: &mut T) -> Result<Self, BinDecodeError>;
}

macro_rules! impl_fixed {
  ($ty:ty, $put:ident, $get:ident) => {
    impl BinEncode for $ty {
      #[inline]
      fn encode<T: BufMut>(&self, buf: &mut T) {
        buf.$put(*self);
      }
    }
    impl BinDecode for $ty {
      const MIN_SIZE: usize = std::mem::size_of::<Self>();
      const FIXED_SIZE: bool = true;
      #[inline]
      fn decode<T: Buf>(buf: &mut T) -> Result<Self, BinDecodeError> {
        buf.check_size(Self::MIN_SIZE)?;
        Ok(buf.$get())
      }
    }
  };
}

impl_fixed!(u8, put_u8, get_u8);
impl_fixed!(u16, put_u16_le, get_u16_le);
impl_fixed!(i32, put_i32_le, get_i32_le);
impl_fixed!(u32, put_u32_le, get_u32_le);
impl_fixed!(u64, put_u64_le, get_u64_le);

impl<const N: usize> BinEncode for [u8; N] {
  #[inline]
  fn encode<T: BufMut>(&self, buf: &mut T) {
    buf.put_slice(&self[..]);
  }
}

impl<const N: usize> BinDecode for [u8; N] {
  const MIN_SIZE: usize = N;
  const FIXED_SIZE: bool = true;
  fn decode<T: Buf>(buf: &mut T) -> Result<Self, BinDecodeError> {
    buf.check_size(N)?;
    let mut bytes = [0_u8; N];
    buf.copy_to_slice(&mut bytes);
    Ok(bytes)
  }
}

impl<'a, T: BinEncode> BinEncode for &'a [T] {
  #[inline]
  fn encode<TBuf: BufMut>(&self, buf: &mut TBuf) {
    for v in self.iter() {
      v.encode(buf);
    }
  }
}

impl<T: BinEncode> BinEncode for Vec<T> {
  #[inline]
  fn encode<TBuf: BufMut>(&self, buf: &mut TBuf) {
    for v in self {
      v.encode(buf);
    }
  }
}

impl BinEncode for Bytes {
  #[inline]
  fn encode<T: BufMut>(&self, buf: &mut T) {
    buf.put(self.clone())
  }
}

#[test]
fn test_decode_fixed_le() {
  let mut buf: &[u8] = &[0x40, 0x1F, 0, 0, 5, 0, 0, 0, 0xAA];
  assert_eq!(u32::decode(&mut buf).unwrap(), 8000);
  assert_eq!(u32::decode(&mut buf).unwrap(), 5);
  assert_eq!(buf.remaining(), 1);
  assert!(u32::decode(&mut buf).unwrap_err().is_incomplete());
  // a failed read leaves the cursor untouched
  assert_eq!(buf.remaining(), 1);
}

#[test]
fn test_decode_byte_array() {
  let mut buf: &[u8] = &[1, 2, 3, 4, 5];
  assert_eq!(<[u8; 4]>::decode(&mut buf).unwrap(), [1, 2, 3, 4]);
  assert!(<[u8; 4]>::decode(&mut buf).unwrap_err().is_incomplete());
}

#[test]
fn test_encode_vec() {
  let mut bytes: Vec<u8> = vec![];
  vec![1_u32, 0x0102].encode(&mut bytes);
  assert_eq!(bytes, [1, 0, 0, 0, 2, 1, 0, 0]);
}
