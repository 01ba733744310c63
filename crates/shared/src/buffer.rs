//! Growable byte buffer with a cursor
//!
//! All integers are little-endian. Byte strings carry a 4-byte length prefix;
//! text is UTF-8 before prefixing. Booleans take a single byte, any non-zero
//! value reads as `true`.
//!
//! Writes append at the end; reads advance a separate cursor from the start.
//! Every read checks the remaining length first and fails with
//! [`DecodeError::Eof`] instead of producing partial values.

use crate::error::DecodeError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Buffer {
    buf: Vec<u8>,
    pointer: usize,
}

impl Buffer {
    pub fn new() -> Self {
        Buffer::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Buffer {
            buf: Vec::with_capacity(capacity),
            pointer: 0,
        }
    }

    /// Wraps received bytes for reading
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Buffer {
            buf: bytes.to_vec(),
            pointer: 0,
        }
    }

    /// The written bytes, ready to send
    pub fn collect(self) -> Vec<u8> {
        self.buf
    }

    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pointer
    }

    pub fn write_i64(&mut self, v: i64) -> &mut Self {
        self.buf.extend_from_slice(&v.to_le_bytes());
        self
    }

    pub fn write_i32(&mut self, v: i32) -> &mut Self {
        self.buf.extend_from_slice(&v.to_le_bytes());
        self
    }

    pub fn write_i16(&mut self, v: i16) -> &mut Self {
        self.buf.extend_from_slice(&v.to_le_bytes());
        self
    }

    pub fn write_u8(&mut self, v: u8) -> &mut Self {
        self.buf.push(v);
        self
    }

    pub fn write_bool(&mut self, v: bool) -> &mut Self {
        self.write_u8(u8::from(v))
    }

    /// Length-prefixed byte string
    ///
    /// # Panics
    ///
    /// If `bytes` is longer than `i32::MAX`, which no frame can be.
    pub fn write_bytes(&mut self, bytes: &[u8]) -> &mut Self {
        assert!(
            bytes.len() <= i32::MAX as usize,
            "byte string too long for a frame"
        );
        self.write_i32(bytes.len() as i32);
        self.buf.extend_from_slice(bytes);
        self
    }

    pub fn write_str(&mut self, s: &str) -> &mut Self {
        self.write_bytes(s.as_bytes())
    }

    fn take<const N: usize>(&mut self) -> Result<[u8; N], DecodeError> {
        let bytes = self.take_slice(N)?;
        let mut out = [0; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }

    fn take_slice(&mut self, len: usize) -> Result<&[u8], DecodeError> {
        if len > self.remaining() {
            return Err(DecodeError::Eof {
                needed: len,
                remaining: self.remaining(),
            });
        }
        let start = self.pointer;
        self.pointer += len;
        Ok(&self.buf[start..self.pointer])
    }

    pub fn read_i64(&mut self) -> Result<i64, DecodeError> {
        self.take().map(i64::from_le_bytes)
    }

    pub fn read_i32(&mut self) -> Result<i32, DecodeError> {
        self.take().map(i32::from_le_bytes)
    }

    pub fn read_i16(&mut self) -> Result<i16, DecodeError> {
        self.take().map(i16::from_le_bytes)
    }

    pub fn read_u8(&mut self) -> Result<u8, DecodeError> {
        self.take::<1>().map(|[b]| b)
    }

    pub fn read_bool(&mut self) -> Result<bool, DecodeError> {
        self.read_u8().map(|b| b != 0)
    }

    pub fn read_bytes(&mut self) -> Result<Vec<u8>, DecodeError> {
        let len = self.read_i32()?;
        let len = usize::try_from(len).map_err(|_| DecodeError::InvalidLength(len))?;
        self.take_slice(len).map(<[u8]>::to_vec)
    }

    pub fn read_string(&mut self) -> Result<String, DecodeError> {
        String::from_utf8(self.read_bytes()?).map_err(|_| DecodeError::InvalidUtf8)
    }
}
