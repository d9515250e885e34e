//! Payload decoding.
//!
//! Versioned payloads start with a u16 whose high bit is set; the low 15
//! bits count layout revisions of that node type. A payload without the
//! high bit predates versioning and is reported as version 0.

use std::io::{Cursor, Read};

use byteorder::{LittleEndian, ReadBytesExt};
use makepak_core::Tag;

use crate::DecodeError;

/// High bit of the version word marking a versioned payload.
pub const VERSION_FLAG: u16 = 0x8000;

/// Encode a layout revision as an on-disk version word.
pub const fn version_word(version: u16) -> u16 {
    VERSION_FLAG | (version & !VERSION_FLAG)
}

/// Little-endian reader over one node's payload.
pub struct PayloadReader<'a> {
    tag: Tag,
    cursor: Cursor<&'a [u8]>,
}

impl<'a> PayloadReader<'a> {
    pub fn new(tag: Tag, payload: &'a [u8]) -> Self {
        Self {
            tag,
            cursor: Cursor::new(payload),
        }
    }

    pub fn tag(&self) -> Tag {
        self.tag
    }

    /// Read the version word and check it against `min..=max`.
    pub fn version(&mut self, min: u16, max: u16) -> Result<u16, DecodeError> {
        let word = self.u16()?;
        let found = if word & VERSION_FLAG == 0 {
            0
        } else {
            word & !VERSION_FLAG
        };
        if found < min || found > max {
            return Err(DecodeError::UnsupportedVersion {
                tag: self.tag,
                found,
                min,
                max,
            });
        }
        Ok(found)
    }

    pub fn u8(&mut self) -> Result<u8, DecodeError> {
        self.cursor.read_u8().map_err(|_| self.truncated())
    }

    pub fn i8(&mut self) -> Result<i8, DecodeError> {
        self.cursor.read_i8().map_err(|_| self.truncated())
    }

    pub fn bool(&mut self) -> Result<bool, DecodeError> {
        Ok(self.u8()? != 0)
    }

    pub fn u16(&mut self) -> Result<u16, DecodeError> {
        self.cursor
            .read_u16::<LittleEndian>()
            .map_err(|_| self.truncated())
    }

    pub fn i16(&mut self) -> Result<i16, DecodeError> {
        self.cursor
            .read_i16::<LittleEndian>()
            .map_err(|_| self.truncated())
    }

    pub fn u32(&mut self) -> Result<u32, DecodeError> {
        self.cursor
            .read_u32::<LittleEndian>()
            .map_err(|_| self.truncated())
    }

    pub fn tag_code(&mut self) -> Result<Tag, DecodeError> {
        let mut bytes = [0u8; 4];
        self.cursor
            .read_exact(&mut bytes)
            .map_err(|_| self.truncated())?;
        Ok(Tag::from_bytes(bytes))
    }

    /// Read exactly `len` bytes.
    pub fn bytes(&mut self, len: usize) -> Result<Vec<u8>, DecodeError> {
        if len > self.remaining() {
            return Err(self.truncated());
        }
        let mut buf = vec![0u8; len];
        self.cursor
            .read_exact(&mut buf)
            .map_err(|_| self.truncated())?;
        Ok(buf)
    }

    /// Read a NUL-terminated UTF-8 string. A missing terminator at the end
    /// of the payload is tolerated.
    pub fn cstr(&mut self) -> Result<String, DecodeError> {
        let data: &'a [u8] = *self.cursor.get_ref();
        let rest = &data[self.cursor.position() as usize..];
        let (text, consumed) = match rest.iter().position(|&b| b == 0) {
            Some(nul) => (&rest[..nul], nul + 1),
            None => (rest, rest.len()),
        };
        let text = std::str::from_utf8(text)
            .map_err(|_| DecodeError::InvalidText { tag: self.tag })?
            .to_string();
        self.cursor
            .set_position(self.cursor.position() + consumed as u64);
        Ok(text)
    }

    pub fn remaining(&self) -> usize {
        self.cursor.get_ref().len() - self.cursor.position() as usize
    }

    fn truncated(&self) -> DecodeError {
        DecodeError::Truncated { tag: self.tag }
    }
}

/// Little-endian payload builder.
///
/// Encoders describe a payload as an ordered field list; the byte offsets
/// follow from the order.
#[derive(Clone, Debug, Default)]
pub struct PayloadWriter {
    buf: Vec<u8>,
}

impl PayloadWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write the version word for layout revision `version`.
    pub fn version(&mut self, version: u16) -> &mut Self {
        self.u16(version_word(version))
    }

    pub fn u8(&mut self, value: u8) -> &mut Self {
        self.buf.push(value);
        self
    }

    pub fn i8(&mut self, value: i8) -> &mut Self {
        self.buf.extend_from_slice(&value.to_le_bytes());
        self
    }

    pub fn bool(&mut self, value: bool) -> &mut Self {
        self.u8(value as u8)
    }

    pub fn u16(&mut self, value: u16) -> &mut Self {
        self.buf.extend_from_slice(&value.to_le_bytes());
        self
    }

    pub fn i16(&mut self, value: i16) -> &mut Self {
        self.buf.extend_from_slice(&value.to_le_bytes());
        self
    }

    pub fn u32(&mut self, value: u32) -> &mut Self {
        self.buf.extend_from_slice(&value.to_le_bytes());
        self
    }

    pub fn tag_code(&mut self, tag: Tag) -> &mut Self {
        self.buf.extend_from_slice(tag.as_bytes());
        self
    }

    pub fn bytes(&mut self, bytes: &[u8]) -> &mut Self {
        self.buf.extend_from_slice(bytes);
        self
    }

    /// Write a string followed by a NUL terminator.
    pub fn cstr(&mut self, text: &str) -> &mut Self {
        self.buf.extend_from_slice(text.as_bytes());
        self.buf.push(0);
        self
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn finish(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.buf)
    }
}
