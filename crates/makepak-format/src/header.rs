//! File header.
//!
//! Layout:
//! - `"Simutrans object file\n"`
//! - `"Compiled with SimObjects <version>\n"`
//! - `0x1A` (stops `type`/`cat` on the console)
//! - compiler version code, u32 little-endian
//!
//! The root node follows immediately.

use std::io::{self, Write};

use byteorder::{LittleEndian, WriteBytesExt};

use crate::FormatError;

/// First line of every object file.
pub const MAGIC_LINE: &str = "Simutrans object file\n";
/// Prefix of the second line, followed by the version string.
pub const COMPILED_WITH: &str = "Compiled with SimObjects ";
/// Terminates the text part of the header.
pub const TEXT_END: u8 = 0x1A;

/// Human-readable compiler version written into the header.
pub const COMPILER_VERSION: &str = "0.1.3exp";
/// Compiler version code. Node layouts are only assumed compatible between
/// files carrying the same code.
pub const COMPILER_VERSION_CODE: u32 = 1003;

/// Upper bound on the text part, so a non-pak file is rejected quickly.
const MAX_TEXT_LEN: usize = 256;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileHeader {
    /// Version string from the second text line.
    pub compiler: String,
    /// Version code following the text part.
    pub version_code: u32,
}

impl Default for FileHeader {
    fn default() -> Self {
        Self {
            compiler: COMPILER_VERSION.to_string(),
            version_code: COMPILER_VERSION_CODE,
        }
    }
}

impl FileHeader {
    /// Encode to bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.encoded_len());
        bytes.extend_from_slice(MAGIC_LINE.as_bytes());
        bytes.extend_from_slice(COMPILED_WITH.as_bytes());
        bytes.extend_from_slice(self.compiler.as_bytes());
        bytes.push(b'\n');
        bytes.push(TEXT_END);
        bytes.extend_from_slice(&self.version_code.to_le_bytes());
        bytes
    }

    /// Number of bytes [`to_bytes`](Self::to_bytes) produces.
    pub fn encoded_len(&self) -> usize {
        MAGIC_LINE.len() + COMPILED_WITH.len() + self.compiler.len() + 2 + 4
    }

    /// Write the header to a stream, returning the number of bytes written.
    pub fn write_to<W: Write + ?Sized>(&self, out: &mut W) -> io::Result<u64> {
        out.write_all(MAGIC_LINE.as_bytes())?;
        out.write_all(COMPILED_WITH.as_bytes())?;
        out.write_all(self.compiler.as_bytes())?;
        out.write_u8(b'\n')?;
        out.write_u8(TEXT_END)?;
        out.write_u32::<LittleEndian>(self.version_code)?;
        Ok(self.encoded_len() as u64)
    }

    /// Decode the header from the start of `bytes`.
    ///
    /// Returns the header and the offset of the root node. Any version
    /// string is accepted; compatibility is decided on `version_code`.
    pub fn parse(bytes: &[u8]) -> Result<(Self, usize), FormatError> {
        if !bytes.starts_with(MAGIC_LINE.as_bytes()) {
            return Err(FormatError::InvalidMagic);
        }

        let scan = &bytes[..bytes.len().min(MAX_TEXT_LEN)];
        let Some(text_end) = scan.iter().position(|&b| b == TEXT_END) else {
            return Err(FormatError::TruncatedHeader);
        };

        let second_line = &bytes[MAGIC_LINE.len()..text_end];
        let second_line = String::from_utf8_lossy(second_line);
        let second_line = second_line.trim_end_matches('\n');
        let compiler = second_line
            .strip_prefix(COMPILED_WITH)
            .unwrap_or(second_line)
            .to_string();

        let code_start = text_end + 1;
        let Some(code) = bytes.get(code_start..code_start + 4) else {
            return Err(FormatError::TruncatedHeader);
        };
        let version_code = u32::from_le_bytes([code[0], code[1], code[2], code[3]]);

        Ok((
            Self {
                compiler,
                version_code,
            },
            code_start + 4,
        ))
    }

    pub fn is_current(&self) -> bool {
        self.version_code == COMPILER_VERSION_CODE
    }
}
