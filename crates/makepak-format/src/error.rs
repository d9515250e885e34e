//! Error types for reading object files.

use std::io;

use makepak_core::Tag;

/// Structural error: the file or the node tree cannot be walked.
#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    #[error("not an object file: missing magic text")]
    InvalidMagic,
    #[error("file header truncated")]
    TruncatedHeader,
    #[error("node header at offset {offset} truncated")]
    TruncatedNode { offset: usize },
    #[error("{tag} node at offset {offset}: payload of {size} bytes runs past end of file")]
    PayloadOutOfBounds { tag: Tag, offset: usize, size: u32 },
    #[error("nodes nested deeper than {0} levels")]
    TooDeep(usize),
    #[error("{0} trailing bytes after the root node")]
    TrailingBytes(usize),
    #[error("top node is {0}, expected ROOT")]
    NotRoot(Tag),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Error decoding one node's payload or children into a descriptor.
///
/// Fatal for that node only; the rest of the file stays readable.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("{tag}: payload truncated")]
    Truncated { tag: Tag },
    #[error("{tag}: unsupported version {found} (supported {min}..={max})")]
    UnsupportedVersion {
        tag: Tag,
        found: u16,
        min: u16,
        max: u16,
    },
    #[error("expected {expected} node, found {found}")]
    UnexpectedTag { expected: Tag, found: Tag },
    #[error("{tag}: missing {what} child")]
    MissingChild { tag: Tag, what: &'static str },
    #[error("{tag}: invalid {field} value {value}")]
    InvalidField {
        tag: Tag,
        field: &'static str,
        value: u32,
    },
    #[error("{tag}: text is not valid UTF-8")]
    InvalidText { tag: Tag },
    #[error("unknown node type {0}")]
    UnknownTag(Tag),
}

/// Error loading the objects of a file into an [`ObjectTable`](crate::ObjectTable).
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error(transparent)]
    Format(#[from] FormatError),
    #[error("{from}: required {target} '{name}' not found")]
    UnresolvedReference {
        /// Name of the object holding the reference.
        from: String,
        target: Tag,
        name: String,
    },
}
