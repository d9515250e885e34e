use std::io;

use makepak_core::{Tag, UnknownValue};
use makepak_format::FormatError;

/// Error that aborts the current destination file.
///
/// Recoverable problems (missing images, unknown `obj` values, unreadable
/// sources) are logged as warnings instead and never reach this type.
#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    #[error("{object}: {source}")]
    UnknownValue {
        object: String,
        #[source]
        source: UnknownValue,
    },
    #[error("{object}: {key}={value} does not fit the field")]
    ValueOutOfRange {
        object: String,
        key: String,
        value: i64,
    },
    #[error("{obj} object without a name")]
    MissingName { obj: &'static str },
    #[error("{tag}: write of {len} bytes at payload offset {offset} overflows a {size} byte payload")]
    PayloadOverflow {
        tag: Tag,
        offset: usize,
        len: usize,
        size: u32,
    },
    #[error("{tag}: payload of {size} bytes is too large")]
    PayloadTooLarge { tag: Tag, size: usize },
    #[error("{0} nodes still open at end of file")]
    UnfinishedNodes(usize),
    #[error("{0} cannot be written from a text record")]
    NotTopLevel(&'static str),
    #[error("no input could be merged")]
    NothingToMerge,
    #[error(transparent)]
    Format(#[from] FormatError),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

impl CompileError {
    /// Failures of the output stream, which end the whole run.
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io(_))
    }
}
