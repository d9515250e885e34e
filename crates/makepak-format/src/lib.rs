//! On-disk format of compiled object files.
//!
//! A file is a text/binary [`FileHeader`] followed by one tree of nodes.
//! Every node is a fixed-size [`NodeHeader`] (tag, payload size, child
//! count), its payload, and then its children, depth-first. This crate
//! contains:
//! - header encoding and decoding (`header`, `node`)
//! - the tree reader (`tree`) with a lossy mode for diagnostics
//! - payload decoding with the per-type version gate (`payload`)
//! - typed descriptors for every node type (`desc`)
//! - cross-reference resolution over a loaded file (`objects`)
//! - the human-readable dump (`dump`)

pub mod desc;
pub mod dump;
mod error;
pub mod header;
pub mod node;
pub mod objects;
pub mod payload;
pub mod tree;

#[cfg(test)]
mod header_tests;
#[cfg(test)]
mod objects_tests;
#[cfg(test)]
pub(crate) mod test_utils;

pub use desc::{Descriptor, NodeDecode};
pub use dump::dump;
pub use error::{DecodeError, FormatError, LoadError};
pub use header::{COMPILER_VERSION, COMPILER_VERSION_CODE, FileHeader, MAGIC_LINE};
pub use node::{NODE_HEADER_SIZE, NodeHeader};
pub use objects::{ObjId, Object, ObjectTable, SkippedObject};
pub use payload::{PayloadReader, PayloadWriter, VERSION_FLAG, version_word};
pub use tree::{Node, PakFile};
