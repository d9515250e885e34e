//! makepak compiler: text object records and PNG sheets to object files.
//!
//! This crate provides the writer side of the object format:
//! - `tabfile` - the `key=value` record reader
//! - `sprite` - sheet loading, cell cutting and image encoding
//! - `session` - the offset-tracking node tree writer
//! - `encoders` - one encoder per object type
//! - `registry` - lookup of node types by `obj=` name and by tag
//! - `root` - compile, merge, list and dump over whole files

pub mod config;
pub mod encoders;
mod error;
pub mod registry;
pub mod root;
pub mod session;
pub mod sprite;
pub mod tabfile;

#[cfg(test)]
mod registry_tests;
#[cfg(test)]
mod root_tests;
#[cfg(test)]
mod session_tests;
#[cfg(test)]
mod tabfile_tests;
#[cfg(test)]
pub(crate) mod test_utils;

pub use config::{CompileConfig, DEFAULT_CELL_SIZE};
pub use error::CompileError;
pub use registry::Registry;
pub use root::{CompileStats, Compiler, ListEntry, MergeStats, dump_file, list_file};
pub use session::{CompileSession, NodeWriter, Sink};
pub use sprite::ImageStore;
pub use tabfile::{TabRecord, ValueSource};
