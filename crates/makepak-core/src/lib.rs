//! Shared vocabulary for the makepak object compiler.
//!
//! Everything here is plain data shared by the writer and the reader side:
//! - `Tag` - four-byte node type codes
//! - `ribi` - fixed direction-to-index tables used by image lists
//! - `kinds` - enumerated field values (way types, engines, climates, ...)
//! - `date` - month-count dates used by intro/retire fields
//! - `Colors` - terminal palette for dump output

mod colors;
pub mod date;
pub mod kinds;
pub mod ribi;
mod tag;

#[cfg(test)]
mod ribi_tests;

pub use colors::Colors;
pub use kinds::{BuildingType, Climates, EngineType, Placement, UnknownValue, WayType};
pub use tag::Tag;
