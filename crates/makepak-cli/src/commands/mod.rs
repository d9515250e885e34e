pub mod capabilities;
pub mod compile;
pub mod dump;
pub mod list;
pub mod merge;

#[cfg(test)]
mod list_tests;
