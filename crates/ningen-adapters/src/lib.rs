//! Infrastructure adapters for Ningen.
//!
//! This crate implements the ports defined in `ningen-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod filesystem;
pub mod glob;

// Re-export commonly used adapters
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use glob::{PatternMatcher, WalkGlobber};
