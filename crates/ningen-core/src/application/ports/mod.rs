//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `ningen-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: writing the manifest
//!   - `Globber`: expanding glob patterns against a directory tree

use std::path::{Path, PathBuf};

use crate::error::NingenResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `ningen_adapters::filesystem::LocalFilesystem` (production)
/// - `ningen_adapters::filesystem::MemoryFilesystem` (testing)
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> NingenResult<()>;

    /// Write content to a file, replacing any existing content.
    fn write_file(&self, path: &Path, content: &str) -> NingenResult<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;
}

/// Port for glob expansion.
///
/// Implemented by:
/// - `ningen_adapters::glob::WalkGlobber` (production, walks the disk)
/// - `ningen_adapters::filesystem::MemoryFilesystem` (testing)
pub trait Globber: Send + Sync {
    /// Absolute paths of the files matching any of `patterns` and none of
    /// `exclude`. Relative patterns are anchored at `root` and may leave it
    /// through `..`; absolute patterns are used as they are.
    ///
    /// Order and duplicates are unspecified; callers sort and de-duplicate.
    fn expand(
        &self,
        root: &Path,
        patterns: &[String],
        exclude: &[String],
    ) -> NingenResult<Vec<PathBuf>>;
}
