//! Application layer for Ningen.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (GenerateService, GlobService)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! build graph logic itself. All graph rules live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::{
    GENERATOR_RULE_NAME, GenerateOptions, GenerateService, GlobRequest, GlobService,
};

// Re-export port traits (for adapter implementation)
pub use ports::{Filesystem, Globber};

pub use error::ApplicationError;
