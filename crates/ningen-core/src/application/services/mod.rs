//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "write the manifest" or "expand a glob".

pub mod generate_service;
pub mod glob_service;

pub use generate_service::{GENERATOR_RULE_NAME, GenerateOptions, GenerateService};
pub use glob_service::{GlobRequest, GlobService};
