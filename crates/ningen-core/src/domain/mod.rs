// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for Ningen.
//!
//! This module contains the build graph model and the manifest generator.
//! All filesystem access (globbing, writing the manifest) is handled via
//! ports defined in the application layer.
//!
//! - **No I/O**: paths are manipulated lexically, never touched on disk
//! - **No logging**: observability belongs to the application layer
//! - **Immutable entities**: rules, targets, and pools never change once
//!   registered
//! - **Deterministic output**: the same registry always renders the same text

pub mod command;
pub mod error;
pub mod file;
pub mod generator;
pub mod pool;
pub mod registry;
pub mod rule;
pub mod target;
pub mod vars;

pub use error::{DefinitionKind, DomainError, ErrorCategory};
pub use file::{FileArg, FileRef, files};
pub use generator::Generator;
pub use pool::{CONSOLE_POOL, Pool, PoolOverride, PoolRef};
pub use registry::Registry;
pub use rule::{Rule, RuleId, RuleSpec};
pub use target::{Target, TargetSpec};
pub use vars::{VarValue, Vars, merge_vars};
