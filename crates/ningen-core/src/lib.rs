//! Ningen Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for Ningen, a
//! library for describing builds in Rust and emitting Ninja manifests,
//! following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │         ningen (facade crate)           │
//! │    (Build descriptions call this)       │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │     (GenerateService, GlobService)      │
//! │         Orchestrates Use Cases          │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │        (Driven: Filesystem, Globber)    │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     ningen-adapters (Infrastructure)    │
//! │  (LocalFilesystem, WalkGlobber, etc)    │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │  (Registry, Rule, Target, Generator)    │
//! │         No I/O, No Logging              │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```
//! use std::path::Path;
//! use ningen_core::domain::{FileRef, Generator, Registry, RuleSpec, TargetSpec};
//!
//! let dir = Path::new("/src");
//! let mut registry = Registry::new();
//!
//! let cc = registry
//!     .define_rule(RuleSpec::new("cc", "gcc -c $in -o $out"), dir)
//!     .unwrap();
//! registry
//!     .define_target(
//!         TargetSpec::new(&cc)
//!             .inputs([FileRef::resolve(dir, "main.c")])
//!             .outputs([FileRef::resolve(dir, "main.o")]),
//!     )
//!     .unwrap();
//!
//! let manifest = Generator::new(dir).render(&registry).unwrap();
//! assert!(manifest.contains("build main.o: cc main.c\n"));
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        GENERATOR_RULE_NAME, GenerateOptions, GenerateService, GlobRequest, GlobService,
        ports::{Filesystem, Globber},
    };
    pub use crate::domain::{
        FileArg, FileRef, Pool, PoolOverride, PoolRef, Registry, RuleId, RuleSpec, Target,
        TargetSpec, VarValue, Vars,
    };
    pub use crate::error::{NingenError, NingenResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
