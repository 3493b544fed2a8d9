// ============================================================================
// domain/error.rs - BUILD GRAPH ERROR DOMAIN
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (so a snapshot can be re-validated)
/// - Categorizable (for display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    // ========================================================================
    // Conflicts
    // ========================================================================
    #[error("A definition for {kind} '{name}' already exists")]
    DuplicateDefinition { kind: DefinitionKind, name: String },

    #[error("Pool name '{name}' is reserved by the build executor")]
    ReservedName { name: String },

    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("{list} list cannot be empty")]
    EmptyList { list: &'static str },

    #[error("File has no extension: {path}")]
    NoExtension { path: String },

    #[error("Extension must start with a dot: {extension}")]
    InvalidExtension { extension: String },

    #[error("Pool '{name}' must have a depth of at least 1")]
    InvalidDepth { name: String },

    #[error("Expected list of strings but element at index {index} was {found}")]
    ArgumentShape { index: usize, found: String },

    // ========================================================================
    // Not Found Errors
    // ========================================================================
    #[error("Missing rule: {name}")]
    MissingRule { name: String },

    // ========================================================================
    // Configuration Errors (detected while generating)
    // ========================================================================
    #[error("binary property defined in rule {rule} but not referenced in command: {command}")]
    UnusedBinary { rule: String, command: String },

    #[error("{rule} is not a generator rule")]
    NotAGeneratorRule { rule: String },
}

/// What kind of definition collided in the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DefinitionKind {
    Rule,
    Pool,
    Output,
}

impl DefinitionKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Rule => "rule",
            Self::Pool => "pool",
            Self::Output => "output",
        }
    }
}

impl std::fmt::Display for DefinitionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::DuplicateDefinition { kind, name } => match kind {
                DefinitionKind::Output => vec![
                    format!("Two build targets both produce '{}'", name),
                    "Each output file may be claimed by exactly one target".into(),
                ],
                _ => vec![
                    format!("The {} '{}' is defined more than once", kind, name),
                    format!("Rename one of the {}s or reuse the existing handle", kind),
                ],
            },
            Self::ReservedName { name } => vec![
                format!("'{}' is built into Ninja and needs no definition", name),
                "Assign PoolRef::Console to a rule or target instead".into(),
            ],
            Self::EmptyList { list } => vec![
                format!("Supply at least one file in {}", list),
                "A glob that may match nothing should set can_be_empty".into(),
            ],
            Self::NoExtension { path } => {
                vec![format!("Use with_suffix on '{}' instead", path)]
            }
            Self::InvalidExtension { extension } => {
                vec![format!("Did you mean '.{}'?", extension)]
            }
            Self::InvalidDepth { name } => vec![
                format!("Give pool '{}' a positive depth", name),
                "A depth of 1 runs one job at a time".into(),
            ],
            Self::UnusedBinary { rule, .. } => vec![
                format!("Reference $binary in the command of rule '{}'", rule),
                "Or move the file from binary to srcs".into(),
            ],
            Self::NotAGeneratorRule { rule } => vec![format!(
                "Set generator(true) on rule '{}' before using it to regenerate the manifest",
                rule
            )],
            Self::MissingRule { name } => vec![
                format!("Rule '{}' is not registered", name),
                "Rule handles do not survive a registry reset".into(),
            ],
            Self::ArgumentShape { index, .. } => vec![
                format!("Flatten the argument at index {}", index),
                "Pass either one list of names or several single names".into(),
            ],
        }
    }

    /// Error category for display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::DuplicateDefinition { .. } | Self::ReservedName { .. } => {
                ErrorCategory::Conflict
            }
            Self::EmptyList { .. }
            | Self::NoExtension { .. }
            | Self::InvalidExtension { .. }
            | Self::InvalidDepth { .. }
            | Self::ArgumentShape { .. } => ErrorCategory::Validation,
            Self::MissingRule { .. } => ErrorCategory::NotFound,
            Self::UnusedBinary { .. } | Self::NotAGeneratorRule { .. } => {
                ErrorCategory::Configuration
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Conflict,
    NotFound,
    Configuration,
}
