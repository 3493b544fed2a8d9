//! Error reporting for build descriptions.
//!
//! Build descriptions end with a failed generation more often than not
//! while they are being written; these helpers turn a [`NingenError`] into
//! something a person can act on.

use ningen_core::error::{ErrorCategory, NingenError};

/// Exit code for a failed build description.
///
/// | Category      | Code |
/// |---------------|------|
/// | Validation    |  2   |
/// | Conflict      |  2   |
/// | Not found     |  3   |
/// | Configuration |  4   |
/// | Internal      |  1   |
pub fn exit_code(error: &NingenError) -> u8 {
    match error.category() {
        ErrorCategory::Validation | ErrorCategory::Conflict => 2,
        ErrorCategory::NotFound => 3,
        ErrorCategory::Configuration => 4,
        ErrorCategory::Internal => 1,
    }
}

/// Plain-text rendering with suggestions, ready for stderr.
pub fn format_error(error: &NingenError) -> String {
    let mut out = format!("\nError: {error}\n");

    let suggestions = error.suggestions();
    if !suggestions.is_empty() {
        out.push_str("\nSuggestions:\n");
        for s in &suggestions {
            out.push_str(&format!("  {s}\n"));
        }
    }

    out
}

/// Log the error using tracing.
pub fn log_error(error: &NingenError) {
    match error.category() {
        ErrorCategory::Validation | ErrorCategory::Conflict => {
            tracing::warn!("Invalid build description: {}", error)
        }
        ErrorCategory::NotFound => tracing::warn!("Not found: {}", error),
        ErrorCategory::Configuration => tracing::error!("Configuration error: {}", error),
        ErrorCategory::Internal => tracing::error!("Internal error: {}", error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ningen_core::application::ApplicationError;
    use ningen_core::domain::DomainError;

    #[test]
    fn format_includes_message_and_suggestions() {
        let err: NingenError = DomainError::UnusedBinary {
            rule: "run".into(),
            command: "sh -c true".into(),
        }
        .into();

        let text = format_error(&err);
        assert!(text.starts_with(
            "\nError: binary property defined in rule run but not referenced in command: sh -c true\n"
        ));
        assert!(text.contains("\nSuggestions:\n  Reference $binary in the command of rule 'run'\n"));
    }

    #[test]
    fn exit_codes_follow_category() {
        let conflict: NingenError = DomainError::ReservedName { name: "console".into() }.into();
        let missing: NingenError = ApplicationError::EmptyGlob { description: "*.c".into() }.into();
        let config: NingenError = DomainError::NotAGeneratorRule { rule: "r".into() }.into();
        let internal = NingenError::Internal { message: "x".into() };

        assert_eq!(exit_code(&conflict), 2);
        assert_eq!(exit_code(&missing), 3);
        assert_eq!(exit_code(&config), 4);
        assert_eq!(exit_code(&internal), 1);
    }
}
