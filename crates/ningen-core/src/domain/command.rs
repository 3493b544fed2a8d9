//! Command template parsing and substitution.
//!
//! A rule command is a shell command containing `$name` placeholders. Two
//! are resolved while generating the manifest:
//!
//! - `$binary` - the rule's binary, relative to the manifest directory
//! - `$dir` - the directory the rule was defined in
//!
//! Every other placeholder (`$in`, `$out`, rule and target variables) passes
//! through verbatim for the build executor to expand. `$$` is the executor's
//! escape for a literal dollar and is never the start of a placeholder.
//!
//! Placeholders are whole words: `$binary` matches in `$binary run` and
//! `$binary/x`, but not in `$binaryx`.
//!
//! # Example
//!
//! ```
//! use ningen_core::domain::command::{CommandTemplate, Placeholder, Segment};
//!
//! let template = CommandTemplate::parse("$binary -o $out $in");
//! assert!(template.references(&Placeholder::Binary));
//! assert_eq!(template.segments()[0], Segment::Placeholder(Placeholder::Binary));
//! ```

use std::fmt;

/// A placeholder recognised in a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placeholder {
    /// `$binary`
    Binary,
    /// `$dir`
    Dir,
    /// Any other `$name`, left for the executor.
    Var(String),
}

impl Placeholder {
    fn from_name(name: &str) -> Self {
        match name {
            "binary" => Self::Binary,
            "dir" => Self::Dir,
            other => Self::Var(other.to_string()),
        }
    }
}

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Binary => f.write_str("$binary"),
            Self::Dir => f.write_str("$dir"),
            Self::Var(name) => write!(f, "${name}"),
        }
    }
}

/// A segment of a parsed command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Placeholder(Placeholder),
}

/// A parsed command template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandTemplate {
    segments: Vec<Segment>,
}

impl CommandTemplate {
    /// Split a command into literal text and placeholders. Never fails:
    /// anything that is not a placeholder is literal text.
    pub fn parse(input: &str) -> Self {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = input.chars().peekable();

        while let Some(ch) = chars.next() {
            if ch != '$' {
                literal.push(ch);
                continue;
            }
            match chars.peek() {
                Some('$') => {
                    chars.next();
                    literal.push_str("$$");
                }
                Some(c) if is_word_char(*c) => {
                    let mut name = String::new();
                    while let Some(c) = chars.peek().copied().filter(|c| is_word_char(*c)) {
                        name.push(c);
                        chars.next();
                    }
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(Segment::Placeholder(Placeholder::from_name(&name)));
                }
                _ => literal.push('$'),
            }
        }

        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Self { segments }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Whether `placeholder` appears anywhere in the command.
    pub fn references(&self, placeholder: &Placeholder) -> bool {
        self.segments
            .iter()
            .any(|s| matches!(s, Segment::Placeholder(p) if p == placeholder))
    }

    /// Render the command, replacing each placeholder for which `resolve`
    /// returns a value. Unresolved placeholders are written back verbatim.
    pub fn render(&self, resolve: impl Fn(&Placeholder) -> Option<String>) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Placeholder(p) => match resolve(p) {
                    Some(value) => out.push_str(&value),
                    None => out.push_str(&p.to_string()),
                },
            }
        }
        out
    }
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}
