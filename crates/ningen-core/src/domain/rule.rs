//! Rules: reusable, named command templates.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::domain::{
    file::FileRef,
    pool::PoolRef,
    vars::{VarValue, Vars},
};

/// Opaque handle to a registered rule.
///
/// Only the registry hands these out, so holding one means the name passed
/// duplicate checking when it was issued.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RuleId(String);

impl RuleId {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A registered rule. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub(crate) name: String,
    pub(crate) command: String,
    pub(crate) binary: Option<FileRef>,
    pub(crate) srcs: Vec<FileRef>,
    pub(crate) description: Option<String>,
    pub(crate) vars: Vars,
    pub(crate) generator: bool,
    pub(crate) directory: PathBuf,
    pub(crate) pool: Option<PoolRef>,
}

impl Rule {
    /// Build a rule from its definition, recording `directory` as the place
    /// it was defined. The binary, if any, joins the implicit sources.
    pub(crate) fn from_spec(spec: RuleSpec, directory: &Path) -> Self {
        let mut srcs = spec.srcs;
        if let Some(binary) = &spec.binary {
            if !srcs.contains(binary) {
                srcs.push(binary.clone());
            }
        }
        Self {
            name: spec.name,
            command: spec.command,
            binary: spec.binary,
            srcs,
            description: spec.description,
            vars: spec.vars,
            generator: spec.generator,
            directory: directory.to_path_buf(),
            pool: spec.pool,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn binary(&self) -> Option<&FileRef> {
        self.binary.as_ref()
    }

    /// Implicit dependencies added to every target using this rule.
    pub fn srcs(&self) -> &[FileRef] {
        &self.srcs
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn vars(&self) -> &Vars {
        &self.vars
    }

    pub const fn is_generator(&self) -> bool {
        self.generator
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn pool(&self) -> Option<&PoolRef> {
        self.pool.as_ref()
    }
}

/// Definition of a rule, handed to the registry.
///
/// # Example
///
/// ```
/// use ningen_core::domain::{FileRef, RuleSpec};
///
/// let spec = RuleSpec::new("append", "$binary $in $out")
///     .binary(FileRef::resolve("/src", "append.sh"))
///     .description("Appending text");
/// ```
#[derive(Debug, Clone)]
pub struct RuleSpec {
    name: String,
    command: String,
    binary: Option<FileRef>,
    srcs: Vec<FileRef>,
    description: Option<String>,
    vars: Vars,
    generator: bool,
    pool: Option<PoolRef>,
}

impl RuleSpec {
    pub fn new(name: impl Into<String>, command: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            command: command.into(),
            binary: None,
            srcs: Vec::new(),
            description: None,
            vars: Vars::new(),
            generator: false,
            pool: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// File to invoke, available in the command as `$binary`.
    pub fn binary(mut self, binary: FileRef) -> Self {
        self.binary = Some(binary);
        self
    }

    /// Implicit dependencies for targets using this rule.
    pub fn srcs(mut self, srcs: impl IntoIterator<Item = FileRef>) -> Self {
        self.srcs.extend(srcs);
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Default value for a variable; targets may override it.
    pub fn var(mut self, key: impl Into<String>, value: impl Into<VarValue>) -> Self {
        self.vars.insert(key.into(), value.into());
        self
    }

    pub fn vars(mut self, vars: Vars) -> Self {
        self.vars.extend(vars);
        self
    }

    /// Marks a rule that regenerates the manifest itself.
    pub fn generator(mut self, generator: bool) -> Self {
        self.generator = generator;
        self
    }

    pub fn pool(mut self, pool: impl Into<PoolRef>) -> Self {
        self.pool = Some(pool.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_empty() {
        let rule = Rule::from_spec(RuleSpec::new("r", "c"), Path::new("/root"));
        assert!(rule.srcs().is_empty());
        assert!(rule.vars().is_empty());
        assert!(!rule.is_generator());
        assert!(rule.pool().is_none());
        assert_eq!(rule.directory(), Path::new("/root"));
    }

    #[test]
    fn binary_joins_srcs_once() {
        let bin = FileRef::resolve("/root", "tool");
        let other = FileRef::resolve("/root", "lib.sh");

        let rule = Rule::from_spec(
            RuleSpec::new("r", "$binary").binary(bin.clone()).srcs([other.clone()]),
            Path::new("/root"),
        );
        assert_eq!(rule.srcs(), &[other.clone(), bin.clone()]);

        let already = Rule::from_spec(
            RuleSpec::new("r", "$binary").binary(bin.clone()).srcs([bin.clone(), other.clone()]),
            Path::new("/root"),
        );
        assert_eq!(already.srcs(), &[bin, other]);
    }
}
