//! Variables usable in rule commands.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use crate::domain::file::FileRef;

/// A variable value: literal text, or a file rendered relative to the
/// manifest directory at generation time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VarValue {
    Text(String),
    File(FileRef),
}

impl VarValue {
    pub fn render(&self, directory: &Path) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::File(file) => file.relative_to(directory),
        }
    }
}

impl From<&str> for VarValue {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for VarValue {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<FileRef> for VarValue {
    fn from(file: FileRef) -> Self {
        Self::File(file)
    }
}

impl From<&FileRef> for VarValue {
    fn from(file: &FileRef) -> Self {
        Self::File(file.clone())
    }
}

impl fmt::Display for VarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::File(file) => write!(f, "{file}"),
        }
    }
}

/// Variable bindings keyed by name. Iteration is always in key order.
pub type Vars = BTreeMap<String, VarValue>;

/// Overlay `overrides` on `defaults`; on a key collision the override wins.
pub fn merge_vars(defaults: &Vars, overrides: &Vars) -> Vars {
    let mut merged = defaults.clone();
    merged.extend(overrides.iter().map(|(k, v)| (k.clone(), v.clone())));
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn override_wins_and_keys_sorted() {
        let defaults = Vars::from([
            ("a".to_string(), VarValue::from("defaultA")),
            ("b".to_string(), VarValue::from("defaultB")),
        ]);
        let overrides = Vars::from([
            ("c".to_string(), VarValue::from("newC")),
            ("b".to_string(), VarValue::from("overriddenB")),
        ]);

        let merged: Vec<_> = merge_vars(&defaults, &overrides)
            .into_iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect();
        assert_eq!(merged, vec!["a=defaultA", "b=overriddenB", "c=newC"]);
    }

    #[test]
    fn file_value_renders_relative() {
        let value = VarValue::from(FileRef::resolve("/root/dir", "nested/aaa"));
        assert_eq!(value.render(Path::new("/root/dir")), "nested/aaa");
    }
}
