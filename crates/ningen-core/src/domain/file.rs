//! File handles used as build inputs, outputs, and variable values.

use std::fmt;
use std::path::{Component, Path, PathBuf};

use crate::domain::error::DomainError;

/// An immutable handle to an absolute path.
///
/// Invariant: the path is absolute. Relative names are resolved against a
/// base directory at construction time; absolute names are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FileRef(PathBuf);

impl FileRef {
    /// Construct a handle from `name`, using `directory` as the root when
    /// `name` is relative.
    pub fn resolve(directory: impl AsRef<Path>, name: impl AsRef<Path>) -> Self {
        let name = name.as_ref();
        if name.is_absolute() {
            Self(name.to_path_buf())
        } else {
            Self(normalize(&directory.as_ref().join(name)))
        }
    }

    pub fn absolute_path(&self) -> &Path {
        &self.0
    }

    /// Path of this file relative to `directory`, for display in a manifest.
    ///
    /// Falls back to the absolute path when no relative form exists.
    pub fn relative_to(&self, directory: impl AsRef<Path>) -> String {
        relative_path(&self.0, directory.as_ref())
    }

    /// Append a literal suffix to the whole path (`a.txt` -> `a.txt.out`).
    pub fn with_suffix(&self, suffix: &str) -> Self {
        let mut path = self.0.clone().into_os_string();
        path.push(suffix);
        Self(PathBuf::from(path))
    }

    /// Replace the final extension (`a.txt` -> `a.out`).
    pub fn replace_extension(&self, extension: &str) -> Result<Self, DomainError> {
        if !extension.starts_with('.') {
            return Err(DomainError::InvalidExtension {
                extension: extension.to_string(),
            });
        }
        if self.0.extension().is_none() {
            return Err(DomainError::NoExtension {
                path: self.0.display().to_string(),
            });
        }
        let mut path = self.0.with_extension("").into_os_string();
        path.push(extension);
        Ok(Self(PathBuf::from(path)))
    }
}

impl AsRef<Path> for FileRef {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl fmt::Display for FileRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

/// One argument to [`files`]: a single name or a list of names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileArg {
    One(String),
    Many(Vec<String>),
}

impl From<&str> for FileArg {
    fn from(name: &str) -> Self {
        Self::One(name.to_string())
    }
}

impl From<String> for FileArg {
    fn from(name: String) -> Self {
        Self::One(name)
    }
}

impl From<Vec<String>> for FileArg {
    fn from(names: Vec<String>) -> Self {
        Self::Many(names)
    }
}

impl From<Vec<&str>> for FileArg {
    fn from(names: Vec<&str>) -> Self {
        Self::Many(names.into_iter().map(str::to_string).collect())
    }
}

impl<const N: usize> From<[&str; N]> for FileArg {
    fn from(names: [&str; N]) -> Self {
        Self::Many(names.iter().map(|n| n.to_string()).collect())
    }
}

/// Build a list of [`FileRef`]s from either one list of names or a vararg
/// list of single names.
///
/// A list appearing among several arguments is rejected with the index of
/// the offending argument.
pub fn files<I, A>(directory: impl AsRef<Path>, args: I) -> Result<Vec<FileRef>, DomainError>
where
    I: IntoIterator<Item = A>,
    A: Into<FileArg>,
{
    let directory = directory.as_ref();
    let args: Vec<FileArg> = args.into_iter().map(Into::into).collect();

    if let [FileArg::Many(names)] = args.as_slice() {
        return Ok(names
            .iter()
            .map(|name| FileRef::resolve(directory, name))
            .collect());
    }

    args.into_iter()
        .enumerate()
        .map(|(index, arg)| match arg {
            FileArg::One(name) => Ok(FileRef::resolve(directory, name)),
            FileArg::Many(names) => Err(DomainError::ArgumentShape {
                index,
                found: format!("[{}]", names.join(", ")),
            }),
        })
        .collect()
}

/// Render `path` relative to `directory`.
///
/// An empty result (the directory itself) is returned as-is.
pub(crate) fn relative_path(path: &Path, directory: &Path) -> String {
    match pathdiff::diff_paths(path, directory) {
        Some(relative) => relative.display().to_string(),
        None => path.display().to_string(),
    }
}

/// Prefix bare relative paths with `./` so the shell runs the file instead
/// of searching `PATH`.
pub(crate) fn add_leading_dot_slash(path: String) -> String {
    if Path::new(&path).is_absolute() || path.starts_with('.') {
        path
    } else {
        format!("./{path}")
    }
}

/// Lexically collapse `.` and `..` segments.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push(component);
                }
            }
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_absolute_path() {
        let f = FileRef::resolve("/root/dir", "/a/b/c.txt");
        assert_eq!(f.absolute_path(), Path::new("/a/b/c.txt"));
    }

    #[test]
    fn resolves_relative_path() {
        let f = FileRef::resolve("/root/dir", "x.txt");
        assert_eq!(f.absolute_path(), Path::new("/root/dir/x.txt"));
    }

    #[test]
    fn collapses_dot_segments() {
        let f = FileRef::resolve("/root/dir", "./sub/../y.txt");
        assert_eq!(f.absolute_path(), Path::new("/root/dir/y.txt"));

        let up = FileRef::resolve("/root/dir", "../z.txt");
        assert_eq!(up.absolute_path(), Path::new("/root/z.txt"));
    }

    #[test]
    fn relative_rendering() {
        let f = FileRef::resolve("/", "/root/dir/x.txt");
        assert_eq!(f.relative_to("/root/dir"), "x.txt");
        assert_eq!(f.relative_to("/"), "root/dir/x.txt");
        assert_eq!(
            FileRef::resolve("/", "/abs/bbb").relative_to("/root/dir"),
            "../../abs/bbb"
        );
    }

    #[test]
    fn suffix_appends_to_whole_path() {
        let f = FileRef::resolve("/root", "a.txt").with_suffix(".out");
        assert_eq!(f.absolute_path(), Path::new("/root/a.txt.out"));
    }

    #[test]
    fn replace_extension_swaps_last_extension() {
        let f = FileRef::resolve("/root", "a.tar.gz");
        let replaced = f.replace_extension(".xz").unwrap();
        assert_eq!(replaced.absolute_path(), Path::new("/root/a.tar.xz"));
    }

    #[test]
    fn replace_extension_appends_verbatim() {
        let f = FileRef::resolve("/root", "a.txt");
        assert_eq!(
            f.replace_extension(".").unwrap().absolute_path(),
            Path::new("/root/a.")
        );
        assert_eq!(
            f.replace_extension(".tar.gz").unwrap().absolute_path(),
            Path::new("/root/a.tar.gz")
        );
    }

    #[test]
    fn replace_extension_requires_extension() {
        let f = FileRef::resolve("/root", "Makefile");
        assert!(matches!(
            f.replace_extension(".txt"),
            Err(DomainError::NoExtension { .. })
        ));
    }

    #[test]
    fn replace_extension_requires_leading_dot() {
        let f = FileRef::resolve("/root", "a.txt");
        assert!(matches!(
            f.replace_extension("out"),
            Err(DomainError::InvalidExtension { .. })
        ));
    }

    #[test]
    fn files_single_name() {
        let result = files("/root/dir", ["x.txt"]).unwrap();
        assert_eq!(result, vec![FileRef::resolve("/root/dir", "x.txt")]);
    }

    #[test]
    fn files_single_list() {
        let result = files("/root/dir", [FileArg::from(["a.txt", "b.txt", "c.txt"])]).unwrap();
        let paths: Vec<_> = result.iter().map(|f| f.to_string()).collect();
        assert_eq!(
            paths,
            vec!["/root/dir/a.txt", "/root/dir/b.txt", "/root/dir/c.txt"]
        );
    }

    #[test]
    fn files_vararg_names() {
        let result = files("/root/dir", ["a.txt", "b.txt", "c.txt"]).unwrap();
        assert_eq!(result.len(), 3);
        assert_eq!(result[2].absolute_path(), Path::new("/root/dir/c.txt"));
    }

    #[test]
    fn files_rejects_nested_list() {
        let err = files(
            "/root/dir",
            [FileArg::from("a.txt"), FileArg::from(["b.txt", "c.txt"])],
        )
        .unwrap_err();
        assert!(matches!(err, DomainError::ArgumentShape { index: 1, .. }));
        assert!(err.to_string().contains("element at index 1"));
    }

    #[test]
    fn leading_dot_slash() {
        assert_eq!(add_leading_dot_slash("bin".into()), "./bin");
        assert_eq!(add_leading_dot_slash("../bin".into()), "../bin");
        assert_eq!(add_leading_dot_slash("/usr/bin".into()), "/usr/bin");
        assert_eq!(add_leading_dot_slash(String::new()), "./");
    }
}
