//! Glob expansion against the local disk.
//!
//! Patterns use shell syntax: `*` stays within one path component, `**`
//! spans any number of directories. Relative patterns are anchored at the
//! directory of the calling unit and may climb out of it with `..`;
//! absolute patterns are used as they are.

use std::path::{Component, Path, PathBuf};

use globset::{Glob, GlobBuilder, GlobSet, GlobSetBuilder};
use ningen_core::{
    application::{ApplicationError, ports::Globber},
    error::NingenResult,
};
use tracing::{debug, trace};
use walkdir::WalkDir;

/// Compiled include and exclude patterns, anchored at a root directory.
#[derive(Debug, Clone)]
pub struct PatternMatcher {
    include: GlobSet,
    exclude: GlobSet,
    bases: Vec<PathBuf>,
}

impl PatternMatcher {
    pub fn new(root: &Path, patterns: &[String], exclude: &[String]) -> NingenResult<Self> {
        let (include, mut bases) = compile(root, patterns)?;
        let (exclude, _) = compile(root, exclude)?;

        // Walking a directory covers everything below it.
        bases.sort();
        let mut outermost: Vec<PathBuf> = Vec::new();
        for base in bases {
            if !outermost.iter().any(|kept| base.starts_with(kept)) {
                outermost.push(base);
            }
        }

        Ok(Self {
            include,
            exclude,
            bases: outermost,
        })
    }

    /// Directories that hold every possible match.
    pub fn bases(&self) -> &[PathBuf] {
        &self.bases
    }

    /// `path` is absolute.
    pub fn is_match(&self, path: &Path) -> bool {
        self.include.is_match(path) && !self.exclude.is_match(path)
    }
}

/// A pattern made absolute.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Anchored {
    /// Longest leading directory free of wildcards.
    base: PathBuf,
    /// The whole pattern as an absolute glob, `base` escaped.
    glob: String,
}

fn anchor(root: &Path, pattern: &str) -> Anchored {
    let pattern_path = Path::new(pattern);
    let mut base = if pattern_path.is_absolute() {
        PathBuf::new()
    } else {
        root.to_path_buf()
    };
    let mut rest: Vec<String> = Vec::new();

    for component in pattern_path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir if rest.is_empty() => {
                base.pop();
            }
            Component::Normal(part) if rest.is_empty() && !has_wildcard(part) => base.push(part),
            Component::Prefix(_) | Component::RootDir => base.push(component),
            other => rest.push(other.as_os_str().to_string_lossy().into_owned()),
        }
    }

    // A literal pattern names one file; walk its directory.
    if rest.is_empty() {
        if let Some(name) = base.file_name().map(|n| globset::escape(&n.to_string_lossy())) {
            rest.push(name);
            base.pop();
        }
    }

    let mut glob = globset::escape(&base.to_string_lossy());
    for part in rest {
        if !glob.ends_with('/') {
            glob.push('/');
        }
        glob.push_str(&part);
    }

    Anchored { base, glob }
}

fn has_wildcard(part: &std::ffi::OsStr) -> bool {
    part.to_string_lossy()
        .chars()
        .any(|c| matches!(c, '*' | '?' | '[' | '{'))
}

fn compile(root: &Path, patterns: &[String]) -> NingenResult<(GlobSet, Vec<PathBuf>)> {
    let mut builder = GlobSetBuilder::new();
    let mut bases = Vec::new();
    for pattern in patterns {
        let anchored = anchor(root, pattern);
        builder.add(glob(pattern, &anchored.glob)?);
        bases.push(anchored.base);
    }
    let set = builder.build().map_err(|e| ApplicationError::InvalidGlob {
        pattern: patterns.join(", "),
        reason: e.to_string(),
    })?;
    Ok((set, bases))
}

fn glob(pattern: &str, anchored: &str) -> NingenResult<Glob> {
    GlobBuilder::new(anchored)
        .literal_separator(true)
        .build()
        .map_err(|e| {
            ApplicationError::InvalidGlob {
                pattern: pattern.to_string(),
                reason: e.kind().to_string(),
            }
            .into()
        })
}

/// Production globber: walks the directory trees the patterns point into.
#[derive(Debug, Clone, Copy, Default)]
pub struct WalkGlobber;

impl WalkGlobber {
    pub fn new() -> Self {
        Self
    }
}

impl Globber for WalkGlobber {
    fn expand(
        &self,
        root: &Path,
        patterns: &[String],
        exclude: &[String],
    ) -> NingenResult<Vec<PathBuf>> {
        let matcher = PatternMatcher::new(root, patterns, exclude)?;
        let mut found = Vec::new();

        for base in matcher.bases() {
            if !base.is_dir() {
                trace!(base = %base.display(), "Glob base is not a directory");
                continue;
            }

            for entry in WalkDir::new(base).min_depth(1).sort_by_file_name() {
                let entry = entry.map_err(|e| {
                    let path = e.path().unwrap_or(base).to_path_buf();
                    ApplicationError::FilesystemError {
                        path,
                        reason: format!("directory walk error: {e}"),
                    }
                })?;
                if !entry.file_type().is_file() {
                    continue;
                }

                if matcher.is_match(entry.path()) {
                    trace!(path = %entry.path().display(), "Glob match");
                    found.push(entry.into_path());
                }
            }
        }

        debug!(root = %root.display(), matched = found.len(), "Walked directory tree");
        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ningen_core::error::NingenError;

    const ROOT: &str = "/repo/sub";

    fn strings(patterns: &[&str]) -> Vec<String> {
        patterns.iter().map(|p| p.to_string()).collect()
    }

    fn matcher(patterns: &[&str], exclude: &[&str]) -> PatternMatcher {
        PatternMatcher::new(Path::new(ROOT), &strings(patterns), &strings(exclude)).unwrap()
    }

    #[test]
    fn star_stays_in_one_directory() {
        let m = matcher(&["testdata/*.txt"], &[]);
        assert!(m.is_match(Path::new("/repo/sub/testdata/a.txt")));
        assert!(!m.is_match(Path::new("/repo/sub/testdata/A/a.txt")));
        assert_eq!(m.bases(), [PathBuf::from("/repo/sub/testdata")]);
    }

    #[test]
    fn double_star_spans_directories() {
        let m = matcher(&["testdata/**/*.txt"], &[]);
        assert!(m.is_match(Path::new("/repo/sub/testdata/a.txt")));
        assert!(m.is_match(Path::new("/repo/sub/testdata/A/a.txt")));
        assert!(!m.is_match(Path::new("/repo/sub/testdata/A/a.old")));
    }

    #[test]
    fn exclude_wins() {
        let m = matcher(&["testdata/**/*.txt"], &["testdata/**/a.*"]);
        assert!(!m.is_match(Path::new("/repo/sub/testdata/a.txt")));
        assert!(!m.is_match(Path::new("/repo/sub/testdata/B/a.txt")));
        assert!(m.is_match(Path::new("/repo/sub/testdata/B/b.txt")));
    }

    #[test]
    fn leading_dot_slash_ignored() {
        let m = matcher(&["./src/*.rs"], &[]);
        assert!(m.is_match(Path::new("/repo/sub/src/lib.rs")));
    }

    #[test]
    fn parent_and_absolute_patterns_leave_root() {
        let m = matcher(&["../common/*.h", "/opt/include/*.h"], &[]);
        assert!(m.is_match(Path::new("/repo/common/a.h")));
        assert!(m.is_match(Path::new("/opt/include/b.h")));
        assert!(!m.is_match(Path::new("/repo/sub/common/a.h")));
        assert_eq!(
            m.bases(),
            [PathBuf::from("/opt/include"), PathBuf::from("/repo/common")]
        );
    }

    #[test]
    fn nested_bases_collapse() {
        let m = matcher(&["src/*.c", "src/sub/*.c", "literal.txt"], &[]);
        assert_eq!(m.bases(), [PathBuf::from("/repo/sub")]);
        assert!(m.is_match(Path::new("/repo/sub/literal.txt")));
    }

    #[test]
    fn invalid_pattern_reported() {
        let err = PatternMatcher::new(Path::new(ROOT), &strings(&["a[b"]), &[]).unwrap_err();
        assert!(matches!(
            err,
            NingenError::Application(ApplicationError::InvalidGlob { ref pattern, .. })
                if pattern == "a[b"
        ));
    }
}
