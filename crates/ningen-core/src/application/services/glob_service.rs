//! Glob Service - expands patterns into file references.
//!
//! The globber port does the directory walk; this service turns its matches
//! into sorted, deduplicated [`FileRef`]s and enforces the empty-result
//! policy.

use std::collections::BTreeSet;
use std::path::Path;
use tracing::{debug, instrument};

use crate::{
    application::{ApplicationError, ports::Globber},
    domain::FileRef,
    error::NingenResult,
};

/// A glob expansion request. Relative patterns are resolved against the
/// directory the request is expanded in and may climb out of it with `..`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlobRequest {
    patterns: Vec<String>,
    exclude: Vec<String>,
    can_be_empty: bool,
}

impl GlobRequest {
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            patterns: patterns.into_iter().map(Into::into).collect(),
            exclude: Vec::new(),
            can_be_empty: false,
        }
    }

    /// Patterns whose matches are removed from the result.
    pub fn exclude<I, S>(mut self, exclude: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude.extend(exclude.into_iter().map(Into::into));
        self
    }

    pub fn can_be_empty(mut self, can_be_empty: bool) -> Self {
        self.can_be_empty = can_be_empty;
        self
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    pub fn excluded(&self) -> &[String] {
        &self.exclude
    }

    /// `p1, p2, -excl`
    fn describe(&self) -> String {
        self.patterns
            .iter()
            .cloned()
            .chain(self.exclude.iter().map(|e| format!("-{e}")))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Glob expansion service.
pub struct GlobService {
    globber: Box<dyn Globber>,
}

impl GlobService {
    pub fn new(globber: Box<dyn Globber>) -> Self {
        Self { globber }
    }

    /// Expand `request` under `directory`. Results are sorted by path with
    /// duplicates removed.
    #[instrument(skip_all, fields(directory = %directory.display()))]
    pub fn glob(&self, directory: &Path, request: &GlobRequest) -> NingenResult<Vec<FileRef>> {
        let matches = self
            .globber
            .expand(directory, &request.patterns, &request.exclude)?;

        let files: BTreeSet<FileRef> = matches
            .into_iter()
            .map(|path| FileRef::resolve(directory, path))
            .collect();

        debug!(
            patterns = %request.describe(),
            matched = files.len(),
            "Glob expanded"
        );

        if files.is_empty() && !request.can_be_empty {
            return Err(ApplicationError::EmptyGlob {
                description: request.describe(),
            }
            .into());
        }

        Ok(files.into_iter().collect())
    }
}
