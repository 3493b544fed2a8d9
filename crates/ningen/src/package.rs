//! Scopes for nested build description units.

use std::path::{Path, PathBuf};

use ningen_core::domain::{FileArg, FileRef, Pool, RuleId, RuleSpec, Target, TargetSpec, files};
use ningen_core::error::NingenResult;

use crate::{GlobRequest, Ningen};

/// A build description unit living in its own directory.
///
/// Relative names resolve against the unit's directory, and rules record it
/// as their defining directory (so `$dir` points there). Every definition
/// goes into the shared registry of the [`Ningen`] handle.
pub struct Package<'a> {
    ningen: &'a mut Ningen,
    directory: PathBuf,
}

impl<'a> Package<'a> {
    pub(crate) fn new(ningen: &'a mut Ningen, directory: PathBuf) -> Self {
        Self { ningen, directory }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Scope for a unit nested below this one.
    pub fn package(&mut self, subdir: impl AsRef<Path>) -> Package<'_> {
        let directory = FileRef::resolve(&self.directory, subdir)
            .absolute_path()
            .to_path_buf();
        Package::new(self.ningen, directory)
    }

    pub fn file(&self, name: impl AsRef<Path>) -> FileRef {
        FileRef::resolve(&self.directory, name)
    }

    pub fn files<I, A>(&self, names: I) -> NingenResult<Vec<FileRef>>
    where
        I: IntoIterator<Item = A>,
        A: Into<FileArg>,
    {
        Ok(files(&self.directory, names)?)
    }

    pub fn glob(&self, request: &GlobRequest) -> NingenResult<Vec<FileRef>> {
        self.ningen.globber.glob(&self.directory, request)
    }

    pub fn rule(&mut self, spec: RuleSpec) -> NingenResult<RuleId> {
        Ok(self.ningen.registry.define_rule(spec, &self.directory)?)
    }

    pub fn build(&mut self, spec: TargetSpec) -> NingenResult<&Target> {
        Ok(self.ningen.registry.define_target(spec)?)
    }

    pub fn pool(&mut self, name: &str, depth: u32) -> NingenResult<Pool> {
        Ok(self.ningen.registry.define_pool(name, depth)?)
    }
}

#[cfg(test)]
mod tests {
    use crate::{Ningen, RuleSpec, Settings, TargetSpec};
    use ningen_adapters::MemoryFilesystem;
    use std::path::Path;

    fn handle() -> Ningen {
        let fs = MemoryFilesystem::new();
        Ningen::with_adapters("/repo", Settings::default(), Box::new(fs.clone()), Box::new(fs))
    }

    #[test]
    fn resolves_against_subdirectory() {
        let mut n = handle();
        let mut lib = n.package("lib");
        assert_eq!(lib.directory(), Path::new("/repo/lib"));
        assert_eq!(lib.file("a.c").absolute_path(), Path::new("/repo/lib/a.c"));

        let nested = lib.package("../tools");
        assert_eq!(nested.directory(), Path::new("/repo/tools"));
    }

    #[test]
    fn definitions_share_one_registry() {
        let mut n = handle();
        {
            let mut lib = n.package("lib");
            let rule = lib
                .rule(RuleSpec::new("gen", "$dir/gen.sh $in $out"))
                .unwrap();
            let output = lib.file("x.out");
            let spec = TargetSpec::new(&rule)
                .inputs([lib.file("x.in")])
                .outputs([output.clone()]);
            let target = lib.build(spec).unwrap();
            assert_eq!(target.outputs(), [output]);
        }

        let options = n.options().enable_generator_rule(false);
        let text = n.generate_to_string(&options).unwrap();
        assert_eq!(
            text,
            "rule gen\n  command = ./lib/gen.sh $in $out\n\n\
             build lib/x.out: gen lib/x.in\n\n"
        );
    }

    #[test]
    fn duplicate_rule_across_packages_rejected() {
        let mut n = handle();
        n.package("a").rule(RuleSpec::new("cc", "cc")).unwrap();
        let err = n.package("b").rule(RuleSpec::new("cc", "cc")).unwrap_err();
        assert_eq!(err.to_string(), "A definition for rule 'cc' already exists");
    }
}
