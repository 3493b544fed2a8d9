//! Ningen - write Ninja build files from Rust build descriptions.
//!
//! A build description is an ordinary Rust program. It creates a [`Ningen`]
//! handle rooted at its directory, registers pools, rules, and targets, and
//! finally calls [`Ningen::generate`] to write the manifest.
//!
//! ```no_run
//! use ningen::{Ningen, RuleSpec, TargetSpec};
//!
//! fn main() -> anyhow::Result<()> {
//!     ningen::logging::init_logging(0, false)?;
//!
//!     let mut n = Ningen::new(env!("CARGO_MANIFEST_DIR"))?;
//!     let cc = n.rule(RuleSpec::new("cc", "gcc -c $in -o $out").description("CC $out"))?;
//!     let main_c = n.file("main.c");
//!     n.build(
//!         TargetSpec::new(&cc)
//!             .inputs([main_c.clone()])
//!             .outputs([main_c.replace_extension(".o")?]),
//!     )?;
//!
//!     n.generate(&n.options())?;
//!     Ok(())
//! }
//! ```
//!
//! Larger builds split their description into units, one per directory;
//! each unit receives a [`Package`] so its relative paths resolve against
//! its own directory while every definition lands in the one shared
//! registry.

pub mod logging;
mod package;
pub mod report;
mod settings;

use std::path::{Path, PathBuf};

use ningen_adapters::{LocalFilesystem, WalkGlobber};
use ningen_core::application::{
    GenerateService, GlobService,
    ports::{Filesystem, Globber},
};
use tracing::debug;

pub use ningen_core::application::{GENERATOR_RULE_NAME, GenerateOptions, GlobRequest};
pub use ningen_core::domain::{
    CONSOLE_POOL, DomainError, FileArg, FileRef, Pool, PoolOverride, PoolRef, Registry, RuleId,
    RuleSpec, Target, TargetSpec, VarValue, Vars,
};
pub use ningen_core::error::{NingenError, NingenResult};
pub use package::Package;
pub use settings::{SETTINGS_FILE, Settings};

/// The build description handle: one registry, one root directory.
pub struct Ningen {
    registry: Registry,
    root: PathBuf,
    settings: Settings,
    generator: GenerateService,
    globber: GlobService,
}

impl Ningen {
    /// Handle rooted at `root` with settings from `root/ningen.toml` (if
    /// any), writing to the local disk.
    pub fn new(root: impl Into<PathBuf>) -> NingenResult<Self> {
        let root = absolute(root.into())?;
        let settings = Settings::load(&root)?;
        Ok(Self::from_settings(root, settings))
    }

    /// Handle with explicit settings, writing to the local disk.
    pub fn from_settings(root: impl Into<PathBuf>, settings: Settings) -> Self {
        Self::with_adapters(
            root,
            settings,
            Box::new(LocalFilesystem::new()),
            Box::new(WalkGlobber::new()),
        )
    }

    /// Handle with injected adapters, typically in-memory ones for tests.
    pub fn with_adapters(
        root: impl Into<PathBuf>,
        settings: Settings,
        filesystem: Box<dyn Filesystem>,
        globber: Box<dyn Globber>,
    ) -> Self {
        let root = root.into();
        debug!(root = %root.display(), ?settings, "Creating build description handle");
        Self {
            registry: Registry::new().with_unique_outputs(settings.unique_outputs),
            root,
            settings,
            generator: GenerateService::new(filesystem),
            globber: GlobService::new(globber),
        }
    }

    /// Directory of the top-level build description.
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Scope for the build description unit in `subdir` (relative to the
    /// root, or absolute).
    pub fn package(&mut self, subdir: impl AsRef<Path>) -> Package<'_> {
        let directory = FileRef::resolve(&self.root, subdir).absolute_path().to_path_buf();
        Package::new(self, directory)
    }

    pub fn file(&self, name: impl AsRef<Path>) -> FileRef {
        FileRef::resolve(&self.root, name)
    }

    pub fn files<I, A>(&self, names: I) -> NingenResult<Vec<FileRef>>
    where
        I: IntoIterator<Item = A>,
        A: Into<FileArg>,
    {
        Ok(ningen_core::domain::files(&self.root, names)?)
    }

    pub fn glob(&self, request: &GlobRequest) -> NingenResult<Vec<FileRef>> {
        self.globber.glob(&self.root, request)
    }

    pub fn rule(&mut self, spec: RuleSpec) -> NingenResult<RuleId> {
        Ok(self.registry.define_rule(spec, &self.root)?)
    }

    pub fn build(&mut self, spec: TargetSpec) -> NingenResult<&Target> {
        Ok(self.registry.define_target(spec)?)
    }

    pub fn pool(&mut self, name: &str, depth: u32) -> NingenResult<Pool> {
        Ok(self.registry.define_pool(name, depth)?)
    }

    /// Generation options derived from the settings.
    pub fn options(&self) -> GenerateOptions {
        GenerateOptions::new(self.file(&self.settings.output), self.file(&self.settings.script))
            .enable_generator_rule(self.settings.enable_generator_rule)
    }

    /// Render the manifest without writing it.
    pub fn generate_to_string(&self, options: &GenerateOptions) -> NingenResult<String> {
        self.generator.render(&self.registry, &self.root, options)
    }

    /// Render the manifest and write it. Nothing is written if rendering
    /// fails. Returns the path written.
    pub fn generate(&self, options: &GenerateOptions) -> NingenResult<PathBuf> {
        self.generator.write(&self.registry, &self.root, options)
    }

    /// Forget every definition.
    pub fn reset(&mut self) {
        self.registry.reset();
    }
}

fn absolute(path: PathBuf) -> NingenResult<PathBuf> {
    if path.is_absolute() {
        return Ok(path);
    }
    let cwd = std::env::current_dir().map_err(|e| NingenError::Configuration {
        message: format!("cannot determine the current directory: {e}"),
    })?;
    Ok(FileRef::resolve(cwd, path).absolute_path().to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ningen_adapters::MemoryFilesystem;

    fn handle() -> (Ningen, MemoryFilesystem) {
        let fs = MemoryFilesystem::new();
        let n = Ningen::with_adapters(
            "/root/dir",
            Settings::default(),
            Box::new(fs.clone()),
            Box::new(fs.clone()),
        );
        (n, fs)
    }

    #[test]
    fn paths_resolve_against_root() {
        let (n, _) = handle();
        assert_eq!(n.file("a.txt").absolute_path(), Path::new("/root/dir/a.txt"));
        assert_eq!(
            n.files(["a", "b"]).unwrap(),
            vec![n.file("a"), n.file("b")]
        );
    }

    #[test]
    fn options_follow_settings() {
        let fs = MemoryFilesystem::new();
        let settings = Settings {
            output: "out/build.ninja".into(),
            enable_generator_rule: false,
            ..Settings::default()
        };
        let n = Ningen::with_adapters("/root/dir", settings, Box::new(fs.clone()), Box::new(fs));

        let options = n.options();
        assert_eq!(
            options.output_file().absolute_path(),
            Path::new("/root/dir/out/build.ninja")
        );
        assert_eq!(n.generate_to_string(&options).unwrap(), "");
    }

    #[test]
    fn generate_writes_through_filesystem() {
        let (mut n, fs) = handle();
        let cat = n.rule(RuleSpec::new("cat", "cat $in > $out")).unwrap();
        let input = n.file("in.txt");
        let output = n.file("out.txt");
        n.build(TargetSpec::new(&cat).inputs([input]).outputs([output]))
            .unwrap();

        let path = n.generate(&n.options()).unwrap();
        let written = fs.read_file(&path).unwrap();

        assert_eq!(path, PathBuf::from("/root/dir/build.ninja"));
        assert_eq!(written, n.generate_to_string(&n.options()).unwrap());
        assert!(written.contains("build out.txt: cat in.txt\n"));
        assert!(written.contains("build build.ninja: ningen BUILD | BUILD\n"));
    }

    #[test]
    fn glob_uses_root() {
        let (n, fs) = handle();
        fs.add_file("/root/dir/src/b.c", "").unwrap();
        fs.add_file("/root/dir/src/a.c", "").unwrap();

        let found = n.glob(&GlobRequest::new(["src/*.c"])).unwrap();
        assert_eq!(found, vec![n.file("src/a.c"), n.file("src/b.c")]);
    }

    #[test]
    fn reset_forgets_definitions() {
        let (mut n, _) = handle();
        n.pool("link", 1).unwrap();
        n.reset();
        assert!(n.registry().is_empty());
        n.pool("link", 1).unwrap();
    }

    #[test]
    fn unique_outputs_setting_reaches_registry() {
        let fs = MemoryFilesystem::new();
        let settings = Settings {
            unique_outputs: false,
            ..Settings::default()
        };
        let mut n = Ningen::with_adapters("/r", settings, Box::new(fs.clone()), Box::new(fs));
        let touch = n.rule(RuleSpec::new("touch", "touch $out")).unwrap();
        let spec = TargetSpec::new(&touch)
            .inputs([n.file("a")])
            .outputs([n.file("b")]);

        n.build(spec.clone()).unwrap();
        n.build(spec).unwrap();
        assert_eq!(n.registry().targets().len(), 2);
    }
}
