//! Generate Service - renders and writes the manifest.
//!
//! This service coordinates the generation workflow:
//! 1. Snapshot the registry
//! 2. Inject the generator rule and target (if enabled)
//! 3. Render the complete manifest in memory
//! 4. Write it through the filesystem port
//!
//! Nothing is written unless rendering succeeds, so a failed generation
//! leaves any previous manifest untouched.

use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

use crate::{
    application::ports::Filesystem,
    domain::{
        DomainError, FileRef, Generator, Registry, RuleId, RuleSpec, TargetSpec,
    },
    error::NingenResult,
};

/// Name of the rule synthesized to regenerate the manifest.
pub const GENERATOR_RULE_NAME: &str = "ningen";

/// Options for one generation pass.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    output: FileRef,
    script: FileRef,
    inputs: Vec<FileRef>,
    enable_generator_rule: bool,
    generator_rule: Option<RuleId>,
}

impl GenerateOptions {
    /// Write to `output`; `script` is the build description executable the
    /// synthesized generator rule runs.
    pub fn new(output: FileRef, script: FileRef) -> Self {
        Self {
            output,
            script,
            inputs: Vec::new(),
            enable_generator_rule: true,
            generator_rule: None,
        }
    }

    /// Files whose change should re-run the generator.
    pub fn inputs(mut self, inputs: impl IntoIterator<Item = FileRef>) -> Self {
        self.inputs.extend(inputs);
        self
    }

    pub fn output(mut self, output: FileRef) -> Self {
        self.output = output;
        self
    }

    pub fn enable_generator_rule(mut self, enable: bool) -> Self {
        self.enable_generator_rule = enable;
        self
    }

    /// Use a registered rule instead of synthesizing one. It must be marked
    /// as a generator rule.
    pub fn generator_rule(mut self, rule: &RuleId) -> Self {
        self.generator_rule = Some(rule.clone());
        self
    }

    pub fn output_file(&self) -> &FileRef {
        &self.output
    }
}

/// Manifest generation service.
pub struct GenerateService {
    filesystem: Box<dyn Filesystem>,
}

impl GenerateService {
    pub fn new(filesystem: Box<dyn Filesystem>) -> Self {
        Self { filesystem }
    }

    /// Render the manifest for `registry` with paths relative to
    /// `directory`. The registry itself is never modified.
    #[instrument(
        skip_all,
        fields(directory = %directory.display(), output = %options.output)
    )]
    pub fn render(
        &self,
        registry: &Registry,
        directory: &Path,
        options: &GenerateOptions,
    ) -> NingenResult<String> {
        let mut snapshot = registry.clone();

        if options.enable_generator_rule {
            inject_generator_target(&mut snapshot, directory, options)?;
        } else {
            debug!("Generator rule disabled");
        }

        debug!(
            pools = snapshot.pools().count(),
            rules = snapshot.rules().count(),
            targets = snapshot.targets().len(),
            "Rendering manifest"
        );

        Ok(Generator::new(directory).render(&snapshot)?)
    }

    /// Render the manifest and write it to the output file. Returns the
    /// path written.
    #[instrument(skip_all, fields(output = %options.output))]
    pub fn write(
        &self,
        registry: &Registry,
        directory: &Path,
        options: &GenerateOptions,
    ) -> NingenResult<PathBuf> {
        let manifest = self.render(registry, directory, options)?;
        let path = options.output.absolute_path();

        if let Some(parent) = path.parent() {
            if !self.filesystem.exists(parent) {
                self.filesystem.create_dir_all(parent)?;
            }
        }
        self.filesystem.write_file(path, &manifest)?;

        info!(bytes = manifest.len(), "Manifest written");
        Ok(path.to_path_buf())
    }
}

/// Add the rule and target that regenerate the manifest to `snapshot`.
fn inject_generator_target(
    snapshot: &mut Registry,
    directory: &Path,
    options: &GenerateOptions,
) -> NingenResult<()> {
    let rule_id = match &options.generator_rule {
        Some(id) => id.clone(),
        None => snapshot.define_rule(
            RuleSpec::new(GENERATOR_RULE_NAME, "$binary")
                .binary(options.script.clone())
                .description("Regenerating Ninja file")
                .generator(true),
            directory,
        )?,
    };

    let rule = snapshot
        .rule(&rule_id)
        .ok_or_else(|| DomainError::MissingRule {
            name: rule_id.to_string(),
        })?;
    if !rule.is_generator() {
        return Err(DomainError::NotAGeneratorRule {
            rule: rule.name().to_string(),
        }
        .into());
    }

    let inputs = if options.inputs.is_empty() {
        vec![options.script.clone()]
    } else {
        options.inputs.clone()
    };

    snapshot.define_target(
        TargetSpec::new(&rule_id)
            .inputs(inputs)
            .outputs([options.output.clone()]),
    )?;
    Ok(())
}
