//! The build graph accumulator.
//!
//! A [`Registry`] collects every pool, rule, and target a build description
//! defines. It is owned by the caller and passed to each unit of the build
//! description in turn; [`Registry::reset`] empties it.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use crate::domain::{
    error::{DefinitionKind, DomainError},
    pool::{CONSOLE_POOL, Pool},
    rule::{Rule, RuleId, RuleSpec},
    target::{Target, TargetSpec},
};

#[derive(Debug, Clone)]
pub struct Registry {
    rules: HashMap<String, Rule>,
    targets: Vec<Target>,
    pools: HashMap<String, Pool>,
    outputs: HashSet<PathBuf>,
    unique_outputs: bool,
}

impl Registry {
    /// An empty registry that rejects duplicate outputs.
    pub fn new() -> Self {
        Self {
            rules: HashMap::new(),
            targets: Vec::new(),
            pools: HashMap::new(),
            outputs: HashSet::new(),
            unique_outputs: true,
        }
    }

    /// Toggle the check that no two targets claim the same output file.
    pub fn with_unique_outputs(mut self, unique_outputs: bool) -> Self {
        self.unique_outputs = unique_outputs;
        self
    }

    /// Register a rule defined in `directory`.
    pub fn define_rule(
        &mut self,
        spec: RuleSpec,
        directory: &Path,
    ) -> Result<RuleId, DomainError> {
        if self.rules.contains_key(spec.name()) {
            return Err(DomainError::DuplicateDefinition {
                kind: DefinitionKind::Rule,
                name: spec.name().to_string(),
            });
        }
        let rule = Rule::from_spec(spec, directory);
        let id = RuleId::new(rule.name());
        self.rules.insert(rule.name().to_string(), rule);
        Ok(id)
    }

    /// Register a target. Its rule must already be registered here.
    pub fn define_target(&mut self, spec: TargetSpec) -> Result<&Target, DomainError> {
        let rule = self
            .rules
            .get(spec.rule().as_str())
            .ok_or_else(|| DomainError::MissingRule {
                name: spec.rule().to_string(),
            })?;

        if spec.input_files().is_empty() {
            return Err(DomainError::EmptyList { list: "inputs" });
        }
        if spec.output_files().is_empty() {
            return Err(DomainError::EmptyList { list: "outputs" });
        }

        if self.unique_outputs {
            let mut claimed = HashSet::new();
            for output in spec.output_files() {
                let path = output.absolute_path();
                if self.outputs.contains(path) || !claimed.insert(path) {
                    return Err(DomainError::DuplicateDefinition {
                        kind: DefinitionKind::Output,
                        name: output.to_string(),
                    });
                }
            }
        }

        let target = Target::from_spec(spec, rule);
        self.outputs
            .extend(target.outputs().iter().map(|f| f.absolute_path().to_path_buf()));
        self.targets.push(target);
        Ok(&self.targets[self.targets.len() - 1])
    }

    /// Register a pool. `console` is reserved and the depth must be positive.
    pub fn define_pool(&mut self, name: &str, depth: u32) -> Result<Pool, DomainError> {
        if name == CONSOLE_POOL {
            return Err(DomainError::ReservedName {
                name: name.to_string(),
            });
        }
        if depth == 0 {
            return Err(DomainError::InvalidDepth {
                name: name.to_string(),
            });
        }
        if self.pools.contains_key(name) {
            return Err(DomainError::DuplicateDefinition {
                kind: DefinitionKind::Pool,
                name: name.to_string(),
            });
        }
        let pool = Pool::new(name, depth);
        self.pools.insert(name.to_string(), pool.clone());
        Ok(pool)
    }

    pub fn rule(&self, id: &RuleId) -> Option<&Rule> {
        self.rules.get(id.as_str())
    }

    pub fn rules(&self) -> impl Iterator<Item = &Rule> {
        self.rules.values()
    }

    /// Targets in registration order.
    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    pub fn pools(&self) -> impl Iterator<Item = &Pool> {
        self.pools.values()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty() && self.targets.is_empty() && self.pools.is_empty()
    }

    /// Forget every definition. The output-uniqueness setting is kept.
    pub fn reset(&mut self) {
        self.rules.clear();
        self.targets.clear();
        self.pools.clear();
        self.outputs.clear();
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}
