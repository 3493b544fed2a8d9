//! Build targets: one invocation of a rule against concrete files.

use crate::domain::{
    file::FileRef,
    pool::PoolOverride,
    rule::{Rule, RuleId},
    vars::{VarValue, Vars},
};

/// A registered build target. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub(crate) rule: RuleId,
    pub(crate) inputs: Vec<FileRef>,
    pub(crate) outputs: Vec<FileRef>,
    pub(crate) implicit: Vec<FileRef>,
    pub(crate) vars: Vars,
    pub(crate) pool: Option<PoolOverride>,
    pub(crate) is_default: bool,
}

impl Target {
    /// Build a target for `rule`. The rule's implicit sources are copied now
    /// and never re-read.
    pub(crate) fn from_spec(spec: TargetSpec, rule: &Rule) -> Self {
        let mut implicit = rule.srcs().to_vec();
        implicit.extend(spec.implicit);
        Self {
            rule: spec.rule,
            inputs: spec.inputs,
            outputs: spec.outputs,
            implicit,
            vars: spec.vars,
            pool: spec.pool,
            is_default: spec.is_default,
        }
    }

    pub fn rule(&self) -> &RuleId {
        &self.rule
    }

    pub fn inputs(&self) -> &[FileRef] {
        &self.inputs
    }

    pub fn outputs(&self) -> &[FileRef] {
        &self.outputs
    }

    /// Implicit dependencies: the rule's sources followed by any declared on
    /// the target itself.
    pub fn implicit(&self) -> &[FileRef] {
        &self.implicit
    }

    pub fn vars(&self) -> &Vars {
        &self.vars
    }

    pub fn pool(&self) -> Option<&PoolOverride> {
        self.pool.as_ref()
    }

    pub const fn is_default(&self) -> bool {
        self.is_default
    }
}

/// Definition of a target, handed to the registry.
#[derive(Debug, Clone)]
pub struct TargetSpec {
    rule: RuleId,
    inputs: Vec<FileRef>,
    outputs: Vec<FileRef>,
    implicit: Vec<FileRef>,
    vars: Vars,
    pool: Option<PoolOverride>,
    is_default: bool,
}

impl TargetSpec {
    pub fn new(rule: &RuleId) -> Self {
        Self {
            rule: rule.clone(),
            inputs: Vec::new(),
            outputs: Vec::new(),
            implicit: Vec::new(),
            vars: Vars::new(),
            pool: None,
            is_default: true,
        }
    }

    pub fn rule(&self) -> &RuleId {
        &self.rule
    }

    pub fn inputs(mut self, inputs: impl IntoIterator<Item = FileRef>) -> Self {
        self.inputs.extend(inputs);
        self
    }

    pub fn outputs(mut self, outputs: impl IntoIterator<Item = FileRef>) -> Self {
        self.outputs.extend(outputs);
        self
    }

    /// Extra implicit dependencies beyond those the rule contributes.
    pub fn implicit(mut self, implicit: impl IntoIterator<Item = FileRef>) -> Self {
        self.implicit.extend(implicit);
        self
    }

    pub fn var(mut self, key: impl Into<String>, value: impl Into<VarValue>) -> Self {
        self.vars.insert(key.into(), value.into());
        self
    }

    pub fn vars(mut self, vars: Vars) -> Self {
        self.vars.extend(vars);
        self
    }

    /// Run in `pool`, or [`PoolOverride::Clear`] to drop the rule's pool.
    pub fn pool(mut self, pool: impl Into<PoolOverride>) -> Self {
        self.pool = Some(pool.into());
        self
    }

    /// Whether plain `ninja` builds this target. Defaults to true.
    pub fn is_default(mut self, is_default: bool) -> Self {
        self.is_default = is_default;
        self
    }

    pub(crate) fn input_files(&self) -> &[FileRef] {
        &self.inputs
    }

    pub(crate) fn output_files(&self) -> &[FileRef] {
        &self.outputs
    }
}
