//! Manifest generation.
//!
//! [`Generator`] turns a registry snapshot into Ninja manifest text. It is a
//! pure function of its input: pools and rules are emitted sorted by name,
//! targets and `default` statements in registration order.
//!
//! ```text
//! pool <name>
//!   depth = <n>
//!
//! rule <name>
//!   command = <command>
//!   <var> = <value>
//!   description = <text>
//!   generator = 1
//!   pool = <name>
//!
//! build <outputs>: <rule> <inputs> | <implicit>
//!   pool = <name>
//!   <var> = <value>
//!
//! default <outputs>
//! ```

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::domain::{
    command::{CommandTemplate, Placeholder},
    error::DomainError,
    file::{FileRef, add_leading_dot_slash, relative_path},
    pool::Pool,
    registry::Registry,
    rule::Rule,
    target::Target,
    vars::{Vars, merge_vars},
};

const INDENT: &str = "  ";

/// Renders manifests with every path relative to one directory.
#[derive(Debug, Clone)]
pub struct Generator {
    directory: PathBuf,
    lines: Vec<String>,
}

impl Generator {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            lines: Vec::new(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Render the whole registry.
    ///
    /// Either the complete manifest is returned or an error is; nothing is
    /// emitted for a registry that fails validation.
    pub fn render(mut self, registry: &Registry) -> Result<String, DomainError> {
        let mut pools: Vec<&Pool> = registry.pools().collect();
        pools.sort_by(|a, b| a.name().cmp(b.name()));
        for pool in pools {
            self.write_pool(pool);
            self.newline();
        }

        let mut rules: Vec<&Rule> = registry.rules().collect();
        rules.sort_by(|a, b| a.name().cmp(b.name()));
        for rule in rules {
            self.write_rule(rule)?;
            self.newline();
        }

        for target in registry.targets() {
            let rule = registry
                .rule(target.rule())
                .ok_or_else(|| DomainError::MissingRule {
                    name: target.rule().to_string(),
                })?;
            self.write_target(target, rule);
            self.newline();
        }

        let targets = registry.targets();
        if !targets.iter().all(Target::is_default) {
            let defaults: Vec<&Target> = targets.iter().filter(|t| t.is_default()).collect();
            for target in &defaults {
                self.write_default(target);
            }
            if !defaults.is_empty() {
                self.newline();
            }
        }

        Ok(self.finish())
    }

    fn write_pool(&mut self, pool: &Pool) {
        self.add_line(format!("pool {}", pool.name()), 0);
        self.add_line(format!("depth = {}", pool.depth()), 1);
    }

    fn write_rule(&mut self, rule: &Rule) -> Result<(), DomainError> {
        let command = self.substitute_command(rule)?;

        self.add_line(format!("rule {}", rule.name()), 0);
        self.add_line(format!("command = {command}"), 1);
        self.write_vars(rule.vars());
        if let Some(description) = rule.description() {
            self.add_line(format!("description = {description}"), 1);
        }
        if rule.is_generator() {
            self.add_line("generator = 1".into(), 1);
        }
        if let Some(pool) = rule.pool() {
            self.add_line(format!("pool = {pool}"), 1);
        }
        Ok(())
    }

    /// Resolve `$binary` and `$dir`; a binary the command never mentions is
    /// a configuration error.
    fn substitute_command(&self, rule: &Rule) -> Result<String, DomainError> {
        let template = CommandTemplate::parse(rule.command());

        if rule.binary().is_some() && !template.references(&Placeholder::Binary) {
            return Err(DomainError::UnusedBinary {
                rule: rule.name().to_string(),
                command: rule.command().to_string(),
            });
        }

        let binary = rule.binary().map(|b| add_leading_dot_slash(self.relative(b)));
        let dir = match relative_path(rule.directory(), &self.directory) {
            same if same.is_empty() => ".".to_string(),
            other => add_leading_dot_slash(other),
        };

        Ok(template.render(|placeholder| match placeholder {
            Placeholder::Binary => binary.clone(),
            Placeholder::Dir => Some(dir.clone()),
            Placeholder::Var(_) => None,
        }))
    }

    fn write_target(&mut self, target: &Target, rule: &Rule) {
        let outputs = self.join(target.outputs());
        let inputs = self.join(target.inputs());

        let implicit: BTreeSet<String> = target.implicit().iter().map(|f| self.relative(f)).collect();

        let mut line = format!("build {outputs}: {} {inputs}", rule.name());
        if !implicit.is_empty() {
            line.push_str(" | ");
            line.push_str(&implicit.into_iter().collect::<Vec<_>>().join(" "));
        }
        self.add_line(line, 0);

        if let Some(pool) = target.pool() {
            self.add_line(format!("pool = {}", pool.name()), 1);
        }

        self.write_vars(&merge_vars(rule.vars(), target.vars()));
    }

    fn write_default(&mut self, target: &Target) {
        let outputs = self.join(target.outputs());
        self.add_line(format!("default {outputs}"), 0);
    }

    fn write_vars(&mut self, vars: &Vars) {
        for (key, value) in vars {
            let value = value.render(&self.directory);
            self.add_line(format!("{key} = {value}"), 1);
        }
    }

    fn relative(&self, file: &FileRef) -> String {
        file.relative_to(&self.directory)
    }

    fn join(&self, files: &[FileRef]) -> String {
        files
            .iter()
            .map(|f| self.relative(f))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn newline(&mut self) {
        self.lines.push(String::new());
    }

    fn add_line(&mut self, line: String, indent: usize) {
        self.lines.push(format!("{}{line}", INDENT.repeat(indent)));
    }

    fn finish(self) -> String {
        let mut out = String::new();
        for line in self.lines {
            out.push_str(&line);
            out.push('\n');
        }
        out
    }
}
