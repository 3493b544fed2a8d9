//! Concurrency pools.

use std::fmt;

/// Name of the pool the executor defines implicitly: one job at a time,
/// attached to the terminal.
pub const CONSOLE_POOL: &str = "console";

/// A named group capping how many jobs run at once.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Pool {
    name: String,
    depth: u32,
}

impl Pool {
    pub(crate) fn new(name: impl Into<String>, depth: u32) -> Self {
        Self {
            name: name.into(),
            depth,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub const fn depth(&self) -> u32 {
        self.depth
    }
}

/// Pool assignment for a rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PoolRef {
    Named(Pool),
    Console,
}

impl PoolRef {
    pub fn name(&self) -> &str {
        match self {
            Self::Named(pool) => pool.name(),
            Self::Console => CONSOLE_POOL,
        }
    }
}

impl From<Pool> for PoolRef {
    fn from(pool: Pool) -> Self {
        Self::Named(pool)
    }
}

impl From<&Pool> for PoolRef {
    fn from(pool: &Pool) -> Self {
        Self::Named(pool.clone())
    }
}

impl fmt::Display for PoolRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Pool assignment for a target, which may also clear the rule's pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PoolOverride {
    Use(PoolRef),
    /// Emitted as `pool =` with an empty value.
    Clear,
}

impl PoolOverride {
    pub fn name(&self) -> &str {
        match self {
            Self::Use(pool) => pool.name(),
            Self::Clear => "",
        }
    }
}

impl From<PoolRef> for PoolOverride {
    fn from(pool: PoolRef) -> Self {
        Self::Use(pool)
    }
}

impl From<&Pool> for PoolOverride {
    fn from(pool: &Pool) -> Self {
        Self::Use(pool.into())
    }
}
