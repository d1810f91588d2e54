//! Resolved constructor arguments

use std::any::Any;
use std::sync::Arc;

use super::Instance;
use crate::error::{Error, Result};

/// The argument list a constructor receives, in declaration order
///
/// Each argument keeps the name of the parameter it satisfies so constructors
/// can look values up by name instead of position.
#[derive(Debug, Clone, Default)]
pub struct Arguments {
    entries: Vec<(String, Instance)>,
}

impl Arguments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the value resolved for `name`
    pub fn push(&mut self, name: impl Into<String>, value: Instance) {
        self.entries.push((name.into(), value));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Raw argument at `index`
    pub fn at(&self, index: usize) -> Result<&Instance> {
        self.entries
            .get(index)
            .map(|(_, value)| value)
            .ok_or_else(|| Error::missing_argument(format!("#{index}")))
    }

    /// Raw argument named `name`
    pub fn named(&self, name: &str) -> Result<&Instance> {
        self.entries
            .iter()
            .find(|(entry, _)| entry == name)
            .map(|(_, value)| value)
            .ok_or_else(|| Error::missing_argument(name))
    }

    /// Shared handle to the argument named `name`
    pub fn arc<T: Any + Send + Sync>(&self, name: &str) -> Result<Arc<T>> {
        self.named(name)?.try_downcast::<T>()
    }

    /// Clone of the argument named `name`
    pub fn value<T: Any + Clone>(&self, name: &str) -> Result<T> {
        self.named(name)?.try_get::<T>()
    }

    /// Parameter names in declaration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn into_instances(self) -> Vec<Instance> {
        self.entries.into_iter().map(|(_, value)| value).collect()
    }
}
