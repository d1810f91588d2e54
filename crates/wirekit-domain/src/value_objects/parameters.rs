//! Caller-supplied override parameters

use std::any::Any;
use std::collections::HashMap;

use super::Instance;

/// Named values that short-circuit dependency resolution for one call
///
/// Keys are constructor parameter names. A non-empty set of parameters forces
/// a fresh build: the shared instance cache is neither read nor written.
#[derive(Debug, Clone, Default)]
pub struct Parameters {
    values: HashMap<String, Instance>,
}

impl Parameters {
    /// Create an empty set of parameters
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a parameter
    pub fn with<T: Any + Send + Sync>(mut self, name: impl Into<String>, value: T) -> Self {
        self.values.insert(name.into(), Instance::new(value));
        self
    }

    /// Add an already wrapped parameter
    pub fn with_instance(mut self, name: impl Into<String>, value: Instance) -> Self {
        self.values.insert(name.into(), value);
        self
    }

    /// Insert a parameter in place
    pub fn insert(&mut self, name: impl Into<String>, value: Instance) {
        self.values.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<&Instance> {
        self.values.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Parameter names, in no particular order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<(S, Instance)> for Parameters {
    fn from_iter<I: IntoIterator<Item = (S, Instance)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value))
                .collect(),
        }
    }
}
