//! Tag Index
//!
//! Purely additive `tag -> abstracts` grouping. Duplicates are kept.

use std::collections::HashMap;

#[derive(Debug, Default, Clone)]
pub struct TagIndex {
    tags: HashMap<String, Vec<String>>,
}

impl TagIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append every abstract to every tag
    pub fn tag<A, T>(&mut self, abstracts: A, tags: T)
    where
        A: IntoIterator,
        A::Item: Into<String>,
        T: IntoIterator,
        T::Item: Into<String>,
    {
        let abstracts: Vec<String> = abstracts.into_iter().map(Into::into).collect();
        for tag in tags {
            self.tags
                .entry(tag.into())
                .or_default()
                .extend(abstracts.iter().cloned());
        }
    }

    /// Members of `tag` in insertion order
    pub fn members(&self, tag: &str) -> Vec<String> {
        self.tags.get(tag).cloned().unwrap_or_default()
    }

    pub fn contains_tag(&self, tag: &str) -> bool {
        self.tags.contains_key(tag)
    }
}
