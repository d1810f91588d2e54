//! Alias Index
//!
//! Directed `alias -> abstract` edges plus the reverse `abstract -> aliases`
//! index that contextual lookups walk.

use std::collections::{HashMap, HashSet};

use wirekit_domain::{Error, Result};

#[derive(Debug, Default, Clone)]
pub struct AliasIndex {
    aliases: HashMap<String, String>,
    abstract_aliases: HashMap<String, Vec<String>>,
}

impl AliasIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `alias -> abstract_name`
    pub fn alias(&mut self, abstract_name: &str, alias: &str) {
        self.aliases
            .insert(alias.to_string(), abstract_name.to_string());
        self.abstract_aliases
            .entry(abstract_name.to_string())
            .or_default()
            .push(alias.to_string());
    }

    pub fn is_alias(&self, name: &str) -> bool {
        self.aliases.contains_key(name)
    }

    /// Follow the alias chain starting at `name` to its end
    ///
    /// Fails with [`Error::AliasCycle`] when the chain revisits a name,
    /// whatever the cycle length.
    pub fn get_alias(&self, name: &str) -> Result<String> {
        let mut current = name;
        let mut visited: HashSet<&str> = HashSet::new();
        let mut chain: Vec<String> = Vec::new();

        while let Some(target) = self.aliases.get(current) {
            visited.insert(current);
            chain.push(current.to_string());
            if visited.contains(target.as_str()) {
                return Err(Error::alias_cycle(name, chain));
            }
            current = target.as_str();
        }

        Ok(current.to_string())
    }

    /// Aliases registered for `abstract_name`, in registration order
    pub fn aliases_of(&self, abstract_name: &str) -> &[String] {
        self.abstract_aliases
            .get(abstract_name)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Drop the edge starting at `name`, if any
    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.aliases.remove(name)
    }

    /// Drop `searched` from every reverse-index entry, if it is an alias
    pub fn remove_abstract_alias(&mut self, searched: &str) {
        if !self.is_alias(searched) {
            return;
        }
        for aliases in self.abstract_aliases.values_mut() {
            aliases.retain(|alias| alias != searched);
        }
    }

    pub fn clear(&mut self) {
        self.aliases.clear();
        self.abstract_aliases.clear();
    }
}
