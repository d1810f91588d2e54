//! Binding Registry
//!
//! Plain state behind the container's lock: bindings, the shared instance
//! cache, resolved flags, aliases, contextual overrides, extenders, tags and
//! callbacks. Nothing in here invokes user code; the container reads what it
//! needs, releases the lock, and only then calls producers or callbacks.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::Serialize;
use wirekit_domain::{Instance, Result};

use crate::alias::AliasIndex;
use crate::concrete::{Concrete, Extender, Producer, ReboundCallback, ResolvingCallback};
use crate::tags::TagIndex;

/// A registered producer and whether its result is cached
#[derive(Clone)]
pub struct Binding {
    pub producer: Producer,
    pub shared: bool,
}

/// Snapshot of a binding, as returned by `Container::get_bindings`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BindingInfo {
    pub shared: bool,
}

#[derive(Default)]
pub struct BindingRegistry {
    pub(crate) bindings: HashMap<String, Binding>,
    pub(crate) instances: HashMap<String, Instance>,
    pub(crate) resolved: HashSet<String>,
    pub(crate) aliases: AliasIndex,
    pub(crate) tags: TagIndex,
    /// `building concrete -> needed abstract -> implementation`
    pub(crate) contextual: HashMap<String, HashMap<String, Concrete>>,
    pub(crate) extenders: HashMap<String, Vec<Extender>>,
    pub(crate) rebound_callbacks: HashMap<String, Vec<ReboundCallback>>,
    pub(crate) global_resolving: Vec<ResolvingCallback>,
    pub(crate) resolving: HashMap<String, Vec<ResolvingCallback>>,
    pub(crate) global_after_resolving: Vec<ResolvingCallback>,
    pub(crate) after_resolving: HashMap<String, Vec<ResolvingCallback>>,
    /// Bumped whenever the binding or instance behind an abstract is replaced
    generations: HashMap<String, u64>,
    next_generation: u64,
}

impl BindingRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bound as a binding, a cached instance or an alias
    pub fn bound(&self, abstract_name: &str) -> bool {
        self.bindings.contains_key(abstract_name)
            || self.instances.contains_key(abstract_name)
            || self.aliases.is_alias(abstract_name)
    }

    /// Resolved at least once, or holding an instance
    pub fn is_resolved(&self, abstract_name: &str) -> Result<bool> {
        let abstract_name = if self.aliases.is_alias(abstract_name) {
            self.aliases.get_alias(abstract_name)?
        } else {
            abstract_name.to_string()
        };
        Ok(self.resolved.contains(&abstract_name) || self.instances.contains_key(&abstract_name))
    }

    /// Current binding generation of an abstract, 0 if it never changed
    pub fn generation(&self, abstract_name: &str) -> u64 {
        self.generations.get(abstract_name).copied().unwrap_or(0)
    }

    /// Mark the binding behind an abstract as replaced
    pub fn bump_generation(&mut self, abstract_name: &str) {
        self.next_generation += 1;
        self.generations
            .insert(abstract_name.to_string(), self.next_generation);
    }

    pub fn is_shared(&self, abstract_name: &str) -> bool {
        self.instances.contains_key(abstract_name)
            || self
                .bindings
                .get(abstract_name)
                .is_some_and(|binding| binding.shared)
    }

    /// Forget the cached instance and alias edge of an abstract about to be bound
    pub fn drop_stale_instances(&mut self, abstract_name: &str) {
        self.instances.remove(abstract_name);
        self.aliases.remove(abstract_name);
    }

    /// Contextual implementation of `needed` while `building` is on top of the build stack
    ///
    /// Checks `needed` itself, then each alias registered for it.
    pub fn contextual_concrete(&self, building: Option<&str>, needed: &str) -> Option<Concrete> {
        let overrides = self.contextual.get(building?)?;
        if let Some(found) = overrides.get(needed) {
            return Some(found.clone());
        }
        self.aliases
            .aliases_of(needed)
            .iter()
            .find_map(|alias| overrides.get(alias).cloned())
    }

    pub fn add_contextual_binding(
        &mut self,
        building: String,
        needed: String,
        implementation: Concrete,
    ) {
        self.contextual
            .entry(building)
            .or_default()
            .insert(needed, implementation);
    }

    pub fn extenders_for(&self, abstract_name: &str) -> Vec<Extender> {
        self.extenders
            .get(abstract_name)
            .cloned()
            .unwrap_or_default()
    }

    pub fn rebound_callbacks_for(&self, abstract_name: &str) -> Vec<ReboundCallback> {
        self.rebound_callbacks
            .get(abstract_name)
            .cloned()
            .unwrap_or_default()
    }

    /// Resolving callbacks for an abstract, global ones first
    pub fn resolving_callbacks_for(&self, abstract_name: &str) -> Vec<ResolvingCallback> {
        collect_callbacks(&self.global_resolving, &self.resolving, abstract_name)
    }

    /// After-resolving callbacks for an abstract, global ones first
    pub fn after_resolving_callbacks_for(&self, abstract_name: &str) -> Vec<ResolvingCallback> {
        collect_callbacks(
            &self.global_after_resolving,
            &self.after_resolving,
            abstract_name,
        )
    }

    pub fn binding_snapshot(&self) -> BTreeMap<String, BindingInfo> {
        self.bindings
            .iter()
            .map(|(name, binding)| {
                (
                    name.clone(),
                    BindingInfo {
                        shared: binding.shared,
                    },
                )
            })
            .collect()
    }

    /// Remove a binding together with its instance and resolved flag
    pub fn unbind(&mut self, abstract_name: &str) {
        self.bump_generation(abstract_name);
        self.bindings.remove(abstract_name);
        self.instances.remove(abstract_name);
        self.resolved.remove(abstract_name);
    }

    /// Clear aliases, resolved flags, bindings and instances
    ///
    /// Contextual bindings, extenders, tags and callbacks are kept.
    pub fn flush(&mut self) {
        let replaced: Vec<String> = self
            .bindings
            .keys()
            .chain(self.instances.keys())
            .cloned()
            .collect();
        for abstract_name in &replaced {
            self.bump_generation(abstract_name);
        }
        self.aliases.clear();
        self.resolved.clear();
        self.bindings.clear();
        self.instances.clear();
    }
}

fn collect_callbacks(
    global: &[ResolvingCallback],
    scoped: &HashMap<String, Vec<ResolvingCallback>>,
    abstract_name: &str,
) -> Vec<ResolvingCallback> {
    global
        .iter()
        .chain(scoped.get(abstract_name).into_iter().flatten())
        .cloned()
        .collect()
}
