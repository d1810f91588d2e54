//! Container
//!
//! Public surface of wirekit: registration, resolution, contextual binding,
//! extension, tagging, teardown and the process-wide shared container.
//!
//! ## Usage
//!
//! ```ignore
//! let container = Container::with_provider(Arc::new(types));
//! container.bind("Pay", "Alipay")?;
//! container.bind_self("PayBill")?;
//!
//! let bill = container.make("PayBill")?;
//! ```
//!
//! ## Locking
//!
//! All registry state sits behind one `RwLock`. The lock is never held while
//! user code runs (producers, extenders, rebound or resolving callbacks), so
//! that code may call back into the container freely.

use std::any::Any;
use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use arc_swap::ArcSwapOption;
use tracing::{debug, info, warn};
use wirekit_domain::{Instance, Parameters, Result, TypeDescriptorProvider};

use crate::concrete::{Concrete, Extender, ReboundCallback, ResolvingCallback};
use crate::config::{ContainerConfig, ResolutionSettings};
use crate::contextual::ContextualBindingBuilder;
use crate::descriptors::TypeRegistry;
use crate::registry::{Binding, BindingInfo, BindingRegistry};
use crate::resolver::Resolver;

static GLOBAL: ArcSwapOption<Container> = ArcSwapOption::const_empty();

/// Inversion-of-control container
pub struct Container {
    registry: RwLock<BindingRegistry>,
    provider: Arc<dyn TypeDescriptorProvider>,
    settings: ResolutionSettings,
}

impl Container {
    /// Create a container backed by every compile-time registered type
    pub fn new() -> Self {
        Self::with_provider(Arc::new(TypeRegistry::discover()))
    }

    /// Create a container backed by a specific type descriptor provider
    pub fn with_provider(provider: Arc<dyn TypeDescriptorProvider>) -> Self {
        Self::with_settings(provider, ResolutionSettings::default())
    }

    /// Create a container with explicit resolution settings
    pub fn with_settings(
        provider: Arc<dyn TypeDescriptorProvider>,
        settings: ResolutionSettings,
    ) -> Self {
        Self {
            registry: RwLock::new(BindingRegistry::new()),
            provider,
            settings,
        }
    }

    /// Create a container from loaded configuration
    pub fn with_config(config: &ContainerConfig, provider: Arc<dyn TypeDescriptorProvider>) -> Self {
        info!(
            max_build_depth = config.resolution.max_build_depth,
            detect_circular = config.resolution.detect_circular,
            "Creating container from configuration"
        );
        Self::with_settings(provider, config.resolution.clone())
    }

    pub(crate) fn read(&self) -> RwLockReadGuard<'_, BindingRegistry> {
        self.registry.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn write(&self) -> RwLockWriteGuard<'_, BindingRegistry> {
        self.registry.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn provider(&self) -> &Arc<dyn TypeDescriptorProvider> {
        &self.provider
    }

    pub fn settings(&self) -> &ResolutionSettings {
        &self.settings
    }

    // ========================================================================
    // Process-wide container
    // ========================================================================

    /// The process-wide container, created on first use
    pub fn global() -> Arc<Container> {
        loop {
            if let Some(container) = GLOBAL.load_full() {
                return container;
            }
            GLOBAL.rcu(|current| match current {
                Some(container) => Some(Arc::clone(container)),
                None => Some(Arc::new(Container::new())),
            });
        }
    }

    /// Replace (or clear) the process-wide container, returning the previous one
    pub fn set_global(container: Option<Arc<Container>>) -> Option<Arc<Container>> {
        GLOBAL.swap(container)
    }

    // ========================================================================
    // Registration
    // ========================================================================

    /// Bind an abstract to an implementation (not shared)
    pub fn bind(&self, abstract_name: &str, concrete: impl Into<Concrete>) -> Result<()> {
        self.bind_with(abstract_name, Some(concrete.into()), false)
    }

    /// Bind an abstract to itself (not shared)
    pub fn bind_self(&self, abstract_name: &str) -> Result<()> {
        self.bind_with(abstract_name, None, false)
    }

    /// Bind an abstract to an implementation, shared across resolutions
    pub fn singleton(&self, abstract_name: &str, concrete: impl Into<Concrete>) -> Result<()> {
        self.bind_with(abstract_name, Some(concrete.into()), true)
    }

    /// Bind an abstract to itself, shared across resolutions
    pub fn singleton_self(&self, abstract_name: &str) -> Result<()> {
        self.bind_with(abstract_name, None, true)
    }

    /// Register a binding
    ///
    /// A missing `concrete` binds the abstract to itself. Any cached
    /// instance or alias under the same name is dropped first. If the
    /// abstract was already resolved, rebound callbacks fire.
    pub fn bind_with(
        &self,
        abstract_name: &str,
        concrete: Option<Concrete>,
        shared: bool,
    ) -> Result<()> {
        let concrete = concrete.unwrap_or_else(|| Concrete::Name(abstract_name.to_string()));
        debug!(abstract_name, ?concrete, shared, "Binding");

        let resolved = {
            let mut registry = self.write();
            registry.drop_stale_instances(abstract_name);
            registry.bump_generation(abstract_name);
            registry.bindings.insert(
                abstract_name.to_string(),
                Binding {
                    producer: concrete.into_producer(abstract_name),
                    shared,
                },
            );
            registry.is_resolved(abstract_name)?
        };

        if resolved {
            self.rebound(abstract_name)?;
        }
        Ok(())
    }

    /// Register a binding only if the abstract is not bound yet
    pub fn bind_if(
        &self,
        abstract_name: &str,
        concrete: Option<Concrete>,
        shared: bool,
    ) -> Result<()> {
        if self.bound(abstract_name) {
            return Ok(());
        }
        self.bind_with(abstract_name, concrete, shared)
    }

    /// Store a ready-made instance as the shared value of an abstract
    pub fn instance(&self, abstract_name: &str, value: Instance) -> Result<()> {
        let was_bound = {
            let mut registry = self.write();
            registry.aliases.remove_abstract_alias(abstract_name);
            let was_bound = registry.bound(abstract_name);
            registry.aliases.remove(abstract_name);
            registry.bump_generation(abstract_name);
            registry
                .instances
                .insert(abstract_name.to_string(), value);
            was_bound
        };
        debug!(abstract_name, was_bound, "Registered instance");

        if was_bound {
            self.rebound(abstract_name)?;
        }
        Ok(())
    }

    /// Register `alias_name` as another name for `abstract_name`
    pub fn alias(&self, abstract_name: &str, alias_name: &str) {
        debug!(abstract_name, alias_name, "Registering alias");
        self.write().aliases.alias(abstract_name, alias_name);
    }

    /// Decorate an abstract
    ///
    /// A cached instance is decorated immediately; otherwise the extender is
    /// queued and applied to every future construction. If the cached
    /// instance is replaced or dropped while the extender runs, the decorated
    /// value is discarded and the extender is queued instead.
    pub fn extend<F>(&self, abstract_name: &str, extender: F) -> Result<()>
    where
        F: Fn(Instance, &Container) -> Instance + Send + Sync + 'static,
    {
        let abstract_name = self.get_alias(abstract_name)?;
        let extender: Extender = Arc::new(extender);

        let cached = self.read().instances.get(&abstract_name).cloned();
        if let Some(instance) = cached {
            debug!(abstract_name = %abstract_name, "Extending cached instance");
            let extended = extender(instance.clone(), self);
            let written = {
                let mut registry = self.write();
                let unchanged = registry
                    .instances
                    .get(&abstract_name)
                    .is_some_and(|current| current.ptr_eq(&instance));
                if unchanged {
                    registry.instances.insert(abstract_name.clone(), extended);
                }
                unchanged
            };
            if written {
                return self.rebound(&abstract_name);
            }
            debug!(abstract_name = %abstract_name, "Cached instance replaced while extending");
        }

        let resolved = {
            let mut registry = self.write();
            registry
                .extenders
                .entry(abstract_name.clone())
                .or_default()
                .push(extender);
            registry.is_resolved(&abstract_name)?
        };
        debug!(abstract_name = %abstract_name, resolved, "Queued extender");

        if resolved {
            self.rebound(&abstract_name)?;
        }
        Ok(())
    }

    /// Drop every queued extender of an abstract
    pub fn forget_extenders(&self, abstract_name: &str) -> Result<()> {
        let abstract_name = self.get_alias(abstract_name)?;
        self.write().extenders.remove(&abstract_name);
        Ok(())
    }

    /// Start a contextual binding for `concrete`
    pub fn when(&self, concrete: &str) -> ContextualBindingBuilder<'_> {
        ContextualBindingBuilder::new(self, concrete)
    }

    /// Record `implementation` for `needed` while `building` is being built
    pub fn add_contextual_binding(
        &self,
        building: &str,
        needed: &str,
        implementation: Concrete,
    ) -> Result<()> {
        let building = self.get_alias(building)?;
        let needed = self.get_alias(needed)?;
        debug!(building = %building, needed = %needed, "Registering contextual binding");
        self.write()
            .add_contextual_binding(building, needed, implementation);
        Ok(())
    }

    /// Register a callback fired with the new instance whenever the abstract is rebound
    ///
    /// Returns the current instance if the abstract is already bound.
    pub fn rebinding<F>(&self, abstract_name: &str, callback: F) -> Result<Option<Instance>>
    where
        F: Fn(&Container, &Instance) + Send + Sync + 'static,
    {
        let abstract_name = self.get_alias(abstract_name)?;
        let callback: ReboundCallback = Arc::new(callback);
        let bound = {
            let mut registry = self.write();
            registry
                .rebound_callbacks
                .entry(abstract_name.clone())
                .or_default()
                .push(callback);
            registry.bound(&abstract_name)
        };

        if bound {
            return self.make(&abstract_name).map(Some);
        }
        Ok(None)
    }

    /// Observe every fresh construction of an abstract
    pub fn resolving<F>(&self, abstract_name: &str, callback: F) -> Result<()>
    where
        F: Fn(&Instance, &Container) + Send + Sync + 'static,
    {
        let abstract_name = self.get_alias(abstract_name)?;
        let callback: ResolvingCallback = Arc::new(callback);
        self.write()
            .resolving
            .entry(abstract_name)
            .or_default()
            .push(callback);
        Ok(())
    }

    /// Observe every fresh construction of any abstract
    pub fn resolving_any<F>(&self, callback: F)
    where
        F: Fn(&Instance, &Container) + Send + Sync + 'static,
    {
        self.write().global_resolving.push(Arc::new(callback));
    }

    /// Observe an abstract after its resolving callbacks ran
    pub fn after_resolving<F>(&self, abstract_name: &str, callback: F) -> Result<()>
    where
        F: Fn(&Instance, &Container) + Send + Sync + 'static,
    {
        let abstract_name = self.get_alias(abstract_name)?;
        let callback: ResolvingCallback = Arc::new(callback);
        self.write()
            .after_resolving
            .entry(abstract_name)
            .or_default()
            .push(callback);
        Ok(())
    }

    /// Observe any abstract after its resolving callbacks ran
    pub fn after_resolving_any<F>(&self, callback: F)
    where
        F: Fn(&Instance, &Container) + Send + Sync + 'static,
    {
        self.write().global_after_resolving.push(Arc::new(callback));
    }

    /// Add every abstract to every tag
    pub fn tag<A, T>(&self, abstracts: A, tags: T)
    where
        A: IntoIterator,
        A::Item: Into<String>,
        T: IntoIterator,
        T::Item: Into<String>,
    {
        self.write().tags.tag(abstracts, tags);
    }

    // ========================================================================
    // Resolution
    // ========================================================================

    /// Resolve an abstract
    pub fn make(&self, abstract_name: &str) -> Result<Instance> {
        Resolver::new(self).make(abstract_name)
    }

    /// Resolve an abstract with override parameters
    pub fn make_with(&self, abstract_name: &str, parameters: Parameters) -> Result<Instance> {
        Resolver::new(self).make_with(abstract_name, parameters)
    }

    /// Resolve an abstract and downcast it to `T`
    pub fn make_as<T: Any + Send + Sync>(&self, abstract_name: &str) -> Result<Arc<T>> {
        Resolver::new(self).make_as::<T>(abstract_name)
    }

    /// Resolve an abstract and clone out a `T`
    pub fn make_value<T: Any + Clone>(&self, abstract_name: &str) -> Result<T> {
        Resolver::new(self).make_value::<T>(abstract_name)
    }

    /// Construct a concrete identifier directly, bypassing bindings
    pub fn build(&self, concrete: &str) -> Result<Instance> {
        Resolver::new(self).build(concrete)
    }

    /// Deferred resolution of an abstract
    pub fn factory(
        self: &Arc<Self>,
        abstract_name: &str,
    ) -> impl Fn() -> Result<Instance> + Send + Sync + 'static {
        let container = Arc::clone(self);
        let abstract_name = abstract_name.to_string();
        move || container.make(&abstract_name)
    }

    /// Resolve every abstract carrying `tag`, in tagging order
    pub fn tagged(&self, tag: &str) -> Result<Vec<Instance>> {
        let members = self.read().tags.members(tag);
        members.iter().map(|member| self.make(member)).collect()
    }

    /// Re-resolve an abstract and notify its rebound callbacks
    fn rebound(&self, abstract_name: &str) -> Result<()> {
        let instance = self.make(abstract_name)?;
        let callbacks = self.read().rebound_callbacks_for(abstract_name);
        debug!(abstract_name, callbacks = callbacks.len(), "Rebound");
        for callback in &callbacks {
            callback(self, &instance);
        }
        Ok(())
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Whether an abstract is bound, holds an instance, or is an alias
    pub fn bound(&self, abstract_name: &str) -> bool {
        self.read().bound(abstract_name)
    }

    /// Whether an abstract was resolved at least once or holds an instance
    ///
    /// A name whose alias chain loops counts as not resolved.
    pub fn resolved(&self, abstract_name: &str) -> bool {
        self.read().is_resolved(abstract_name).unwrap_or(false)
    }

    /// Whether resolving the abstract yields a shared instance
    pub fn is_shared(&self, abstract_name: &str) -> bool {
        let registry = self.read();
        let abstract_name = registry
            .aliases
            .get_alias(abstract_name)
            .unwrap_or_else(|_| abstract_name.to_string());
        registry.is_shared(&abstract_name)
    }

    pub fn is_alias(&self, name: &str) -> bool {
        self.read().aliases.is_alias(name)
    }

    /// Canonical name behind an alias chain
    pub fn get_alias(&self, abstract_name: &str) -> Result<String> {
        self.read().aliases.get_alias(abstract_name)
    }

    pub fn get_bindings(&self) -> BTreeMap<String, BindingInfo> {
        self.read().binding_snapshot()
    }

    // ========================================================================
    // Teardown
    // ========================================================================

    pub fn forget_instance(&self, abstract_name: &str) {
        self.write().instances.remove(abstract_name);
    }

    pub fn forget_instances(&self) {
        self.write().instances.clear();
    }

    /// Remove a binding, its instance and its resolved flag
    pub fn unbind(&self, abstract_name: &str) {
        self.write().unbind(abstract_name);
    }

    /// Clear aliases, resolved flags, bindings and instances
    ///
    /// Contextual bindings, extenders, tags and callbacks survive.
    pub fn flush(&self) {
        warn!("Flushing container bindings and instances");
        self.write().flush();
    }
}

impl Default for Container {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Container {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let registry = self.read();
        f.debug_struct("Container")
            .field("bindings", &registry.bindings.len())
            .field("instances", &registry.instances.len())
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}
