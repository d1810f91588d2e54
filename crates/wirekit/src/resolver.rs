//! Resolution Engine
//!
//! Turns an abstract name plus optional override parameters into an instance.
//!
//! ## Flow
//!
//! ```text
//! resolve(abstract, params)
//!   ├─ alias index           abstract -> canonical name
//!   ├─ contextual lookup     (top of build stack, abstract) -> implementation?
//!   ├─ cache fast path       shared instance, no params, no contextual override
//!   ├─ re-entry check        same abstract, same build, no params -> cycle
//!   ├─ concrete selection    contextual > binding producer > abstract itself
//!   │    ├─ producer / self  build()
//!   │    └─ other name       make(name)     (indirection chain)
//!   ├─ extenders             in registration order
//!   ├─ resolving callbacks   global, then per abstract
//!   ├─ cache                 shared and not contextual
//!   └─ mark resolved
//! ```
//!
//! ## Call-scoped state
//!
//! The build stack and the override-parameter stack belong to a
//! [`ResolutionContext`] owned by one [`Resolver`]. A resolver is created per
//! top-level `make` call and threaded through every nested resolution, so
//! concurrent resolutions against one container never see each other's
//! stacks. Each push is paired with a pop on every exit path, errors
//! included.
//!
//! Besides the build stack the context records every abstract being
//! resolved. Re-entering an abstract with no override parameters while the
//! same concrete is on top of the build stack repeats an earlier state
//! exactly, so it is reported as a circular dependency. Binding-only loops
//! (`A -> B -> A` through `bind`, or a producer that makes its own abstract)
//! never reach `build` and are caught here instead.

use std::any::Any;
use std::sync::Arc;

use tracing::trace;
use wirekit_domain::constants::primitive_key;
use wirekit_domain::{
    Arguments, Error, Instance, ParameterDescriptor, ParameterKind, Parameters, Result,
};

use crate::concrete::{Concrete, Producer};
use crate::container::Container;

/// An abstract whose resolution is in progress
#[derive(Debug, Clone)]
struct ResolvingFrame {
    abstract_name: String,
    building: Option<String>,
    plain: bool,
}

/// Stacks carried by one resolution chain
#[derive(Debug, Default, Clone)]
pub struct ResolutionContext {
    build_stack: Vec<String>,
    with: Vec<Parameters>,
    resolving: Vec<ResolvingFrame>,
    depth: usize,
}

impl ResolutionContext {
    /// Identifiers currently under construction, outermost first
    pub fn build_stack(&self) -> &[String] {
        &self.build_stack
    }

    /// Identifier on top of the build stack: the context for contextual bindings
    pub fn current_build(&self) -> Option<&str> {
        self.build_stack.last().map(String::as_str)
    }

    /// Override parameters of the innermost in-progress resolution
    pub fn last_parameter_override(&self) -> Option<&Parameters> {
        self.with.last()
    }

    /// Number of nested resolutions in progress
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Abstracts currently being resolved, outermost first
    pub fn resolving(&self) -> impl Iterator<Item = &str> {
        self.resolving
            .iter()
            .map(|frame| frame.abstract_name.as_str())
    }

    /// Whether a plain resolution of `abstract_name` under `building` is already in progress
    fn reenters(&self, abstract_name: &str, building: Option<&str>) -> bool {
        self.resolving.iter().any(|frame| {
            frame.plain
                && frame.abstract_name == abstract_name
                && frame.building.as_deref() == building
        })
    }
}

/// One resolution chain against a container
pub struct Resolver<'c> {
    container: &'c Container,
    context: ResolutionContext,
}

impl<'c> Resolver<'c> {
    pub(crate) fn new(container: &'c Container) -> Self {
        Self {
            container,
            context: ResolutionContext::default(),
        }
    }

    pub fn container(&self) -> &'c Container {
        self.container
    }

    pub fn context(&self) -> &ResolutionContext {
        &self.context
    }

    /// Resolve `abstract_name` with no override parameters
    pub fn make(&mut self, abstract_name: &str) -> Result<Instance> {
        self.resolve(abstract_name, Parameters::new())
    }

    /// Resolve `abstract_name` with override parameters
    pub fn make_with(&mut self, abstract_name: &str, parameters: Parameters) -> Result<Instance> {
        self.resolve(abstract_name, parameters)
    }

    /// Resolve and downcast to `T`
    pub fn make_as<T: Any + Send + Sync>(&mut self, abstract_name: &str) -> Result<Arc<T>> {
        self.make(abstract_name)?.try_downcast::<T>()
    }

    /// Resolve and clone out a `T`
    pub fn make_value<T: Any + Clone>(&mut self, abstract_name: &str) -> Result<T> {
        self.make(abstract_name)?.try_get::<T>()
    }

    /// Resolve an abstract into an instance
    pub fn resolve(&mut self, abstract_name: &str, parameters: Parameters) -> Result<Instance> {
        let abstract_name = self.container.get_alias(abstract_name)?;

        let max_depth = self.container.settings().max_build_depth;
        if self.context.depth >= max_depth {
            return Err(Error::depth_exceeded(max_depth, &self.context.build_stack));
        }

        let (cached, contextual, generation) = {
            let registry = self.container.read();
            (
                registry.instances.get(&abstract_name).cloned(),
                registry.contextual_concrete(self.context.current_build(), &abstract_name),
                registry.generation(&abstract_name),
            )
        };
        let needs_contextual_build = !parameters.is_empty() || contextual.is_some();

        if let Some(instance) = cached
            && !needs_contextual_build
        {
            trace!(abstract_name = %abstract_name, "Returning shared instance");
            return Ok(instance);
        }

        let plain = parameters.is_empty();
        let building = self.context.current_build().map(str::to_string);
        if plain
            && self.container.settings().detect_circular
            && self.context.reenters(&abstract_name, building.as_deref())
        {
            let chain: Vec<String> = self.context.resolving().map(str::to_string).collect();
            return Err(Error::circular(abstract_name, &chain));
        }

        self.context.resolving.push(ResolvingFrame {
            abstract_name: abstract_name.clone(),
            building,
            plain,
        });
        self.context.with.push(parameters);
        self.context.depth += 1;
        let result = self.construct(
            &abstract_name,
            contextual,
            needs_contextual_build,
            generation,
        );
        self.context.depth -= 1;
        self.context.with.pop();
        self.context.resolving.pop();
        result
    }

    fn construct(
        &mut self,
        abstract_name: &str,
        contextual: Option<Concrete>,
        needs_contextual_build: bool,
        generation: u64,
    ) -> Result<Instance> {
        let concrete = match contextual {
            Some(concrete) => concrete,
            None => self.concrete_for(abstract_name),
        };

        let mut object = match concrete {
            Concrete::Producer(producer) => self.build_producer(&producer)?,
            Concrete::Name(name) if name == abstract_name => self.build(&name)?,
            Concrete::Name(name) => self.make(&name)?,
            Concrete::Value(value) => value,
        };

        let (extenders, resolving, after_resolving) = {
            let registry = self.container.read();
            (
                registry.extenders_for(abstract_name),
                registry.resolving_callbacks_for(abstract_name),
                registry.after_resolving_callbacks_for(abstract_name),
            )
        };

        trace!(
            abstract_name = %abstract_name,
            extenders = extenders.len(),
            "Built instance"
        );
        for extender in &extenders {
            object = extender(object, self.container);
        }
        for callback in resolving.iter().chain(after_resolving.iter()) {
            callback(&object, self.container);
        }

        let mut registry = self.container.write();
        // a binding replaced mid-build must not have the old build cached under it
        if registry.is_shared(abstract_name)
            && !needs_contextual_build
            && registry.generation(abstract_name) == generation
        {
            // first writer wins when two chains race to build the same singleton
            object = registry
                .instances
                .entry(abstract_name.to_string())
                .or_insert(object)
                .clone();
        }
        registry.resolved.insert(abstract_name.to_string());

        Ok(object)
    }

    /// Registered producer for an abstract, or the abstract itself
    fn concrete_for(&self, abstract_name: &str) -> Concrete {
        let registry = self.container.read();
        match registry.bindings.get(abstract_name) {
            Some(binding) => Concrete::Producer(Arc::clone(&binding.producer)),
            None => Concrete::Name(abstract_name.to_string()),
        }
    }

    fn build_producer(&mut self, producer: &Producer) -> Result<Instance> {
        let parameters = self
            .context
            .last_parameter_override()
            .cloned()
            .unwrap_or_default();
        producer(self, &parameters)
    }

    /// Construct a concrete identifier through the type descriptor provider
    pub fn build(&mut self, concrete: &str) -> Result<Instance> {
        let provider = self.container.provider();
        if !provider.is_instantiable(concrete) {
            return Err(Error::not_instantiable(concrete, &self.context.build_stack));
        }
        if self.container.settings().detect_circular
            && self.context.build_stack.iter().any(|entry| entry == concrete)
        {
            return Err(Error::circular(concrete, &self.context.build_stack));
        }

        self.context.build_stack.push(concrete.to_string());
        let arguments = match provider.constructor_parameters(concrete) {
            Some(parameters) => self.resolve_dependencies(concrete, &parameters),
            None => Ok(Arguments::new()),
        };
        self.context.build_stack.pop();

        trace!(concrete = %concrete, "Instantiating");
        provider.instantiate(concrete, arguments?)
    }

    /// Build a producer or a concrete identifier
    pub fn build_concrete(&mut self, concrete: &Concrete) -> Result<Instance> {
        match concrete {
            Concrete::Producer(producer) => self.build_producer(producer),
            Concrete::Name(name) => self.build(name),
            Concrete::Value(value) => Ok(value.clone()),
        }
    }

    fn resolve_dependencies(
        &mut self,
        concrete: &str,
        parameters: &[ParameterDescriptor],
    ) -> Result<Arguments> {
        let mut arguments = Arguments::new();
        for parameter in parameters {
            let overridden = self
                .context
                .last_parameter_override()
                .and_then(|overrides| overrides.get(&parameter.name))
                .cloned();

            let value = match (overridden, &parameter.kind) {
                (Some(value), _) => value,
                (None, ParameterKind::Contract(type_name)) => self.make(type_name)?,
                (None, ParameterKind::Primitive { default }) => {
                    self.resolve_primitive(concrete, &parameter.name, default.as_ref())?
                }
            };
            arguments.push(parameter.name.clone(), value);
        }
        Ok(arguments)
    }

    fn resolve_primitive(
        &mut self,
        concrete: &str,
        name: &str,
        default: Option<&Instance>,
    ) -> Result<Instance> {
        let contextual = self
            .container
            .read()
            .contextual_concrete(self.context.current_build(), &primitive_key(name));

        match (contextual, default) {
            (Some(Concrete::Producer(producer)), _) => producer(self, &Parameters::new()),
            (Some(Concrete::Value(value)), _) => Ok(value),
            (Some(Concrete::Name(literal)), _) => Ok(Instance::new(literal)),
            (None, Some(default)) => Ok(default.clone()),
            (None, None) => Err(Error::unresolvable(name, concrete)),
        }
    }
}
