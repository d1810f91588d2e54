//! wirekit - an inversion-of-control container
//!
//! Given a registry of abstract names mapped to producers, wirekit builds
//! fully wired object graphs on demand: nested dependencies are resolved
//! recursively, contextual overrides apply per branch of the graph, and
//! shared bindings are cached.
//!
//! ## Architecture
//!
//! ```text
//! Container (public API, RwLock<BindingRegistry>)
//! ├── AliasIndex            alias -> abstract, abstract -> aliases
//! ├── BindingRegistry       bindings, instances, contextual, extenders, callbacks
//! ├── TagIndex              tag -> abstracts
//! ├── Resolver              call-scoped build / override stacks
//! └── TypeDescriptorProvider (port)  ← TypeRegistry (default, linkme discovery)
//! ```
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use wirekit::{Container, Instance, ParameterDescriptor, TypeDescriptor, TypeRegistry};
//!
//! let types = TypeRegistry::new();
//! types.register(TypeDescriptor::new("Greeter").constructor(|_| Ok(Instance::new("hello"))));
//! types.register(
//!     TypeDescriptor::new("Service")
//!         .parameter(ParameterDescriptor::contract("greeter", "Greeter"))
//!         .constructor(|args| Ok(Instance::new(args.value::<&'static str>("greeter")?.len()))),
//! );
//!
//! let container = Container::with_provider(Arc::new(types));
//! container.singleton_self("Greeter").unwrap();
//!
//! assert_eq!(container.make_value::<usize>("Service").unwrap(), 5);
//! assert!(container.make("Greeter").unwrap().ptr_eq(&container.make("Greeter").unwrap()));
//! ```

pub mod alias;
pub mod concrete;
pub mod config;
pub mod constants;
pub mod container;
pub mod contextual;
pub mod descriptors;
pub mod error_ext;
pub mod logging;
pub mod registry;
pub mod resolver;
pub mod tags;

pub use concrete::{Concrete, Extender, Producer, ReboundCallback, ResolvingCallback};
pub use container::Container;
pub use contextual::{ContextualBindingBuilder, PendingContextualBinding};
pub use descriptors::{Injectable, TypeDescriptor, TypeDescriptorEntry, TypeRegistry};
pub use registry::BindingInfo;
pub use resolver::{ResolutionContext, Resolver};

pub use wirekit_domain::{
    Arguments, Error, Instance, ParameterDescriptor, ParameterKind, Parameters, Result,
    TypeDescriptorProvider,
};
