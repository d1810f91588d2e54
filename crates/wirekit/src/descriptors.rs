//! Type Registry
//!
//! Default [`TypeDescriptorProvider`]: knows how to construct concrete
//! identifiers from descriptors registered at runtime or at compile time.
//!
//! ## Registration
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  compile time   #[linkme::distributed_slice(TYPE_DESCRIPTORS)] │
//! │                 static ENTRY: TypeDescriptorEntry = ...        │
//! │                               ↓                                │
//! │  runtime        TypeRegistry::discover()                       │
//! │                 registry.register(TypeDescriptor::new(..))     │
//! │                 registry.register_type::<T: Injectable>()      │
//! │                               ↓                                │
//! │  resolution     is_instantiable / constructor_parameters /     │
//! │                 instantiate                                    │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ### Registering a type at compile time
//!
//! ```ignore
//! use wirekit::descriptors::{TypeDescriptor, TypeDescriptorEntry, TYPE_DESCRIPTORS};
//!
//! #[linkme::distributed_slice(TYPE_DESCRIPTORS)]
//! static ALIPAY: TypeDescriptorEntry = TypeDescriptorEntry {
//!     name: "Alipay",
//!     description: "Alipay payment channel",
//!     factory: || TypeDescriptor::new("Alipay").constructor(|_| Ok(Instance::new(Alipay))),
//! };
//! ```

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use serde::Serialize;
use tracing::debug;
use wirekit_domain::ports::ParameterSummary;
use wirekit_domain::{
    Arguments, Error, Instance, ParameterDescriptor, Result, TypeDescriptorProvider,
};

/// Builds an instance from resolved constructor arguments
pub type Constructor = Arc<dyn Fn(&Arguments) -> Result<Instance> + Send + Sync>;

/// How one concrete identifier is constructed
#[derive(Clone)]
pub struct TypeDescriptor {
    name: String,
    description: String,
    parameters: Option<Vec<ParameterDescriptor>>,
    constructor: Option<Constructor>,
    is_abstract: bool,
}

impl TypeDescriptor {
    /// A descriptor with no constructor parameters and no constructor yet
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            parameters: None,
            constructor: None,
            is_abstract: false,
        }
    }

    /// A known contract that is never instantiated directly (an interface or abstract class)
    ///
    /// Stays non-instantiable even if a constructor is attached later; the
    /// container only reaches it through a binding.
    pub fn abstract_type(name: impl Into<String>) -> Self {
        Self {
            is_abstract: true,
            ..Self::new(name)
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Append a constructor parameter
    pub fn parameter(mut self, parameter: ParameterDescriptor) -> Self {
        self.parameters.get_or_insert_with(Vec::new).push(parameter);
        self
    }

    /// Set the constructor
    pub fn constructor<F>(mut self, constructor: F) -> Self
    where
        F: Fn(&Arguments) -> Result<Instance> + Send + Sync + 'static,
    {
        self.constructor = Some(Arc::new(constructor));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_abstract(&self) -> bool {
        self.is_abstract
    }

    pub fn is_instantiable(&self) -> bool {
        !self.is_abstract && self.constructor.is_some()
    }

    /// Serializable view of this descriptor
    pub fn summary(&self) -> TypeSummary {
        TypeSummary {
            name: self.name.clone(),
            description: self.description.clone(),
            instantiable: self.is_instantiable(),
            parameters: self
                .parameters
                .iter()
                .flatten()
                .map(ParameterDescriptor::summary)
                .collect(),
        }
    }
}

impl fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDescriptor")
            .field("name", &self.name)
            .field("parameters", &self.parameters)
            .field("abstract", &self.is_abstract)
            .field("instantiable", &self.is_instantiable())
            .finish()
    }
}

/// Serializable description of a registered type
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeSummary {
    pub name: String,
    pub description: String,
    pub instantiable: bool,
    pub parameters: Vec<ParameterSummary>,
}

/// A Rust type the container can construct
///
/// ```ignore
/// struct PayBill { pay: Arc<dyn Pay> }
///
/// impl Injectable for PayBill {
///     const NAME: &'static str = "PayBill";
///
///     fn parameters() -> Vec<ParameterDescriptor> {
///         vec![ParameterDescriptor::contract("pay", "Pay")]
///     }
///
///     fn construct(arguments: &Arguments) -> Result<Self> {
///         Ok(Self { pay: arguments.value("pay")? })
///     }
/// }
/// ```
pub trait Injectable: Sized + Send + Sync + 'static {
    /// Concrete identifier the type is registered under
    const NAME: &'static str;

    fn parameters() -> Vec<ParameterDescriptor> {
        Vec::new()
    }

    fn construct(arguments: &Arguments) -> Result<Self>;

    /// Wrap a constructed value; override to store it as a trait object
    fn into_instance(self) -> Instance {
        Instance::new(self)
    }

    fn descriptor() -> TypeDescriptor {
        let descriptor = TypeDescriptor::new(Self::NAME)
            .constructor(|arguments| Self::construct(arguments).map(Self::into_instance));
        Self::parameters()
            .into_iter()
            .fold(descriptor, TypeDescriptor::parameter)
    }
}

/// Compile-time registration entry
///
/// Each entry is submitted with `#[linkme::distributed_slice(TYPE_DESCRIPTORS)]`
/// and collected by [`TypeRegistry::discover`].
pub struct TypeDescriptorEntry {
    /// Concrete identifier
    pub name: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// Builds the descriptor
    pub factory: fn() -> TypeDescriptor,
}

#[linkme::distributed_slice]
pub static TYPE_DESCRIPTORS: [TypeDescriptorEntry] = [..];

/// Runtime registry of type descriptors
#[derive(Default)]
pub struct TypeRegistry {
    types: RwLock<HashMap<String, TypeDescriptor>>,
}

impl TypeRegistry {
    /// An empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every compile-time registered type
    pub fn discover() -> Self {
        let registry = Self::new();
        for entry in TYPE_DESCRIPTORS {
            let descriptor = (entry.factory)().description(entry.description);
            if descriptor.name() != entry.name {
                debug!(
                    entry = entry.name,
                    descriptor = descriptor.name(),
                    "Registered type name differs from its entry name"
                );
            }
            registry.register(descriptor);
        }
        registry
    }

    /// Register or replace a descriptor
    pub fn register(&self, descriptor: TypeDescriptor) {
        debug!(name = descriptor.name(), "Registering type descriptor");
        self.types
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(descriptor.name.clone(), descriptor);
    }

    /// Register a Rust type
    pub fn register_type<T: Injectable>(&self) {
        self.register(T::descriptor());
    }

    pub fn contains(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    /// Registered types as (name, description), sorted by name
    pub fn list_types(&self) -> Vec<(String, String)> {
        self.summaries()
            .into_values()
            .map(|summary| (summary.name, summary.description))
            .collect()
    }

    pub fn describe(&self, name: &str) -> Option<TypeSummary> {
        self.lookup(name).map(|descriptor| descriptor.summary())
    }

    fn summaries(&self) -> BTreeMap<String, TypeSummary> {
        self.types
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .map(|descriptor| (descriptor.name.clone(), descriptor.summary()))
            .collect()
    }

    fn lookup(&self, name: &str) -> Option<TypeDescriptor> {
        self.types
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }
}

impl TypeDescriptorProvider for TypeRegistry {
    fn is_instantiable(&self, concrete: &str) -> bool {
        self.lookup(concrete)
            .is_some_and(|descriptor| descriptor.is_instantiable())
    }

    fn constructor_parameters(&self, concrete: &str) -> Option<Vec<ParameterDescriptor>> {
        self.lookup(concrete)
            .and_then(|descriptor| descriptor.parameters)
    }

    fn instantiate(&self, concrete: &str, arguments: Arguments) -> Result<Instance> {
        let constructor = self
            .lookup(concrete)
            .filter(TypeDescriptor::is_instantiable)
            .and_then(|descriptor| descriptor.constructor)
            .ok_or_else(|| Error::not_instantiable(concrete, &[]))?;
        constructor(&arguments)
    }
}

impl fmt::Display for TypeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Registered Types:")?;
        for summary in self.summaries().values() {
            let marker = if summary.instantiable { "" } else { " (abstract)" };
            let parameters: Vec<&str> = summary
                .parameters
                .iter()
                .map(|parameter| parameter.name.as_str())
                .collect();
            writeln!(
                f,
                "  - {}({}){}: {}",
                summary.name,
                parameters.join(", "),
                marker,
                summary.description
            )?;
        }
        Ok(())
    }
}

impl fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeRegistry")
            .field("types", &self.summaries().into_keys().collect::<Vec<_>>())
            .finish()
    }
}
