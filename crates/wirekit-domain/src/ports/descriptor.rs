//! Type Descriptor Provider Port
//!
//! The resolution engine never inspects types itself. Whatever knows how a
//! concrete identifier is constructed (a hand-written registry, compile-time
//! generated descriptors, a scripting bridge) implements
//! [`TypeDescriptorProvider`] and the engine asks it three questions:
//!
//! 1. can this identifier be instantiated at all?
//! 2. what does its constructor need, in declaration order?
//! 3. build it from these resolved arguments.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::value_objects::{Arguments, Instance};

/// What a constructor parameter is typed as
#[derive(Debug, Clone)]
pub enum ParameterKind {
    /// Typed by a contract; resolved recursively through the container
    Contract(String),
    /// Primitive-typed, optionally with a declared default
    Primitive {
        /// Value used when nothing else supplies the parameter
        default: Option<Instance>,
    },
}

/// One constructor parameter
#[derive(Debug, Clone)]
pub struct ParameterDescriptor {
    pub name: String,
    pub kind: ParameterKind,
}

impl ParameterDescriptor {
    /// A contract-typed parameter
    pub fn contract(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ParameterKind::Contract(type_name.into()),
        }
    }

    /// A primitive parameter with no default
    pub fn primitive(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ParameterKind::Primitive { default: None },
        }
    }

    /// A primitive parameter with a default value
    pub fn with_default<T: std::any::Any + Send + Sync>(name: impl Into<String>, value: T) -> Self {
        Self {
            name: name.into(),
            kind: ParameterKind::Primitive {
                default: Some(Instance::new(value)),
            },
        }
    }

    pub fn has_class_type(&self) -> bool {
        matches!(self.kind, ParameterKind::Contract(_))
    }

    pub fn class_type_name(&self) -> Option<&str> {
        match &self.kind {
            ParameterKind::Contract(name) => Some(name),
            ParameterKind::Primitive { .. } => None,
        }
    }

    pub fn has_default(&self) -> bool {
        matches!(self.kind, ParameterKind::Primitive { default: Some(_) })
    }

    pub fn default_value(&self) -> Option<&Instance> {
        match &self.kind {
            ParameterKind::Primitive { default } => default.as_ref(),
            ParameterKind::Contract(_) => None,
        }
    }

    /// Serializable view of this parameter
    pub fn summary(&self) -> ParameterSummary {
        ParameterSummary {
            name: self.name.clone(),
            class_type: self.class_type_name().map(str::to_string),
            has_default: self.has_default(),
        }
    }
}

/// Serializable description of a parameter, for diagnostics and listings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterSummary {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_type: Option<String>,
    pub has_default: bool,
}

/// Supplies constructor metadata and construction for concrete identifiers
pub trait TypeDescriptorProvider: Send + Sync {
    /// Whether `concrete` names something that can be constructed
    fn is_instantiable(&self, concrete: &str) -> bool;

    /// Constructor parameters of `concrete` in declaration order
    ///
    /// `None` means the type has no constructor and is instantiated directly.
    fn constructor_parameters(&self, concrete: &str) -> Option<Vec<ParameterDescriptor>>;

    /// Construct `concrete` from its resolved arguments
    fn instantiate(&self, concrete: &str, arguments: Arguments) -> Result<Instance>;
}

/// Provider that knows no types
///
/// Every build request fails with `NotInstantiable`, leaving producers and
/// instances as the only way to obtain values.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullTypeDescriptorProvider;

impl TypeDescriptorProvider for NullTypeDescriptorProvider {
    fn is_instantiable(&self, _concrete: &str) -> bool {
        false
    }

    fn constructor_parameters(&self, _concrete: &str) -> Option<Vec<ParameterDescriptor>> {
        None
    }

    fn instantiate(&self, concrete: &str, _arguments: Arguments) -> Result<Instance> {
        Err(crate::error::Error::not_instantiable(concrete, &[]))
    }
}
