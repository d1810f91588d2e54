//! What an abstract can be bound to
//!
//! A binding or contextual override names its implementation in one of three
//! ways, modelled explicitly instead of being inspected at runtime:
//!
//! | Variant | Meaning |
//! |---------|---------|
//! | `Name` | another identifier: built if it equals the abstract, resolved otherwise |
//! | `Producer` | a function that constructs the value |
//! | `Value` | a ready-made value |

use std::fmt;
use std::sync::Arc;

use wirekit_domain::{Instance, Parameters, Result};

use crate::container::Container;
use crate::resolver::Resolver;

/// Constructs an instance from the in-progress resolution and the active override parameters
///
/// Producers receive the [`Resolver`] rather than the container so that
/// nested `make` calls continue the current build chain.
pub type Producer = Arc<dyn Fn(&mut Resolver<'_>, &Parameters) -> Result<Instance> + Send + Sync>;

/// Decorates a freshly built instance before it is returned or cached
pub type Extender = Arc<dyn Fn(Instance, &Container) -> Instance + Send + Sync>;

/// Notified with the new instance after an abstract is rebound
pub type ReboundCallback = Arc<dyn Fn(&Container, &Instance) + Send + Sync>;

/// Observes every fresh construction of an abstract
pub type ResolvingCallback = Arc<dyn Fn(&Instance, &Container) + Send + Sync>;

/// Implementation of an abstract
#[derive(Clone)]
pub enum Concrete {
    Name(String),
    Producer(Producer),
    Value(Instance),
}

impl Concrete {
    /// Wrap a producer function
    pub fn producer<F>(producer: F) -> Self
    where
        F: Fn(&mut Resolver<'_>, &Parameters) -> Result<Instance> + Send + Sync + 'static,
    {
        Self::Producer(Arc::new(producer))
    }

    /// Wrap a ready-made value
    pub fn value<T: std::any::Any + Send + Sync>(value: T) -> Self {
        Self::Value(Instance::new(value))
    }

    /// Turn this implementation into the producer stored by a binding
    ///
    /// A name equal to the abstract is built directly; any other name is
    /// resolved through the container so that it may itself be an abstract.
    pub(crate) fn into_producer(self, abstract_name: &str) -> Producer {
        match self {
            Self::Producer(producer) => producer,
            Self::Value(value) => {
                Arc::new(move |_: &mut Resolver<'_>, _: &Parameters| Ok(value.clone()))
            }
            Self::Name(concrete) => {
                let build_directly = concrete == abstract_name;
                Arc::new(move |resolver: &mut Resolver<'_>, _: &Parameters| {
                    if build_directly {
                        resolver.build(&concrete)
                    } else {
                        resolver.make(&concrete)
                    }
                })
            }
        }
    }
}

impl From<&str> for Concrete {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<String> for Concrete {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

impl From<Instance> for Concrete {
    fn from(value: Instance) -> Self {
        Self::Value(value)
    }
}

impl From<Producer> for Concrete {
    fn from(producer: Producer) -> Self {
        Self::Producer(producer)
    }
}

impl fmt::Debug for Concrete {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(name) => f.debug_tuple("Name").field(name).finish(),
            Self::Producer(_) => f.write_str("Producer(..)"),
            Self::Value(value) => f.debug_tuple("Value").field(value).finish(),
        }
    }
}
