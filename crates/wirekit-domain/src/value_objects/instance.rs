//! Type-erased shared values handed out by the container

use std::any::{Any, type_name};
use std::fmt;
use std::sync::Arc;

use crate::error::{Error, Result};

/// A resolved value
///
/// Cloning is cheap: every clone points at the same allocation, which is what
/// makes shared bindings observable through [`Instance::ptr_eq`].
///
/// Trait-object contracts are stored as `Arc<dyn Trait>` values:
///
/// ```
/// use std::sync::Arc;
/// use wirekit_domain::Instance;
///
/// trait Greeter: Send + Sync {
///     fn greet(&self) -> String;
/// }
///
/// struct English;
/// impl Greeter for English {
///     fn greet(&self) -> String {
///         "hello".to_string()
///     }
/// }
///
/// let instance = Instance::new(Arc::new(English) as Arc<dyn Greeter>);
/// let greeter = instance.get::<Arc<dyn Greeter>>().unwrap();
/// assert_eq!(greeter.greet(), "hello");
/// ```
#[derive(Clone)]
pub struct Instance {
    value: Arc<dyn Any + Send + Sync>,
    type_name: &'static str,
}

impl Instance {
    /// Wrap a value
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self {
            value: Arc::new(value),
            type_name: type_name::<T>(),
        }
    }

    /// Wrap an already shared value without reallocating
    pub fn from_arc<T: Any + Send + Sync>(value: Arc<T>) -> Self {
        Self {
            value,
            type_name: type_name::<T>(),
        }
    }

    /// Name of the stored type, for diagnostics
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Whether the stored value is a `T`
    pub fn is<T: Any>(&self) -> bool {
        self.value.as_ref().is::<T>()
    }

    /// Borrow the stored value as a `T`
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.value.as_ref().downcast_ref::<T>()
    }

    /// Shared handle to the stored value as a `T`
    pub fn downcast<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        Arc::clone(&self.value).downcast::<T>().ok()
    }

    /// Clone the stored value out as a `T`
    pub fn get<T: Any + Clone>(&self) -> Option<T> {
        self.downcast_ref::<T>().cloned()
    }

    /// Like [`Instance::downcast`] but reports a [`Error::TypeMismatch`]
    pub fn try_downcast<T: Any + Send + Sync>(&self) -> Result<Arc<T>> {
        self.downcast::<T>()
            .ok_or_else(|| Error::type_mismatch(type_name::<T>(), self.type_name))
    }

    /// Like [`Instance::get`] but reports a [`Error::TypeMismatch`]
    pub fn try_get<T: Any + Clone>(&self) -> Result<T> {
        self.get::<T>()
            .ok_or_else(|| Error::type_mismatch(type_name::<T>(), self.type_name))
    }

    /// Whether both instances share the same allocation
    pub fn ptr_eq(&self, other: &Instance) -> bool {
        Arc::ptr_eq(&self.value, &other.value)
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instance")
            .field("type", &self.type_name)
            .finish_non_exhaustive()
    }
}
