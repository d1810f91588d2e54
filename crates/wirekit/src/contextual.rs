//! Contextual Binding Builder
//!
//! `container.when("Alipay").needs("Logger").give("FileLogger")` makes
//! `Logger` resolve to `FileLogger` only while `Alipay` is being built.
//! Primitive constructor parameters are targeted with a `$` prefix:
//! `when("HttpClient").needs("$timeout").give(Concrete::value(30_u64))`.

use wirekit_domain::Result;

use crate::concrete::Concrete;
use crate::container::Container;

/// First step: the concrete whose construction scopes the override
#[must_use = "a contextual binding is only recorded by `give`"]
pub struct ContextualBindingBuilder<'c> {
    container: &'c Container,
    concrete: String,
}

impl<'c> ContextualBindingBuilder<'c> {
    pub(crate) fn new(container: &'c Container, concrete: &str) -> Self {
        Self {
            container,
            concrete: concrete.to_string(),
        }
    }

    /// The abstract (or `$parameter`) being overridden
    pub fn needs(self, abstract_name: &str) -> PendingContextualBinding<'c> {
        PendingContextualBinding {
            container: self.container,
            concrete: self.concrete,
            needs: abstract_name.to_string(),
        }
    }
}

/// Second step: waiting for the implementation
#[must_use = "a contextual binding is only recorded by `give`"]
pub struct PendingContextualBinding<'c> {
    container: &'c Container,
    concrete: String,
    needs: String,
}

impl PendingContextualBinding<'_> {
    /// Record the implementation
    pub fn give(self, implementation: impl Into<Concrete>) -> Result<()> {
        self.container
            .add_contextual_binding(&self.concrete, &self.needs, implementation.into())
    }
}
