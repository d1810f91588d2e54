//! Error handling types

use thiserror::Error;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for wirekit
#[derive(Error, Debug)]
pub enum Error {
    /// An alias chain loops back onto a name already visited
    #[error("[{name}] is aliased to itself (chain: {})", chain.join(" -> "))]
    AliasCycle {
        /// The name whose resolution looped
        name: String,
        /// The names visited before the loop was detected
        chain: Vec<String>,
    },

    /// The target concrete cannot be constructed (abstract, interface or unknown)
    #[error("{}", not_instantiable_message(concrete, build_stack))]
    NotInstantiable {
        /// The concrete that was requested
        concrete: String,
        /// Identifiers under construction when the failure happened
        build_stack: Vec<String>,
    },

    /// A primitive constructor parameter has no override, contextual value or default
    #[error("Unresolvable dependency resolving [${parameter}] in class {concrete}")]
    UnresolvableDependency {
        /// Name of the parameter that could not be satisfied
        parameter: String,
        /// Concrete declaring the parameter
        concrete: String,
    },

    /// A concrete depends on itself, directly or transitively
    #[error("Circular dependency detected while building [{concrete}]: {}", cycle_message(concrete, build_stack))]
    CircularDependency {
        /// The concrete that was requested a second time
        concrete: String,
        /// Identifiers under construction when the cycle was found
        build_stack: Vec<String>,
    },

    /// The resolution chain went deeper than the configured limit
    #[error("Maximum build depth of {depth} exceeded while building [{}]", build_stack.join(", "))]
    BuildDepthExceeded {
        /// Configured depth limit
        depth: usize,
        /// Identifiers under construction when the limit was hit
        build_stack: Vec<String>,
    },

    /// A type-erased value did not hold the expected type
    #[error("Type mismatch: expected {expected}, found {actual}")]
    TypeMismatch {
        /// Requested type
        expected: String,
        /// Type actually stored
        actual: String,
    },

    /// A constructor asked for an argument that was not supplied
    #[error("Missing constructor argument: {name}")]
    MissingArgument {
        /// Argument name or position
        name: String,
    },

    /// A producer or constructor failed for its own reasons
    #[error("Producer error: {message}")]
    Producer {
        /// Description of the failure
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration-related error
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// I/O operation error
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

fn not_instantiable_message(concrete: &str, build_stack: &[String]) -> String {
    if build_stack.is_empty() {
        format!("Target [{concrete}] is not instantiable.")
    } else {
        format!(
            "Target [{concrete}] is not instantiable while building [{}].",
            build_stack.join(", ")
        )
    }
}

fn cycle_message(concrete: &str, build_stack: &[String]) -> String {
    let start = build_stack
        .iter()
        .position(|entry| entry == concrete)
        .unwrap_or(0);
    let mut cycle: Vec<&str> = build_stack[start..].iter().map(String::as_str).collect();
    cycle.push(concrete);
    cycle.join(" -> ")
}

// Resolution error creation methods
impl Error {
    /// Create an alias cycle error
    pub fn alias_cycle<S: Into<String>>(name: S, chain: Vec<String>) -> Self {
        Self::AliasCycle {
            name: name.into(),
            chain,
        }
    }

    /// Create a not-instantiable error carrying the current build stack
    pub fn not_instantiable<S: Into<String>>(concrete: S, build_stack: &[String]) -> Self {
        Self::NotInstantiable {
            concrete: concrete.into(),
            build_stack: build_stack.to_vec(),
        }
    }

    /// Create an unresolvable dependency error
    pub fn unresolvable<P: Into<String>, C: Into<String>>(parameter: P, concrete: C) -> Self {
        Self::UnresolvableDependency {
            parameter: parameter.into(),
            concrete: concrete.into(),
        }
    }

    /// Create a circular dependency error
    pub fn circular<S: Into<String>>(concrete: S, build_stack: &[String]) -> Self {
        Self::CircularDependency {
            concrete: concrete.into(),
            build_stack: build_stack.to_vec(),
        }
    }

    /// Create a build depth error
    pub fn depth_exceeded(depth: usize, build_stack: &[String]) -> Self {
        Self::BuildDepthExceeded {
            depth,
            build_stack: build_stack.to_vec(),
        }
    }

    /// Create a type mismatch error
    pub fn type_mismatch<E: Into<String>, A: Into<String>>(expected: E, actual: A) -> Self {
        Self::TypeMismatch {
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Create a missing argument error
    pub fn missing_argument<S: Into<String>>(name: S) -> Self {
        Self::MissingArgument { name: name.into() }
    }
}

// Producer error creation methods
impl Error {
    /// Create a producer error
    pub fn producer<S: Into<String>>(message: S) -> Self {
        Self::Producer {
            message: message.into(),
            source: None,
        }
    }

    /// Create a producer error with source
    pub fn producer_with_source<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        message: S,
        source: E,
    ) -> Self {
        Self::Producer {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

// Configuration and I/O error creation methods
impl Error {
    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error with source
    pub fn configuration_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::Configuration {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an I/O error
    pub fn io<S: Into<String>>(message: S) -> Self {
        Self::Io {
            message: message.into(),
            source: None,
        }
    }

    /// Create an I/O error with source
    pub fn io_with_source<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        message: S,
        source: E,
    ) -> Self {
        Self::Io {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

impl Error {
    /// Whether this error came out of the resolution algorithm itself
    /// rather than from a producer, configuration or I/O
    pub fn is_resolution_error(&self) -> bool {
        matches!(
            self,
            Self::AliasCycle { .. }
                | Self::NotInstantiable { .. }
                | Self::UnresolvableDependency { .. }
                | Self::CircularDependency { .. }
                | Self::BuildDepthExceeded { .. }
        )
    }
}

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Self::Io {
            message: source.to_string(),
            source: Some(Box::new(source)),
        }
    }
}
