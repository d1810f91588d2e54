//! Domain layer for wirekit
//!
//! Holds what the resolution engine and its collaborators agree on: the error
//! taxonomy, type-erased values, and the port through which constructor
//! metadata is obtained. Nothing here resolves anything.

pub mod constants;
pub mod error;
pub mod ports;
pub mod value_objects;

pub use error::{Error, Result};
pub use ports::{ParameterDescriptor, ParameterKind, TypeDescriptorProvider};
pub use value_objects::{Arguments, Instance, Parameters};
