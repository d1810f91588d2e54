//! Ports implemented outside the domain

pub mod descriptor;

pub use descriptor::{
    NullTypeDescriptorProvider, ParameterDescriptor, ParameterKind, ParameterSummary,
    TypeDescriptorProvider,
};
