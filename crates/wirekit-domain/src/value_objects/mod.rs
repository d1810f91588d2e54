//! Value objects
//!
//! Type-erased values flowing through the container.

mod arguments;
mod instance;
mod parameters;

pub use arguments::Arguments;
pub use instance::Instance;
pub use parameters::Parameters;
