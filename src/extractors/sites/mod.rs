//! Hand-tuned strategies for sites whose structured markup is unreliable.
//!
//! Each module owns its selector chains and shares the domain weight table.
//! New sites get a module here plus one `register` call in the registry.

mod cuisineaz;
mod marmiton;

pub use cuisineaz::CuisineAzExtractor;
pub use marmiton::MarmitonExtractor;
