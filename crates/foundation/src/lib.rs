pub mod geo;
pub mod mercator;

// Foundation crate: small, dependency-free primitives only.
pub use geo::*;
pub use mercator::*;
