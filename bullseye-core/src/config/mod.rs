//! Configuration types
//!
//! Per-platform face configuration, resolved once at startup from a
//! platform descriptor.

pub mod face;
pub mod platform;

pub use face::*;
pub use platform::*;
