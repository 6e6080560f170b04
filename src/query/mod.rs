//! Lookup orchestration
//!
//! Validates the DNI, fans the request out to every registered source,
//! and decides overall success.

pub mod coordinator;

pub use coordinator::{validate_dni, LookupCoordinator, LookupError};
