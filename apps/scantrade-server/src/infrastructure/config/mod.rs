//! Infrastructure Configuration
//!
//! Dependency injection container wiring adapters to use cases.

mod container;

pub use container::{Container, ContainerError};
