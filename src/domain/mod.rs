//! # Domain Layer
//!
//! Pure business types for shipping-fee rate shopping. No I/O lives here:
//! entities and value objects validate their own invariants and everything
//! else builds on top of them.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use errors::{DomainError, DomainResult};
