//! # Infrastructure Layer
//!
//! Everything that touches the outside world: the SOAP transport and the
//! freight vendor adapter built on top of it.

pub mod freight;
pub mod soap;
