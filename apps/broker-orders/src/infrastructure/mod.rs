//! Infrastructure Layer
//!
//! Adapters implementing the domain's persistence port.

pub mod persistence;
