//! Application Layer
//!
//! Use cases orchestrating broker order domain logic over the persistence
//! port.

pub mod use_cases;

pub use use_cases::*;
