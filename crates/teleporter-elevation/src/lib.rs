//! Teleporter: Elevation bounded context.
//!
//! Shifts an entity between two fixed reference heights.

pub mod application;
pub mod domain;
