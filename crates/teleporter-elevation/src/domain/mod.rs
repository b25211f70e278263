//! Domain layer for the Elevation context.

pub mod commands;
pub mod shifter;
