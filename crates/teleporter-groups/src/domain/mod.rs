//! Domain layer for the Region Groups context.

pub mod aggregates;
pub mod commands;
