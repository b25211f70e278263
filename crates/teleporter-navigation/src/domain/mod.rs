//! Domain layer for the Navigation context.

pub mod commands;
pub mod selection;
pub mod teleport;
