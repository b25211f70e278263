//! Application layer for the Navigation context.

pub mod command_handlers;
