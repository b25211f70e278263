//! Application layer for the Elevation context.

pub mod command_handlers;
