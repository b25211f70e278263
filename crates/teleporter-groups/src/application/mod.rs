//! Application layer for the Region Groups context.

pub mod command_handlers;
pub mod query_handlers;
