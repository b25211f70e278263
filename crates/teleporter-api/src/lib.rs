//! HTTP surface for scene teleporters: group administration, destination
//! prompts, teleports, and elevation shifts.

pub mod config;
pub mod error;
pub mod extract;
pub mod notify;
pub mod prompt_hub;
pub mod routes;
pub mod state;
