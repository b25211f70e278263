//! Teleporter Core: shared domain abstractions.
//!
//! This crate defines the fundamental types that every bounded context
//! depends on, together with the ports through which the core talks to its
//! host: scene data, the group registry, the interaction surface, and the
//! notification sink. It contains no infrastructure code.

pub mod actor;
pub mod clock;
pub mod command;
pub mod document;
pub mod error;
pub mod geometry;
pub mod interaction;
pub mod notify;
pub mod registry;
pub mod scene;
