//! Teleporter: Navigation bounded context.
//!
//! Picks a destination region from a group, either freely or restricted to
//! the source region's neighbours, and moves the actor's entities there.

pub mod application;
pub mod domain;
