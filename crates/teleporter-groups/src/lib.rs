//! Teleporter: Region Groups bounded context.
//!
//! Responsible for the named, ordered groups of regions that serve as the
//! menu of teleport destinations within a scene.

pub mod application;
pub mod domain;
