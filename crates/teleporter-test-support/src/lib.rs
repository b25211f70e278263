//! Shared test doubles for the region teleporter.

mod clock;
mod interaction;
mod notify;
mod registry;
mod scene;

pub use clock::FixedClock;
pub use interaction::{ScriptedResponse, ScriptedSurface};
pub use notify::RecordingNotifier;
pub use registry::{FailingGroupRegistry, InMemoryGroupRegistry};
pub use scene::InMemorySceneStore;
