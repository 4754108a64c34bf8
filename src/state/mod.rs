//! State management module
//!
//! Stopwatches, the snapshot store they report into, and the coordinator that
//! owns both.

pub mod app_state;
pub mod coordinator;
pub mod display;
pub mod snapshot;
pub mod stopwatch;

// Re-export main types
pub use app_state::AppState;
pub use coordinator::Coordinator;
pub use display::DisplayHub;
pub use snapshot::{SnapshotStore, TimerSnapshot, TimerView};
pub use stopwatch::{Stopwatch, TimerId, TimerUpdate, UpdateSink};
