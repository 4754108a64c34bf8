//! Stopwatch Deck - several independent stopwatches behind one HTTP API
//!
//! Each stopwatch accumulates time across start/stop cycles and reports its
//! state to a coordinator. The coordinator keeps the latest snapshot of every
//! stopwatch and publishes it to display clients on a fixed cadence, plus
//! immediately after any start, stop, reset, add or remove.

pub mod config;
pub mod error;
pub mod state;
pub mod api;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use error::CoordinatorError;
pub use state::{AppState, Coordinator, Stopwatch};
pub use api::create_router;
pub use utils::{format_elapsed, shutdown_signal};
