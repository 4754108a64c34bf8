//! Utility functions module
//!
//! Display formatting and process signal handling.

pub mod format;
pub mod signals;

// Re-export main functions
pub use format::{format_elapsed, progress_percent};
pub use signals::shutdown_signal;
