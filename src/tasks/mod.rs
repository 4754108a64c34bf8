//! Background tasks module
//!
//! Periodic loops that run alongside the stopwatches: one sampler per running
//! stopwatch and one display flush loop per coordinator.

pub mod flush;
pub mod handle;
pub mod sampler;

// Re-export main items
pub use flush::spawn_flush_loop;
pub use handle::TaskHandle;
pub use sampler::spawn_sampler;
