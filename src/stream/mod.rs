//! Stream plumbing around a frame filter.

/// Filter trait and the stream driver.
pub mod pipeline;
/// Output sinks.
pub mod sink;
