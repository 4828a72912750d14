//! Pattern geometry, animation phase and quantization.

/// Closed set of pattern geometries.
pub mod mode;
/// Phase accumulator.
pub mod phase;
/// Threshold quantizer.
pub mod quantize;
/// Precomputed per-pixel pattern tables.
pub mod table;
