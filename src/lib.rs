//! `hypnotic` is a real-time optical-illusion video effect.
//!
//! Every incoming [`VideoFrame`] is overlaid with an animated spiral, parabola or stripe pattern
//! and returned as a new frame with the same geometry, pixel format and timestamp.
//!
//! # Pipeline overview
//!
//! 1. **Table**: `(width, height, OpticMode) -> PatternTable`, rebuilt only when the frame size or
//!    the mode changes.
//! 2. **Phase**: advanced by `speedInc` once per processed frame, wrapped at [`PATTERN_PERIOD`].
//! 3. **Quantize**: `(table value + phase) mod 256 >= threshold` decides light or dark.
//! 4. **Combine**: the sample replaces or modulates the source pixel ([`Combine`]).
//!
//! # Design constraints
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic**: identical configuration and input frames give identical output bytes,
//!   with or without row-parallel combining.
//! - **Never stalls the stream**: empty frames pass through, unknown modes are ignored,
//!   thresholds are clamped; only allocation failure fails a frame.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

/// Pattern geometry, phase and quantization.
pub mod optics;

/// Effect properties, notifications and the frame stage.
pub mod effects;
/// Frame buffers.
pub mod frame;
/// Stream driver and sinks.
pub mod stream;

pub use crate::effects::combine::{Combine, LUMA_CUT, luma};
pub use crate::effects::config::{DEFAULT_SPEED_INC, DEFAULT_THRESHOLD, EffectConfig};
pub use crate::effects::hypnotic::{EffectStats, HypnoticElement, HypnoticOpts, RowThreading};
pub use crate::effects::notify::{ConfigChange, SubscriptionId};
pub use crate::foundation::core::{TimeBase, Timestamp};
pub use crate::foundation::error::{HypnoticError, HypnoticResult};
pub use crate::frame::video::{PixelFormat, VideoFrame};
pub use crate::optics::mode::OpticMode;
pub use crate::optics::phase::{Phase, advance};
pub use crate::optics::quantize::{
    PatternSample, THRESHOLD_MAX, THRESHOLD_MIN, clamp_threshold, quantize,
};
pub use crate::optics::table::{PATTERN_PERIOD, PatternTable};
pub use crate::stream::pipeline::{FrameFilter, StreamStats, run_stream};
pub use crate::stream::sink::{FrameSink, InMemorySink};
